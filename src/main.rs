use std::io::Read;
use std::sync::Arc;

use asset_resolver::config::{self, AppState, Config};
use asset_resolver::invoke::invoke_json;
use asset_resolver::logger;
use asset_resolver::server::{self, SignalHandler};

const USAGE: &str = "\
Usage: asset_resolver [serve|invoke] [CONFIG]

Commands:
  serve    Run the local HTTP gateway (default)
  invoke   Read one JSON event from stdin, write the JSON response to stdout

CONFIG is a config file path, extension optional (default: config)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Serve,
    Invoke,
    Help,
}

fn parse_args(args: &[String]) -> Result<(Command, String), String> {
    let mut command = None;
    let mut config_path = None;

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" | "help" => return Ok((Command::Help, String::new())),
            "serve" if command.is_none() => command = Some(Command::Serve),
            "invoke" if command.is_none() => command = Some(Command::Invoke),
            other if other.starts_with('-') => return Err(format!("Unknown option: {other}")),
            other if config_path.is_none() => config_path = Some(other.to_string()),
            other => return Err(format!("Unexpected argument: {other}")),
        }
    }

    Ok((
        command.unwrap_or(Command::Serve),
        config_path.unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string()),
    ))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (command, config_path) = parse_args(&args).map_err(|e| format!("{e}\n\n{USAGE}"))?;

    if command == Command::Help {
        println!("{USAGE}");
        return Ok(());
    }

    let cfg = Config::load_from(&config_path)?;

    match command {
        Command::Invoke => run_invoke(&cfg),
        _ => run_serve(cfg),
    }
}

fn run_invoke(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    logger::init_stderr(cfg)?;

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let state = AppState::new(cfg.clone());
    let output = runtime.block_on(invoke_json(&state.resolver, &input))?;

    println!("{output}");
    Ok(())
}

fn run_serve(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    logger::init(&cfg)?;

    // Worker count from config, CPU cores otherwise
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &cfg);

    let signals = Arc::new(SignalHandler::new());
    server::signal::start_signal_handler(Arc::clone(&signals))?;

    let state = AppState::shared(cfg);
    if !state.resolver.root().is_dir() {
        logger::log_warning(&format!(
            "Static root '{}' is not a directory; every request will fail",
            state.resolver.root().display()
        ));
    }

    // Connections are served with spawn_local
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(listener, state, signals))
        .await;

    logger::log_info("Server stopped");
    Ok(())
}
