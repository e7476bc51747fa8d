//! Static asset resolver
//!
//! Single-shot transform from an [`InvocationRequest`] to an
//! [`InvocationResponse`]. Nothing is retained between calls and every
//! failure is turned into an error response here.

mod error;
mod source;
mod target;

pub use error::ResolveError;
pub use source::{Asset, AssetSource, LocalFs, SourceError};
pub use target::{is_root_path, normalize, resolve_target, IndexDocument, ResolvedTarget};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::event::{InvocationRequest, InvocationResponse};
use crate::http::date::format_http_date;
use crate::logger;

/// Resolves request paths against a fixed static root
#[derive(Debug, Clone)]
pub struct Resolver<S = LocalFs> {
    root: PathBuf,
    index: IndexDocument,
    source: S,
}

impl Resolver<LocalFs> {
    /// Resolver reading from the local filesystem
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_source(root, LocalFs)
    }
}

impl<S: AssetSource> Resolver<S> {
    pub fn with_source(root: impl Into<PathBuf>, source: S) -> Self {
        Self {
            root: root.into(),
            index: IndexDocument::default(),
            source,
        }
    }

    #[must_use]
    pub fn with_index(mut self, index: IndexDocument) -> Self {
        self.index = index;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve one request; never fails
    pub async fn resolve(&self, request: &InvocationRequest) -> InvocationResponse {
        match self.try_resolve(&request.path).await {
            Ok(response) => response,
            Err(err) => {
                logger::log_error(&err.to_string());
                InvocationResponse::from_error(&err)
            }
        }
    }

    async fn try_resolve(&self, path: &str) -> Result<InvocationResponse, ResolveError> {
        let target = resolve_target(&self.root, path, &self.index)?;

        logger::log_info(&format!("Retrieving file {}", target.file_name));
        let asset = self
            .source
            .load(&target.file_path)
            .await
            .map_err(|e| ResolveError::from_source(&target.file_name, e))?;

        let mut headers = BTreeMap::new();
        if let Some(modified) = asset.modified {
            headers.insert("Last-Modified".to_string(), format_http_date(modified));
        }
        if let Some(content_type) = target.default_content_type {
            logger::log_info(&format!("Defining content-type: {content_type}"));
            headers.insert("Content-Type".to_string(), content_type);
        }

        Ok(InvocationResponse::success(headers, &asset.bytes))
    }
}
