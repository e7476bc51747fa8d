//! Request path to file mapping
//!
//! `""` and `"/"` map to the index document; everything else is normalized
//! segment by segment and joined under the static root. A path that would
//! climb above the root is refused.

use std::path::{Component, Path, PathBuf};

use super::error::ResolveError;

/// Document served for the root path, with the content type it is sent with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDocument {
    pub file_name: String,
    pub content_type: String,
}

impl Default for IndexDocument {
    fn default() -> Self {
        Self {
            file_name: "index.html".to_string(),
            content_type: "text/html".to_string(),
        }
    }
}

/// Where a request path points on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Index file name or the request path as received
    pub file_name: String,
    pub file_path: PathBuf,
    /// Only set for the root path
    pub default_content_type: Option<String>,
}

/// Returns true for the paths that address the index document
pub fn is_root_path(path: &str) -> bool {
    path.is_empty() || path == "/"
}

/// Map a request path onto the static root
///
/// Traversal outside the root is reported as [`ResolveError::NotFound`] so
/// callers cannot probe for files elsewhere on the host.
pub fn resolve_target(
    root: &Path,
    request_path: &str,
    index: &IndexDocument,
) -> Result<ResolvedTarget, ResolveError> {
    if is_root_path(request_path) {
        return Ok(ResolvedTarget {
            file_name: index.file_name.clone(),
            file_path: root.join(&index.file_name),
            default_content_type: Some(index.content_type.clone()),
        });
    }

    let relative = normalize(request_path).ok_or_else(|| ResolveError::NotFound {
        file_name: request_path.to_string(),
    })?;

    Ok(ResolvedTarget {
        file_name: request_path.to_string(),
        file_path: root.join(relative),
        default_content_type: None,
    })
}

/// Collapse `.` and `..` segments of a `/`-separated path
///
/// Returns `None` if the path climbs above its start, or if a segment is not
/// a plain file name on this platform (drive prefixes, backslashes, NUL).
pub fn normalize(request_path: &str) -> Option<PathBuf> {
    let mut segments: Vec<&str> = Vec::new();

    for segment in request_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            name => {
                if name.contains(['\\', '\0']) || !is_plain_name(name) {
                    return None;
                }
                segments.push(name);
            }
        }
    }

    Some(segments.iter().collect())
}

fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
