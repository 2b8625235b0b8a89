use crate::error::AppError;
use std::path::{Component, Path, PathBuf};

/// Validate a snapshot hash used as a directory name.
/// Rejects anything that could escape the snapshots directory.
pub fn validate_hash(hash: &str) -> Result<(), AppError> {
    if hash.is_empty() {
        return Err(AppError::BadRequest("Empty hash".into()));
    }
    if hash.contains("..") || hash.contains('/') || hash.contains('\\') {
        return Err(AppError::BadRequest("Invalid hash".into()));
    }
    Ok(())
}

/// Validate and normalize a relative file path.
/// Rejects path traversal attempts and returns a clean relative path.
pub fn validate_relative_path(rel_path: &str) -> Result<String, AppError> {
    let path = Path::new(rel_path);

    if rel_path.is_empty() {
        return Err(AppError::BadRequest("Empty path".into()));
    }

    for component in path.components() {
        match component {
            Component::ParentDir => {
                return Err(AppError::Forbidden("Path traversal not allowed".into()));
            }
            Component::RootDir | Component::Prefix(_) => {
                // Strip leading slashes, reject Windows prefixes
            }
            Component::Normal(s) => {
                let s = s.to_string_lossy();
                if s.contains('\0') {
                    return Err(AppError::BadRequest("Null bytes not allowed in path".into()));
                }
            }
            Component::CurDir => {
                // Skip "."
            }
        }
    }

    let clean: PathBuf = path
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();

    let result = clean.to_string_lossy().to_string();
    if result.is_empty() {
        return Err(AppError::BadRequest("Path resolves to empty".into()));
    }

    Ok(result.replace('\\', "/"))
}
