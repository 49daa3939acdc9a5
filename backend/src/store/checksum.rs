//! Checksum calculation for skipping unchanged refreshes.

use sha2::{Digest, Sha256};
use std::path::Path;

use crate::source::{ErrorContext, SourceError, SourceResult};

/// SHA-256 of `content` as lowercase hex.
pub fn calculate_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// One SHA-256 over the concatenated contents of `paths`, in order.
pub fn checksum_files<P: AsRef<Path>>(paths: &[P]) -> SourceResult<String> {
    let mut hasher = Sha256::new();
    for path in paths {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            SourceError::io(
                e,
                ErrorContext::new("checksum").with_resource(path.display().to_string()),
            )
        })?;
        hasher.update(&bytes);
    }
    Ok(hex::encode(hasher.finalize()))
}
