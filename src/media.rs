//! Product image filename rules and guarded deletion.
//!
//! The upload transport itself (multipart handling, writing the bytes) is an
//! external collaborator; this module owns the naming policy: a three-entry
//! extension allow-list, timestamp suffixes against collisions, and a guard
//! so the shared placeholder images can never be deleted.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
pub const RESERVED_FILENAMES: [&str; 2] = ["placeholder.png", "placeholder.svg"];

/// Check if a filename has an allowed image extension.
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str())
        }
        _ => false,
    }
}

/// Append a unix-timestamp suffix to the stem to avoid filename collisions:
/// `mug.png` → `mug_1700000000.png`.
pub fn timestamped_filename(filename: &str, uploaded_at: DateTime<Utc>) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_{ts}.{ext}", ts = uploaded_at.timestamp()),
        None => format!("{filename}_{ts}", ts = uploaded_at.timestamp()),
    }
}

/// Delete an uploaded image, refusing to touch the reserved placeholders.
/// Returns whether a file was actually removed; IO failures are logged, not
/// propagated, since a stale image file is harmless.
pub fn delete_image(upload_dir: &Path, filename: &str) -> bool {
    if RESERVED_FILENAMES.contains(&filename) {
        return false;
    }
    let path = upload_dir.join(filename);
    if !path.exists() {
        return false;
    }
    match std::fs::remove_file(&path) {
        Ok(()) => {
            info!(file = %path.display(), "Deleted product image");
            true
        }
        Err(e) => {
            warn!(file = %path.display(), error = %e, "Failed to delete product image");
            false
        }
    }
}
