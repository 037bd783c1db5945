//! Zip archive inspection and human-readable sizes

use crate::error::{ArtifactError, Result};
use std::fs::File;
use std::path::Path;

const SIZE_BASE: f64 = 1024.0;
const SIZE_SUFFIXES: [char; 8] = ['K', 'M', 'G', 'T', 'P', 'E', 'Z', 'Y'];

/// Sum of the uncompressed sizes of every entry in the archive's central directory.
///
/// Entries are read raw, so encrypted or unsupported compression methods
/// still contribute their recorded size.
pub fn uncompressed_size(path: &Path) -> Result<u64> {
    let file = File::open(path).map_err(|e| ArtifactError::io(path, e))?;
    let invalid = |source| ArtifactError::InvalidArchive {
        path: path.to_path_buf(),
        source,
    };

    let mut archive = zip::ZipArchive::new(file).map_err(invalid)?;

    let mut total = 0u64;
    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index).map_err(invalid)?;
        total += entry.size();
    }

    Ok(total)
}

/// Format a byte count in GNU style: powers of 1024, one decimal place and a
/// single-letter suffix (`350B`, `1.5K`, `1.2G`).
pub fn format_size(bytes: u64) -> String {
    let value = bytes as f64;
    if value < SIZE_BASE {
        return format!("{}B", bytes);
    }

    let mut unit = SIZE_BASE;
    for suffix in &SIZE_SUFFIXES[..SIZE_SUFFIXES.len() - 1] {
        if value < unit * SIZE_BASE {
            return format!("{:.1}{}", value / unit, suffix);
        }
        unit *= SIZE_BASE;
    }

    format!("{:.1}{}", value / unit, SIZE_SUFFIXES[SIZE_SUFFIXES.len() - 1])
}
