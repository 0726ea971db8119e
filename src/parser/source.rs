use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::ModeError;

/// Expand `~/` against the user's home directory.
pub(crate) fn expand_home(raw: &Path) -> Result<PathBuf, ModeError> {
    let Some(rest) = raw.to_str().and_then(|s| s.strip_prefix("~/")) else {
        return Ok(raw.to_path_buf());
    };

    let home = dirs::home_dir().ok_or_else(|| ModeError::FileError {
        message: "Could not determine home directory for ~ expansion".into(),
        path: raw.to_string_lossy().to_string(),
        hint: Some("Set HOME or use an absolute path".into()),
        code: Some(300),
    })?;
    Ok(home.join(rest))
}

/// Reads a whole file. Invalid UTF-8 is replaced rather than rejected.
pub(crate) fn read_source(path: &Path) -> Result<String, ModeError> {
    let path = expand_home(path)?;

    let bytes = fs::read(&path).map_err(|e| match e.kind() {
        io::ErrorKind::OutOfMemory => ModeError::AllocationError {
            message: format!("Failed to buffer '{}': {}", path.display(), e),
            hint: None,
            code: Some(303),
        },
        _ => ModeError::FileError {
            message: format!("Failed to read file: {}", e),
            path: path.to_string_lossy().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        },
    })?;

    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}
