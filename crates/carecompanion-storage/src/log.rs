//! JSON-lines log files: one serialized record per line, append-only.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

/// Append one value as a single line. Creates the file if needed.
pub fn append_line<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(&line)?;
    file.sync_data()?;
    Ok(())
}

/// Read every record in file order. A missing file is an empty log.
///
/// An unterminated final line that fails to parse is a torn append and is
/// skipped. Any other unparseable line is [`StorageError::CorruptLine`].
pub fn read_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let terminated = contents.ends_with('\n');
    let lines: Vec<&str> = contents.lines().collect();
    let last = lines.len().saturating_sub(1);

    let mut out = Vec::with_capacity(lines.len());
    for (idx, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(line) {
            Ok(value) => out.push(value),
            Err(e) if idx == last && !terminated => {
                tracing::warn!(
                    path = %path.display(),
                    line = idx + 1,
                    error = %e,
                    "skipping torn trailing record"
                );
            }
            Err(e) => {
                return Err(StorageError::CorruptLine {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    message: e.to_string(),
                });
            }
        }
    }
    Ok(out)
}
