use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Ensures the output directory is safe to write to.
pub fn get_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !force {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    std::fs::create_dir_all(dest_path).map_err(Error::IoError)
}

/// Writes `content` to `dest_path`, creating parent directories as needed.
pub fn write_file<P: AsRef<Path>>(content: &[u8], dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(dest_path, content).map_err(Error::IoError)
}

/// Joins a `/` separated output path onto `output_root`.
///
/// Components that would escape the root (`..`, absolute prefixes) are
/// rejected.
pub fn output_path<P: AsRef<Path>>(output_root: P, relative: &str) -> Result<PathBuf> {
    let mut target = output_root.as_ref().to_path_buf();
    for part in relative.split('/').filter(|p| !p.is_empty() && *p != ".") {
        if part == ".." || Path::new(part).is_absolute() {
            return Err(Error::ProcessError {
                source_path: relative.to_string(),
                e: "output path escapes the output directory".to_string(),
            });
        }
        target.push(part);
    }
    Ok(target)
}

/// Reads a JSON object of `group:artifact` → version.
pub fn read_version_map<P: AsRef<Path>>(
    path: P,
) -> Result<std::collections::HashMap<String, String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
