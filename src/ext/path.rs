use std::path::{Component, Path};

use crate::error::{Error, Result};

/// Extension trait for Path to provide convenient string conversion methods
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid Unicode characters.
    ///
    /// # Examples
    /// ```
    /// use jme_initializer::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("test");
    /// assert_eq!(path.to_str_checked().unwrap(), "test");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// The path relative to `base`, with `/` separators on every platform.
    ///
    /// Template trees are keyed by these strings, so directive parsing never
    /// has to care about the host separator.
    ///
    /// # Examples
    /// ```
    /// use jme_initializer::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("bundle").join("src").join("[GAME_NAME].java");
    /// assert_eq!(path.to_slash_relative(Path::new("bundle")).unwrap(), "src/[GAME_NAME].java");
    /// ```
    fn to_slash_relative(&self, base: &Path) -> Result<String>;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| {
            Error::Other(anyhow::anyhow!(
                "Path '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }

    fn to_slash_relative(&self, base: &Path) -> Result<String> {
        let relative = self.strip_prefix(base).map_err(|e| Error::ProcessError {
            source_path: self.display().to_string(),
            e: e.to_string(),
        })?;

        let mut parts = Vec::new();
        for component in relative.components() {
            if let Component::Normal(part) = component {
                parts.push(Path::new(part).to_str_checked()?);
            }
        }
        Ok(parts.join("/"))
    }
}
