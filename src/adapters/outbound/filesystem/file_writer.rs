use crate::ports::outbound::OutputPresenter;
use crate::shared::error::QueryError;
use crate::shared::Result;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// FileSystemWriter adapter for writing query results to a file (`-o`)
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    fn write_error(&self, details: impl Into<String>) -> anyhow::Error {
        QueryError::FileWriteError {
            path: self.output_path.clone(),
            details: details.into(),
        }
        .into()
    }

    /// Validates the destination before writing:
    /// - the parent directory must exist
    /// - an existing destination must not be a symbolic link
    fn validate_destination(&self) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if parent != Path::new("") && !parent.is_dir() {
                return Err(self.write_error(format!(
                    "Parent directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        if let Ok(metadata) = fs::symlink_metadata(&self.output_path) {
            if metadata.is_symlink() {
                return Err(self.write_error(
                    "Output path is a symbolic link; refusing to write through it",
                ));
            }
        }
        Ok(())
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        self.validate_destination()?;

        fs::write(&self.output_path, content).map_err(|e| self.write_error(e.to_string()))?;

        log::info!("Wrote {} bytes to {}", content.len(), self.output_path.display());
        eprintln!("✅ Output written to: {}", self.output_path.display());
        Ok(())
    }
}

/// StdoutPresenter adapter for writing query results to stdout
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|_| {
                if content.ends_with('\n') {
                    Ok(())
                } else {
                    stdout.write_all(b"\n")
                }
            })
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_writer_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("result.json");

        let writer = FileSystemWriter::new(output_path.clone());
        writer.present("{\"count\": 0}").unwrap();

        assert_eq!(fs::read_to_string(&output_path).unwrap(), "{\"count\": 0}");
    }

    #[test]
    fn test_file_writer_parent_directory_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("missing").join("result.json");

        let err = FileSystemWriter::new(output_path).present("x").unwrap_err();

        assert!(format!("{}", err).contains("Parent directory does not exist"));
        assert!(matches!(
            err.downcast_ref::<QueryError>(),
            Some(QueryError::FileWriteError { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_writer_refuses_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.json");
        fs::write(&target, "original").unwrap();
        let link = temp_dir.path().join("link.json");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let result = FileSystemWriter::new(link).present("replaced");

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&target).unwrap(), "original");
    }

    #[test]
    fn test_stdout_presenter_success() {
        assert!(StdoutPresenter::new().present("No results\n").is_ok());
    }
}
