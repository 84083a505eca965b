use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Where rendered query results go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

impl From<Option<PathBuf>> for PresenterType {
    fn from(output: Option<PathBuf>) -> Self {
        output.map_or(PresenterType::Stdout, PresenterType::File)
    }
}

/// Factory for creating output presenters
///
/// This factory encapsulates the creation logic for different presenter implementations,
/// following the Factory Pattern. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct PresenterFactory;

impl PresenterFactory {
    /// Creates a presenter instance for the specified type
    ///
    /// # Examples
    /// ```
    /// use prodsec_query::application::factories::{PresenterFactory, PresenterType};
    ///
    /// let presenter = PresenterFactory::create(PresenterType::Stdout);
    /// ```
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_output_option() {
        assert_eq!(PresenterType::from(None), PresenterType::Stdout);
        assert_eq!(
            PresenterType::from(Some(PathBuf::from("affects.json"))),
            PresenterType::File(PathBuf::from("affects.json"))
        );
    }

    #[test]
    fn test_file_presenter_writes_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");

        let presenter = PresenterFactory::create(PresenterType::File(path.clone()));
        presenter.present("{\"name\": \"rhel-9.2.0.z\"}\n").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\"name\": \"rhel-9.2.0.z\"}\n");
    }

    #[test]
    fn test_file_presenter_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.json");

        let presenter = PresenterFactory::create(PresenterType::File(path));
        assert!(presenter.present("{}").is_err());
    }
}
