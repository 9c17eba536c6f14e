use std::{io, path::Path};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required argument '--{0}'")]
    MissingArgument(&'static str),
    #[error("File not found: '{0}'")]
    FileNotFound(String),
    #[error("Output directory does not exist for '{0}'")]
    DirectoryNotFound(String),
    #[error("Permission denied: '{0}'")]
    Permission(String),
    #[error("Failed YAML deserialization: {0}")]
    Parse(String),
    #[error("Unsupported mapping key: {0}")]
    UnsupportedKey(String),
    #[error("Failed JSON serialization: {0}")]
    Serialization(String),
    #[error("IO: {0}")]
    Io(String),
}

impl Error {
    /// Classifies a failed read of `path`.
    pub(crate) fn read(path: &Path, err: io::Error) -> Self {
        let shown = path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => Error::FileNotFound(shown),
            io::ErrorKind::PermissionDenied => Error::Permission(shown),
            _ => Error::Io(format!("Failed to read file '{}': {}", shown, err)),
        }
    }

    /// Classifies a failed write of `path`. A missing file on write means
    /// the parent directory is absent.
    pub(crate) fn write(path: &Path, err: io::Error) -> Self {
        let shown = path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => Error::DirectoryNotFound(shown),
            io::ErrorKind::PermissionDenied => Error::Permission(shown),
            _ => Error::Io(format!("Failed to write file '{}': {}", shown, err)),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_errors_are_classified_by_kind() {
        let path = Path::new("missing.yaml");
        let err = Error::read(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, Error::FileNotFound(p) if p == "missing.yaml"));

        let err = Error::read(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, Error::Permission(_)));

        let err = Error::read(path, io::Error::from(io::ErrorKind::InvalidData));
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn missing_file_on_write_means_missing_directory() {
        let path = Path::new("./temp/a.yaml.json");
        let err = Error::write(path, io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(
            err.to_string(),
            "Output directory does not exist for './temp/a.yaml.json'"
        );
    }
}
