use thiserror::Error;

/// Errors that can occur while loading packages and manifests.
#[derive(Error, Debug)]
pub enum RepoToolsError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error.
    #[error("{0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The packages directory could not be enumerated.
    #[error("packages directory not found: {path}")]
    MissingPackagesDir { path: String },
}

/// Convenience alias for `Result<T, RepoToolsError>`.
pub type Result<T> = std::result::Result<T, RepoToolsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_error_displays_parser_message() {
        let yaml_err = serde_yaml_ng::from_str::<serde_yaml_ng::Value>("a: [b").unwrap_err();
        let expected = yaml_err.to_string();
        let err = RepoToolsError::from(yaml_err);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn io_error_converts_with_question_mark() {
        fn read() -> Result<String> {
            Ok(std::fs::read_to_string("/nonexistent/pubspec.yaml")?)
        }
        let err = read().unwrap_err();
        assert!(matches!(err, RepoToolsError::Io(_)));
        assert!(err.to_string().starts_with("IO error:"));
    }

    #[test]
    fn missing_packages_dir_names_path() {
        let err = RepoToolsError::MissingPackagesDir {
            path: "packages".into(),
        };
        assert_eq!(err.to_string(), "packages directory not found: packages");
    }
}
