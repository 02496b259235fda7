//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};
use std::path::PathBuf;

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A JSON document could not be parsed or rendered.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// A YAML document could not be parsed.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// A namespace binds the same method name more than once in the registry.
    ///
    /// Fatal: generation stops before anything is merged or written.
    #[from(ignore)]
    #[display("Duplicate MethodNames:[{}] in Namespace:[{namespace}]", names.join(","))]
    DuplicateMethodName {
        /// The offending namespace.
        namespace: String,
        /// Every method name that appears more than once.
        names: Vec<String>,
    },

    /// The routes file on disk differs from the freshly generated document.
    #[from(ignore)]
    #[display("Routes file is out of date: {}", _0.display())]
    OutOfDate(PathBuf),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_duplicate_method_name_message() {
        let err = AppError::DuplicateMethodName {
            namespace: "users".into(),
            names: vec!["get".into(), "list".into()],
        };
        assert_eq!(
            err.to_string(),
            "Duplicate MethodNames:[get,list] in Namespace:[users]"
        );
    }

    #[test]
    fn test_out_of_date_message() {
        let err = AppError::OutOfDate(PathBuf::from("src/routes/routes.json"));
        assert!(err.to_string().contains("src/routes/routes.json"));
    }
}
