use thiserror::Error;

/// Main error type for domainmap
#[derive(Error, Debug)]
pub enum DomainmapError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML decoding errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Schema document is missing required fields or has the wrong shape
    #[error("Malformed schema: {0}")]
    MalformedSchema(String),

    /// A relationship refers to a table that is not declared in the schema
    #[error("Unknown table '{table}' referenced by relationship {source_table} -> {target_table}")]
    UnknownTable {
        table: String,
        source_table: String,
        target_table: String,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenient Result type using DomainmapError
pub type Result<T> = std::result::Result<T, DomainmapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainmapError::Config("Test error".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("Test error"));
    }

    #[test]
    fn test_unknown_table_display() {
        let err = DomainmapError::UnknownTable {
            table: "ghost".to_string(),
            source_table: "orders".to_string(),
            target_table: "ghost".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'ghost'"));
        assert!(msg.contains("orders -> ghost"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DomainmapError = io_err.into();
        assert!(matches!(err, DomainmapError::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: DomainmapError = json_err.into();
        assert!(matches!(err, DomainmapError::Json(_)));
    }
}
