//! Core error types for hierarchy layout
//!
//! This module defines the error type shared by parsing, configuration,
//! measurement and drawing.

use thiserror::Error;

/// Core error types for hierarchy layout and rendering
#[derive(Error, Debug)]
pub enum HierarchyError {
    #[error("Parse error: {message} at line {line}, column {column}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Config error: {message}")]
    ConfigError { message: String },

    #[error("Metrics error: cannot measure {text:?}: {message}")]
    MetricsError { text: String, message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl HierarchyError {
    /// Create a new parse error
    pub fn parse_error(message: String, line: usize, column: usize) -> Self {
        Self::ParseError {
            message,
            line,
            column,
        }
    }

    /// Create a new configuration error
    pub fn config_error(message: String) -> Self {
        Self::ConfigError { message }
    }

    /// Create a new metrics error for the text that could not be measured
    pub fn metrics_error(text: &str, message: String) -> Self {
        Self::MetricsError {
            text: text.to_string(),
            message,
        }
    }

    /// Create a new render error
    pub fn render_error(message: String) -> Self {
        Self::RenderError { message }
    }
}

impl From<serde_json::Error> for HierarchyError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse_error(err.to_string(), err.line(), err.column())
    }
}

/// Result alias used across the crate
pub type Result<T, E = HierarchyError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let error = HierarchyError::parse_error("expected value".to_string(), 5, 10);
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Parse error"));
        assert!(error_msg.contains("expected value"));
        assert!(error_msg.contains("line 5"));
        assert!(error_msg.contains("column 10"));
    }

    #[test]
    fn test_config_error() {
        let error = HierarchyError::config_error("ct must be at least 1".to_string());
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Config error"));
        assert!(error_msg.contains("ct must be at least 1"));
    }

    #[test]
    fn test_metrics_error_names_text() {
        let error = HierarchyError::metrics_error("child1", "font size is zero".to_string());
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("\"child1\""));
        assert!(error_msg.contains("font size is zero"));
    }

    #[test]
    fn test_render_error() {
        let error = HierarchyError::render_error("surface lost".to_string());
        assert!(format!("{}", error).contains("Render error"));
    }

    #[test]
    fn test_json_error_conversion_keeps_position() {
        let err = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }").unwrap_err();
        let error: HierarchyError = err.into();
        match error {
            HierarchyError::ParseError { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: HierarchyError = io_err.into();
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("File not found"));
    }
}
