//! Error types for the directory page interaction layer.
//!
//! This module defines the centralized error type [`PageError`] and a type alias
//! [`Result`] used throughout the crate. None of these errors ever reach the
//! page visitor: the runtime logs them and keeps processing events, so one
//! failing handler cannot take the other controllers down with it.

use crate::domain::document::NodeId;
use thiserror::Error;

/// The main error type for document and controller operations.
///
/// # Examples
///
/// ```
/// use directory_page::domain::{Document, PageError};
///
/// let mut doc = Document::new();
/// let body = doc.body();
/// doc.remove(body).unwrap();
/// assert!(matches!(doc.set_text(body, "gone"), Err(PageError::UnknownNode(_))));
/// ```
#[derive(Debug, Error)]
pub enum PageError {
    /// A node id does not refer to a live element.
    ///
    /// Raised when a mutation targets an element that was never created in
    /// this document or has since been removed from it.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// A tree mutation would produce an invalid hierarchy.
    ///
    /// Covers inserting a node into its own subtree and using a reference
    /// node that is not a child of the given parent.
    #[error("hierarchy error: {0}")]
    Hierarchy(String),

    /// Configuration is invalid or missing.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading a markers file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A markers file is not valid TOML for the expected shape.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A host message could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for page operations.
pub type Result<T> = std::result::Result<T, PageError>;
