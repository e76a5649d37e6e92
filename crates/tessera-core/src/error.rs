//! Error types for layout construction and generation.

use thiserror::Error;

/// Errors raised by element containers and layout generation.
///
/// All of these are caller mistakes; none are transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Grid or flow accessed at an index past its current bound.
    #[error("cannot {operation} {target}: index {index} is out of range (len {len})")]
    IndexOutOfRange {
        operation: &'static str,
        target: &'static str,
        index: usize,
        len: usize,
    },

    /// A flow was given a centered alignment along its flow axis.
    #[error("cannot {operation}: {alignment} alignment is not supported by {container}")]
    InvalidAlignment {
        operation: &'static str,
        container: &'static str,
        alignment: &'static str,
    },

    /// The layout's own size or offset is relative.
    #[error("cannot generate: layout {field} must be absolute")]
    InvalidLayoutConfiguration { field: &'static str },
}

impl LayoutError {
    /// Build an out-of-range error when `index >= len`.
    pub fn check_index(
        operation: &'static str,
        target: &'static str,
        index: usize,
        len: usize,
    ) -> std::result::Result<(), Self> {
        if index < len {
            Ok(())
        } else {
            Err(Self::IndexOutOfRange {
                operation,
                target,
                index,
                len,
            })
        }
    }
}

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, LayoutError>;
