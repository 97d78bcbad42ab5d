//! Error types for DDL parse tree decoding.

use thiserror::Error;

/// Broad classification of a [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ErrorKind {
    /// Fewer bytes remain than a read declared.
    Truncated,
    /// Element tag outside the closed set.
    UnknownVariant,
    /// Absolute position outside the input.
    OutOfRange,
    /// Nesting guard tripped.
    DepthExceeded,
}

impl ErrorKind {
    /// Returns a short, stable code for this kind (e.g., "D001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Truncated => "D001",
            ErrorKind::UnknownVariant => "D002",
            ErrorKind::OutOfRange => "D003",
            ErrorKind::DepthExceeded => "D004",
        }
    }
}

/// Error while decoding a single parse tree.
///
/// Offsets are absolute positions in the scanned input, so a failure deep
/// inside a nested namespace still points at the exact byte that could not
/// be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("[D001] truncated {context} at offset {offset:#x}: need {needed} bytes, {available} remain")]
    Truncated {
        context: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("[D002] unknown element tag {tag} at offset {offset:#x}")]
    UnknownVariant { tag: u8, offset: usize },

    #[error("[D003] position {offset:#x} (+{len}) is outside input of {size} bytes")]
    OutOfRange {
        offset: usize,
        len: usize,
        size: usize,
    },

    #[error("[D004] {context} nesting exceeds maximum depth {max} at offset {offset:#x}")]
    DepthExceeded {
        context: &'static str,
        offset: usize,
        max: usize,
    },
}

impl DecodeError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::Truncated { .. } => ErrorKind::Truncated,
            DecodeError::UnknownVariant { .. } => ErrorKind::UnknownVariant,
            DecodeError::OutOfRange { .. } => ErrorKind::OutOfRange,
            DecodeError::DepthExceeded { .. } => ErrorKind::DepthExceeded,
        }
    }

    /// Returns the absolute offset at which decoding stopped.
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::Truncated { offset, .. }
            | DecodeError::UnknownVariant { offset, .. }
            | DecodeError::OutOfRange { offset, .. }
            | DecodeError::DepthExceeded { offset, .. } => *offset,
        }
    }
}
