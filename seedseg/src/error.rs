//! Error types for the segmentation session

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Outcome code reported for every session operation
///
/// A successful call reports [`Status::Success`]; failures map to the
/// remaining codes through [`SessionError::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    Failure,
    InvalidImage,
    SeedOutOfRange,
    NotReady,
}

impl Status {
    /// Status reported by an operation's result.
    pub fn of<T>(result: &SessionResult<T>) -> Status {
        match result {
            Ok(_) => Status::Success,
            Err(e) => e.status(),
        }
    }
}

/// Broad classification of a [`SessionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad path, undecodable image, out-of-range seed or wrong buffer format
    InvalidInput,
    /// A stage was invoked before the stage it depends on succeeded
    PreconditionNotMet,
    /// Unexpected failure inside a stage
    InternalFailure,
}

/// The stage result an operation is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prerequisite {
    /// No image has been loaded
    Image,
    /// No region has been computed for the current image
    Region,
    /// No perimeter has been computed for the current region
    Perimeter,
}

impl fmt::Display for Prerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Prerequisite::Image => "a loaded image",
            Prerequisite::Region => "a computed region",
            Prerequisite::Perimeter => "a computed perimeter",
        };
        f.write_str(name)
    }
}

/// Errors returned by [`crate::SegmentationSession`] operations
///
/// Every failing operation leaves the session exactly as it was before
/// the call.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The image could not be decoded or is not a color image
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Seed does not address a pixel of the loaded image
    #[error("seed ({x}, {y}) outside {width}x{height} image")]
    SeedOutOfRange {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    /// Operation invoked before the stage it depends on
    #[error("{operation} requires {missing}")]
    NotReady {
        operation: &'static str,
        missing: Prerequisite,
    },

    /// Writing a mask to disk failed
    #[error("failed to save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: seedseg_io::IoError,
    },

    /// Lower-layer error that a valid session state should never produce
    #[error("internal failure in {operation}: {message}")]
    Internal {
        operation: &'static str,
        message: String,
    },
}

impl SessionError {
    pub(crate) fn not_ready(operation: &'static str, missing: Prerequisite) -> Self {
        SessionError::NotReady { operation, missing }
    }

    pub(crate) fn internal(operation: &'static str, err: impl fmt::Display) -> Self {
        SessionError::Internal {
            operation,
            message: err.to_string(),
        }
    }

    /// Status code for this error.
    pub fn status(&self) -> Status {
        match self {
            SessionError::InvalidImage(_) => Status::InvalidImage,
            SessionError::SeedOutOfRange { .. } => Status::SeedOutOfRange,
            SessionError::NotReady { .. } => Status::NotReady,
            SessionError::Save { .. } | SessionError::Internal { .. } => Status::Failure,
        }
    }

    /// Error classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::InvalidImage(_)
            | SessionError::SeedOutOfRange { .. }
            | SessionError::Save { .. } => ErrorKind::InvalidInput,
            SessionError::NotReady { .. } => ErrorKind::PreconditionNotMet,
            SessionError::Internal { .. } => ErrorKind::InternalFailure,
        }
    }
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
