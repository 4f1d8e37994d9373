//! Error taxonomy for the workflow and its collaborators.
//!
//! Every failure a user can trigger maps to one of the [`WorkflowError`] variants and carries a
//! message suitable for showing next to the input field. None of them is fatal.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::validate::Reason;

/// Why a piece of text was rejected before generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("please enter some content to convert")]
    Empty,
    #[error("content is too long ({length} characters, at most {max}), please use shorter text")]
    TooLong { length: usize, max: usize },
}

impl ValidationError {
    pub fn reason(&self) -> Reason {
        match self {
            Self::Empty => Reason::Empty,
            Self::TooLong { .. } => Reason::TooLong,
        }
    }
}

/// The renderer failed to produce a symbol for validated content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to generate the QR code, please try again ({detail})")]
pub struct GenerationError {
    pub detail: String,
}

impl From<RenderError> for GenerationError {
    fn from(err: RenderError) -> Self {
        Self { detail: err.to_string() }
    }
}

/// Exporting the current artifact failed. The artifact itself is kept.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("there is no QR code to download")]
    NothingToExport,
    #[error("download failed while encoding the image, please try again ({detail})")]
    Encode { detail: String },
    #[error("download failed, please try again ({detail})")]
    Save { detail: String },
}

impl From<SaveError> for ExportError {
    fn from(err: SaveError) -> Self {
        Self::Save { detail: err.to_string() }
    }
}

/// Any error surfaced by [`crate::workflow::Workflow`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Opaque failure reported by a [`crate::render::Renderer`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RenderError {
    message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl From<DataTooLong> for RenderError {
    fn from(err: DataTooLong) -> Self {
        Self::new(err.to_string())
    }
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        Self::new(err.to_string())
    }
}

/// Failure of a [`crate::render::SaveSink`].
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("invalid file name {0:?}")]
    InvalidName(String),
    #[error("cannot create directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported size {0}px")]
    UnsupportedSize(u32),
}

/// The data does not fit in any QR code version allowed by the caller.
///
/// Ways to handle this:
///
/// - Lower the error correction level.
/// - Shorten the text, or restrict it to digits or upper-case alphanumerics.
/// - Propagate the error upward to the user.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DataTooLong {
    /// The character count does not fit the segment's count field.
    #[error("segment too long")]
    SegmentTooLong,
    #[error("data length = {bits} bits, max capacity = {capacity} bits")]
    DataOverCapacity { bits: usize, capacity: usize },
}
