//! # qrstudio
//!
//! Turn arbitrary text into a QR code image and a downloadable PNG, entirely offline.
//!
//! The heart of the crate is [`Workflow`], a small state machine that validates input,
//! delegates rendering to a [`Renderer`], keeps the single current artifact, regenerates it
//! when the output size changes and exports it under a file name derived from the content.
//!
//! ## Features
//!
//! - Input validation: surrounding whitespace trimmed, 1–2000 characters.
//! - Generation and regeneration with stale-result protection: only the newest request is
//!   ever displayed.
//! - Filesystem-safe, human-recognizable download names, even for non-Latin text and emoji.
//! - A bundled QR Code Model 2 encoder and PNG renderer; both seams are traits, so hosts can
//!   plug in their own drawing surface or download mechanism.
//!
//! ## Example
//!
//! ```rust
//! use qrstudio::{Completion, Config, PixelSize, Workflow, WorkflowState};
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let downloads = tempfile::tempdir().unwrap();
//! let workflow = Workflow::bundled(&Config::default(), downloads.path());
//!
//! workflow.submit("https://example.com").await.unwrap();
//! assert_eq!(workflow.state(), WorkflowState::Displaying);
//!
//! // same content, larger image, no re-validation
//! let resized = workflow.change_size(PixelSize::XLARGE).await.unwrap();
//! assert!(matches!(resized, Completion::Displayed(_)));
//!
//! let filename = workflow.export().unwrap();
//! assert!(filename.starts_with("qrcode-httpsexamplecom-"));
//! assert!(downloads.path().join(&filename).exists());
//! # });
//! ```
//!
//! ## Modules
//!
//! - [`workflow`]: the state machine.
//! - [`validate`], [`filename`], [`store`]: content checks, download names, the artifact slot.
//! - [`render`]: renderer and save-sink traits.
//! - [`qrcode`], [`helper`]: the bundled encoder, rasterizer and directory sink.
//! - [`config`], [`error`]: sizes, styling and the error taxonomy.

pub mod config;
pub mod error;
pub mod filename;
pub mod helper;
pub mod qrcode;
pub mod render;
pub mod store;
pub mod validate;
pub mod workflow;

pub use config::{Config, PixelSize, RenderStyle};
pub use error::{
    ConfigError, DataTooLong, ExportError, GenerationError, RenderError, SaveError,
    ValidationError, WorkflowError,
};
pub use filename::derive_filename;
pub use helper::{DirectorySink, QrRenderer};
pub use render::{RenderRequest, Renderer, SaveSink, ERROR_CORRECTION};
pub use store::{Artifact, ArtifactStore};
pub use validate::{validate, Content, Reason, TextValidator, ValidationResult, Validator};
pub use workflow::{Completion, Workflow, WorkflowState};
