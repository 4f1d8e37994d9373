//! Seams to the collaborators that draw and save symbols.

use async_trait::async_trait;

use crate::config::PixelSize;
use crate::error::{RenderError, SaveError};
use crate::qrcode::QrCodeEcc;
use crate::validate::Content;

/// Error correction level used for every symbol.
pub const ERROR_CORRECTION: QrCodeEcc = QrCodeEcc::Medium;

/// What to draw: validated content at a given size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderRequest {
    content: Content,
    size: PixelSize,
}

impl RenderRequest {
    pub fn new(content: Content, size: PixelSize) -> Self {
        Self { content, size }
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn size(&self) -> PixelSize {
        self.size
    }

    pub fn error_correction(&self) -> QrCodeEcc {
        ERROR_CORRECTION
    }

    /// The same content at another size.
    pub fn resized(&self, size: PixelSize) -> Self {
        Self {
            content: self.content.clone(),
            size,
        }
    }
}

/// Turns a request into a drawable handle and a handle into PNG bytes.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Drawable result, owned by the artifact store once rendering succeeds.
    type Handle: Send + 'static;

    async fn render(&self, request: &RenderRequest) -> Result<Self::Handle, RenderError>;

    fn encode_png(&self, handle: &Self::Handle) -> Result<Vec<u8>, RenderError>;
}

/// Destination for exported images, e.g. a downloads directory.
pub trait SaveSink: Send + Sync {
    fn save(&self, bytes: &[u8], filename: &str) -> Result<(), SaveError>;
}
