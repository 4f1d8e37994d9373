//! The bundled renderer and save sink.
//!
//! [`QrRenderer`] draws symbols from [`crate::qrcode`] into grayscale images and encodes them
//! as PNG; [`DirectorySink`] writes exported files into a directory.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::{GrayImage, ImageBuffer, ImageFormat, Luma};

use crate::config::RenderStyle;
use crate::error::{RenderError, SaveError};
use crate::qrcode::QrCode;
use crate::render::{RenderRequest, Renderer, SaveSink};

/// Draws `qr` into a `size` × `size` image, quiet zone included.
///
/// Modules are scaled by nearest neighbour, so at sizes that are not a multiple of the module
/// count some rows and columns are one pixel wider than others.
pub fn rasterize(qr: &QrCode, size: u32, style: &RenderStyle) -> GrayImage {
    let border = i64::from(style.quiet_zone);
    let span = qr.size() as u64 + 2 * u64::from(style.quiet_zone);
    // Anything outside the i32 range is far outside the symbol, so it reads as light.
    let to_module = |px: u32| {
        let offset = (u64::from(px) * span / u64::from(size)) as i64 - border;
        i32::try_from(offset).unwrap_or(i32::MIN)
    };

    ImageBuffer::from_fn(size, size, |x, y| {
        if qr.get_module(to_module(x), to_module(y)) {
            Luma([style.dark])
        } else {
            Luma([style.light])
        }
    })
}

/// Encodes an image as PNG bytes.
pub fn encode_png(img: &GrayImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Renders with the bundled encoder. Handles are grayscale images.
#[derive(Clone, Debug, Default)]
pub struct QrRenderer {
    style: RenderStyle,
}

impl QrRenderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }
}

#[async_trait]
impl Renderer for QrRenderer {
    type Handle = GrayImage;

    async fn render(&self, request: &RenderRequest) -> Result<GrayImage, RenderError> {
        let qr = QrCode::encode_text(request.content().as_str(), request.error_correction())?;
        Ok(rasterize(&qr, request.size().get(), &self.style))
    }

    fn encode_png(&self, handle: &GrayImage) -> Result<Vec<u8>, RenderError> {
        Ok(encode_png(handle)?)
    }
}

/// Saves exports as files in one directory, creating it on first use.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl Default for DirectorySink {
    fn default() -> Self {
        Self::new("generated")
    }
}

impl SaveSink for DirectorySink {
    fn save(&self, bytes: &[u8], filename: &str) -> Result<(), SaveError> {
        let plain = Path::new(filename).file_name().and_then(|name| name.to_str());
        if filename.is_empty() || plain != Some(filename) {
            return Err(SaveError::InvalidName(filename.to_owned()));
        }

        if !self.directory.exists() {
            fs::create_dir_all(&self.directory).map_err(|source| SaveError::CreateDir {
                path: self.directory.clone(),
                source,
            })?;
        }

        let path = self.directory.join(filename);
        fs::write(&path, bytes).map_err(|source| SaveError::Write { path, source })
    }
}
