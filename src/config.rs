//! Output sizes and rendering settings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Edge length in pixels of the square output, restricted to the sizes offered to users.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PixelSize(u32);

impl PixelSize {
    /// Every size a user can pick, smallest first.
    pub const ALLOWED: [u32; 4] = [128, 256, 384, 512];

    pub const SMALL: PixelSize = PixelSize(128);
    pub const MEDIUM: PixelSize = PixelSize(256);
    pub const LARGE: PixelSize = PixelSize(384);
    pub const XLARGE: PixelSize = PixelSize(512);

    pub const fn get(self) -> u32 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = PixelSize> {
        Self::ALLOWED.into_iter().map(PixelSize)
    }
}

impl Default for PixelSize {
    fn default() -> Self {
        Self::MEDIUM
    }
}

impl TryFrom<u32> for PixelSize {
    type Error = ConfigError;

    fn try_from(px: u32) -> Result<Self, Self::Error> {
        if Self::ALLOWED.contains(&px) {
            Ok(Self(px))
        } else {
            Err(ConfigError::UnsupportedSize(px))
        }
    }
}

impl From<PixelSize> for u32 {
    fn from(size: PixelSize) -> u32 {
        size.0
    }
}

impl fmt::Display for PixelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

/// How modules are painted by [`crate::helper::QrRenderer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Light border around the symbol, in modules.
    pub quiet_zone: u32,
    /// Luma of dark modules.
    pub dark: u8,
    /// Luma of light modules and the quiet zone.
    pub light: u8,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            quiet_zone: 4,
            dark: 0,
            light: 255,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Size used for the first generation of a session.
    pub initial_size: PixelSize,
    pub style: RenderStyle,
}
