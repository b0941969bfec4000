//! Pixel lists fed to the quantizers.
//!
//! Image decoding is left to the caller. A buffer comes from decoded RGBA
//! samples or from text: a JSON array of packed ARGB integers, or hex
//! colors separated by whitespace or commas.

use crate::error::{Error, Result};
use crate::hex::argb_from_hex;
use log::{debug, warn};
use rgb::RGBA8;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Packed ARGB, one entry per pixel.
    pub pixels: Vec<u32>,
}

impl PixelBuffer {
    pub fn new(pixels: Vec<u32>) -> Self {
        Self { pixels }
    }

    pub fn from_rgba8(samples: &[RGBA8]) -> Self {
        let pixels = samples
            .iter()
            .map(|p| (p.a as u32) << 24 | (p.r as u32) << 16 | (p.g as u32) << 8 | p.b as u32)
            .collect();
        Self { pixels }
    }

    /// Parses pixel text, failing on the first bad hex token.
    ///
    /// JSON integers keep their alpha byte; hex tokens are always opaque.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_inner(text, false)
    }

    /// Like [`PixelBuffer::parse`] but skips hex tokens that do not parse.
    /// A malformed JSON array is still an error.
    pub fn parse_lenient(text: &str) -> Result<Self> {
        Self::parse_inner(text, true)
    }

    fn parse_inner(text: &str, lenient: bool) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.starts_with('[') {
            let pixels: Vec<u32> = serde_json::from_str(trimmed)
                .map_err(|e| Error::InvalidPixelData(format!("expected an array of ARGB integers: {e}")))?;
            return Ok(Self { pixels });
        }

        let mut pixels = Vec::new();
        let mut skipped = 0usize;
        for token in trimmed
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
        {
            match argb_from_hex(token) {
                Ok(argb) => pixels.push(argb),
                Err(_) if lenient => skipped += 1,
                Err(_) => {
                    return Err(Error::InvalidPixelData(format!("unrecognized color token {token:?}")));
                }
            }
        }
        if skipped > 0 {
            warn!("skipped {skipped} unparseable color tokens");
        }
        Ok(Self { pixels })
    }

    /// Reads and parses a pixel list file.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_inner(path, false)
    }

    /// Reads a pixel list file, skipping hex tokens that do not parse.
    pub fn load_lenient(path: &Path) -> Result<Self> {
        Self::load_inner(path, true)
    }

    fn load_inner(path: &Path, lenient: bool) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let buffer = Self::parse_inner(&text, lenient)?;
        debug!("loaded {} pixels from {}", buffer.len(), path.display());
        Ok(buffer)
    }

    /// Every n-th pixel, with n chosen so at most `max_pixels` remain.
    /// `max_pixels == 0` means no limit.
    pub fn sampled(&self, max_pixels: usize) -> Self {
        if max_pixels == 0 || self.pixels.len() <= max_pixels {
            return self.clone();
        }
        let step = self.pixels.len().div_ceil(max_pixels);
        Self {
            pixels: self.pixels.iter().copied().step_by(step).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }
}

impl From<Vec<u32>> for PixelBuffer {
    fn from(pixels: Vec<u32>) -> Self {
        Self { pixels }
    }
}
