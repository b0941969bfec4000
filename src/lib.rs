//! hctcolor - perceptual color science and source-color extraction
//!
//! This library measures colors in CAM16 and HCT (hue, chroma, tone),
//! solves HCT requests back to displayable sRGB, and picks the colors of an
//! image that would make good theme sources.
//!
//! ## Features
//!
//! - **CAM16** color appearance model, forward and inverse, with its UCS
//! - **HCT** construction by a double bisection over chroma and lightness
//! - **Quantizers**: exact histogram, Wu box cutting, weighted k-means and
//!   the Wu → k-means pipeline
//! - **Scoring** of quantized colors for use as a theme source
//! - **Blending** and **tonal palettes** built on HCT
//! - **Schemes and themes**: light and dark Material color roles
//!
//! ## Example
//!
//! ```rust
//! use hctcolor::{source_color_from_pixels, ExtractOptions, Hct};
//!
//! let pixels = vec![0xff4285f4; 64];
//! let source = source_color_from_pixels(&pixels, &ExtractOptions::default());
//! assert_eq!(source, 0xff4285f4);
//!
//! let lighter = Hct::from_argb(source).with_tone(80.0);
//! assert!((lighter.tone() - 80.0).abs() < 0.5);
//! ```

pub mod blend;
pub mod cam16;
pub mod color_utils;
pub mod error;
pub mod hct;
pub mod hex;
pub mod math_utils;
pub mod palettes;
pub mod pixels;
pub mod point_provider;
pub mod population_map;
pub mod quantizer;
pub mod quantizer_celebi;
pub mod quantizer_map;
pub mod quantizer_wsmeans;
pub mod quantizer_wu;
pub mod scheme;
pub mod score;
pub mod viewing_conditions;

pub use cam16::Cam16;
pub use error::{Error, Result};
pub use hct::Hct;
pub use hex::{argb_from_hex, hex_from_argb};
pub use palettes::{CorePalette, TonalPalette};
pub use pixels::PixelBuffer;
pub use population_map::PopulationMap;
pub use quantizer::{Quantizer, QuantizerKind, QuantizerResult};
pub use quantizer_celebi::QuantizerCelebi;
pub use quantizer_map::QuantizerMap;
pub use quantizer_wsmeans::QuantizerWsmeans;
pub use quantizer_wu::QuantizerWu;
pub use scheme::{theme_from_source_color, CustomColor, Scheme, Theme};
pub use score::Score;
pub use viewing_conditions::ViewingConditions;

use log::debug;
use serde::{Deserialize, Serialize};

/// Options for picking source colors out of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Colors the quantizer may produce before scoring (default: 128)
    pub max_colors: usize,
    /// Quantization pipeline (default: celebi)
    pub quantizer: QuantizerKind,
    /// How many ranked colors to report (default: 4)
    pub desired: usize,
    /// Returned when no color is suitable (default: 0xFF4285F4)
    pub fallback: u32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_colors: 128,
            quantizer: QuantizerKind::Celebi,
            desired: score::DEFAULT_DESIRED,
            fallback: score::DEFAULT_FALLBACK,
        }
    }
}

impl ExtractOptions {
    /// Rejects options no caller would mean, like a zero color budget.
    pub fn validate(&self) -> Result<()> {
        if self.max_colors == 0 {
            return Err(Error::InvalidMaxColors);
        }
        Ok(())
    }
}

/// Ranked theme source colors found in `pixels`, best first. Never empty.
///
/// Translucent pixels are ignored. With no suitable color the result is
/// `[options.fallback]`.
pub fn ranked_colors_from_pixels(pixels: &[u32], options: &ExtractOptions) -> Vec<u32> {
    let result = options.quantizer.quantize(pixels, options.max_colors);
    debug!(
        "{:?} quantizer kept {} colors from {} pixels",
        options.quantizer,
        result.color_to_count.len(),
        pixels.len()
    );
    Score::score_with(&result.color_to_count, options.desired, options.fallback)
}

/// The single best theme source color in `pixels`.
pub fn source_color_from_pixels(pixels: &[u32], options: &ExtractOptions) -> u32 {
    ranked_colors_from_pixels(pixels, options)
        .first()
        .copied()
        .unwrap_or(options.fallback)
}
