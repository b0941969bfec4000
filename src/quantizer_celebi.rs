//! Wu's box cut followed by weighted k-means seeded with its colors.
//!
//! Wu is fast but only approximate; k-means is accurate but depends on its
//! starting centroids. Feeding the first into the second gets both.
//!
//! M. Emre Celebi, "Improving the performance of k-means for color
//! quantization", Image and Vision Computing 29(4), 2011.

use crate::color_utils::is_opaque;
use crate::quantizer::{Quantizer, QuantizerResult};
use crate::quantizer_wsmeans;
use crate::quantizer_wu::QuantizerWu;
use log::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct QuantizerCelebi;

impl Quantizer for QuantizerCelebi {
    /// Translucent pixels are dropped before either stage sees them.
    fn quantize(&mut self, pixels: &[u32], max_colors: usize) -> QuantizerResult {
        let opaque: Vec<u32> = pixels.iter().copied().filter(|&pixel| is_opaque(pixel)).collect();
        let wu_colors = QuantizerWu::new().quantize_colors(&opaque, max_colors);
        debug!(
            "celebi: {} opaque of {} pixels, {} wu seeds",
            opaque.len(),
            pixels.len(),
            wu_colors.len()
        );
        quantizer_wsmeans::quantize(&opaque, &wu_colors, max_colors).into()
    }
}
