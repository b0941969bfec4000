//! Exact color histogram over opaque pixels.

use crate::color_utils::is_opaque;
use crate::population_map::PopulationMap;
use crate::quantizer::{Quantizer, QuantizerResult};

/// Counts every distinct opaque color. Pixels with alpha below 255 are
/// skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuantizerMap;

impl QuantizerMap {
    pub fn quantize_pixels(pixels: &[u32]) -> PopulationMap {
        let mut count_by_color = PopulationMap::new();
        for &pixel in pixels.iter().filter(|&&pixel| is_opaque(pixel)) {
            count_by_color.increment(pixel);
        }
        count_by_color
    }
}

impl Quantizer for QuantizerMap {
    /// The color limit does not apply; every opaque color is returned.
    fn quantize(&mut self, pixels: &[u32], _max_colors: usize) -> QuantizerResult {
        Self::quantize_pixels(pixels).into()
    }
}
