//! Common interface of the color quantizers.

use crate::population_map::PopulationMap;
use crate::quantizer_celebi::QuantizerCelebi;
use crate::quantizer_map::QuantizerMap;
use crate::quantizer_wsmeans::QuantizerWsmeans;
use crate::quantizer_wu::QuantizerWu;
use serde::{Deserialize, Serialize};

/// Colors a quantizer settled on, with the number of input pixels each one
/// stands for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantizerResult {
    pub color_to_count: PopulationMap,
}

impl From<PopulationMap> for QuantizerResult {
    fn from(color_to_count: PopulationMap) -> Self {
        Self { color_to_count }
    }
}

/// Reduces a pixel population to at most `max_colors` representative colors.
pub trait Quantizer {
    fn quantize(&mut self, pixels: &[u32], max_colors: usize) -> QuantizerResult;
}

/// Which quantization pipeline to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantizerKind {
    /// Exact opaque-pixel histogram; ignores the color limit.
    Map,
    Wu,
    /// Weighted k-means from random centroids.
    Wsmeans,
    /// Wu seeds refined by weighted k-means.
    #[default]
    Celebi,
}

impl QuantizerKind {
    pub fn quantize(self, pixels: &[u32], max_colors: usize) -> QuantizerResult {
        match self {
            QuantizerKind::Map => QuantizerMap.quantize(pixels, max_colors),
            QuantizerKind::Wu => QuantizerWu::new().quantize(pixels, max_colors),
            QuantizerKind::Wsmeans => QuantizerWsmeans::default().quantize(pixels, max_colors),
            QuantizerKind::Celebi => QuantizerCelebi.quantize(pixels, max_colors),
        }
    }
}
