//! Tonal palettes: one hue and chroma, every tone on demand.

use crate::hct::Hct;
use std::cell::RefCell;
use std::collections::HashMap;

/// A hue and chroma from which colors of any tone are solved.
///
/// Solved tones are cached, so asking for the same tone twice only runs
/// the HCT search once.
#[derive(Debug, Clone)]
pub struct TonalPalette {
    hue: f64,
    chroma: f64,
    cache: RefCell<HashMap<u64, u32>>,
}

impl TonalPalette {
    /// Palette with the hue and chroma of `argb`.
    pub fn from_argb(argb: u32) -> Self {
        let hct = Hct::from_argb(argb);
        Self::from_hue_and_chroma(hct.hue(), hct.chroma())
    }

    pub fn from_hue_and_chroma(hue: f64, chroma: f64) -> Self {
        Self {
            hue,
            chroma,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn chroma(&self) -> f64 {
        self.chroma
    }

    /// ARGB at `tone` (L*, `[0, 100]`).
    pub fn tone(&self, tone: f64) -> u32 {
        let key = tone.to_bits();
        if let Some(&argb) = self.cache.borrow().get(&key) {
            return argb;
        }
        let argb = Hct::from_hct(self.hue, self.chroma, tone).to_argb();
        self.cache.borrow_mut().insert(key, argb);
        argb
    }
}

impl PartialEq for TonalPalette {
    fn eq(&self, other: &Self) -> bool {
        self.hue == other.hue && self.chroma == other.chroma
    }
}

/// The key palettes of a theme, all derived from one source color.
#[derive(Debug, Clone, PartialEq)]
pub struct CorePalette {
    pub a1: TonalPalette,
    pub a2: TonalPalette,
    pub a3: TonalPalette,
    pub n1: TonalPalette,
    pub n2: TonalPalette,
    pub error: TonalPalette,
}

impl CorePalette {
    pub fn of(argb: u32) -> Self {
        let hct = Hct::from_argb(argb);
        let hue = hct.hue();
        let chroma = hct.chroma();
        Self {
            a1: TonalPalette::from_hue_and_chroma(hue, chroma.max(48.0)),
            a2: TonalPalette::from_hue_and_chroma(hue, 16.0),
            a3: TonalPalette::from_hue_and_chroma(hue + 60.0, 24.0),
            n1: TonalPalette::from_hue_and_chroma(hue, 4.0),
            n2: TonalPalette::from_hue_and_chroma(hue, 8.0),
            error: TonalPalette::from_hue_and_chroma(25.0, 84.0),
        }
    }
}
