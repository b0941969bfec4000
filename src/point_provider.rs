//! Color spaces the k-means quantizer clusters in.

use crate::color_utils::{argb_from_lab, lab_from_argb};

/// Maps ARGB colors to points and measures how far apart two points are.
pub trait PointProvider {
    fn from_argb(&self, argb: u32) -> [f64; 3];
    fn to_argb(&self, point: &[f64; 3]) -> u32;
    /// Any monotone distance works; callers only compare values.
    fn distance(&self, one: &[f64; 3], two: &[f64; 3]) -> f64;
}

/// CIE L*a*b* with squared Euclidean distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointProviderLab;

impl PointProvider for PointProviderLab {
    fn from_argb(&self, argb: u32) -> [f64; 3] {
        lab_from_argb(argb)
    }

    fn to_argb(&self, point: &[f64; 3]) -> u32 {
        argb_from_lab(point[0], point[1], point[2])
    }

    fn distance(&self, one: &[f64; 3], two: &[f64; 3]) -> f64 {
        let dl = one[0] - two[0];
        let da = one[1] - two[1];
        let db = one[2] - two[2];
        dl * dl + da * da + db * db
    }
}
