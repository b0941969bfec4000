//! Environment-dependent constants of the CAM16 model.
//!
//! The same color measured under different white points, adapting luminance
//! or surround looks different. [`ViewingConditions`] precomputes everything
//! CAM16 needs from those physical parameters so that each conversion only
//! pays for the color-dependent part.

use crate::color_utils::{WHITE_POINT_D65, y_from_lstar};
use crate::math_utils::lerp;
use std::f64::consts::PI;

/// Derived CAM16 constants. Build with [`ViewingConditions::make`] or take the
/// sRGB-like [`ViewingConditions::default`].
///
/// Field names follow the usual CAM16 notation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewingConditions {
    /// Background induction factor, `Yb / Yw`.
    pub n: f64,
    /// Achromatic response of the white point.
    pub aw: f64,
    pub nbb: f64,
    pub ncb: f64,
    /// Exponential nonlinearity from the surround.
    pub c: f64,
    /// Chromatic induction factor.
    pub nc: f64,
    /// Per-channel degree of adaptation.
    pub rgb_d: [f64; 3],
    /// Luminance-level adaptation factor.
    pub fl: f64,
    pub fl_root: f64,
    pub z: f64,
}

impl ViewingConditions {
    /// Builds viewing conditions from a physical description of the scene.
    ///
    /// * `white_point` - XYZ of the adopted white.
    /// * `adapting_luminance` - luminance of the adapting field in cd/m²;
    ///   lux multiplied by about 0.0586.
    /// * `background_lstar` - L* of the area around the color.
    /// * `surround` - 0 is a dark theater, 1 a dim room, 2 an average surround.
    /// * `discounting_illuminant` - whether the eye fully discounts the tint of
    ///   the light source. Self-luminous displays do not.
    ///
    /// Inputs are trusted; a zero white-point component yields non-finite
    /// constants.
    pub fn make(
        white_point: [f64; 3],
        adapting_luminance: f64,
        background_lstar: f64,
        surround: f64,
        discounting_illuminant: bool,
    ) -> Self {
        let [x, y, z] = white_point;
        let r_w = x * 0.401288 + y * 0.650173 + z * -0.051461;
        let g_w = x * -0.250268 + y * 1.204414 + z * 0.045854;
        let b_w = x * -0.002079 + y * 0.048952 + z * 0.953127;

        let f = 0.8 + surround / 10.0;
        let c = if f >= 0.9 {
            lerp(0.59, 0.69, (f - 0.9) * 10.0)
        } else {
            lerp(0.525, 0.59, (f - 0.8) * 10.0)
        };
        let d = if discounting_illuminant {
            1.0
        } else {
            f * (1.0 - (1.0 / 3.6) * ((-adapting_luminance - 42.0) / 92.0).exp())
        };
        let d = d.clamp(0.0, 1.0);
        let nc = f;
        let rgb_d = [
            d * (100.0 / r_w) + 1.0 - d,
            d * (100.0 / g_w) + 1.0 - d,
            d * (100.0 / b_w) + 1.0 - d,
        ];

        let k = 1.0 / (5.0 * adapting_luminance + 1.0);
        let k4 = k * k * k * k;
        let k4f = 1.0 - k4;
        let fl = k4 * adapting_luminance + 0.1 * k4f * k4f * (5.0 * adapting_luminance).cbrt();

        let n = y_from_lstar(background_lstar) / white_point[1];
        let z = 1.48 + n.sqrt();
        let nbb = 0.725 / n.powf(0.2);
        let ncb = nbb;

        let rgb_a_factors = [
            (fl * rgb_d[0] * r_w / 100.0).powf(0.42),
            (fl * rgb_d[1] * g_w / 100.0).powf(0.42),
            (fl * rgb_d[2] * b_w / 100.0).powf(0.42),
        ];
        let rgb_a = rgb_a_factors.map(|factor| 400.0 * factor / (factor + 27.13));
        let aw = (2.0 * rgb_a[0] + rgb_a[1] + 0.05 * rgb_a[2]) * nbb;

        Self {
            n,
            aw,
            nbb,
            ncb,
            c,
            nc,
            rgb_d,
            fl,
            fl_root: fl.powf(0.25),
            z,
        }
    }

    /// Adapting luminance of a 200 lux room with a mid-gray background.
    pub fn default_adapting_luminance() -> f64 {
        (200.0 / PI) * y_from_lstar(50.0) / 100.0
    }
}

impl Default for ViewingConditions {
    /// sRGB-like viewing: D65, 200 lux, L* 50 background, average surround.
    fn default() -> Self {
        Self::make(
            WHITE_POINT_D65,
            Self::default_adapting_luminance(),
            50.0,
            2.0,
            false,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let vc = ViewingConditions::default();
        assert!((vc.n - 0.18418).abs() < 1e-3);
        assert!((vc.aw - 29.981).abs() < 1e-2);
        assert!((vc.nbb - 1.0169).abs() < 1e-3);
        assert_eq!(vc.nbb, vc.ncb);
        assert!((vc.c - 0.69).abs() < 1e-9);
        assert!((vc.nc - 1.0).abs() < 1e-9);
        assert!((vc.fl - 0.3884).abs() < 1e-3);
        assert!((vc.z - 1.909).abs() < 1e-3);
    }

    #[test]
    fn test_default_is_deterministic() {
        assert_eq!(ViewingConditions::default(), ViewingConditions::default());
    }

    #[test]
    fn test_discounting_illuminant_adapts_fully() {
        let vc = ViewingConditions::make(WHITE_POINT_D65, 11.72, 50.0, 2.0, true);
        // Full adaptation scales each cone response to 100 at the white point.
        let r_w = 95.047 * 0.401288 + 100.0 * 0.650173 + 108.883 * -0.051461;
        assert!((vc.rgb_d[0] - 100.0 / r_w).abs() < 1e-9);
    }

    #[test]
    fn test_dark_surround_lowers_c() {
        let dark = ViewingConditions::make(WHITE_POINT_D65, 11.72, 50.0, 0.0, false);
        assert!((dark.c - 0.525).abs() < 1e-9);
        assert!((dark.nc - 0.8).abs() < 1e-9);
    }
}
