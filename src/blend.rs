//! Mixing and hue-shifting colors in HCT and CAM16-UCS.

use crate::cam16::Cam16;
use crate::color_utils::lstar_from_argb;
use crate::hct::Hct;
use crate::math_utils::{difference_degrees, lerp, rotation_direction, sanitize_degrees_double};

/// Largest hue rotation `harmonize` will apply, in degrees.
pub const MAX_HARMONIZE_ROTATION: f64 = 15.0;

/// Shifts `design_color`'s hue toward `source_color`'s so the two sit
/// together better, keeping the design color recognizable.
///
/// The rotation is half the hue difference along the shorter arc, capped at
/// [`MAX_HARMONIZE_ROTATION`]. Chroma and tone come from `design_color`.
pub fn harmonize(design_color: u32, source_color: u32) -> u32 {
    let from = Hct::from_argb(design_color);
    let to = Hct::from_argb(source_color);
    let difference = difference_degrees(from.hue(), to.hue());
    let rotation = (difference * 0.5).min(MAX_HARMONIZE_ROTATION);
    let output_hue =
        sanitize_degrees_double(from.hue() + rotation * rotation_direction(from.hue(), to.hue()));
    Hct::from_hct(output_hue, from.chroma(), from.tone()).to_argb()
}

/// `from` with its hue moved `amount` of the way toward `to`'s, measured
/// through a CAM16-UCS blend. Chroma and tone stay those of `from`.
pub fn hct_hue(from: u32, to: u32, amount: f64) -> u32 {
    let ucs = cam16_ucs(from, to, amount);
    let ucs_cam = Cam16::from_argb(ucs);
    let from_cam = Cam16::from_argb(from);
    Hct::from_hct(ucs_cam.hue(), from_cam.chroma(), lstar_from_argb(from)).to_argb()
}

/// Linear interpolation between `from` (`amount` 0) and `to` (`amount` 1)
/// in CAM16-UCS.
pub fn cam16_ucs(from: u32, to: u32, amount: f64) -> u32 {
    let from_cam = Cam16::from_argb(from);
    let to_cam = Cam16::from_argb(to);
    let jstar = lerp(from_cam.jstar(), to_cam.jstar(), amount);
    let astar = lerp(from_cam.astar(), to_cam.astar(), amount);
    let bstar = lerp(from_cam.bstar(), to_cam.bstar(), amount);
    Cam16::from_ucs(jstar, astar, bstar).to_argb()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    const RED: u32 = 0xffff0000;
    const BLUE: u32 = 0xff0000ff;
    const GREEN: u32 = 0xff00ff00;
    const YELLOW: u32 = 0xffffff00;

    #[test]
    fn test_harmonize_known_pairs() {
        // Rotation is capped, so red only drifts a little toward each source.
        let toward_blue = Hct::from_argb(harmonize(RED, BLUE));
        let toward_green = Hct::from_argb(harmonize(RED, GREEN));
        let red = Hct::from_argb(RED);
        assert!(difference_degrees(toward_blue.hue(), red.hue()) <= 16.0);
        assert!(difference_degrees(toward_green.hue(), red.hue()) <= 16.0);
        assert!(rotation_direction(red.hue(), toward_green.hue()) > 0.0);
        assert!(rotation_direction(red.hue(), toward_blue.hue()) < 0.0);
    }

    #[test]
    fn test_harmonize_identical_is_unchanged() {
        for argb in [RED, GREEN, BLUE, YELLOW] {
            let harmonized = harmonize(argb, argb);
            let hue_shift = difference_degrees(Hct::from_argb(harmonized).hue(), Hct::from_argb(argb).hue());
            assert!(hue_shift < 2.0, "{argb:08x} moved {hue_shift}");
        }
    }

    #[test]
    fn test_harmonize_rotation_bound_and_direction() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            let design = Hct::from_hct(rng.gen_range(0.0..360.0), 30.0, rng.gen_range(40.0..60.0));
            let source = Hct::from_hct(rng.gen_range(0.0..360.0), 30.0, 50.0);
            let harmonized = Hct::from_argb(harmonize(design.to_argb(), source.to_argb()));

            let moved = difference_degrees(design.hue(), harmonized.hue());
            assert!(moved <= MAX_HARMONIZE_ROTATION + 3.0, "moved {moved}");

            let gap = difference_degrees(design.hue(), source.hue());
            if gap > 10.0 && gap < 170.0 {
                assert_eq!(
                    rotation_direction(design.hue(), harmonized.hue()),
                    rotation_direction(design.hue(), source.hue()),
                );
            }
        }
    }

    #[test]
    fn test_cam16_ucs_endpoints() {
        assert_eq!(cam16_ucs(RED, BLUE, 0.0), RED);
        assert_eq!(cam16_ucs(RED, BLUE, 1.0), BLUE);
    }

    #[test]
    fn test_cam16_ucs_midpoint_is_between() {
        let mid = Cam16::from_argb(cam16_ucs(0xff000000, 0xffffffff, 0.5));
        let black = Cam16::from_argb(0xff000000);
        let white = Cam16::from_argb(0xffffffff);
        assert!(mid.jstar() > black.jstar() && mid.jstar() < white.jstar());
    }

    #[test]
    fn test_hct_hue_keeps_tone() {
        let from = Hct::from_argb(RED);
        let blended = Hct::from_argb(hct_hue(RED, BLUE, 0.5));
        assert!((blended.tone() - from.tone()).abs() < 1.0);
        assert!(difference_degrees(blended.hue(), from.hue()) > 5.0);
    }
}
