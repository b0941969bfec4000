use super::*;
use crate::color_utils::argb_from_lstar;
use crate::math_utils::difference_degrees;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_opaque(rng: &mut ChaCha8Rng) -> u32 {
    0xff000000 | rng.gen_range(0..=0x00ff_ffffu32)
}

fn max_channel_delta(a: u32, b: u32) -> u32 {
    [16, 8, 0]
        .iter()
        .map(|shift| ((a >> shift) & 0xff).abs_diff((b >> shift) & 0xff))
        .max()
        .unwrap_or(0)
}

#[test]
fn test_solver_recovers_measured_color() {
    let vc = ViewingConditions::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut exact = 0;
    for _ in 0..1000 {
        let argb = random_opaque(&mut rng);
        let hct = Hct::from_argb(argb);
        assert_eq!(hct.to_argb(), argb);
        let solved = solve_to_argb(hct.hue(), hct.chroma(), hct.tone(), &vc);
        let delta = max_channel_delta(solved, argb);
        assert!(delta <= 1, "{argb:08x} solved to {solved:08x}");
        if delta == 0 {
            exact += 1;
        }
    }
    assert!(exact >= 990, "only {exact} of 1000 colors solved exactly");
}

#[test]
fn test_from_argb_fields_match_cam16_and_lstar() {
    let hct = Hct::from_argb(0xff4285f4);
    let cam = Cam16::from_argb(0xff4285f4);
    assert_eq!(hct.hue(), cam.hue());
    assert_eq!(hct.chroma(), cam.chroma());
    assert_eq!(hct.tone(), lstar_from_argb(0xff4285f4));
}

#[test]
fn test_solved_tone_tracks_request() {
    let vc = ViewingConditions::default();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..200 {
        let argb = random_opaque(&mut rng);
        let hct = Hct::from_argb(argb);
        let solved = solve_to_argb(hct.hue(), hct.chroma(), hct.tone(), &vc);
        let tone = lstar_from_argb(solved);
        assert!(
            (tone - hct.tone()).abs() < 0.5,
            "{argb:08x}: tone {} solved to {tone}",
            hct.tone()
        );
    }
}

#[test]
fn test_low_chroma_is_gray() {
    let vc = ViewingConditions::default();
    assert_eq!(solve_to_argb(120.0, 0.5, 50.0, &vc), argb_from_lstar(50.0));
    assert_eq!(solve_to_argb(300.0, 0.0, 72.0, &vc), argb_from_lstar(72.0));
}

#[test]
fn test_tone_extremes_are_black_and_white() {
    assert_eq!(Hct::from_hct(40.0, 80.0, 0.0).to_argb(), 0xff000000);
    assert_eq!(Hct::from_hct(40.0, 80.0, 100.0).to_argb(), 0xffffffff);
    assert_eq!(Hct::from_hct(40.0, 80.0, -10.0).to_argb(), 0xff000000);
    assert_eq!(Hct::from_hct(40.0, 80.0, 140.0).to_argb(), 0xffffffff);
}

#[test]
fn test_in_gamut_request_is_honored() {
    let hct = Hct::from_hct(120.0, 30.0, 50.0);
    assert!(difference_degrees(hct.hue(), 120.0) < 2.0, "hue {}", hct.hue());
    assert!((hct.chroma() - 30.0).abs() < 2.0, "chroma {}", hct.chroma());
    assert!((hct.tone() - 50.0).abs() < 0.5, "tone {}", hct.tone());
}

#[test]
fn test_out_of_gamut_chroma_is_reduced() {
    let hct = Hct::from_hct(120.0, 200.0, 50.0);
    assert!(hct.chroma() < 200.0);
    assert!(hct.chroma() > 10.0, "chroma {}", hct.chroma());
    assert!(difference_degrees(hct.hue(), 120.0) < 3.0, "hue {}", hct.hue());
    assert!((hct.tone() - 50.0).abs() < 0.5, "tone {}", hct.tone());
}

#[test]
fn test_hue_is_sanitized() {
    let hct = Hct::from_hct(-30.0, 40.0, 50.0);
    assert!(difference_degrees(hct.hue(), 330.0) < 3.0, "hue {}", hct.hue());
}

#[test]
fn test_fields_consistent_with_argb() {
    for (h, c, t) in [(10.0, 60.0, 40.0), (200.0, 20.0, 70.0), (280.0, 90.0, 30.0)] {
        let hct = Hct::from_hct(h, c, t);
        let remeasured = Hct::from_argb(hct.to_argb());
        assert_eq!(hct, remeasured);
    }
}

#[test]
fn test_setting_current_values_is_noop() {
    let hct = Hct::from_hct(210.0, 36.0, 62.0);
    assert_eq!(hct.with_hue(hct.hue()).to_argb(), hct.to_argb());
    assert_eq!(hct.with_chroma(hct.chroma()).to_argb(), hct.to_argb());
    assert_eq!(hct.with_tone(hct.tone()).to_argb(), hct.to_argb());
}

#[test]
fn test_with_tone_moves_tone_only() {
    let original = Hct::from_argb(0xff4285f4);
    let lighter = original.with_tone(80.0);
    assert!((lighter.tone() - 80.0).abs() < 0.5, "tone {}", lighter.tone());
    assert!(difference_degrees(lighter.hue(), original.hue()) < 3.0);
    assert!(lighter.chroma() <= original.chroma() + 2.0);
    // The source value is untouched.
    assert_eq!(original.to_argb(), 0xff4285f4);
}

#[test]
fn test_with_hue_rotates() {
    let original = Hct::from_hct(30.0, 40.0, 60.0);
    let rotated = original.with_hue(150.0);
    assert!(difference_degrees(rotated.hue(), 150.0) < 3.0, "hue {}", rotated.hue());
    assert!((rotated.tone() - 60.0).abs() < 0.5);
}

#[test]
fn test_with_chroma_zero_is_gray() {
    let original = Hct::from_hct(30.0, 40.0, 60.0);
    let gray = original.with_chroma(0.0);
    assert_eq!(gray.to_argb(), argb_from_lstar(original.tone()));
}

#[test]
fn test_find_cam_by_j_meets_tolerances() {
    let vc = ViewingConditions::default();
    let cam = find_cam_by_j(250.0, 30.0, 45.0, &vc).expect("in-gamut request");
    let tone = lstar_from_argb(cam.viewed(&vc));
    assert!((tone - 45.0).abs() < DL_MAX);
    let requested_hue = Cam16::from_jch_in_viewing_conditions(cam.j(), cam.chroma(), 250.0, &vc);
    assert!(cam.distance(&requested_hue) <= DE_MAX);
}

#[test]
fn test_other_viewing_conditions_round_trip() {
    let dim = ViewingConditions::make(
        crate::color_utils::WHITE_POINT_D65,
        20.0,
        30.0,
        1.0,
        false,
    );
    let hct = Hct::from_argb_in_viewing_conditions(0xff336699, &dim);
    assert_eq!(hct.to_argb(), 0xff336699);
    let retoned = hct.with_tone(60.0);
    assert_eq!(retoned.viewing_conditions(), &dim);
    assert!((retoned.tone() - 60.0).abs() < 0.5);
}
