use super::*;
use crate::viewing_conditions::ViewingConditions;

const RED: u32 = 0xffff0000;
const GREEN: u32 = 0xff00ff00;
const BLUE: u32 = 0xff0000ff;
const WHITE: u32 = 0xffffffff;
const BLACK: u32 = 0xff000000;

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 0.01,
        "{what}: expected {expected}, got {actual}"
    );
}

#[test]
fn test_red() {
    let cam = Cam16::from_argb(RED);
    assert_close(cam.hue(), 27.408, "hue");
    assert_close(cam.chroma(), 113.357, "chroma");
    assert_close(cam.j(), 46.445, "j");
    assert_close(cam.m(), 89.494, "m");
    assert_close(cam.s(), 91.889, "s");
    assert_close(cam.q(), 105.988, "q");
}

#[test]
fn test_green() {
    let cam = Cam16::from_argb(GREEN);
    assert_close(cam.hue(), 142.139, "hue");
    assert_close(cam.chroma(), 108.410, "chroma");
    assert_close(cam.j(), 79.331, "j");
    assert_close(cam.m(), 85.587, "m");
    assert_close(cam.s(), 78.604, "s");
    assert_close(cam.q(), 138.520, "q");
}

#[test]
fn test_blue() {
    let cam = Cam16::from_argb(BLUE);
    assert_close(cam.hue(), 282.788, "hue");
    assert_close(cam.chroma(), 87.230, "chroma");
    assert_close(cam.j(), 25.465, "j");
    assert_close(cam.m(), 68.867, "m");
    assert_close(cam.s(), 93.674, "s");
    assert_close(cam.q(), 78.481, "q");
}

#[test]
fn test_white() {
    let cam = Cam16::from_argb(WHITE);
    assert_close(cam.hue(), 209.492, "hue");
    assert_close(cam.chroma(), 2.869, "chroma");
    assert_close(cam.j(), 100.0, "j");
    assert_close(cam.m(), 2.265, "m");
    assert_close(cam.s(), 12.068, "s");
    assert_close(cam.q(), 155.521, "q");
}

#[test]
fn test_black() {
    let cam = Cam16::from_argb(BLACK);
    assert_eq!(cam.hue(), 0.0);
    assert_eq!(cam.chroma(), 0.0);
    assert_eq!(cam.j(), 0.0);
    assert_eq!(cam.q(), 0.0);
    assert_eq!(cam.m(), 0.0);
    assert_eq!(cam.s(), 0.0);
}

#[test]
fn test_round_trip_primaries_and_grays() {
    for argb in [RED, GREEN, BLUE, WHITE, BLACK, 0xff808080, 0xff4285f4, 0xffabcdef] {
        assert_eq!(Cam16::from_argb(argb).to_argb(), argb, "{argb:08x}");
    }
}

#[test]
fn test_round_trip_lattice() {
    let vc = ViewingConditions::default();
    for r in (0..=255u32).step_by(17) {
        for g in (0..=255u32).step_by(17) {
            for b in (0..=255u32).step_by(17) {
                let argb = 0xff000000 | r << 16 | g << 8 | b;
                let cam = Cam16::from_argb_in_viewing_conditions(argb, &vc);
                assert_eq!(cam.viewed(&vc), argb, "{argb:08x}");
            }
        }
    }
}

#[test]
fn test_viewed_is_idempotent() {
    let vc = ViewingConditions::default();
    for argb in [RED, 0xff336699, 0xffe0c030] {
        let once = Cam16::from_argb(argb).viewed(&vc);
        let twice = Cam16::from_argb(once).viewed(&vc);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_hue_in_range() {
    for argb in [RED, GREEN, BLUE, 0xffff00ff, 0xffff0080] {
        let hue = Cam16::from_argb(argb).hue();
        assert!((0.0..360.0).contains(&hue), "{hue}");
    }
}

#[test]
fn test_distance_to_self_is_zero() {
    let cam = Cam16::from_argb(0xff4285f4);
    assert_eq!(cam.distance(&cam), 0.0);
}

#[test]
fn test_distance_uses_compressed_ucs() {
    let a = Cam16::from_ucs(50.0, 0.0, 0.0);
    let b = Cam16::from_ucs(60.0, 0.0, 0.0);
    let expected = 1.41 * 10f64.powf(0.63);
    assert!((a.distance(&b) - expected).abs() < 1e-6);
    assert!((a.distance(&b) - b.distance(&a)).abs() < 1e-12);
}

#[test]
fn test_from_ucs_inverts_ucs() {
    let cam = Cam16::from_argb(0xff4285f4);
    let rebuilt = Cam16::from_ucs(cam.jstar(), cam.astar(), cam.bstar());
    assert!((rebuilt.j() - cam.j()).abs() < 1e-6);
    assert!((rebuilt.chroma() - cam.chroma()).abs() < 1e-6);
    assert!((rebuilt.hue() - cam.hue()).abs() < 1e-6);
    assert_eq!(rebuilt.to_argb(), 0xff4285f4);
}

#[test]
fn test_from_jch_matches_forward() {
    let cam = Cam16::from_argb(0xff336699);
    let rebuilt = Cam16::from_jch(cam.j(), cam.chroma(), cam.hue());
    assert!((rebuilt.q() - cam.q()).abs() < 1e-6);
    assert!((rebuilt.m() - cam.m()).abs() < 1e-6);
    assert!((rebuilt.s() - cam.s()).abs() < 1e-6);
    assert_eq!(rebuilt.to_argb(), 0xff336699);
}
