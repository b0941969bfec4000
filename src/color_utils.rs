//! Conversions between packed ARGB, linear RGB, XYZ, L*a*b* and L*.
//!
//! Linear RGB and XYZ components are scaled to `[0, 100]`; white is
//! `Y = 100`.

use crate::math_utils::{clamp_int, matrix_multiply};

pub const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.41233895, 0.35762064, 0.18051042],
    [0.2126, 0.7152, 0.0722],
    [0.01932141, 0.11916382, 0.95034478],
];

pub const XYZ_TO_SRGB: [[f64; 3]; 3] = [
    [3.2413774792388685, -1.5376652402851851, -0.49885366846268053],
    [-0.9691452513005321, 1.8758853451067872, 0.04156585616912061],
    [0.05562093689691305, -0.20395524564742123, 1.0571799111220335],
];

/// D65 reference white in XYZ.
pub const WHITE_POINT_D65: [f64; 3] = [95.047, 100.0, 108.883];

const LAB_EPSILON: f64 = 216.0 / 24389.0;
const LAB_KAPPA: f64 = 24389.0 / 27.0;

pub fn white_point_d65() -> [f64; 3] {
    WHITE_POINT_D65
}

/// Packs 8-bit channels into an opaque ARGB value.
pub fn argb_from_rgb(red: u8, green: u8, blue: u8) -> u32 {
    0xff00_0000 | (red as u32) << 16 | (green as u32) << 8 | blue as u32
}

pub fn alpha_from_argb(argb: u32) -> u8 {
    (argb >> 24) as u8
}

pub fn red_from_argb(argb: u32) -> u8 {
    (argb >> 16) as u8
}

pub fn green_from_argb(argb: u32) -> u8 {
    (argb >> 8) as u8
}

pub fn blue_from_argb(argb: u32) -> u8 {
    argb as u8
}

pub fn is_opaque(argb: u32) -> bool {
    alpha_from_argb(argb) == 255
}

/// Converts an 8-bit sRGB channel to linear RGB in `[0, 100]`.
pub fn linearized(rgb_component: u8) -> f64 {
    let normalized = rgb_component as f64 / 255.0;
    if normalized <= 0.040449936 {
        normalized / 12.92 * 100.0
    } else {
        ((normalized + 0.055) / 1.055).powf(2.4) * 100.0
    }
}

/// Converts a linear RGB component in `[0, 100]` to an 8-bit sRGB channel.
/// Out-of-range values are clamped.
pub fn delinearized(rgb_component: f64) -> u8 {
    let normalized = rgb_component / 100.0;
    let delinearized = if normalized <= 0.0031308 {
        normalized * 12.92
    } else {
        1.055 * normalized.powf(1.0 / 2.4) - 0.055
    };
    clamp_int(0, 255, (delinearized * 255.0).round() as i64) as u8
}

pub fn argb_from_linrgb(linrgb: [f64; 3]) -> u32 {
    argb_from_rgb(
        delinearized(linrgb[0]),
        delinearized(linrgb[1]),
        delinearized(linrgb[2]),
    )
}

pub fn argb_from_xyz(x: f64, y: f64, z: f64) -> u32 {
    argb_from_linrgb(matrix_multiply([x, y, z], &XYZ_TO_SRGB))
}

pub fn xyz_from_argb(argb: u32) -> [f64; 3] {
    let r = linearized(red_from_argb(argb));
    let g = linearized(green_from_argb(argb));
    let b = linearized(blue_from_argb(argb));
    matrix_multiply([r, g, b], &SRGB_TO_XYZ)
}

fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.powf(1.0 / 3.0)
    } else {
        (LAB_KAPPA * t + 16.0) / 116.0
    }
}

fn lab_invf(ft: f64) -> f64 {
    let ft3 = ft * ft * ft;
    if ft3 > LAB_EPSILON {
        ft3
    } else {
        (116.0 * ft - 16.0) / LAB_KAPPA
    }
}

pub fn argb_from_lab(l: f64, a: f64, b: f64) -> u32 {
    let fy = (l + 16.0) / 116.0;
    let fx = a / 500.0 + fy;
    let fz = fy - b / 200.0;
    let x = lab_invf(fx) * WHITE_POINT_D65[0];
    let y = lab_invf(fy) * WHITE_POINT_D65[1];
    let z = lab_invf(fz) * WHITE_POINT_D65[2];
    argb_from_xyz(x, y, z)
}

/// Converts a color to CIE L*a*b* under the D65 white point.
pub fn lab_from_argb(argb: u32) -> [f64; 3] {
    let [x, y, z] = xyz_from_argb(argb);
    let fx = lab_f(x / WHITE_POINT_D65[0]);
    let fy = lab_f(y / WHITE_POINT_D65[1]);
    let fz = lab_f(z / WHITE_POINT_D65[2]);
    let l = 116.0 * fy - 16.0;
    let a = 500.0 * (fx - fy);
    let b = 200.0 * (fy - fz);
    [l, a, b]
}

/// Gray ARGB with the given L*.
pub fn argb_from_lstar(lstar: f64) -> u32 {
    let fy = (lstar + 16.0) / 116.0;
    let cube = fy * fy * fy;
    let y = if lstar > 8.0 { cube } else { lstar / LAB_KAPPA };
    let xz = if cube > LAB_EPSILON { cube } else { lstar / LAB_KAPPA };
    argb_from_xyz(
        xz * WHITE_POINT_D65[0],
        y * WHITE_POINT_D65[1],
        xz * WHITE_POINT_D65[2],
    )
}

/// L* of a color; the tone in HCT.
pub fn lstar_from_argb(argb: u32) -> f64 {
    let y = xyz_from_argb(argb)[1] / 100.0;
    if y <= LAB_EPSILON {
        LAB_KAPPA * y
    } else {
        116.0 * y.powf(1.0 / 3.0) - 16.0
    }
}

/// Relative luminance Y in `[0, 100]` for an L*.
pub fn y_from_lstar(lstar: f64) -> f64 {
    if lstar > 8.0 {
        ((lstar + 16.0) / 116.0).powi(3) * 100.0
    } else {
        lstar / LAB_KAPPA * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_codec() {
        let argb = argb_from_rgb(0x12, 0x34, 0x56);
        assert_eq!(argb, 0xff123456);
        assert_eq!(alpha_from_argb(argb), 0xff);
        assert_eq!(red_from_argb(argb), 0x12);
        assert_eq!(green_from_argb(argb), 0x34);
        assert_eq!(blue_from_argb(argb), 0x56);
    }

    #[test]
    fn test_is_opaque() {
        assert!(is_opaque(0xff000000));
        assert!(!is_opaque(0xfe000000));
        assert!(!is_opaque(0x00ffffff));
    }

    #[test]
    fn test_linearized_round_trip_every_channel() {
        for v in 0..=255u8 {
            assert_eq!(delinearized(linearized(v)), v);
        }
    }

    #[test]
    fn test_delinearized_clamps() {
        assert_eq!(delinearized(-5.0), 0);
        assert_eq!(delinearized(150.0), 255);
    }

    #[test]
    fn test_lstar_extremes() {
        assert!(lstar_from_argb(0xff000000).abs() < 1e-9);
        assert!((lstar_from_argb(0xffffffff) - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_lstar_argb_inverse() {
        let mut t = 0.0;
        while t <= 100.0 {
            let round_trip = lstar_from_argb(argb_from_lstar(t));
            assert!((round_trip - t).abs() < 0.5, "tone {t} came back as {round_trip}");
            t += 0.5;
        }
    }

    #[test]
    fn test_argb_from_lstar_is_gray() {
        for t in [5.0, 25.0, 50.0, 75.0, 95.0] {
            let argb = argb_from_lstar(t);
            let r = red_from_argb(argb) as i32;
            let g = green_from_argb(argb) as i32;
            let b = blue_from_argb(argb) as i32;
            assert!((r - g).abs() <= 1 && (g - b).abs() <= 1, "{argb:08x} is not gray");
        }
    }

    #[test]
    fn test_y_from_lstar_matches_lstar() {
        assert!((y_from_lstar(50.0) - 18.418).abs() < 1e-2);
        assert!((y_from_lstar(100.0) - 100.0).abs() < 1e-9);
        assert_eq!(y_from_lstar(0.0), 0.0);
    }

    #[test]
    fn test_lab_round_trip() {
        for argb in [0xff000000u32, 0xffffffff, 0xff4285f4, 0xffabcdef, 0xff123456, 0xffff0000] {
            let [l, a, b] = lab_from_argb(argb);
            assert_eq!(argb_from_lab(l, a, b), argb);
        }
    }

    #[test]
    fn test_xyz_of_white() {
        let [x, y, z] = xyz_from_argb(0xffffffff);
        assert!((x - 95.047).abs() < 0.01);
        assert!((y - 100.0).abs() < 0.01);
        assert!((z - 108.883).abs() < 0.01);
    }
}
