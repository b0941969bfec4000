//! CAM16 color appearance model.
//!
//! A color is not just its ARGB value but that value seen under some
//! [`ViewingConditions`]. CAM16 maps the pair to perceptual attributes
//! (hue, chroma, lightness, brightness, colorfulness, saturation) and to the
//! CAM16-UCS coordinates J*, a*, b*, where Euclidean-like distance tracks
//! perceived difference.

use crate::color_utils::{argb_from_xyz, blue_from_argb, green_from_argb, linearized, red_from_argb};
use crate::math_utils::signum;
use crate::viewing_conditions::ViewingConditions;

/// A color in CAM16. Any three of the attributes determine the rest, so
/// values are only built through the `from_*` constructors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cam16 {
    hue: f64,
    chroma: f64,
    j: f64,
    q: f64,
    m: f64,
    s: f64,
    jstar: f64,
    astar: f64,
    bstar: f64,
}

impl Cam16 {
    /// Hue in degrees, `[0, 360)`.
    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// Informally colorfulness; like HSL saturation but perceptually accurate.
    pub fn chroma(&self) -> f64 {
        self.chroma
    }

    /// Lightness.
    pub fn j(&self) -> f64 {
        self.j
    }

    /// Brightness; lightness relative to the white point's brightness.
    pub fn q(&self) -> f64 {
        self.q
    }

    /// Colorfulness.
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Saturation; chroma relative to the white point's chroma.
    pub fn s(&self) -> f64 {
        self.s
    }

    pub fn jstar(&self) -> f64 {
        self.jstar
    }

    pub fn astar(&self) -> f64 {
        self.astar
    }

    pub fn bstar(&self) -> f64 {
        self.bstar
    }

    /// Perceptual distance in CAM16-UCS.
    pub fn distance(&self, other: &Cam16) -> f64 {
        let d_j = self.jstar - other.jstar;
        let d_a = self.astar - other.astar;
        let d_b = self.bstar - other.bstar;
        let d_e_prime = (d_j * d_j + d_a * d_a + d_b * d_b).sqrt();
        1.41 * d_e_prime.powf(0.63)
    }

    /// CAM16 of `argb` in the default viewing conditions.
    pub fn from_argb(argb: u32) -> Self {
        Self::from_argb_in_viewing_conditions(argb, &ViewingConditions::default())
    }

    pub fn from_argb_in_viewing_conditions(argb: u32, vc: &ViewingConditions) -> Self {
        let red_l = linearized(red_from_argb(argb));
        let green_l = linearized(green_from_argb(argb));
        let blue_l = linearized(blue_from_argb(argb));
        let x = 0.41233895 * red_l + 0.35762064 * green_l + 0.18051042 * blue_l;
        let y = 0.2126 * red_l + 0.7152 * green_l + 0.0722 * blue_l;
        let z = 0.01932141 * red_l + 0.11916382 * green_l + 0.95034478 * blue_l;

        // Cone responses, then chromatic adaptation.
        let r_c = 0.401288 * x + 0.650173 * y - 0.051461 * z;
        let g_c = -0.250268 * x + 1.204414 * y + 0.045854 * z;
        let b_c = -0.002079 * x + 0.048952 * y + 0.953127 * z;
        let r_d = vc.rgb_d[0] * r_c;
        let g_d = vc.rgb_d[1] * g_c;
        let b_d = vc.rgb_d[2] * b_c;

        let r_af = (vc.fl * r_d.abs() / 100.0).powf(0.42);
        let g_af = (vc.fl * g_d.abs() / 100.0).powf(0.42);
        let b_af = (vc.fl * b_d.abs() / 100.0).powf(0.42);
        let r_a = signum(r_d) * 400.0 * r_af / (r_af + 27.13);
        let g_a = signum(g_d) * 400.0 * g_af / (g_af + 27.13);
        let b_a = signum(b_d) * 400.0 * b_af / (b_af + 27.13);

        // Opponent signals.
        let a = (11.0 * r_a + -12.0 * g_a + b_a) / 11.0;
        let b = (r_a + g_a - 2.0 * b_a) / 9.0;
        let u = (20.0 * r_a + 20.0 * g_a + 21.0 * b_a) / 20.0;
        let p2 = (40.0 * r_a + 20.0 * g_a + b_a) / 20.0;

        let atan_degrees = b.atan2(a).to_degrees();
        let hue = if atan_degrees < 0.0 {
            atan_degrees + 360.0
        } else if atan_degrees >= 360.0 {
            atan_degrees - 360.0
        } else {
            atan_degrees
        };
        let hue_radians = hue.to_radians();

        let ac = p2 * vc.nbb;
        let j = 100.0 * (ac / vc.aw).powf(vc.c * vc.z);
        let q = (4.0 / vc.c) * (j / 100.0).sqrt() * (vc.aw + 4.0) * vc.fl_root;

        let hue_prime = if hue < 20.14 { hue + 360.0 } else { hue };
        let e_hue = 0.25 * ((hue_prime.to_radians() + 2.0).cos() + 3.8);
        let p1 = (50000.0 / 13.0) * e_hue * vc.nc * vc.ncb;
        let t = p1 * (a * a + b * b).sqrt() / (u + 0.305);
        let alpha = t.powf(0.9) * (1.64 - 0.29f64.powf(vc.n)).powf(0.73);
        let chroma = alpha * (j / 100.0).sqrt();
        let m = chroma * vc.fl_root;
        let s = 50.0 * (alpha * vc.c / (vc.aw + 4.0)).sqrt();

        let (jstar, astar, bstar) = ucs_from_jmh(j, m, hue_radians);
        Self {
            hue,
            chroma,
            j,
            q,
            m,
            s,
            jstar,
            astar,
            bstar,
        }
    }

    /// CAM16 from lightness, chroma and hue in the default viewing conditions.
    pub fn from_jch(j: f64, c: f64, h: f64) -> Self {
        Self::from_jch_in_viewing_conditions(j, c, h, &ViewingConditions::default())
    }

    pub fn from_jch_in_viewing_conditions(j: f64, c: f64, h: f64, vc: &ViewingConditions) -> Self {
        let q = (4.0 / vc.c) * (j / 100.0).sqrt() * (vc.aw + 4.0) * vc.fl_root;
        let m = c * vc.fl_root;
        let alpha = c / (j / 100.0).sqrt();
        let s = 50.0 * (alpha * vc.c / (vc.aw + 4.0)).sqrt();
        let (jstar, astar, bstar) = ucs_from_jmh(j, m, h.to_radians());
        Self {
            hue: h,
            chroma: c,
            j,
            q,
            m,
            s,
            jstar,
            astar,
            bstar,
        }
    }

    /// CAM16 from CAM16-UCS coordinates in the default viewing conditions.
    pub fn from_ucs(jstar: f64, astar: f64, bstar: f64) -> Self {
        Self::from_ucs_in_viewing_conditions(jstar, astar, bstar, &ViewingConditions::default())
    }

    pub fn from_ucs_in_viewing_conditions(
        jstar: f64,
        astar: f64,
        bstar: f64,
        vc: &ViewingConditions,
    ) -> Self {
        let mstar = (astar * astar + bstar * bstar).sqrt();
        let m = ((mstar * 0.0228).exp() - 1.0) / 0.0228;
        let c = m / vc.fl_root;
        let mut h = bstar.atan2(astar).to_degrees();
        if h < 0.0 {
            h += 360.0;
        }
        let j = jstar / (1.0 - (jstar - 100.0) * 0.007);
        Self::from_jch_in_viewing_conditions(j, c, h, vc)
    }

    /// ARGB of this color in the default viewing conditions.
    pub fn to_argb(&self) -> u32 {
        self.viewed(&ViewingConditions::default())
    }

    /// ARGB of this color when seen under `vc`. Colors outside sRGB are
    /// clipped per channel.
    pub fn viewed(&self, vc: &ViewingConditions) -> u32 {
        let alpha = if self.chroma == 0.0 || self.j == 0.0 {
            0.0
        } else {
            self.chroma / (self.j / 100.0).sqrt()
        };
        let t = (alpha / (1.64 - 0.29f64.powf(vc.n)).powf(0.73)).powf(1.0 / 0.9);
        let h_rad = self.hue.to_radians();

        let e_hue = 0.25 * ((h_rad + 2.0).cos() + 3.8);
        let ac = vc.aw * (self.j / 100.0).powf(1.0 / vc.c / vc.z);
        let p1 = e_hue * (50000.0 / 13.0) * vc.nc * vc.ncb;
        let p2 = ac / vc.nbb;

        let h_sin = h_rad.sin();
        let h_cos = h_rad.cos();
        let gamma = 23.0 * (p2 + 0.305) * t / (23.0 * p1 + 11.0 * t * h_cos + 108.0 * t * h_sin);
        let a = gamma * h_cos;
        let b = gamma * h_sin;

        let r_a = (460.0 * p2 + 451.0 * a + 288.0 * b) / 1403.0;
        let g_a = (460.0 * p2 - 891.0 * a - 261.0 * b) / 1403.0;
        let b_a = (460.0 * p2 - 220.0 * a - 6300.0 * b) / 1403.0;

        let r_c = inverse_adaptation(r_a, vc.fl);
        let g_c = inverse_adaptation(g_a, vc.fl);
        let b_c = inverse_adaptation(b_a, vc.fl);
        let r_f = r_c / vc.rgb_d[0];
        let g_f = g_c / vc.rgb_d[1];
        let b_f = b_c / vc.rgb_d[2];

        let x = 1.86206786 * r_f - 1.01125463 * g_f + 0.14918677 * b_f;
        let y = 0.38752654 * r_f + 0.62144744 * g_f - 0.00897398 * b_f;
        let z = -0.01584150 * r_f - 0.03412294 * g_f + 1.04996444 * b_f;
        argb_from_xyz(x, y, z)
    }
}

/// CAM16-UCS J*, a*, b* from lightness, colorfulness and hue in radians.
fn ucs_from_jmh(j: f64, m: f64, hue_radians: f64) -> (f64, f64, f64) {
    let jstar = (1.0 + 100.0 * 0.007) * j / (1.0 + 0.007 * j);
    let mstar = (1.0 / 0.0228) * (1.0 + 0.0228 * m).ln();
    (jstar, mstar * hue_radians.cos(), mstar * hue_radians.sin())
}

/// Undoes the post-adaptation compression of one cone channel.
fn inverse_adaptation(adapted: f64, fl: f64) -> f64 {
    // Strongly out-of-gamut requests can push |adapted| past 400.
    let base = (27.13 * adapted.abs() / (400.0 - adapted.abs())).max(0.0);
    signum(adapted) * (100.0 / fl) * base.powf(1.0 / 0.42)
}
