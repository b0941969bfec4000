//! HCT: hue and chroma from CAM16, tone from L*a*b*.
//!
//! Tone is L*, so a tone difference maps directly to a contrast ratio: 40
//! apart guarantees at least 3.0, 50 apart at least 4.5. Hue and chroma keep
//! the perceptual accuracy of CAM16.
//!
//! There is no closed form from (hue, chroma, tone) back to ARGB because the
//! largest reachable chroma depends on both hue and tone. [`solve_to_argb`]
//! searches for it instead: an outer bisection over chroma wraps an inner
//! bisection over CAM16 lightness J.

use crate::cam16::Cam16;
use crate::color_utils::{argb_from_lstar, lstar_from_argb};
use crate::math_utils::{clamp_double, sanitize_degrees_double};
use crate::viewing_conditions::ViewingConditions;
use log::trace;

/// The chroma bisection stops once its bracket is narrower than this.
pub const CHROMA_SEARCH_ENDPOINT: f64 = 0.4;

/// Largest CAM16-UCS distance allowed between the hue we asked for and the
/// hue of the clipped color we got.
pub const DE_MAX: f64 = 1.0;

/// Largest L* error allowed between the requested tone and the result.
pub const DL_MAX: f64 = 0.2;

/// The lightness bisection stops once its bracket is narrower than this.
pub const LIGHTNESS_SEARCH_ENDPOINT: f64 = 0.01;

/// Finds a displayable color with the given hue and chroma whose L* is
/// within [`DL_MAX`] of `tone`, by bisecting over CAM16 lightness.
///
/// Among the candidates close enough in tone, keeps the one whose clipped
/// appearance strays least from the requested hue, rejecting any that stray
/// more than [`DE_MAX`]. Returns `None` when no candidate qualifies.
pub fn find_cam_by_j(hue: f64, chroma: f64, tone: f64, vc: &ViewingConditions) -> Option<Cam16> {
    let mut low: f64 = 0.0;
    let mut high: f64 = 100.0;
    let mut best_dl = 1000.0;
    let mut best_de = 1000.0;
    let mut best_cam = None;

    while (low - high).abs() > LIGHTNESS_SEARCH_ENDPOINT {
        let mid = low + (high - low) / 2.0;
        let clipped = Cam16::from_jch_in_viewing_conditions(mid, chroma, hue, vc).viewed(vc);
        let clipped_lstar = lstar_from_argb(clipped);
        let dl = (tone - clipped_lstar).abs();

        if dl < DL_MAX {
            let cam_clipped = Cam16::from_argb_in_viewing_conditions(clipped, vc);
            let unclipped_hue =
                Cam16::from_jch_in_viewing_conditions(cam_clipped.j(), cam_clipped.chroma(), hue, vc);
            let de = cam_clipped.distance(&unclipped_hue);
            if de <= DE_MAX && de <= best_de {
                best_dl = dl;
                best_de = de;
                best_cam = Some(cam_clipped);
            }
        }

        if best_dl == 0.0 && best_de == 0.0 {
            break;
        }

        if clipped_lstar < tone {
            low = mid;
        } else {
            high = mid;
        }
    }

    best_cam
}

/// ARGB for the given hue, chroma and tone as seen under `vc`.
///
/// Chroma is advisory: when the request is out of gamut the result carries
/// the largest chroma the search could reach. Near-achromatic requests and
/// the tone extremes come back as the gray of that tone.
pub fn solve_to_argb(hue: f64, chroma: f64, tone: f64, vc: &ViewingConditions) -> u32 {
    if chroma < 1.0 || tone.round() <= 0.0 || tone.round() >= 100.0 {
        return argb_from_lstar(tone);
    }

    let hue = sanitize_degrees_double(hue);
    let mut high = chroma;
    let mut mid = chroma;
    let mut low: f64 = 0.0;
    let mut is_first_loop = true;
    let mut answer = None;

    while (low - high).abs() >= CHROMA_SEARCH_ENDPOINT {
        let possible_answer = find_cam_by_j(hue, mid, tone, vc);

        if is_first_loop {
            if let Some(cam) = possible_answer {
                return cam.viewed(vc);
            }
            is_first_loop = false;
            mid = low + (high - low) / 2.0;
            continue;
        }

        match possible_answer {
            Some(cam) => {
                answer = Some(cam);
                low = mid;
            }
            None => high = mid,
        }
        mid = low + (high - low) / 2.0;
    }

    match answer {
        Some(cam) => cam.viewed(vc),
        None => {
            trace!("no chroma found for hue {hue:.2} tone {tone:.2}, using gray");
            argb_from_lstar(tone)
        }
    }
}

/// A color in HCT, tied to the viewing conditions it was measured in.
///
/// Values are immutable; the `with_*` methods return a new color whose
/// fields are re-measured from the ARGB actually produced, so the chroma
/// reported may be lower than the chroma requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hct {
    hue: f64,
    chroma: f64,
    tone: f64,
    argb: u32,
    viewing_conditions: ViewingConditions,
}

impl Hct {
    /// HCT color closest to the request, in the default viewing conditions.
    ///
    /// * `hue` - degrees; wrapped into `[0, 360)`.
    /// * `chroma` - may be reduced to what the hue and tone allow.
    /// * `tone` - L*; clamped into `[0, 100]`.
    pub fn from_hct(hue: f64, chroma: f64, tone: f64) -> Self {
        Self::from_hct_in_viewing_conditions(hue, chroma, tone, &ViewingConditions::default())
    }

    pub fn from_hct_in_viewing_conditions(
        hue: f64,
        chroma: f64,
        tone: f64,
        vc: &ViewingConditions,
    ) -> Self {
        let argb = solve_to_argb(
            sanitize_degrees_double(hue),
            chroma,
            clamp_double(0.0, 100.0, tone),
            vc,
        );
        Self::from_argb_in_viewing_conditions(argb, vc)
    }

    /// Measures `argb` in the default viewing conditions.
    pub fn from_argb(argb: u32) -> Self {
        Self::from_argb_in_viewing_conditions(argb, &ViewingConditions::default())
    }

    pub fn from_argb_in_viewing_conditions(argb: u32, vc: &ViewingConditions) -> Self {
        let cam = Cam16::from_argb_in_viewing_conditions(argb, vc);
        Self {
            hue: cam.hue(),
            chroma: cam.chroma(),
            tone: lstar_from_argb(argb),
            argb,
            viewing_conditions: *vc,
        }
    }

    /// Hue in degrees, `[0, 360)`.
    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn chroma(&self) -> f64 {
        self.chroma
    }

    /// L*, `[0, 100]`.
    pub fn tone(&self) -> f64 {
        self.tone
    }

    pub fn to_argb(&self) -> u32 {
        self.argb
    }

    pub fn viewing_conditions(&self) -> &ViewingConditions {
        &self.viewing_conditions
    }

    /// Same chroma and tone, new hue. Chroma may drop.
    pub fn with_hue(&self, hue: f64) -> Self {
        let hue = sanitize_degrees_double(hue);
        if hue == self.hue {
            return *self;
        }
        Self::from_hct_in_viewing_conditions(hue, self.chroma, self.tone, &self.viewing_conditions)
    }

    /// Same hue and tone, new chroma. The result may be less chromatic than
    /// asked for.
    pub fn with_chroma(&self, chroma: f64) -> Self {
        if chroma == self.chroma {
            return *self;
        }
        Self::from_hct_in_viewing_conditions(self.hue, chroma, self.tone, &self.viewing_conditions)
    }

    /// Same hue and chroma, new tone. Chroma may drop.
    pub fn with_tone(&self, tone: f64) -> Self {
        let tone = clamp_double(0.0, 100.0, tone);
        if tone == self.tone {
            return *self;
        }
        Self::from_hct_in_viewing_conditions(self.hue, self.chroma, tone, &self.viewing_conditions)
    }
}

impl From<u32> for Hct {
    fn from(argb: u32) -> Self {
        Hct::from_argb(argb)
    }
}
