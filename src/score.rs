//! Ranks quantized colors by how well they would work as a theme's source.
//!
//! Colors earn points for sitting in a well-populated hue neighborhood and
//! for being chromatic. Dull, dark and rare colors are dropped, and only
//! the best color of each hue neighborhood survives.

use crate::cam16::Cam16;
use crate::color_utils::lstar_from_argb;
use crate::math_utils::{difference_degrees, sanitize_degrees_int};
use crate::population_map::PopulationMap;

const TARGET_CHROMA: f64 = 48.0;
const WEIGHT_PROPORTION: f64 = 0.7;
const WEIGHT_CHROMA_ABOVE: f64 = 0.3;
const WEIGHT_CHROMA_BELOW: f64 = 0.1;
const CUTOFF_CHROMA: f64 = 15.0;
const CUTOFF_TONE: f64 = 10.0;
const CUTOFF_EXCITED_PROPORTION: f64 = 0.01;
/// Half-width of the hue window that counts as one neighborhood.
const HUE_NEIGHBORHOOD: i64 = 15;
const MIN_HUE_DIFFERENCE: f64 = 15.0;

/// Google Blue.
pub const DEFAULT_FALLBACK: u32 = 0xff4285f4;
/// Ranked colors an extraction reports unless told otherwise.
pub const DEFAULT_DESIRED: usize = 4;

pub struct Score;

struct Candidate {
    argb: u32,
    hue: f64,
    score: f64,
}

impl Score {
    /// Every suitable color, best first, or Google Blue if none are.
    pub fn score(colors_to_population: &PopulationMap) -> Vec<u32> {
        Self::score_with(colors_to_population, usize::MAX, DEFAULT_FALLBACK)
    }

    /// Ranks `colors_to_population` best first, keeping at most `desired`
    /// colors (at least one). Returns `[fallback]` if no color qualifies.
    ///
    /// Equal scores keep the map's insertion order.
    pub fn score_with(colors_to_population: &PopulationMap, desired: usize, fallback: u32) -> Vec<u32> {
        let desired = desired.max(1);
        let population_sum = colors_to_population.total() as f64;

        let mut hue_proportions = [0.0f64; 361];
        let mut measured = Vec::with_capacity(colors_to_population.len());
        for (argb, population) in colors_to_population {
            let cam = Cam16::from_argb(argb);
            let proportion = if population_sum > 0.0 {
                population as f64 / population_sum
            } else {
                0.0
            };
            hue_proportions[cam.hue().round() as usize] += proportion;
            measured.push((argb, cam));
        }

        let mut candidates = Vec::with_capacity(measured.len());
        for (argb, cam) in measured {
            let hue = cam.hue().round() as i64;
            let excited_proportion: f64 = ((hue - HUE_NEIGHBORHOOD)..(hue + HUE_NEIGHBORHOOD))
                .map(|neighbor_hue| hue_proportions[sanitize_degrees_int(neighbor_hue) as usize])
                .sum();

            if cam.chroma() < CUTOFF_CHROMA
                || lstar_from_argb(argb) < CUTOFF_TONE
                || excited_proportion < CUTOFF_EXCITED_PROPORTION
            {
                continue;
            }

            let proportion_score = excited_proportion * 100.0 * WEIGHT_PROPORTION;
            let chroma_weight = if cam.chroma() < TARGET_CHROMA {
                WEIGHT_CHROMA_BELOW
            } else {
                WEIGHT_CHROMA_ABOVE
            };
            let chroma_score = (cam.chroma() - TARGET_CHROMA) * chroma_weight;
            candidates.push(Candidate {
                argb,
                hue: cam.hue(),
                score: proportion_score + chroma_score,
            });
        }

        // Stable, so ties keep insertion order.
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

        let mut chosen: Vec<&Candidate> = Vec::new();
        for candidate in &candidates {
            let duplicate = chosen
                .iter()
                .any(|kept| difference_degrees(candidate.hue, kept.hue) < MIN_HUE_DIFFERENCE);
            if !duplicate {
                chosen.push(candidate);
            }
        }

        if chosen.is_empty() {
            return vec![fallback];
        }
        chosen.iter().take(desired).map(|candidate| candidate.argb).collect()
    }
}
