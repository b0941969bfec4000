//! Weighted k-means over deduplicated colors.
//!
//! Every distinct color is one point weighted by its pixel count. A
//! point only tests the centroids that could possibly be closer than its
//! current one: with neighbors sorted by distance to the current centroid,
//! the triangle inequality rules out everything from the first neighbor at
//! least twice as far as the point's own distance (four times, squared).
//!
//! Greg Hamerly and Jonathan Drake, "Accelerating Lloyd's algorithm for
//! k-means clustering", 2015.

use crate::color_utils::is_opaque;
use crate::point_provider::{PointProvider, PointProviderLab};
use crate::population_map::PopulationMap;
use crate::quantizer::{Quantizer, QuantizerResult};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const MAX_ITERATIONS: usize = 10;
/// A point changes cluster only if that brings it this much closer.
pub const MIN_MOVEMENT_DISTANCE: f64 = 3.0;
/// Seed of the default generator, fixed so results are reproducible.
pub const SEED: u64 = 69;

#[derive(Debug, Clone, Copy, Default)]
struct Distance {
    index: usize,
    distance: f64,
}

/// Clusters `input_pixels` in L*a*b* with the fixed-seed generator.
///
/// See [`quantize_with`].
pub fn quantize(input_pixels: &[u32], starting_clusters: &[u32], max_colors: usize) -> PopulationMap {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    quantize_with(
        input_pixels,
        starting_clusters,
        max_colors,
        &PointProviderLab,
        &mut rng,
    )
}

/// Clusters `input_pixels` into at most `max_colors` colors.
///
/// Alpha is not inspected; callers filter translucent pixels first. The
/// cluster count is the smallest of `max_colors`, the number of distinct
/// colors and, when given, the number of `starting_clusters` (only the
/// first that many are used). Without starting clusters the centroids are
/// drawn from `rng` across the L*a*b* box, and so is every point's initial
/// assignment.
///
/// Returns one entry per non-empty cluster in cluster order, mapping its
/// centroid to the pixel count it absorbed. When two centroids land on the
/// same ARGB the earlier cluster wins.
pub fn quantize_with<P, R>(
    input_pixels: &[u32],
    starting_clusters: &[u32],
    max_colors: usize,
    point_provider: &P,
    rng: &mut R,
) -> PopulationMap
where
    P: PointProvider,
    R: Rng,
{
    let mut pixel_to_count = PopulationMap::new();
    for &pixel in input_pixels {
        pixel_to_count.increment(pixel);
    }
    let points: Vec<[f64; 3]> = pixel_to_count
        .colors()
        .map(|argb| point_provider.from_argb(argb))
        .collect();
    let counts: Vec<usize> = pixel_to_count.iter().map(|(_, count)| count).collect();
    let point_count = points.len();

    let mut cluster_count = max_colors.min(point_count);
    if !starting_clusters.is_empty() {
        cluster_count = cluster_count.min(starting_clusters.len());
    }
    if cluster_count == 0 {
        return PopulationMap::new();
    }

    let mut clusters: Vec<[f64; 3]> = starting_clusters
        .iter()
        .take(cluster_count)
        .map(|&argb| point_provider.from_argb(argb))
        .collect();
    if starting_clusters.is_empty() {
        while clusters.len() < cluster_count {
            let l = rng.r#gen::<f64>() * 100.0;
            let a = rng.r#gen::<f64>() * 200.0 - 100.0;
            let b = rng.r#gen::<f64>() * 200.0 - 100.0;
            clusters.push([l, a, b]);
        }
    }

    let mut cluster_indices: Vec<usize> = (0..point_count)
        .map(|_| rng.gen_range(0..cluster_count))
        .collect();
    let mut neighbors = vec![vec![Distance::default(); cluster_count]; cluster_count];
    let mut pixel_count_sums = vec![0usize; cluster_count];

    let mut iterations = 0;
    for iteration in 0..MAX_ITERATIONS {
        iterations = iteration + 1;

        for i in 0..cluster_count {
            neighbors[i][i] = Distance {
                index: i,
                distance: 0.0,
            };
            for j in (i + 1)..cluster_count {
                let distance = point_provider.distance(&clusters[i], &clusters[j]);
                neighbors[j][i] = Distance { index: i, distance };
                neighbors[i][j] = Distance { index: j, distance };
            }
        }
        for row in neighbors.iter_mut() {
            row.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        }

        let mut points_moved = 0;
        for (point, cluster_index) in points.iter().zip(cluster_indices.iter_mut()) {
            let previous_cluster_index = *cluster_index;
            let previous_distance = point_provider.distance(point, &clusters[previous_cluster_index]);
            let mut minimum_distance = previous_distance;
            let mut new_cluster_index = None;
            for neighbor in &neighbors[previous_cluster_index] {
                if neighbor.distance >= 4.0 * previous_distance {
                    break;
                }
                let distance = point_provider.distance(point, &clusters[neighbor.index]);
                if distance < minimum_distance {
                    minimum_distance = distance;
                    new_cluster_index = Some(neighbor.index);
                }
            }
            if let Some(new_cluster_index) = new_cluster_index {
                let distance_change = (minimum_distance.sqrt() - previous_distance.sqrt()).abs();
                if distance_change > MIN_MOVEMENT_DISTANCE {
                    points_moved += 1;
                    *cluster_index = new_cluster_index;
                }
            }
        }

        if points_moved == 0 && iteration != 0 {
            break;
        }

        let mut component_sums = vec![[0.0f64; 3]; cluster_count];
        pixel_count_sums.fill(0);
        for ((point, &cluster_index), &count) in points.iter().zip(&cluster_indices).zip(&counts) {
            pixel_count_sums[cluster_index] += count;
            for (sum, component) in component_sums[cluster_index].iter_mut().zip(point) {
                *sum += component * count as f64;
            }
        }
        for ((cluster, sums), &count) in clusters.iter_mut().zip(&component_sums).zip(&pixel_count_sums) {
            if count == 0 {
                *cluster = [0.0; 3];
                continue;
            }
            let count = count as f64;
            *cluster = [sums[0] / count, sums[1] / count, sums[2] / count];
        }
    }
    debug!("wsmeans: {cluster_count} clusters over {point_count} colors, {iterations} iterations");

    let mut argb_to_population = PopulationMap::with_capacity(cluster_count);
    for (cluster, &count) in clusters.iter().zip(&pixel_count_sums) {
        if count == 0 {
            continue;
        }
        argb_to_population.insert_first(point_provider.to_argb(cluster), count);
    }
    argb_to_population
}

/// Weighted k-means from random centroids over the opaque pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuantizerWsmeans;

impl Quantizer for QuantizerWsmeans {
    fn quantize(&mut self, pixels: &[u32], max_colors: usize) -> QuantizerResult {
        let opaque: Vec<u32> = pixels.iter().copied().filter(|&pixel| is_opaque(pixel)).collect();
        quantize(&opaque, &[], max_colors).into()
    }
}
