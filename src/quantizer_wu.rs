//! Wu's color quantizer: greedy orthogonal bipartitioning of the RGB cube.
//!
//! Pixels are binned into a 32×32×32 histogram (5 bits per channel) that
//! carries the weight, per-channel sums and the sum of squares of every
//! bin. After turning the histogram into a summed-volume table, the moments
//! of any box are an 8-corner inclusion-exclusion away, so the box with the
//! largest variance can be split at the plane that best separates its two
//! halves until enough boxes exist.
//!
//! Xiaolin Wu, "Color quantization by dynamic programming and principal
//! analysis", ACM Transactions on Graphics 11(4), 1992.

use crate::color_utils::{blue_from_argb, green_from_argb, red_from_argb};
use crate::population_map::PopulationMap;
use crate::quantizer::{Quantizer, QuantizerResult};
use crate::quantizer_map::QuantizerMap;
use log::debug;
use std::ops::{Add, Sub};

const INDEX_BITS: u32 = 5;
/// Bins per axis plus the zero plane used by the summed-volume table.
const SIDE_LENGTH: usize = (1 << INDEX_BITS) + 1;
const TOTAL_SIZE: usize = SIDE_LENGTH * SIDE_LENGTH * SIDE_LENGTH;

/// Flat index of lattice point `(r, g, b)`.
fn get_index(r: usize, g: usize, b: usize) -> usize {
    r * SIDE_LENGTH * SIDE_LENGTH + g * SIDE_LENGTH + b
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Red,
    Green,
    Blue,
}

/// Box of lattice cells `(r0, r1] × (g0, g1] × (b0, b1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cube {
    r0: usize,
    r1: usize,
    g0: usize,
    g1: usize,
    b0: usize,
    b1: usize,
    vol: usize,
}

struct MaximizeResult {
    /// Plane index of the best cut; `None` if no plane leaves both halves
    /// populated.
    cut_location: Option<usize>,
    maximum: f64,
}

/// Sum of `moment` over `cube`, read from the summed-volume table.
fn volume<T>(cube: &Cube, moment: &[T]) -> T
where
    T: Copy + Add<Output = T> + Sub<Output = T>,
{
    moment[get_index(cube.r1, cube.g1, cube.b1)] - moment[get_index(cube.r1, cube.g1, cube.b0)]
        - moment[get_index(cube.r1, cube.g0, cube.b1)]
        + moment[get_index(cube.r1, cube.g0, cube.b0)]
        - moment[get_index(cube.r0, cube.g1, cube.b1)]
        + moment[get_index(cube.r0, cube.g1, cube.b0)]
        + moment[get_index(cube.r0, cube.g0, cube.b1)]
        - moment[get_index(cube.r0, cube.g0, cube.b0)]
}

/// The part of `volume` that does not depend on the cut position.
fn bottom(cube: &Cube, direction: Direction, moment: &[i64]) -> i64 {
    match direction {
        Direction::Red => {
            -moment[get_index(cube.r0, cube.g1, cube.b1)]
                + moment[get_index(cube.r0, cube.g1, cube.b0)]
                + moment[get_index(cube.r0, cube.g0, cube.b1)]
                - moment[get_index(cube.r0, cube.g0, cube.b0)]
        }
        Direction::Green => {
            -moment[get_index(cube.r1, cube.g0, cube.b1)]
                + moment[get_index(cube.r1, cube.g0, cube.b0)]
                + moment[get_index(cube.r0, cube.g0, cube.b1)]
                - moment[get_index(cube.r0, cube.g0, cube.b0)]
        }
        Direction::Blue => {
            -moment[get_index(cube.r1, cube.g1, cube.b0)]
                + moment[get_index(cube.r1, cube.g0, cube.b0)]
                + moment[get_index(cube.r0, cube.g1, cube.b0)]
                - moment[get_index(cube.r0, cube.g0, cube.b0)]
        }
    }
}

/// The part of `volume` that depends on cutting at `position`.
fn top(cube: &Cube, direction: Direction, position: usize, moment: &[i64]) -> i64 {
    match direction {
        Direction::Red => {
            moment[get_index(position, cube.g1, cube.b1)]
                - moment[get_index(position, cube.g1, cube.b0)]
                - moment[get_index(position, cube.g0, cube.b1)]
                + moment[get_index(position, cube.g0, cube.b0)]
        }
        Direction::Green => {
            moment[get_index(cube.r1, position, cube.b1)]
                - moment[get_index(cube.r1, position, cube.b0)]
                - moment[get_index(cube.r0, position, cube.b1)]
                + moment[get_index(cube.r0, position, cube.b0)]
        }
        Direction::Blue => {
            moment[get_index(cube.r1, cube.g1, position)]
                - moment[get_index(cube.r1, cube.g0, position)]
                - moment[get_index(cube.r0, cube.g1, position)]
                + moment[get_index(cube.r0, cube.g0, position)]
        }
    }
}

/// Wu quantizer state. The tables are rebuilt on every call, so one value
/// can be reused for several images.
#[derive(Debug, Clone, Default)]
pub struct QuantizerWu {
    weights: Vec<i64>,
    moments_r: Vec<i64>,
    moments_g: Vec<i64>,
    moments_b: Vec<i64>,
    moments: Vec<f64>,
    cubes: Vec<Cube>,
}

impl QuantizerWu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Up to `max_colors` colors, one per non-empty box, in box creation
    /// order. Two degenerate boxes can average to the same color; such
    /// duplicates are kept.
    pub fn quantize_colors(&mut self, pixels: &[u32], max_colors: usize) -> Vec<u32> {
        self.cubes.clear();
        let count_by_color = QuantizerMap::quantize_pixels(pixels);
        // Every box holds at least one distinct color.
        let box_limit = max_colors.min(count_by_color.len());
        if box_limit == 0 {
            return Vec::new();
        }
        self.construct_histogram(&count_by_color);
        self.compute_moments();
        let color_count = self.create_boxes(box_limit);
        debug!("wu: {color_count} boxes for {max_colors} requested colors");
        self.create_result(color_count)
    }

    fn construct_histogram(&mut self, count_by_color: &PopulationMap) {
        self.weights = vec![0; TOTAL_SIZE];
        self.moments_r = vec![0; TOTAL_SIZE];
        self.moments_g = vec![0; TOTAL_SIZE];
        self.moments_b = vec![0; TOTAL_SIZE];
        self.moments = vec![0.0; TOTAL_SIZE];

        let bits_to_remove = 8 - INDEX_BITS;
        for (pixel, count) in count_by_color {
            let red = red_from_argb(pixel) as i64;
            let green = green_from_argb(pixel) as i64;
            let blue = blue_from_argb(pixel) as i64;
            let count = count as i64;

            let i_r = (red as usize >> bits_to_remove) + 1;
            let i_g = (green as usize >> bits_to_remove) + 1;
            let i_b = (blue as usize >> bits_to_remove) + 1;
            let index = get_index(i_r, i_g, i_b);

            self.weights[index] += count;
            self.moments_r[index] += count * red;
            self.moments_g[index] += count * green;
            self.moments_b[index] += count * blue;
            self.moments[index] += (count * (red * red + green * green + blue * blue)) as f64;
        }
    }

    /// Turns the histogram into cumulative sums along r, g and b.
    fn compute_moments(&mut self) {
        for r in 1..SIDE_LENGTH {
            let mut area = [0i64; SIDE_LENGTH];
            let mut area_r = [0i64; SIDE_LENGTH];
            let mut area_g = [0i64; SIDE_LENGTH];
            let mut area_b = [0i64; SIDE_LENGTH];
            let mut area2 = [0f64; SIDE_LENGTH];

            for g in 1..SIDE_LENGTH {
                let mut line = 0i64;
                let mut line_r = 0i64;
                let mut line_g = 0i64;
                let mut line_b = 0i64;
                let mut line2 = 0f64;

                for b in 1..SIDE_LENGTH {
                    let index = get_index(r, g, b);
                    line += self.weights[index];
                    line_r += self.moments_r[index];
                    line_g += self.moments_g[index];
                    line_b += self.moments_b[index];
                    line2 += self.moments[index];

                    area[b] += line;
                    area_r[b] += line_r;
                    area_g[b] += line_g;
                    area_b[b] += line_b;
                    area2[b] += line2;

                    let previous_index = get_index(r - 1, g, b);
                    self.weights[index] = self.weights[previous_index] + area[b];
                    self.moments_r[index] = self.moments_r[previous_index] + area_r[b];
                    self.moments_g[index] = self.moments_g[previous_index] + area_g[b];
                    self.moments_b[index] = self.moments_b[previous_index] + area_b[b];
                    self.moments[index] = self.moments[previous_index] + area2[b];
                }
            }
        }
    }

    /// Splits boxes until `max_colors` exist or nothing is left worth
    /// splitting. Returns how many boxes were produced.
    fn create_boxes(&mut self, max_colors: usize) -> usize {
        self.cubes = vec![Cube::default(); max_colors];
        self.cubes[0] = Cube {
            r1: SIDE_LENGTH - 1,
            g1: SIDE_LENGTH - 1,
            b1: SIDE_LENGTH - 1,
            ..Cube::default()
        };

        let mut volume_variance = vec![0.0; max_colors];
        let mut generated_color_count = max_colors;
        let mut next = 0;
        let mut i = 1;
        while i < max_colors {
            if self.cut(next, i) {
                volume_variance[next] = self.box_variance(next);
                volume_variance[i] = self.box_variance(i);
            } else {
                // Unsplittable; retry this slot with another box.
                volume_variance[next] = 0.0;
                i -= 1;
            }

            next = 0;
            let mut temp = volume_variance[0];
            for (j, &variance) in volume_variance.iter().enumerate().take(i + 1).skip(1) {
                if variance > temp {
                    temp = variance;
                    next = j;
                }
            }
            if temp <= 0.0 {
                generated_color_count = i + 1;
                break;
            }
            i += 1;
        }
        generated_color_count
    }

    fn box_variance(&self, index: usize) -> f64 {
        let cube = &self.cubes[index];
        if cube.vol > 1 { self.variance(cube) } else { 0.0 }
    }

    fn create_result(&self, color_count: usize) -> Vec<u32> {
        let mut colors = Vec::with_capacity(color_count);
        for cube in &self.cubes[..color_count] {
            let weight = volume(cube, &self.weights);
            if weight > 0 {
                let weight = weight as f64;
                let r = (volume(cube, &self.moments_r) as f64 / weight).round() as u32;
                let g = (volume(cube, &self.moments_g) as f64 / weight).round() as u32;
                let b = (volume(cube, &self.moments_b) as f64 / weight).round() as u32;
                colors.push(0xff00_0000 | (r & 0xff) << 16 | (g & 0xff) << 8 | (b & 0xff));
            }
        }
        colors
    }

    /// Weighted sum of squared distances from the box mean.
    fn variance(&self, cube: &Cube) -> f64 {
        let dr = volume(cube, &self.moments_r) as f64;
        let dg = volume(cube, &self.moments_g) as f64;
        let db = volume(cube, &self.moments_b) as f64;
        let xx = volume(cube, &self.moments);
        let hypotenuse = dr * dr + dg * dg + db * db;
        let weight = volume(cube, &self.weights) as f64;
        xx - hypotenuse / weight
    }

    /// Splits `cubes[one]` in place, writing the upper half to `cubes[two]`.
    /// Returns false if the box cannot be split.
    fn cut(&mut self, one: usize, two: usize) -> bool {
        let mut first = self.cubes[one];
        let mut second = self.cubes[two];

        let whole_r = volume(&first, &self.moments_r);
        let whole_g = volume(&first, &self.moments_g);
        let whole_b = volume(&first, &self.moments_b);
        let whole_w = volume(&first, &self.weights);
        let wholes = (whole_r, whole_g, whole_b, whole_w);

        let max_r = self.maximize(&first, Direction::Red, first.r0 + 1, first.r1, wholes);
        let max_g = self.maximize(&first, Direction::Green, first.g0 + 1, first.g1, wholes);
        let max_b = self.maximize(&first, Direction::Blue, first.b0 + 1, first.b1, wholes);

        // Ties resolve to red, then green.
        let (direction, cut_location) =
            if max_r.maximum >= max_g.maximum && max_r.maximum >= max_b.maximum {
                match max_r.cut_location {
                    Some(location) => (Direction::Red, location),
                    None => return false,
                }
            } else if max_g.maximum >= max_r.maximum && max_g.maximum >= max_b.maximum {
                match max_g.cut_location {
                    Some(location) => (Direction::Green, location),
                    None => return false,
                }
            } else {
                match max_b.cut_location {
                    Some(location) => (Direction::Blue, location),
                    None => return false,
                }
            };

        second.r1 = first.r1;
        second.g1 = first.g1;
        second.b1 = first.b1;
        match direction {
            Direction::Red => {
                first.r1 = cut_location;
                second.r0 = first.r1;
                second.g0 = first.g0;
                second.b0 = first.b0;
            }
            Direction::Green => {
                first.g1 = cut_location;
                second.r0 = first.r0;
                second.g0 = first.g1;
                second.b0 = first.b0;
            }
            Direction::Blue => {
                first.b1 = cut_location;
                second.r0 = first.r0;
                second.g0 = first.g0;
                second.b0 = first.b1;
            }
        }

        first.vol = (first.r1 - first.r0) * (first.g1 - first.g0) * (first.b1 - first.b0);
        second.vol = (second.r1 - second.r0) * (second.g1 - second.g0) * (second.b1 - second.b0);
        self.cubes[one] = first;
        self.cubes[two] = second;
        true
    }

    /// Best cut plane in `[first, last)` along `direction`, scored by the
    /// summed squared mean of the two halves.
    fn maximize(
        &self,
        cube: &Cube,
        direction: Direction,
        first: usize,
        last: usize,
        (whole_r, whole_g, whole_b, whole_w): (i64, i64, i64, i64),
    ) -> MaximizeResult {
        let bottom_r = bottom(cube, direction, &self.moments_r);
        let bottom_g = bottom(cube, direction, &self.moments_g);
        let bottom_b = bottom(cube, direction, &self.moments_b);
        let bottom_w = bottom(cube, direction, &self.weights);

        let mut max = 0.0;
        let mut cut = None;
        for i in first..last {
            let mut half_r = bottom_r + top(cube, direction, i, &self.moments_r);
            let mut half_g = bottom_g + top(cube, direction, i, &self.moments_g);
            let mut half_b = bottom_b + top(cube, direction, i, &self.moments_b);
            let mut half_w = bottom_w + top(cube, direction, i, &self.weights);
            if half_w == 0 {
                continue;
            }

            let mut temp = squared_mean(half_r, half_g, half_b, half_w);

            half_r = whole_r - half_r;
            half_g = whole_g - half_g;
            half_b = whole_b - half_b;
            half_w = whole_w - half_w;
            if half_w == 0 {
                continue;
            }
            temp += squared_mean(half_r, half_g, half_b, half_w);

            if temp > max {
                max = temp;
                cut = Some(i);
            }
        }

        MaximizeResult {
            cut_location: cut,
            maximum: max,
        }
    }
}

fn squared_mean(r: i64, g: i64, b: i64, w: i64) -> f64 {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    (r * r + g * g + b * b) / w as f64
}

impl Quantizer for QuantizerWu {
    /// Each box color maps to the number of pixels in its box. Boxes that
    /// average to the same color are merged.
    fn quantize(&mut self, pixels: &[u32], max_colors: usize) -> QuantizerResult {
        let colors = self.quantize_colors(pixels, max_colors);
        let mut color_to_count = PopulationMap::with_capacity(colors.len());
        for (cube, argb) in self.box_weights().zip(colors) {
            color_to_count.add(argb, cube);
        }
        color_to_count.into()
    }
}

impl QuantizerWu {
    /// Pixel counts of the non-empty boxes, in the order `create_result`
    /// emits their colors.
    fn box_weights(&self) -> impl Iterator<Item = usize> + '_ {
        self.cubes
            .iter()
            .map(|cube| volume(cube, &self.weights))
            .filter(|&weight| weight > 0)
            .map(|weight| weight as usize)
    }
}
