//! Scalar helpers shared by the color-science modules.

/// Sign of `num`: -1, 0, or 1.
pub fn signum(num: f64) -> f64 {
    if num < 0.0 {
        -1.0
    } else if num == 0.0 {
        0.0
    } else {
        1.0
    }
}

/// Linear interpolation: `start` at `amount = 0`, `stop` at `amount = 1`.
pub fn lerp(start: f64, stop: f64, amount: f64) -> f64 {
    (1.0 - amount) * start + amount * stop
}

pub fn clamp_int(min: i64, max: i64, input: i64) -> i64 {
    if input < min {
        min
    } else if input > max {
        max
    } else {
        input
    }
}

pub fn clamp_double(min: f64, max: f64, input: f64) -> f64 {
    if input < min {
        min
    } else if input > max {
        max
    } else {
        input
    }
}

/// Wraps an integer angle into `[0, 360)`.
pub fn sanitize_degrees_int(degrees: i64) -> i64 {
    degrees.rem_euclid(360)
}

/// Wraps an angle into `[0, 360)`.
pub fn sanitize_degrees_double(degrees: f64) -> f64 {
    let degrees = degrees % 360.0;
    let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };
    // A tiny negative angle rounds up to exactly 360.
    if degrees >= 360.0 { 0.0 } else { degrees }
}

/// Shortest angular distance between two hues, in `[0, 180]`.
pub fn difference_degrees(a: f64, b: f64) -> f64 {
    180.0 - ((a - b).abs() - 180.0).abs()
}

/// Direction (+1 or -1) to rotate `from` so it reaches `to` along the shorter arc.
pub fn rotation_direction(from: f64, to: f64) -> f64 {
    let a = to - from;
    let b = to - from + 360.0;
    let c = to - from - 360.0;
    let (a_abs, b_abs, c_abs) = (a.abs(), b.abs(), c.abs());

    let shortest = if a_abs <= b_abs && a_abs <= c_abs {
        a
    } else if b_abs <= a_abs && b_abs <= c_abs {
        b
    } else {
        c
    };
    if shortest >= 0.0 { 1.0 } else { -1.0 }
}

/// Multiplies a row vector by a 3x3 matrix.
pub fn matrix_multiply(row: [f64; 3], matrix: &[[f64; 3]; 3]) -> [f64; 3] {
    [
        row[0] * matrix[0][0] + row[1] * matrix[0][1] + row[2] * matrix[0][2],
        row[0] * matrix[1][0] + row[1] * matrix[1][1] + row[2] * matrix[1][2],
        row[0] * matrix[2][0] + row[1] * matrix[2][1] + row[2] * matrix[2][2],
    ]
}
