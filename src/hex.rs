//! `#rrggbb` strings.

use crate::color_utils::{argb_from_rgb, blue_from_argb, green_from_argb, red_from_argb};
use crate::error::{Error, Result};

/// Lower-case `#rrggbb`. Alpha is dropped.
pub fn hex_from_argb(argb: u32) -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        red_from_argb(argb),
        green_from_argb(argb),
        blue_from_argb(argb)
    )
}

/// Parses `rgb`, `rrggbb` or `aarrggbb`, with or without a leading `#`.
///
/// The result is always opaque; an alpha byte in the 8-digit form is read
/// past and ignored.
pub fn argb_from_hex(hex: &str) -> Result<u32> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidHex(hex.to_string()));
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| Error::InvalidHex(hex.to_string()));

    match digits.len() {
        3 => {
            let expand = |i: usize| channel(&digits[i..=i].repeat(2));
            Ok(argb_from_rgb(expand(0)?, expand(1)?, expand(2)?))
        }
        6 => Ok(argb_from_rgb(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        8 => Ok(argb_from_rgb(
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
            channel(&digits[6..8])?,
        )),
        _ => Err(Error::InvalidHex(hex.to_string())),
    }
}
