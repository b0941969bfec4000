mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use hctcolor::{
    argb_from_hex, blend, hex_from_argb, ranked_colors_from_pixels, theme_from_source_color, Cam16, CorePalette,
    CustomColor, ExtractOptions, Hct, PixelBuffer, TonalPalette,
};
use rayon::prelude::*;
use serde_json::json;
use std::path::PathBuf;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match cli.command {
        Command::Inspect { color } => inspect(&color),
        Command::Solve { hue, chroma, tone } => {
            solve(hue, chroma, tone);
            Ok(())
        }
        Command::Extract {
            files,
            max_colors,
            quantizer,
            count,
            max_pixels,
            lenient,
            json,
        } => {
            let options = ExtractOptions {
                max_colors,
                quantizer: quantizer.into(),
                desired: count,
                ..Default::default()
            };
            extract(&files, &options, max_pixels, lenient, json)
        }
        Command::Harmonize { design, source } => {
            let design_argb = parse_color(&design)?;
            let source_argb = parse_color(&source)?;
            let harmonized = blend::harmonize(design_argb, source_argb);
            println!("{} -> {}", hex_from_argb(design_argb), hex_from_argb(harmonized));
            Ok(())
        }
        Command::Palette { color, tones } => palette(&color, &tones),
        Command::Theme { color, custom, tones } => theme(&color, &custom, &tones),
    }
}

fn parse_color(text: &str) -> Result<u32> {
    argb_from_hex(text).with_context(|| format!("Could not parse color {text:?}"))
}

fn inspect(color: &str) -> Result<()> {
    let argb = parse_color(color)?;
    let hct = Hct::from_argb(argb);
    let cam = Cam16::from_argb(argb);

    println!("{}  (0x{argb:08X})", hex_from_argb(argb));
    println!(
        "HCT    hue {:.2}  chroma {:.2}  tone {:.2}",
        hct.hue(),
        hct.chroma(),
        hct.tone()
    );
    println!(
        "CAM16  J {:.2}  Q {:.2}  M {:.2}  s {:.2}",
        cam.j(),
        cam.q(),
        cam.m(),
        cam.s()
    );
    println!(
        "UCS    J* {:.2}  a* {:.2}  b* {:.2}",
        cam.jstar(),
        cam.astar(),
        cam.bstar()
    );
    Ok(())
}

fn solve(hue: f64, chroma: f64, tone: f64) {
    let hct = Hct::from_hct(hue, chroma, tone);
    println!(
        "{}  (0x{:08X})",
        hex_from_argb(hct.to_argb()),
        hct.to_argb()
    );
    println!(
        "solved hue {:.2}  chroma {:.2}  tone {:.2}",
        hct.hue(),
        hct.chroma(),
        hct.tone()
    );
    if hct.chroma() + 1.0 < chroma {
        println!("chroma {chroma:.2} is out of gamut here; reduced to {:.2}", hct.chroma());
    }
}

fn extract(
    files: &[PathBuf],
    options: &ExtractOptions,
    max_pixels: usize,
    lenient: bool,
    as_json: bool,
) -> Result<()> {
    options.validate()?;

    // Files are independent; rank them in parallel.
    let ranked: Vec<(PathBuf, Vec<u32>)> = files
        .par_iter()
        .map(|path| -> Result<(PathBuf, Vec<u32>)> {
            let loaded = if lenient {
                PixelBuffer::load_lenient(path)
            } else {
                PixelBuffer::load(path)
            };
            let buffer = loaded
                .with_context(|| format!("Failed to read pixels from {}", path.display()))?
                .sampled(max_pixels);
            Ok((path.clone(), ranked_colors_from_pixels(buffer.as_slice(), options)))
        })
        .collect::<Result<_>>()?;

    if as_json {
        let report: Vec<_> = ranked
            .iter()
            .map(|(path, colors)| {
                json!({
                    "file": path.display().to_string(),
                    "colors": colors.iter().map(|&argb| hex_from_argb(argb)).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (path, colors) in &ranked {
        println!("{}:", path.display());
        for (rank, &argb) in colors.iter().enumerate() {
            let hct = Hct::from_argb(argb);
            println!(
                "  {}. {}  hue {:.1}  chroma {:.1}  tone {:.1}",
                rank + 1,
                hex_from_argb(argb),
                hct.hue(),
                hct.chroma(),
                hct.tone()
            );
        }
    }
    Ok(())
}

fn palette(color: &str, tones: &[f64]) -> Result<()> {
    let core = CorePalette::of(parse_color(color)?);
    let rows: [(&str, &TonalPalette); 6] = [
        ("primary", &core.a1),
        ("secondary", &core.a2),
        ("tertiary", &core.a3),
        ("neutral", &core.n1),
        ("neutral-variant", &core.n2),
        ("error", &core.error),
    ];

    for (name, palette) in rows {
        let swatches: Vec<String> = tones
            .iter()
            .map(|&tone| format!("{tone}:{}", hex_from_argb(palette.tone(tone))))
            .collect();
        println!("{name:<16} {}", swatches.join(" "));
    }
    Ok(())
}

/// Parses `name=#rrggbb` with an optional `:blend` suffix.
fn parse_custom_color(text: &str) -> Result<CustomColor> {
    let (name, rest) = text
        .split_once('=')
        .with_context(|| format!("Custom color {text:?} should look like name=#rrggbb"))?;
    let (hex, blend) = match rest.split_once(':') {
        Some((hex, "blend")) => (hex, true),
        Some((_, flag)) => anyhow::bail!("Unknown custom color flag {flag:?} in {text:?}"),
        None => (rest, false),
    };
    Ok(CustomColor {
        name: name.to_string(),
        value: parse_color(hex)?,
        blend,
    })
}

fn theme(color: &str, custom: &[String], tones: &[f64]) -> Result<()> {
    let source = parse_color(color)?;
    let custom_colors = custom
        .iter()
        .map(|text| parse_custom_color(text))
        .collect::<Result<Vec<_>>>()?;
    let theme = theme_from_source_color(source, &custom_colors);
    println!("{}", serde_json::to_string_pretty(&theme.to_hex_json(tones))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_custom_color() {
        let plain = parse_custom_color("brand=#ff0000").unwrap();
        assert_eq!(plain.name, "brand");
        assert_eq!(plain.value, 0xffff0000);
        assert!(!plain.blend);

        let blended = parse_custom_color("warning=#fbc02d:blend").unwrap();
        assert_eq!(blended.value, 0xfffbc02d);
        assert!(blended.blend);

        assert!(parse_custom_color("#ff0000").is_err());
        assert!(parse_custom_color("brand=#ff0000:loud").is_err());
        assert!(parse_custom_color("brand=banana").is_err());
    }
}
