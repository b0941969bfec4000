use clap::{Parser, Subcommand, ValueEnum};
use hctcolor::QuantizerKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hctcolor")]
#[command(about = "Perceptual color tools: HCT, CAM16 and source-color extraction")]
#[command(version)]
pub struct Cli {
    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the HCT and CAM16 attributes of a color
    Inspect {
        /// Color as #rrggbb, #rgb or #aarrggbb
        color: String,
    },

    /// Find the sRGB color closest to an HCT request
    Solve {
        /// Hue in degrees
        #[arg(long)]
        hue: f64,

        /// Chroma; reduced if out of gamut
        #[arg(long)]
        chroma: f64,

        /// Tone (L*), 0-100
        #[arg(long)]
        tone: f64,
    },

    /// Rank the theme source colors of pixel list files
    Extract {
        /// Pixel files: a JSON array of ARGB integers or hex colors
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Colors to quantize to before scoring (default: 128)
        #[arg(short, long, default_value = "128")]
        max_colors: usize,

        /// Quantization pipeline
        #[arg(short, long, value_enum, default_value = "celebi")]
        quantizer: QuantizerArg,

        /// Ranked colors to report per file (default: 4)
        #[arg(short, long, default_value = "4")]
        count: usize,

        /// Downsample each file to at most this many pixels (0: keep all)
        #[arg(long, default_value = "0")]
        max_pixels: usize,

        /// Skip malformed hex colors instead of failing
        #[arg(long)]
        lenient: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Rotate a design color's hue toward a source color
    Harmonize {
        /// Color to adjust
        design: String,

        /// Color to lean toward
        source: String,
    },

    /// Print the tonal palettes derived from a source color
    Palette {
        /// Source color
        color: String,

        /// Tones to print
        #[arg(
            short,
            long,
            value_delimiter = ',',
            default_value = "0,10,20,30,40,50,60,70,80,90,95,99,100"
        )]
        tones: Vec<f64>,
    },

    /// Print the light and dark schemes of a source color as JSON
    Theme {
        /// Source color
        color: String,

        /// Extra color as name=#rrggbb, or name=#rrggbb:blend to harmonize it
        #[arg(long = "custom")]
        custom: Vec<String>,

        /// Palette tones to include
        #[arg(
            short,
            long,
            value_delimiter = ',',
            default_value = "0,10,20,30,40,50,60,70,80,90,95,99,100"
        )]
        tones: Vec<f64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum QuantizerArg {
    Map,
    Wu,
    Wsmeans,
    Celebi,
}

impl From<QuantizerArg> for QuantizerKind {
    fn from(arg: QuantizerArg) -> Self {
        match arg {
            QuantizerArg::Map => QuantizerKind::Map,
            QuantizerArg::Wu => QuantizerKind::Wu,
            QuantizerArg::Wsmeans => QuantizerKind::Wsmeans,
            QuantizerArg::Celebi => QuantizerKind::Celebi,
        }
    }
}
