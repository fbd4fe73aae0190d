//! Command-line interface definition for string-lang
//!
//! Provides argument parsing and conversion into library options.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::generate::Alphabet;
use crate::heatmap::HeatmapOptions;

/// Enumerate, mask and visualize bounded languages
#[derive(Parser, Debug, Clone)]
#[command(
    name = "string-lang",
    version,
    about = "Enumerate strings over an alphabet, filter them with regex masks and render length heatmaps",
    long_about = r#"
Enumerate every string over an alphabet up to a maximum length, test them
against prefix-anchored regex masks, write them to wordlists, or lay them out
as a square heatmap colored by string length.

EXAMPLES:
    # All strings over {a, b} up to length 3, one per line
    string-lang generate -a ab -n 3

    # Same, keeping only strings that start with "ab", written to a file
    string-lang generate -a ab -n 3 -p "ab" -o words.txt

    # Multi-character symbols
    string-lang generate -a "0,1,10" --separator , -n 2

    # Test a mask against words
    string-lang mask -p "a+b" aab ba abba

    # Render a heatmap of a generated language
    string-lang heatmap -a abc -n 3 -o language.svg --title "Sigma^3"

    # Render a heatmap of a wordlist
    string-lang heatmap -i words.txt -o words.png --width 1200 --height 1200
"#
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Quiet mode - no status output
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Enumerate all strings over an alphabet up to a maximum length
    Generate(GenerateArgs),
    /// Test a regex mask against the start of each string
    Mask(MaskArgs),
    /// Render strings as a square heatmap colored by length
    Heatmap(HeatmapArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Alphabet symbols: characters ("abc") or separated symbols with --separator
    #[arg(short, long, value_name = "SYMBOLS")]
    pub alphabet: String,

    /// Separator between alphabet symbols (default: every character is a symbol)
    #[arg(long, value_name = "SEP")]
    pub separator: Option<String>,

    /// Maximum string length
    #[arg(short = 'n', long, value_name = "LEN")]
    pub max_size: usize,

    /// Keep only strings matching this regex mask
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Refuse to enumerate languages larger than this
    #[arg(long, value_name = "COUNT", default_value_t = 10_000_000)]
    pub limit: usize,
}

#[derive(clap::Args, Debug, Clone)]
pub struct MaskArgs {
    /// Regex mask, matched at the start of each string
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: String,

    /// Read strings from a file, one per line
    #[arg(short, long, value_name = "FILE", conflicts_with = "words")]
    pub input: Option<PathBuf>,

    /// Strings to test
    #[arg(value_name = "WORD")]
    pub words: Vec<String>,

    /// Print only the matching strings
    #[arg(long, default_value_t = false)]
    pub only_matches: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct HeatmapArgs {
    /// Read strings from a file, one per line
    #[arg(short, long, value_name = "FILE", conflicts_with = "alphabet")]
    pub input: Option<PathBuf>,

    /// Generate strings over these alphabet symbols instead of reading a file
    #[arg(short, long, value_name = "SYMBOLS", requires = "max_size")]
    pub alphabet: Option<String>,

    /// Separator between alphabet symbols
    #[arg(long, value_name = "SEP")]
    pub separator: Option<String>,

    /// Maximum string length when generating
    #[arg(short = 'n', long, value_name = "LEN")]
    pub max_size: Option<usize>,

    /// Keep only strings matching this regex mask
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Image file to write; format follows the extension (svg, png, jpg, bmp)
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Figure title
    #[arg(long, default_value = "")]
    pub title: String,

    /// Figure width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Figure height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Cell label font size
    #[arg(long, default_value_t = 14)]
    pub font_size: u32,

    /// Color bar caption
    #[arg(long, default_value = "Length")]
    pub colorbar_title: String,

    /// Refuse to enumerate languages larger than this
    #[arg(long, value_name = "COUNT", default_value_t = 100_000)]
    pub limit: usize,
}

impl GenerateArgs {
    pub fn parse_alphabet(&self) -> Alphabet {
        parse_alphabet(&self.alphabet, self.separator.as_deref())
    }
}

impl HeatmapArgs {
    pub fn parse_alphabet(&self) -> Option<Alphabet> {
        self.alphabet
            .as_deref()
            .map(|symbols| parse_alphabet(symbols, self.separator.as_deref()))
    }

    /// Figure parameters for the library renderer
    pub fn options(&self) -> HeatmapOptions {
        HeatmapOptions {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            font_size: self.font_size,
            colorbar_title: self.colorbar_title.clone(),
        }
    }
}

/// Split an alphabet specification into symbols
///
/// Without a separator every character is a symbol. With one, empty pieces
/// are ignored.
pub fn parse_alphabet(symbols: &str, separator: Option<&str>) -> Alphabet {
    match separator {
        Some(sep) if !sep.is_empty() => Alphabet::new(
            symbols
                .split(sep)
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        ),
        _ => Alphabet::from_chars(symbols),
    }
}
