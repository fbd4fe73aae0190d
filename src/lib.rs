//! # string-lang
//!
//! Small toolkit for bounded languages over an alphabet.
//!
//! ## Features
//!
//! - **Enumeration**: every string over an alphabet up to a maximum length
//! - **Regex masks**: prefix-anchored pattern matching, single or batch
//! - **Heatmaps**: square grids of strings colored by length, exported as SVG or raster images
//! - **Wordlists**: write string lists one per line
//!
//! ## Usage
//!
//! ```bash
//! # All strings over {a, b} up to length 3
//! string-lang generate -a ab -n 3
//!
//! # Heatmap of the same language
//! string-lang heatmap -a ab -n 3 -o language.svg
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use string_lang::{generate_strings, render_heatmap, write_lines, Alphabet, Mask};
//! use std::path::Path;
//!
//! let alphabet = Alphabet::from_chars("ab");
//! let strings = generate_strings(&alphabet, 3);
//!
//! let mask = Mask::new("a").unwrap();
//! let starting_with_a = mask.filter(&strings);
//!
//! write_lines(&starting_with_a, Path::new("strings.txt")).unwrap();
//! render_heatmap(&strings, "Sigma^3", 800, 800, 14, Some(Path::new("strings.svg"))).unwrap();
//! ```

pub mod cli;
pub mod colorscale;
pub mod commands;
pub mod error;
pub mod generate;
pub mod grid;
pub mod heatmap;
pub mod mask;
pub mod output;
pub mod progress;
pub mod raster;

pub use error::{Error, Result};
pub use generate::{generate_strings, language_size, Alphabet, StringGenerator};
pub use grid::{padded_dim, Grid};
pub use heatmap::{render_heatmap, Heatmap, HeatmapOptions};
pub use mask::{matches, matches_all, Mask, MaskResults};
pub use output::{read_lines, write_lines};
