//! Subcommand execution
//!
//! Wires parsed arguments to the library operations and reports progress.

use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use bytesize::ByteSize;
use colored::*;
use log::debug;

use crate::cli::{Args, Command, GenerateArgs, HeatmapArgs, MaskArgs};
use crate::generate::{checked_language_size, generate_strings};
use crate::heatmap::Heatmap;
use crate::mask::Mask;
use crate::output::{read_lines, OutputWriter};
use crate::progress::{
    create_progress_bar, format_duration, format_number, print_header, print_info, print_success,
    print_warning,
};

/// Run the selected subcommand
pub fn run(args: &Args) -> anyhow::Result<()> {
    match &args.command {
        Command::Generate(generate) => run_generate(generate, args.quiet),
        Command::Mask(mask) => run_mask(mask, args.quiet),
        Command::Heatmap(heatmap) => run_heatmap(heatmap, args.quiet),
    }
}

fn compile_mask(pattern: Option<&str>) -> anyhow::Result<Option<Mask>> {
    pattern.map(Mask::new).transpose().map_err(Into::into)
}

fn run_generate(args: &GenerateArgs, quiet: bool) -> anyhow::Result<()> {
    let start = Instant::now();
    let alphabet = args.parse_alphabet();
    let mask = compile_mask(args.pattern.as_deref())?;
    let expected = checked_language_size(&alphabet, args.max_size, args.limit)?;

    if !quiet {
        print_header("Generating strings...");
        print_info(&format!("Alphabet:     {:?}", alphabet.symbols()));
        print_info(&format!("Max length:   {}", args.max_size));
        print_info(&format!("Language:     {} strings", format_number(expected as u64)));
        if let Some(ref mask) = mask {
            print_info(&format!("Mask:         {}", mask.pattern_str()));
        }
    }

    let mut strings = generate_strings(&alphabet, args.max_size);
    if let Some(ref mask) = mask {
        strings = mask.filter(&strings);
    }

    if strings.is_empty() && !quiet {
        print_warning("No strings to write");
    }

    match args.output {
        Some(ref path) => {
            let written = write_with_progress(&strings, path, quiet)?;
            if !quiet {
                print_success(&format!("Output written to: {:?}", path));
                print_info(&format!(
                    "{} strings ({}) in {}",
                    format_number(strings.len() as u64),
                    ByteSize(written),
                    format_duration(start.elapsed())
                ));
            }
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            for s in &strings {
                writeln!(out, "{}", s)?;
            }
            out.flush()?;
        }
    }

    Ok(())
}

/// Write strings through a progress bar, returning the bytes written
fn write_with_progress(strings: &[String], path: &Path, quiet: bool) -> anyhow::Result<u64> {
    let pb = create_progress_bar(strings.len() as u64, "Writing...", quiet);
    let mut writer = OutputWriter::new(path)
        .with_context(|| format!("Cannot open output file {:?}", path))?;

    for s in strings {
        writer.write_line(s)?;
        pb.inc(1);
    }
    writer.flush()?;

    pb.finish_with_message("Complete".green().to_string());
    Ok(writer.bytes_written())
}

fn run_mask(args: &MaskArgs, quiet: bool) -> anyhow::Result<()> {
    let mask = Mask::new(&args.pattern)?;

    let strings = match args.input {
        Some(ref path) => {
            read_lines(path).with_context(|| format!("Cannot read input file {:?}", path))?
        }
        None => args.words.clone(),
    };

    let results = mask.matches_all(&strings);
    let matched = results.values().filter(|&&m| m).count();
    debug!("{} of {} unique strings matched", matched, results.len());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (string, matches) in &results {
        if args.only_matches {
            if *matches {
                writeln!(out, "{}", string)?;
            }
        } else if *matches {
            writeln!(out, "{}: {}", string, "true".green())?;
        } else {
            writeln!(out, "{}: {}", string, "false".red())?;
        }
    }
    out.flush()?;

    if !quiet {
        print_info(&format!(
            "{} of {} unique strings match '{}'",
            format_number(matched as u64),
            format_number(results.len() as u64),
            mask.pattern_str()
        ));
    }

    Ok(())
}

fn run_heatmap(args: &HeatmapArgs, quiet: bool) -> anyhow::Result<()> {
    let mask = compile_mask(args.pattern.as_deref())?;

    let mut strings = match (args.input.as_ref(), args.parse_alphabet()) {
        (Some(path), _) => {
            read_lines(path).with_context(|| format!("Cannot read input file {:?}", path))?
        }
        (None, Some(alphabet)) => {
            let max_size = args.max_size.unwrap_or(0);
            checked_language_size(&alphabet, max_size, args.limit)?;
            generate_strings(&alphabet, max_size)
        }
        (None, None) => anyhow::bail!("Either --input or --alphabet must be given"),
    };

    if let Some(ref mask) = mask {
        strings = mask.filter(&strings);
    }

    let heatmap = Heatmap::new(&strings, args.options());
    heatmap
        .save(&args.output)
        .with_context(|| format!("Cannot export heatmap to {:?}", args.output))?;

    if !quiet {
        let dim = heatmap.grid().dim();
        print_success(&format!("Heatmap written to: {:?}", args.output));
        print_info(&format!(
            "{} strings in a {}x{} grid ({} padding cells)",
            format_number(strings.len() as u64),
            dim,
            dim,
            dim * dim - strings.len()
        ));
    }

    Ok(())
}
