//! `subcue`: print the timed intervals of a subtitle file

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::{
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use subcue_core::{
    encoding_rs::Encoding, timecode::format_srt_timestamp, Interval, ParseOptions, ParseReport,
    SsaLayout,
};
use subcue_io::{open_matching_subtitles_file, open_subtitles_file, ProbeOptions};

#[derive(Parser, Debug, Clone)]
#[command(name = "subcue", author, version, about, long_about = None)]
struct Args {
    /// Subtitle file, or a video file when --match is given
    path: PathBuf,

    /// Treat PATH as a video and look for a .srt, .ass or .ssa next to it
    #[arg(short = 'm', long = "match")]
    match_video: bool,

    /// Locate SubStation Alpha fields from the file's Format line
    #[arg(long)]
    declared_layout: bool,

    /// Code page for files that are not UTF-8 (any WHATWG label)
    #[arg(short, long, default_value = "windows-1252")]
    encoding: String,

    /// Print one JSON object per interval, then a summary object
    #[arg(long)]
    json: bool,

    /// More log output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct JsonInterval<'a> {
    start: f64,
    end: f64,
    text: &'a str,
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    path: &'a Path,
    report: &'a ParseReport,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn legacy_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| anyhow!("unknown encoding label '{label}'"))
}

fn parse_options(args: &Args) -> ParseOptions {
    let layout = if args.declared_layout {
        SsaLayout::Declared
    } else {
        SsaLayout::Fixed
    };
    ParseOptions::default().with_ssa_layout(layout)
}

/// Read the file named on the command line, returning the path actually parsed
fn collect(args: &Args) -> Result<(PathBuf, Vec<Interval>, ParseReport)> {
    let options = parse_options(args);
    let mut intervals = Vec::new();

    if args.match_video {
        let probe = ProbeOptions {
            parse: options,
            ..ProbeOptions::default()
        };
        let matched = open_matching_subtitles_file(&args.path, &probe, |cue| intervals.push(cue))
            .with_context(|| format!("no subtitles for {}", args.path.display()))?;
        Ok((matched.path, intervals, matched.report))
    } else {
        let report = open_subtitles_file(&args.path, &options, |cue| intervals.push(cue))
            .with_context(|| format!("failed to read {}", args.path.display()))?;
        Ok((args.path.clone(), intervals, report))
    }
}

fn print_text(
    out: &mut impl Write,
    intervals: &[Interval],
    report: &ParseReport,
    legacy: &'static Encoding,
) -> Result<()> {
    for (index, interval) in intervals.iter().enumerate() {
        writeln!(
            out,
            "{}\n{} --> {}\n{}",
            index + 1,
            format_srt_timestamp(interval.start),
            format_srt_timestamp(interval.end),
            interval.decode(report.detected_utf8, legacy)
        )?;
    }
    Ok(())
}

fn print_json(
    out: &mut impl Write,
    path: &Path,
    intervals: &[Interval],
    report: &ParseReport,
    legacy: &'static Encoding,
) -> Result<()> {
    for interval in intervals {
        let text = interval.decode(report.detected_utf8, legacy);
        serde_json::to_writer(
            &mut *out,
            &JsonInterval {
                start: interval.start,
                end: interval.end,
                text: &text,
            },
        )?;
        writeln!(out)?;
    }
    serde_json::to_writer(&mut *out, &JsonSummary { path, report })?;
    writeln!(out)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let legacy = legacy_encoding(&args.encoding)?;

    let (path, intervals, report) = collect(&args)?;
    if let Some(stop) = &report.stop {
        log::warn!("{}: parsing stopped at line {}: {}", path.display(), stop.line, stop.reason);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if args.json {
        print_json(&mut out, &path, &intervals, &report, legacy)?;
    } else {
        print_text(&mut out, &intervals, &report, legacy)?;
    }
    out.flush()?;
    Ok(())
}
