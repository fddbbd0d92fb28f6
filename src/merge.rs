use crate::cli::Args;
use crate::error::{Abort, MergeError};
use crate::trace::TraceDocument;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of a merge that did not fail hard.
#[derive(Debug)]
pub enum Outcome {
    Merged(TraceDocument),
    Aborted(Abort),
}

/// Parse one input file; the handle is closed before returning.
fn read_document(path: &Path) -> Result<Value> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {} as JSON", path.display()))
}

fn write_document(document: TraceDocument, path: &Path, pretty: bool) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    let value = document.into_value();
    if pretty {
        serde_json::to_writer_pretty(&mut out, &value)
    } else {
        serde_json::to_writer(&mut out, &value)
    }
    .with_context(|| format!("Failed to write {}", path.display()))?;
    out.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Validate and merge the given trace files in order.
///
/// Every path is checked for existence before the first file is read.
/// Files are then read one at a time, and the first document without
/// `traceEvents` stops the merge before later files are opened.
pub fn merge_files(paths: &[PathBuf], progress: &ProgressBar) -> Result<Outcome> {
    if paths.len() < 2 {
        return Ok(Outcome::Aborted(Abort::TooFewFiles));
    }

    if let Some(missing) = paths.iter().find(|p| !p.exists()) {
        return Ok(Outcome::Aborted(Abort::MissingFile(missing.clone())));
    }

    let mut merged: Option<TraceDocument> = None;

    for path in paths {
        progress.set_message(format!("{}", path.display()));

        let Some(document) = TraceDocument::from_value(read_document(path)?) else {
            return Ok(Outcome::Aborted(Abort::MissingTraceEvents(path.clone())));
        };
        debug!(file = %path.display(), events = document.event_count(), "loaded trace");

        merged = Some(match merged.take() {
            None => document,
            Some(mut result) => {
                result.absorb(document, path)?;
                result
            }
        });
        progress.inc(1);
    }

    // At least two paths were read, so the result is always set here.
    Ok(merged.map_or(Outcome::Aborted(Abort::TooFewFiles), Outcome::Merged))
}

pub fn run(args: Args) -> Result<()> {
    if args.files.len() < 2 {
        println!("{}", Abort::TooFewFiles);
        return Ok(());
    }

    let output = match (&args.output, args.dry_run) {
        (_, true) => None,
        (Some(o), false) => Some(o.clone()),
        (None, false) => return Err(MergeError::MissingOutput.into()),
    };

    let pb = ProgressBar::new(args.files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let outcome = merge_files(&args.files, &pb);
    pb.finish_and_clear();

    let document = match outcome? {
        Outcome::Merged(document) => document,
        Outcome::Aborted(reason) => {
            println!("{reason}");
            return Ok(());
        }
    };
    let events = document.event_count();

    let Some(output) = output else {
        println!(
            "Dry-run. Would merge {} files ({} trace events):",
            args.files.len(),
            events
        );
        for f in &args.files {
            println!("{}", f.display());
        }
        return Ok(());
    };

    write_document(document, &output, args.pretty)?;
    info!(
        files = args.files.len(),
        events,
        output = %output.display(),
        "merged trace written"
    );

    Ok(())
}
