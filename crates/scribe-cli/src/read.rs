//! Binary log decoding

use anyhow::{Context, Result};
use scribe_core::Severity;
use scribe_logging::{BinaryReader, Event};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};

/// Counts reported after decoding
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReadSummary {
    pub shown: usize,
    pub skipped: usize,
}

/// Read command implementation
pub fn run(path: &str, min_level: Severity, json: bool) -> Result<()> {
    let file = File::open(path).with_context(|| format!("Failed to open binary log: {path}"))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = render(BufReader::new(file), &mut out, min_level, json)
        .with_context(|| format!("Failed to decode binary log: {path}"))?;
    out.flush()?;

    eprintln!("{} event(s) shown, {} below {min_level}", summary.shown, summary.skipped);
    Ok(())
}

/// Write every event at or above `min_level` to `out`
///
/// A record that fails to decode stops the run with an error; events written
/// before it stay in `out`.
pub fn render<R: Read, W: Write>(
    input: R,
    out: &mut W,
    min_level: Severity,
    json: bool,
) -> Result<ReadSummary> {
    let mut summary = ReadSummary::default();
    for (index, event) in BinaryReader::new(input).enumerate() {
        let event = event.with_context(|| format!("Corrupt record #{}", index + 1))?;
        if event.severity < min_level {
            summary.skipped += 1;
            continue;
        }
        write_event(out, &event, json)?;
        summary.shown += 1;
    }
    Ok(summary)
}

fn write_event<W: Write>(out: &mut W, event: &Event, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, event)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", event.render_line())?;
    }
    Ok(())
}
