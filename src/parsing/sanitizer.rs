use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Separator the export pads line tails with.
const SEPARATOR: char = ',';

/// Strip a line's trailing run of separator characters.
///
/// Expects the line without its terminator; a stray carriage return left by
/// CRLF input is treated as terminator noise and removed with the run.
/// Interior separators and trailing spaces are data and pass through.
pub fn sanitize_line(line: &str) -> &str {
    line.trim_end_matches(|c| c == SEPARATOR || c == '\r')
}

/// Repair the raw export line by line, writing the corrected file.
///
/// Streams the input without buffering the whole file; each output line is
/// the input line with its trailing separator run removed and a single
/// newline appended. Returns the number of lines written.
///
/// # Example
/// ```no_run
/// use sleep_insights::parsing::sanitizer::sanitize_export;
/// use std::path::Path;
///
/// let lines = sanitize_export(Path::new("sleep.csv"), Path::new("sleep_pre.csv"))
///     .expect("Failed to sanitize export");
/// println!("Sanitized {} lines", lines);
/// ```
pub fn sanitize_export(input: &Path, output: &Path) -> Result<usize> {
    let in_file = File::open(input)
        .with_context(|| format!("Failed to open raw export: {}", input.display()))?;
    let out_file = File::create(output)
        .with_context(|| format!("Failed to create sanitized file: {}", output.display()))?;

    let reader = BufReader::new(in_file);
    let mut writer = BufWriter::new(out_file);
    let mut lines_written = 0usize;

    for line in reader.lines() {
        let line = line.with_context(|| {
            format!(
                "Failed to read line {} of {}",
                lines_written + 1,
                input.display()
            )
        })?;

        writer
            .write_all(sanitize_line(&line).as_bytes())
            .and_then(|_| writer.write_all(b"\n"))
            .with_context(|| format!("Failed to write to {}", output.display()))?;
        lines_written += 1;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", output.display()))?;

    debug!(
        "Sanitized {} lines from {} into {}",
        lines_written,
        input.display(),
        output.display()
    );
    Ok(lines_written)
}
