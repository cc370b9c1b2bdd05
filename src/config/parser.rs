//! Option file parsing
//!
//! Grammar, one statement per line:
//! - blank lines, `# comments` and `[section]` markers are skipped
//! - `key = value`, with an optional trailing `# comment`
//! - double quotes are stripped from values wherever they appear
//!
//! Malformed lines and repeated keys are reported and skipped. Only a file
//! that cannot be opened or read, or that holds no entries at all, fails.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::encoding::decode_text;
use super::error::{ParseError, ParseResult};

/// Entries of a single file, before they are merged into the option table.
pub type FileOptions = HashMap<String, String>;

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Ignored,
    Malformed,
    Entry { key: &'a str, value: String },
}

/// Parse an option file into its key/value entries.
pub fn parse_file(path: &Path) -> ParseResult<FileOptions> {
    let file = File::open(path)
        .map_err(|source| ParseError::FileOpen { path: path.to_path_buf(), source })?;

    parse_reader(BufReader::new(file), path)
}

fn parse_reader<R: BufRead>(reader: R, path: &Path) -> ParseResult<FileOptions> {
    let bytes = read_lines(reader, path)?;
    let (text, encoding) = decode_text(&bytes);
    tracing::debug!("> Config: reading '{}' as {}", path.display(), encoding);

    let mut options = FileOptions::new();
    for (idx, raw) in text.lines().enumerate() {
        match classify_line(raw) {
            Line::Ignored => {}
            Line::Malformed => {
                tracing::error!(
                    "> Config: failure to read line number {} in file '{}', skipping it",
                    idx + 1,
                    path.display()
                );
            }
            Line::Entry { key, value } => {
                if options.contains_key(key) {
                    tracing::error!(
                        "> Config: duplicate key name '{}' in config file '{}'",
                        key,
                        path.display()
                    );
                    continue;
                }
                options.insert(key.to_string(), value);
            }
        }
    }

    if options.is_empty() {
        return Err(ParseError::EmptyFile { path: path.to_path_buf() });
    }

    Ok(options)
}

/// Read the whole file, line by line so a failure names the line it hit.
fn read_lines<R: BufRead>(mut reader: R, path: &Path) -> ParseResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut line_number = 0usize;

    loop {
        line_number += 1;
        let read = reader.read_until(b'\n', &mut bytes).map_err(|source| ParseError::LineRead {
            path: path.to_path_buf(),
            line: line_number,
            source,
        })?;
        if read == 0 {
            return Ok(bytes);
        }
    }
}

fn classify_line(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
        return Line::Ignored;
    }

    // Trailing comment. Quotes do not protect a `#`.
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };

    let Some(eq) = line.find('=') else {
        return Line::Malformed;
    };
    if eq + 1 == line.len() {
        return Line::Malformed;
    }

    let key = line[..eq].trim();
    let value = line[eq + 1..].trim().replace('"', "");
    Line::Entry { key, value }
}
