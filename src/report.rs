//! GESAMT report reading and format detection
//!
//! A report is the text GESAMT prints to stdout. Two layouts exist: the
//! pairwise report (two structures, `Query | Dist.(A) | Target` table) and
//! the multi-way report (three or more structures, `Disp.` table). Both
//! parsers return a [`ParsedAlignment`].

use crate::multiway::parse_multiway;
use crate::pairwise::parse_pairwise;
use crate::residue::ResidueToken;
use std::io::{self, BufRead};
use std::num::ParseIntError;
use std::path::Path;

#[derive(Debug)]
pub enum ParseErr {
    MissingTableHeader,
    NotEnoughFields { line: usize },
    MissingQuotedPath { line: usize },
    InvalidResidueNumber {
        descriptor: String,
        source: ParseIntError,
    },
}

impl std::fmt::Display for ParseErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErr::MissingTableHeader => write!(f, "Alignment table header not found"),
            ParseErr::NotEnoughFields { line } => {
                write!(f, "Not enough fields in alignment row (non-blank line {})", line)
            }
            ParseErr::MissingQuotedPath { line } => {
                write!(f, "Expected a quoted structure path (non-blank line {})", line)
            }
            ParseErr::InvalidResidueNumber { descriptor, source } => {
                write!(f, "Invalid residue number in '{}': {}", descriptor, source)
            }
        }
    }
}

impl std::error::Error for ParseErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseErr::InvalidResidueNumber { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// One row of the alignment table, one token per structure
pub type AlignmentRow = Vec<ResidueToken>;

/// Common output of both report parsers
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAlignment {
    pub names: Vec<String>,
    pub rows: Vec<AlignmentRow>,
}

/// GESAMT report layouts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportFormat {
    Pairwise,
    Multiway,
}

impl ReportFormat {
    const PAIRWISE_MARKERS: [&'static str; 2] =
        ["reading QUERY structure", "reading FIXED structure"];

    /// Detect the layout from the report content.
    ///
    /// Anything without a pairwise marker is treated as multi-way; a report
    /// that is neither fails later with [`ParseErr::MissingTableHeader`].
    pub fn detect(lines: &[String]) -> Self {
        let text = lines.concat();
        if Self::PAIRWISE_MARKERS
            .iter()
            .any(|marker| text.contains(marker))
        {
            ReportFormat::Pairwise
        } else {
            ReportFormat::Multiway
        }
    }

    pub fn parse(&self, lines: &[String]) -> Result<ParsedAlignment, ParseErr> {
        match self {
            ReportFormat::Pairwise => parse_pairwise(lines),
            ReportFormat::Multiway => parse_multiway(lines),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Pairwise => write!(f, "pairwise"),
            ReportFormat::Multiway => write!(f, "multi-way"),
        }
    }
}

/// Read a report, trimming every line and dropping blank ones
pub fn read_report_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line_result in reader.lines() {
        let line = line_result?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    Ok(lines)
}

/// Structure name from a `... '<path>' ...` line: the quoted path without
/// its final extension.
pub(crate) fn structure_name_from_line(line: &str, line_idx: usize) -> Result<String, ParseErr> {
    let path = line
        .split('\'')
        .nth(1)
        .ok_or(ParseErr::MissingQuotedPath { line: line_idx + 1 })?;
    Ok(Path::new(path)
        .with_extension("")
        .to_string_lossy()
        .into_owned())
}

/// Collect structure names from every line containing one of `markers`
pub(crate) fn structure_names(lines: &[String], markers: &[&str]) -> Result<Vec<String>, ParseErr> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| markers.iter().any(|marker| line.contains(marker)))
        .map(|(idx, line)| structure_name_from_line(line, idx))
        .collect()
}

/// Locate the alignment table body.
///
/// The header is the first line whose `|`-separated fields satisfy
/// `is_header`. The body starts two lines below it (after the separator)
/// and stops before the next line containing a single quote, or at the end
/// of the report. Returns the index of the first body line and the body.
pub(crate) fn table_body<'a, F>(
    lines: &'a [String],
    is_header: F,
) -> Result<(usize, &'a [String]), ParseErr>
where
    F: Fn(&[&str]) -> bool,
{
    let header_idx = lines
        .iter()
        .position(|line| {
            let fields: Vec<&str> = line.split('|').map(str::trim).collect();
            is_header(&fields)
        })
        .ok_or(ParseErr::MissingTableHeader)?;

    let end = lines[header_idx + 1..]
        .iter()
        .position(|line| line.contains('\''))
        .map(|offset| header_idx + 1 + offset)
        .unwrap_or(lines.len());

    let start = (header_idx + 2).min(lines.len());
    let end = end.max(start);
    Ok((start, &lines[start..end]))
}
