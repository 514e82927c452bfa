//! Multi-way GESAMT report parsing (three or more structures)
//!
//! Rows start with the displacement of the aligned position followed by one
//! residue cell per structure. Cells are separated by `| |`, or by `|*|`
//! where GESAMT flags the position, and may carry a one-character prefix
//! (`H|A:ASN 103`):
//!
//! ```text
//! 6.034 |*|  A:CYS 341 |*|  A:MET 456 |*|  D:LEU 559
//! ```

use crate::report::{structure_names, table_body, AlignmentRow, ParseErr, ParsedAlignment};
use crate::residue::normalize_multiway;
use log::debug;

const FILE_MARKER: &str = "... reading file";
const HEADER_FIELD: &str = "Disp.";

const FLAGGED_DELIMITER: &str = "|*|";
const DELIMITER: &str = "| |";

fn is_table_header(fields: &[&str]) -> bool {
    fields.iter().any(|field| *field == HEADER_FIELD)
}

/// Strip a one-character prefix such as `H|` from a residue cell
fn strip_cell_prefix(cell: &str) -> &str {
    if cell.contains('|') {
        match cell.split('|').nth(1) {
            Some(inner) => inner,
            None => cell,
        }
    } else {
        cell
    }
}

/// Parse one table row into one token per structure. The leading
/// displacement column is dropped.
pub fn parse_row(line: &str) -> Result<AlignmentRow, ParseErr> {
    let line = line.replace(FLAGGED_DELIMITER, DELIMITER);
    line.split(DELIMITER)
        .map(str::trim)
        .skip(1)
        .map(|cell| normalize_multiway(strip_cell_prefix(cell)))
        .collect()
}

/// Parse a multi-way report (trimmed, non-blank lines)
pub fn parse_multiway(lines: &[String]) -> Result<ParsedAlignment, ParseErr> {
    let names = structure_names(lines, &[FILE_MARKER])?;
    let (_, body) = table_body(lines, is_table_header)?;

    let rows = body
        .iter()
        .map(|line| parse_row(line))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "Parsed {} aligned rows across {} structures",
        rows.len(),
        names.len()
    );

    Ok(ParsedAlignment { names, rows })
}
