//! Pairwise GESAMT report parsing
//!
//! The alignment table of a two-structure run looks like:
//!
//! ```text
//! |    Query    |  Dist.(A)  |   Target    |
//! |-------------+------------+-------------|
//! |H- A:LEU  75 | <**0.82**> |H- A:LEU  65 |
//! |   A:GLY  76 |            |             |
//! `-------------'------------'-------------'
//! ```

use crate::report::{structure_names, table_body, AlignmentRow, ParseErr, ParsedAlignment};
use crate::residue::normalize_pairwise;
use log::{debug, warn};

const ROLE_MARKERS: [&str; 4] = [
    "reading QUERY structure",
    "reading TARGET structure",
    "reading FIXED structure",
    "reading MOVING structure",
];

/// Query-side and target-side residue cells of a `|`-split row
const RESIDUE_FIELDS: [usize; 2] = [1, 3];

fn is_table_header(fields: &[&str]) -> bool {
    let has = |name: &str| fields.iter().any(|field| *field == name);
    (has("Query") || has("FIXED")) && has("Dist.(A)") && (has("Target") || has("MOVING"))
}

/// Parse one table row into the query and target tokens.
/// `line_idx` is only used for error reporting.
pub fn parse_row(line: &str, line_idx: usize) -> Result<AlignmentRow, ParseErr> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() <= RESIDUE_FIELDS[1] {
        return Err(ParseErr::NotEnoughFields { line: line_idx + 1 });
    }

    RESIDUE_FIELDS
        .iter()
        .map(|&idx| normalize_pairwise(fields[idx].trim()))
        .collect()
}

/// Parse a pairwise report (trimmed, non-blank lines)
pub fn parse_pairwise(lines: &[String]) -> Result<ParsedAlignment, ParseErr> {
    let names = structure_names(lines, &ROLE_MARKERS)?;
    if names.len() != 2 {
        warn!(
            "Expected 2 structures in pairwise report, found {}",
            names.len()
        );
    }

    let (body_start, body) = table_body(lines, is_table_header)?;
    let rows = body
        .iter()
        .enumerate()
        .map(|(offset, line)| parse_row(line, body_start + offset))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "Parsed {} aligned rows for structures {:?}",
        rows.len(),
        names
    );

    Ok(ParsedAlignment { names, rows })
}
