//! Residue descriptor normalization
//!
//! GESAMT prints residues as fixed-width `chain:resname resnum` cells. The
//! pairwise table prefixes each cell with a two-character secondary structure
//! marker (`H- A:LEU  75`), the multi-way table prints the bare cell
//! (`A:CYS 341`). Both are reduced to `chain:resname:resnum`.

use crate::report::ParseErr;
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use std::fmt;

/// Width of the `chain:resname` slice in both table layouts
pub const CHAIN_RESNAME_WIDTH: usize = 5;

/// Width of the right-aligned residue number closing a pairwise cell
pub const PAIRWISE_RESNUM_WIDTH: usize = 4;

lazy_static! {
    static ref CHAIN_RESNAME_RE: Regex = Regex::new(r"^\S:\S{3}$").unwrap();
}

/// A residue aligned at one row; `None` marks a gap
pub type ResidueToken = Option<Residue>;

/// Canonical residue identifier, rendered as `chain:resname:resnum`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    chain_resname: String,
    resnum: i64,
}

impl Residue {
    fn from_fields(chain_resname: &str, resnum: &str, descriptor: &str) -> Result<Self, ParseErr> {
        let resnum = resnum
            .trim()
            .parse::<i64>()
            .map_err(|source| ParseErr::InvalidResidueNumber {
                descriptor: descriptor.to_string(),
                source,
            })?;

        // Insertion codes or unusual residue names shift the fixed columns
        if !CHAIN_RESNAME_RE.is_match(chain_resname) {
            warn!(
                "Residue '{}' does not match the expected chain:resname layout (got '{}')",
                descriptor, chain_resname
            );
        }

        Ok(Residue {
            chain_resname: chain_resname.to_string(),
            resnum,
        })
    }

    /// The `chain:resname` part, exactly as sliced from the report
    #[cfg(test)]
    pub(crate) fn chain_resname(&self) -> &str {
        &self.chain_resname
    }

    #[cfg(test)]
    pub(crate) fn resnum(&self) -> i64 {
        self.resnum
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_resname, self.resnum)
    }
}

/// Split `chars` at `at`, returning both halves as strings
fn split_chars(chars: &[char], at: usize) -> (String, String) {
    let (head, tail) = chars.split_at(at);
    (head.iter().collect(), tail.iter().collect())
}

/// Normalize a pairwise table cell such as `H- A:LEU  75`.
///
/// Offsets are taken from the end of the cell: the residue number occupies
/// the last four characters and `chain:resname` the five before it. Cells
/// shorter than that are clamped at their start.
pub fn normalize_pairwise(descriptor: &str) -> Result<ResidueToken, ParseErr> {
    if descriptor.is_empty() {
        return Ok(None);
    }

    let chars: Vec<char> = descriptor.chars().collect();
    let resnum_start = chars.len().saturating_sub(PAIRWISE_RESNUM_WIDTH);
    let name_start = resnum_start.saturating_sub(CHAIN_RESNAME_WIDTH);

    let (chain_resname, resnum) = split_chars(&chars[name_start..], resnum_start - name_start);
    Residue::from_fields(&chain_resname, &resnum, descriptor).map(Some)
}

/// Normalize a multi-way table cell such as `A:CYS 341`.
///
/// The first five characters are `chain:resname`, the rest is the residue
/// number.
pub fn normalize_multiway(descriptor: &str) -> Result<ResidueToken, ParseErr> {
    if descriptor.is_empty() {
        return Ok(None);
    }

    let chars: Vec<char> = descriptor.chars().collect();
    let at = CHAIN_RESNAME_WIDTH.min(chars.len());

    let (chain_resname, resnum) = split_chars(&chars, at);
    Residue::from_fields(&chain_resname, &resnum, descriptor).map(Some)
}
