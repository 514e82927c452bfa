//! Residue label assembly and `.label` file output
//!
//! Every alignment row becomes a [`LabelRecord`] whose generic label joins
//! the residues of all structures (`A:LEU:75-A:LEU:65`, `None` for gaps).
//! Each structure then gets a label file mapping its own residues to the
//! generic label.

use crate::report::{AlignmentRow, ParsedAlignment};
use crate::residue::{Residue, ResidueToken};
use log::{debug, info};
use rustc_hash::FxHashSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const GAP_LABEL: &str = "None";
const GENERIC_SEPARATOR: &str = "-";
const LABEL_EXTENSION: &str = "label";

#[derive(Debug)]
pub enum LabelErr {
    ColumnCountMismatch {
        row: usize,
        columns: usize,
        names: usize,
    },
    DuplicateName(String),
    Io(io::Error),
}

impl std::fmt::Display for LabelErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelErr::ColumnCountMismatch {
                row,
                columns,
                names,
            } => write!(
                f,
                "Alignment row {} has {} residue columns but {} structure names were given",
                row, columns, names
            ),
            LabelErr::DuplicateName(name) => {
                write!(
                    f,
                    "Structure name '{}' appears more than once; self-alignments need distinct names (use --proteins)",
                    name
                )
            }
            LabelErr::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for LabelErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LabelErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LabelErr {
    fn from(e: io::Error) -> Self {
        LabelErr::Io(e)
    }
}

/// Join the tokens of one row in structure order, `None` standing in for gaps
pub fn generic_resname(tokens: &[ResidueToken]) -> String {
    tokens
        .iter()
        .map(|token| match token {
            Some(residue) => residue.to_string(),
            None => GAP_LABEL.to_string(),
        })
        .collect::<Vec<_>>()
        .join(GENERIC_SEPARATOR)
}

/// `<output_path>/<name>.label`, concatenated rather than joined so that a
/// name carrying an absolute path still lands under `output_path`
pub fn label_file_path(output_path: &Path, name: &str) -> PathBuf {
    let mut path = output_path.as_os_str().to_os_string();
    path.push("/");
    path.push(name);
    path.push(".");
    path.push(LABEL_EXTENSION);
    PathBuf::from(path)
}

/// One alignment row with its generic label
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRecord {
    tokens: AlignmentRow,
    generic_resname: String,
}

impl LabelRecord {
    fn new(tokens: AlignmentRow) -> Self {
        let generic_resname = generic_resname(&tokens);
        LabelRecord {
            tokens,
            generic_resname,
        }
    }

    /// Residue of the structure at `structure_idx`, `None` for a gap
    pub fn residue(&self, structure_idx: usize) -> Option<&Residue> {
        self.tokens.get(structure_idx).and_then(|token| token.as_ref())
    }

    pub fn generic_resname(&self) -> &str {
        &self.generic_resname
    }
}

/// All label records of an alignment with the structure names they refer to
#[derive(Debug)]
pub struct LabelTable {
    names: Vec<String>,
    records: Vec<LabelRecord>,
}

impl LabelTable {
    /// Build the label records. `names_override`, when given, replaces the
    /// parsed structure names position by position.
    pub fn assemble(
        alignment: ParsedAlignment,
        names_override: Option<Vec<String>>,
    ) -> Result<Self, LabelErr> {
        let names = names_override.unwrap_or(alignment.names);

        let mut seen = FxHashSet::default();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(LabelErr::DuplicateName(name.clone()));
            }
        }

        let mut records = Vec::with_capacity(alignment.rows.len());
        for (row_idx, row) in alignment.rows.into_iter().enumerate() {
            if row.len() != names.len() {
                return Err(LabelErr::ColumnCountMismatch {
                    row: row_idx + 1,
                    columns: row.len(),
                    names: names.len(),
                });
            }
            records.push(LabelRecord::new(row));
        }

        debug!(
            "Assembled {} label records for {} structures",
            records.len(),
            names.len()
        );

        Ok(LabelTable { names, records })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn records(&self) -> &[LabelRecord] {
        &self.records
    }

    #[cfg(test)]
    pub(crate) fn structure_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Label file entries of one structure, skipping its gaps
    pub fn label_entries(
        &self,
        structure_idx: usize,
    ) -> impl Iterator<Item = (&Residue, &str)> + '_ {
        self.records.iter().filter_map(move |record| {
            record
                .residue(structure_idx)
                .map(|residue| (residue, record.generic_resname()))
        })
    }

    /// Write the label file of one structure. Each line carries a trailing
    /// tab expected by GetContacts.
    pub fn write_label_file<W: Write>(&self, structure_idx: usize, mut writer: W) -> io::Result<()> {
        for (residue, generic) in self.label_entries(structure_idx) {
            writeln!(writer, "{}\t{}\t", residue, generic)?;
        }
        writer.flush()
    }

    /// Create (or truncate) `<output_path>/<name>.label` for every structure
    pub fn write_label_files(&self, output_path: &Path) -> Result<Vec<PathBuf>, LabelErr> {
        let mut written = Vec::with_capacity(self.names.len());
        for (structure_idx, name) in self.names.iter().enumerate() {
            let label_path = label_file_path(output_path, name);
            let file = File::create(&label_path).map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!("Failed to create label file '{}': {}", label_path.display(), e),
                )
            })?;
            self.write_label_file(structure_idx, BufWriter::new(file))?;

            info!(
                "Wrote {} residues to {}",
                self.label_entries(structure_idx).count(),
                label_path.display()
            );
            written.push(label_path);
        }
        Ok(written)
    }
}
