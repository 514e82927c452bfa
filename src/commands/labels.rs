use crate::labels::{LabelErr, LabelTable};
use crate::report::{read_report_lines, ReportFormat};
use log::info;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

/// Configuration for the labels command
pub struct LabelsConfig {
    /// GESAMT stdout captured to a text file
    pub input_gesamt: PathBuf,
    /// Existing directory receiving one `.label` file per structure
    pub output_path: PathBuf,
    /// Structure names replacing the ones read from the report, in input order
    pub proteins: Option<Vec<String>>,
}

/// Convert a GESAMT report into per-structure residue label files.
/// Returns the paths of the written files.
pub fn run_labels(config: &LabelsConfig) -> io::Result<Vec<PathBuf>> {
    let file = File::open(&config.input_gesamt).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!(
                "Failed to open GESAMT report '{}': {}",
                config.input_gesamt.display(),
                e
            ),
        )
    })?;
    let lines = read_report_lines(BufReader::new(file))?;

    let format = ReportFormat::detect(&lines);
    info!(
        "Reading {} GESAMT report {} ({} non-blank lines)",
        format,
        config.input_gesamt.display(),
        lines.len()
    );

    let alignment = format.parse(&lines).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Failed to parse GESAMT report '{}': {}",
                config.input_gesamt.display(),
                e
            ),
        )
    })?;

    if let Some(proteins) = &config.proteins {
        info!(
            "Overriding structure names {:?} with {:?}",
            alignment.names, proteins
        );
    }

    let table = LabelTable::assemble(alignment, config.proteins.clone()).map_err(label_error)?;
    info!(
        "Writing {} aligned rows for structures {:?}",
        table.records().len(),
        table.names()
    );
    table
        .write_label_files(&config.output_path)
        .map_err(label_error)
}

fn label_error(e: LabelErr) -> io::Error {
    match e {
        LabelErr::Io(e) => e,
        other => io::Error::new(io::ErrorKind::InvalidData, other.to_string()),
    }
}
