//! End-to-end tests for the resilabels binary: GESAMT report in, .label files out

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const PAIRWISE_REPORT: &str = "\
 GESAMT: General Efficient Structural Alignment of Macromolecular Targets

 ... reading QUERY structure from file 'foo1.pdb'
     crystal data not found
 ... reading TARGET structure from file 'foo2.pdb'

 ===== Superposition matrix

.-------------.------------.-------------.
|    Query    |  Dist.(A)  |   Target    |
|-------------+------------+-------------|
|H- A:LEU  75 | <**0.82**> |H- A:LEU  65 |
|   A:GLY  76 |            |             |
|S+ A:SER  77 | <..1.43..> |S+ A:THR  66 |
`-------------'------------'-------------'

 Notice: 'Query' and 'Target' are as given on the command line
";

const MULTIWAY_REPORT: &str = "\
 ... reading file 'structures/foo1.pdb', selection '*'
 ... reading file 'structures/foo2.pdb', selection '*'
 ... reading file 'structures/foo3.pdb', selection '*'

 Disp. |   foo1    |   foo2    |   foo3
-------+-----------+-----------+-----------
6.034 |*|  A:CYS 341 |*|  A:MET 456 |*|  D:LEU 559
6.034 | |  A:CYS 342 | |  A:MET 457 | |
1.250 | |H|A:ASN 343 | |           | |  D:ASN 561

 ''
";

fn get_resilabels_binary() -> PathBuf {
    // CARGO_BIN_EXE_resilabels is set by cargo test for the binary crate
    PathBuf::from(env!("CARGO_BIN_EXE_resilabels"))
}

fn run_resilabels(args: &[&str]) -> std::io::Result<Output> {
    Command::new(get_resilabels_binary()).args(args).output()
}

fn write_report(dir: &Path, contents: &str) -> std::io::Result<PathBuf> {
    let path = dir.join("gesamt.txt");
    fs::write(&path, contents)?;
    Ok(path)
}

#[test]
fn test_pairwise_labels() -> std::io::Result<()> {
    let temp_dir = TempDir::new()?;
    let report = write_report(temp_dir.path(), PAIRWISE_REPORT)?;

    let output = run_resilabels(&[
        "--input_gesamt",
        report.to_str().unwrap(),
        "--output_path",
        temp_dir.path().to_str().unwrap(),
    ])?;
    assert!(
        output.status.success(),
        "resilabels failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let foo1 = fs::read_to_string(temp_dir.path().join("foo1.label"))?;
    let foo2 = fs::read_to_string(temp_dir.path().join("foo2.label"))?;
    assert_eq!(
        foo1,
        "A:LEU:75\tA:LEU:75-A:LEU:65\t\n\
         A:GLY:76\tA:GLY:76-None\t\n\
         A:SER:77\tA:SER:77-A:THR:66\t\n"
    );
    assert_eq!(
        foo2,
        "A:LEU:65\tA:LEU:75-A:LEU:65\t\n\
         A:THR:66\tA:SER:77-A:THR:66\t\n"
    );
    Ok(())
}

#[test]
fn test_multiway_labels_with_gaps() -> std::io::Result<()> {
    let temp_dir = TempDir::new()?;
    let report = write_report(temp_dir.path(), MULTIWAY_REPORT)?;
    // Names keep the directory part of the quoted path
    fs::create_dir(temp_dir.path().join("structures"))?;

    let output = run_resilabels(&[
        "--input_gesamt",
        report.to_str().unwrap(),
        "--output_path",
        temp_dir.path().to_str().unwrap(),
    ])?;
    assert!(
        output.status.success(),
        "resilabels failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let label_dir = temp_dir.path().join("structures");
    let foo1 = fs::read_to_string(label_dir.join("foo1.label"))?;
    let foo2 = fs::read_to_string(label_dir.join("foo2.label"))?;
    let foo3 = fs::read_to_string(label_dir.join("foo3.label"))?;

    assert_eq!(
        foo1,
        "A:CYS:341\tA:CYS:341-A:MET:456-D:LEU:559\t\n\
         A:CYS:342\tA:CYS:342-A:MET:457-None\t\n\
         A:ASN:343\tA:ASN:343-None-D:ASN:561\t\n"
    );
    assert_eq!(
        foo2,
        "A:MET:456\tA:CYS:341-A:MET:456-D:LEU:559\t\n\
         A:MET:457\tA:CYS:342-A:MET:457-None\t\n"
    );
    assert_eq!(
        foo3,
        "D:LEU:559\tA:CYS:341-A:MET:456-D:LEU:559\t\n\
         D:ASN:561\tA:ASN:343-None-D:ASN:561\t\n"
    );
    Ok(())
}

#[test]
fn test_proteins_override() -> std::io::Result<()> {
    let temp_dir = TempDir::new()?;
    let report = write_report(temp_dir.path(), PAIRWISE_REPORT)?;

    let output = run_resilabels(&[
        "--input_gesamt",
        report.to_str().unwrap(),
        "--output_path",
        temp_dir.path().to_str().unwrap(),
        "--proteins",
        "alpha",
        "beta",
    ])?;
    assert!(output.status.success());

    assert!(temp_dir.path().join("alpha.label").exists());
    assert!(temp_dir.path().join("beta.label").exists());
    assert!(!temp_dir.path().join("foo1.label").exists());
    assert!(!temp_dir.path().join("foo2.label").exists());

    let alpha = fs::read_to_string(temp_dir.path().join("alpha.label"))?;
    assert!(alpha.starts_with("A:LEU:75\tA:LEU:75-A:LEU:65\t\n"));
    Ok(())
}

#[test]
fn test_proteins_override_length_mismatch() -> std::io::Result<()> {
    let temp_dir = TempDir::new()?;
    let report = write_report(temp_dir.path(), PAIRWISE_REPORT)?;

    let output = run_resilabels(&[
        "--input_gesamt",
        report.to_str().unwrap(),
        "--output_path",
        temp_dir.path().to_str().unwrap(),
        "--proteins",
        "alpha",
        "beta",
        "gamma",
    ])?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("structure names"));
    assert!(!temp_dir.path().join("alpha.label").exists());
    Ok(())
}

#[test]
fn test_absolute_structure_paths_stay_under_output_path() -> std::io::Result<()> {
    let temp_dir = TempDir::new()?;
    let pdb_dir = temp_dir.path().join("pdbs");
    let out_dir = temp_dir.path().join("out");
    fs::create_dir(&pdb_dir)?;
    fs::create_dir(&out_dir)?;

    let contents = PAIRWISE_REPORT
        .replace("'foo1.pdb'", &format!("'{}'", pdb_dir.join("foo1.pdb").display()))
        .replace("'foo2.pdb'", &format!("'{}'", pdb_dir.join("foo2.pdb").display()));
    let report = write_report(temp_dir.path(), &contents)?;
    let args = [
        "--input_gesamt",
        report.to_str().unwrap(),
        "--output_path",
        out_dir.to_str().unwrap(),
    ];

    // The nested directory mirroring the absolute name does not exist yet
    let output = run_resilabels(&args)?;
    assert!(!output.status.success());
    assert!(!pdb_dir.join("foo1.label").exists());
    assert!(!pdb_dir.join("foo2.label").exists());

    let nested = PathBuf::from(format!("{}/{}", out_dir.display(), pdb_dir.display()));
    fs::create_dir_all(&nested)?;
    let output = run_resilabels(&args)?;
    assert!(
        output.status.success(),
        "resilabels failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(!pdb_dir.join("foo1.label").exists());
    let foo1 = fs::read_to_string(nested.join("foo1.label"))?;
    assert!(foo1.starts_with("A:LEU:75\tA:LEU:75-A:LEU:65\t\n"));
    assert!(nested.join("foo2.label").exists());
    Ok(())
}

#[test]
fn test_rerun_is_byte_identical() -> std::io::Result<()> {
    let temp_dir = TempDir::new()?;
    let report = write_report(temp_dir.path(), PAIRWISE_REPORT)?;
    let args = [
        "--input_gesamt",
        report.to_str().unwrap(),
        "--output_path",
        temp_dir.path().to_str().unwrap(),
    ];

    assert!(run_resilabels(&args)?.status.success());
    let first = fs::read(temp_dir.path().join("foo1.label"))?;
    assert!(run_resilabels(&args)?.status.success());
    let second = fs::read(temp_dir.path().join("foo1.label"))?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_missing_table_header_fails() -> std::io::Result<()> {
    let temp_dir = TempDir::new()?;
    let report = write_report(temp_dir.path(), " ... reading file 'foo1.pdb'\n no table\n")?;

    let output = run_resilabels(&[
        "--input_gesamt",
        report.to_str().unwrap(),
        "--output_path",
        temp_dir.path().to_str().unwrap(),
    ])?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("header not found"));
    Ok(())
}

#[test]
fn test_missing_output_directory_fails() -> std::io::Result<()> {
    let temp_dir = TempDir::new()?;
    let report = write_report(temp_dir.path(), PAIRWISE_REPORT)?;
    let missing = temp_dir.path().join("does-not-exist");

    let output = run_resilabels(&[
        "--input_gesamt",
        report.to_str().unwrap(),
        "--output_path",
        missing.to_str().unwrap(),
    ])?;
    assert!(!output.status.success());
    Ok(())
}

#[test]
fn test_missing_required_argument_fails() -> std::io::Result<()> {
    let output = run_resilabels(&["--output_path", "."])?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--input_gesamt"));
    Ok(())
}
