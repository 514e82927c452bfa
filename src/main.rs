use clap::Parser;
use resilabels::commands::labels::{run_labels, LabelsConfig};
use std::io;
use std::path::PathBuf;

/// Convert GESAMT structural alignment output into GetContacts residue label files.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// A .txt file produced by redirecting output from gesamt to a file
    #[clap(long = "input_gesamt", value_parser)]
    input_gesamt: PathBuf,

    /// Path to output directory (must exist)
    #[clap(long = "output_path", value_parser)]
    output_path: PathBuf,

    /// Names of all proteins in the gesamt input, in the order they were given to gesamt.
    /// For `gesamt foo1.pdb foo2.pdb foo3.pdb` use `--proteins foo1 foo2 foo3`.
    #[clap(long, value_parser, num_args = 1..)]
    proteins: Option<Vec<String>>,

    /// Verbosity level (0 = error, 1 = info, 2 = debug)
    #[clap(short, long, default_value = "0")]
    verbose: u8,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // Initialize logger based on verbosity
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    let config = LabelsConfig {
        input_gesamt: args.input_gesamt,
        output_path: args.output_path,
        proteins: args.proteins,
    };
    run_labels(&config)?;

    Ok(())
}
