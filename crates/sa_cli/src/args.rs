// crates/sa_cli/src/args.rs
//
// Argument parsing & validation for both CLI drivers: a `clap::Parser`
// struct per binary plus a small hand-rolled validation pass for checks
// `clap` itself can't express (existing-file checks beyond what
// `value_parser` gives us for free).

use clap::Parser;
use std::path::PathBuf;

/// `collapse <circuit-file> <out-basename>` — runs the fault collapser
/// and writes `.fclass`/`.order`/`.not_dominating`/`.not_dominating_checkpoint`/`.analysis`.
#[derive(Debug, Parser)]
#[command(name = "collapse", about = "Collapse stuck-at faults in an ISCAS-style circuit")]
pub struct CollapseArgs {
    /// ISCAS-style circuit file to collapse faults in.
    pub circuit: PathBuf,
    /// Base name for the output files generated (`<out>.fclass`, `<out>.order`, ...).
    pub outfile: PathBuf,
}

/// `imply <circuit-file> <command-file> <out-basename> [-u]` — runs the
/// command-driven implication engine and writes `.result`.
#[derive(Debug, Parser)]
#[command(name = "imply", about = "Run implication and checking for an ISCAS-style circuit")]
pub struct ImplyArgs {
    /// ISCAS-style circuit file describing the circuit under test.
    pub circuit: PathBuf,
    /// Command file describing the commands to apply.
    pub commands: PathBuf,
    /// Base name for the output file generated (`<out>.result`).
    pub outfile: PathBuf,
    /// Enable unique D-drive: force non-controlling inputs of the sole
    /// D-frontier gate to their non-controlling value.
    #[arg(short = 'u', long = "unique-d-drive")]
    pub unique_d_drive: bool,
}

#[derive(Debug)]
pub enum CliError {
    NotFound(PathBuf),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NotFound(p) => write!(f, "file not found: {}", p.display()),
        }
    }
}
impl std::error::Error for CliError {}

fn ensure_exists(p: &std::path::Path) -> Result<(), CliError> {
    if p.is_file() {
        Ok(())
    } else {
        Err(CliError::NotFound(p.to_path_buf()))
    }
}

pub fn parse_collapse_args() -> Result<CollapseArgs, CliError> {
    let args = CollapseArgs::parse();
    ensure_exists(&args.circuit)?;
    Ok(args)
}

pub fn parse_imply_args() -> Result<ImplyArgs, CliError> {
    let args = ImplyArgs::parse();
    ensure_exists(&args.circuit)?;
    ensure_exists(&args.commands)?;
    Ok(args)
}
