//! `collapse` binary: loads an ISCAS-style circuit, runs the fault
//! collapser, and writes the five report artifacts of the collapser
//! CLI contract.

use sa_algo::{collapse_circuit, not_dominating, not_dominating_checkpoint, order};
use sa_cli::args::parse_collapse_args;
use sa_cli::{out_path, read_input_file, write_report_file};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_collapse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("collapse: error: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("collapse: error: {e}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run(args: &sa_cli::args::CollapseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input_file(&args.circuit)?;
    let mut circuit = sa_io::load_circuit(&text)?;
    log::info!("loaded {}: {}", args.circuit.display(), circuit.summary());

    let forest = collapse_circuit(&mut circuit);
    log::info!("collapsed {} top-level fault classes", forest.len());

    let circuit_file_name = args.circuit.display().to_string();
    write_report_file(&out_path(&args.outfile, "fclass"), &sa_report::render_fclass(&circuit_file_name, &forest))?;

    let mut ordered = Vec::new();
    order(&forest, &mut ordered);
    write_report_file(&out_path(&args.outfile, "order"), &sa_report::render_numbered(&ordered))?;

    let mut nd = Vec::new();
    not_dominating(&forest, &mut nd);
    write_report_file(&out_path(&args.outfile, "not_dominating"), &sa_report::render_numbered(&nd))?;

    let mut nd_cp = Vec::new();
    not_dominating_checkpoint(&circuit, &forest, &mut nd_cp);
    write_report_file(&out_path(&args.outfile, "not_dominating_checkpoint"), &sa_report::render_numbered(&nd_cp))?;

    write_report_file(&out_path(&args.outfile, "analysis"), &sa_report::render_analysis(&nd, &nd_cp))?;

    log::info!(
        "wrote {}.{{fclass,order,not_dominating,not_dominating_checkpoint,analysis}}",
        args.outfile.display()
    );
    Ok(())
}
