//! `imply` binary: loads an ISCAS-style circuit and a command script,
//! then drives the implication engine and frontier/X-path analyzers
//! over the command stream, writing `.result`.

use sa_algo::{d_frontier, imply_and_check, j_frontier, x_path, Direction};
use sa_cli::args::parse_imply_args;
use sa_cli::{out_path, read_input_file, write_report_file};
use sa_core::Fault;
use sa_io::CommandKind;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_imply_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("imply: error: {e}");
            return ExitCode::from(1);
        }
    };

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("imply: error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Returns `Ok(true)` on a clean run, `Ok(false)` if a conflict aborted the
/// command stream (already reported to stderr), `Err` for I/O/parse
/// failures.
fn run(args: &sa_cli::args::ImplyArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let circuit_text = read_input_file(&args.circuit)?;
    let mut circuit = sa_io::load_circuit(&circuit_text)?;
    log::info!("loaded {}: {}", args.circuit.display(), circuit.summary());

    let command_text = read_input_file(&args.commands)?;
    let commands = sa_io::parse_commands(&command_text)?;
    log::info!("loaded {} commands from {}", commands.len(), args.commands.display());

    let mut active_faults: Vec<Fault> = Vec::new();
    let mut result = String::new();

    for command in &commands {
        match &command.kind {
            CommandKind::Fault { gate, polarity } => {
                active_faults.push(Fault::on_stem(gate.clone(), *polarity));
            }
            CommandKind::Imply { gate, value } => {
                let ok = imply_and_check(&mut circuit, &active_faults, gate, *value, args.unique_d_drive, Direction::Both);
                if !ok {
                    let msg = format!("CONFLICT. Commands aborted on command #{}", command.index);
                    log::error!("{msg}");
                    eprintln!("{msg}");
                    write_report_file(&out_path(&args.outfile, "result"), &result)?;
                    return Ok(false);
                }
            }
            CommandKind::Jfront => {
                result.push_str(&sa_report::render_frontier_section("J-Frontier", &j_frontier(&circuit)));
            }
            CommandKind::Dfront => {
                result.push_str(&sa_report::render_frontier_section("D-Frontier", &d_frontier(&circuit)));
            }
            CommandKind::Xpath => {
                result.push_str(&sa_report::render_frontier_section("X-PATH", &x_path(&circuit)));
            }
            CommandKind::Display => {
                result.push_str(&sa_report::render_state_dump(&circuit));
            }
        }
    }

    write_report_file(&out_path(&args.outfile, "result"), &result)?;
    log::info!("wrote {}.result", args.outfile.display());
    Ok(true)
}
