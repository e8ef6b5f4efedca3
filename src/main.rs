// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! CLI for the FM min-cut bipartitioner.

use std::error::Error;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use fm_mincut::io::parse_hypergraph;
use fm_mincut::FmSolver;

#[derive(Parser)]
#[command(
    name = "fmcut",
    about = "Min-cut hypergraph bipartitioning with the Fiduccia-Mattheyses heuristic"
)]
struct Cli {
    /// Input netlist: a `num_nets num_cells` header line, then one line of
    /// 1-based cell indices per net.
    input: PathBuf,

    /// Output file, one line per cell giving its final side (0/1).
    #[arg(default_value = "output.txt")]
    output: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fmcut: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(&cli.input)?;
    let graph = parse_hypergraph(&text)?;
    let mut solver = FmSolver::new(graph);

    let start = Instant::now();
    solver.solve();
    let elapsed = start.elapsed();

    let mut out = BufWriter::new(File::create(&cli.output)?);
    solver.write_result(&mut out)?;

    println!("Cutsize: {}", solver.cut_size());
    println!("Solve time: {:.5}s", elapsed.as_secs_f64());
    Ok(())
}
