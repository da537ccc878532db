use std::process::ExitCode;

use clap::Parser;

use chatshield::cli::{self, Cli};

fn main() -> ExitCode {
    match cli::run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("chatshield: {err}");
            ExitCode::FAILURE
        }
    }
}
