mod cli;
mod error;
mod forward;
mod interact;
mod packages;
mod pip;
mod upgrade;
mod workflow;

use clap::Parser;
use cli::Cli;
use colored::Colorize;
use std::process;
use workflow::Outcome;

const ABORT_NOTICE: &str = "\nAborted";

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        unsafe {
            std::env::set_var("PIP_REVIEW_VERBOSE", "1");
        }
    }

    // Ctrl-C during any blocking step (pip subprocess, prompt) aborts the
    // whole run cleanly, leaving whatever was already done in place.
    ctrlc::set_handler(|| {
        println!("{}", ABORT_NOTICE);
        process::exit(0);
    })
    .expect("failed to install interrupt handler");

    match workflow::execute_review(&cli) {
        Ok(Outcome::Success) => {}
        Ok(Outcome::Aborted) => {
            println!("{}", ABORT_NOTICE);
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}
