// SPDX-License-Identifier: MIT
//
// term-shdw: a comet that follows the mouse pointer around the terminal.
//
// This binary wires the two library crates together:
//
//   shdw-term  → cbreak mode, mouse decoding, ANSI output, signals
//   shdw-comet → trail, aura, stars, and the frame loop
//
// Each frame flows through:
//
//   stdin → MouseDecoder → clamp → CometState → Renderer → OutputBuffer → stdout
//
// Settings are validated before the terminal is touched, and the terminal
// is restored before anything is printed on the way out.

mod config;

use std::io;
use std::process;

use clap::Parser;
use shdw_comet::{EffectConfig, ExitReason, Runner};
use shdw_term::reader::StdinSource;
use shdw_term::signal;
use shdw_term::terminal::{self, Terminal};

use config::CliArgs;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = CliArgs::parse().into_config().unwrap_or_else(|e| {
        eprintln!("term-shdw: {e}");
        process::exit(1);
    });

    if !terminal::is_tty() {
        eprintln!("term-shdw: stdin is not a terminal");
        process::exit(1);
    }

    match run(config) {
        Ok(ExitReason::Interrupted) => println!("Clean exit."),
        Err(e) => {
            eprintln!("term-shdw: {e}");
            process::exit(1);
        }
    }
}

/// Take over the terminal, run the effect until interrupted, give it back.
fn run(config: EffectConfig) -> shdw_comet::Result<ExitReason> {
    signal::install_interrupt_handler();

    let mut term = Terminal::new();
    term.enter()?;
    log::debug!("terminal entered, size {:?}", terminal::terminal_size());

    let mut runner = Runner::new(config, StdinSource::new());
    let result = runner.run(&mut io::stdout().lock());

    let restored = term.leave();
    let reason = result?;
    restored?;

    log::debug!("terminal restored after {} frames", runner.frames());
    Ok(reason)
}
