mod analysis;
mod app;
mod audio;
mod catalog;
mod cli;
mod commands;
mod config;
mod render;
mod session;
mod store;
mod theme;

use clap::Parser;
use colored::Colorize;
use log::LevelFilter;

fn main() {
    let cli = cli::Cli::parse();

    let level = if cli.quiet {
        LevelFilter::Error
    } else {
        match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    env_logger::Builder::new().filter_level(level).init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = cli.run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
