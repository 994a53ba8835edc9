#![deny(clippy::all, clippy::pedantic)]
//! # SDF Studio
//!
//! Entry point for the `sdf-studio` binary. See [`studio::app`] for the
//! available commands.

use anyhow::Result;
use clap::Parser;
use studio::app::{self, Cli};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    app::run(Cli::parse())
}
