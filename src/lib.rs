use std::{
    error,
    fmt::Display,
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod lab;
mod patrol;

pub use lab::{Direction, Guard, Laboratory, LaboratoryView, Position, Tile};
pub use patrol::{Patrol, PatrolEnd};

use lab::LaboratoryBuilder;

#[derive(Debug)]
pub enum Error {
    InconsistentRow(usize, usize),
    MultipleGuards(Guard, Guard),
    InvalidChar(char),
    InvalidCharForDirection(char),
    InvalidObstruction(Position),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InconsistentRow(expect_col_n, real_col_n) => write!(
                f,
                "Expect {} columns in this row, given {}.",
                expect_col_n, real_col_n
            ),
            Error::MultipleGuards(guard0, guard1) => write!(
                f,
                "Found multiple guards({}, {}) in given laboratory, expect one only.",
                guard0, guard1
            ),
            Error::InvalidChar(c) => {
                write!(f, "Invalid character({}) in text of laboratory layout.", c)
            }
            Error::InvalidCharForDirection(c) => {
                write!(f, "Invalid character({}) for guard direction.", c)
            }
            Error::InvalidObstruction(pos) => write!(
                f,
                "Can't place obstruction at {}, expect an empty tile other than the guard's.",
                pos
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
}

/// Logs go to stderr, filtered by `RUST_LOG`, so stdout only carries the report.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}

/// Builds a laboratory from layout text, returning the guard separately if there is one.
pub fn parse_lab(text: &str) -> Result<(Laboratory, Option<Guard>), Error> {
    let mut builder = LaboratoryBuilder::new();
    for line in text.lines() {
        builder.add_row(line)?;
    }

    Ok(builder.build())
}

pub fn read_lab<P: AsRef<Path>>(path: P) -> Result<(Laboratory, Option<Guard>)> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut builder = LaboratoryBuilder::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!(
                "Failed to read line {} from given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
        builder
            .add_row(line.as_str())
            .with_context(|| format!("Invalid laboratory layout in line {}.", ind + 1))?;
    }

    Ok(builder.build())
}
