//! Read and write logic networks to files

mod aiger;
mod dot;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub use aiger::{read_aag, write_aag, ParseError};
pub use dot::write_dot;

use crate::Network;

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// Read a network file
///
/// Only ASCII AIGER (.aag) files are supported.
pub fn read_network_file(path: &Path) -> Result<Network, ParseError> {
    match extension(path) {
        Some("aag") => {
            let f = File::open(path)?;
            read_aag(BufReader::new(f))
        }
        _ => Err(ParseError::Unsupported(format!(
            "unknown file extension for {}",
            path.display()
        ))),
    }
}

/// Write a network file
///
/// ASCII AIGER (.aag) and Graphviz (.dot) files are supported.
pub fn write_network_file(path: &Path, ntk: &Network) -> std::io::Result<()> {
    match extension(path) {
        Some("aag") => {
            let mut w = BufWriter::new(File::create(path)?);
            write_aag(&mut w, ntk)?;
            w.flush()
        }
        Some("dot") => {
            let mut w = BufWriter::new(File::create(path)?);
            write_dot(&mut w, ntk)?;
            w.flush()
        }
        _ => Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("unknown file extension for {}", path.display()),
        )),
    }
}
