//! Read and write ASCII AIGER files
//!
//! Only combinational networks are supported: the latch count must be 0.

use std::io::{BufRead, Write};

use fxhash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::network::BinaryType;
use crate::{Gate, Network, Signal};

/// Error returned when reading a network failed
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The first line is not a valid `aag M I L O A` header
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// A line could not be parsed
    #[error("line {line}: {msg}")]
    InvalidLine {
        /// Line number, starting at 1
        line: usize,
        /// What went wrong
        msg: String,
    },

    /// The file uses a feature that is not supported
    #[error("unsupported feature: {0}")]
    Unsupported(String),

    /// A literal is used but never defined
    #[error("undefined literal {0}")]
    UndefinedLiteral(u32),

    /// The And gates form a cycle
    #[error("combinational cycle through literal {0}")]
    Cycle(u32),
}

fn parse_numbers(line: &str, nb: usize, line_nb: usize) -> Result<Vec<u32>, ParseError> {
    let v = line
        .split_whitespace()
        .map(|t| t.parse::<u32>())
        .collect::<Result<Vec<u32>, _>>()
        .map_err(|e| ParseError::InvalidLine {
            line: line_nb,
            msg: e.to_string(),
        })?;
    if v.len() != nb {
        return Err(ParseError::InvalidLine {
            line: line_nb,
            msg: format!("expected {} numbers, got {}", nb, v.len()),
        });
    }
    Ok(v)
}

/// Read a network in ASCII AIGER format
pub fn read_aag<R: BufRead>(r: R) -> Result<Network, ParseError> {
    let mut lines = r.lines();
    let header = lines
        .next()
        .ok_or_else(|| ParseError::InvalidHeader("empty file".to_string()))??;
    let fields: Vec<&str> = header.split_whitespace().collect();
    if fields.len() != 6 || fields[0] != "aag" {
        return Err(ParseError::InvalidHeader(header.clone()));
    }
    let counts = fields[1..]
        .iter()
        .map(|t| t.parse::<u32>())
        .collect::<Result<Vec<u32>, _>>()
        .map_err(|_| ParseError::InvalidHeader(header.clone()))?;
    let (max_var, nb_inputs, nb_latches, nb_outputs, nb_ands) =
        (counts[0], counts[1], counts[2], counts[3], counts[4]);
    if nb_latches != 0 {
        return Err(ParseError::Unsupported(format!("{nb_latches} latches")));
    }

    let mut body = Vec::new();
    for _ in 0..(nb_inputs + nb_outputs + nb_ands) {
        match lines.next() {
            Some(l) => body.push(l?),
            None => {
                return Err(ParseError::InvalidLine {
                    line: body.len() + 2,
                    msg: "unexpected end of file".to_string(),
                })
            }
        }
    }

    let mut ntk = Network::new();
    let mut vars: FxHashMap<u32, Signal> = FxHashMap::default();
    let mut outputs = Vec::new();
    let mut ands = Vec::new();
    let mut defined: FxHashSet<u32> = FxHashSet::default();
    for (i, line) in body.iter().enumerate() {
        let line_nb = i + 2;
        let i = i as u32;
        if i < nb_inputs {
            let lit = parse_numbers(line, 1, line_nb)?[0];
            if lit < 2 || lit & 1 != 0 || lit / 2 > max_var || vars.contains_key(&(lit / 2)) {
                return Err(ParseError::InvalidLine {
                    line: line_nb,
                    msg: format!("invalid input literal {lit}"),
                });
            }
            vars.insert(lit / 2, ntk.add_input());
        } else if i < nb_inputs + nb_outputs {
            outputs.push(parse_numbers(line, 1, line_nb)?[0]);
        } else {
            let v = parse_numbers(line, 3, line_nb)?;
            if v[0] < 2 || v[0] & 1 != 0 || v[0] / 2 > max_var {
                return Err(ParseError::InvalidLine {
                    line: line_nb,
                    msg: format!("invalid gate literal {}", v[0]),
                });
            }
            if vars.contains_key(&(v[0] / 2)) || !defined.insert(v[0] / 2) {
                return Err(ParseError::InvalidLine {
                    line: line_nb,
                    msg: format!("literal {} is already defined", v[0]),
                });
            }
            ands.push((v[0], v[1], v[2]));
        }
    }

    let is_defined = |lit: u32| {
        lit < 2 || vars.contains_key(&(lit / 2)) || defined.contains(&(lit / 2))
    };
    for &(_, a, b) in &ands {
        for lit in [a, b] {
            if !is_defined(lit) {
                return Err(ParseError::UndefinedLiteral(lit));
            }
        }
    }
    for &lit in &outputs {
        if !is_defined(lit) {
            return Err(ParseError::UndefinedLiteral(lit));
        }
    }

    let lookup = |vars: &FxHashMap<u32, Signal>, lit: u32| -> Option<Signal> {
        if lit < 2 {
            Some(if lit == 0 { Signal::zero() } else { Signal::one() })
        } else {
            vars.get(&(lit / 2)).map(|s| *s ^ (lit & 1 != 0))
        }
    };

    // Gates may be listed in any order
    let mut pending = ands;
    while !pending.is_empty() {
        let before = pending.len();
        pending.retain(|&(lhs, a, b)| match (lookup(&vars, a), lookup(&vars, b)) {
            (Some(sa), Some(sb)) => {
                let s = ntk.and(sa, sb);
                vars.insert(lhs / 2, s);
                false
            }
            _ => true,
        });
        if pending.len() == before {
            return Err(ParseError::Cycle(pending[0].0));
        }
    }

    for lit in outputs {
        let s = lookup(&vars, lit).ok_or(ParseError::UndefinedLiteral(lit))?;
        ntk.add_output(s);
    }
    Ok(ntk)
}

/// Write a network in ASCII AIGER format
///
/// A cleaned-up copy of the network is written, with gates in topological order.
pub fn write_aag<W: Write>(w: &mut W, aig: &Network) -> std::io::Result<()> {
    let mut ntk = aig.clone();
    ntk.cleanup();
    if let Some(i) = ntk.first_non_and() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("gate {} cannot be written as an And gate", ntk.node(i)),
        ));
    }

    let nb_inputs = ntk.nb_inputs() as u32;
    let lit = |s: Signal| -> u32 {
        let base = if s.is_constant() {
            0
        } else if s.is_input() {
            2 * (s.input() + 1)
        } else {
            2 * (nb_inputs + 1 + s.var())
        };
        base | s.is_inverted() as u32
    };

    writeln!(
        w,
        "aag {} {} 0 {} {}",
        ntk.nb_inputs() + ntk.nb_nodes(),
        ntk.nb_inputs(),
        ntk.nb_outputs(),
        ntk.nb_nodes()
    )?;
    for i in 0..ntk.nb_inputs() {
        writeln!(w, "{}", lit(ntk.input(i)))?;
    }
    for i in 0..ntk.nb_outputs() {
        writeln!(w, "{}", lit(ntk.output(i)))?;
    }
    for i in 0..ntk.nb_nodes() {
        let Gate::Binary([a, b], BinaryType::And) = *ntk.gate(i) else {
            unreachable!("non-And gates were rejected above");
        };
        let (a, b) = (lit(a), lit(b));
        writeln!(w, "{} {} {}", lit(ntk.node(i)), a.max(b), a.min(b))?;
    }
    Ok(())
}
