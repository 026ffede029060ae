use std::fmt;

use crate::network::Signal;

/// Function of a two-input gate
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BinaryType {
    /// 2-input And gate
    And,
    /// 2-input Xor gate
    Xor,
}

/// Logic gate of the network
///
/// Only And gates take part in algebraic rewriting. Xor gates can be represented
/// so that general networks can be loaded, but a network containing them is not an AIG.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Gate {
    /// Two-input gate
    Binary([Signal; 2], BinaryType),
}

impl Gate {
    /// Create a 2-input And gate
    pub fn and(a: Signal, b: Signal) -> Gate {
        Gate::Binary([a, b], BinaryType::And)
    }

    /// Create a 2-input Xor gate
    pub fn xor(a: Signal, b: Signal) -> Gate {
        Gate::Binary([a, b], BinaryType::Xor)
    }

    /// Returns all signals this gate depends on
    pub fn dependencies(&self) -> &[Signal] {
        match self {
            Gate::Binary(s, _) => s,
        }
    }

    /// Returns true if the gate is a 2-input And
    pub fn is_and(&self) -> bool {
        matches!(self, Gate::Binary(_, BinaryType::And))
    }

    /// Apply a remapping of the signals to the gate
    pub fn remap<F: Fn(&Signal) -> Signal>(&self, t: F) -> Gate {
        match self {
            Gate::Binary([a, b], tp) => Gate::Binary([t(a), t(b)], *tp),
        }
    }

    /// Put the fanins in canonical order, smallest signal first
    pub fn make_canonical(&self) -> Gate {
        match self {
            Gate::Binary([a, b], tp) if a > b => Gate::Binary([*b, *a], *tp),
            g => *g,
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Binary([a, b], BinaryType::And) => write!(f, "{} & {}", a, b),
            Gate::Binary([a, b], BinaryType::Xor) => write!(f, "{} ^ {}", a, b),
        }
    }
}
