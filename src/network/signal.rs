use std::fmt;
use std::ops::{BitXor, Not};

/// Representation of a signal (a boolean variable or its complement)
///
/// May be 0, 1, x or !x.
/// Design inputs and constants get a special representation.
///
/// The low bit holds the complement flag, the next one marks primary inputs.
/// Gate outputs are numbered from 1 upwards in the remaining bits, leaving 0
/// for the constants.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Signal {
    a: u32,
}

impl Signal {
    /// Constant zero signal
    pub fn zero() -> Signal {
        Signal { a: 0 }
    }

    /// Constant one signal
    pub fn one() -> Signal {
        Signal { a: 1 }
    }

    /// Create a signal from a primary input index
    pub fn from_input(v: u32) -> Signal {
        assert!(v < (u32::MAX >> 2), "Input index out of range");
        Signal { a: (v << 2) | 2 }
    }

    /// Create a signal from the output of the gate at this index
    pub fn from_var(v: u32) -> Signal {
        assert!(v < (u32::MAX >> 2) - 1, "Gate index out of range");
        Signal { a: (v + 1) << 2 }
    }

    /// Obtain the primary input index, for an input signal
    pub fn input(&self) -> u32 {
        debug_assert!(self.is_input());
        self.a >> 2
    }

    /// Obtain the gate index, for a gate output signal
    pub fn var(&self) -> u32 {
        debug_assert!(self.is_var());
        (self.a >> 2) - 1
    }

    /// Return true if the signal is a constant (0 or 1)
    pub fn is_constant(&self) -> bool {
        self.a <= 1
    }

    /// Return true if the signal is a primary input or its complement
    pub fn is_input(&self) -> bool {
        self.a & 2 != 0
    }

    /// Return true if the signal is the output of a gate or its complement
    pub fn is_var(&self) -> bool {
        !self.is_constant() && !self.is_input()
    }

    /// Return true if the signal is complemented
    pub fn is_inverted(&self) -> bool {
        self.a & 1 != 0
    }

    /// Return the uncomplemented version of the signal
    pub fn without_inversion(&self) -> Signal {
        Signal { a: self.a & !1 }
    }
}

impl Not for Signal {
    type Output = Signal;

    fn not(self) -> Signal {
        Signal { a: self.a ^ 1 }
    }
}

impl Not for &Signal {
    type Output = Signal;

    fn not(self) -> Signal {
        !*self
    }
}

impl BitXor<bool> for Signal {
    type Output = Signal;

    fn bitxor(self, rhs: bool) -> Signal {
        Signal {
            a: self.a ^ (rhs as u32),
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Signal::zero() {
            return write!(f, "0");
        }
        if *self == Signal::one() {
            return write!(f, "1");
        }
        if self.is_inverted() {
            write!(f, "!")?;
        }
        if self.is_input() {
            write!(f, "i{}", self.input())
        } else {
            write!(f, "x{}", self.var())
        }
    }
}
