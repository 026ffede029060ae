//! Bit-parallel simulation of logic networks
//!
//! Each input value is a 64-bit word holding 64 independent patterns.
//! These functions are used to check that a rewritten network still computes the same
//! functions as before.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::network::{BinaryType, Gate};
use crate::{Network, Signal};

/// Maximum number of inputs for exhaustive simulation
pub const MAX_EXHAUSTIVE_INPUTS: usize = 20;

const VAR_MASKS: [u64; 6] = [
    0xAAAA_AAAA_AAAA_AAAA,
    0xCCCC_CCCC_CCCC_CCCC,
    0xF0F0_F0F0_F0F0_F0F0,
    0xFF00_FF00_FF00_FF00,
    0xFFFF_0000_FFFF_0000,
    0xFFFF_FFFF_0000_0000,
];

fn signal_value(s: Signal, input_values: &[u64], node_values: &[u64]) -> u64 {
    let v = if s.is_input() {
        input_values[s.input() as usize]
    } else if s.is_var() {
        node_values[s.var() as usize]
    } else {
        0
    };
    if s.is_inverted() {
        !v
    } else {
        v
    }
}

/// Simulate one word of patterns, returning one word per output
pub fn simulate(ntk: &Network, input_values: &[u64]) -> Vec<u64> {
    assert_eq!(
        input_values.len(),
        ntk.nb_inputs(),
        "Number of input values must match number of PIs"
    );
    let mut node_values = vec![0u64; ntk.nb_nodes()];
    for i in ntk.topo_order() {
        let Gate::Binary([a, b], tp) = *ntk.gate(i);
        let va = signal_value(a, input_values, &node_values);
        let vb = signal_value(b, input_values, &node_values);
        node_values[i] = match tp {
            BinaryType::And => va & vb,
            BinaryType::Xor => va ^ vb,
        };
    }
    (0..ntk.nb_outputs())
        .map(|o| signal_value(ntk.output(o), input_values, &node_values))
        .collect()
}

/// Input values for one word of the exhaustive simulation
fn exhaustive_word(nb_inputs: usize, word: usize) -> Vec<u64> {
    (0..nb_inputs)
        .map(|i| {
            if i < 6 {
                VAR_MASKS[i]
            } else if (word >> (i - 6)) & 1 != 0 {
                !0
            } else {
                0
            }
        })
        .collect()
}

/// Simulate all input combinations
///
/// Returns one vector of output words per 64 patterns. With fewer than 6 inputs, the
/// patterns repeat within the single word.
pub fn simulate_exhaustive(ntk: &Network) -> Vec<Vec<u64>> {
    assert!(
        ntk.nb_inputs() <= MAX_EXHAUSTIVE_INPUTS,
        "Too many inputs for exhaustive simulation"
    );
    let nb_words = 1usize << ntk.nb_inputs().saturating_sub(6);
    (0..nb_words)
        .map(|w| simulate(ntk, &exhaustive_word(ntk.nb_inputs(), w)))
        .collect()
}

/// Simulate random patterns from a fixed seed
///
/// Returns one vector of output words per 64 patterns.
pub fn simulate_random(ntk: &Network, nb_words: usize, seed: u64) -> Vec<Vec<u64>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..nb_words)
        .map(|_| {
            let input_values: Vec<u64> = (0..ntk.nb_inputs()).map(|_| rng.gen()).collect();
            simulate(ntk, &input_values)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulate_and_xor() {
        let mut aig = Network::new();
        let x1 = aig.add_input();
        let x2 = aig.add_input();
        let f1 = aig.and(x1, !x2);
        let f2 = aig.xor(x1, x2);
        aig.add_output(f1);
        aig.add_output(!f2);
        aig.add_output(Signal::one());
        aig.add_output(x2);

        let res = simulate(&aig, &[0b1100, 0b1010]);
        assert_eq!(res[0] & 0b1111, 0b0100);
        assert_eq!(res[1] & 0b1111, 0b1001);
        assert_eq!(res[2], !0);
        assert_eq!(res[3], 0b1010);
    }

    #[test]
    fn test_exhaustive_patterns() {
        let mut aig = Network::new();
        for _ in 0..8 {
            aig.add_input();
        }
        let mut f = aig.input(0);
        for i in 1..8 {
            f = aig.and(f, aig.input(i));
        }
        aig.add_output(f);

        let res = simulate_exhaustive(&aig);
        assert_eq!(res.len(), 4);
        // Only the very last pattern sets all inputs
        assert_eq!(res[0][0], 0);
        assert_eq!(res[1][0], 0);
        assert_eq!(res[2][0], 0);
        assert_eq!(res[3][0], 1 << 63);
    }

    #[test]
    fn test_random_is_deterministic() {
        let mut aig = Network::new();
        let x1 = aig.add_input();
        let x2 = aig.add_input();
        let f = aig.and(x1, x2);
        aig.add_output(f);

        assert_eq!(simulate_random(&aig, 4, 42), simulate_random(&aig, 4, 42));
        assert_eq!(simulate_random(&aig, 4, 42).len(), 4);
    }
}
