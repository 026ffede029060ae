//! End-to-end checks of the algebraic rewriting pass on generated networks

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use aig_rebalance::optim::{aig_algebraic_rewriting, aig_algebraic_rewriting_with_config};
use aig_rebalance::optim::{RewriteConfig, Rule};
use aig_rebalance::sim::{simulate_exhaustive, simulate_random};
use aig_rebalance::utils::compute_levels;
use aig_rebalance::{Network, Signal};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Depth of the network, measured independently of the rewriting engine
fn depth(aig: &Network) -> u32 {
    let levels = compute_levels(aig, None);
    (0..aig.nb_outputs())
        .map(|i| {
            let s = aig.output(i);
            if s.is_var() {
                levels[s.var() as usize]
            } else {
                0
            }
        })
        .max()
        .unwrap_or(0)
}

/// Random And-Inverter Graph, biased towards long paths
fn random_aig(seed: u64) -> Network {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut aig = Network::new();
    let nb_inputs = rng.gen_range(3..=8);
    let mut signals: Vec<Signal> = (0..nb_inputs).map(|_| aig.add_input()).collect();
    for _ in 0..rng.gen_range(5..=60) {
        let a = if rng.gen_bool(0.7) {
            let back = rng.gen_range(0..signals.len().min(4));
            signals[signals.len() - 1 - back]
        } else {
            signals[rng.gen_range(0..signals.len())]
        };
        let b = signals[rng.gen_range(0..signals.len())];
        let s = aig.and(a ^ rng.gen_bool(0.4), b ^ rng.gen_bool(0.4));
        if s.is_var() && !signals.contains(&s.without_inversion()) {
            signals.push(s.without_inversion());
        }
    }
    let gates: Vec<Signal> = signals.iter().copied().filter(|s| s.is_var()).collect();
    for s in gates.iter().rev().take(3) {
        aig.add_output(*s ^ rng.gen_bool(0.3));
    }
    aig
}

fn chain(nb_gates: usize, complemented: bool) -> Network {
    let mut aig = Network::new();
    let mut s = aig.add_input();
    for _ in 0..nb_gates {
        let x = aig.add_input();
        s = aig.and(s ^ complemented, x);
    }
    aig.add_output(s);
    aig
}

#[test]
fn test_random_networks() {
    init_logging();
    for seed in 0..200 {
        let mut aig = random_aig(seed);
        if aig.nb_outputs() == 0 {
            continue;
        }
        let expected = simulate_exhaustive(&aig);
        let depth_before = depth(&aig);

        let stats = aig_algebraic_rewriting(&mut aig).unwrap();
        assert_eq!(simulate_exhaustive(&aig), expected, "seed {seed}");
        assert_eq!(stats.depth_before, depth_before, "seed {seed}");
        assert_eq!(stats.depth_after, depth(&aig), "seed {seed}");
        assert!(stats.depth_after <= stats.depth_before, "seed {seed}");
        assert!(!stats.hit_pass_limit, "seed {seed}");

        let again = aig_algebraic_rewriting(&mut aig).unwrap();
        assert_eq!(again.total_rewrites(), 0, "seed {seed}");
        assert_eq!(again.passes, 1, "seed {seed}");
        assert_eq!(simulate_exhaustive(&aig), expected, "seed {seed}");
    }
}

#[test]
fn test_random_networks_with_absorption() {
    init_logging();
    let config = RewriteConfig::default().with_absorption();
    for seed in 1000..1100 {
        let mut aig = random_aig(seed);
        if aig.nb_outputs() == 0 {
            continue;
        }
        let expected = simulate_exhaustive(&aig);
        let stats = aig_algebraic_rewriting_with_config(&mut aig, &config).unwrap();
        assert_eq!(simulate_exhaustive(&aig), expected, "seed {seed}");
        assert!(stats.depth_after <= stats.depth_before, "seed {seed}");
        assert!(!stats.hit_pass_limit, "seed {seed}");
    }
}

#[test]
fn test_four_input_chain() {
    init_logging();
    let mut aig = Network::new();
    let a = aig.add_input();
    let b = aig.add_input();
    let c = aig.add_input();
    let d = aig.add_input();
    let ab = aig.and(a, b);
    let abc = aig.and(ab, c);
    let abcd = aig.and(abc, d);
    aig.add_output(abcd);
    let expected = simulate_exhaustive(&aig);

    let stats = aig_algebraic_rewriting(&mut aig).unwrap();
    assert_eq!(stats.depth_before, 3);
    assert_eq!(stats.depth_after, 2);
    assert_eq!(stats.passes, 2);
    assert_eq!(stats.rewrites_for(Rule::Associativity), 1);
    assert_eq!(stats.total_rewrites(), 1);
    assert_eq!(simulate_exhaustive(&aig), expected);
}

#[test]
fn test_long_chains_terminate() {
    init_logging();
    for (nb_gates, expected_depth) in [(16, 5), (32, 7), (64, 10)] {
        let mut aig = chain(nb_gates, false);
        let expected = simulate_random(&aig, 16, 1);
        let stats = aig_algebraic_rewriting(&mut aig).unwrap();
        assert_eq!(stats.depth_before, nb_gates as u32);
        assert_eq!(stats.depth_after, expected_depth);
        assert!(stats.passes <= nb_gates);
        assert!(!stats.hit_pass_limit);
        assert_eq!(simulate_random(&aig, 16, 1), expected);
    }
}

#[test]
fn test_complemented_cascade() {
    init_logging();
    let mut aig = chain(16, true);
    let expected = simulate_exhaustive(&aig);
    let stats = aig_algebraic_rewriting(&mut aig).unwrap();
    assert_eq!(stats.depth_before, 16);
    assert_eq!(stats.depth_after, 8);
    assert!(stats.rewrites_for(Rule::ThreeLayerDistributivity) > 0);
    assert_eq!(simulate_exhaustive(&aig), expected);
}
