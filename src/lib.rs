//! Depth reduction of And-Inverter Graphs by algebraic rewriting
//!
//! This crate rewrites the gates lying on the critical path of an And-Inverter Graph
//! (AIG) with local Boolean identities, until the depth of the network cannot be reduced
//! this way anymore. The functions computed by the network are preserved exactly.
//!
//! # Usage
//!
//! ```bash
//! # Reduce the depth of a network
//! aig-rebalance opt mydesign.aag -o optimized.aag
//! # Show its statistics
//! aig-rebalance stats optimized.aag
//! ```
//!
//! # Rules
//!
//! Three rules are applied, in this priority order, to each gate on the critical path:
//! * associativity: `(g0 & g1) & f1` becomes `g0 & (g1 & f1)` when `g0` is much deeper;
//! * distributivity: `(x & a) & (x & b)` becomes `x & (a & b)`, as well as its dual
//!   with complemented fanins;
//! * three-layer distributivity: associativity through two complemented And layers.
//!
//! An absorption rule is available but not enabled by default.
//! After each rewrite the levels are recomputed, and the whole network is scanned again
//! until a full pass makes no change.
//!
//! # Datastructures
//!
//! `Network` is a typical And-Inverter Graph: inverters are implicit, occupying just
//! one bit in `Signal`. Gates are structurally hashed when built through `Network::and`.
//! The rewriting engine itself only relies on the `AigNetwork` and `DepthNetwork` traits,
//! and can run on other representations providing them.
//!
//! ```
//! # use aig_rebalance::{optim, Network};
//! let mut net = Network::new();
//! let a = net.add_input();
//! let b = net.add_input();
//! let c = net.add_input();
//! let d = net.add_input();
//! let ab = net.and(a, b);
//! let abc = net.and(ab, c);
//! let abcd = net.and(abc, d);
//! net.add_output(abcd);
//!
//! let stats = optim::aig_algebraic_rewriting(&mut net).unwrap();
//! assert_eq!(stats.depth_before, 3);
//! assert_eq!(stats.depth_after, 2);
//! ```

#![warn(missing_docs)]

pub mod io;
pub mod network;
pub mod optim;
pub mod sim;
pub mod utils;

pub use network::{Gate, Network, Signal};
