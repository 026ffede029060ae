//! Depth reduction by algebraic rewriting
//!
//! Gates on the critical path are rewritten with associativity and distributivity rules
//! until no rule applies anymore. Each rewrite preserves the functions of the network.

use std::fmt;

use log::{info, trace, warn};
use thiserror::Error;

use crate::optim::{DepthNetwork, Rule};
use crate::utils::DepthView;
use crate::Network;

/// Error returned when the rewriting cannot be run on a network
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RewriteError {
    /// The network contains gates other than 2-input And
    #[error("network is not an AIG: gate {node} is not a 2-input And")]
    NotAnAig {
        /// The offending gate
        node: String,
    },
}

/// Configuration of the algebraic rewriting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteConfig {
    /// Rules tried on each gate, in priority order
    pub rules: Vec<Rule>,
    /// Maximum number of passes over the network before giving up on the fixpoint
    pub max_passes: usize,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        RewriteConfig {
            rules: Rule::DEFAULT.to_vec(),
            max_passes: 1024,
        }
    }
}

impl RewriteConfig {
    /// Use these rules, in this order
    pub fn with_rules(mut self, rules: &[Rule]) -> Self {
        self.rules = rules.to_vec();
        self
    }

    /// Limit the number of passes
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Also try the absorption rule, after the others
    pub fn with_absorption(mut self) -> Self {
        if !self.rules.contains(&Rule::Absorption) {
            self.rules.push(Rule::Absorption);
        }
        self
    }
}

/// Statistics of a rewriting run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Number of passes over the gates, including the last one without changes
    pub passes: usize,
    /// Number of rewrites, per rule
    pub rewrites: [usize; 4],
    /// Depth of the network before rewriting
    pub depth_before: u32,
    /// Depth of the network after rewriting
    pub depth_after: u32,
    /// Number of live gates before rewriting
    pub gates_before: usize,
    /// Number of live gates after rewriting, including those left dangling
    pub gates_after: usize,
    /// Whether the pass limit stopped the rewriting before the fixpoint
    pub hit_pass_limit: bool,
}

impl RewriteStats {
    /// Number of rewrites done with this rule
    pub fn rewrites_for(&self, rule: Rule) -> usize {
        self.rewrites[rule.index()]
    }

    /// Total number of rewrites
    pub fn total_rewrites(&self) -> usize {
        self.rewrites.iter().sum()
    }

    /// Reduction in depth
    pub fn level_reduction(&self) -> i64 {
        self.depth_before as i64 - self.depth_after as i64
    }
}

impl fmt::Display for RewriteStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "algebraic rewriting: {} rewrites in {} passes, levels {} → {}, gates {} → {}",
            self.total_rewrites(),
            self.passes,
            self.depth_before,
            self.depth_after,
            self.gates_before,
            self.gates_after
        )?;
        if self.hit_pass_limit {
            write!(f, " (pass limit reached)")?;
        }
        Ok(())
    }
}

/// Fixpoint driver applying the rules to every gate of a network
pub struct AlgebraicRewriter<'a, N: DepthNetwork> {
    ntk: &'a mut N,
    config: &'a RewriteConfig,
}

impl<'a, N: DepthNetwork> AlgebraicRewriter<'a, N> {
    /// Prepare the rewriting of a network
    pub fn new(ntk: &'a mut N, config: &'a RewriteConfig) -> Self {
        AlgebraicRewriter { ntk, config }
    }

    fn nb_gates(&self) -> usize {
        let mut nb = 0;
        self.ntk.foreach_gate(|_| nb += 1);
        nb
    }

    /// Try the rules on a gate, in order. Return the rule that modified the network
    fn try_algebraic_rules(&mut self, n: N::Node) -> Option<Rule> {
        let config = self.config;
        for &rule in &config.rules {
            if rule.try_apply(self.ntk, n) {
                return Some(rule);
            }
        }
        None
    }

    /// Scan all gates until a full pass does not change anything
    pub fn run(mut self) -> RewriteStats {
        let mut stats = RewriteStats {
            depth_before: self.ntk.depth(),
            gates_before: self.nb_gates(),
            ..Default::default()
        };

        loop {
            if stats.passes >= self.config.max_passes {
                warn!(
                    "Algebraic rewriting stopped after {} passes without reaching a fixpoint",
                    stats.passes
                );
                stats.hit_pass_limit = true;
                break;
            }
            stats.passes += 1;

            // Gates created during the pass are only visited by the next one
            let mut gates = Vec::new();
            self.ntk.foreach_gate(|n| gates.push(n));

            let mut changed = false;
            for n in gates {
                if let Some(rule) = self.try_algebraic_rules(n) {
                    self.ntk.update_levels();
                    stats.rewrites[rule.index()] += 1;
                    changed = true;
                }
            }
            trace!(
                "Pass {}: {} rewrites so far, depth {}",
                stats.passes,
                stats.total_rewrites(),
                self.ntk.depth()
            );
            if !changed {
                break;
            }
        }

        stats.depth_after = self.ntk.depth();
        stats.gates_after = self.nb_gates();
        info!("{}", stats);
        stats
    }
}

/// Run the rewriting on any network providing depth information
///
/// Fails without modifying the network if it contains anything other than And gates.
pub fn rewrite_depth_network<N: DepthNetwork>(
    ntk: &mut N,
    config: &RewriteConfig,
) -> Result<RewriteStats, RewriteError> {
    if let Some(node) = ntk.find_non_and_gate() {
        return Err(RewriteError::NotAnAig {
            node: node.to_string(),
        });
    }
    Ok(AlgebraicRewriter::new(ntk, config).run())
}

/// Reduce the depth of an AIG with the default rules
pub fn aig_algebraic_rewriting(ntk: &mut Network) -> Result<RewriteStats, RewriteError> {
    aig_algebraic_rewriting_with_config(ntk, &RewriteConfig::default())
}

/// Reduce the depth of an AIG
pub fn aig_algebraic_rewriting_with_config(
    ntk: &mut Network,
    config: &RewriteConfig,
) -> Result<RewriteStats, RewriteError> {
    let mut view = DepthView::new(ntk);
    rewrite_depth_network(&mut view, config)
}
