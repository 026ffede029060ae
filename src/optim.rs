//! Optimization of logic networks

mod algebraic_rewriting;
mod resubstitute;
mod rules;
mod traits;

pub use algebraic_rewriting::{
    aig_algebraic_rewriting, aig_algebraic_rewriting_with_config, rewrite_depth_network,
    AlgebraicRewriter, RewriteConfig, RewriteError, RewriteStats,
};
pub use resubstitute::{
    absorption_modify_network, distributivity_modify_network, exchange_f1_f2,
    three_layer_modify_network,
};
pub use rules::Rule;
pub use traits::{AigNetwork, DepthNetwork};
