//! Views computing derived information on a network

mod depth_view;
mod fanout_view;
mod level_view;

pub use depth_view::DepthView;
pub use fanout_view::FanoutView;
pub use level_view::{compute_levels, compute_reverse_levels, ReverseLevels};
