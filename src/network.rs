//! Representation of the And-Inverter Graph

mod gates;
#[allow(clippy::module_inception)]
mod network;
mod signal;

pub use gates::{BinaryType, Gate};
pub use network::Network;
pub use signal::Signal;
