pub mod network;
pub mod backprop;

pub use network::Network;
