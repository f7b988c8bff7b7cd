pub mod env;
pub mod error;
pub mod flow;
pub mod markov;
pub mod rate;
pub mod sim;
pub mod topo;
pub mod viz;

pub use error::{FlowSchedError, Result};

#[cfg(test)]
mod test;
