//! 速率权重模块

mod weight;

pub use weight::{WeightParams, WeightSampler, discretize, squash};
