//! 仿真公共设施
//!
//! 环境配置与随机源。

mod config;
mod rng;

pub use config::{
    DEFAULT_BUCKETS, DEFAULT_FLOW_SIZE, DEFAULT_FLOWS, DEFAULT_STATES, EnvConfig, FlowSize,
};
pub use rng::{SimRng, seed_rng};
