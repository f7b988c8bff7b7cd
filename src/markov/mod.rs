//! 链路状态模型
//!
//! 经验分布表的读取、类别抽样以及 (状态, 档位) → 下一状态 的转移模型。

mod categorical;
mod state_dist;
mod transition;

pub use categorical::categorical_sample;
pub use state_dist::{SUM_TOLERANCE, load_state_dist, parse_state_dist, validate_probabilities};
pub use transition::{Transition, TransitionModel};
