//! 强化学习环境外壳
//!
//! 对外提供 seed / reset / step / render，内部组合转移模型、权重采样与流时间仿真。

mod episode;
mod link;
mod spaces;

pub use episode::{DEFAULT_SEED, EpisodeSummary, FlowSchedEnv, Phase, StepInfo, StepOutcome};
pub use link::LinkState;
pub use spaces::BoxSpace;
