//! 错误类型
//!
//! 只在构造阶段（读分布表、校验配置）、step 早于 reset、或动作向量不合法时报错；
//! 合法输入下的单步仿真不会失败。

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FlowSchedError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: cannot parse probability {raw:?}")]
    ParseProbability { line: usize, raw: String },

    #[error("state distribution has {got} rows, expected {expected}")]
    DistributionLen { expected: usize, got: usize },

    #[error("probability {value} at index {index} is negative or not finite")]
    InvalidProbability { index: usize, value: f64 },

    #[error("probabilities sum to {sum}, expected 1")]
    DistributionSum { sum: f64 },

    #[error("invalid config: {0}")]
    Config(String),

    #[error("action vector has {got} entries, expected one per link ({expected})")]
    ActionLen { expected: usize, got: usize },

    #[error("action for link {link} is not a finite number ({value})")]
    InvalidAction { link: usize, value: f64 },

    #[error("step called before reset")]
    NotReset,

    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlowSchedError>;
