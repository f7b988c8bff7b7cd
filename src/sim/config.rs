//! 环境配置
//!
//! 所有字段都有默认值，默认即 6 链路 diamond、20 个带宽状态、10 条流、5 个动作档位。

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{FlowSchedError, Result};
use crate::markov::validate_probabilities;
use crate::rate::WeightParams;
use crate::topo::{PathSet, diamond_paths};

pub const DEFAULT_STATES: usize = 20;
pub const DEFAULT_BUCKETS: usize = 5;
pub const DEFAULT_FLOWS: usize = 10;
pub const DEFAULT_FLOW_SIZE: f64 = 10.0;

/// 新到达流的大小
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlowSize {
    Fixed { size: f64 },
    /// 在 `[min, max)` 上均匀抽取
    Uniform { min: f64, max: f64 },
}

impl Default for FlowSize {
    fn default() -> Self {
        Self::Fixed {
            size: DEFAULT_FLOW_SIZE,
        }
    }
}

impl FlowSize {
    /// `Fixed` 不消耗随机数
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Self::Fixed { size } => size,
            Self::Uniform { min, max } if min < max => rng.random_range(min..max),
            Self::Uniform { min, .. } => min,
        }
    }

    fn validate(&self) -> Result<()> {
        let ok = match *self {
            Self::Fixed { size } => size.is_finite() && size > 0.0,
            Self::Uniform { min, max } => {
                min.is_finite() && max.is_finite() && min > 0.0 && min <= max
            }
        };
        if ok {
            Ok(())
        } else {
            Err(FlowSchedError::Config(format!("invalid flow size {self:?}")))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvConfig {
    /// 每条链路的离散带宽状态数 S
    pub n_states: usize,
    /// 连续动作离散化后的档位数 A
    pub n_buckets: usize,
    /// 每个 episode 到达的流数 F
    pub n_flows: usize,
    pub paths: PathSet,
    pub flow_size: FlowSize,
    pub weight: WeightParams,
    /// reset 时计算初始速率表使用的中性权重
    pub reset_weight: f64,
    /// 每条链路初始状态的分布；缺省为 S 个状态上的均匀分布
    pub initial_state_dist: Option<Vec<f64>>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            n_states: DEFAULT_STATES,
            n_buckets: DEFAULT_BUCKETS,
            n_flows: DEFAULT_FLOWS,
            paths: diamond_paths(),
            flow_size: FlowSize::default(),
            weight: WeightParams::default(),
            reset_weight: 0.5,
            initial_state_dist: None,
        }
    }
}

impl EnvConfig {
    /// 链路数 L，由路径向量长度决定
    pub fn n_links(&self) -> usize {
        self.paths.n_links()
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| FlowSchedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_states == 0 || self.n_buckets == 0 || self.n_flows == 0 {
            return Err(FlowSchedError::Config(
                "n_states, n_buckets and n_flows must be positive".into(),
            ));
        }
        self.paths.validate()?;
        self.flow_size.validate()?;
        self.weight.validate()?;
        if !self.reset_weight.is_finite() || self.reset_weight < 0.0 {
            return Err(FlowSchedError::Config(format!(
                "reset_weight {} must be a non-negative number",
                self.reset_weight
            )));
        }
        if let Some(isd) = &self.initial_state_dist {
            validate_probabilities(isd, self.n_states)?;
        }
        Ok(())
    }

    /// 初始状态分布（每条链路相同）
    pub fn initial_distribution(&self) -> Vec<f64> {
        match &self.initial_state_dist {
            Some(isd) => isd.clone(),
            None => vec![1.0 / self.n_states as f64; self.n_states],
        }
    }
}
