//! 动作 → 有效传输速率权重
//!
//! 权重均值是关于发送速率比例 a 的钟形曲线 `exp(-(a - mu)^2)`：
//! 发送速率并非越高越好，在 `a ≈ mu` 处效率最高。每个状态独立加一份高斯噪声，
//! 再截断到 `[floor, ceil]`。

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::error::{FlowSchedError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeightParams {
    /// 均值曲线峰值位置
    pub mu: f64,
    /// 高斯噪声标准差
    pub sigma: f64,
    /// 权重下限，避免零或负的有效速率
    pub floor: f64,
    /// 权重上限（满效率）
    pub ceil: f64,
}

impl Default for WeightParams {
    fn default() -> Self {
        Self {
            mu: 0.2,
            sigma: 0.2,
            floor: 0.01,
            ceil: 1.0,
        }
    }
}

impl WeightParams {
    pub fn validate(&self) -> Result<()> {
        if !self.mu.is_finite() || !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(FlowSchedError::Config(format!(
                "weight mu/sigma must be finite and sigma >= 0 (mu={}, sigma={})",
                self.mu, self.sigma
            )));
        }
        if !(self.floor > 0.0 && self.floor <= self.ceil && self.ceil.is_finite()) {
            return Err(FlowSchedError::Config(format!(
                "weight range [{}, {}] must satisfy 0 < floor <= ceil",
                self.floor, self.ceil
            )));
        }
        Ok(())
    }
}

/// 把原始动作压到 (0,1)：`1 / (1 + e^x)`。
pub fn squash(raw: f64) -> f64 {
    1.0 / (1.0 + raw.exp())
}

/// 把 [0,1] 内的动作分到 `n_buckets` 个档位；`a == 1` 归入最后一档。
pub fn discretize(a: f64, n_buckets: usize) -> usize {
    let bucket = (a * n_buckets as f64).floor();
    // 负数和 NaN 转换时饱和到 0
    (bucket as usize).min(n_buckets.saturating_sub(1))
}

/// 每步为每条链路、每个状态抽一份权重，得到 `[L][S]` 矩阵。
#[derive(Debug, Clone)]
pub struct WeightSampler {
    params: WeightParams,
    n_states: usize,
}

impl WeightSampler {
    pub fn new(params: WeightParams, n_states: usize) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, n_states })
    }

    pub fn params(&self) -> &WeightParams {
        &self.params
    }

    /// 动作 `a`（已压缩到 (0,1)）对应的权重均值，落在 (0,1]
    pub fn mean(&self, a: f64) -> f64 {
        (-(a - self.params.mu).powi(2)).exp()
    }

    /// 链路优先、状态其次的顺序抽样
    pub fn sample<R: Rng + ?Sized>(&self, actions: &[f64], rng: &mut R) -> Vec<Vec<f64>> {
        let WeightParams {
            sigma, floor, ceil, ..
        } = self.params;
        actions
            .iter()
            .map(|&a| {
                let mean = self.mean(a);
                (0..self.n_states)
                    .map(|_| {
                        let z: f64 = rng.sample(StandardNormal);
                        (mean + sigma * z).clamp(floor, ceil)
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squash_maps_into_unit_interval_and_zero_to_half() {
        assert_eq!(squash(0.0), 0.5);
        assert!(squash(40.0) > 0.0 && squash(40.0) < 0.01);
        assert!(squash(-40.0) <= 1.0 && squash(-40.0) > 0.99);
    }

    #[test]
    fn discretize_clamps_upper_edge() {
        assert_eq!(discretize(0.0, 5), 0);
        assert_eq!(discretize(0.19, 5), 0);
        assert_eq!(discretize(0.21, 5), 1);
        assert_eq!(discretize(0.99, 5), 4);
        assert_eq!(discretize(1.0, 5), 4);
        assert_eq!(discretize(-0.3, 5), 0);
    }
}
