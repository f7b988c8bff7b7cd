//! 动作/观测空间描述
//!
//! 只作为元信息提供给外部 agent，仿真核心不强制检查。

use serde::{Deserialize, Serialize};

/// 逐维上下界的盒空间
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSpace {
    pub low: Vec<f64>,
    pub high: Vec<f64>,
}

impl BoxSpace {
    pub fn uniform(dims: usize, low: f64, high: f64) -> Self {
        Self {
            low: vec![low; dims],
            high: vec![high; dims],
        }
    }

    pub fn dims(&self) -> usize {
        self.low.len()
    }

    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.dims()
            && x
                .iter()
                .zip(self.low.iter().zip(&self.high))
                .all(|(v, (lo, hi))| v >= lo && v <= hi)
    }
}
