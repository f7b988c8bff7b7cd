//! 链路带宽状态的 Markov 转移模型
//!
//! 对每个 (当前状态, 动作档位) 给出下一状态的分布，按下一状态顺序排列。

use rand::Rng;
use tracing::debug;

use super::categorical::categorical_sample;
use super::state_dist::validate_probabilities;
use crate::error::{FlowSchedError, Result};

/// 一条候选转移
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub prob: f64,
    pub next_state: usize,
}

#[derive(Debug, Clone)]
pub struct TransitionModel {
    n_states: usize,
    n_buckets: usize,
    /// 下标 `state * n_buckets + bucket`
    table: Vec<Vec<Transition>>,
}

impl TransitionModel {
    /// 所有 (状态, 档位) 共用同一条经验分布。
    pub fn from_distribution(dist: &[f64], n_states: usize, n_buckets: usize) -> Result<Self> {
        let rows = vec![dist.to_vec(); n_states * n_buckets];
        Self::from_rows(rows, n_states, n_buckets)
    }

    /// 逐个 (状态, 档位) 给出分布，`rows` 按状态优先排列，共 `n_states * n_buckets` 行。
    pub fn from_rows(rows: Vec<Vec<f64>>, n_states: usize, n_buckets: usize) -> Result<Self> {
        if n_states == 0 || n_buckets == 0 {
            return Err(FlowSchedError::Config(
                "transition model needs at least one state and one bucket".into(),
            ));
        }
        if rows.len() != n_states * n_buckets {
            return Err(FlowSchedError::Config(format!(
                "transition table has {} rows, expected {}",
                rows.len(),
                n_states * n_buckets
            )));
        }
        let mut table = Vec::with_capacity(rows.len());
        for row in rows {
            validate_probabilities(&row, n_states)?;
            table.push(
                row.into_iter()
                    .enumerate()
                    .map(|(next_state, prob)| Transition { prob, next_state })
                    .collect(),
            );
        }
        debug!(n_states, n_buckets, "转移模型已构建");
        Ok(Self {
            n_states,
            n_buckets,
            table,
        })
    }

    pub fn n_states(&self) -> usize {
        self.n_states
    }

    pub fn n_buckets(&self) -> usize {
        self.n_buckets
    }

    pub fn transitions(&self, state: usize, bucket: usize) -> &[Transition] {
        assert!(state < self.n_states, "state {state} out of range");
        assert!(bucket < self.n_buckets, "bucket {bucket} out of range");
        &self.table[state * self.n_buckets + bucket]
    }

    /// 按分布抽取下一状态
    pub fn sample<R: Rng + ?Sized>(&self, state: usize, bucket: usize, rng: &mut R) -> Transition {
        let row = self.transitions(state, bucket);
        let probs: Vec<f64> = row.iter().map(|t| t.prob).collect();
        row[categorical_sample(&probs, rng)]
    }
}
