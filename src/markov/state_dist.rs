//! 经验状态分布表
//!
//! 纯文本，每行一个概率值（空行和 `#` 注释行忽略），共 S 行，和为 1。

use std::fs;
use std::path::Path;

use crate::error::{FlowSchedError, Result};

/// 概率和允许的偏差
pub const SUM_TOLERANCE: f64 = 1e-6;

/// 校验概率向量：长度为 `expected_len`，每项非负有限，和约为 1。
pub fn validate_probabilities(probs: &[f64], expected_len: usize) -> Result<()> {
    if probs.len() != expected_len {
        return Err(FlowSchedError::DistributionLen {
            expected: expected_len,
            got: probs.len(),
        });
    }
    if let Some((index, &value)) = probs
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p < 0.0)
    {
        return Err(FlowSchedError::InvalidProbability { index, value });
    }
    let sum: f64 = probs.iter().sum();
    if (sum - 1.0).abs() > SUM_TOLERANCE {
        return Err(FlowSchedError::DistributionSum { sum });
    }
    Ok(())
}

pub fn parse_state_dist(raw: &str, expected_len: usize) -> Result<Vec<f64>> {
    let mut probs = Vec::with_capacity(expected_len);
    for (idx, line) in raw.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        for tok in line.split_whitespace() {
            let value = tok
                .parse::<f64>()
                .map_err(|_| FlowSchedError::ParseProbability {
                    line: idx + 1,
                    raw: tok.to_string(),
                })?;
            probs.push(value);
        }
    }
    validate_probabilities(&probs, expected_len)?;
    Ok(probs)
}

pub fn load_state_dist(path: &Path, expected_len: usize) -> Result<Vec<f64>> {
    let raw = fs::read_to_string(path).map_err(|source| FlowSchedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_state_dist(&raw, expected_len)
}
