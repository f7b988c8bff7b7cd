//! 路径集合
//!
//! 拓扑不建成图，只保留若干条固定路径：每条路径是一个长度为 L 的 0/1
//! 成员向量，第 i 位为 1 表示该路径经过链路 i。

use serde::{Deserialize, Serialize};

use crate::error::{FlowSchedError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathSet {
    paths: Vec<Vec<u8>>,
}

impl PathSet {
    pub fn new(paths: Vec<Vec<u8>>) -> Result<Self> {
        let set = Self { paths };
        set.validate()?;
        Ok(set)
    }

    /// 检查：至少一条路径、长度一致且非零、只含 0/1、每条路径至少经过一条链路。
    pub fn validate(&self) -> Result<()> {
        let Some(first) = self.paths.first() else {
            return Err(FlowSchedError::Config("path set is empty".into()));
        };
        let n_links = first.len();
        if n_links == 0 {
            return Err(FlowSchedError::Config("paths must cover at least one link".into()));
        }
        for (idx, path) in self.paths.iter().enumerate() {
            if path.len() != n_links {
                return Err(FlowSchedError::Config(format!(
                    "path {idx} has {} links, expected {n_links}",
                    path.len()
                )));
            }
            if path.iter().any(|&bit| bit > 1) {
                return Err(FlowSchedError::Config(format!(
                    "path {idx} is not a 0/1 membership vector"
                )));
            }
            if path.iter().all(|&bit| bit == 0) {
                return Err(FlowSchedError::Config(format!("path {idx} uses no link")));
            }
        }
        Ok(())
    }

    /// 链路数 L
    pub fn n_links(&self) -> usize {
        self.paths.first().map_or(0, Vec::len)
    }

    /// 路径条数
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn path(&self, idx: usize) -> &[u8] {
        &self.paths[idx]
    }

    /// 路径 `idx` 经过的链路下标
    pub fn links_on(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.paths[idx]
            .iter()
            .enumerate()
            .filter(|(_, bit)| **bit == 1)
            .map(|(link, _)| link)
    }
}
