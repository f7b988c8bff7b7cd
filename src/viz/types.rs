use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FlowSchedError, Result};

/// 事件类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VizEventKind {
    /// 环境元信息（每次 seed 后第一条）
    Meta {
        seed: u64,
        n_links: usize,
        n_states: usize,
        n_flows: usize,
        n_buckets: usize,
        paths: Vec<Vec<u8>>,
    },
    /// reset 后各链路初始状态
    Reset { state: Vec<usize> },
    /// 一个新流到达并被分配到路径
    FlowArrive { flow: usize, path: usize, size: f64 },
    /// 一次 step 的结果
    Step {
        state: Vec<usize>,
        reward: f64,
        buckets: Vec<usize>,
        prob: Vec<f64>,
        rewards: Vec<f64>,
    },
    /// 某链路上的流槽位在本时隙剩余大小归零
    FlowDrained { link: usize, flow: usize },
    /// episode 结束
    EpisodeDone {
        link_flow_time: f64,
        flow_completion_time: f64,
    },
}

/// 一条事件（JSON）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizEvent {
    pub episode: u64,
    /// episode 内的步数（reset 为 0）
    pub t: u64,
    #[serde(flatten)]
    pub kind: VizEventKind,
}

/// 事件收集器（存内存，结束时写 JSON 文件）
#[derive(Debug, Default)]
pub struct VizLogger {
    pub events: Vec<VizEvent>,
}

impl VizLogger {
    pub fn push(&mut self, ev: VizEvent) {
        self.events.push(ev);
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.events)?;
        fs::write(path, json).map_err(|source| FlowSchedError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
