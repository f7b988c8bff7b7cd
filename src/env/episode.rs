//! Episode 编排
//!
//! 每步依次：接纳新流 → 采样权重矩阵 → 动作离散化 → 逐链路抽取下一状态、
//! 计算实际速率并推进流时间 → 判断 episode 是否结束。

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::link::LinkState;
use super::spaces::BoxSpace;
use crate::error::{FlowSchedError, Result};
use crate::flow;
use crate::markov::{TransitionModel, categorical_sample, load_state_dist};
use crate::rate::{WeightSampler, discretize, squash};
use crate::sim::{EnvConfig, SimRng, seed_rng};
use crate::viz::{VizEvent, VizEventKind, VizLogger};

/// 构造时的默认种子
pub const DEFAULT_SEED: u64 = 0;

/// 环境所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 尚未 reset
    Idle,
    Running,
    /// 所有流已到达并传完
    Done,
}

/// 每步附带信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// 各链路本次转移的概率
    pub prob: Vec<f64>,
    /// 各链路的奖励（新状态下的实际速率）
    pub rewards: Vec<f64>,
    /// 各链路的动作档位
    pub buckets: Vec<usize>,
    /// 本步到达的新流所走的路径
    pub admitted_path: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub state: Vec<usize>,
    /// 各链路奖励的最小值（瓶颈链路）
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}

/// episode 结束时的统计
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// 各链路最大累计流时间之和（链路级尾时延）
    pub link_flow_time: f64,
    /// 各流在所有链路上最大累计流时间之和
    pub flow_completion_time: f64,
    pub steps: u64,
}

/// 流调度仿真环境
#[derive(Debug)]
pub struct FlowSchedEnv {
    cfg: EnvConfig,
    transitions: TransitionModel,
    weights: WeightSampler,
    initial_dist: Vec<f64>,
    rng: SimRng,
    seed: u64,
    phase: Phase,
    links: Vec<LinkState>,
    num_flows: usize,
    steps: u64,
    episodes: u64,
    history: Vec<EpisodeSummary>,
    /// 可选事件记录；None 表示不记录
    pub viz: Option<VizLogger>,
}

impl FlowSchedEnv {
    /// `state_dist` 是长度为 S 的经验下一状态分布，所有 (状态, 档位) 共用。
    pub fn new(cfg: EnvConfig, state_dist: &[f64]) -> Result<Self> {
        cfg.validate()?;
        let transitions =
            TransitionModel::from_distribution(state_dist, cfg.n_states, cfg.n_buckets)?;
        Self::with_transitions(cfg, transitions)
    }

    /// 从分布文件构造
    pub fn from_state_dist_file(cfg: EnvConfig, path: &Path) -> Result<Self> {
        let dist = load_state_dist(path, cfg.n_states)?;
        Self::new(cfg, &dist)
    }

    /// 使用逐 (状态, 档位) 给定的转移模型
    pub fn with_transitions(cfg: EnvConfig, transitions: TransitionModel) -> Result<Self> {
        cfg.validate()?;
        if transitions.n_states() != cfg.n_states || transitions.n_buckets() != cfg.n_buckets {
            return Err(FlowSchedError::Config(format!(
                "transition model is {}x{}, config expects {}x{}",
                transitions.n_states(),
                transitions.n_buckets(),
                cfg.n_states,
                cfg.n_buckets
            )));
        }
        let weights = WeightSampler::new(cfg.weight, cfg.n_states)?;
        let initial_dist = cfg.initial_distribution();
        let (rng, seed) = seed_rng(Some(DEFAULT_SEED));
        Ok(Self {
            cfg,
            transitions,
            weights,
            initial_dist,
            rng,
            seed,
            phase: Phase::Idle,
            links: Vec::new(),
            num_flows: 0,
            steps: 0,
            episodes: 0,
            history: Vec::new(),
            viz: None,
        })
    }

    /// 重新播种；返回实际生效的种子
    pub fn seed(&mut self, seed: Option<u64>) -> u64 {
        let (rng, effective) = seed_rng(seed);
        self.rng = rng;
        self.seed = effective;
        self.emit_viz_meta();
        effective
    }

    /// 写入一条 meta 事件
    pub fn emit_viz_meta(&mut self) {
        let kind = VizEventKind::Meta {
            seed: self.seed,
            n_links: self.cfg.n_links(),
            n_states: self.cfg.n_states,
            n_flows: self.cfg.n_flows,
            n_buckets: self.cfg.n_buckets,
            paths: (0..self.cfg.paths.len())
                .map(|i| self.cfg.paths.path(i).to_vec())
                .collect(),
        };
        self.emit(kind);
    }

    pub fn config(&self) -> &EnvConfig {
        &self.cfg
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn num_flows(&self) -> usize {
        self.num_flows
    }

    pub fn links(&self) -> &[LinkState] {
        &self.links
    }

    pub fn states(&self) -> Vec<usize> {
        self.links.iter().map(|l| l.state).collect()
    }

    /// 动作空间：L 维，[0,1]（压缩前仅作参考）
    pub fn action_space(&self) -> BoxSpace {
        BoxSpace::uniform(self.cfg.n_links(), 0.0, 1.0)
    }

    /// 观测空间：L 维，[0,S]
    pub fn observation_space(&self) -> BoxSpace {
        BoxSpace::uniform(self.cfg.n_links(), 0.0, self.cfg.n_states as f64)
    }

    /// 开始新 episode，返回各链路初始状态
    #[tracing::instrument(skip(self), fields(seed = self.seed))]
    pub fn reset(&mut self) -> Vec<usize> {
        let n_links = self.cfg.n_links();
        let neutral = vec![self.cfg.reset_weight; self.cfg.n_states];
        self.links = (0..n_links)
            .map(|_| {
                let state = categorical_sample(&self.initial_dist, &mut self.rng);
                LinkState::new(state, self.cfg.n_states, self.cfg.n_flows, &neutral)
            })
            .collect();
        self.num_flows = 0;
        self.steps = 0;
        self.episodes += 1;
        self.phase = Phase::Running;

        let state = self.states();
        info!(episode = self.episodes, ?state, "episode 开始");
        self.emit(VizEventKind::Reset {
            state: state.clone(),
        });
        state
    }

    /// 推进一个时隙
    #[tracing::instrument(skip(self, actions), fields(step = self.steps + 1))]
    pub fn step(&mut self, actions: &[f64]) -> Result<StepOutcome> {
        if self.phase == Phase::Idle {
            return Err(FlowSchedError::NotReset);
        }
        let n_links = self.cfg.n_links();
        if actions.len() != n_links {
            return Err(FlowSchedError::ActionLen {
                expected: n_links,
                got: actions.len(),
            });
        }
        if let Some((link, &value)) = actions.iter().enumerate().find(|(_, a)| !a.is_finite()) {
            return Err(FlowSchedError::InvalidAction { link, value });
        }
        self.steps += 1;

        let admitted_path = self.admit_flow();

        let squashed: Vec<f64> = actions.iter().map(|&a| squash(a)).collect();
        let wt = self.weights.sample(&squashed, &mut self.rng);
        let buckets: Vec<usize> = squashed
            .iter()
            .map(|&a| discretize(a, self.cfg.n_buckets))
            .collect();

        let mut prob = Vec::with_capacity(n_links);
        let mut rewards = Vec::with_capacity(n_links);
        let mut drained = Vec::new();
        for (idx, link) in self.links.iter_mut().enumerate() {
            let tr = self.transitions.sample(link.state, buckets[idx], &mut self.rng);
            trace!(link = idx, from = link.state, to = tr.next_state, p = tr.prob, "状态转移");
            link.state = tr.next_state;
            link.set_rates(&wt[idx]);
            let rate = link.current_rate();

            let report = flow::advance(&mut link.remaining, &mut link.flow_time, rate);
            for flow in report.completed {
                trace!(link = idx, flow, "流在该链路上传完");
                drained.push((idx, flow));
            }
            prob.push(tr.prob);
            rewards.push(rate);
        }
        for (link, flow) in drained {
            self.emit(VizEventKind::FlowDrained { link, flow });
        }

        let reward = rewards.iter().copied().fold(f64::INFINITY, f64::min);
        let done =
            self.num_flows >= self.cfg.n_flows && self.links.iter().all(LinkState::is_drained);
        if done && self.phase == Phase::Running {
            self.finish_episode();
        }
        if done {
            self.phase = Phase::Done;
        }

        let state = self.states();
        debug!(num_flows = self.num_flows, reward, done, "step 完成");
        self.emit(VizEventKind::Step {
            state: state.clone(),
            reward,
            buckets: buckets.clone(),
            prob: prob.clone(),
            rewards: rewards.clone(),
        });

        Ok(StepOutcome {
            state,
            reward,
            done,
            info: StepInfo {
                prob,
                rewards,
                buckets,
                admitted_path,
            },
        })
    }

    /// 最近一次结束的 episode 的链路级流时间汇总
    pub fn render(&self) -> Option<f64> {
        self.history.last().map(|s| s.link_flow_time)
    }

    pub fn last_summary(&self) -> Option<&EpisodeSummary> {
        self.history.last()
    }

    /// 所有已结束 episode 的汇总
    pub fn episode_history(&self) -> &[EpisodeSummary] {
        &self.history
    }

    /// 还没到齐时接纳一条新流，路径在路径集合中均匀选取
    fn admit_flow(&mut self) -> Option<usize> {
        if self.num_flows >= self.cfg.n_flows {
            return None;
        }
        let path = self.rng.random_range(0..self.cfg.paths.len());
        let size = self.cfg.flow_size.sample(&mut self.rng);
        let flow = self.num_flows;
        for link in self.cfg.paths.links_on(path) {
            self.links[link].remaining[flow] += size;
        }
        self.num_flows += 1;
        trace!(flow, path, size, "新流到达");
        self.emit(VizEventKind::FlowArrive { flow, path, size });
        Some(path)
    }

    fn finish_episode(&mut self) {
        let link_flow_time: f64 = self.links.iter().map(LinkState::max_flow_time).sum();
        let flow_completion_time: f64 = (0..self.cfg.n_flows)
            .map(|f| {
                self.links
                    .iter()
                    .map(|l| l.flow_time[f])
                    .fold(0.0, f64::max)
            })
            .sum();
        let summary = EpisodeSummary {
            link_flow_time,
            flow_completion_time,
            steps: self.steps,
        };
        info!(
            episode = self.episodes,
            steps = self.steps,
            link_flow_time,
            flow_completion_time,
            "✅ episode 结束"
        );
        self.history.push(summary);
        self.emit(VizEventKind::EpisodeDone {
            link_flow_time,
            flow_completion_time,
        });
    }

    fn emit(&mut self, kind: VizEventKind) {
        if let Some(viz) = self.viz.as_mut() {
            viz.push(VizEvent {
                episode: self.episodes,
                t: self.steps,
                kind,
            });
        }
    }
}
