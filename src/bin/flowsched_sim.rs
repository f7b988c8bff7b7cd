//! 流调度环境仿真
//!
//! 用固定动作或随机策略驱动若干个 episode，打印每个 episode 的流时间汇总。

use clap::Parser;
use flowsched_rs::env::FlowSchedEnv;
use flowsched_rs::sim::{EnvConfig, seed_rng};
use flowsched_rs::viz::VizLogger;
use rand::Rng;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "flowsched-sim",
    about = "Run flow scheduling episodes on the diamond network"
)]
struct Args {
    /// 环境配置 JSON；不填使用默认（diamond, S=20, F=10, A=5）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 经验状态分布文件，每行一个概率
    #[arg(long, default_value = "data/state_dist.txt")]
    state_dist: PathBuf,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = 1)]
    episodes: u64,

    /// 单个 episode 的最大步数，超过则截断
    #[arg(long, default_value_t = 10_000)]
    max_steps: u64,

    /// 所有链路使用的原始（压缩前）动作
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    action: f64,

    /// 每步为每条链路在 [-3, 3] 上随机抽取原始动作，忽略 --action
    #[arg(long)]
    random_policy: bool,

    /// 以 JSON 数组打印各 episode 汇总
    #[arg(long)]
    json: bool,

    /// 输出事件 JSON 文件；不填则不生成
    #[arg(long)]
    viz_json: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct EpisodeReport {
    episode: u64,
    steps: u64,
    done: bool,
    link_flow_time: Option<f64>,
    flow_completion_time: Option<f64>,
    min_reward: f64,
}

fn main() -> flowsched_rs::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => EnvConfig::from_json_file(path)?,
        None => EnvConfig::default(),
    };
    let n_links = cfg.n_links();
    let mut env = FlowSchedEnv::from_state_dist_file(cfg, &args.state_dist)?;
    if args.viz_json.is_some() {
        env.viz = Some(VizLogger::default());
    }
    env.seed(Some(args.seed));

    // 策略的随机源与环境分开，环境的抽样序列只由 --seed 决定
    let (mut policy_rng, _) = seed_rng(Some(args.seed.wrapping_add(1)));

    let mut reports = Vec::new();
    for episode in 1..=args.episodes {
        env.reset();
        let mut steps = 0;
        let mut done = false;
        let mut min_reward = f64::INFINITY;
        while !done && steps < args.max_steps {
            let actions: Vec<f64> = if args.random_policy {
                (0..n_links)
                    .map(|_| policy_rng.random_range(-3.0..3.0))
                    .collect()
            } else {
                vec![args.action; n_links]
            };
            let out = env.step(&actions)?;
            steps += 1;
            done = out.done;
            min_reward = min_reward.min(out.reward);
        }
        let summary = if done { env.last_summary().copied() } else { None };
        reports.push(EpisodeReport {
            episode,
            steps,
            done,
            link_flow_time: summary.map(|s| s.link_flow_time),
            flow_completion_time: summary.map(|s| s.flow_completion_time),
            min_reward,
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for r in &reports {
            match (r.link_flow_time, r.flow_completion_time) {
                (Some(lft), Some(fct)) => println!(
                    "episode {} steps={} link_flow_time={lft:.4} flow_completion_time={fct:.4} min_reward={:.4}",
                    r.episode, r.steps, r.min_reward
                ),
                _ => println!(
                    "episode {} steps={} truncated min_reward={:.4}",
                    r.episode, r.steps, r.min_reward
                ),
            }
        }
    }

    if let Some(path) = args.viz_json {
        if let Some(v) = env.viz.take() {
            v.write_json(&path)?;
            eprintln!("wrote viz events to {}", path.display());
        }
    }
    Ok(())
}
