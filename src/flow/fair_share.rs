//! 处理器共享（等分带宽）的流时间推进
//!
//! 一个时隙内，链路总速率在所有活跃流之间平均分配。若有流在时隙中途完成，
//! 释放的带宽在剩余时间里重新分给仍活跃的流。
//!
//! 流槽位活跃当且仅当剩余大小 > 0：尚未到达的流和已完成的流一样被排除在外。

use tracing::trace;

/// 一个时隙的长度
pub const SLOT: f64 = 1.0;

/// `advance` 的附带结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotReport {
    /// 本时隙内完成的流槽位，按完成先后排列
    pub completed: Vec<usize>,
    /// 时隙内存在活跃流的时长，不超过 `SLOT`
    pub busy: f64,
}

/// 把一条链路上的所有流推进一个时隙，原地更新剩余大小与累计流时间。
///
/// `total_rate` 为 0（或非法值）时活跃流只累计时间，大小不变。
pub fn advance(remaining: &mut [f64], flow_time: &mut [f64], total_rate: f64) -> SlotReport {
    assert_eq!(
        remaining.len(),
        flow_time.len(),
        "remaining sizes and flow times must cover the same flow slots"
    );
    let total_rate = total_rate.max(0.0);
    let mut report = SlotReport::default();
    let mut elapsed = 0.0;

    while elapsed < SLOT {
        let active: Vec<usize> = (0..remaining.len()).filter(|&i| remaining[i] > 0.0).collect();
        if active.is_empty() {
            break;
        }
        let left = SLOT - elapsed;
        let rate_per_flow = total_rate / active.len() as f64;
        let shortest = active
            .iter()
            .map(|&i| remaining[i])
            .fold(f64::INFINITY, f64::min);
        // rate_per_flow 为 0 时为 +inf，必然走时隙结束分支
        let time_to_finish = shortest / rate_per_flow;

        let (dt, served) = if time_to_finish > left {
            (left, rate_per_flow * left)
        } else {
            (time_to_finish, shortest)
        };
        for &i in &active {
            flow_time[i] += dt;
            remaining[i] = (remaining[i] - served).max(0.0);
            if remaining[i] == 0.0 {
                report.completed.push(i);
            }
        }
        trace!(active = active.len(), rate_per_flow, dt, "时隙子区间");

        if time_to_finish > left {
            elapsed = SLOT;
        } else {
            elapsed += time_to_finish;
        }
    }

    report.busy = elapsed.min(SLOT);
    report
}
