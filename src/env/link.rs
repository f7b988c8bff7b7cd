//! 单条链路的仿真状态

/// 链路状态：当前离散带宽状态、各状态的容量与实际速率、各流槽位的剩余大小与累计流时间。
#[derive(Debug, Clone, PartialEq)]
pub struct LinkState {
    pub state: usize,
    /// `capacity[s] = s + 1`
    pub capacity: Vec<f64>,
    /// `rate[s] = weight[s] * capacity[s]`
    pub rate: Vec<f64>,
    pub remaining: Vec<f64>,
    pub flow_time: Vec<f64>,
}

impl LinkState {
    pub fn new(state: usize, n_states: usize, n_flows: usize, weights: &[f64]) -> Self {
        let capacity: Vec<f64> = (1..=n_states).map(|c| c as f64).collect();
        let mut link = Self {
            state,
            rate: vec![0.0; n_states],
            capacity,
            remaining: vec![0.0; n_flows],
            flow_time: vec![0.0; n_flows],
        };
        link.set_rates(weights);
        link
    }

    pub fn set_rates(&mut self, weights: &[f64]) {
        debug_assert_eq!(weights.len(), self.capacity.len());
        for ((rate, w), cap) in self.rate.iter_mut().zip(weights).zip(&self.capacity) {
            *rate = w * cap;
        }
    }

    /// 当前状态下的实际传输速率
    pub fn current_rate(&self) -> f64 {
        self.rate[self.state]
    }

    pub fn active_flows(&self) -> usize {
        self.remaining.iter().filter(|&&r| r > 0.0).count()
    }

    pub fn is_drained(&self) -> bool {
        self.remaining.iter().all(|&r| r == 0.0)
    }

    pub fn max_flow_time(&self) -> f64 {
        self.flow_time.iter().copied().fold(0.0, f64::max)
    }
}
