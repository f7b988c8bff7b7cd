//! 按显式概率向量做类别抽样（累积分布求逆）

use rand::Rng;

/// 抽一个 [0,1) 均匀数，返回累积概率第一次超过它的下标。
///
/// 浮点误差可能让累积和略小于 1；抽到这段空隙时退回最后一个概率为正的下标。
pub fn categorical_sample<R: Rng + ?Sized>(probs: &[f64], rng: &mut R) -> usize {
    let draw: f64 = rng.random();
    let mut cumulative = 0.0;
    for (idx, p) in probs.iter().enumerate() {
        cumulative += p;
        if cumulative > draw {
            return idx;
        }
    }
    probs.iter().rposition(|&p| p > 0.0).unwrap_or(0)
}
