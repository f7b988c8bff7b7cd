//! 随机源
//!
//! 一个 episode 的全部随机抽样（路径选择、权重采样、状态转移、初始状态）
//! 都走同一个显式的、可播种的生成器。

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// 仿真使用的随机数生成器。
pub type SimRng = ChaCha8Rng;

/// 由种子构造生成器；`None` 时从系统熵取一个种子。
///
/// 返回实际生效的种子，便于复现。
pub fn seed_rng(seed: Option<u64>) -> (SimRng, u64) {
    let effective = seed.unwrap_or_else(|| rand::rng().random());
    (SimRng::seed_from_u64(effective), effective)
}
