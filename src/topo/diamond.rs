//! Diamond 拓扑

use super::PathSet;

/// Diamond 网络的两条路径（6 条链路）
///
/// 路径 A：链路 0,1,3,5；路径 B：链路 0,2,4。
pub const DIAMOND_PATHS: [[u8; 6]; 2] = [[1, 1, 0, 1, 0, 1], [1, 0, 1, 0, 1, 0]];

/// 构建 diamond 拓扑的路径集合
pub fn diamond_paths() -> PathSet {
    PathSet::new(DIAMOND_PATHS.iter().map(|p| p.to_vec()).collect())
        .unwrap_or_else(|e| unreachable!("diamond paths are well-formed: {e}"))
}
