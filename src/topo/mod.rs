//! 拓扑模块
//!
//! 拓扑以数据（路径集合）表示，仿真算法不关心图结构。

pub mod diamond;
mod path_set;

pub use diamond::{DIAMOND_PATHS, diamond_paths};
pub use path_set::PathSet;
