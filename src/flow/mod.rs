//! 流时间仿真

mod fair_share;

pub use fair_share::{SLOT, SlotReport, advance};
