//! 仿真事件记录（用于离线分析/回放）
//!
//! 用结构化 JSON 事件代替解析文本日志，不引入额外运行时依赖。

mod types;

pub use types::{VizEvent, VizEventKind, VizLogger};
