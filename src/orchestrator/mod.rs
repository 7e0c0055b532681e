//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一次完整运行的生命周期与调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `fetch_processor` - 运行处理器
//! - 管理应用生命周期（初始化、运行、清理）
//! - 启动前准备输出目录
//! - 逆序遍历结果链接，每轮之后重新枚举并校验漂移
//! - 维护进度条推进与结果消息的输出节奏
//! - 唯一持有 SessionDriver 的模块，保证浏览器只关一次
//!
//! ## 层次关系
//!
//! ```text
//! fetch_processor (一次运行)
//!     ↓
//! workflow::GradeCardFlow (处理单条 ResultLink)
//!     ↓
//! services (能力层：enumerate / popup / match / save)
//!     ↓
//! infrastructure (基础设施：SessionDriver)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：编排层只做调度和统计，不做归属判断
//! 2. **资源隔离**：只有编排层持有 SessionDriver 的所有权
//! 3. **向下依赖**：编排层 → workflow → services → infrastructure

pub mod fetch_processor;

// 重新导出主要类型
pub use fetch_processor::{App, RunStats};
