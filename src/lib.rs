//! # Fetch Gradecard
//!
//! CUSAT 成绩单批量抓取工具：驱动无头浏览器遍历结果门户，
//! 按学号筛选每场考试，并把命中的成绩单保存为 PDF
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Browser / Page），只暴露能力
//! - `SessionDriver` - 唯一的 browser/page owner，提供 导航 / 等待 / 取值 能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单条链接涉及的动作
//! - `LinkEnumerator` - 枚举结果链接能力
//! - `PopupWatcher` - 捕获结果弹窗能力
//! - `RecordMatcher` - 判定记录归属能力
//! - `ReportSaver` - 查重并落盘 PDF 能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一条结果链接"的完整处理流程
//! - `CardCtx` - 上下文封装（处理序号 + 考试名称）
//! - `GradeCardFlow` - 流程编排（click → filter → popup → verify → save）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/fetch_processor` - 一次运行的处理器，逆序遍历并管理资源
//!
//! ## 模块结构

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::launch_headless_browser;
pub use cli::Cli;
pub use config::Config;
pub use error::FetchError;
pub use infrastructure::SessionDriver;
pub use models::{CaptureOutcome, GradeCard, ResultLink};
pub use orchestrator::{App, RunStats};
pub use workflow::{CardCtx, GradeCardFlow};
