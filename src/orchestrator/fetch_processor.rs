//! 运行处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次完整抓取的生命周期。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：准备输出目录、启动浏览器、打开门户
//! 2. **逆序遍历**：按发现顺序的倒序逐条处理结果链接
//! 3. **重新同步**：每处理完一条就重新枚举，换新句柄并校验列表漂移
//! 4. **进度与消息**：进度条逐条推进，结果消息收尾统一输出
//! 5. **资源管理**：唯一持有 SessionDriver，成败都只关一次浏览器
//! 6. **全局统计**：汇总新保存 / 已存在 / 无记录数量与运行耗时

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::FetchError;
use crate::infrastructure::SessionDriver;
use crate::models::CaptureOutcome;
use crate::services::LinkEnumerator;
use crate::workflow::{CardCtx, GradeCardFlow};

/// 应用主结构
pub struct App {
    roll_number: String,
    driver: SessionDriver,
    enumerator: LinkEnumerator,
    flow: GradeCardFlow,
    started: Instant,
}

/// 处理统计
#[derive(Debug, Default)]
pub struct RunStats {
    pub total: usize,
    pub saved: usize,
    pub already_existed: usize,
    pub rejected: usize,
}

impl App {
    /// 初始化应用
    ///
    /// 输出目录在任何浏览器动作之前就绪，目录失败时浏览器从未启动
    pub async fn initialize(config: Config, roll_number: String, out_dir: PathBuf) -> Result<Self> {
        let started = Instant::now();
        log_startup(&config, &roll_number, &out_dir);

        let enumerator = LinkEnumerator::new(&config);
        let flow = GradeCardFlow::new(&config, roll_number.clone(), out_dir);

        flow.saver().ensure_dir().await?;

        let driver = SessionDriver::open(&config).await?;

        Ok(Self {
            roll_number,
            driver,
            enumerator,
            flow,
            started,
        })
    }

    /// 运行主流程
    ///
    /// 浏览器在这里消费掉：无论处理成败，退出前都恰好关闭一次
    pub async fn run(self) -> Result<RunStats> {
        let Self {
            roll_number,
            driver,
            enumerator,
            flow,
            started,
        } = self;

        let outcome = process_links(&driver, &enumerator, &flow, &roll_number).await;

        driver.close().await;

        let stats = outcome?;
        print_final_stats(&stats, started.elapsed());
        Ok(stats)
    }
}

/// 逆序处理全部结果链接
async fn process_links(
    driver: &SessionDriver,
    enumerator: &LinkEnumerator,
    flow: &GradeCardFlow,
    roll_number: &str,
) -> Result<RunStats> {
    let mut links = enumerator.enumerate(driver).await?;
    let total = links.len();

    if total == 0 {
        warn!("⚠️ 门户上没有发现任何结果链接，运行结束");
        return Ok(RunStats::default());
    }

    log_links_found(total, roll_number);

    let bar = build_progress_bar(total as u64)?;
    let mut stats = RunStats {
        total,
        ..Default::default()
    };
    let mut messages: Vec<String> = Vec::new();

    for (step, index) in processing_order(total).into_iter().enumerate() {
        let link = &links[index];
        let ctx = CardCtx::new(step + 1, total, link.title.clone());

        match flow.run(driver, link, &ctx).await? {
            CaptureOutcome::Captured(card) => {
                if card.already_existed {
                    stats.already_existed += 1;
                } else {
                    stats.saved += 1;
                }
                messages.push(card.outcome_message(roll_number));
            }
            CaptureOutcome::Rejected { .. } => {
                stats.rejected += 1;
            }
        }

        bar.inc(1);

        // 后退恢复之后重新枚举：给下一轮换上新鲜句柄，顺带校验列表没漂移
        links = enumerator.enumerate(driver).await?;
        ensure_stable_count(total, links.len())?;
    }

    bar.finish();

    // 全部处理完后统一输出结果消息，避免与进度条交错
    for message in &messages {
        info!("{}", message);
    }

    Ok(stats)
}

/// 处理顺序：发现顺序的倒序
fn processing_order(total: usize) -> Vec<usize> {
    (0..total).rev().collect()
}

/// 每轮重新枚举后校验链接数量没有漂移，漂移立即终止
fn ensure_stable_count(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(FetchError::LinkDrift { expected, actual }.into());
    }
    Ok(())
}

fn build_progress_bar(total: u64) -> Result<ProgressBar> {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("Processing |{bar:40}| {percent}% | {pos}/{len}")?
            .progress_chars("█░"),
    );
    Ok(bar)
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config, roll_number: &str, out_dir: &Path) {
    info!("{}", "=".repeat(60));
    info!("🚀 CUSAT 成绩单抓取启动");
    info!("🎓 学号: {}", roll_number);
    info!("📂 输出目录: {}", out_dir.display());
    info!("🌐 门户: {}", config.portal_url);
    info!("{}", "=".repeat(60));
}

fn log_links_found(total: usize, roll_number: &str) {
    info!("✓ 共发现 {} 个结果链接", total);
    info!("📋 将按逆序逐条抓取学号 {} 的成绩单\n", roll_number);
}

fn print_final_stats(stats: &RunStats, elapsed: Duration) {
    let secs = elapsed.as_secs();

    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 新保存: {}/{}", stats.saved, stats.total);
    info!("📄 已存在: {}", stats.already_existed);
    info!("➖ 无记录: {}", stats.rejected);
    info!("🟢 运行耗时: {}m {}s", secs / 60, secs % 60);
    info!("{}", "=".repeat(60));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_are_processed_in_reverse_discovery_order() {
        assert_eq!(processing_order(3), vec![2, 1, 0]);
        assert_eq!(processing_order(1), vec![0]);
        assert!(processing_order(0).is_empty());
    }

    #[test]
    fn stable_count_passes() {
        assert!(ensure_stable_count(14, 14).is_ok());
    }

    #[test]
    fn drifted_count_fails_fast() {
        let err = ensure_stable_count(14, 13).expect_err("数量漂移应当报错");
        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::LinkDrift {
                expected: 14,
                actual: 13
            })
        ));
    }

    #[test]
    fn progress_bar_template_is_valid() {
        let bar = build_progress_bar(5).expect("进度条模板应当合法");
        assert_eq!(bar.length(), Some(5));
    }
}
