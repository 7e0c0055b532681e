//! 成绩单抓取流程 - 流程层
//!
//! 核心职责：定义"一条结果链接"的完整处理流程
//!
//! 流程顺序：
//! 1. 点击链接 → 等待筛选输入框
//! 2. 输入学号 → 回车提交（提交前先布好弹窗监视）
//! 3. 捕获弹窗
//! 4. 主页面后退恢复列表状态 → 核验归属 → 落盘 / 拒绝
//! 5. 无条件关闭弹窗

use std::path::PathBuf;

use anyhow::Result;
use chromiumoxide::Page;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::infrastructure::SessionDriver;
use crate::models::{CaptureOutcome, GradeCard, ResultLink};
use crate::services::{PopupWatcher, RecordMatcher, ReportSaver, RollNumberMatcher};
use crate::utils::slugify;
use crate::workflow::card_ctx::CardCtx;

/// 成绩单抓取流程
///
/// - 编排单条链接从点击到关弹窗的完整处理
/// - 不持有任何资源（Browser / Page）
/// - 只依赖业务能力（services）
pub struct GradeCardFlow {
    matcher: Box<dyn RecordMatcher>,
    saver: ReportSaver,
    roll_number: String,
    filter_input_selector: String,
    popup_wait_timeout_ms: u64,
    poll_interval_ms: u64,
    verbose_logging: bool,
}

impl GradeCardFlow {
    /// 创建新的抓取流程
    pub fn new(config: &Config, roll_number: impl Into<String>, out_dir: impl Into<PathBuf>) -> Self {
        let roll_number = roll_number.into();
        Self {
            matcher: Box::new(RollNumberMatcher::new(roll_number.clone())),
            saver: ReportSaver::new(out_dir),
            roll_number,
            filter_input_selector: config.filter_input_selector.clone(),
            popup_wait_timeout_ms: config.popup_wait_timeout_ms,
            poll_interval_ms: config.poll_interval_ms,
            verbose_logging: config.verbose_logging,
        }
    }

    /// 输出目录服务（供编排层做启动前准备）
    pub fn saver(&self) -> &ReportSaver {
        &self.saver
    }

    pub async fn run(
        &self,
        driver: &SessionDriver,
        link: &ResultLink,
        ctx: &CardCtx,
    ) -> Result<CaptureOutcome> {
        info!("{} 📋 处理考试: {}", ctx, ctx.exam_title);
        if self.verbose_logging {
            if let Some(href) = &link.href {
                debug!("{} href: {}", ctx, href);
            }
        }

        // ========== 第 1 步: 点击链接，进入筛选页 ==========
        link.element.click().await?;

        // 筛选输入框超时未出现说明页面结构已变
        let filter_input = driver.wait_for_selector(&self.filter_input_selector).await?;

        // ========== 第 2 步: 输入学号并提交 ==========
        filter_input.click().await?;
        filter_input.type_str(&self.roll_number).await?;

        // 提交会在新窗口打开结果，必须先布好监视再回车
        let watcher = PopupWatcher::arm(driver.browser(), self.poll_interval_ms).await?;
        filter_input.press_key("Enter").await?;

        // ========== 第 3 步: 捕获弹窗 ==========
        let popup = watcher.wait_for_popup(self.popup_wait_timeout_ms).await?;

        // ========== 第 4 步: 恢复列表状态，核验归属，落盘 ==========
        let outcome = self.settle_and_classify(driver, &popup, ctx).await;

        // ========== 第 5 步: 无条件关闭弹窗 ==========
        // 弹窗到手之后的任何失败都要等关完弹窗再传播
        if let Err(e) = popup.close().await {
            warn!("{} ⚠️ 关闭弹窗失败: {}", ctx, e);
        }

        outcome
    }

    /// 弹窗捕获之后的收尾：主页面后退恢复列表，再核验归属落盘
    ///
    /// 调用方负责在本函数返回后关闭弹窗
    async fn settle_and_classify(
        &self,
        driver: &SessionDriver,
        popup: &Page,
        ctx: &CardCtx,
    ) -> Result<CaptureOutcome> {
        driver.back_to_main().await?;

        // 等弹窗自身加载完成再读内容
        popup.wait_for_navigation().await?;

        self.classify_and_persist(popup, ctx).await
    }

    /// 核验弹窗归属并在命中时落盘
    async fn classify_and_persist(&self, popup: &Page, ctx: &CardCtx) -> Result<CaptureOutcome> {
        let content = popup.content().await?;

        if !self.matcher.matches(&content) {
            info!("{} ➖ 本场考试没有学号 {} 的记录", ctx, self.roll_number);
            return Ok(CaptureOutcome::Rejected {
                exam_title: ctx.exam_title.clone(),
            });
        }

        let slug = slugify(&ctx.exam_title);
        let dest = self.saver.destination(&slug);
        let written = self.saver.persist(&dest, popup).await?;

        if written {
            info!("{} ✓ 成绩单已保存: {}", ctx, dest.display());
        } else {
            info!("{} ✓ 成绩单已存在，跳过: {}", ctx, dest.display());
        }

        let file_name = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| slug.clone());

        Ok(CaptureOutcome::Captured(GradeCard {
            exam_title: ctx.exam_title.clone(),
            file_name,
            pdf_path: dest,
            already_existed: !written,
        }))
    }
}
