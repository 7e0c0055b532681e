//! 弹窗捕获 - 业务能力层
//!
//! 提交筛选会在新窗口中打开结果，这里负责把那个新窗口找出来

use std::collections::HashSet;
use std::time::{Duration, Instant};

use anyhow::Result;
use chromiumoxide::{Browser, Page};
use tokio::time::sleep;
use tracing::debug;

use crate::error::FetchError;

/// 一次性弹窗捕获器
///
/// 原理：在触发提交之前快照当前全部 target，提交后轮询
/// `browser.pages()`，第一个快照之外的 target 即为结果弹窗。
/// 必须先 arm 再触发，否则弹窗可能在监视开始前就已出现。
pub struct PopupWatcher<'a> {
    browser: &'a Browser,
    known_targets: HashSet<String>,
    poll_interval: Duration,
}

impl<'a> PopupWatcher<'a> {
    /// 在触发弹窗的操作之前创建，快照当前所有 target
    pub async fn arm(browser: &'a Browser, poll_interval_ms: u64) -> Result<PopupWatcher<'a>> {
        let known_targets: HashSet<String> = browser
            .pages()
            .await?
            .iter()
            .map(|page| page.target_id().inner().clone())
            .collect();

        debug!("🪟 弹窗监视已就位，当前 {} 个 target", known_targets.len());

        Ok(Self {
            browser,
            known_targets,
            poll_interval: Duration::from_millis(poll_interval_ms),
        })
    }

    /// 等待新弹窗出现
    ///
    /// 限时等待，超时返回 PopupCapture 错误而不是无限挂起
    pub async fn wait_for_popup(self, timeout_ms: u64) -> Result<Page> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);

        loop {
            for page in self.browser.pages().await? {
                let target = page.target_id().inner();
                if !self.known_targets.contains(target) {
                    debug!("🪟 捕获到结果弹窗: {}", target);
                    return Ok(page);
                }
            }
            if Instant::now() >= deadline {
                return Err(FetchError::PopupCapture { timeout_ms }.into());
            }
            sleep(self.poll_interval).await;
        }
    }
}
