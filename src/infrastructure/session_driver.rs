//! 会话驱动 - 基础设施层
//!
//! 持有唯一的 Browser / Page 资源，只暴露"导航、等待、取值"的能力

use std::time::{Duration, Instant};

use anyhow::Result;
use chromiumoxide::{Browser, Element, Page};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::browser::launch_headless_browser;
use crate::config::Config;
use crate::error::FetchError;

/// 会话驱动
///
/// 职责：
/// - 持有唯一的 Browser 和主 Page 资源
/// - 暴露 等待选择器 / 执行 JS / 后退恢复 的能力
/// - 不认识 ResultLink / GradeCard
/// - 不处理业务流程
pub struct SessionDriver {
    browser: Browser,
    page: Page,
    config: Config,
}

impl SessionDriver {
    /// 启动浏览器、打开门户并等待主内容容器出现
    pub async fn open(config: &Config) -> Result<Self> {
        let (browser, page) = launch_headless_browser(config).await?;

        let driver = Self {
            browser,
            page,
            config: config.clone(),
        };

        // 初始加载以主容器出现为准，超时按导航失败处理
        driver
            .wait_for_selector(&driver.config.main_selector)
            .await
            .map_err(|e| FetchError::Navigation {
                url: driver.config.portal_url.clone(),
                reason: e.to_string(),
            })?;

        info!("📄 门户主内容已就绪");
        Ok(driver)
    }

    /// 获取主 page 的引用（用于元素级操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 获取 browser 的引用（用于弹窗目标枚举）
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// 轮询等待选择器命中，超时返回 UiContract 错误
    pub async fn wait_for_selector(&self, selector: &str) -> Result<Element> {
        let timeout_ms = self.config.selector_wait_timeout_ms;
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);

        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                return Ok(element);
            }
            if Instant::now() >= deadline {
                return Err(FetchError::UiContract {
                    selector: selector.to_string(),
                    waited_ms: timeout_ms,
                }
                .into());
            }
            sleep(Duration::from_millis(self.config.poll_interval_ms)).await;
        }
    }

    /// 后退回结果列表页并等待主容器重新出现
    ///
    /// 点击结果链接会让整页跳转，后退是恢复可枚举状态的唯一途径
    pub async fn back_to_main(&self) -> Result<()> {
        debug!("↩️ 返回结果列表页...");
        self.page
            .evaluate("history.back()")
            .await
            .map_err(FetchError::Cdp)?;
        self.wait_for_selector(&self.config.main_selector).await?;
        Ok(())
    }

    /// 执行 JS 代码并返回 JSON 结果，协议层失败归入 Cdp 错误
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue> {
        let result = self
            .page
            .evaluate(js_code.into())
            .await
            .map_err(FetchError::Cdp)?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    ///
    /// # 参数
    /// - `js_code`: 要执行的 JavaScript 代码
    ///
    /// # 返回
    /// 返回反序列化后的类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> Result<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 关闭浏览器（每次运行只调用一次，清理失败只记日志）
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("⚠️ 关闭浏览器失败: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("⚠️ 等待浏览器进程退出失败: {}", e);
        }
        info!("✅ 浏览器已关闭");
    }
}
