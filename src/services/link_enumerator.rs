//! 结果链接枚举 - 业务能力层
//!
//! 只负责"列出当前页面上的结果链接"能力，不点击、不导航

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::Config;
use crate::error::FetchError;
use crate::infrastructure::SessionDriver;
use crate::models::{AnchorInfo, ResultLink};

/// 结果链接枚举器
///
/// 职责：
/// - 按文档顺序展平主容器内所有表格中的锚点
/// - 同步提取每条链接的显示文本（优先 `<strong>` 子元素）
/// - 每次调用反映当前 DOM，枚举到空列表是合法结果
pub struct LinkEnumerator {
    anchor_selector: String,
}

impl LinkEnumerator {
    pub fn new(config: &Config) -> Self {
        Self {
            anchor_selector: format!("{} table a", config.main_selector),
        }
    }

    /// 枚举当前 DOM 下的全部结果链接
    ///
    /// 句柄与标题用同一选择器分两次采集，数量对不上说明采集间隙
    /// 页面发生了变化，按链接漂移处理。
    pub async fn enumerate(&self, driver: &SessionDriver) -> Result<Vec<ResultLink>> {
        let elements = driver
            .page()
            .find_elements(self.anchor_selector.as_str())
            .await
            .with_context(|| format!("查询结果链接失败: {}", self.anchor_selector))?;

        let infos: Vec<AnchorInfo> = driver
            .eval_as(self.collect_anchor_info_js()?)
            .await
            .context("提取结果链接文本失败")?;

        if elements.len() != infos.len() {
            return Err(FetchError::LinkDrift {
                expected: elements.len(),
                actual: infos.len(),
            }
            .into());
        }

        let links: Vec<ResultLink> = elements
            .into_iter()
            .zip(infos)
            .map(|(element, info)| ResultLink::new(element, info))
            .collect();

        debug!("🔍 枚举到 {} 个结果链接", links.len());
        Ok(links)
    }

    fn collect_anchor_info_js(&self) -> Result<String> {
        Ok(format!(
            r#"
            Array.from(document.querySelectorAll({selector})).map((el) => {{
                const strong = el.querySelector('strong');
                const title = (strong ? strong.innerText : el.innerText).trim();
                return {{ title: title, href: el.getAttribute('href') }};
            }})
            "#,
            selector = serde_json::to_string(&self.anchor_selector)?
        ))
    }
}
