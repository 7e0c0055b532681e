use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::info;

/// 可选配置文件，放在工作目录下即可生效
const PORTAL_TOML: &str = "portal.toml";

/// 程序配置文件
///
/// 门户地址与选择器都是对上游网站结构的假设，集中在这里，
/// 网站改版时只需改配置而不用改代码。
#[derive(Clone, Debug)]
pub struct Config {
    /// 结果门户地址
    pub portal_url: String,
    /// 主内容容器选择器（页面主体加载完成的标志）
    pub main_selector: String,
    /// 学号筛选输入框选择器
    pub filter_input_selector: String,
    /// 等待弹窗出现的超时（毫秒）
    pub popup_wait_timeout_ms: u64,
    /// 等待选择器出现的超时（毫秒）
    pub selector_wait_timeout_ms: u64,
    /// 选择器/弹窗轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 浏览器可执行文件路径（缺省时自动探测）
    pub chrome_executable: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            portal_url: "http://exam.cusat.ac.in/erp5/cusat/Cusat-Home/home_oldresults#"
                .to_string(),
            main_selector: "#maincol".to_string(),
            filter_input_selector: "#txtboxToFilter".to_string(),
            popup_wait_timeout_ms: 30_000,
            selector_wait_timeout_ms: 30_000,
            poll_interval_ms: 100,
            chrome_executable: None,
            verbose_logging: false,
        }
    }
}

/// portal.toml 中允许出现的覆盖项，全部可选
#[derive(Debug, Default, Deserialize)]
pub struct ConfigOverlay {
    portal_url: Option<String>,
    main_selector: Option<String>,
    filter_input_selector: Option<String>,
    popup_wait_timeout_ms: Option<u64>,
    selector_wait_timeout_ms: Option<u64>,
    poll_interval_ms: Option<u64>,
    chrome_executable: Option<String>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 加载完整配置
    ///
    /// 覆盖顺序：内置默认值 ← portal.toml（如存在）← 环境变量
    pub async fn load() -> Result<Self> {
        let config = Self::load_from(Path::new(PORTAL_TOML)).await?;
        Ok(config.with_env_overrides())
    }

    /// 从指定配置文件加载（文件不存在时直接使用默认值）
    pub async fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::default();

        if path.exists() {
            let overlay = read_overlay(path).await?;
            config.apply_overlay(overlay);
            info!("已加载配置文件: {}", path.display());
        }

        Ok(config)
    }

    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        if let Some(v) = overlay.portal_url {
            self.portal_url = v;
        }
        if let Some(v) = overlay.main_selector {
            self.main_selector = v;
        }
        if let Some(v) = overlay.filter_input_selector {
            self.filter_input_selector = v;
        }
        if let Some(v) = overlay.popup_wait_timeout_ms {
            self.popup_wait_timeout_ms = v;
        }
        if let Some(v) = overlay.selector_wait_timeout_ms {
            self.selector_wait_timeout_ms = v;
        }
        if let Some(v) = overlay.poll_interval_ms {
            self.poll_interval_ms = v;
        }
        if overlay.chrome_executable.is_some() {
            self.chrome_executable = overlay.chrome_executable;
        }
        if let Some(v) = overlay.verbose_logging {
            self.verbose_logging = v;
        }
    }

    fn with_env_overrides(self) -> Self {
        Self {
            portal_url: std::env::var("PORTAL_URL").unwrap_or(self.portal_url),
            main_selector: std::env::var("MAIN_SELECTOR").unwrap_or(self.main_selector),
            filter_input_selector: std::env::var("FILTER_INPUT_SELECTOR").unwrap_or(self.filter_input_selector),
            popup_wait_timeout_ms: std::env::var("POPUP_WAIT_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.popup_wait_timeout_ms),
            selector_wait_timeout_ms: std::env::var("SELECTOR_WAIT_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.selector_wait_timeout_ms),
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.poll_interval_ms),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok().or(self.chrome_executable),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }
}

async fn read_overlay(path: &Path) -> Result<ConfigOverlay> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取配置文件: {}", path.display()))?;

    let overlay: ConfigOverlay = toml::from_str(&content)
        .with_context(|| format!("无法解析配置文件: {}", path.display()))?;

    Ok(overlay)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_cusat_portal() {
        let config = Config::default();
        assert!(config.portal_url.contains("exam.cusat.ac.in"));
        assert_eq!(config.main_selector, "#maincol");
        assert_eq!(config.filter_input_selector, "#txtboxToFilter");
    }

    #[test]
    fn overlay_overrides_only_present_fields() {
        let overlay: ConfigOverlay = toml::from_str(
            r##"
            main_selector = "#content"
            popup_wait_timeout_ms = 5000
            "##,
        )
        .expect("overlay 应能解析");

        let mut config = Config::default();
        config.apply_overlay(overlay);

        assert_eq!(config.main_selector, "#content");
        assert_eq!(config.popup_wait_timeout_ms, 5000);
        // 未覆盖的字段保持默认
        assert_eq!(config.filter_input_selector, "#txtboxToFilter");
    }

    #[test]
    fn unknown_overlay_file_falls_back_to_defaults() {
        let config = tokio_test::block_on(Config::load_from(Path::new("no_such_portal.toml")))
            .expect("缺少配置文件不应报错");

        assert_eq!(config.portal_url, Config::default().portal_url);
    }

    #[test]
    fn malformed_overlay_is_an_error() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let path = dir.path().join("portal.toml");
        std::fs::write(&path, "popup_wait_timeout_ms = \"not a number\"").expect("写入失败");

        let result = tokio_test::block_on(Config::load_from(&path));
        assert!(result.is_err());
    }
}
