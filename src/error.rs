use thiserror::Error;

/// 应用程序错误类型
///
/// 按失败发生的环节分类：目录准备、页面导航、页面结构约定、
/// 弹窗捕获、链接列表漂移、PDF 落盘、底层 CDP 协议。
#[derive(Debug, Error)]
pub enum FetchError {
    /// 输出目录创建失败（发生在任何浏览器操作之前）
    #[error("无法创建输出目录 ({path}): {source}")]
    DirectoryCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 导航失败：页面加载后主内容容器迟迟未出现
    #[error("导航到 {url} 失败: {reason}")]
    Navigation { url: String, reason: String },

    /// 页面结构不再满足约定（等待选择器超时）
    #[error("页面结构不符合预期: 等待选择器 {selector} 超时 ({waited_ms}ms)")]
    UiContract { selector: String, waited_ms: u64 },

    /// 提交筛选后弹窗在限定时间内未出现
    #[error("弹窗在 {timeout_ms}ms 内未出现")]
    PopupCapture { timeout_ms: u64 },

    /// 重新枚举后链接数量与首次枚举不一致
    #[error("结果链接数量发生漂移: 期望 {expected} 个, 实际 {actual} 个")]
    LinkDrift { expected: usize, actual: usize },

    /// 成绩单写入失败
    #[error("写入成绩单失败 ({path}): {source}")]
    Persistence {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 浏览器协议层错误
    #[error("浏览器协议错误: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromiumoxide::error::CdpError;

    #[test]
    fn wraps_cdp_protocol_errors() {
        // 会话驱动的 evaluate 失败经由这条转换成为统一的协议层错误
        let err = FetchError::from(CdpError::NotFound);
        assert!(matches!(err, FetchError::Cdp(_)));
        assert!(err.to_string().starts_with("浏览器协议错误"));
    }
}
