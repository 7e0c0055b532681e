//! 结果链接模型

use chromiumoxide::Element;
use serde::Deserialize;

/// 枚举阶段从页面批量提取的锚点信息
///
/// 由一段 JS 在页面内一次性收集，与 `find_elements` 拿到的句柄
/// 使用同一选择器、同一文档顺序，可按下标对齐。
#[derive(Debug, Clone, Deserialize)]
pub struct AnchorInfo {
    /// 显示文本：优先 `<strong>` 子元素的文本，否则取锚点自身文本，已去首尾空白
    pub title: String,
    /// 原始 href，仅用于调试日志
    pub href: Option<String>,
}

/// 一条考试结果链接
///
/// 链接没有稳定身份，只有枚举时刻的序号位置；任何一次导航都会让
/// `element` 句柄失效，因此每处理完一条都要重新枚举。
pub struct ResultLink {
    /// 可点击的元素句柄
    pub element: Element,
    /// 考试显示名称（用于生成文件名和日志）
    pub title: String,
    /// 原始 href（调试用）
    pub href: Option<String>,
}

impl ResultLink {
    pub fn new(element: Element, info: AnchorInfo) -> Self {
        Self {
            element,
            title: info.title,
            href: info.href,
        }
    }
}
