//! 链接处理上下文
//!
//! 封装"我正在处理第几条链接"这一信息

use std::fmt::Display;

/// 链接处理上下文
///
/// 包含处理单条链接所需的上下文信息
#[derive(Debug, Clone)]
pub struct CardCtx {
    /// 处理序号（从 1 开始，按处理顺序递增）
    pub step: usize,

    /// 链接总数
    pub total: usize,

    /// 考试显示名称（用于日志与文件命名）
    pub exam_title: String,
}

impl CardCtx {
    /// 创建新的链接上下文
    pub fn new(step: usize, total: usize, exam_title: String) -> Self {
        Self {
            step,
            total,
            exam_title,
        }
    }
}

impl Display for CardCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[链接 {}/{}]", self.step, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_step_over_total() {
        let ctx = CardCtx::new(2, 14, "B.Tech S8 Examination".to_string());
        assert_eq!(format!("{}", ctx), "[链接 2/14]");
    }

    #[test]
    fn ctx_carries_exam_title_for_naming() {
        // 流程层从上下文取考试名称做日志与 slug，标题必须原样保留
        let ctx = CardCtx::new(1, 3, "B.Tech S8 Examination, April 2023".to_string());
        assert_eq!(ctx.exam_title, "B.Tech S8 Examination, April 2023");
    }
}
