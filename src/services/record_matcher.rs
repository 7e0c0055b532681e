//! 记录归属判定 - 业务能力层
//!
//! 判断弹窗内容是否属于目标学生，是整条流程唯一的正确性判据

/// 记录归属判定能力
///
/// 流程层只依赖这个能力，不关心具体判定规则；
/// 判定规则可替换（例如解析表格做精确比对）。
pub trait RecordMatcher: Send + Sync {
    /// 判断渲染后的页面内容中是否出现目标学生的记录
    fn matches(&self, rendered_content: &str) -> bool;
}

/// 按学号子串判定
///
/// 与门户自身的筛选行为保持一致：页面文本中出现学号原文即视为命中
pub struct RollNumberMatcher {
    roll_number: String,
}

impl RollNumberMatcher {
    pub fn new(roll_number: impl Into<String>) -> Self {
        Self {
            roll_number: roll_number.into(),
        }
    }
}

impl RecordMatcher for RollNumberMatcher {
    fn matches(&self, rendered_content: &str) -> bool {
        rendered_content.contains(&self.roll_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_with_roll_number_matches() {
        let matcher = RollNumberMatcher::new("12345");
        assert!(matcher.matches("<table><td>12345</td><td>A+</td></table>"));
    }

    #[test]
    fn content_without_roll_number_is_rejected() {
        let matcher = RollNumberMatcher::new("12345");
        assert!(!matcher.matches("<p>No records found for the given criteria.</p>"));
    }

    #[test]
    fn match_is_literal_substring() {
        // 子串语义：学号作为较长数字串的一部分出现也算命中
        let matcher = RollNumberMatcher::new("123");
        assert!(matcher.matches("roll 01234"));
    }
}
