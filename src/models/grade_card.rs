//! 成绩单模型

use std::path::PathBuf;

/// 一份已核验归属的成绩单文档
#[derive(Debug, Clone)]
pub struct GradeCard {
    /// 考试显示名称
    pub exam_title: String,
    /// 文件名（slug + .pdf）
    pub file_name: String,
    /// 完整目标路径
    pub pdf_path: PathBuf,
    /// 运行前文件是否已存在（true 表示本轮没有写盘）
    pub already_existed: bool,
}

impl GradeCard {
    /// 生成这份成绩单的结果消息
    ///
    /// 新保存与已存在使用不同措辞；消息由编排层收集，处理结束后统一输出
    pub fn outcome_message(&self, roll_number: &str) -> String {
        if self.already_existed {
            format!(
                "考试「{}」: 学号 {} 的成绩单 PDF 已存在: {}",
                self.exam_title,
                roll_number,
                self.pdf_path.display()
            )
        } else {
            format!(
                "考试「{}」: 学号 {} 的成绩单已保存为 PDF: {}",
                self.exam_title,
                roll_number,
                self.pdf_path.display()
            )
        }
    }
}

/// 单条结果链接的处理结果
///
/// 弹窗内容不含学号时视为该场考试没有这名学生的记录，
/// 不产生任何文件，也不产生结果消息。
#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    /// 弹窗内容含学号，成绩单已核验
    Captured(GradeCard),
    /// 弹窗内容不含学号
    Rejected { exam_title: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(already_existed: bool) -> GradeCard {
        GradeCard {
            exam_title: "B.Tech S8 Examination, April 2023".to_string(),
            file_name: "b-tech-s8-examination-april-2023.pdf".to_string(),
            pdf_path: PathBuf::from("./results/b-tech-s8-examination-april-2023.pdf"),
            already_existed,
        }
    }

    #[test]
    fn saved_and_existing_messages_differ() {
        let saved = card(false).outcome_message("12345");
        let existing = card(true).outcome_message("12345");

        assert_ne!(saved, existing);
        assert!(saved.contains("已保存"));
        assert!(existing.contains("已存在"));
    }

    #[test]
    fn message_carries_title_roll_and_path() {
        let msg = card(false).outcome_message("12345");

        assert!(msg.contains("B.Tech S8 Examination, April 2023"));
        assert!(msg.contains("12345"));
        assert!(msg.contains("b-tech-s8-examination-april-2023.pdf"));
    }
}
