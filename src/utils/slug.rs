//! 考试标题转文件名 slug

use regex::Regex;

/// 把考试标题转成文件名安全的 slug
///
/// 小写化后，把所有非字母数字的连续片段折叠成单个连字符，
/// 再去掉首尾连字符。全符号标题回退为 "gradecard"，避免生成空文件名。
///
/// # 示例
/// "B.Tech S8 Examination, April 2023" → "b-tech-s8-examination-april-2023"
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();

    let separators = Regex::new(r"[^a-z0-9]+").unwrap();
    let slug = separators.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        "gradecard".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exam_title_becomes_hyphenated_lowercase() {
        assert_eq!(
            slugify("B.Tech S8 Examination, April 2023"),
            "b-tech-s8-examination-april-2023"
        );
    }

    #[test]
    fn separator_runs_collapse_to_one_hyphen() {
        assert_eq!(slugify("M.Tech   (Part Time) -- Result"), "m-tech-part-time-result");
    }

    #[test]
    fn edge_separators_are_trimmed() {
        assert_eq!(slugify("(Revised) B.Sc Result!"), "revised-b-sc-result");
    }

    #[test]
    fn digits_survive() {
        assert_eq!(slugify("Semester 8 2023"), "semester-8-2023");
    }

    #[test]
    fn symbol_only_title_falls_back() {
        assert_eq!(slugify("###"), "gradecard");
        assert_eq!(slugify(""), "gradecard");
    }

    #[test]
    fn slug_is_deterministic() {
        let title = "B.Tech S8 Examination, April 2023";
        assert_eq!(slugify(title), slugify(title));
    }
}
