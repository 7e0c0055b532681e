//! 命令行参数

use std::path::PathBuf;

use clap::Parser;

/// 命令行参数
///
/// 仅两个选项：学号为必填（也可通过 ROLL_NUMBER 环境变量提供），
/// 输出目录默认为当前目录。
#[derive(Parser, Debug)]
#[command(author, version, about = "CUSAT 成绩单抓取工具：按学号批量下载历次考试的成绩单 PDF")]
pub struct Cli {
    /// 学生学号（Roll Number），用于筛选结果并核验成绩单归属
    #[arg(long, env = "ROLL_NUMBER")]
    pub roll_number: String,

    /// PDF 输出目录
    #[arg(long, default_value = ".")]
    pub path: PathBuf,
}
