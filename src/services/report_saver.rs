//! 成绩单落盘 - 业务能力层
//!
//! 只负责"查重并写 PDF"能力，不关心流程

use std::path::{Path, PathBuf};

use anyhow::Result;
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::Page;
use tokio::fs;
use tracing::{debug, info};

use crate::error::FetchError;

/// PDF 文件扩展名（固定）
const PDF_EXTENSION: &str = "pdf";

/// 成绩单落盘服务
///
/// 职责：
/// - 由 slug 算出目标路径
/// - 查重：已存在的文件绝不覆盖，不读取、不修改
/// - 把弹窗渲染成 PDF 原子写入（先写 .part 再改名）
pub struct ReportSaver {
    out_dir: PathBuf,
}

impl ReportSaver {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// 确保输出目录存在（递归创建）
    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.out_dir)
            .await
            .map_err(|e| FetchError::DirectoryCreation {
                path: self.out_dir.display().to_string(),
                source: e,
            })?;

        info!("📁 输出目录已就绪: {}", self.out_dir.display());
        Ok(())
    }

    /// 由 slug 算出完整目标路径
    pub fn destination(&self, slug: &str) -> PathBuf {
        self.out_dir.join(format!("{}.{}", slug, PDF_EXTENSION))
    }

    /// 把弹窗渲染成 PDF 落盘
    ///
    /// 返回 true 表示本次写了盘；文件已存在时跳过渲染直接返回 false
    pub async fn persist(&self, dest: &Path, popup: &Page) -> Result<bool> {
        if dest.exists() {
            debug!("📄 文件已存在，跳过写盘: {}", dest.display());
            return Ok(false);
        }

        let pdf_bytes = popup.pdf(PrintToPdfParams::default()).await?;
        self.persist_bytes(dest, &pdf_bytes).await
    }

    /// 原子写入字节，已存在的目标一律不动
    ///
    /// 先写临时文件再改名，中断不会留下半份 PDF
    pub async fn persist_bytes(&self, dest: &Path, bytes: &[u8]) -> Result<bool> {
        if dest.exists() {
            return Ok(false);
        }

        let tmp = dest.with_extension("pdf.part");
        fs::write(&tmp, bytes)
            .await
            .map_err(|e| FetchError::Persistence {
                path: tmp.display().to_string(),
                source: e,
            })?;
        fs::rename(&tmp, dest)
            .await
            .map_err(|e| FetchError::Persistence {
                path: dest.display().to_string(),
                source: e,
            })?;

        debug!("💾 已写入: {} ({} 字节)", dest.display(), bytes.len());
        Ok(true)
    }
}
