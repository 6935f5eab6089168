//! 托盘图标生成
//!
//! 首次运行时生成 32×32 透明底、三道黑色横线的 PNG；已存在的文件原样使用。

use crate::core::{AppError, AppResult};
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

const ICON_SIZE: u32 = 32;
const BAR_ROWS: [u32; 3] = [8, 15, 22];
const BAR_START: u32 = 8;
const BAR_END: u32 = 22;

/// 确保图标文件存在并返回绝对路径
///
/// 生成失败时返回 `None`，调用方使用默认窗口图标。
pub fn ensure_icon(path: &Path) -> Option<PathBuf> {
    if path.exists() {
        return Some(absolute(path));
    }
    match write_icon(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "已生成托盘图标");
            Some(absolute(path))
        }
        Err(e) => {
            tracing::error!(error = %e, "生成托盘图标失败");
            None
        }
    }
}

/// 绘制图标
pub fn render_icon() -> RgbaImage {
    let mut img = RgbaImage::new(ICON_SIZE, ICON_SIZE);
    let black = Rgba([0, 0, 0, 255]);
    for y in BAR_ROWS {
        for x in BAR_START..=BAR_END {
            img.put_pixel(x, y, black);
        }
    }
    img
}

fn write_icon(path: &Path) -> AppResult<()> {
    render_icon().save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path)
        .map_err(|e| AppError::io(path, e))
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "无法解析图标绝对路径");
            path.to_path_buf()
        })
}
