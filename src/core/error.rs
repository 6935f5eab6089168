//! 统一错误类型定义
//!
//! 使用 `thiserror` 定义应用内的错误类型；启动流程在 `main.rs` 中通过 `anyhow` 汇总。

use std::path::PathBuf;
use thiserror::Error;

/// 应用统一错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 文件 I/O 错误
    #[error("文件 I/O 错误: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON 序列化/反序列化错误
    #[error("JSON 序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 图标编码错误
    #[error("图标编码错误: {0}")]
    Image(#[from] image::ImageError),

    /// 向已运行实例发送信号失败
    #[error("通知已运行实例失败: {0}")]
    Signal(String),

    /// 单实例 socket 监听失败
    #[error("单实例 socket 监听失败: {path}: {source}")]
    Bind {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 托盘不可用
    #[error("不支持托盘: {0}")]
    Tray(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl AppError {
    /// 从 `std::io::Error` 和路径创建 I/O 错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_construction() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AppError::io("/path/to/todo.json", io_err);
        assert!(err.to_string().contains("/path/to/todo.json"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("[{").unwrap_err();
        let err: AppError = json_err.into();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[test]
    fn test_anyhow_conversion() {
        let err = AppError::Signal("broken pipe".to_string());
        let anyhow_err: anyhow::Error = err.into();
        assert!(anyhow_err.to_string().contains("broken pipe"));
    }
}
