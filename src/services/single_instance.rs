//! 单实例协调
//!
//! 启动时先尝试连接约定路径上的本地 socket：
//! - 连接成功：已有主实例在运行，写入 `show\n` 后当前进程退出（副实例）。
//! - 连接失败：当前进程成为主实例，清理残留 socket 文件并重新监听。
//!
//! 主实例的 accept 循环运行在异步运行时上，每个连接单独一个任务处理。
//! 收到 `show` 后通过 channel 把激活请求交给 UI 线程的消费者，
//! accept 任务本身从不直接操作窗口。

use crate::core::{AppError, AppResult};
use std::io::Write;
use std::os::unix::net::{UnixListener as StdUnixListener, UnixStream as StdUnixStream};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc::UnboundedSender;

/// 激活窗口的消息
pub const SHOW_MESSAGE: &str = "show";

/// 单个连接最多读取的字节数
const MAX_MESSAGE_LEN: u64 = 64;

/// 从 socket 转发给 UI 线程的信号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceSignal {
    Activate,
}

/// 探测结果
#[derive(Debug)]
pub enum Role {
    /// 当前进程负责监听
    Primary(StdUnixListener),
    /// 已通知主实例，当前进程应直接退出
    Secondary,
}

/// 探测已运行实例并确定当前进程角色
///
/// 副实例写入失败、主实例监听失败都是致命错误。
pub fn detect_role(socket_path: &Path) -> AppResult<Role> {
    match StdUnixStream::connect(socket_path) {
        Ok(mut stream) => {
            stream
                .write_all(format!("{SHOW_MESSAGE}\n").as_bytes())
                .map_err(|e| AppError::Signal(e.to_string()))?;
            tracing::info!("已有实例在运行，已通知其显示窗口");
            Ok(Role::Secondary)
        }
        Err(e) => {
            tracing::debug!(error = %e, path = %socket_path.display(), "未发现运行中的实例");
            bind(socket_path).map(Role::Primary)
        }
    }
}

fn bind(socket_path: &Path) -> AppResult<StdUnixListener> {
    // 上次异常退出可能留下 socket 文件
    let _ = std::fs::remove_file(socket_path);
    let listener = StdUnixListener::bind(socket_path).map_err(|source| AppError::Bind {
        path: socket_path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %socket_path.display(), "单实例 socket 已监听");
    Ok(listener)
}

/// 解析一行消息
pub fn parse_message(line: &str) -> Option<InstanceSignal> {
    match line.trim() {
        SHOW_MESSAGE => Some(InstanceSignal::Activate),
        _ => None,
    }
}

/// 主实例 accept 循环
///
/// 必须在 tokio 运行时内调用。channel 的接收端关闭后退出。
pub async fn serve(
    listener: StdUnixListener,
    signals: UnboundedSender<InstanceSignal>,
) -> AppResult<()> {
    let local_addr = listener.local_addr().ok();
    let listener = listener
        .set_nonblocking(true)
        .and_then(|_| UnixListener::from_std(listener))
        .map_err(|e| AppError::io(socket_display_path(local_addr.as_ref()), e))?;

    loop {
        tokio::select! {
            _ = signals.closed() => {
                tracing::debug!("激活请求接收端已关闭，停止监听");
                return Ok(());
            }
            accepted = listener.accept() => match accepted {
                Ok((stream, _addr)) => {
                    let signals = signals.clone();
                    tokio::spawn(async move {
                        handle_connection(stream, signals).await;
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "socket accept 失败");
                }
            },
        }
    }
}

async fn handle_connection(stream: UnixStream, signals: UnboundedSender<InstanceSignal>) {
    let mut reader = BufReader::new(stream.take(MAX_MESSAGE_LEN));
    let mut line = String::new();
    match reader.read_line(&mut line).await {
        Ok(0) => {
            tracing::debug!("连接在发送消息前关闭");
        }
        Ok(_) => {
            tracing::info!(message = line.trim(), "收到新实例的信号");
            match parse_message(&line) {
                Some(signal) => {
                    if signals.send(signal).is_err() {
                        tracing::warn!("激活请求接收端已关闭");
                    }
                }
                None => tracing::warn!(message = line.trim(), "忽略未知消息"),
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "读取 socket 消息失败");
        }
    }
}

fn socket_display_path(addr: Option<&std::os::unix::net::SocketAddr>) -> PathBuf {
    addr.and_then(|a| a.as_pathname())
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// 主实例退出时删除 socket 文件
#[derive(Debug)]
pub struct SocketGuard {
    path: Option<PathBuf>,
}

impl SocketGuard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn cleanup(&mut self) {
        if let Some(path) = self.path.take() {
            match std::fs::remove_file(&path) {
                Ok(()) => tracing::debug!(path = %path.display(), "已清理 socket 文件"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!(error = %e, "清理 socket 文件失败"),
            }
        }
    }
}

impl Drop for SocketGuard {
    fn drop(&mut self) {
        self.cleanup();
    }
}
