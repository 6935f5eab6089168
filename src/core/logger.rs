use crate::models::config::{LogConfig, LogFormat, LogLevel, LogOutput};
use std::sync::OnceLock;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// 初始化日志系统
///
/// 支持基于配置的日志输出：
/// - 日志级别（trace/debug/info/warn/error），`RUST_LOG` 优先
/// - 输出格式（JSON/纯文本）
/// - 输出目标（控制台/文件/both），文件按天滚动
///
/// 重复初始化返回错误。
pub fn init_logger(config: &LogConfig) -> anyhow::Result<()> {
    if INITIALIZED.set(()).is_err() {
        anyhow::bail!("日志系统已初始化，不能重复初始化");
    }

    let filter = create_env_filter(&config.level);
    let console = matches!(config.output, LogOutput::Console | LogOutput::Both)
        .then(|| create_console_layer(config.format));
    let file = match config.output {
        LogOutput::File | LogOutput::Both => {
            Some(create_file_layer(config.format, config.file_path.as_deref())?)
        }
        LogOutput::Console => None,
    };

    Registry::default()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()?;

    tracing::info!(
        level = config.level.as_str(),
        format = ?config.format,
        output = ?config.output,
        file_path = ?config.file_path,
        "日志系统初始化完成"
    );

    Ok(())
}

/// 创建环境过滤器
fn create_env_filter(level: &LogLevel) -> EnvFilter {
    // 格式：RUST_LOG=debug 或 RUST_LOG=todo_tray=trace,tao=warn
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // 应用代码使用指定级别，GUI 运行时使用 WARN
        EnvFilter::new(format!(
            "todo_tray={},tao=warn,wry=warn,tauri=warn",
            level.as_str()
        ))
    })
}

fn create_console_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(cfg!(debug_assertions))
        .with_thread_ids(false);
    match format {
        LogFormat::Text => layer.with_ansi(true).boxed(),
        LogFormat::Json => layer.json().with_ansi(false).boxed(),
    }
}

fn create_file_layer<S>(
    format: LogFormat,
    file_path: Option<&str>,
) -> anyhow::Result<Box<dyn Layer<S> + Send + Sync + 'static>>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let log_dir = get_log_dir(file_path)?;
    let file_appender = rolling::daily(log_dir, "todo-tray");
    let (writer, guard) = non_blocking(file_appender);

    // guard 与进程同寿命，否则缓冲日志会在 drop 时丢失
    Box::leak(Box::new(guard));

    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_ansi(false);
    Ok(match format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().with_thread_ids(true).boxed(),
    })
}

/// 获取日志目录
fn get_log_dir(file_path: Option<&str>) -> anyhow::Result<std::path::PathBuf> {
    let dir = match file_path {
        Some(path) => std::path::PathBuf::from(path),
        None => dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("无法获取用户数据目录"))?
            .join("todo-tray")
            .join("logs"),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_get_log_dir_creates_custom_dir() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested").join("logs");
        let resolved = get_log_dir(Some(target.to_str().unwrap())).unwrap();
        assert_eq!(resolved, target);
        assert!(target.is_dir());
    }

    #[test]
    #[serial]
    fn test_init_logger_only_once() {
        let config = LogConfig::default();
        assert!(init_logger(&config).is_ok());
        let err = init_logger(&config).unwrap_err();
        assert!(err.to_string().contains("重复初始化"));
    }
}
