use todo_tray::core::init_logger;
use todo_tray::{AppConfig, AppPaths};

/// 启动初始化上下文
pub struct InitializationContext {
    pub paths: AppPaths,
    pub config: AppConfig,
}

/// 读取配置并初始化日志系统
///
/// 配置文件缺失或格式错误时使用默认配置，日志初始化失败时继续运行。
pub fn initialize_app() -> InitializationContext {
    let paths = AppPaths::resolve();
    let (config, config_error) = match AppConfig::load(&paths.config_file) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if let Err(e) = init_logger(&config.log) {
        // tracing 还不可用，只能写 stderr
        eprintln!("WARNING: Failed to initialize logging system: {e}");
    }

    tracing::info!(base_dir = %paths.base_dir.display(), "Todo 托盘启动");
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "读取配置失败，使用默认配置");
    }

    InitializationContext { paths, config }
}

/// 把 socket 收到的激活请求转交给 UI 线程
#[cfg(unix)]
pub fn spawn_activation_relay<R: tauri::Runtime>(
    app: tauri::AppHandle<R>,
    mut signals: tokio::sync::mpsc::UnboundedReceiver<
        todo_tray::services::single_instance::InstanceSignal,
    >,
) {
    use todo_tray::services::single_instance::InstanceSignal;

    tauri::async_runtime::spawn(async move {
        while let Some(signal) = signals.recv().await {
            match signal {
                InstanceSignal::Activate => {
                    let handle = app.clone();
                    if let Err(e) = app.run_on_main_thread(move || {
                        super::window::show_entry_window(&handle);
                    }) {
                        tracing::error!(error = ?e, "调度显示窗口失败");
                    }
                }
            }
        }
    });
}
