// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod commands;
mod setup;

use anyhow::Context;
use commands::*;
use setup::initialization::InitializationContext;
use std::sync::Arc;
use todo_tray::{ensure_icon, AppContext, AppError, TodoStore};

fn main() {
    let init = setup::initialize_app();
    if let Err(e) = run(init) {
        tracing::error!(error = ?e, "应用启动失败");
        std::process::exit(1);
    }
}

fn run(init: InitializationContext) -> anyhow::Result<()> {
    let InitializationContext { paths, config } = init;

    // 单实例检查：副实例通知主实例后直接退出，不触碰数据文件
    #[cfg(unix)]
    let (listener, mut socket_guard) = {
        use todo_tray::services::single_instance::{detect_role, Role, SocketGuard};

        match detect_role(&paths.socket_path).context("单实例检查失败")? {
            Role::Secondary => return Ok(()),
            Role::Primary(listener) => (listener, SocketGuard::new(&paths.socket_path)),
        }
    };

    let context = Arc::new(AppContext::new(config, TodoStore::new(&paths.data_file)));
    let icon_path = ensure_icon(&paths.icon_file);

    let builder = tauri::Builder::default();

    #[cfg(not(unix))]
    let builder = builder.plugin(tauri_plugin_single_instance::init(|app, argv, cwd| {
        tracing::info!(?argv, %cwd, "检测到新实例启动");
        setup::window::show_entry_window(app);
    }));

    let app = builder
        .manage(context)
        .setup(move |app| {
            #[cfg(unix)]
            {
                use todo_tray::services::single_instance::serve;

                let (signal_tx, signal_rx) = tokio::sync::mpsc::unbounded_channel();
                tauri::async_runtime::spawn(async move {
                    if let Err(e) = serve(listener, signal_tx).await {
                        tracing::error!(error = %e, "单实例监听异常退出");
                    }
                });
                setup::initialization::spawn_activation_relay(app.handle().clone(), signal_rx);
            }

            setup::tray::setup_system_tray(app, icon_path.as_deref())
                .map_err(|e| AppError::Tray(e.to_string()))?;
            setup::window::setup_window_close_handler(app);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            get_input_limits,
            clamp_input,
            submit_todo,
        ])
        .build(tauri::generate_context!())
        .context("创建应用失败")?;

    app.run(move |_app_handle, event| {
        if let tauri::RunEvent::Exit = event {
            tracing::info!("应用退出");
            #[cfg(unix)]
            socket_guard.cleanup();
        }
    });

    Ok(())
}
