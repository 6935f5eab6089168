use tauri::{AppHandle, Manager, Runtime, WebviewWindow};

/// 输入窗口的 label，与 tauri.conf.json 保持一致
pub const MAIN_WINDOW: &str = "main";

/// 显示并聚焦输入窗口
pub fn show_entry_window<R: Runtime>(app: &AppHandle<R>) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW) else {
        tracing::warn!("尝试显示时未找到输入窗口");
        return;
    };

    tracing::debug!(
        is_visible = ?window.is_visible(),
        is_minimized = ?window.is_minimized(),
        "显示输入窗口"
    );

    set_dock_visible(true);

    if let Err(e) = window.show() {
        tracing::error!(error = ?e, "显示窗口失败");
    }
    if let Err(e) = window.unminimize() {
        tracing::error!(error = ?e, "取消最小化窗口失败");
    }
    if let Err(e) = window.set_focus() {
        tracing::error!(error = ?e, "设置窗口焦点失败");
    }
}

/// 隐藏输入窗口（不销毁，底部提示等状态在下次打开时保留）
pub fn hide_entry_window<R: Runtime>(window: &WebviewWindow<R>) {
    tracing::debug!("隐藏输入窗口");
    if let Err(e) = window.hide() {
        tracing::error!(error = ?e, "隐藏窗口失败");
    }
    set_dock_visible(false);
}

/// 关闭按钮只隐藏窗口
pub fn setup_window_close_handler<R: Runtime>(app: &tauri::App<R>) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW) else {
        tracing::warn!("未找到输入窗口，跳过关闭拦截");
        return;
    };
    let window_clone = window.clone();
    window.on_window_event(move |event| {
        if let tauri::WindowEvent::CloseRequested { api, .. } = event {
            api.prevent_close();
            hide_entry_window(&window_clone);
        }
    });
}

/// macOS 上窗口可见时显示 Dock 图标，隐藏时只保留菜单栏图标
#[cfg(target_os = "macos")]
#[allow(deprecated)]
fn set_dock_visible(visible: bool) {
    use cocoa::appkit::{NSApplication, NSApplicationActivationPolicy};
    use cocoa::base::nil;
    use cocoa::foundation::NSAutoreleasePool;
    use objc::runtime::YES;

    let policy = if visible {
        NSApplicationActivationPolicy::NSApplicationActivationPolicyRegular
    } else {
        NSApplicationActivationPolicy::NSApplicationActivationPolicyAccessory
    };

    unsafe {
        let _pool = NSAutoreleasePool::new(nil);
        let ns_app = NSApplication::sharedApplication(nil);
        ns_app.setActivationPolicy_(policy);
        if visible {
            ns_app.activateIgnoringOtherApps_(YES);
        }
    }
}

#[cfg(not(target_os = "macos"))]
fn set_dock_visible(_visible: bool) {}
