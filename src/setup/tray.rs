use crate::setup::window::show_entry_window;
use std::path::Path;
use std::sync::Arc;
use tauri::{
    image::Image,
    menu::{Menu, MenuItem, PredefinedMenuItem},
    tray::TrayIconBuilder,
    AppHandle, Manager, Runtime,
};
use todo_tray::models::menu::MENU_ID_PLACEHOLDER;
use todo_tray::{AppContext, Mutation, TrayAction, TrayEntry};

pub const TRAY_ID: &str = "todo-tray";

/// 根据菜单模型构建托盘菜单
pub fn create_tray_menu<R: Runtime>(
    app: &AppHandle<R>,
    entries: &[TrayEntry],
) -> tauri::Result<Menu<R>> {
    let menu = Menu::new(app)?;
    for entry in entries {
        match entry {
            TrayEntry::Action { id, label } | TrayEntry::Todo { id, label } => {
                menu.append(&MenuItem::with_id(
                    app,
                    id.as_str(),
                    label,
                    true,
                    None::<&str>,
                )?)?;
            }
            TrayEntry::Placeholder { label } => {
                menu.append(&MenuItem::with_id(
                    app,
                    MENU_ID_PLACEHOLDER,
                    label,
                    false,
                    None::<&str>,
                )?)?;
            }
            TrayEntry::Separator => {
                menu.append(&PredefinedMenuItem::separator(app)?)?;
            }
        }
    }
    Ok(menu)
}

/// 在 UI 线程上整体重建托盘菜单
pub fn rebuild_tray<R: Runtime>(app: &AppHandle<R>) {
    let handle = app.clone();
    let result = app.run_on_main_thread(move || {
        let entries = handle.state::<Arc<AppContext>>().menu_entries();
        let menu = match create_tray_menu(&handle, &entries) {
            Ok(menu) => menu,
            Err(e) => {
                tracing::error!(error = ?e, "构建托盘菜单失败");
                return;
            }
        };
        match handle.tray_by_id(TRAY_ID) {
            Some(tray) => {
                if let Err(e) = tray.set_menu(Some(menu)) {
                    tracing::error!(error = ?e, "更新托盘菜单失败");
                }
            }
            None => tracing::warn!("未找到托盘图标"),
        }
    });
    if let Err(e) = result {
        tracing::error!(error = ?e, "调度托盘菜单重建失败");
    }
}

/// 托盘菜单点击处理
fn handle_menu_event<R: Runtime>(app: &AppHandle<R>, id: &str) {
    tracing::debug!(event_id = id, "托盘菜单事件");
    match TrayAction::parse(id) {
        Some(TrayAction::ShowWindow) => show_entry_window(app),
        Some(TrayAction::Delete { generation, index }) => {
            let applied = app
                .state::<Arc<AppContext>>()
                .apply(Mutation::Delete { generation, index });
            if applied.changed() {
                rebuild_tray(app);
            }
        }
        Some(TrayAction::Quit) => {
            tracing::info!("从托盘退出应用");
            app.exit(0);
        }
        None => {}
    }
}

fn load_tray_icon<R: Runtime>(
    app: &tauri::App<R>,
    icon_path: Option<&Path>,
) -> Option<Image<'static>> {
    if let Some(path) = icon_path {
        match Image::from_path(path) {
            Ok(icon) => return Some(icon),
            Err(e) => tracing::warn!(
                error = ?e,
                path = %path.display(),
                "加载托盘图标失败，使用默认图标"
            ),
        }
    } else {
        tracing::warn!("托盘图标不可用，使用默认图标");
    }
    app.default_window_icon().map(|icon| icon.clone().to_owned())
}

/// 设置系统托盘（包含事件处理）
pub fn setup_system_tray<R: Runtime>(
    app: &tauri::App<R>,
    icon_path: Option<&Path>,
) -> tauri::Result<()> {
    let entries = app.state::<Arc<AppContext>>().menu_entries();
    let tray_menu = create_tray_menu(app.handle(), &entries)?;

    let mut builder = TrayIconBuilder::with_id(TRAY_ID)
        .tooltip("Todo")
        .menu(&tray_menu)
        .show_menu_on_left_click(true)
        .on_menu_event(move |app, event| handle_menu_event(app, event.id.as_ref()));
    if let Some(icon) = load_tray_icon(app, icon_path) {
        builder = builder.icon(icon);
    }
    builder.build(app)?;

    tracing::info!("系统托盘已创建");
    Ok(())
}
