// 待办输入窗口的 Tauri 命令

use crate::setup::tray::rebuild_tray;
use std::sync::Arc;
use std::time::Duration;
use tauri::{AppHandle, Emitter, Runtime, State};
use todo_tray::services::status::reset_after;
use todo_tray::{AppContext, Applied, InputState, Mutation, SubmitResult};

/// 提示恢复事件，前端收到后把右下角状态改回"按回车提交"
pub const STATUS_RESET_EVENT: &str = "todo://status-reset";

/// 获取输入限制
#[tauri::command]
pub fn get_input_limits(context: State<'_, Arc<AppContext>>) -> InputState {
    context.clamp_input("")
}

/// 输入框内容变化时实时截断
#[tauri::command]
pub fn clamp_input(text: String, context: State<'_, Arc<AppContext>>) -> InputState {
    context.clamp_input(&text)
}

/// 提交新待办
#[tauri::command]
pub async fn submit_todo(
    app: AppHandle,
    text: String,
    context: State<'_, Arc<AppContext>>,
) -> Result<SubmitResult, String> {
    let applied = context.apply(Mutation::Add(text));
    let added = matches!(applied, Applied::Added(_));
    if added {
        rebuild_tray(&app);
        schedule_status_reset(&app, context.config().status_reset_delay());
    }
    Ok(SubmitResult {
        added,
        total: context.len(),
    })
}

/// 延迟后通知前端恢复提示文字
fn schedule_status_reset<R: Runtime>(app: &AppHandle<R>, delay: Duration) {
    let app = app.clone();
    tauri::async_runtime::spawn(reset_after(delay, move || {
        if let Err(e) = app.emit_to("main", STATUS_RESET_EVENT, ()) {
            tracing::error!(error = ?e, "发送提示恢复事件失败");
        }
    }));
}
