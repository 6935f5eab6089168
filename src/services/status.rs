//! 提交成功提示的延迟恢复

use std::time::Duration;

/// 等待 `delay` 后执行一次 `reset`
pub async fn reset_after<F>(delay: Duration, reset: F)
where
    F: FnOnce(),
{
    tokio::time::sleep(delay).await;
    reset();
}
