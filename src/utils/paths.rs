//! 应用路径解析
//!
//! 数据文件、图标和配置文件与可执行文件放在同一目录；
//! 单实例 socket 放在系统临时目录，并嵌入用户名避免多用户冲突。

use std::env;
use std::path::{Path, PathBuf};

const DATA_FILE_NAME: &str = "todo.json";
const ICON_FILE_NAME: &str = "tray.png";
const CONFIG_FILE_NAME: &str = "config.json";
const SOCKET_PREFIX: &str = "todo-app";

/// 应用运行所需的全部路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub base_dir: PathBuf,
    pub data_file: PathBuf,
    pub icon_file: PathBuf,
    pub config_file: PathBuf,
    pub socket_path: PathBuf,
}

impl AppPaths {
    /// 以可执行文件所在目录为基准解析路径，失败时回退到当前目录
    pub fn resolve() -> Self {
        let base_dir = executable_dir()
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        let socket_path = env::temp_dir().join(socket_file_name(current_username().as_deref()));
        Self::new(&base_dir, socket_path)
    }

    /// 在指定目录下构建路径
    pub fn new(base_dir: &Path, socket_path: PathBuf) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            data_file: base_dir.join(DATA_FILE_NAME),
            icon_file: base_dir.join(ICON_FILE_NAME),
            config_file: base_dir.join(CONFIG_FILE_NAME),
            socket_path,
        }
    }
}

fn executable_dir() -> Option<PathBuf> {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// socket 文件名：`todo-app-<username>.sock`，用户名未知时为 `todo-app.sock`
pub fn socket_file_name(username: Option<&str>) -> String {
    match username.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("{SOCKET_PREFIX}-{name}.sock"),
        None => format!("{SOCKET_PREFIX}.sock"),
    }
}

/// 当前用户名
#[cfg(unix)]
pub fn current_username() -> Option<String> {
    passwd_username().or_else(|| env::var("USER").ok())
}

#[cfg(not(unix))]
pub fn current_username() -> Option<String> {
    env::var("USERNAME").ok()
}

#[cfg(unix)]
fn passwd_username() -> Option<String> {
    use std::ffi::CStr;

    let mut buf = vec![0 as libc::c_char; 1024];
    let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
    let mut result: *mut libc::passwd = std::ptr::null_mut();

    let rc = unsafe {
        libc::getpwuid_r(
            libc::getuid(),
            &mut pwd,
            buf.as_mut_ptr(),
            buf.len(),
            &mut result,
        )
    };
    if rc != 0 || result.is_null() || pwd.pw_name.is_null() {
        return None;
    }

    // pw_name 指向 buf 内部，buf 在此之前一直有效
    let name = unsafe { CStr::from_ptr(pwd.pw_name) };
    name.to_str().ok().map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_file_name_embeds_user() {
        assert_eq!(socket_file_name(Some("dylan")), "todo-app-dylan.sock");
        assert_eq!(socket_file_name(None), "todo-app.sock");
        assert_eq!(socket_file_name(Some("  ")), "todo-app.sock");
    }

    #[test]
    fn test_paths_colocated_with_base_dir() {
        let base = Path::new("/opt/todo");
        let paths = AppPaths::new(base, PathBuf::from("/tmp/todo-app.sock"));
        assert_eq!(paths.data_file, base.join("todo.json"));
        assert_eq!(paths.icon_file, base.join("tray.png"));
        assert_eq!(paths.config_file, base.join("config.json"));
        assert_eq!(paths.socket_path, PathBuf::from("/tmp/todo-app.sock"));
    }

    #[test]
    fn test_resolve_places_socket_in_temp_dir() {
        let paths = AppPaths::resolve();
        assert!(paths.socket_path.starts_with(env::temp_dir()));
        let name = paths.socket_path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("todo-app"));
        assert!(name.ends_with(".sock"));
    }
}
