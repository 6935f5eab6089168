//! 待办数据读写
//!
//! 持久化格式为两空格缩进的 JSON 数组 `[{ "text": "..." }]`。
//! 运行期间内存中的列表是唯一真相，每次增删后整体覆盖写入。
//! 不加锁：单实例协调保证同一时间只有一个写入进程。

use crate::core::{AppError, AppResult};
use crate::models::Todo;
use std::fs;
use std::path::{Path, PathBuf};

/// JSON 文件存储
#[derive(Debug, Clone)]
pub struct TodoStore {
    path: PathBuf,
}

impl TodoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取待办列表
    ///
    /// 文件不存在、读取失败或 JSON 无效时都返回空列表，不向上传播错误。
    pub fn load(&self) -> Vec<Todo> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "待办文件不存在，使用空列表");
            return Vec::new();
        }
        match self.try_load() {
            Ok(todos) => {
                tracing::info!(count = todos.len(), "已加载待办");
                todos
            }
            Err(e) => {
                tracing::warn!(error = %e, "读取待办文件失败，使用空列表");
                Vec::new()
            }
        }
    }

    pub fn try_load(&self) -> AppResult<Vec<Todo>> {
        let content = fs::read_to_string(&self.path).map_err(|e| AppError::io(&self.path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 覆盖写入整个列表，失败只记录日志
    pub fn save(&self, todos: &[Todo]) {
        if let Err(e) = self.try_save(todos) {
            tracing::error!(error = %e, "保存待办失败");
        }
    }

    pub fn try_save(&self, todos: &[Todo]) -> AppResult<()> {
        let content = serde_json::to_string_pretty(todos)?;
        fs::write(&self.path, content).map_err(|e| AppError::io(&self.path, e))?;
        tracing::debug!(count = todos.len(), path = %self.path.display(), "待办已保存");
        Ok(())
    }
}

/// 内存中的有序待办列表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    items: Vec<Todo>,
}

impl TodoList {
    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, text: impl Into<String>) {
        self.items.push(Todo::new(text));
    }

    /// 按位置删除
    pub fn remove_at(&mut self, index: usize) -> Option<Todo> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// 删除第一条文本相同的待办，其余顺序不变
    ///
    /// 数据层按文本删除的约定：重复文本只删最前面一条。
    /// 托盘菜单上的删除带有位置信息，走 [`TodoList::remove_at`]。
    pub fn remove_first(&mut self, text: &str) -> Option<Todo> {
        let index = self.items.iter().position(|todo| todo.text == text)?;
        self.remove_at(index)
    }
}

impl From<Vec<Todo>> for TodoList {
    fn from(items: Vec<Todo>) -> Self {
        Self { items }
    }
}
