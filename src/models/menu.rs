//! 托盘菜单模型
//!
//! 菜单在每次增删后整体重建：新增入口、分隔线、每条待办一行
//! （或禁用的占位行）、分隔线、退出。待办行的 id 携带菜单代数和下标，
//! 旧菜单上的点击不会误删重建后的条目。

use crate::models::Todo;
use crate::utils::text::truncate_with_ellipsis;

pub const MENU_ID_ADD: &str = "add";
pub const MENU_ID_QUIT: &str = "quit";
pub const MENU_ID_PLACEHOLDER: &str = "empty";

pub const LABEL_ADD: &str = "➕ 新增待办";
pub const LABEL_QUIT: &str = "退出";
pub const LABEL_PLACEHOLDER: &str = "（暂无待办）";
pub const TODO_LABEL_PREFIX: &str = "☐ ";

const TODO_ID_PREFIX: &str = "todo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayEntry {
    /// 可点击的固定操作
    Action { id: String, label: String },
    /// 一条待办，点击即删除
    Todo { id: String, label: String },
    /// 列表为空时的禁用占位行
    Placeholder { label: String },
    Separator,
}

/// 菜单点击解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    ShowWindow,
    Delete { generation: u64, index: usize },
    Quit,
}

impl TrayAction {
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            MENU_ID_ADD => Some(Self::ShowWindow),
            MENU_ID_QUIT => Some(Self::Quit),
            _ => {
                let mut parts = id.splitn(3, ':');
                if parts.next() != Some(TODO_ID_PREFIX) {
                    return None;
                }
                let generation = parts.next()?.parse().ok()?;
                let index = parts.next()?.parse().ok()?;
                Some(Self::Delete { generation, index })
            }
        }
    }
}

pub fn todo_item_id(generation: u64, index: usize) -> String {
    format!("{TODO_ID_PREFIX}:{generation}:{index}")
}

pub fn todo_label(text: &str, max_weight: usize) -> String {
    format!("{TODO_LABEL_PREFIX}{}", truncate_with_ellipsis(text, max_weight))
}

/// 根据当前列表构建菜单条目
pub fn build_entries(todos: &[Todo], generation: u64, max_weight: usize) -> Vec<TrayEntry> {
    let mut entries = Vec::with_capacity(todos.len() + 4);
    entries.push(TrayEntry::Action {
        id: MENU_ID_ADD.to_string(),
        label: LABEL_ADD.to_string(),
    });
    entries.push(TrayEntry::Separator);

    if todos.is_empty() {
        entries.push(TrayEntry::Placeholder {
            label: LABEL_PLACEHOLDER.to_string(),
        });
    } else {
        entries.extend(todos.iter().enumerate().map(|(index, todo)| TrayEntry::Todo {
            id: todo_item_id(generation, index),
            label: todo_label(&todo.text, max_weight),
        }));
    }

    entries.push(TrayEntry::Separator);
    entries.push(TrayEntry::Action {
        id: MENU_ID_QUIT.to_string(),
        label: LABEL_QUIT.to_string(),
    });
    entries
}
