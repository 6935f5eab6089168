//! 应用上下文
//!
//! 持有待办列表、存储和配置。所有修改都经过 [`AppContext::apply`]：
//! 修改内存列表、整体保存、递增菜单代数。调用方随后在 UI 线程上重建托盘菜单。

use crate::models::menu::{self, TrayEntry};
use crate::models::{AppConfig, InputState, Todo};
use crate::services::{TodoList, TodoStore};
use crate::utils::text;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// 对待办列表的修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Add(String),
    /// 按菜单代数和下标删除
    Delete { generation: u64, index: usize },
}

/// 修改结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Added(Todo),
    Deleted(Todo),
    /// 空文本、过期菜单或越界下标
    Ignored,
}

impl Applied {
    pub fn changed(&self) -> bool {
        !matches!(self, Applied::Ignored)
    }
}

#[derive(Debug, Default)]
struct Inner {
    todos: TodoList,
    /// 每次列表变化后递增，菜单项 id 带上它
    generation: u64,
}

pub struct AppContext {
    config: AppConfig,
    store: TodoStore,
    inner: Mutex<Inner>,
}

impl AppContext {
    /// 创建上下文并从存储加载列表
    pub fn new(config: AppConfig, store: TodoStore) -> Self {
        let todos = TodoList::from(store.load());
        Self {
            config,
            store,
            inner: Mutex::new(Inner {
                todos,
                generation: 0,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 输入框实时截断
    pub fn clamp_input(&self, input: &str) -> InputState {
        let max_weight = self.config.input_max_weight;
        let clamped = text::truncate(input, max_weight);
        InputState {
            text: clamped.to_string(),
            remaining: text::remaining(clamped, max_weight),
            max_weight,
        }
    }

    /// 应用一次修改，列表有变化时保存
    pub fn apply(&self, mutation: Mutation) -> Applied {
        let mut inner = self.lock();
        let applied = match mutation {
            Mutation::Add(input) => {
                // 按输入原样保存；截断后只剩空白时不新增
                let clamped = text::truncate(&input, self.config.input_max_weight);
                if clamped.trim().is_empty() {
                    Applied::Ignored
                } else {
                    let todo = Todo::new(clamped);
                    inner.todos.push(todo.text.clone());
                    Applied::Added(todo)
                }
            }
            Mutation::Delete { generation, index } => {
                if generation != inner.generation {
                    tracing::debug!(
                        generation,
                        current = inner.generation,
                        "忽略过期菜单上的删除"
                    );
                    Applied::Ignored
                } else {
                    inner
                        .todos
                        .remove_at(index)
                        .map_or(Applied::Ignored, Applied::Deleted)
                }
            }
        };

        if applied.changed() {
            inner.generation += 1;
            self.store.save(inner.todos.items());
            tracing::info!(result = ?applied, count = inner.todos.len(), "待办已更新");
        }
        applied
    }

    /// 当前菜单条目
    pub fn menu_entries(&self) -> Vec<TrayEntry> {
        let inner = self.lock();
        menu::build_entries(
            inner.todos.items(),
            inner.generation,
            self.config.display_max_weight,
        )
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.lock().todos.items().to_vec()
    }

    pub fn len(&self) -> usize {
        self.lock().todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().todos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::menu::TrayAction;
    use std::fs;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> AppContext {
        AppContext::new(
            AppConfig::default(),
            TodoStore::new(dir.path().join("todo.json")),
        )
    }

    fn todo_ids(entries: &[TrayEntry]) -> Vec<String> {
        entries
            .iter()
            .filter_map(|e| match e {
                TrayEntry::Todo { id, .. } => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_add_to_empty_store() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        assert!(ctx.is_empty());

        let applied = ctx.apply(Mutation::Add("buy milk".into()));
        assert_eq!(applied, Applied::Added(Todo::new("buy milk")));

        let content = fs::read_to_string(dir.path().join("todo.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value, serde_json::json!([{ "text": "buy milk" }]));

        let entries = ctx.menu_entries();
        assert_eq!(todo_ids(&entries).len(), 1);
        assert!(!entries
            .iter()
            .any(|e| matches!(e, TrayEntry::Placeholder { .. })));
    }

    #[test]
    fn test_empty_submit_is_noop() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        assert_eq!(ctx.apply(Mutation::Add(String::new())), Applied::Ignored);
        assert_eq!(ctx.apply(Mutation::Add("   ".into())), Applied::Ignored);
        assert!(!dir.path().join("todo.json").exists());
    }

    #[test]
    fn test_add_keeps_text_as_typed() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        ctx.apply(Mutation::Add("  buy milk ".into()));
        assert_eq!(ctx.todos(), vec![Todo::new("  buy milk ")]);
    }

    #[test]
    fn test_add_that_clamps_to_nothing_is_ignored() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            input_max_weight: 1,
            ..AppConfig::default()
        };
        let ctx = AppContext::new(config, TodoStore::new(dir.path().join("todo.json")));

        assert_eq!(ctx.apply(Mutation::Add("买牛奶".into())), Applied::Ignored);
        assert_eq!(ctx.apply(Mutation::Add(" 买".into())), Applied::Ignored);
        assert!(ctx.is_empty());
        assert!(!dir.path().join("todo.json").exists());

        assert_eq!(
            ctx.apply(Mutation::Add("ab".into())),
            Applied::Added(Todo::new("a"))
        );
    }

    #[test]
    fn test_add_clamps_to_input_budget() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let long = "买".repeat(25);
        ctx.apply(Mutation::Add(long));
        assert_eq!(ctx.todos()[0].text, "买".repeat(20));
    }

    #[test]
    fn test_delete_by_menu_id_removes_that_row() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        for text in ["a", "b", "a"] {
            ctx.apply(Mutation::Add(text.into()));
        }

        // 删除第二个 "a"，重复文本也能精确定位
        let ids = todo_ids(&ctx.menu_entries());
        let Some(TrayAction::Delete { generation, index }) = TrayAction::parse(&ids[2]) else {
            panic!("expected delete action");
        };
        let applied = ctx.apply(Mutation::Delete { generation, index });
        assert_eq!(applied, Applied::Deleted(Todo::new("a")));
        assert_eq!(ctx.todos(), vec![Todo::new("a"), Todo::new("b")]);

        let reloaded = TodoStore::new(dir.path().join("todo.json")).load();
        assert_eq!(reloaded, ctx.todos());
    }

    #[test]
    fn test_stale_menu_delete_is_ignored() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        ctx.apply(Mutation::Add("a".into()));
        let stale = todo_ids(&ctx.menu_entries());
        ctx.apply(Mutation::Add("b".into()));

        let Some(TrayAction::Delete { generation, index }) = TrayAction::parse(&stale[0]) else {
            panic!("expected delete action");
        };
        assert_eq!(
            ctx.apply(Mutation::Delete { generation, index }),
            Applied::Ignored
        );
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_out_of_range_delete_is_ignored() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        assert_eq!(
            ctx.apply(Mutation::Delete {
                generation: 0,
                index: 0
            }),
            Applied::Ignored
        );
    }

    #[test]
    fn test_loads_existing_list() {
        let dir = TempDir::new().unwrap();
        let store = TodoStore::new(dir.path().join("todo.json"));
        store.save(&[Todo::new("x"), Todo::new("y")]);

        let ctx = AppContext::new(AppConfig::default(), store);
        assert_eq!(ctx.todos(), vec![Todo::new("x"), Todo::new("y")]);
    }

    #[test]
    fn test_clamp_input() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let state = ctx.clamp_input("买牛奶");
        assert_eq!(state.text, "买牛奶");
        assert_eq!(state.remaining, 34);
        assert_eq!(state.max_weight, 40);

        let state = ctx.clamp_input(&"a".repeat(50));
        assert_eq!(state.text, "a".repeat(40));
        assert_eq!(state.remaining, 0);
    }
}
