// lib.rs - 暴露核心逻辑给 GUI 层使用

pub mod core;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use models::*;
pub use services::{ensure_icon, TodoList, TodoStore};
pub use state::{AppContext, Applied, Mutation};
pub use utils::paths::AppPaths;

pub use core::{init_logger, AppError, AppResult};
