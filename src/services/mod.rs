pub mod icon;
#[cfg(unix)]
pub mod single_instance;
pub mod status;
pub mod store;

pub use icon::ensure_icon;
pub use store::{TodoList, TodoStore};
