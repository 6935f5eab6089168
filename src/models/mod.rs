pub mod config;
pub mod menu;
pub mod todo;

pub use config::*;
pub use menu::{TrayAction, TrayEntry};
pub use todo::*;
