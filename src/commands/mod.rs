pub mod todo_commands;

// 重新导出所有命令函数
pub use todo_commands::*;
