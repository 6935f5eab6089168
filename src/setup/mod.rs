// 托盘菜单
pub mod tray;

// 输入窗口管理
pub mod window;

// 启动初始化逻辑
pub mod initialization;

// 重新导出常用函数供 main.rs 使用
pub use initialization::initialize_app;
