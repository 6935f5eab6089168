use serde::{Deserialize, Serialize};

/// 单条待办，序列化为 `{ "text": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub text: String,
}

impl Todo {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// 输入框状态（截断后的文本与剩余宽度）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub text: String,
    pub remaining: usize,
    pub max_weight: usize,
}

/// 提交结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResult {
    /// 空文本提交为 false
    pub added: bool,
    pub total: usize,
}
