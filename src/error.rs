//! 统一错误处理 - 哈希表可能返回的错误类型

/// 拉链哈希表可能发生的错误
///
/// 键不存在不是错误，由 `Option` / `bool` 返回值表达。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChainError {
    #[error("桶索引越界 (索引: {index}, 容量: {capacity})")]
    IndexOutOfBounds {
        index: i64,
        capacity: usize,
    },

    #[error("链表位置越界 (位置: {position}, 长度: {size})")]
    PositionOutOfBounds {
        position: usize,
        size: usize,
    },

    #[error("无效配置: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

impl ChainError {
    /// 获取错误恢复建议
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::IndexOutOfBounds { .. } => Some("使用 IndexPolicy::Normalized 规整负哈希值"),
            Self::PositionOutOfBounds { .. } => Some("确认位置小于链表长度"),
            Self::InvalidConfig { .. } => Some("检查配置参数"),
        }
    }

    /// 判断错误是否可恢复
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidConfig { .. })
    }
}
