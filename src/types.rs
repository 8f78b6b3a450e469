//! 核心类型定义 - 键特征与操作类型

use std::{borrow::Cow, fmt::Debug, rc::Rc, sync::Arc};

/// 键特征 - 以字符串形式参与哈希
///
/// 哈希函数按顺序消费 `as_str()` 的 UTF-16 码元，因此两个键只要
/// 字符串内容相同就落在同一个桶里，与具体的所有权类型无关。
pub trait Key: Eq + Debug {
    /// 获取键的字符串表示
    fn as_str(&self) -> &str;
}

impl Key for str {
    fn as_str(&self) -> &str {
        self
    }
}

impl Key for String {
    fn as_str(&self) -> &str {
        String::as_str(self)
    }
}

impl Key for Box<str> {
    fn as_str(&self) -> &str {
        self
    }
}

impl Key for Rc<str> {
    fn as_str(&self) -> &str {
        self
    }
}

impl Key for Arc<str> {
    fn as_str(&self) -> &str {
        self
    }
}

impl Key for Cow<'_, str> {
    fn as_str(&self) -> &str {
        self
    }
}

impl<T: Key + ?Sized> Key for &T {
    fn as_str(&self) -> &str {
        (**self).as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// 插入新键
    Insert,
    /// 覆盖已有键的值
    Update,
    /// 获取操作
    Get,
    /// 存在性检查
    Has,
    /// 删除操作
    Remove,
    /// 扩容重哈希
    Resize,
    /// 清空操作
    Clear,
    /// 遍历操作
    Iterate,
}

impl OperationType {
    /// 判断是否为读操作
    pub fn is_read(&self) -> bool {
        matches!(
            self,
            OperationType::Get | OperationType::Has | OperationType::Iterate
        )
    }

    /// 判断是否为写操作
    pub fn is_write(&self) -> bool {
        !self.is_read()
    }

    /// 转换为字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Insert => "insert",
            OperationType::Update => "update",
            OperationType::Get => "get",
            OperationType::Has => "has",
            OperationType::Remove => "remove",
            OperationType::Resize => "resize",
            OperationType::Clear => "clear",
            OperationType::Iterate => "iterate",
        }
    }
}
