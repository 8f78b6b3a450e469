//! 拉链法哈希表库
//!
//! 字符串键经多项式滚动哈希定位到桶，同一个桶内的键值对保存在单向链表里。
//! 插入新键后条目数超过 `负载因子 × 容量` 时，容量翻倍并重新分配所有条目。
//!
//! ## 主要特性
//! - 按需创建的单链表桶，键冲突时追加到桶尾
//! - 负载因子触发的自动扩容，迭代式重哈希
//! - 可选的负哈希取模策略（规整 / 带符号取余）
//! - 操作计数统计与 Prometheus 文本导出
//!
//! ## 快速开始
//!
//! ```rust
//! use chained_hashtable::*;
//!
//! fn main() -> Result<(), ChainError> {
//!     // 创建默认配置的哈希表（容量16，负载因子0.75）
//!     let mut map: DefaultMap = ChainMap::default();
//!
//!     // 插入键值对
//!     map.set("dog".to_string(), "brown".to_string())?;
//!
//!     // 覆盖已有键
//!     map.set("dog".to_string(), "black".to_string())?;
//!
//!     // 获取值
//!     if let Some(value) = map.get("dog")? {
//!         println!("dog: {}", value);
//!     }
//!
//!     // 删除键
//!     assert!(map.remove("dog")?);
//!
//!     // 打印统计信息
//!     println!("{:?}", map.stats());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}
// 核心模块导出
pub mod error;
pub mod hash;
pub mod map;
pub mod stats;
pub mod types;

// 公共接口导出
pub use crate::{
    error::ChainError,
    hash::{bucket_index, raw_index, rolling_hash, IndexPolicy},
    map::{
        BucketList, ChainMap, ChainMapConfig, ChainMapStats, DEFAULT_CONFIG,
        DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR,
    },
    stats::{OperationRecorder, OperationStatsSnapshot},
    types::{Key, OperationType},
};

use std::borrow::Borrow;

// 简化默认类型别名
pub type DefaultMap = ChainMap<String, String>;

// 便捷功能函数

/// 批量写入，返回成功写入（含覆盖）的条目数
///
/// 单个键的越界错误记录日志后跳过，不中断后续写入。
pub fn batch_insert<K: Key, V>(map: &mut ChainMap<K, V>, items: impl IntoIterator<Item = (K, V)>) -> usize {
    let mut count = 0;
    for (key, value) in items {
        match map.set(key, value) {
            Ok(_) => count += 1,
            Err(_err) => {
                log_warn!("batch_insert skipped a key: {}", _err);
            }
        }
    }
    count
}

/// 批量查询，越界或不存在的键返回 `None`
pub fn batch_get<'a, K, V, Q>(map: &ChainMap<K, V>, keys: impl IntoIterator<Item = &'a Q>) -> Vec<Option<V>>
where
    K: Key + Borrow<Q>,
    V: Clone,
    Q: Key + ?Sized + 'a,
{
    keys.into_iter()
        .map(|key| map.get(key).ok().flatten().cloned())
        .collect()
}
