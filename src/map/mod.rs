//! 哈希表核心模块 - 拉链哈希表及其桶链表

pub mod bucket;
pub mod chain_map;

pub use bucket::{BucketList, Node};
pub use chain_map::{
    ChainMap, ChainMapConfig, ChainMapStats, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR,
};

use once_cell::sync::Lazy;

/// 全局默认配置
pub static DEFAULT_CONFIG: Lazy<ChainMapConfig> = Lazy::new(ChainMapConfig::default);
