//! 拉链哈希表核心实现

use crate::{
    error::ChainError,
    hash::{bucket_index, raw_index, rolling_hash, IndexPolicy},
    map::{bucket::BucketList, DEFAULT_CONFIG},
    stats::{AtomicOperationStats, DisabledRecorder, OperationRecorder, OperationStatsSnapshot},
    types::{Key, OperationType},
};
use std::{borrow::Borrow, fmt};

/// 默认初始桶数量
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;
/// 默认负载因子
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// 哈希表配置
#[derive(Clone, Debug, PartialEq)]
pub struct ChainMapConfig {
    // 初始桶数量
    pub initial_capacity: usize,
    // 条目数超过 load_factor * capacity 时扩容，构造后不可变
    pub load_factor: f64,
    pub index_policy: IndexPolicy,
    pub record_stats: bool,
}

impl Default for ChainMapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            index_policy: IndexPolicy::Normalized,
            record_stats: true,
        }
    }
}

impl ChainMapConfig {
    /// 校验配置参数
    pub fn validate(&self) -> Result<(), ChainError> {
        if self.initial_capacity == 0 {
            return Err(ChainError::InvalidConfig {
                reason: "initial_capacity 必须大于0".into(),
            });
        }
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(ChainError::InvalidConfig {
                reason: format!("load_factor 必须为正有限数, 实际为 {}", self.load_factor),
            });
        }
        Ok(())
    }
}

/// 哈希表统计信息
#[derive(Debug, Default, Clone)]
pub struct ChainMapStats {
    pub size: usize,
    pub capacity: usize,
    pub load_factor: f64,
    /// 当前 size / capacity
    pub fill_ratio: f64,
    pub occupied_buckets: usize,
    pub longest_chain: usize,
    pub operations: OperationStatsSnapshot,
}

/// 拉链哈希表
///
/// 每个桶是一个按需创建的单向链表。插入新键后若条目数超过
/// `load_factor * capacity`，容量翻倍并把全部条目重新分配到新桶数组。
pub struct ChainMap<K, V> {
    buckets: Vec<Option<BucketList<K, V>>>,
    config: ChainMapConfig,
    recorder: Box<dyn OperationRecorder>,
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Option<BucketList<K, V>>> {
    (0..capacity).map(|_| None).collect()
}

fn key_matches<K, Q>(stored: &K, key: &Q) -> bool
where
    K: Borrow<Q>,
    Q: Key + ?Sized,
{
    <K as Borrow<Q>>::borrow(stored) == key
}

/// 键在桶内的位置（从头部数起）
fn position_of<K, V, Q>(bucket: &BucketList<K, V>, key: &Q) -> Option<usize>
where
    K: Borrow<Q>,
    Q: Key + ?Sized,
{
    let mut position = 0;
    let mut cursor = bucket.head();
    while let Some(node) = cursor {
        if key_matches(node.key(), key) {
            return Some(position);
        }
        cursor = node.next();
        position += 1;
    }
    None
}

impl<K: Key, V> ChainMap<K, V> {
    /// 按配置创建哈希表
    pub fn new(config: ChainMapConfig) -> Result<Self, ChainError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    /// 指定初始容量和负载因子创建哈希表
    pub fn with_capacity_and_load_factor(
        initial_capacity: usize,
        load_factor: f64,
    ) -> Result<Self, ChainError> {
        Self::new(ChainMapConfig {
            initial_capacity,
            load_factor,
            ..ChainMapConfig::default()
        })
    }

    fn from_valid_config(config: ChainMapConfig) -> Self {
        let recorder: Box<dyn OperationRecorder> = if config.record_stats {
            Box::new(AtomicOperationStats::new())
        } else {
            Box::new(DisabledRecorder)
        };

        Self {
            buckets: empty_buckets(config.initial_capacity),
            config,
            recorder,
        }
    }

    /// 键的滚动哈希值
    pub fn hash<Q: Key + ?Sized>(&self, key: &Q) -> i32 {
        rolling_hash(key.as_str())
    }

    /// 键所在的桶索引
    pub fn index_of<Q: Key + ?Sized>(&self, key: &Q) -> Result<usize, ChainError> {
        bucket_index(self.hash(key), self.capacity(), self.config.index_policy)
    }

    /// 写入键值对
    ///
    /// 键已存在时原地覆盖并返回旧值，此时不做扩容检查；
    /// 新键追加到桶尾后检查负载因子。
    pub fn set(&mut self, key: K, value: V) -> Result<Option<V>, ChainError> {
        let index = self.index_of(&key)?;

        // 桶按需创建，新桶为空时遍历直接结束
        let bucket = self.buckets[index].get_or_insert_with(BucketList::new);
        let mut cursor = bucket.head_mut();
        while let Some(node) = cursor {
            if node.key() == &key {
                let old = std::mem::replace(node.value_mut(), value);
                log_debug!("Updated key {:?} at index {}", key, index);
                self.recorder.record(OperationType::Update);
                return Ok(Some(old));
            }
            cursor = node.next_mut();
        }
        bucket.append(key, value);

        self.recorder.record(OperationType::Insert);
        self.grow();
        Ok(None)
    }

    /// 获取键对应的值
    pub fn get<Q>(&self, key: &Q) -> Result<Option<&V>, ChainError>
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
    {
        self.recorder.record(OperationType::Get);
        let index = self.index_of(key)?;

        let Some(bucket) = &self.buckets[index] else {
            return Ok(None);
        };
        let mut cursor = bucket.head();
        while let Some(node) = cursor {
            if key_matches(node.key(), key) {
                return Ok(Some(node.value()));
            }
            cursor = node.next();
        }
        Ok(None)
    }

    /// 获取键对应值的可变引用
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<Option<&mut V>, ChainError>
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
    {
        self.recorder.record(OperationType::Get);
        let index = self.index_of(key)?;

        let Some(bucket) = &mut self.buckets[index] else {
            return Ok(None);
        };
        let mut cursor = bucket.head_mut();
        while let Some(node) = cursor {
            if key_matches(node.key(), key) {
                return Ok(Some(node.value_mut()));
            }
            cursor = node.next_mut();
        }
        Ok(None)
    }

    /// 检查键是否存在，从未创建过的桶直接返回 false
    pub fn has<Q>(&self, key: &Q) -> Result<bool, ChainError>
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
    {
        self.recorder.record(OperationType::Has);
        let index = self.index_of(key)?;

        Ok(self.buckets[index]
            .as_ref()
            .is_some_and(|bucket| position_of(bucket, key).is_some()))
    }

    /// 删除键，返回是否删除成功
    pub fn remove<Q>(&mut self, key: &Q) -> Result<bool, ChainError>
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
    {
        Ok(self.take(key)?.is_some())
    }

    /// 删除键并返回其值
    pub fn take<Q>(&mut self, key: &Q) -> Result<Option<V>, ChainError>
    where
        K: Borrow<Q>,
        Q: Key + ?Sized,
    {
        self.recorder.record(OperationType::Remove);
        let index = self.index_of(key)?;

        let Some(bucket) = &mut self.buckets[index] else {
            return Ok(None);
        };
        match position_of(bucket, key) {
            Some(position) => {
                let (_, value) = bucket.remove_at(position)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// 条目总数，累加所有已创建桶的长度
    pub fn len(&self) -> usize {
        self.buckets.iter().flatten().map(BucketList::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().flatten().all(BucketList::is_empty)
    }

    /// 丢弃所有桶，保留容量和负载因子
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(|slot| *slot = None);
        self.recorder.record(OperationType::Clear);
        log_info!("Cleared the buckets, capacity stays at {}", self.capacity());
    }

    /// 按桶索引、再按桶内插入顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.recorder.record(OperationType::Iterate);
        self.buckets.iter().flatten().flat_map(BucketList::iter)
    }

    pub fn keys(&self) -> Vec<&K> {
        self.iter().map(|(key, _)| key).collect()
    }

    pub fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, value)| value).collect()
    }

    pub fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    /// 消费哈希表，按 `entries()` 的顺序取出全部键值对
    pub fn into_entries(self) -> impl Iterator<Item = (K, V)> {
        self.buckets
            .into_iter()
            .flatten()
            .flat_map(BucketList::into_entries)
    }

    /// 当前桶数量
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.config.load_factor
    }

    pub fn index_policy(&self) -> IndexPolicy {
        self.config.index_policy
    }

    pub fn config(&self) -> &ChainMapConfig {
        &self.config
    }

    /// 触发扩容的条目数上限
    pub fn threshold(&self) -> f64 {
        self.config.load_factor * self.capacity() as f64
    }

    pub fn fill_ratio(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    /// 统计快照
    pub fn stats(&self) -> ChainMapStats {
        let size = self.len();
        ChainMapStats {
            size,
            capacity: self.capacity(),
            load_factor: self.config.load_factor,
            fill_ratio: size as f64 / self.capacity() as f64,
            occupied_buckets: self
                .buckets
                .iter()
                .flatten()
                .filter(|bucket| !bucket.is_empty())
                .count(),
            longest_chain: self
                .buckets
                .iter()
                .flatten()
                .map(BucketList::len)
                .max()
                .unwrap_or(0),
            operations: self.recorder.snapshot(),
        }
    }

    /// 导出Prometheus格式指标
    pub fn export_prometheus(&self) -> String {
        let mut output = self.recorder.export_prometheus();
        output.push_str(&format!("chained_hashtable_size {}\n", self.len()));
        output.push_str(&format!("chained_hashtable_capacity {}\n", self.capacity()));
        output
    }

    /// 重置操作计数
    pub fn reset_stats(&self) {
        self.recorder.reset();
    }

    /// 插入新键后的扩容检查
    ///
    /// 一次性算出能容纳当前条目数的容量（每次翻倍），然后迭代重建桶数组，
    /// 条目直接放入新桶，不经过 `set`。
    fn grow(&mut self) {
        let size = self.len();
        let old_capacity = self.capacity();
        if (size as f64) <= self.threshold() {
            return;
        }

        let mut new_capacity = old_capacity;
        while size as f64 > self.config.load_factor * new_capacity as f64 {
            match new_capacity.checked_mul(2) {
                Some(doubled) => new_capacity = doubled,
                None => break,
            }
        }
        if new_capacity == old_capacity {
            log_warn!("Map at {} entries but capacity {} cannot double", size, old_capacity);
            return;
        }

        log_info!(
            "Map at {} entries, doubled the buckets {} -> {}",
            size,
            old_capacity,
            new_capacity
        );

        let old_buckets = std::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for (key, value) in old_buckets
            .into_iter()
            .flatten()
            .flat_map(BucketList::into_entries)
        {
            // 带符号策略只接受非负哈希，余数对任意容量都落在 [0, capacity)
            let index = raw_index(
                rolling_hash(key.as_str()),
                new_capacity,
                self.config.index_policy,
            ) as usize;
            self.buckets[index]
                .get_or_insert_with(BucketList::new)
                .append(key, value);
        }

        self.recorder.record(OperationType::Resize);
    }
}

impl<K: Key, V> Default for ChainMap<K, V> {
    fn default() -> Self {
        Self::from_valid_config(DEFAULT_CONFIG.clone())
    }
}

impl<K: Key, V> fmt::Debug for ChainMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainMap")
            .field("size", &self.len())
            .field("capacity", &self.capacity())
            .field("load_factor", &self.config.load_factor)
            .finish()
    }
}
