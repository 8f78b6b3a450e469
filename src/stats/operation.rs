// src/stats/operation.rs
//! 操作统计 - 跟踪哈希表各类操作的次数

use crate::types::OperationType;
use std::sync::atomic::{AtomicU64, Ordering};

/// 操作统计接口
pub trait OperationRecorder: Send + Sync {
    /// 记录一次操作
    fn record(&self, op_type: OperationType);

    /// 获取操作统计快照
    fn snapshot(&self) -> OperationStatsSnapshot;

    /// 重置统计
    fn reset(&self);

    /// 导出Prometheus格式指标
    fn export_prometheus(&self) -> String {
        let snapshot = self.snapshot();
        let mut output = String::new();
        output.push_str("# HELP chained_hashtable_operations_total Operations by type\n");
        output.push_str("# TYPE chained_hashtable_operations_total counter\n");
        for (op_type, count) in snapshot.counts() {
            output.push_str(&format!(
                "chained_hashtable_operations_total{{op=\"{}\"}} {}\n",
                op_type.as_str(),
                count
            ));
        }
        output
    }
}

/// 操作统计快照
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationStatsSnapshot {
    pub insert_count: u64,
    pub update_count: u64,
    pub get_count: u64,
    pub has_count: u64,
    pub remove_count: u64,
    pub resize_count: u64,
    pub clear_count: u64,
    pub iterate_count: u64,
}

impl OperationStatsSnapshot {
    /// 按操作类型列出计数
    pub fn counts(&self) -> [(OperationType, u64); 8] {
        [
            (OperationType::Insert, self.insert_count),
            (OperationType::Update, self.update_count),
            (OperationType::Get, self.get_count),
            (OperationType::Has, self.has_count),
            (OperationType::Remove, self.remove_count),
            (OperationType::Resize, self.resize_count),
            (OperationType::Clear, self.clear_count),
            (OperationType::Iterate, self.iterate_count),
        ]
    }

    /// 读操作总数
    pub fn read_count(&self) -> u64 {
        self.counts()
            .iter()
            .filter(|(op, _)| op.is_read())
            .map(|(_, count)| count)
            .sum()
    }

    /// 写操作总数
    pub fn write_count(&self) -> u64 {
        self.counts()
            .iter()
            .filter(|(op, _)| op.is_write())
            .map(|(_, count)| count)
            .sum()
    }
}

/// 原子操作统计
#[derive(Debug, Default)]
pub struct AtomicOperationStats {
    insert_count: AtomicU64,
    update_count: AtomicU64,
    get_count: AtomicU64,
    has_count: AtomicU64,
    remove_count: AtomicU64,
    resize_count: AtomicU64,
    clear_count: AtomicU64,
    iterate_count: AtomicU64,
}

impl AtomicOperationStats {
    /// 创建新统计
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, op_type: OperationType) -> &AtomicU64 {
        match op_type {
            OperationType::Insert => &self.insert_count,
            OperationType::Update => &self.update_count,
            OperationType::Get => &self.get_count,
            OperationType::Has => &self.has_count,
            OperationType::Remove => &self.remove_count,
            OperationType::Resize => &self.resize_count,
            OperationType::Clear => &self.clear_count,
            OperationType::Iterate => &self.iterate_count,
        }
    }
}

impl OperationRecorder for AtomicOperationStats {
    fn record(&self, op_type: OperationType) {
        self.counter(op_type).fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> OperationStatsSnapshot {
        OperationStatsSnapshot {
            insert_count: self.insert_count.load(Ordering::Relaxed),
            update_count: self.update_count.load(Ordering::Relaxed),
            get_count: self.get_count.load(Ordering::Relaxed),
            has_count: self.has_count.load(Ordering::Relaxed),
            remove_count: self.remove_count.load(Ordering::Relaxed),
            resize_count: self.resize_count.load(Ordering::Relaxed),
            clear_count: self.clear_count.load(Ordering::Relaxed),
            iterate_count: self.iterate_count.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.insert_count.store(0, Ordering::Relaxed);
        self.update_count.store(0, Ordering::Relaxed);
        self.get_count.store(0, Ordering::Relaxed);
        self.has_count.store(0, Ordering::Relaxed);
        self.remove_count.store(0, Ordering::Relaxed);
        self.resize_count.store(0, Ordering::Relaxed);
        self.clear_count.store(0, Ordering::Relaxed);
        self.iterate_count.store(0, Ordering::Relaxed);
    }
}

/// 禁用统计时使用的空记录器
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledRecorder;

impl OperationRecorder for DisabledRecorder {
    fn record(&self, _op_type: OperationType) {}

    fn snapshot(&self) -> OperationStatsSnapshot {
        OperationStatsSnapshot::default()
    }

    fn reset(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_snapshot() {
        let stats = AtomicOperationStats::new();
        stats.record(OperationType::Insert);
        stats.record(OperationType::Insert);
        stats.record(OperationType::Get);
        stats.record(OperationType::Resize);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.insert_count, 2);
        assert_eq!(snapshot.get_count, 1);
        assert_eq!(snapshot.resize_count, 1);
        assert_eq!(snapshot.read_count(), 1);
        assert_eq!(snapshot.write_count(), 3);
    }

    #[test]
    fn test_reset() {
        let stats = AtomicOperationStats::new();
        stats.record(OperationType::Remove);
        stats.reset();
        assert_eq!(stats.snapshot(), OperationStatsSnapshot::default());
    }

    #[test]
    fn test_disabled_recorder() {
        let stats = DisabledRecorder;
        stats.record(OperationType::Insert);
        assert_eq!(stats.snapshot().insert_count, 0);
    }

    #[test]
    fn test_export_prometheus() {
        let stats = AtomicOperationStats::new();
        stats.record(OperationType::Clear);
        let output = stats.export_prometheus();
        assert!(output.contains("# TYPE chained_hashtable_operations_total counter"));
        assert!(output.contains("chained_hashtable_operations_total{op=\"clear\"} 1"));
        assert!(output.contains("chained_hashtable_operations_total{op=\"insert\"} 0"));
    }
}
