//! 哈希模块 - 滚动哈希与桶索引计算

pub mod rolling;

pub use rolling::{rolling_hash, HASH_MULTIPLIER};

use crate::error::ChainError;

/// 负哈希值的取模策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexPolicy {
    /// 欧几里得取模，索引恒在 `[0, capacity)`
    #[default]
    Normalized,
    /// 带符号取余，负哈希得到负索引并报告越界
    SignedRemainder,
}

/// 按策略计算原始（可能为负的）索引
pub fn raw_index(hash: i32, capacity: usize, policy: IndexPolicy) -> i64 {
    let capacity = capacity as i64;
    match policy {
        IndexPolicy::Normalized => i64::from(hash).rem_euclid(capacity),
        IndexPolicy::SignedRemainder => i64::from(hash) % capacity,
    }
}

/// 计算桶索引，所有操作共用同一个边界检查 `0 <= index < capacity`
pub fn bucket_index(hash: i32, capacity: usize, policy: IndexPolicy) -> Result<usize, ChainError> {
    if capacity == 0 {
        return Err(ChainError::IndexOutOfBounds { index: i64::from(hash), capacity });
    }
    let index = raw_index(hash, capacity, policy);
    // 负哈希的带符号余数即使此刻为 0，容量翻倍后也可能变负，
    // 因此该策略下一律拒绝负哈希，保证扩容后键仍可定位
    if policy == IndexPolicy::SignedRemainder && hash < 0 {
        let reported = if index < 0 { index } else { i64::from(hash) };
        return Err(ChainError::IndexOutOfBounds { index: reported, capacity });
    }
    if index < 0 || index >= capacity as i64 {
        return Err(ChainError::IndexOutOfBounds { index, capacity });
    }
    Ok(index as usize)
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_calculation() {
        assert_eq!(bucket_index(99644, 16, IndexPolicy::Normalized), Ok(12));
        assert_eq!(bucket_index(99644, 32, IndexPolicy::Normalized), Ok(28));
        assert_eq!(bucket_index(99644, 16, IndexPolicy::SignedRemainder), Ok(12));
    }

    #[test]
    fn test_negative_hash_normalized() {
        let hash = rolling_hash("banana");
        assert_eq!(bucket_index(hash, 16, IndexPolicy::Normalized), Ok(5));
        assert_eq!(bucket_index(i32::MIN, 16, IndexPolicy::Normalized), Ok(0));
    }

    #[test]
    fn test_negative_hash_signed_remainder() {
        let hash = rolling_hash("banana");
        assert_eq!(
            bucket_index(hash, 16, IndexPolicy::SignedRemainder),
            Err(ChainError::IndexOutOfBounds { index: -11, capacity: 16 })
        );
        // 余数为 0 的负哈希同样拒绝，翻倍到 32 后其余数为 -16
        let hash = rolling_hash("k1707xyzq");
        assert_eq!(raw_index(hash, 16, IndexPolicy::SignedRemainder), 0);
        assert_eq!(raw_index(hash, 32, IndexPolicy::SignedRemainder), -16);
        assert_eq!(
            bucket_index(hash, 16, IndexPolicy::SignedRemainder),
            Err(ChainError::IndexOutOfBounds { index: i64::from(hash), capacity: 16 })
        );
        assert_eq!(
            bucket_index(i32::MIN, 16, IndexPolicy::SignedRemainder),
            Err(ChainError::IndexOutOfBounds { index: i64::from(i32::MIN), capacity: 16 })
        );
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(bucket_index(7, 0, IndexPolicy::Normalized).is_err());
    }
}
