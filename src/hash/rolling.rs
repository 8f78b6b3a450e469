//! 多项式滚动哈希 - `h = 31 * h + c`

/// 滚动哈希的乘数
pub const HASH_MULTIPLIER: i32 = 31;

/// 计算键的多项式滚动哈希
///
/// 逐个消费字符串的 UTF-16 码元，累加器为 32 位有符号整数并按补码回绕，
/// 因此较长的键可能得到负值。结果与平台无关，同一个键永远落在同一个桶。
pub fn rolling_hash(key: &str) -> i32 {
    key.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(i32::from(unit))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(rolling_hash(""), 0);
        assert_eq!(rolling_hash("a"), 97);
        assert_eq!(rolling_hash("dog"), 99644);
        assert_eq!(rolling_hash("hello"), 99162322);
    }

    #[test]
    fn test_overflow_wraps() {
        assert_eq!(rolling_hash("polygenelubricants"), i32::MIN);
        assert_eq!(rolling_hash("banana"), -1396355227);
        assert!(rolling_hash("jacket") < 0);
    }

    #[test]
    fn test_colliding_keys() {
        assert_eq!(rolling_hash("Aa"), rolling_hash("BB"));
        assert_eq!(rolling_hash("AaAa"), rolling_hash("BBBB"));
    }

    #[test]
    fn test_utf16_code_units() {
        assert_eq!(rolling_hash("中文"), 646394);
        // 代理对按两个码元参与计算
        assert_eq!(rolling_hash("😀"), 1772899);
    }
}
