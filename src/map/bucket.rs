// src/map/bucket.rs
//! 桶实现 - 单向链表保存落在同一索引上的键值对
//!
//! 链表只负责按位置存取，不检查键是否重复：键的唯一性由
//! [`ChainMap`](crate::map::ChainMap) 在写入前遍历保证。

use crate::error::ChainError;
use std::{fmt, iter::FusedIterator};

/// 链表节点，独占其后继
pub struct Node<K, V> {
    key: K,
    value: V,
    next: Option<Box<Node<K, V>>>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Self { key, value, next: None }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// 同时返回键和值
    pub fn entry(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    /// 后继节点
    pub fn next(&self) -> Option<&Node<K, V>> {
        self.next.as_deref()
    }

    pub fn next_mut(&mut self) -> Option<&mut Node<K, V>> {
        self.next.as_deref_mut()
    }
}

/// 桶链表
///
/// `size` 随 `append` / `remove_at` 增量维护，不通过遍历重新统计。
pub struct BucketList<K, V> {
    head: Option<Box<Node<K, V>>>,
    size: usize,
}

impl<K, V> BucketList<K, V> {
    pub fn new() -> Self {
        Self { head: None, size: 0 }
    }

    /// 在尾部追加一个节点
    pub fn append(&mut self, key: K, value: V) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node::new(key, value)));
        self.size += 1;
    }

    /// 删除从头部数起第 `position` 个节点（从0开始），返回其键值
    pub fn remove_at(&mut self, position: usize) -> Result<(K, V), ChainError> {
        let out_of_bounds = ChainError::PositionOutOfBounds {
            position,
            size: self.size,
        };
        if position >= self.size {
            return Err(out_of_bounds);
        }

        let mut link = &mut self.head;
        for _ in 0..position {
            match link {
                Some(node) => link = &mut node.next,
                None => return Err(out_of_bounds),
            }
        }

        let Some(removed) = link.take() else {
            return Err(out_of_bounds);
        };
        // 后继节点的所有权交给前驱的链接
        let Node { key, value, next } = *removed;
        *link = next;
        self.size -= 1;
        Ok((key, value))
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// 头节点，供调用方自行遍历
    pub fn head(&self) -> Option<&Node<K, V>> {
        self.head.as_deref()
    }

    pub fn head_mut(&mut self) -> Option<&mut Node<K, V>> {
        self.head.as_deref_mut()
    }

    /// 从头到尾遍历键值对
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            cursor: self.head(),
            remaining: self.size,
        }
    }

    /// 按从头到尾的顺序取出全部键值对
    pub fn into_entries(self) -> IntoEntries<K, V> {
        IntoEntries { list: self }
    }

    fn pop_front(&mut self) -> Option<(K, V)> {
        self.head.take().map(|removed| {
            let Node { key, value, next } = *removed;
            self.head = next;
            self.size -= 1;
            (key, value)
        })
    }
}

impl<K, V> Default for BucketList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// 逐个释放节点，避免长链在递归析构时耗尽栈空间
impl<K, V> Drop for BucketList<K, V> {
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BucketList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, K, V> IntoIterator for &'a BucketList<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// 桶链表的借用迭代器
pub struct Iter<'a, K, V> {
    cursor: Option<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cursor?;
        self.cursor = node.next();
        self.remaining -= 1;
        Some(node.entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// 桶链表的所有权迭代器
pub struct IntoEntries<K, V> {
    list: BucketList<K, V>,
}

impl<K, V> Iterator for IntoEntries<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.size, Some(self.list.size))
    }
}

impl<K, V> ExactSizeIterator for IntoEntries<K, V> {}
impl<K, V> FusedIterator for IntoEntries<K, V> {}
