//! An unbalanced BST that owns its nodes through `Box`ed links. Every key appears at most once and
//! the first value inserted for a key is the one that stays.
//!
//! Nothing here recurses: descent, height, cloning, teardown and the traversals all walk the tree
//! with loops and explicit stacks, so a degenerate tree (e.g. one built from sorted keys) is slow
//! but never overflows the call stack.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.get(&1), None);
//! assert!(tree.min().is_err());
//!
//! assert!(tree.insert(1, "one"));
//! assert_eq!(tree.get(&1), Some(&"one"));
//!
//! // The first value for a key wins.
//! assert!(!tree.insert(1, "uno"));
//! assert_eq!(tree.get(&1), Some(&"one"));
//!
//! assert!(tree.remove(&1));
//! assert_eq!(tree.get(&1), None);
//! assert!(!tree.remove(&1));
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::traversal::{Inorder, LevelOrder, Postorder, Preorder};

/// A Binary Search Tree mapping unique keys to values. See the [module docs][self] for an
/// overview.
pub struct OrderedTree<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for OrderedTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for OrderedTree<K, V> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<K, V> Clone for OrderedTree<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Deep copies every node. The copy has exactly the same shape as `self`.
    fn clone(&self) -> Self {
        let mut root = Link(None);
        {
            let mut pending: Vec<(&Node<K, V>, &mut Link<K, V>)> = Vec::new();
            if let Some(node) = self.root.node() {
                pending.push((node, &mut root));
            }
            while let Some((source, slot)) = pending.pop() {
                let copy = slot
                    .0
                    .insert(Box::new(Node::new(source.key.clone(), source.value.clone())));
                let Node { left, right, .. } = &mut **copy;
                if let Some(source_left) = source.left.node() {
                    pending.push((source_left, left));
                }
                if let Some(source_right) = source.right.node() {
                    pending.push((source_right, right));
                }
            }
        }
        Self {
            root,
            len: self.len,
        }
    }
}

impl<K, V> fmt::Debug for OrderedTree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inorder()).finish()
    }
}

/// Writes one `key: value` line per node in ascending key order.
impl<K, V> fmt::Display for OrderedTree<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inorder()
            .try_for_each(|(key, value)| writeln!(f, "{}: {}", key, value))
    }
}

impl<K, V> OrderedTree<K, V> {
    /// Generate a new, empty `OrderedTree`.
    pub fn new() -> Self {
        Self {
            root: Link(None),
            len: 0,
        }
    }

    /// The number of key/value pairs in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of nodes on the longest path from the root down to a leaf. An empty tree has
    /// height 0 and a single node has height 1.
    ///
    /// This walks the whole tree so it is `O(len)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// assert_eq!(tree.height(), 0);
    ///
    /// // Sorted inserts build a chain.
    /// for key in 0..4 {
    ///     tree.insert(key, ());
    /// }
    /// assert_eq!(tree.height(), 4);
    /// ```
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut level: Vec<&Node<K, V>> = self.root.node().into_iter().collect();
        while !level.is_empty() {
            height += 1;
            level = level.into_iter().flat_map(Node::children).collect();
        }
        height
    }

    /// The smallest key in the tree.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the tree has no nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Error, OrderedTree};
    ///
    /// let mut tree = OrderedTree::new();
    /// assert_eq!(tree.min(), Err(Error::EmptyTree { op: "min" }));
    ///
    /// tree.insert(2, ());
    /// tree.insert(1, ());
    /// assert_eq!(tree.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&K> {
        self.root
            .node()
            .map(|root| &root.leftmost().key)
            .ok_or(Error::EmptyTree { op: "min" })
    }

    /// The largest key in the tree.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the tree has no nodes.
    pub fn max(&self) -> Result<&K> {
        self.root
            .node()
            .map(|root| &root.rightmost().key)
            .ok_or(Error::EmptyTree { op: "max" })
    }

    /// Releases every node, leaving an empty tree.
    pub fn clear(&mut self) {
        if !self.is_empty() {
            debug!(len = self.len, "clearing tree");
        }
        self.release();
    }

    /// Visits root, then left subtree, then right subtree.
    pub fn preorder(&self) -> Preorder<'_, K, V> {
        Preorder::new(self.root.node(), self.len)
    }

    /// Visits left subtree, then root, then right subtree. This yields keys in ascending order.
    pub fn inorder(&self) -> Inorder<'_, K, V> {
        Inorder::new(self.root.node(), self.len)
    }

    /// Visits left subtree, then right subtree, then root.
    pub fn postorder(&self) -> Postorder<'_, K, V> {
        Postorder::new(self.root.node(), self.len)
    }

    /// Visits the tree breadth first: the root, then its children left to right, then their
    /// children, and so on.
    pub fn level_order(&self) -> LevelOrder<'_, K, V> {
        LevelOrder::new(self.root.node(), self.len)
    }

    /// Same as [`inorder`][Self::inorder].
    pub fn iter(&self) -> Inorder<'_, K, V> {
        self.inorder()
    }

    /// Finds the node with the given key and returns views of its key and value. If no node has
    /// the corresponding key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(String::from("k"), 2);
    ///
    /// assert_eq!(tree.find("k"), Some((&String::from("k"), &2)));
    /// assert_eq!(tree.find("missing"), None);
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut link = &self.root;
        while let Some(node) = link.node() {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => link = &node.left,
                Ordering::Equal => return Some(node.entry()),
                Ordering::Greater => link = &node.right,
            }
        }
        None
    }

    /// Potentially finds the value associated with the given key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|(_, value)| value)
    }

    /// Whether some node holds the given key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Inserts a new node for `key` and returns `true`. If the key is already present the tree is
    /// left untouched (the existing value is kept) and `false` is returned.
    pub fn insert(&mut self, key: K, value: V) -> bool
    where
        K: Ord,
    {
        let link = self.root.search_mut(&key);
        if link.0.is_some() {
            trace!(len = self.len, "insert rejected, key already present");
            return false;
        }

        link.0 = Some(Box::new(Node::new(key, value)));
        self.len += 1;
        true
    }

    /// Removes the node holding `key`, returning whether there was one.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).is_some()
    }

    /// Removes the node holding `key` and returns its key and value.
    ///
    /// A node with at most one child is replaced by that child. A node with two children keeps its
    /// place in the tree: its in-order successor is detached from the right subtree and moved into
    /// it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<_, _> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    ///
    /// assert_eq!(tree.remove_entry(&2), Some((2, 'b')));
    /// assert_eq!(tree.remove_entry(&2), None);
    /// assert_eq!(tree.inorder().collect::<Vec<_>>(), [(&1, &'a'), (&3, &'c')]);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let link = self.root.search_mut(key);
        let Some(mut node) = link.0.take() else {
            trace!(len = self.len, "remove ignored, key not present");
            return None;
        };

        let removed = match (node.left.take(), node.right.take()) {
            (Link(None), child) | (child, Link(None)) => {
                *link = child;
                let Node { key, value, .. } = *node;
                (key, value)
            }
            (left, Link(Some(right))) => {
                let (successor, right) = right.split_leftmost();
                let Node {
                    key: successor_key,
                    value: successor_value,
                    ..
                } = *successor;
                let key = mem::replace(&mut node.key, successor_key);
                let value = mem::replace(&mut node.value, successor_value);
                node.left = left;
                node.right = right;
                node.assert_children_ordered();
                *link = Link(Some(node));
                (key, value)
            }
        };

        debug_assert_ne!(self.len, 0, "removed a node from a tree of length 0");
        self.len -= 1;
        Some(removed)
    }

    /// Tears the tree down children first, one node at a time, so dropping a deep tree doesn't
    /// recurse.
    fn release(&mut self) {
        let mut pending: Vec<Box<Node<K, V>>> = self.root.take().0.into_iter().collect();
        while let Some(mut node) = pending.pop() {
            match (node.left.take(), node.right.take()) {
                (Link(None), Link(None)) => drop(node),
                (left, right) => {
                    // Revisit `node` as a leaf once both subtrees are gone.
                    pending.push(node);
                    pending.extend(right.0);
                    pending.extend(left.0);
                }
            }
        }
        self.len = 0;
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedTree<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// Inserts pairs in iteration order, so for a repeated key the earliest pair wins.
impl<K, V> Extend<(K, V)> for OrderedTree<K, V>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Inorder<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inorder()
    }
}

/// An owning pointer to a subtree, or nothing.
pub(crate) struct Link<K, V>(Option<Box<Node<K, V>>>);

impl<K, V> Link<K, V> {
    pub(crate) fn node(&self) -> Option<&Node<K, V>> {
        self.0.as_deref()
    }

    fn take(&mut self) -> Self {
        Link(self.0.take())
    }

    /// Walks down from `self` to the link holding `key`, or to the empty link where `key` would be
    /// inserted.
    fn search_mut<Q>(&mut self, key: &Q) -> &mut Self
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut link = self;
        loop {
            let ordering = match link.node() {
                Some(node) => key.cmp(node.key.borrow()),
                None => return link,
            };
            // Moving `link` into the match (instead of reborrowing it) lets the `Equal` arm hand
            // it back out.
            link = match (ordering, link) {
                (Ordering::Less, Link(Some(node))) => &mut node.left,
                (Ordering::Greater, Link(Some(node))) => &mut node.right,
                (_, link) => return link,
            };
        }
    }

    /// Detaches the leftmost node of this subtree, putting its right child in its place.
    fn take_leftmost(&mut self) -> Option<Box<Node<K, V>>> {
        let mut link = self;
        while link.node().is_some_and(|node| node.left.0.is_some()) {
            link = match link {
                Link(Some(node)) => &mut node.left,
                Link(None) => break,
            };
        }

        let mut leftmost = link.0.take()?;
        *link = leftmost.right.take();
        Some(leftmost)
    }
}

pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: Link(None),
            right: Link(None),
        }
    }

    pub(crate) fn entry(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    /// The present children, left first.
    pub(crate) fn children(&self) -> impl Iterator<Item = &Self> {
        self.left.node().into_iter().chain(self.right.node())
    }

    /// Splits the subtree rooted at `self` into its leftmost node and whatever remains.
    fn split_leftmost(mut self: Box<Self>) -> (Box<Self>, Link<K, V>) {
        match self.left.take_leftmost() {
            Some(leftmost) => (leftmost, Link(Some(self))),
            None => {
                let rest = self.right.take();
                (self, rest)
            }
        }
    }

    fn leftmost(&self) -> &Self {
        let mut node = self;
        while let Some(left) = node.left.node() {
            node = left;
        }
        node
    }

    fn rightmost(&self) -> &Self {
        let mut node = self;
        while let Some(right) = node.right.node() {
            node = right;
        }
        node
    }

    fn assert_children_ordered(&self)
    where
        K: Ord,
    {
        if cfg!(debug_assertions) {
            if let Some(left) = self.left.node() {
                assert!(left.key < self.key);
            }
            if let Some(right) = self.right.node() {
                assert!(self.key < right.key);
            }
        }
    }
}
