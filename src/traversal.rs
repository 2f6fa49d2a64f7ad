//! Lazy traversals over an [`OrderedTree`][crate::OrderedTree].
//!
//! Each iterator borrows the tree and yields `(&K, &V)` pairs. They keep their own stack (or queue,
//! for [`LevelOrder`]) of pending nodes instead of recursing, and they know exactly how many pairs
//! are left. Calling the traversal method again starts a fresh walk.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::ordered::Node;

/// Root, then left subtree, then right subtree. Created by
/// [`OrderedTree::preorder`][crate::OrderedTree::preorder].
pub struct Preorder<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Preorder<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>, len: usize) -> Self {
        Self {
            stack: root.into_iter().collect(),
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Preorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on first so left comes off first.
        self.stack.extend(node.right.node());
        self.stack.extend(node.left.node());
        self.remaining -= 1;
        Some(node.entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Left subtree, then root, then right subtree, i.e. ascending key order. Created by
/// [`OrderedTree::inorder`][crate::OrderedTree::inorder].
pub struct Inorder<'a, K, V> {
    /// The left spine of the unvisited part of the tree. The top is the next node to yield.
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Inorder<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>, len: usize) -> Self {
        let mut inorder = Self {
            stack: Vec::new(),
            remaining: len,
        };
        inorder.push_left_spine(root);
        inorder
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.node();
        }
    }
}

impl<'a, K, V> Iterator for Inorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.node());
        self.remaining -= 1;
        Some(node.entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Left subtree, then right subtree, then root. Created by
/// [`OrderedTree::postorder`][crate::OrderedTree::postorder].
pub struct Postorder<'a, K, V> {
    /// Pending nodes, flagged once their children have been pushed above them.
    stack: Vec<(&'a Node<K, V>, bool)>,
    remaining: usize,
}

impl<'a, K, V> Postorder<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>, len: usize) -> Self {
        Self {
            stack: root.into_iter().map(|node| (node, false)).collect(),
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Postorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, expanded)) = self.stack.pop() {
            if expanded {
                self.remaining -= 1;
                return Some(node.entry());
            }
            self.stack.push((node, true));
            self.stack.extend(node.right.node().map(|right| (right, false)));
            self.stack.extend(node.left.node().map(|left| (left, false)));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Breadth first, shallowest nodes first and left to right within a level. Created by
/// [`OrderedTree::level_order`][crate::OrderedTree::level_order].
pub struct LevelOrder<'a, K, V> {
    queue: VecDeque<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> LevelOrder<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>, len: usize) -> Self {
        Self {
            queue: root.into_iter().collect(),
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for LevelOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.children());
        self.remaining -= 1;
        Some(node.entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Implements the traits every traversal shares. `Clone` is written by hand so that cloning an
/// iterator doesn't require `K: Clone` or `V: Clone`.
macro_rules! traversal_traits {
    ($($traversal:ident { $pending:ident }),* $(,)?) => {
        $(
            impl<K, V> Clone for $traversal<'_, K, V> {
                fn clone(&self) -> Self {
                    Self {
                        $pending: self.$pending.clone(),
                        remaining: self.remaining,
                    }
                }
            }

            impl<K, V> ExactSizeIterator for $traversal<'_, K, V> {}

            impl<K, V> FusedIterator for $traversal<'_, K, V> {}
        )*
    };
}

traversal_traits! {
    Preorder { stack },
    Inorder { stack },
    Postorder { stack },
    LevelOrder { queue },
}
