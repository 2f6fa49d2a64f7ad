use ordered_tree::OrderedTree;

use std::collections::{BTreeMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a map.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in the map.
fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut OrderedTree<K, V>, map: &mut BTreeMap<K, V>)
where
    K: Clone + Ord,
    V: Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                bst.insert(k.clone(), v.clone());
                // The tree keeps the first value written for a key.
                map.entry(k.clone()).or_insert_with(|| v.clone());
            }
            Op::Remove(k) => {
                bst.remove(k);
                map.remove(k);
            }
        }
    }
}

/// Checks the whole-tree ordering invariant through an in-order walk.
fn strictly_ascending<K: Ord, V>(tree: &OrderedTree<K, V>) -> bool {
    let keys: Vec<_> = tree.inorder().map(|(k, _)| k).collect();
    keys.windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    let mut tree = OrderedTree::new();
    let mut map = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut map);
    tree.len() == map.len()
        && strictly_ascending(&tree)
        && map.keys().all(|key| tree.get(key) == map.get(key))
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }

    xs.iter().all(|x| tree.get(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.get(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    for delete in &deletes {
        tree.remove(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| tree.get(x).is_none())
        && still_present.iter().all(|x| tree.get(x).is_some())
        && strictly_ascending(&tree)
}

#[quickcheck]
fn duplicate_insert_changes_nothing(xs: Vec<(i8, i8)>, key: i8, value: i8) -> bool {
    let mut tree: OrderedTree<_, _> = xs.into_iter().collect();
    tree.insert(key, value);

    let before: Vec<_> = tree.preorder().map(|(k, v)| (*k, *v)).collect();
    let len = tree.len();

    !tree.insert(key, value.wrapping_add(1))
        && tree.len() == len
        && tree.preorder().map(|(k, v)| (*k, *v)).eq(before)
}

#[quickcheck]
fn remove_drops_exactly_one(xs: Vec<i8>, key: i8) -> bool {
    let mut tree: OrderedTree<_, _> = xs.iter().map(|x| (*x, ())).collect();
    let len = tree.len();

    if tree.remove(&key) {
        tree.len() == len - 1 && !tree.contains_key(&key) && !tree.remove(&key)
    } else {
        tree.len() == len && !xs.contains(&key)
    }
}

#[quickcheck]
fn copies_are_independent(xs: Vec<i8>, ops: Vec<Op<i8, i8>>) -> bool {
    let original: OrderedTree<_, _> = xs.iter().map(|x| (*x, *x)).collect();
    let snapshot: Vec<_> = original.level_order().map(|(k, v)| (*k, *v)).collect();

    let mut copy = original.clone();
    let mut model: BTreeMap<_, _> = original.iter().map(|(k, v)| (*k, *v)).collect();
    do_ops(&ops, &mut copy, &mut model);

    original.level_order().map(|(k, v)| (*k, *v)).eq(snapshot)
        && copy.inorder().map(|(k, v)| (*k, *v)).eq(model)
}

#[quickcheck]
fn originals_can_change_without_touching_copies(xs: Vec<i8>, ops: Vec<Op<i8, i8>>) -> bool {
    let mut original: OrderedTree<_, _> = xs.iter().map(|x| (*x, *x)).collect();
    let copy = original.clone();
    let snapshot: Vec<_> = copy.level_order().map(|(k, v)| (*k, *v)).collect();

    let mut model: BTreeMap<_, _> = original.iter().map(|(k, v)| (*k, *v)).collect();
    do_ops(&ops, &mut original, &mut model);

    copy.len() == snapshot.len()
        && copy.level_order().map(|(k, v)| (*k, *v)).eq(snapshot.iter().copied())
        && snapshot.iter().all(|(k, v)| copy.get(k) == Some(v))
        && original.inorder().map(|(k, v)| (*k, *v)).eq(model)
}

#[quickcheck]
fn height_bounds(xs: Vec<i8>) -> bool {
    let tree: OrderedTree<_, _> = xs.iter().map(|x| (*x, ())).collect();
    let len = tree.len();
    let height = tree.height();

    // A tree of `len` nodes is at least as tall as a perfect tree and at most a chain.
    let perfect = (usize::BITS - len.leading_zeros()) as usize;
    height <= len && height >= perfect
}
