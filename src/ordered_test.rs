use std::time::{SystemTime, UNIX_EPOCH};

use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::error::Error;
use crate::ordered::OrderedTree;
use crate::tree::SearchTree;

#[test]
fn test_insert() {
    let mut bst: OrderedTree<i64> = OrderedTree::new();
    assert!(bst.min().is_none());
    for key in [5, 3, 8, 1, 4, 7, 9].iter() {
        bst.insert(*key).unwrap();
    }
    let root = bst.root().unwrap();
    assert_eq!(root.to_string(), "5");
    assert_eq!(*root.left().unwrap().element(), 3);
    assert_eq!(*root.right().unwrap().element(), 8);
    assert_eq!(bst.depth(), 2);
    assert_eq!(bst.min(), Some(&1));
    assert_eq!(bst.max(), Some(&9));
    assert_eq!(*bst.last_inserted().unwrap().element(), 9);

    let items: Vec<i64> = bst.iter().cloned().collect();
    assert_eq!(items, vec![1, 3, 4, 5, 7, 8, 9]);
    let stats = bst.validate().unwrap();
    assert_eq!(stats.entries(), 7);
    assert_eq!(stats.depths().unwrap().samples(), 4);
}

#[test]
fn test_insert_absent() {
    let mut bst: OrderedTree<i64> = OrderedTree::new();
    match bst.insert(None) {
        Err(Error::InvalidArgument(_)) => (),
        res => panic!("unexpected {:?}", res),
    }
    assert_eq!(bst.len(), 0);
    assert!(bst.root().is_none());
}

#[test]
fn test_ties_go_left() {
    let bst: OrderedTree<i64> = [5, 5, 5].iter().cloned().collect();
    let root = bst.root().unwrap();
    assert!(!root.has_right());
    let left = root.left().unwrap();
    assert_eq!(*left.element(), 5);
    assert!(left.has_left());
    assert_eq!(left.left().unwrap().depth(), 2);
    assert_eq!(bst.search(&5).unwrap().id(), root.id());
    assert!(bst.validate().is_ok());
}

#[test]
fn test_degenerate() {
    let bst: OrderedTree<i64> = (0..10_000).collect();
    assert_eq!(bst.depth(), 9_999);
    assert_eq!(bst.get(&9_999).unwrap().depth(), 9_999);
    let stats = bst.validate().unwrap();
    assert_eq!(stats.depths().unwrap().max(), 9_999);
    assert_eq!(bst.iter().count(), 10_000);
}

#[test]
fn test_rotate() {
    let mut bst: OrderedTree<i64> = [5, 3, 8].iter().cloned().collect();
    let root = bst.root().unwrap().id();

    bst.rotate_left(root).unwrap();
    let top = bst.root().unwrap();
    assert_eq!(*top.element(), 8);
    assert!(!top.has_parent());
    let five = top.left().unwrap();
    assert_eq!(five.id(), root);
    assert_eq!(five.parent().unwrap().id(), top.id());
    assert_eq!(*five.left().unwrap().element(), 3);
    assert!(!five.has_right());
    assert!(bst.validate().is_ok());

    // no left child under 3, rotate right is a no-op.
    let three = bst.search(&3).unwrap().id();
    bst.rotate_right(three).unwrap();
    assert_eq!(bst.vertex(three).unwrap().depth(), 2);

    let top = bst.root().unwrap().id();
    bst.rotate_right(top).unwrap();
    assert_eq!(bst.root().unwrap().id(), root);
    assert_eq!(bst.iter().cloned().collect::<Vec<i64>>(), vec![3, 5, 8]);
    assert!(bst.validate().is_ok());
}

#[test]
fn test_rotate_inner() {
    let mut bst: OrderedTree<i64> = [50, 30, 70, 20, 40, 35, 45].iter().cloned().collect();
    let thirty = bst.search(&30).unwrap().id();
    bst.rotate_left(thirty).unwrap();

    let root = bst.root().unwrap();
    let forty = root.left().unwrap();
    assert_eq!(*forty.element(), 40);
    assert_eq!(forty.parent().unwrap().id(), root.id());
    let thirty = forty.left().unwrap();
    assert_eq!(*thirty.element(), 30);
    assert_eq!(*thirty.right().unwrap().element(), 35);
    assert_eq!(thirty.right().unwrap().parent().unwrap().id(), thirty.id());
    assert!(bst.validate().is_ok());
}

#[test]
fn test_rotate_stale() {
    let mut bst: OrderedTree<i64> = (0..3).collect();
    let id = bst.search(&2).unwrap().id();
    bst.delete(&2);
    match bst.rotate_left(id) {
        Err(Error::NotFound(_)) => (),
        res => panic!("unexpected {:?}", res),
    }
}

#[test]
fn test_delete() {
    let mut bst: OrderedTree<i64> = [5, 3, 8, 1, 4, 7, 9].iter().cloned().collect();

    assert_eq!(bst.delete(&6), None);
    assert_eq!(bst.len(), 7);

    // two children, in-order predecessor takes its place.
    let root = bst.root().unwrap().id();
    assert_eq!(bst.delete(&5), Some(5));
    assert_eq!(bst.root().unwrap().id(), root);
    assert_eq!(*bst.root().unwrap().element(), 4);

    // only a left child, 1 moves up into the vertex that held 3.
    let three = bst.search(&3).unwrap().id();
    assert_eq!(bst.delete(&3), Some(3));
    let left = bst.root().unwrap().left().unwrap();
    assert_eq!(left.id(), three);
    assert_eq!(*left.element(), 1);
    assert!(left.is_leaf());
    assert_eq!(left.parent().unwrap().id(), root);
    let items: Vec<i64> = bst.iter().cloned().collect();
    assert_eq!(items, vec![1, 4, 7, 8, 9]);
    assert!(bst.validate().is_ok());

    for key in [1, 4, 7, 8, 9].iter() {
        assert_eq!(bst.delete(key), Some(*key));
    }
    assert!(bst.is_empty());
    assert!(bst.last_inserted().is_none());
    assert!(bst.validate().is_ok());
}

#[test]
fn test_delete_empty() {
    let mut bst: OrderedTree<i64> = OrderedTree::new();
    assert_eq!(bst.delete(&1), None);
    assert_eq!(bst.len(), 0);
}

#[test]
fn test_crud() {
    let size = 500;
    let mut rng = make_rng();
    let mut bst: OrderedTree<i64> = OrderedTree::new();
    let mut refns = RefNodes::new();

    for _ in 0..10_000 {
        let key: i64 = rng.gen::<i64>().rem_euclid(size);
        match rng.gen::<u8>() % 4 {
            0 | 1 => {
                bst.insert(key).unwrap();
                refns.insert(key);
            }
            2 => assert_eq!(bst.delete(&key), refns.delete(key)),
            3 => {
                if let Some(vertex) = bst.search(&key) {
                    let id = vertex.id();
                    if rng.gen::<bool>() {
                        bst.rotate_left(id).unwrap();
                    } else {
                        bst.rotate_right(id).unwrap();
                    }
                }
            }
            op => panic!("unreachable {}", op),
        };
        assert_eq!(bst.contains(&key), refns.contains(key));
        assert_eq!(bst.len(), refns.len());
        assert!(bst.validate().is_ok());
    }

    assert_same_iter(bst.iter(), &refns);
    assert_same_iter((&bst).into_iter(), &refns);
}

proptest! {
    #[test]
    fn prop_rotations_keep_order(keys in prop::collection::vec(0_i64..100, 1..200),
                                 turns in prop::collection::vec((0_i64..100, any::<bool>()), 0..100)) {
        let mut bst: OrderedTree<i64> = keys.iter().cloned().collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        for (key, left) in turns.iter() {
            let id = match bst.search(key) {
                Some(vertex) => vertex.id(),
                None => continue,
            };
            if *left {
                prop_assert!(bst.rotate_left(id).is_ok());
            } else {
                prop_assert!(bst.rotate_right(id).is_ok());
            }
        }
        prop_assert!(bst.validate().is_ok());
        let items: Vec<i64> = bst.iter().cloned().collect();
        prop_assert_eq!(items, sorted);
    }
}

include!("./ref_test.rs");
