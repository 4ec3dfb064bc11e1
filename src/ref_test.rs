// Reference multiset, elements kept sorted in a plain vector. Equal
// elements are allowed, like in the trees.
struct RefNodes {
    entries: Vec<i64>,
}

impl RefNodes {
    fn new() -> RefNodes {
        RefNodes { entries: vec![] }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn contains(&self, key: i64) -> bool {
        self.entries.binary_search(&key).is_ok()
    }

    fn insert(&mut self, key: i64) {
        let off = self.entries.partition_point(|item| *item <= key);
        self.entries.insert(off, key);
    }

    fn delete(&mut self, key: i64) -> Option<i64> {
        match self.entries.binary_search(&key) {
            Ok(off) => Some(self.entries.remove(off)),
            Err(_) => None,
        }
    }

    fn iter(&self) -> std::vec::IntoIter<i64> {
        self.entries.clone().into_iter()
    }
}

fn make_rng() -> SmallRng {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos() as u64;
    println!("seed {}", seed);
    SmallRng::seed_from_u64(seed)
}

fn assert_same_iter<'a, I>(iter: I, refns: &RefNodes)
where
    I: Iterator<Item = &'a i64>,
{
    let mut iter_ref = refns.iter();
    for item in iter {
        match iter_ref.next() {
            Some(ref_item) => assert_eq!(*item, ref_item),
            None => panic!("invalid item: {:?}", item),
        }
    }
    assert!(iter_ref.next().is_none());
}
