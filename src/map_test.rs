use std::ops::Bound;

use rand::prelude::random;

use crate::error::Error;
use crate::map::TreeMap;

#[test]
fn test_overwrite() {
    let mut map: TreeMap<String, i64> = TreeMap::new("test-map");
    assert!(map.is_empty());

    assert!(map.insert("a".to_string(), 1).1);
    assert!(map.insert("b".to_string(), 2).1);
    let (id, inserted) = map.insert("a".to_string(), 3);
    assert!(!inserted);
    assert_eq!(map.node(id).unwrap().key(), "a");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get("a"), Ok(&3));
    assert_eq!(map.get("b"), Ok(&2));
    assert_eq!(map.get("c"), Err(Error::KeyNotFound));
    assert!(map.validate().is_ok());
}

#[test]
fn test_accumulator() {
    let mut map: TreeMap<&str, i64> =
        TreeMap::new("test-map").with_accumulator(|old: &i64, new| old + new);
    let words = "the cat and the dog and the bird";
    map.load(words.split(' ').map(|word| (word, 1)));

    let items: Vec<(&str, i64)> = map.items().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(
        items,
        vec![("and", 2), ("bird", 1), ("cat", 1), ("dog", 1), ("the", 3)]
    );
    assert_eq!(map.values().sum::<i64>(), 8);

    let acc = |old: &Vec<i64>, new: Vec<i64>| {
        let mut acc = old.clone();
        acc.extend(new);
        acc
    };
    let mut map: TreeMap<i64, Vec<i64>> = TreeMap::new("test-map").with_accumulator(acc);
    map.insert(1, vec![10]);
    map.insert(2, vec![20]);
    map.insert(1, vec![11, 12]);
    assert_eq!(map.get(&1), Ok(&vec![10, 11, 12]));
    assert_eq!(map.get(&2), Ok(&vec![20]));
}

#[test]
fn test_get_or_default() {
    let mut map: TreeMap<i64, String> = TreeMap::new("test-map");
    map.insert(1, "one".to_string());
    assert_eq!(map.get_or_default(&1), Ok("one".to_string()));
    assert_eq!(map.get_or_default(&2), Err(Error::KeyNotFound));

    let mut map = map.with_default(|| "none".to_string());
    assert_eq!(map.get_or_default(&1), Ok("one".to_string()));
    assert_eq!(map.get_or_default(&2), Ok("none".to_string()));
    // missing keys are not inserted.
    assert_eq!(map.len(), 1);
    assert!(!map.contains(&2));

    map.insert(2, "two".to_string());
    assert_eq!(map.get_or_default(&2), Ok("two".to_string()));
}

#[test]
fn test_get_mut_remove() {
    let mut map: TreeMap<i64, i64> = TreeMap::new("test-map");
    map.load((0..10).map(|key| (key, key * 10)));

    *map.get_mut(&3).unwrap() += 1;
    assert_eq!(map.get(&3), Ok(&31));
    assert_eq!(map.get_mut(&11).err(), Some(Error::KeyNotFound));

    assert_eq!(map.remove(&3), Ok(31));
    assert_eq!(map.remove(&3), Err(Error::KeyNotFound));
    assert_eq!(map.len(), 9);
    assert!(map.validate().is_ok());

    let tree = map.into_tree();
    assert_eq!(tree.len(), 9);
    assert_eq!(tree.get(&4).unwrap().value(), &40);
}

#[test]
fn test_payload_travels() {
    // removing nodes with two children moves entries between nodes,
    // values must stay with their keys.
    let mut map: TreeMap<i64, i64> = TreeMap::new("test-map");
    map.load((0..1000).map(|key| (key, key * 10)));

    for key in (0..1000).filter(|key| key % 3 == 0) {
        assert_eq!(map.remove(&key), Ok(key * 10));
    }
    assert!(map.validate().is_ok());
    for (key, value) in map.items() {
        assert_ne!(key % 3, 0);
        assert_eq!(*value, key * 10);
    }
    assert_eq!(map.len(), 666);
}

#[test]
fn test_crud() {
    let size = 1000;
    let mut map: TreeMap<i64, i64> = TreeMap::new("test-map");
    let mut refns = RefNodes::new(size);

    for _ in 0..100_000 {
        let key = (random::<u64>() % (size as u64)) as i64;
        match random::<u8>() % 3 {
            0 => {
                let value = random::<i64>();
                let (_, inserted) = map.insert(key, value);
                assert_eq!(inserted, refns.set(key, value).is_none());
            }
            1 => assert_eq!(map.remove(&key).ok(), refns.delete(key)),
            2 => assert_eq!(map.get(&key).ok().cloned(), refns.get(key)),
            op => panic!("unreachable {}", op),
        }
        assert_eq!(map.len(), refns.len());
    }
    assert!(map.validate().is_ok());

    let items: Vec<(i64, i64)> = map.items().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(items, refns.iter().collect::<Vec<(i64, i64)>>());

    // read-only queries of the underlying index.
    for _ in 0..100 {
        let (low, high) = random_low_high(size);
        let keys: Vec<i64> = map.range((low, high)).map(|n| *n.key()).collect();
        let refkeys: Vec<i64> = refns.range(low, high).map(|(k, _)| k).collect();
        assert_eq!(keys, refkeys);
    }
    if let Some((key, _)) = refns.iter().next() {
        assert_eq!(map.first().map(|n| *n.key()), Some(key));
    }
}

include!("./ref_test.rs");
