use partmap::{PartitionedMap, PartitionedMapBuilder};
use std::thread;

#[test]
fn test_partition_isolation() {
    let map = PartitionedMap::new(4).unwrap();

    for i in 0..100 {
        map.insert(format!("key_{}", i), i);
    }

    let loads = map.partition_loads();
    assert_eq!(loads.len(), 4);
    assert_eq!(loads.iter().sum::<usize>(), 100);

    // Each key lives in exactly the partition its hash routes to
    let mut expected = vec![0usize; 4];
    for i in 0..100 {
        expected[map.partition_of(&format!("key_{}", i))] += 1;
    }
    assert_eq!(loads, expected);
}

#[test]
fn test_deterministic_partition_assignment() {
    let map1 = PartitionedMapBuilder::new()
        .partition_count(5)
        .unwrap()
        .build::<String, i32>()
        .unwrap();

    let map2 = PartitionedMapBuilder::new()
        .partition_count(5)
        .unwrap()
        .build::<String, i32>()
        .unwrap();

    for i in 0..50 {
        let key = format!("key_{}", i);
        assert_eq!(map1.partition_of(&key), map2.partition_of(&key));
        map1.insert(key.clone(), i);
        map2.insert(key, i);
    }

    assert_eq!(map1.partition_loads(), map2.partition_loads());
}

#[test]
fn test_routing_survives_erase_and_clear() {
    let map = PartitionedMap::new(3).unwrap();
    let key = "stable".to_string();
    let before = map.partition_of(&key);

    map.insert(key.clone(), 1);
    map.erase(&key);
    map.insert(key.clone(), 2);
    map.clear();

    assert_eq!(map.partition_of(&key), before);
}

#[test]
fn test_partition_distribution() {
    let map = PartitionedMap::new(16).unwrap();

    for i in 0..1000 {
        map.insert(format!("key_{}", i), i);
    }

    let loads = map.partition_loads();
    let max = *loads.iter().max().unwrap();
    let min = *loads.iter().min().unwrap();

    // ~62 keys per partition expected
    assert!(max < 100, "Partition distribution too uneven (max: {})", max);
    assert!(min > 30, "Partition distribution too uneven (min: {})", min);
}

#[test]
fn test_other_partitions_writable_during_scan() {
    let map = PartitionedMap::new(4).unwrap();
    let a = 0u32;
    let b = (1..1000u32)
        .find(|k| map.partition_of(k) != map.partition_of(&a))
        .unwrap();
    map.insert(a, 1);

    let mut checked = false;
    map.for_each(|v| {
        if *v != 1 {
            // b's value, if its partition is scanned after the insert
            return;
        }
        // a's partition is read-locked here; b's partition must stay free
        let (inserted, found) = thread::scope(|s| {
            s.spawn(|| (map.insert(b, 2), map.find(&b)))
                .join()
                .unwrap()
        });
        assert!(inserted);
        assert_eq!(found, Some(2));
        checked = true;
    });

    assert!(checked);
    assert_eq!(map.count(), 2);
}
