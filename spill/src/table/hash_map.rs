//! Implements [`HashMap`] for [`BucketedHashTable`].
use super::bucket::Entry;
use super::core::hash_key;
use super::BucketedHashTable;
use spill_core::{HashMap, SpillError, StreamHasher};

impl<V, H: StreamHasher> HashMap<V> for BucketedHashTable<V, H> {
    fn insert<K: Into<String>>(&mut self, key: K, value: V) -> Result<Option<V>, SpillError> {
        let key = key.into();
        let hash = hash_key(self.hasher.get_mut(), &key)?;

        let previous = self.root.insert(Entry { hash, key, value });
        if previous.is_none() {
            self.len += 1;
        }
        Ok(previous)
    }

    fn get(&self, key: &str) -> Result<Option<&V>, SpillError> {
        let hash = hash_key(&mut *self.hasher.borrow_mut(), key)?;
        Ok(self.root.get(hash, key))
    }

    fn len(&self) -> usize {
        self.len
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn load_factor(&self) -> f64 {
        self.root.load_factor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::common::{bucket_index, fold_digest};
    use crate::hashing::Murmur3;
    use crate::table::SLOTS_PER_BUCKET;
    use rand::prelude::*;
    use rand_chacha::ChaCha20Rng;
    use spill_testing::*;
    use test_log::test;

    fn collide(num_buckets: usize, max_load_factor: f64) -> BucketedHashTable<String, FixedHasher> {
        BucketedHashTable::new(FixedHasher::new(&[1]), num_buckets, max_load_factor).unwrap()
    }

    generate_table_tests!(murmur3_small, || {
        BucketedHashTable::<u128, Murmur3>::new(Murmur3::with_seed(42), 2, 0.75).unwrap()
    });
    generate_table_tests!(murmur3_odd, || {
        BucketedHashTable::<u128, Murmur3>::new(Murmur3::default(), 7, 0.4).unwrap()
    });
    generate_table_tests!(murmur3_full_load, || {
        BucketedHashTable::<u128, Murmur3>::new(Murmur3::default(), 16, 1.0).unwrap()
    });
    generate_table_tests!(constant_digest, || {
        BucketedHashTable::<u128, FixedHasher>::new(FixedHasher::new(&[1]), 2, 0.75).unwrap()
    }, 500);

    #[test]
    fn test_insert_and_get() {
        let mut table = BucketedHashTable::new(Murmur3::default(), 8, 0.75).unwrap();
        assert_eq!(table.insert("key1", "value1").unwrap(), None);
        assert_eq!(table.insert("key2", "value2").unwrap(), None);
        assert_eq!(table.insert("key3", "value3").unwrap(), None);

        assert_eq!(table.get("key1").unwrap(), Some(&"value1"));
        assert_eq!(table.get("key2").unwrap(), Some(&"value2"));
        assert_eq!(table.get("key3").unwrap(), Some(&"value3"));
        assert_eq!(table.get("key4").unwrap(), None);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_overwrite_keeps_len() {
        let mut table = BucketedHashTable::new(Murmur3::default(), 8, 0.75).unwrap();
        assert_eq!(table.insert("key1", "value1").unwrap(), None);
        assert_eq!(table.insert("key1", "newValue1").unwrap(), Some("value1"));

        assert_eq!(table.get("key1").unwrap(), Some(&"newValue1"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_full_bucket_spills_into_overflow_level() {
        let mut table = collide(8, 0.75);
        for i in 1..=SLOTS_PER_BUCKET {
            table.insert(format!("key{i}"), format!("value{i}")).unwrap();
        }
        assert_eq!(table.overflow_depth(), 0);

        table.insert("key9", "value9".to_string()).unwrap();
        assert_eq!(table.overflow_depth(), 1);
        assert_eq!(table.num_buckets(), 8);
        assert_eq!(table.len(), 9);

        for i in 1..=9 {
            assert_eq!(
                table.get(&format!("key{i}")).unwrap(),
                Some(&format!("value{i}")),
                "key{i}"
            );
        }
        assert_eq!(table.get("key10").unwrap(), None);
    }

    #[test]
    fn test_overwrite_within_overflow_level() {
        let mut table = collide(8, 0.75);
        for i in 1..=9 {
            table.insert(format!("key{i}"), format!("value{i}")).unwrap();
        }
        assert_eq!(
            table.insert("key9", "updated".to_string()).unwrap(),
            Some("value9".to_string())
        );
        assert_eq!(table.len(), 9);
        assert_eq!(table.overflow_depth(), 1);
        assert_eq!(table.get("key9").unwrap(), Some(&"updated".to_string()));
    }

    #[test]
    fn test_load_factor_triggers_single_growth() {
        let mut table = collide(2, 0.40);
        for i in 1..=9 {
            table.insert(format!("key{i}"), format!("value{i}")).unwrap();
        }

        assert_eq!(table.num_buckets(), 4);
        assert_eq!(table.len(), 9);
        for i in 1..=9 {
            assert_eq!(
                table.get(&format!("key{i}")).unwrap(),
                Some(&format!("value{i}"))
            );
        }
    }

    #[test]
    fn test_growth_flattens_overflow_chain() {
        let mut table = BucketedHashTable::new(Murmur3::default(), 2, 0.5).unwrap();
        for i in 0..100 {
            table.insert(format!("key{i}"), i).unwrap();
        }
        assert!(table.num_buckets() > 2);

        let grown_buckets = table.num_buckets();
        for i in 100..1000 {
            table.insert(format!("key{i}"), i).unwrap();
        }
        assert!(table.num_buckets() > grown_buckets);

        let mut seen: Vec<usize> = table.iter().map(|(_, &v)| v).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..1000).collect::<Vec<_>>());
    }

    /// Maps every key to one of three digests.
    #[derive(Debug, Default)]
    struct CoarseHasher {
        acc: u8,
    }

    impl StreamHasher for CoarseHasher {
        type Digest = [u8; 1];

        fn write(&mut self, bytes: &[u8]) -> Result<(), SpillError> {
            for &byte in bytes {
                self.acc = (self.acc + byte % 3) % 3;
            }
            Ok(())
        }

        fn sum(&self) -> Self::Digest {
            [self.acc]
        }

        fn reset(&mut self) {
            self.acc = 0;
        }

        fn digest_size(&self) -> usize {
            1
        }

        fn block_size(&self) -> usize {
            1
        }
    }

    #[test]
    fn test_growth_with_overwrites_keeps_keys_unique() {
        for num_buckets in [2, 3, 5] {
            for max_load_factor in [0.05, 0.4, 0.75, 1.0] {
                let mut table =
                    BucketedHashTable::new(CoarseHasher::default(), num_buckets, max_load_factor)
                        .unwrap();
                let mut expected = std::collections::HashMap::new();

                for round in 0..3_usize {
                    for i in (round * 50)..(round * 50 + 200) {
                        let key = format!("key{i}");
                        assert_eq!(
                            table.insert(key.as_str(), i + round).unwrap(),
                            expected.insert(key, i + round)
                        );
                    }
                }

                assert_eq!(table.len(), expected.len());
                assert_eq!(table.iter().count(), expected.len());
                for (key, value) in &expected {
                    assert_eq!(
                        table.get(key).unwrap(),
                        Some(value),
                        "num_buckets: {num_buckets}, max_load_factor: {max_load_factor}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_get_on_empty_table() {
        let table = BucketedHashTable::<u32>::new(Murmur3::default(), 2, 0.75).unwrap();
        assert_eq!(table.get("").unwrap(), None);
        assert_eq!(table.get("key").unwrap(), None);
        assert!(table.is_empty());
        assert_eq!(table.overflow_depth(), 0);
    }

    #[test]
    fn test_deep_overflow_chain() {
        let mut table = collide(2, 1.0);
        let num_keys = SLOTS_PER_BUCKET * 500;
        for i in 0..num_keys {
            table.insert(format!("key{i}"), i.to_string()).unwrap();
        }

        assert_eq!(table.len(), num_keys);
        assert!(table.overflow_depth() > 0);
        assert_eq!(table.iter().count(), num_keys);
        for i in (0..num_keys).step_by(97) {
            assert_eq!(
                table.get(&format!("key{i}")).unwrap(),
                Some(&i.to_string())
            );
        }
        assert_eq!(table.get("missing").unwrap(), None);
    }

    #[test]
    fn test_get_mut_and_contains_key() {
        let mut table = collide(2, 1.0);
        for i in 0..40 {
            table.insert(format!("key{i}"), i.to_string()).unwrap();
        }

        if let Some(value) = table.get_mut("key33").unwrap() {
            value.push('!');
        }
        assert_eq!(table.get("key33").unwrap(), Some(&"33!".to_string()));
        assert!(table.contains_key("key0").unwrap());
        assert!(!table.contains_key("key40").unwrap());
        assert!(table.get_mut("key40").unwrap().is_none());
    }

    #[test]
    fn test_failed_hashing_leaves_table_unchanged() {
        let hasher = FailingHasher::new(Murmur3::default(), b"poison");
        let mut table = BucketedHashTable::new(hasher, 2, 0.4).unwrap();
        for i in 0..6 {
            table.insert(format!("key{i}"), i).unwrap();
        }
        let num_buckets = table.num_buckets();
        let load_factor = table.load_factor();

        assert!(matches!(
            table.insert("poison", 99),
            Err(SpillError::Hashing(_))
        ));
        assert!(matches!(table.get("poison"), Err(SpillError::Hashing(_))));

        assert_eq!(table.len(), 6);
        assert_eq!(table.num_buckets(), num_buckets);
        assert_eq!(table.load_factor(), load_factor);
        for i in 0..6 {
            assert_eq!(table.get(&format!("key{i}")).unwrap(), Some(&i));
        }
    }

    #[test]
    fn test_shared_hasher() {
        let mut hasher = Murmur3::with_seed(42);
        {
            let mut table = BucketedHashTable::new(&mut hasher, 4, 0.75).unwrap();
            table.insert("hello", 1).unwrap();
            assert_eq!(table.get("hello").unwrap(), Some(&1));
        }
        {
            let mut table = BucketedHashTable::new(&mut hasher, 4, 0.75).unwrap();
            assert_eq!(table.get("hello").unwrap(), None);
            table.insert("world", 2).unwrap();
        }
        assert!(hasher.is_empty());
    }

    #[test]
    fn test_hasher_left_in_seeded_state() {
        let mut table = BucketedHashTable::new(Murmur3::with_seed(42), 4, 0.75).unwrap();
        table.insert("hello", 1).unwrap();
        let _ = table.get("world").unwrap();

        let hasher = table.into_hasher();
        assert!(hasher.is_empty());
        assert_eq!(hasher.sum(), Murmur3::with_seed(42).sum());
    }

    #[test]
    fn test_debug_lists_entries() {
        let mut table = BucketedHashTable::new(Murmur3::default(), 2, 0.75).unwrap();
        table.insert("hello", 1).unwrap();
        let debug = format!("{:?}", table);
        assert!(debug.contains("BucketedHashTable"));
        assert!(debug.contains(r#""hello": 1"#));
    }

    #[test]
    fn test_murmur3_bucket_distribution() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let mut hasher = Murmur3::default();
        let num_buckets = 64;
        let keys = String::generate_many(&mut rng, &StringParams::new(1, 32), num_buckets * 256);

        let mut counts = vec![0_usize; num_buckets];
        for key in keys.iter() {
            hasher.reset();
            hasher.write(key.as_bytes()).unwrap();
            let hash = fold_digest(&hasher.sum());
            counts[bucket_index(hash, num_buckets)] += 1;
        }

        let statistic = bucket_uniformity(&counts);
        assert!(
            statistic.p_value > 0.001,
            "Buckets are not uniformly occupied: {:?}",
            statistic
        );
    }

    #[test]
    #[cfg_attr(not(feature = "_slow-tests"), ignore)]
    fn test_large_table_matches_std_map() {
        let mut rng = ChaCha20Rng::from_os_rng();
        let data = generate_map_data::<_, u64>(
            &mut rng,
            200_000,
            &StringParams::new(0, 24),
            &Default::default(),
        );

        let mut table = BucketedHashTable::new(Murmur3::with_seed(rng.random()), 2, 0.9).unwrap();
        let mut expected = std::collections::HashMap::new();
        for (key, value) in data.iter() {
            assert_eq!(
                table.insert(key.as_str(), *value).unwrap(),
                expected.insert(key.as_str(), *value)
            );
        }

        assert_eq!(table.len(), expected.len());
        assert_eq!(table.iter().count(), expected.len());
        for (key, value) in expected {
            assert_eq!(table.get(key).unwrap(), Some(&value), "Key: {:?}", key);
        }
    }
}
