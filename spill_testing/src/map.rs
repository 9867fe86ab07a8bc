//! Utilities for testing map implementations.
use crate::generate::Generate;
use rand::Rng;
pub use spill_core::HashMap;
use std::collections::HashSet;
use std::fmt::Debug;

/// Generates unique keys paired with random values.
pub fn generate_map_data<R: Rng, V: Generate<R>>(
    rng: &mut R,
    size: usize,
    key_params: &<String as Generate<R>>::GenerateParams,
    val_params: &V::GenerateParams,
) -> Box<[(String, V)]> {
    let keys = String::generate_many(rng, key_params, size).into_vec();
    keys.into_iter()
        .map(|key| {
            let value = V::generate(rng, val_params);
            (key, value)
        })
        .collect::<Vec<_>>()
        .into_boxed_slice()
}

/// Inserts every pair of `data` into `map` checking that none of the keys was present.
pub fn fill<V: Clone + Debug, M: HashMap<V>>(map: &mut M, data: &[(String, V)]) {
    for (i, (key, val)) in data.iter().enumerate() {
        let previous = map.insert(key.as_str(), val.clone()).unwrap();
        assert!(previous.is_none(), "Key: {:?}, previous: {:?}", key, previous);
        assert_eq!(map.len(), i + 1);
    }
}

/// Tests key retrieval for a given map.
pub fn test_get<R, V, M>(rng: &mut R, map: &M, data: &[(String, V)])
where
    R: Rng,
    String: Generate<R>,
    V: PartialEq + Debug,
    M: HashMap<V>,
{
    let keys: HashSet<&str> = data.iter().map(|(k, _)| k.as_str()).collect();

    for (key, val) in data {
        assert_eq!(map.get(key).unwrap(), Some(val), "Key: {:?}", key);
    }
    let mut non_existent_keys = Vec::new();
    for _ in 0..data.len().div_ceil(3) {
        loop {
            let key = String::generate(rng, &<String as Generate<R>>::GenerateParams::default());
            if !keys.contains(key.as_str()) {
                non_existent_keys.push(key);
                break;
            }
        }
    }
    for key in non_existent_keys {
        assert_eq!(map.get(&key).unwrap(), None, "Key: {:?}", key);
    }
}

/// Tests that overwriting present keys replaces their values without changing the size.
pub fn test_update<V, M, F>(map: &mut M, data: &[(String, V)], update: F)
where
    V: Clone + PartialEq + Debug,
    M: HashMap<V>,
    F: Fn(&V) -> V,
{
    let len = map.len();
    for (key, val) in data.iter().step_by(2) {
        let previous = map.insert(key.as_str(), update(val)).unwrap();
        assert_eq!(previous.as_ref(), Some(val), "Key: {:?}", key);
    }
    assert_eq!(map.len(), len);

    for (i, (key, val)) in data.iter().enumerate() {
        let expected = if i % 2 == 0 { update(val) } else { val.clone() };
        assert_eq!(map.get(key).unwrap(), Some(&expected), "Key: {:?}", key);
    }
}

/// Generates tests for a table type with string keys and `u128` values.
///
/// # Parameters
///
/// - `name`: Suffix of the generated test functions.
/// - `factory`: A closure creating an empty table.
/// - `size`: Number of entries to test with, 9999 by default.
#[macro_export]
macro_rules! generate_table_tests {
    ($name:ident, $factory:expr $(,)?) => {
        $crate::generate_table_tests!($name, $factory, 9999);
    };
    ($name:ident, $factory:expr, $size:expr $(,)?) => {
        compose_idents::compose_idents!(test_fn = [test_build_get_table_, $name]; {
            #[test]
            fn test_fn() {
                use rand::SeedableRng;
                use rand_chacha::ChaCha20Rng;
                use $crate::map::*;

                let mut rng = ChaCha20Rng::from_os_rng();
                let data = generate_map_data::<_, u128>(
                    &mut rng,
                    $size,
                    &Default::default(),
                    &Default::default(),
                );
                let mut map = ($factory)();
                fill(&mut map, &data);
                test_get(&mut rng, &map, &data);
            }
        });

        compose_idents::compose_idents!(test_fn = [test_update_table_, $name]; {
            #[test]
            fn test_fn() {
                use rand::SeedableRng;
                use rand_chacha::ChaCha20Rng;
                use $crate::map::*;

                let mut rng = ChaCha20Rng::from_os_rng();
                let data = generate_map_data::<_, u128>(
                    &mut rng,
                    $size,
                    &Default::default(),
                    &Default::default(),
                );
                let mut map = ($factory)();
                fill(&mut map, &data);
                test_update(&mut map, &data, |val: &u128| val.wrapping_add(1));
            }
        });

        compose_idents::compose_idents!(test_fn = [test_get_empty_key_table_, $name]; {
            #[test]
            fn test_fn() {
                use rand::SeedableRng;
                use rand_chacha::ChaCha20Rng;
                use $crate::map::*;

                let mut rng = ChaCha20Rng::from_os_rng();
                let data = generate_map_data::<_, u128>(
                    &mut rng,
                    $size,
                    &Default::default(),
                    &Default::default(),
                );
                let mut map = ($factory)();
                assert_eq!(map.get("").unwrap(), None);

                fill(&mut map, &data);
                assert_eq!(map.get("").unwrap(), None);

                map.insert("", 0).unwrap();
                assert_eq!(map.get("").unwrap(), Some(&0));
                assert_eq!(map.len(), data.len() + 1);
            }
        });
    };
}
pub use generate_table_tests;
