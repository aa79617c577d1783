const NUM_OF_OPERATIONS: usize = 5_000;
const KEY_RANGE: u32 = 500;

macro_rules! bst_set_tests {
    ($($module_name:ident: $type_name:ident [$($check:ident),*],)*) => {
        $(
            mod $module_name {
                use balanced_trees::bst::Order;
                use balanced_trees::$module_name::$type_name;
                use rand::Rng;
                use std::collections::BTreeSet;
                use super::{KEY_RANGE, NUM_OF_OPERATIONS};

                #[test]
                fn int_test_set() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut set = $type_name::new();
                    let mut expected = BTreeSet::new();

                    for _ in 0..NUM_OF_OPERATIONS {
                        let key = rng.gen_range(0, KEY_RANGE);

                        if rng.gen::<bool>() {
                            assert_eq!(set.insert(key), expected.insert(key));
                        } else {
                            assert_eq!(set.remove(&key), expected.remove(&key));
                        }

                        assert_eq!(set.len(), expected.len());
                        assert_eq!(set.contains(&key), expected.contains(&key));
                        $(assert!(set.$check());)*
                    }

                    assert_eq!(
                        set.iter().collect::<Vec<&u32>>(),
                        expected.iter().collect::<Vec<&u32>>(),
                    );
                    assert_eq!(set.show(Order::In), expected.iter().collect::<Vec<&u32>>());
                    assert_eq!(set.min(), expected.iter().next());
                    assert_eq!(set.max(), expected.iter().next_back());
                }

                #[test]
                fn int_test_round_trip() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([2, 2, 2, 2]);
                    let mut keys: Vec<u32> = (0..1_000).collect();
                    rng.shuffle(&mut keys);

                    let mut set = $type_name::new();
                    for key in &keys {
                        assert!(set.insert(*key));
                    }
                    $(assert!(set.$check());)*

                    rng.shuffle(&mut keys);
                    for key in &keys {
                        assert!(set.remove(key));
                        $(assert!(set.$check());)*
                    }

                    assert!(set.is_empty());
                    assert!(set.root().is_none());
                    assert_eq!(set.height(), 0);
                }

                #[test]
                fn int_test_duplicates_keep_shape() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([3, 3, 3, 3]);
                    let mut set = $type_name::new();
                    for _ in 0..200 {
                        set.insert(rng.gen_range(0, 1_000));
                    }

                    let keys = set.iter().cloned().collect::<Vec<u32>>();
                    let shape = set.show(Order::Pre).into_iter().cloned().collect::<Vec<u32>>();
                    for key in &keys {
                        assert!(!set.insert(*key));
                    }
                    assert_eq!(set.len(), keys.len());
                    assert_eq!(set.show(Order::Pre), shape.iter().collect::<Vec<&u32>>());
                }
            }
        )*
    }
}

bst_set_tests!(
    bst: BstSet [is_consistent],
    avl_tree: AvlSet [is_balanced],
    red_black_tree: RedBlackSet [validate_properties, is_consistent],
);
