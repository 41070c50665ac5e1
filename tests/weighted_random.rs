use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wabi_toolkit::{Error, WeightedRandom};

#[test]
fn frequencies_follow_weights() {
    const DRAWS: u64 = 200_000;

    let weights = [1u64, 2, 3, 4];
    let weighted = WeightedRandom::try_from_iter(weights.iter().copied().enumerate()).unwrap();
    assert_eq!(weighted.total_weight(), 10);

    let mut rng = SmallRng::seed_from_u64(0xfeed);
    let mut hits = [0u64; 4];
    for _ in 0..DRAWS {
        hits[*weighted.sample_with(&mut rng).unwrap()] += 1;
    }

    for (item, (&count, &weight)) in hits.iter().zip(&weights).enumerate() {
        let expected = DRAWS * weight / 10;
        assert!(count.abs_diff(expected) < expected / 20, "item {item} drawn {count} times, expected ~{expected}");
    }
}

#[test]
fn invalid_weights_leave_collection_unchanged() {
    let mut weighted = WeightedRandom::try_from_iter([('a', 3), ('b', 4)]).unwrap();
    assert!(matches!(weighted.push('c', 0), Err(Error::InvalidArgument(_))));
    assert!(matches!(weighted.push('c', u64::MAX), Err(Error::InvalidArgument(_))));
    assert_eq!(weighted.len(), 2);
    assert_eq!(weighted.total_weight(), 7);
    assert_eq!(weighted.iter().collect::<Vec<_>>(), vec![(&'a', 3), (&'b', 4)]);
}

#[test]
fn try_from_iter_stops_at_first_error() {
    let result = WeightedRandom::try_from_iter([("x", 1), ("y", 0), ("z", 1)]);
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[cfg(feature = "std")]
#[test]
fn thread_rng_sampling_returns_members() {
    let weighted = WeightedRandom::try_from_iter([(1, 5), (2, 5)]).unwrap();
    for _ in 0..100 {
        assert!([1, 2].contains(weighted.sample().unwrap()));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Every draw lands on a pushed item and the total weight adds up.
    #[test]
    fn samples_are_members(weights in proptest::collection::vec(1u64..1_000, 1..200), seed in any::<u64>()) {
        let weighted = WeightedRandom::try_from_iter(weights.iter().copied().enumerate()).unwrap();
        prop_assert_eq!(weighted.total_weight(), weights.iter().sum::<u64>());
        prop_assert_eq!(weighted.len(), weights.len());

        let mut rng = SmallRng::seed_from_u64(seed);
        for _ in 0..100 {
            let item = *weighted.sample_with(&mut rng).unwrap();
            prop_assert!(item < weights.len());
        }
    }
}
