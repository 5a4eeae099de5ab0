use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn unit_samples_stay_in_half_open_range() {
    let mut rng = Rng64::new(9);
    for _ in 0..1000 {
        let v = rng.next_f64();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn int_range_excludes_max_and_handles_empty() {
    let mut rng = Rng64::new(1);
    for _ in 0..500 {
        let v = rng.int_range(8, 12);
        assert!((8..12).contains(&v));
    }
    assert_eq!(rng.int_range(4, 4), 4);

    let mut top = SequenceRng::new(vec![0.999_999_999]);
    assert_eq!(top.int_range(0, 3), 2);
}

#[test]
fn sequence_rng_cycles_and_counts_draws() {
    let mut rng = SequenceRng::new(vec![0.25, 0.5]);
    assert_eq!(rng.next_f64(), 0.25);
    assert_eq!(rng.next_f64(), 0.5);
    assert_eq!(rng.next_f64(), 0.25);
    assert_eq!(rng.draws(), 3);
    assert_eq!(rng.range(10.0, 20.0), 15.0);
}

#[test]
fn shuffle_is_a_permutation() {
    let mut rng = Rng64::new(77);
    let mut items: Vec<u32> = (0..20).collect();
    rng.shuffle(&mut items);
    let mut sorted = items.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..20).collect::<Vec<_>>());
}

#[test]
fn shuffle_with_zero_samples_rotates_front_to_back() {
    // j is always 0: each step swaps position i with the head.
    let mut rng = SequenceRng::new(vec![0.0]);
    let mut items = vec!['a', 'b', 'c'];
    rng.shuffle(&mut items);
    assert_eq!(items, vec!['b', 'c', 'a']);
}

#[test]
fn pick_handles_empty_slices() {
    let mut rng = Rng64::new(3);
    let empty: [u8; 0] = [];
    assert!(rng.pick(&empty).is_none());
    assert_eq!(rng.pick(&[7]).copied(), Some(7));
}
