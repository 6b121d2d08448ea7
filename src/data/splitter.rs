// ============================================================
// Layer 4 - Train/Test Splitter
// ============================================================
// Shuffles samples with a seeded RNG and splits them into:
//   - Training set: used to update model weights
//   - Test set:     used for validation/early stopping and for
//                   the final accuracy report
//
// The test set holds ceil(n * test_fraction) samples and the
// training set the rest. The same seed and the same input order
// always give the same partition.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom on a
// StdRng seeded from a u64.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` with `seed` and split into (train, test).
///
/// # Arguments
/// * `samples`       - All available samples (consumed by this function)
/// * `test_fraction` - Proportion held out for testing, e.g. 0.2 = 20%
/// * `seed`          - RNG seed; fixes the partition
pub fn split_train_test<T>(mut samples: Vec<T>, test_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total   = samples.len();
    let n_test  = ((total as f64) * test_fraction.clamp(0.0, 1.0)).ceil() as usize;
    let n_train = total - n_test.min(total);

    // split_off(n) removes elements [n..] from the Vec and returns them
    let test = samples.split_off(n_train);

    tracing::debug!(
        "Dataset split (seed {}): {} train, {} test",
        seed,
        samples.len(),
        test.len(),
    );

    (samples, test)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test)     = split_train_test(items, 0.2, 42);
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(),  20);
    }

    #[test]
    fn test_test_size_rounds_up() {
        // 0.2 * 11 = 2.2 → 3 held out
        let items: Vec<usize> = (0..11).collect();
        let (train, test)     = split_train_test(items, 0.2, 42);
        assert_eq!(test.len(),  3);
        assert_eq!(train.len(), 8);
    }

    #[test]
    fn test_same_seed_same_partition() {
        let items: Vec<usize> = (0..100).collect();
        let (train_a, test_a) = split_train_test(items.clone(), 0.2, 42);
        let (train_b, test_b) = split_train_test(items,         0.2, 42);
        assert_eq!(train_a, train_b);
        assert_eq!(test_a,  test_b);
    }

    #[test]
    fn test_different_seed_different_partition() {
        let items: Vec<usize> = (0..100).collect();
        let (_, test_a) = split_train_test(items.clone(), 0.2, 42);
        let (_, test_b) = split_train_test(items,         0.2, 7);
        assert_ne!(test_a, test_b);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (mut train, test) = split_train_test(items, 0.3, 1);
        train.extend(test);
        train.sort_unstable();
        assert_eq!(train, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, test)     = split_train_test(items, 0.2, 42);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }
}
