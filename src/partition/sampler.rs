use rand::Rng;

/// Weighted sampling without replacement over a fixed index range.
///
/// Keeps a cumulative weight table; a draw picks a uniform point in
/// `[0, total)` and binary-searches the table for the owning index.
#[derive(Debug, Clone)]
pub struct WeightedSampler {
    weights: Vec<u64>,
    cumulative: Vec<u64>,  // cumulative[i] = weights[0] + ... + weights[i]
}

impl WeightedSampler {
    pub fn new(weights: impl IntoIterator<Item = u64>) -> Self {
        let weights = weights.into_iter().collect::<Vec<_>>();
        let cumulative = weights.iter()
            .scan(0u64, |acc, &w| { *acc += w; Some(*acc) })
            .collect();
        Self { weights, cumulative }
    }

    /// Total weight still available for sampling.
    #[inline] pub fn total(&self) -> u64 { self.cumulative.last().copied().unwrap_or(0) }

    /// Current weight of an index (0 once removed).
    #[inline] pub fn weight(&self, index: usize) -> u64 { self.weights[index] }

    /// Draw an index with probability proportional to its weight.
    /// Returns `None` once all weight is exhausted.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        let total = self.total();
        if total == 0 { return None }
        let point = rng.random_range(0..total);
        Some(self.cumulative.partition_point(|&c| c <= point))
    }

    /// Zero out an index so it can no longer be drawn.
    pub fn remove(&mut self, index: usize) {
        let weight = std::mem::take(&mut self.weights[index]);
        if weight == 0 { return }
        self.cumulative[index..].iter_mut().for_each(|c| *c -= weight);
    }

    /// Draw and remove an index.
    pub fn take<R: Rng>(&mut self, rng: &mut R) -> Option<usize> {
        let index = self.sample(rng)?;
        self.remove(index);
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn zero_weight_entries_are_never_drawn() {
        let sampler = WeightedSampler::new([0, 5, 0, 5, 0]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let index = sampler.sample(&mut rng).unwrap();
            assert!(index == 1 || index == 3, "drew {index}");
        }
    }

    #[test]
    fn take_exhausts_without_repeats() {
        let mut sampler = WeightedSampler::new([3, 1, 4, 1, 5]);
        let mut rng = StdRng::seed_from_u64(11);

        let mut drawn = std::iter::from_fn(|| sampler.take(&mut rng)).collect::<Vec<_>>();
        assert_eq!(sampler.total(), 0);
        drawn.sort_unstable();
        assert_eq!(drawn, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn remove_updates_cumulative_table() {
        let mut sampler = WeightedSampler::new([2, 3, 4]);
        assert_eq!(sampler.total(), 9);
        sampler.remove(1);
        assert_eq!(sampler.cumulative, vec![2, 2, 6]);
        assert_eq!(sampler.weight(1), 0);
        sampler.remove(1);
        assert_eq!(sampler.total(), 6);
    }

    #[test]
    fn heavy_entries_dominate() {
        let sampler = WeightedSampler::new([1, 999]);
        let mut rng = StdRng::seed_from_u64(3);
        let heavy = (0..1000).filter(|_| sampler.sample(&mut rng) == Some(1)).count();
        assert!(heavy > 950, "heavy drawn {heavy} times");
    }

    #[test]
    fn empty_sampler_yields_nothing() {
        let sampler = WeightedSampler::new(Vec::new());
        assert_eq!(sampler.sample(&mut StdRng::seed_from_u64(0)), None);
    }
}
