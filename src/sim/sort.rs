//! Step-wise bubble sort over a row of bars
//!
//! One `step` runs comparisons until a single swap happens, so each tick the
//! viewer sees exactly one pair of bars trade places.

use rand::seq::SliceRandom;
use rand::Rng;

/// Default number of bars
pub const DEFAULT_BARS: usize = 105;

#[derive(Clone, Debug)]
pub struct BubbleSort {
    bars: Vec<usize>,
    index: usize,
    swapped_this_pass: bool,
    sorted: bool,
    last_swap: Option<usize>,
    comparisons: u64,
    swaps: u64,
}

impl BubbleSort {
    /// Bars `0..count` in order. Already sorted until shuffled.
    pub fn new(count: usize) -> Self {
        Self::from_bars((0..count).collect())
    }

    pub fn from_bars(bars: Vec<usize>) -> Self {
        Self {
            bars,
            index: 0,
            swapped_this_pass: false,
            sorted: false,
            last_swap: None,
            comparisons: 0,
            swaps: 0,
        }
    }

    /// Fisher–Yates shuffle; restarts the sort from the first pass
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut bars = std::mem::take(&mut self.bars);
        bars.shuffle(rng);
        *self = Self::from_bars(bars);
    }

    pub fn bars(&self) -> &[usize] {
        &self.bars
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Left index of the pair swapped by the last step
    pub fn last_swap(&self) -> Option<usize> {
        self.last_swap
    }

    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    pub fn swaps(&self) -> u64 {
        self.swaps
    }

    /// Compare forward until one swap happens. A pass without any swap marks
    /// the row sorted. Returns true when a swap was made.
    pub fn step(&mut self) -> bool {
        self.last_swap = None;
        while !self.sorted {
            if self.index + 1 >= self.bars.len() {
                if !self.swapped_this_pass {
                    self.sorted = true;
                    break;
                }
                self.index = 0;
                self.swapped_this_pass = false;
                continue;
            }

            let i = self.index;
            self.index += 1;
            self.comparisons += 1;
            if self.bars[i] > self.bars[i + 1] {
                self.bars.swap(i, i + 1);
                self.swapped_this_pass = true;
                self.swaps += 1;
                self.last_swap = Some(i);
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run_to_end(sort: &mut BubbleSort) -> u64 {
        let mut steps = 0;
        while sort.step() {
            steps += 1;
        }
        steps
    }

    #[test]
    fn one_swap_per_step() {
        let mut sort = BubbleSort::from_bars(vec![2, 1, 0]);
        assert!(sort.step());
        assert_eq!(sort.bars(), &[1, 2, 0]);
        assert_eq!(sort.last_swap(), Some(0));
        assert!(sort.step());
        assert_eq!(sort.bars(), &[1, 0, 2]);
        assert!(sort.step());
        assert_eq!(sort.bars(), &[0, 1, 2]);
        assert!(!sort.step());
        assert!(sort.is_sorted());
        assert_eq!(sort.last_swap(), None);
    }

    #[test]
    fn swap_count_equals_inversions() {
        let bars = vec![4, 0, 3, 1, 2];
        let inversions = (0..bars.len())
            .flat_map(|i| (i + 1..bars.len()).map(move |j| (i, j)))
            .filter(|&(i, j)| bars[i] > bars[j])
            .count() as u64;
        let mut sort = BubbleSort::from_bars(bars);
        assert_eq!(run_to_end(&mut sort), inversions);
        assert_eq!(sort.swaps(), inversions);
        assert_eq!(sort.bars(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn tiny_rows_finish_at_once() {
        for bars in [vec![], vec![0]] {
            let mut sort = BubbleSort::from_bars(bars);
            assert!(!sort.step());
            assert!(sort.is_sorted());
        }
    }

    #[test]
    fn shuffle_keeps_the_bars_and_restarts() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sort = BubbleSort::new(DEFAULT_BARS);
        run_to_end(&mut sort);
        assert!(sort.is_sorted());

        sort.shuffle(&mut rng);
        assert!(!sort.is_sorted());
        assert_eq!(sort.swaps(), 0);
        let mut seen = sort.bars().to_vec();
        seen.sort_unstable();
        assert_eq!(seen, (0..DEFAULT_BARS).collect::<Vec<_>>());

        run_to_end(&mut sort);
        assert!(sort.bars().windows(2).all(|w| w[0] < w[1]));
    }
}
