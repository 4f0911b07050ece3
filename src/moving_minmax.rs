use crate::{
    deque::BoundedDeque,
    wedge::{Max, Min, Sample, Wedge},
    Error, Result,
};
use num::Float;
use serde::{Deserialize, Serialize};

/// Which extrema a [`MovingMinMax`] tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Min,
    Max,
    Both,
}

impl Mode {
    fn tracks_min(self) -> bool {
        matches!(self, Mode::Min | Mode::Both)
    }
    fn tracks_max(self) -> bool {
        matches!(self, Mode::Max | Mode::Both)
    }
}

/// Minimum and/or maximum of the last `w` samples of a stream.
///
/// Each tracked extremum is kept in a wedge: a bounded deque of candidates that
/// is monotone in value from front to back. Every sample is pushed once and
/// popped at most once per wedge, so `update` is amortized O(1).
/// Both wedges are allocated in `new` and `update` never allocates.
///
/// Until `w` samples have been seen, the extrema are over all samples so far.
#[derive(Clone, Debug)]
pub struct MovingMinMax<V = f64> {
    w: usize,
    mode: Mode,
    /// Index of the next sample.
    n: usize,
    max_wedge: Option<BoundedDeque<Sample<V>>>,
    min_wedge: Option<BoundedDeque<Sample<V>>>,
}

impl<V: Float + Default> MovingMinMax<V> {
    /// Track the extrema selected by `mode` over windows of `w` samples.
    pub fn new(w: usize, mode: Mode) -> Result<Self> {
        if w == 0 {
            return Err(Error::invalid("w", "window width must be at least 1"));
        }
        let max_wedge = mode.tracks_max().then(|| BoundedDeque::try_new(w)).transpose()?;
        let min_wedge = mode.tracks_min().then(|| BoundedDeque::try_new(w)).transpose()?;
        tracing::debug!(w, ?mode, "new moving min/max");
        Ok(Self {
            w,
            mode,
            n: 0,
            max_wedge,
            min_wedge,
        })
    }

    pub fn both(w: usize) -> Result<Self> {
        Self::new(w, Mode::Both)
    }

    pub fn min_only(w: usize) -> Result<Self> {
        Self::new(w, Mode::Min)
    }

    pub fn max_only(w: usize) -> Result<Self> {
        Self::new(w, Mode::Max)
    }
}

impl<V: Float> MovingMinMax<V> {
    /// Add the next sample of the stream.
    #[inline(always)]
    pub fn update(&mut self, value: V) {
        let index = self.n;
        self.n += 1;
        let sample = Sample { index, value };

        // Expire before pushing, so a wedge never holds more than `w` samples.
        // The new sample itself can never be expired.
        if let Some(q) = &mut self.max_wedge {
            q.expire(index, self.w);
            q.push_candidate::<Max>(sample);
        }
        if let Some(q) = &mut self.min_wedge {
            q.expire(index, self.w);
            q.push_candidate::<Min>(sample);
        }
    }

    /// Add all samples of `it`, in order.
    pub fn extend(&mut self, it: impl IntoIterator<Item = V>) {
        for v in it {
            self.update(v);
        }
    }

    /// Minimum of the current window.
    pub fn min(&self) -> Result<V> {
        match &self.min_wedge {
            Some(q) => q.extremum(),
            None => Err(Error::invalid("mode", "minimum is not tracked in max mode")),
        }
    }

    /// Maximum of the current window.
    pub fn max(&self) -> Result<V> {
        match &self.max_wedge {
            Some(q) => q.extremum(),
            None => Err(Error::invalid("mode", "maximum is not tracked in min mode")),
        }
    }

    /// `max - min` of the current window. Requires [`Mode::Both`].
    pub fn range(&self) -> Result<V> {
        Ok(self.max()? - self.min()?)
    }

    /// Feed all of `values` and return the `(min, max)` after each one.
    /// Requires [`Mode::Both`].
    pub fn process(&mut self, values: &[V]) -> Result<Vec<(V, V)>> {
        if self.mode != Mode::Both {
            return Err(Error::invalid("mode", "process needs both extrema"));
        }
        let mut out = Vec::with_capacity(values.len());
        for &v in values {
            self.update(v);
            out.push((self.min()?, self.max()?));
        }
        Ok(out)
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of samples seen since construction or the last `reset`.
    pub fn count(&self) -> usize {
        self.n
    }

    /// Forget all samples. Keeps the allocated wedges.
    pub fn reset(&mut self) {
        tracing::trace!(w = self.w, n = self.n, "reset moving min/max");
        self.n = 0;
        if let Some(q) = &mut self.max_wedge {
            q.clear();
        }
        if let Some(q) = &mut self.min_wedge {
            q.clear();
        }
    }

    /// Candidates for the maximum, front (current maximum) to back.
    pub fn max_candidates(&self) -> impl Iterator<Item = Sample<V>> + '_ {
        self.max_wedge.iter().flat_map(|q| q.iter().copied())
    }

    /// Candidates for the minimum, front (current minimum) to back.
    pub fn min_candidates(&self) -> impl Iterator<Item = Sample<V>> + '_ {
        self.min_wedge.iter().flat_map(|q| q.iter().copied())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{generate_random_samples, offline};
    use itertools::Itertools;
    use rand::Rng;
    use rand_chacha::{rand_core::SeedableRng, ChaChaRng};

    const N: usize = 1000;

    /// Checks the wedge invariants after an update.
    fn check_wedges(m: &MovingMinMax<f64>) {
        let last = m.count() - 1;
        for (q, name) in [
            (m.max_candidates().collect_vec(), "max"),
            (m.min_candidates().collect_vec(), "min"),
        ] {
            assert!(q.len() <= m.width(), "{name} wedge exceeds w");
            for s in &q {
                assert!(
                    s.index + m.width() > last,
                    "{name} wedge keeps expired index {} at {last}",
                    s.index
                );
            }
            assert!(q.iter().tuple_windows().all(|(a, b)| a.index < b.index));
        }
        assert!(m
            .max_candidates()
            .tuple_windows()
            .all(|(a, b)| a.value >= b.value));
        assert!(m
            .min_candidates()
            .tuple_windows()
            .all(|(a, b)| a.value <= b.value));
    }

    #[test]
    fn matches_offline_for_all_widths() {
        let values = generate_random_samples(N, 123);
        for w in 1..N {
            let (mins, maxs) = offline::moving_min_max(&values, w).unwrap();
            let mut m = MovingMinMax::both(w).unwrap();
            for (i, &v) in values.iter().enumerate() {
                m.update(v);
                assert_eq!(m.min(), Ok(mins[i]), "w={w} i={i}");
                assert_eq!(m.max(), Ok(maxs[i]), "w={w} i={i}");
            }
        }
    }

    #[test]
    fn single_wedge_modes() {
        let values = generate_random_samples(N, 7);
        for w in [1, 2, 3, 10, 31, 32, 33, 500, 999] {
            let (mins, maxs) = offline::moving_min_max(&values, w).unwrap();
            let mut min = MovingMinMax::min_only(w).unwrap();
            let mut max = MovingMinMax::max_only(w).unwrap();
            for (i, &v) in values.iter().enumerate() {
                min.update(v);
                max.update(v);
                assert_eq!(min.min(), Ok(mins[i]), "w={w} i={i}");
                assert_eq!(max.max(), Ok(maxs[i]), "w={w} i={i}");
            }
            assert!(min.max().is_err());
            assert!(max.min().is_err());
            assert_eq!(min.max_candidates().count(), 0);
            assert_eq!(max.min_candidates().count(), 0);
        }
    }

    #[test]
    fn invariants_hold() {
        let mut rng = ChaChaRng::seed_from_u64(31415);
        // Few distinct values, so ties are frequent.
        let values = (0..N).map(|_| rng.gen_range(0..8) as f64).collect_vec();
        for w in [1, 2, 5, 16, 100] {
            let mut m = MovingMinMax::both(w).unwrap();
            for &v in &values {
                m.update(v);
                check_wedges(&m);
            }
        }
    }

    #[test]
    fn example_sequence() {
        let input = [5.0, 3.0, 4.0, 9.0, 6.0];

        let mut m = MovingMinMax::both(3).unwrap();
        let (mins, maxs): (Vec<_>, Vec<_>) = m.process(&input).unwrap().into_iter().unzip();
        assert_eq!(maxs[2..], [5.0, 9.0, 9.0]);
        assert_eq!(mins[2..], [3.0, 3.0, 4.0]);
        // Before the window is full.
        assert_eq!(maxs[..2], [5.0, 5.0]);
        assert_eq!(mins[..2], [5.0, 3.0]);

        let mut m = MovingMinMax::both(2).unwrap();
        let (mins, maxs): (Vec<_>, Vec<_>) = m.process(&input).unwrap().into_iter().unzip();
        assert_eq!(maxs[1..], [5.0, 4.0, 9.0, 9.0]);
        assert_eq!(mins[1..], [3.0, 3.0, 4.0, 6.0]);
    }

    #[test]
    fn width_one() {
        let mut m = MovingMinMax::both(1).unwrap();
        m.update(1.0);
        m.update(2.0);
        assert_eq!(m.min(), Ok(2.0));
        assert_eq!(m.max(), Ok(2.0));
        for v in [3.0, -1.0, 0.5] {
            m.update(v);
            assert_eq!(m.max_candidates().count(), 1);
            assert_eq!(m.min_candidates().count(), 1);
            assert_eq!(m.range(), Ok(0.0));
        }
    }

    #[test]
    fn increasing_input() {
        for w in [1, 2, 7, 64] {
            let mut m = MovingMinMax::both(w).unwrap();
            for i in 0..200usize {
                m.update(i as f64);
                assert_eq!(m.max(), Ok(i as f64));
                assert_eq!(m.min(), Ok((i + 1).saturating_sub(w) as f64));
            }
        }
    }

    #[test]
    fn constant_input() {
        let mut m = MovingMinMax::both(10).unwrap();
        for _ in 0..100 {
            m.update(4.2);
            assert_eq!(m.max_candidates().count(), 1);
            assert_eq!(m.min_candidates().count(), 1);
            assert_eq!(m.min(), Ok(4.2));
            assert_eq!(m.max(), Ok(4.2));
        }
    }

    #[test]
    fn wide_window_is_running_extremum() {
        let values = generate_random_samples(300, 5);
        let mut m = MovingMinMax::both(1000).unwrap();
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &v in &values {
            m.update(v);
            lo = lo.min(v);
            hi = hi.max(v);
            assert_eq!(m.min(), Ok(lo));
            assert_eq!(m.max(), Ok(hi));
        }
    }

    #[test]
    fn errors() {
        assert!(matches!(
            MovingMinMax::<f64>::both(0),
            Err(Error::InvalidArgument { name: "w", .. })
        ));
        let m = MovingMinMax::<f64>::both(3).unwrap();
        assert_eq!(m.min(), Err(Error::EmptyContainer));
        assert_eq!(m.max(), Err(Error::EmptyContainer));
        let mut m = MovingMinMax::<f64>::min_only(3).unwrap();
        assert!(m.process(&[1.0]).is_err());
    }

    #[test]
    fn oversized_width_is_rejected() {
        for w in [usize::MAX, 1 << (usize::BITS - 1), 1 << (usize::BITS - 2)] {
            for mode in [Mode::Min, Mode::Max, Mode::Both] {
                assert!(
                    matches!(
                        MovingMinMax::<f64>::new(w, mode),
                        Err(Error::InvalidArgument { .. })
                    ),
                    "w={w} mode={mode:?}"
                );
            }
        }
    }

    #[test]
    fn reset_starts_over() {
        let mut m = MovingMinMax::both(4).unwrap();
        m.extend([9.0, 1.0, 5.0]);
        m.reset();
        assert_eq!(m.count(), 0);
        assert_eq!(m.max(), Err(Error::EmptyContainer));
        m.extend([2.0, 3.0]);
        assert_eq!(m.min(), Ok(2.0));
        assert_eq!(m.max(), Ok(3.0));
        assert_eq!(m.max_candidates().next().map(|s| s.index), Some(1));
    }

    #[test]
    fn f32_samples() {
        let mut m = MovingMinMax::<f32>::both(2).unwrap();
        m.extend([1.5f32, -0.5, 3.0]);
        assert_eq!(m.min(), Ok(-0.5));
        assert_eq!(m.max(), Ok(3.0));
    }
}
