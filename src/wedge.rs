use crate::{deque::BoundedDeque, Result};

/// A value at an absolute position in the input stream.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sample<V> {
    pub index: usize,
    pub value: V,
}

/// Which end of the value range a wedge keeps at its front.
pub trait Extremum {
    /// True when a newer `new` makes an older `old` useless as a candidate.
    /// Ties count as domination: the newer value stays in the window longer.
    fn dominates<V: PartialOrd>(new: V, old: V) -> bool;
}

/// Keeps the window maximum at the front; values are non-increasing.
#[derive(Clone, Copy, Debug)]
pub struct Max;

/// Keeps the window minimum at the front; values are non-decreasing.
#[derive(Clone, Copy, Debug)]
pub struct Min;

impl Extremum for Max {
    #[inline(always)]
    fn dominates<V: PartialOrd>(new: V, old: V) -> bool {
        new >= old
    }
}

impl Extremum for Min {
    #[inline(always)]
    fn dominates<V: PartialOrd>(new: V, old: V) -> bool {
        new <= old
    }
}

/// A bounded deque of `(index, value)` candidates used as a monotone queue.
///
/// Both index and extremity are monotone from front to back, so that the
/// current extremum is always at the front. Items are only ever removed at the
/// ends: at the back when dominated by a newer value, at the front when they
/// leave the window.
pub trait Wedge<V> {
    /// Push `sample`, first removing the back candidates it dominates.
    fn push_candidate<E: Extremum>(&mut self, sample: Sample<V>);

    /// Drop front candidates that are `w` or more positions older than `index`.
    fn expire(&mut self, index: usize, w: usize);

    /// The value at the front.
    fn extremum(&self) -> Result<V>;
}

impl<V: Copy + PartialOrd> Wedge<V> for BoundedDeque<Sample<V>> {
    #[inline(always)]
    fn push_candidate<E: Extremum>(&mut self, sample: Sample<V>) {
        while let Ok(back) = self.back() {
            if E::dominates(sample.value, back.value) {
                self.prune_back();
            } else {
                break;
            }
        }
        self.push_back(sample);
    }

    #[inline(always)]
    fn expire(&mut self, index: usize, w: usize) {
        while let Ok(front) = self.front() {
            if index - front.index >= w {
                self.prune_front();
            } else {
                break;
            }
        }
    }

    #[inline(always)]
    fn extremum(&self) -> Result<V> {
        self.front().map(|s| s.value)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Error;

    fn values(q: &BoundedDeque<Sample<f64>>) -> Vec<f64> {
        q.iter().map(|s| s.value).collect()
    }

    #[test]
    fn domination_prunes_back() {
        let mut q = BoundedDeque::new(8);
        for (index, value) in [5.0, 3.0, 4.0, 1.0].into_iter().enumerate() {
            q.push_candidate::<Max>(Sample { index, value });
        }
        assert_eq!(values(&q), [5.0, 4.0, 1.0]);

        let mut q = BoundedDeque::new(8);
        for (index, value) in [5.0, 3.0, 4.0, 1.0].into_iter().enumerate() {
            q.push_candidate::<Min>(Sample { index, value });
        }
        assert_eq!(values(&q), [1.0]);
    }

    #[test]
    fn ties_evict_older() {
        let mut q = BoundedDeque::new(4);
        for index in 0..10 {
            q.push_candidate::<Max>(Sample { index, value: 2.0 });
            assert_eq!(q.len(), 1);
            assert_eq!(q.front().unwrap().index, index);
        }
    }

    #[test]
    fn expire_front() {
        let mut q = BoundedDeque::new(3);
        for (index, value) in [9.0, 8.0, 7.0].into_iter().enumerate() {
            q.push_candidate::<Max>(Sample { index, value });
        }
        q.expire(2, 3);
        assert_eq!(values(&q), [9.0, 8.0, 7.0]);
        q.expire(3, 3);
        assert_eq!(values(&q), [8.0, 7.0]);
        q.expire(4, 3);
        assert_eq!(q.extremum(), Ok(7.0));
        q.expire(5, 3);
        assert_eq!(q.extremum(), Err(Error::EmptyContainer));
    }
}
