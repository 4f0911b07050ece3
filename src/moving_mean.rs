use crate::{deque::BoundedDeque, Error, Result};
use num::{Float, NumCast};

/// Mean of the last `w` samples of a stream.
///
/// Keeps the window in a bounded deque next to a running sum; each update adds
/// the new value and subtracts the one that leaves the window.
#[derive(Clone, Debug)]
pub struct MovingMean<V = f64> {
    w: usize,
    window: BoundedDeque<V>,
    sum: V,
}

impl<V: Float + Default> MovingMean<V> {
    pub fn new(w: usize) -> Result<Self> {
        if w == 0 {
            return Err(Error::invalid("w", "window width must be at least 1"));
        }
        let window = BoundedDeque::try_new(w)?;
        tracing::debug!(w, "new moving mean");
        Ok(Self {
            w,
            window,
            sum: V::zero(),
        })
    }
}

impl<V: Float> MovingMean<V> {
    #[inline(always)]
    pub fn update(&mut self, value: V) {
        if self.window.is_full() {
            if let Some(old) = self.window.pop_front() {
                self.sum = self.sum - old;
            }
        }
        self.window.push_back(value);
        self.sum = self.sum + value;
    }

    /// Mean of the current window, or of all samples while fewer than `w`
    /// have been seen.
    pub fn mean(&self) -> Result<V> {
        if self.window.is_empty() {
            return Err(Error::EmptyContainer);
        }
        let len = <V as NumCast>::from(self.window.len()).ok_or_else(|| {
            Error::invalid("w", "window length is not representable as a float")
        })?;
        Ok(self.sum / len)
    }

    /// Number of samples currently in the window.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.sum = V::zero();
    }
}
