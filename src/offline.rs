//! Sliding window extrema over a complete slice.
//!
//! These are reference implementations used to cross-check [`MovingMinMax`](crate::MovingMinMax).
//! They allocate freely and are not meant for streaming.

use crate::{Error, Result};
use num::Float;
use std::collections::VecDeque;

/// For each `i`, the min and max of `values[i+1-w..=i]`, or of `values[..=i]`
/// while fewer than `w` values have been seen.
///
/// A single pass with two monotone queues of indices.
pub fn moving_min_max<V: Float>(values: &[V], w: usize) -> Result<(Vec<V>, Vec<V>)> {
    if w == 0 {
        return Err(Error::invalid("w", "window width must be at least 1"));
    }
    let mut mins = Vec::with_capacity(values.len());
    let mut maxs = Vec::with_capacity(values.len());

    // Indices of candidates; values are non-increasing in `upper` and
    // non-decreasing in `lower`.
    let mut upper = VecDeque::<usize>::new();
    let mut lower = VecDeque::<usize>::new();

    for (i, &v) in values.iter().enumerate() {
        while upper.back().is_some_and(|&j| values[j] <= v) {
            upper.pop_back();
        }
        upper.push_back(i);
        while lower.back().is_some_and(|&j| values[j] >= v) {
            lower.pop_back();
        }
        lower.push_back(i);

        // Check if the front falls out of the window.
        for q in [&mut upper, &mut lower] {
            if q.front().is_some_and(|&j| i - j >= w) {
                q.pop_front();
            }
        }
        maxs.push(values[*upper.front().expect("We just pushed")]);
        mins.push(values[*lower.front().expect("We just pushed")]);
    }
    Ok((mins, maxs))
}

/// Same output as [`moving_min_max`], by scanning every window. O(n w).
pub fn moving_min_max_naive<V: Float>(values: &[V], w: usize) -> Result<(Vec<V>, Vec<V>)> {
    if w == 0 {
        return Err(Error::invalid("w", "window width must be at least 1"));
    }
    Ok((0..values.len())
        .map(|i| {
            let window = &values[(i + 1).saturating_sub(w)..=i];
            window.iter().fold((window[0], window[0]), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
        })
        .unzip())
}
