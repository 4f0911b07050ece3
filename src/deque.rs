use crate::{Error, Result};

/// Returns the smallest power of two that is at least `x`.
///
/// `next_power_of_two(0) == 1`. Overflows for `x > 2^(usize::BITS - 1)`;
/// see [`buffer_len`] for the checked form.
#[inline(always)]
pub fn next_power_of_two(x: usize) -> usize {
    x.next_power_of_two()
}

/// Length of the backing buffer for a queue of `capacity` items, or `None`
/// when it does not fit in a `usize`.
pub fn buffer_len(capacity: usize) -> Option<usize> {
    capacity
        .checked_add(1)
        .and_then(usize::checked_next_power_of_two)
}

/// A double ended queue with a fixed capacity.
///
/// Items live in one contiguous buffer whose length is a power of two, so that
/// the `front` and `back` cursors wrap around with a mask instead of a modulo.
/// The buffer is allocated once in `new`; no other method allocates.
///
/// `front` points at the first item, `back` one past the last item. Since the
/// buffer is strictly larger than `capacity`, `len` is tracked explicitly to
/// tell an empty queue from a wrapped one.
#[derive(Clone, Debug)]
pub struct BoundedDeque<T> {
    items: Vec<T>,
    front: usize,
    back: usize,
    len: usize,
    capacity: usize,
    mask: usize,
}

impl<T: Copy + Default> BoundedDeque<T> {
    /// Allocate a queue that holds at most `capacity` items.
    ///
    /// Panics when the buffer cannot be allocated; see `try_new`.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(q) => q,
            Err(e) => panic!("BoundedDeque::new({capacity}): {e}"),
        }
    }

    /// Allocate a queue that holds at most `capacity` items.
    /// Fails with `InvalidArgument` when the buffer length overflows or the
    /// allocation is refused.
    pub fn try_new(capacity: usize) -> Result<Self> {
        let size = buffer_len(capacity).ok_or_else(|| {
            Error::invalid("capacity", format!("{capacity} overflows the buffer length"))
        })?;
        let mut items = Vec::new();
        items
            .try_reserve_exact(size)
            .map_err(|e| Error::invalid("capacity", format!("{capacity}: {e}")))?;
        items.resize(size, T::default());
        Ok(Self {
            items,
            front: 0,
            back: 0,
            len: 0,
            capacity,
            mask: size - 1,
        })
    }
}

impl<T: Copy> BoundedDeque<T> {
    /// The number of items this queue was created for.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len >= self.capacity
    }

    /// Push `item` at the front.
    /// The queue must not be full; this is only checked in debug builds.
    #[inline(always)]
    pub fn push_front(&mut self, item: T) {
        debug_assert!(
            !self.is_full(),
            "push_front on a full deque of capacity {}",
            self.capacity
        );
        self.front = self.front.wrapping_sub(1) & self.mask;
        self.items[self.front] = item;
        self.len += 1;
    }

    /// Push `item` at the back.
    /// The queue must not be full; this is only checked in debug builds.
    #[inline(always)]
    pub fn push_back(&mut self, item: T) {
        debug_assert!(
            !self.is_full(),
            "push_back on a full deque of capacity {}",
            self.capacity
        );
        self.items[self.back] = item;
        self.back = (self.back + 1) & self.mask;
        self.len += 1;
    }

    /// Like `push_front`, but fails instead of overwriting when full.
    pub fn try_push_front(&mut self, item: T) -> Result<()> {
        if self.is_full() {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.push_front(item);
        Ok(())
    }

    /// Like `push_back`, but fails instead of overwriting when full.
    pub fn try_push_back(&mut self, item: T) -> Result<()> {
        if self.is_full() {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.push_back(item);
        Ok(())
    }

    #[inline(always)]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let item = self.items[self.front];
        self.front = (self.front + 1) & self.mask;
        self.len -= 1;
        Some(item)
    }

    #[inline(always)]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.back = self.back.wrapping_sub(1) & self.mask;
        self.len -= 1;
        Some(self.items[self.back])
    }

    /// Drop the front item, if any.
    #[inline(always)]
    pub fn prune_front(&mut self) {
        if self.len > 0 {
            self.front = (self.front + 1) & self.mask;
            self.len -= 1;
        }
    }

    /// Drop the back item, if any.
    #[inline(always)]
    pub fn prune_back(&mut self) {
        if self.len > 0 {
            self.back = self.back.wrapping_sub(1) & self.mask;
            self.len -= 1;
        }
    }

    #[inline(always)]
    pub fn front(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        Ok(&self.items[self.front])
    }

    #[inline(always)]
    pub fn back(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        Ok(&self.items[self.back.wrapping_sub(1) & self.mask])
    }

    /// Forget all items. The buffer is kept.
    pub fn clear(&mut self) {
        self.front = 0;
        self.back = 0;
        self.len = 0;
    }

    /// Iterate the items from front to back.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        (0..self.len).map(move |i| &self.items[(self.front + i) & self.mask])
    }
}
