//! Bitmask subset enumeration.

/// Iterates all `k`-element subsets of `{0, .., n-1}` as bitmasks, in
/// increasing numeric order (Gosper's hack).
///
/// `n` must be below 32.
#[derive(Debug, Clone)]
pub struct Combinations {
    next: Option<u32>,
    limit: u32,
}

impl Combinations {
    /// Creates the enumeration of `k`-subsets of `n` elements.
    pub fn new(n: usize, k: usize) -> Self {
        debug_assert!(n < 32);
        let limit = 1u32 << n;
        let next = if k > n {
            None
        } else if k == 0 {
            Some(0)
        } else {
            Some((1u32 << k) - 1)
        };
        Self { next, limit }
    }
}

impl Iterator for Combinations {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let current = self.next?;
        self.next = if current == 0 {
            None
        } else {
            let lowest = current & current.wrapping_neg();
            let ripple = current + lowest;
            let successor = (((current ^ ripple) >> 2) / lowest) | ripple;
            (successor < self.limit).then_some(successor)
        };
        Some(current)
    }
}

/// Iterates the set bits of `mask`, lowest first.
pub fn bits(mut mask: u32) -> impl Iterator<Item = usize> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let bit = mask.trailing_zeros() as usize;
        mask &= mask - 1;
        Some(bit)
    })
}
