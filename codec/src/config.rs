//! Limits applied while reading untrusted input.

use core::ops::{Bound, RangeBounds};

/// An accepted range of values, most often the element count of a framed collection.
///
/// # Examples
///
/// ```
/// use podwire_codec::RangeCfg;
///
/// // Accept collections of at most 1024 elements
/// let cfg = RangeCfg::new(0..=1024);
/// assert!(cfg.contains(&500));
/// assert!(!cfg.contains(&2000));
///
/// // Accept any count
/// let cfg: RangeCfg<usize> = RangeCfg::default();
/// assert!(cfg.contains(&usize::MAX));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RangeCfg<T: Copy + PartialOrd> {
    start: Bound<T>,
    end: Bound<T>,
}

impl<T: Copy + PartialOrd> Default for RangeCfg<T> {
    fn default() -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Unbounded,
        }
    }
}

macro_rules! impl_from_range {
    ($range:ty) => {
        impl<T: Copy + PartialOrd> From<$range> for RangeCfg<T> {
            fn from(r: $range) -> Self {
                Self::new(r)
            }
        }
    };
}
impl_from_range!(core::ops::Range<T>);
impl_from_range!(core::ops::RangeInclusive<T>);
impl_from_range!(core::ops::RangeFrom<T>);
impl_from_range!(core::ops::RangeTo<T>);
impl_from_range!(core::ops::RangeToInclusive<T>);

impl<T: Copy + PartialOrd> From<core::ops::RangeFull> for RangeCfg<T> {
    fn from(_: core::ops::RangeFull) -> Self {
        Self::default()
    }
}

impl<T: Copy + PartialOrd> RangeCfg<T> {
    /// Creates a new `RangeCfg` from any type implementing `RangeBounds<T>`.
    pub fn new(r: impl RangeBounds<T>) -> Self {
        RangeCfg {
            start: r.start_bound().cloned(),
            end: r.end_bound().cloned(),
        }
    }

    /// Creates a `RangeCfg` that only accepts exactly `value`.
    pub fn exact(value: T) -> Self {
        Self {
            start: Bound::Included(value),
            end: Bound::Included(value),
        }
    }

    /// Returns true if the value is within this range.
    pub fn contains(&self, value: &T) -> bool {
        match &self.start {
            Bound::Included(s) if value < s => return false,
            Bound::Excluded(s) if value <= s => return false,
            _ => {}
        }
        match &self.end {
            Bound::Included(e) if value > e => return false,
            Bound::Excluded(e) if value >= e => return false,
            _ => {}
        }
        true
    }
}

impl<T: Copy + PartialOrd> RangeBounds<T> for RangeCfg<T> {
    fn start_bound(&self) -> Bound<&T> {
        self.start.as_ref()
    }

    fn end_bound(&self) -> Bound<&T> {
        self.end.as_ref()
    }
}
