use crate::ScrollDirection;

/// Closed range of item indexes currently mapped to active instances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub first: usize,
    pub last: usize, // inclusive
}

impl Window {
    pub fn new(first: usize, last: usize) -> Self {
        debug_assert!(first <= last, "Window: first > last ({first} > {last})");
        Self { first, last }
    }

    /// Number of indexes in the window.
    pub fn count(&self) -> usize {
        self.last - self.first + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.first && index <= self.last
    }

    /// Widens the window by `retain` on each side, clamped to `[0, count-1]`.
    pub(crate) fn retained(self, retain: usize, count: usize) -> Self {
        let last_index = count.saturating_sub(1);
        Self {
            first: self.first - retain.min(self.first),
            last: self.last + retain.min(last_index.saturating_sub(self.last)),
        }
    }
}

/// A single pool operation produced by [`diff`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Change {
    Release(usize),
    Acquire(usize),
}

/// Emits the minimal set of releases and acquisitions turning `old` into `new`.
///
/// Every release is emitted before any acquisition so an instance freed by this update can be
/// reused by it. Releases walk against the scroll direction and acquisitions along it,
/// matching the order in which rows leave and enter the viewport.
pub(crate) fn diff(
    old: Option<Window>,
    new: Option<Window>,
    direction: ScrollDirection,
    mut apply: impl FnMut(Change),
) {
    if old == new {
        return;
    }

    if let Some(old) = old {
        let leaving = |i: &usize| new.is_none_or(|w| !w.contains(*i));
        match direction {
            ScrollDirection::Forward => {
                (old.first..=old.last)
                    .filter(leaving)
                    .for_each(|i| apply(Change::Release(i)));
            }
            ScrollDirection::Backward => {
                (old.first..=old.last)
                    .rev()
                    .filter(leaving)
                    .for_each(|i| apply(Change::Release(i)));
            }
        }
    }

    if let Some(new) = new {
        let entering = |i: &usize| old.is_none_or(|w| !w.contains(*i));
        match direction {
            ScrollDirection::Forward => {
                (new.first..=new.last)
                    .filter(entering)
                    .for_each(|i| apply(Change::Acquire(i)));
            }
            ScrollDirection::Backward => {
                (new.first..=new.last)
                    .rev()
                    .filter(entering)
                    .for_each(|i| apply(Change::Acquire(i)));
            }
        }
    }
}
