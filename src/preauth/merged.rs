//! Lazy concatenation of an override-derived sequence and the underlying
//! request's own sequence.
//!
//! # States
//! - Primary: yielding override values
//! - Fallback: yielding the request's own values
//! - Exhausted: both sources drained
//!
//! # State Transitions
//! ```text
//! Primary → Fallback: primary source returns nothing
//! Fallback → Exhausted: fallback source returns nothing
//! ```

use std::iter::{FusedIterator, Peekable};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Primary,
    Fallback,
    Exhausted,
}

/// Yields every element of `primary`, then every element of `fallback`.
///
/// Single pass: build a new one for each access. Equal elements from the
/// two sources are both yielded.
pub struct Merged<P: Iterator, F: Iterator<Item = P::Item>> {
    primary: Peekable<P>,
    fallback: Peekable<F>,
    phase: Phase,
}

impl<P, F> Merged<P, F>
where
    P: Iterator,
    F: Iterator<Item = P::Item>,
{
    pub fn new(primary: P, fallback: F) -> Self {
        Self {
            primary: primary.peekable(),
            fallback: fallback.peekable(),
            phase: Phase::Primary,
        }
    }

    /// True while either source still has an element, primary checked first.
    pub fn has_more(&mut self) -> bool {
        match self.phase {
            Phase::Primary => self.primary.peek().is_some() || self.fallback.peek().is_some(),
            Phase::Fallback => self.fallback.peek().is_some(),
            Phase::Exhausted => false,
        }
    }

    /// Like `next`, but running past the end is an error.
    pub fn next_element(&mut self) -> Result<P::Item> {
        self.next().ok_or(Error::Exhausted)
    }
}

impl<P, F> Iterator for Merged<P, F>
where
    P: Iterator,
    F: Iterator<Item = P::Item>,
{
    type Item = P::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.phase == Phase::Primary {
            if let Some(item) = self.primary.next() {
                return Some(item);
            }
            self.phase = Phase::Fallback;
        }

        if self.phase == Phase::Fallback {
            if let Some(item) = self.fallback.next() {
                return Some(item);
            }
            self.phase = Phase::Exhausted;
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.phase {
            Phase::Primary => {
                let (p_lo, p_hi) = self.primary.size_hint();
                let (f_lo, f_hi) = self.fallback.size_hint();
                let hi = match (p_hi, f_hi) {
                    (Some(p), Some(f)) => p.checked_add(f),
                    _ => None,
                };
                (p_lo.saturating_add(f_lo), hi)
            }
            Phase::Fallback => self.fallback.size_hint(),
            Phase::Exhausted => (0, Some(0)),
        }
    }
}

impl<P, F> FusedIterator for Merged<P, F>
where
    P: Iterator,
    F: Iterator<Item = P::Item>,
{
}
