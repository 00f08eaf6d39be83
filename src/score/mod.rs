//! Heuristic lead scorers.
//!
//! Both scorers are additive over independent weighted conditions: each
//! condition contributes a fixed point value when its threshold is met, there
//! are no interaction terms, and the tier is an ordered threshold lookup on
//! the final score. "Now" is always an explicit `today` argument so scores
//! are deterministic.

pub mod grant;
pub mod succession;
