//! Request-generation tracking.
//!
//! Every remote call a component issues is tagged with a fresh
//! [`Generation`]. When the response arrives it is applied only if no newer
//! request has been issued since; otherwise it is discarded. Two overlapping
//! requests therefore resolve deterministically: the latest issued wins,
//! regardless of which response lands last.

/// Tag of one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Monotonic per-component counter.
#[derive(Debug, Clone, Default)]
pub struct Generations {
    latest: u64,
}

impl Generations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the tag for a new request, superseding all earlier ones.
    pub fn issue(&mut self) -> Generation {
        self.latest += 1;
        Generation(self.latest)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.latest
    }

    pub fn latest(&self) -> Option<Generation> {
        (self.latest > 0).then_some(Generation(self.latest))
    }
}

/// What happened to local state after an operation settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The response replaced local state.
    Applied,
    /// A precondition did not hold; no request was sent.
    Skipped,
    /// A newer request was issued meanwhile; the response was dropped.
    Stale,
}
