//! Id generation strategies for auto-identification
//!
//! The arena owns one generator; a fresh arena starts a fresh sequence.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Produces the unique suffix appended to the configured id prefix
pub trait IdGenerator: fmt::Debug + Send {
    fn next_token(&mut self) -> String;
}

/// Monotonic counter: `1`, `2`, `3`, ...
#[derive(Debug, Clone, Default)]
pub struct CounterIdGenerator {
    last: u64,
}

impl CounterIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for CounterIdGenerator {
    fn next_token(&mut self) -> String {
        self.last += 1;
        self.last.to_string()
    }
}

/// Random v4 UUID in simple (hyphen-free) form
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_token(&mut self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Caller-supplied token source
pub struct FnIdGenerator<F>(pub F);

impl<F> fmt::Debug for FnIdGenerator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnIdGenerator")
    }
}

impl<F> IdGenerator for FnIdGenerator<F>
where
    F: FnMut() -> String + Send,
{
    fn next_token(&mut self) -> String {
        (self.0)()
    }
}

/// Built-in strategies selectable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    #[default]
    Counter,
    Uuid,
}

impl IdStrategy {
    pub fn generator(self) -> Box<dyn IdGenerator> {
        match self {
            IdStrategy::Counter => Box::new(CounterIdGenerator::new()),
            IdStrategy::Uuid => Box::new(UuidIdGenerator),
        }
    }
}
