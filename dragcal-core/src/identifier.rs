//! Event identifiers and how they are generated.
//!
//! Calendar widgets hand ids back as strings while the store mints them as
//! numbers. [`Identifier`] is parsed once at the boundary so every comparison
//! inside the core is numeric.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DragCalError, DragCalResult};

/// A numeric event identifier (milliseconds since the Unix epoch when minted
/// by a clock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Identifier(i64);

impl Identifier {
    pub const fn new(value: i64) -> Self {
        Identifier(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Parse an id the way the calendar widget reports it.
    ///
    /// Accepts integer text with surrounding whitespace and integral decimal
    /// text such as `"2.0"`. Anything else is rejected.
    pub fn parse(text: &str) -> DragCalResult<Self> {
        let trimmed = text.trim();

        if let Ok(value) = trimmed.parse::<i64>() {
            return Ok(Identifier(value));
        }

        match trimmed.parse::<f64>() {
            Ok(value) => Self::from_f64(value).ok_or_else(|| invalid(text)),
            Err(_) => Err(invalid(text)),
        }
    }

    /// True if `text` parses to the same numeric value as this id.
    pub fn matches_text(&self, text: &str) -> bool {
        Identifier::parse(text).is_ok_and(|other| other == *self)
    }

    fn from_f64(value: f64) -> Option<Self> {
        if value.is_finite() && value.fract() == 0.0 && value.abs() <= i64::MAX as f64 {
            Some(Identifier(value as i64))
        } else {
            None
        }
    }
}

fn invalid(text: &str) -> DragCalError {
    DragCalError::InvalidIdentifier(text.to_string())
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identifier {
    type Err = DragCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::parse(s)
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Identifier(value)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

/// Wire shapes an id may arrive in.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdentifier {
    Int(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawIdentifier::deserialize(deserializer)? {
            RawIdentifier::Int(value) => Ok(Identifier(value)),
            RawIdentifier::Float(value) => Identifier::from_f64(value)
                .ok_or_else(|| serde::de::Error::custom(invalid(&value.to_string()))),
            RawIdentifier::Text(text) => Identifier::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}

// =============================================================================
// Id generation
// =============================================================================

/// Mints identifiers at the moment of a user interaction.
pub trait IdSource: Send {
    fn next_id(&mut self) -> Identifier;
}

/// Wall-clock milliseconds. Two interactions within the same millisecond
/// receive the same id.
#[derive(Debug, Default, Clone, Copy)]
pub struct WallClock;

impl IdSource for WallClock {
    fn next_id(&mut self) -> Identifier {
        Identifier(Utc::now().timestamp_millis())
    }
}

/// Wraps another source and never hands out the same id twice:
/// `max(inner, last + 1)`.
#[derive(Debug, Default, Clone)]
pub struct Monotonic<S = WallClock> {
    inner: S,
    last: Option<i64>,
}

impl<S: IdSource> Monotonic<S> {
    pub fn new(inner: S) -> Self {
        Monotonic { inner, last: None }
    }
}

impl<S: IdSource> IdSource for Monotonic<S> {
    fn next_id(&mut self) -> Identifier {
        let candidate = self.inner.next_id().value();
        let value = match self.last {
            Some(last) if candidate <= last => last + 1,
            _ => candidate,
        };
        self.last = Some(value);
        Identifier(value)
    }
}

/// A deterministic clock: returns `next`, then advances it by `step`.
///
/// A step of zero simulates every interaction landing on the same tick.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    next: i64,
    step: i64,
}

impl TickClock {
    pub fn frozen(at: i64) -> Self {
        TickClock { next: at, step: 0 }
    }

    pub fn stepping(start: i64, step: i64) -> Self {
        TickClock { next: start, step }
    }
}

impl IdSource for TickClock {
    fn next_id(&mut self) -> Identifier {
        let id = Identifier(self.next);
        self.next += self.step;
        id
    }
}

/// Which id generator a session uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdStrategy {
    #[default]
    WallClock,
    Monotonic,
}

impl IdStrategy {
    pub fn source(self) -> Box<dyn IdSource> {
        match self {
            IdStrategy::WallClock => Box::new(WallClock),
            IdStrategy::Monotonic => Box::new(Monotonic::new(WallClock)),
        }
    }
}
