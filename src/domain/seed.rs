//! Seed inputs and seed-string composition
//!
//! Seed format: `{timestamp}@{address}#{requester}`, with `~{x},{y}`
//! appended only when coordinates are supplied. Coordinates use the
//! ECMAScript number-to-string form (`0` for negative zero, exponent
//! notation below 1e-6 and from 1e21) so seed strings agree with
//! browser-side callers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rng;

/// Client address used when the real one is unknown
pub const UNKNOWN_ADDRESS: &str = "0.0.0.0";

#[derive(Debug, Error, PartialEq)]
pub enum GenerateError {
    #[error("Invalid input: requester identifier must not be empty")]
    EmptyRequester,

    #[error("Invalid input: client address must not be empty (use '0.0.0.0' when unknown)")]
    EmptyAddress,

    #[error("Invalid input: timestamp must be non-negative, got {0}")]
    NegativeTimestamp(i64),

    #[error("Invalid input: coordinate {axis} must be finite, got {value}")]
    NonFiniteCoordinate { axis: char, value: f64 },
}

/// Client-supplied tap coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The inputs a reading is derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedInput {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    #[serde(rename = "uid")]
    pub requester_id: String,
    #[serde(rename = "ip")]
    pub client_address: String,
    #[serde(rename = "coords", default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl SeedInput {
    /// Creates seed inputs without coordinates
    pub fn new(requester_id: impl Into<String>, client_address: impl Into<String>, timestamp: i64) -> Self {
        Self {
            timestamp,
            requester_id: requester_id.into(),
            client_address: client_address.into(),
            coordinates: None,
        }
    }

    /// Attaches tap coordinates
    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Checks the inputs the seed string depends on
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.requester_id.trim().is_empty() {
            return Err(GenerateError::EmptyRequester);
        }
        if self.client_address.trim().is_empty() {
            return Err(GenerateError::EmptyAddress);
        }
        if self.timestamp < 0 {
            return Err(GenerateError::NegativeTimestamp(self.timestamp));
        }
        if let Some(c) = self.coordinates {
            for (axis, value) in [('x', c.x), ('y', c.y)] {
                if !value.is_finite() {
                    return Err(GenerateError::NonFiniteCoordinate { axis, value });
                }
            }
        }
        Ok(())
    }

    /// Composes the seed string recorded alongside every reading
    pub fn seed_string(&self) -> String {
        let mut seed = format!(
            "{}@{}#{}",
            self.timestamp, self.client_address, self.requester_id
        );
        if let Some(c) = self.coordinates {
            seed.push_str(&format!("~{},{}", format_number(c.x), format_number(c.y)));
        }
        seed
    }

    /// Validates, composes and hashes the seed
    pub fn hashed(&self) -> Result<(String, u32), GenerateError> {
        self.validate()?;
        let seed = self.seed_string();
        let hashed = rng::hash_seed(&seed);
        Ok((seed, hashed))
    }
}

/// Formats a finite float the way ECMAScript `Number.prototype.toString` does
fn format_number(value: f64) -> String {
    // Adding zero turns -0.0 into 0.0
    let value = value + 0.0;
    let magnitude = value.abs();

    if magnitude != 0.0 && !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{:e}", value);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else {
        format!("{}", value)
    }
}

/// Seed inputs plus the exact composed seed string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRecord {
    #[serde(flatten)]
    pub input: SeedInput,
    #[serde(rename = "seedStr")]
    pub seed_string: String,
}
