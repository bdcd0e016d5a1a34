use crate::position::Frame;
use thiserror::Error;

/// The single failure kind of this crate: a position (or a list of generic values) that does
/// not have the shape the operation asked for.
///
/// Every check happens before any numeric work, so an `Err` never comes with a partial result.
/// Numeric trouble (for example a geocentric point right at a pole) is *not* reported through
/// this type; see [`GeocentricToGeodetic`](crate::convert::GeocentricToGeodetic).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    /// A converter was handed a position in a frame other than the one it converts from.
    #[error("expected a {expected} position, got a {found} position")]
    WrongFrame { expected: Frame, found: Frame },

    /// A list of generic values had the wrong length for the position type it was meant for.
    #[error("{frame} position takes {expected} values, got {found}")]
    WrongArity {
        frame: Frame,
        expected: Arity,
        found: usize,
    },

    /// An origin for a local tangent plane position did not expose 2 or 3 generic values.
    #[error("local tangent plane origin must have 2 or 3 values, got {found}")]
    OriginArity { found: usize },
}

/// How many generic values a position type accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Latitude and longitude, with or without altitude.
    TwoOrThree,
    /// Exactly three Cartesian components.
    Three,
}

impl Arity {
    /// Whether a list of `n` generic values has an accepted length.
    #[must_use]
    pub fn admits(self, n: usize) -> bool {
        match self {
            Arity::TwoOrThree => n == 2 || n == 3,
            Arity::Three => n == 3,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::TwoOrThree => f.write_str("2 or 3"),
            Arity::Three => f.write_str("3"),
        }
    }
}
