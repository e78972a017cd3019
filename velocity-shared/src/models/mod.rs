pub mod booking;
pub mod hotel;
pub mod revenue;

/// Raised when a stored or submitted string does not name a known variant
/// of one of the closed enumerations (room type, channel, booking status).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
