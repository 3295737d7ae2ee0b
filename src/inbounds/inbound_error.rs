use thiserror::Error;

/// +----------------------------------------------------------+
/// | STRUCTS | TRAITS | ENUMS | FUNCTIONS                     |
/// +----------+-------+-------+------------------------------+
/// | Enums:                                                   |
/// |   - InboundError                                         |
/// +----------------------------------------------------------+

/// Errors raised while decoding inbound payloads.
///
/// Only transport-level problems surface here. Orders that decode but fail validation are
/// dropped silently by the cache.
#[derive(Debug, Error)]
pub enum InboundError {
    /// The payload could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),
}
