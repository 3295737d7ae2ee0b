/// +----------------------------------------------------------+
/// | MODULES                                                  |
/// +----------+-------+-------+------------------------------+
/// | Exports:                                                 |
/// |   - dtos                                                 |
/// |   - handlers                                             |
/// |   - inbound_error                                        |
/// +----------------------------------------------------------+

/// Data transfer objects for inbound requests.
pub mod dtos;

/// Request handlers feeding the order cache.
pub mod handlers;

/// Error types for the inbound layer.
pub mod inbound_error;
