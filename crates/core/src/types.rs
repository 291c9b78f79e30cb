/// Entity identifiers are opaque strings (cuid/uuid shaped in practice,
/// but no format is enforced beyond non-empty and bounded length).
pub type EntityId = String;

/// All timestamps are UTC, RFC 3339 on the wire.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Upper bound for identifier strings.
pub const MAX_ID_LEN: usize = 64;
