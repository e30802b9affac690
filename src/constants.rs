// -
// Wire protocol

/// Request verbs
pub(crate) const CMD_WRITE: &str = "WR";
pub(crate) const CMD_READ: &str = "RD";
pub(crate) const CMD_TAKE: &str = "IN";
pub(crate) const CMD_EXCHANGE: &str = "EX";

/// Reply tokens
pub(crate) const REPLY_OK: &str = "OK";
pub(crate) const REPLY_NO_SERVICE: &str = "NO-SERVICE";
pub(crate) const REPLY_ERROR: &str = "ERROR";

// -
// Network defaults

/// Listen port when neither config nor port file sets one
pub const DEFAULT_PORT: u16 = 54321;

/// Upper bound for one request line, in bytes
pub(crate) const DEFAULT_MAX_LINE_LENGTH: usize = 64 * 1024;

// -
// Built-in service identifiers

pub const SERVICE_UPPERCASE: i64 = 1;
pub const SERVICE_REVERSE: i64 = 2;
pub const SERVICE_LENGTH: i64 = 3;
