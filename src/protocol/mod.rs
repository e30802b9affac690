//! Line-oriented text protocol.
//!
//! ```text
//! WR <key> <value...>               -> OK
//! RD <key>                          -> OK <value>
//! IN <key>                          -> OK <value>
//! EX <key_in> <key_out> <svc_id>    -> OK | NO-SERVICE
//! anything else                     -> ERROR
//! ```
//!
//! Framing (newline split, `\r` removal, blank line skipping) happens in the
//! session; this module only sees one line at a time.

mod command;
mod reply;
pub use command::*;
pub use reply::*;
