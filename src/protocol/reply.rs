use std::fmt;

use crate::ExchangeStatus;
use crate::REPLY_ERROR;
use crate::REPLY_NO_SERVICE;
use crate::REPLY_OK;

/// One reply line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `OK`
    Ok,
    /// `OK <value>`
    Value(String),
    /// `NO-SERVICE`
    NoService,
    /// `ERROR`
    Error,
}

impl Reply {
    /// Parses a reply line as sent by the server, without terminator.
    ///
    /// `OK` alone is [`Reply::Ok`]; `OK ` followed by anything (even nothing)
    /// is a [`Reply::Value`]. Returns `None` for lines that are not replies.
    pub fn parse(line: &str) -> Option<Self> {
        match line {
            REPLY_OK => Some(Reply::Ok),
            REPLY_NO_SERVICE => Some(Reply::NoService),
            REPLY_ERROR => Some(Reply::Error),
            _ => line
                .strip_prefix(REPLY_OK)
                .and_then(|rest| rest.strip_prefix(' '))
                .map(|value| Reply::Value(value.to_string())),
        }
    }
}

impl From<ExchangeStatus> for Reply {
    fn from(status: ExchangeStatus) -> Self {
        match status {
            ExchangeStatus::Ok => Reply::Ok,
            ExchangeStatus::NoService => Reply::NoService,
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Reply::Ok => f.write_str(REPLY_OK),
            Reply::Value(v) => write!(f, "{} {}", REPLY_OK, v),
            Reply::NoService => f.write_str(REPLY_NO_SERVICE),
            Reply::Error => f.write_str(REPLY_ERROR),
        }
    }
}
