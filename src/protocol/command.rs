use std::str::FromStr;

use crate::ProtocolError;
use crate::ServiceId;
use crate::CMD_EXCHANGE;
use crate::CMD_READ;
use crate::CMD_TAKE;
use crate::CMD_WRITE;

/// One parsed request line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Write {
        key: String,
        value: String,
    },
    Read {
        key: String,
    },
    Take {
        key: String,
    },
    Exchange {
        key_in: String,
        key_out: String,
        service_id: ServiceId,
    },
}

impl Command {
    /// Wire verb, also used as the `command` field in logs
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Write { .. } => CMD_WRITE,
            Command::Read { .. } => CMD_READ,
            Command::Take { .. } => CMD_TAKE,
            Command::Exchange { .. } => CMD_EXCHANGE,
        }
    }

    /// Parses a single line with any line terminator already removed.
    ///
    /// Tokens are whitespace separated. For `WR`, everything after the key
    /// is the value, minus exactly one separating space. Surplus tokens after
    /// `RD`, `IN` and `EX` arguments are ignored.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let (verb, rest) = next_token(line).ok_or(ProtocolError::EmptyLine)?;

        match verb {
            CMD_WRITE => {
                let (key, rest) = require(rest, CMD_WRITE, "key")?;
                let value = rest.strip_prefix(' ').unwrap_or(rest);
                Ok(Command::Write {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            }
            CMD_READ => {
                let (key, _) = require(rest, CMD_READ, "key")?;
                Ok(Command::Read { key: key.to_string() })
            }
            CMD_TAKE => {
                let (key, _) = require(rest, CMD_TAKE, "key")?;
                Ok(Command::Take { key: key.to_string() })
            }
            CMD_EXCHANGE => {
                let (key_in, rest) = require(rest, CMD_EXCHANGE, "key_in")?;
                let (key_out, rest) = require(rest, CMD_EXCHANGE, "key_out")?;
                let (raw_id, _) = require(rest, CMD_EXCHANGE, "service_id")?;
                let service_id = raw_id
                    .parse::<ServiceId>()
                    .map_err(|_| ProtocolError::InvalidServiceId(raw_id.to_string()))?;
                Ok(Command::Exchange {
                    key_in: key_in.to_string(),
                    key_out: key_out.to_string(),
                    service_id,
                })
            }
            other => Err(ProtocolError::UnknownCommand(other.to_string())),
        }
    }

    /// Renders the request line, without terminator
    pub fn encode(&self) -> String {
        match self {
            Command::Write { key, value } => format!("{} {} {}", CMD_WRITE, key, value),
            Command::Read { key } => format!("{} {}", CMD_READ, key),
            Command::Take { key } => format!("{} {}", CMD_TAKE, key),
            Command::Exchange {
                key_in,
                key_out,
                service_id,
            } => format!("{} {} {} {}", CMD_EXCHANGE, key_in, key_out, service_id),
        }
    }
}

impl FromStr for Command {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse(s)
    }
}

/// Skips leading whitespace and splits off the next token.
/// The returned rest starts at the delimiter that ended the token.
fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    let end = input.find(char::is_whitespace).unwrap_or(input.len());
    Some(input.split_at(end))
}

fn require<'a>(
    input: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<(&'a str, &'a str), ProtocolError> {
    next_token(input).ok_or(ProtocolError::MissingArgument { command, argument })
}
