use tracing::trace;

use crate::Command;
use crate::LindaApi;
use crate::Reply;

/// Runs one parsed command against the engine and builds its reply.
///
/// May block: `RD`, `IN` and `EX` wait for a tuple.
pub fn dispatch<A>(
    api: &A,
    command: Command,
) -> Reply
where
    A: LindaApi + ?Sized,
{
    trace!(command = command.verb(), "dispatching");
    match command {
        Command::Write { key, value } => {
            api.write(&key, value);
            Reply::Ok
        }
        Command::Read { key } => Reply::Value(api.read(&key)),
        Command::Take { key } => Reply::Value(api.take(&key)),
        Command::Exchange {
            key_in,
            key_out,
            service_id,
        } => api.exchange(&key_in, &key_out, service_id).into(),
    }
}
