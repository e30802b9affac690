//! `EX`: consume a tuple, transform it, publish the result.
//!
//! The steps are not one atomic unit. The store lock is held only while the
//! input tuple is removed and again while the output is appended; lookup and
//! transformation run unlocked, so other callers can observe the moment where
//! the input is gone and the output is not there yet.
//!
//! An unknown service id does NOT put the input back. By the time the id is
//! checked the tuple has been consumed, and callers must treat `NO-SERVICE` as
//! having destroyed it.


use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::metrics::EXCHANGE_RESULTS;
use crate::metrics::OPERATIONS_TOTAL;
use crate::ServiceId;
use crate::ServiceRegistry;
use crate::TupleSpace;
use crate::REPLY_NO_SERVICE;
use crate::REPLY_OK;

/// Outcome of an exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeStatus {
    /// Transform applied and result written to the output key
    Ok,
    /// Input consumed, no such service, nothing written
    NoService,
}

impl ExchangeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeStatus::Ok => REPLY_OK,
            ExchangeStatus::NoService => REPLY_NO_SERVICE,
        }
    }
}

impl fmt::Display for ExchangeStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ExchangeCoordinator {
    space: Arc<TupleSpace>,
    services: Arc<ServiceRegistry>,
}

impl ExchangeCoordinator {
    pub fn new(
        space: Arc<TupleSpace>,
        services: Arc<ServiceRegistry>,
    ) -> Self {
        Self { space, services }
    }

    /// Blocks until `key_in` has a tuple, then takes it and, if `service_id`
    /// is registered, writes the transformed value to `key_out`.
    pub fn exchange(
        &self,
        key_in: &str,
        key_out: &str,
        service_id: ServiceId,
    ) -> ExchangeStatus {
        let input = self.space.take_head(key_in);

        let status = match self.services.lookup(service_id) {
            None => {
                debug!(key_in, service_id, "no such service, input tuple dropped");
                ExchangeStatus::NoService
            }
            Some(service) => {
                let output = service.apply(&input);
                debug!(key_in, key_out, service = service.name(), "exchange applied");
                self.space.write(key_out, output);
                ExchangeStatus::Ok
            }
        };

        OPERATIONS_TOTAL.with_label_values(&["exchange"]).inc();
        EXCHANGE_RESULTS.with_label_values(&[status.as_str()]).inc();
        status
    }
}
