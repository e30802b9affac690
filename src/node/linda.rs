//! The engine object sessions talk to.
//!
//! [`Linda`] bundles the tuple store, the service table and the exchange
//! logic. It is built once by [`NodeBuilder`](crate::NodeBuilder) and passed
//! by `Arc` into every session; nothing reaches it through global state.

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use crate::ExchangeCoordinator;
use crate::ExchangeStatus;
use crate::ServiceId;
use crate::ServiceRegistry;
use crate::Tuple;
use crate::TupleSpace;

/// The four logical calls of the tuple space.
///
/// `read`, `take` and `exchange` may block the calling thread for an
/// unbounded time. Async callers must run them on a blocking-capable thread.
#[cfg_attr(test, automock)]
pub trait LindaApi: Send + Sync + 'static {
    fn write(
        &self,
        key: &str,
        value: Tuple,
    );

    fn read(
        &self,
        key: &str,
    ) -> Tuple;

    fn take(
        &self,
        key: &str,
    ) -> Tuple;

    fn exchange(
        &self,
        key_in: &str,
        key_out: &str,
        service_id: ServiceId,
    ) -> ExchangeStatus;
}

pub struct Linda {
    space: Arc<TupleSpace>,
    services: Arc<ServiceRegistry>,
    exchanger: ExchangeCoordinator,
}

impl Linda {
    /// Empty space with the built-in service table
    pub fn new() -> Self {
        Self::with_services(ServiceRegistry::builtin())
    }

    pub fn with_services(services: ServiceRegistry) -> Self {
        let space = Arc::new(TupleSpace::new());
        let services = Arc::new(services);
        let exchanger = ExchangeCoordinator::new(space.clone(), services.clone());
        Self {
            space,
            services,
            exchanger,
        }
    }

    pub fn space(&self) -> &Arc<TupleSpace> {
        &self.space
    }

    pub fn services(&self) -> &Arc<ServiceRegistry> {
        &self.services
    }
}

impl Default for Linda {
    fn default() -> Self {
        Self::new()
    }
}

impl LindaApi for Linda {
    fn write(
        &self,
        key: &str,
        value: Tuple,
    ) {
        self.space.write(key, value)
    }

    fn read(
        &self,
        key: &str,
    ) -> Tuple {
        self.space.read(key)
    }

    fn take(
        &self,
        key: &str,
    ) -> Tuple {
        self.space.take(key)
    }

    fn exchange(
        &self,
        key_in: &str,
        key_out: &str,
        service_id: ServiceId,
    ) -> ExchangeStatus {
        self.exchanger.exchange(key_in, key_out, service_id)
    }
}
