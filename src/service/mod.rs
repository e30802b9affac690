//! Fixed table of server-side transformations used by `EX`.
//!
//! The table is built once at startup and never changes afterwards, so lookups
//! need no locking and the registry can be shared freely behind an `Arc`.

mod builtin;
pub use builtin::*;

#[cfg(test)]
mod registry_test;

use std::collections::HashMap;

use crate::SERVICE_LENGTH;
use crate::SERVICE_REVERSE;
use crate::SERVICE_UPPERCASE;

/// Identifier a client puts in the third `EX` argument
pub type ServiceId = i64;

/// Pure value-to-value transformation
pub type Transform = fn(&str) -> String;

/// One registered transformation
#[derive(Debug, Clone, Copy)]
pub struct Service {
    id: ServiceId,
    name: &'static str,
    transform: Transform,
}

impl Service {
    pub const fn new(
        id: ServiceId,
        name: &'static str,
        transform: Transform,
    ) -> Self {
        Self {
            id,
            name,
            transform,
        }
    }

    pub fn id(&self) -> ServiceId {
        self.id
    }

    /// Stable short name, used for log fields and metric labels
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn apply(
        &self,
        value: &str,
    ) -> String {
        (self.transform)(value)
    }
}

/// Immutable mapping from [`ServiceId`] to [`Service`]
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    services: HashMap<ServiceId, Service>,
}

impl ServiceRegistry {
    /// The fixed built-in table: 1 = uppercase, 2 = reverse, 3 = length
    pub fn builtin() -> Self {
        Self::from_services([
            Service::new(SERVICE_UPPERCASE, "upper", uppercase),
            Service::new(SERVICE_REVERSE, "reverse", reverse),
            Service::new(SERVICE_LENGTH, "length", char_length),
        ])
    }

    pub fn from_services(services: impl IntoIterator<Item = Service>) -> Self {
        Self {
            services: services.into_iter().map(|s| (s.id, s)).collect(),
        }
    }

    /// Returns `None` for any id outside the table. That is an expected
    /// outcome for callers, not an error.
    #[inline]
    pub fn lookup(
        &self,
        id: ServiceId,
    ) -> Option<&Service> {
        self.services.get(&id)
    }

    /// Registered ids in ascending order
    pub fn ids(&self) -> Vec<ServiceId> {
        let mut ids: Vec<ServiceId> = self.services.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
