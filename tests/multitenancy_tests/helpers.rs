//! Shared helpers for the multi-tenancy tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use capa_e2e::multitenancy::RoleDirectory;
use capa_e2e::{Error, Result};

/// Account used for fake ARNs
pub const TEST_ACCOUNT: &str = "123456789012";

/// ARN the fake directory returns for a role name
pub fn test_arn(role_name: &str) -> String {
    format!("arn:aws:iam::{}:role/{}", TEST_ACCOUNT, role_name)
}

/// In-memory directory that counts lookups per role name
#[derive(Default)]
pub struct CountingDirectory {
    lookups: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    failing: HashSet<String>,
    delay: Duration,
}

impl CountingDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every lookup for `delay` so concurrent callers overlap
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fail lookups for the given role name
    pub fn failing(mut self, role_name: &str) -> Self {
        self.failing.insert(role_name.to_string());
        self
    }

    pub fn lookups(&self, role_name: &str) -> usize {
        self.lookups.lock().get(role_name).copied().unwrap_or(0)
    }

    pub fn total_lookups(&self) -> usize {
        self.lookups.lock().values().sum()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoleDirectory for CountingDirectory {
    async fn role_arn(&self, role_name: &str) -> Result<String> {
        *self.lookups.lock().entry(role_name.to_string()).or_default() += 1;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(role_name) {
            return Err(Error::role_lookup(
                role_name,
                format!("NoSuchEntity: The role with name {} cannot be found.", role_name),
            ));
        }
        Ok(test_arn(role_name))
    }
}
