//! MockProvider — scripted answers, recorded requests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::provider::{ProviderError, SchemaProvider, SchemaRequest};

/// An in-memory provider that replays scripted answers in order and records
/// every request it receives.
///
/// When the script runs out, calls fail with
/// [`ProviderError::InvalidResponse`].
pub struct MockProvider {
    script: Mutex<VecDeque<Result<String, ProviderError>>>,
    requests: Mutex<Vec<SchemaRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockProvider {
    /// Create a provider with an empty script.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a raw JSON answer.
    #[must_use]
    pub fn respond_with(self, raw: impl Into<String>) -> Self {
        lock(&self.script).push_back(Ok(raw.into()));
        self
    }

    /// Queue a JSON value as the answer.
    #[must_use]
    pub fn respond_with_json(self, value: serde_json::Value) -> Self {
        self.respond_with(value.to_string())
    }

    /// Queue a failure.
    #[must_use]
    pub fn fail_with(self, err: ProviderError) -> Self {
        lock(&self.script).push_back(Err(err));
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<SchemaRequest> {
        lock(&self.requests).clone()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaProvider for MockProvider {
    fn complete_with_schema(
        &self,
        request: SchemaRequest,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send {
        lock(&self.requests).push(request);
        let next = lock(&self.script).pop_front();

        async move {
            next.unwrap_or_else(|| {
                Err(ProviderError::InvalidResponse(
                    "mock provider has no scripted answer left".into(),
                ))
            })
        }
    }
}
