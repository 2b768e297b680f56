/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
//! Ordered fallback over lookup sources, each attempt bounded by a timeout.

use crate::lookup_fallback;
use crate::tools::error::AppError;
use async_trait::async_trait;
use std::{future::Future, time::Duration};
use tracing::{debug, warn};

/// One place an answer may come from.
///
/// `Ok(None)` means the source has no answer for this query, which is not an error and
/// simply moves on to the next source.
#[async_trait]
pub trait LookupSource<Q, T>: Send + Sync
where
    Q: Sync + ?Sized,
    T: Send,
{
    fn name(&self) -> &'static str;

    async fn lookup(&self, query: &Q) -> Result<Option<T>, AppError>;
}

pub struct ResilientLookup<Q: Sync + ?Sized, T: Send> {
    sources: Vec<Box<dyn LookupSource<Q, T>>>,
    timeout: Duration,
}

impl<Q, T> ResilientLookup<Q, T>
where
    Q: Sync + ?Sized,
    T: Send,
{
    pub fn new(timeout: Duration) -> Self {
        Self {
            sources: Vec::new(),
            timeout,
        }
    }

    pub fn source(mut self, source: impl LookupSource<Q, T> + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Tries each source in order and returns the first answer.
    ///
    /// Timeouts and source errors are logged and skipped. When every source is exhausted
    /// the result is `exhausted()`.
    pub async fn resolve(
        &self,
        query: &Q,
        exhausted: impl FnOnce() -> AppError,
    ) -> Result<T, AppError> {
        for source in self.sources.iter() {
            match with_timeout(self.timeout, source.name(), source.lookup(query)).await {
                Ok(Some(answer)) => {
                    debug!(tag = "[Lookup Resolved]", source = source.name());
                    return Ok(answer);
                }
                Ok(None) => {
                    lookup_fallback!(source.name(), "NOT_FOUND");
                }
                Err(err) => {
                    warn!(tag = "[Lookup Source Failed]", source = source.name(), error = %err.code(), message = %err.message());
                    lookup_fallback!(source.name(), err.code().as_str());
                }
            }
        }
        Err(exhausted())
    }
}

/// Runs `fut` to completion or fails with `ExternalAPITimeout` after `duration`.
pub async fn with_timeout<T, F>(duration: Duration, service: &str, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(duration, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::ExternalAPITimeout(service.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    struct Fixed(Option<u32>, Arc<AtomicUsize>);

    #[async_trait]
    impl LookupSource<str, u32> for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn lookup(&self, _query: &str) -> Result<Option<u32>, AppError> {
            self.1.fetch_add(1, Ordering::SeqCst);
            Ok(self.0)
        }
    }

    struct Failing;

    #[async_trait]
    impl LookupSource<str, u32> for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn lookup(&self, _query: &str) -> Result<Option<u32>, AppError> {
            Err(AppError::ExternalAPICallError("503".to_string()))
        }
    }

    struct Hanging;

    #[async_trait]
    impl LookupSource<str, u32> for Hanging {
        fn name(&self) -> &'static str {
            "hanging"
        }

        async fn lookup(&self, _query: &str) -> Result<Option<u32>, AppError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Some(0))
        }
    }

    fn not_found() -> AppError {
        AppError::LocationNotFound("nowhere".to_string())
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let lookup = ResilientLookup::new(Duration::from_secs(5))
            .source(Fixed(Some(1), calls.clone()))
            .source(Fixed(Some(2), calls.clone()));

        assert_eq!(lookup.resolve("q", not_found).await, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_errors_fall_through_to_next_source() {
        let calls = Arc::new(AtomicUsize::new(0));
        let lookup = ResilientLookup::new(Duration::from_secs(5))
            .source(Fixed(None, calls.clone()))
            .source(Failing)
            .source(Fixed(Some(3), calls.clone()));

        assert_eq!(lookup.resolve("q", not_found).await, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_through() {
        let calls = Arc::new(AtomicUsize::new(0));
        let lookup = ResilientLookup::new(Duration::from_secs(5))
            .source(Hanging)
            .source(Fixed(Some(4), calls));

        assert_eq!(lookup.resolve("q", not_found).await, Ok(4));
    }

    #[tokio::test]
    async fn test_exhausted_sources_fail() {
        let lookup: ResilientLookup<str, u32> =
            ResilientLookup::new(Duration::from_secs(5)).source(Failing);

        assert_eq!(lookup.resolve("q", not_found).await, Err(not_found()));
    }
}
