/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
//! Place name <-> coordinate resolution.
//!
//! The gazetteer always answers first; the external geocoder is only consulted when
//! it has nothing, and every network failure degrades to a local fallback.

use super::{
    gazetteer,
    resilient::{with_timeout, LookupSource, ResilientLookup},
    types::*,
    utils::{format_coordinates, shorten_display_name},
};
use crate::{outbound::external::Geocoder, tools::error::AppError};
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};
use tracing::warn;

pub const MIN_REMOTE_SUGGESTION_QUERY_LEN: usize = 3;

struct GazetteerExact;

#[async_trait]
impl LookupSource<str, Point> for GazetteerExact {
    fn name(&self) -> &'static str {
        "gazetteer_exact"
    }

    async fn lookup(&self, query: &str) -> Result<Option<Point>, AppError> {
        Ok(gazetteer::lookup_exact(query))
    }
}

struct GazetteerPartial;

#[async_trait]
impl LookupSource<str, Point> for GazetteerPartial {
    fn name(&self) -> &'static str {
        "gazetteer_partial"
    }

    async fn lookup(&self, query: &str) -> Result<Option<Point>, AppError> {
        Ok(gazetteer::lookup_partial(query))
    }
}

struct RemoteSearch(Arc<dyn Geocoder>);

#[async_trait]
impl LookupSource<str, Point> for RemoteSearch {
    fn name(&self) -> &'static str {
        "geocoder_search"
    }

    async fn lookup(&self, query: &str) -> Result<Option<Point>, AppError> {
        let places = self.0.search(query, 1).await?;
        Ok(places.first().and_then(|place| place.point()))
    }
}

struct RemoteReverse(Arc<dyn Geocoder>);

#[async_trait]
impl LookupSource<Point, String> for RemoteReverse {
    fn name(&self) -> &'static str {
        "geocoder_reverse"
    }

    async fn lookup(&self, point: &Point) -> Result<Option<String>, AppError> {
        let place = self.0.reverse(point).await?;
        Ok(place
            .display_name
            .as_deref()
            .map(shorten_display_name)
            .filter(|address| !address.is_empty()))
    }
}

struct CoordinateText;

#[async_trait]
impl LookupSource<Point, String> for CoordinateText {
    fn name(&self) -> &'static str {
        "coordinate_text"
    }

    async fn lookup(&self, point: &Point) -> Result<Option<String>, AppError> {
        Ok(Some(format_coordinates(point)))
    }
}

pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
    forward: ResilientLookup<str, Point>,
    reverse: ResilientLookup<Point, String>,
    suggestion_timeout: Duration,
}

impl LocationResolver {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        lookup_timeout: Duration,
        suggestion_timeout: Duration,
    ) -> Self {
        let forward = ResilientLookup::new(lookup_timeout)
            .source(GazetteerExact)
            .source(GazetteerPartial)
            .source(RemoteSearch(geocoder.clone()));

        let reverse = ResilientLookup::new(lookup_timeout)
            .source(RemoteReverse(geocoder.clone()))
            .source(CoordinateText);

        Self {
            geocoder,
            forward,
            reverse,
            suggestion_timeout,
        }
    }

    /// Coordinate for a free-text place name.
    ///
    /// Fails with `LocationNotFound` when neither the gazetteer nor the geocoder knows the
    /// place. Blank input fails without any lookup.
    pub async fn resolve_coordinate(&self, text: &str) -> Result<Point, AppError> {
        let not_found = || AppError::LocationNotFound(gazetteer::hint(false));

        if gazetteer::normalize(text).is_empty() {
            return Err(not_found());
        }

        self.forward.resolve(text.trim(), not_found).await
    }

    /// Short readable address for `point`, or `"lat°N, lon°E"` when the geocoder fails.
    pub async fn resolve_address(&self, point: &Point) -> String {
        self.reverse
            .resolve(point, || AppError::LocationNotFound(format_coordinates(point)))
            .await
            .unwrap_or_else(|_| format_coordinates(point))
    }

    /// Instant gazetteer suggestions merged with remote search results.
    pub async fn suggest(&self, text: &str) -> Vec<String> {
        let mut suggestions = gazetteer::suggestions(text);

        if text.chars().count() < MIN_REMOTE_SUGGESTION_QUERY_LEN {
            return suggestions;
        }

        let remote = with_timeout(
            self.suggestion_timeout,
            "geocoder_suggest",
            self.geocoder.search(text, gazetteer::MAX_SUGGESTIONS),
        )
        .await;

        match remote {
            Ok(places) => {
                for name in places
                    .iter()
                    .filter_map(|place| place.display_name.as_deref())
                    .map(shorten_display_name)
                {
                    if !suggestions.contains(&name) {
                        suggestions.push(name);
                    }
                }
                suggestions.truncate(gazetteer::MAX_SUGGESTIONS);
            }
            Err(err) => {
                warn!(tag = "[Suggestions Degraded]", error = %err.code(), message = %err.message());
            }
        }

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::types::PlaceResponse;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingGeocoder {
        calls: AtomicUsize,
        places: Vec<PlaceResponse>,
        fail: bool,
    }

    impl CountingGeocoder {
        fn new(places: Vec<PlaceResponse>, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                places,
                fail,
            })
        }
    }

    #[async_trait]
    impl Geocoder for CountingGeocoder {
        async fn search(&self, _query: &str, limit: usize) -> Result<Vec<PlaceResponse>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::ExternalAPICallError("503".to_string()));
            }
            Ok(self.places.iter().take(limit).cloned().collect())
        }

        async fn reverse(&self, _point: &Point) -> Result<PlaceResponse, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::ExternalAPICallError("503".to_string()));
            }
            self.places
                .first()
                .cloned()
                .ok_or(AppError::DeserializationError("empty".to_string()))
        }
    }

    fn place(name: &str, lat: &str, lon: &str) -> PlaceResponse {
        PlaceResponse {
            display_name: Some(name.to_string()),
            lat: Some(lat.to_string()),
            lon: Some(lon.to_string()),
        }
    }

    fn resolver(geocoder: Arc<CountingGeocoder>) -> LocationResolver {
        LocationResolver::new(geocoder, Duration::from_secs(5), Duration::from_secs(3))
    }

    #[tokio::test]
    async fn test_gazetteer_wins_without_network() {
        let geocoder = CountingGeocoder::new(vec![place("Elsewhere", "1.0", "2.0")], false);
        let resolver = resolver(geocoder.clone());

        let point = resolver.resolve_coordinate("Koramangala").await;
        assert_eq!(point, Ok(Point::new(12.9352, 77.6245)));
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_remote_search_used_after_gazetteer_miss() {
        let geocoder = CountingGeocoder::new(
            vec![place("Cubbon Park, Bengaluru, Karnataka", "12.9763", "77.5929")],
            false,
        );
        let resolver = resolver(geocoder.clone());

        let point = resolver.resolve_coordinate("Cubbon Park").await;
        assert_eq!(point, Ok(Point::new(12.9763, 77.5929)));
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_not_found_when_everything_fails() {
        let failing = resolver(CountingGeocoder::new(vec![], true));
        assert!(matches!(
            failing.resolve_coordinate("Atlantis").await,
            Err(AppError::LocationNotFound(_))
        ));

        let empty = resolver(CountingGeocoder::new(vec![], false));
        assert!(matches!(
            empty.resolve_coordinate("Atlantis").await,
            Err(AppError::LocationNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_blank_input_is_not_found() {
        let geocoder = CountingGeocoder::new(vec![], false);
        let resolver = resolver(geocoder.clone());
        assert!(matches!(
            resolver.resolve_coordinate("   ").await,
            Err(AppError::LocationNotFound(_))
        ));
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reverse_fallback_on_failure() {
        let resolver = resolver(CountingGeocoder::new(vec![], true));
        assert_eq!(
            resolver
                .resolve_address(&Point::new(12.9716, 77.5946))
                .await,
            "12.9716°N, 77.5946°E"
        );
    }

    #[tokio::test]
    async fn test_reverse_shortens_display_name() {
        let resolver = resolver(CountingGeocoder::new(
            vec![place(
                "Church Street, Shanthala Nagar, Bengaluru, Karnataka, 560001, India",
                "12.9753",
                "77.6047",
            )],
            false,
        ));
        assert_eq!(
            resolver
                .resolve_address(&Point::new(12.9753, 77.6047))
                .await,
            "Church Street, Shanthala Nagar, Bengaluru"
        );
    }

    #[tokio::test]
    async fn test_suggest_merges_and_dedups() {
        let geocoder = CountingGeocoder::new(
            vec![
                place("Hsr Layout", "12.91", "77.64"),
                place("HSR Club, Sector 1, HSR Layout, Bengaluru", "12.91", "77.64"),
            ],
            false,
        );
        let resolver = resolver(geocoder);
        assert_eq!(
            resolver.suggest("hsr").await,
            vec!["Hsr Layout", "Hsr", "HSR Club, Sector 1, HSR Layout"]
        );
    }

    #[tokio::test]
    async fn test_suggest_degrades_to_instant_list() {
        let geocoder = CountingGeocoder::new(vec![], true);
        let resolver = resolver(geocoder.clone());
        assert_eq!(resolver.suggest("hsr").await, vec!["Hsr Layout", "Hsr"]);

        assert_eq!(resolver.suggest("bt").await, vec!["Btm Layout", "Btm"]);
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    }
}
