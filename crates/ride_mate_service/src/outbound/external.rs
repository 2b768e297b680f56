/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use super::types::*;
use crate::common::types::*;
use crate::tools::{callapi::call_api, error::AppError};
use async_trait::async_trait;
use reqwest::{Client, Method};
use url::Url;

/// Forward and reverse geocoding against an external service.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PlaceResponse>, AppError>;

    async fn reverse(&self, point: &Point) -> Result<PlaceResponse, AppError>;
}

/// Nominatim-compatible geocoder. Queries are scoped to a region by appending
/// `region_suffix`, e.g. `", Bangalore, India"`.
pub struct NominatimGeocoder {
    pub client: Client,
    pub search_url: Url,
    pub reverse_url: Url,
    pub user_agent: String,
    pub region_suffix: String,
    pub reverse_zoom: u8,
}

impl NominatimGeocoder {
    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Accept", "application/json"),
            ("User-Agent", self.user_agent.as_str()),
        ]
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<PlaceResponse>, AppError> {
        let mut url = self.search_url.to_owned();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("q", format!("{query}{}", self.region_suffix).as_str())
            .append_pair("limit", limit.to_string().as_str())
            .append_pair("addressdetails", "1");

        call_api::<Vec<PlaceResponse>, String>(&self.client, Method::GET, &url, self.headers(), None)
            .await
    }

    async fn reverse(&self, point: &Point) -> Result<PlaceResponse, AppError> {
        let Latitude(lat) = point.lat;
        let Longitude(lon) = point.lon;

        let mut url = self.reverse_url.to_owned();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("lat", lat.to_string().as_str())
            .append_pair("lon", lon.to_string().as_str())
            .append_pair("zoom", self.reverse_zoom.to_string().as_str())
            .append_pair("addressdetails", "1");

        call_api::<PlaceResponse, String>(&self.client, Method::GET, &url, self.headers(), None)
            .await
    }
}
