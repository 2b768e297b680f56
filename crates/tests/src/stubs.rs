/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use std::sync::Arc;

use async_trait::async_trait;
use ride_mate_service::{
    common::{estimator::*, types::*},
    environment::*,
    outbound::{external::Geocoder, types::PlaceResponse},
    tools::{
        error::AppError,
        logger::{LogLevel, LoggerConfig},
    },
};

/// Fails every call, as if the geocoder were unreachable.
pub struct OfflineGeocoder;

#[async_trait]
impl Geocoder for OfflineGeocoder {
    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<PlaceResponse>, AppError> {
        Err(AppError::ExternalAPICallError("connection refused".to_string()))
    }

    async fn reverse(&self, _point: &Point) -> Result<PlaceResponse, AppError> {
        Err(AppError::ExternalAPICallError("connection refused".to_string()))
    }
}

/// Panics on any call, for asserting that a lookup never leaves the process.
pub struct PanickingGeocoder;

#[async_trait]
impl Geocoder for PanickingGeocoder {
    async fn search(&self, query: &str, _limit: usize) -> Result<Vec<PlaceResponse>, AppError> {
        panic!("unexpected search for {query}")
    }

    async fn reverse(&self, point: &Point) -> Result<PlaceResponse, AppError> {
        panic!("unexpected reverse lookup for {point:?}")
    }
}

pub fn app_config(splash_delay: u64) -> AppConfig {
    AppConfig {
        port: 8082,
        workers: 1,
        logger_cfg: LoggerConfig {
            level: LogLevel::OFF,
            log_to_file: false,
            log_dir: "./logs".to_string(),
        },
        request_timeout: 9000,
        max_allowed_req_size: 512000,
        session_capacity: 16,
        geocoder_cfg: GeocoderConfig {
            search_url: "http://localhost:1/search".to_string(),
            reverse_url: "http://localhost:1/reverse".to_string(),
            user_agent: "ride-mate-tests".to_string(),
            region_suffix: ", Bangalore, India".to_string(),
            lookup_timeout: 5000,
            suggestion_timeout: 3000,
            reverse_zoom: 16,
        },
        map_cfg: MapConfig {
            tile_url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            default_zoom: 13,
            default_viewport_width: 800,
            default_viewport_height: 600,
            default_center_lat: 12.9716,
            default_center_lon: 77.5946,
            max_viewport_px: 4096,
        },
        flow_cfg: FlowConfig {
            splash_delay,
            ride_duration: 30000,
            driver_tick: 1000,
            fare_noise: 0.0,
            minutes_per_km: 3.0,
            duration_jitter: 0.0,
        },
    }
}

/// State with deterministic estimators: no fare noise and no duration jitter.
pub fn app_state(geocoder: Arc<dyn Geocoder>, splash_delay: u64) -> AppState {
    AppState::with_components(
        app_config(splash_delay),
        geocoder,
        Arc::new(FixedNoiseFareEstimator { offset: 0.0 }),
        Arc::new(LinearDurationEstimator {
            minutes_per_km: 3.0,
            jitter: 0.0,
        }),
    )
}
