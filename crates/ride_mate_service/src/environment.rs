/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
#![allow(clippy::expect_used)]

use std::{sync::Arc, time::Duration};

use crate::{
    common::{estimator::*, resolver::LocationResolver, types::*},
    flow::{
        driver::DriverSession,
        rider::{FlowTimings, RiderContext, RiderSession},
        session::SessionStore,
    },
    outbound::external::{Geocoder, NominatimGeocoder},
    tools::logger::LoggerConfig,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub workers: usize,
    pub logger_cfg: LoggerConfig,
    pub request_timeout: u64,
    pub max_allowed_req_size: usize,
    pub session_capacity: usize,
    pub geocoder_cfg: GeocoderConfig,
    pub map_cfg: MapConfig,
    pub flow_cfg: FlowConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeocoderConfig {
    pub search_url: String,
    pub reverse_url: String,
    pub user_agent: String,
    pub region_suffix: String,
    pub lookup_timeout: u64,
    pub suggestion_timeout: u64,
    pub reverse_zoom: u8,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MapConfig {
    pub tile_url_template: String,
    pub default_zoom: u8,
    pub default_viewport_width: u32,
    pub default_viewport_height: u32,
    pub default_center_lat: f64,
    pub default_center_lon: f64,
    pub max_viewport_px: u32,
}

// Durations in milliseconds
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FlowConfig {
    pub splash_delay: u64,
    pub ride_duration: u64,
    pub driver_tick: u64,
    pub fare_noise: f64,
    pub minutes_per_km: f64,
    pub duration_jitter: f64,
}

#[derive(Debug, Clone)]
pub struct MapDefaults {
    pub tile_url_template: String,
    pub zoom: Zoom,
    pub viewport: Viewport,
    pub center: Point,
    pub max_viewport_px: u32,
}

pub struct AppState {
    pub resolver: Arc<LocationResolver>,
    pub rider_ctx: Arc<RiderContext>,
    pub rider_sessions: SessionStore<RiderSession>,
    pub driver_sessions: SessionStore<DriverSession>,
    pub map_defaults: MapDefaults,
    pub request_timeout: u64,
    pub max_allowed_req_size: usize,
}

impl AppState {
    pub fn new(app_config: AppConfig) -> AppState {
        let geocoder_cfg = &app_config.geocoder_cfg;

        let client = Client::builder()
            .timeout(Duration::from_millis(geocoder_cfg.lookup_timeout))
            .build()
            .expect("Failed to build http client.");

        let geocoder = NominatimGeocoder {
            client,
            search_url: Url::parse(geocoder_cfg.search_url.as_str())
                .expect("Failed to parse search_url."),
            reverse_url: Url::parse(geocoder_cfg.reverse_url.as_str())
                .expect("Failed to parse reverse_url."),
            user_agent: geocoder_cfg.user_agent.to_owned(),
            region_suffix: geocoder_cfg.region_suffix.to_owned(),
            reverse_zoom: geocoder_cfg.reverse_zoom,
        };

        let fare_estimator = PredictedFareEstimator {
            noise: app_config.flow_cfg.fare_noise,
        };

        let duration_estimator = LinearDurationEstimator {
            minutes_per_km: app_config.flow_cfg.minutes_per_km,
            jitter: app_config.flow_cfg.duration_jitter,
        };

        info!(
            tag = "[Geocoder]",
            search_url = %geocoder_cfg.search_url,
            reverse_url = %geocoder_cfg.reverse_url
        );

        AppState::with_components(
            app_config,
            Arc::new(geocoder),
            Arc::new(fare_estimator),
            Arc::new(duration_estimator),
        )
    }

    /// Builds the state around the given geocoder and estimators instead of the configured ones.
    pub fn with_components(
        app_config: AppConfig,
        geocoder: Arc<dyn Geocoder>,
        fare_estimator: Arc<dyn FareEstimator>,
        duration_estimator: Arc<dyn DurationEstimator>,
    ) -> AppState {
        let resolver = Arc::new(LocationResolver::new(
            geocoder,
            Duration::from_millis(app_config.geocoder_cfg.lookup_timeout),
            Duration::from_millis(app_config.geocoder_cfg.suggestion_timeout),
        ));

        let flow_cfg = app_config.flow_cfg;
        let rider_ctx = Arc::new(RiderContext {
            resolver: resolver.clone(),
            fare_estimator,
            duration_estimator,
            timings: FlowTimings {
                splash_delay: Duration::from_millis(flow_cfg.splash_delay),
                ride_duration: Duration::from_millis(flow_cfg.ride_duration),
                driver_tick: Duration::from_millis(flow_cfg.driver_tick),
            },
        });

        let map_cfg = app_config.map_cfg;
        let map_defaults = MapDefaults {
            tile_url_template: map_cfg.tile_url_template,
            zoom: Zoom(map_cfg.default_zoom),
            viewport: Viewport {
                width: map_cfg.default_viewport_width,
                height: map_cfg.default_viewport_height,
            },
            center: Point::new(map_cfg.default_center_lat, map_cfg.default_center_lon),
            max_viewport_px: map_cfg.max_viewport_px,
        };

        AppState {
            resolver,
            rider_ctx,
            rider_sessions: SessionStore::new(app_config.session_capacity),
            driver_sessions: SessionStore::new(app_config.session_capacity),
            map_defaults,
            request_timeout: app_config.request_timeout,
            max_allowed_req_size: app_config.max_allowed_req_size,
        }
    }
}
