/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use std::{sync::Arc, time::Duration};

use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test, web, App, Error,
};
use ride_mate_service::{
    common::types::*,
    domain::{
        api,
        types::ui::{driver::DriverSessionResponse, estimate::*, map::MapViewResponse, rider::*},
    },
    environment::AppState,
    flow::{driver::DriverScreen, rider::*},
    middleware::*,
    outbound::external::Geocoder,
    tools::error::{AppError, ErrorBody},
};
use serde_json::json;

use crate::stubs::*;

const SPLASH_DELAY_MS: u64 = 10;

async fn service(
    geocoder: Arc<dyn Geocoder>,
) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    let data = web::Data::new(app_state(geocoder, SPLASH_DELAY_MS));
    service_with(data).await
}

async fn service_with(
    data: web::Data<AppState>,
) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .app_data(data)
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _| AppError::UnprocessibleRequest(err.to_string()).into()),
            )
            .wrap(RequestTimeout)
            .wrap(CheckContentLength)
            .wrap(IncomingRequestMetrics)
            .configure(api::handler),
    )
    .await
}

async fn error_code(response: ServiceResponse<BoxBody>) -> String {
    let body: ErrorBody = test::read_body_json(response).await;
    body.error_code
}

#[actix_web::test]
async fn test_healthcheck() {
    let app = service(Arc::new(PanickingGeocoder)).await;
    let response = test::call_service(&app, test::TestRequest::get().uri("/healthcheck").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_resolve_known_and_unknown_places() {
    let app = service(Arc::new(OfflineGeocoder)).await;

    let request = test::TestRequest::get()
        .uri("/ui/location/resolve?query=Koramangala")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(body["point"]["lat"], json!(12.9352));
    assert_eq!(body["point"]["lon"], json!(77.6245));

    let request = test::TestRequest::get()
        .uri("/ui/location/resolve?query=Gotham")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_code(response).await, "LOCATION_NOT_FOUND");

    let request = test::TestRequest::get()
        .uri("/ui/location/address?lat=12.9716&lon=77.5946")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(body["address"], json!("12.9716°N, 77.5946°E"));
}

#[actix_web::test]
async fn test_fare_estimates() {
    let app = service(Arc::new(PanickingGeocoder)).await;

    let request = test::TestRequest::get()
        .uri("/ui/estimate/fares?distance=10&duration=30")
        .to_request();
    let response: FaresResponse = test::call_and_read_body_json(&app, request).await;
    let auto = response
        .options
        .iter()
        .find(|option| option.vehicle == VehicleClass::Auto)
        .expect("auto option");
    assert!((115.0..=135.0).contains(&auto.fare.0));

    let request = test::TestRequest::get()
        .uri("/ui/estimate/fares?distance=-1&duration=30")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_tiles_reject_out_of_range_zoom() {
    let app = service(Arc::new(PanickingGeocoder)).await;
    let request = test::TestRequest::get()
        .uri("/ui/map/tiles?lat=12.9716&lon=77.5946&zoom=25")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_tiles_reject_oversized_viewport() {
    let app = service(Arc::new(PanickingGeocoder)).await;
    let request = test::TestRequest::get()
        .uri("/ui/map/tiles?lat=12.9716&lon=77.5946&zoom=13&width=4294967295&height=4294967295")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_tiles_at_the_south_pole() {
    let app = service(Arc::new(PanickingGeocoder)).await;
    let request = test::TestRequest::get()
        .uri("/ui/map/tiles?lat=-90&lon=77.5946&zoom=13")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_rider_session_over_http() {
    let data = web::Data::new(app_state(Arc::new(PanickingGeocoder), SPLASH_DELAY_MS));
    let app = service_with(data.clone()).await;

    let request = test::TestRequest::post().uri("/ui/rider/session").to_request();
    let started: RiderSessionResponse = test::call_and_read_body_json(&app, request).await;
    assert_eq!(started.state.screen, RiderScreen::Splash);
    let base = format!("/ui/rider/session/{}", started.session_id.0);

    tokio::time::sleep(Duration::from_millis(SPLASH_DELAY_MS * 5)).await;

    let request = test::TestRequest::post()
        .uri(&format!("{base}/signIn"))
        .set_json(json!({ "method": "google" }))
        .to_request();
    let signed_in: RiderSessionResponse = test::call_and_read_body_json(&app, request).await;
    assert_eq!(signed_in.state.screen, RiderScreen::Map);

    let request = test::TestRequest::post()
        .uri(&format!("{base}/drop"))
        .set_json(json!({ "text": "Indiranagar" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "PICKUP_NOT_SET");

    for (step, text) in [("pickup", "Koramangala"), ("drop", "Indiranagar")] {
        let request = test::TestRequest::post()
            .uri(&format!("{base}/{step}"))
            .set_json(json!({ "text": text }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK, "{step}");
    }

    let request = test::TestRequest::get().uri(&format!("{base}/fares")).to_request();
    let plan: RoutePlan = test::call_and_read_body_json(&app, request).await;
    assert_eq!(plan.distance, Kilometers(4.4));

    let request = test::TestRequest::get()
        .uri(&format!("{base}/map?width=400&height=300"))
        .to_request();
    let view: MapViewResponse = test::call_and_read_body_json(&app, request).await;
    assert_eq!(view.viewport.width, 400);
    assert!(view.pickup.is_some() && view.drop.is_some());
    assert!(view.driver.is_none());

    let request = test::TestRequest::get()
        .uri(&format!("{base}/tracking"))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = test::TestRequest::delete().uri(&base).to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(data.rider_sessions.is_empty().await);

    let request = test::TestRequest::get().uri(&base).to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_code(response).await, "SESSION_NOT_FOUND");
}

#[actix_web::test]
async fn test_driver_session_over_http() {
    let app = service(Arc::new(PanickingGeocoder)).await;

    let request = test::TestRequest::post().uri("/ui/driver/session").to_request();
    let started: DriverSessionResponse = test::call_and_read_body_json(&app, request).await;
    assert_eq!(started.state.screen, DriverScreen::Welcome);
    assert_eq!(started.today_earnings, Fare(76.25));
    assert_eq!(started.schedule.len(), 18);
    let base = format!("/ui/driver/session/{}", started.session_id.0);

    let request = test::TestRequest::post().uri(&format!("{base}/login")).to_request();
    test::call_service(&app, request).await;

    let request = test::TestRequest::post()
        .uri(&format!("{base}/requests/N001/accept"))
        .to_request();
    let accepted: DriverSessionResponse = test::call_and_read_body_json(&app, request).await;
    assert!(accepted.state.active_ride().is_some());

    let request = test::TestRequest::post()
        .uri(&format!("{base}/requests/N404/decline"))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_code(response).await, "RIDE_REQUEST_NOT_FOUND");
}

#[actix_web::test]
async fn test_oversized_body_is_rejected() {
    let app = service(Arc::new(PanickingGeocoder)).await;
    let request = test::TestRequest::post()
        .uri("/ui/map/project")
        .insert_header(("content-type", "application/json"))
        .set_payload(vec![b' '; 600_000])
        .to_request();

    let err = match test::try_call_service(&app, request).await {
        Ok(response) => panic!("expected an error, got {}", response.status()),
        Err(err) => err,
    };
    assert_eq!(err.error_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
}
