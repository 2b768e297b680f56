/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use std::{sync::Arc, time::Duration};

use ride_mate_service::{
    common::{types::*, utils::distance_km},
    flow::{rider::*, session::new_session_id},
    tools::error::AppError,
};
use tokio::time::sleep;

use crate::stubs::*;

async fn signed_in(state: &ride_mate_service::environment::AppState) -> Arc<RiderSession> {
    let session = RiderSession::start(new_session_id(), state.rider_ctx.clone());
    sleep(Duration::from_millis(2001)).await;
    assert_eq!(session.snapshot().await.screen, RiderScreen::Auth);
    session
        .sign_in(SignIn::Google)
        .await
        .expect("sign in from auth screen");
    session
}

#[tokio::test(start_paused = true)]
async fn test_koramangala_to_indiranagar_end_to_end() {
    let state = app_state(Arc::new(PanickingGeocoder), 2000);
    let session = signed_in(&state).await;

    session.set_pickup("Koramangala").await.expect("pickup");
    let rider = session.set_drop("Indiranagar").await.expect("drop");

    assert!(rider.map.vehicle_panel_open);
    let plan = rider.map.plan.clone().expect("route plan");
    assert_eq!(plan.distance, Kilometers(4.4));
    assert_eq!(plan.duration, Minutes(13));
    assert_eq!(plan.options.len(), 3);

    let rider = session.choose_vehicle(VehicleClass::Auto).await.expect("vehicle");
    assert_eq!(rider.screen, RiderScreen::Confirmation);
    let booking = rider.booking.expect("booking");
    assert_eq!(booking.pickup_location, "Koramangala");
    assert_eq!(booking.drop_location, "Indiranagar");
    assert_eq!(booking.fare, Fare(74.6));

    let rider = session.confirm().await.expect("confirm");
    assert_eq!(rider.screen, RiderScreen::Tracking);

    sleep(Duration::from_millis(5001)).await;
    let tracking = session.tracking().await.expect("tracking");
    assert!(tracking.progress > 0.0);
    assert!(tracking.eta < 3.0);

    sleep(Duration::from_secs(26)).await;
    let rider = session.snapshot().await;
    assert_eq!(rider.screen, RiderScreen::Map);
    assert_eq!(rider.booking, None);
    assert_eq!(rider.map.pickup, None);
    assert!(session.armed_timers().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_pickup_is_required_before_drop() {
    let state = app_state(Arc::new(PanickingGeocoder), 2000);
    let session = signed_in(&state).await;

    assert_eq!(
        session.set_drop("Indiranagar").await,
        Err(AppError::PickupNotSet)
    );
    assert_eq!(
        session.set_drop_pin(Point::new(12.9716, 77.6412)).await,
        Err(AppError::PickupNotSet)
    );

    let rider = session.snapshot().await;
    assert_eq!(rider.map.drop, None);
    assert!(!rider.map.vehicle_panel_open);
}

#[tokio::test]
async fn test_gazetteer_answers_without_network() {
    let state = app_state(Arc::new(PanickingGeocoder), 2000);

    for (name, expected) in [
        ("Koramangala", Point::new(12.9352, 77.6245)),
        ("  indiranagar ", Point::new(12.9716, 77.6412)),
        ("MG Road", Point::new(12.9759, 77.6061)),
    ] {
        assert_eq!(
            state.resolver.resolve_coordinate(name).await,
            Ok(expected),
            "{name}"
        );
    }
}

#[tokio::test]
async fn test_reverse_lookup_falls_back_to_coordinates() {
    let state = app_state(Arc::new(OfflineGeocoder), 2000);
    let address = state
        .resolver
        .resolve_address(&Point::new(12.9716, 77.5946))
        .await;
    assert_eq!(address, "12.9716°N, 77.5946°E");
}

#[tokio::test]
async fn test_unknown_place_offline_is_not_found() {
    let state = app_state(Arc::new(OfflineGeocoder), 2000);
    assert!(matches!(
        state.resolver.resolve_coordinate("Gotham").await,
        Err(AppError::LocationNotFound(_))
    ));
}

#[test]
fn test_haversine_symmetry() {
    let koramangala = Point::new(12.9352, 77.6245);
    let whitefield = Point::new(12.9698, 77.7500);
    assert_eq!(
        distance_km(&koramangala, &whitefield),
        distance_km(&whitefield, &koramangala)
    );
    assert_eq!(distance_km(&koramangala, &koramangala), Kilometers(0.0));
}
