/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use ride_mate_service::{
    common::types::*,
    flow::{driver::*, session::new_session_id},
    tools::error::AppError,
};

async fn logged_in() -> DriverSession {
    let session = DriverSession::new(new_session_id());
    let state = session.login().await.expect("login from welcome");
    assert_eq!(state.screen, DriverScreen::Tabs(DriverTab::Dashboard));
    session
}

#[tokio::test]
async fn test_accept_then_complete_ride() {
    let session = logged_in().await;
    session
        .select_tab(DriverTab::Requests)
        .await
        .expect("requests tab");

    let state = session
        .accept(NotificationId("N001".to_string()))
        .await
        .expect("accept");
    assert_eq!(state.screen, DriverScreen::Tabs(DriverTab::Dashboard));
    assert_eq!(state.notifications.len(), 1);
    let active = state.active_ride().expect("active ride");
    assert_eq!(active.pickup_location, "Downtown Plaza");
    assert_eq!(active.fare, Fare(45.0));

    assert!(matches!(
        session.accept(NotificationId("N002".to_string())).await,
        Err(AppError::ActiveRideExists(_))
    ));

    let state = session.complete_ride().await.expect("complete");
    assert!(state.active_ride().is_none());
    assert_eq!(state.profile.total_rides, 343);
    assert_eq!(state.profile.total_earnings, Fare(12495.5));
    assert_eq!(state.today_earnings(), Fare(121.25));

    assert_eq!(session.complete_ride().await, Err(AppError::NoActiveRide));
}

#[tokio::test]
async fn test_decline_and_offline_requests() {
    let session = logged_in().await;

    let state = session
        .decline(NotificationId("N002".to_string()))
        .await
        .expect("decline");
    assert_eq!(state.notifications.len(), 1);
    assert_eq!(
        session.decline(NotificationId("N002".to_string())).await,
        Err(AppError::RideRequestNotFound("N002".to_string()))
    );

    let state = session.toggle_online().await.expect("go offline");
    assert!(!state.online);
    assert_eq!(
        session.accept(NotificationId("N001".to_string())).await,
        Err(AppError::DriverOffline)
    );
}

#[tokio::test]
async fn test_welcome_screen_rejects_tab_events() {
    let session = DriverSession::new(new_session_id());
    assert!(matches!(
        session.select_tab(DriverTab::Earnings).await,
        Err(AppError::InvalidTransition(_, _))
    ));

    session.login().await.expect("login");
    let state = session.logout().await.expect("logout");
    assert_eq!(state.screen, DriverScreen::Welcome);
}
