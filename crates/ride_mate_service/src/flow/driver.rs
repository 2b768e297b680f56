/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
//! Driver app flow: a welcome screen, then a set of tabs over locally held ride data.

use super::session::FlowSession;
use crate::{
    common::{types::*, utils::round_to},
    screen_transition,
    tools::error::AppError,
};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};
use tokio::sync::Mutex;
use tracing::info;

pub const PEAK_DEMAND_THRESHOLD: u8 = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum DriverTab {
    Dashboard,
    Requests,
    Earnings,
    Schedule,
    Support,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", content = "tab", rename_all = "camelCase")]
pub enum DriverScreen {
    Welcome,
    Tabs(DriverTab),
}

impl std::fmt::Display for DriverScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverScreen::Welcome => write!(f, "Welcome"),
            DriverScreen::Tabs(tab) => write!(f, "Tabs/{tab}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverProfile {
    pub id: DriverId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_info: String,
    pub license_plate: String,
    pub license_number: String,
    pub rating: f64,
    pub total_rides: u32,
    pub total_earnings: Fare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RideStatus {
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideRecord {
    pub id: RideId,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub fare: Fare,
    pub status: RideStatus,
    pub customer_name: String,
    pub customer_rating: f64,
    pub distance: String,
    pub duration: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub driver_id: DriverId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideNotification {
    pub id: NotificationId,
    pub pickup_area: String,
    pub drop_area: String,
    pub estimated_fare: Fare,
    pub customer_rating: f64,
    pub distance: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandSlot {
    pub hour: String,
    pub demand: u8,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverState {
    pub screen: DriverScreen,
    pub online: bool,
    pub profile: DriverProfile,
    pub rides: Vec<RideRecord>,
    pub notifications: Vec<RideNotification>,
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn sample_profile() -> DriverProfile {
    DriverProfile {
        id: DriverId("D001".to_string()),
        name: "Rizwan".to_string(),
        email: "rizwan@ydriver.com".to_string(),
        phone: "+91 8247548949".to_string(),
        vehicle_info: "Toyota Camry 2022 - Black".to_string(),
        license_plate: "ABC 1234".to_string(),
        license_number: "DL-12345678".to_string(),
        rating: 4.8,
        total_rides: 342,
        total_earnings: Fare(12450.50),
    }
}

#[allow(clippy::too_many_arguments)]
fn completed_ride(
    id: &str,
    pickup_location: &str,
    dropoff_location: &str,
    fare: f64,
    customer_name: &str,
    customer_rating: f64,
    distance: &str,
    duration: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> RideRecord {
    RideRecord {
        id: RideId(id.to_string()),
        pickup_location: pickup_location.to_string(),
        dropoff_location: dropoff_location.to_string(),
        fare: Fare(fare),
        status: RideStatus::Completed,
        customer_name: customer_name.to_string(),
        customer_rating,
        distance: distance.to_string(),
        duration: duration.to_string(),
        start_time,
        end_time: Some(end_time),
        driver_id: DriverId("D001".to_string()),
    }
}

fn sample_rides() -> Vec<RideRecord> {
    vec![
        completed_ride(
            "R001",
            "123 Main St, Downtown",
            "456 Park Ave, Uptown",
            25.50,
            "Sarah Miller",
            4.9,
            "5.2 miles",
            "18 min",
            at(2025, 11, 1, 9, 30),
            at(2025, 11, 1, 9, 48),
        ),
        completed_ride(
            "R002",
            "789 Oak St, Westside",
            "321 Elm St, Eastside",
            18.00,
            "John Davis",
            5.0,
            "3.8 miles",
            "12 min",
            at(2025, 11, 1, 8, 0),
            at(2025, 11, 1, 8, 12),
        ),
        completed_ride(
            "R003",
            "555 Maple Dr, Northside",
            "777 Beach Blvd, Coastal",
            32.75,
            "Emma Wilson",
            4.7,
            "7.1 miles",
            "25 min",
            at(2025, 11, 1, 7, 15),
            at(2025, 11, 1, 7, 40),
        ),
    ]
}

fn sample_notifications(now: DateTime<Utc>) -> Vec<RideNotification> {
    vec![
        RideNotification {
            id: NotificationId("N001".to_string()),
            pickup_area: "Downtown Plaza".to_string(),
            drop_area: "Airport Terminal 2".to_string(),
            estimated_fare: Fare(45.00),
            customer_rating: 4.9,
            distance: "12.3 miles".to_string(),
            timestamp: now,
        },
        RideNotification {
            id: NotificationId("N002".to_string()),
            pickup_area: "Shopping Mall".to_string(),
            drop_area: "Riverside Park".to_string(),
            estimated_fare: Fare(15.50),
            customer_rating: 4.6,
            distance: "2.8 miles".to_string(),
            timestamp: now,
        },
    ]
}

/// Hourly demand forecast from 6 AM to 11 PM.
pub fn demand_schedule() -> Vec<DemandSlot> {
    const DEMAND: [u8; 18] = [
        30, 55, 85, 70, 45, 40, 60, 50, 45, 55, 75, 95, 90, 80, 65, 70, 55, 40,
    ];

    DEMAND
        .iter()
        .enumerate()
        .map(|(index, demand)| {
            let hour = 6 + index as u32;
            let (display, suffix) = match hour {
                0..=11 => (hour, "AM"),
                12 => (12, "PM"),
                _ => (hour - 12, "PM"),
            };
            DemandSlot {
                hour: format!("{display} {suffix}"),
                demand: *demand,
                label: format!("{display}{}", suffix.to_lowercase()),
            }
        })
        .collect()
}

pub fn peak_hours(schedule: &[DemandSlot]) -> Vec<String> {
    schedule
        .iter()
        .filter(|slot| slot.demand >= PEAK_DEMAND_THRESHOLD)
        .map(|slot| slot.label.to_owned())
        .collect()
}

impl DriverState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            screen: DriverScreen::Welcome,
            online: true,
            profile: sample_profile(),
            rides: sample_rides(),
            notifications: sample_notifications(now),
        }
    }

    pub fn active_ride(&self) -> Option<&RideRecord> {
        self.rides
            .iter()
            .find(|ride| ride.status == RideStatus::Active)
    }

    pub fn completed_rides(&self) -> impl Iterator<Item = &RideRecord> {
        self.rides
            .iter()
            .filter(|ride| ride.status == RideStatus::Completed)
    }

    /// Sum of completed ride fares.
    pub fn today_earnings(&self) -> Fare {
        Fare(round_to(
            self.completed_rides().map(|ride| ride.fare.0).sum::<f64>(),
            2,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
pub enum DriverEvent {
    LoggedIn,
    LoggedOut,
    TabSelected(DriverTab),
    OnlineToggled,
    RequestAccepted {
        notification_id: NotificationId,
        ride_id: RideId,
        at: DateTime<Utc>,
    },
    RequestDeclined(NotificationId),
    RideCompleted {
        at: DateTime<Utc>,
    },
}

impl DriverEvent {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

fn take_notification(
    notifications: &mut Vec<RideNotification>,
    notification_id: &NotificationId,
) -> Result<RideNotification, AppError> {
    let index = notifications
        .iter()
        .position(|notification| &notification.id == notification_id)
        .ok_or(AppError::RideRequestNotFound(notification_id.0.to_owned()))?;
    Ok(notifications.remove(index))
}

/// Applies `event` to `state`; `state` is never modified.
pub fn reduce(state: &DriverState, event: DriverEvent) -> Result<DriverState, AppError> {
    use DriverEvent::*;

    let mut next = state.clone();

    match (state.screen, event) {
        (DriverScreen::Welcome, LoggedIn) => {
            next.screen = DriverScreen::Tabs(DriverTab::Dashboard);
        }
        (DriverScreen::Tabs(_), LoggedOut) => next.screen = DriverScreen::Welcome,
        (DriverScreen::Tabs(_), TabSelected(tab)) => next.screen = DriverScreen::Tabs(tab),
        (DriverScreen::Tabs(_), OnlineToggled) => next.online = !state.online,
        (
            DriverScreen::Tabs(_),
            RequestAccepted {
                notification_id,
                ride_id,
                at,
            },
        ) => {
            if !state.online {
                return Err(AppError::DriverOffline);
            }
            if let Some(active) = state.active_ride() {
                return Err(AppError::ActiveRideExists(active.id.0.to_owned()));
            }
            let notification = take_notification(&mut next.notifications, &notification_id)?;
            next.rides.push(RideRecord {
                id: ride_id,
                pickup_location: notification.pickup_area,
                dropoff_location: notification.drop_area,
                fare: notification.estimated_fare,
                status: RideStatus::Active,
                customer_name: "New Customer".to_string(),
                customer_rating: notification.customer_rating,
                distance: notification.distance,
                duration: "Calculating...".to_string(),
                start_time: at,
                end_time: None,
                driver_id: state.profile.id.to_owned(),
            });
            next.screen = DriverScreen::Tabs(DriverTab::Dashboard);
        }
        (DriverScreen::Tabs(_), RequestDeclined(notification_id)) => {
            take_notification(&mut next.notifications, &notification_id)?;
        }
        (DriverScreen::Tabs(_), RideCompleted { at }) => {
            let ride = next
                .rides
                .iter_mut()
                .find(|ride| ride.status == RideStatus::Active)
                .ok_or(AppError::NoActiveRide)?;
            ride.status = RideStatus::Completed;
            ride.end_time = Some(at);
            let Fare(fare) = ride.fare;
            next.profile.total_rides += 1;
            next.profile.total_earnings =
                Fare(round_to(state.profile.total_earnings.0 + fare, 2));
        }
        (screen, event) => {
            return Err(AppError::InvalidTransition(
                screen.to_string(),
                event.name().to_string(),
            ))
        }
    }

    Ok(next)
}

pub struct DriverSession {
    id: SessionId,
    state: Mutex<DriverState>,
}

impl DriverSession {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            state: Mutex::new(DriverState::new(Utc::now())),
        }
    }

    pub async fn snapshot(&self) -> DriverState {
        self.state.lock().await.clone()
    }

    pub async fn dispatch(&self, event: DriverEvent) -> Result<DriverState, AppError> {
        let mut state = self.state.lock().await;
        let from = state.screen;
        *state = reduce(&state, event)?;
        let to = state.screen;

        if from != to {
            screen_transition!("driver", from.to_string().as_str(), to.to_string().as_str());
            info!(tag = "[Screen Transition]", app = "driver", session_id = %self.id, from = %from, to = %to);
        }

        Ok(state.clone())
    }

    pub async fn login(&self) -> Result<DriverState, AppError> {
        self.dispatch(DriverEvent::LoggedIn).await
    }

    pub async fn logout(&self) -> Result<DriverState, AppError> {
        self.dispatch(DriverEvent::LoggedOut).await
    }

    pub async fn select_tab(&self, tab: DriverTab) -> Result<DriverState, AppError> {
        self.dispatch(DriverEvent::TabSelected(tab)).await
    }

    pub async fn toggle_online(&self) -> Result<DriverState, AppError> {
        self.dispatch(DriverEvent::OnlineToggled).await
    }

    pub async fn accept(&self, notification_id: NotificationId) -> Result<DriverState, AppError> {
        let at = Utc::now();
        self.dispatch(DriverEvent::RequestAccepted {
            notification_id,
            ride_id: RideId(format!("R{}", at.timestamp_millis())),
            at,
        })
        .await
    }

    pub async fn decline(&self, notification_id: NotificationId) -> Result<DriverState, AppError> {
        self.dispatch(DriverEvent::RequestDeclined(notification_id))
            .await
    }

    pub async fn complete_ride(&self) -> Result<DriverState, AppError> {
        self.dispatch(DriverEvent::RideCompleted { at: Utc::now() })
            .await
    }
}

#[async_trait]
impl FlowSession for DriverSession {
    const APP: &'static str = "driver";

    fn id(&self) -> &SessionId {
        &self.id
    }

    async fn teardown(&self) {}
}
