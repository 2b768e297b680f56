/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use crate::common::{types::*, utils::round_to};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PastRideStatus {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastRide {
    pub id: String,
    pub date: String,
    pub time: String,
    pub pickup: String,
    pub drop: String,
    pub distance: Kilometers,
    pub fare: Fare,
    pub vehicle: VehicleClass,
    pub status: PastRideStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideHistory {
    pub rides: Vec<PastRide>,
    pub completed: usize,
    pub cancelled: usize,
    pub total_spent: Fare,
    pub total_distance: Kilometers,
}

#[allow(clippy::too_many_arguments)]
fn past_ride(
    id: &str,
    date: &str,
    time: &str,
    pickup: &str,
    drop: &str,
    distance: f64,
    fare: f64,
    vehicle: VehicleClass,
    status: PastRideStatus,
) -> PastRide {
    PastRide {
        id: id.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        pickup: pickup.to_string(),
        drop: drop.to_string(),
        distance: Kilometers(distance),
        fare: Fare(fare),
        vehicle,
        status,
    }
}

/// Most recent first.
pub fn past_rides() -> Vec<PastRide> {
    use PastRideStatus::*;
    use VehicleClass::*;

    vec![
        past_ride("1", "Nov 1, 2025", "10:30 AM", "Koramangala, Bangalore", "MG Road, Bangalore", 7.2, 95.40, Auto, Completed),
        past_ride("2", "Oct 31, 2025", "6:45 PM", "Indiranagar, Bangalore", "Whitefield, Bangalore", 12.5, 168.50, Cab, Completed),
        past_ride("3", "Oct 30, 2025", "2:15 PM", "HSR Layout, Bangalore", "Electronic City, Bangalore", 4.8, 54.80, Bike, Completed),
        past_ride("4", "Oct 29, 2025", "9:00 AM", "Jayanagar, Bangalore", "BTM Layout, Bangalore", 3.2, 0.0, Auto, Cancelled),
        past_ride("5", "Oct 28, 2025", "7:30 PM", "Malleshwaram, Bangalore", "Rajajinagar, Bangalore", 5.6, 78.40, Auto, Completed),
    ]
}

pub fn ride_history() -> RideHistory {
    let rides = past_rides();
    let completed: Vec<&PastRide> = rides
        .iter()
        .filter(|ride| ride.status == PastRideStatus::Completed)
        .collect();

    let total_spent = completed.iter().map(|ride| ride.fare.0).sum::<f64>();
    let total_distance = completed.iter().map(|ride| ride.distance.0).sum::<f64>();

    RideHistory {
        completed: completed.len(),
        cancelled: rides.len() - completed.len(),
        total_spent: Fare(round_to(total_spent, 2)),
        total_distance: Kilometers(round_to(total_distance, 1)),
        rides,
    }
}
