/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
//! Fare and trip-duration estimation.
//!
//! Both estimators stand in for a predictive pricing service, so the production
//! implementations add bounded random noise. Call sites only see the traits, which lets
//! tests swap in deterministic implementations.

use super::{types::*, utils::round_to};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

pub struct VehicleTariff {
    pub class: VehicleClass,
    pub name: &'static str,
    pub base_fare: f64,
    pub per_km: f64,
    pub capacity: u8,
    pub eta_factor: f64,
}

pub fn vehicle_tariff(class: VehicleClass) -> VehicleTariff {
    match class {
        VehicleClass::Bike => VehicleTariff {
            class,
            name: "RideMate Bike",
            base_fare: 25.0,
            per_km: 6.0,
            capacity: 1,
            eta_factor: 0.8,
        },
        VehicleClass::Auto => VehicleTariff {
            class,
            name: "RideMate Auto",
            base_fare: 35.0,
            per_km: 9.0,
            capacity: 3,
            eta_factor: 1.0,
        },
        VehicleClass::Cab => VehicleTariff {
            class,
            name: "RideMate Cab",
            base_fare: 60.0,
            per_km: 12.0,
            capacity: 4,
            eta_factor: 1.1,
        },
    }
}

pub trait FareEstimator: Send + Sync {
    fn estimate(&self, vehicle: VehicleClass, distance: Kilometers) -> Fare;
}

pub trait DurationEstimator: Send + Sync {
    fn estimate(&self, distance: Kilometers) -> Minutes;
}

fn base_fare(vehicle: VehicleClass, Kilometers(distance): Kilometers) -> f64 {
    let tariff = vehicle_tariff(vehicle);
    tariff.base_fare + tariff.per_km * distance
}

/// `base + per_km * distance + U(-noise, noise)`, rounded to paise.
pub struct PredictedFareEstimator {
    pub noise: f64,
}

impl FareEstimator for PredictedFareEstimator {
    fn estimate(&self, vehicle: VehicleClass, distance: Kilometers) -> Fare {
        let variation = if self.noise > 0.0 {
            rand::thread_rng().gen_range(-self.noise..=self.noise)
        } else {
            0.0
        };
        Fare(round_to(base_fare(vehicle, distance) + variation, 2))
    }
}

/// Deterministic fare with a constant offset in place of the random term.
pub struct FixedNoiseFareEstimator {
    pub offset: f64,
}

impl FareEstimator for FixedNoiseFareEstimator {
    fn estimate(&self, vehicle: VehicleClass, distance: Kilometers) -> Fare {
        Fare(round_to(base_fare(vehicle, distance) + self.offset, 2))
    }
}

/// `round(3 * distance + U(0, jitter))` minutes.
pub struct LinearDurationEstimator {
    pub minutes_per_km: f64,
    pub jitter: f64,
}

impl Default for LinearDurationEstimator {
    fn default() -> Self {
        Self {
            minutes_per_km: 3.0,
            jitter: 10.0,
        }
    }
}

impl DurationEstimator for LinearDurationEstimator {
    fn estimate(&self, Kilometers(distance): Kilometers) -> Minutes {
        let jitter = if self.jitter > 0.0 {
            rand::thread_rng().gen_range(0.0..self.jitter)
        } else {
            0.0
        };
        Minutes((self.minutes_per_km * distance + jitter).round().max(0.0) as u32)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleOption {
    pub vehicle: VehicleClass,
    pub name: String,
    pub capacity: u8,
    pub eta: Minutes,
    pub fare: Fare,
}

/// Every vehicle class with its fare for `distance` and its pickup ETA for a trip of `duration`.
pub fn vehicle_options(
    fare_estimator: &dyn FareEstimator,
    distance: Kilometers,
    Minutes(duration): Minutes,
) -> Vec<VehicleOption> {
    VehicleClass::iter()
        .map(|class| {
            let tariff = vehicle_tariff(class);
            VehicleOption {
                vehicle: class,
                name: tariff.name.to_string(),
                capacity: tariff.capacity,
                eta: Minutes((duration as f64 * tariff.eta_factor).round() as u32),
                fare: fare_estimator.estimate(class, distance),
            }
        })
        .collect()
}
