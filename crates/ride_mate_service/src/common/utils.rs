/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use super::types::*;

pub const EARTH_RADIUS_IN_KM: f64 = 6371.0;

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn distance_between_in_km(latlong1: &Point, latlong2: &Point) -> f64 {
    let Latitude(lat1) = latlong1.lat;
    let Longitude(lon1) = latlong1.lon;
    let Latitude(lat2) = latlong2.lat;
    let Longitude(lon2) = latlong2.lon;

    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let rlat1 = lat1.to_radians();
    let rlat2 = lat2.to_radians();

    let sq = |x: f64| x * x;

    // 0 <= h <= 1 for valid latitudes, so the result stays real
    let h = sq((dlat / 2.0).sin()) + rlat1.cos() * rlat2.cos() * sq((dlon / 2.0).sin());

    2.0 * EARTH_RADIUS_IN_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Great-circle distance between two points, rounded to one decimal place.
pub fn distance_km(from: &Point, to: &Point) -> Kilometers {
    Kilometers(round_to(distance_between_in_km(from, to), 1))
}

/// `"12.9716°N, 77.5946°E"`, used whenever a readable address cannot be fetched.
pub fn format_coordinates(point: &Point) -> String {
    let Latitude(lat) = point.lat;
    let Longitude(lon) = point.lon;
    format!("{lat:.4}°N, {lon:.4}°E")
}

/// First three comma-separated segments of a geocoder display name.
pub fn shorten_display_name(display_name: &str) -> String {
    display_name
        .split(',')
        .take(3)
        .collect::<Vec<&str>>()
        .join(",")
        .trim()
        .to_string()
}

/// `"hsr layout"` -> `"Hsr Layout"`
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
