/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use crate::{
    common::{estimator::vehicle_options, types::*, utils::distance_km},
    domain::types::ui::estimate::*,
    environment::AppState,
    tools::error::AppError,
};
use actix_web::web::Data;

pub async fn route_estimate(data: Data<AppState>, query: RouteQuery) -> RouteEstimateResponse {
    let from = Point::new(query.from_lat, query.from_lon);
    let to = Point::new(query.to_lat, query.to_lon);
    let distance = distance_km(&from, &to);
    RouteEstimateResponse {
        distance,
        duration: data.rider_ctx.duration_estimator.estimate(distance),
    }
}

pub async fn fare_estimate(data: Data<AppState>, query: FaresQuery) -> Result<FaresResponse, AppError> {
    if !query.distance.is_finite() || query.distance < 0.0 {
        return Err(AppError::InvalidRequest(format!(
            "Distance must be a non-negative number of kilometers : {}",
            query.distance
        )));
    }

    let distance = Kilometers(query.distance);
    let duration = Minutes(query.duration);
    Ok(FaresResponse {
        options: vehicle_options(data.rider_ctx.fare_estimator.as_ref(), distance, duration),
        distance,
        duration,
    })
}
