/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use actix_web::{
    get,
    web::{Data, Json, Query},
};

use crate::{
    domain::{action::ui::estimate, types::ui::estimate::*},
    environment::AppState,
    tools::error::AppError,
};

#[get("/ui/estimate/route")]
pub async fn route_estimate(
    data: Data<AppState>,
    param_obj: Query<RouteQuery>,
) -> Result<Json<RouteEstimateResponse>, AppError> {
    Ok(Json(
        estimate::route_estimate(data, param_obj.into_inner()).await,
    ))
}

#[get("/ui/estimate/fares")]
pub async fn fare_estimate(
    data: Data<AppState>,
    param_obj: Query<FaresQuery>,
) -> Result<Json<FaresResponse>, AppError> {
    Ok(Json(
        estimate::fare_estimate(data, param_obj.into_inner()).await?,
    ))
}
