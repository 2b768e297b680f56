/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use actix_web::{
    get, post,
    web::{Data, Json, Query},
};

use crate::{
    common::types::*,
    domain::{action::ui::map, types::ui::map::*},
    environment::AppState,
    tools::error::AppError,
};

#[post("/ui/map/project")]
pub async fn project(
    data: Data<AppState>,
    param_obj: Json<ProjectRequest>,
) -> Result<Json<PixelPoint>, AppError> {
    Ok(Json(map::project(data, param_obj.into_inner()).await?))
}

#[post("/ui/map/unproject")]
pub async fn unproject(
    data: Data<AppState>,
    param_obj: Json<UnprojectRequest>,
) -> Result<Json<Point>, AppError> {
    Ok(Json(map::unproject(data, param_obj.into_inner()).await?))
}

#[get("/ui/map/tiles")]
pub async fn tiles(
    data: Data<AppState>,
    param_obj: Query<TilesQuery>,
) -> Result<Json<TilesResponse>, AppError> {
    Ok(Json(map::tiles(data, param_obj.into_inner()).await?))
}
