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
    domain::{action::ui::location, types::ui::location::*},
    environment::AppState,
    tools::error::AppError,
};

#[get("/ui/location/resolve")]
pub async fn resolve_place(
    data: Data<AppState>,
    param_obj: Query<PlaceQuery>,
) -> Result<Json<ResolvedPlaceResponse>, AppError> {
    let PlaceQuery { query } = param_obj.into_inner();
    Ok(Json(location::resolve_place(data, query).await?))
}

#[get("/ui/location/address")]
pub async fn resolve_address(
    data: Data<AppState>,
    param_obj: Query<CoordinateQuery>,
) -> Result<Json<AddressResponse>, AppError> {
    Ok(Json(
        location::resolve_address(data, param_obj.into_inner().into()).await,
    ))
}

#[get("/ui/location/suggest")]
pub async fn suggest_places(
    data: Data<AppState>,
    param_obj: Query<PlaceQuery>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let PlaceQuery { query } = param_obj.into_inner();
    Ok(Json(location::suggest_places(data, query).await))
}
