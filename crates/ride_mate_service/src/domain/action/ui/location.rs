/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use crate::{
    common::types::*,
    domain::types::ui::location::*,
    environment::AppState,
    tools::error::AppError,
};
use actix_web::web::Data;

pub async fn resolve_place(
    data: Data<AppState>,
    query: String,
) -> Result<ResolvedPlaceResponse, AppError> {
    let point = data.resolver.resolve_coordinate(&query).await?;
    Ok(ResolvedPlaceResponse { query, point })
}

pub async fn resolve_address(data: Data<AppState>, point: Point) -> AddressResponse {
    let address = data.resolver.resolve_address(&point).await;
    AddressResponse { point, address }
}

pub async fn suggest_places(data: Data<AppState>, query: String) -> SuggestionsResponse {
    let suggestions = data.resolver.suggest(&query).await;
    SuggestionsResponse { query, suggestions }
}
