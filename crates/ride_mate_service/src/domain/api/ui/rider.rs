/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use actix_web::{
    delete, get, post,
    web::{Data, Json, Path, Query},
};

use crate::{
    common::types::*,
    domain::{
        action::ui::rider,
        types::ui::{map::*, rider::*},
    },
    environment::AppState,
    flow::{
        history::RideHistory,
        rider::{RoutePlan, SignIn, TrackingState},
    },
    tools::error::AppError,
};

type SessionResult = Result<Json<RiderSessionResponse>, AppError>;

#[post("/ui/rider/session")]
pub async fn start_session(data: Data<AppState>) -> SessionResult {
    Ok(Json(rider::start_session(data).await?))
}

#[get("/ui/rider/session/{sessionId}")]
pub async fn get_session(data: Data<AppState>, path: Path<String>) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(rider::get_session(data, session_id).await?))
}

#[delete("/ui/rider/session/{sessionId}")]
pub async fn end_session(data: Data<AppState>, path: Path<String>) -> Result<Json<APISuccess>, AppError> {
    let session_id = SessionId(path.into_inner());
    Ok(Json(rider::end_session(data, session_id).await?))
}

#[post("/ui/rider/session/{sessionId}/signIn")]
pub async fn sign_in(data: Data<AppState>, param_obj: Json<SignIn>, path: Path<String>) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(
        rider::sign_in(data, session_id, param_obj.into_inner()).await?,
    ))
}

#[post("/ui/rider/session/{sessionId}/pickup")]
pub async fn set_pickup(
    data: Data<AppState>,
    param_obj: Json<LocationTextRequest>,
    path: Path<String>,
) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(
        rider::set_pickup(data, session_id, param_obj.into_inner()).await?,
    ))
}

#[post("/ui/rider/session/{sessionId}/pickupPin")]
pub async fn set_pickup_pin(
    data: Data<AppState>,
    param_obj: Json<Point>,
    path: Path<String>,
) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(
        rider::set_pickup_pin(data, session_id, param_obj.into_inner()).await?,
    ))
}

#[post("/ui/rider/session/{sessionId}/drop")]
pub async fn set_drop(
    data: Data<AppState>,
    param_obj: Json<LocationTextRequest>,
    path: Path<String>,
) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(
        rider::set_drop(data, session_id, param_obj.into_inner()).await?,
    ))
}

#[post("/ui/rider/session/{sessionId}/dropPin")]
pub async fn set_drop_pin(
    data: Data<AppState>,
    param_obj: Json<Point>,
    path: Path<String>,
) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(
        rider::set_drop_pin(data, session_id, param_obj.into_inner()).await?,
    ))
}

#[post("/ui/rider/session/{sessionId}/clearDrop")]
pub async fn clear_drop(data: Data<AppState>, path: Path<String>) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(rider::clear_drop(data, session_id).await?))
}

#[post("/ui/rider/session/{sessionId}/panel")]
pub async fn toggle_vehicle_panel(
    data: Data<AppState>,
    param_obj: Json<VehiclePanelRequest>,
    path: Path<String>,
) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(
        rider::toggle_vehicle_panel(data, session_id, param_obj.into_inner()).await?,
    ))
}

#[post("/ui/rider/session/{sessionId}/vehicle")]
pub async fn choose_vehicle(
    data: Data<AppState>,
    param_obj: Json<VehicleRequest>,
    path: Path<String>,
) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(
        rider::choose_vehicle(data, session_id, param_obj.into_inner()).await?,
    ))
}

#[post("/ui/rider/session/{sessionId}/confirm")]
pub async fn confirm(data: Data<AppState>, path: Path<String>) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(rider::confirm(data, session_id).await?))
}

#[post("/ui/rider/session/{sessionId}/cancel")]
pub async fn cancel(data: Data<AppState>, path: Path<String>) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(rider::cancel(data, session_id).await?))
}

#[post("/ui/rider/session/{sessionId}/complete")]
pub async fn complete(data: Data<AppState>, path: Path<String>) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(rider::complete(data, session_id).await?))
}

#[post("/ui/rider/session/{sessionId}/history")]
pub async fn open_history(data: Data<AppState>, path: Path<String>) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(rider::open_history(data, session_id).await?))
}

#[post("/ui/rider/session/{sessionId}/back")]
pub async fn close_history(data: Data<AppState>, path: Path<String>) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(rider::close_history(data, session_id).await?))
}

#[get("/ui/rider/session/{sessionId}/fares")]
pub async fn fares(data: Data<AppState>, path: Path<String>) -> Result<Json<RoutePlan>, AppError> {
    let session_id = SessionId(path.into_inner());
    Ok(Json(rider::fares(data, session_id).await?))
}

#[get("/ui/rider/session/{sessionId}/tracking")]
pub async fn tracking(
    data: Data<AppState>,
    path: Path<String>,
) -> Result<Json<TrackingState>, AppError> {
    let session_id = SessionId(path.into_inner());
    Ok(Json(rider::tracking(data, session_id).await?))
}

#[get("/ui/rider/session/{sessionId}/map")]
pub async fn map(
    data: Data<AppState>,
    param_obj: Query<ViewQuery>,
    path: Path<String>,
) -> Result<Json<MapViewResponse>, AppError> {
    let session_id = SessionId(path.into_inner());
    Ok(Json(
        rider::map(data, session_id, param_obj.into_inner()).await?,
    ))
}

#[get("/ui/rider/history")]
pub async fn history() -> Result<Json<RideHistory>, AppError> {
    Ok(Json(rider::history().await))
}
