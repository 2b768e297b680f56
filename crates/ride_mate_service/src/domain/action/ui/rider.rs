/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use std::sync::Arc;

use crate::{
    common::types::*,
    domain::{
        action::ui::map::map_view,
        types::ui::{map::*, rider::*},
    },
    environment::AppState,
    flow::{
        history::{ride_history, RideHistory},
        rider::*,
        session::new_session_id,
    },
    tools::error::AppError,
};
use actix_web::web::Data;

async fn session(data: &Data<AppState>, session_id: &SessionId) -> Result<Arc<RiderSession>, AppError> {
    data.rider_sessions.get(session_id).await
}

fn response(session_id: SessionId, state: RiderState) -> RiderSessionResponse {
    RiderSessionResponse { session_id, state }
}

pub async fn start_session(data: Data<AppState>) -> Result<RiderSessionResponse, AppError> {
    let session_id = new_session_id();
    let session = RiderSession::start(session_id.to_owned(), data.rider_ctx.clone());
    let state = session.snapshot().await;
    data.rider_sessions.insert(session).await?;
    Ok(response(session_id, state))
}

pub async fn get_session(
    data: Data<AppState>,
    session_id: SessionId,
) -> Result<RiderSessionResponse, AppError> {
    let state = session(&data, &session_id).await?.snapshot().await;
    Ok(response(session_id, state))
}

pub async fn end_session(data: Data<AppState>, session_id: SessionId) -> Result<APISuccess, AppError> {
    data.rider_sessions.remove(&session_id).await?;
    Ok(APISuccess::default())
}

pub async fn sign_in(
    data: Data<AppState>,
    session_id: SessionId,
    method: SignIn,
) -> Result<RiderSessionResponse, AppError> {
    let state = session(&data, &session_id).await?.sign_in(method).await?;
    Ok(response(session_id, state))
}

pub async fn set_pickup(
    data: Data<AppState>,
    session_id: SessionId,
    request: LocationTextRequest,
) -> Result<RiderSessionResponse, AppError> {
    let state = session(&data, &session_id)
        .await?
        .set_pickup(&request.text)
        .await?;
    Ok(response(session_id, state))
}

pub async fn set_pickup_pin(
    data: Data<AppState>,
    session_id: SessionId,
    point: Point,
) -> Result<RiderSessionResponse, AppError> {
    let state = session(&data, &session_id)
        .await?
        .set_pickup_pin(point)
        .await?;
    Ok(response(session_id, state))
}

pub async fn set_drop(
    data: Data<AppState>,
    session_id: SessionId,
    request: LocationTextRequest,
) -> Result<RiderSessionResponse, AppError> {
    let state = session(&data, &session_id)
        .await?
        .set_drop(&request.text)
        .await?;
    Ok(response(session_id, state))
}

pub async fn set_drop_pin(
    data: Data<AppState>,
    session_id: SessionId,
    point: Point,
) -> Result<RiderSessionResponse, AppError> {
    let state = session(&data, &session_id)
        .await?
        .set_drop_pin(point)
        .await?;
    Ok(response(session_id, state))
}

pub async fn clear_drop(
    data: Data<AppState>,
    session_id: SessionId,
) -> Result<RiderSessionResponse, AppError> {
    let state = session(&data, &session_id).await?.clear_drop().await?;
    Ok(response(session_id, state))
}

pub async fn toggle_vehicle_panel(
    data: Data<AppState>,
    session_id: SessionId,
    request: VehiclePanelRequest,
) -> Result<RiderSessionResponse, AppError> {
    let state = session(&data, &session_id)
        .await?
        .toggle_vehicle_panel(request.open)
        .await?;
    Ok(response(session_id, state))
}

pub async fn choose_vehicle(
    data: Data<AppState>,
    session_id: SessionId,
    request: VehicleRequest,
) -> Result<RiderSessionResponse, AppError> {
    let state = session(&data, &session_id)
        .await?
        .choose_vehicle(request.vehicle)
        .await?;
    Ok(response(session_id, state))
}

pub async fn confirm(
    data: Data<AppState>,
    session_id: SessionId,
) -> Result<RiderSessionResponse, AppError> {
    let state = session(&data, &session_id).await?.confirm().await?;
    Ok(response(session_id, state))
}

pub async fn cancel(
    data: Data<AppState>,
    session_id: SessionId,
) -> Result<RiderSessionResponse, AppError> {
    let state = session(&data, &session_id).await?.cancel().await?;
    Ok(response(session_id, state))
}

pub async fn complete(
    data: Data<AppState>,
    session_id: SessionId,
) -> Result<RiderSessionResponse, AppError> {
    let state = session(&data, &session_id).await?.complete().await?;
    Ok(response(session_id, state))
}

pub async fn open_history(
    data: Data<AppState>,
    session_id: SessionId,
) -> Result<RiderSessionResponse, AppError> {
    let state = session(&data, &session_id).await?.open_history().await?;
    Ok(response(session_id, state))
}

pub async fn close_history(
    data: Data<AppState>,
    session_id: SessionId,
) -> Result<RiderSessionResponse, AppError> {
    let state = session(&data, &session_id).await?.close_history().await?;
    Ok(response(session_id, state))
}

pub async fn fares(data: Data<AppState>, session_id: SessionId) -> Result<RoutePlan, AppError> {
    session(&data, &session_id).await?.fares().await
}

pub async fn tracking(
    data: Data<AppState>,
    session_id: SessionId,
) -> Result<TrackingState, AppError> {
    session(&data, &session_id).await?.tracking().await
}

pub async fn map(
    data: Data<AppState>,
    session_id: SessionId,
    query: ViewQuery,
) -> Result<MapViewResponse, AppError> {
    let state = session(&data, &session_id).await?.snapshot().await;
    let driver = state.tracking.as_ref().map(|tracking| &tracking.driver);
    map_view(
        &data.map_defaults,
        state.map.pickup.as_ref(),
        state.map.drop.as_ref(),
        driver,
        query,
    )
}

pub async fn history() -> RideHistory {
    ride_history()
}
