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
    domain::types::ui::driver::*,
    environment::AppState,
    flow::{
        driver::*,
        session::new_session_id,
    },
    tools::error::AppError,
};
use actix_web::web::Data;

async fn session(data: &Data<AppState>, session_id: &SessionId) -> Result<Arc<DriverSession>, AppError> {
    data.driver_sessions.get(session_id).await
}

fn response(session_id: SessionId, state: DriverState) -> DriverSessionResponse {
    let schedule = demand_schedule();
    DriverSessionResponse {
        session_id,
        today_earnings: state.today_earnings(),
        peak_hours: peak_hours(&schedule),
        schedule,
        state,
    }
}

pub async fn start_session(data: Data<AppState>) -> Result<DriverSessionResponse, AppError> {
    let session_id = new_session_id();
    let session = Arc::new(DriverSession::new(session_id.to_owned()));
    let state = session.snapshot().await;
    data.driver_sessions.insert(session).await?;
    Ok(response(session_id, state))
}

pub async fn get_session(
    data: Data<AppState>,
    session_id: SessionId,
) -> Result<DriverSessionResponse, AppError> {
    let state = session(&data, &session_id).await?.snapshot().await;
    Ok(response(session_id, state))
}

pub async fn end_session(data: Data<AppState>, session_id: SessionId) -> Result<APISuccess, AppError> {
    data.driver_sessions.remove(&session_id).await?;
    Ok(APISuccess::default())
}

pub async fn login(
    data: Data<AppState>,
    session_id: SessionId,
) -> Result<DriverSessionResponse, AppError> {
    let state = session(&data, &session_id).await?.login().await?;
    Ok(response(session_id, state))
}

pub async fn logout(
    data: Data<AppState>,
    session_id: SessionId,
) -> Result<DriverSessionResponse, AppError> {
    let state = session(&data, &session_id).await?.logout().await?;
    Ok(response(session_id, state))
}

pub async fn select_tab(
    data: Data<AppState>,
    session_id: SessionId,
    request: TabRequest,
) -> Result<DriverSessionResponse, AppError> {
    let state = session(&data, &session_id)
        .await?
        .select_tab(request.tab)
        .await?;
    Ok(response(session_id, state))
}

pub async fn toggle_online(
    data: Data<AppState>,
    session_id: SessionId,
) -> Result<DriverSessionResponse, AppError> {
    let state = session(&data, &session_id).await?.toggle_online().await?;
    Ok(response(session_id, state))
}

pub async fn accept_request(
    data: Data<AppState>,
    session_id: SessionId,
    notification_id: NotificationId,
) -> Result<DriverSessionResponse, AppError> {
    let state = session(&data, &session_id)
        .await?
        .accept(notification_id)
        .await?;
    Ok(response(session_id, state))
}

pub async fn decline_request(
    data: Data<AppState>,
    session_id: SessionId,
    notification_id: NotificationId,
) -> Result<DriverSessionResponse, AppError> {
    let state = session(&data, &session_id)
        .await?
        .decline(notification_id)
        .await?;
    Ok(response(session_id, state))
}

pub async fn complete_ride(
    data: Data<AppState>,
    session_id: SessionId,
) -> Result<DriverSessionResponse, AppError> {
    let state = session(&data, &session_id).await?.complete_ride().await?;
    Ok(response(session_id, state))
}
