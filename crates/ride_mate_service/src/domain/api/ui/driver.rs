/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use actix_web::{
    delete, get, post,
    web::{Data, Json, Path},
};

use crate::{
    common::types::*,
    domain::{action::ui::driver, types::ui::driver::*},
    environment::AppState,
    tools::error::AppError,
};

type SessionResult = Result<Json<DriverSessionResponse>, AppError>;

#[post("/ui/driver/session")]
pub async fn start_session(data: Data<AppState>) -> SessionResult {
    Ok(Json(driver::start_session(data).await?))
}

#[get("/ui/driver/session/{sessionId}")]
pub async fn get_session(data: Data<AppState>, path: Path<String>) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(driver::get_session(data, session_id).await?))
}

#[delete("/ui/driver/session/{sessionId}")]
pub async fn end_session(data: Data<AppState>, path: Path<String>) -> Result<Json<APISuccess>, AppError> {
    let session_id = SessionId(path.into_inner());
    Ok(Json(driver::end_session(data, session_id).await?))
}

#[post("/ui/driver/session/{sessionId}/login")]
pub async fn login(data: Data<AppState>, path: Path<String>) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(driver::login(data, session_id).await?))
}

#[post("/ui/driver/session/{sessionId}/logout")]
pub async fn logout(data: Data<AppState>, path: Path<String>) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(driver::logout(data, session_id).await?))
}

#[post("/ui/driver/session/{sessionId}/tab")]
pub async fn select_tab(
    data: Data<AppState>,
    param_obj: Json<TabRequest>,
    path: Path<String>,
) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(
        driver::select_tab(data, session_id, param_obj.into_inner()).await?,
    ))
}

#[post("/ui/driver/session/{sessionId}/online")]
pub async fn toggle_online(data: Data<AppState>, path: Path<String>) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(driver::toggle_online(data, session_id).await?))
}

#[post("/ui/driver/session/{sessionId}/requests/{notificationId}/accept")]
pub async fn accept_request(data: Data<AppState>, path: Path<(String, String)>) -> SessionResult {
    let (session_id, notification_id) = path.into_inner();
    Ok(Json(
        driver::accept_request(data, SessionId(session_id), NotificationId(notification_id))
            .await?,
    ))
}

#[post("/ui/driver/session/{sessionId}/requests/{notificationId}/decline")]
pub async fn decline_request(data: Data<AppState>, path: Path<(String, String)>) -> SessionResult {
    let (session_id, notification_id) = path.into_inner();
    Ok(Json(
        driver::decline_request(data, SessionId(session_id), NotificationId(notification_id))
            .await?,
    ))
}

#[post("/ui/driver/session/{sessionId}/complete")]
pub async fn complete_ride(data: Data<AppState>, path: Path<String>) -> SessionResult {
    let session_id = SessionId(path.into_inner());
    Ok(Json(driver::complete_ride(data, session_id).await?))
}
