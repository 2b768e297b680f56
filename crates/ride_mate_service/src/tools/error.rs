/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/

use actix_web::{
    http::{header::ContentType, StatusCode},
    HttpResponse, ResponseError,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_message: String,
    pub error_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
pub enum AppError {
    #[error("INTERNAL_ERROR")]
    InternalError(String),
    #[error("INVALID_REQUEST")]
    InvalidRequest(String),
    #[error("UNPROCESSIBLE_REQUEST")]
    UnprocessibleRequest(String),
    #[error("LARGE_PAYLOAD_SIZE")]
    LargePayloadSize(usize, usize),
    #[error("REQUEST_TIMEOUT")]
    RequestTimeout,
    #[error("EXTERNAL_API_CALL_ERROR")]
    ExternalAPICallError(String),
    #[error("EXTERNAL_API_TIMEOUT")]
    ExternalAPITimeout(String),
    #[error("SERIALIZATION_ERROR")]
    SerializationError(String),
    #[error("DESERIALIZATION_ERROR")]
    DeserializationError(String),
    #[error("LOCATION_NOT_FOUND")]
    LocationNotFound(String),
    #[error("PICKUP_NOT_SET")]
    PickupNotSet,
    #[error("BOOKING_INCOMPLETE")]
    BookingIncomplete(String),
    #[error("INVALID_TRANSITION")]
    InvalidTransition(String, String),
    #[error("SESSION_NOT_FOUND")]
    SessionNotFound(String),
    #[error("SESSION_LIMIT_EXCEEDED")]
    SessionLimitExceeded(usize),
    #[error("RIDE_REQUEST_NOT_FOUND")]
    RideRequestNotFound(String),
    #[error("ACTIVE_RIDE_EXISTS")]
    ActiveRideExists(String),
    #[error("NO_ACTIVE_RIDE")]
    NoActiveRide,
    #[error("DRIVER_OFFLINE")]
    DriverOffline,
}

impl AppError {
    fn error_message(&self) -> ErrorBody {
        ErrorBody {
            error_message: self.message(),
            error_code: self.code(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            AppError::InternalError(err) => err.to_string(),
            AppError::InvalidRequest(err) => err.to_string(),
            AppError::UnprocessibleRequest(err) => err.to_string(),
            AppError::LargePayloadSize(length, limit) => {
                format!("Content length ({length} Bytes) greater than allowed maximum limit : ({limit} Bytes)")
            }
            AppError::ExternalAPICallError(err) => err.to_string(),
            AppError::ExternalAPITimeout(service) => {
                format!("External API call timed out : {service}")
            }
            AppError::SerializationError(err) => err.to_string(),
            AppError::DeserializationError(err) => err.to_string(),
            AppError::LocationNotFound(hint) => {
                format!("Location not found. Try: {hint}")
            }
            AppError::PickupNotSet => "Please set pickup location first".to_string(),
            AppError::BookingIncomplete(missing) => {
                format!("Booking is incomplete : {missing} not set")
            }
            AppError::InvalidTransition(screen, event) => {
                format!("Invalid Transition : Screen - {screen}, Event - {event}")
            }
            AppError::SessionNotFound(session_id) => {
                format!("Session not found : {session_id}")
            }
            AppError::SessionLimitExceeded(limit) => {
                format!("Too many live sessions, limit : {limit}")
            }
            AppError::RideRequestNotFound(notification_id) => {
                format!("Ride request not found : {notification_id}")
            }
            AppError::ActiveRideExists(ride_id) => {
                format!("Complete the active ride first : {ride_id}")
            }
            AppError::NoActiveRide => "No active ride to complete".to_string(),
            AppError::DriverOffline => "Go online to accept ride requests".to_string(),
            _ => "Some Error Occured".to_string(),
        }
    }

    pub fn code(&self) -> String {
        self.to_string()
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(self.error_message())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UnprocessibleRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::LargePayloadSize(_, _) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            AppError::ExternalAPICallError(_) => StatusCode::BAD_GATEWAY,
            AppError::ExternalAPITimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DeserializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::LocationNotFound(_) => StatusCode::NOT_FOUND,
            AppError::PickupNotSet => StatusCode::BAD_REQUEST,
            AppError::BookingIncomplete(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidTransition(_, _) => StatusCode::CONFLICT,
            AppError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            AppError::SessionLimitExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::RideRequestNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ActiveRideExists(_) => StatusCode::CONFLICT,
            AppError::NoActiveRide => StatusCode::BAD_REQUEST,
            AppError::DriverOffline => StatusCode::BAD_REQUEST,
        }
    }
}
