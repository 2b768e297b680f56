/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use std::time::Duration;

use crate::incoming_api;
use actix::fut::{ready, Ready};
use actix_http::{header::CONTENT_LENGTH, StatusCode};
use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web::Data,
    Error, HttpRequest,
};
use futures::future::LocalBoxFuture;
use tokio::time::{timeout, Instant};
use tracing::Span;
use tracing::{error, info};
use tracing_actix_web::{DefaultRootSpanBuilder, RootSpanBuilder};
use uuid::Uuid;

use crate::{environment::AppState, tools::error::AppError};

/// Fails the request with `RequestTimeout` once `AppState::request_timeout` milliseconds pass.
///
/// Geocoder lookups carry their own shorter deadlines, so this only trips when a handler
/// is stuck behind something else, such as a busy session lock.
pub struct RequestTimeout;

impl<S: 'static> Transform<S, ServiceRequest> for RequestTimeout
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error>,
    S::Future: 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTimeoutMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTimeoutMiddleware { service }))
    }
}

pub struct RequestTimeoutMiddleware<S> {
    service: S,
}

impl<S> Service<ServiceRequest> for RequestTimeoutMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_timeout = req
            .app_data::<Data<AppState>>()
            .map(|data| Duration::from_millis(data.request_timeout));

        let fut = self.service.call(req);
        match request_timeout {
            Some(request_timeout) => Box::pin(async move {
                timeout(request_timeout, fut)
                    .await
                    .map_err(|_| Error::from(AppError::RequestTimeout))?
            }),
            None => Box::pin(fut),
        }
    }
}

/// Root span for every request, keyed by `x-request-id` (generated when absent) and the
/// `x-session-id` a client sends once it holds a rider or driver session.
pub struct DomainRootSpanBuilder;

impl RootSpanBuilder for DomainRootSpanBuilder {
    fn on_request_start(request: &ServiceRequest) -> Span {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(|value| value.to_string())
        };

        let request_id = header("x-request-id").unwrap_or_else(|| Uuid::new_v4().to_string());
        let session_id = header("x-session-id");

        tracing_actix_web::root_span!(request, request_id, session_id)
    }

    fn on_request_end<B: MessageBody>(span: Span, outcome: &Result<ServiceResponse<B>, Error>) {
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}

/// Logs every request with its latency and observes it into `INCOMING_API`.
pub struct IncomingRequestMetrics;

impl<S> Transform<S, ServiceRequest> for IncomingRequestMetrics
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error>,
    S::Future: 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = IncomingRequestMetricsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IncomingRequestMetricsMiddleware { service }))
    }
}

pub struct IncomingRequestMetricsMiddleware<S> {
    service: S,
}

impl<S> Service<ServiceRequest> for IncomingRequestMetricsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error>,
    S::Future: 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start_time = Instant::now();
        let req_method = req.method().to_string();
        let req_path = route_pattern(req.request());

        let fut = self.service.call(req);
        Box::pin(async move {
            match fut.await {
                Ok(response) => {
                    record_request(
                        response.response().error(),
                        response.status(),
                        &req_method,
                        &route_pattern(response.request()),
                        start_time,
                    );
                    Ok(response)
                }
                Err(err) => {
                    let status = err.error_response().status();
                    record_request(Some(&err), status, &req_method, &req_path, start_time);
                    Err(err)
                }
            }
        })
    }
}

/// Path with matched segments replaced by `:name`, keeping session ids out of metric labels.
fn route_pattern(request: &HttpRequest) -> String {
    request
        .match_info()
        .iter()
        .fold(request.path().to_string(), |path, (name, value)| {
            path.replace(value, format!(":{name}").as_str())
        })
}

fn record_request(
    err_resp: Option<&Error>,
    resp_status: StatusCode,
    req_method: &str,
    req_path: &str,
    start_time: Instant,
) {
    let latency = format!("{:?}ms", start_time.elapsed().as_millis());
    match err_resp {
        Some(err_resp) => {
            let err_code = err_resp.to_string();
            error!(tag = "[INCOMING API - ERROR]", request_method = %req_method, request_path = %req_path, response_code = err_code, response_status = resp_status.as_str(), latency = %latency);
            incoming_api!(req_method, req_path, resp_status.as_str(), err_code.as_str(), start_time);
        }
        None => {
            info!(tag = "[INCOMING API]", request_method = %req_method, request_path = %req_path, response_status = resp_status.as_str(), latency = %latency);
            incoming_api!(req_method, req_path, resp_status.as_str(), "SUCCESS", start_time);
        }
    }
}

/// Rejects requests whose `Content-Length` is above `AppState::max_allowed_req_size`.
pub struct CheckContentLength;

impl<S> Transform<S, ServiceRequest> for CheckContentLength
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error>,
    S::Future: 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = CheckContentLengthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CheckContentLengthMiddleware { service }))
    }
}

pub struct CheckContentLengthMiddleware<S> {
    service: S,
}

impl<S> Service<ServiceRequest> for CheckContentLengthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error>,
    S::Future: 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let content_length = req
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|content_length| content_length.to_str().ok()?.parse::<usize>().ok());
        let limit = req
            .app_data::<Data<AppState>>()
            .map(|data| data.max_allowed_req_size);

        match (content_length, limit) {
            (Some(content_length), Some(limit)) if content_length > limit => {
                Box::pin(async move {
                    Err(Error::from(AppError::LargePayloadSize(content_length, limit)))
                })
            }
            _ => Box::pin(self.service.call(req)),
        }
    }
}
