/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use actix_web::{web, App, HttpServer};
use ride_mate_service::{
    domain::api,
    environment::{AppConfig, AppState},
    middleware::*,
    tools::{error::AppError, logger::*, prometheus::prometheus_metrics},
};
use std::env::var;
use tokio::signal::unix::{signal, SignalKind};
use tracing_actix_web::TracingLogger;

pub fn read_dhall_config(config_path: &str) -> Result<AppConfig, String> {
    serde_dhall::from_file(config_path)
        .parse::<AppConfig>()
        .map_err(|err| format!("Error reading config: {err}"))
}

#[actix_web::main]
async fn start_server() -> std::io::Result<()> {
    let dhall_config_path = var("DHALL_CONFIG")
        .unwrap_or_else(|_| "./dhall_config/ride_mate_service.dhall".to_string());
    let app_config = read_dhall_config(&dhall_config_path).unwrap_or_else(|err| {
        println!("Dhall Config Reading Error : {}", err);
        std::process::exit(1);
    });

    let _guard = setup_tracing(&app_config.logger_cfg);

    let port = app_config.port;
    let workers = app_config.workers;

    let data = web::Data::new(AppState::new(app_config));

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let app_data = data.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _| AppError::UnprocessibleRequest(err.to_string()).into()),
            )
            .app_data(
                web::QueryConfig::default()
                    .error_handler(|err, _| AppError::InvalidRequest(err.to_string()).into()),
            )
            .wrap(RequestTimeout)
            .wrap(CheckContentLength)
            .wrap(IncomingRequestMetrics)
            .wrap(TracingLogger::<DomainRootSpanBuilder>::new())
            .wrap(prometheus_metrics())
            .configure(api::handler)
    })
    .workers(workers)
    .disable_signals()
    .bind(("0.0.0.0", port))?
    .run();

    let server_handle = server.handle();
    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => info!(tag = "[Graceful Shutting Down]", signal = "SIGTERM"),
            _ = sigint.recv() => info!(tag = "[Graceful Shutting Down]", signal = "SIGINT"),
        }
        server_handle.stop(true).await;
    });

    info!(tag = "[Server Started]", port = port, workers = workers);
    server.await?;

    data.rider_sessions.clear().await;
    data.driver_sessions.clear().await;

    Ok(())
}

fn main() {
    start_server().expect("Failed to start the server");
}
