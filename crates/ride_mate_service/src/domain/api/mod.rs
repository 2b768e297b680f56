/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
pub mod ui;

use actix_web::web::ServiceConfig;

pub fn handler(config: &mut ServiceConfig) {
    config
        .service(ui::healthcheck::health_check)
        .service(ui::location::resolve_place)
        .service(ui::location::resolve_address)
        .service(ui::location::suggest_places)
        .service(ui::map::project)
        .service(ui::map::unproject)
        .service(ui::map::tiles)
        .service(ui::estimate::route_estimate)
        .service(ui::estimate::fare_estimate)
        .service(ui::rider::history)
        .service(ui::rider::start_session)
        .service(ui::rider::get_session)
        .service(ui::rider::end_session)
        .service(ui::rider::sign_in)
        .service(ui::rider::set_pickup)
        .service(ui::rider::set_pickup_pin)
        .service(ui::rider::set_drop)
        .service(ui::rider::set_drop_pin)
        .service(ui::rider::clear_drop)
        .service(ui::rider::toggle_vehicle_panel)
        .service(ui::rider::choose_vehicle)
        .service(ui::rider::confirm)
        .service(ui::rider::cancel)
        .service(ui::rider::complete)
        .service(ui::rider::open_history)
        .service(ui::rider::close_history)
        .service(ui::rider::fares)
        .service(ui::rider::tracking)
        .service(ui::rider::map)
        .service(ui::driver::start_session)
        .service(ui::driver::get_session)
        .service(ui::driver::end_session)
        .service(ui::driver::login)
        .service(ui::driver::logout)
        .service(ui::driver::select_tab)
        .service(ui::driver::toggle_online)
        .service(ui::driver::accept_request)
        .service(ui::driver::decline_request)
        .service(ui::driver::complete_ride);
}
