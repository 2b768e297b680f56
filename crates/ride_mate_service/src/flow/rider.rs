/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
//! Rider app screen flow.
//!
//! `Splash -> Auth -> Map <-> {Confirmation -> Tracking -> Map, History -> Map}`
//!
//! All state changes go through [`reduce`], a pure function of the current state and an
//! event. [`RiderSession`] owns the state, performs the lookups an event needs before it is
//! reduced, and arms the timers of whichever screen is current. Leaving a screen drops its
//! timers, which cancels them.

use super::{session::FlowSession, timers::TimerGuard};
use crate::{
    common::{
        estimator::*, gazetteer, resolver::LocationResolver, types::*, utils::*,
    },
    screen_transition,
    tools::error::AppError,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{
    ops::ControlFlow,
    sync::{Arc, Weak},
    time::Duration,
};
use strum_macros::{Display, EnumString, IntoStaticStr};
use tokio::sync::Mutex;
use tracing::{info, warn};

const DRIVER_START_OFFSET: f64 = -0.01;
const DRIVER_APPROACH_RATE: f64 = 0.1;
const PROGRESS_PER_TICK: f64 = 3.33;
const MAX_PROGRESS: f64 = 100.0;
const INITIAL_ETA_MINUTES: f64 = 3.0;
const ETA_DECREMENT: f64 = 0.1;
const MIN_PHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum RiderScreen {
    Splash,
    Auth,
    Map,
    Confirmation,
    Tracking,
    History,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum SignIn {
    Google,
    Phone { number: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlan {
    pub distance: Kilometers,
    pub duration: Minutes,
    pub options: Vec<VehicleOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapState {
    pub pickup_text: String,
    pub pickup: Option<Point>,
    pub drop_text: String,
    pub drop: Option<Point>,
    pub plan: Option<RoutePlan>,
    pub vehicle_panel_open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedDriver {
    pub name: String,
    pub rating: f64,
    pub vehicle_number: String,
    pub vehicle_model: String,
    pub eta: Minutes,
    pub phone: String,
}

impl AssignedDriver {
    fn for_vehicle(vehicle: VehicleClass) -> Self {
        let vehicle_model = match vehicle {
            VehicleClass::Bike => "Honda Activa",
            VehicleClass::Auto => "Bajaj Auto",
            VehicleClass::Cab => "Maruti Swift",
        };
        Self {
            name: "Suresh Kumar".to_string(),
            rating: 4.8,
            vehicle_number: "KA-01-AB-1234".to_string(),
            vehicle_model: vehicle_model.to_string(),
            eta: Minutes(INITIAL_ETA_MINUTES as u32),
            phone: "+91 98765 43210".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub pickup_location: String,
    pub drop_location: String,
    pub pickup: Point,
    pub drop: Point,
    pub distance: Kilometers,
    pub duration: Minutes,
    pub vehicle: VehicleClass,
    pub fare: Fare,
    pub driver: AssignedDriver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackingStage {
    OnTheWay,
    Nearby,
    Arriving,
}

impl TrackingStage {
    fn from_progress(progress: f64) -> Self {
        if progress < 33.0 {
            TrackingStage::OnTheWay
        } else if progress < 66.0 {
            TrackingStage::Nearby
        } else {
            TrackingStage::Arriving
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            TrackingStage::OnTheWay => "Driver is on the way",
            TrackingStage::Nearby => "Driver is nearby",
            TrackingStage::Arriving => "Driver is arriving",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingState {
    pub pickup: Point,
    pub driver: Point,
    pub progress: f64,
    pub eta: f64,
    pub stage: TrackingStage,
}

impl TrackingState {
    pub fn start(pickup: Point) -> Self {
        let Latitude(lat) = pickup.lat;
        let Longitude(lon) = pickup.lon;
        Self {
            pickup,
            driver: Point::new(lat + DRIVER_START_OFFSET, lon + DRIVER_START_OFFSET),
            progress: 0.0,
            eta: INITIAL_ETA_MINUTES,
            stage: TrackingStage::OnTheWay,
        }
    }

    /// One simulated second: the driver closes a tenth of the remaining gap.
    pub fn advance(&self) -> Self {
        let step = |from: f64, to: f64| from + (to - from) * DRIVER_APPROACH_RATE;
        let progress = round_to((self.progress + PROGRESS_PER_TICK).min(MAX_PROGRESS), 2);
        Self {
            pickup: self.pickup,
            driver: Point::new(
                step(self.driver.lat.0, self.pickup.lat.0),
                step(self.driver.lon.0, self.pickup.lon.0),
            ),
            progress,
            eta: round_to((self.eta - ETA_DECREMENT).max(0.0), 1),
            stage: TrackingStage::from_progress(progress),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiderState {
    pub screen: RiderScreen,
    pub signed_in: bool,
    pub map: MapState,
    pub booking: Option<Booking>,
    pub tracking: Option<TrackingState>,
}

impl Default for RiderState {
    fn default() -> Self {
        Self {
            screen: RiderScreen::Splash,
            signed_in: false,
            map: MapState::default(),
            booking: None,
            tracking: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
pub enum RiderEvent {
    SplashElapsed,
    SignedIn,
    PickupResolved {
        text: String,
        point: Point,
        plan: Option<RoutePlan>,
    },
    PickupNotFound {
        text: String,
    },
    DropResolved {
        text: String,
        point: Point,
        plan: RoutePlan,
    },
    DropNotFound,
    DropCleared,
    VehiclePanelToggled(bool),
    VehicleChosen(VehicleClass),
    Confirmed,
    Cancelled,
    DriverMoved,
    RideFinished,
    HistoryOpened,
    HistoryClosed,
}

impl RiderEvent {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Applies `event` to `state`.
///
/// Fails with `InvalidTransition` when the event is not accepted on the current screen, and
/// with a precondition error (`PickupNotSet`, `BookingIncomplete`) when the screen accepts
/// the event but the booking is not far enough along. `state` is never modified.
pub fn reduce(state: &RiderState, event: RiderEvent) -> Result<RiderState, AppError> {
    use RiderEvent::*;
    use RiderScreen::*;

    let mut next = state.clone();

    match (state.screen, event) {
        (Splash, SplashElapsed) => next.screen = Auth,
        (Auth, SignedIn) => {
            next.signed_in = true;
            next.screen = Map;
        }
        (Map, PickupResolved { text, point, plan }) => {
            next.map.pickup_text = text;
            next.map.pickup = Some(point);
            if next.map.drop.is_some() {
                next.map.plan = plan;
            }
        }
        (Map, PickupNotFound { text }) => next.map.pickup_text = text,
        (Map, DropResolved { text, point, plan }) => {
            if state.map.pickup.is_none() {
                return Err(AppError::PickupNotSet);
            }
            next.map.drop_text = text;
            next.map.drop = Some(point);
            next.map.plan = Some(plan);
            next.map.vehicle_panel_open = true;
        }
        (Map, DropNotFound) => next.map.drop_text.clear(),
        (Map, DropCleared) => {
            next.map.drop_text.clear();
            next.map.drop = None;
            next.map.plan = None;
            next.map.vehicle_panel_open = false;
        }
        (Map, VehiclePanelToggled(open)) => {
            if open && state.map.plan.is_none() {
                return Err(AppError::BookingIncomplete("drop location".to_string()));
            }
            next.map.vehicle_panel_open = open;
        }
        (Map, VehicleChosen(vehicle)) => {
            let booking = new_booking(&state.map, vehicle)?;
            next.booking = Some(booking);
            next.map.vehicle_panel_open = false;
            next.screen = Confirmation;
        }
        (Map, HistoryOpened) => next.screen = History,
        (History, HistoryClosed) => next.screen = Map,
        (Confirmation, Confirmed) => {
            let booking = state
                .booking
                .as_ref()
                .ok_or(AppError::BookingIncomplete("vehicle".to_string()))?;
            next.tracking = Some(TrackingState::start(booking.pickup));
            next.screen = Tracking;
        }
        (Confirmation, Cancelled) => {
            next.booking = None;
            next.screen = Map;
        }
        (Tracking, DriverMoved) => {
            next.tracking = state.tracking.as_ref().map(TrackingState::advance);
        }
        (Tracking, RideFinished) => {
            next.booking = None;
            next.tracking = None;
            next.map = MapState::default();
            next.screen = Map;
        }
        (screen, event) => {
            return Err(AppError::InvalidTransition(
                screen.to_string(),
                event.name().to_string(),
            ))
        }
    }

    Ok(next)
}

fn new_booking(map: &MapState, vehicle: VehicleClass) -> Result<Booking, AppError> {
    let pickup = map
        .pickup
        .ok_or(AppError::BookingIncomplete("pickup location".to_string()))?;
    let (drop, plan) = map
        .drop
        .zip(map.plan.as_ref())
        .ok_or(AppError::BookingIncomplete("drop location".to_string()))?;
    let option = plan
        .options
        .iter()
        .find(|option| option.vehicle == vehicle)
        .ok_or(AppError::BookingIncomplete(format!("{vehicle} fare")))?;

    Ok(Booking {
        pickup_location: map.pickup_text.to_owned(),
        drop_location: map.drop_text.to_owned(),
        pickup,
        drop,
        distance: plan.distance,
        duration: plan.duration,
        vehicle,
        fare: option.fare,
        driver: AssignedDriver::for_vehicle(vehicle),
    })
}

#[derive(Debug, Clone, Copy)]
pub struct FlowTimings {
    pub splash_delay: Duration,
    pub ride_duration: Duration,
    pub driver_tick: Duration,
}

/// Everything a rider session needs from the outside world.
pub struct RiderContext {
    pub resolver: Arc<LocationResolver>,
    pub fare_estimator: Arc<dyn FareEstimator>,
    pub duration_estimator: Arc<dyn DurationEstimator>,
    pub timings: FlowTimings,
}

impl RiderContext {
    pub fn plan_route(&self, pickup: &Point, drop: &Point) -> RoutePlan {
        let distance = distance_km(pickup, drop);
        let duration = self.duration_estimator.estimate(distance);
        RoutePlan {
            distance,
            duration,
            options: vehicle_options(self.fare_estimator.as_ref(), distance, duration),
        }
    }
}

struct RiderInner {
    state: RiderState,
    timers: Vec<TimerGuard>,
}

pub struct RiderSession {
    id: SessionId,
    ctx: Arc<RiderContext>,
    inner: Mutex<RiderInner>,
}

fn arm_timers(
    session: &Weak<RiderSession>,
    timings: &FlowTimings,
    screen: RiderScreen,
) -> Vec<TimerGuard> {
    match screen {
        RiderScreen::Splash => vec![TimerGuard::once(
            "rider_splash",
            timings.splash_delay,
            fire(session.clone(), RiderEvent::SplashElapsed),
        )],
        RiderScreen::Tracking => {
            let ticker = session.clone();
            vec![
                TimerGuard::every("rider_driver_tick", timings.driver_tick, move || {
                    let session = ticker.clone();
                    async move {
                        match session.upgrade() {
                            Some(session) => match session.dispatch(RiderEvent::DriverMoved).await
                            {
                                Ok(_) => ControlFlow::Continue(()),
                                Err(_) => ControlFlow::Break(()),
                            },
                            None => ControlFlow::Break(()),
                        }
                    }
                }),
                TimerGuard::once(
                    "rider_ride_complete",
                    timings.ride_duration,
                    fire(session.clone(), RiderEvent::RideFinished),
                ),
            ]
        }
        _ => vec![],
    }
}

async fn fire(session: Weak<RiderSession>, event: RiderEvent) {
    if let Some(session) = session.upgrade() {
        let name = event.name();
        if let Err(err) = session.dispatch(event).await {
            warn!(tag = "[Timer Event Rejected]", session_id = %session.id, event = name, error = %err.code());
        }
    }
}

fn valid_phone_number(number: &str) -> bool {
    number.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

impl RiderSession {
    /// Creates a session on the splash screen with its splash timer running.
    pub fn start(id: SessionId, ctx: Arc<RiderContext>) -> Arc<Self> {
        Arc::new_cyclic(|weak| {
            let state = RiderState::default();
            let timers = arm_timers(weak, &ctx.timings, state.screen);
            Self {
                id,
                ctx,
                inner: Mutex::new(RiderInner { state, timers }),
            }
        })
    }

    pub async fn snapshot(&self) -> RiderState {
        self.inner.lock().await.state.clone()
    }

    pub async fn dispatch(self: &Arc<Self>, event: RiderEvent) -> Result<RiderState, AppError> {
        let mut inner = self.inner.lock().await;
        self.apply(&mut inner, event)
    }

    fn apply(
        self: &Arc<Self>,
        inner: &mut RiderInner,
        event: RiderEvent,
    ) -> Result<RiderState, AppError> {
        let from = inner.state.screen;
        inner.state = reduce(&inner.state, event)?;
        let to = inner.state.screen;

        if from != to {
            inner.timers.clear();
            inner.timers = arm_timers(&Arc::downgrade(self), &self.ctx.timings, to);
            screen_transition!("rider", from.to_string().as_str(), to.to_string().as_str());
            info!(tag = "[Screen Transition]", app = "rider", session_id = %self.id, from = %from, to = %to);
        }

        Ok(inner.state.clone())
    }

    fn ensure_screen(
        state: &RiderState,
        screen: RiderScreen,
        event: &str,
    ) -> Result<(), AppError> {
        if state.screen == screen {
            Ok(())
        } else {
            Err(AppError::InvalidTransition(
                state.screen.to_string(),
                event.to_string(),
            ))
        }
    }

    pub async fn sign_in(self: &Arc<Self>, method: SignIn) -> Result<RiderState, AppError> {
        if let SignIn::Phone { number } = &method {
            if !valid_phone_number(number) {
                return Err(AppError::InvalidRequest(format!(
                    "Phone number must have at least {MIN_PHONE_DIGITS} digits"
                )));
            }
        }
        self.dispatch(RiderEvent::SignedIn).await
    }

    /// Checks that a location lookup still applies, without holding the lock through it.
    async fn lookup_allowed(&self, event: &str, needs_pickup: bool) -> Result<(), AppError> {
        let inner = self.inner.lock().await;
        Self::ensure_screen(&inner.state, RiderScreen::Map, event)?;
        if needs_pickup && inner.state.map.pickup.is_none() {
            return Err(AppError::PickupNotSet);
        }
        Ok(())
    }

    /// Resolves `text` and makes it the pickup. An unknown place keeps the typed text and
    /// the previous pickup coordinate.
    pub async fn set_pickup(self: &Arc<Self>, text: &str) -> Result<RiderState, AppError> {
        self.lookup_allowed("PickupResolved", false).await?;
        let resolved = self.ctx.resolver.resolve_coordinate(text).await;

        let mut inner = self.inner.lock().await;
        match resolved {
            Ok(point) => {
                let plan = inner
                    .state
                    .map
                    .drop
                    .map(|drop| self.ctx.plan_route(&point, &drop));
                self.apply(
                    &mut inner,
                    RiderEvent::PickupResolved {
                        text: text.to_string(),
                        point,
                        plan,
                    },
                )
            }
            Err(AppError::LocationNotFound(_)) => {
                self.apply(
                    &mut inner,
                    RiderEvent::PickupNotFound {
                        text: text.to_string(),
                    },
                )?;
                Err(AppError::LocationNotFound(gazetteer::hint(true)))
            }
            Err(err) => Err(err),
        }
    }

    /// Makes `point` the pickup, labelled with its reverse-geocoded address.
    pub async fn set_pickup_pin(self: &Arc<Self>, point: Point) -> Result<RiderState, AppError> {
        self.lookup_allowed("PickupResolved", false).await?;
        let text = self.ctx.resolver.resolve_address(&point).await;

        let mut inner = self.inner.lock().await;
        let plan = inner
            .state
            .map
            .drop
            .map(|drop| self.ctx.plan_route(&point, &drop));
        self.apply(&mut inner, RiderEvent::PickupResolved { text, point, plan })
    }

    /// Resolves `text` as the drop, computes the route and opens the vehicle panel. An
    /// unknown place clears the drop text.
    pub async fn set_drop(self: &Arc<Self>, text: &str) -> Result<RiderState, AppError> {
        self.lookup_allowed("DropResolved", true).await?;
        let resolved = self.ctx.resolver.resolve_coordinate(text).await;

        let mut inner = self.inner.lock().await;
        match resolved {
            Ok(point) => {
                let pickup = inner.state.map.pickup.ok_or(AppError::PickupNotSet)?;
                let plan = self.ctx.plan_route(&pickup, &point);
                self.apply(
                    &mut inner,
                    RiderEvent::DropResolved {
                        text: text.to_string(),
                        point,
                        plan,
                    },
                )
            }
            Err(AppError::LocationNotFound(_)) => {
                self.apply(&mut inner, RiderEvent::DropNotFound)?;
                Err(AppError::LocationNotFound(gazetteer::hint(false)))
            }
            Err(err) => Err(err),
        }
    }

    pub async fn set_drop_pin(self: &Arc<Self>, point: Point) -> Result<RiderState, AppError> {
        self.lookup_allowed("DropResolved", true).await?;
        let text = self.ctx.resolver.resolve_address(&point).await;

        let mut inner = self.inner.lock().await;
        let pickup = inner.state.map.pickup.ok_or(AppError::PickupNotSet)?;
        let plan = self.ctx.plan_route(&pickup, &point);
        self.apply(&mut inner, RiderEvent::DropResolved { text, point, plan })
    }

    pub async fn clear_drop(self: &Arc<Self>) -> Result<RiderState, AppError> {
        self.dispatch(RiderEvent::DropCleared).await
    }

    pub async fn toggle_vehicle_panel(self: &Arc<Self>, open: bool) -> Result<RiderState, AppError> {
        self.dispatch(RiderEvent::VehiclePanelToggled(open)).await
    }

    pub async fn choose_vehicle(
        self: &Arc<Self>,
        vehicle: VehicleClass,
    ) -> Result<RiderState, AppError> {
        self.dispatch(RiderEvent::VehicleChosen(vehicle)).await
    }

    pub async fn confirm(self: &Arc<Self>) -> Result<RiderState, AppError> {
        self.dispatch(RiderEvent::Confirmed).await
    }

    pub async fn cancel(self: &Arc<Self>) -> Result<RiderState, AppError> {
        self.dispatch(RiderEvent::Cancelled).await
    }

    pub async fn complete(self: &Arc<Self>) -> Result<RiderState, AppError> {
        self.dispatch(RiderEvent::RideFinished).await
    }

    pub async fn open_history(self: &Arc<Self>) -> Result<RiderState, AppError> {
        self.dispatch(RiderEvent::HistoryOpened).await
    }

    pub async fn close_history(self: &Arc<Self>) -> Result<RiderState, AppError> {
        self.dispatch(RiderEvent::HistoryClosed).await
    }

    /// Quoted vehicle options for the current route.
    pub async fn fares(&self) -> Result<RoutePlan, AppError> {
        self.snapshot()
            .await
            .map
            .plan
            .ok_or(AppError::BookingIncomplete("drop location".to_string()))
    }

    pub async fn tracking(&self) -> Result<TrackingState, AppError> {
        let state = self.snapshot().await;
        state.tracking.ok_or(AppError::InvalidRequest(format!(
            "No ride is being tracked, current screen : {}",
            state.screen
        )))
    }

    pub async fn armed_timers(&self) -> Vec<&'static str> {
        self.inner
            .lock()
            .await
            .timers
            .iter()
            .filter(|timer| !timer.is_finished())
            .map(TimerGuard::name)
            .collect()
    }
}

#[async_trait]
impl FlowSession for RiderSession {
    const APP: &'static str = "rider";

    fn id(&self) -> &SessionId {
        &self.id
    }

    async fn teardown(&self) {
        self.inner.lock().await.timers.clear();
    }
}
