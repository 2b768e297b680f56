/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
//! Scoped timers for automatic screen transitions.
//!
//! A [`TimerGuard`] owns a spawned tokio task and aborts it when dropped, so a timer can
//! never outlive the screen (or session) that armed it.

use std::{future::Future, ops::ControlFlow, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval_at, sleep, Instant, MissedTickBehavior},
};
use tracing::debug;

pub struct TimerGuard {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl TimerGuard {
    /// Runs `task` once after `delay`.
    pub fn once<F>(name: &'static str, delay: Duration, task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            debug!(tag = "[Timer Fired]", timer = name);
            task.await;
        });
        Self { name, handle }
    }

    /// Runs `tick` every `period`, first after one full period, until it returns `Break`.
    pub fn every<F, Fut>(name: &'static str, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ControlFlow<()>> + Send,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tick().await.is_break() {
                    debug!(tag = "[Timer Stopped]", timer = name);
                    break;
                }
            }
        });
        Self { name, handle }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            debug!(tag = "[Timer Cancelled]", timer = self.name);
            self.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[tokio::test(start_paused = true)]
    async fn test_once_fires_after_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let _guard = TimerGuard::once("test", Duration::from_secs(2), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        sleep(Duration::from_millis(1999)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_guard_never_fires() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let guard = TimerGuard::once("test", Duration::from_secs(2), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        sleep(Duration::from_secs(1)).await;
        drop(guard);
        sleep(Duration::from_secs(5)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_ticks_until_dropped() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let guard = TimerGuard::every("test", Duration::from_secs(1), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                ControlFlow::Continue(())
            }
        });

        sleep(Duration::from_millis(3500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);

        drop(guard);
        sleep(Duration::from_secs(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_stops_on_break() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let guard = TimerGuard::every("test", Duration::from_secs(1), move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 1 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }
        });

        sleep(Duration::from_secs(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 2);
        assert!(guard.is_finished());
    }
}
