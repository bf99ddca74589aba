//! Event loop and periodic refresh.
//!
//! [`Dashboard::run`] is the single place where work happens after start-up.
//! User events arrive over an mpsc channel; a fixed-period interval reloads
//! the active section. Both are handled one at a time, each to completion.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::api::ShopApi;
use crate::controller::{Dashboard, DashboardError};
use crate::forms::FormSubmission;
use crate::section::Section;
use crate::surface::Surface;

/// Something the user did on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A navigation control was activated.
    Navigate(Section),
    /// A creation form was submitted.
    Submit(FormSubmission),
    /// A rendered action control was activated.
    Click(String),
    /// Manual reload of the active section.
    Refresh,
}

impl<A: ShopApi, S: Surface> Dashboard<A, S> {
    /// Handle one user event.
    ///
    /// # Errors
    ///
    /// Returns the handler's error; it has already been logged and shown.
    pub async fn handle(&mut self, event: UiEvent) -> Result<(), DashboardError> {
        match event {
            UiEvent::Navigate(section) => self.activate(section).await,
            UiEvent::Submit(submission) => self.submit(submission).await,
            UiEvent::Click(control) => self.click(&control).await,
            UiEvent::Refresh => self.refresh_active().await,
        }
    }

    /// Process events and poll ticks until the event channel closes.
    ///
    /// The first tick fires one full `period` after the call; a tick that
    /// falls due while an event is being handled is delayed, not bunched.
    pub async fn run(&mut self, mut events: mpsc::Receiver<UiEvent>, period: Duration) {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(period_secs = period.as_secs(), "Event loop started");

        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else {
                        info!("Event channel closed, stopping");
                        break;
                    };
                    if let Err(e) = self.handle(event).await {
                        debug!(error = %e, "Event handler failed");
                    }
                }
                _ = ticker.tick() => {
                    debug!(section = ?self.active(), "Poll tick");
                    if let Err(e) = self.refresh_active().await {
                        debug!(error = %e, "Poll refresh failed");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tokio::time::timeout;

    use super::*;
    use crate::api::fake::{FakeApi, sample_order};
    use crate::surface::{MemorySurface, Target};

    const PERIOD: Duration = Duration::from_secs(30);

    #[tokio::test(start_paused = true)]
    async fn test_polls_only_the_active_section() {
        let mut dashboard = Dashboard::new(
            FakeApi::with_orders(vec![sample_order("o1", "Emma")]),
            MemorySurface::new(),
        );
        dashboard.activate(Section::Orders).await.unwrap();
        dashboard.api().clear_calls();

        let (_tx, rx) = mpsc::channel(8);
        let elapsed = timeout(Duration::from_secs(91), dashboard.run(rx, PERIOD)).await;
        assert!(elapsed.is_err());

        assert_eq!(dashboard.api().calls("list_orders"), 3);
        assert_eq!(dashboard.api().total_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_a_full_period() {
        let mut dashboard = Dashboard::new(FakeApi::default(), MemorySurface::new());
        dashboard.activate(Section::Products).await.unwrap();
        dashboard.api().clear_calls();

        let (_tx, rx) = mpsc::channel(8);
        let _ = timeout(Duration::from_secs(29), dashboard.run(rx, PERIOD)).await;

        assert_eq!(dashboard.api().total_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_active_section_polls_nothing() {
        let mut dashboard = Dashboard::new(FakeApi::default(), MemorySurface::new());

        let (_tx, rx) = mpsc::channel(8);
        let _ = timeout(Duration::from_secs(95), dashboard.run(rx, PERIOD)).await;

        assert_eq!(dashboard.api().total_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_changes_what_is_polled() {
        let mut dashboard = Dashboard::new(FakeApi::default(), MemorySurface::new());
        dashboard.activate(Section::Orders).await.unwrap();
        dashboard.api().clear_calls();

        let (tx, rx) = mpsc::channel(8);
        tx.send(UiEvent::Navigate(Section::Customers)).await.unwrap();
        let _ = timeout(Duration::from_secs(61), dashboard.run(rx, PERIOD)).await;

        assert_eq!(dashboard.active(), Some(Section::Customers));
        assert_eq!(dashboard.api().calls("list_customers"), 3);
        assert_eq!(dashboard.api().calls("list_orders"), 0);
    }

    #[tokio::test]
    async fn test_run_stops_when_channel_closes() {
        let mut dashboard = Dashboard::new(FakeApi::default(), MemorySurface::new());

        let (tx, rx) = mpsc::channel(8);
        tx.send(UiEvent::Navigate(Section::Orders)).await.unwrap();
        tx.send(UiEvent::Refresh).await.unwrap();
        drop(tx);
        dashboard.run(rx, PERIOD).await;

        assert_eq!(dashboard.surface().visible, Some(Section::Orders));
        assert_eq!(dashboard.api().calls("list_orders"), 2);
        assert_eq!(dashboard.surface().render_count(Target::OrdersList), 2);
    }

    #[tokio::test]
    async fn test_failed_handler_does_not_stop_the_loop() {
        let mut dashboard = Dashboard::new(FakeApi::default(), MemorySurface::new());

        let (tx, rx) = mpsc::channel(8);
        tx.send(UiEvent::Click("delete-product-missing".to_string()))
            .await
            .unwrap();
        tx.send(UiEvent::Submit(FormSubmission::Product(
            crate::forms::ProductForm::default(),
        )))
        .await
        .unwrap();
        tx.send(UiEvent::Navigate(Section::Dashboard)).await.unwrap();
        drop(tx);
        dashboard.run(rx, PERIOD).await;

        assert_eq!(
            dashboard.surface().alerts,
            vec!["Please fill in all required fields".to_string()]
        );
        assert_eq!(dashboard.api().calls("dashboard"), 1);
    }
}
