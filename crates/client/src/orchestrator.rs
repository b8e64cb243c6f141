use runtime::metrics::Metrics;
use runtime::sequence::{Seq, Sequencer};
use tokio::sync::watch;
use tracing::warn;

use model::{Alert, GridCell, Unit};

use crate::api::{ApiError, MapApi};
use crate::poller::{spawn_alert_poller, PollerHandle};

const GRID_FETCH_ERROR: &str = "Failed to load map data. Please try again later.";
const PLACE_ERROR: &str = "Failed to place domes. Please try again later.";
const RESET_ERROR: &str = "Failed to reset map. Please try again later.";
const THREAT_ERROR: &str = "Failed to update threat level. Please try again later.";

/// Grid fetch lifecycle, exposed as a human-readable status line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    NotStarted,
    Fetching,
    Fetched,
    Errored,
}

impl std::fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchStatus::NotStarted => write!(f, "Not started"),
            FetchStatus::Fetching => write!(f, "Fetching data..."),
            FetchStatus::Fetched => write!(f, "Data fetched successfully"),
            FetchStatus::Errored => write!(f, "Error fetching data"),
        }
    }
}

/// Canonical visualization state and the fetch-after-mutate policy.
///
/// Every write action runs as mutation → (on success) full grid refetch:
/// a mutation's server-side effects can touch derived fields anywhere in the
/// grid, so correctness requires resynchronizing the whole snapshot rather
/// than patching locally. Collections are only ever replaced wholesale; a
/// failed action sets the error message and leaves the prior state intact.
///
/// Overlapping grid refetches are guarded by a [`Sequencer`]: a stale
/// response (issued earlier, completing later) is dropped instead of
/// overwriting a newer snapshot.
pub struct ViewOrchestrator<B> {
    api: B,
    grid: Vec<GridCell>,
    units: Vec<Unit>,
    error: Option<String>,
    status: FetchStatus,
    grid_seq: Sequencer,
    metrics: Metrics,
    alerts_rx: Option<watch::Receiver<Vec<Alert>>>,
    poller: Option<PollerHandle>,
}

impl<B: MapApi> ViewOrchestrator<B> {
    pub fn new(api: B) -> Self {
        Self {
            api,
            grid: Vec::new(),
            units: Vec::new(),
            error: None,
            status: FetchStatus::NotStarted,
            grid_seq: Sequencer::new(),
            metrics: Metrics::new(),
            alerts_rx: None,
            poller: None,
        }
    }

    pub fn grid(&self) -> &[GridCell] {
        &self.grid
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Status readout for the corner overlay.
    pub fn status_line(&self) -> String {
        format!(
            "Fetch status: {} ({} cells)",
            self.status,
            self.grid.len()
        )
    }

    /// Latest published alert overlay (empty until the poller starts).
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts_rx
            .as_ref()
            .map(|rx| rx.borrow().clone())
            .unwrap_or_default()
    }

    /// Issues a grid refetch and applies the response unless it went stale.
    pub async fn refresh_grid(&mut self) {
        let seq = self.begin_grid_refresh();
        let result = self.api.fetch_grid().await;
        self.apply_grid_result(seq, result);
    }

    /// Marks a refetch as issued. Split from [`Self::apply_grid_result`] so
    /// overlapping-completion orderings are testable deterministically.
    pub fn begin_grid_refresh(&mut self) -> Seq {
        self.status = FetchStatus::Fetching;
        self.grid_seq.begin()
    }

    /// Applies one refetch outcome. Returns whether the grid was replaced.
    pub fn apply_grid_result(
        &mut self,
        seq: Seq,
        result: Result<Vec<GridCell>, ApiError>,
    ) -> bool {
        match result {
            Ok(cells) => {
                if !self.grid_seq.try_commit(seq) {
                    warn!("dropping stale grid response");
                    return false;
                }
                self.metrics.set_gauge("grid.cells", cells.len() as i64);
                self.grid = cells;
                self.status = FetchStatus::Fetched;
                true
            }
            Err(err) => {
                // Only the newest request owns the status and error fields.
                if self.grid_seq.is_latest(seq) {
                    warn!("grid fetch failed: {err}");
                    self.status = FetchStatus::Errored;
                    self.error = Some(GRID_FETCH_ERROR.to_string());
                }
                false
            }
        }
    }

    /// Places `count` units, then resynchronizes the grid.
    pub async fn place_units(&mut self, count: u32) {
        let result = self.api.place_units(count).await;
        match result {
            Ok(units) => {
                self.units = units;
                self.refresh_grid().await;
            }
            Err(err) => {
                warn!("unit placement failed: {err}");
                self.error = Some(PLACE_ERROR.to_string());
            }
        }
    }

    /// Clears all placed units, then resynchronizes the grid.
    pub async fn reset_units(&mut self) {
        let result = self.api.reset_units().await;
        match result {
            Ok(()) => {
                self.units.clear();
                self.refresh_grid().await;
            }
            Err(err) => {
                warn!("reset failed: {err}");
                self.error = Some(RESET_ERROR.to_string());
            }
        }
    }

    /// Reports a threat increase for one cell, then resynchronizes the grid.
    ///
    /// The server owns threat derivation; there is no local single-cell patch.
    pub async fn report_threat_increase(&mut self, cell_id: &str, amount: f64) {
        let result = self.api.report_threat(cell_id, amount).await;
        match result {
            Ok(()) => {
                self.refresh_grid().await;
            }
            Err(err) => {
                warn!("threat report failed: {err}");
                self.error = Some(THREAT_ERROR.to_string());
            }
        }
    }
}

impl<B> ViewOrchestrator<B>
where
    B: MapApi + Clone + Send + Sync + 'static,
{
    /// Starts the live-alert poll loop. Idempotent per orchestrator.
    pub fn start_alert_poller(&mut self) {
        if self.poller.is_some() {
            return;
        }
        let (handle, rx) = spawn_alert_poller(self.api.clone());
        self.poller = Some(handle);
        self.alerts_rx = Some(rx);
    }

    /// Cancels the poll timer. Safe to call on an already-stopped poller.
    pub fn stop_alert_poller(&mut self) {
        if let Some(handle) = self.poller.take() {
            handle.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::api::ApiError;
    use crate::testutil::{alert, cell, unit, ScriptedApi};

    use super::{FetchStatus, ViewOrchestrator};

    fn transport_err<T>() -> Result<T, ApiError> {
        Err(ApiError::Transport("connection refused".to_string()))
    }

    #[tokio::test]
    async fn collections_start_empty() {
        let orch = ViewOrchestrator::new(ScriptedApi::new());
        assert!(orch.grid().is_empty());
        assert!(orch.units().is_empty());
        assert!(orch.alerts().is_empty());
        assert_eq!(orch.status(), FetchStatus::NotStarted);
        assert_eq!(orch.error(), None);
    }

    #[tokio::test]
    async fn refresh_replaces_grid_wholesale() {
        let api = ScriptedApi::new();
        api.script_grid(Ok(vec![cell("c1", 0.5), cell("c2", 0.7)]));
        api.script_grid(Ok(vec![cell("c3", 0.1)]));
        let mut orch = ViewOrchestrator::new(api);

        orch.refresh_grid().await;
        assert_eq!(orch.grid().len(), 2);
        assert_eq!(orch.status(), FetchStatus::Fetched);

        // The next snapshot fully supersedes the previous one.
        orch.refresh_grid().await;
        let ids: Vec<&str> = orch.grid().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c3"]);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_prior_grid_and_sets_error() {
        let api = ScriptedApi::new();
        api.script_grid(Ok(vec![cell("c1", 0.5)]));
        api.script_grid(transport_err());
        let mut orch = ViewOrchestrator::new(api);

        orch.refresh_grid().await;
        orch.refresh_grid().await;

        assert_eq!(orch.grid().len(), 1);
        assert_eq!(orch.status(), FetchStatus::Errored);
        assert_eq!(
            orch.error(),
            Some("Failed to load map data. Please try again later.")
        );
    }

    #[tokio::test]
    async fn status_line_is_human_readable() {
        let api = ScriptedApi::new();
        api.script_grid(Ok(vec![cell("c1", 0.5)]));
        let mut orch = ViewOrchestrator::new(api);
        assert_eq!(orch.status_line(), "Fetch status: Not started (0 cells)");
        orch.refresh_grid().await;
        assert_eq!(
            orch.status_line(),
            "Fetch status: Data fetched successfully (1 cells)"
        );
    }

    #[tokio::test]
    async fn placement_replaces_units_then_refetches_grid_once() {
        let api = ScriptedApi::new();
        api.script_placement(Ok(vec![unit("d1"), unit("d2"), unit("d3")]));
        api.script_grid(Ok(vec![cell("c1", 0.9)]));
        let mut orch = ViewOrchestrator::new(api.clone());

        orch.place_units(3).await;

        assert_eq!(orch.units().len(), 3);
        // Exactly one refetch, issued after the placement response.
        assert_eq!(api.grid_fetches(), 1);
        assert_eq!(orch.grid().len(), 1);
    }

    #[tokio::test]
    async fn failed_placement_keeps_units_and_skips_refetch() {
        let api = ScriptedApi::new();
        api.script_placement(Ok(vec![unit("d1")]));
        api.script_grid(Ok(vec![cell("c1", 0.5)]));
        api.script_placement(transport_err());
        let mut orch = ViewOrchestrator::new(api.clone());

        orch.place_units(1).await;
        orch.place_units(5).await;

        // Prior placement survives; no second grid fetch was issued.
        assert_eq!(orch.units().len(), 1);
        assert_eq!(api.grid_fetches(), 1);
        assert_eq!(
            orch.error(),
            Some("Failed to place domes. Please try again later.")
        );
    }

    #[tokio::test]
    async fn reset_clears_units_and_refetches() {
        let api = ScriptedApi::new();
        api.script_placement(Ok(vec![unit("d1")]));
        api.script_grid(Ok(vec![cell("c1", 0.5)]));
        api.script_reset(Ok(()));
        api.script_grid(Ok(vec![cell("c1", 0.2)]));
        let mut orch = ViewOrchestrator::new(api.clone());

        orch.place_units(1).await;
        orch.reset_units().await;

        assert!(orch.units().is_empty());
        assert_eq!(api.grid_fetches(), 2);
        assert_eq!(orch.grid()[0].threat_level, 0.2);
    }

    #[tokio::test]
    async fn failed_reset_sets_error_only() {
        let api = ScriptedApi::new();
        api.script_placement(Ok(vec![unit("d1")]));
        api.script_grid(Ok(vec![cell("c1", 0.5)]));
        api.script_reset(transport_err());
        let mut orch = ViewOrchestrator::new(api.clone());

        orch.place_units(1).await;
        orch.reset_units().await;

        assert_eq!(orch.units().len(), 1);
        assert_eq!(api.grid_fetches(), 1);
        assert_eq!(
            orch.error(),
            Some("Failed to reset map. Please try again later.")
        );
    }

    #[tokio::test]
    async fn threat_report_posts_delta_then_refetches_whole_grid() {
        let api = ScriptedApi::new();
        api.script_threat(Ok(()));
        api.script_grid(Ok(vec![cell("c1", 0.7)]));
        let mut orch = ViewOrchestrator::new(api.clone());

        orch.report_threat_increase("c1", 0.2).await;

        assert_eq!(api.threat_reports(), vec![("c1".to_string(), 0.2)]);
        assert_eq!(api.grid_fetches(), 1);
        assert_eq!(orch.grid()[0].threat_level, 0.7);
    }

    #[tokio::test]
    async fn stale_grid_response_is_dropped() {
        let api = ScriptedApi::new();
        let mut orch = ViewOrchestrator::new(api);

        // Two overlapping refetches; the later-issued one completes first.
        let first = orch.begin_grid_refresh();
        let second = orch.begin_grid_refresh();

        assert!(orch.apply_grid_result(second, Ok(vec![cell("new", 0.9)])));
        assert!(!orch.apply_grid_result(first, Ok(vec![cell("old", 0.1)])));

        let ids: Vec<&str> = orch.grid().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["new"]);
        assert_eq!(orch.status(), FetchStatus::Fetched);
    }

    #[tokio::test]
    async fn stale_failure_does_not_clobber_newer_success() {
        let api = ScriptedApi::new();
        let mut orch = ViewOrchestrator::new(api);

        let first = orch.begin_grid_refresh();
        let second = orch.begin_grid_refresh();

        assert!(orch.apply_grid_result(second, Ok(vec![cell("new", 0.9)])));
        assert!(!orch.apply_grid_result(first, transport_err()));

        assert_eq!(orch.status(), FetchStatus::Fetched);
        assert_eq!(orch.error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn alert_poller_publishes_into_orchestrator_state() {
        let api = ScriptedApi::new();
        api.script_alerts(Ok(vec![alert("a1")]));
        let mut orch = ViewOrchestrator::new(api);

        orch.start_alert_poller();
        // The first poll fires on start; yield until it lands.
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;

        let alerts = orch.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "a1");

        orch.stop_alert_poller();
        // Stopping twice is a no-op, never a double release.
        orch.stop_alert_poller();
    }
}
