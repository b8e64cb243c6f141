use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use model::{AccessToken, Alert, Credentials, GridCell, Unit};

use crate::api::{ApiError, MapApi};

pub fn alert(id: &str) -> Alert {
    Alert {
        id: id.to_string(),
        category: "missiles".to_string(),
        title: "Red Alert".to_string(),
        description: "Rocket fire".to_string(),
        areas: Vec::new(),
        timestamp: "2024-05-01T12:00:00Z".to_string(),
    }
}

pub fn cell(id: &str, threat: f64) -> GridCell {
    GridCell {
        id: id.to_string(),
        coordinate: model::Coordinate::new(31.4, 35.0),
        threat_level: threat,
        importance_level: 0.2,
        building_density: 0.1,
        is_in_israel: true,
    }
}

pub fn unit(id: &str) -> Unit {
    Unit::new(id, model::Coordinate::new(31.4, 35.0))
}

#[derive(Default)]
struct Scripts {
    grids: Mutex<VecDeque<Result<Vec<GridCell>, ApiError>>>,
    placements: Mutex<VecDeque<Result<Vec<Unit>, ApiError>>>,
    resets: Mutex<VecDeque<Result<(), ApiError>>>,
    threats: Mutex<VecDeque<Result<(), ApiError>>>,
    alerts: Mutex<VecDeque<Result<Vec<Alert>, ApiError>>>,
    grid_fetches: AtomicUsize,
    alert_fetches: AtomicUsize,
    threat_reports: Mutex<Vec<(String, f64)>>,
}

/// Scripted `MapApi` double: tests enqueue responses per endpoint and assert
/// on observed call counts afterwards.
#[derive(Clone, Default)]
pub struct ScriptedApi {
    scripts: Arc<Scripts>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_grid(&self, response: Result<Vec<GridCell>, ApiError>) {
        self.scripts.grids.lock().unwrap().push_back(response);
    }

    pub fn script_placement(&self, response: Result<Vec<Unit>, ApiError>) {
        self.scripts.placements.lock().unwrap().push_back(response);
    }

    pub fn script_reset(&self, response: Result<(), ApiError>) {
        self.scripts.resets.lock().unwrap().push_back(response);
    }

    pub fn script_threat(&self, response: Result<(), ApiError>) {
        self.scripts.threats.lock().unwrap().push_back(response);
    }

    pub fn script_alerts(&self, response: Result<Vec<Alert>, ApiError>) {
        self.scripts.alerts.lock().unwrap().push_back(response);
    }

    pub fn grid_fetches(&self) -> usize {
        self.scripts.grid_fetches.load(Ordering::SeqCst)
    }

    pub fn alert_fetches(&self) -> usize {
        self.scripts.alert_fetches.load(Ordering::SeqCst)
    }

    pub fn threat_reports(&self) -> Vec<(String, f64)> {
        self.scripts.threat_reports.lock().unwrap().clone()
    }

    fn exhausted<T>(endpoint: &str) -> Result<T, ApiError> {
        Err(ApiError::Transport(format!("script exhausted: {endpoint}")))
    }
}

impl MapApi for ScriptedApi {
    async fn fetch_grid(&self) -> Result<Vec<GridCell>, ApiError> {
        self.scripts.grid_fetches.fetch_add(1, Ordering::SeqCst);
        self.scripts
            .grids
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Self::exhausted("grid"))
    }

    async fn place_units(&self, _count: u32) -> Result<Vec<Unit>, ApiError> {
        self.scripts
            .placements
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Self::exhausted("placement"))
    }

    async fn reset_units(&self) -> Result<(), ApiError> {
        self.scripts
            .resets
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Self::exhausted("reset"))
    }

    async fn report_threat(&self, cell_id: &str, increase: f64) -> Result<(), ApiError> {
        self.scripts
            .threat_reports
            .lock()
            .unwrap()
            .push((cell_id.to_string(), increase));
        self.scripts
            .threats
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Self::exhausted("threat"))
    }

    async fn fetch_alerts(&self) -> Result<Vec<Alert>, ApiError> {
        self.scripts.alert_fetches.fetch_add(1, Ordering::SeqCst);
        self.scripts
            .alerts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Self::exhausted("alerts"))
    }

    async fn login(&self, _credentials: &Credentials) -> Result<AccessToken, ApiError> {
        Ok(AccessToken {
            access_token: "test-token".to_string(),
        })
    }

    async fn signup(&self, _credentials: &Credentials) -> Result<AccessToken, ApiError> {
        Ok(AccessToken {
            access_token: "test-token".to_string(),
        })
    }
}
