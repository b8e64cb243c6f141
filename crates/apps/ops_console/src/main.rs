use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use client::api::{HttpMapApi, HttpTileFetch, MapApi};
use client::orchestrator::ViewOrchestrator;
use client::token::TokenStore;
use model::{Coordinate, Credentials};
use runtime::cancel::{cancellation, CancelToken};
use runtime::clock::{Clock, SystemClock};
use runtime::frame::Frame;
use storage::FileStore;
use tiles::id::{TileId, UrlTemplate};
use tiles::layer::CachedTileLayer;
use view::grid::GridRenderer;
use view::markers::{MarkerAnimator, StepOutcome};
use view::symbology::ViewMode;

// Default view center, matching the initial map framing.
const HOME_LAT: f64 = 31.4;
const HOME_LNG: f64 = 35.0;
const HOME_ZOOM: u32 = 8;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_url = env::var("MAP_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let cache_dir = PathBuf::from(env::var("CACHE_DIR").unwrap_or_else(|_| ".cache".to_string()));
    let unit_count: u32 = env::var("UNIT_COUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    if let Err(err) = std::fs::create_dir_all(&cache_dir) {
        warn!("cache dir unavailable: {err}");
    }

    let api = HttpMapApi::new(&api_url);
    info!("ops console targeting {}", api.base_url());

    login_if_configured(&api, cache_dir.join("session.json")).await;

    let mut orch = ViewOrchestrator::new(api.clone());
    orch.refresh_grid().await;
    match orch.error() {
        None => info!("{}", orch.status_line()),
        Some(message) => error!("{message}"),
    }

    let renderer = GridRenderer::new();
    let shapes = renderer.shapes(orch.grid());
    info!(
        "rendered {} cells in {:?} mode",
        shapes.len(),
        ViewMode::default()
    );
    if let Some(hit) = renderer.pick(
        orch.grid(),
        Coordinate {
            lat: HOME_LAT,
            lng: HOME_LNG,
        },
    ) {
        info!("cell under view center: {hit}");
    }

    orch.start_alert_poller();

    let (frame_guard, frame_cancel) = cancellation();
    let mut animation = None;
    if unit_count > 0 {
        orch.place_units(unit_count).await;
        match orch.error() {
            None => info!("placed {} units", orch.units().len()),
            Some(message) => error!("{message}"),
        }
        animation = Some(tokio::spawn(animate_markers(
            orch.units().to_vec(),
            frame_cancel.clone(),
        )));
    }

    prefetch_tiles(cache_dir.join("tiles.json")).await;

    let mut status_ticker = tokio::time::interval(Duration::from_secs(5));
    status_ticker.tick().await;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
            _ = status_ticker.tick() => {
                info!("{} | {} alerts active", orch.status_line(), orch.alerts().len());
            }
        }
    }

    frame_guard.cancel();
    if let Some(task) = animation {
        let _ = task.await;
    }
    orch.stop_alert_poller();
}

/// Authenticates when MAP_USERNAME/MAP_PASSWORD are set, persisting the
/// session token so later runs can reuse it.
async fn login_if_configured(api: &HttpMapApi, session_path: PathBuf) {
    let (Ok(username), Ok(password)) = (env::var("MAP_USERNAME"), env::var("MAP_PASSWORD")) else {
        return;
    };

    let store = match FileStore::open(&session_path) {
        Ok(store) => store,
        Err(err) => {
            warn!("session store unavailable: {err}");
            return;
        }
    };
    let mut tokens = TokenStore::new(store);

    match api.login(&Credentials { username, password }).await {
        Ok(token) => {
            if let Err(err) = tokens.save(&token.access_token) {
                warn!("failed to persist session token: {err}");
            } else {
                info!("authenticated");
            }
        }
        Err(err) => warn!("login failed: {err}"),
    }
}

/// Drives unit marker interpolation to rest, one step per frame tick.
async fn animate_markers(targets: Vec<model::Unit>, cancel: CancelToken) {
    let clock = SystemClock::new();
    let mut animator = MarkerAnimator::new();
    animator.retarget(targets, clock.now());

    let mut frames = tokio::time::interval(Duration::from_millis(16));
    let mut frame = Frame::first(clock.now());
    loop {
        frames.tick().await;
        if cancel.is_cancelled() {
            info!("animation cancelled at frame {}", frame.index);
            return;
        }
        frame = frame.next(clock.now());
        if animator.step(frame.time) == StepOutcome::Settled {
            break;
        }
    }
    info!(
        "{} markers settled after {} frames",
        animator.positions().len(),
        frame.index
    );
}

/// Warms the basemap cache for the 3x3 tile block around the home view.
async fn prefetch_tiles(cache_path: PathBuf) {
    let store = match FileStore::open(&cache_path) {
        Ok(store) => store,
        Err(err) => {
            warn!("tile cache unavailable, skipping prefetch: {err}");
            return;
        }
    };

    let mut layer = CachedTileLayer::new(UrlTemplate::osm(), store, HttpTileFetch::new());
    let center = TileId::containing(HOME_LAT, HOME_LNG, HOME_ZOOM);

    let mut fetched = 0usize;
    for dx in -1i64..=1 {
        for dy in -1i64..=1 {
            let x = center.x as i64 + dx;
            let y = center.y as i64 + dy;
            if x < 0 || y < 0 {
                continue;
            }
            let tile = TileId::new(HOME_ZOOM, x as u32, y as u32);
            match layer.load(tile).await {
                Ok(image) => {
                    fetched += 1;
                    info!("tile {}/{}/{} ready ({})", tile.zoom, tile.x, tile.y, image.mime);
                }
                Err(err) => warn!("tile {}/{}/{} failed: {err}", tile.zoom, tile.x, tile.y),
            }
        }
    }
    info!("prefetched {fetched} tiles; {:?}", layer.metrics().snapshot());
    layer.close();
}
