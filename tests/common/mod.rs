#![allow(dead_code)]

use axum::{
    Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use link_expander::application::services::ExpansionService;
use link_expander::domain::resolver::DEFAULT_MAX_REDIRECTS;
use link_expander::domain::{Platform, PlatformCanonicalizer};
use link_expander::infrastructure::cache::{CacheService, EdgeCache, MemoryCache};
use link_expander::infrastructure::http::RedirectResolver;
use link_expander::state::AppState;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const PUBLIC_HOST: &str = "expander.test";
pub const CLIENT_MAX_AGE: u64 = 1800;

/// Throwaway HTTP server playing the role of short-link hosts.
///
/// Reachable as `127.0.0.1` (generic profile) and as `localhost`
/// (platform profile with [`test_platform`]).
pub struct Upstream {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl Upstream {
    pub async fn start() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/final", get(final_page))
            .route("/chain/{n}", get(chain))
            .route("/jump", get(jump))
            .route("/nested/page", get(nested_page))
            .route("/broken", get(broken))
            .route("/to-broken", get(to_broken))
            .route("/share", get(share))
            .route("/video/{id}", get(final_page))
            .route("/needs-referer", get(needs_referer))
            .with_state(hits.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, hits }
    }

    /// URL resolved with the generic profile.
    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.addr.port(), path)
    }

    /// URL resolved with the platform profile.
    pub fn platform_url(&self, path: &str) -> String {
        format!("http://localhost:{}{}", self.addr.port(), path)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Platform descriptor that treats `localhost` as a platform host.
pub fn test_platform() -> Platform {
    Platform::bilibili().with_domain_markers(["localhost"])
}

pub fn test_resolver() -> RedirectResolver {
    RedirectResolver::new(test_platform(), DEFAULT_MAX_REDIRECTS).unwrap()
}

pub fn create_test_state() -> AppState {
    create_test_state_with_cache(Arc::new(MemoryCache::new()))
}

pub fn create_test_state_with_cache(store: Arc<dyn CacheService>) -> AppState {
    let service = ExpansionService::new(
        Arc::new(test_resolver()),
        PlatformCanonicalizer::new(test_platform()),
        EdgeCache::new(store, 3600),
    );
    AppState::new(Arc::new(service), CLIENT_MAX_AGE, PUBLIC_HOST)
}

type Hits = State<Arc<AtomicUsize>>;

fn count(hits: &Hits) {
    hits.fetch_add(1, Ordering::SeqCst);
}

fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

async fn final_page(hits: Hits) -> &'static str {
    count(&hits);
    "final"
}

async fn chain(hits: Hits, Path(n): Path<usize>) -> Response {
    count(&hits);
    if n == 0 {
        "end of chain".into_response()
    } else {
        redirect(&format!("/chain/{}", n - 1))
    }
}

#[derive(Deserialize)]
struct JumpParams {
    to: String,
}

async fn jump(hits: Hits, Query(params): Query<JumpParams>) -> Response {
    count(&hits);
    redirect(&params.to)
}

async fn nested_page(hits: Hits) -> Response {
    count(&hits);
    redirect("other")
}

async fn broken(hits: Hits) -> StatusCode {
    count(&hits);
    StatusCode::FOUND
}

async fn to_broken(hits: Hits) -> Response {
    count(&hits);
    redirect("/broken")
}

async fn share(hits: Hits) -> Response {
    count(&hits);
    redirect("/video/BV1xx411c7mD?p=1&share_source=copy_web")
}

async fn needs_referer(hits: Hits, headers: HeaderMap) -> Response {
    count(&hits);
    let referer = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if referer == "https://www.bilibili.com/" {
        redirect("/final")
    } else {
        "no referer".into_response()
    }
}
