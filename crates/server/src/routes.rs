use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use roster::{Intent, ListController};
use serde::Deserialize;
use shared::domain::RecordId;
use tokio::sync::{mpsc, Mutex};
use tracing::info;
use uuid::Uuid;

use crate::render;

/// Live sessions are capped; the oldest is evicted once the cap is reached,
/// after which requests for it get a 404 like any unknown session.
const MAX_LIVE_SESSIONS: usize = 1024;

/// Insertion-ordered session map with FIFO eviction at [`MAX_LIVE_SESSIONS`].
struct SessionMap<T> {
    entries: HashMap<Uuid, T>,
    order: VecDeque<Uuid>,
}

impl<T> SessionMap<T> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn insert(&mut self, sid: Uuid, value: T) {
        while self.order.len() >= MAX_LIVE_SESSIONS {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(sid);
        self.entries.insert(sid, value);
    }

    fn get(&self, sid: &Uuid) -> Option<&T> {
        self.entries.get(sid)
    }

    fn get_mut(&mut self, sid: &Uuid) -> Option<&mut T> {
        self.entries.get_mut(sid)
    }
}

/// Shared server state: one controller per page session, one refresh counter
/// per grid session. Sessions are created on page load and live until the
/// process exits or they age out of the session cap; there is no
/// cross-session state.
pub struct AppState {
    sessions: Mutex<SessionMap<ListController>>,
    grids: Mutex<SessionMap<u64>>,
    testing: bool,
    shutdown: mpsc::Sender<()>,
}

impl AppState {
    pub fn new(testing: bool, shutdown: mpsc::Sender<()>) -> Self {
        Self {
            sessions: Mutex::new(SessionMap::new()),
            grids: Mutex::new(SessionMap::new()),
            testing,
            shutdown,
        }
    }
}

#[derive(Debug, Deserialize)]
struct NewRecordForm {
    #[serde(default)]
    new_first: String,
    #[serde(default)]
    new_last: String,
}

#[derive(Debug, Deserialize)]
struct UpdateRecordForm {
    #[serde(default)]
    first: String,
    #[serde(default)]
    last: String,
}

type SessionError = (StatusCode, String);

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/about", get(about))
        .route("/grid", get(grid))
        .route("/grid/:sid", get(grid_refresh))
        .route("/healthz", get(healthz))
        .route("/shutdown", get(shutdown))
        .route("/session/:sid", get(show_session))
        .route("/session/:sid/form", post(open_form))
        .route("/session/:sid/cancel", post(cancel_form))
        .route("/session/:sid/records", post(submit_record))
        .route("/session/:sid/records/remove-all", post(remove_all_records))
        .route("/session/:sid/records/:id/update", post(update_record))
        .route("/session/:sid/records/:id/remove", post(remove_record))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let sid = Uuid::new_v4();
    let controller = ListController::seeded();
    let html = render::index_page(sid, &controller.view(), Utc::now().timestamp());
    state.sessions.lock().await.insert(sid, controller);
    info!(%sid, "list session started");
    Html(html)
}

async fn about() -> Html<String> {
    Html(render::about_page())
}

async fn grid(State(state): State<Arc<AppState>>) -> Html<String> {
    let sid = Uuid::new_v4();
    state.grids.lock().await.insert(sid, 1);
    Html(render::grid_page(sid, 1, Utc::now().timestamp()))
}

async fn grid_refresh(
    State(state): State<Arc<AppState>>,
    Path(sid): Path<Uuid>,
) -> Result<Html<String>, SessionError> {
    let mut grids = state.grids.lock().await;
    let count = grids.get_mut(&sid).ok_or_else(|| session_not_found(sid))?;
    *count += 1;
    Ok(Html(render::grid_page(sid, *count, Utc::now().timestamp())))
}

/// Test-only kill switch mirroring the development server's shutdown hook;
/// inert unless the server was started with `testing` enabled.
async fn shutdown(State(state): State<Arc<AppState>>) -> &'static str {
    if state.testing {
        let _ = state.shutdown.try_send(());
        "shutdown"
    } else {
        "not testing"
    }
}

async fn show_session(
    State(state): State<Arc<AppState>>,
    Path(sid): Path<Uuid>,
) -> Result<Html<String>, SessionError> {
    let sessions = state.sessions.lock().await;
    let controller = sessions.get(&sid).ok_or_else(|| session_not_found(sid))?;
    Ok(Html(render::index_page(
        sid,
        &controller.view(),
        Utc::now().timestamp(),
    )))
}

async fn open_form(
    State(state): State<Arc<AppState>>,
    Path(sid): Path<Uuid>,
) -> Result<Html<String>, SessionError> {
    apply_intent(&state, sid, Intent::OpenForm).await
}

async fn cancel_form(
    State(state): State<Arc<AppState>>,
    Path(sid): Path<Uuid>,
) -> Result<Html<String>, SessionError> {
    apply_intent(&state, sid, Intent::Cancel).await
}

async fn submit_record(
    State(state): State<Arc<AppState>>,
    Path(sid): Path<Uuid>,
    Form(form): Form<NewRecordForm>,
) -> Result<Html<String>, SessionError> {
    apply_intent(
        &state,
        sid,
        Intent::Submit {
            first: form.new_first,
            last: form.new_last,
        },
    )
    .await
}

async fn update_record(
    State(state): State<Arc<AppState>>,
    Path((sid, id)): Path<(Uuid, i64)>,
    Form(form): Form<UpdateRecordForm>,
) -> Result<Html<String>, SessionError> {
    apply_intent(
        &state,
        sid,
        Intent::Update {
            id: RecordId(id),
            first: form.first,
            last: form.last,
        },
    )
    .await
}

async fn remove_record(
    State(state): State<Arc<AppState>>,
    Path((sid, id)): Path<(Uuid, i64)>,
) -> Result<Html<String>, SessionError> {
    apply_intent(&state, sid, Intent::Remove { id: RecordId(id) }).await
}

async fn remove_all_records(
    State(state): State<Arc<AppState>>,
    Path(sid): Path<Uuid>,
) -> Result<Html<String>, SessionError> {
    apply_intent(&state, sid, Intent::RemoveAll).await
}

// The session lock is held across apply + render, so intents for one session
// run to completion in arrival order.
async fn apply_intent(
    state: &AppState,
    sid: Uuid,
    intent: Intent,
) -> Result<Html<String>, SessionError> {
    let mut sessions = state.sessions.lock().await;
    let controller = sessions.get_mut(&sid).ok_or_else(|| session_not_found(sid))?;
    controller.apply(intent);
    Ok(Html(render::index_page(
        sid,
        &controller.view(),
        Utc::now().timestamp(),
    )))
}

fn session_not_found(sid: Uuid) -> SessionError {
    (StatusCode::NOT_FOUND, format!("unknown session: {sid}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use tower::ServiceExt;

    fn test_state(testing: bool) -> (Arc<AppState>, mpsc::Receiver<()>) {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        (Arc::new(AppState::new(testing, shutdown_tx)), shutdown_rx)
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf8 body")
    }

    fn session_id(html: &str) -> String {
        let start = html.find("/session/").expect("session url") + "/session/".len();
        html[start..start + 36].to_string()
    }

    #[test]
    fn session_map_evicts_oldest_once_full() {
        let mut map = SessionMap::new();
        let mut sids = Vec::new();
        for n in 0..MAX_LIVE_SESSIONS + 1 {
            let sid = Uuid::new_v4();
            sids.push(sid);
            map.insert(sid, n);
        }
        assert_eq!(map.entries.len(), MAX_LIVE_SESSIONS);
        assert!(map.get(&sids[0]).is_none());
        assert_eq!(map.get(sids.last().expect("sid")), Some(&MAX_LIVE_SESSIONS));
    }

    #[tokio::test]
    async fn healthz_responds_ok() {
        let (state, _rx) = test_state(false);
        let app = build_router(state);
        let response = app
            .oneshot(Request::get("/healthz").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn index_seeds_five_rows() {
        let (state, _rx) = test_state(false);
        let app = build_router(state);
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert_eq!(html.matches("<li id=\"li-node-").count(), 5);
        assert!(html.contains("<ul id=\"content-list\">"));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let (state, _rx) = test_state(false);
        let app = build_router(state);
        let sid = Uuid::new_v4();
        let response = app
            .oneshot(
                Request::post(format!("/session/{sid}/records/remove-all"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn remove_intent_renders_updated_view() {
        let (state, _rx) = test_state(false);
        let app = build_router(state);
        let response = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let sid = session_id(&body_text(response).await);

        let response = app
            .oneshot(
                Request::post(format!("/session/{sid}/records/1/remove"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<div id=\"message\">removed: 1</div>"));
        assert_eq!(html.matches("<li id=\"li-node-").count(), 4);
    }

    #[tokio::test]
    async fn submit_accepts_form_encoded_body() {
        let (state, _rx) = test_state(false);
        let app = build_router(state);
        let response = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let sid = session_id(&body_text(response).await);

        let response = app
            .oneshot(
                Request::post(format!("/session/{sid}/records"))
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from("new_first=Ann&new_last=Lee"))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<div id=\"message\">added</div>"));
        assert!(html.contains("<span>Ann Lee</span>"));
        assert_eq!(html.matches("<li id=\"li-node-").count(), 6);
    }

    #[tokio::test]
    async fn shutdown_route_is_inert_unless_testing() {
        let (state, mut rx) = test_state(false);
        let app = build_router(state);
        let response = app
            .oneshot(Request::get("/shutdown").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(body_text(response).await, "not testing");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn shutdown_route_signals_when_testing() {
        let (state, mut rx) = test_state(true);
        let app = build_router(state);
        let response = app
            .oneshot(Request::get("/shutdown").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(body_text(response).await, "shutdown");
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn grid_counts_refreshes_per_session() {
        let (state, _rx) = test_state(false);
        let app = build_router(state);
        let response = app
            .clone()
            .oneshot(Request::get("/grid").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let html = body_text(response).await;
        assert!(html.contains("<p id=\"refresh-count\">1</p>"));
        let start = html.find("/grid/").expect("grid url") + "/grid/".len();
        let sid = &html[start..start + 36];

        let response = app
            .oneshot(
                Request::get(format!("/grid/{sid}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let html = body_text(response).await;
        assert!(html.contains("<p id=\"refresh-count\">2</p>"));
    }
}
