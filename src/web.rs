//! Web front end.
//!
//! Routes:
//! - `GET /` renders the visitor's game
//! - `POST /move` plays the 0-based cell in the `position` form field
//! - `POST /reset` discards the game and starts a new one
//!
//! Each visitor's game lives in a [`SessionStore`] under the id carried by a
//! cookie. Every request does a single read-modify-write through
//! [`SessionStore::update`], so two requests from one visitor cannot both
//! apply a move to the same earlier state.

use crate::config::AppConfig;
use crate::games::tictactoe::{
    GameState, MoveError, Outcome, apply_move, display_value, evaluate, rules,
};
use crate::session::{InMemorySessionStore, SessionId, SessionStore, VisitorSession};
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, Request};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Router, body::Body};
use serde::Deserialize;
use std::fmt::Write as _;
use std::num::IntErrorKind;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tracing::{debug, error, info, instrument, warn};

/// Flash shown when the `position` field is missing or not a number.
pub const INVALID_SELECTION: &str = "Invalid move selection.";

/// Flash shown after a reset.
pub const NEW_GAME_STARTED: &str = "Started a new game.";

/// Shared state for the web handlers.
#[derive(Clone, derive_new::new)]
pub struct AppState {
    store: Arc<dyn SessionStore>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// State backed by a fresh in-memory store sized from `config`.
    pub fn in_memory(config: AppConfig) -> Self {
        let store = InMemorySessionStore::with_limits(
            Duration::from_secs(*config.session_ttl_secs()),
            *config.max_sessions(),
        );
        Self::new(Arc::new(store), Arc::new(config))
    }
}

/// Form body of `POST /move`.
#[derive(Debug, Deserialize)]
pub struct MoveForm {
    /// 0-based cell index, as typed.
    position: Option<String>,
}

/// Builds the router with all routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/move", post(make_move))
        .route("/reset", post(reset))
        .with_state(state)
}

/// Binds the configured address and serves until the process stops.
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let host = config.host().clone();
    let port = *config.port();
    let app = router(AppState::in_memory(config)).layer(ServiceBuilder::new().map_request(
        |req: Request<Body>| {
            debug!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        },
    ));

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!("Server ready at http://{}:{}/", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Session id from the request cookie, or a newly generated one.
///
/// Only ids the store already holds are honoured. The flag is true when the
/// id is new and must be sent back as a cookie.
fn visitor_id(
    headers: &HeaderMap,
    cookie_name: &str,
    store: &dyn SessionStore,
) -> (SessionId, bool) {
    let existing = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| SessionId::parse(value));

    match existing {
        Some(id) if store.contains(&id) => (id, false),
        presented => {
            if let Some(unknown) = presented {
                debug!(session_id = %unknown, "Ignoring unknown session id");
            }
            let id = SessionId::generate();
            debug!(session_id = %id, "Issuing new session");
            (id, true)
        }
    }
}

/// Adds the session cookie to `response` when the visitor did not send one.
fn with_session_cookie(
    mut response: Response,
    cookie_name: &str,
    id: &SessionId,
    is_new: bool,
) -> Response {
    if !is_new {
        return response;
    }

    let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", cookie_name, id);
    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().insert(SET_COOKIE, value);
        }
        Err(e) => warn!(error = %e, "Could not build session cookie"),
    }
    response
}

/// Runs `f` on the visitor's session and stores the result.
///
/// Missing or corrupt stored data is replaced by a fresh game. A new visitor
/// whose session is still untouched is not stored at all.
fn with_visitor<T>(
    state: &AppState,
    id: &SessionId,
    is_new: bool,
    mut f: impl FnMut(&mut VisitorSession) -> T,
) -> T {
    let starting = *state.config.starting_mark();
    let mut output = None;

    state.store.update(id, &mut |stored| {
        let mut visitor = VisitorSession::decode(stored.as_deref(), starting);
        output = Some(f(&mut visitor));
        if is_new && visitor == VisitorSession::fresh(starting) {
            return None;
        }
        match visitor.encode() {
            Ok(encoded) => Some(encoded),
            Err(e) => {
                error!(session_id = %id, error = %e, "Failed to encode session");
                None
            }
        }
    });

    // A store that never ran the closure still gets an answer from a fresh game.
    match output {
        Some(output) => output,
        None => f(&mut VisitorSession::fresh(starting)),
    }
}

/// Plays the submitted position on `state`, or explains why not.
fn submit_move(state: &GameState, raw_position: Option<&str>) -> Result<GameState, &'static str> {
    if evaluate(state).is_terminal() {
        return Err(MoveError::GameAlreadyOver.user_message());
    }

    let position = raw_position
        .and_then(|raw| parse_index(raw.trim()))
        .ok_or(INVALID_SELECTION)?;

    apply_move(state, position).map_err(|e| e.user_message())
}

/// Parses a form index. Integers too large for `isize` saturate so they
/// still reach the engine as out of range.
fn parse_index(raw: &str) -> Option<isize> {
    match raw.parse::<isize>() {
        Ok(index) => Some(index),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(isize::MAX),
            IntErrorKind::NegOverflow => Some(isize::MIN),
            _ => None,
        },
    }
}

#[instrument(skip_all)]
async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, is_new) =
        visitor_id(&headers, state.config.session_cookie(), state.store.as_ref());

    let (game, flashes) = with_visitor(&state, &id, is_new, |visitor| {
        (visitor.state.clone(), std::mem::take(&mut visitor.flashes))
    });

    let page = render_page(&game, &flashes);
    with_session_cookie(Html(page).into_response(), state.config.session_cookie(), &id, is_new)
}

#[instrument(skip_all)]
async fn make_move(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<MoveForm>, FormRejection>,
) -> Response {
    let (id, is_new) =
        visitor_id(&headers, state.config.session_cookie(), state.store.as_ref());

    let raw_position = match form {
        Ok(Form(form)) => form.position,
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable move form");
            None
        }
    };

    with_visitor(&state, &id, is_new, |visitor| {
        match submit_move(&visitor.state, raw_position.as_deref()) {
            Ok(next) => {
                info!(
                    session_id = %id,
                    position = ?raw_position,
                    outcome = %evaluate(&next),
                    "Move accepted"
                );
                visitor.state = next;
            }
            Err(message) => {
                debug!(
                    session_id = %id,
                    position = ?raw_position,
                    reason = message,
                    "Move refused"
                );
                visitor.flash(message);
            }
        }
    });

    with_session_cookie(
        Redirect::to("/").into_response(),
        state.config.session_cookie(),
        &id,
        is_new,
    )
}

#[instrument(skip_all)]
async fn reset(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, is_new) =
        visitor_id(&headers, state.config.session_cookie(), state.store.as_ref());
    let starting = *state.config.starting_mark();

    with_visitor(&state, &id, is_new, |visitor| {
        visitor.state = GameState::new(starting);
        visitor.flash(NEW_GAME_STARTED);
    });
    info!(session_id = %id, "Game reset");

    with_session_cookie(
        Redirect::to("/").into_response(),
        state.config.session_cookie(),
        &id,
        is_new,
    )
}

/// Renders the full HTML page for a game.
pub fn render_page(state: &GameState, flashes: &[String]) -> String {
    let board = state.board();
    let outcome = evaluate(state);
    let winning: &[usize] = rules::winning_line(board)
        .map(|(line, _)| line)
        .unwrap_or(&[]);

    let status = match outcome {
        Outcome::InProgress => format!("Player {} to move", state.active()),
        finished => finished.to_string(),
    };

    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Tic Tac Toe</title>\n<style>\n\
         .board {{ display: grid; grid-template-columns: repeat({size}, 3.5em); gap: 4px; }}\n\
         .cell {{ width: 3.5em; height: 3.5em; font-size: 1.2em; }}\n\
         .win {{ background: #ffe08a; }}\n\
         .flash {{ color: #a33; }}\n\
         </style>\n</head>\n<body>\n<h1>Tic Tac Toe</h1>\n",
        size = board.size()
    );

    if !flashes.is_empty() {
        html.push_str("<ul class=\"flashes\">\n");
        for message in flashes {
            let _ = writeln!(html, "<li class=\"flash\">{}</li>", escape_html(message));
        }
        html.push_str("</ul>\n");
    }

    let _ = writeln!(html, "<p class=\"status\">{}</p>", status);
    html.push_str("<div class=\"board\">\n");
    for index in 0..board.cell_count() {
        let value = display_value(board, index);
        let class = if winning.contains(&index) { "cell win" } else { "cell" };
        if board.is_empty(index) && !outcome.is_terminal() {
            let _ = writeln!(
                html,
                "<form method=\"post\" action=\"/move\">\
                 <button class=\"{}\" name=\"position\" value=\"{}\">{}</button></form>",
                class, index, value
            );
        } else {
            let _ = writeln!(html, "<div class=\"{}\">{}</div>", class, value);
        }
    }
    html.push_str("</div>\n");

    html.push_str(
        "<form method=\"post\" action=\"/reset\"><button>New game</button></form>\n\
         </body>\n</html>\n",
    );
    html
}

fn escape_html(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            other => other.to_string(),
        })
        .collect()
}
