//! Leaderboard read and submit endpoints.
//!
//! The submission pipeline, in order: payload shape validation, per-game
//! score and play-time bounds, per-client rate limiting, nickname
//! sanitization, durable insert, rank computation, retention trim. An entry
//! is either fully inserted and eligible for ranking or not inserted at
//! all; the trim never undoes or blocks an insert.
//!
//! ## Endpoints
//!
//! - GET /leaderboard?gameId=<id>&limit=<n> - Top entries for a game
//! - POST /leaderboard - Submit a finished game's score

use axum::{
    debug_handler,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use garde::Validate;
use shared::api::{
    LeaderboardEntryView, LeaderboardQuery, LeaderboardResponse, SubmitScorePayload,
    SubmitScoreResponse,
};

use crate::{
    error::AppError,
    middleware::client::ClientId,
    nickname,
    repos::NewEntry,
    services::{ranking, retention},
    state::AppState,
    stores::RateLimitDecision,
};

/// Most entries a single page can request.
const MAX_PAGE_LIMIT: u32 = 100;
/// Page size when the query does not specify one.
const DEFAULT_PAGE_LIMIT: u32 = 10;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_leaderboard).post(submit_score))
}

#[debug_handler]
async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let Some(game_id) = query.game_id else {
        return Err(AppError::Validation("gameId is required".to_string()));
    };

    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_LIMIT)
        .clamp(1, MAX_PAGE_LIMIT);

    let entries = state.store.top_for_game(&game_id, limit as i64).await?;

    let entries: Vec<LeaderboardEntryView> = entries
        .into_iter()
        .map(|e| LeaderboardEntryView {
            id: e.id,
            nickname: e.nickname,
            score: e.score,
            created_at: e.created_at,
        })
        .collect();

    Ok(Json(LeaderboardResponse { entries }))
}

#[debug_handler]
async fn submit_score(
    client: ClientId,
    State(state): State<AppState>,
    Json(payload): Json<SubmitScorePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if !state.games.validate_score(&payload.game_id, payload.score) {
        tracing::warn!(
            client_id = %client.0,
            game_id = %payload.game_id,
            score = payload.score,
            "submission rejected: invalid score"
        );
        return Err(AppError::Validation(
            "score out of range for game".to_string(),
        ));
    }

    if let Some(play_time_ms) = payload.play_time_ms {
        if !state.games.validate_play_time(&payload.game_id, play_time_ms) {
            tracing::warn!(
                client_id = %client.0,
                game_id = %payload.game_id,
                play_time_ms,
                "submission rejected: play time too short"
            );
            return Err(AppError::Validation(
                "play time too short for game".to_string(),
            ));
        }
    }

    if let RateLimitDecision::Exceeded { reset_at } =
        state.limiter.check(&client.0, &payload.game_id)
    {
        return Err(AppError::RateLimited(reset_at));
    }

    let nickname = nickname::sanitize(&payload.nickname);

    let entry = state
        .store
        .insert(NewEntry {
            game_id: payload.game_id,
            nickname,
            score: payload.score,
        })
        .await?;

    // The rank pivots on the created_at the store just assigned, so it is
    // consistent with what was actually persisted.
    let rank = ranking::compute_rank(state.store.as_ref(), &entry).await?;

    retention::trim_to_capacity(state.store.as_ref(), &entry.game_id).await;

    tracing::info!(
        client_id = %client.0,
        game_id = %entry.game_id,
        score = entry.score,
        rank,
        "score accepted"
    );

    Ok(Json(SubmitScoreResponse {
        rank,
        nickname: entry.nickname,
        score: entry.score,
        submitted_at: entry.created_at,
    }))
}
