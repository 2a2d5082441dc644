use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{
    Brand, CategoryFilter, DisplayTitle, NavigationMode, WatchlistSet, FILTER_CATEGORIES,
};
use crate::services::{
    search::SearchStatus,
    view_state::{EmptyState, Playback},
    Session,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SetModeRequest {
    pub mode: NavigationMode,
}

#[derive(Debug, Deserialize)]
pub struct SetCategoryRequest {
    pub category: CategoryFilter,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    pub mode: NavigationMode,
    pub category: CategoryFilter,
    pub is_grid_view: bool,
    pub page_title: String,
    pub page_subtitle: &'static str,
    pub category_filters: Vec<&'static str>,
    /// `None` until a catalogue is loaded
    pub titles: Option<Vec<DisplayTitle>>,
    pub empty_state: Option<EmptyState>,
}

impl From<&Session> for ViewResponse {
    fn from(session: &Session) -> Self {
        let engine = session.engine();
        let mode = engine.mode();

        Self {
            mode,
            category: engine.category_filter().clone(),
            is_grid_view: engine.is_grid_view(),
            page_title: engine.page_title(),
            page_subtitle: mode.page_subtitle(),
            category_filters: if mode.shows_category_filters() {
                FILTER_CATEGORIES.to_vec()
            } else {
                Vec::new()
            },
            titles: engine
                .visible_set()
                .map(|titles| titles.into_iter().map(|t| engine.project(t)).collect()),
            empty_state: engine.empty_state(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WatchlistResponse {
    pub ids: WatchlistSet,
    /// Saved catalogue titles in the order they were added
    pub titles: Vec<DisplayTitle>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub id: String,
    pub in_watchlist: bool,
}

#[derive(Debug, Serialize)]
pub struct FeaturedResponse {
    pub index: usize,
    pub count: usize,
    pub title: DisplayTitle,
}

#[derive(Debug, Serialize)]
pub struct RowResponse {
    pub title: &'static str,
    pub titles: Vec<DisplayTitle>,
}

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub featured: Option<FeaturedResponse>,
    pub rows: Vec<RowResponse>,
}

impl From<&Session> for HomeResponse {
    fn from(session: &Session) -> Self {
        let engine = session.engine();

        let featured = session.featured_title().map(|title| FeaturedResponse {
            index: session.featured().index(),
            count: session.featured().len(),
            title: engine.project(title),
        });

        let rows = engine
            .home_rows()
            .into_iter()
            .map(|row| RowResponse {
                title: row.title,
                titles: row.titles.into_iter().map(|t| engine.project(t)).collect(),
            })
            .collect();

        Self { featured, rows }
    }
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub selected: Option<DisplayTitle>,
    pub playing: bool,
    pub playback: Option<Playback>,
}

impl From<&Session> for SelectionResponse {
    fn from(session: &Session) -> Self {
        let engine = session.engine();
        Self {
            selected: engine.selected().map(|t| engine.project(t)),
            playing: engine.is_playing(),
            playback: engine.playback(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    pub status: SearchStatus,
    pub is_loading: bool,
    pub results: Vec<DisplayTitle>,
    pub error: Option<String>,
}

impl From<&Session> for SearchResponse {
    fn from(session: &Session) -> Self {
        let search = session.search();
        Self {
            query: search.query().to_string(),
            status: search.status(),
            is_loading: search.is_loading(),
            results: search
                .results()
                .iter()
                .map(|t| session.engine().project(t))
                .collect(),
            error: search.error().map(str::to_string),
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Current grid view
pub async fn get_view(State(state): State<AppState>) -> Json<ViewResponse> {
    let session = state.session.read().await;
    Json(ViewResponse::from(&*session))
}

/// Switch navigation mode
pub async fn set_mode(
    State(state): State<AppState>,
    Json(request): Json<SetModeRequest>,
) -> Json<ViewResponse> {
    let response = {
        let mut session = state.session.write().await;
        session.set_mode(request.mode);
        ViewResponse::from(&*session)
    };
    state.sync_featured_rotation().await;
    Json(response)
}

/// Change the category filter
pub async fn set_category(
    State(state): State<AppState>,
    Json(request): Json<SetCategoryRequest>,
) -> Json<ViewResponse> {
    let mut session = state.session.write().await;
    session.set_category_filter(request.category);
    Json(ViewResponse::from(&*session))
}

/// Get all brands
pub async fn get_brands(State(state): State<AppState>) -> Json<Vec<Brand>> {
    Json(state.brands.as_ref().clone())
}

/// Open the catalogue filtered by a brand
pub async fn select_brand(
    State(state): State<AppState>,
    Path(brand_id): Path<String>,
) -> AppResult<Json<ViewResponse>> {
    let brand = state
        .brand(&brand_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Brand {}", brand_id)))?;

    let response = {
        let mut session = state.session.write().await;
        if !session.select_brand(&brand) {
            return Err(AppError::InvalidInput(format!(
                "Brand {} has no category",
                brand.name
            )));
        }
        ViewResponse::from(&*session)
    };
    state.sync_featured_rotation().await;

    Ok(Json(response))
}

/// Get the watchlist
pub async fn get_watchlist(State(state): State<AppState>) -> Json<WatchlistResponse> {
    let session = state.session.read().await;
    let engine = session.engine();
    let watchlist = engine.watchlist();

    let titles = watchlist
        .ids()
        .filter_map(|id| session.find_title(id))
        .map(|t| engine.project(t))
        .collect();

    Json(WatchlistResponse {
        ids: watchlist.clone(),
        titles,
    })
}

/// Add or remove a title from the watchlist
pub async fn toggle_watchlist(
    State(state): State<AppState>,
    Path(title_id): Path<String>,
) -> AppResult<Json<ToggleResponse>> {
    let mut session = state.session.write().await;
    let in_watchlist = session.toggle_watchlist(&title_id)?;
    Ok(Json(ToggleResponse {
        id: title_id,
        in_watchlist,
    }))
}

/// Home screen: featured title and content rows
pub async fn get_home(State(state): State<AppState>) -> Json<HomeResponse> {
    let session = state.session.read().await;
    Json(HomeResponse::from(&*session))
}

/// Jump the featured carousel to a slide
pub async fn jump_featured(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> AppResult<Json<HomeResponse>> {
    let mut session = state.session.write().await;
    session.jump_featured(index)?;
    Ok(Json(HomeResponse::from(&*session)))
}

/// Current detail/playback selection
pub async fn get_selection(State(state): State<AppState>) -> Json<SelectionResponse> {
    let session = state.session.read().await;
    Json(SelectionResponse::from(&*session))
}

/// Open the detail view for a title
pub async fn select_title(
    State(state): State<AppState>,
    Path(title_id): Path<String>,
) -> AppResult<Json<SelectionResponse>> {
    let mut session = state.session.write().await;
    session.select_title(&title_id)?;
    Ok(Json(SelectionResponse::from(&*session)))
}

/// Close the detail view
pub async fn clear_selection(State(state): State<AppState>) -> StatusCode {
    state.session.write().await.clear_selection();
    StatusCode::NO_CONTENT
}

/// Start playing a title
pub async fn play_title(
    State(state): State<AppState>,
    Path(title_id): Path<String>,
) -> AppResult<Json<Playback>> {
    let mut session = state.session.write().await;
    let playback = session.play(&title_id)?;
    Ok(Json(playback))
}

/// Close the player
pub async fn close_player(State(state): State<AppState>) -> StatusCode {
    state.session.write().await.close_player();
    StatusCode::NO_CONTENT
}

/// Current AI search state
pub async fn get_search(State(state): State<AppState>) -> Json<SearchResponse> {
    let session = state.session.read().await;
    Json(SearchResponse::from(&*session))
}

/// Run an AI search, switching to the search view
///
/// The session lock is released while the backend is called; a completion
/// superseded by a newer submission is dropped.
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Json<SearchResponse> {
    let ticket = state.session.write().await.begin_search(&request.query);

    if let Some(ticket) = ticket {
        state.sync_featured_rotation().await;

        tracing::info!(
            query = %request.query.trim(),
            sequence = ticket.sequence(),
            provider = state.recommender.backend_name(),
            "AI search started"
        );

        let outcome = state.recommender.recommend(&request.query).await;
        state.session.write().await.complete_search(ticket, outcome);
    }

    let session = state.session.read().await;
    Json(SearchResponse::from(&*session))
}

/// Dismiss the search error message
pub async fn dismiss_search_error(State(state): State<AppState>) -> Json<SearchResponse> {
    let mut session = state.session.write().await;
    session.dismiss_search_error();
    Json(SearchResponse::from(&*session))
}
