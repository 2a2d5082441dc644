//! Catalogue view-state engine
//!
//! Owns the navigation mode, category filter, watchlist and detail/playback
//! selection for one session, and derives the visible title set from them.
//! Every operation is synchronous; nothing here suspends.

use crate::models::{
    Brand, CategoryFilter, DisplayTitle, NavigationMode, Title, TitleKind, WatchlistSet,
};
use crate::services::catalogue::Catalogue;
use serde::Serialize;
use std::sync::Arc;

/// Applies the mode predicate, then the category predicate, to the catalogue
///
/// The result keeps catalogue order. `WATCHLIST` ignores the category filter
/// and lists saved titles in catalogue order, not in the order they were saved.
pub fn compute_visible_set<'a>(
    catalogue: &'a [Title],
    mode: NavigationMode,
    filter: &CategoryFilter,
    watchlist: &WatchlistSet,
) -> Vec<&'a Title> {
    catalogue
        .iter()
        .filter(|title| matches_mode(title, mode, watchlist))
        .filter(|title| mode == NavigationMode::Watchlist || matches_category(title, filter))
        .collect()
}

fn matches_mode(title: &Title, mode: NavigationMode, watchlist: &WatchlistSet) -> bool {
    match mode {
        NavigationMode::Movies => title.kind == Some(TitleKind::Movie),
        NavigationMode::Series => title.kind == Some(TitleKind::Series),
        NavigationMode::Originals => title.is_original,
        NavigationMode::Watchlist => watchlist.contains(&title.id),
        NavigationMode::Home | NavigationMode::Search | NavigationMode::Catalogue => true,
    }
}

fn matches_category(title: &Title, filter: &CategoryFilter) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Category(category) => title.has_category(category),
    }
}

/// What the grid offers when it has nothing to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryAction {
    /// Leave the grid for the home screen
    GoHome,
    /// Drop the category filter
    ResetFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyState {
    pub message: String,
    pub action_label: &'static str,
    pub action: RecoveryAction,
}

/// A horizontal strip of titles on the home screen
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRow<'a> {
    pub title: &'static str,
    pub titles: Vec<&'a Title>,
}

/// What the video surface needs to start playing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Playback {
    pub title_id: String,
    pub title: String,
    pub video_id: String,
    pub embed_url: String,
    pub caption: String,
}

impl Playback {
    pub fn for_title(title: &Title) -> Self {
        let video_id = title.playable_video_id().to_string();
        Self {
            title_id: title.id.clone(),
            title: title.title.clone(),
            embed_url: format!(
                "https://www.youtube.com/embed/{}?autoplay=1&rel=0&modestbranding=1",
                video_id
            ),
            video_id,
            caption: format!(
                "Reproduzindo agora • {}",
                title.duration.as_deref().unwrap_or("Trailer")
            ),
        }
    }
}

/// Session-scoped navigation, filter, watchlist and selection state
#[derive(Debug, Clone, Default)]
pub struct ViewStateEngine {
    catalogue: Option<Arc<Catalogue>>,
    mode: NavigationMode,
    filter: CategoryFilter,
    watchlist: WatchlistSet,
    selected: Option<Title>,
    playing: bool,
}

impl ViewStateEngine {
    /// Creates an engine with no catalogue loaded yet
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalogue(catalogue: Arc<Catalogue>) -> Self {
        let mut engine = Self::new();
        engine.load_catalogue(catalogue);
        engine
    }

    pub fn load_catalogue(&mut self, catalogue: Arc<Catalogue>) {
        tracing::debug!(titles = catalogue.len(), "Catalogue attached to view state");
        self.catalogue = Some(catalogue);
    }

    pub fn catalogue(&self) -> Option<&Catalogue> {
        self.catalogue.as_deref()
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn category_filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn watchlist(&self) -> &WatchlistSet {
        &self.watchlist
    }

    pub fn selected(&self) -> Option<&Title> {
        self.selected.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Switches screens; any mode other than `CATALOGUE` clears the filter
    pub fn set_mode(&mut self, mode: NavigationMode) {
        if mode != NavigationMode::Catalogue {
            self.filter = CategoryFilter::All;
        }
        tracing::debug!(from = %self.mode, to = %mode, "Navigation mode changed");
        self.mode = mode;
    }

    pub fn set_category_filter(&mut self, filter: impl Into<CategoryFilter>) {
        self.filter = filter.into();
    }

    /// Opens the catalogue filtered by the brand's category
    ///
    /// Returns false, leaving state untouched, when the brand has no category.
    pub fn select_brand(&mut self, brand: &Brand) -> bool {
        let Some(category) = brand.filter_category.as_deref() else {
            return false;
        };
        self.set_category_filter(category);
        self.set_mode(NavigationMode::Catalogue);
        true
    }

    pub fn select_title(&mut self, title: Title) {
        self.selected = Some(title);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.playing = false;
    }

    /// Selects the title and starts the player
    pub fn play(&mut self, title: Title) -> Playback {
        let playback = Playback::for_title(&title);
        self.selected = Some(title);
        self.playing = true;
        playback
    }

    /// Stops the player, keeping the detail view open
    pub fn close_player(&mut self) {
        self.playing = false;
    }

    pub fn playback(&self) -> Option<Playback> {
        match (&self.selected, self.playing) {
            (Some(title), true) => Some(Playback::for_title(title)),
            _ => None,
        }
    }

    /// Returns whether the title is in the watchlist afterwards
    pub fn toggle_watchlist(&mut self, title: &Title) -> bool {
        self.watchlist.toggle(&title.id)
    }

    pub fn is_in_watchlist(&self, title_id: &str) -> bool {
        self.watchlist.contains(title_id)
    }

    /// Visible titles for the current state, or `None` before a catalogue is loaded
    pub fn visible_set(&self) -> Option<Vec<&Title>> {
        let catalogue = self.catalogue.as_deref()?;
        Some(compute_visible_set(
            catalogue.titles(),
            self.mode,
            &self.filter,
            &self.watchlist,
        ))
    }

    pub fn is_grid_view(&self) -> bool {
        self.mode.is_grid_view()
    }

    pub fn page_title(&self) -> String {
        self.mode.page_title(&self.filter)
    }

    /// Message and recovery action for an empty grid
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.is_grid_view() || !self.visible_set()?.is_empty() {
            return None;
        }

        Some(if self.mode == NavigationMode::Watchlist {
            EmptyState {
                message: "Sua lista está vazia.".to_string(),
                action_label: "Descobrir Títulos",
                action: RecoveryAction::GoHome,
            }
        } else {
            EmptyState {
                message: format!("Nenhum título encontrado para \"{}\".", self.filter),
                action_label: "Ver todos os títulos",
                action: RecoveryAction::ResetFilter,
            }
        })
    }

    /// Rows shown under the featured carousel
    pub fn home_rows(&self) -> Vec<ContentRow<'_>> {
        let Some(catalogue) = self.catalogue.as_deref() else {
            return Vec::new();
        };
        let titles = catalogue.titles();

        let mut rows = vec![ContentRow {
            title: "Recomendado para Você",
            titles: titles.iter().collect(),
        }];

        if !self.watchlist.is_empty() {
            rows.push(ContentRow {
                title: "Minha Lista",
                titles: titles
                    .iter()
                    .filter(|t| self.watchlist.contains(&t.id))
                    .collect(),
            });
        }

        rows.push(ContentRow {
            title: "Novidades no P+",
            titles: titles.iter().rev().collect(),
        });
        rows.push(ContentRow {
            title: "Originais P+",
            titles: titles.iter().filter(|t| t.is_original).collect(),
        });

        rows
    }

    /// Display projection carrying this session's watchlist flag
    pub fn project(&self, title: &Title) -> DisplayTitle {
        DisplayTitle::project(title, self.is_in_watchlist(&title.id))
    }
}
