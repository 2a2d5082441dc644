use crate::{
    error::{AppError, AppResult},
    models::{Brand, CategoryFilter, NavigationMode, Title},
    services::{
        catalogue::Catalogue,
        featured::FeaturedCarousel,
        recommendations::SearchOutcome,
        search::{SearchSession, SearchTicket},
        view_state::{Playback, ViewStateEngine},
    },
};
use std::sync::Arc;

/// Root state container for one browsing session
///
/// Everything the presentation layer can change goes through these methods;
/// the components are only handed out by shared reference.
#[derive(Debug, Clone)]
pub struct Session {
    engine: ViewStateEngine,
    search: SearchSession,
    featured: FeaturedCarousel,
}

impl Session {
    pub fn new(catalogue: Arc<Catalogue>) -> Self {
        Self {
            featured: FeaturedCarousel::for_catalogue(&catalogue),
            engine: ViewStateEngine::with_catalogue(catalogue),
            search: SearchSession::new(),
        }
    }

    pub fn engine(&self) -> &ViewStateEngine {
        &self.engine
    }

    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    pub fn featured(&self) -> &FeaturedCarousel {
        &self.featured
    }

    pub fn mode(&self) -> NavigationMode {
        self.engine.mode()
    }

    /// Switches screens; closing the search view drops its results
    pub fn set_mode(&mut self, mode: NavigationMode) {
        let leaving_search = self.leaves_search(mode);
        self.engine.set_mode(mode);
        if leaving_search {
            self.search.reset();
        }
    }

    pub fn set_category_filter(&mut self, filter: impl Into<CategoryFilter>) {
        self.engine.set_category_filter(filter);
    }

    pub fn select_brand(&mut self, brand: &Brand) -> bool {
        let leaving_search = self.leaves_search(NavigationMode::Catalogue);
        let selected = self.engine.select_brand(brand);
        if selected && leaving_search {
            self.search.reset();
        }
        selected
    }

    fn leaves_search(&self, next: NavigationMode) -> bool {
        self.engine.mode() == NavigationMode::Search && next != NavigationMode::Search
    }

    fn catalogue_title(&self, title_id: &str) -> Option<&Title> {
        self.engine.catalogue()?.get(title_id)
    }

    /// Looks a title up in the catalogue, then in the current AI results
    pub fn find_title(&self, title_id: &str) -> Option<&Title> {
        self.catalogue_title(title_id)
            .or_else(|| self.search.find(title_id))
    }

    fn require_title(&self, title_id: &str) -> AppResult<Title> {
        self.find_title(title_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Title {}", title_id)))
    }

    /// Flips watchlist membership of a catalogue title
    pub fn toggle_watchlist(&mut self, title_id: &str) -> AppResult<bool> {
        let title = self
            .catalogue_title(title_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Catalogue title {}", title_id)))?;
        let added = self.engine.toggle_watchlist(&title);
        tracing::info!(title_id = %title_id, added, "Watchlist toggled");
        Ok(added)
    }

    pub fn select_title(&mut self, title_id: &str) -> AppResult<()> {
        let title = self.require_title(title_id)?;
        self.engine.select_title(title);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.engine.clear_selection();
    }

    pub fn play(&mut self, title_id: &str) -> AppResult<Playback> {
        let title = self.require_title(title_id)?;
        let playback = self.engine.play(title);
        tracing::info!(title_id = %title_id, video_id = %playback.video_id, "Playback started");
        Ok(playback)
    }

    pub fn close_player(&mut self) {
        self.engine.close_player();
    }

    /// Starts a search, opening the search view if another screen is active
    ///
    /// Results only live inside SEARCH, so they are dropped again by the usual
    /// reset on leaving it. Blank queries change nothing.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        let ticket = self.search.begin(query)?;
        if self.engine.mode() != NavigationMode::Search {
            self.engine.set_mode(NavigationMode::Search);
        }
        Some(ticket)
    }

    pub fn complete_search(&mut self, ticket: SearchTicket, outcome: SearchOutcome) -> bool {
        self.search.complete(ticket, outcome)
    }

    pub fn dismiss_search_error(&mut self) {
        self.search.dismiss_error();
    }

    pub fn advance_featured(&mut self) {
        self.featured.advance();
    }

    pub fn jump_featured(&mut self, index: usize) -> AppResult<()> {
        if self.featured.jump_to(index) {
            Ok(())
        } else {
            Err(AppError::InvalidInput(format!(
                "Featured index {} out of range (0..{})",
                index,
                self.featured.len()
            )))
        }
    }

    pub fn featured_title(&self) -> Option<&Title> {
        self.featured.current(self.engine.catalogue()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{builtin_brands, RecommendationRecord, RecommendationResponse};
    use crate::services::recommendations::map_recommendations;
    use crate::services::search::SearchStatus;

    fn session() -> Session {
        Session::new(Arc::new(Catalogue::builtin()))
    }

    fn ai_titles() -> Vec<Title> {
        map_recommendations(RecommendationResponse {
            recommendations: vec![RecommendationRecord {
                title: "Galáxia Perdida".to_string(),
                description: "Uma odisseia.".to_string(),
                genre: "Ficção".to_string(),
                visual_key: "space".to_string(),
            }],
        })
    }

    #[test]
    fn test_leaving_search_drops_results() {
        let mut session = session();
        session.set_mode(NavigationMode::Search);
        let ticket = session.begin_search("espaço").unwrap();
        session.complete_search(ticket, SearchOutcome::Completed(ai_titles()));
        assert!(session.find_title("ai-0").is_some());

        session.set_mode(NavigationMode::Home);
        assert_eq!(session.search().status(), SearchStatus::Idle);
        assert!(session.find_title("ai-0").is_none());
    }

    #[test]
    fn test_search_from_home_is_scoped_to_search_view() {
        let mut session = session();
        let ticket = session.begin_search("espaço").unwrap();
        assert_eq!(session.mode(), NavigationMode::Search);
        session.complete_search(ticket, SearchOutcome::Completed(ai_titles()));
        assert!(session.find_title("ai-0").is_some());

        session.set_mode(NavigationMode::Movies);
        assert_eq!(session.search().status(), SearchStatus::Idle);
        assert!(session.find_title("ai-0").is_none());
        assert!(matches!(
            session.select_title("ai-0"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_blank_search_keeps_current_view() {
        let mut session = session();
        session.set_mode(NavigationMode::Series);
        assert!(session.begin_search("   ").is_none());
        assert_eq!(session.mode(), NavigationMode::Series);
    }

    #[test]
    fn test_staying_in_search_keeps_results() {
        let mut session = session();
        session.set_mode(NavigationMode::Search);
        let ticket = session.begin_search("espaço").unwrap();
        session.complete_search(ticket, SearchOutcome::Completed(ai_titles()));
        session.set_mode(NavigationMode::Search);
        assert_eq!(session.search().results().len(), 1);
    }

    #[test]
    fn test_brand_from_search_resets_search() {
        let mut session = session();
        session.set_mode(NavigationMode::Search);
        let ticket = session.begin_search("natureza").unwrap();

        let brands = builtin_brands();
        assert!(session.select_brand(&brands[1]));
        assert_eq!(session.mode(), NavigationMode::Catalogue);
        assert!(!session.complete_search(ticket, SearchOutcome::Completed(ai_titles())));
    }

    #[test]
    fn test_play_ai_title() {
        let mut session = session();
        session.set_mode(NavigationMode::Search);
        let ticket = session.begin_search("espaço").unwrap();
        session.complete_search(ticket, SearchOutcome::Completed(ai_titles()));

        let playback = session.play("ai-0").unwrap();
        assert_eq!(playback.video_id, "LXb3EKWsInQ");
        assert!(session.engine().is_playing());
        assert_eq!(session.engine().selected().unwrap().title, "Galáxia Perdida");
    }

    #[test]
    fn test_watchlist_only_accepts_catalogue_titles() {
        let mut session = session();
        assert!(session.toggle_watchlist("2").unwrap());
        assert!(matches!(
            session.toggle_watchlist("ai-0"),
            Err(AppError::NotFound(_))
        ));
        assert!(!session.toggle_watchlist("2").unwrap());
    }

    #[test]
    fn test_unknown_title_selection() {
        let mut session = session();
        assert!(matches!(
            session.select_title("404"),
            Err(AppError::NotFound(_))
        ));
        assert!(session.engine().selected().is_none());
    }

    #[test]
    fn test_featured_navigation() {
        let mut session = session();
        assert_eq!(session.featured_title().unwrap().id, "1");
        session.advance_featured();
        assert_eq!(session.featured_title().unwrap().id, "2");
        session.jump_featured(4).unwrap();
        assert_eq!(session.featured_title().unwrap().id, "5");
        assert!(session.jump_featured(5).is_err());
    }
}
