pub mod catalogue;
pub mod featured;
pub mod providers;
pub mod recommendations;
pub mod search;
pub mod session;
pub mod view_state;

pub use catalogue::Catalogue;
pub use recommendations::{RecommendationAdapter, SearchOutcome};
pub use session::Session;
pub use view_state::{compute_visible_set, ViewStateEngine};
