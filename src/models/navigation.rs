use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Label of the "all categories" sentinel
pub const ALL_CATEGORIES: &str = "Todos";

/// Category pills offered above the grid, sentinel first
pub const FILTER_CATEGORIES: [&str; 7] = [
    ALL_CATEGORIES,
    "Ação",
    "Aventura",
    "Ficção",
    "Fantasia",
    "Drama",
    "Natureza",
];

/// Top-level screen the user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NavigationMode {
    #[default]
    Home,
    Search,
    Watchlist,
    Movies,
    Series,
    Originals,
    /// Filtered by an arbitrary category, reached through a brand
    Catalogue,
}

impl NavigationMode {
    pub const ALL: [NavigationMode; 7] = [
        NavigationMode::Home,
        NavigationMode::Search,
        NavigationMode::Watchlist,
        NavigationMode::Movies,
        NavigationMode::Series,
        NavigationMode::Originals,
        NavigationMode::Catalogue,
    ];

    /// Whether the mode renders the title grid
    pub fn is_grid_view(self) -> bool {
        match self {
            NavigationMode::Movies
            | NavigationMode::Series
            | NavigationMode::Originals
            | NavigationMode::Watchlist
            | NavigationMode::Catalogue => true,
            NavigationMode::Home | NavigationMode::Search => false,
        }
    }

    /// Whether the category pills are offered in this mode
    pub fn shows_category_filters(self) -> bool {
        self.is_grid_view() && self != NavigationMode::Watchlist
    }

    /// Heading for the grid view
    pub fn page_title(self, filter: &CategoryFilter) -> String {
        match self {
            NavigationMode::Movies => "Filmes".to_string(),
            NavigationMode::Series => "Séries".to_string(),
            NavigationMode::Originals => "Originais P+".to_string(),
            NavigationMode::Watchlist => "Minha Lista".to_string(),
            NavigationMode::Catalogue => match filter {
                CategoryFilter::All => "Catálogo".to_string(),
                CategoryFilter::Category(category) => category.clone(),
            },
            NavigationMode::Home | NavigationMode::Search => String::new(),
        }
    }

    /// Line under the grid heading
    pub fn page_subtitle(self) -> &'static str {
        match self {
            NavigationMode::Watchlist => "Seus títulos salvos.",
            _ => "Explore nosso catálogo completo.",
        }
    }
}

impl Display for NavigationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NavigationMode::Home => "HOME",
            NavigationMode::Search => "SEARCH",
            NavigationMode::Watchlist => "WATCHLIST",
            NavigationMode::Movies => "MOVIES",
            NavigationMode::Series => "SERIES",
            NavigationMode::Originals => "ORIGINALS",
            NavigationMode::Catalogue => "CATALOGUE",
        };
        write!(f, "{}", name)
    }
}

/// Category narrowing applied within a filterable mode
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Category(category) => category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value.to_string())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value)
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(CategoryFilter::from)
    }
}
