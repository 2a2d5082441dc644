use serde::{Deserialize, Serialize};

/// A themed entry point on the home screen that opens a filtered catalogue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: String,
    pub name: String,
    /// Gradient start colour (e.g. "#003366")
    pub color_start: String,
    /// Gradient end colour
    pub color_end: String,
    /// Category to filter by when selected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_category: Option<String>,
}

impl Brand {
    pub fn new(id: &str, name: &str, color_start: &str, color_end: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color_start: color_start.to_string(),
            color_end: color_end.to_string(),
            filter_category: None,
        }
    }

    pub fn filtering(mut self, category: &str) -> Self {
        self.filter_category = Some(category.to_string());
        self
    }
}

/// Brands shown on the home screen
pub fn builtin_brands() -> Vec<Brand> {
    vec![
        Brand::new("1", "Cinema", "#003366", "#0055A4").filtering("Ação"),
        Brand::new("2", "Natureza", "#004d00", "#008000").filtering("Natureza"),
        Brand::new("3", "Ficção", "#008b8b", "#00ced1").filtering("Ficção"),
        Brand::new("4", "Fantasia", "#1a1a2e", "#16213e").filtering("Fantasia"),
        Brand::new("5", "Desenhos", "#d4af37", "#ffd700").filtering("Aventura"),
    ]
}
