//! Catalogue source
//!
//! Loads the ordered title list once at startup, either from the built-in
//! set or from a JSON file, and checks the id invariants the view engine and
//! AI search rely on.

use crate::{
    error::{AppError, AppResult},
    models::{Title, TitleKind, AI_ID_PREFIX},
};
use std::collections::HashSet;
use std::path::Path;

/// Immutable, ordered set of titles for a session
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogue {
    titles: Vec<Title>,
}

impl Catalogue {
    /// Builds a catalogue, rejecting duplicate, empty or AI-namespaced ids
    pub fn new(titles: Vec<Title>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for title in &titles {
            if title.id.trim().is_empty() {
                return Err(AppError::Catalogue(format!(
                    "Title \"{}\" has an empty id",
                    title.title
                )));
            }
            if title.id.starts_with(AI_ID_PREFIX) {
                return Err(AppError::Catalogue(format!(
                    "Title id {} uses the reserved {} prefix",
                    title.id, AI_ID_PREFIX
                )));
            }
            if !seen.insert(title.id.as_str()) {
                return Err(AppError::Catalogue(format!(
                    "Duplicate title id {}",
                    title.id
                )));
            }
        }

        Ok(Self { titles })
    }

    /// Reads a JSON array of titles
    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Catalogue(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let titles: Vec<Title> = serde_json::from_str(&raw).map_err(|e| {
            AppError::Catalogue(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        let catalogue = Self::new(titles)?;

        tracing::info!(
            path = %path.display(),
            titles = catalogue.len(),
            "Loaded catalogue from file"
        );

        Ok(catalogue)
    }

    /// Titles in load order
    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    pub fn get(&self, title_id: &str) -> Option<&Title> {
        self.titles.iter().find(|t| t.id == title_id)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// The eight titles the service ships with
    #[rustfmt::skip]
    pub fn builtin() -> Self {
        Self {
            titles: vec![
                entry("1", "A Grande Aventura", "Uma jornada através das montanhas místicas para encontrar a cidade perdida de ouro antes que o império a destrua.", "Aventura", 1018, 2023, "2h 14m", TitleKind::Movie, false, "K_9tX4eHztY"),
                entry("2", "Azul Profundo", "Explore as profundezas do oceano onde criaturas desconhecidas espreitam na escuridão.", "Natureza", 1015, 2022, "1h 45m", TitleKind::Series, true, "JkaxUblCGz0"),
                entry("3", "Cidade Cyber", "Em 2077, um detetive de IA desonesto tenta resolver o assassinato de um humano sintético.", "Ficção", 1033, 2024, "2h 30m", TitleKind::Series, true, "qEVUtrk8_B4"),
                entry("4", "Sussurros da Floresta", "As árvores têm olhos e o vento carrega segredos do passado.", "Fantasia", 1039, 2021, "1h 55m", TitleKind::Movie, false, "VngD3Q88dC4"),
                entry("5", "Velocidade Máxima", "Corridas de alta octanagem no deserto sem regras.", "Ação", 1071, 2023, "2h 05m", TitleKind::Movie, false, "N93j6A020k0"),
                entry("6", "Vida Tranquila", "Um drama sobre uma pequena vila nos Alpes.", "Drama", 1080, 2020, "1h 30m", TitleKind::Series, false, "Z9AYPxH5NTM"),
                entry("7", "O Último Guerreiro", "Um samurai solitário busca redenção em um mundo esquecido.", "Ação", 1060, 2021, "2h 00m", TitleKind::Movie, true, "Y9Jv1sLw5v4"),
                entry("8", "Reino dos Céus", "Documentário sobre as aves mais raras do planeta.", "Natureza", 1025, 2023, "50m", TitleKind::Series, true, "F2fR4t7X70U"),
            ],
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    title: &str,
    description: &str,
    category: &str,
    picsum_id: u32,
    year: i32,
    duration: &str,
    kind: TitleKind,
    is_original: bool,
    video_id: &str,
) -> Title {
    Title {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        image: format!("https://picsum.photos/id/{}/800/450", picsum_id),
        backdrop: Some(format!("https://picsum.photos/id/{}/1600/900", picsum_id)),
        category: Some(category.to_string()),
        match_score: None,
        year: Some(year),
        duration: Some(duration.to_string()),
        kind: Some(kind),
        is_original,
        video_id: Some(video_id.to_string()),
    }
}
