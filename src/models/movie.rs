use serde::{Deserialize, Serialize};

use super::activity::{Favorite, WatchEntry};
use crate::domain::MovieId;
use crate::entities::movies;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub description: String,
    pub poster: String,
    pub backdrop: Option<String>,
    pub genre: Vec<String>,
    pub year: i32,
    pub rating: f64,
    pub duration: i32,
    pub created_at: String,
}

impl From<movies::Model> for Movie {
    fn from(model: movies::Model) -> Self {
        Self {
            id: MovieId::new(model.id),
            genre: decode_genres(&model.genres),
            title: model.title,
            description: model.description,
            poster: model.poster,
            backdrop: model.backdrop,
            year: model.year,
            rating: model.rating,
            duration: model.duration,
            created_at: model.created_at,
        }
    }
}

/// Genre tags are stored as a JSON array. A malformed column reads as no tags.
#[must_use]
pub fn decode_genres(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// Projection attached to chat messages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub poster: String,
    pub rating: f64,
    pub year: i32,
}

impl From<movies::Model> for MovieSummary {
    fn from(model: movies::Model) -> Self {
        Self {
            id: MovieId::new(model.id),
            title: model.title,
            poster: model.poster,
            rating: model.rating,
            year: model.year,
        }
    }
}

/// Catalog entry as submitted for insertion, already validated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub title: String,
    pub description: String,
    pub poster: String,
    #[serde(default)]
    pub backdrop: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
    pub year: i32,
    pub rating: f64,
    pub duration: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetail {
    #[serde(flatten)]
    pub movie: Movie,
    pub favorites: Vec<Favorite>,
    pub watch_history: Vec<WatchEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_serializes_camel_case() {
        let movie = Movie {
            id: MovieId::new(1),
            title: "Casablanca".to_string(),
            description: "d".to_string(),
            poster: "/p.svg".to_string(),
            backdrop: None,
            genre: vec!["Romance".to_string(), "Drama".to_string()],
            year: 1942,
            rating: 8.5,
            duration: 102,
            created_at: "2025-01-01T00:00:00.000000Z".to_string(),
        };

        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["createdAt"], "2025-01-01T00:00:00.000000Z");
        assert_eq!(json["genre"][1], "Drama");
        assert!(json["backdrop"].is_null());
    }

    #[test]
    fn test_decode_genres_tolerates_garbage() {
        assert_eq!(decode_genres(r#"["A","B"]"#), vec!["A", "B"]);
        assert!(decode_genres("not json").is_empty());
    }
}
