use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::entities::{availability, film, film_actor, store};

pub const MIN_RELEASE_YEAR: i32 = 1900;
pub const MAX_RELEASE_YEAR: i32 = 2024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: &'static str, min: i32, max: i32 },
    #[error("{field} must be greater than 0")]
    NotPositive { field: &'static str },
}

fn check_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

fn check_id(field: &'static str, value: i32) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(())
}

#[derive(Clone, Debug, Deserialize)]
pub struct FilmCreate {
    pub title: String,
    pub release_year: i32,
    pub genre: String,
}

impl FilmCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("title", &self.title, 100)?;
        if !(MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR).contains(&self.release_year) {
            return Err(ValidationError::OutOfRange {
                field: "release_year",
                min: MIN_RELEASE_YEAR,
                max: MAX_RELEASE_YEAR,
            });
        }
        check_text("genre", &self.genre, 50)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub film_id: i32,
    pub title: String,
    pub release_year: Option<i32>,
    pub genre: Option<String>,
}

impl From<film::Model> for Film {
    fn from(m: film::Model) -> Self {
        Self { film_id: m.film_id, title: m.title, release_year: m.release_year, genre: m.genre }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct FilmActorCreate {
    pub film_id: i32,
    pub actor_name: String,
}

impl FilmActorCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_id("film_id", self.film_id)?;
        check_text("actor_name", &self.actor_name, 100)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilmActor {
    pub actor_id: i32,
    pub film_id: i32,
    pub actor_name: String,
}

impl From<film_actor::Model> for FilmActor {
    fn from(m: film_actor::Model) -> Self {
        Self { actor_id: m.actor_id, film_id: m.film_id, actor_name: m.actor_name }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct StoreCreate {
    pub store_name: String,
    pub location: String,
}

impl StoreCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("store_name", &self.store_name, 100)?;
        check_text("location", &self.location, 255)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub store_id: i32,
    pub store_name: String,
    pub location: String,
}

impl From<store::Model> for Store {
    fn from(m: store::Model) -> Self {
        Self { store_id: m.store_id, store_name: m.store_name, location: m.location }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AvailabilityCreate {
    pub store_id: i32,
    pub film_id: i32,
}

impl AvailabilityCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_id("store_id", self.store_id)?;
        check_id("film_id", self.film_id)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub availability_id: i32,
    pub store_id: i32,
    pub film_id: i32,
}

impl From<availability::Model> for Availability {
    fn from(m: availability::Model) -> Self {
        Self { availability_id: m.availability_id, store_id: m.store_id, film_id: m.film_id }
    }
}

/// A store carrying a film that matched a search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromQueryResult)]
pub struct StoreWithFilm {
    pub store_id: i32,
    pub store_name: String,
    pub location: String,
    pub film_name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct StoreSearchQuery {
    pub film_name: Option<String>,
    pub genre: Option<String>,
    pub actor: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreSearch {
    FilmName(String),
    Genre(String),
    Actor(String),
}

impl StoreSearch {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreSearch::FilmName(_) => "film_name",
            StoreSearch::Genre(_) => "genre",
            StoreSearch::Actor(_) => "actor",
        }
    }
}

impl StoreSearchQuery {
    /// Exactly one criterion must be present; an empty value still counts.
    pub fn into_search(self) -> Option<StoreSearch> {
        match (self.film_name, self.genre, self.actor) {
            (Some(title), None, None) => Some(StoreSearch::FilmName(title)),
            (None, Some(genre), None) => Some(StoreSearch::Genre(genre)),
            (None, None, Some(actor)) => Some(StoreSearch::Actor(actor)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film(title: &str, release_year: i32, genre: &str) -> FilmCreate {
        FilmCreate { title: title.to_string(), release_year, genre: genre.to_string() }
    }

    #[test]
    fn release_year_bounds() {
        assert!(film("Dune", 1900, "SciFi").validate().is_ok());
        assert!(film("Dune", 2024, "SciFi").validate().is_ok());
        for year in [1899, 2025] {
            let err = film("Dune", year, "SciFi").validate().unwrap_err();
            assert!(matches!(err, ValidationError::OutOfRange { field: "release_year", .. }));
        }
    }

    #[test]
    fn title_length_counts_characters() {
        assert!(film(&"é".repeat(100), 2000, "Drama").validate().is_ok());
        let err = film(&"a".repeat(101), 2000, "Drama").validate().unwrap_err();
        assert_eq!(err, ValidationError::TooLong { field: "title", max: 100 });
    }

    #[test]
    fn rejects_empty_genre() {
        let err = film("Heat", 1995, "").validate().unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "genre" });
    }

    #[test]
    fn store_location_allows_255() {
        let ok = StoreCreate { store_name: "Main".into(), location: "x".repeat(255) };
        assert!(ok.validate().is_ok());
        let long = StoreCreate { store_name: "Main".into(), location: "x".repeat(256) };
        assert!(matches!(long.validate(), Err(ValidationError::TooLong { field: "location", .. })));
    }

    #[test]
    fn ids_must_be_positive() {
        let err = AvailabilityCreate { store_id: 1, film_id: 0 }.validate().unwrap_err();
        assert_eq!(err, ValidationError::NotPositive { field: "film_id" });
        let actor = FilmActorCreate { film_id: -3, actor_name: "Zendaya".into() };
        let err = actor.validate().unwrap_err();
        assert_eq!(err, ValidationError::NotPositive { field: "film_id" });
    }

    #[test]
    fn search_needs_exactly_one_criterion() {
        assert_eq!(StoreSearchQuery::default().into_search(), None);

        let both = StoreSearchQuery {
            film_name: Some("Dune".into()),
            genre: Some("SciFi".into()),
            actor: None,
        };
        assert_eq!(both.into_search(), None);

        let genre = StoreSearchQuery { genre: Some("SciFi".into()), ..Default::default() };
        assert_eq!(genre.into_search(), Some(StoreSearch::Genre("SciFi".into())));
    }
}
