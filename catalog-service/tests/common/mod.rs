#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use catalog_service::models::{Artist, Drink, Ingredient, Question, Show, Venue};
use catalog_service::startup::build_router;
use catalog_service::AppState;
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use service_core::auth::JwtVerifier;
use service_core::store::InMemoryRepository;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "catalog-test-secret";

pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// App over in-memory repositories seeded with the sample data below.
    pub fn spawn() -> Self {
        Self::with_state(seeded_state())
    }

    pub fn with_state(state: AppState) -> Self {
        TestApp {
            router: build_router(state),
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None, None).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).expect("Failed to build request"))
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

/// HS256 token carrying `permissions`, valid for ten minutes.
pub fn token_with(permissions: &[&str]) -> String {
    let exp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs()
        + 600;

    encode(
        &Header::new(Algorithm::HS256),
        &json!({"sub": "auth0|barista", "exp": exp, "permissions": permissions}),
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to encode token")
}

pub fn question(id: i64, text: &str, category: i64) -> Question {
    Question {
        id,
        question: text.to_string(),
        answer: "answer".to_string(),
        category,
        difficulty: 2,
    }
}

pub fn sample_questions() -> Vec<Question> {
    let mut questions = vec![
        question(1, "What boxer's original name is Cassius Clay?", 4),
        question(2, "What is the heaviest organ in the human body?", 1),
        question(3, "Who discovered penicillin?", 1),
        question(4, "La Giaconda is better known as what?", 2),
        question(5, "Which Dutch graphic artist-initials M C was a creator of optical illusions?", 2),
        question(6, "What is the largest lake in Africa?", 3),
    ];
    questions.extend((7..=14).map(|id| question(id, &format!("Sports question {}", id), 6)));
    questions
}

pub fn sample_drinks() -> Vec<Drink> {
    vec![Drink {
        id: 1,
        title: "Water".to_string(),
        recipe: vec![Ingredient {
            name: "Water".to_string(),
            color: "blue".to_string(),
            parts: 1,
        }],
    }]
}

pub fn sample_venues() -> Vec<Venue> {
    [
        (1, "The Musical Hop", "San Francisco", "CA"),
        (2, "The Dueling Pianos Bar", "New York", "NY"),
        (3, "Park Square Live Music & Coffee", "San Francisco", "CA"),
    ]
    .into_iter()
    .map(|(id, name, city, state)| Venue {
        id,
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: None,
        genres: vec!["Jazz".to_string()],
    })
    .collect()
}

pub fn sample_artists() -> Vec<Artist> {
    [(4, "Guns N Petals"), (5, "Matt Quevedo"), (6, "The Wild Sax Band")]
        .into_iter()
        .map(|(id, name)| Artist {
            id,
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: None,
            genres: vec!["Rock n Roll".to_string()],
        })
        .collect()
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 21, 30, 0).unwrap()
}

/// One past booking at venue 1 and two upcoming ones at venue 3.
pub fn sample_shows() -> Vec<Show> {
    vec![
        Show {
            id: 1,
            venue_id: 1,
            artist_id: 4,
            start_time: at(2019, 5, 21),
        },
        Show {
            id: 2,
            venue_id: 3,
            artist_id: 5,
            start_time: at(2099, 6, 15),
        },
        Show {
            id: 3,
            venue_id: 3,
            artist_id: 6,
            start_time: at(2099, 4, 1),
        },
    ]
}

pub fn seeded_state() -> AppState {
    let verifier = Arc::new(JwtVerifier::from_secret(TEST_SECRET.as_bytes()));
    let mut state = AppState::in_memory(verifier);
    state.questions = Arc::new(InMemoryRepository::with_records(sample_questions()));
    state.drinks = Arc::new(InMemoryRepository::with_records(sample_drinks()));
    state.venues = Arc::new(InMemoryRepository::with_records(sample_venues()));
    state.artists = Arc::new(InMemoryRepository::with_records(sample_artists()));
    state.shows = Arc::new(InMemoryRepository::with_records(sample_shows()));
    state
}
