#![allow(dead_code)]

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use noteful_core::{
    FolderRepository, NewFolder, NewNote, NoteRepository, SqliteFolderRepository,
    SqliteNoteRepository,
};
use noteful_server::config::{DatabaseLocation, Environment};
use noteful_server::store::Store;
use noteful_server::{build_router, AppState};
use serde_json::Value;
use tower::ServiceExt;

pub const FIXTURE_MODIFIED: &str = "2019-01-03T00:00:00Z";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body should be JSON")
    }
}

pub fn test_app(environment: Environment) -> (Router, Store) {
    let store = Store::open(&DatabaseLocation::InMemory).unwrap();
    let app = build_router(AppState::new(store.clone(), environment));
    (app, store)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    send_request(app, builder.body(body).unwrap()).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn seed_folders(store: &Store) {
    store
        .call(|conn| {
            let repo = SqliteFolderRepository::new(conn);
            for name in ["Important", "Super", "Spangley"] {
                repo.insert_folder(&NewFolder {
                    name: name.to_string(),
                })
                .unwrap();
            }
        })
        .await
        .unwrap();
}

pub async fn seed_notes(store: &Store) {
    seed_folders(store).await;
    store
        .call(|conn| {
            let repo = SqliteNoteRepository::new(conn);
            let modified = FIXTURE_MODIFIED.parse().unwrap();
            for (name, content, folder_id) in [
                ("Dogs", "Corporis accusamus placeat.", 1),
                ("Cats", "Eos laudantium quia ab blanditiis.", 2),
                ("Pigs", "Occaecati dignissimos quam qui facere.", 3),
            ] {
                repo.insert_note(&NewNote {
                    name: name.to_string(),
                    content: content.to_string(),
                    modified: Some(modified),
                    folder_id,
                })
                .unwrap();
            }
        })
        .await
        .unwrap();
}
