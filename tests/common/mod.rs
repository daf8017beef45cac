//! Shared fixtures for the HTTP integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use vgreen::server::{build_router, ServerConfig, ServerState};
use vgreen::{
    Email, InMemoryStore, InstructionQuery, InstructionRecord, InstructionStatus, InstructionStore,
    LogMailer, Mailer, NotifyError, StoreError,
};

/// Four active records with distinct timestamps plus one inactive record.
///
/// Store order is deliberately not chronological.
pub fn catalogue() -> Vec<InstructionRecord> {
    let at = |day| Utc.with_ymd_and_hms(2024, 3, day, 8, 0, 0).unwrap();
    vec![
        InstructionRecord::new("INS001", "Fluoride")
            .with_created_at(at(1))
            .with_field("Usage", json!("Twice a day, do not swallow.")),
        InstructionRecord::new("INS002", "Chlorine")
            .with_created_at(at(12))
            .with_field("Usage", json!("Never mix with ammonia.")),
        InstructionRecord::new("INS003", "Xylitol")
            .with_status(InstructionStatus::from_raw(Some("")))
            .with_created_at(at(5)),
        InstructionRecord::new("INS004", "Triclosan")
            .with_status(InstructionStatus::Other("Inactive".into()))
            .with_created_at(at(20)),
        InstructionRecord::new("INS005", "Fluoride Free Mint").with_created_at(at(3)),
    ]
}

pub fn app_with_store(store: Arc<dyn InstructionStore>) -> Router {
    app_with(store, Arc::new(LogMailer))
}

pub fn app_with(store: Arc<dyn InstructionStore>, mailer: Arc<dyn Mailer>) -> Router {
    let state = ServerState::with_components(ServerConfig::default(), store, mailer);
    build_router(Arc::new(state))
}

pub fn app() -> Router {
    app_with_store(Arc::new(InMemoryStore::with_records(catalogue())))
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["ID"].as_str().unwrap().to_string())
        .collect()
}

/// A store whose every read fails.
pub struct FailingStore;

#[async_trait]
impl InstructionStore for FailingStore {
    async fn find(&self, _query: &InstructionQuery) -> Result<Vec<InstructionRecord>, StoreError> {
        Err(StoreError::backend("connection refused"))
    }

    async fn upsert(&self, _record: InstructionRecord) -> Result<(), StoreError> {
        Err(StoreError::backend("connection refused"))
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::backend("connection refused"))
    }
}

/// Captures outgoing mail, optionally failing every send.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<Email>>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &Email) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Delivery("relay rejected the message".into()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
