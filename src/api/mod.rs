// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Backend API calls
//!
//! Each call is an [`Endpoint`] (verb + path) plus an optional body, run
//! through the shared [`HttpClient`]. No call carries error handling of its
//! own; the pipeline's failure stages already did what needs doing.

mod auth;
mod exam;
pub mod models;

use std::sync::Arc;

use reqwest::Method;

use crate::http::HttpClient;
use crate::session::CredentialStore;

pub use models::{
    AnswerRecord, AnswerSubmission, Exam, ExamRecord, LoginRequest, Question, QuestionType,
    RecordStatus, SaveAnswersResponse, TokenResponse,
};

/// One backend operation: verb and path relative to the base address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
}

impl Endpoint {
    fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
        }
    }

    fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
        }
    }

    /// `POST exam/token/`
    pub fn login() -> Self {
        Self::post("exam/token/")
    }

    /// `GET exam/exams/`
    pub fn list_exams() -> Self {
        Self::get("exam/exams/")
    }

    /// `POST exam/records/`
    pub fn start_exam() -> Self {
        Self::post("exam/records/")
    }

    /// `GET exam/records/{id}/`
    pub fn exam_record(record_id: u64) -> Self {
        Self::get(format!("exam/records/{}/", record_id))
    }

    /// `POST exam/records/{id}/save_answers/`
    pub fn save_answers(record_id: u64) -> Self {
        Self::post(format!("exam/records/{}/save_answers/", record_id))
    }

    /// `POST exam/records/{id}/finish/`
    pub fn finish_exam(record_id: u64) -> Self {
        Self::post(format!("exam/records/{}/finish/", record_id))
    }

    /// `GET exam/results/{id}/`
    pub fn exam_result(record_id: u64) -> Self {
        Self::get(format!("exam/results/{}/", record_id))
    }
}

/// Typed access to the backend
#[derive(Clone)]
pub struct ApiClient {
    client: HttpClient,
    store: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Issue calls through `client`; `store` receives the token on login
    pub fn new(client: HttpClient, store: Arc<dyn CredentialStore>) -> Self {
        Self { client, store }
    }

    /// The underlying client
    pub fn http(&self) -> &HttpClient {
        &self.client
    }
}
