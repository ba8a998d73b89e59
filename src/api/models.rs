// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Backend payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credentials posted to the token endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token endpoint answer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub user_id: u64,
    #[serde(default)]
    pub email: String,
}

/// How a question is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// One option letter
    Single,
    /// Several option letters, comma separated
    Multiple,
    /// `True` or `False`
    Judge,
}

/// A question as served inside an exam or an answer record
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Question {
    pub id: u64,
    pub content: String,
    pub question_type: QuestionType,
    /// Option letter to text; `null` or empty for judge questions
    #[serde(default)]
    pub options: serde_json::Value,
    /// Correct answer; may be blank
    #[serde(default)]
    pub answer: String,
    pub score: u32,
}

/// An exam and, on detail endpoints, its questions
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Exam {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Minutes
    pub time_limit: u32,
    pub total_score: u32,
    pub created_time: DateTime<Utc>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Attempt state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// Started, answers can still be saved
    Ongoing,
    /// Finished and scored
    Completed,
}

/// The stored answer to one question of an attempt
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnswerRecord {
    pub id: u64,
    pub question: Question,
    #[serde(default)]
    pub user_answer: String,
    pub is_correct: bool,
    pub score: u32,
}

/// One attempt at an exam
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExamRecord {
    pub id: u64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: RecordStatus,
    pub score: u32,
    #[serde(default)]
    pub answer_records: Vec<AnswerRecord>,
    pub exam: Exam,
}

/// Body of the start-attempt call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartExamRequest {
    pub exam_id: u64,
}

/// A single answer; multiple-choice answers are comma separated (`"A,C"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question_id: u64,
    pub user_answer: String,
}

impl AnswerSubmission {
    /// Answer `user_answer` to question `question_id`
    pub fn new(question_id: u64, user_answer: impl Into<String>) -> Self {
        Self {
            question_id,
            user_answer: user_answer.into(),
        }
    }
}

/// Body of the save-answers call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveAnswersRequest<'a> {
    pub answers: &'a [AnswerSubmission],
}

/// Save-answers acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaveAnswersResponse {
    #[serde(default)]
    pub message: String,
    pub updated_count: u32,
}
