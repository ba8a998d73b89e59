// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Exam calls

use super::models::{
    AnswerSubmission, Exam, ExamRecord, SaveAnswersRequest, SaveAnswersResponse,
    StartExamRequest,
};
use super::{ApiClient, Endpoint};
use crate::error::Result;

impl ApiClient {
    /// All exams
    pub async fn list_exams(&self) -> Result<Vec<Exam>> {
        let ep = Endpoint::list_exams();
        self.client.call::<_, ()>(ep.method, &ep.path, None).await
    }

    /// Start (or resume) an attempt at `exam_id`
    pub async fn start_exam(&self, exam_id: u64) -> Result<ExamRecord> {
        let ep = Endpoint::start_exam();
        self.client
            .call(ep.method, &ep.path, Some(&StartExamRequest { exam_id }))
            .await
    }

    /// One attempt with its answers
    pub async fn exam_record(&self, record_id: u64) -> Result<ExamRecord> {
        let ep = Endpoint::exam_record(record_id);
        self.client.call::<_, ()>(ep.method, &ep.path, None).await
    }

    /// Store answers without finishing the attempt
    pub async fn save_answers(
        &self,
        record_id: u64,
        answers: &[AnswerSubmission],
    ) -> Result<SaveAnswersResponse> {
        let ep = Endpoint::save_answers(record_id);
        self.client
            .call(ep.method, &ep.path, Some(&SaveAnswersRequest { answers }))
            .await
    }

    /// Finish the attempt and have it scored
    pub async fn finish_exam(&self, record_id: u64) -> Result<ExamRecord> {
        let ep = Endpoint::finish_exam(record_id);
        self.client.call::<_, ()>(ep.method, &ep.path, None).await
    }

    /// Scored result of a finished attempt
    pub async fn exam_result(&self, record_id: u64) -> Result<ExamRecord> {
        let ep = Endpoint::exam_result(record_id);
        self.client.call::<_, ()>(ep.method, &ep.path, None).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::api::{AnswerSubmission, RecordStatus};
    use crate::app::{App, AppConfig};
    use crate::http::Cookie;
    use crate::session::CredentialStore;
    use crate::shell::SESSION_EXPIRED_NOTICE;

    fn record(id: u64, status: &str) -> Value {
        let completed = status == "completed";
        let end_time = if completed {
            json!("2025-06-01T09:40:00Z")
        } else {
            Value::Null
        };
        let score = if completed { 10 } else { 0 };
        json!({
            "id": id,
            "start_time": "2025-06-01T09:00:00Z",
            "end_time": end_time,
            "status": status,
            "score": score,
            "answer_records": [],
            "exam": {
                "id": 2,
                "title": "Arithmetic",
                "description": "",
                "time_limit": 60,
                "total_score": 10,
                "created_time": "2025-05-30T12:00:00Z",
                "questions": []
            }
        })
    }

    async fn app(server: &MockServer) -> App {
        App::new(AppConfig::new().base_url(format!("{}/api", server.uri()))).unwrap()
    }

    #[tokio::test]
    async fn test_list_exams_with_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/exam/exams/"))
            .and(header("authorization", "Token abc"))
            .and(header("x-csrftoken", "csrf-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let app = app(&server).await;
        app.store().set("abc");
        app.cookie_jar()
            .add(Cookie::new("csrftoken", "csrf-1").domain("127.0.0.1"));

        let exams = app.api().list_exams().await.unwrap();
        assert!(exams.is_empty());
    }

    #[tokio::test]
    async fn test_start_exam_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/exam/records/"))
            .and(body_json(json!({"exam_id": 2})))
            .respond_with(ResponseTemplate::new(201).set_body_json(record(5, "ongoing")))
            .expect(1)
            .mount(&server)
            .await;

        let record = app(&server).await.api().start_exam(2).await.unwrap();
        assert_eq!(record.id, 5);
        assert_eq!(record.status, RecordStatus::Ongoing);
    }

    #[tokio::test]
    async fn test_save_answers_and_finish() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/exam/records/5/save_answers/"))
            .and(body_json(json!({"answers": [
                {"question_id": 3, "user_answer": "True"},
                {"question_id": 4, "user_answer": "A,B"}
            ]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "成功保存 2 条答案",
                "updated_count": 2
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/exam/records/5/finish/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(record(5, "completed")))
            .expect(1)
            .mount(&server)
            .await;

        let app = app(&server).await;
        let saved = app
            .api()
            .save_answers(
                5,
                &[AnswerSubmission::new(3, "True"), AnswerSubmission::new(4, "A,B")],
            )
            .await
            .unwrap();
        assert_eq!(saved.updated_count, 2);

        let finished = app.api().finish_exam(5).await.unwrap();
        assert_eq!(finished.status, RecordStatus::Completed);
        assert_eq!(finished.score, 10);
    }

    #[tokio::test]
    async fn test_exam_record_not_found_keeps_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/exam/records/99/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
            .mount(&server)
            .await;

        let app = app(&server).await;
        app.store().set("abc");

        let err = app.api().exam_record(99).await.unwrap_err();
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(app.store().get().as_deref(), Some("abc"));
        assert!(app.shell().state().hard_redirects.is_empty());
    }

    #[tokio::test]
    async fn test_result_401_tears_session_down() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/exam/results/5/"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token."})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let app = app(&server).await;
        app.store().set("stale");
        app.navigate("/result/5").unwrap();

        let err = app.api().exam_result(5).await.unwrap_err();

        assert!(err.is_unauthenticated());
        assert!(app.store().get().is_none());
        let state = app.shell().state();
        assert_eq!(state.location, "/login");
        assert_eq!(state.hard_redirects, vec!["/login".to_string()]);
        assert_eq!(state.notices, vec![SESSION_EXPIRED_NOTICE.to_string()]);
    }
}
