//! Content API client.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument};

use lingodrill_core::model::{AnswerRecord, ReadingQuestion, ReadingUnit, SentenceItem, VocabItem};
use lingodrill_core::normalize::{
    attach_unit, normalize_reading_questions, normalize_reading_unit, normalize_reading_units,
    normalize_sentences, normalize_vocabs,
};
use lingodrill_core::traits::{AnswerEvent, ContentSource, SessionSink};

use crate::config::ApiConfig;
use crate::error::ContentError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the Content API.
pub struct ContentApi {
    base_url: String,
    token: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

/// A reading unit together with its questions.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDetail {
    pub unit: ReadingUnit,
    pub questions: Vec<ReadingQuestion>,
}

/// Per-question verdict from server-side grading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerQuestionResult {
    pub question_id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub user_answer: String,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default)]
    pub correct: bool,
    #[serde(default, rename = "question_type")]
    pub question_type: Option<String>,
}

/// Server-side grade of one reading unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerGrade {
    pub score: u32,
    #[serde(default)]
    pub correct_count: usize,
    #[serde(default)]
    pub results: Vec<ServerQuestionResult>,
}

/// Which spreadsheet an import carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    Vocabulary,
    ReadingUnits,
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportKind::Vocabulary => write!(f, "vocabulary"),
            ImportKind::ReadingUnits => write!(f, "reading-units"),
        }
    }
}

/// Whether an import adds to or replaces existing content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    #[default]
    Append,
    Overwrite,
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportMode::Append => write!(f, "append"),
            ImportMode::Overwrite => write!(f, "overwrite"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportTally {
    #[serde(default)]
    pub success: usize,
    #[serde(default)]
    pub total: usize,
}

/// One entry of the import history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportLog {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub result: ImportTally,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ContentApi {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ContentError> {
        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ContentError::NetworkError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            timeout_secs,
            client,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ContentError> {
        Self::new(
            &config.base_url,
            config.token.clone(),
            Some(config.timeout_secs),
        )
    }

    /// `base_url` followed by the given path segments, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ContentError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ContentError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ContentError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ContentError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ContentError::Timeout(self.timeout_secs)
            } else {
                ContentError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::Unauthorized(error_message(&body)));
        }
        if status == 404 {
            return Err(ContentError::NotFound(response.url().path().to_string()));
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::ApiError {
                status,
                message: error_message(&body),
            });
        }
        Ok(response)
    }

    async fn get_json(&self, url: Url) -> Result<Value, ContentError> {
        let response = self.send(self.client.get(url)).await?;
        read_json(response).await
    }

    /// Vocabulary, optionally restricted to some unit tags.
    #[instrument(skip(self, source_tags), fields(tags = source_tags.len()))]
    pub async fn vocabs(
        &self,
        limit: usize,
        source_tags: &[String],
    ) -> Result<Vec<VocabItem>, ContentError> {
        let mut url = self.endpoint(&["vocabs"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &limit.to_string());
            if !source_tags.is_empty() {
                query.append_pair("source_tags", &source_tags.join(","));
            }
        }
        let payload = self.get_json(url).await?;
        Ok(normalize_vocabs(&payload))
    }

    #[instrument(skip(self))]
    pub async fn sentences(&self, limit: usize) -> Result<Vec<SentenceItem>, ContentError> {
        let mut url = self.endpoint(&["sentences"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        let payload = self.get_json(url).await?;
        Ok(normalize_sentences(&payload))
    }

    #[instrument(skip(self))]
    pub async fn reading_units(&self) -> Result<Vec<ReadingUnit>, ContentError> {
        let payload = self.get_json(self.endpoint(&["reading-units"])?).await?;
        Ok(normalize_reading_units(&payload))
    }

    /// One unit with all of its questions, each carrying the unit.
    #[instrument(skip(self))]
    pub async fn reading_unit(&self, unit_id: &str) -> Result<UnitDetail, ContentError> {
        let payload = self
            .get_json(self.endpoint(&["reading-units", unit_id])?)
            .await?;
        let unit = normalize_reading_unit(&payload).ok_or_else(|| {
            ContentError::InvalidPayload(format!("reading unit {unit_id} has no id"))
        })?;
        let mut questions = normalize_reading_questions(&payload);
        attach_unit(&mut questions, &unit);
        Ok(UnitDetail { unit, questions })
    }

    #[instrument(skip(self))]
    pub async fn unit_questions(
        &self,
        unit_id: &str,
        count: usize,
    ) -> Result<Vec<ReadingQuestion>, ContentError> {
        let mut url = self.endpoint(&["reading-units", unit_id, "questions"])?;
        url.query_pairs_mut()
            .append_pair("count", &count.to_string());
        let payload = self.get_json(url).await?;
        Ok(normalize_reading_questions(&payload))
    }

    /// Have the server grade a unit's answers.
    #[instrument(skip(self, answers), fields(answered = answers.len()))]
    pub async fn grade_reading_unit(
        &self,
        unit_id: &str,
        answers: &AnswerRecord,
    ) -> Result<ServerGrade, ContentError> {
        let url = self.endpoint(&["reading-units", unit_id, "grade"])?;
        let response = self
            .send(self.client.post(url).json(&json!({ "answers": answers })))
            .await?;
        response
            .json::<ServerGrade>()
            .await
            .map_err(|e| ContentError::InvalidPayload(format!("failed to parse grade: {e}")))
    }

    #[instrument(skip(self))]
    pub async fn create_session(&self, mode: &str) -> Result<String, ContentError> {
        let url = self.endpoint(&["sessions"])?;
        let response = self
            .send(self.client.post(url).json(&json!({ "mode": mode })))
            .await?;
        let payload = read_json(response).await?;
        ["_id", "id"]
            .iter()
            .find_map(|k| payload.get(*k).and_then(Value::as_str))
            .map(str::to_string)
            .ok_or_else(|| ContentError::InvalidPayload("session response has no id".into()))
    }

    #[instrument(skip(self, event), fields(session = %event.session_id, question = %event.question_id))]
    pub async fn record_answer(&self, event: &AnswerEvent) -> Result<(), ContentError> {
        let url = self.endpoint(&["sessions", "answers"])?;
        self.send(self.client.post(url).json(event)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn complete_session(&self, session_id: &str) -> Result<(), ContentError> {
        let url = self.endpoint(&["sessions", session_id, "complete"])?;
        self.send(self.client.put(url)).await?;
        Ok(())
    }

    /// Upload a content spreadsheet. Returns the server's import summary.
    #[instrument(skip(self, path), fields(file = %path.display()))]
    pub async fn import_file(
        &self,
        path: &Path,
        kind: ImportKind,
        mode: ImportMode,
    ) -> Result<Value, ContentError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ContentError::ReadFile {
                path: path.display().to_string(),
                source,
            })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "import.xlsx".to_string());
        debug!(bytes = bytes.len(), %kind, %mode, "uploading import");

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("fileType", kind.to_string())
            .text("mode", mode.to_string());
        let url = self.endpoint(&["admin", "import"])?;
        let response = self.send(self.client.post(url).multipart(form)).await?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    pub async fn import_logs(&self) -> Result<Vec<ImportLog>, ContentError> {
        let payload = self.get_json(self.endpoint(&["admin", "import-logs"])?).await?;
        serde_json::from_value(payload)
            .map_err(|e| ContentError::InvalidPayload(format!("failed to parse import logs: {e}")))
    }
}

async fn read_json(response: Response) -> Result<Value, ContentError> {
    response
        .json::<Value>()
        .await
        .map_err(|e| ContentError::InvalidPayload(format!("failed to parse response: {e}")))
}

/// The `error`/`message` field of a JSON error body, or the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["error", "message"]
                .iter()
                .find_map(|k| v.get(*k).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl ContentSource for ContentApi {
    fn name(&self) -> &str {
        "api"
    }

    async fn vocabs(&self, limit: usize, source_tags: &[String]) -> anyhow::Result<Vec<VocabItem>> {
        Ok(ContentApi::vocabs(self, limit, source_tags).await?)
    }

    async fn sentences(&self, limit: usize) -> anyhow::Result<Vec<SentenceItem>> {
        Ok(ContentApi::sentences(self, limit).await?)
    }

    async fn reading_units(&self) -> anyhow::Result<Vec<ReadingUnit>> {
        Ok(ContentApi::reading_units(self).await?)
    }

    async fn unit_questions(
        &self,
        unit_id: &str,
        count: usize,
    ) -> anyhow::Result<Vec<ReadingQuestion>> {
        Ok(ContentApi::unit_questions(self, unit_id, count).await?)
    }
}

#[async_trait]
impl SessionSink for ContentApi {
    async fn create_session(&self, mode: &str) -> anyhow::Result<String> {
        Ok(ContentApi::create_session(self, mode).await?)
    }

    async fn record_answer(&self, event: &AnswerEvent) -> anyhow::Result<()> {
        Ok(ContentApi::record_answer(self, event).await?)
    }

    async fn complete_session(&self, session_id: &str) -> anyhow::Result<()> {
        Ok(ContentApi::complete_session(self, session_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingodrill_core::traits::{load_pools, PoolLimits};
    use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ContentApi {
        ContentApi::new(&server.uri(), Some("test-token".into()), None).unwrap()
    }

    #[tokio::test]
    async fn vocabs_are_normalized() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vocabs"))
            .and(query_param("limit", "1000"))
            .and(query_param("source_tags", "HSK1,HSK2"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "vocabs": [
                    {"_id": "v1", "zh": "你好", "pinyin": "nǐ hǎo", "vi": "xin chào", "source_tag": "HSK1"},
                    {"zh": "没有 id"},
                    {"_id": "v2", "zh": "谢谢", "vi": "cảm ơn"}
                ]
            })))
            .mount(&server)
            .await;

        let tags = vec!["HSK1".to_string(), "HSK2".to_string()];
        let vocabs = client(&server).vocabs(1000, &tags).await.unwrap();
        assert_eq!(vocabs.len(), 2);
        assert_eq!(vocabs[0].hanzi, "你好");
        assert_eq!(vocabs[0].unit_tag.as_deref(), Some("HSK1"));
        assert_eq!(vocabs[1].pinyin, "");
    }

    #[tokio::test]
    async fn base_path_is_kept() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/sentences"))
            .and(query_param("limit", "10000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"_id": "s1", "zh": "我是学生", "vi": "Tôi là học sinh", "lessonId": {"_id": "l1", "title": "Bài 1"}}
            ])))
            .mount(&server)
            .await;

        let api = ContentApi::new(&format!("{}/api/", server.uri()), None, None).unwrap();
        let sentences = api.sentences(10_000).await.unwrap();
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].lesson_title.as_deref(), Some("Bài 1"));
    }

    #[tokio::test]
    async fn reading_unit_attaches_itself_to_questions() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reading-units/u1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "unit": {"_id": "u1", "unit_title": "Gia đình", "zh_paragraph": "我家有四口人。", "vi_paragraph": "Nhà tôi có bốn người."},
                "questions": [
                    {"_id": "r1", "question": "Nhà có mấy người?", "answer": {"text": "四"}, "question_type": "fill"}
                ]
            })))
            .mount(&server)
            .await;

        let detail = client(&server).reading_unit("u1").await.unwrap();
        assert_eq!(detail.unit.title, "Gia đình");
        assert_eq!(detail.questions[0].answer, "四");
        assert_eq!(detail.questions[0].unit.as_ref().unwrap().id, "u1");
    }

    #[tokio::test]
    async fn grade_posts_answers() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/reading-units/u1/grade"))
            .and(body_json(json!({"answers": {"r1": "四"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "score": 100,
                "correctCount": 1,
                "results": [{
                    "questionId": "r1", "question": "?", "userAnswer": "四",
                    "correctAnswer": "四", "correct": true, "question_type": "fill"
                }]
            })))
            .mount(&server)
            .await;

        let answers = AnswerRecord::from([("r1".to_string(), "四".to_string())]);
        let grade = client(&server)
            .grade_reading_unit("u1", &answers)
            .await
            .unwrap();
        assert_eq!(grade.score, 100);
        assert_eq!(grade.correct_count, 1);
        assert!(grade.results[0].correct);
        assert_eq!(grade.results[0].question_type.as_deref(), Some("fill"));
    }

    #[tokio::test]
    async fn session_lifecycle() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/sessions"))
            .and(body_json(json!({"mode": "vocab"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"_id": "sess-9"})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/sessions/answers"))
            .and(body_string_contains("\"questionType\":\"vocab\""))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/sessions/sess-9/complete"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let api = client(&server);
        let id = api.create_session("vocab").await.unwrap();
        assert_eq!(id, "sess-9");
        api.record_answer(&AnswerEvent {
            session_id: id.clone(),
            question_id: "v1".into(),
            question_type: "vocab".into(),
            user_answer: "你好".into(),
            correct: true,
        })
        .await
        .unwrap();
        api.complete_session(&id).await.unwrap();
    }

    #[tokio::test]
    async fn unauthorized_reports_server_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reading-units"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"error": "Token không hợp lệ"})),
            )
            .mount(&server)
            .await;

        let err = client(&server).reading_units().await.unwrap_err();
        match err {
            ContentError::Unauthorized(message) => assert_eq!(message, "Token không hợp lệ"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_unit_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reading-units/gone/questions"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client(&server).unit_questions("gone", 5).await.unwrap_err();
        assert!(matches!(err, ContentError::NotFound(p) if p == "/reading-units/gone/questions"));
    }

    #[tokio::test]
    async fn server_error_keeps_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sentences"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client(&server).sentences(10).await.unwrap_err();
        assert!(matches!(err, ContentError::ApiError { status: 500, ref message } if message == "boom"));
    }

    #[tokio::test]
    async fn non_json_body_is_invalid_payload() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reading-units"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client(&server).reading_units().await.unwrap_err();
        assert!(matches!(err, ContentError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reading-units"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let api = ContentApi::new(&server.uri(), None, Some(1)).unwrap();
        let err = api.reading_units().await.unwrap_err();
        assert!(matches!(err, ContentError::Timeout(1)));
    }

    #[tokio::test]
    async fn import_uploads_multipart_form() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/import"))
            .and(body_string_contains("name=\"fileType\""))
            .and(body_string_contains("reading-units"))
            .and(body_string_contains("filename=\"units.xlsx\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": 3, "total": 4})))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("units.xlsx");
        std::fs::write(&file, b"fake spreadsheet").unwrap();

        let summary = client(&server)
            .import_file(&file, ImportKind::ReadingUnits, ImportMode::Overwrite)
            .await
            .unwrap();
        assert_eq!(summary["success"], 3);
    }

    #[tokio::test]
    async fn import_of_missing_file_fails_locally() {
        let server = MockServer::start().await;
        let err = client(&server)
            .import_file(Path::new("/nonexistent/v.xlsx"), ImportKind::Vocabulary, ImportMode::Append)
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::ReadFile { .. }));
    }

    #[tokio::test]
    async fn import_logs_parse() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/import-logs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "_id": "log1", "file": "Vocabulary.xlsx", "fileType": "vocabulary",
                "mode": "append", "result": {"success": 120, "total": 125},
                "createdAt": "2024-05-01T08:00:00Z"
            }])))
            .mount(&server)
            .await;

        let logs = client(&server).import_logs().await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].id, "log1");
        assert_eq!(logs[0].result.success, 120);
    }

    #[tokio::test]
    async fn pools_load_through_the_api() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vocabs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "vocabs": [{"_id": "v1", "zh": "书", "vi": "sách"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/sentences"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/reading-units"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"_id": "u1", "unit_title": "A"},
                {"_id": "u2", "unit_title": "B"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/reading-units/u1/questions"))
            .and(query_param("count", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"_id": "r1", "question": "?", "answer": "a"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/reading-units/u2/questions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = client(&server);
        let pools = load_pools(&api, &PoolLimits::default()).await;

        assert_eq!(pools.vocabs.items().unwrap().len(), 1);
        assert_eq!(pools.failures().len(), 1);
        let reading = pools.reading.items().unwrap();
        assert_eq!(reading.len(), 1);
        assert_eq!(reading[0].unit.as_ref().unwrap().title, "A");
    }
}
