use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use study_core::model::{CourseId, DocumentId, SessionId, UserContext};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Backend response after converting an uploaded document into a quiz
/// session. Question generation is entirely backend-owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedDocument {
    pub document_id: DocumentId,
    pub session_id: SessionId,
    pub question_count: u32,
}

/// Typed accessor for document upload (external collaborator).
#[derive(Clone)]
pub struct DocumentsApi {
    client: ApiClient,
}

impl DocumentsApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Upload a document for quiz generation.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any transport or HTTP failure.
    pub async fn process(
        &self,
        ctx: &UserContext,
        course_id: CourseId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ProcessedDocument, ApiError> {
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_owned()))
            .text("userId", ctx.user_id.to_string())
            .text("courseId", course_id.to_string());

        self.client
            .post_multipart("/api/documents/process", form)
            .await
    }
}
