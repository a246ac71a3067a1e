//! Content API endpoints
//!
//! CRUD for academic subjects and placement problems over the document
//! store. Stored documents are arbitrary JSON fields; subjects are parsed
//! through the tolerant model on the way out, so legacy documents with a
//! stringified `units` field list cleanly alongside native ones.

use crate::api::state::SharedState;
use crate::content::{
    Difficulty, Problem, Subject, PROBLEMS_COLLECTION, SUBJECTS_COLLECTION,
};
use crate::error::AppError;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

/// Request to create or update a subject
#[derive(Debug, Deserialize)]
pub struct SubjectRequest {
    /// Subject name
    pub name: String,
    /// Subject code, e.g. KCS-401
    pub code: String,
    /// Semester number
    pub semester: u8,
    /// Units, either a native array or a serialized JSON string
    #[serde(default)]
    pub units: serde_json::Value,
}

/// Request to create or update a placement problem
#[derive(Debug, Deserialize)]
pub struct ProblemRequest {
    /// Problem title
    pub title: String,
    /// Difficulty bucket
    pub difficulty: Difficulty,
    /// Companies known to ask this problem
    #[serde(default)]
    pub companies: Vec<String>,
    /// Topic tag
    pub topic: String,
    /// External link to the problem statement
    pub link: String,
}

/// Response carrying a created/updated document id
#[derive(Debug, Serialize)]
pub struct DocumentIdResponse {
    /// Document id
    pub id: String,
}

fn subject_fields(request: &SubjectRequest) -> serde_json::Value {
    json!({
        "name": request.name,
        "code": request.code,
        "semester": request.semester,
        "units": request.units,
    })
}

fn problem_fields(request: &ProblemRequest) -> serde_json::Value {
    json!({
        "title": request.title,
        "difficulty": request.difficulty,
        "companies": request.companies,
        "topic": request.topic,
        "link": request.link,
    })
}

/// Parse a stored document into a typed model, injecting the document id
fn parse_document<T: serde::de::DeserializeOwned>(
    id: &str,
    fields: &serde_json::Value,
) -> Option<T> {
    let mut value = fields.clone();
    if let Some(object) = value.as_object_mut() {
        object.insert("id".to_string(), json!(id));
    }
    match serde_json::from_value(value) {
        Ok(model) => Some(model),
        Err(e) => {
            // A malformed document hides itself rather than breaking the list.
            warn!(document_id = %id, error = %e, "Skipping unparseable document");
            None
        }
    }
}

/// GET /api/subjects - list subjects in creation order
pub async fn list_subjects(State(state): State<SharedState>) -> Json<Vec<Subject>> {
    let subjects = state
        .store
        .list(SUBJECTS_COLLECTION)
        .await
        .iter()
        .filter_map(|doc| parse_document(&doc.id, &doc.fields))
        .collect();
    Json(subjects)
}

/// POST /api/subjects - create a subject
pub async fn create_subject(
    State(state): State<SharedState>,
    Json(request): Json<SubjectRequest>,
) -> Json<DocumentIdResponse> {
    let document = state
        .store
        .create(SUBJECTS_COLLECTION, subject_fields(&request))
        .await;
    Json(DocumentIdResponse { id: document.id })
}

/// PUT /api/subjects/:id - replace a subject
pub async fn update_subject(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(request): Json<SubjectRequest>,
) -> Result<Json<DocumentIdResponse>, AppError> {
    let document = state
        .store
        .update(SUBJECTS_COLLECTION, &id, subject_fields(&request))
        .await?;
    Ok(Json(DocumentIdResponse { id: document.id }))
}

/// DELETE /api/subjects/:id - delete a subject
pub async fn delete_subject(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentIdResponse>, AppError> {
    state.store.delete(SUBJECTS_COLLECTION, &id).await?;
    Ok(Json(DocumentIdResponse { id }))
}

/// GET /api/problems - list placement problems in creation order
pub async fn list_problems(State(state): State<SharedState>) -> Json<Vec<Problem>> {
    let problems = state
        .store
        .list(PROBLEMS_COLLECTION)
        .await
        .iter()
        .filter_map(|doc| parse_document(&doc.id, &doc.fields))
        .collect();
    Json(problems)
}

/// POST /api/problems - create a placement problem
pub async fn create_problem(
    State(state): State<SharedState>,
    Json(request): Json<ProblemRequest>,
) -> Json<DocumentIdResponse> {
    let document = state
        .store
        .create(PROBLEMS_COLLECTION, problem_fields(&request))
        .await;
    Json(DocumentIdResponse { id: document.id })
}

/// PUT /api/problems/:id - replace a placement problem
pub async fn update_problem(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(request): Json<ProblemRequest>,
) -> Result<Json<DocumentIdResponse>, AppError> {
    let document = state
        .store
        .update(PROBLEMS_COLLECTION, &id, problem_fields(&request))
        .await?;
    Ok(Json(DocumentIdResponse { id: document.id }))
}

/// DELETE /api/problems/:id - delete a placement problem
pub async fn delete_problem(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentIdResponse>, AppError> {
    state.store.delete(PROBLEMS_COLLECTION, &id).await?;
    Ok(Json(DocumentIdResponse { id }))
}
