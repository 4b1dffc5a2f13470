//! Tailoring orders, their production workflow and notes

use shared::models::{NoteCreate, TailoringNote, TailoringOrder, TailoringUpdate};
use shared::workflow::{StepTransition, TailoringWorkflow};

use super::resource_path;
use crate::{ClientResult, HttpClient};

impl HttpClient {
    /// `GET /tailoring/:id`
    pub async fn get_tailoring_order(&self, id: &str) -> ClientResult<TailoringOrder> {
        self.get(&resource_path("tailoring", id)).await
    }

    /// `PATCH /tailoring/:id`
    pub async fn update_tailoring_order(
        &self,
        id: &str,
        update: &TailoringUpdate,
    ) -> ClientResult<TailoringOrder> {
        self.patch(&resource_path("tailoring", id), update).await
    }

    /// `GET /tailoring/workflow/:id`
    pub async fn get_workflow(&self, order_id: &str) -> ClientResult<TailoringWorkflow> {
        self.get(&resource_path("tailoring/workflow", order_id)).await
    }

    /// `PATCH /tailoring/workflow/:id`, the server decides whether the transition is legal
    pub async fn transition_workflow(
        &self,
        order_id: &str,
        transition: &StepTransition,
    ) -> ClientResult<TailoringWorkflow> {
        self.patch(&resource_path("tailoring/workflow", order_id), transition)
            .await
    }

    /// `GET /tailoring/notes/:id`
    pub async fn list_tailoring_notes(&self, order_id: &str) -> ClientResult<Vec<TailoringNote>> {
        self.get(&resource_path("tailoring/notes", order_id)).await
    }

    /// `PATCH /tailoring/notes/:id`
    pub async fn add_tailoring_note(
        &self,
        order_id: &str,
        content: impl Into<String>,
    ) -> ClientResult<TailoringNote> {
        let note = NoteCreate {
            content: content.into(),
        };
        self.patch(&resource_path("tailoring/notes", order_id), &note).await
    }
}
