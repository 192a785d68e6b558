//! Task table operations
//!
//! All five operations go through the service's row API with the session's
//! bearer token. Row-level security scopes every query to the signed-in
//! user, so nothing here filters by user id; an insert still names the
//! owner explicitly because the service checks it against the token.

use reqwest::header::ACCEPT;
use uuid::Uuid;

use tasksense_shared::models::task::{NewTaskRecord, Task, TaskPatch, TaskStatus};

use crate::client::ServiceClient;
use crate::error::ClientResult;

impl ServiceClient {
    /// Fetches the full task list, newest first
    pub async fn list_tasks(&self) -> ClientResult<Vec<Task>> {
        let request = self.authorized(self.http.get(self.tasks_endpoint())).await?;
        let response = request
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }
        let tasks: Vec<Task> = Self::decode(response).await?;
        tracing::debug!(count = tasks.len(), "fetched task list");
        Ok(tasks)
    }

    /// Inserts a task and returns the stored row
    ///
    /// The service fills `id` and `created_at`; asking for the
    /// representation back means the caller never has to guess them.
    pub async fn insert_task(&self, record: &NewTaskRecord) -> ClientResult<Task> {
        let request = self.authorized(self.http.post(self.tasks_endpoint())).await?;
        let response = request
            .header("Prefer", "return=representation")
            .header(ACCEPT, "application/vnd.pgrst.object+json")
            .json(record)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }
        let task: Task = Self::decode(response).await?;
        tracing::debug!(task_id = %task.id, "inserted task");
        Ok(task)
    }

    /// Applies a partial update to one task
    ///
    /// Only the fields present in the patch are written; see
    /// [`TaskPatch`] for how absent and null fields differ.
    pub async fn update_task(&self, id: Uuid, patch: &TaskPatch) -> ClientResult<()> {
        let request = self.authorized(self.http.patch(self.tasks_endpoint())).await?;
        let response = request
            .query(&[("id", format!("eq.{}", id))])
            .json(patch)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }
        tracing::debug!(task_id = %id, "updated task");
        Ok(())
    }

    /// Changes only the workflow status of one task
    pub async fn update_task_status(&self, id: Uuid, status: TaskStatus) -> ClientResult<()> {
        self.update_task(id, &TaskPatch::status_only(status)).await
    }

    /// Deletes one task
    pub async fn delete_task(&self, id: Uuid) -> ClientResult<()> {
        let request = self
            .authorized(self.http.delete(self.tasks_endpoint()))
            .await?;
        let response = request.query(&[("id", format!("eq.{}", id))]).send().await?;

        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }
        tracing::debug!(task_id = %id, "deleted task");
        Ok(())
    }
}
