//! Dashboard state and task mutations.
//!
//! The dashboard owns the fetched task list plus the client-side view state:
//! filter, selection, modal form and in-flight flags. Every mutation goes
//! through the service and is followed by a full refetch, so the list always
//! reflects what the backend accepted. Filtering is applied locally and
//! survives refetches.

use std::sync::Arc;

use tasksense_client::classify::TaskClassifier;
use tasksense_client::{ClientResult, ServiceClient};
use tasksense_shared::filter::TaskFilter;
use tasksense_shared::models::task::{NewTaskRecord, Task, TaskDraft, TaskPatch};
use tasksense_shared::models::user::User;
use tasksense_shared::stats::TaskStats;

use crate::form::TaskForm;
use crate::quotes::{self, Quote};

/// State for the signed-in task view.
pub struct Dashboard {
    client: Arc<ServiceClient>,
    classifier: Arc<dyn TaskClassifier>,
    /// Owner of the session the dashboard was opened for.
    pub user: User,
    /// Last fetched task list, newest first.
    pub tasks: Vec<Task>,
    /// Tasks passing the current filter, in fetch order.
    pub visible: Vec<Task>,
    pub filter: TaskFilter,
    /// Index into `visible` of the highlighted task.
    pub selected: usize,
    /// True while keystrokes go to the search box.
    pub search_active: bool,
    /// Set while the task list is being fetched.
    pub is_loading: bool,
    /// Set while a submission is waiting on urgency classification.
    pub classifying: bool,
    /// Modal create/edit form, when open.
    pub form: Option<TaskForm>,
    pub quote: &'static Quote,
}

impl Dashboard {
    pub fn new(
        client: Arc<ServiceClient>,
        classifier: Arc<dyn TaskClassifier>,
        user: User,
    ) -> Self {
        Dashboard {
            client,
            classifier,
            user,
            tasks: Vec::new(),
            visible: Vec::new(),
            filter: TaskFilter::default(),
            selected: 0,
            search_active: false,
            is_loading: false,
            classifying: false,
            form: None,
            quote: quotes::pick(),
        }
    }

    /// True while a fetch or submission is in flight. Mutation keys are
    /// ignored in this state.
    pub fn is_busy(&self) -> bool {
        self.is_loading || self.classifying
    }

    /// Counts over the full task list, regardless of the active filter.
    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible.get(self.selected)
    }

    /// Re-fetches the task list. On failure the previous list is kept.
    pub async fn refresh(&mut self) -> ClientResult<()> {
        self.is_loading = true;
        let result = self.client.list_tasks().await;
        self.is_loading = false;
        self.tasks = result?;
        self.apply_filter();
        Ok(())
    }

    /// Classifies the draft, inserts it for the signed-in user and
    /// refetches. The form closes once the insert has been accepted; any
    /// earlier failure leaves it open.
    pub async fn create_task(&mut self, draft: TaskDraft) -> ClientResult<()> {
        self.classifying = true;
        let result = self.create_inner(draft).await;
        self.classifying = false;
        result
    }

    async fn create_inner(&mut self, draft: TaskDraft) -> ClientResult<()> {
        let urgency = self
            .classifier
            .classify(&draft.title, draft.description.as_deref())
            .await?;
        let user = self.client.get_user().await?;
        let record = NewTaskRecord::from_draft(draft, user.id, urgency);
        self.client.insert_task(&record).await?;
        self.form = None;
        self.refresh().await
    }

    /// Applies the draft to an existing task. The urgency is re-classified
    /// only when the title or description changed; otherwise the stored
    /// urgency stands.
    pub async fn update_task(&mut self, original: &Task, draft: TaskDraft) -> ClientResult<()> {
        let mut patch = TaskPatch::from_draft(&draft);
        if draft.differs_in_text(original) {
            self.classifying = true;
            let classified = self
                .classifier
                .classify(&draft.title, draft.description.as_deref())
                .await;
            self.classifying = false;
            patch = patch.with_urgency(classified?);
        }
        self.client.update_task(original.id, &patch).await?;
        self.form = None;
        self.refresh().await
    }

    /// Advances the highlighted task to the next workflow status. Never
    /// touches the classifier.
    pub async fn cycle_selected_status(&mut self) -> ClientResult<()> {
        let (id, next) = match self.selected_task() {
            Some(task) => (task.id, task.status.next()),
            None => return Ok(()),
        };
        self.client.update_task_status(id, next).await?;
        self.refresh().await
    }

    /// Deletes the highlighted task and refetches.
    pub async fn delete_selected(&mut self) -> ClientResult<()> {
        let id = match self.selected_task() {
            Some(task) => task.id,
            None => return Ok(()),
        };
        self.client.delete_task(id).await?;
        self.refresh().await
    }

    pub fn open_new_form(&mut self) {
        self.form = Some(TaskForm::new());
    }

    /// Opens the form pre-filled with the highlighted task.
    pub fn open_edit_form(&mut self) {
        if let Some(task) = self.selected_task() {
            self.form = Some(TaskForm::editing(task.clone()));
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.visible.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn cycle_status_filter(&mut self) {
        self.filter.status = self.filter.status.next();
        self.apply_filter();
    }

    /// Draws a fresh motivational quote.
    pub fn reroll_quote(&mut self) {
        self.quote = quotes::pick();
    }

    pub fn begin_search(&mut self) {
        self.search_active = true;
    }

    /// Leaves search entry mode, keeping the query.
    pub fn end_search(&mut self) {
        self.search_active = false;
    }

    /// Clears the query and leaves search entry mode.
    pub fn clear_search(&mut self) {
        self.search_active = false;
        self.filter.search.clear();
        self.apply_filter();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.filter.search.push(c);
        self.apply_filter();
    }

    pub fn pop_search_char(&mut self) {
        self.filter.search.pop();
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        self.visible = self.filter.apply(&self.tasks);
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }
}
