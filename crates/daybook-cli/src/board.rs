use daybook_core::records::{Priority, TaskRecord};

/// Edit-state machine: at most one task is being edited at any time, and
/// cancelling discards the draft without touching the mirror.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Viewing,
    Editing {
        id: i64,
        text: String,
        priority: Priority,
    },
}

/// A task removed optimistically, kept around so a failed delete can be
/// rolled back into its original slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedTask {
    index: usize,
    task: TaskRecord,
}

/// Local mirror of the task collection plus the transient view state:
/// search term, edit draft. The mirror is populated once from the server
/// and then maintained by optimistic local edits; the displayed projection
/// is always re-derived from it, never stored.
#[derive(Debug, Default)]
pub struct TaskBoard {
    tasks: Vec<TaskRecord>,
    search: String,
    edit: EditState,
}

impl TaskBoard {
    pub fn new(tasks: Vec<TaskRecord>) -> Self {
        Self {
            tasks,
            search: String::new(),
            edit: EditState::Viewing,
        }
    }

    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Display projection: case-insensitive substring filter over the task
    /// text, then a stable sort by priority rank so equal priorities keep
    /// their insertion order.
    pub fn visible(&self) -> Vec<&TaskRecord> {
        let needle = self.search.to_lowercase();
        let mut out: Vec<&TaskRecord> = self
            .tasks
            .iter()
            .filter(|t| t.text.to_lowercase().contains(&needle))
            .collect();
        out.sort_by_key(|t| t.priority_rank());
        out
    }

    pub fn edit(&self) -> &EditState {
        &self.edit
    }

    pub fn editing_id(&self) -> Option<i64> {
        match &self.edit {
            EditState::Editing { id, .. } => Some(*id),
            EditState::Viewing => None,
        }
    }

    /// Enter `Editing` for the given task, seeding the draft from its
    /// current values. Refused while another edit is in flight or when the
    /// id is unknown.
    pub fn begin_edit(&mut self, id: i64) -> bool {
        if self.editing_id().is_some() {
            return false;
        }
        let Some(task) = self.tasks.iter().find(|t| t.id == id) else {
            return false;
        };
        self.edit = EditState::Editing {
            id,
            text: task.text.clone(),
            priority: task.priority.unwrap_or_default(),
        };
        true
    }

    pub fn cancel_edit(&mut self) {
        self.edit = EditState::Viewing;
    }

    pub fn push_draft_char(&mut self, c: char) {
        if let EditState::Editing { text, .. } = &mut self.edit {
            text.push(c);
        }
    }

    pub fn pop_draft_char(&mut self) {
        if let EditState::Editing { text, .. } = &mut self.edit {
            text.pop();
        }
    }

    pub fn cycle_draft_priority(&mut self) {
        if let EditState::Editing { priority, .. } = &mut self.edit {
            *priority = priority.cycled();
        }
    }

    /// Current draft as an update request. The board stays in `Editing`
    /// until `apply_update` confirms the save; a failed save keeps the
    /// draft so nothing is lost.
    pub fn commit_edit(&self) -> Option<(i64, String, Priority)> {
        match &self.edit {
            EditState::Editing { id, text, priority } => Some((*id, text.clone(), *priority)),
            EditState::Viewing => None,
        }
    }

    /// Merge a server-confirmed update into the mirror and leave `Editing`.
    pub fn apply_update(&mut self, updated: TaskRecord) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == updated.id) {
            *task = updated;
        }
        self.edit = EditState::Viewing;
    }

    /// Optimistic create: the mirror gains the task before the server
    /// confirms. Roll back with `remove(task.id)` if the call fails.
    pub fn insert(&mut self, task: TaskRecord) {
        self.tasks.push(task);
    }

    /// Optimistic delete. Returns the removed record and its slot so a
    /// failed call can restore the mirror unchanged.
    pub fn remove(&mut self, id: i64) -> Option<RemovedTask> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        let task = self.tasks.remove(index);
        Some(RemovedTask { index, task })
    }

    /// Roll back an optimistic delete.
    pub fn restore(&mut self, removed: RemovedTask) {
        let index = removed.index.min(self.tasks.len());
        self.tasks.insert(index, removed.task);
    }
}
