use crate::data::persistence::{Persistable, Storage};
use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// Epoch milliseconds.
    pub created_at: i64,
}

impl Todo {
    pub fn new(text: &str) -> Self {
        Todo {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.to_string(),
            completed: false,
            created_at: Utc::now().timestamp_millis(),
        }
    }
}

/// Newest first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct TodoData {
    pub todos: Vec<Todo>,
}

impl Default for TodoData {
    fn default() -> Self {
        TodoData {
            todos: vec![Todo {
                id: "default-todo".to_string(),
                text: "get stuff done".to_string(),
                completed: false,
                created_at: Utc::now().timestamp_millis(),
            }],
        }
    }
}

impl Persistable for TodoData {
    fn key() -> &'static str {
        "moodbits-todos"
    }
}

impl TodoData {
    /// Trims and lowercases `text`; blank input adds nothing and returns None.
    pub fn add(&mut self, text: &str) -> Option<&Todo> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.todos.insert(0, Todo::new(&trimmed.to_lowercase()));
        self.todos.first()
    }

    pub fn toggle(&mut self, id: &str) {
        if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
            todo.completed = !todo.completed;
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.todos.retain(|t| t.id != id);
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }
}

/// The task widget: the list plus write-through to storage.
pub struct TodoList {
    pub data: TodoData,
    storage: Box<dyn Storage>,
}

impl TodoList {
    pub fn open(storage: Box<dyn Storage>) -> Self {
        TodoList {
            data: TodoData::load_or_default(storage.as_ref()),
            storage,
        }
    }

    pub fn add(&mut self, text: &str) -> Result<bool> {
        let added = self.data.add(text).is_some();
        if added {
            debug!(total = self.data.todos.len(), "task added");
            self.data.save(self.storage.as_mut())?;
        }
        Ok(added)
    }

    pub fn toggle_at(&mut self, index: usize) -> Result<()> {
        if let Some(id) = self.data.todos.get(index).map(|t| t.id.clone()) {
            self.data.toggle(&id);
            self.data.save(self.storage.as_mut())?;
        }
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<()> {
        if let Some(id) = self.data.todos.get(index).map(|t| t.id.clone()) {
            self.data.remove(&id);
            debug!(total = self.data.todos.len(), "task removed");
            self.data.save(self.storage.as_mut())?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.data.todos.len()
    }
}
