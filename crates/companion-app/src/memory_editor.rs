//! Terminal memory editor shown while the memory view is open.

use companion_chat::{ChatError, MemoryClient, UserMemory};
use companion_core::UserId;

use crate::commands::MemoryCommand;
use crate::render;

/// Result of applying one editor command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Changed,
    Unchanged,
    /// The draft has to go to the backend.
    Save,
    /// The draft has to be replaced with the stored memory.
    Reload,
    Show,
}

/// Apply a command to the draft without touching the network.
pub fn apply_edit(draft: &mut UserMemory, command: MemoryCommand) -> EditOutcome {
    match command {
        MemoryCommand::Show => EditOutcome::Show,
        MemoryCommand::Save => EditOutcome::Save,
        MemoryCommand::Reload => EditOutcome::Reload,
        MemoryCommand::Favorite { key, value } => {
            if draft.favorites.get(&key) == Some(&value) {
                return EditOutcome::Unchanged;
            }
            draft.favorites.insert(key, value);
            EditOutcome::Changed
        }
        MemoryCommand::Unfavorite(key) => match draft.favorites.remove(&key) {
            Some(_) => EditOutcome::Changed,
            None => EditOutcome::Unchanged,
        },
        MemoryCommand::Mood(mood) => {
            if draft.mood.as_deref() == Some(mood.as_str()) {
                return EditOutcome::Unchanged;
            }
            draft.mood = Some(mood);
            EditOutcome::Changed
        }
        MemoryCommand::ClearMood => match draft.mood.take() {
            Some(_) => EditOutcome::Changed,
            None => EditOutcome::Unchanged,
        },
    }
}

/// Holds the local draft and talks to the memory backend.
pub struct MemoryEditor {
    client: MemoryClient,
    draft: UserMemory,
    loaded: bool,
    dirty: bool,
}

impl MemoryEditor {
    pub fn new(client: MemoryClient, user_id: UserId) -> Self {
        Self {
            client,
            draft: UserMemory::empty(user_id),
            loaded: false,
            dirty: false,
        }
    }

    pub fn draft(&self) -> &UserMemory {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Fetch the stored memory the first time the view opens.
    pub async fn open(&mut self) -> Result<(), ChatError> {
        if self.loaded {
            return Ok(());
        }
        self.reload().await
    }

    async fn reload(&mut self) -> Result<(), ChatError> {
        let memory = self.client.fetch(&self.draft.user_id).await?;
        self.draft = memory;
        self.loaded = true;
        self.dirty = false;
        Ok(())
    }

    /// Apply a command and return the text to show the user.
    pub async fn execute(&mut self, command: MemoryCommand) -> String {
        match apply_edit(&mut self.draft, command) {
            EditOutcome::Changed => {
                self.dirty = true;
                "(unsaved) type 'save' to store".to_string()
            }
            EditOutcome::Unchanged => "nothing changed".to_string(),
            EditOutcome::Show => render::format_memory(&self.draft, self.dirty),
            EditOutcome::Reload => match self.reload().await {
                Ok(()) => render::format_memory(&self.draft, false),
                Err(e) => {
                    tracing::warn!(error = %e, "Memory reload failed");
                    format!("could not load memory: {}", e)
                }
            },
            EditOutcome::Save => match self.client.update(&self.draft).await {
                Ok(()) => {
                    self.dirty = false;
                    "memory saved".to_string()
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Memory update failed");
                    format!("could not save memory: {}", e)
                }
            },
        }
    }
}
