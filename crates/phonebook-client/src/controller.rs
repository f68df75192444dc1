// # Client State Controller
//
// Owns the local mirror of the directory plus the transient UI state
// (inputs, filter, banner, pending confirmation). Every user intent is an
// async method that issues at most one server call and then reconciles the
// local mirror with the response.
//
// ## Locking
//
// State lives behind a `tokio::sync::RwLock`. The lock is never held across
// a server call, so concurrent intents (e.g. a double submit) each issue
// their own request.
//
// ## Confirmation
//
// Replacing a number and deleting an entry both need the user's consent.
// The controller records a `PendingAction` and returns its prompt; the host
// answers with `confirm` or `cancel`.

use crate::notification::{Notification, NotificationCenter, NotificationKind};
use crate::service::PersonsService;
use crate::view::{View, filter_entries};
use phonebook_core::{Entry, EntryId, NewEntry};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error};

/// How long a banner stays up by default
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// An action awaiting the user's yes/no
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Replace the number of an entry whose name was submitted again
    Replace {
        id: EntryId,
        name: String,
        number: String,
    },
    /// Delete an entry
    Delete { id: EntryId, name: String },
}

impl PendingAction {
    /// Question shown to the user
    pub fn prompt(&self) -> String {
        match self {
            PendingAction::Replace { name, .. } => format!(
                "{} is already added to phonebook, replace the old number with a new one?",
                name
            ),
            PendingAction::Delete { name, .. } => format!("Delete {}?", name),
        }
    }
}

/// Result of a user intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Initial fetch finished with this many entries
    Loaded(usize),
    Created(Entry),
    Updated(Entry),
    Deleted(EntryId),
    /// A prompt is waiting for `confirm` or `cancel`
    NeedsConfirmation(String),
    /// The server call failed; the message is also on the banner
    Failed(String),
    Cancelled,
    /// Nothing to act on (no pending action, unknown id)
    Nothing,
}

#[derive(Debug, Default)]
struct ClientState {
    entries: Vec<Entry>,
    name_input: String,
    number_input: String,
    filter_text: String,
    pending: Option<PendingAction>,
    notifications: NotificationCenter,
}

/// Client State Controller
///
/// Generic over the [`PersonsService`] so the same logic drives the HTTP
/// client and in-memory doubles.
pub struct Controller<S> {
    service: S,
    state: Arc<RwLock<ClientState>>,
    notification_ttl: Duration,
}

impl<S: PersonsService> Controller<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: Arc::new(RwLock::new(ClientState::default())),
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }

    /// Override how long banners stay visible
    pub fn with_notification_ttl(mut self, ttl: Duration) -> Self {
        self.notification_ttl = ttl;
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Fetch the full collection and replace the local mirror
    pub async fn load(&self) -> Outcome {
        match self.service.get_all().await {
            Ok(entries) => {
                let count = entries.len();
                self.state.write().await.entries = entries;
                debug!("Loaded {} entries", count);
                Outcome::Loaded(count)
            }
            Err(e) => {
                error!("Initial load failed: {}", e);
                let message = "Could not load phonebook".to_string();
                self.notify(message.clone(), NotificationKind::Error).await;
                Outcome::Failed(message)
            }
        }
    }

    pub async fn set_name_input(&self, text: impl Into<String>) {
        self.state.write().await.name_input = text.into();
    }

    pub async fn set_number_input(&self, text: impl Into<String>) {
        self.state.write().await.number_input = text.into();
    }

    pub async fn set_filter_text(&self, text: impl Into<String>) {
        self.state.write().await.filter_text = text.into();
    }

    /// Submit the add form
    ///
    /// Inputs are captured and cleared immediately. A name already present
    /// locally turns into a replace prompt instead of a create.
    pub async fn submit(&self) -> Outcome {
        let (name, number) = {
            let mut state = self.state.write().await;
            let name = std::mem::take(&mut state.name_input);
            let number = std::mem::take(&mut state.number_input);

            if let Some(existing) = state.entries.iter().find(|entry| entry.name == name) {
                let pending = PendingAction::Replace {
                    id: existing.id,
                    name,
                    number,
                };
                let prompt = pending.prompt();
                state.pending = Some(pending);
                return Outcome::NeedsConfirmation(prompt);
            }

            (name, number)
        };

        self.create(name, number).await
    }

    /// Ask to delete the entry with `id`
    ///
    /// Ids not present locally are ignored.
    pub async fn request_delete(&self, id: EntryId) -> Outcome {
        let mut state = self.state.write().await;
        let Some(entry) = state.entries.iter().find(|entry| entry.id == id) else {
            debug!("Ignoring delete request for unknown id {}", id);
            return Outcome::Nothing;
        };

        let pending = PendingAction::Delete {
            id,
            name: entry.name.clone(),
        };
        let prompt = pending.prompt();
        state.pending = Some(pending);
        Outcome::NeedsConfirmation(prompt)
    }

    /// Accept the pending action
    pub async fn confirm(&self) -> Outcome {
        let pending = self.state.write().await.pending.take();
        match pending {
            Some(PendingAction::Replace { id, name, number }) => {
                self.replace(id, name, number).await
            }
            Some(PendingAction::Delete { id, name }) => self.delete(id, name).await,
            None => Outcome::Nothing,
        }
    }

    /// Decline the pending action; no server call is made
    pub async fn cancel(&self) -> Outcome {
        match self.state.write().await.pending.take() {
            Some(_) => Outcome::Cancelled,
            None => Outcome::Nothing,
        }
    }

    pub async fn pending(&self) -> Option<PendingAction> {
        self.state.read().await.pending.clone()
    }

    /// The local mirror, unfiltered
    pub async fn entries(&self) -> Vec<Entry> {
        self.state.read().await.entries.clone()
    }

    /// Entries passing the current filter
    pub async fn visible_entries(&self) -> Vec<Entry> {
        let state = self.state.read().await;
        filter_entries(&state.entries, &state.filter_text)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn notification(&self) -> Option<Notification> {
        self.state.read().await.notifications.current().cloned()
    }

    /// Snapshot for rendering
    pub async fn view(&self) -> View {
        let state = self.state.read().await;
        View {
            notification: state.notifications.current().cloned(),
            filter_text: state.filter_text.clone(),
            name_input: state.name_input.clone(),
            number_input: state.number_input.clone(),
            prompt: state.pending.as_ref().map(PendingAction::prompt),
            rows: filter_entries(&state.entries, &state.filter_text)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    async fn create(&self, name: String, number: String) -> Outcome {
        match self.service.create(&NewEntry::new(name.clone(), number)).await {
            Ok(entry) => {
                self.state.write().await.entries.push(entry.clone());
                self.notify(format!("Added {}", name), NotificationKind::Success)
                    .await;
                Outcome::Created(entry)
            }
            Err(e) => {
                error!("Create of {} failed: {}", name, e);
                self.fail(format!("Could not add {}", name)).await
            }
        }
    }

    async fn replace(&self, id: EntryId, name: String, number: String) -> Outcome {
        match self
            .service
            .update(id, &NewEntry::new(name.clone(), number))
            .await
        {
            Ok(updated) => {
                {
                    let mut state = self.state.write().await;
                    if let Some(slot) = state.entries.iter_mut().find(|entry| entry.id == id) {
                        *slot = updated.clone();
                    }
                }
                self.notify(format!("Updated {}", name), NotificationKind::Success)
                    .await;
                Outcome::Updated(updated)
            }
            Err(e) => {
                error!("Update of {} failed: {}", name, e);
                self.fail(removed_message(&name)).await
            }
        }
    }

    async fn delete(&self, id: EntryId, name: String) -> Outcome {
        match self.service.remove(id).await {
            Ok(()) => {
                self.state
                    .write()
                    .await
                    .entries
                    .retain(|entry| entry.id != id);
                self.notify(format!("Deleted {}", name), NotificationKind::Success)
                    .await;
                Outcome::Deleted(id)
            }
            Err(e) => {
                error!("Delete of {} failed: {}", name, e);
                self.fail(removed_message(&name)).await
            }
        }
    }

    async fn fail(&self, message: String) -> Outcome {
        self.notify(message.clone(), NotificationKind::Error).await;
        Outcome::Failed(message)
    }

    /// Show a banner and schedule its removal after the ttl
    async fn notify(&self, text: String, kind: NotificationKind) {
        let mut state = self.state.write().await;
        let token = state.notifications.show(text, kind);

        let shared = Arc::clone(&self.state);
        let ttl = self.notification_ttl;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            shared.write().await.notifications.dismiss(token);
        });
        state.notifications.set_clear_timer(timer.abort_handle());
    }
}

fn removed_message(name: &str) -> String {
    format!(
        "Information of {} has already been removed from server",
        name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts() {
        let replace = PendingAction::Replace {
            id: EntryId(1),
            name: "Arto Hellas".to_string(),
            number: "1".to_string(),
        };
        assert_eq!(
            replace.prompt(),
            "Arto Hellas is already added to phonebook, replace the old number with a new one?"
        );

        let delete = PendingAction::Delete {
            id: EntryId(1),
            name: "Arto Hellas".to_string(),
        };
        assert_eq!(delete.prompt(), "Delete Arto Hellas?");
    }

    #[test]
    fn test_removed_message() {
        assert_eq!(
            removed_message("Ada Lovelace"),
            "Information of Ada Lovelace has already been removed from server"
        );
    }
}
