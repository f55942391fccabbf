//! Session registry: session id → locale-bound formatter.
//!
//! Entries live in a sharded concurrent map; operations on one session do not
//! block operations on sessions in other shards. There is no expiry: every
//! [`SessionRegistry::register`] needs a matching [`SessionRegistry::delete`], or
//! use [`SessionRegistry::scope`] to tie the entry to a guard's lifetime.

use std::{ops::Deref, sync::Arc};

use dashmap::DashMap;
use unic_langid::LanguageIdentifier;

use crate::printer::{Formatter, Printer, Translations};

/// Returns a fresh random session identifier.
pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, Arc<dyn Formatter>>,
    translations: Translations,
}

impl SessionRegistry {
    /// Creates an empty registry whose printers never translate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry whose printers translate through `translations`.
    pub fn with_translations(translations: Translations) -> Self {
        SessionRegistry {
            sessions: DashMap::new(),
            translations,
        }
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    /// Binds `id` to a new printer for `language`, replacing any previous entry.
    pub fn register(&self, id: impl Into<String>, language: LanguageIdentifier) {
        let catalog = self.translations.catalog_for(&language);
        let formatter = Printer::new(language, catalog);
        self.register_formatter(id, Arc::new(formatter));
    }

    /// Binds `id` to a caller-supplied formatter, replacing any previous entry.
    pub fn register_formatter(&self, id: impl Into<String>, formatter: Arc<dyn Formatter>) {
        let id = id.into();
        tracing::debug!(
            session = %id,
            language = ?formatter.language().map(ToString::to_string),
            "registering session"
        );
        self.sessions.insert(id, formatter);
    }

    /// Returns the formatter bound to `id`, if any.
    pub fn lookup(&self, id: &str) -> Option<Arc<dyn Formatter>> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    /// Removes `id`. Deleting an unknown id does nothing.
    pub fn delete(&self, id: &str) {
        if self.sessions.remove(id).is_some() {
            tracing::debug!(session = %id, "deleted session");
        }
    }

    /// Registers `id` and returns a guard that deletes it when dropped.
    pub fn scope(&self, id: impl Into<String>, language: LanguageIdentifier) -> SessionGuard<'_> {
        let id = id.into();
        self.register(id.clone(), language);
        SessionGuard { registry: self, id }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drops every session.
    pub fn shutdown(&self) {
        let count = self.sessions.len();
        self.sessions.clear();
        tracing::debug!(sessions = count, "session registry shut down");
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.sessions.len())
            .field("translations", &self.translations.len())
            .finish()
    }
}

/// Deletes its session from the registry on drop, including during unwinding.
#[derive(Debug)]
pub struct SessionGuard<'a> {
    registry: &'a SessionRegistry,
    id: String,
}

impl SessionGuard<'_> {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Deref for SessionGuard<'_> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.id
    }
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        self.registry.delete(&self.id);
    }
}
