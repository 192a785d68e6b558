//! Session storage and change notification
//!
//! The active session lives in a watch channel. Subscribers (the session
//! gate in the UI) observe the initial value and every sign-in, token
//! refresh, and sign-out after it; dropping the receiver ends the
//! subscription. Alongside the channel, the store mirrors the session to a
//! JSON file so a restart can resume without prompting for credentials.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tasksense_shared::models::user::Session;
use tokio::sync::watch;

use crate::error::{ClientError, ClientResult};

/// Holds the active session, notifies subscribers, persists to disk
#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<Option<Session>>,
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store persisting to `path`, starting signed out
    pub fn new(path: PathBuf) -> Self {
        let (tx, _rx) = watch::channel(None);
        SessionStore { tx, path }
    }

    /// Path of the persisted session file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current session, if any
    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    /// Subscribes to session changes
    ///
    /// The receiver starts at the current value and is marked changed on
    /// every replacement, including sign-out.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    /// Replaces the active session, notifying subscribers and persisting
    ///
    /// Subscribers are notified even when persistence fails; a disk error
    /// must not leave the UI showing a stale auth state.
    pub fn set(&self, session: Option<Session>) -> ClientResult<()> {
        self.tx.send_replace(session.clone());
        match &session {
            Some(session) => self.write_file(session),
            None => self.remove_file(),
        }
    }

    /// Reads a previously persisted session from disk without activating it
    ///
    /// A missing file means signed out. A file that no longer decodes is
    /// discarded and also treated as signed out, so a format change never
    /// blocks startup.
    pub fn load(&self) -> ClientResult<Option<Session>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(ClientError::SessionStorage(err.to_string())),
        };

        match serde_json::from_str::<Session>(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "discarding unreadable session file");
                let _ = fs::remove_file(&self.path);
                Ok(None)
            }
        }
    }

    fn write_file(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| ClientError::SessionStorage(err.to_string()))?;
        }
        let json = serde_json::to_string_pretty(session)
            .map_err(|err| ClientError::SessionStorage(err.to_string()))?;
        fs::write(&self.path, json).map_err(|err| ClientError::SessionStorage(err.to_string()))
    }

    fn remove_file(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ClientError::SessionStorage(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tasksense_shared::models::user::User;
    use uuid::Uuid;

    fn sample_session() -> Session {
        Session {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
            user: User {
                id: Uuid::new_v4(),
                email: "morgan@example.com".to_string(),
                created_at: None,
            },
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("nested").join("session.json"))
    }

    #[test]
    fn test_set_persists_and_load_restores() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let session = sample_session();

        store.set(Some(session.clone())).unwrap();
        assert_eq!(store.current(), Some(session.clone()));

        // A fresh store over the same path sees the persisted session
        let restored = store_in(&dir).load().unwrap();
        assert_eq!(restored, Some(session));
    }

    #[test]
    fn test_clearing_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set(Some(sample_session())).unwrap();
        store.set(None).unwrap();

        assert_eq!(store.current(), None);
        assert_eq!(store_in(&dir).load().unwrap(), None);
    }

    #[test]
    fn test_load_with_no_file_is_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store_in(&dir).load().unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let path = store.path().to_path_buf();

        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(store.load().unwrap(), None);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_subscribers_observe_every_change() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut rx = store.subscribe();

        assert_eq!(*rx.borrow(), None);

        store.set(Some(sample_session())).unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_some());

        store.set(None).unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
    }
}
