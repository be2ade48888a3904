use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::jwt::now;
use crate::model::supervisor::Supervisor;

/// Fixed name of the file holding every persisted session.
pub const SESSION_FILE: &str = "escala_supervisor.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub supervisor: Supervisor,
    /// Unix seconds, same clock as the token `exp`
    pub expires_at: usize,
}

/// Signed-in supervisors keyed by token id. Sessions outlive the process
/// and end on sign-out.
pub trait SessionStore: Send + Sync {
    fn restore(&self, key: &str) -> Option<Supervisor>;
    fn save(&self, key: &str, session: Session);
    fn clear(&self, key: &str);
}

pub struct FileSessionStore {
    path: PathBuf,
    sessions: RwLock<HashMap<String, Session>>,
}

impl FileSessionStore {
    /// Loads `<dir>/escala_supervisor.json`, dropping expired sessions. An
    /// unreadable file is discarded rather than failing start-up.
    pub fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(SESSION_FILE);

        let sessions = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, Session>>(&raw) {
                Ok(saved) => {
                    let now = now();
                    saved
                        .into_iter()
                        .filter(|(_, s)| s.expires_at > now)
                        .collect()
                }
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Discarding corrupt session file");
                    let _ = fs::remove_file(&path);
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e),
        };

        info!(count = sessions.len(), "Sessions restored");
        Ok(Self {
            path,
            sessions: RwLock::new(sessions),
        })
    }

    fn flush(&self, sessions: &HashMap<String, Session>) {
        let result = serde_json::to_vec(sessions)
            .map_err(io::Error::from)
            .and_then(|bytes| {
                let tmp = self.path.with_extension("json.tmp");
                fs::write(&tmp, bytes)?;
                fs::rename(&tmp, &self.path)
            });

        if let Err(e) = result {
            error!(error = %e, path = %self.path.display(), "Failed to persist sessions");
        }
    }
}

impl SessionStore for FileSessionStore {
    fn restore(&self, key: &str) -> Option<Supervisor> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions
            .get(key)
            .filter(|s| s.expires_at > now())
            .map(|s| s.supervisor.clone())
    }

    fn save(&self, key: &str, session: Session) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let now = now();
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        if sessions.len() < before {
            debug!(dropped = before - sessions.len(), "Expired sessions pruned");
        }
        sessions.insert(key.to_string(), session);
        self.flush(&sessions);
    }

    fn clear(&self, key: &str) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        if sessions.remove(key).is_some() {
            self.flush(&sessions);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("escala-sessions-{}", Uuid::new_v4()))
    }

    fn session(expires_at: usize) -> Session {
        Session {
            supervisor: Supervisor {
                id: 1,
                email: "admin@escala.com".into(),
                name: "admin".into(),
            },
            expires_at,
        }
    }

    #[test]
    fn sessions_survive_reopen_until_cleared() {
        let dir = scratch_dir();
        let store = FileSessionStore::open(&dir).unwrap();
        store.save("abc", session(now() + 600));
        assert_eq!(store.restore("abc").map(|s| s.id), Some(1));

        let reopened = FileSessionStore::open(&dir).unwrap();
        assert_eq!(reopened.restore("abc").map(|s| s.id), Some(1));

        reopened.clear("abc");
        assert!(reopened.restore("abc").is_none());
        let again = FileSessionStore::open(&dir).unwrap();
        assert!(again.restore("abc").is_none());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn expired_sessions_are_not_restored() {
        let dir = scratch_dir();
        let store = FileSessionStore::open(&dir).unwrap();
        store.save("old", session(now().saturating_sub(1)));
        assert!(store.restore("old").is_none());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn saving_prunes_expired_sessions_from_the_file() {
        let dir = scratch_dir();
        let store = FileSessionStore::open(&dir).unwrap();
        store.save("stale", session(now() + 600));
        store
            .sessions
            .write()
            .unwrap()
            .get_mut("stale")
            .unwrap()
            .expires_at = now().saturating_sub(1);

        store.save("fresh", session(now() + 600));

        let raw = fs::read_to_string(dir.join(SESSION_FILE)).unwrap();
        let saved: HashMap<String, Session> = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved.len(), 1);
        assert!(saved.contains_key("fresh"));
        assert_eq!(store.sessions.read().unwrap().len(), 1);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn corrupt_file_is_discarded() {
        let dir = scratch_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SESSION_FILE), b"{not json").unwrap();

        let store = FileSessionStore::open(&dir).unwrap();
        assert!(store.restore("anything").is_none());
        assert!(!dir.join(SESSION_FILE).exists());
        let _ = fs::remove_dir_all(dir);
    }
}
