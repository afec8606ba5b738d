//! 会话持久化格式
//!
//! 一个键保存 `{"state": {"user", "token", "isAuthenticated"}, "version"}`。
//! 只恢复完全一致的记录。

use log::warn;
use omnichat_shared::User;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Session;
use crate::web::KeyValueStore;

const LAYOUT_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    user: Option<User>,
    token: Option<String>,
    #[serde(rename = "isAuthenticated")]
    is_authenticated: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    state: PersistedState,
    version: u32,
}

fn encode(session: &Session) -> Option<Value> {
    let Session::Authenticated { user, credential } = session else {
        return None;
    };
    let envelope = Envelope {
        state: PersistedState {
            user: Some(user.clone()),
            token: Some(credential.clone()),
            is_authenticated: true,
        },
        version: LAYOUT_VERSION,
    };
    serde_json::to_value(envelope).ok()
}

/// 记录格式错误或前后矛盾时返回 `None`
fn decode(value: Value) -> Option<Session> {
    let envelope: Envelope = serde_json::from_value(value).ok()?;
    if envelope.version != LAYOUT_VERSION {
        return None;
    }
    match envelope.state {
        PersistedState {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
        } if !token.is_empty() => Some(Session::authenticated(user, token)),
        PersistedState {
            user: None,
            token: None,
            is_authenticated: false,
        } => Some(Session::Anonymous),
        _ => None,
    }
}

/// 会话存储的直写持久化
pub struct SessionPersistence<S: KeyValueStore> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> SessionPersistence<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// 读取会话，无法使用的记录会被删除
    pub fn load(&self) -> Session {
        let raw = match self.storage.load(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Session::Anonymous,
            Err(e) => {
                warn!("discarding stored session: {}", e);
                self.storage.remove(&self.key);
                return Session::Anonymous;
            }
        };
        match decode(raw) {
            Some(session) => session,
            None => {
                warn!("discarding invalid stored session under {}", self.key);
                self.storage.remove(&self.key);
                Session::Anonymous
            }
        }
    }

    pub fn store(&self, session: &Session) {
        match encode(session) {
            Some(value) => {
                if !self.storage.save(&self.key, &value) {
                    warn!("could not persist session under {}", self.key);
                }
            }
            None => self.storage.remove(&self.key),
        }
    }

    pub fn clear(&self) {
        self.storage.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::MemoryStorage;
    use serde_json::json;

    const KEY: &str = "test:auth";

    fn user_json() -> Value {
        json!({
            "id": 1, "email": "admin@omnichat.com", "full_name": "Admin",
            "role": "admin", "is_active": true, "created_at": "2024-01-01T00:00:00"
        })
    }

    fn stored(state: Value) -> SessionPersistence<MemoryStorage> {
        SessionPersistence::new(
            MemoryStorage::with_entry(KEY, json!({"state": state, "version": 0})),
            KEY,
        )
    }

    #[test]
    fn restores_consistent_record() {
        let p = stored(json!({"user": user_json(), "token": "tok", "isAuthenticated": true}));
        let session = p.load();
        assert_eq!(session.credential(), Some("tok"));
        assert_eq!(session.user().map(|u| u.id), Some(1));
    }

    #[test]
    fn token_without_user_is_discarded() {
        let p = stored(json!({"user": null, "token": "tok", "isAuthenticated": true}));
        assert_eq!(p.load(), Session::Anonymous);
        assert!(p.storage.get(KEY).is_none());
    }

    #[test]
    fn user_without_token_is_discarded() {
        let p = stored(json!({"user": user_json(), "token": null, "isAuthenticated": true}));
        assert_eq!(p.load(), Session::Anonymous);
        assert!(p.storage.get(KEY).is_none());
    }

    #[test]
    fn flag_disagreeing_with_fields_is_discarded() {
        let p = stored(json!({"user": user_json(), "token": "tok", "isAuthenticated": false}));
        assert_eq!(p.load(), Session::Anonymous);
        assert!(p.storage.get(KEY).is_none());
    }

    #[test]
    fn missing_fields_are_discarded() {
        let p = SessionPersistence::new(
            MemoryStorage::with_entry(KEY, json!({"token": "tok"})),
            KEY,
        );
        assert_eq!(p.load(), Session::Anonymous);
        assert!(p.storage.get(KEY).is_none());
    }

    #[test]
    fn unknown_layout_version_is_discarded() {
        let p = SessionPersistence::new(
            MemoryStorage::with_entry(
                KEY,
                json!({"state": {"user": user_json(), "token": "tok", "isAuthenticated": true},
                       "version": 7}),
            ),
            KEY,
        );
        assert_eq!(p.load(), Session::Anonymous);
    }

    #[test]
    fn unparseable_text_is_removed() {
        let p = SessionPersistence::new(MemoryStorage::with_raw(KEY, "{\"state\": tru"), KEY);
        assert_eq!(p.load(), Session::Anonymous);
        assert!(!p.storage.contains(KEY));
    }

    #[test]
    fn store_then_load_keeps_session() {
        let p = SessionPersistence::new(MemoryStorage::new(), KEY);
        let user: User = serde_json::from_value(user_json()).unwrap();
        let session = Session::authenticated(user, "tok-abc");

        p.store(&session);
        let raw = p.storage.get(KEY).unwrap();
        assert_eq!(raw["state"]["isAuthenticated"], true);
        assert_eq!(raw["state"]["token"], "tok-abc");
        assert_eq!(p.load(), session);

        p.store(&Session::Anonymous);
        assert!(p.storage.get(KEY).is_none());
    }
}
