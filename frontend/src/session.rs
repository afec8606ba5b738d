//! 会话存储
//!
//! 唯一保存 "谁已登录、使用哪个凭证" 的地方。状态只会整体替换，
//! 读取方不会看到只有凭证没有用户的中间状态。
//! 每次替换都会写入持久化存储并通知订阅者。

mod persist;

use log::{info, warn};
use omnichat_shared::protocol::CurrentUserRequest;
use omnichat_shared::{LoginRequest, Role, User};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::api::ApiClient;
use crate::error::AuthError;
use crate::web::{HttpTransport, KeyValueStore};

use persist::SessionPersistence;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        user: User,
        credential: String,
    },
}

impl Session {
    pub fn authenticated(user: User, credential: impl Into<String>) -> Self {
        Session::Authenticated {
            user,
            credential: credential.into(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            Session::Anonymous => None,
        }
    }

    pub fn credential(&self) -> Option<&str> {
        match self {
            Session::Authenticated { credential, .. } => Some(credential),
            Session::Anonymous => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }
}

type SessionListener = Rc<dyn Fn(&Session)>;

/// 登录 future 完成或被丢弃时清除进行中标记
struct InFlight<'a>(&'a Cell<bool>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct SessionStore<S: KeyValueStore> {
    state: RefCell<Session>,
    persistence: SessionPersistence<S>,
    login_in_flight: Cell<bool>,
    listeners: RefCell<Vec<SessionListener>>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// 空存储，不读取持久化数据
    #[cfg(test)]
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self::with_session(SessionPersistence::new(storage, key), Session::Anonymous)
    }

    /// 从持久化存储恢复，无效记录会被丢弃
    pub fn hydrate(storage: S, key: impl Into<String>) -> Self {
        let persistence = SessionPersistence::new(storage, key);
        let session = persistence.load();
        match session.user() {
            Some(user) => info!("restored session for {} ({})", user.email, user.role),
            None => info!("no stored session"),
        }
        Self::with_session(persistence, session)
    }

    fn with_session(persistence: SessionPersistence<S>, session: Session) -> Self {
        Self {
            state: RefCell::new(session),
            persistence,
            login_in_flight: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// 当前会话快照
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn credential(&self) -> Option<String> {
        self.state.borrow().credential().map(str::to_string)
    }

    /// 每次状态替换后以新会话调用
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn replace(&self, next: Session) {
        if *self.state.borrow() == next {
            return;
        }
        *self.state.borrow_mut() = next.clone();
        self.persistence.store(&next);

        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&next);
        }
    }

    /// 登录流程：
    /// 1. 用邮箱密码换取 token
    /// 2. 用该 token 获取用户资料
    ///
    /// 两步都成功后才发布会话
    pub async fn login<T: HttpTransport>(
        &self,
        api: &ApiClient<T>,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        if self.login_in_flight.replace(true) {
            warn!("login for {} ignored, another login is in flight", email);
            return Err(AuthError::InProgress);
        }
        let _in_flight = InFlight(&self.login_in_flight);

        info!("login attempt for {}", email);

        let token = api
            .call(&LoginRequest::new(email, password))
            .await
            .map_err(|e| {
                warn!("login rejected for {}: {}", email, e);
                AuthError::from(e)
            })?;

        let user = api
            .call_with_credential(&CurrentUserRequest, Some(&token.access_token))
            .await
            .map_err(|e| {
                warn!("profile fetch after login failed for {}: {}", email, e);
                AuthError::from(e)
            })?;

        info!("logged in as {} ({})", user.email, user.role);
        self.replace(Session::authenticated(user.clone(), token.access_token));
        Ok(user)
    }

    /// 清除会话及其持久化副本，不发起网络请求
    pub fn logout(&self) {
        if !self.is_authenticated() {
            self.persistence.clear();
            return;
        }
        info!("logging out");
        self.replace(Session::Anonymous);
    }
}

impl<S: KeyValueStore + 'static> SessionStore<S> {
    /// 把凭证提供给 `api`，任何 401 都会清除会话
    pub fn attach<T: HttpTransport>(store: &Rc<Self>, api: &ApiClient<T>) {
        let weak = Rc::downgrade(store);
        api.set_credential_source(move || weak.upgrade().and_then(|s| s.credential()));

        let weak = Rc::downgrade(store);
        api.on_unauthorized(move || {
            if let Some(store) = weak.upgrade() {
                store.logout();
            }
        });
    }
}
