//! 认证上下文
//!
//! 会话存储本身不依赖框架。这里把它的状态同步到一个 Signal，
//! 登录、登出、401 过期都会让视图和路由出口重新渲染。

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use omnichat_shared::User;
use std::rc::Rc;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::error::AuthError;
use crate::session::{Session, SessionStore};
use crate::web::{BrowserStorage, FetchTransport};

pub type Gateway = ApiClient<FetchTransport>;

#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 当前会话 (只读)，每次变化整体替换
    pub session: ReadSignal<Session>,
    store: StoredValue<Rc<SessionStore<BrowserStorage>>, LocalStorage>,
    api: StoredValue<Rc<Gateway>, LocalStorage>,
}

impl AuthContext {
    /// 恢复会话、连接网关并同步到 Signal
    pub fn new(config: &AppConfig) -> Self {
        // 1. 恢复会话
        let store = Rc::new(SessionStore::hydrate(BrowserStorage, config.storage_key.clone()));
        // 2. 创建网关并与会话联动
        let api = Rc::new(ApiClient::new(&config.api_base_url, FetchTransport));
        SessionStore::attach(&store, &api);

        // 3. 同步到 Signal
        let (session, set_session) = signal(store.current());
        store.subscribe(move |next| set_session.set(next.clone()));

        Self {
            session,
            store: StoredValue::new_local(store),
            api: StoredValue::new_local(api),
        }
    }

    pub fn api(&self) -> Rc<Gateway> {
        self.api.get_value()
    }

    pub async fn login(&self, email: String, password: String) -> Result<User, AuthError> {
        let store = self.store.get_value();
        let api = self.api.get_value();
        store.login(&api, &email, &password).await
    }

    /// 登出后由路由守卫跳回登录页
    pub fn logout(&self) {
        self.store.with_value(|store| store.logout());
    }
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
