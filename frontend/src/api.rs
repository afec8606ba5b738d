//! OmniChat 后端网关客户端
//!
//! 每个请求都带上当前的 bearer 凭证。收到任何 401 时，先触发
//! "未授权" 事件，再把错误交还给调用方。
//! 会话存储订阅该事件，因此本模块不依赖会话存储。

use log::{debug, warn};
use omnichat_shared::protocol::ApiRequest;
use omnichat_shared::{AUTH_SCHEME, HEADER_AUTHORIZATION};
use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ApiError;
use crate::web::{HttpRequest, HttpTransport};

type CredentialSource = Box<dyn Fn() -> Option<String>>;
type UnauthorizedListener = Rc<dyn Fn()>;

pub struct ApiClient<T: HttpTransport> {
    base_url: String,
    transport: T,
    credential: RefCell<Option<CredentialSource>>,
    unauthorized: RefCell<Vec<UnauthorizedListener>>,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            credential: RefCell::new(None),
            unauthorized: RefCell::new(Vec::new()),
        }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 设置 `call` 读取凭证的来源
    pub fn set_credential_source(&self, source: impl Fn() -> Option<String> + 'static) {
        *self.credential.borrow_mut() = Some(Box::new(source));
    }

    /// 注册 401 回调，每次 401 都会同步触发
    pub fn on_unauthorized(&self, listener: impl Fn() + 'static) {
        self.unauthorized.borrow_mut().push(Rc::new(listener));
    }

    fn current_credential(&self) -> Option<String> {
        self.credential.borrow().as_ref().and_then(|source| source())
    }

    fn notify_unauthorized(&self) {
        let listeners = self.unauthorized.borrow().clone();
        for listener in listeners {
            listener();
        }
    }

    /// 使用当前凭证 (如果有) 发送请求
    pub async fn call<R: ApiRequest>(&self, req: &R) -> Result<R::Response, ApiError> {
        let credential = self.current_credential();
        self.call_with_credential(req, credential.as_deref()).await
    }

    /// 使用指定凭证发送请求，忽略当前凭证
    pub async fn call_with_credential<R: ApiRequest>(
        &self,
        req: &R,
        credential: Option<&str>,
    ) -> Result<R::Response, ApiError> {
        let path = req.path();
        let mut http = HttpRequest::new(&self.url(&path), R::METHOD);

        if let Some(token) = credential {
            http = http.with_header(HEADER_AUTHORIZATION, &format!("{} {}", AUTH_SCHEME, token));
        }

        if R::METHOD.has_body() {
            let body =
                serde_json::to_string(req).map_err(|e| ApiError::RequestBuild(e.to_string()))?;
            http = http
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        debug!("{} {}", R::METHOD.as_str(), path);

        let resp = self.transport.send(http).await.inspect_err(|e| {
            warn!("{} {} failed: {}", R::METHOD.as_str(), path, e);
        })?;

        if !resp.ok() {
            let err = ApiError::from_status(resp.status, &resp.body);
            if err.is_unauthorized() {
                warn!("{} {} returned 401, dropping session", R::METHOD.as_str(), path);
                self.notify_unauthorized();
            }
            return Err(err);
        }

        serde_json::from_str(&resp.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
