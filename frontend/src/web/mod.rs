//! 浏览器 API 封装模块
//!
//! 所有涉及 `fetch` 与 `localStorage` 的操作都通过 trait 隔离，
//! 会话与网关逻辑因此可以在原生测试中运行。

pub mod guard;
mod http;
pub mod route;
pub mod router;
mod storage;

pub use http::{FetchTransport, HttpRequest, HttpTransport};
pub use storage::{BrowserStorage, CorruptEntry, KeyValueStore};

#[cfg(test)]
pub use http::MockTransport;
#[cfg(test)]
pub use storage::MemoryStorage;
