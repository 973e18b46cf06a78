//! 浏览器 API 封装：HTTP、凭据存储与 History 路由

mod http;
pub mod router;
mod storage;

pub use http::GlooHttpClient;
pub use storage::BrowserCredentials;
