//! Stellar Burger 客户端核心
//!
//! 与运行环境无关的部分：服务端 API 网关、各个 store 的 reducer 与异步编排、
//! 路由守卫与弹窗叠加规则。浏览器相关的实现（HTTP、存储、History）由前端 crate 注入。

pub mod api;
pub mod config;
pub mod error;
pub mod request;
pub mod routing;
pub mod store;

pub use api::{BurgerApi, CredentialStore};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorKind};
pub use request::{HttpClient, HttpRequest, HttpResponse};
