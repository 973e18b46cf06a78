//! HTTP 客户端实现
//!
//! 基于 `gloo-net` 的 fetch 封装，实现核心中的 [`HttpClient`] 抽象。

use gloo_net::http::{Method, RequestBuilder};
use stellar_burger::error::{ApiError, ApiResult};
use stellar_burger::request::{HttpClient, HttpRequest, HttpResponse};
use stellar_burger_shared::protocol::HttpMethod;

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooHttpClient;

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Patch => Method::PATCH,
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for GlooHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = RequestBuilder::new(&req.url).method(method(req.method));
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let resp = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
