//! 浏览器凭据存储
//!
//! 访问令牌写入 cookie（独立的过期时间），刷新令牌与"已申请重置密码"标记写入 LocalStorage。

use gloo_storage::{LocalStorage, Storage};
use stellar_burger::ApiConfig;
use stellar_burger::CredentialStore;
use stellar_burger_shared::TokenPair;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

#[derive(Debug, Clone)]
pub struct BrowserCredentials {
    config: ApiConfig,
}

impl BrowserCredentials {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }
}

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
}

fn get_cookie(name: &str) -> Option<String> {
    let cookies = html_document()?.cookie().ok()?;
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key != name {
            return None;
        }
        js_sys::decode_uri_component(value)
            .ok()
            .and_then(|v| v.as_string())
    })
}

/// 写入 cookie；`max_age` 为负数时删除
fn set_cookie(name: &str, value: &str, max_age: i64) {
    let Some(document) = html_document() else {
        tracing::warn!("document unavailable, cookie not written");
        return;
    };
    let encoded: String = js_sys::encode_uri_component(value).into();
    let cookie = format!("{}={}; path=/; max-age={}", name, encoded, max_age);
    if let Err(e) = document.set_cookie(&cookie) {
        tracing::warn!(error = ?e, cookie = name, "failed to write cookie");
    }
}

impl CredentialStore for BrowserCredentials {
    fn access_token(&self) -> Option<String> {
        get_cookie(&self.config.access_cookie)
    }

    fn refresh_token(&self) -> Option<String> {
        LocalStorage::get(&self.config.refresh_key).ok()
    }

    fn store_tokens(&self, tokens: &TokenPair) {
        set_cookie(
            &self.config.access_cookie,
            &tokens.access_token,
            i64::from(self.config.access_ttl_secs),
        );
        if let Err(e) = LocalStorage::set(&self.config.refresh_key, &tokens.refresh_token) {
            tracing::warn!(error = %e, "failed to persist refresh token");
        }
    }

    fn clear_tokens(&self) {
        set_cookie(&self.config.access_cookie, "", -1);
        LocalStorage::delete(&self.config.refresh_key);
    }

    fn set_reset_requested(&self, requested: bool) {
        if requested {
            if let Err(e) = LocalStorage::set(&self.config.reset_flag_key, true) {
                tracing::warn!(error = %e, "failed to persist reset flag");
            }
        } else {
            LocalStorage::delete(&self.config.reset_flag_key);
        }
    }

    fn reset_requested(&self) -> bool {
        LocalStorage::get::<bool>(&self.config.reset_flag_key).unwrap_or(false)
    }
}
