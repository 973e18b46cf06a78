// =========================================================
// 运行时配置 (Runtime Configuration)
// =========================================================

/// 这些是默认值，如果构建时没有设置对应的环境变量，则使用这些值
const DEFAULT_API_URL: &str = "https://norma.nomoreparties.space/api";
const DEFAULT_ACCESS_COOKIE: &str = "accessToken";
const DEFAULT_REFRESH_KEY: &str = "refreshToken";
const DEFAULT_RESET_FLAG_KEY: &str = "resetPassword";
/// 服务端签发的访问令牌有效期为 20 分钟
const DEFAULT_ACCESS_TTL_SECS: u32 = 20 * 60;

/// API 与凭据存储配置
///
/// 浏览器里没有进程环境变量，因此覆盖值在编译期通过 `option_env!` 注入。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// API 根地址（不带结尾的 `/`）
    pub base_url: String,
    /// 保存访问令牌的 cookie 名
    pub access_cookie: String,
    /// 访问令牌 cookie 的 max-age（秒），与刷新令牌的生命周期相互独立
    pub access_ttl_secs: u32,
    /// LocalStorage 中保存刷新令牌的键
    pub refresh_key: String,
    /// LocalStorage 中标记"已申请重置密码"的键
    pub reset_flag_key: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            access_cookie: DEFAULT_ACCESS_COOKIE.to_string(),
            access_ttl_secs: DEFAULT_ACCESS_TTL_SECS,
            refresh_key: DEFAULT_REFRESH_KEY.to_string(),
            reset_flag_key: DEFAULT_RESET_FLAG_KEY.to_string(),
        }
    }

    /// 读取构建时环境变量，读不到就用默认值
    pub fn from_env() -> Self {
        let mut config = Self::new(option_env!("BURGER_API_URL").unwrap_or(DEFAULT_API_URL));

        if let Some(name) = option_env!("BURGER_ACCESS_COOKIE") {
            config.access_cookie = name.to_string();
        }
        if let Some(key) = option_env!("BURGER_REFRESH_KEY") {
            config.refresh_key = key.to_string();
        }
        if let Some(ttl) = option_env!("BURGER_ACCESS_TTL_SECS").and_then(|v| v.parse().ok()) {
            config.access_ttl_secs = ttl;
        }
        config
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
