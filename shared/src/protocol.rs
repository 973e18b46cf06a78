use crate::{Ingredient, Order, OrderConfirmation, TokenPair, User};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::borrow::Cow;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the access token must be attached.
    const AUTHORIZED: bool = false;

    /// Concrete path for this request; endpoints with path parameters override it.
    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(Self::PATH)
    }
}

// =========================================================
// Response Envelopes
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientsResponse {
    pub data: Vec<Ingredient>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub orders: Vec<Order>,
    pub total: u64,
    pub total_today: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedOrder {
    pub number: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub name: String,
    pub order: CreatedOrder,
}

impl From<CreateOrderResponse> for OrderConfirmation {
    fn from(resp: CreateOrderResponse) -> Self {
        Self {
            number: resp.order.number,
            name: resp.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

impl AuthResponse {
    pub fn tokens(&self) -> TokenPair {
        TokenPair {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// =========================================================
// Request Definitions
// =========================================================

/// Load the ingredient catalog
#[derive(Debug, Serialize, Deserialize)]
pub struct IngredientsRequest;

impl ApiRequest for IngredientsRequest {
    type Response = IngredientsResponse;
    const PATH: &'static str = "/ingredients";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Public order feed
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedRequest;

impl ApiRequest for FeedRequest {
    type Response = FeedResponse;
    const PATH: &'static str = "/orders/all";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Orders of the signed-in user
#[derive(Debug, Serialize, Deserialize)]
pub struct UserOrdersRequest;

impl ApiRequest for UserOrdersRequest {
    type Response = OrdersResponse;
    const PATH: &'static str = "/orders";
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHORIZED: bool = true;
}

/// A single order looked up by its public number
#[derive(Debug, Serialize, Deserialize)]
pub struct OrderByNumberRequest {
    #[serde(skip)]
    pub number: u64,
}

impl ApiRequest for OrderByNumberRequest {
    type Response = OrdersResponse;
    const PATH: &'static str = "/orders";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("{}/{}", Self::PATH, self.number))
    }
}

/// Create an order from an ordered list of ingredient ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub ingredients: Vec<String>,
}

impl ApiRequest for CreateOrderRequest {
    type Response = CreateOrderResponse;
    const PATH: &'static str = "/orders";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHORIZED: bool = true;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl ApiRequest for RegisterRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/auth/register";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Body shared by logout and token refresh: both carry the refresh token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub token: String,
}

impl ApiRequest for LogoutRequest {
    type Response = MessageResponse;
    const PATH: &'static str = "/auth/logout";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub token: String,
}

impl ApiRequest for RefreshTokenRequest {
    type Response = TokenPair;
    const PATH: &'static str = "/auth/token";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl ApiRequest for ForgotPasswordRequest {
    type Response = MessageResponse;
    const PATH: &'static str = "/password-reset";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
    pub token: String,
}

impl ApiRequest for ResetPasswordRequest {
    type Response = MessageResponse;
    const PATH: &'static str = "/password-reset/reset";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Identity of the current session
#[derive(Debug, Serialize, Deserialize)]
pub struct UserRequest;

impl ApiRequest for UserRequest {
    type Response = UserResponse;
    const PATH: &'static str = "/auth/user";
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHORIZED: bool = true;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ApiRequest for UpdateUserRequest {
    type Response = UserResponse;
    const PATH: &'static str = "/auth/user";
    const METHOD: HttpMethod = HttpMethod::Patch;
    const AUTHORIZED: bool = true;
}
