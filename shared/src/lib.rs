use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json;charset=utf-8";

/// 服务端在访问令牌过期时返回的错误消息
pub const TOKEN_EXPIRED_MESSAGE: &str = "jwt expired";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 配料种类
///
/// `Bun` 是成对使用的底座（上下各一片），其余都是按顺序叠放的夹层。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientKind {
    Bun,
    Main,
    Sauce,
}

impl IngredientKind {
    pub fn is_base(&self) -> bool {
        matches!(self, IngredientKind::Bun)
    }

    pub fn label(&self) -> &'static str {
        match self {
            IngredientKind::Bun => "Buns",
            IngredientKind::Main => "Mains",
            IngredientKind::Sauce => "Sauces",
        }
    }
}

/// 目录中的配料（服务端分配 `_id`，加载后不可变）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: IngredientKind,
    pub proteins: u32,
    pub fat: u32,
    pub carbohydrates: u32,
    pub calories: u32,
    pub price: u32,
    pub image: String,
    pub image_large: String,
    pub image_mobile: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Created,
    Pending,
    Done,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Created => "Created",
            OrderStatus::Pending => "Cooking",
            OrderStatus::Done => "Done",
            OrderStatus::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub status: OrderStatus,
    pub name: String,
    pub number: u64,
    /// 配料 id 列表，顺序即下单时的叠放顺序（底座在两端）
    pub ingredients: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
}

/// 下单成功后服务端返回的确认信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub number: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// 带 `Bearer ` 前缀的短期访问令牌
    pub access_token: String,
    pub refresh_token: String,
}
