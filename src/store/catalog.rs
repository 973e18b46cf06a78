//! 配料目录：启动时加载一次，之后只读

use super::{Remote, RemoteEvent, RequestId, StateCell};
use crate::api::{BurgerApi, CredentialStore};
use crate::request::HttpClient;
use stellar_burger_shared::{Ingredient, IngredientKind, Order};

pub const DEFAULT_CATALOG_ERROR: &str = "Failed to load ingredients";

pub type CatalogState = Remote<Vec<Ingredient>>;

/// 订单中的一种配料及其份数
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub part: Ingredient,
    pub count: usize,
}

/// 按目录解析后的订单内容
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderSummary {
    /// 按首次出现的顺序去重
    pub lines: Vec<OrderLine>,
    pub total_price: u32,
    /// 目录中找不到的 id 数量
    pub unknown: usize,
}

impl Remote<Vec<Ingredient>> {
    pub fn find(&self, id: &str) -> Option<&Ingredient> {
        self.data.iter().find(|part| part.id == id)
    }

    pub fn by_kind(&self, kind: IngredientKind) -> impl Iterator<Item = &Ingredient> {
        self.data.iter().filter(move |part| part.kind == kind)
    }

    /// 把订单中的 id 列表换算成配料明细与总价（每个 id 按一份计价）
    pub fn summarize(&self, order: &Order) -> OrderSummary {
        let mut summary = OrderSummary::default();

        for id in &order.ingredients {
            let Some(part) = self.find(id) else {
                summary.unknown += 1;
                continue;
            };
            summary.total_price += part.price;
            match summary.lines.iter_mut().find(|line| line.part.id == *id) {
                Some(line) => line.count += 1,
                None => summary.lines.push(OrderLine {
                    part: part.clone(),
                    count: 1,
                }),
            }
        }
        summary
    }
}

pub async fn fetch_catalog<C, K, S>(api: &BurgerApi<C, K>, catalog: &S)
where
    C: HttpClient,
    K: CredentialStore,
    S: StateCell<CatalogState>,
{
    let request = RequestId::next();
    catalog.dispatch(RemoteEvent::Pending(request));

    match api.get_ingredients().await {
        Ok(parts) => {
            tracing::info!(count = parts.len(), "catalog loaded");
            catalog.dispatch(RemoteEvent::Loaded(request, parts));
        }
        Err(e) => {
            e.report("catalog fetch");
            catalog.dispatch(RemoteEvent::Failed(request, e.message_or(DEFAULT_CATALOG_ERROR)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryCredentials;
    use crate::api::tests::{api_with, url};
    use crate::store::LocalCell;
    use crate::store::composition::tests::part;
    use chrono::Utc;
    use serde_json::json;
    use stellar_burger_shared::OrderStatus;
    use stellar_burger_shared::protocol::HttpMethod;

    fn catalog() -> CatalogState {
        Remote::new(vec![
            part("bun", IngredientKind::Bun, 100),
            part("meat", IngredientKind::Main, 30),
            part("sauce", IngredientKind::Sauce, 5),
        ])
    }

    fn order(ids: &[&str]) -> Order {
        Order {
            id: "o1".into(),
            status: OrderStatus::Done,
            name: "Test burger".into(),
            number: 1,
            ingredients: ids.iter().map(|s| s.to_string()).collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn lookups() {
        let c = catalog();
        assert_eq!(c.find("meat").map(|p| p.price), Some(30));
        assert!(c.find("nope").is_none());
        assert_eq!(c.by_kind(IngredientKind::Sauce).count(), 1);
    }

    #[test]
    fn summary_counts_repeats_and_skips_unknown() {
        let c = catalog();
        let summary = c.summarize(&order(&["bun", "meat", "meat", "ghost", "bun"]));

        let counts: Vec<_> = summary
            .lines
            .iter()
            .map(|l| (l.part.id.as_str(), l.count))
            .collect();
        assert_eq!(counts, vec![("bun", 2), ("meat", 2)]);
        assert_eq!(summary.total_price, 260);
        assert_eq!(summary.unknown, 1);
    }

    #[tokio::test]
    async fn fetch_fills_the_catalog() {
        let api = api_with(MemoryCredentials::default());
        api.client().mock_response(
            HttpMethod::Get,
            &url("/ingredients"),
            200,
            json!({ "success": true, "data": [{
                "_id": "b1", "name": "Fluorescent bun", "type": "bun",
                "proteins": 44, "fat": 26, "carbohydrates": 85, "calories": 643,
                "price": 988, "image": "i", "image_large": "l", "image_mobile": "m"
            }] }),
        );
        let state = LocalCell::new(CatalogState::default());

        fetch_catalog(&api, &state).await;

        let loaded = state.snapshot();
        assert!(!loaded.is_loading);
        assert_eq!(loaded.find("b1").map(|p| p.price), Some(988));
    }

    #[tokio::test]
    async fn fetch_failure_uses_default_message() {
        let api = api_with(MemoryCredentials::default());
        let state = LocalCell::new(CatalogState::default());

        api.client().mock_raw(HttpMethod::Get, &url("/ingredients"), 500, "");
        fetch_catalog(&api, &state).await;

        assert_eq!(state.with(|s| s.error.clone()).as_deref(), Some(DEFAULT_CATALOG_ERROR));
        assert!(state.with(|s| s.data.is_empty()));
    }
}
