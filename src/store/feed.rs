//! 公共订单流

use super::{Remote, RemoteEvent, RequestId, StateCell};
use crate::api::{BurgerApi, CredentialStore};
use crate::request::HttpClient;
use stellar_burger_shared::protocol::FeedResponse;
use stellar_burger_shared::{Order, OrderStatus};

pub const DEFAULT_FEED_ERROR: &str = "Failed to load the order feed";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedSnapshot {
    pub orders: Vec<Order>,
    pub total: u64,
    pub total_today: u64,
}

impl From<FeedResponse> for FeedSnapshot {
    fn from(resp: FeedResponse) -> Self {
        Self {
            orders: resp.orders,
            total: resp.total,
            total_today: resp.total_today,
        }
    }
}

pub type FeedState = Remote<FeedSnapshot>;

impl Remote<FeedSnapshot> {
    pub fn total(&self) -> u64 {
        self.data.total
    }

    pub fn total_today(&self) -> u64 {
        self.data.total_today
    }

    pub fn find(&self, number: u64) -> Option<&Order> {
        self.data.orders.iter().find(|o| o.number == number)
    }

    /// 已完成订单的编号，保持服务端顺序
    pub fn ready_numbers(&self, limit: usize) -> Vec<u64> {
        self.numbers_with(OrderStatus::Done, limit)
    }

    pub fn pending_numbers(&self, limit: usize) -> Vec<u64> {
        self.numbers_with(OrderStatus::Pending, limit)
    }

    fn numbers_with(&self, status: OrderStatus, limit: usize) -> Vec<u64> {
        self.data
            .orders
            .iter()
            .filter(|o| o.status == status)
            .map(|o| o.number)
            .take(limit)
            .collect()
    }
}

pub async fn fetch_feed<C, K, S>(api: &BurgerApi<C, K>, feed: &S)
where
    C: HttpClient,
    K: CredentialStore,
    S: StateCell<FeedState>,
{
    let request = RequestId::next();
    feed.dispatch(RemoteEvent::Pending(request));

    match api.get_feed().await {
        Ok(resp) => {
            tracing::debug!(orders = resp.orders.len(), total = resp.total, "feed loaded");
            feed.dispatch(RemoteEvent::Loaded(request, resp.into()));
        }
        Err(e) => {
            e.report("feed fetch");
            feed.dispatch(RemoteEvent::Failed(request, e.message_or(DEFAULT_FEED_ERROR)));
        }
    }
}
