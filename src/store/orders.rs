//! 当前用户的订单历史，以及按编号单独查询的订单

use super::{Reducer, Remote, RemoteEvent, RequestId, StateCell};
use crate::api::{BurgerApi, CredentialStore};
use crate::request::HttpClient;
use stellar_burger_shared::Order;

pub const DEFAULT_HISTORY_ERROR: &str = "Failed to load orders";
pub const DEFAULT_ORDER_ERROR: &str = "Failed to load the order";

#[derive(Debug, Clone, PartialEq)]
pub enum OrdersEvent {
    History(RemoteEvent<Vec<Order>>),
    Selected(RemoteEvent<Option<Order>>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrdersState {
    pub history: Remote<Vec<Order>>,
    /// 按编号查询的结果；服务端没有该订单时为 `None`
    pub selected: Remote<Option<Order>>,
}

impl Reducer for OrdersState {
    type Event = OrdersEvent;

    fn reduce(&mut self, event: OrdersEvent) {
        match event {
            OrdersEvent::History(e) => self.history.reduce(e),
            OrdersEvent::Selected(e) => self.selected.reduce(e),
        }
    }
}

impl OrdersState {
    /// 先查历史，再查单独加载的订单
    pub fn find(&self, number: u64) -> Option<&Order> {
        self.history
            .data
            .iter()
            .find(|o| o.number == number)
            .or_else(|| self.selected.data.as_ref().filter(|o| o.number == number))
    }
}

pub async fn fetch_history<C, K, S>(api: &BurgerApi<C, K>, orders: &S)
where
    C: HttpClient,
    K: CredentialStore,
    S: StateCell<OrdersState>,
{
    let request = RequestId::next();
    orders.dispatch(OrdersEvent::History(RemoteEvent::Pending(request)));

    let event = match api.get_user_orders().await {
        Ok(list) => RemoteEvent::Loaded(request, list),
        Err(e) => {
            e.report("order history fetch");
            RemoteEvent::Failed(request, e.message_or(DEFAULT_HISTORY_ERROR))
        }
    };
    orders.dispatch(OrdersEvent::History(event));
}

pub async fn fetch_order<C, K, S>(api: &BurgerApi<C, K>, orders: &S, number: u64)
where
    C: HttpClient,
    K: CredentialStore,
    S: StateCell<OrdersState>,
{
    let request = RequestId::next();
    orders.dispatch(OrdersEvent::Selected(RemoteEvent::Pending(request)));

    let event = match api.get_order_by_number(number).await {
        Ok(order) => {
            if order.is_none() {
                tracing::info!(number, "order not found");
            }
            RemoteEvent::Loaded(request, order)
        }
        Err(e) => {
            e.report("order fetch");
            RemoteEvent::Failed(request, e.message_or(DEFAULT_ORDER_ERROR))
        }
    };
    orders.dispatch(OrdersEvent::Selected(event));
}
