//! 下单编排
//!
//! 读取组装 store 的快照，序列化为有序 id 列表并提交。
//! 同一时间最多只有一个提交在途；结果（成功确认或错误）只发布一次。

use super::composition::{Composition, CompositionAction};
use super::{Reducer, StateCell};
use crate::api::{BurgerApi, CredentialStore};
use crate::request::HttpClient;
use stellar_burger_shared::OrderConfirmation;

pub const DEFAULT_SUBMIT_ERROR: &str = "Failed to place the order";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmissionState {
    pub request_in_flight: bool,
    pub last_confirmation: Option<OrderConfirmation>,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionEvent {
    Started,
    Succeeded(OrderConfirmation),
    Failed(String),
    /// 用户关闭结果弹窗
    ClearConfirmation,
}

impl Reducer for SubmissionState {
    type Event = SubmissionEvent;

    fn reduce(&mut self, event: SubmissionEvent) {
        match event {
            SubmissionEvent::Started => {
                self.request_in_flight = true;
                self.last_confirmation = None;
                self.last_error = None;
            }
            SubmissionEvent::Succeeded(confirmation) => {
                self.request_in_flight = false;
                self.last_confirmation = Some(confirmation);
                self.last_error = None;
            }
            SubmissionEvent::Failed(message) => {
                self.request_in_flight = false;
                self.last_error = Some(message);
            }
            SubmissionEvent::ClearConfirmation => self.last_confirmation = None,
        }
    }
}

// =========================================================
// 前置条件与序列化
// =========================================================

/// 下单按钮的前置判断，由调用方在提交前执行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderGate {
    /// 未登录：应跳转到登录页
    NeedsLogin,
    /// 尚未选择底座
    Incomplete,
    /// 已有提交在途
    Busy,
    Ready,
}

pub fn order_gate(is_auth: bool, composition: &Composition, submission: &SubmissionState) -> OrderGate {
    if !is_auth {
        OrderGate::NeedsLogin
    } else if composition.base.is_none() {
        OrderGate::Incomplete
    } else if submission.request_in_flight {
        OrderGate::Busy
    } else {
        OrderGate::Ready
    }
}

/// 序列化为下单用的 id 列表：底座在首尾各出现一次，对应上下两片
pub fn serialize_order(composition: &Composition) -> Vec<String> {
    let base = composition.base.as_ref().map(|b| b.catalog_id());

    base.into_iter()
        .chain(composition.fillings.iter().map(|item| item.catalog_id()))
        .chain(base)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

// =========================================================
// 提交
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// 已有提交在途，本次调用被忽略
    Ignored,
    Confirmed(OrderConfirmation),
    Failed(String),
}

/// 提交当前组装
///
/// 成功时清空组装并保存确认信息；失败时只记录错误，组装保持不变以便重试。
pub async fn submit_order<C, K, B, S>(
    api: &BurgerApi<C, K>,
    composition: &B,
    submission: &S,
) -> SubmitOutcome
where
    C: HttpClient,
    K: CredentialStore,
    B: StateCell<Composition>,
    S: StateCell<SubmissionState>,
{
    if submission.with(|s| s.request_in_flight) {
        tracing::debug!("order submission already in flight, ignoring");
        return SubmitOutcome::Ignored;
    }

    let snapshot = composition.snapshot();
    let ingredients = serialize_order(&snapshot);
    submission.dispatch(SubmissionEvent::Started);
    tracing::info!(items = ingredients.len(), "submitting order");

    match api.order_burger(ingredients).await {
        Ok(confirmation) => {
            tracing::info!(number = confirmation.number, "order confirmed");
            composition.dispatch(CompositionAction::Reset);
            submission.dispatch(SubmissionEvent::Succeeded(confirmation.clone()));
            SubmitOutcome::Confirmed(confirmation)
        }
        Err(e) => {
            e.report("order submission");
            let message = e.message_or(DEFAULT_SUBMIT_ERROR);
            submission.dispatch(SubmissionEvent::Failed(message.clone()));
            SubmitOutcome::Failed(message)
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
    use proptest::prelude::*;
    use serde_json::json;
    use stellar_burger_shared::IngredientKind;
    use stellar_burger_shared::protocol::HttpMethod;

    fn sample_build() -> Composition {
        let mut c = Composition::default();
        c.add_part(part("B", IngredientKind::Bun, 100));
        c.add_part(part("F", IngredientKind::Main, 10));
        c.add_part(part("F", IngredientKind::Main, 10));
        c
    }

    #[test]
    fn base_brackets_the_fillings() {
        let mut c = sample_build();
        c.add_part(part("S", IngredientKind::Sauce, 1));
        assert_eq!(serialize_order(&c), vec!["B", "F", "F", "S", "B"]);
    }

    #[test]
    fn empty_ids_are_filtered() {
        let mut c = Composition::default();
        c.add_part(part("", IngredientKind::Bun, 1));
        c.add_part(part("F", IngredientKind::Main, 1));
        assert_eq!(serialize_order(&c), vec!["F"]);
    }

    #[test]
    fn gate_checks_auth_before_base() {
        let empty = Composition::default();
        let idle = SubmissionState::default();
        let busy = SubmissionState {
            request_in_flight: true,
            ..Default::default()
        };

        assert_eq!(order_gate(false, &sample_build(), &idle), OrderGate::NeedsLogin);
        assert_eq!(order_gate(true, &empty, &idle), OrderGate::Incomplete);
        assert_eq!(order_gate(true, &sample_build(), &busy), OrderGate::Busy);
        assert_eq!(order_gate(true, &sample_build(), &idle), OrderGate::Ready);
    }

    #[tokio::test]
    async fn successful_submission_resets_the_build() {
        let api = api_with(MemoryCredentials::with_tokens("Bearer a", "r"));
        api.client().mock_response(
            HttpMethod::Post,
            &url("/orders"),
            200,
            json!({ "success": true, "name": "Crater burger", "order": { "number": 4321 } }),
        );
        let composition = LocalCell::new(sample_build());
        let submission = LocalCell::new(SubmissionState::default());
        assert_eq!(composition.with(Composition::total_price), 220);

        let outcome = submit_order(&api, &composition, &submission).await;

        assert!(matches!(outcome, SubmitOutcome::Confirmed(ref c) if c.number == 4321));
        assert_eq!(composition.snapshot(), Composition::default());
        let state = submission.snapshot();
        assert!(!state.request_in_flight);
        assert_eq!(state.last_confirmation.as_ref().map(|c| c.number), Some(4321));

        let sent = api.client().requests_to(HttpMethod::Post, &url("/orders"));
        let body: serde_json::Value = serde_json::from_str(sent[0].body.as_ref().unwrap()).unwrap();
        assert_eq!(body, json!({ "ingredients": ["B", "F", "F", "B"] }));
    }

    #[tokio::test]
    async fn failed_submission_keeps_the_build() {
        let api = api_with(MemoryCredentials::with_tokens("Bearer a", "r"));
        api.client().mock_response(
            HttpMethod::Post,
            &url("/orders"),
            500,
            json!({ "success": false }),
        );
        let composition = LocalCell::new(sample_build());
        let before = composition.snapshot();
        let submission = LocalCell::new(SubmissionState::default());

        let outcome = submit_order(&api, &composition, &submission).await;

        assert_eq!(outcome, SubmitOutcome::Failed(DEFAULT_SUBMIT_ERROR.to_string()));
        assert_eq!(composition.snapshot(), before);
        let state = submission.snapshot();
        assert!(!state.request_in_flight);
        assert_eq!(state.last_error.as_deref(), Some(DEFAULT_SUBMIT_ERROR));
        assert!(state.last_confirmation.is_none());
    }

    #[tokio::test]
    async fn second_submission_is_ignored_while_in_flight() {
        let api = api_with(MemoryCredentials::with_tokens("Bearer a", "r"));
        let composition = LocalCell::new(sample_build());
        let submission = LocalCell::new(SubmissionState::default());
        submission.dispatch(SubmissionEvent::Started);

        let outcome = submit_order(&api, &composition, &submission).await;

        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert!(api.client().requests.borrow().is_empty());
        assert!(submission.with(|s| s.request_in_flight));
    }

    #[test]
    fn dismissing_confirmation_leaves_other_fields() {
        let mut state = SubmissionState::default();
        state.reduce(SubmissionEvent::Started);
        state.reduce(SubmissionEvent::Succeeded(OrderConfirmation {
            number: 1,
            name: "n".into(),
        }));
        state.reduce(SubmissionEvent::ClearConfirmation);

        assert_eq!(state, SubmissionState::default());
    }

    fn build_from(kinds: &[IngredientKind]) -> Composition {
        let mut c = Composition::default();
        for (i, kind) in kinds.iter().enumerate() {
            c.add_part(part(&format!("p{}", i), *kind, i as u32));
        }
        c
    }

    /// 用给定状态码应答下单请求，返回提交后的组装
    fn submit_with_status(build: Composition, status: u16) -> (SubmitOutcome, Composition) {
        let api = api_with(MemoryCredentials::with_tokens("Bearer a", "r"));
        let body = if status == 200 {
            json!({ "success": true, "name": "Any", "order": { "number": 7 } })
        } else {
            json!({ "success": false })
        };
        api.client().mock_response(HttpMethod::Post, &url("/orders"), status, body);
        let composition = LocalCell::new(build);
        let submission = LocalCell::new(SubmissionState::default());

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let outcome = runtime.block_on(submit_order(&api, &composition, &submission));
        (outcome, composition.snapshot())
    }

    fn kind_strategy() -> impl Strategy<Value = IngredientKind> {
        prop_oneof![
            Just(IngredientKind::Bun),
            Just(IngredientKind::Main),
            Just(IngredientKind::Sauce),
        ]
    }

    proptest! {
        #[test]
        fn confirmed_order_always_empties_the_build(kinds in prop::collection::vec(kind_strategy(), 0..16)) {
            let (outcome, after) = submit_with_status(build_from(&kinds), 200);
            prop_assert!(matches!(outcome, SubmitOutcome::Confirmed(_)));
            prop_assert_eq!(after, Composition::default());
        }

        #[test]
        fn rejected_order_never_touches_the_build(kinds in prop::collection::vec(kind_strategy(), 0..16)) {
            let before = build_from(&kinds);
            let (outcome, after) = submit_with_status(before.clone(), 500);
            prop_assert!(matches!(outcome, SubmitOutcome::Failed(_)));
            prop_assert_eq!(after, before);
        }
    }
}
