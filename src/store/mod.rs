//! 状态容器
//!
//! 每个 store 都是一个普通值，只能通过自己的 reducer 修改：
//! `reduce(&mut state, event)` 是 (旧状态, 事件) 的纯函数。
//! 异步编排（网络请求）读取快照、派发事件，从不直接写字段。
//!
//! store 存放在实现了 [`StateCell`] 的容器中，由调用方显式注入：
//! 原生环境与测试使用 [`LocalCell`]，前端使用基于信号的实现。

pub mod catalog;
pub mod composition;
pub mod feed;
pub mod orders;
pub mod session;
pub mod submission;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

// =========================================================
// Reducer & StateCell
// =========================================================

/// 由封闭的事件枚举驱动的状态
pub trait Reducer {
    type Event;

    fn reduce(&mut self, event: Self::Event);
}

/// 持有一个 store 的可共享容器
pub trait StateCell<S> {
    /// 只读访问当前状态
    fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R;

    /// 原地更新状态
    fn update(&self, f: impl FnOnce(&mut S));

    /// 值拷贝快照，之后的修改对快照不可见
    fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.with(S::clone)
    }

    /// 通过 reducer 应用一个事件
    fn dispatch(&self, event: S::Event)
    where
        S: Reducer,
    {
        self.update(move |state| state.reduce(event));
    }
}

/// 单线程共享容器
#[derive(Debug, Default)]
pub struct LocalCell<S>(Rc<RefCell<S>>);

impl<S> LocalCell<S> {
    pub fn new(state: S) -> Self {
        Self(Rc::new(RefCell::new(state)))
    }
}

impl<S> Clone for LocalCell<S> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<S> StateCell<S> for LocalCell<S> {
    fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&*self.0.borrow())
    }

    fn update(&self, f: impl FnOnce(&mut S)) {
        f(&mut *self.0.borrow_mut());
    }
}

// =========================================================
// 请求令牌
// =========================================================

/// 异步操作的启动令牌，单调递增
///
/// store 只接受最近一次启动的同类操作的结果，较早请求的迟到结果被丢弃。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

impl RequestId {
    pub fn next() -> Self {
        Self(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

// =========================================================
// Remote<T>: 单一网络读取的通用状态
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum RemoteEvent<T> {
    Pending(RequestId),
    Loaded(RequestId, T),
    Failed(RequestId, String),
}

/// 一次网络读取的结果及其加载/错误标志
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Remote<T> {
    pub data: T,
    pub is_loading: bool,
    pub error: Option<String>,
    latest: Option<RequestId>,
}

impl<T> Remote<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            is_loading: false,
            error: None,
            latest: None,
        }
    }

    fn is_current(&self, id: RequestId) -> bool {
        self.latest == Some(id)
    }
}

impl<T> Reducer for Remote<T> {
    type Event = RemoteEvent<T>;

    fn reduce(&mut self, event: RemoteEvent<T>) {
        match event {
            RemoteEvent::Pending(id) => {
                self.latest = Some(id);
                self.is_loading = true;
                self.error = None;
            }
            RemoteEvent::Loaded(id, data) if self.is_current(id) => {
                self.data = data;
                self.is_loading = false;
                self.error = None;
            }
            RemoteEvent::Failed(id, message) if self.is_current(id) => {
                self.is_loading = false;
                self.error = Some(message);
            }
            RemoteEvent::Loaded(id, _) | RemoteEvent::Failed(id, _) => {
                tracing::debug!(request = ?id, "discarding stale resolution");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_increase() {
        let a = RequestId::next();
        let b = RequestId::next();
        assert!(b > a);
    }

    #[test]
    fn remote_keeps_data_on_failure() {
        let mut remote = Remote::new(vec![1, 2]);
        let id = RequestId::next();
        remote.reduce(RemoteEvent::Pending(id));
        assert!(remote.is_loading);

        remote.reduce(RemoteEvent::Failed(id, "offline".into()));
        assert!(!remote.is_loading);
        assert_eq!(remote.error.as_deref(), Some("offline"));
        assert_eq!(remote.data, vec![1, 2]);
    }

    #[test]
    fn remote_discards_superseded_resolution() {
        let mut remote = Remote::new(Vec::<u32>::new());
        let first = RequestId::next();
        let second = RequestId::next();
        remote.reduce(RemoteEvent::Pending(first));
        remote.reduce(RemoteEvent::Pending(second));

        remote.reduce(RemoteEvent::Loaded(second, vec![2]));
        remote.reduce(RemoteEvent::Loaded(first, vec![1]));

        assert_eq!(remote.data, vec![2]);
        assert!(!remote.is_loading);
    }

    #[test]
    fn local_cell_snapshot_is_a_copy() {
        let cell = LocalCell::new(vec![1]);
        let snapshot = cell.snapshot();
        cell.update(|v| v.push(2));
        assert_eq!(snapshot, vec![1]);
        assert_eq!(cell.with(|v| v.len()), 2);
    }
}
