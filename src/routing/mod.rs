//! 路由：位置、路由表、访问守卫与弹窗叠加
//!
//! 这里只有纯函数，浏览器 History API 的读写在前端完成。

pub mod guard;
pub mod location;
pub mod overlay;
pub mod route;

pub use guard::{GuardDecision, decide};
pub use location::{Location, NavState};
pub use overlay::{OverlayPlan, modal_title, open_as_modal, plan};
pub use route::{AppRoute, RouteAccess};
