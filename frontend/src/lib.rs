//! TradePanel 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `session`: 会话状态管理
//! - `components`: UI 组件层

mod session;
mod components {
    pub mod backtests;
    pub mod brokers;
    pub mod dashboard;
    pub mod fetch;
    pub mod live_trading;
    pub mod login;
    pub mod models;
    pub mod navigation_bar;
    pub mod settings;
    pub mod strategies;
    pub mod toast;
}

use crate::components::backtests::BacktestsPage;
use crate::components::brokers::BrokersPage;
use crate::components::dashboard::DashboardPage;
use crate::components::live_trading::LiveTradingPage;
use crate::components::login::LoginPage;
use crate::components::models::ModelsPage;
use crate::components::navigation_bar::NavigationBar;
use crate::components::settings::SettingsPage;
use crate::components::strategies::StrategiesPage;
use crate::components::toast::{ToastContext, ToastHost};
use crate::session::SessionContext;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate。
pub(crate) mod web {
    pub mod file;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::FetchHttpClient;
    pub use storage::LocalStorage;
    pub use timer::Interval;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 登录页独占整个页面，其余页面共享导航栏布局。
fn route_matcher(route: AppRoute) -> AnyView {
    let page = match route {
        AppRoute::Login => return view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Brokers => view! { <BrokersPage /> }.into_any(),
        AppRoute::Strategies => view! { <StrategiesPage /> }.into_any(),
        AppRoute::Models => view! { <ModelsPage /> }.into_any(),
        AppRoute::Backtests => view! { <BacktestsPage /> }.into_any(),
        AppRoute::LiveTrading => view! { <LiveTradingPage /> }.into_any(),
        AppRoute::Settings => view! { <SettingsPage /> }.into_any(),
    };
    view! {
        <div class="min-h-screen bg-base-200">
            <NavigationBar />
            <main class="container mx-auto p-4 md:p-8">{page}</main>
        </div>
    }
    .into_any()
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建上下文
    let session = SessionContext::new();
    provide_context(session);
    provide_context(ToastContext::new());

    // 2. 恢复已保存的会话
    session.start();

    // 3. 会话确定前不挂载路由，守卫只看到最终认证状态
    let is_checking = session.is_checking_signal();
    let is_authenticated = session.is_authenticated_signal();

    view! {
        <Show
            when=move || !is_checking.get()
            fallback=|| view! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <span class="loading loading-spinner loading-lg"></span>
                </div>
            }
        >
            <Router is_authenticated=is_authenticated>
                <RouterOutlet matcher=route_matcher />
            </Router>
        </Show>
        <ToastHost />
    }
}
