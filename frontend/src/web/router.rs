//! 路由服务模块 - 核心引擎
//!
//! 封装 web_sys 的 History API：所有对 window.history 的操作都集中在此模块。
//! 导航流程为"请求 -> 守卫 -> 写入 History -> 更新信号"。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn write_history(path: &str, push: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let _ = if push {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    } else {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    };
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新；认证状态以信号形式注入，与会话层解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        // 初始路由同样经过守卫，并以 replaceState 修正地址栏
        let requested = AppRoute::from_path(&current_path());
        let initial = AppRoute::guard(requested, is_authenticated.get_untracked());
        if requested != Some(initial) {
            write_history(initial.to_path(), false);
        }
        let (current_route, set_route) = signal(initial);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, route: AppRoute) {
        let target = AppRoute::guard(Some(route), self.is_authenticated.get_untracked());
        if target != route {
            tracing::debug!(requested = %route, redirect = %target, "navigation redirected");
        }
        write_history(target.to_path(), true);
        self.set_route.set(target);
    }

    /// 浏览器后退/前进按钮同样执行守卫
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            let requested = AppRoute::from_path(&current_path());
            let target = AppRoute::guard(requested, is_authenticated.get_untracked());
            if requested != Some(target) {
                write_history(target.to_path(), false);
            }
            set_route.set(target);
        });

        if let Some(window) = web_sys::window() {
            let _ = window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 监听器与页面同生命周期
        closure.forget();
    }

    /// 会话状态变化时自动重定向（登录后离开登录页，登出或 401 后回到登录页）
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();
            let target = AppRoute::guard(Some(route), is_auth);

            if target != route {
                tracing::info!(from = %route, to = %target, is_auth, "auth state changed, redirecting");
                write_history(target.to_path(), true);
                set_route.set(target);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>().expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(is_authenticated: Signal<bool>, children: Children) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件：根据当前路由渲染对应视图
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || matcher(router.current_route().get())
}

/// 站内链接：拦截点击，走路由服务而非整页跳转
#[component]
pub fn Link(to: AppRoute, children: Children) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(to);
    };

    view! {
        <a href=to.to_path() on:click=on_click>
            {children()}
        </a>
    }
}
