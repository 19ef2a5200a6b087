//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑层，不依赖于 DOM 或 web_sys。定义应用的所有路由及其守卫规则。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面
    Login,
    /// 控制面板 (默认路由)
    #[default]
    Dashboard,
    Brokers,
    Strategies,
    Models,
    Backtests,
    LiveTrading,
    Settings,
}

impl AppRoute {
    /// 导航栏中依次展示的页面
    pub const NAVIGATION: [AppRoute; 6] = [
        AppRoute::Dashboard,
        AppRoute::Strategies,
        AppRoute::Brokers,
        AppRoute::Backtests,
        AppRoute::LiveTrading,
        AppRoute::Models,
    ];

    /// 将 URL path 解析为路由；未知路径返回 `None`
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        let route = match path {
            "/" => Self::Dashboard,
            "/login" => Self::Login,
            "/brokers" => Self::Brokers,
            "/strategies" => Self::Strategies,
            "/models" => Self::Models,
            "/backtests" => Self::Backtests,
            "/live" => Self::LiveTrading,
            "/settings" => Self::Settings,
            _ => return None,
        };
        Some(route)
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/",
            Self::Brokers => "/brokers",
            Self::Strategies => "/strategies",
            Self::Models => "/models",
            Self::Backtests => "/backtests",
            Self::LiveTrading => "/live",
            Self::Settings => "/settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
            Self::Brokers => "Brokers",
            Self::Strategies => "Strategies",
            Self::Models => "ML Models",
            Self::Backtests => "Backtests",
            Self::LiveTrading => "Live Trading",
            Self::Settings => "Settings",
        }
    }

    /// **核心守卫逻辑：除登录页外所有页面都需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 认证成功时的重定向目标（从登录页或未知路径）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 对请求的路由执行守卫，返回实际应展示的路由
    pub fn guard(target: Option<Self>, is_authenticated: bool) -> Self {
        match target {
            Some(route) if route.requires_auth() && !is_authenticated => Self::auth_failure_redirect(),
            Some(route) if route.should_redirect_when_authenticated() && is_authenticated => {
                Self::auth_success_redirect()
            }
            Some(route) => route,
            None if is_authenticated => Self::auth_success_redirect(),
            None => Self::auth_failure_redirect(),
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_round_trip_for_every_route() {
        for route in AppRoute::NAVIGATION.into_iter().chain([AppRoute::Login, AppRoute::Settings]) {
            assert_eq!(AppRoute::from_path(route.to_path()), Some(route));
        }
    }

    #[test]
    fn test_trailing_slash_and_unknown_paths() {
        assert_eq!(AppRoute::from_path("/brokers/"), Some(AppRoute::Brokers));
        assert_eq!(AppRoute::from_path(""), Some(AppRoute::Dashboard));
        assert_eq!(AppRoute::from_path("/nope"), None);
    }

    #[test]
    fn test_anonymous_always_lands_on_login() {
        assert_eq!(AppRoute::guard(Some(AppRoute::Strategies), false), AppRoute::Login);
        assert_eq!(AppRoute::guard(Some(AppRoute::Login), false), AppRoute::Login);
        assert_eq!(AppRoute::guard(None, false), AppRoute::Login);
    }

    #[test]
    fn test_authenticated_leaves_login_and_unknown_paths() {
        assert_eq!(AppRoute::guard(Some(AppRoute::Login), true), AppRoute::Dashboard);
        assert_eq!(AppRoute::guard(None, true), AppRoute::Dashboard);
        assert_eq!(AppRoute::guard(Some(AppRoute::Models), true), AppRoute::Models);
    }
}
