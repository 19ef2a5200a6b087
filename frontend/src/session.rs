//! 会话上下文
//!
//! 将核心库的会话状态机接入 Leptos 的响应式系统：状态保存在信号中，
//! 传输层的 401 钩子直接派发 `SessionEvent::Unauthorized`，路由服务监听派生的认证信号。

use crate::web::{FetchHttpClient, LocalStorage};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tradepanel::config::{ClientConfig, ENV_API_URL, ENV_TIMEOUT_SECS};
use tradepanel::error::ApiResult;
use tradepanel::session::{self, SessionEvent, SessionState};
use tradepanel::{ApiTransport, AuthService, TradePanelApi};
use tradepanel_shared::{Credentials, User};

pub type Api = TradePanelApi<FetchHttpClient, LocalStorage>;
pub type Auth = AuthService<FetchHttpClient, LocalStorage>;

/// 编译期注入的配置（`TRADEPANEL_API_URL=... trunk build`）
fn client_config() -> ClientConfig {
    ClientConfig::from_vars(|key| {
        let value = match key {
            ENV_API_URL => option_env!("TRADEPANEL_API_URL"),
            ENV_TIMEOUT_SECS => option_env!("TRADEPANEL_TIMEOUT_SECS"),
            _ => None,
        };
        value.map(str::to_string)
    })
}

fn transition(set_state: WriteSignal<SessionState>, event: SessionEvent) {
    set_state.update(|state| {
        let next = state.apply(event.clone());
        if next != *state {
            tracing::info!(from = ?state, to = ?next, ?event, "session transition");
        }
        *state = next;
    });
}

/// 会话上下文
///
/// 全部字段都是信号或存储句柄，可 `Copy` 进任意闭包。
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: ReadSignal<SessionState>,
    set_state: WriteSignal<SessionState>,
    auth: StoredValue<Auth>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::Checking);

        let transport = ApiTransport::new(client_config(), FetchHttpClient, LocalStorage)
            .with_unauthorized_hook(move || transition(set_state, SessionEvent::Unauthorized));
        let auth = AuthService::new(TradePanelApi::new(transport));

        Self {
            state,
            set_state,
            auth: StoredValue::new(auth),
        }
    }

    pub fn dispatch(&self, event: SessionEvent) {
        transition(self.set_state, event);
    }

    pub fn api(&self) -> Api {
        self.auth.with_value(|auth| auth.api().clone())
    }

    fn auth(&self) -> Auth {
        self.auth.get_value()
    }

    /// 用于注入路由服务
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(SessionState::is_authenticated))
    }

    pub fn is_checking_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(SessionState::is_checking))
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user().cloned())
    }

    /// 启动时校验已存储的令牌
    pub fn start(&self) {
        let ctx = *self;
        spawn_local(async move {
            let event = session::restore_session(&ctx.auth()).await;
            ctx.dispatch(event);
        });
    }

    pub async fn login(&self, credentials: Credentials) -> ApiResult<User> {
        match session::login(&self.auth(), &credentials).await {
            Ok(user) => {
                self.dispatch(SessionEvent::LoggedIn(user.clone()));
                Ok(user)
            }
            Err(e) => {
                self.dispatch(SessionEvent::LoginFailed);
                Err(e)
            }
        }
    }

    /// 导航由路由服务监听认证信号自动完成
    pub fn logout(&self) {
        let event = session::logout(&self.auth());
        self.dispatch(event);
    }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}
