use leptos::prelude::*;
use tradepanel::error::ApiError;
use tradepanel::notification::{NOTIFICATION_TIMEOUT, Notification, NotificationLevel};

/// 全局提示框上下文：同一时刻最多展示一条，5 秒后自动消失
#[derive(Clone, Copy)]
pub struct ToastContext {
    // (序号, 通知)；序号用于避免旧定时器清除新通知
    current: RwSignal<Option<(u64, Notification)>>,
    counter: StoredValue<u64>,
}

impl ToastContext {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            counter: StoredValue::new(0),
        }
    }

    pub fn notify(&self, notification: Notification) {
        self.counter.update_value(|n| *n += 1);
        let seq = self.counter.get_value();
        self.current.set(Some((seq, notification)));

        let current = self.current;
        set_timeout(
            move || {
                let still_shown = current.with_untracked(|c| matches!(c, Some((s, _)) if *s == seq));
                if still_shown {
                    current.set(None);
                }
            },
            NOTIFICATION_TIMEOUT,
        );
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(Notification::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(Notification::error(message));
    }

    /// 以 "上下文: 服务端消息" 的形式展示 API 错误
    pub fn api_error(&self, context: &str, err: &ApiError) {
        tracing::error!(error = %err, "{}", context);
        self.error(format!("{}: {}", context, err.user_message()));
    }

    fn dismiss(&self) {
        self.current.set(None);
    }
}

pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

fn alert_class(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Success => "alert alert-success shadow-lg",
        NotificationLevel::Info => "alert alert-info shadow-lg",
        NotificationLevel::Warning => "alert alert-warning shadow-lg",
        NotificationLevel::Error => "alert alert-error shadow-lg",
    }
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toast = use_toast();

    move || {
        toast.current.get().map(|(_, note)| {
            view! {
                <div class="toast toast-top toast-end z-50">
                    <div class=alert_class(note.level) on:click=move |_| toast.dismiss()>
                        <span>{note.message}</span>
                    </div>
                </div>
            }
        })
    }
}
