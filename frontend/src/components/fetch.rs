//! 视图层的异步请求工具
//!
//! 每个视图独占自己拉取的数据；组件卸载后返回的响应通过 `try_set` 静默丢弃。

use crate::components::toast::ToastContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use tradepanel::error::ApiResult;

/// 拉取数据写入信号，维护 loading 标志，失败时弹出提示
pub fn load_into<T, Fut>(toast: ToastContext, loading: RwSignal<bool>, target: RwSignal<T>, context: &'static str, fut: Fut)
where
    T: Send + Sync + 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
{
    loading.set(true);
    spawn_local(async move {
        match fut.await {
            Ok(value) => {
                let _ = target.try_set(value);
            }
            Err(e) => toast.api_error(context, &e),
        }
        let _ = loading.try_set(false);
    });
}

/// 执行一次变更操作：成功时提示并回调，失败时提示服务端消息
pub fn run_action<T, Fut, F>(toast: ToastContext, context: &'static str, fut: Fut, on_success: F)
where
    T: 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
    F: FnOnce(T) + 'static,
{
    spawn_local(async move {
        match fut.await {
            Ok(value) => on_success(value),
            Err(e) => toast.api_error(context, &e),
        }
    });
}
