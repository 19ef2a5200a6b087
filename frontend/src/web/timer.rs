//! 定时器封装模块

use std::time::Duration;
use wasm_bindgen::prelude::*;

/// 周期性定时器
///
/// 封装 `setInterval`。drop 时自动清除，组件卸载即停止轮询。
pub struct Interval {
    handle: i32,
    _closure: Closure<dyn Fn()>,
}

impl Interval {
    /// 无法获取 window 或注册失败时返回 `None`
    pub fn new<F>(period: Duration, callback: F) -> Option<Self>
    where
        F: Fn() + 'static,
    {
        let closure = Closure::<dyn Fn()>::new(callback);
        let millis = i32::try_from(period.as_millis()).unwrap_or(i32::MAX);

        let handle = web_sys::window()?
            .set_interval_with_callback_and_timeout_and_arguments_0(closure.as_ref().unchecked_ref(), millis)
            .ok()?;

        Some(Self {
            handle,
            _closure: closure,
        })
    }

    pub fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}
