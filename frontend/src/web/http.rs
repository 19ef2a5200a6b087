//! HTTP 请求封装模块
//!
//! 基于 `web_sys::fetch` 实现核心库的 [`HttpClient`]。超时通过 `AbortController` 实现，
//! multipart 请求体转换为 `FormData`，由浏览器自动生成 boundary。

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tradepanel::error::{ApiError, ApiResult};
use tradepanel::request::{FormPart, HttpBody, HttpClient, HttpRequest, HttpResponse, MultipartForm};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response, Window};

fn js_error(context: &str, e: JsValue) -> ApiError {
    ApiError::network(format!("{}: {:?}", context, e))
}

/// 将 multipart 表单转换为浏览器 `FormData`
fn form_data(form: &MultipartForm) -> ApiResult<FormData> {
    let data = FormData::new().map_err(|e| js_error("创建 FormData 失败", e))?;

    for part in &form.parts {
        match part {
            FormPart::Text { name, value } => data.append_with_str(name, value),
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let array = js_sys::Uint8Array::from(bytes.as_slice());
                let parts = js_sys::Array::of1(&array);
                let opts = BlobPropertyBag::new();
                opts.set_type(content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
                    .map_err(|e| js_error("创建 Blob 失败", e))?;
                data.append_with_blob_and_filename(name, &blob, file_name)
            }
        }
        .map_err(|e| js_error("写入 FormData 失败", e))?;
    }

    Ok(data)
}

/// 请求超时守卫
///
/// 到期时中止 fetch；drop 时清除尚未触发的定时器。
struct TimeoutGuard {
    handle: i32,
    fired: Rc<Cell<bool>>,
    _closure: Closure<dyn FnMut()>,
}

impl TimeoutGuard {
    fn arm(window: &Window, opts: &RequestInit, timeout: Duration) -> ApiResult<Self> {
        let controller = AbortController::new().map_err(|e| js_error("创建 AbortController 失败", e))?;
        opts.set_signal(Some(&controller.signal()));

        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            flag.set(true);
            controller.abort();
        });

        let millis = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(closure.as_ref().unchecked_ref(), millis)
            .map_err(|e| js_error("设置定时器失败", e))?;

        Ok(Self {
            handle,
            fired,
            _closure: closure,
        })
    }

    fn fired(&self) -> bool {
        self.fired.get()
    }
}

impl Drop for TimeoutGuard {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.handle);
        }
    }
}

/// 基于浏览器 fetch 的 HTTP 客户端
///
/// 无状态单元结构体，可在 Leptos Context 中自由复制。
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        // 1. 构造请求头
        let headers = Headers::new().map_err(|e| js_error("创建 Headers 失败", e))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| js_error("设置 Header 失败", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        // 2. 请求体
        match &req.body {
            Some(HttpBody::Json(body)) => opts.set_body(&JsValue::from_str(body)),
            Some(HttpBody::Multipart(form)) => opts.set_body(&form_data(form)?.into()),
            None => {}
        }

        let window = web_sys::window().ok_or_else(|| ApiError::network("无法获取 window 对象"))?;

        // 3. 超时
        let guard = match req.timeout {
            Some(timeout) => Some(TimeoutGuard::arm(&window, &opts, timeout)?),
            None => None,
        };

        let request =
            Request::new_with_str_and_init(&req.url, &opts).map_err(|e| js_error("请求构建失败", e))?;

        // 4. 发送
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| {
                if guard.as_ref().is_some_and(TimeoutGuard::fired) {
                    ApiError::network(format!("request timed out: {}", req.url))
                } else {
                    js_error("网络错误", e)
                }
            })?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| js_error("Response 类型转换失败", e))?;

        // 5. 读取响应体
        let status = response.status();
        let promise = response.text().map_err(|e| js_error("读取响应失败", e))?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| js_error("读取响应失败", e))?;

        drop(guard);
        Ok(HttpResponse::new(status, text.as_string().unwrap_or_default()))
    }
}
