//! 文件上传与下载
//!
//! 将 `<input type="file">` 中选中的文件读取为核心库的 [`UploadFile`]，
//! 以及把导出的 JSON 包装成可下载的 object URL。

use tradepanel::UploadFile;
use tradepanel::error::{ApiError, ApiResult};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, HtmlInputElement, Url};

/// 获取输入框中选中的第一个文件
pub fn selected_file(input: &HtmlInputElement) -> Option<File> {
    input.files()?.get(0)
}

pub async fn read_file(file: &File) -> ApiResult<UploadFile> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ApiError::serialization(format!("读取文件失败: {:?}", e)))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    let mut upload = UploadFile::new(file.name(), bytes);
    let content_type = file.type_();
    if !content_type.is_empty() {
        upload.content_type = content_type;
    }
    Ok(upload)
}

/// 为导出的 JSON 创建可下载的 object URL
pub fn json_object_url(json: &str) -> Option<String> {
    let parts = js_sys::Array::of1(&JsValue::from_str(json));
    let opts = BlobPropertyBag::new();
    opts.set_type("application/json");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts).ok()?;
    Url::create_object_url_with_blob(&blob).ok()
}

pub fn revoke_object_url(url: &str) {
    let _ = Url::revoke_object_url(url);
}
