use js_sys::Uint8Array;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use super::*;

fn js_error(context: &str, err: JsValue) -> ApiError {
    let detail = err
        .as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|error| String::from(error.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"));
    ApiError::Transport(format!("{context}: {detail}"))
}

pub async fn send(request: HttpRequest<'_>) -> Result<HttpResponse, ApiError> {
    let window =
        web_sys::window().ok_or_else(|| ApiError::Transport("window unavailable".to_string()))?;

    let headers = Headers::new().map_err(|e| js_error("headers", e))?;
    let init = RequestInit::new();
    init.set_method(request.method.as_str());
    match request.body {
        RequestBody::Empty => {}
        RequestBody::Json(json) => {
            headers
                .set("Content-Type", "application/json")
                .map_err(|e| js_error("headers", e))?;
            init.set_body(&JsValue::from_str(json));
        }
        RequestBody::Bytes {
            content_type,
            bytes,
        } => {
            headers
                .set("Content-Type", content_type)
                .map_err(|e| js_error("headers", e))?;
            init.set_body(&Uint8Array::from(bytes));
        }
    }
    init.set_headers(&headers);

    let fetch_request = Request::new_with_str_and_init(request.url, &init)
        .map_err(|e| js_error("build request", e))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&fetch_request))
        .await
        .map_err(|e| js_error("fetch", e))?
        .dyn_into()
        .map_err(|e| js_error("fetch", e))?;

    let text_promise = response.text().map_err(|e| js_error("read body", e))?;
    let body = JsFuture::from(text_promise)
        .await
        .map_err(|e| js_error("read body", e))?
        .as_string()
        .unwrap_or_default();

    Ok(HttpResponse {
        status: response.status(),
        status_text: response.status_text(),
        body,
    })
}

pub fn encode_segment(segment: &str) -> String {
    String::from(js_sys::encode_uri_component(segment))
}
