use super::*;

pub async fn send(request: HttpRequest<'_>) -> Result<HttpResponse, ApiError> {
    Err(ApiError::Transport(format!(
        "{} {}: fetch is only available when compiled for wasm32",
        request.method.as_str(),
        request.url
    )))
}

pub fn encode_segment(segment: &str) -> String {
    segment.to_string()
}
