//! HTTP helpers shared by the API modules.
//!
//! Paths are joined with `AdminConfig::api_base`; every request carries the
//! CSRF token read from the configured cookie. Failures are mapped onto
//! [`ApiError`]: network problems become `Transport`, bodies that do not
//! parse become `Decode`.

use contracts::config::AdminConfig;
use contracts::error::ApiError;
use contracts::shared::api_ack::ApiAck;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsCast;
use web_sys::{FormData, HtmlDocument};

/// Value of cookie `name` in a `document.cookie` string
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|cookie| {
        let value = cookie.trim().strip_prefix(name)?.strip_prefix('=')?;
        Some(
            urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string()),
        )
    })
}

fn csrf_token(config: &AdminConfig) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let cookies = document.dyn_into::<HtmlDocument>().ok()?.cookie().ok()?;
    cookie_value(&cookies, &config.csrf_cookie)
}

fn with_csrf(builder: RequestBuilder, config: &AdminConfig) -> RequestBuilder {
    match csrf_token(config) {
        Some(token) => builder.header(&config.csrf_header, &token),
        None => {
            log::warn!("cookie '{}' not found, request sent without CSRF header", config.csrf_cookie);
            builder
        }
    }
}

fn transport(err: gloo_net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

/// Parse the body whatever the status: failing endpoints answer with a JSON
/// `{success: false, error}` that the caller must see.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let ok = response.ok();
    let text = response.text().await.map_err(transport)?;
    match serde_json::from_str::<T>(&text) {
        Ok(value) => Ok(value),
        Err(e) if ok => Err(ApiError::Decode(e.to_string())),
        Err(_) => Err(ApiError::Transport(format!("HTTP {}", status))),
    }
}

pub async fn get_json<T: DeserializeOwned>(config: &AdminConfig, path: &str) -> Result<T, ApiError> {
    let url = config.api_url(path);
    log::debug!("GET {}", url);
    let response = with_csrf(Request::get(&url), config)
        .send()
        .await
        .map_err(transport)?;
    read_json(response).await
}

pub async fn post_json<B, T>(config: &AdminConfig, path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let url = config.api_url(path);
    log::debug!("POST {}", url);
    let response = with_csrf(Request::post(&url), config)
        .json(body)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    read_json(response).await
}

async fn send_checked<B>(builder: RequestBuilder, body: &B, fallback: &str) -> Result<(), ApiError>
where
    B: Serialize + ?Sized,
{
    let response = builder.json(body).map_err(transport)?.send().await.map_err(transport)?;
    if response.ok() {
        return Ok(());
    }
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    Err(ApiAck::rejection(status, &text, fallback))
}

/// POST judged by the HTTP status only; a non-2xx body is read as a
/// rejection envelope.
pub async fn post_checked<B>(config: &AdminConfig, path: &str, body: &B, fallback: &str) -> Result<(), ApiError>
where
    B: Serialize + ?Sized,
{
    let url = config.api_url(path);
    log::debug!("POST {}", url);
    send_checked(with_csrf(Request::post(&url), config), body, fallback).await
}

/// PATCH of an endpoint that answers with the updated record
pub async fn patch_checked<B>(config: &AdminConfig, path: &str, body: &B, fallback: &str) -> Result<(), ApiError>
where
    B: Serialize + ?Sized,
{
    let url = config.api_url(path);
    log::debug!("PATCH {}", url);
    send_checked(with_csrf(Request::patch(&url), config), body, fallback).await
}

/// Multipart POST to the admin API
pub async fn post_form<T: DeserializeOwned>(
    config: &AdminConfig,
    path: &str,
    form: FormData,
) -> Result<T, ApiError> {
    let url = config.api_url(path);
    log::debug!("POST (multipart) {}", url);
    let response = with_csrf(Request::post(&url), config)
        .body(form)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    read_json(response).await
}

/// Multipart POST to an absolute URL outside the admin API (presigned
/// storage uploads). No CSRF header; only the status is checked.
pub async fn post_form_external(url: &str, form: FormData) -> Result<(), ApiError> {
    let response = Request::post(url)
        .body(form)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    if response.ok() {
        return Ok(());
    }
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    log::error!("storage upload failed ({}): {}", status, text);
    Err(ApiError::Transport(format!("S3 업로드 실패: {}", status)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let cookies = "sessionid=abc; csrftoken=tok%3D123; theme=dark";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("tok=123"));
        assert_eq!(cookie_value(cookies, "theme").as_deref(), Some("dark"));
        assert_eq!(cookie_value(cookies, "missing"), None);
    }

    #[test]
    fn test_cookie_prefix_is_not_a_match() {
        let cookies = "csrftoken_old=x; csrftoken=y";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("y"));
        assert_eq!(cookie_value("", "csrftoken"), None);
    }
}
