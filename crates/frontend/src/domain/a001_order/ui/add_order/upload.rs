//! Concurrent presigned uploads of the files picked in the add-order modal.

use crate::domain::a001_order::api;
use contracts::config::AdminConfig;
use contracts::error::ApiError;
use contracts::usecases::u502_add_order::{
    format_duration, is_media, PresignedUrlRequest, SelectedFile, UploadedFile, DEFAULT_DURATION,
};
use js_sys::{Array, Promise};
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::{File, HtmlInputElement, HtmlMediaElement, Url};

pub fn selected(file: &File) -> SelectedFile {
    SelectedFile {
        name: file.name(),
        mime_type: file.type_(),
        size: file.size() as u64,
    }
}

/// Files currently picked in a file input
pub fn files_of(input: &HtmlInputElement) -> Vec<File> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

/// Progress row shown while a file uploads
#[derive(Debug, Clone, PartialEq)]
pub struct UploadProgress {
    pub name: String,
    pub duration: String,
    pub percent: u8,
}

impl UploadProgress {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration: DEFAULT_DURATION.to_string(),
            percent: 0,
        }
    }

    /// File name, followed by the duration once it is known
    pub fn caption(&self) -> String {
        if self.duration == DEFAULT_DURATION {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.duration)
        }
    }
}

/// Outcome of one batch: stored files in selection order, names of the failed ones
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadBatch {
    pub uploaded: Vec<UploadedFile>,
    pub failed: Vec<String>,
}

/// Duration of an audio/video file read from its metadata
async fn media_duration(file: &File) -> String {
    let mime = file.type_();
    if !is_media(&mime) {
        return DEFAULT_DURATION.to_string();
    }
    let Some(document) = crate::shared::dom::document() else {
        return DEFAULT_DURATION.to_string();
    };
    let tag = if mime.starts_with("audio/") { "audio" } else { "video" };
    let media = match document
        .create_element(tag)
        .map(|el| el.unchecked_into::<HtmlMediaElement>())
    {
        Ok(media) => media,
        Err(e) => {
            log::warn!("cannot create <{}>: {:?}", tag, e);
            return DEFAULT_DURATION.to_string();
        }
    };
    let url = match Url::create_object_url_with_blob(file) {
        Ok(url) => url,
        Err(e) => {
            log::warn!("object url for {}: {:?}", file.name(), e);
            return DEFAULT_DURATION.to_string();
        }
    };

    let element = media.clone();
    let promise = Promise::new(&mut |resolve, _reject| {
        let on_loaded = {
            let resolve = resolve.clone();
            let element = element.clone();
            Closure::once_into_js(move || {
                let _ = resolve.call1(&JsValue::NULL, &JsValue::from_f64(element.duration()));
            })
        };
        let on_error = Closure::once_into_js(move || {
            let _ = resolve.call1(&JsValue::NULL, &JsValue::from_f64(f64::NAN));
        });
        element.set_onloadedmetadata(Some(on_loaded.unchecked_ref()));
        element.set_onerror(Some(on_error.unchecked_ref()));
    });
    media.set_preload("metadata");
    media.set_src(&url);

    let seconds = JsFuture::from(promise)
        .await
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(f64::NAN);
    let _ = Url::revoke_object_url(&url);
    format_duration(seconds)
}

fn set_progress(progress: RwSignal<Vec<UploadProgress>>, index: usize, update: impl FnOnce(&mut UploadProgress)) {
    progress.update(|rows| {
        if let Some(row) = rows.get_mut(index) {
            update(row);
        }
    });
}

async fn upload_one(
    config: AdminConfig,
    file: File,
    index: usize,
    customer: (String, String),
    progress: RwSignal<Vec<UploadProgress>>,
) -> Result<UploadedFile, ApiError> {
    let duration = media_duration(&file).await;
    set_progress(progress, index, |row| row.duration = duration.clone());

    let picked = selected(&file);
    let request = PresignedUrlRequest::new(&picked, &customer.0, &customer.1);
    let presigned = api::presigned_url(&config, &request).await?;
    set_progress(progress, index, |row| row.percent = 30);

    api::upload_to_storage(&presigned, &file).await?;
    set_progress(progress, index, |row| row.percent = 100);

    Ok(UploadedFile::new(&picked, presigned.file_name, duration))
}

/// Upload every file at once and wait for all of them.
///
/// A failing file does not stop the others; it is logged and listed in
/// `failed`. `progress` gets one row per file, in order.
pub async fn upload_all(
    config: &AdminConfig,
    files: Vec<File>,
    customer: (String, String),
    progress: RwSignal<Vec<UploadProgress>>,
) -> UploadBatch {
    progress.set(files.iter().map(|f| UploadProgress::new(f.name())).collect());
    let names: Vec<String> = files.iter().map(File::name).collect();

    let promises = Array::new();
    for (index, file) in files.into_iter().enumerate() {
        let config = config.clone();
        let customer = customer.clone();
        promises.push(&future_to_promise(async move {
            let name = file.name();
            match upload_one(config, file, index, customer, progress).await {
                Ok(uploaded) => Ok(serde_wasm_bindgen::to_value(&uploaded)?),
                Err(e) => {
                    log::error!("upload of \"{}\" failed: {}", name, e);
                    Ok(JsValue::UNDEFINED)
                }
            }
        }));
    }

    let settled = match JsFuture::from(Promise::all(&promises)).await {
        Ok(values) => Array::from(&values),
        Err(e) => {
            log::error!("upload batch rejected: {:?}", e);
            return UploadBatch {
                uploaded: Vec::new(),
                failed: names,
            };
        }
    };

    let mut batch = UploadBatch::default();
    for (value, name) in settled.iter().zip(names) {
        match serde_wasm_bindgen::from_value::<UploadedFile>(value) {
            Ok(uploaded) => batch.uploaded.push(uploaded),
            Err(_) => batch.failed.push(name),
        }
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_shows_known_duration() {
        let mut row = UploadProgress::new("인터뷰.mp3");
        assert_eq!(row.caption(), "인터뷰.mp3");
        row.duration = "00:12:30".into();
        assert_eq!(row.caption(), "인터뷰.mp3 (00:12:30)");
    }
}
