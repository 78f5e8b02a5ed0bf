//! Add-order modal: id generation, presigned uploads and per-file settings.

pub mod file_tabs;
pub mod upload;

pub use file_tabs::{FileSettings, FileTabEntry, FileTabSet, RecordingType, TabField};
pub use upload::{
    batch_notice, check_sizes, format_duration, is_media, PresignedPost, PresignedUrlRequest,
    PresignedUrlResponse, SelectedFile, UploadedFile, DEFAULT_DURATION, MAX_UPLOAD_BYTES,
};
