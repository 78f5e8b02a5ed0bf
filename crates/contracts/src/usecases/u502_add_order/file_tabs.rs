//! Per-file settings of the add-order modal.
//!
//! One tab per uploaded file. The set owns the uploaded files of the modal
//! session, so removing a tab and removing the stored file are one step.

use super::upload::UploadedFile;
use crate::domain::common::{OrderId, RequestId};
use crate::error::ApiError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordingType {
    #[default]
    #[serde(rename = "전체")]
    Full,
    #[serde(rename = "부분")]
    Partial,
}

impl RecordingType {
    pub fn code(self) -> &'static str {
        match self {
            RecordingType::Full => "전체",
            RecordingType::Partial => "부분",
        }
    }

    pub fn from_code(code: &str) -> Self {
        if code == "부분" {
            RecordingType::Partial
        } else {
            RecordingType::Full
        }
    }
}

/// Editable input of a settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabField {
    RecordingType,
    TotalDuration,
    PartialRange,
    SpeakerCount,
    SpeakerNames,
    RecordingDate,
    AdditionalInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTabEntry {
    pub file: UploadedFile,
    pub request_id: RequestId,
    pub recording_type: RecordingType,
    pub total_duration: String,
    pub partial_range: String,
    pub speaker_count: u32,
    pub speaker_names: String,
    /// `datetime-local` input value
    pub recording_date: String,
    pub additional_info: String,
}

impl FileTabEntry {
    fn new(file: UploadedFile, request_id: RequestId) -> Self {
        Self {
            total_duration: file.tab_duration(),
            file,
            request_id,
            recording_type: RecordingType::Full,
            partial_range: String::new(),
            speaker_count: 1,
            speaker_names: String::new(),
            recording_date: String::new(),
            additional_info: String::new(),
        }
    }

    pub fn partial_range_enabled(&self) -> bool {
        self.recording_type == RecordingType::Partial
    }

    fn settings(&self) -> FileSettings {
        FileSettings {
            file_key: self.file.file_key.clone(),
            original_name: self.file.original_name.clone(),
            file_type: self.file.file_type.clone(),
            file_size: self.file.file_size,
            recording_type: self.recording_type,
            total_duration: self.total_duration.clone(),
            partial_range: self.partial_range.clone(),
            speaker_count: self.speaker_count,
            speaker_names: self.speaker_names.clone(),
            recording_date: normalize_recording_date(&self.recording_date),
            additional_info: self.additional_info.clone(),
        }
    }
}

/// One element of `files_data` in `create-db-order`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSettings {
    pub file_key: String,
    pub original_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub recording_type: RecordingType,
    pub total_duration: String,
    pub partial_range: String,
    pub speaker_count: u32,
    pub speaker_names: String,
    pub recording_date: Option<String>,
    pub additional_info: String,
}

const DATE_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// `datetime-local` value in minute precision; blank or malformed → `None`
fn normalize_recording_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, DATE_INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .map(|dt| dt.format(DATE_INPUT_FORMAT).to_string())
}

pub const LAST_TAB_MESSAGE: &str = "최소 하나의 파일은 필요합니다.";

/// Tabs of the modal session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTabSet {
    order_id: OrderId,
    entries: Vec<FileTabEntry>,
    active: usize,
}

impl FileTabSet {
    pub fn new(order_id: OrderId) -> Self {
        Self {
            order_id,
            entries: Vec::new(),
            active: 0,
        }
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn set_order_id(&mut self, order_id: OrderId) {
        self.order_id = order_id;
        self.renumber();
    }

    pub fn entries(&self) -> &[FileTabEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_entry(&self) -> Option<&FileTabEntry> {
        self.entries.get(self.active)
    }

    /// Storage keys of every uploaded file
    pub fn file_keys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.file.file_key.clone()).collect()
    }

    /// Append newly uploaded files. Existing tabs keep their settings;
    /// the first tab becomes active.
    pub fn append(&mut self, files: impl IntoIterator<Item = UploadedFile>) {
        for file in files {
            let request_id = RequestId::for_file(&self.order_id, self.entries.len());
            self.entries.push(FileTabEntry::new(file, request_id));
        }
        self.active = 0;
    }

    pub fn switch_to(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    /// Apply an input change. Choosing `전체` clears the partial range;
    /// a speaker count that is not a positive number keeps the old value.
    pub fn update(&mut self, index: usize, field: TabField, value: &str) {
        let Some(entry) = self.entries.get_mut(index) else {
            return;
        };
        match field {
            TabField::RecordingType => {
                entry.recording_type = RecordingType::from_code(value);
                if entry.recording_type == RecordingType::Full {
                    entry.partial_range.clear();
                }
            }
            TabField::TotalDuration => entry.total_duration = value.to_string(),
            TabField::PartialRange => {
                if entry.partial_range_enabled() {
                    entry.partial_range = value.to_string();
                }
            }
            TabField::SpeakerCount => {
                if let Ok(count) = value.trim().parse::<u32>() {
                    if count >= 1 {
                        entry.speaker_count = count;
                    }
                }
            }
            TabField::SpeakerNames => entry.speaker_names = value.to_string(),
            TabField::RecordingDate => entry.recording_date = value.to_string(),
            TabField::AdditionalInfo => entry.additional_info = value.to_string(),
        }
    }

    /// Remove a tab and return its file for remote deletion.
    /// The last remaining tab cannot be removed.
    pub fn remove(&mut self, index: usize) -> Result<UploadedFile, ApiError> {
        if self.entries.len() <= 1 {
            return Err(ApiError::precondition(LAST_TAB_MESSAGE));
        }
        if index >= self.entries.len() {
            return Err(ApiError::precondition("삭제할 파일을 찾을 수 없습니다."));
        }
        let current = self.active;
        let removed = self.entries.remove(index);
        self.renumber();

        let len = self.entries.len();
        self.active = if current >= len {
            len - 1
        } else if current == index && index > 0 {
            index - 1
        } else if current > index {
            current - 1
        } else {
            current
        };
        Ok(removed.file)
    }

    /// Drop everything and return the keys to delete remotely
    pub fn clear(&mut self) -> Vec<String> {
        let keys = self.file_keys();
        self.entries.clear();
        self.active = 0;
        keys
    }

    pub fn settings(&self) -> Vec<FileSettings> {
        self.entries.iter().map(FileTabEntry::settings).collect()
    }

    fn renumber(&mut self) {
        for (idx, entry) in self.entries.iter_mut().enumerate() {
            entry.request_id = RequestId::for_file(&self.order_id, idx);
        }
    }
}

/// Width of a tab header for `count` tabs
pub fn tab_width(count: usize) -> u32 {
    let count = count.max(1) as u32;
    (800 / count).saturating_sub(4).clamp(100, 250)
}

/// File name shortened to fit a tab of `width` pixels
pub fn tab_label(name: &str, width: u32) -> String {
    let fits = (width / 8) as usize;
    if name.chars().count() > fits {
        let keep = fits.saturating_sub(3);
        format!("{}...", name.chars().take(keep).collect::<String>())
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploaded(key: &str) -> UploadedFile {
        UploadedFile {
            file_key: key.into(),
            original_name: format!("{key}.mp3"),
            file_type: "audio/mpeg".into(),
            file_size: 100,
            duration: "00:01:00".into(),
        }
    }

    fn set_with(n: usize) -> FileTabSet {
        let mut set = FileTabSet::new(OrderId::new("240501"));
        set.append((0..n).map(|i| uploaded(&format!("k{i}"))));
        set
    }

    #[test]
    fn request_ids_follow_position() {
        let set = set_with(3);
        let ids: Vec<_> = set.entries().iter().map(|e| e.request_id.to_string()).collect();
        assert_eq!(ids, vec!["24050100", "24050101", "24050102"]);
        assert_eq!(set.entries()[0].total_duration, "00:01:00");
        assert_eq!(set.entries()[0].speaker_count, 1);
    }

    #[test]
    fn uploads_are_cumulative_and_keep_settings() {
        let mut set = set_with(1);
        set.update(0, TabField::SpeakerNames, "홍길동,김철수");
        set.append(vec![uploaded("k9")]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.entries()[0].speaker_names, "홍길동,김철수");
        assert_eq!(set.entries()[1].request_id.as_str(), "24050101");
    }

    #[test]
    fn last_tab_cannot_be_removed() {
        let mut set = set_with(1);
        assert_eq!(
            set.remove(0).unwrap_err(),
            ApiError::Precondition(LAST_TAB_MESSAGE.into())
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_renumbers_and_adjusts_active() {
        let mut set = set_with(3);
        set.switch_to(2);
        let removed = set.remove(2).unwrap();
        assert_eq!(removed.file_key, "k2");
        assert_eq!(set.active(), 1);

        let mut set = set_with(3);
        set.switch_to(1);
        set.remove(1).unwrap();
        assert_eq!(set.active(), 0);
        assert_eq!(set.entries()[1].request_id.as_str(), "24050101");
        assert_eq!(set.entries()[1].file.file_key, "k2");

        let mut set = set_with(3);
        set.switch_to(2);
        set.remove(0).unwrap();
        assert_eq!(set.active(), 1);

        let mut set = set_with(3);
        set.switch_to(0);
        set.remove(2).unwrap();
        assert_eq!(set.active(), 0);
    }

    #[test]
    fn full_recording_clears_partial_range() {
        let mut set = set_with(1);
        set.update(0, TabField::PartialRange, "00:00:00 - 00:10:00");
        assert_eq!(set.entries()[0].partial_range, "");
        set.update(0, TabField::RecordingType, "부분");
        set.update(0, TabField::PartialRange, "00:00:00 - 00:10:00");
        assert_eq!(set.entries()[0].partial_range, "00:00:00 - 00:10:00");
        set.update(0, TabField::RecordingType, "전체");
        assert_eq!(set.entries()[0].partial_range, "");
        assert!(!set.entries()[0].partial_range_enabled());
    }

    #[test]
    fn speaker_count_must_be_positive() {
        let mut set = set_with(1);
        set.update(0, TabField::SpeakerCount, "3");
        set.update(0, TabField::SpeakerCount, "0");
        set.update(0, TabField::SpeakerCount, "x");
        assert_eq!(set.entries()[0].speaker_count, 3);
    }

    #[test]
    fn settings_payload() {
        let mut set = set_with(1);
        set.update(0, TabField::RecordingDate, "2024-05-01T14:30");
        let settings = set.settings();
        let json = serde_json::to_value(&settings[0]).unwrap();
        assert_eq!(json["recording_type"], "전체");
        assert_eq!(json["recording_date"], "2024-05-01T14:30");
        assert_eq!(json["file_key"], "k0");
        assert_eq!(json["file_size"], 100);

        set.update(0, TabField::RecordingDate, "not a date");
        assert_eq!(set.settings()[0].recording_date, None);
    }

    #[test]
    fn clear_returns_every_key() {
        let mut set = set_with(2);
        assert_eq!(set.clear(), vec!["k0", "k1"]);
        assert!(set.is_empty());
    }

    #[test]
    fn tab_geometry() {
        assert_eq!(tab_width(1), 250);
        assert_eq!(tab_width(4), 196);
        assert_eq!(tab_width(20), 100);
        assert_eq!(tab_label("short.mp3", 250), "short.mp3");
        assert_eq!(tab_label("a_very_long_recording_name_2024.mp3", 100), "a_very_lo...");
    }
}
