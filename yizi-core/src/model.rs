//! Character records as stored in the remote table

use serde::{Deserialize, Serialize};

use crate::radicals;

/// Shown in place of a radical when a record has none
pub const NO_RADICAL: &str = "無";

const EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// One row of the remote `characters` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: i64,
    /// Chapter (篇) the character belongs to
    pub chapter: i32,
    /// Serial number (序號) within the series
    pub serial: i32,
    #[serde(rename = "character")]
    pub glyph: String,
    #[serde(rename = "radical", default)]
    pub radical_number: Option<i32>,
    pub video_url: String,
}

impl CharacterRecord {
    /// Radical label for display: "64 手", "64" for an unknown number, or "無"
    pub fn radical_label(&self) -> String {
        match self.radical_number {
            Some(number) => match u8::try_from(number).ok().and_then(radicals::by_number) {
                Some(entry) => format!("{} {}", number, entry.glyph),
                None => number.to_string(),
            },
            None => NO_RADICAL.to_string(),
        }
    }

    /// The metadata line shown under the glyph
    pub fn metadata_line(&self) -> String {
        format!(
            "章節：{} | 序號：{} | 部首：{}",
            self.chapter,
            self.serial,
            self.radical_label()
        )
    }

    /// Video id taken from the `v=` parameter of `video_url`
    pub fn video_id(&self) -> Option<&str> {
        video_id(&self.video_url)
    }

    /// Embeddable player URL, when the video URL carries a `v=` marker
    pub fn embed_url(&self) -> Option<String> {
        self.video_id().map(|id| format!("{}{}", EMBED_BASE, id))
    }
}

/// Extract the text after the first `v=` up to the next `&`.
///
/// The URL is not otherwise validated.
pub fn video_id(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("v=")?;
    let id = rest.split('&').next().unwrap_or(rest);
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
