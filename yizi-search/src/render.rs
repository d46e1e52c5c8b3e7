//! Plain-text and JSON rendering for the one-shot commands

use std::fmt::Write as _;

use serde::Serialize;

use yizi_core::radicals::RadicalEntry;
use yizi_core::{CharacterRecord, SearchView};

/// Info line for a query that matched nothing
pub const NO_MATCHES: &str = "沒有找到符合的字";

/// One record as printed by `--format text`
pub fn format_record(record: &CharacterRecord) -> String {
    let link = record
        .embed_url()
        .unwrap_or_else(|| record.video_url.clone());
    format!("{}\n  {}\n  {}\n", record.glyph, record.metadata_line(), link)
}

/// Text for a settled view; `None` for views that print nothing
pub fn format_view(view: &SearchView<'_>) -> Option<String> {
    match view {
        SearchView::Idle | SearchView::Loading => None,
        SearchView::Error(message) => Some(format!("錯誤：{}", message)),
        SearchView::NoMatches => Some(NO_MATCHES.to_string()),
        SearchView::Results(records) => {
            let mut output = String::new();
            for record in records.iter() {
                output.push_str(&format_record(record));
                output.push('\n');
            }
            Some(output.trim_end().to_string())
        }
    }
}

#[derive(Serialize)]
struct RecordJson<'a> {
    #[serde(flatten)]
    record: &'a CharacterRecord,
    radical_label: String,
    embed_url: Option<String>,
}

/// JSON array of records, with the derived display fields added
pub fn format_records_json(records: &[CharacterRecord]) -> serde_json::Result<String> {
    let rows: Vec<RecordJson<'_>> = records
        .iter()
        .map(|record| RecordJson {
            record,
            radical_label: record.radical_label(),
            embed_url: record.embed_url(),
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}

/// Radical table grouped by stroke count, one line per count
pub fn format_radicals(entries: &[RadicalEntry]) -> String {
    let mut output = String::new();
    let mut current: Option<u8> = None;
    for entry in entries {
        if current != Some(entry.stroke_count) {
            if current.is_some() {
                output.push('\n');
            }
            let _ = write!(output, "{:>2} 畫:", entry.stroke_count);
            current = Some(entry.stroke_count);
        }
        let _ = write!(output, " {} {}", entry.number, entry.glyph);
    }
    output
}
