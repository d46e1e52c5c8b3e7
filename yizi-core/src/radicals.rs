//! The 214 Kangxi radicals
//!
//! Compiled-in lookup data: one entry per radical number, in Kangxi order.
//! Used to narrow radical choices by stroke count and to label a record's
//! radical number with its glyph.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// Number of Kangxi radicals
pub const RADICAL_COUNT: usize = 214;

/// A single Kangxi radical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RadicalEntry {
    /// The radical glyph, e.g. "手"
    pub glyph: &'static str,
    /// Kangxi radical number, 1..=214
    pub number: u8,
    /// Strokes in the radical glyph
    pub stroke_count: u8,
}

impl RadicalEntry {
    const fn new(glyph: &'static str, number: u8, stroke_count: u8) -> Self {
        Self {
            glyph,
            number,
            stroke_count,
        }
    }
}

/// All radicals, sorted by number
pub static RADICALS: [RadicalEntry; RADICAL_COUNT] = [
    RadicalEntry::new("一", 1, 1),
    RadicalEntry::new("丨", 2, 1),
    RadicalEntry::new("丶", 3, 1),
    RadicalEntry::new("丿", 4, 1),
    RadicalEntry::new("乙", 5, 1),
    RadicalEntry::new("亅", 6, 1),
    RadicalEntry::new("二", 7, 2),
    RadicalEntry::new("亠", 8, 2),
    RadicalEntry::new("人", 9, 2),
    RadicalEntry::new("儿", 10, 2),
    RadicalEntry::new("入", 11, 2),
    RadicalEntry::new("八", 12, 2),
    RadicalEntry::new("冂", 13, 2),
    RadicalEntry::new("冖", 14, 2),
    RadicalEntry::new("冫", 15, 2),
    RadicalEntry::new("几", 16, 2),
    RadicalEntry::new("凵", 17, 2),
    RadicalEntry::new("刀", 18, 2),
    RadicalEntry::new("力", 19, 2),
    RadicalEntry::new("勹", 20, 2),
    RadicalEntry::new("匕", 21, 2),
    RadicalEntry::new("匚", 22, 2),
    RadicalEntry::new("匸", 23, 2),
    RadicalEntry::new("十", 24, 2),
    RadicalEntry::new("卜", 25, 2),
    RadicalEntry::new("卩", 26, 2),
    RadicalEntry::new("厂", 27, 2),
    RadicalEntry::new("厶", 28, 2),
    RadicalEntry::new("又", 29, 2),
    RadicalEntry::new("口", 30, 3),
    RadicalEntry::new("囗", 31, 3),
    RadicalEntry::new("土", 32, 3),
    RadicalEntry::new("士", 33, 3),
    RadicalEntry::new("夂", 34, 3),
    RadicalEntry::new("夊", 35, 3),
    RadicalEntry::new("夕", 36, 3),
    RadicalEntry::new("大", 37, 3),
    RadicalEntry::new("女", 38, 3),
    RadicalEntry::new("子", 39, 3),
    RadicalEntry::new("宀", 40, 3),
    RadicalEntry::new("寸", 41, 3),
    RadicalEntry::new("小", 42, 3),
    RadicalEntry::new("尢", 43, 3),
    RadicalEntry::new("尸", 44, 3),
    RadicalEntry::new("屮", 45, 3),
    RadicalEntry::new("山", 46, 3),
    RadicalEntry::new("巛", 47, 3),
    RadicalEntry::new("工", 48, 3),
    RadicalEntry::new("己", 49, 3),
    RadicalEntry::new("巾", 50, 3),
    RadicalEntry::new("干", 51, 3),
    RadicalEntry::new("幺", 52, 3),
    RadicalEntry::new("广", 53, 3),
    RadicalEntry::new("廴", 54, 3),
    RadicalEntry::new("廾", 55, 3),
    RadicalEntry::new("弋", 56, 3),
    RadicalEntry::new("弓", 57, 3),
    RadicalEntry::new("彐", 58, 3),
    RadicalEntry::new("彡", 59, 3),
    RadicalEntry::new("彳", 60, 3),
    RadicalEntry::new("心", 61, 4),
    RadicalEntry::new("戈", 62, 4),
    RadicalEntry::new("戶", 63, 4),
    RadicalEntry::new("手", 64, 4),
    RadicalEntry::new("支", 65, 4),
    RadicalEntry::new("攴", 66, 4),
    RadicalEntry::new("文", 67, 4),
    RadicalEntry::new("斗", 68, 4),
    RadicalEntry::new("斤", 69, 4),
    RadicalEntry::new("方", 70, 4),
    RadicalEntry::new("无", 71, 4),
    RadicalEntry::new("日", 72, 4),
    RadicalEntry::new("曰", 73, 4),
    RadicalEntry::new("月", 74, 4),
    RadicalEntry::new("木", 75, 4),
    RadicalEntry::new("欠", 76, 4),
    RadicalEntry::new("止", 77, 4),
    RadicalEntry::new("歹", 78, 4),
    RadicalEntry::new("殳", 79, 4),
    RadicalEntry::new("毋", 80, 4),
    RadicalEntry::new("比", 81, 4),
    RadicalEntry::new("毛", 82, 4),
    RadicalEntry::new("氏", 83, 4),
    RadicalEntry::new("气", 84, 4),
    RadicalEntry::new("水", 85, 4),
    RadicalEntry::new("火", 86, 4),
    RadicalEntry::new("爪", 87, 4),
    RadicalEntry::new("父", 88, 4),
    RadicalEntry::new("爻", 89, 4),
    RadicalEntry::new("爿", 90, 4),
    RadicalEntry::new("片", 91, 4),
    RadicalEntry::new("牙", 92, 4),
    RadicalEntry::new("牛", 93, 4),
    RadicalEntry::new("犬", 94, 4),
    RadicalEntry::new("玄", 95, 5),
    RadicalEntry::new("玉", 96, 5),
    RadicalEntry::new("瓜", 97, 5),
    RadicalEntry::new("瓦", 98, 5),
    RadicalEntry::new("甘", 99, 5),
    RadicalEntry::new("生", 100, 5),
    RadicalEntry::new("用", 101, 5),
    RadicalEntry::new("田", 102, 5),
    RadicalEntry::new("疋", 103, 5),
    RadicalEntry::new("疒", 104, 5),
    RadicalEntry::new("癶", 105, 5),
    RadicalEntry::new("白", 106, 5),
    RadicalEntry::new("皮", 107, 5),
    RadicalEntry::new("皿", 108, 5),
    RadicalEntry::new("目", 109, 5),
    RadicalEntry::new("矛", 110, 5),
    RadicalEntry::new("矢", 111, 5),
    RadicalEntry::new("石", 112, 5),
    RadicalEntry::new("示", 113, 5),
    RadicalEntry::new("禸", 114, 5),
    RadicalEntry::new("禾", 115, 5),
    RadicalEntry::new("穴", 116, 5),
    RadicalEntry::new("立", 117, 5),
    RadicalEntry::new("竹", 118, 6),
    RadicalEntry::new("米", 119, 6),
    RadicalEntry::new("糸", 120, 6),
    RadicalEntry::new("缶", 121, 6),
    RadicalEntry::new("网", 122, 6),
    RadicalEntry::new("羊", 123, 6),
    RadicalEntry::new("羽", 124, 6),
    RadicalEntry::new("老", 125, 6),
    RadicalEntry::new("而", 126, 6),
    RadicalEntry::new("耒", 127, 6),
    RadicalEntry::new("耳", 128, 6),
    RadicalEntry::new("聿", 129, 6),
    RadicalEntry::new("肉", 130, 6),
    RadicalEntry::new("臣", 131, 6),
    RadicalEntry::new("自", 132, 6),
    RadicalEntry::new("至", 133, 6),
    RadicalEntry::new("臼", 134, 6),
    RadicalEntry::new("舌", 135, 6),
    RadicalEntry::new("舛", 136, 6),
    RadicalEntry::new("舟", 137, 6),
    RadicalEntry::new("艮", 138, 6),
    RadicalEntry::new("色", 139, 6),
    RadicalEntry::new("艸", 140, 6),
    RadicalEntry::new("虍", 141, 6),
    RadicalEntry::new("虫", 142, 6),
    RadicalEntry::new("血", 143, 6),
    RadicalEntry::new("行", 144, 6),
    RadicalEntry::new("衣", 145, 6),
    RadicalEntry::new("襾", 146, 6),
    RadicalEntry::new("見", 147, 7),
    RadicalEntry::new("角", 148, 7),
    RadicalEntry::new("言", 149, 7),
    RadicalEntry::new("谷", 150, 7),
    RadicalEntry::new("豆", 151, 7),
    RadicalEntry::new("豕", 152, 7),
    RadicalEntry::new("豸", 153, 7),
    RadicalEntry::new("貝", 154, 7),
    RadicalEntry::new("赤", 155, 7),
    RadicalEntry::new("走", 156, 7),
    RadicalEntry::new("足", 157, 7),
    RadicalEntry::new("身", 158, 7),
    RadicalEntry::new("車", 159, 7),
    RadicalEntry::new("辛", 160, 7),
    RadicalEntry::new("辰", 161, 7),
    RadicalEntry::new("辵", 162, 7),
    RadicalEntry::new("邑", 163, 7),
    RadicalEntry::new("酉", 164, 7),
    RadicalEntry::new("釆", 165, 7),
    RadicalEntry::new("里", 166, 7),
    RadicalEntry::new("金", 167, 8),
    RadicalEntry::new("長", 168, 8),
    RadicalEntry::new("門", 169, 8),
    RadicalEntry::new("阜", 170, 8),
    RadicalEntry::new("隶", 171, 8),
    RadicalEntry::new("隹", 172, 8),
    RadicalEntry::new("雨", 173, 8),
    RadicalEntry::new("靑", 174, 8),
    RadicalEntry::new("非", 175, 8),
    RadicalEntry::new("面", 176, 9),
    RadicalEntry::new("革", 177, 9),
    RadicalEntry::new("韋", 178, 9),
    RadicalEntry::new("韭", 179, 9),
    RadicalEntry::new("音", 180, 9),
    RadicalEntry::new("頁", 181, 9),
    RadicalEntry::new("風", 182, 9),
    RadicalEntry::new("飛", 183, 9),
    RadicalEntry::new("食", 184, 9),
    RadicalEntry::new("首", 185, 9),
    RadicalEntry::new("香", 186, 9),
    RadicalEntry::new("馬", 187, 10),
    RadicalEntry::new("骨", 188, 10),
    RadicalEntry::new("高", 189, 10),
    RadicalEntry::new("髟", 190, 10),
    RadicalEntry::new("鬥", 191, 10),
    RadicalEntry::new("鬯", 192, 10),
    RadicalEntry::new("鬲", 193, 10),
    RadicalEntry::new("鬼", 194, 10),
    RadicalEntry::new("魚", 195, 11),
    RadicalEntry::new("鳥", 196, 11),
    RadicalEntry::new("鹵", 197, 11),
    RadicalEntry::new("鹿", 198, 11),
    RadicalEntry::new("麥", 199, 11),
    RadicalEntry::new("麻", 200, 11),
    RadicalEntry::new("黃", 201, 12),
    RadicalEntry::new("黍", 202, 12),
    RadicalEntry::new("黑", 203, 12),
    RadicalEntry::new("黹", 204, 12),
    RadicalEntry::new("黽", 205, 13),
    RadicalEntry::new("鼎", 206, 13),
    RadicalEntry::new("鼓", 207, 13),
    RadicalEntry::new("鼠", 208, 13),
    RadicalEntry::new("鼻", 209, 14),
    RadicalEntry::new("齊", 210, 14),
    RadicalEntry::new("齒", 211, 15),
    RadicalEntry::new("龍", 212, 16),
    RadicalEntry::new("龜", 213, 16),
    RadicalEntry::new("龠", 214, 17),
];

static BY_GLYPH: Lazy<HashMap<&'static str, &'static RadicalEntry>> =
    Lazy::new(|| RADICALS.iter().map(|entry| (entry.glyph, entry)).collect());

/// Look up a radical by its Kangxi number
pub fn by_number(number: u8) -> Option<&'static RadicalEntry> {
    // Dense 1..=214, so the number doubles as an index
    let index = usize::from(number).checked_sub(1)?;
    RADICALS.get(index)
}

/// Look up a radical by its glyph
pub fn by_glyph(glyph: &str) -> Option<&'static RadicalEntry> {
    BY_GLYPH.get(glyph).copied()
}

/// Radicals written with exactly `stroke_count` strokes, in table order
pub fn by_stroke_count(stroke_count: u8) -> Vec<RadicalEntry> {
    RADICALS
        .iter()
        .filter(|entry| entry.stroke_count == stroke_count)
        .copied()
        .collect()
}

/// Distinct stroke counts present in the table, ascending
pub fn stroke_counts() -> Vec<u8> {
    let mut counts: Vec<u8> = RADICALS.iter().map(|entry| entry.stroke_count).collect();
    counts.dedup();
    counts
}

/// Resolve user input that names a radical, either by number ("64") or by glyph ("手")
pub fn resolve(input: &str) -> Option<&'static RadicalEntry> {
    let input = input.trim();
    match input.parse::<u8>() {
        Ok(number) => by_number(number),
        Err(_) => by_glyph(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_are_dense_and_sorted() {
        assert_eq!(RADICALS.len(), 214);
        for (idx, entry) in RADICALS.iter().enumerate() {
            assert_eq!(usize::from(entry.number), idx + 1);
        }
    }

    #[test]
    fn test_stroke_counts_never_decrease() {
        for pair in RADICALS.windows(2) {
            assert!(pair[0].stroke_count <= pair[1].stroke_count);
        }
        assert_eq!(stroke_counts(), (1..=17).collect::<Vec<u8>>());
    }

    #[test]
    fn test_lookup() {
        let hand = by_number(64).unwrap();
        assert_eq!(hand.glyph, "手");
        assert_eq!(hand.stroke_count, 4);
        assert_eq!(by_glyph("手"), Some(hand));
        assert_eq!(by_number(0), None);
        assert_eq!(by_number(215), None);
        assert_eq!(by_number(214).unwrap().glyph, "龠");
    }

    #[test]
    fn test_filter_by_stroke_count() {
        let four = by_stroke_count(4);
        assert_eq!(four.len(), 34);
        assert!(four.iter().all(|entry| entry.stroke_count == 4));
        assert!(four.iter().any(|entry| entry.number == 64));
        assert!(by_stroke_count(0).is_empty());
        assert!(by_stroke_count(18).is_empty());
    }

    #[test]
    fn test_resolve() {
        assert_eq!(resolve("64").map(|e| e.glyph), Some("手"));
        assert_eq!(resolve(" 水 ").map(|e| e.number), Some(85));
        assert_eq!(resolve("永"), None);
        assert_eq!(resolve("999"), None);
    }
}
