//! Fixed catalogs and limits shared by the state machine and the UI.
use std::time::Duration;

use crate::Rgb;

pub const MAX_NEWS_MIN: u32 = 10;
pub const MAX_NEWS_MAX: u32 = 100;
pub const MAX_NEWS_STEP: u32 = 10;
pub const DEFAULT_MAX_NEWS: u32 = 50;

/// Rows requested when previewing a result file.
pub const PREVIEW_ROWS: u32 = 10;
/// Preview cells longer than this many characters are shortened.
pub const PREVIEW_CELL_LIMIT: usize = 50;
pub const KEYWORD_CHART_LIMIT: usize = 10;

/// Delay between consecutive files of a bulk download.
pub const BULK_DOWNLOAD_STAGGER: Duration = Duration::from_millis(1000);
/// How long confirmation notices stay visible.
pub const NOTICE_AUTO_DISMISS: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordPreset {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

pub const KEYWORD_PRESETS: &[KeywordPreset] = &[
    KeywordPreset {
        name: "Cosmetics",
        keywords: &[
            "코스맥스",
            "코스맥스엔비티",
            "콜마",
            "HK이노엔",
            "아모레퍼시픽",
            "LG생활건강",
            "올리브영",
            "화장품",
            "뷰티",
        ],
    },
    KeywordPreset {
        name: "Health supplements",
        keywords: &["건강기능식품", "펫푸드", "마이크로바이옴", "식품의약품안전처"],
    },
];

pub fn preset(name: &str) -> Option<&'static KeywordPreset> {
    KEYWORD_PRESETS.iter().find(|preset| preset.name == name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOption {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

pub const MODELS: &[ModelOption] = &[
    ModelOption {
        id: "gpt-3.5-turbo",
        label: "GPT-3.5 Turbo (recommended)",
        description: "Fast and cost efficient",
    },
    ModelOption {
        id: "gpt-4",
        label: "GPT-4",
        description: "Higher accuracy at a higher cost",
    },
    ModelOption {
        id: "claude-instant-1",
        label: "Claude Instant 1",
        description: "Quick responses with good quality",
    },
    ModelOption {
        id: "claude-2",
        label: "Claude 2",
        description: "High quality analysis and accuracy",
    },
];

pub fn model_option(id: &str) -> Option<&'static ModelOption> {
    MODELS.iter().find(|model| model.id == id)
}

/// Clamps to the slider range and rounds to the nearest step.
pub fn snap_max_news(value: u32) -> u32 {
    let clamped = value.clamp(MAX_NEWS_MIN, MAX_NEWS_MAX);
    let steps = (clamped + MAX_NEWS_STEP / 2) / MAX_NEWS_STEP;
    (steps * MAX_NEWS_STEP).clamp(MAX_NEWS_MIN, MAX_NEWS_MAX)
}

// Category labels are produced by the backend classifier.
const CATEGORY_COLORS: &[(&str, Rgb)] = &[
    ("자사 언급기사", Rgb(0x19, 0x76, 0xd2)),
    ("업계 관련기사", Rgb(0x38, 0x8e, 0x3c)),
    ("건강기능식품·펫푸드", Rgb(0xf5, 0x7c, 0x00)),
    ("기타", Rgb(0x75, 0x75, 0x75)),
];

const FALLBACK_CATEGORY_COLOR: Rgb = Rgb(0x75, 0x75, 0x75);

pub fn category_color(category: &str) -> Rgb {
    CATEGORY_COLORS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_CATEGORY_COLOR)
}
