use crate::{category_color, FileStats, Rgb, KEYWORD_CHART_LIMIT};

const RELEVANT_COLOR: Rgb = Rgb(0x4c, 0xaf, 0x50);
const NOT_RELEVANT_COLOR: Rgb = Rgb(0xf4, 0x43, 0x36);
const KEYWORD_COLOR: Rgb = Rgb(0x36, 0xa2, 0xeb);

/// One bar of a summary chart. `fraction` is the bar length in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub count: u64,
    pub fraction: f32,
    pub color: Rgb,
}

/// Share of each category among all categorized articles.
pub fn category_chart(stats: &FileStats) -> Vec<ChartBar> {
    let total: u64 = stats.category_counts.values().sum();
    stats
        .category_counts
        .iter()
        .map(|(category, &count)| ChartBar {
            label: category.clone(),
            count,
            fraction: ratio(count, total),
            color: category_color(category),
        })
        .collect()
}

/// Relevant versus not relevant articles; `None` for files never evaluated.
pub fn relevance_chart(stats: &FileStats) -> Option<Vec<ChartBar>> {
    let relevant = stats.relevant_count?;
    let total = stats.total_rows.max(relevant);
    let not_relevant = total - relevant;
    Some(vec![
        ChartBar {
            label: "Relevant".to_string(),
            count: relevant,
            fraction: ratio(relevant, total),
            color: RELEVANT_COLOR,
        },
        ChartBar {
            label: "Not relevant".to_string(),
            count: not_relevant,
            fraction: ratio(not_relevant, total),
            color: NOT_RELEVANT_COLOR,
        },
    ])
}

/// Most frequent keywords, largest first, scaled against the top keyword.
pub fn keyword_chart(stats: &FileStats) -> Vec<ChartBar> {
    let mut entries: Vec<(&String, u64)> = stats
        .keyword_counts
        .iter()
        .map(|(keyword, &count)| (keyword, count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries.truncate(KEYWORD_CHART_LIMIT);

    let max = entries.first().map(|(_, count)| *count).unwrap_or(0);
    entries
        .into_iter()
        .map(|(keyword, count)| ChartBar {
            label: keyword.clone(),
            count,
            fraction: ratio(count, max),
            color: KEYWORD_COLOR,
        })
        .collect()
}

/// Shortens `text` to `max_chars` characters, appending `...` when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

fn ratio(part: u64, whole: u64) -> f32 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) as f32
    }
}
