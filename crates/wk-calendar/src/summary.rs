//! Localized summary text for calendar events.

use wk_core::{BlockerSummary, EventSummary, SummaryLocale};

/// Render `summary` as a one-line event title.
#[must_use]
pub fn render_summary(summary: &EventSummary, locale: SummaryLocale) -> String {
    match locale {
        SummaryLocale::Ja => render_ja(summary),
        SummaryLocale::En => render_en(summary),
    }
}

fn render_ja(summary: &EventSummary) -> String {
    match summary {
        EventSummary::Blockers(BlockerSummary::Both { radicals, kanji }) => {
            format!("部首: {radicals} 漢字: {kanji}")
        }
        EventSummary::Blockers(BlockerSummary::Radicals { radicals }) => format!("部首: {radicals}"),
        EventSummary::Blockers(BlockerSummary::Kanji { kanji }) => format!("漢字: {kanji}"),
        EventSummary::Reviews { count } => format!("復習 {count}"),
    }
}

fn render_en(summary: &EventSummary) -> String {
    match summary {
        EventSummary::Blockers(BlockerSummary::Both { radicals, kanji }) => {
            format!("{}, {kanji} kanji", plural(*radicals, "radical"))
        }
        EventSummary::Blockers(BlockerSummary::Radicals { radicals }) => plural(*radicals, "radical"),
        EventSummary::Blockers(BlockerSummary::Kanji { kanji }) => format!("{kanji} kanji"),
        EventSummary::Reviews { count } => plural(*count, "review"),
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
