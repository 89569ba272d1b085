//! RFC 5545 calendar output.
//!
//! Only the subset the two feeds need: one `VCALENDAR` holding `VEVENT`s with
//! a uid, stamp, summary and start, plus an optional end. Content lines end
//! in CRLF and fold at 75 octets without splitting a UTF-8 sequence.

use chrono::{DateTime, NaiveDate, Utc};
use wk_core::{CalendarEvent, EventTime, SummaryLocale};

use crate::summary::render_summary;

/// Media type for `.ics` responses.
pub const CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

const PROD_ID: &str = "-//wkcal//Review Calendar//EN";
const CRLF: &str = "\r\n";
const MAX_LINE_OCTETS: usize = 75;

/// Calendar-level properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMeta {
    pub prod_id: String,
    /// Display name, written as `X-WR-CALNAME`.
    pub name: String,
}

impl CalendarMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            prod_id: PROD_ID.to_string(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn blockers() -> Self {
        Self::new("WaniKani Blockers")
    }

    #[must_use]
    pub fn reviews() -> Self {
        Self::new("WaniKani Reviews")
    }
}

/// Serialize `events` into a complete calendar.
///
/// `stamp` becomes every event's `DTSTAMP`; pass a fixed value for
/// byte-stable output.
#[must_use]
pub fn write_calendar(
    meta: &CalendarMeta,
    events: &[CalendarEvent],
    locale: SummaryLocale,
    stamp: DateTime<Utc>,
) -> Vec<u8> {
    let mut out = IcsWriter::default();
    out.property("BEGIN", "VCALENDAR");
    out.property("VERSION", "2.0");
    out.property("PRODID", &escape_text(&meta.prod_id));
    out.property("CALSCALE", "GREGORIAN");
    out.property("X-WR-CALNAME", &escape_text(&meta.name));

    let stamp = format_instant(stamp);
    for event in events {
        out.property("BEGIN", "VEVENT");
        out.property("UID", &escape_text(&event.uid));
        out.property("DTSTAMP", &stamp);
        out.property(
            "SUMMARY",
            &escape_text(&render_summary(&event.summary, locale)),
        );
        out.time("DTSTART", event.start);
        if let Some(end) = event.end {
            out.time("DTEND", end);
        }
        out.property("END", "VEVENT");
    }

    out.property("END", "VCALENDAR");
    out.buf.into_bytes()
}

#[derive(Default)]
struct IcsWriter {
    buf: String,
}

impl IcsWriter {
    fn property(&mut self, name: &str, value: &str) {
        self.fold(&format!("{name}:{value}"));
    }

    fn time(&mut self, name: &str, time: EventTime) {
        match time {
            EventTime::Instant(at) => self.property(name, &format_instant(at)),
            EventTime::Date(date) => {
                self.fold(&format!("{name};VALUE=DATE:{}", format_date(date)));
            }
        }
    }

    /// Append one content line, folding onto continuation lines that start
    /// with a single space.
    fn fold(&mut self, line: &str) {
        let mut rest = line;
        let mut limit = MAX_LINE_OCTETS;
        while rest.len() > limit {
            let mut cut = limit;
            while !rest.is_char_boundary(cut) {
                cut -= 1;
            }
            self.buf.push_str(&rest[..cut]);
            self.buf.push_str(CRLF);
            self.buf.push(' ');
            rest = &rest[cut..];
            // the leading space counts toward the limit
            limit = MAX_LINE_OCTETS - 1;
        }
        self.buf.push_str(rest);
        self.buf.push_str(CRLF);
    }
}

fn format_instant(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%SZ").to_string()
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Escape a TEXT value.
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}
