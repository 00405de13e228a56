//! Forecast rendering
//!
//! Turns a fetch outcome into display-ready entries: a summary line plus one
//! entry per day. Entries hold plain text; free text from the remote service
//! is HTML-escaped by `to_html` as the markup is produced.

use chrono::NaiveDate;

use crate::data::{FetchFailure, ForecastDay, ForecastPayload, Range};

/// Summary line shown when no forecast could be obtained
pub const SUMMARY_UNAVAILABLE: &str = "Weather unavailable";

/// Single list entry shown when no forecast could be obtained
pub const FORECAST_UNAVAILABLE: &str = "Forecast unavailable";

/// Rendered in place of any missing number
pub const PLACEHOLDER: &str = "—";

/// Capabilities the widget needs from whatever is displaying it
pub trait ForecastView: Send {
    fn set_summary(&mut self, text: &str);

    /// Replaces the list contents
    fn set_entries(&mut self, entries: Vec<RenderedEntry>);

    fn set_refresh_label(&mut self, label: &str);

    fn show(&mut self, view: RenderedView) {
        self.set_summary(&view.summary);
        self.set_entries(view.entries);
    }
}

/// One day's display fields, as plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEntry {
    /// Short weekday and date, e.g. "Wed, 1 May"
    pub label: String,
    pub summary: String,
    pub temperature: String,
    pub wind: String,
    pub humidity: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedEntry {
    Day(DayEntry),
    Unavailable(String),
}

impl RenderedEntry {
    pub fn to_html(&self) -> String {
        match self {
            RenderedEntry::Day(day) => format!(
                "<li class=\"forecast-day\">\
                 <span class=\"day-label\">{}</span>\
                 <span class=\"day-summary\">{}</span>\
                 <span class=\"day-temp\">{}</span>\
                 <span class=\"day-wind\">{}</span>\
                 <span class=\"day-humidity\">{}</span>\
                 </li>",
                escape_html(&day.label),
                escape_html(&day.summary),
                escape_html(&day.temperature),
                escape_html(&day.wind),
                escape_html(&day.humidity)
            ),
            RenderedEntry::Unavailable(text) => format!(
                "<li class=\"forecast-day unavailable\">{}</li>",
                escape_html(text)
            ),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            RenderedEntry::Day(day) => format!(
                "{:<12} {:<28} {:<14} {:<16} {}",
                day.label, day.summary, day.temperature, day.wind, day.humidity
            ),
            RenderedEntry::Unavailable(text) => text.clone(),
        }
    }
}

/// Summary line plus list entries, ready to hand to a `ForecastView`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub summary: String,
    pub entries: Vec<RenderedEntry>,
}

impl RenderedView {
    pub fn to_html(&self) -> String {
        let items: String = self.entries.iter().map(RenderedEntry::to_html).collect();
        format!(
            "<p id=\"weather-summary\">{}</p>\n<ul id=\"forecast-list\">{}</ul>",
            escape_html(&self.summary),
            items
        )
    }

    pub fn to_text(&self) -> String {
        let mut out = self.summary.clone();
        for entry in &self.entries {
            out.push('\n');
            out.push_str(&entry.to_text());
        }
        out
    }
}

/// Renders a fetch outcome
///
/// A failure yields the "unavailable" summary and a single placeholder entry.
/// A payload yields a summary built from the first day and one entry per day.
pub fn render(outcome: &Result<ForecastPayload, FetchFailure>) -> RenderedView {
    match outcome {
        Ok(payload) => render_payload(payload),
        Err(_) => render_unavailable(),
    }
}

pub fn render_unavailable() -> RenderedView {
    RenderedView {
        summary: SUMMARY_UNAVAILABLE.to_string(),
        entries: vec![RenderedEntry::Unavailable(FORECAST_UNAVAILABLE.to_string())],
    }
}

pub fn render_payload(payload: &ForecastPayload) -> RenderedView {
    let Some(today) = payload.today() else {
        return render_unavailable();
    };

    let temperature = today.temperature();
    let summary = format!(
        "{} • {}°C–{}°C",
        today.summary,
        format_number(temperature.low),
        format_number(temperature.high)
    );

    RenderedView {
        summary,
        entries: payload
            .forecasts
            .iter()
            .map(|day| RenderedEntry::Day(render_day(day)))
            .collect(),
    }
}

pub fn render_day(day: &ForecastDay) -> DayEntry {
    let wind_direction = day.wind_direction().unwrap_or(PLACEHOLDER);

    DayEntry {
        label: day_label(day.date),
        summary: day.summary.clone(),
        temperature: format_range(day.temperature(), "°C", " — "),
        wind: format!("{} km/h {}", format_bare_range(day.wind_speed()), wind_direction),
        humidity: format_range(day.relative_humidity(), "%", "–"),
    }
}

/// Short weekday and date, e.g. "Wed, 1 May"
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a, %-d %b").to_string()
}

/// Escapes text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Formats both bounds with the unit attached to each present value
fn format_range(range: Range, unit: &str, separator: &str) -> String {
    let with_unit = |v: Option<f64>| match v {
        Some(v) if v.is_finite() => format!("{}{}", v, unit),
        _ => PLACEHOLDER.to_string(),
    };
    format!("{}{}{}", with_unit(range.low), separator, with_unit(range.high))
}

fn format_bare_range(range: Range) -> String {
    format!("{}–{}", format_number(range.low), format_number(range.high))
}
