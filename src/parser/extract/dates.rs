use chrono::NaiveDate;

use crate::error::FragmentError;

const OPEN_ENDED: &str = "seit";
const OPEN_ENDED_PREFIX: &str = "Im Portfolio seit";
const PREFIX: &str = "Im Portfolio";
const DASH: &str = "–";
/// Mis-decoded en dashes seen in saved pages.
const BROKEN_DASHES: &[&str] = &["\u{FFFD}", "â€“"];

/// German month abbreviations that differ from chrono's English ones.
const GERMAN_MONTHS: &[(&str, &str)] = &[("Dez", "Dec"), ("Mrz", "Mar"), ("Mai", "May"), ("Okt", "Oct")];

/// Investment and exit date text, unparsed. Exit is empty for open-ended
/// periods.
///
/// Split `Im Portfolio seit D` or `Im Portfolio D1 – D2`.
pub fn split_period(text: &str) -> Result<(String, String), FragmentError> {
    if text.contains(OPEN_ENDED) {
        let investment = text.replace(OPEN_ENDED_PREFIX, "").trim().to_string();
        return Ok((investment, String::new()));
    }

    let normalized = BROKEN_DASHES
        .iter()
        .fold(text.to_string(), |acc, broken| acc.replace(broken, DASH));
    let mut sides = normalized.split(DASH);
    let start = sides.next().unwrap_or_default();
    let end = sides
        .next()
        .ok_or_else(|| FragmentError::MissingSeparator(text.to_string()))?;

    Ok((start.replace(PREFIX, "").trim().to_string(), end.trim().to_string()))
}

/// Parse `DD. Mon YYYY` with German or English month abbreviations. Any
/// whitespace (including `&nbsp;`) separates the parts.
pub fn parse_german_date(value: &str, field: &'static str) -> Result<NaiveDate, FragmentError> {
    let english = value
        .split_whitespace()
        .map(|token| {
            GERMAN_MONTHS
                .iter()
                .find(|(de, _)| *de == token)
                .map_or(token, |(_, en)| *en)
        })
        .collect::<Vec<_>>()
        .join(" ");

    NaiveDate::parse_from_str(&english, "%d. %b %Y").map_err(|_| FragmentError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Parse the exit date unless it is empty.
pub fn parse_optional_date(value: &str, field: &'static str) -> Result<Option<NaiveDate>, FragmentError> {
    if value.is_empty() {
        Ok(None)
    } else {
        parse_german_date(value, field).map(Some)
    }
}
