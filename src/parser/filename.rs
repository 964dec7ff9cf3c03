use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::PageError;

static SOURCE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^_]+_([^_]+)_([^_]+)_(\d{4}-\d{2}-\d{2})(?:\..*)?$").unwrap()
});

/// File-level fields shared by every record of one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceName {
    pub filename: String,
    pub category: String,
    pub date: NaiveDate,
}

/// Parse `prefix_CATEGORY_NUMBER_YYYY-MM-DD[.ext]`.
pub fn parse_source_name(filename: &str) -> Result<SourceName, PageError> {
    let invalid = || PageError::Filename(filename.to_string());
    let caps = SOURCE_NAME_RE.captures(filename).ok_or_else(invalid)?;
    let date = NaiveDate::parse_from_str(&caps[3], "%Y-%m-%d").map_err(|_| invalid())?;

    Ok(SourceName {
        filename: filename.to_string(),
        category: caps[1].to_string(),
        date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_and_date() {
        let s = parse_source_name("htgf_software_007_2020-06-01.html").unwrap();
        assert_eq!(s.category, "software");
        assert_eq!(s.date.format("%Y-%m-%d").to_string(), "2020-06-01");
        assert_eq!(s.filename, "htgf_software_007_2020-06-01.html");
    }

    #[test]
    fn extension_is_optional() {
        let s = parse_source_name("htgf_life-sciences_12_2019-11-30").unwrap();
        assert_eq!(s.category, "life-sciences");
        assert_eq!(s.date, NaiveDate::from_ymd_opt(2019, 11, 30).unwrap());
    }

    #[test]
    fn rejects_wrong_shapes() {
        for name in [
            "htgf_portfolio_output.csv",
            "portfolio.html",
            "htgf_software_2020-06-01.html",
            "htgf_software_007_2020-06-01_extra.html",
            "htgf_software_007_2020-13-01.html",
            "htgf__007_2020-06-01.html",
        ] {
            assert_eq!(
                parse_source_name(name),
                Err(PageError::Filename(name.to_string())),
                "{} should be rejected",
                name
            );
        }
    }
}
