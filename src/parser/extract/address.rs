//! Address block normalisation and the street/zip/city heuristic.
//!
//! The raw block keeps its line structure as `<br>` markers. Splitting into
//! street, zip and city is a fixed heuristic tuned to the portfolio pages:
//! an ordered list of matchers, first match wins, no match leaves all three
//! parts empty.

pub const LINE_BREAK: &str = "<br>";

const LABEL: &str = "Adresse:";
const BLANK_LINE: &str = "<br><br>";
const LEGAL_ENTITY: &str = "GmbH";
const COUNTRY_PREFIXES: &[&str] = &["D-", "D -"];
/// Building and care-of annotations break the two-line layout.
const EXCLUSIONS: &[&str] = &["Building", "Gebäude", "c/o"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressParts {
    pub street: String,
    pub zip: String,
    pub city: String,
}

pub type Matcher = fn(&str) -> Option<AddressParts>;

/// Tried in order.
pub const MATCHERS: &[(&str, Matcher)] = &[
    ("legal_entity_restatement", legal_entity_restatement),
    ("two_line", two_line),
];

/// Turn the address element's text into the single-line `<br>` form.
pub fn normalize(text: &str) -> String {
    let joined = text
        .replace(LABEL, "")
        .replace('\t', "")
        .replace("\r\n", "\n")
        .replace('\n', LINE_BREAK);
    let start = joined.trim_start();
    let start = start.strip_prefix(LINE_BREAK).unwrap_or(start);
    start.replace("<br><br><br>", "").trim().to_string()
}

/// Street, zip and city of a normalised block, empty when no matcher applies.
pub fn split(block: &str) -> AddressParts {
    MATCHERS
        .iter()
        .find_map(|(_, matcher)| matcher(block))
        .unwrap_or_default()
}

/// `Company GmbH<br>Street 1<br>D-12345 City`: the first line restates the
/// company name. Drop it, strip country prefixes, then split as two lines.
pub fn legal_entity_restatement(block: &str) -> Option<AddressParts> {
    if block.contains(BLANK_LINE) || !block.contains(LEGAL_ENTITY) {
        return None;
    }
    let rest = block
        .split(LINE_BREAK)
        .skip(1)
        .map(strip_country_prefix)
        .collect::<Vec<_>>()
        .join(LINE_BREAK);
    two_line(&rest)
}

/// `Street 1<br>12345 City`. An empty street line still yields zip and city.
pub fn two_line(block: &str) -> Option<AddressParts> {
    if block.contains(BLANK_LINE)
        || block.contains(LEGAL_ENTITY)
        || !block.contains(LINE_BREAK)
        || EXCLUSIONS.iter().any(|token| block.contains(token))
    {
        return None;
    }

    let mut lines = block.split(LINE_BREAK);
    let street = lines.next()?.trim();
    let mut tokens = strip_country_prefix(lines.next()?).split_whitespace();
    let zip = tokens.next()?;

    Some(AddressParts {
        street: street.to_string(),
        zip: zip.to_string(),
        city: tokens.collect::<Vec<_>>().join(" "),
    })
}

fn strip_country_prefix(line: &str) -> &str {
    let trimmed = line.trim_start();
    COUNTRY_PREFIXES
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .unwrap_or(line)
}
