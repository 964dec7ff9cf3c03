use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Output column order. Field order of `Record` must match.
pub const HEADER: [&str; 22] = [
    "company_name",
    "company_description",
    "company_branch",
    "company_address",
    "company_address_street",
    "company_address_zip",
    "company_address_city",
    "company_url_website",
    "company_url_htgf",
    "htgf_category",
    "htgf_in_portfolio",
    "htgf_exit_likelihood",
    "htgf_date_investment",
    "htgf_date_investment_year",
    "htgf_date_investment_month",
    "htgf_date_investment_day",
    "htgf_date_exit",
    "htgf_date_exit_year",
    "htgf_date_exit_month",
    "htgf_date_exit_day",
    "source_filename",
    "source_date",
];

/// One company entry of the portfolio, flattened to text columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub company_name: String,
    pub company_description: String,
    pub company_branch: String,
    pub company_address: String,
    pub company_address_street: String,
    pub company_address_zip: String,
    pub company_address_city: String,
    pub company_url_website: String,
    pub company_url_htgf: String,
    pub htgf_category: String,
    pub htgf_in_portfolio: String,
    pub htgf_exit_likelihood: u8,
    pub htgf_date_investment: String,
    pub htgf_date_investment_year: String,
    pub htgf_date_investment_month: String,
    pub htgf_date_investment_day: String,
    pub htgf_date_exit: String,
    pub htgf_date_exit_year: String,
    pub htgf_date_exit_month: String,
    pub htgf_date_exit_day: String,
    pub source_filename: String,
    pub source_date: String,
}

/// `YYYY-MM-DD` plus its three components, or four empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateParts {
    pub full: String,
    pub year: String,
    pub month: String,
    pub day: String,
}

impl DateParts {
    pub fn from_date(date: NaiveDate) -> Self {
        DateParts {
            full: date.format("%Y-%m-%d").to_string(),
            year: format!("{:04}", date.year()),
            month: format!("{:02}", date.month()),
            day: format!("{:02}", date.day()),
        }
    }

    pub fn from_optional(date: Option<NaiveDate>) -> Self {
        date.map(Self::from_date).unwrap_or_default()
    }
}
