pub mod address;
pub mod dates;

use scraper::ElementRef;

use super::filename::SourceName;
use super::fragments::{href_of, required, text_of, Field};
use crate::error::FragmentError;
use crate::record::{DateParts, Record};

const EXIT_MARKER: &str = "(Exit)";
const BRANCH_LABEL: &str = "Branche:";
const WEBSITE_LABEL: &str = "Webseite:";

/// Build one record from a company block. Any missing piece skips the block.
pub fn extract_fragment(block: ElementRef<'_>, source: &SourceName) -> Result<Record, FragmentError> {
    let raw_name = text_of(block, Field::Headline)?.trim().to_string();
    let name = required(raw_name.replace(EXIT_MARKER, "").trim().to_string(), "company_name")?;

    let description = text_of(block, Field::Description)?.replace('\n', " ").trim().to_string();
    let description = required(description, "company_description")?;

    let branch = text_of(block, Field::Branch)?.replace(BRANCH_LABEL, "").trim().to_string();
    let branch = required(branch, "company_branch")?;

    let address = required(address::normalize(&text_of(block, Field::Address)?), "company_address")?;
    let parts = address::split(&address);

    let website = text_of(block, Field::Website)?.replace(WEBSITE_LABEL, "").trim().to_string();
    let website = required(website, "company_url_website")?;
    let portfolio_url = required(href_of(block, Field::PortfolioLink)?, "company_url_htgf")?;

    let in_portfolio = required(text_of(block, Field::InPortfolio)?.trim().to_string(), "htgf_in_portfolio")?;
    let (investment_text, exit_text) = dates::split_period(&in_portfolio)?;
    let investment = DateParts::from_date(dates::parse_german_date(&investment_text, "investment")?);
    let exit = DateParts::from_optional(dates::parse_optional_date(&exit_text, "exit")?);

    Ok(Record {
        company_name: name,
        company_description: description,
        company_branch: branch,
        company_address: address,
        company_address_street: parts.street,
        company_address_zip: parts.zip,
        company_address_city: parts.city,
        company_url_website: website,
        company_url_htgf: portfolio_url,
        htgf_category: source.category.clone(),
        htgf_in_portfolio: in_portfolio,
        htgf_exit_likelihood: u8::from(raw_name.contains(EXIT_MARKER)),
        htgf_date_investment: investment.full,
        htgf_date_investment_year: investment.year,
        htgf_date_investment_month: investment.month,
        htgf_date_investment_day: investment.day,
        htgf_date_exit: exit.full,
        htgf_date_exit_year: exit.year,
        htgf_date_exit_month: exit.month,
        htgf_date_exit_day: exit.day,
        source_filename: source.filename.clone(),
        source_date: source.date.format("%Y-%m-%d").to_string(),
    })
}

// ── Tests ──
