use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::FragmentError;

// The live site spells the block and address classes "porfolio" / "adress".
static COMPANY_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("section.porfolio_company, section.portfolio_company").unwrap());

/// Sub-elements of a company block, addressed by their CSS selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Headline,
    Description,
    Branch,
    Address,
    Website,
    PortfolioLink,
    InPortfolio,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Headline => "company_headline",
            Field::Description => "company_description",
            Field::Branch => "subinfo_branch",
            Field::Address => "subinfo_address",
            Field::Website => "subinfo_website",
            Field::PortfolioLink => "portfolio_finder_link_portfolio",
            Field::InPortfolio => "subinfo_inportfolio",
        }
    }

    fn selector(self) -> &'static Selector {
        static HEADLINE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2.company_headline").unwrap());
        static DESCRIPTION: LazyLock<Selector> =
            LazyLock::new(|| Selector::parse("div.company_description").unwrap());
        static BRANCH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.subinfo_branch").unwrap());
        static ADDRESS: LazyLock<Selector> =
            LazyLock::new(|| Selector::parse("div.subinfo_adress, div.subinfo_address").unwrap());
        static WEBSITE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.subinfo_website").unwrap());
        static LINK: LazyLock<Selector> =
            LazyLock::new(|| Selector::parse("a.portfolio_finder_link_portfolio").unwrap());
        static IN_PORTFOLIO: LazyLock<Selector> =
            LazyLock::new(|| Selector::parse("div.subinfo_inportfolio").unwrap());

        match self {
            Field::Headline => &*HEADLINE,
            Field::Description => &*DESCRIPTION,
            Field::Branch => &*BRANCH,
            Field::Address => &*ADDRESS,
            Field::Website => &*WEBSITE,
            Field::PortfolioLink => &*LINK,
            Field::InPortfolio => &*IN_PORTFOLIO,
        }
    }
}

/// All company blocks of a page, in document order.
pub fn company_blocks(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.select(&COMPANY_BLOCK).collect()
}

/// First matching descendant of a company block.
pub fn find(block: ElementRef<'_>, field: Field) -> Result<ElementRef<'_>, FragmentError> {
    block
        .select(field.selector())
        .next()
        .ok_or(FragmentError::MissingElement(field.name()))
}

/// Concatenated text of the first matching descendant, untrimmed.
pub fn text_of(block: ElementRef<'_>, field: Field) -> Result<String, FragmentError> {
    Ok(find(block, field)?.text().collect())
}

/// `href` of the first matching descendant, trimmed.
pub fn href_of(block: ElementRef<'_>, field: Field) -> Result<String, FragmentError> {
    find(block, field)?
        .value()
        .attr("href")
        .map(|h| h.trim().to_string())
        .ok_or(FragmentError::MissingElement(field.name()))
}

/// Reject empty values for fields every record must carry.
pub fn required(value: String, field: &'static str) -> Result<String, FragmentError> {
    if value.is_empty() {
        Err(FragmentError::EmptyField(field))
    } else {
        Ok(value)
    }
}
