pub mod decode;
pub mod extract;
pub mod filename;
pub mod fragments;

use scraper::Html;
use serde::Serialize;
use tracing::debug;

use crate::error::{FragmentError, PageError};
use crate::record::Record;

/// Records of one page plus the blocks that were skipped.
#[derive(Debug, Default, Serialize)]
pub struct PageExtraction {
    pub fragments: usize,
    pub records: Vec<Record>,
    #[serde(serialize_with = "serialize_skips")]
    pub skipped: Vec<FragmentError>,
}

/// Filename → decode → DOM → company blocks → records, in document order.
pub fn extract_page(content: &[u8], filename: &str) -> Result<PageExtraction, PageError> {
    let source = filename::parse_source_name(filename)?;
    let text = decode::decode_page(content)?;
    let doc = Html::parse_document(&text);

    let mut page = PageExtraction::default();
    for (idx, block) in fragments::company_blocks(&doc).into_iter().enumerate() {
        page.fragments += 1;
        match extract::extract_fragment(block, &source) {
            Ok(record) => page.records.push(record),
            Err(e) => {
                debug!("{}: skipping company block #{}: {}", filename, idx + 1, e);
                page.skipped.push(e);
            }
        }
    }
    Ok(page)
}

fn serialize_skips<S: serde::Serializer>(skips: &[FragmentError], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(skips.iter().map(|e| e.to_string()))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "htgf_software_007_2020-06-01.html";

    fn fixture(name: &str) -> Vec<u8> {
        std::fs::read(format!("tests/fixtures/{}", name)).unwrap()
    }

    #[test]
    fn software_page() {
        let page = extract_page(&fixture(FIXTURE), FIXTURE).unwrap();
        assert_eq!(page.fragments, 4);
        assert_eq!(page.records.len(), 3);
        assert_eq!(page.skipped, vec![FragmentError::MissingElement("portfolio_finder_link_portfolio")]);

        let names: Vec<&str> = page.records.iter().map(|r| r.company_name.as_str()).collect();
        assert_eq!(names, vec!["Acme Robotics GmbH", "Datenwerk GmbH", "Nordlicht Analytics UG"]);
        assert!(page.records.iter().all(|r| r.htgf_category == "software"));
        assert!(page.records.iter().all(|r| r.source_date == "2020-06-01"));
    }

    #[test]
    fn software_page_field_values() {
        let page = extract_page(&fixture(FIXTURE), FIXTURE).unwrap();
        let acme = &page.records[0];
        assert_eq!(acme.company_address_street, "Robotikweg 12");
        assert_eq!(acme.company_address_zip, "52072");
        assert_eq!(acme.company_address_city, "Aachen");
        assert_eq!(acme.htgf_exit_likelihood, 0);
        assert_eq!(acme.htgf_date_investment, "2015-01-01");
        assert!(acme.htgf_date_exit.is_empty());

        let datenwerk = &page.records[1];
        assert_eq!(datenwerk.htgf_exit_likelihood, 1);
        assert_eq!(datenwerk.htgf_date_investment, "2012-03-15");
        assert_eq!(datenwerk.htgf_date_exit, "2018-10-20");
        assert_eq!(datenwerk.company_description, "Data integration for mid-sized manufacturers.");

        let nordlicht = &page.records[2];
        assert_eq!(nordlicht.company_address, "Gebäude 4<br>Am Campus 1<br>24118 Kiel");
        assert!(nordlicht.company_address_street.is_empty());
        assert_eq!(nordlicht.htgf_date_exit, "2016-12-31");
    }

    #[test]
    fn required_fields_and_exit_consistency() {
        let page = extract_page(&fixture(FIXTURE), FIXTURE).unwrap();
        for r in &page.records {
            for value in [
                &r.company_name,
                &r.company_description,
                &r.company_branch,
                &r.company_address,
                &r.company_url_website,
                &r.company_url_htgf,
                &r.htgf_category,
                &r.htgf_in_portfolio,
                &r.htgf_date_investment,
            ] {
                assert!(!value.is_empty(), "empty required field in {:?}", r);
            }
            let exit = [&r.htgf_date_exit, &r.htgf_date_exit_year, &r.htgf_date_exit_month, &r.htgf_date_exit_day];
            assert!(exit.iter().all(|v| v.is_empty()) || exit.iter().all(|v| !v.is_empty()));
        }
    }

    #[test]
    fn latin1_page_with_declared_charset() {
        let name = "htgf_hardware_002_2021-01-15.html";
        let page = extract_page(&fixture(name), name).unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].htgf_date_investment, "2011-05-01");
        assert_eq!(page.records[0].htgf_date_exit, "2016-12-31");
    }

    #[test]
    fn windows_1252_page_keeps_umlauts() {
        let name = "htgf_medtech_003_2019-03-01.html";
        let page = extract_page(&fixture(name), name).unwrap();
        assert_eq!(page.records.len(), 2);

        let krueger = &page.records[0];
        assert_eq!(krueger.company_name, "Krüger Medizintechnik GmbH");
        assert_eq!(krueger.company_description, "Sterile Einmalinstrumente für die Endoskopie.");
        assert_eq!(krueger.company_address, "Gebäude 4<br>24118 Kiel");
        assert!(krueger.company_address_street.is_empty());
        assert!(krueger.company_address_zip.is_empty());
        assert!(krueger.company_address_city.is_empty());
        assert_eq!(krueger.htgf_date_investment, "2015-12-01");

        let moewe = &page.records[1];
        assert_eq!(moewe.company_name, "Möwe Diagnostics UG");
        assert_eq!(moewe.company_address_street, "Holstentorplatz 2");
        assert_eq!(moewe.company_address_city, "Lübeck");
        assert_eq!(moewe.htgf_date_exit, "2019-03-31");
    }

    #[test]
    fn page_without_companies() {
        let page = extract_page(b"<html><body><p>Keine Treffer</p></body></html>", FIXTURE).unwrap();
        assert_eq!(page.fragments, 0);
        assert!(page.records.is_empty());
    }

    #[test]
    fn bad_filename_skips_the_page() {
        let err = extract_page(&fixture(FIXTURE), "portfolio.html").unwrap_err();
        assert_eq!(err, PageError::Filename("portfolio.html".into()));
    }

    #[test]
    fn undecodable_page() {
        assert_eq!(extract_page(b"", FIXTURE).unwrap_err(), PageError::Undecodable);
    }
}
