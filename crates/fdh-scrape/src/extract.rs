//! Field extraction from rendered HTML
//!
//! Pure functions from markup to records. Extraction never fails on
//! malformed input: absent nodes degrade to empty strings and empty
//! sequences.

use crate::records::{
    BranchInformation, DetailRecord, Experience, Location, ProfileRecord,
};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

// ============================================================================
// Listing Selectors
// ============================================================================

static RESULT_NODE: LazyLock<Selector> = LazyLock::new(|| selector("#fcSearchResult"));
static DISPLAY_NAME: LazyLock<Selector> = LazyLock::new(|| selector("#fcDisplayName"));
static JOB_TITLE: LazyLock<Selector> = LazyLock::new(|| selector("#fcJobTitle"));
static DESIGNATION: LazyLock<Selector> = LazyLock::new(|| selector("#fcDesignation"));
static MAP_SPAN: LazyLock<Selector> = LazyLock::new(|| selector(".mapSpan"));
static TEL_SPAN: LazyLock<Selector> = LazyLock::new(|| selector(".telSpan"));

// ============================================================================
// Detail Selectors
// ============================================================================

static CREDENTIALS: LazyLock<Selector> =
    LazyLock::new(|| selector("#_Financial_credentials > div > div > div > div > ul > li"));
static EXPERIENCE_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| selector("#_Experience > div > div > div > div"));
static EXPERIENCE_POSITIONS: LazyLock<Selector> =
    LazyLock::new(|| selector("#_Experience > div > div > div > div ul > li"));
static EDUCATION: LazyLock<Selector> =
    LazyLock::new(|| selector("#_Education > div > div > div > div > ul > li"));
static BRANCH_BODY: LazyLock<Selector> =
    LazyLock::new(|| selector("#_Branch_information-body > div > div"));
static BRANCH_LINK: LazyLock<Selector> = LazyLock::new(|| selector("#_Branch_information"));

/// The profile link encodes the identity as a single-quoted argument, e.g.
/// `javascript:openProfile('Abc123')`.
static ID_IN_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^']+)'").expect("id pattern is valid"));

static EXPERIENCE_YEARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+) years of professional experience").expect("years pattern is valid")
});

static COMMA_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*").expect("comma pattern is valid"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("selector is valid CSS")
}

/// Collapse whitespace runs to single spaces and trim.
fn collapse_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trimmed text content of the first match under `node`, or empty.
fn text_of(node: ElementRef<'_>, sel: &Selector) -> String {
    node.select(sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Extract all profile records from a rendered listing page.
///
/// Output order follows document order. A page with no result nodes yields
/// an empty vector, which the list orchestrator treats as the termination
/// signal for its shard.
pub fn extract_profiles(html: &str) -> Vec<ProfileRecord> {
    let document = Html::parse_document(html);
    document
        .select(&RESULT_NODE)
        .map(extract_profile)
        .collect()
}

fn extract_profile(node: ElementRef<'_>) -> ProfileRecord {
    let name_el = node.select(&DISPLAY_NAME).next();
    let name = name_el
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();
    let id = name_el
        .and_then(|el| el.value().attr("href"))
        .and_then(|href| ID_IN_HREF.captures(href))
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();

    let locations = node
        .select(&MAP_SPAN)
        .map(|el| parse_address(&el.text().collect::<String>()))
        .collect();

    let phone_numbers = node
        .select(&TEL_SPAN)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect();

    ProfileRecord {
        id,
        name,
        title: text_of(node, &JOB_TITLE),
        designation: text_of(node, &DESIGNATION),
        locations,
        phone_numbers,
    }
}

/// Split a raw address blob into branch / address / city / state / zip.
///
/// Positional heuristic, applied after whitespace collapsing:
/// 1. split on `.`: first segment is the branch, the remainder (rejoined
///    on `.`) is the address body;
/// 2. split the body on commas into parts:
///    - 3+ parts: address, city, then state and zip from the third part
///      (last whitespace token is the zip, the rest is the state);
///    - 2 parts: address, then city/state/zip positionally from the second;
///    - 1 part: address/city/state/zip positionally from the whole body.
///
/// The heuristic is ambiguous for addresses with embedded commas or
/// multi-word cities in the 2-part branch; it reproduces the established
/// extraction behavior and is deliberately not made stricter.
pub fn parse_address(raw: &str) -> Location {
    let full = collapse_ws(raw);
    let mut segments = full.splitn(2, '.');
    let branch = segments.next().unwrap_or_default().trim().to_string();
    let body = segments.next().unwrap_or_default().trim();

    let parts: Vec<&str> = COMMA_SPLIT.split(body).collect();

    let own = |s: &&str| -> Option<String> {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };

    let (address, city, state, zip) = if parts.len() >= 3 {
        let tokens: Vec<&str> = parts[2].split_whitespace().collect();
        let zip = tokens.last().map(|t| t.to_string());
        let state = match tokens.len() {
            0 | 1 => None,
            n => Some(tokens[..n - 1].join(" ")),
        };
        (parts.first().and_then(own), parts.get(1).and_then(own), state, zip)
    } else if parts.len() == 2 {
        let tokens: Vec<&str> = parts[1].split_whitespace().collect();
        (
            parts.first().and_then(own),
            tokens.first().map(|t| t.to_string()),
            tokens.get(1).map(|t| t.to_string()),
            tokens.get(2).map(|t| t.to_string()),
        )
    } else {
        let tokens: Vec<&str> = body.split_whitespace().collect();
        (
            tokens.first().map(|t| t.to_string()),
            tokens.get(1).map(|t| t.to_string()),
            tokens.get(2).map(|t| t.to_string()),
            tokens.get(3).map(|t| t.to_string()),
        )
    };

    Location {
        branch,
        address,
        city,
        state,
        zip,
    }
}

/// Extract the secondary record from a rendered detail page.
///
/// A document missing any expected section yields empty/absent sub-fields,
/// never an error.
pub fn extract_detail(html: &str) -> DetailRecord {
    let document = Html::parse_document(html);

    let financial_credentials = document
        .select(&CREDENTIALS)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect();

    let experience_text = document
        .select(&EXPERIENCE_BLOCK)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default();
    let years = EXPERIENCE_YEARS
        .captures(&experience_text)
        .and_then(|caps| caps[1].parse().ok());
    let positions = document
        .select(&EXPERIENCE_POSITIONS)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect();

    let education = document
        .select(&EDUCATION)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect();

    let details = document
        .select(&BRANCH_BODY)
        .next()
        .map(|el| {
            el.text()
                .collect::<String>()
                .trim()
                .split('\n')
                .map(|line| line.trim().to_string())
                .collect()
        })
        .unwrap_or_default();
    let map_link = document
        .select(&BRANCH_LINK)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(str::to_string);

    DetailRecord {
        financial_credentials,
        experience: Experience { years, positions },
        education,
        branch_information: BranchInformation { details, map_link },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r##"
        <html><body>
        <div id="fcSearchResult">
            <a id="fcDisplayName" href="javascript:openProfile('Abc123')">Jane Doe</a>
            <span id="fcJobTitle">Financial Consultant</span>
            <span id="fcDesignation">CFP</span>
            <span class="mapSpan">Downtown Branch. 123 Main St, Springfield, IL 62701</span>
            <span class="telSpan">555-0100</span>
            <span class="telSpan">555-0101</span>
        </div>
        <div id="fcSearchResult">
            <a id="fcDisplayName">No Link</a>
        </div>
        </body></html>
    "##;

    #[test]
    fn test_extract_profiles_from_listing() {
        let profiles = extract_profiles(LISTING);
        assert_eq!(profiles.len(), 2);

        let first = &profiles[0];
        assert_eq!(first.id, "Abc123");
        assert_eq!(first.name, "Jane Doe");
        assert_eq!(first.title, "Financial Consultant");
        assert_eq!(first.designation, "CFP");
        assert_eq!(first.phone_numbers, vec!["555-0100", "555-0101"]);
        assert_eq!(first.locations.len(), 1);

        // Missing href degrades to an empty id, not a failure
        let second = &profiles[1];
        assert_eq!(second.id, "");
        assert_eq!(second.name, "No Link");
        assert!(second.locations.is_empty());
        assert!(second.phone_numbers.is_empty());
    }

    #[test]
    fn test_extract_profiles_empty_document() {
        assert!(extract_profiles("<html><body></body></html>").is_empty());
        assert!(extract_profiles("not html at all").is_empty());
    }

    #[test]
    fn test_parse_address_three_parts() {
        let loc = parse_address("Downtown Branch. 123 Main St, Springfield, IL 62701");
        assert_eq!(loc.branch, "Downtown Branch");
        assert_eq!(loc.address.as_deref(), Some("123 Main St"));
        assert_eq!(loc.city.as_deref(), Some("Springfield"));
        assert_eq!(loc.state.as_deref(), Some("IL"));
        assert_eq!(loc.zip.as_deref(), Some("62701"));
    }

    #[test]
    fn test_parse_address_multi_word_state() {
        let loc = parse_address("Main Office. 1 Center Plaza, Santa Fe, New Mexico 87501");
        assert_eq!(loc.state.as_deref(), Some("New Mexico"));
        assert_eq!(loc.zip.as_deref(), Some("87501"));
    }

    #[test]
    fn test_parse_address_two_parts() {
        let loc = parse_address("North Branch. 9 Elm Ave, Peoria IL 61601");
        assert_eq!(loc.branch, "North Branch");
        assert_eq!(loc.address.as_deref(), Some("9 Elm Ave"));
        assert_eq!(loc.city.as_deref(), Some("Peoria"));
        assert_eq!(loc.state.as_deref(), Some("IL"));
        assert_eq!(loc.zip.as_deref(), Some("61601"));
    }

    #[test]
    fn test_parse_address_one_part_positional() {
        let loc = parse_address("Branch. 10 Oak Rd");
        assert_eq!(loc.address.as_deref(), Some("10"));
        assert_eq!(loc.city.as_deref(), Some("Oak"));
        assert_eq!(loc.state.as_deref(), Some("Rd"));
        assert_eq!(loc.zip, None);
    }

    #[test]
    fn test_parse_address_collapses_whitespace() {
        let loc = parse_address("  Downtown   Branch.  123 Main St,\n Springfield,  IL 62701 ");
        assert_eq!(loc.branch, "Downtown Branch");
        assert_eq!(loc.city.as_deref(), Some("Springfield"));
    }

    #[test]
    fn test_parse_address_no_body() {
        let loc = parse_address("Branch only");
        assert_eq!(loc.branch, "Branch only");
        assert_eq!(loc.address, None);
        assert_eq!(loc.zip, None);
    }

    const DETAIL: &str = r##"
        <html><body>
        <div id="_Financial_credentials"><div><div><div><div>
            <ul><li>CFP</li><li>CFA</li></ul>
        </div></div></div></div></div>
        <div id="_Experience"><div><div><div><div>
            Jane has 12 years of professional experience.
            <ul><li>Advisor at Firm A</li><li>Analyst at Firm B</li></ul>
        </div></div></div></div></div>
        <div id="_Education"><div><div><div><div>
            <ul><li>B.S. Finance, State University</li></ul>
        </div></div></div></div></div>
        <a id="_Branch_information" href="https://maps.example/branch">Branch</a>
        <div id="_Branch_information-body"><div><div>Branch details:
123 Main St</div></div></div>
        </body></html>
    "##;

    #[test]
    fn test_extract_detail() {
        let detail = extract_detail(DETAIL);
        assert_eq!(detail.financial_credentials, vec!["CFP", "CFA"]);
        assert_eq!(detail.experience.years, Some(12));
        assert_eq!(
            detail.experience.positions,
            vec!["Advisor at Firm A", "Analyst at Firm B"]
        );
        assert_eq!(detail.education, vec!["B.S. Finance, State University"]);
        assert_eq!(
            detail.branch_information.details,
            vec!["Branch details:", "123 Main St"]
        );
        assert_eq!(
            detail.branch_information.map_link.as_deref(),
            Some("https://maps.example/branch")
        );
    }

    #[test]
    fn test_extract_detail_missing_sections_degrade() {
        let detail = extract_detail("<html><body><p>nothing here</p></body></html>");
        assert!(detail.financial_credentials.is_empty());
        assert_eq!(detail.experience.years, None);
        assert!(detail.experience.positions.is_empty());
        assert!(detail.education.is_empty());
        assert!(detail.branch_information.details.is_empty());
        assert_eq!(detail.branch_information.map_link, None);
    }
}
