//! Per-site job page extractors.
//!
//! Each known job board gets a `SelectorExtractor` holding its CSS selectors in
//! priority order. Anything else goes through `GenericExtractor`, which tries
//! schema.org `JobPosting` JSON-LD and then any container named like a description.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

/// Job boards with known markup. `Generic` covers everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSite {
    LinkedIn,
    Indeed,
    Glassdoor,
    Greenhouse,
    Lever,
    Generic,
}

const SITE_DOMAINS: &[(JobSite, &[&str])] = &[
    (JobSite::LinkedIn, &["linkedin.com"]),
    (
        JobSite::Indeed,
        &[
            "indeed.com",
            "indeed.co.uk",
            "indeed.ca",
            "indeed.com.au",
            "indeed.co.in",
            "indeed.de",
            "indeed.fr",
        ],
    ),
    (
        JobSite::Glassdoor,
        &[
            "glassdoor.com",
            "glassdoor.co.uk",
            "glassdoor.ca",
            "glassdoor.co.in",
            "glassdoor.de",
        ],
    ),
    (JobSite::Greenhouse, &["greenhouse.io"]),
    (JobSite::Lever, &["lever.co"]),
];

impl JobSite {
    /// Identifies the job board from the URL host. Subdomains match their parent domain.
    pub fn from_url(url: &Url) -> Self {
        let Some(host) = url.host_str() else {
            return JobSite::Generic;
        };
        let host = host.to_ascii_lowercase();

        SITE_DOMAINS
            .iter()
            .find(|(_, domains)| domains.iter().any(|d| matches_domain(&host, d)))
            .map(|(site, _)| *site)
            .unwrap_or(JobSite::Generic)
    }
}

fn matches_domain(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Pulls the job description text out of a parsed page.
///
/// Returns `None` when the page doesn't contain the structure this extractor knows.
pub trait JobPageExtractor: Send + Sync {
    fn site(&self) -> JobSite;
    fn extract(&self, document: &Html) -> Option<String>;
}

/// Extractor driven by an ordered list of CSS selectors. The first selector
/// whose element has non-empty text wins.
pub struct SelectorExtractor {
    site: JobSite,
    selectors: &'static [&'static str],
}

impl JobPageExtractor for SelectorExtractor {
    fn site(&self) -> JobSite {
        self.site
    }

    fn extract(&self, document: &Html) -> Option<String> {
        self.selectors.iter().find_map(|raw| {
            let selector = Selector::parse(raw).ok()?;
            document
                .select(&selector)
                .map(element_text)
                .find(|text| !text.is_empty())
        })
    }
}

static LINKEDIN: SelectorExtractor = SelectorExtractor {
    site: JobSite::LinkedIn,
    selectors: &["div.show-more-less-html__markup", "div.description__text"],
};

static INDEED: SelectorExtractor = SelectorExtractor {
    site: JobSite::Indeed,
    selectors: &["div#jobDescriptionText"],
};

static GLASSDOOR: SelectorExtractor = SelectorExtractor {
    site: JobSite::Glassdoor,
    selectors: &[
        "div.jobDescriptionContent",
        r#"div[class*="JobDetails_jobDescription"]"#,
    ],
};

static GREENHOUSE: SelectorExtractor = SelectorExtractor {
    site: JobSite::Greenhouse,
    selectors: &["div#content", "div.job__description"],
};

static LEVER: SelectorExtractor = SelectorExtractor {
    site: JobSite::Lever,
    selectors: &[
        r#"div[data-qa="job-description"]"#,
        "div.section-wrapper.page-full-width",
    ],
};

pub static GENERIC: GenericExtractor = GenericExtractor;

/// Returns the dedicated extractor for a known site, or `None` for `JobSite::Generic`.
pub fn extractor_for(site: JobSite) -> Option<&'static dyn JobPageExtractor> {
    match site {
        JobSite::LinkedIn => Some(&LINKEDIN),
        JobSite::Indeed => Some(&INDEED),
        JobSite::Glassdoor => Some(&GLASSDOOR),
        JobSite::Greenhouse => Some(&GREENHOUSE),
        JobSite::Lever => Some(&LEVER),
        JobSite::Generic => None,
    }
}

/// Fallback for unknown sites and for known sites whose markup changed.
pub struct GenericExtractor;

impl GenericExtractor {
    /// Reads `description` from a schema.org `JobPosting` JSON-LD block.
    fn from_json_ld(document: &Html) -> Option<String> {
        static SELECTOR: OnceLock<Option<Selector>> = OnceLock::new();
        let selector = SELECTOR
            .get_or_init(|| Selector::parse(r#"script[type="application/ld+json"]"#).ok())
            .as_ref()?;

        document.select(selector).find_map(|script| {
            let raw: String = script.text().collect();
            let value: serde_json::Value = serde_json::from_str(raw.trim()).ok()?;
            find_job_posting_description(&value)
                .map(html_fragment_text)
                .filter(|text| !text.is_empty())
        })
    }

    /// The first div/section/article, in document order, whose class or id
    /// mentions a description. The whole subtree is kept, nested blocks included.
    fn from_markup(document: &Html) -> Option<String> {
        static CONTAINERS: OnceLock<Option<Selector>> = OnceLock::new();
        static DESCRIPTION: OnceLock<Option<Regex>> = OnceLock::new();
        let containers = CONTAINERS
            .get_or_init(|| Selector::parse("div, section, article").ok())
            .as_ref()?;
        let description = DESCRIPTION
            .get_or_init(|| Regex::new(r"(?i)description").ok())
            .as_ref()?;

        document
            .select(containers)
            .filter(|element| {
                let value = element.value();
                value
                    .attr("class")
                    .into_iter()
                    .chain(value.attr("id"))
                    .any(|attr| description.is_match(attr))
            })
            .map(element_text)
            .find(|text| !text.is_empty())
    }
}

impl JobPageExtractor for GenericExtractor {
    fn site(&self) -> JobSite {
        JobSite::Generic
    }

    fn extract(&self, document: &Html) -> Option<String> {
        Self::from_json_ld(document).or_else(|| Self::from_markup(document))
    }
}

fn find_job_posting_description(value: &serde_json::Value) -> Option<&str> {
    match value {
        serde_json::Value::Array(items) => items.iter().find_map(find_job_posting_description),
        serde_json::Value::Object(map) => {
            let is_posting = match map.get("@type") {
                Some(serde_json::Value::String(t)) => t == "JobPosting",
                Some(serde_json::Value::Array(types)) => {
                    types.iter().any(|t| t.as_str() == Some("JobPosting"))
                }
                _ => false,
            };
            if is_posting {
                if let Some(description) = map.get("description").and_then(|d| d.as_str()) {
                    return Some(description);
                }
            }
            map.get("@graph").and_then(find_job_posting_description)
        }
        _ => None,
    }
}

/// Strips tags and decodes entities from an HTML fragment.
pub fn html_fragment_text(fragment: &str) -> String {
    let parsed = Html::parse_fragment(fragment);
    element_text(parsed.root_element())
}

const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "section", "article", "br", "ul", "ol", "tr", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "footer", "table",
];

/// Renders an element's text, keeping paragraph and list structure as line breaks.
pub fn element_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();

    for node in element.descendants() {
        match node.value() {
            Node::Element(el) => {
                let name = el.name();
                if name == "li" {
                    out.push_str("\n- ");
                } else if BLOCK_ELEMENTS.contains(&name) {
                    out.push('\n');
                }
            }
            Node::Text(text) => {
                let in_script = node
                    .parent()
                    .and_then(|p| p.value().as_element())
                    .is_some_and(|el| matches!(el.name(), "script" | "style" | "noscript"));
                if !in_script {
                    out.push_str(text);
                }
            }
            _ => {}
        }
    }

    normalize_whitespace(&out)
}

/// Collapses runs of spaces within lines and drops blank lines and empty bullets.
fn normalize_whitespace(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty() && line != "-")
        .collect::<Vec<_>>()
        .join("\n")
}
