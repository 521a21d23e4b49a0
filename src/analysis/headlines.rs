//! Headline extraction from a rendered news page.
//!
//! Candidates are `<a>` elements whose `class` attribute equals the configured
//! class string (compared after whitespace normalisation, not as a CSS class
//! subset). Each match is paired with the first `<div>` carrying the "extra"
//! class that follows it in document order, descendants included.

use {
    crate::models::NewsMatch,
    scraper::{ElementRef, Html},
    thiserror::Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrapeError {
    #[error("headline `{title}` has no href attribute")]
    MissingHref { title: String },
}

pub struct HeadlineSelector<'a> {
    pub anchor_class: &'a str,
    pub extra_class: &'a str,
}

struct Candidate {
    title: String,
    link: Option<String>,
    extra_content: Option<String>,
    waiting_for_extra: bool,
}

/// Returns every headline whose title contains at least one keyword, in page order.
pub fn extract_headlines(
    html: &str,
    selector: &HeadlineSelector<'_>,
    keywords: &[String],
) -> Result<Vec<NewsMatch>, ScrapeError> {
    let document = Html::parse_document(html);
    let anchor_class = normalize_class(selector.anchor_class);
    let extra_class = normalize_class(selector.extra_class);

    let mut candidates: Vec<Candidate> = Vec::new();

    // Pre-order traversal == document order
    for node in document.root_element().descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        let name = element.value().name();

        if name == "div" && has_class(&element, &extra_class) {
            let text: String = element.text().collect();
            for c in candidates.iter_mut().filter(|c| c.waiting_for_extra) {
                c.extra_content = Some(text.clone());
                c.waiting_for_extra = false;
            }
        }

        if name == "a" && has_class(&element, &anchor_class) {
            let title: String = element.text().collect();
            if !keywords.iter().any(|k| title.contains(k.as_str())) {
                continue;
            }
            candidates.push(Candidate {
                title,
                link: element.value().attr("href").map(str::to_string),
                extra_content: None,
                waiting_for_extra: true,
            });
        }
    }

    candidates
        .into_iter()
        .map(|c| {
            let link = c.link.ok_or_else(|| ScrapeError::MissingHref {
                title: c.title.clone(),
            })?;
            Ok(NewsMatch {
                title: c.title,
                link,
                extra_content: c.extra_content,
            })
        })
        .collect()
}

fn normalize_class(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn has_class(element: &ElementRef<'_>, wanted: &str) -> bool {
    element
        .value()
        .attr("class")
        .is_some_and(|c| normalize_class(c) == wanted)
}
