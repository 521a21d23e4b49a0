use serde::Serialize;

/// A headline whose title contains at least one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsMatch {
    pub title: String,
    pub link: String,
    pub extra_content: Option<String>,
}

impl NewsMatch {
    /// The three-line record written to the output file, blank line included.
    pub fn to_record(&self) -> String {
        format!(
            "Title: {}\nLink: {}\nExtra: {}\n\n",
            self.title,
            self.link,
            self.extra_content.as_deref().unwrap_or("None")
        )
    }
}
