//! Announcement and baseline data structures.

use serde::{Deserialize, Serialize};

/// One entry of the notice board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Announcement {
    /// Trimmed visible text of the entry
    pub heading: String,

    /// Link base concatenated with the raw href
    pub link: String,
}

impl Announcement {
    pub fn new(heading: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            link: link.into(),
        }
    }
}

/// Announcements of one run, in site order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Extraction {
    announcements: Vec<Announcement>,
}

impl Extraction {
    pub fn new(announcements: Vec<Announcement>) -> Self {
        Self { announcements }
    }

    pub fn announcements(&self) -> &[Announcement] {
        &self.announcements
    }

    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.announcements.iter().map(|a| a.heading.as_str())
    }

    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.announcements.iter().map(|a| a.link.as_str())
    }

    pub fn len(&self) -> usize {
        self.announcements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.announcements.is_empty()
    }
}

impl FromIterator<Announcement> for Extraction {
    fn from_iter<I: IntoIterator<Item = Announcement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Headings and links recorded by the previous run.
///
/// The two lists are kept apart because novelty is computed on each of
/// them independently.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviousState {
    pub headings: Vec<String>,
    pub links: Vec<String>,
}

impl PreviousState {
    pub fn new(headings: Vec<String>, links: Vec<String>) -> Self {
        Self { headings, links }
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty() && self.links.is_empty()
    }
}

impl From<&Extraction> for PreviousState {
    fn from(extraction: &Extraction) -> Self {
        Self {
            headings: extraction.headings().map(str::to_string).collect(),
            links: extraction.links().map(str::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_keeps_both_sequences_aligned() {
        let extraction: Extraction = vec![
            Announcement::new("Form fill-up notice", "https://www.nu.ac.bd/a.pdf"),
            Announcement::new("Result published", "https://www.nu.ac.bd/b.pdf"),
        ]
        .into_iter()
        .collect();

        let state = PreviousState::from(&extraction);
        assert_eq!(state.headings, vec!["Form fill-up notice", "Result published"]);
        assert_eq!(
            state.links,
            vec!["https://www.nu.ac.bd/a.pdf", "https://www.nu.ac.bd/b.pdf"]
        );
    }
}
