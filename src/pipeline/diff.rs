//! Novelty calculation against the previous run's baseline.
//!
//! Headings and links are filtered independently: a heading is novel when
//! it is absent from the previous headings, a link is novel when it is
//! absent from the previous links. The two results are not re-aligned.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{Extraction, PreviousState};

/// Headings and links not seen in the previous run, in extraction order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Novelty {
    pub headings: Vec<String>,
    pub links: Vec<String>,
}

impl Novelty {
    /// Both filters must report something for the run to count as news.
    pub fn has_novelty(&self) -> bool {
        !self.headings.is_empty() && !self.links.is_empty()
    }

    /// Heading/link pairs as rendered in a notification.
    ///
    /// Pairs stop at the shorter of the two sequences.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headings
            .iter()
            .map(String::as_str)
            .zip(self.links.iter().map(String::as_str))
    }
}

/// Compute the novel headings and links of `current` relative to `previous`.
pub fn detect_novelty(current: &Extraction, previous: &PreviousState) -> Novelty {
    Novelty {
        headings: unseen(current.headings(), &previous.headings),
        links: unseen(current.links(), &previous.links),
    }
}

fn unseen<'a>(current: impl Iterator<Item = &'a str>, previous: &[String]) -> Vec<String> {
    let seen: HashSet<&str> = previous.iter().map(String::as_str).collect();
    current
        .filter(|item| !seen.contains(item))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Announcement;

    fn extraction(pairs: &[(&str, &str)]) -> Extraction {
        pairs
            .iter()
            .map(|(h, l)| Announcement::new(*h, *l))
            .collect()
    }

    fn state(headings: &[&str], links: &[&str]) -> PreviousState {
        PreviousState::new(
            headings.iter().map(|s| s.to_string()).collect(),
            links.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_no_changes() {
        let current = extraction(&[("A", "/a"), ("B", "/b")]);
        let novelty = detect_novelty(&current, &state(&["A", "B"], &["/a", "/b"]));

        assert!(novelty.headings.is_empty());
        assert!(novelty.links.is_empty());
        assert!(!novelty.has_novelty());
    }

    #[test]
    fn test_first_run_everything_is_new() {
        let current = extraction(&[("A", "/a"), ("B", "/b")]);
        let novelty = detect_novelty(&current, &PreviousState::default());

        assert_eq!(novelty.headings, vec!["A", "B"]);
        assert_eq!(novelty.links, vec!["/a", "/b"]);
        assert!(novelty.has_novelty());
    }

    #[test]
    fn test_order_follows_extraction() {
        let current = extraction(&[("C", "/c"), ("A", "/a"), ("B", "/b")]);
        let novelty = detect_novelty(&current, &state(&["A"], &["/a"]));

        assert_eq!(novelty.headings, vec!["C", "B"]);
        assert_eq!(novelty.links, vec!["/c", "/b"]);
    }

    #[test]
    fn test_filters_are_independent() {
        // Heading reworded on the same link.
        let current = extraction(&[("A (revised)", "/a"), ("B", "/b")]);
        let novelty = detect_novelty(&current, &state(&["A", "B"], &["/a", "/b"]));

        assert_eq!(novelty.headings, vec!["A (revised)"]);
        assert!(novelty.links.is_empty());
        assert!(!novelty.has_novelty());
    }

    #[test]
    fn test_nine_of_ten_headings_known() {
        let pairs: Vec<(String, String)> = (0..10)
            .map(|i| (format!("Heading {i}"), format!("/n/{i}")))
            .collect();
        let current: Extraction = pairs
            .iter()
            .map(|(h, l)| Announcement::new(h.as_str(), l.as_str()))
            .collect();
        let previous = PreviousState::new(
            pairs[..9].iter().map(|(h, _)| h.clone()).collect(),
            pairs.iter().map(|(_, l)| l.clone()).collect(),
        );

        let novelty = detect_novelty(&current, &previous);
        assert_eq!(novelty.headings.len(), 1);
        assert_eq!(novelty.links.len(), 0);
        assert!(!novelty.has_novelty());
    }

    #[test]
    fn test_idempotent() {
        let current = extraction(&[("A", "/a"), ("B", "/b"), ("B", "/b")]);
        let previous = state(&["A"], &[]);

        let first = detect_novelty(&current, &previous);
        let second = detect_novelty(&current, &previous);
        assert_eq!(first, second);
        assert_eq!(first.headings, vec!["B", "B"]);
    }

    #[test]
    fn test_pairs_truncate_to_shorter() {
        let novelty = Novelty {
            headings: vec!["h1".into(), "h2".into(), "h3".into()],
            links: vec!["l1".into()],
        };
        assert_eq!(novelty.pairs().collect::<Vec<_>>(), vec![("h1", "l1")]);
    }
}
