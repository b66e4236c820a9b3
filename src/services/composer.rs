//! Notification composer.

use serde::Serialize;

use crate::models::Recipient;
use crate::pipeline::Novelty;

const INTRO: &str =
    "আপনাকে জাতীয় বিশ্ববিদ্যালয়ের আজকের সর্বশেষ খবর জানানোর জন্য এই ইমেইলটি পাঠানো হয়েছে।";
const CALL_TO_ACTION: &str = "বিস্তারিত জানার জন্য নিচের লিংকে ক্লিক করুন।";

/// A message ready to hand to a mail transport.
///
/// Carries no sender credentials; those travel separately to the
/// session's authenticate step.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Notification {
    pub to: Recipient,
    pub subject: String,
    pub body: String,
}

/// Render the notification for one recipient.
pub fn compose(recipient: &Recipient, novelty: &Novelty, subject: &str) -> Notification {
    Notification {
        to: recipient.clone(),
        subject: subject.to_string(),
        body: render_body(&recipient.name, novelty),
    }
}

/// Greeting followed by one block per heading/link pair.
pub fn render_body(name: &str, novelty: &Novelty) -> String {
    let items: String = novelty
        .pairs()
        .map(|(heading, link)| format!("{heading}{CALL_TO_ACTION}\n{link}\n\n\n"))
        .collect();

    format!("Dear {name},\n\n{INTRO}\n\n{items}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient() -> Recipient {
        Recipient {
            name: "Rahim".to_string(),
            email: "rahim@example.com".to_string(),
        }
    }

    #[test]
    fn test_body_layout() {
        let novelty = Novelty {
            headings: vec!["Exam routine".into(), "Result".into()],
            links: vec!["https://www.nu.ac.bd/r.pdf".into(), "https://www.nu.ac.bd/s.pdf".into()],
        };

        let body = render_body("Rahim", &novelty);
        let expected = format!(
            "Dear Rahim,\n\n{INTRO}\n\n\
             Exam routine{CALL_TO_ACTION}\nhttps://www.nu.ac.bd/r.pdf\n\n\n\
             Result{CALL_TO_ACTION}\nhttps://www.nu.ac.bd/s.pdf\n\n\n"
        );
        assert_eq!(body, expected);
    }

    #[test]
    fn test_divergent_lengths_render_one_pair() {
        let novelty = Novelty {
            headings: vec!["h1".into(), "h2".into(), "h3".into()],
            links: vec!["l1".into()],
        };

        let body = render_body("Rahim", &novelty);
        assert_eq!(body.matches(CALL_TO_ACTION).count(), 1);
        assert!(body.contains(&format!("h1{CALL_TO_ACTION}\nl1\n")));
        assert!(!body.contains("h2"));
    }

    #[test]
    fn test_compose_addresses_recipient() {
        let novelty = Novelty {
            headings: vec!["h".into()],
            links: vec!["l".into()],
        };
        let notification = compose(&recipient(), &novelty, "Subject line");

        assert_eq!(notification.to.email, "rahim@example.com");
        assert_eq!(notification.subject, "Subject line");
        assert!(notification.body.starts_with("Dear Rahim,"));
    }
}
