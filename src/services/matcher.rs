//! Canned-response lookup for the agent demo.
//!
//! The first keyword in priority order found anywhere in the lowercased
//! input wins. Booking intent is checked separately against its own word
//! list so a message can get the pricing answer and still count as a lead.

pub const LEAD_CAPTURED_SUFFIX: &str = "\n\n✅ Lead captured — confirmation will be sent.";

const DEFAULT_RESPONSE: &str =
    "Great question! Our Frontier Agent can assist with that — want to book an audit?";

const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    (
        "book",
        "I'd love to get you scheduled — Tuesday 2 PM or Thursday 10 AM?",
    ),
    (
        "appointment",
        "We have openings Tuesday 2 PM, Thursday 10 AM, Friday 3 PM...",
    ),
    ("pricing", "Our services typically range from $1,500-$3,000..."),
    (
        "availability",
        "We’re booking audits this week: Tue 2 PM, Thu 10 AM...",
    ),
    (
        "insurance",
        "Our AI agent can handle insurance verification automatically...",
    ),
    (
        "how",
        "Our agent works 24/7 capturing leads and booking appointments...",
    ),
    (
        "demo",
        "You're using a simplified demo — full version integrates with CRM...",
    ),
    ("cost", "Setup ranges from $1,500-$3,000 with $399-$699/mo..."),
    ("roi", "Clients typically see strong ROI from automation..."),
];

const DEFAULT_BOOKING_WORDS: &[&str] = &["book", "schedule", "appointment", "yes", "sure"];

#[derive(Debug, Clone)]
pub struct ResponseCatalog {
    entries: Vec<(String, String)>,
    default_response: String,
    booking_words: Vec<String>,
}

impl Default for ResponseCatalog {
    fn default() -> Self {
        Self::new(
            DEFAULT_ENTRIES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            DEFAULT_RESPONSE.to_string(),
            DEFAULT_BOOKING_WORDS.iter().map(|w| w.to_string()).collect(),
        )
    }
}

impl ResponseCatalog {
    /// Keywords are matched lowercase; entries keep their given order.
    pub fn new(
        entries: Vec<(String, String)>,
        default_response: String,
        booking_words: Vec<String>,
    ) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect(),
            default_response,
            booking_words: booking_words.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Returns the keyword that decides the reply, if any.
    pub fn matched_keyword(&self, input: &str) -> Option<&str> {
        let lowered = input.to_lowercase();
        self.entries
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword.as_str()))
            .map(|(keyword, _)| keyword.as_str())
    }

    pub fn respond(&self, input: &str) -> &str {
        let lowered = input.to_lowercase();
        self.entries
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword.as_str()))
            .map(|(_, response)| response.as_str())
            .unwrap_or(&self.default_response)
    }

    pub fn is_booking_intent(&self, input: &str) -> bool {
        let lowered = input.to_lowercase();
        self.booking_words
            .iter()
            .any(|word| lowered.contains(word.as_str()))
    }
}
