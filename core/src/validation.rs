use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Identifies one armed validation. Tickets only ever grow, so an old one can never match a newer submission.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ticket(u64);

/// Sequence number of a round, used to tell which round a verdict belongs to.
pub type RoundId = u32;

/// Session-long memo of dictionary verdicts. Never evicts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationCache {
    entries: HashMap<String, bool>,
}

impl ValidationCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(word: &str) -> String {
        word.to_uppercase()
    }

    pub fn get(&self, word: &str) -> Option<bool> {
        self.entries.get(&Self::key(word)).copied()
    }

    pub fn insert(&mut self, word: &str, valid: bool) {
        self.entries.insert(Self::key(word), valid);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pending {
    pub ticket: Ticket,
    pub word: String,
    pub round: RoundId,
}

/// Single-slot debounce: arming replaces whatever was waiting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Debouncer {
    last_ticket: u64,
    pending: Option<Pending>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, word: String, round: RoundId) -> Ticket {
        self.last_ticket += 1;
        let ticket = Ticket(self.last_ticket);
        if let Some(superseded) = self.pending.replace(Pending {
            ticket,
            word,
            round,
        }) {
            log::debug!("debounce: {:?} superseded by {:?}", superseded.word, ticket);
        }
        ticket
    }

    /// Takes the pending submission if `ticket` is still the armed one.
    pub fn fire(&mut self, ticket: Ticket) -> Option<Pending> {
        match &self.pending {
            Some(pending) if pending.ticket == ticket => self.pending.take(),
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<&Pending> {
        self.pending.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    TooShort,
    Scheduled { ticket: Ticket, delay_ms: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// A newer submission replaced this one before its quiet period ended.
    Stale,
    Cached {
        word: String,
        valid: bool,
        round: RoundId,
    },
    /// Not cached, the dictionary has to be asked and the answer fed to [`WordValidator::complete`].
    Lookup { ticket: Ticket, word: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completed {
    pub word: String,
    pub valid: bool,
    pub round: RoundId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordValidator {
    min_word_len: usize,
    debounce_ms: u32,
    cache: ValidationCache,
    debouncer: Debouncer,
    in_flight: HashMap<Ticket, Pending>,
}

impl WordValidator {
    pub fn new(min_word_len: usize, debounce_ms: u32) -> Self {
        Self {
            min_word_len,
            debounce_ms,
            cache: ValidationCache::new(),
            debouncer: Debouncer::new(),
            in_flight: HashMap::new(),
        }
    }

    pub fn cache(&self) -> &ValidationCache {
        &self.cache
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_too_short(&self, word: &str) -> bool {
        word.chars().count() < self.min_word_len
    }

    /// Short words are rejected on the spot and leave any armed submission alone.
    pub fn submit(&mut self, word: &str, round: RoundId) -> Submission {
        if self.is_too_short(word) {
            return Submission::TooShort;
        }

        let ticket = self.debouncer.arm(String::from(word), round);
        Submission::Scheduled {
            ticket,
            delay_ms: self.debounce_ms,
        }
    }

    /// The quiet period for `ticket` is over.
    pub fn elapsed(&mut self, ticket: Ticket) -> Resolution {
        let Some(pending) = self.debouncer.fire(ticket) else {
            return Resolution::Stale;
        };

        if let Some(valid) = self.cache.get(&pending.word) {
            log::debug!("cache hit for {:?}: {}", pending.word, valid);
            return Resolution::Cached {
                word: pending.word,
                valid,
                round: pending.round,
            };
        }

        let word = pending.word.clone();
        self.in_flight.insert(ticket, pending);
        Resolution::Lookup { ticket, word }
    }

    /// Records the dictionary verdict for an in-flight lookup.
    pub fn complete(&mut self, ticket: Ticket, valid: bool) -> Option<Completed> {
        let Pending { word, round, .. } = self.in_flight.remove(&ticket)?;
        self.cache.insert(&word, valid);
        Some(Completed { word, valid, round })
    }
}

#[derive(Deserialize)]
struct DictionaryEntry {
    word: String,
}

/// Turns a dictionary response into a verdict. Anything but a 200 whose first entry is `word` counts as invalid.
pub fn lookup_verdict(word: &str, status: u16, body: &str) -> bool {
    if status != 200 {
        return false;
    }

    match serde_json::from_str::<Vec<DictionaryEntry>>(body) {
        Ok(entries) => entries
            .first()
            .is_some_and(|entry| entry.word.to_lowercase() == word.to_lowercase()),
        Err(err) => {
            log::error!("could not parse dictionary response for {:?}: {}", word, err);
            false
        }
    }
}

pub fn dictionary_url(base: &str, word: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled(submission: Submission) -> Ticket {
        match submission {
            Submission::Scheduled { ticket, .. } => ticket,
            Submission::TooShort => panic!("expected a scheduled submission"),
        }
    }

    #[test]
    fn short_words_skip_the_pipeline_and_keep_pending_submission() {
        let mut validator = WordValidator::new(3, 300);
        let ticket = scheduled(validator.submit("HOUSE", 1));

        assert_eq!(validator.submit("AT", 1), Submission::TooShort);
        assert_eq!(
            validator.elapsed(ticket),
            Resolution::Lookup {
                ticket,
                word: String::from("HOUSE")
            }
        );
    }

    #[test]
    fn only_latest_submission_survives_debounce() {
        let mut validator = WordValidator::new(3, 300);
        let first = scheduled(validator.submit("CAT", 1));
        let second = scheduled(validator.submit("DOG", 1));

        assert_eq!(validator.elapsed(first), Resolution::Stale);
        assert_eq!(
            validator.elapsed(second),
            Resolution::Lookup {
                ticket: second,
                word: String::from("DOG")
            }
        );
        assert_eq!(validator.elapsed(second), Resolution::Stale);
    }

    #[test]
    fn completed_lookups_are_served_from_cache() {
        let mut validator = WordValidator::new(3, 300);
        let ticket = scheduled(validator.submit("CAT", 4));
        validator.elapsed(ticket);

        assert_eq!(
            validator.complete(ticket, true),
            Some(Completed {
                word: String::from("CAT"),
                valid: true,
                round: 4
            })
        );
        assert_eq!(validator.complete(ticket, true), None);

        let again = scheduled(validator.submit("cat", 5));
        assert_eq!(
            validator.elapsed(again),
            Resolution::Cached {
                word: String::from("cat"),
                valid: true,
                round: 5
            }
        );
        assert_eq!(validator.in_flight_count(), 0);
    }

    #[test]
    fn cache_key_ignores_case() {
        let mut cache = ValidationCache::new();
        cache.insert("Zebra", false);

        assert_eq!(cache.get("ZEBRA"), Some(false));
        assert_eq!(cache.get("zebra"), Some(false));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn verdict_requires_matching_headword() {
        let body = r#"[{"word":"house","phonetics":[]},{"word":"houses"}]"#;

        assert!(lookup_verdict("HOUSE", 200, body));
        assert!(!lookup_verdict("HOUSES", 200, body));
        assert!(!lookup_verdict("HOUSE", 404, body));
    }

    #[test]
    fn verdict_treats_odd_payloads_as_invalid() {
        assert!(!lookup_verdict("CAT", 200, "[]"));
        assert!(!lookup_verdict("CAT", 200, "not json"));
        assert!(!lookup_verdict(
            "CAT",
            200,
            r#"{"title":"No Definitions Found"}"#
        ));
    }

    #[test]
    fn url_joins_base_and_word() {
        assert_eq!(
            dictionary_url("https://dict.example/en/", "CAT"),
            "https://dict.example/en/CAT"
        );
        assert_eq!(
            dictionary_url(DEFAULT_DICTIONARY_URL, "DOG"),
            "https://api.dictionaryapi.dev/api/v2/entries/en/DOG"
        );
    }
}
