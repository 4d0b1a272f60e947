//! Transcript buffer: committed sentence plus the word being spelled

use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    sentence: String,
    pending_word: String,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn pending_word(&self) -> &str {
        &self.pending_word
    }

    /// Sentence followed by the unfinished word
    pub fn text(&self) -> String {
        format!("{}{}", self.sentence, self.pending_word)
    }

    pub fn push_letter(&mut self, letter: char) {
        self.pending_word.push(letter);
    }

    /// Move the pending word into the sentence followed by a space.
    /// With no pending word, add a bare space unless one is already there.
    /// Returns the flushed word (empty for a bare space).
    pub fn break_word(&mut self) -> String {
        if self.pending_word.is_empty() {
            if !self.sentence.ends_with(' ') {
                self.sentence.push(' ');
            }
            return String::new();
        }

        let word = std::mem::take(&mut self.pending_word);
        self.sentence.push_str(&word);
        self.sentence.push(' ');
        word
    }

    pub fn clear(&mut self) {
        self.sentence.clear();
        self.pending_word.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.sentence.is_empty() && self.pending_word.is_empty()
    }
}
