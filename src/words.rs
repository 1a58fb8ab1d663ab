//! Category -> word list dataset that rounds draw from.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::{IteratorRandom, SliceRandom};

#[derive(thiserror::Error, Debug)]
pub enum WordBankError {
    #[error("word bank has no categories")]
    Empty,
    #[error("category {0:?} has no words")]
    EmptyCategory(String),
    #[error("invalid word bank json: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct WordBank {
    categories: BTreeMap<String, Vec<String>>,
}

/// One draw from the bank: the category, its secret word and the full
/// category list the spy guesses from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordPick<'a> {
    pub category: &'a str,
    pub word: &'a str,
    pub candidates: &'a [String],
}

impl WordBank {
    pub fn new(categories: BTreeMap<String, Vec<String>>) -> Result<Self, WordBankError> {
        if categories.is_empty() {
            return Err(WordBankError::Empty);
        }
        if let Some((name, _)) = categories.iter().find(|(_, words)| words.is_empty()) {
            return Err(WordBankError::EmptyCategory(name.clone()));
        }
        Ok(Self { categories })
    }

    pub fn from_json(raw: &str) -> Result<Self, WordBankError> {
        let categories: BTreeMap<String, Vec<String>> = serde_json::from_str(raw)?;
        Self::new(categories)
    }

    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(name, words)| {
                (name.to_string(), words.iter().map(|w| w.to_string()).collect())
            })
            .collect();
        Self { categories }
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn words(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Uniform category, then a uniform word from it.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<WordPick<'_>> {
        let (category, words) = self.categories.iter().choose(rng)?;
        let word = words.choose(rng)?;
        Some(WordPick { category, word, candidates: words })
    }
}

impl Default for WordBank {
    fn default() -> Self { Self::builtin() }
}

const BUILTIN: &[(&str, &[&str])] = &[
    ("Locations", &[
        "Airport", "Bank", "Beach", "Casino", "Circus", "Hospital", "Hotel",
        "Library", "Museum", "Restaurant", "School", "Space Station", "Submarine",
        "Supermarket", "Theater", "Train", "Zoo",
    ]),
    ("Animals", &[
        "Cat", "Dog", "Elephant", "Giraffe", "Kangaroo", "Lion", "Owl",
        "Penguin", "Rabbit", "Shark", "Snake", "Tiger", "Turtle", "Wolf",
    ]),
    ("Food", &[
        "Burger", "Cheese", "Chocolate", "Dumplings", "Ice Cream", "Omelette",
        "Pancakes", "Pasta", "Pizza", "Salad", "Soup", "Sushi", "Tacos",
    ]),
    ("Professions", &[
        "Astronaut", "Baker", "Chef", "Doctor", "Firefighter", "Journalist",
        "Lawyer", "Mechanic", "Pilot", "Police Officer", "Programmer", "Teacher",
    ]),
    ("Sports", &[
        "Basketball", "Boxing", "Chess", "Cycling", "Football", "Golf",
        "Hockey", "Skiing", "Swimming", "Tennis", "Volleyball",
    ]),
    ("Objects", &[
        "Backpack", "Candle", "Clock", "Guitar", "Ladder", "Mirror",
        "Scissors", "Telescope", "Umbrella", "Wallet",
    ]),
];
