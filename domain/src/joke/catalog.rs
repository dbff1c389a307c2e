//! Joke catalog with per-category index
//!
//! The catalog is fixed at construction and read-only afterwards, so it can
//! be shared across sessions as `Arc<JokeCatalog>` without locking.

use super::category::Category;
use super::entities::Joke;
use crate::core::error::DomainError;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered, immutable set of jokes (Aggregate)
#[derive(Debug, Clone, Default)]
pub struct JokeCatalog {
    jokes: Vec<Arc<Joke>>,
    index: HashMap<Category, Vec<Arc<Joke>>>,
}

impl JokeCatalog {
    /// Build a catalog from an arbitrary joke list.
    ///
    /// Unlike [`JokeCatalog::builtin`] this may leave categories empty;
    /// selection against them yields [`DomainError::EmptyCategory`].
    pub fn new(jokes: impl IntoIterator<Item = Joke>) -> Self {
        let jokes: Vec<Arc<Joke>> = jokes.into_iter().map(Arc::new).collect();
        let mut index: HashMap<Category, Vec<Arc<Joke>>> = HashMap::new();
        for joke in &jokes {
            index
                .entry(joke.category())
                .or_default()
                .push(Arc::clone(joke));
        }
        Self { jokes, index }
    }

    /// The built-in joke set: three jokes in each non-default category.
    pub fn builtin() -> Self {
        Self::new([
            Joke::new(
                "Why did the chicken cross the road?",
                "It didn't, it was in the oven.",
                Category::Chicken,
            ),
            Joke::new(
                "Why did the chicken cross the Mobius strip?",
                "To stay on the same side",
                Category::Chicken,
            ),
            Joke::new(
                "Why did the rubber chicken cross the road?",
                "She wanted to stretch her legs",
                Category::Chicken,
            ),
            Joke::new(
                "How much does a polar bear weigh?",
                "Roughly 1,150 pounds if it's fully grown",
                Category::Anti,
            ),
            Joke::new(
                "What does a duck and a tablespoon have in common?",
                "Both are not a lamp.",
                Category::Anti,
            ),
            Joke::new(
                "What's orange and tastes like an orange?",
                "An orange.",
                Category::Anti,
            ),
            Joke::new(
                "How does an attorney sleep?",
                "First he lies on one side, then he lies on the other.",
                Category::Lawyer,
            ),
            Joke::new(
                "What's the difference between a lawyer and a liar?",
                "The pronunciation.",
                Category::Lawyer,
            ),
            Joke::new(
                "How can you tell when a lawyer is lying?",
                "Their lips are moving.",
                Category::Lawyer,
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.jokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jokes.is_empty()
    }

    /// All jokes in construction order
    pub fn jokes(&self) -> &[Arc<Joke>] {
        &self.jokes
    }

    /// Jokes filtered by category; `Default` means the whole catalog.
    pub fn by_category(&self, category: Category) -> &[Arc<Joke>] {
        if category.is_default() {
            return &self.jokes;
        }
        self.tagged(category)
    }

    /// Jokes tagged with exactly this category, `Default` included.
    pub fn tagged(&self, category: Category) -> &[Arc<Joke>] {
        self.index.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-default categories that hold at least one joke, in priority order
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| !c.is_default() && self.index.contains_key(c))
            .collect()
    }

    /// Draw a joke uniformly at random using the thread-local RNG.
    ///
    /// `None` and `Some(Category::Default)` both select from the whole catalog.
    pub fn random_joke(&self, category: Option<Category>) -> Result<Arc<Joke>, DomainError> {
        self.random_joke_with(&mut rand::thread_rng(), category)
    }

    /// Draw a joke uniformly at random from the given randomness source.
    pub fn random_joke_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        category: Option<Category>,
    ) -> Result<Arc<Joke>, DomainError> {
        let category = category.unwrap_or_default();
        self.by_category(category)
            .choose(rng)
            .cloned()
            .ok_or(DomainError::EmptyCategory(category))
    }
}
