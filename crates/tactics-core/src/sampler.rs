//! Random card draws by category

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::card::{Card, Category};
use crate::error::SampleError;
use crate::store::CardStore;

/// Draws cards uniformly at random from a store
pub struct Sampler<'a> {
    store: &'a CardStore,
}

impl<'a> Sampler<'a> {
    pub fn new(store: &'a CardStore) -> Self {
        Self { store }
    }

    /// Draw one card from `category` using the thread-local RNG
    pub fn sample_one(&self, category: &str) -> Result<Card, SampleError> {
        self.sample_one_with(category, &mut rand::rng())
    }

    /// Draw one card from `category` (exact match) using `rng`
    pub fn sample_one_with<R: Rng + ?Sized>(
        &self,
        category: &str,
        rng: &mut R,
    ) -> Result<Card, SampleError> {
        let matching: Vec<&Card> = self.store.in_category(category).collect();

        let card = matching
            .choose(rng)
            .ok_or_else(|| SampleError::NoCardsAvailable(category.to_string()))?;

        debug!(
            "Drew card {} from {} ({} candidates)",
            card.id,
            category,
            matching.len()
        );
        Ok((*card).clone())
    }

    /// Draw one card per category, preserving order.
    ///
    /// Fails on the first category without cards.
    pub fn sample_full<I, S>(&self, categories: I) -> Result<Vec<Card>, SampleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.sample_full_with(categories, &mut rand::rng())
    }

    pub fn sample_full_with<I, S, R>(
        &self,
        categories: I,
        rng: &mut R,
    ) -> Result<Vec<Card>, SampleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        categories
            .into_iter()
            .map(|category| self.sample_one_with(category.as_ref(), rng))
            .collect()
    }

    /// The sample endpoint's draw: Concept, Structure, Style, plus
    /// Explore, Character, Function, Organize when `full` is set
    pub fn sample_spread(&self, full: bool) -> Result<Vec<Card>, SampleError> {
        self.sample_full(Category::sample_order(full).iter().map(Category::as_str))
    }
}
