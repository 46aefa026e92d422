pub mod audit;
pub mod balance;
pub mod score;

use traitforge::error::TfResult;
use traitforge::model::loader::load_traits_from_file;
use traitforge::model::{Question, TraitCatalog};
use traitforge::traits::TraitSet;

pub struct DataPaths {
    pub questions: String,
    pub archetypes: String,
    pub traits: Option<String>,
}

impl DataPaths {
    pub fn catalog(&self) -> TfResult<TraitCatalog> {
        match &self.traits {
            Some(path) => load_traits_from_file(path),
            None => Ok(TraitCatalog::new()),
        }
    }
}

/// Traits the offline tools work over: the metadata keys when a catalog is
/// supplied, otherwise whatever the bank itself scores.
pub fn offline_traits(questions: &[Question], catalog: &TraitCatalog) -> TraitSet {
    if catalog.is_empty() {
        TraitSet::from_questions(questions)
    } else {
        TraitSet::from_names(catalog.keys().cloned())
    }
}
