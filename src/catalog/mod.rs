//! @acp:module "Catalog"
//! @acp:summary "Long-lived catalog data: tags, instruments, questions and answer options"
//! @acp:domain catalog
//! @acp:layer feature

pub mod loader;
pub mod types;

pub use loader::{check_catalog, load_catalog, parse_catalog, CatalogFormat, Finding, Severity};
pub use types::*;

use serde::{Deserialize, Serialize};

/// Complete catalog as loaded from disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(default)]
    pub instruments: Vec<Instrument>,

    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Catalog {
    pub fn tag(&self, id: TagId) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == id)
    }

    /// Display name of a tag, falling back to its id for unknown tags
    pub fn tag_name(&self, id: TagId) -> String {
        self.tag(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| format!("#{}", id))
    }

    pub fn instrument(&self, id: InstrumentId) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.id == id)
    }

    /// All questions across categories, in catalog order
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.categories.iter().flat_map(|c| c.questions.iter())
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions().find(|q| q.id == id)
    }

    /// Every answer option in the catalog
    pub fn options(&self) -> impl Iterator<Item = &AnswerOption> {
        self.questions().flat_map(|q| q.options.iter())
    }

    pub fn option(&self, id: OptionId) -> Option<&AnswerOption> {
        self.options().find(|o| o.id == id)
    }

    /// The question an option belongs to
    pub fn question_of_option(&self, id: OptionId) -> Option<&Question> {
        self.questions()
            .find(|q| q.options.iter().any(|o| o.id == id))
    }

    /// Instruments ordered by name, then id.
    ///
    /// This is the order fed to the prioritizer, so instruments with equal
    /// scores come out alphabetically.
    pub fn instruments_by_name(&self) -> Vec<Instrument> {
        let mut instruments = self.instruments.clone();
        instruments.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        instruments
    }
}
