//! @acp:module "Catalog Types"
//! @acp:summary "Tags, instruments and the questionnaire they are linked through"
//! @acp:domain catalog
//! @acp:layer types

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }
    };
}

id_type!(
    /// Tag identity
    TagId
);
id_type!(
    /// Instrument identity
    InstrumentId
);
id_type!(
    /// Question category identity
    CategoryId
);
id_type!(
    /// Question identity
    QuestionId
);
id_type!(
    /// Answer option identity
    OptionId
);

/// Set of tags, ordered by id so iteration is deterministic
pub type TagSet = BTreeSet<TagId>;

/// A named label connecting questionnaire answers to instruments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// A catalogued intervention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub id: InstrumentId,

    pub name: String,

    /// Short lead text, shown in bold above the description
    #[serde(default)]
    pub intro: String,

    /// When to use the instrument
    #[serde(default)]
    pub description: String,

    /// Considerations when applying it
    #[serde(default)]
    pub considerations: String,

    /// Example projects
    #[serde(default)]
    pub examples: String,

    #[serde(default)]
    pub links: Option<String>,

    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub owner_email: String,

    /// Tags that raise relevance when in scope
    #[serde(default)]
    pub inclusion_tags: TagSet,

    /// Tags that lower or veto relevance when in scope
    #[serde(default)]
    pub exclusion_tags: TagSet,
}

impl Instrument {
    /// Bare instrument with a name and no descriptive text
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: InstrumentId(id),
            name: name.into(),
            intro: String::new(),
            description: String::new(),
            considerations: String::new(),
            examples: String::new(),
            links: None,
            owner: String::new(),
            owner_email: String::new(),
            inclusion_tags: TagSet::new(),
            exclusion_tags: TagSet::new(),
        }
    }

    pub fn with_inclusion_tags<I: IntoIterator<Item = TagId>>(mut self, tags: I) -> Self {
        self.inclusion_tags.extend(tags);
        self
    }

    pub fn with_exclusion_tags<I: IntoIterator<Item = TagId>>(mut self, tags: I) -> Self {
        self.exclusion_tags.extend(tags);
        self
    }
}

/// One answer a question offers; carries inclusion tags only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: OptionId,
    pub name: String,
    #[serde(default)]
    pub tags: TagSet,
}

impl AnswerOption {
    pub fn new<I: IntoIterator<Item = TagId>>(id: u32, name: impl Into<String>, tags: I) -> Self {
        Self {
            id: OptionId(id),
            name: name.into(),
            tags: tags.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub name: String,
    /// Whether more than one option may be selected
    #[serde(default)]
    pub multiselect: bool,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}
