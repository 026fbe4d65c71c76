//! @acp:module "Tag Aggregator"
//! @acp:summary "Union of tags over the answer options a session selected"
//! @acp:domain scoring
//! @acp:layer logic

use std::collections::BTreeSet;

use crate::catalog::{AnswerOption, OptionId, TagSet};

/// Collect the in-scope tag set for a selection.
///
/// Only options whose id is in `selected` contribute. A tag referenced by several
/// selected options is counted once; an empty selection yields an empty set.
pub fn compute_in_scope_tags<'a, I>(selected: &BTreeSet<OptionId>, options: I) -> TagSet
where
    I: IntoIterator<Item = &'a AnswerOption>,
{
    options
        .into_iter()
        .filter(|option| selected.contains(&option.id))
        .flat_map(|option| option.tags.iter().copied())
        .collect()
}
