//! Domain types shared across PMA
//!
//! These model what the pipeline extracts and aggregates: accession
//! identifiers, the two annotation shapes UniProt records yield (feature
//! sets and taxonomic lineages), and the enum tying them together.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Separator between lineage levels in rendered output.
pub const LEVEL_SEPARATOR: &str = ", ";

/// A UniProt accession identifier.
///
/// Opaque once extracted; the pipeline never validates it beyond the
/// extraction pattern that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessionId(String);

impl AccessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique feature-type tags observed across all accessions of one entity.
///
/// Backed by an ordered set so duplicates collapse and rendering is
/// deterministic. An empty set is a valid result ("no features found"),
/// distinct from a failed lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet(BTreeSet<String>);

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, feature: impl Into<String>) {
        self.0.insert(feature.into());
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.0.contains(feature)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_str())
    }

    /// Union another set into this one.
    pub fn merge(&mut self, other: FeatureSet) {
        self.0.extend(other.0);
    }

    /// Render as a comma-joined enumeration of the unique tags.
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(LEVEL_SEPARATOR)
    }
}

impl Extend<String> for FeatureSet {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl FromIterator<String> for FeatureSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Ordered taxonomic lineage levels, root first, as emitted by the source.
///
/// Levels from multiple record lines concatenate in encounter order. An
/// empty chain is a valid result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxonomyChain(Vec<String>);

impl TaxonomyChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: impl Into<String>) {
        self.0.push(level.into());
    }

    pub fn contains(&self, level: &str) -> bool {
        self.0.iter().any(|l| l == level)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn levels(&self) -> &[String] {
        &self.0
    }

    /// Render as a comma-joined chain, no trailing separator.
    pub fn render(&self) -> String {
        self.0.join(LEVEL_SEPARATOR)
    }
}

impl Extend<String> for TaxonomyChain {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl FromIterator<String> for TaxonomyChain {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The structured result of parsing one entity's record text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Annotation {
    Features(FeatureSet),
    Taxonomy(TaxonomyChain),
}

impl Annotation {
    /// True when the annotation holds no tags/levels. Still a valid result.
    pub fn is_empty(&self) -> bool {
        match self {
            Annotation::Features(set) => set.is_empty(),
            Annotation::Taxonomy(chain) => chain.is_empty(),
        }
    }

    /// Membership check for a queried feature tag or lineage level.
    pub fn contains(&self, term: &str) -> bool {
        match self {
            Annotation::Features(set) => set.contains(term),
            Annotation::Taxonomy(chain) => chain.contains(term),
        }
    }

    pub fn render(&self) -> String {
        match self {
            Annotation::Features(set) => set.render(),
            Annotation::Taxonomy(chain) => chain.render(),
        }
    }
}
