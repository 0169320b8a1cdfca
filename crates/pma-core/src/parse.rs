//! Record parsing
//!
//! Pattern-based extraction over raw record text. Both parsers ignore any
//! surrounding text they do not recognize and never fail: zero matches is
//! a valid, meaningful empty result. The patterns are isolated here so a
//! remote-service format change touches nothing but this module.

use pma_common::{Annotation, FeatureSet, TaxonomyChain};
use regex::Regex;
use std::sync::LazyLock;

/// Level separator inside a lineage line.
const TAXON_SEPARATOR: char = ';';

// Feature-type marker as emitted by the feature endpoint.
static FEATURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""type":"(\w+)""#).expect("feature pattern"));

// Lineage lines of a full text record.
static TAXONOMY_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^OC\s+(.*)").expect("taxonomy line pattern"));

/// Which annotation shape to parse a record into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    Features,
    Taxonomy,
}

impl AnnotationKind {
    /// Column label for tabular export.
    pub fn column_name(self) -> &'static str {
        match self {
            AnnotationKind::Features => "Features",
            AnnotationKind::Taxonomy => "Taxonomy",
        }
    }
}

/// Collect every feature-type tag in the record into a set.
pub fn parse_features(raw: &str) -> FeatureSet {
    FEATURE_RE
        .captures_iter(raw)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Concatenate the lineage levels of every `OC` line, in encounter order,
/// trailing separator stripped.
pub fn parse_taxonomy(raw: &str) -> TaxonomyChain {
    let mut chain = TaxonomyChain::new();

    for line in raw.lines() {
        let Some(caps) = TAXONOMY_LINE_RE.captures(line) else {
            continue;
        };

        let levels = caps[1]
            .trim()
            .trim_end_matches(TAXON_SEPARATOR)
            .split(TAXON_SEPARATOR)
            .map(|level| level.trim().to_string())
            .filter(|level| !level.is_empty());
        chain.extend(levels);
    }

    chain
}

/// Parse raw record text into the requested annotation shape.
pub fn parse(raw: &str, kind: AnnotationKind) -> Annotation {
    match kind {
        AnnotationKind::Features => Annotation::Features(parse_features(raw)),
        AnnotationKind::Taxonomy => Annotation::Taxonomy(parse_taxonomy(raw)),
    }
}
