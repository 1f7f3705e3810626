//! Result aggregation.
//!
//! Folds per-(namespace, kind) results into the documents, counts and notes
//! of one pass. Input order is merge order; nothing is re-sorted here.

use crate::converters::ConversionResult;
use crate::document::ManifestDocument;
use crate::error::ListError;
use crate::plan::ResolvedPlan;
use std::collections::BTreeMap;
use tracing::debug;

/// Everything one pass produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    pub documents: Vec<ManifestDocument>,
    /// Source objects observed per kind key; every resolved kind is present
    pub found: BTreeMap<String, i32>,
    pub notes: Vec<String>,
}

/// Merges scan results in the order given.
///
/// A listing failure becomes one note and contributes nothing to `found`
/// for that namespace; the remaining results are merged normally.
pub fn aggregate(plan: &ResolvedPlan, results: Vec<Result<ConversionResult, ListError>>) -> Aggregate {
    let mut merged = Aggregate {
        found: plan.kinds.iter().map(|kind| (kind.key().to_string(), 0)).collect(),
        ..Default::default()
    };

    for result in results {
        match result {
            Ok(result) => {
                debug!(
                    kind = result.kind.key(),
                    namespace = %result.namespace,
                    count = result.count,
                    "merging conversion result"
                );
                let count = i32::try_from(result.count).unwrap_or(i32::MAX);
                let slot = merged.found.entry(result.kind.key().to_string()).or_insert(0);
                *slot = slot.saturating_add(count);
                merged.documents.extend(result.documents);
                merged.notes.extend(result.notes);
            }
            Err(err) => merged.notes.push(err.to_string()),
        }
    }

    merged
}
