//! Batch reporting: resolve a query and mirror every match.
//!
//! Records are processed one after another. A failed existence check is
//! treated as "not repeated"; a failed publish is logged, counted and
//! skipped so the rest of the batch still goes through.

use crate::card::{CardRecord, SetHint};
use crate::error::CoreError;
use crate::mirror::{CardReport, ReportMirror};
use crate::resolver::CardResolver;

/// Result of one batch report run.
#[derive(Debug, Default)]
pub struct ReportOutcome {
    /// Reports that were published, in catalog order.
    pub published: Vec<PublishedReport>,
    /// How many published reports were flagged as repeated.
    pub repeated: usize,
    /// How many records failed to publish.
    pub failed: usize,
    /// How many records the resolver returned.
    pub matched: usize,
}

/// A report together with the id the mirror assigned to it.
#[derive(Debug, Clone)]
pub struct PublishedReport {
    pub document_id: String,
    pub report: CardReport,
}

impl ReportOutcome {
    pub fn created(&self) -> usize {
        self.published.len()
    }

    /// Human-readable summary, e.g.
    /// `Successfully added 2 cards to Notion (1 repeated cards)`.
    pub fn message(&self) -> String {
        let mut message = format!("Successfully added {} cards to Notion", self.created());
        if self.repeated > 0 {
            message.push_str(&format!(" ({} repeated cards)", self.repeated));
        }
        if self.failed > 0 {
            message.push_str(&format!(" ({} failed)", self.failed));
        }
        message
    }
}

/// Check for an existing document, then publish one report for `record`.
///
/// Returns the published report, or the mirror error if publishing failed.
pub async fn publish_record(
    mirror: &dyn ReportMirror,
    record: CardRecord,
    method: &str,
    group_id: Option<&str>,
) -> Result<PublishedReport, crate::mirror::MirrorError> {
    let repeated = match mirror.exists(&record.id).await {
        Ok(exists) => exists,
        Err(e) => {
            tracing::warn!(card_id = %record.id, error = %e, "Existence check failed, assuming new");
            false
        }
    };

    let report = CardReport::new(record, method, group_id, repeated);
    let document_id = mirror.publish(&report).await?;
    tracing::info!(
        card_id = %report.record.id,
        %document_id,
        repeated,
        "Card report published"
    );
    Ok(PublishedReport {
        document_id,
        report,
    })
}

/// Resolve `name` and publish a report for every match.
///
/// Fails only when the name itself is invalid; an empty match list yields an
/// outcome with `matched == 0`.
pub async fn create_group_report(
    resolver: &CardResolver,
    mirror: &dyn ReportMirror,
    name: &str,
    set_hint: Option<&SetHint>,
    group_id: Option<&str>,
    method: &str,
) -> Result<ReportOutcome, CoreError> {
    let records = resolver.resolve(name, set_hint).await?;
    let mut outcome = ReportOutcome {
        matched: records.len(),
        ..Default::default()
    };

    for record in records {
        let card_id = record.id.clone();
        match publish_record(mirror, record, method, group_id).await {
            Ok(published) => {
                if published.report.repeated {
                    outcome.repeated += 1;
                }
                outcome.published.push(published);
            }
            Err(e) => {
                tracing::error!(%card_id, error = %e, "Failed to publish card report");
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}
