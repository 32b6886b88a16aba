// File: src/report.rs
// Purpose: Whole-form aggregation of field verdicts

use serde::{Deserialize, Serialize};

use crate::engine::{evaluate, ErrorResult, FieldVerdict, SuccessResult};
use crate::field::{FieldDeclaration, FormSnapshot};
use crate::message::MessageCatalog;

/// Errors and successes of one or more evaluation passes
///
/// Both lists keep declaration order and hold at most one entry per
/// field id; the first recorded verdict for an id wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormReport {
    pub errors: Vec<ErrorResult>,
    pub successes: Vec<SuccessResult>,
}

impl FormReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submission may proceed only when no field failed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds a verdict unless its id is already in the matching list
    pub fn record(&mut self, verdict: FieldVerdict) {
        match verdict {
            FieldVerdict::Error(error) => {
                if self.error_for(&error.field_id).is_none() {
                    self.errors.push(error);
                }
            }
            FieldVerdict::Success(success) => {
                if !self.has_success(&success.field_id) {
                    self.successes.push(success);
                }
            }
        }
    }

    /// Folds a later pass into this report without duplicating ids
    pub fn merge(&mut self, other: FormReport) {
        let verdicts = other
            .errors
            .into_iter()
            .map(FieldVerdict::Error)
            .chain(other.successes.into_iter().map(FieldVerdict::Success));
        for verdict in verdicts {
            self.record(verdict);
        }
    }

    pub fn error_for(&self, field_id: &str) -> Option<&ErrorResult> {
        self.errors.iter().find(|e| e.field_id == field_id)
    }

    pub fn has_success(&self, field_id: &str) -> bool {
        self.successes.iter().any(|s| s.field_id == field_id)
    }
}

/// Evaluates every declaration in order and aggregates the verdicts
pub fn evaluate_form<'a, I, S>(fields: I, ctx: &S, messages: &MessageCatalog) -> FormReport
where
    I: IntoIterator<Item = &'a FieldDeclaration>,
    S: FormSnapshot + ?Sized,
{
    let mut report = FormReport::new();
    for field in fields {
        report.record(evaluate(field, ctx, messages));
    }
    tracing::debug!(
        errors = report.errors.len(),
        successes = report.successes.len(),
        "form evaluated"
    );
    report
}
