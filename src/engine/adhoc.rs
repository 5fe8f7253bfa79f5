//! Ad-hoc payment linking.
//!
//! Resolves the target component for a one-time payment through an
//! explicit, ordered fallback chain and merges the amount into the payslip.
//! Linkage is eager; the payment's status transition to processed happens
//! at payslip approval.

use tracing::warn;

use crate::models::{AdhocPayment, Payslip, SalaryComponent};
use crate::store::repository::ComponentRepository;

/// How the target component for an ad-hoc payment was determined.
///
/// The fallback chain is tried in declaration order: the payment's explicit
/// component, then an earning component matched by naming convention, then
/// the organization's default earning component.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentMatch {
    /// The payment names its component directly.
    Explicit(SalaryComponent),
    /// An earning component whose code equals the payment's normalized
    /// label.
    ConventionMatched(SalaryComponent),
    /// The deterministic fallback earning component.
    DefaultEarning(SalaryComponent),
    /// No candidate component exists.
    NotFound,
}

impl ComponentMatch {
    /// The matched component, if any.
    pub fn component(&self) -> Option<&SalaryComponent> {
        match self {
            ComponentMatch::Explicit(c)
            | ComponentMatch::ConventionMatched(c)
            | ComponentMatch::DefaultEarning(c) => Some(c),
            ComponentMatch::NotFound => None,
        }
    }
}

/// Resolves the best target component for a payment.
pub fn resolve_target_component(
    repo: &impl ComponentRepository,
    payment: &AdhocPayment,
) -> ComponentMatch {
    candidates(repo, payment)
        .into_iter()
        .next()
        .unwrap_or(ComponentMatch::NotFound)
}

/// The ordered, deduplicated candidate list for a payment.
fn candidates(repo: &impl ComponentRepository, payment: &AdhocPayment) -> Vec<ComponentMatch> {
    let mut list = Vec::new();
    let mut seen = Vec::new();

    if let Some(component_id) = payment.component_id {
        if let Some(component) = repo.component_by_id(component_id) {
            seen.push(component.id);
            list.push(ComponentMatch::Explicit(component));
        }
    }
    if let Some(component) = repo.component_by_code(&payment.convention_code()) {
        if component.is_earning() && !seen.contains(&component.id) {
            seen.push(component.id);
            list.push(ComponentMatch::ConventionMatched(component));
        }
    }
    if let Some(component) = repo.default_earning_component() {
        if !seen.contains(&component.id) {
            list.push(ComponentMatch::DefaultEarning(component));
        }
    }
    list
}

/// The result of merging one payment into a payslip.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MergeOutcome {
    /// The amount landed on a line item.
    Merged,
    /// Every candidate component's slot is held by a manual line item.
    AllSlotsManual,
    /// No candidate component exists.
    NoTarget,
}

/// Merges a payment's amount into the payslip.
///
/// Candidates are tried in order; a slot occupied by a manually entered
/// line item is left alone (mutating it would double-count on the next
/// recomputation) and the next candidate is tried instead.
pub(crate) fn merge_payment(
    repo: &impl ComponentRepository,
    payslip: &mut Payslip,
    payment: &AdhocPayment,
) -> MergeOutcome {
    let candidates = candidates(repo, payment);
    if candidates.is_empty() {
        warn!(payment = %payment.label, "no earning component available for ad-hoc payment");
        return MergeOutcome::NoTarget;
    }
    for candidate in &candidates {
        let Some(component) = candidate.component() else {
            continue;
        };
        if payslip.apply_generated_amount(component, payment.amount) {
            return MergeOutcome::Merged;
        }
    }
    warn!(
        payment = %payment.label,
        "every candidate component is manually overridden; payment left pending"
    );
    MergeOutcome::AllSlotsManual
}
