//! Field predicates.
//!
//! Each module checks one kind of value and returns `Err(FailureReason)`
//! instead of failing fast, so a record collects every failing field.

pub mod address;
pub mod contact;
pub mod dates;
pub mod identifier;
pub mod income;
pub mod names;
pub mod status;

use cdq_model::{FailureReason, ValidatorKind};

use crate::rule_set::RuleSet;

pub use identifier::IdIndex;

/// Dataset-wide inputs some predicates need.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    pub rules: &'a RuleSet,
    pub ids: &'a IdIndex,
}

/// Runs the predicate selected by `kind` against one value.
pub fn check_value(
    kind: ValidatorKind,
    value: &str,
    ctx: CheckContext<'_>,
) -> Result<(), FailureReason> {
    let value = value.trim();
    match kind {
        ValidatorKind::CustomerId => identifier::check(value, ctx.ids),
        ValidatorKind::Name => names::check(value),
        ValidatorKind::Email => contact::check_email(value),
        ValidatorKind::Phone => contact::check_phone(value),
        ValidatorKind::DateOfBirth => dates::check_date_of_birth(value, ctx.rules),
        ValidatorKind::Date => dates::check_date(value),
        ValidatorKind::Address => address::check(value),
        ValidatorKind::Income => income::check(value),
        ValidatorKind::AccountStatus => status::check(value, ctx.rules),
    }
}
