//! Deciding whether a hand-written wrapper operation already covers a
//! target operation.
use common::StrCaseExt;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use wrap_model::{ManualOverrideSet, OperationSignature, Parameter};

#[enum_dispatch]
pub trait SignatureMatcher {
    fn matches(&self, manual: &OperationSignature, target: &OperationSignature) -> bool;

    fn is_overridden(&self, target: &OperationSignature, overrides: &ManualOverrideSet) -> bool {
        overrides.iter().any(|manual| self.matches(manual, target))
    }
}

/// Which notion of "same signature" suppresses a forwarding member.
#[enum_dispatch(SignatureMatcher)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PolicyName", into = "PolicyName")]
pub enum MatchPolicy {
    StrictSignature,
    PositionalPrefix,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self::StrictSignature(StrictSignature)
    }
}

/// Same name, same arity, parameter types equal ignoring case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrictSignature;

impl SignatureMatcher for StrictSignature {
    fn matches(&self, manual: &OperationSignature, target: &OperationSignature) -> bool {
        comparable(manual, target)
            && manual.arity() == target.arity()
            && manual.parameters.iter()
                .zip(target.parameters.iter())
                .all(|(m, t)| same_type(m, t))
    }
}

/// Every manual parameter position must exist on the target with an
/// equal type (ignoring case). A manual operation with fewer parameters
/// than the target still matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionalPrefix;

impl SignatureMatcher for PositionalPrefix {
    fn matches(&self, manual: &OperationSignature, target: &OperationSignature) -> bool {
        comparable(manual, target)
            && manual.parameters.iter()
                .enumerate()
                .all(|(idx, m)| target.parameters.get(idx).map_or(false, |t| same_type(m, t)))
    }
}

fn comparable(manual: &OperationSignature, target: &OperationSignature) -> bool {
    !manual.is_constructor() && !target.is_constructor() && manual.name == target.name
}

fn same_type(manual: &Parameter, target: &Parameter) -> bool {
    manual.type_name.trim().eq_ignore_case(target.type_name.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum PolicyName {
    Strict,
    PositionalPrefix,
}

impl From<PolicyName> for MatchPolicy {
    fn from(name: PolicyName) -> Self {
        match name {
            PolicyName::Strict => StrictSignature.into(),
            PolicyName::PositionalPrefix => PositionalPrefix.into(),
        }
    }
}

impl From<MatchPolicy> for PolicyName {
    fn from(policy: MatchPolicy) -> Self {
        match policy {
            MatchPolicy::StrictSignature(_) => PolicyName::Strict,
            MatchPolicy::PositionalPrefix(_) => PolicyName::PositionalPrefix,
        }
    }
}
