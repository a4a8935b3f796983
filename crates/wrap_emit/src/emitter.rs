use itertools::Itertools;
use wrap_model::{ManualOverrideSet, OperationSignature};

use crate::matcher::SignatureMatcher;

/// What the class artifact does with one target operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberDecision {
    /// No hand-written member covers it; generate a forwarding body.
    Forward,
    /// A manual override stands in for it; emit nothing.
    Suppressed,
}

impl MemberDecision {
    pub fn decide<M>(target: &OperationSignature, overrides: &ManualOverrideSet, matcher: &M) -> Self
        where M: SignatureMatcher
    {
        let decision = if matcher.is_overridden(target, overrides) {
            MemberDecision::Suppressed
        } else {
            MemberDecision::Forward
        };
        log::debug!("{target}: {decision:?}");
        decision
    }
}

/// Renders target operations as interface declarations and forwarding
/// class members. Constructors render as nothing.
#[derive(Debug, Clone)]
pub struct MemberEmitter {
    indent: String,
}

impl MemberEmitter {
    pub fn new<S: Into<String>>(indent: S) -> Self {
        Self { indent: indent.into() }
    }

    /// `<access> <return> <Name>(<type> <name>, ...)`, access and return
    /// type lower-cased.
    pub fn declaration_head(op: &OperationSignature) -> String {
        format!(
            "{} {} {}({})",
            op.accessibility.keyword(),
            op.return_type.to_lowercase(),
            op.name,
            op.parameters.iter().map(|p| format!("{} {}", p.type_name, p.name)).join(", ")
        )
    }

    pub fn emit_interface_member(&self, op: &OperationSignature) -> Option<String> {
        if op.is_constructor() {
            return None;
        }
        Some(format!("{};", Self::declaration_head(op)))
    }

    pub fn emit_class_member(&self, op: &OperationSignature, owner_field: &str, render_body: bool) -> Option<String> {
        if op.is_constructor() {
            return None;
        }
        let head = Self::declaration_head(op);
        if !render_body {
            return Some(format!("{head};"));
        }
        let call = format!(
            "{}.{}({});",
            owner_field,
            op.name,
            op.parameters.iter().map(|p| p.name.as_str()).join(", ")
        );
        let statement = if op.returns_void() { call } else { format!("return {call}") };
        Some(format!("{head} {{\n{}{statement}\n}}", self.indent))
    }

    pub fn render_class_member(&self, op: &OperationSignature, decision: MemberDecision, owner_field: &str) -> Option<String> {
        match decision {
            MemberDecision::Forward => self.emit_class_member(op, owner_field, true),
            MemberDecision::Suppressed => None,
        }
    }
}

impl Default for MemberEmitter {
    fn default() -> Self {
        Self::new("    ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{MatchPolicy, PositionalPrefix};

    fn op(s: &str) -> OperationSignature {
        s.parse().unwrap()
    }

    #[test]
    fn interface_member_lowercases_access_and_return() {
        let e = MemberEmitter::default();
        assert_eq!(
            e.emit_interface_member(&op("public String Describe(Int32 depth, bool verbose)")).unwrap(),
            "public string Describe(Int32 depth, bool verbose);"
        );
        assert_eq!(e.emit_interface_member(&op("ctor public ToWrap()")), None);
    }

    #[test]
    fn class_member_forwards_in_order() {
        let e = MemberEmitter::default();
        let target = op("public void TestFunction(string ab, bool test, int number)");
        assert_eq!(
            e.emit_class_member(&target, "_ToWrap", true).unwrap(),
            "public void TestFunction(string ab, bool test, int number) {\n    _ToWrap.TestFunction(ab, test, number);\n}"
        );
        assert_eq!(
            e.emit_class_member(&target, "_ToWrap", false).unwrap(),
            "public void TestFunction(string ab, bool test, int number);"
        );
    }

    #[test]
    fn non_void_result_is_returned() {
        let e = MemberEmitter::new("\t");
        assert_eq!(
            e.emit_class_member(&op("internal int Count()"), "_Bag", true).unwrap(),
            "internal int Count() {\n\treturn _Bag.Count();\n}"
        );
    }

    #[test]
    fn void_is_recognized_in_any_case() {
        let e = MemberEmitter::new("\t");
        assert_eq!(
            e.emit_class_member(&op("public Void Run()"), "_T", true).unwrap(),
            "public void Run() {\n\t_T.Run();\n}"
        );
        assert_eq!(
            e.emit_class_member(&op("public VOID Stop(int code)"), "_T", true).unwrap(),
            "public void Stop(int code) {\n\t_T.Stop(code);\n}"
        );
    }

    #[test]
    fn suppressed_renders_nothing() {
        let target = op("public void Run(string name)");
        let overrides = vec![op("public void Run()")].into_iter().collect::<ManualOverrideSet>();
        let strict = MatchPolicy::default();
        assert_eq!(MemberDecision::decide(&target, &overrides, &strict), MemberDecision::Forward);
        let lenient: MatchPolicy = PositionalPrefix.into();
        let decision = MemberDecision::decide(&target, &overrides, &lenient);
        assert_eq!(decision, MemberDecision::Suppressed);
        assert_eq!(MemberEmitter::default().render_class_member(&target, decision, "_T"), None);
    }
}
