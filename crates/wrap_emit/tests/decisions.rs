use itertools::Itertools;
use wrap_emit::*;
use wrap_model::{ManualOverrideSet, OperationSignature};

fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn op(s: &str) -> OperationSignature {
    s.parse().expect("signature should read")
}

fn policies() -> Vec<MatchPolicy> {
    vec![StrictSignature.into(), PositionalPrefix.into()]
}

#[test]
fn only_uncovered_overload_is_forwarded() {
    setup();
    let three = op("public void TestFunction(string ab, bool test, int number)");
    let two = op("public void TestFunction(string ab, bool test)");
    let overrides: ManualOverrideSet = vec![three.clone()].into();

    for policy in policies() {
        assert_eq!(MemberDecision::decide(&three, &overrides, &policy), MemberDecision::Suppressed);
        assert_eq!(MemberDecision::decide(&two, &overrides, &policy), MemberDecision::Forward, "{policy:?}");
    }
}

#[test]
fn override_order_is_irrelevant() {
    setup();
    let manual = vec![
        op("public void Run(string name)"),
        op("public int Count()"),
        op("public void Stop(bool force, int timeout)"),
    ];
    let targets = vec![
        op("public void Run(String name)"),
        op("public int Count(int start)"),
        op("public void Stop(bool force, int timeout)"),
        op("public void Pause()"),
    ];
    for policy in policies() {
        let expected = targets.iter()
            .map(|t| MemberDecision::decide(t, &manual.clone().into(), &policy))
            .collect_vec();
        for perm in manual.iter().cloned().permutations(manual.len()) {
            let overrides: ManualOverrideSet = perm.into_iter().collect();
            let decisions = targets.iter()
                .map(|t| MemberDecision::decide(t, &overrides, &policy))
                .collect_vec();
            assert_eq!(decisions, expected);
        }
    }
}

#[test]
fn strict_and_prefix_disagree_only_on_shorter_manual() {
    setup();
    let manual: ManualOverrideSet = vec![op("public int Count()")].into();
    let target = op("public int Count(int start)");
    let strict: MatchPolicy = StrictSignature.into();
    let prefix: MatchPolicy = PositionalPrefix.into();
    assert!(!strict.is_overridden(&target, &manual));
    assert!(prefix.is_overridden(&target, &manual));
}

#[test]
fn interface_declares_every_method_regardless_of_overrides() {
    setup();
    let emitter = MemberEmitter::default();
    let ops = vec![
        op("ctor public ToWrap()"),
        op("public void TestFunction(string ab, bool test, int number)"),
        op("public void TestFunction(string ab, bool test)"),
    ];
    let lines = ops.iter().filter_map(|o| emitter.emit_interface_member(o)).collect_vec();
    assert_eq!(lines, vec![
        "public void TestFunction(string ab, bool test, int number);",
        "public void TestFunction(string ab, bool test);",
    ]);
}
