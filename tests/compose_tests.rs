//! End-to-end composition through the library API.

use declsynth::compose::{
    implements, Action, Builder, Codes, ComposeError, ComposeOptions, Operation, Param, Step,
};
use declsynth::files::{load_action, load_feed, load_objects};
use declsynth::scanner::{scan_package, ScanOptions};
use declsynth::types::{FuncDecl, Object, PackageIndex, SymbolPath};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn people() -> PackageIndex {
    let feed = load_feed(&fixture("people.feed.json")).unwrap();
    scan_package(&feed, ScanOptions::default()).unwrap()
}

fn method_t() -> Operation {
    Operation::invoke(FuncDecl {
        name: "t".into(),
        path: SymbolPath::from_segments(["example.com/people", "person.go", "Person.t"]),
        ..Default::default()
    })
}

fn builder() -> Builder {
    Builder::new(Codes {
        packages: vec![people()],
        predefines: vec![Object::new("a1", "string"), Object::new("a2", "Person")],
    })
    .unwrap()
}

#[test]
fn test_chained_method_calls() {
    let action = Action {
        steps: vec![
            Step::new(method_t())
                .with_result("rs")
                .with_arg(Param::object("a1")),
            Step::new(method_t())
                .with_result("rs2")
                .with_arg(Param::object("rs")),
        ],
    };
    let ctx = builder()
        .build_action(&action, ComposeOptions::default())
        .unwrap();

    assert_eq!(ctx.code_lines, vec!["rs := person.t(a1)", "rs2 := person.t(rs)"]);
    assert!(ctx.used.contains_key("a1"));
    assert!(ctx.used.contains_key("person"));
    assert!(!ctx.used.contains_key("a2"));
    assert_eq!(ctx.vars["rs"].ty, "string");
    assert_eq!(ctx.imports["people"].id, "example.com/people");
}

#[test]
fn test_reused_result() {
    let b = builder();
    let mut ab = b.new_action_builder(ComposeOptions::default()).unwrap();

    let first = Step::new(method_t())
        .with_result("rs")
        .with_arg(Param::object("a1"));
    assert_eq!(ab.build_step(&first).unwrap(), "rs := person.t(a1)");

    let again = Step::new(method_t())
        .with_result("rs")
        .with_arg(Param::object("rs"));
    assert_eq!(ab.build_step(&again).unwrap(), "rs = person.t(rs)");

    let ctx = ab.into_context();
    assert!(ctx.used.contains_key("rs"));
    assert!(ctx.vars.contains_key("rs"));
    assert_eq!(ctx.code, "rs := person.t(a1)\nrs = person.t(rs)");
}

#[test]
fn test_fixture_action_with_vars() {
    let b = Builder::new(Codes {
        packages: vec![people()],
        predefines: load_objects(&fixture("predefines.json")).unwrap(),
    })
    .unwrap();
    let action = load_action(&fixture("action.json")).unwrap();

    let ab = b.new_action_builder(ComposeOptions::default()).unwrap();
    assert_eq!(
        ab.error_result_name(&action.steps[2]).unwrap().as_deref(),
        Some("err")
    );
    let ctx = ab.build_action(&action).unwrap();
    assert_eq!(ctx.code_lines.len(), 4);
    assert_eq!(ctx.code_lines[2], "ok, err := person.Rename(p.Name)");

    let options = ComposeOptions::default().with_vars([Object::new("msg", "string")]);
    let ctx = b.build_action(&action, options).unwrap();
    assert_eq!(ctx.code_lines[1], "msg = person.Greet(\"hello\")");
}

#[test]
fn test_first_failure_stops_the_action() {
    let action = Action {
        steps: vec![
            Step::new(Operation::New)
                .with_result("a")
                .with_arg(Param::object("strings.Builder")),
            Step::new(method_t()).with_arg(Param::object("nowhere")),
            Step::new(method_t()).with_arg(Param::object("a1")),
        ],
    };
    let err = builder()
        .build_action(&action, ComposeOptions::default())
        .unwrap_err();
    match &err {
        ComposeError::Step { index, .. } => assert_eq!(*index, 1),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.root_cause().to_string(), "symbol not found: nowhere");
}

#[test]
fn test_interface_conformance() {
    let packages = vec![people()];
    assert_eq!(implements(&packages, "Person", "Greeter"), Ok(true));
    assert_eq!(implements(&packages, "Address", "Greeter"), Ok(false));
}
