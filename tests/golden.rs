//! Golden tests for the API closure engine.
//!
//! These tests pin the exact artifact text and verify determinism.

use api_surface::{
    ArgKind, CallableType, ClassEntity, Declaration, DeclaredType, FunctionEntity,
    InMemoryTypeCatalog, Profile, Scope, Session, Snapshot, SurfaceConfig,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn int() -> DeclaredType {
    DeclaredType::plain("builtins.int")
}

fn int_fn_catalog() -> InMemoryTypeCatalog {
    InMemoryTypeCatalog::new().with(FunctionEntity::typed(
        "pkg.fn",
        Scope::Module,
        CallableType::new(vec![ArgKind::Positional], vec![Some("a".into())], vec![int()], int()),
    ))
}

fn leaking_catalog() -> InMemoryTypeCatalog {
    InMemoryTypeCatalog::new()
        .with(
            ClassEntity::new("pkg._InternalType", Scope::Module)
                .with_mro(["pkg._InternalType", "builtins.object"]),
        )
        .with(FunctionEntity::typed(
            "pkg.public_fn",
            Scope::Module,
            CallableType::new(vec![], vec![], vec![], DeclaredType::plain("pkg._InternalType")),
        ))
}

fn run(
    catalog: &InMemoryTypeCatalog,
    declarations: &[Declaration],
    profile: Profile,
) -> Snapshot {
    let mut session = Session::new(
        SurfaceConfig::default()
            .with_includes(["pkg"])
            .with_profile(profile),
    );
    session.collect("pkg", declarations);
    session.finalize(catalog).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Golden Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn golden_single_function_minimal() {
    let snapshot = run(&int_fn_catalog(), &[Declaration::function("fn")], Profile::Minimal);

    let expected = r#"{
  "pkg.fn": {
    "kind": "module",
    "arg_kinds": [
      "positional"
    ],
    "arg_names": [
      "a"
    ],
    "arg_types": [
      "builtins.int"
    ],
    "ret_type": "builtins.int"
  }
}
"#;
    assert_eq!(snapshot.to_artifact_string().unwrap(), expected);
}

#[test]
fn golden_single_function_full_string() {
    let snapshot = run(&int_fn_catalog(), &[Declaration::function("fn")], Profile::FullString);

    assert_eq!(
        snapshot.to_artifact_string().unwrap(),
        "{\n  \"pkg.fn\": \"Gdef/FuncDef (pkg.fn) : def (a: builtins.int) -> builtins.int\"\n}\n"
    );
}

#[test]
fn golden_private_return_type_leaks() {
    let decls = [Declaration::class("_InternalType"), Declaration::function("public_fn")];
    let snapshot = run(&leaking_catalog(), &decls, Profile::FullString);

    assert_eq!(
        snapshot.to_artifact_string().unwrap(),
        concat!(
            "{\n",
            "  \"pkg._InternalType\": \"Gdef/TypeInfo (pkg._InternalType)\",\n",
            "  \"pkg.public_fn\": \"Gdef/FuncDef (pkg.public_fn) : def () -> pkg._InternalType\"\n",
            "}\n"
        )
    );
    let chain: Vec<&str> = snapshot
        .chain("pkg._InternalType")
        .unwrap()
        .iter()
        .map(|n| n.as_str())
        .collect();
    assert_eq!(chain, vec!["pkg.public_fn", "pkg._InternalType"]);
}

#[test]
fn golden_private_class_record() {
    let decls = [Declaration::class("_InternalType"), Declaration::function("public_fn")];
    let snapshot = run(&leaking_catalog(), &decls, Profile::Minimal);

    let artifact: serde_json::Value = serde_json::from_str(&snapshot.to_artifact_string().unwrap()).unwrap();
    assert_eq!(
        artifact["pkg._InternalType"],
        serde_json::json!({
            "kind": "module",
            "bases": [],
            "mro": ["pkg._InternalType", "builtins.object"]
        })
    );
    assert_eq!(
        artifact["pkg.public_fn"],
        serde_json::json!({
            "kind": "module",
            "arg_kinds": [],
            "arg_names": [],
            "arg_types": [],
            "ret_type": "pkg._InternalType"
        })
    );
}

#[test]
fn golden_empty_surface() {
    let snapshot = run(&InMemoryTypeCatalog::new(), &[], Profile::Minimal);
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.to_artifact_string().unwrap(), "{}\n");
}

#[test]
fn golden_no_includes_nothing_collected() {
    let mut session = Session::new(SurfaceConfig::default());
    assert_eq!(session.collect("pkg", &[Declaration::function("fn")]), 0);
    let snapshot = session.finalize(&int_fn_catalog()).unwrap();
    assert_eq!(snapshot.to_artifact_string().unwrap(), "{}\n");
}

#[test]
fn golden_non_ascii_include() {
    let catalog = InMemoryTypeCatalog::new().with(FunctionEntity::typed(
        "café.fn",
        Scope::Module,
        CallableType::new(vec![ArgKind::Positional], vec![Some("a".into())], vec![int()], int()),
    ));

    let mut session = Session::new(SurfaceConfig::default().with_includes(["café"]));
    assert_eq!(session.collect("café", &[Declaration::function("fn")]), 1);
    let snapshot = session.finalize(&catalog).unwrap();

    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.get("café.fn").is_some());
    assert_ne!(snapshot.to_artifact_string().unwrap(), "{}\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Determinism Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn determinism_100_runs() {
    let decls = [Declaration::function("public_fn"), Declaration::class("_InternalType")];
    let catalog = leaking_catalog();

    let first = run(&catalog, &decls, Profile::Minimal);
    let first_text = first.to_artifact_string().unwrap();
    let first_fp = first.fingerprint().unwrap();

    for i in 0..100 {
        let snapshot = run(&catalog, &decls, Profile::Minimal);
        assert_eq!(snapshot.to_artifact_string().unwrap(), first_text, "run {i} diverged");
        assert_eq!(snapshot.fingerprint().unwrap(), first_fp, "run {i} fingerprint diverged");
    }
}

#[test]
fn determinism_independent_of_collection_order() {
    let catalog = leaking_catalog();

    let forward = run(
        &catalog,
        &[Declaration::function("public_fn"), Declaration::class("_InternalType")],
        Profile::Minimal,
    );
    let reverse = run(
        &catalog,
        &[Declaration::class("_InternalType"), Declaration::function("public_fn")],
        Profile::Minimal,
    );

    assert_eq!(forward, reverse);
}
