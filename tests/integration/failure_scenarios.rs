//! Failure scenarios: every error class aborts the pass

use super::test_utils::{collect_outputs, generator_for, run_def, source_root_with_templates};
use treegen::error::GenError;
use treegen::tree::key::KeyNode;

/// A run with no root keys aborts before anything is written.
#[test]
fn test_empty_root_sequence_writes_nothing() {
    let temp_dir = source_root_with_templates(&[("recipe.tera", "body")]);
    let generator = generator_for(temp_dir.path());

    let good = run_def("recipe", "recipe.tera", vec![KeyNode::leaf("meals")]);
    let bad = run_def("summary", "recipe.tera", vec![]);

    let err = generator.generate(&[good, bad]).unwrap_err();
    assert!(matches!(err, GenError::Config(_)));
    assert!(collect_outputs(temp_dir.path()).is_empty());
}

/// An unknown template id aborts before anything is written.
#[test]
fn test_unknown_template_writes_nothing() {
    let temp_dir = source_root_with_templates(&[("recipe.tera", "body")]);
    let generator = generator_for(temp_dir.path());

    let runs = vec![run_def("recipe", "missing.tera", vec![KeyNode::leaf("meals")])];
    let err = generator.generate(&runs).unwrap_err();
    assert!(matches!(err, GenError::TemplateNotFound { .. }));
    assert!(collect_outputs(temp_dir.path()).is_empty());
}

/// A template referencing an undefined variable fails the pass with a
/// render error carrying the run name.
#[test]
fn test_render_failure_aborts_pass() {
    let temp_dir = source_root_with_templates(&[("recipe.tera", "{{ no_such_variable }}")]);
    let generator = generator_for(temp_dir.path());

    let runs = vec![run_def("recipe", "recipe.tera", vec![KeyNode::leaf("meals")])];
    let err = generator.generate(&runs).unwrap_err();
    match err {
        GenError::Render { run, .. } => assert_eq!(run, "recipe"),
        other => panic!("expected render error, got {:?}", other),
    }
    assert!(collect_outputs(temp_dir.path()).is_empty());
}

/// Duplicate sibling keys are a declaration error.
#[test]
fn test_duplicate_sibling_keys_rejected() {
    let temp_dir = source_root_with_templates(&[("recipe.tera", "body")]);
    let generator = generator_for(temp_dir.path());

    let runs = vec![run_def(
        "recipe",
        "recipe.tera",
        vec![KeyNode::branch(
            "meals",
            vec![KeyNode::leaf("stew"), KeyNode::leaf("stew")],
        )],
    )];
    let err = generator.generate(&runs).unwrap_err();
    assert!(matches!(err, GenError::InvalidKey { .. }));
    assert!(collect_outputs(temp_dir.path()).is_empty());
}

/// Keys containing path separators never reach the filesystem.
#[test]
fn test_separator_key_rejected() {
    let temp_dir = source_root_with_templates(&[("recipe.tera", "body")]);
    let generator = generator_for(temp_dir.path());

    let runs = vec![run_def(
        "recipe",
        "recipe.tera",
        vec![KeyNode::leaf("../escape")],
    )];
    assert!(generator.generate(&runs).is_err());
    assert!(collect_outputs(temp_dir.path()).is_empty());
}

/// Earlier outputs survive a mid-walk failure (no rollback).
#[test]
fn test_no_rollback_after_partial_write() {
    let temp_dir = source_root_with_templates(&[
        ("good.tera", "fine"),
        ("bad.tera", "{{ no_such_variable }}"),
    ]);
    let generator = generator_for(temp_dir.path());

    // "alpha" sorts before "omega", so the good entry is written first
    let good = run_def("good", "good.tera", vec![KeyNode::leaf("alpha")]);
    let bad = run_def("bad", "bad.tera", vec![KeyNode::leaf("omega")]);

    assert!(generator.generate(&[good, bad]).is_err());
    let outputs = collect_outputs(temp_dir.path());
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].0, "alpha/good.rst");
}
