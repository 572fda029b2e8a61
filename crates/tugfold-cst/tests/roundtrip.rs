// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Round-trip tests for the tugfold-cst parser.
//!
//! These tests verify that `parse(code).to_source() == code` for any input,
//! well-formed or not. Rewrites rely on this: bytes outside the edited
//! statements must come back exactly as they were read.
//!
//! # Test Organization
//!
//! - Fixture-based tests: files in `tests/fixtures/`
//! - Inline tests: individual constructs and trivia shapes

use std::path::PathBuf;

use difference::assert_diff;
use itertools::Itertools;
use rayon::prelude::*;
use tugfold_cst::{parse_module, Codegen, Node};

/// Helper to visualize whitespace differences in test output
fn visualize(s: &str) -> String {
    s.replace(' ', "▩").lines().join("↩\n")
}

fn assert_roundtrip(input: &str) {
    let parsed = parse_module(input);
    let generated = parsed.module.to_source();
    if generated != input {
        let got = visualize(&generated);
        let expected = visualize(input);
        assert_diff!(expected.as_ref(), got.as_ref(), "", 0);
    }
}

fn fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

// =============================================================================
// Fixture-based round-trip tests
// =============================================================================

#[test]
fn roundtrip_fixture_declarations() {
    let source = fixture("declarations.cs");
    assert!(!parse_module(&source).has_errors());
    assert_roundtrip(&source);
}

#[test]
fn roundtrip_fixture_control_flow() {
    let source = fixture("control_flow.cs");
    assert!(!parse_module(&source).has_errors());
    assert_roundtrip(&source);
}

#[test]
fn roundtrip_fixture_directives_crlf() {
    let source = fixture("directives_crlf.cs");
    assert!(!parse_module(&source).has_errors());
    assert_roundtrip(&source);
}

#[test]
fn roundtrip_fixture_malformed() {
    let source = fixture("malformed.cs");
    let parsed = parse_module(&source);
    assert!(parsed.has_errors());
    assert_roundtrip(&source);
}

#[test]
fn roundtrip_all_fixtures_in_parallel() {
    let names = [
        "declarations.cs",
        "control_flow.cs",
        "directives_crlf.cs",
        "malformed.cs",
    ];
    let sources: Vec<String> = names.iter().map(|name| fixture(name)).collect();
    let mismatches: Vec<&str> = sources
        .par_iter()
        .zip(names.par_iter())
        .filter(|(source, _)| parse_module(source).module.to_source() != **source)
        .map(|(_, name)| *name)
        .collect();
    assert!(mismatches.is_empty(), "round-trip failed: {:?}", mismatches);
}

// =============================================================================
// Inline round-trip tests
// =============================================================================

#[test]
fn roundtrip_empty_and_trivia_only() {
    assert_roundtrip("");
    assert_roundtrip("   \n\n");
    assert_roundtrip("// only a comment");
    assert_roundtrip("/* block */\n#define DEBUG\n");
}

#[test]
fn roundtrip_expressions() {
    assert_roundtrip("x = a + b * (c - d) / e % f;");
    assert_roundtrip("ok = !done && (a < b || a >= c) != flag;");
    assert_roundtrip("v = obj.items[i + 1].name(first, second);");
    assert_roundtrip("y = -x; z = default; w = default(int?);");
    assert_roundtrip("s = \"a \\\"quoted\\\" word\"; n = 0x1F; r = 1.5f;");
}

#[test]
fn roundtrip_nested_blocks_and_comments() {
    assert_roundtrip("{\n  { int a = 1; /* inner */ }\n  // tail\n}\n");
    assert_roundtrip("if (a) { } else { b = 1; }  // done\n");
}

#[test]
fn roundtrip_error_recovery() {
    assert_roundtrip("int = 5;");
    assert_roundtrip("} x = 1;");
    assert_roundtrip("if x) y = 1;");
    assert_roundtrip("while (a b = 1;");
    assert_roundtrip("x = @;");
    assert_roundtrip("/* never closed");
}

#[test]
fn module_span_covers_all_statements() {
    let source = "  int x = 0;\n  x = 5;  \n";
    let module = parse_module(source).module;
    assert_eq!(module.full_span().start, 0);
    assert_eq!(module.full_span().end, source.len());
    let first = module.body[0].span();
    let second = module.body[1].span();
    assert_eq!(&source[first.start..first.end], "int x = 0;");
    assert_eq!(&source[second.start..second.end], "x = 5;");
}
