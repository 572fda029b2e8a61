// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Default-value recognition.
//!
//! An expression is *default-determinate* for a type when it provably
//! evaluates to that type's zero value, the same value `default(T)` yields.
//! Parentheses are looked through; anything that needs evaluation beyond a
//! literal (calls, names, arithmetic) is never default-determinate.

use crate::nodes::{Expression, LiteralKind, TypeRef};
use crate::tokenizer::TokenKind;

const INTEGRAL_TYPES: &[&str] = &[
    "sbyte", "byte", "short", "ushort", "int", "uint", "long", "ulong", "nint", "nuint",
];
const REAL_TYPES: &[&str] = &["float", "double", "decimal"];
/// Value types whose zero has no literal spelling here.
const OTHER_VALUE_TYPES: &[&str] = &["char"];

/// How a declared type's zero value can be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    Integral,
    Real,
    Bool,
    OtherValue,
    /// `var`: the type comes from the initializer, so no default exists.
    Inferred,
    Reference,
}

impl TypeCategory {
    /// Categorize a type reference. `T?` is always a reference-like type.
    pub fn of(ty: &TypeRef) -> TypeCategory {
        let name = ty.name();
        if name == "var" {
            return TypeCategory::Inferred;
        }
        if ty.is_nullable() {
            return TypeCategory::Reference;
        }
        if INTEGRAL_TYPES.contains(&name) {
            TypeCategory::Integral
        } else if REAL_TYPES.contains(&name) {
            TypeCategory::Real
        } else if name == "bool" {
            TypeCategory::Bool
        } else if OTHER_VALUE_TYPES.contains(&name) {
            TypeCategory::OtherValue
        } else {
            TypeCategory::Reference
        }
    }
}

/// True if `value` is the zero value of `ty`.
pub fn is_default_value(ty: &TypeRef, value: &Expression) -> bool {
    let category = TypeCategory::of(ty);
    if category == TypeCategory::Inferred {
        return false;
    }

    let value = value.strip_parens();
    if let Expression::Default(default) = value {
        return match &default.operand {
            None => true,
            Some(operand) => operand.ty.same_type(ty),
        };
    }

    match category {
        TypeCategory::Integral => is_integer_zero(value, true),
        TypeCategory::Real => is_integer_zero(value, false) || is_real_zero(value),
        TypeCategory::Bool => is_literal(value, LiteralKind::False),
        TypeCategory::Reference => is_literal(value, LiteralKind::Null),
        TypeCategory::OtherValue | TypeCategory::Inferred => false,
    }
}

fn is_literal(value: &Expression, kind: LiteralKind) -> bool {
    matches!(value, Expression::Literal(literal) if literal.kind == kind)
}

/// `0`, `0x0`, `0L`, and (when `allow_negated`) `-0`.
fn is_integer_zero(value: &Expression, allow_negated: bool) -> bool {
    match value {
        Expression::Literal(literal) if literal.kind == LiteralKind::Integer => {
            integer_text_is_zero(&literal.token.text)
        }
        Expression::Unary(unary) if allow_negated && unary.op.is(TokenKind::Minus) => {
            is_integer_zero(unary.operand.strip_parens(), false)
        }
        _ => false,
    }
}

fn integer_text_is_zero(text: &str) -> bool {
    let digits = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => hex.trim_end_matches(['u', 'U', 'l', 'L']),
        None => text.trim_end_matches(|c: char| c.is_ascii_alphabetic()),
    };
    !digits.is_empty() && digits.chars().all(|c| c == '0')
}

/// `0.0`, `0.00f`, `0d`.
fn is_real_zero(value: &Expression) -> bool {
    let Expression::Literal(literal) = value else {
        return false;
    };
    if literal.kind != LiteralKind::Real {
        return false;
    }
    let digits = literal
        .token
        .text
        .trim_end_matches(|c: char| c.is_ascii_alphabetic());
    digits.chars().any(|c| c == '0') && digits.chars().all(|c| c == '0' || c == '.')
}
