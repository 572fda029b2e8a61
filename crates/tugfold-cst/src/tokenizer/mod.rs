// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Tokenizer for the reference C-family language.
//!
//! The tokenizer is lossless: concatenating every token's leading trivia,
//! text, and trailing trivia reproduces the input exactly. It never fails;
//! malformed input produces [`TokenKind::Unknown`] tokens or truncated
//! literals together with a [`ParseDiagnostic`].

pub mod trivia;

use tugfold_core::Span;

use crate::parser::{ParseDiagnostic, ParserError};
pub use trivia::{Trivia, TriviaKind, TriviaList};

/// Token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    IntegerLiteral,
    RealLiteral,
    StringLiteral,
    // Keywords
    Const,
    If,
    Else,
    While,
    Return,
    True,
    False,
    Null,
    Default,
    // Punctuation
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Semicolon,
    Comma,
    Dot,
    Question,
    // Operators
    Equals,
    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,
    PercentEquals,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    EqualsEquals,
    BangEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    AmpAmp,
    BarBar,
    // Special
    Unknown,
    EndOfFile,
}

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("const", TokenKind::Const),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("return", TokenKind::Return),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("null", TokenKind::Null),
    ("default", TokenKind::Default),
];

// Two-character operators must come before their one-character prefixes.
const PUNCTUATION: &[(&str, TokenKind)] = &[
    ("==", TokenKind::EqualsEquals),
    ("!=", TokenKind::BangEquals),
    ("<=", TokenKind::LessEquals),
    (">=", TokenKind::GreaterEquals),
    ("&&", TokenKind::AmpAmp),
    ("||", TokenKind::BarBar),
    ("+=", TokenKind::PlusEquals),
    ("-=", TokenKind::MinusEquals),
    ("*=", TokenKind::StarEquals),
    ("/=", TokenKind::SlashEquals),
    ("%=", TokenKind::PercentEquals),
    ("{", TokenKind::OpenBrace),
    ("}", TokenKind::CloseBrace),
    ("(", TokenKind::OpenParen),
    (")", TokenKind::CloseParen),
    ("[", TokenKind::OpenBracket),
    ("]", TokenKind::CloseBracket),
    (";", TokenKind::Semicolon),
    (",", TokenKind::Comma),
    (".", TokenKind::Dot),
    ("?", TokenKind::Question),
    ("=", TokenKind::Equals),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    ("!", TokenKind::Bang),
    ("<", TokenKind::Less),
    (">", TokenKind::Greater),
];

impl TokenKind {
    /// The fixed text of keyword and punctuation kinds.
    ///
    /// Returns `None` for kinds whose text varies (identifiers, literals).
    pub fn fixed_text(&self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .chain(PUNCTUATION.iter())
            .find(|(_, kind)| kind == self)
            .map(|(text, _)| *text)
    }

    /// True for `=` and the compound assignment operators.
    pub fn is_assignment_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Equals
                | TokenKind::PlusEquals
                | TokenKind::MinusEquals
                | TokenKind::StarEquals
                | TokenKind::SlashEquals
                | TokenKind::PercentEquals
        )
    }

    /// The compound assignment operator for an arithmetic binary operator.
    pub fn compound_assignment(&self) -> Option<TokenKind> {
        match self {
            TokenKind::Plus => Some(TokenKind::PlusEquals),
            TokenKind::Minus => Some(TokenKind::MinusEquals),
            TokenKind::Star => Some(TokenKind::StarEquals),
            TokenKind::Slash => Some(TokenKind::SlashEquals),
            TokenKind::Percent => Some(TokenKind::PercentEquals),
            _ => None,
        }
    }
}

/// A token with its attached trivia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token kind.
    pub kind: TokenKind,
    /// The exact token text.
    pub text: String,
    /// Span of `text` in the source. Synthesized tokens carry an empty span
    /// at offset 0 until the document is re-parsed.
    pub span: Span,
    /// Trivia before the token.
    pub leading: TriviaList,
    /// Trivia after the token, through the end of its line.
    pub trailing: TriviaList,
}

impl Token {
    /// Create a token that does not come from source text.
    ///
    /// The text is the kind's fixed text, or `text` when given.
    pub fn synthetic(kind: TokenKind, text: Option<&str>) -> Self {
        let text = text
            .or_else(|| kind.fixed_text())
            .unwrap_or_default()
            .to_string();
        Token {
            kind,
            text,
            span: Span::default(),
            leading: TriviaList::new(),
            trailing: TriviaList::new(),
        }
    }

    /// A zero-width placeholder for a token the parser expected but did not
    /// find at `offset`.
    pub fn missing(kind: TokenKind, offset: usize) -> Self {
        Token {
            kind,
            text: String::new(),
            span: Span::empty_at(offset),
            leading: TriviaList::new(),
            trailing: TriviaList::new(),
        }
    }

    /// True if this is a zero-width placeholder for an expected token.
    pub fn is_missing(&self) -> bool {
        self.text.is_empty() && self.kind != TokenKind::EndOfFile
    }

    /// True if the token has the given kind.
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Replace the leading trivia.
    pub fn with_leading(mut self, leading: TriviaList) -> Self {
        self.leading = leading;
        self
    }

    /// Replace the trailing trivia.
    pub fn with_trailing(mut self, trailing: TriviaList) -> Self {
        self.trailing = trailing;
        self
    }

    /// Span including leading and trailing trivia.
    pub fn full_span(&self) -> Span {
        Span::new(
            self.span.start.saturating_sub(self.leading.width()),
            self.span.end + self.trailing.width(),
        )
    }
}

/// Tokenize `source`.
///
/// The final token is always [`TokenKind::EndOfFile`], whose leading trivia
/// holds whatever follows the last real token.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<ParseDiagnostic>) {
    let mut cursor = Cursor {
        src: source,
        pos: 0,
        at_line_start: true,
        errors: Vec::new(),
    };
    let mut tokens = Vec::new();

    loop {
        let leading = cursor.scan_trivia(false);
        let start = cursor.pos;
        if start >= source.len() {
            tokens.push(Token {
                kind: TokenKind::EndOfFile,
                text: String::new(),
                span: Span::empty_at(start),
                leading,
                trailing: TriviaList::new(),
            });
            break;
        }
        let (kind, len) = cursor.scan_token();
        cursor.pos += len;
        cursor.at_line_start = false;
        let trailing = cursor.scan_trivia(true);
        tokens.push(Token {
            kind,
            text: source[start..start + len].to_string(),
            span: Span::new(start, start + len),
            leading,
            trailing,
        });
    }

    (tokens, cursor.errors)
}

struct Cursor<'s> {
    src: &'s str,
    pos: usize,
    at_line_start: bool,
    errors: Vec<ParseDiagnostic>,
}

impl<'s> Cursor<'s> {
    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn error(&mut self, error: ParserError, span: Span) {
        self.errors.push(ParseDiagnostic { error, span });
    }

    fn scan_trivia(&mut self, trailing: bool) -> TriviaList {
        let mut list = TriviaList::new();
        loop {
            let rest = self.rest();
            let Some(c) = rest.chars().next() else {
                break;
            };
            let (kind, len) = match c {
                ' ' | '\t' => {
                    let len = rest
                        .find(|ch| ch != ' ' && ch != '\t')
                        .unwrap_or(rest.len());
                    (TriviaKind::Whitespace, len)
                }
                '\n' => (TriviaKind::EndOfLine, 1),
                '\r' if rest.starts_with("\r\n") => (TriviaKind::EndOfLine, 2),
                '/' if rest.starts_with("//") => {
                    (TriviaKind::LineComment, line_length(rest))
                }
                '/' if rest.starts_with("/*") => {
                    let len = match rest[2..].find("*/") {
                        Some(i) => i + 4,
                        None => {
                            self.error(
                                ParserError::UnterminatedComment,
                                Span::new(self.pos, self.src.len()),
                            );
                            rest.len()
                        }
                    };
                    (TriviaKind::BlockComment, len)
                }
                '#' if !trailing && self.at_line_start => {
                    (TriviaKind::Directive, line_length(rest))
                }
                _ => break,
            };

            list.push(Trivia::new(kind, &rest[..len]));
            self.pos += len;
            match kind {
                TriviaKind::EndOfLine => {
                    self.at_line_start = true;
                    if trailing {
                        break;
                    }
                }
                TriviaKind::Whitespace => {}
                _ => self.at_line_start = false,
            }
        }
        list
    }

    fn scan_token(&mut self) -> (TokenKind, usize) {
        let rest = self.rest();
        let c = rest.chars().next().unwrap_or('\0');

        if c.is_ascii_alphabetic() || c == '_' {
            let len = rest
                .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
                .unwrap_or(rest.len());
            let word = &rest[..len];
            let kind = KEYWORDS
                .iter()
                .find(|(text, _)| *text == word)
                .map(|(_, kind)| *kind)
                .unwrap_or(TokenKind::Identifier);
            return (kind, len);
        }

        if c.is_ascii_digit() {
            return scan_number(rest);
        }

        if c == '"' {
            return self.scan_string(rest);
        }

        if let Some((text, kind)) = PUNCTUATION.iter().find(|(text, _)| rest.starts_with(text)) {
            return (*kind, text.len());
        }

        let len = c.len_utf8();
        self.error(
            ParserError::UnexpectedChar(c),
            Span::new(self.pos, self.pos + len),
        );
        (TokenKind::Unknown, len)
    }

    fn scan_string(&mut self, rest: &str) -> (TokenKind, usize) {
        let mut escaped = false;
        for (i, ch) in rest.char_indices().skip(1) {
            match ch {
                '\\' if !escaped => escaped = true,
                '"' if !escaped => return (TokenKind::StringLiteral, i + 1),
                '\n' | '\r' => {
                    self.error(
                        ParserError::UnterminatedString,
                        Span::new(self.pos, self.pos + i),
                    );
                    return (TokenKind::StringLiteral, i);
                }
                _ => escaped = false,
            }
        }
        self.error(
            ParserError::UnterminatedString,
            Span::new(self.pos, self.src.len()),
        );
        (TokenKind::StringLiteral, rest.len())
    }
}

fn line_length(rest: &str) -> usize {
    rest.find(['\r', '\n']).unwrap_or(rest.len())
}

fn scan_number(rest: &str) -> (TokenKind, usize) {
    let bytes = rest.as_bytes();
    let take_while = |from: usize, pred: fn(u8) -> bool| {
        from + bytes[from..].iter().take_while(|b| pred(**b)).count()
    };

    if rest.starts_with("0x") || rest.starts_with("0X") {
        let end = take_while(2, |b| b.is_ascii_hexdigit());
        let end = take_while(end, |b| b.is_ascii_alphabetic());
        return (TokenKind::IntegerLiteral, end);
    }

    let mut kind = TokenKind::IntegerLiteral;
    let mut end = take_while(0, |b| b.is_ascii_digit());
    if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(|b| b.is_ascii_digit()) {
        kind = TokenKind::RealLiteral;
        end = take_while(end + 1, |b| b.is_ascii_digit());
    }
    // Type suffixes: 0L, 1.5f, 2m
    let end = take_while(end, |b| b.is_ascii_alphabetic());
    (kind, end)
}
