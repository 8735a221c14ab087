// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Strict ECMAScript syntax check backed by boa_engine

use std::thread;

use boa_engine::{Context, Script, Source};
use tracing::debug;

use super::lexer::{tokenize, Token, TokenKind};

/// Deepest bracket nesting handed to a recursive parser
pub const MAX_NESTING: usize = 256;

/// Stack of the thread boa parses on; sized for `MAX_NESTING` levels
const PARSER_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Upper bound on the bracket nesting of a token stream.
///
/// Template substitutions and regex bodies are not tokenized, so every
/// opening bracket or backtick inside them counts as one more level.
pub fn nesting_depth(tokens: &[Token]) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    for token in tokens {
        match token.kind {
            TokenKind::Punctuator => match token.text.as_str() {
                "(" | "[" | "{" => {
                    depth += 1;
                    deepest = deepest.max(depth);
                }
                ")" | "]" | "}" => depth = depth.saturating_sub(1),
                _ => {}
            },
            TokenKind::Template | TokenKind::RegExp => {
                let openers = token
                    .text
                    .chars()
                    .filter(|c| matches!(c, '(' | '[' | '{' | '`'))
                    .count();
                deepest = deepest.max(depth + openers);
            }
            _ => {}
        }
    }
    deepest
}

/// Whether `code` parses as an ECMAScript script.
///
/// Only parses, never evaluates. Empty or whitespace-only input is not a
/// script, and neither is input that does not tokenize or nests deeper
/// than [`MAX_NESTING`]. A parser panic counts as a failed parse.
pub fn is_valid_script(code: &str) -> bool {
    if code.trim().is_empty() {
        return false;
    }
    match tokenize(code) {
        Ok(tokens) if nesting_depth(&tokens) <= MAX_NESTING => parse_strict(code),
        Ok(_) => {
            debug!(length = code.len(), "script nests too deep for a strict parse");
            false
        }
        Err(_) => false,
    }
}

fn parse_strict(code: &str) -> bool {
    thread::scope(|scope| {
        let spawned = thread::Builder::new()
            .name("js-syntax".into())
            .stack_size(PARSER_STACK_SIZE)
            .spawn_scoped(scope, || {
                let mut context = Context::default();
                Script::parse(Source::from_bytes(code), None, &mut context).is_ok()
            });

        match spawned {
            Ok(handle) => handle.join().unwrap_or_else(|_| {
                debug!(length = code.len(), "JavaScript parser panicked");
                false
            }),
            Err(e) => {
                debug!(error = %e, "could not start parser thread");
                false
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested(open: &str, inner: &str, close: &str, levels: usize) -> String {
        format!("{}{}{}", open.repeat(levels), inner, close.repeat(levels))
    }

    #[test]
    fn test_valid_scripts() {
        assert!(is_valid_script("alert(1)"));
        assert!(is_valid_script("function f(a) { return a * 2; }\nf(3);"));
        assert!(is_valid_script("var s = 'x'; document.write(s);"));
    }

    #[test]
    fn test_invalid_scripts() {
        assert!(!is_valid_script("function ( {"));
        assert!(!is_valid_script("\"><script>alert(1)</script>"));
        assert!(!is_valid_script(""));
        assert!(!is_valid_script("   \n"));
    }

    #[test]
    fn test_does_not_evaluate() {
        assert!(is_valid_script("while (true) {}"));
    }

    #[test]
    fn test_nesting_depth() {
        let depth = |src: &str| nesting_depth(&tokenize(src).unwrap());
        assert_eq!(depth("a(b[c], {d: 1})"), 2);
        assert_eq!(depth("))) ("), 1);
        assert_eq!(depth("f(`${g(`${h()}`)}`)"), 1 + 6);
        assert_eq!(depth("'((((('"), 0);
    }

    #[test]
    fn test_deep_nesting_is_rejected_without_parsing() {
        assert!(!is_valid_script(&format!("x={}", nested("[", "1", "]", 300))));
        assert!(!is_valid_script(&nested("(", "1", ")", 100_000)));
    }

    #[test]
    fn test_moderate_nesting_still_parses() {
        assert!(is_valid_script(&format!("x={};", nested("[", "1", "]", MAX_NESTING))));
    }
}
