// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Structural syntax tree over a token stream
//!
//! The tree only keeps the nodes feature extraction looks at: functions,
//! calls and the bracketed groups that nest them. Everything between is
//! skipped, so statements the parser does not understand cost nothing. A
//! bracket that closes the wrong group, or a group left open at the end of
//! input, makes the script unparseable.

use std::fmt;

use super::lexer::{Token, TokenKind};

/// Node categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    FunctionDeclaration,
    FunctionExpression,
    CallExpression,
    NewExpression,
    Block,
    Parenthesized,
    Bracketed,
}

/// A node of the syntax tree. The root owns every descendant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    /// Declared name for functions, dotted callee path for calls
    pub name: Option<String>,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    fn new(kind: NodeKind, name: Option<String>, children: Vec<SyntaxNode>) -> Self {
        Self {
            kind,
            name,
            children,
        }
    }

    /// Visit this node and every descendant, depth-first, parents first
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a SyntaxNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Why a token stream has no tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A closing bracket that does not match the open group
    Unbalanced { found: String, at: usize },
    /// Input ended inside a group
    Unclosed { expected: &'static str },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Unbalanced { found, at } => write!(f, "unexpected '{}' at token {}", found, at),
            ParseError::Unclosed { expected } => write!(f, "missing '{}' at end of input", expected),
        }
    }
}

impl std::error::Error for ParseError {}

/// Words that take a parenthesized operand without being called
const NON_CALLABLE_WORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "with", "return", "typeof", "void", "delete", "in",
    "of", "instanceof", "case", "do", "else", "throw", "yield", "await", "function", "var",
    "let", "const", "new", "async", "export", "default", "import",
];

enum Callee {
    NotCall,
    Call(Option<String>),
    New(String),
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

/// Build the syntax tree of a token stream
pub fn parse(tokens: &[Token]) -> Result<SyntaxNode, ParseError> {
    let mut parser = Parser { tokens, pos: 0 };
    let children = parser.sequence(None)?;
    Ok(SyntaxNode::new(NodeKind::Program, None, children))
}

impl<'a> Parser<'a> {
    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn sequence(&mut self, close: Option<&'static str>) -> Result<Vec<SyntaxNode>, ParseError> {
        let mut nodes = Vec::new();
        loop {
            let Some(token) = self.current() else {
                return match close {
                    None => Ok(nodes),
                    Some(expected) => Err(ParseError::Unclosed { expected }),
                };
            };

            if token.kind == TokenKind::Punctuator {
                match token.text.as_str() {
                    ")" | "]" | "}" => {
                        if close == Some(token.text.as_str()) {
                            self.pos += 1;
                            return Ok(nodes);
                        }
                        return Err(ParseError::Unbalanced {
                            found: token.text.clone(),
                            at: self.pos,
                        });
                    }
                    "(" => {
                        nodes.push(self.parenthesized()?);
                        continue;
                    }
                    "[" => {
                        self.pos += 1;
                        let children = self.sequence(Some("]"))?;
                        nodes.push(SyntaxNode::new(NodeKind::Bracketed, None, children));
                        continue;
                    }
                    "{" => {
                        self.pos += 1;
                        let children = self.sequence(Some("}"))?;
                        nodes.push(SyntaxNode::new(NodeKind::Block, None, children));
                        continue;
                    }
                    _ => {}
                }
            } else if token.is_ident("function") {
                if let Some(node) = self.function()? {
                    nodes.push(node);
                    continue;
                }
            }

            self.pos += 1;
        }
    }

    fn parenthesized(&mut self) -> Result<SyntaxNode, ParseError> {
        let callee = self.callee_before(self.pos);
        self.pos += 1;
        let mut children = self.sequence(Some(")"))?;

        Ok(match callee {
            Callee::NotCall => SyntaxNode::new(NodeKind::Parenthesized, None, children),
            Callee::New(name) => SyntaxNode::new(NodeKind::NewExpression, Some(name), children),
            Callee::Call(name) => {
                // `name(args) { ... }` is a method definition, not a call
                if name.is_some() && self.current().is_some_and(|t| t.is_punct("{")) {
                    self.pos += 1;
                    children.extend(self.sequence(Some("}"))?);
                    SyntaxNode::new(NodeKind::FunctionExpression, name, children)
                } else {
                    SyntaxNode::new(NodeKind::CallExpression, name, children)
                }
            }
        })
    }

    /// Classify the `(` at `open` by the tokens right before it
    fn callee_before(&self, open: usize) -> Callee {
        let Some(prev) = open.checked_sub(1).map(|i| &self.tokens[i]) else {
            return Callee::NotCall;
        };

        match prev.kind {
            TokenKind::Identifier => {
                if NON_CALLABLE_WORDS.contains(&prev.text.as_str()) {
                    return Callee::NotCall;
                }
                let mut start = open - 1;
                let mut parts = vec![prev.text.as_str()];
                while start >= 2
                    && (self.tokens[start - 1].is_punct(".") || self.tokens[start - 1].is_punct("?."))
                    && self.tokens[start - 2].kind == TokenKind::Identifier
                {
                    start -= 2;
                    parts.push(self.tokens[start].text.as_str());
                }
                parts.reverse();
                let path = parts.join(".");

                if start >= 1 && self.tokens[start - 1].is_ident("new") {
                    Callee::New(path)
                } else {
                    Callee::Call(Some(path))
                }
            }
            TokenKind::Punctuator if prev.text == ")" || prev.text == "]" => Callee::Call(None),
            _ => Callee::NotCall,
        }
    }

    fn at_statement_start(&self, index: usize) -> bool {
        let mut i = index;
        while i > 0 && ["async", "export", "default"].iter().any(|w| self.tokens[i - 1].is_ident(w)) {
            i -= 1;
        }
        match i.checked_sub(1).map(|j| &self.tokens[j]) {
            None => true,
            Some(prev) => prev.is_punct(";") || prev.is_punct("{") || prev.is_punct("}"),
        }
    }

    /// Parse `function [*] [name] (params) { body }` at the current token.
    /// Returns `None` without consuming anything when the shape does not match.
    fn function(&mut self) -> Result<Option<SyntaxNode>, ParseError> {
        let start = self.pos;
        let declaration = self.at_statement_start(start);

        let mut p = start + 1;
        if self.tokens.get(p).is_some_and(|t| t.is_punct("*")) {
            p += 1;
        }
        let name = match self.tokens.get(p) {
            Some(t) if t.kind == TokenKind::Identifier => {
                p += 1;
                Some(t.text.clone())
            }
            _ => None,
        };
        if !self.tokens.get(p).is_some_and(|t| t.is_punct("(")) {
            return Ok(None);
        }

        self.pos = p + 1;
        let mut children = self.sequence(Some(")"))?;
        if self.current().is_some_and(|t| t.is_punct("{")) {
            self.pos += 1;
            children.extend(self.sequence(Some("}"))?);
        }

        let kind = if declaration && name.is_some() {
            NodeKind::FunctionDeclaration
        } else {
            NodeKind::FunctionExpression
        };
        Ok(Some(SyntaxNode::new(kind, name, children)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::js::lexer::tokenize;

    fn tree(src: &str) -> SyntaxNode {
        parse(&tokenize(src).unwrap()).unwrap()
    }

    fn collect(node: &SyntaxNode, kind: NodeKind) -> Vec<Option<String>> {
        let mut found = Vec::new();
        node.walk(&mut |n| {
            if n.kind == kind {
                found.push(n.name.clone());
            }
        });
        found
    }

    #[test]
    fn test_function_declarations() {
        let root = tree("function a() { function b(x) { return x; } } var c = function d() {};");
        assert_eq!(
            collect(&root, NodeKind::FunctionDeclaration),
            vec![Some("a".to_string()), Some("b".to_string())]
        );
        assert_eq!(
            collect(&root, NodeKind::FunctionExpression),
            vec![Some("d".to_string())]
        );
    }

    #[test]
    fn test_call_expressions() {
        let root = tree("alert(1); document.getElementById('x').focus(); if (a) { eval(b(c)); }");
        assert_eq!(
            collect(&root, NodeKind::CallExpression),
            vec![
                Some("alert".to_string()),
                Some("document.getElementById".to_string()),
                Some("focus".to_string()),
                Some("eval".to_string()),
                Some("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_new_and_iife() {
        let root = tree("var i = new Image(); (function () { x(); })();");
        assert_eq!(collect(&root, NodeKind::NewExpression), vec![Some("Image".to_string())]);
        let calls = collect(&root, NodeKind::CallExpression);
        assert!(calls.contains(&None));
        assert!(calls.contains(&Some("x".to_string())));
    }

    #[test]
    fn test_method_definition_is_not_a_call() {
        let root = tree("class A { run(x) { go(); } }");
        assert_eq!(collect(&root, NodeKind::CallExpression), vec![Some("go".to_string())]);
        assert_eq!(
            collect(&root, NodeKind::FunctionExpression),
            vec![Some("run".to_string())]
        );
    }

    #[test]
    fn test_unbalanced() {
        let tokens = tokenize("function f() { if (x) { }").unwrap();
        assert_eq!(parse(&tokens), Err(ParseError::Unclosed { expected: "}" }));

        let tokens = tokenize("a(]").unwrap();
        assert!(matches!(parse(&tokens), Err(ParseError::Unbalanced { .. })));

        let tokens = tokenize("}}").unwrap();
        assert!(matches!(parse(&tokens), Err(ParseError::Unbalanced { at: 0, .. })));
    }

    #[test]
    fn test_garbage_between_groups_is_tolerated() {
        let root = tree("> @@ ; alert(1) // <");
        assert_eq!(collect(&root, NodeKind::CallExpression), vec![Some("alert".to_string())]);
    }
}
