// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Permissive JavaScript tokenizer
//!
//! Any character the grammar does not know becomes a one-character
//! punctuator, so hand-crafted payloads still produce a token stream. Only
//! literals and comments that run off the end of the input are errors.

use std::fmt;

/// Token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or reserved word
    Identifier,
    /// Operator or bracket
    Punctuator,
    /// Quoted string; `text` is the raw content between the quotes
    String,
    /// Template literal; `text` is the raw content between the backticks
    Template,
    /// Numeric literal
    Number,
    /// Regular expression literal
    RegExp,
}

/// A lexical token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Check for a punctuator with the given text
    pub fn is_punct(&self, text: &str) -> bool {
        self.kind == TokenKind::Punctuator && self.text == text
    }

    /// Check for an identifier with the given text
    pub fn is_ident(&self, text: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == text
    }
}

/// Why a script could not be tokenized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    UnterminatedString(usize),
    UnterminatedTemplate(usize),
    UnterminatedComment(usize),
    UnterminatedRegExp(usize),
    TemplateTooDeep(usize),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnterminatedString(at) => write!(f, "unterminated string at {}", at),
            LexError::UnterminatedTemplate(at) => write!(f, "unterminated template at {}", at),
            LexError::UnterminatedComment(at) => write!(f, "unterminated comment at {}", at),
            LexError::UnterminatedRegExp(at) => write!(f, "unterminated regexp at {}", at),
            LexError::TemplateTooDeep(at) => write!(f, "templates nested too deep at {}", at),
        }
    }
}

impl std::error::Error for LexError {}

/// Words after which a `/` starts a regular expression
const REGEX_PRECEDING_WORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case", "do",
    "else", "yield", "await",
];

/// Multi-character punctuators, longest first
const PUNCTUATORS: &[&str] = &[
    ">>>=", "...", "===", "!==", "**=", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "=>", "==",
    "!=", "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "<<", ">>", "**",
];

/// Templates nested inside substitutions deeper than this are rejected
const MAX_TEMPLATE_NESTING: usize = 64;

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    tokens: Vec<Token>,
}

/// Tokenize a script
pub fn tokenize(src: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer {
        chars: src.chars().collect(),
        pos: 0,
        tokens: Vec::new(),
    };
    lexer.run()?;
    Ok(lexer.tokens)
}

impl Lexer {
    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars().enumerate().all(|(i, c)| self.peek(i) == Some(c))
    }

    fn at_line_start(&self) -> bool {
        self.chars[..self.pos]
            .iter()
            .rev()
            .take_while(|c| **c != '\n')
            .all(|c| c.is_whitespace())
    }

    fn run(&mut self) -> Result<(), LexError> {
        while let Some(c) = self.peek(0) {
            if c.is_whitespace() {
                self.pos += 1;
            } else if self.starts_with("//")
                || self.starts_with("<!--")
                || (self.starts_with("-->") && self.at_line_start())
            {
                self.skip_line();
            } else if self.starts_with("/*") {
                self.skip_block_comment()?;
            } else if c == '"' || c == '\'' {
                self.read_string(c)?;
            } else if c == '`' {
                self.read_template(0)?;
            } else if c.is_ascii_digit() || (c == '.' && self.peek(1).is_some_and(|n| n.is_ascii_digit())) {
                self.read_number();
            } else if is_ident_start(c) || (c == '\\' && self.peek(1) == Some('u')) {
                self.read_identifier();
            } else if c == '/' && self.regex_allowed() {
                self.read_regex()?;
            } else {
                self.read_punctuator();
            }
        }
        Ok(())
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek(0) {
            if c == '\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        self.pos += 2;
        while self.pos < self.chars.len() {
            if self.starts_with("*/") {
                self.pos += 2;
                return Ok(());
            }
            self.pos += 1;
        }
        Err(LexError::UnterminatedComment(start))
    }

    fn read_string(&mut self, quote: char) -> Result<(), LexError> {
        let start = self.pos;
        self.pos += 1;
        let mut text = String::new();
        while let Some(c) = self.peek(0) {
            match c {
                '\\' => {
                    text.push(c);
                    if let Some(next) = self.peek(1) {
                        text.push(next);
                    }
                    self.pos += 2;
                }
                '\n' | '\r' => return Err(LexError::UnterminatedString(start)),
                c if c == quote => {
                    self.pos += 1;
                    self.tokens.push(Token::new(TokenKind::String, text));
                    return Ok(());
                }
                c => {
                    text.push(c);
                    self.pos += 1;
                }
            }
        }
        Err(LexError::UnterminatedString(start))
    }

    fn read_template(&mut self, level: usize) -> Result<(), LexError> {
        let start = self.pos;
        if level > MAX_TEMPLATE_NESTING {
            return Err(LexError::TemplateTooDeep(start));
        }
        self.pos += 1;
        let mut text = String::new();
        while let Some(c) = self.peek(0) {
            match c {
                '\\' => {
                    text.push(c);
                    if let Some(next) = self.peek(1) {
                        text.push(next);
                    }
                    self.pos += 2;
                }
                '`' => {
                    self.pos += 1;
                    self.tokens.push(Token::new(TokenKind::Template, text));
                    return Ok(());
                }
                '$' if self.peek(1) == Some('{') => {
                    let sub_start = self.pos;
                    self.skip_substitution(level)?;
                    text.extend(&self.chars[sub_start..self.pos]);
                }
                c => {
                    text.push(c);
                    self.pos += 1;
                }
            }
        }
        Err(LexError::UnterminatedTemplate(start))
    }

    /// Skip `${ ... }` including nested braces, strings and templates
    fn skip_substitution(&mut self, level: usize) -> Result<(), LexError> {
        let start = self.pos;
        self.pos += 2;
        let mut depth = 1usize;
        while let Some(c) = self.peek(0) {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        return Ok(());
                    }
                }
                '"' | '\'' | '`' => {
                    let saved = self.tokens.len();
                    if c == '`' {
                        self.read_template(level + 1)?;
                    } else {
                        self.read_string(c)?;
                    }
                    self.tokens.truncate(saved);
                    continue;
                }
                _ => {}
            }
            self.pos += 1;
        }
        Err(LexError::UnterminatedTemplate(start))
    }

    fn read_number(&mut self) {
        let start = self.pos;
        if self.starts_with("0x") || self.starts_with("0X") {
            self.pos += 2;
            while self.peek(0).is_some_and(|c| c.is_ascii_hexdigit() || c == '_') {
                self.pos += 1;
            }
        } else {
            while let Some(c) = self.peek(0) {
                let exponent_sign = (c == '+' || c == '-')
                    && matches!(self.chars.get(self.pos.wrapping_sub(1)), Some('e') | Some('E'));
                if c.is_ascii_alphanumeric() || c == '.' || c == '_' || exponent_sign {
                    self.pos += 1;
                } else {
                    break;
                }
            }
        }
        if self.peek(0) == Some('n') {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        self.tokens.push(Token::new(TokenKind::Number, text));
    }

    fn read_identifier(&mut self) {
        let start = self.pos;
        while let Some(c) = self.peek(0) {
            if is_ident_part(c) {
                self.pos += 1;
            } else if c == '\\' && self.peek(1) == Some('u') {
                self.pos += 2;
            } else {
                break;
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        self.tokens.push(Token::new(TokenKind::Identifier, text));
    }

    fn regex_allowed(&self) -> bool {
        match self.tokens.last() {
            None => true,
            Some(prev) => match prev.kind {
                TokenKind::Punctuator => !matches!(prev.text.as_str(), ")" | "]" | "}"),
                TokenKind::Identifier => REGEX_PRECEDING_WORDS.contains(&prev.text.as_str()),
                _ => false,
            },
        }
    }

    fn read_regex(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        self.pos += 1;
        let mut in_class = false;
        loop {
            match self.peek(0) {
                None | Some('\n') | Some('\r') => return Err(LexError::UnterminatedRegExp(start)),
                Some('\\') => self.pos += 2,
                Some('[') => {
                    in_class = true;
                    self.pos += 1;
                }
                Some(']') => {
                    in_class = false;
                    self.pos += 1;
                }
                Some('/') if !in_class => {
                    self.pos += 1;
                    break;
                }
                Some(_) => self.pos += 1,
            }
        }
        while self.peek(0).is_some_and(is_ident_part) {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        self.tokens.push(Token::new(TokenKind::RegExp, text));
        Ok(())
    }

    fn read_punctuator(&mut self) {
        for punct in PUNCTUATORS {
            if self.starts_with(punct) {
                // `?.5` is a conditional followed by a number
                if *punct == "?." && self.peek(2).is_some_and(|c| c.is_ascii_digit()) {
                    break;
                }
                self.pos += punct.chars().count();
                self.tokens.push(Token::new(TokenKind::Punctuator, *punct));
                return;
            }
        }
        let c = self.chars[self.pos];
        self.pos += 1;
        self.tokens.push(Token::new(TokenKind::Punctuator, c.to_string()));
    }
}

fn is_ident_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphabetic()
}

fn is_ident_part(c: char) -> bool {
    c == '$' || c == '_' || c == '\u{200c}' || c == '\u{200d}' || c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<(TokenKind, String)> {
        tokenize(src)
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_basic_tokens() {
        let tokens = kinds("document.write('hi');");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Identifier, "document".to_string()),
                (TokenKind::Punctuator, ".".to_string()),
                (TokenKind::Identifier, "write".to_string()),
                (TokenKind::Punctuator, "(".to_string()),
                (TokenKind::String, "hi".to_string()),
                (TokenKind::Punctuator, ")".to_string()),
                (TokenKind::Punctuator, ";".to_string()),
            ]
        );
    }

    #[test]
    fn test_comments_skipped() {
        let tokens = kinds("a // line\n/* block */ b <!-- html\n--> also comment\nc");
        let idents: Vec<_> = tokens.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(idents, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_regex_vs_division() {
        let tokens = kinds("x = a / b; y = /ab+c/gi.test(s)");
        assert!(tokens.contains(&(TokenKind::Punctuator, "/".to_string())));
        assert!(tokens.contains(&(TokenKind::RegExp, "/ab+c/gi".to_string())));
    }

    #[test]
    fn test_template_with_substitution() {
        let tokens = kinds("`a ${ {b: '}'}.b } c`");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].0, TokenKind::Template);
    }

    #[test]
    fn test_numbers() {
        let tokens = kinds("0x1F 1.5e-3 .5 10n 1_000");
        assert!(tokens.iter().all(|(k, _)| *k == TokenKind::Number));
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_unknown_characters_are_punctuators() {
        let tokens = kinds("a @ b # c");
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_unterminated() {
        assert!(matches!(tokenize("'abc"), Err(LexError::UnterminatedString(0))));
        assert!(matches!(tokenize("x = \"a\nb\""), Err(LexError::UnterminatedString(_))));
        assert!(matches!(tokenize("/* never"), Err(LexError::UnterminatedComment(0))));
        assert!(matches!(tokenize("`abc"), Err(LexError::UnterminatedTemplate(0))));
        assert!(matches!(tokenize("x = /abc"), Err(LexError::UnterminatedRegExp(_))));
    }

    #[test]
    fn test_nested_templates_are_bounded() {
        let levels = 10_000;
        let src = format!("{}x{}", "`${".repeat(levels), "}`".repeat(levels));
        assert!(matches!(tokenize(&src), Err(LexError::TemplateTooDeep(_))));
        assert!(tokenize("`a${`b${`c`}`}`").is_ok());
    }

    #[test]
    fn test_string_escapes() {
        let tokens = kinds(r#"'it\'s'"#);
        assert_eq!(tokens, vec![(TokenKind::String, r"it\'s".to_string())]);
    }
}
