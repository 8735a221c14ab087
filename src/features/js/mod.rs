// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! JavaScript features
//!
//! Script text is tokenized permissively and folded into a structural
//! tree. The tree gives function declarations and callee names, the flat
//! token stream gives DOM name usage and string literal lengths. Input that
//! cannot be tokenized, has unbalanced brackets or nests deeper than
//! [`MAX_NESTING`] yields zeroed counters.

pub mod lexer;
pub mod syntax;
pub mod tree;

use std::collections::HashSet;

use tracing::debug;

use self::lexer::{tokenize, Token, TokenKind};
use self::tree::{NodeKind, SyntaxNode};
use super::record::{FeatureFragment, FeatureValue};

pub use self::syntax::{is_valid_script, nesting_depth, MAX_NESTING};

/// Counted DOM objects
pub const JS_DOM_OBJECTS: &[&str] = &["location", "document", "window"];

/// Counted DOM properties
pub const JS_PROPERTIES: &[&str] = &[
    "cookie",
    "referrer",
    "innerHTML",
    "outerHTML",
    "href",
    "search",
    "hash",
];

/// Counted methods and global functions
pub const JS_METHODS: &[&str] = &[
    "write",
    "writeln",
    "getElementById",
    "getElementsByTagName",
    "getElementsByClassName",
    "createElement",
    "appendChild",
    "alert",
    "confirm",
    "prompt",
    "eval",
    "fromCharCode",
    "escape",
    "unescape",
    "atob",
    "setTimeout",
    "setInterval",
];

/// Features of one script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsFeatures {
    /// Length of the script in characters
    pub length: usize,
    /// Counts aligned with [`JS_DOM_OBJECTS`]
    pub dom_objects: Vec<usize>,
    /// Counts aligned with [`JS_PROPERTIES`]
    pub properties: Vec<usize>,
    /// Counts aligned with [`JS_METHODS`]
    pub methods: Vec<usize>,
    /// Function declarations anywhere in the script
    pub define_function: usize,
    /// Distinct callee names
    pub function_calls: usize,
    /// Longest string literal, 0 when there is none
    pub string_max_length: usize,
    /// The script passes a strict ECMAScript parse
    pub strict_syntax: bool,
}

impl Default for JsFeatures {
    fn default() -> Self {
        Self {
            length: 0,
            dom_objects: vec![0; JS_DOM_OBJECTS.len()],
            properties: vec![0; JS_PROPERTIES.len()],
            methods: vec![0; JS_METHODS.len()],
            define_function: 0,
            function_calls: 0,
            string_max_length: 0,
            strict_syntax: false,
        }
    }
}

impl JsFeatures {
    /// Count for a DOM object name
    pub fn dom_object(&self, name: &str) -> usize {
        count_of(JS_DOM_OBJECTS, &self.dom_objects, name)
    }

    /// Count for a property name
    pub fn property(&self, name: &str) -> usize {
        count_of(JS_PROPERTIES, &self.properties, name)
    }

    /// Count for a method name
    pub fn method(&self, name: &str) -> usize {
        count_of(JS_METHODS, &self.methods, name)
    }

    fn count_tokens(&mut self, tokens: &[Token]) {
        for token in tokens {
            match token.kind {
                TokenKind::Identifier => {
                    let name = token.text.as_str();
                    if let Some(i) = JS_DOM_OBJECTS.iter().position(|n| *n == name) {
                        self.dom_objects[i] += 1;
                    } else if let Some(i) = JS_PROPERTIES.iter().position(|n| *n == name) {
                        self.properties[i] += 1;
                    } else if let Some(i) = JS_METHODS.iter().position(|n| *n == name) {
                        self.methods[i] += 1;
                    }
                }
                TokenKind::String => {
                    self.string_max_length = self.string_max_length.max(token.text.chars().count());
                }
                _ => {}
            }
        }
    }

    fn count_tree(&mut self, root: &SyntaxNode) {
        let mut callees = HashSet::new();
        root.walk(&mut |node| match node.kind {
            NodeKind::FunctionDeclaration => self.define_function += 1,
            NodeKind::CallExpression => {
                if let Some(name) = &node.name {
                    callees.insert(name.as_str());
                }
            }
            _ => {}
        });
        self.function_calls = callees.len();
    }
}

fn count_of(names: &[&str], counts: &[usize], name: &str) -> usize {
    names
        .iter()
        .position(|n| *n == name)
        .and_then(|i| counts.get(i).copied())
        .unwrap_or(0)
}

/// Extract features from script text. Never fails.
pub fn parse_js(code: &str) -> JsFeatures {
    let mut features = JsFeatures {
        length: code.chars().count(),
        ..JsFeatures::default()
    };

    let tokens = match tokenize(code) {
        Ok(tokens) => tokens,
        Err(e) => {
            debug!(error = %e, "script is not tokenizable, counters left at zero");
            return features;
        }
    };
    let depth = nesting_depth(&tokens);
    if depth > MAX_NESTING {
        debug!(depth, "script nests too deep, counters left at zero");
        return features;
    }
    let root = match tree::parse(&tokens) {
        Ok(root) => root,
        Err(e) => {
            debug!(error = %e, "script is not parseable, counters left at zero");
            return features;
        }
    };

    features.count_tokens(&tokens);
    features.count_tree(&root);
    features.strict_syntax = is_valid_script(code);
    features
}

impl FeatureFragment for JsFeatures {
    fn fields(&self) -> Vec<(String, FeatureValue)> {
        let mut fields = vec![("js_length".to_string(), self.length.into())];
        for (name, count) in JS_DOM_OBJECTS.iter().zip(&self.dom_objects) {
            fields.push((format!("js_dom_{}", name), (*count).into()));
        }
        for (name, count) in JS_PROPERTIES.iter().zip(&self.properties) {
            fields.push((format!("js_prop_{}", name), (*count).into()));
        }
        for (name, count) in JS_METHODS.iter().zip(&self.methods) {
            fields.push((format!("js_method_{}", name), (*count).into()));
        }
        fields.push(("js_define_function".to_string(), self.define_function.into()));
        fields.push(("js_function_calls".to_string(), self.function_calls.into()));
        fields.push(("js_string_max_length".to_string(), self.string_max_length.into()));
        fields.push(("js_strict_syntax".to_string(), self.strict_syntax.into()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_usage() {
        let features = parse_js("document.write(document.cookie); window.location.href = 'x';");
        assert_eq!(features.dom_object("document"), 2);
        assert_eq!(features.dom_object("window"), 1);
        assert_eq!(features.dom_object("location"), 1);
        assert_eq!(features.property("cookie"), 1);
        assert_eq!(features.property("href"), 1);
        assert_eq!(features.method("write"), 1);
        assert!(features.strict_syntax);
    }

    #[test]
    fn test_first_match_wins() {
        // a DOM object name after a dot is still a DOM object, never a property
        let features = parse_js("a.location");
        assert_eq!(features.dom_object("location"), 1);
        assert_eq!(features.properties.iter().sum::<usize>(), 0);
    }

    #[test]
    fn test_functions_and_calls() {
        let features = parse_js(
            "function a() { alert(1); } function b() { alert(2); eval('x'); } a(); b(); b();",
        );
        assert_eq!(features.define_function, 2);
        // alert, eval, a, b
        assert_eq!(features.function_calls, 4);
        assert_eq!(features.method("alert"), 2);
    }

    #[test]
    fn test_string_max_length() {
        assert_eq!(parse_js("var a = 'abc', b = \"abcdef\";").string_max_length, 6);
        assert_eq!(parse_js("var a = 1;").string_max_length, 0);
    }

    #[test]
    fn test_unbalanced_braces_give_zero_counters() {
        let code = "function f() { alert(document.cookie); ";
        let features = parse_js(code);
        assert_eq!(features.length, code.len());
        assert_eq!(
            JsFeatures {
                length: code.len(),
                ..JsFeatures::default()
            },
            features
        );
    }

    #[test]
    fn test_unterminated_string_gives_zero_counters() {
        let features = parse_js("alert('oops");
        assert_eq!(features.method("alert"), 0);
        assert_eq!(features.length, 11);
        assert!(!features.strict_syntax);
    }

    #[test]
    fn test_payload_fragment_is_tolerated() {
        let features = parse_js("\"-alert(1)-\"");
        assert_eq!(features.string_max_length, 10);

        let features = parse_js("alert(1)//");
        assert_eq!(features.method("alert"), 1);
        assert_eq!(features.function_calls, 1);
    }

    #[test]
    fn test_obfuscated_payload() {
        let features = parse_js("[][(![]+[])[+[]]+(![]+[])[!+[]+!+[]]]");
        assert_eq!(features.function_calls, 0);
        assert!(features.strict_syntax);
    }

    #[test]
    fn test_deep_nesting_gives_zero_counters() {
        let nested = |levels: usize| {
            format!("{}alert(1){}", "[".repeat(levels), "]".repeat(levels))
        };
        // same stack size as a blocking-pool worker
        let handle = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || (parse_js(&nested(500)), parse_js(&nested(200))))
            .unwrap();
        let (deep, shallow) = handle.join().unwrap();

        assert_eq!(deep.length, 1008);
        assert_eq!(deep.method("alert"), 0);
        assert_eq!(deep.function_calls, 0);
        assert!(!deep.strict_syntax);

        assert_eq!(shallow.method("alert"), 1);
        assert!(shallow.strict_syntax);
    }

    #[test]
    fn test_empty_script() {
        let features = parse_js("");
        assert_eq!(features, JsFeatures::default());
    }

    #[test]
    fn test_schema_is_fixed() {
        let names = parse_js("alert(1)").names();
        assert_eq!(names, JsFeatures::default().names());
        assert_eq!(names.len(), 1 + 3 + 7 + 17 + 4);
        assert_eq!(names[0], "js_length");
        assert_eq!(names[names.len() - 1], "js_strict_syntax");
    }
}
