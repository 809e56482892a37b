//! Comment rule set
//!
//! Comment patterns are declared per language family and flattened once into
//! a direct extension -> rules map. Stripping is regex based and therefore
//! approximate: comment markers inside string literals are removed too,
//! nested block comments end at the first closing delimiter.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;

const C_FAMILY: &[&str] = &[
    "js", "jsx", "ts", "tsx", "java", "c", "cpp", "cs", "go", "rs", "swift", "kt", "dart",
    "scala",
];
const MARKUP_FAMILY: &[&str] = &["html", "xml"];

/// Single-line rules. `(?m)` without `(?s)` keeps every match on one line.
const SINGLE_LINE_FAMILIES: &[(&[&str], &str)] = &[
    (&["py"], r"(?m)#.*?$"),
    (C_FAMILY, r"(?m)//.*?$"),
    (MARKUP_FAMILY, r"<!--.*?-->"),
    (&["sql"], r"(?m)--.*?$"),
    (&["rb"], r"(?m)#.*?$"),
];

/// Multi-line rules. `(?s)` lets a match run across newlines.
const MULTI_LINE_FAMILIES: &[(&[&str], &str)] = &[
    (&["py"], r#"(?s)""".*?"""|'''.*?'''"#),
    (C_FAMILY, r"(?s)/\*.*?\*/"),
    (MARKUP_FAMILY, r"(?s)<!--.*?-->"),
];

static BUILTIN: Lazy<CommentRuleSet> = Lazy::new(CommentRuleSet::from_families);

/// Comment rules resolved for one extension
#[derive(Debug, Clone, Default)]
pub struct CommentRules {
    pub single_line: Option<Regex>,
    pub multi_line: Option<Regex>,
}

impl CommentRules {
    /// Remove comments from `content`: single-line matches first, then multi-line.
    pub fn strip<'a>(&self, content: &'a str) -> Cow<'a, str> {
        let mut out = Cow::Borrowed(content);
        for re in [&self.single_line, &self.multi_line].into_iter().flatten() {
            if re.is_match(&out) {
                out = Cow::Owned(re.replace_all(&out, "").into_owned());
            }
        }
        out
    }
}

/// Immutable extension -> comment rules map
#[derive(Debug, Clone, Default)]
pub struct CommentRuleSet {
    rules: HashMap<&'static str, CommentRules>,
}

impl CommentRuleSet {
    /// The built-in rule set, constructed on first use
    pub fn builtin() -> &'static CommentRuleSet {
        &BUILTIN
    }

    fn from_families() -> Self {
        let mut rules: HashMap<&'static str, CommentRules> = HashMap::new();

        for (exts, pattern) in SINGLE_LINE_FAMILIES {
            let re = Regex::new(pattern).expect("Invalid single-line comment regex");
            for &ext in exts.iter() {
                let entry = rules.entry(ext).or_default();
                // An extension listed twice keeps its first rule
                if entry.single_line.is_none() {
                    entry.single_line = Some(re.clone());
                }
            }
        }

        for (exts, pattern) in MULTI_LINE_FAMILIES {
            let re = Regex::new(pattern).expect("Invalid multi-line comment regex");
            for &ext in exts.iter() {
                let entry = rules.entry(ext).or_default();
                if entry.multi_line.is_none() {
                    entry.multi_line = Some(re.clone());
                }
            }
        }

        Self { rules }
    }

    /// Rules for an extension given without leading dot, lowercase
    pub fn rules_for(&self, ext: &str) -> Option<&CommentRules> {
        self.rules.get(ext)
    }

    /// Strip comments for `ext`; content is returned untouched if no rule applies.
    pub fn strip<'a>(&self, ext: &str, content: &'a str) -> Cow<'a, str> {
        match self.rules_for(ext) {
            Some(rules) => rules.strip(content),
            None => Cow::Borrowed(content),
        }
    }
}
