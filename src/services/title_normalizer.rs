// src/services/title_normalizer.rs
//
// Title Normalizer
//
// Turns a loosely formatted source title into the canonical key used to
// match across catalogs.
//
// CRITICAL RULES:
// - Pure: no I/O, no state between calls
// - Total: every input yields a string, possibly empty
// - Ordered: each rule sees the output of the previous one
// - Rules are data. Adding one means adding a row, not a branch.

use regex::Regex;
use std::sync::OnceLock;

// ============================================================================
// RULE TABLES
// ============================================================================

/// Titles that are one logical show published under a renamed base
/// (yearly editions, "·subtitle" spin-offs)
const VARIANT_FAMILIES: &[(&str, &str)] = &[("歌手", "我是歌手")];

/// Bracket pairs whose content is annotation, never part of the title
const BRACKETS: &[(char, char)] = &[
    ('(', ')'),
    ('（', '）'),
    ('[', ']'),
    ('【', '】'),
    ('〔', '〕'),
    ('〖', '〗'),
];

/// Descriptors dropped when they end the title.
/// Longer spellings precede their prefixes.
const TRAILING_DESCRIPTORS: &[&str] = &[
    "前传", "后传", "外传", "番外篇", "番外", "特别篇", "剧场版", "SP", "最终季", "完结篇", "完结",
    "电影", "OVA", "后篇",
];

const SEASON_NUMERALS: &str = "0-9一二三四五六七八九十百零";

// ============================================================================
// RULES
// ============================================================================

/// What a single rule does to the title
#[derive(Debug)]
pub enum TitleTransform {
    /// Replace the whole title when it belongs to a variant family
    Rewrite { pattern: Regex, canonical: String },

    /// Delete every match
    Remove(Regex),

    /// Replace every match with a capture template
    Replace { pattern: Regex, template: String },
}

#[derive(Debug)]
pub struct TitleRule {
    pub name: &'static str,
    pub transform: TitleTransform,
}

impl TitleRule {
    fn remove(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            transform: TitleTransform::Remove(Regex::new(pattern).unwrap()),
        }
    }

    fn replace(name: &'static str, pattern: &str, template: &str) -> Self {
        Self {
            name,
            transform: TitleTransform::Replace {
                pattern: Regex::new(pattern).unwrap(),
                template: template.to_string(),
            },
        }
    }

    fn rewrite(name: &'static str, pattern: &str, canonical: &str) -> Self {
        Self {
            name,
            transform: TitleTransform::Rewrite {
                pattern: Regex::new(pattern).unwrap(),
                canonical: canonical.to_string(),
            },
        }
    }

    /// Apply this rule alone
    pub fn apply(&self, title: &str) -> String {
        match &self.transform {
            TitleTransform::Rewrite { pattern, canonical } => {
                if pattern.is_match(title) {
                    canonical.clone()
                } else {
                    title.to_string()
                }
            }
            TitleTransform::Remove(pattern) => pattern.replace_all(title, "").into_owned(),
            TitleTransform::Replace { pattern, template } => {
                pattern.replace_all(title, template.as_str()).into_owned()
            }
        }
    }
}

/// Ordered normalization rules.
///
/// After the table runs, the result is trimmed and reduced to its first
/// whitespace-separated token with any trailing digit run removed.
#[derive(Debug)]
pub struct TitleRules {
    rules: Vec<TitleRule>,
}

impl Default for TitleRules {
    fn default() -> Self {
        let mut rules = Vec::new();

        // 1. Variant families, matched against the untouched title
        for (base, canonical) in VARIANT_FAMILIES {
            let base = regex::escape(base);
            rules.push(TitleRule::rewrite(
                "variant_family",
                &format!(r"^{base}(?:[\s\-·・:：]*\d{{4}}|[\s\-·・:：].*)?$"),
                canonical,
            ));
        }

        // 2. Bracketed annotations, every bracket style
        let brackets = BRACKETS
            .iter()
            .map(|(open, close)| {
                let (open, close) = (regex::escape(&open.to_string()), regex::escape(&close.to_string()));
                format!("{open}[^{close}]*{close}")
            })
            .collect::<Vec<_>>()
            .join("|");
        rules.push(TitleRule::remove("brackets", &brackets));

        // 3. Season / part / year decorations
        rules.push(TitleRule::remove(
            "separator_season",
            &format!(r"[\s\-–—:：]+[{SEASON_NUMERALS}]+季"),
        ));
        rules.push(TitleRule::remove("ordinal_season", &format!(r"第[{SEASON_NUMERALS}]+季")));
        rules.push(TitleRule::remove("part_season_series", r"(?i)(?-u:\b)(?:part|season|series)\s*\d+(?-u:\b)"));
        rules.push(TitleRule::replace("year", r"(^|\D)(?:19|20)\d{2}(\D|$)", "${1}${2}"));
        rules.push(TitleRule::remove("trailing_ordinal", r"\s+\d{1,2}$"));
        rules.push(TitleRule::remove("separator_tail", r"(?:[:：]|\s[\-–—]).*$"));

        // 4. Trailing descriptors
        let descriptors = TRAILING_DESCRIPTORS
            .iter()
            .map(|d| regex::escape(d))
            .collect::<Vec<_>>()
            .join("|");
        rules.push(TitleRule::remove(
            "trailing_descriptor",
            &format!(r"\s*(?:{descriptors})\s*$"),
        ));

        Self { rules }
    }
}

impl TitleRules {
    /// Rules in application order
    pub fn rules(&self) -> &[TitleRule] {
        &self.rules
    }

    /// Find a rule by name (for targeted tests and diagnostics)
    pub fn rule(&self, name: &str) -> Option<&TitleRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Raw title -> canonical key
    pub fn normalize(&self, raw_title: &str) -> String {
        let cleaned = self
            .rules
            .iter()
            .fold(raw_title.to_string(), |title, rule| rule.apply(&title));

        first_token_without_digits(cleaned.trim())
    }
}

/// Keep the first whitespace-separated token, minus any trailing digit run
fn first_token_without_digits(title: &str) -> String {
    let mut tokens = title.split_whitespace();
    let head = match (tokens.next(), tokens.next()) {
        (Some(first), Some(_)) => first,
        _ => title,
    };
    head.trim_end_matches(|c: char| c.is_ascii_digit()).to_string()
}

/// Normalize with the default rule table
pub fn normalize_title(raw_title: &str) -> String {
    static RULES: OnceLock<TitleRules> = OnceLock::new();
    RULES.get_or_init(TitleRules::default).normalize(raw_title)
}

// ============================================================================
// TESTS
// ============================================================================
