// src/detect.rs
// =============================================================================
// This module flags "suspicious" JavaScript inside <script> blocks.
//
// The check is purely lexical: each block is searched for four fixed
// substrings. There is no tokenizing, no regex and no case folding, so
// `EVAL(` or `eval (` are not reported. It's a quick heuristic, not an
// analyzer.
//
// Rust concepts:
// - Enums with methods: each pattern knows its needle and description
// - Iterators: findings are produced lazily, one block at a time
// =============================================================================

use serde::Serialize;
use std::fmt;

/// The closed set of constructs we look for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuspiciousPattern {
    Eval,
    SetTimeout,
    SetInterval,
    DocumentCookie,
}

impl SuspiciousPattern {
    /// Every pattern, in the order they are checked within a block
    pub const ALL: [SuspiciousPattern; 4] = [
        SuspiciousPattern::Eval,
        SuspiciousPattern::SetTimeout,
        SuspiciousPattern::SetInterval,
        SuspiciousPattern::DocumentCookie,
    ];

    /// The exact substring searched for
    pub fn needle(self) -> &'static str {
        match self {
            SuspiciousPattern::Eval => "eval(",
            SuspiciousPattern::SetTimeout => "setTimeout(",
            SuspiciousPattern::SetInterval => "setInterval(",
            SuspiciousPattern::DocumentCookie => "document.cookie",
        }
    }

    /// Human-readable text used in the "Suspicious code found" line
    pub fn description(self) -> &'static str {
        match self {
            SuspiciousPattern::Eval => "eval() function",
            SuspiciousPattern::SetTimeout => "setTimeout() function",
            SuspiciousPattern::SetInterval => "setInterval() function",
            SuspiciousPattern::DocumentCookie => "document.cookie usage",
        }
    }

    fn matches(self, script: &str) -> bool {
        script.contains(self.needle())
    }
}

impl fmt::Display for SuspiciousPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// One pattern matched on one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuspicionFinding {
    pub url: String,
    pub pattern: SuspiciousPattern,
}

// Scans script blocks and yields matching patterns
//
// Each pattern contributes at most one match per block, even if the
// substring appears several times in it. Two blocks that both call eval()
// give two matches.
//
// Example:
//   scripts = ["eval(x); eval(y)", "setTimeout(f, 10)"]
//   result  = [Eval, SetTimeout]
pub fn detect<'a, I>(scripts: I) -> impl Iterator<Item = SuspiciousPattern> + 'a
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: 'a,
{
    scripts.into_iter().flat_map(|script| {
        SuspiciousPattern::ALL
            .into_iter()
            .filter(move |pattern| pattern.matches(script))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(scripts: &[&str]) -> Vec<SuspiciousPattern> {
        detect(scripts.iter().copied()).collect()
    }

    #[test]
    fn test_eval_single_finding() {
        assert_eq!(run(&["eval(userInput)"]), vec![SuspiciousPattern::Eval]);
    }

    #[test]
    fn test_repeated_pattern_counts_once_per_block() {
        assert_eq!(
            run(&["eval(a); eval(b); eval(c)"]),
            vec![SuspiciousPattern::Eval]
        );
    }

    #[test]
    fn test_same_pattern_in_two_blocks() {
        assert_eq!(
            run(&["eval(a)", "eval(b)"]),
            vec![SuspiciousPattern::Eval, SuspiciousPattern::Eval]
        );
    }

    #[test]
    fn test_all_patterns_in_fixed_order() {
        let script = "var c = document.cookie; setInterval(f, 5); setTimeout(g, 1); eval(c);";
        assert_eq!(run(&[script]), SuspiciousPattern::ALL.to_vec());
    }

    #[test]
    fn test_case_sensitive() {
        assert!(run(&["EVAL(x); SetTimeout(y); Document.Cookie"]).is_empty());
    }

    #[test]
    fn test_needs_opening_paren() {
        // "evaluate" and a bare "setTimeout" reference are not matches
        assert!(run(&["evaluate(x); var t = setTimeout;"]).is_empty());
    }

    #[test]
    fn test_detection_is_idempotent() {
        let scripts = ["document.cookie = 'a=b'", "setTimeout(tick, 100)"];
        assert_eq!(run(&scripts), run(&scripts));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(SuspiciousPattern::Eval.to_string(), "eval() function");
        assert_eq!(
            SuspiciousPattern::DocumentCookie.description(),
            "document.cookie usage"
        );
    }
}
