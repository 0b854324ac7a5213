//! Line classification
//!
//! Assigns one stripped, non-empty, non-comment source line to exactly one
//! statement shape. Classification is a pure function of the line text, its
//! leading-whitespace column and the signature table; it never rejects a
//! line. Anything unrecognized is a generic statement.

use crate::signatures::SignatureTable;

/// Conditional header flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conditional {
    If,
    ElseIf,
    Else,
}

/// The statement shapes the engine distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Top-level `NAME = value`; lifted into a field, not echoed.
    Declaration { name: String, value: String },
    /// The reserved `qn = "..."` assignment; updates the run context.
    QuestName { value: String },
    /// `class Quest...` header; consumed with no output.
    ClassHeader,
    /// `def name(self, ...):` with `name` in the signature table.
    MethodHeader { name: String },
    /// `if`/`elif`/`else:` header.
    Conditional(Conditional),
    /// Everything else; forwarded to the statement emitter.
    Statement,
}

/// Keywords that exclude a top-level `=` line from declaration lifting.
const DECLARATION_EXCLUSIONS: &[&str] = &["class", "QUEST", "State"];

/// Classify one stripped line, in fixed precedence order.
pub fn classify(stripped: &str, column: usize, table: &SignatureTable) -> LineKind {
    if column == 0 && stripped.contains('=') && !is_excluded_declaration(stripped) {
        if let Some((name, value)) = stripped.split_once('=') {
            let name = name.trim().to_string();
            let value = value.trim().to_string();
            if name == "qn" {
                return LineKind::QuestName { value };
            }
            return LineKind::Declaration { name, value };
        }
    }

    if stripped.starts_with("class Quest") {
        return LineKind::ClassHeader;
    }

    if let Some(name) = method_def_name(stripped) {
        if table.contains(name) {
            return LineKind::MethodHeader {
                name: name.to_string(),
            };
        }
        // Unknown method name: falls through to the generic-statement path.
        // The engine surfaces this as a warning, never an error.
    }

    if stripped.starts_with("if ") {
        return LineKind::Conditional(Conditional::If);
    }
    if stripped.starts_with("elif ") {
        return LineKind::Conditional(Conditional::ElseIf);
    }
    if stripped.starts_with("else:") {
        return LineKind::Conditional(Conditional::Else);
    }

    LineKind::Statement
}

fn is_excluded_declaration(stripped: &str) -> bool {
    DECLARATION_EXCLUSIONS.iter().any(|kw| stripped.contains(kw))
}

/// Extract the method name from a `def name(self, ...):` header. Returns
/// None when the line is not a well-formed method definition.
pub fn method_def_name(stripped: &str) -> Option<&str> {
    let rest = stripped.strip_prefix("def ")?;
    let open = rest.find('(')?;
    let name = rest[..open].trim();
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }

    let args = rest[open + 1..].trim_start();
    if !args.starts_with("self") {
        return None;
    }
    if !stripped.trim_end().ends_with("):") {
        return None;
    }
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SignatureTable {
        SignatureTable::new()
    }

    #[test]
    fn test_top_level_declaration() {
        let kind = classify("SOME_ITEM = 1234", 0, &table());
        assert_eq!(
            kind,
            LineKind::Declaration {
                name: "SOME_ITEM".to_string(),
                value: "1234".to_string(),
            }
        );
    }

    #[test]
    fn test_quest_name_is_reserved() {
        let kind = classify("qn = \"example_quest\"", 0, &table());
        assert_eq!(
            kind,
            LineKind::QuestName {
                value: "\"example_quest\"".to_string(),
            }
        );
    }

    #[test]
    fn test_indented_assignment_is_not_a_declaration() {
        let kind = classify("cond = 2", 4, &table());
        assert_eq!(kind, LineKind::Statement);
    }

    #[test]
    fn test_exclusion_keywords_block_lifting() {
        assert_eq!(
            classify("QUEST = Quest(110, qn, \"desc\")", 0, &table()),
            LineKind::Statement
        );
        assert_eq!(
            classify("CREATED = State('Start', QUEST)", 0, &table()),
            LineKind::Statement
        );
    }

    #[test]
    fn test_class_header_is_ignored() {
        assert_eq!(
            classify("class Quest (JQuest) :", 0, &table()),
            LineKind::ClassHeader
        );
    }

    #[test]
    fn test_known_method_header() {
        let kind = classify("def onTalk(self, npc, player):", 1, &table());
        assert_eq!(
            kind,
            LineKind::MethodHeader {
                name: "onTalk".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_method_name_degrades_to_statement() {
        let kind = classify("def onSomethingElse(self, npc):", 1, &table());
        assert_eq!(kind, LineKind::Statement);
    }

    #[test]
    fn test_free_function_def_is_not_a_header() {
        // No `self` receiver: not a quest method definition.
        assert_eq!(classify("def helper(x):", 0, &table()), LineKind::Statement);
    }

    #[test]
    fn test_conditional_headers() {
        assert_eq!(
            classify("if cond == 1:", 4, &table()),
            LineKind::Conditional(Conditional::If)
        );
        assert_eq!(
            classify("elif cond == 2:", 4, &table()),
            LineKind::Conditional(Conditional::ElseIf)
        );
        assert_eq!(
            classify("else:", 4, &table()),
            LineKind::Conditional(Conditional::Else)
        );
    }

    #[test]
    fn test_generic_statement() {
        assert_eq!(
            classify("st.playSound(\"ItemSound.quest_accept\")", 8, &table()),
            LineKind::Statement
        );
    }
}
