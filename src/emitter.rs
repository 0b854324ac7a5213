//! Statement emission
//!
//! Fixed, ordered set of purely syntactic substitution rules applied to a
//! classified generic statement (or an already-rewritten conditional
//! header). No rule looks past the current physical line, and no rule is
//! context-aware beyond literal substring matching. That is the point:
//! best-effort translation that always produces something.

use crate::classify::Conditional;

/// Result of running one line through the rule pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Translated line, or None when the line is dropped by design.
    pub text: Option<String>,
    /// Fidelity warnings raised by heuristic rules.
    pub warnings: Vec<String>,
}

/// Rewrite an `if`/`elif`/`else:` header to Java conditional syntax. The
/// result still flows through [`rewrite_statement`] for the remaining rules.
pub fn rewrite_conditional(stripped: &str, kind: Conditional) -> String {
    match kind {
        Conditional::If => {
            let body = stripped.replacen("if ", "if (", 1);
            format!("{}) {{", body.trim_end_matches(':'))
        }
        Conditional::ElseIf => {
            let body = stripped.replacen("elif ", "else if (", 1);
            format!("{}) {{", body.trim_end_matches(':'))
        }
        Conditional::Else => "else {".to_string(),
    }
}

/// Apply the substitution rules, in fixed order, to one statement.
pub fn rewrite_statement(stripped: &str) -> Rewrite {
    let mut warnings = Vec::new();
    let mut line = stripped.to_string();

    // Bracket translation runs before the field rewrite so the inserted
    // `new int[]` idiom survives the blind pass.

    // List-literal brackets become array braces, blindly. Indexing
    //    expressions are corrupted too; flag them rather than guessing.
    if line.contains('[') || line.contains(']') {
        if looks_like_indexing(&line) {
            warnings.push(format!(
                "bracket substitution may have rewritten an indexing expression: {stripped}"
            ));
        }
        line = line.replace('[', "{").replace(']', "}");
    }

    // Quest-item list assignment becomes a Java array construction
    line = line.replace("self.questItemIds = ", "this.questItemIds = new int[] ");

    // The no-op base-constructor call is handled by the synthesized
    //    constructor prologue; drop it here
    if line.contains("JQuest.__init__") {
        return Rewrite {
            text: None,
            warnings,
        };
    }

    // Returns get a statement terminator
    if line.starts_with("return ") {
        line.push(';');
    }

    // Assignments get a statement terminator unless one is present or
    //    the line opens a block
    if line.contains('=') && !line.ends_with(';') && !line.ends_with('{') {
        line.push(';');
    }

    // Boolean keywords to symbolic operators
    line = line
        .replace(" and ", " && ")
        .replace(" or ", " || ")
        .replace(" not ", " ! ");

    Rewrite {
        text: Some(line),
        warnings,
    }
}

/// Heuristic: a `[` directly preceded by an identifier character or a
/// closing delimiter reads like `expr[index]`, not a list literal.
fn looks_like_indexing(line: &str) -> bool {
    let bytes = line.as_bytes();
    for (idx, &b) in bytes.iter().enumerate() {
        if b == b'[' && idx > 0 {
            let prev = bytes[idx - 1];
            if prev.is_ascii_alphanumeric() || prev == b'_' || prev == b')' || prev == b']' {
                return true;
            }
        }
    }
    false
}
