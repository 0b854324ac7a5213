//! Conversion reporting
//!
//! One [`ConversionReport`] per converted script: where the output went,
//! what was recognized, and which fidelity warnings the heuristic rules
//! raised. Serializable so tooling can consume it as JSON.

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::context::QuestContext;
use crate::engine::ConvertedUnit;

/// Summary of one conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    pub class_name: String,
    pub quest_name: String,
    pub input_lines: usize,
    pub output_lines: usize,
    /// Recognized method names, in source order.
    pub methods: Vec<String>,
    /// Fidelity warnings; never fatal.
    pub warnings: Vec<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ConversionReport {
    pub fn new(ctx: &QuestContext, unit: &ConvertedUnit, input_lines: usize) -> Self {
        Self {
            source_path: ctx.source_path.clone(),
            output_path: ctx.output_path(),
            class_name: ctx.class_name.clone(),
            quest_name: ctx.quest_name.clone(),
            input_lines,
            output_lines: unit.document.lines().count(),
            methods: unit.methods.clone(),
            warnings: unit.warnings.clone(),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable rendering for terminal output.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "{} {} → {}\n",
            "Converted".bright_green().bold(),
            self.source_path.display(),
            self.output_path.display()
        ));
        out.push_str(&format!(
            "  class {} (quest \"{}\"), {} lines in, {} lines out\n",
            self.class_name.cyan(),
            self.quest_name,
            self.input_lines,
            self.output_lines
        ));

        if !self.methods.is_empty() {
            out.push_str(&format!("  methods: {}\n", self.methods.join(", ")));
        }

        for warning in &self.warnings {
            out.push_str(&format!("  {} {}\n", "warning:".bright_yellow(), warning));
        }

        out
    }
}
