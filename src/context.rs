//! Run-scoped conversion context
//!
//! One [`QuestContext`] exists per converted script. It carries everything
//! derived from the source location (folder name, synthesized class name)
//! plus the state collected during the scan (quest name, lifted top-level
//! declarations). Passing it explicitly keeps the engine re-entrant when
//! several scripts are converted in one process.

use anyhow::{Context as AnyhowContext, Result};
use std::path::{Path, PathBuf};

/// Java type inferred for a lifted top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclType {
    Int,
    Str,
}

impl DeclType {
    /// Naive literal sniffing: a quote anywhere in the value means String.
    pub fn infer(value: &str) -> Self {
        if value.contains('"') || value.contains('\'') {
            DeclType::Str
        } else {
            DeclType::Int
        }
    }

    pub fn java_name(&self) -> &'static str {
        match self {
            DeclType::Int => "int",
            DeclType::Str => "String",
        }
    }
}

/// One top-level name/value pair, emitted as a `private static final` field.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub name: String,
    pub value: String,
    pub ty: DeclType,
}

impl Declaration {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let ty = DeclType::infer(&value);
        Self {
            name: name.into(),
            value,
            ty,
        }
    }

    /// Render the Java field declaration, without leading indentation.
    pub fn render(&self) -> String {
        format!(
            "private static final {} {} = {};",
            self.ty.java_name(),
            self.name,
            self.value
        )
    }
}

/// Context threaded through one conversion run.
#[derive(Debug, Clone)]
pub struct QuestContext {
    /// Source script path.
    pub source_path: PathBuf,
    /// Name of the directory containing the script, e.g. `q110_example`.
    pub folder_name: String,
    /// Wrapper class name: folder name with the first character upper-cased.
    pub class_name: String,
    /// Symbolic quest name. Defaults to the folder name; overridden by a
    /// top-level `qn = "..."` assignment in the script.
    pub quest_name: String,
    /// Lifted top-level declarations, in source order.
    pub declarations: Vec<Declaration>,
}

impl QuestContext {
    /// Derive a context from the script path. The parent directory name is
    /// the quest folder by convention.
    pub fn from_path(path: &Path) -> Result<Self> {
        let folder_name = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .map(str::to_owned)
            .with_context(|| {
                format!("cannot derive quest folder from {}", path.display())
            })?;

        let mut chars = folder_name.chars();
        let class_name = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => anyhow::bail!("empty quest folder name for {}", path.display()),
        };

        Ok(Self {
            source_path: path.to_path_buf(),
            quest_name: folder_name.clone(),
            folder_name,
            class_name,
            declarations: Vec::new(),
        })
    }

    /// Record the reserved `qn` assignment, dropping the quote characters.
    pub fn set_quest_name(&mut self, raw_value: &str) {
        self.quest_name = raw_value.replace('"', "").replace('\'', "");
    }

    /// Output path: sibling of the source, named after the class.
    pub fn output_path(&self) -> PathBuf {
        let dir = self
            .source_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        dir.join(format!("{}.java", self.class_name))
    }
}
