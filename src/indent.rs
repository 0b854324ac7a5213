//! Indentation tracking
//!
//! The source language delimits blocks by indentation; the target delimits
//! them with braces. The tracker keeps a stack of open-block levels and
//! decides, line by line, how many `}` lines must be emitted before the
//! next statement.
//!
//! Block pushes are deferred: opening a block records only the opener's
//! column, and the level is resolved to the actual column of the first line
//! observed inside the block. A block that never receives a body line falls
//! back to `opener + FALLBACK_STEP` so the end-of-input rebalancing still
//! closes it. Mismatched source indentation (tabs, 2-space, 4-space) can
//! degrade output fidelity but never raises an error.

/// Assumed source indentation step when a block body is never observed.
pub const FALLBACK_STEP: usize = 2;

/// One level of target-language indentation.
pub const JAVA_INDENT: &str = "    ";

#[derive(Debug)]
pub struct IndentTracker {
    /// Open-block levels. `levels[0]` is file scope (0) and is never popped.
    levels: Vec<usize>,
    /// Column of a block opener whose body indentation is not yet known.
    pending: Option<usize>,
}

impl Default for IndentTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl IndentTracker {
    pub fn new() -> Self {
        Self {
            levels: vec![0],
            pending: None,
        }
    }

    /// Current nesting depth, file scope included.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Target-language indentation for a statement at the current depth.
    pub fn body_indent(&self) -> String {
        JAVA_INDENT.repeat(self.depth())
    }

    /// Open a block. The level stays pending until the next line resolves it.
    pub fn open_block(&mut self, opener_column: usize) {
        // At most one block can be pending: align() runs before every line,
        // and opener lines themselves resolve any previous pending block.
        debug_assert!(self.pending.is_none());
        self.pending = Some(opener_column);
    }

    /// Align the stack with a line at `column`, returning the `}` lines to
    /// emit before it. Resolves any pending block first.
    pub fn align(&mut self, column: usize) -> Vec<String> {
        if let Some(opener) = self.pending.take() {
            if column > opener {
                self.levels.push(column);
            } else {
                // Empty block; give it a nominal level so the loop below
                // closes it immediately.
                self.levels.push(opener + FALLBACK_STEP);
            }
        }

        let mut closes = Vec::new();
        while self.levels.len() > 1 && column < *self.levels.last().unwrap_or(&0) {
            self.levels.pop();
            closes.push(format!("{}}}", JAVA_INDENT.repeat(self.levels.len())));
        }
        closes
    }

    /// Force-close every level above file scope. Called at end of input so
    /// the emitted brace structure is always balanced.
    pub fn finish(&mut self) -> Vec<String> {
        if let Some(opener) = self.pending.take() {
            self.levels.push(opener + FALLBACK_STEP);
        }

        let mut closes = Vec::new();
        while self.levels.len() > 1 {
            self.levels.pop();
            closes.push(format!("{}}}", JAVA_INDENT.repeat(self.levels.len())));
        }
        closes
    }
}
