// ABOUTME: Diagnostics accumulator for non-fatal warnings during stack operations.
// ABOUTME: Collects failures that must not replace the error being reported.

/// Collects non-fatal warnings during stack operations.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during a stack operation.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// A rollback step that could not be completed.
    pub fn compensation_failed(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::CompensationFailed,
            message: message.into(),
        }
    }
}

/// Categories of non-fatal warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Undoing a completed step failed (the host may need manual cleanup).
    CompensationFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_starts_empty() {
        let diag = Diagnostics::default();
        assert!(!diag.has_warnings());
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn diagnostics_collects_warnings() {
        let mut diag = Diagnostics::default();

        diag.warn(Warning::compensation_failed("swarm leave failed"));
        diag.warn(Warning::compensation_failed("network rm failed"));

        assert!(diag.has_warnings());
        assert_eq!(diag.warnings().len(), 2);
    }

    #[test]
    fn compensation_warning_keeps_message() {
        let warning = Warning::compensation_failed("swarm leave failed");
        assert_eq!(warning.kind, WarningKind::CompensationFailed);
        assert_eq!(warning.message, "swarm leave failed");
    }
}
