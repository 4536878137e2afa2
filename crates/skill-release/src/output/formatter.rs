use changeset_operations::OperationError;
use changeset_operations::operations::ValidationReport;

pub(crate) trait ValidationFormatter {
    fn format_success(&self, report: &ValidationReport) -> String;
    /// Details for a failed validation, or `None` when the error message says it all.
    fn format_failure(&self, error: &OperationError) -> Option<String>;
}
