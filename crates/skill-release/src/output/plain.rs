use changeset_operations::OperationError;
use changeset_operations::operations::ValidationReport;

use super::ValidationFormatter;

const EXAMPLE_SKILL: &str = "my-skill";

pub(crate) struct PlainTextFormatter;

impl PlainTextFormatter {
    fn format_changed_skills(output: &mut String, report: &ValidationReport) {
        output.push_str("Changed skills:\n");
        for id in &report.changed.skill_ids {
            if !report.coverage_checked {
                output.push_str(&format!("  {id}\n"));
                continue;
            }
            match report.result.covered_skills.get(id) {
                Some(bump) => output.push_str(&format!("  ✓ {id} ({bump})\n")),
                None => output.push_str(&format!("  ✗ {id}\n")),
            }
        }
    }

    fn format_version_checks(output: &mut String, report: &ValidationReport) {
        if report.result.version_checks.is_empty() {
            return;
        }
        output.push_str(&format!(
            "\nmetadata.version checks ({}):\n",
            report.policy
        ));
        for check in &report.result.version_checks {
            output.push_str(&format!("  {check}\n"));
        }
    }

    fn format_missing_changesets(dirs: &[String]) -> String {
        let mut output = String::from("Changed skill directories:\n");
        for dir in dirs {
            output.push_str(&format!("- {dir}\n"));
        }

        let example = dirs
            .first()
            .and_then(|dir| dir.rsplit('/').next())
            .unwrap_or(EXAMPLE_SKILL);
        output.push_str(&Self::format_changeset_hint(example));
        output
    }

    fn format_uncovered_skills(uncovered: &[String]) -> String {
        let mut output = Self::format_list("Skills without changeset coverage", uncovered);
        let example = uncovered.first().map_or(EXAMPLE_SKILL, String::as_str);
        output.push_str(&Self::format_changeset_hint(example));
        output
    }

    fn format_changeset_hint(example: &str) -> String {
        format!("\nAdd a changeset file, for example:\n---\n\"{example}\": minor\n---\n")
    }

    fn format_list<T: std::fmt::Display>(title: &str, items: &[T]) -> String {
        let mut output = format!("{title}:\n");
        for item in items {
            output.push_str(&format!("- {item}\n"));
        }
        output
    }
}

impl ValidationFormatter for PlainTextFormatter {
    fn format_success(&self, report: &ValidationReport) -> String {
        let mut output = String::new();
        if report.release_pr {
            output.push_str(
                "Release manifest changed; treating this as a release PR and skipping changeset coverage checks.\n",
            );
        }
        Self::format_changed_skills(&mut output, report);
        Self::format_version_checks(&mut output, report);
        output.push_str("\nPR version/changeset checks passed.\n");
        output
    }

    fn format_failure(&self, error: &OperationError) -> Option<String> {
        match error {
            OperationError::MissingChangesets { dirs } => {
                Some(Self::format_missing_changesets(dirs))
            }
            OperationError::CoverageFailed { uncovered } => {
                Some(Self::format_uncovered_skills(uncovered))
            }
            OperationError::VersionPolicyViolation { violations, .. } => {
                Some(Self::format_list("metadata.version violations", violations))
            }
            _ => None,
        }
    }
}
