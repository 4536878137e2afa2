mod formatter;
mod plain;

use std::path::Path;

use changeset_operations::operations::ReleasePlan;

pub(crate) use formatter::ValidationFormatter;
pub(crate) use plain::PlainTextFormatter;

const RULE_WIDTH: usize = 72;

pub(crate) fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

/// Repository-relative form of `path` for messages.
pub(crate) fn display_path(repo_root: &Path, path: &Path) -> String {
    path.strip_prefix(repo_root)
        .unwrap_or(path)
        .display()
        .to_string()
}

pub(crate) fn print_plan(plan: &ReleasePlan) {
    println!("Release bump: {}", plan.bump);
    for skill in &plan.skills {
        println!(
            "  {}: {} -> {} ({})",
            skill.name, skill.current_version, skill.new_version, skill.bump
        );
    }
    println!(
        "  package: {} -> {}",
        plan.current_package_version, plan.new_package_version
    );
    println!();
    println!("{}", rule());
    print!("{}", plan.release_manifest());
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn display_path_strips_repo_root() {
        let root = PathBuf::from("/repo");

        assert_eq!(
            display_path(&root, &root.join(".changeset/brave-fox.md")),
            ".changeset/brave-fox.md"
        );
        assert_eq!(display_path(&root, Path::new("/elsewhere/x.md")), "/elsewhere/x.md");
    }
}
