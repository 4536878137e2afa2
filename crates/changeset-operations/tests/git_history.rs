use std::fs;
use std::path::Path;

use anyhow::Result;
use changeset_operations::OperationError;
use changeset_operations::operations::{
    PrepareInput, PrepareOperation, PrepareOutcome, ValidatePrInput, ValidatePrOperation,
    ValidatePrOutcome,
};
use changeset_operations::providers::{
    FileSystemChangelogWriter, FileSystemChangesetIO, FileSystemManifestWriter,
    FileSystemProjectProvider, Git2Provider,
};
use changeset_operations::verification::{VersionCheck, ViolationKind};
use chrono::NaiveDate;
use git2::{IndexAddOption, Oid, Repository, Signature};
use tempfile::TempDir;

const CONTRIBUTOR: &str = "583231+octocat@users.noreply.github.com";

fn skill_document(name: &str, version: &str, body: &str) -> String {
    format!(
        "---\nname: {name}\ndescription: Searches things\nmetadata:\n  version: \"{version}\"\n---\n\n{body}\n"
    )
}

fn write(root: &Path, relative: &str, content: &str) -> Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn commit_all(repo: &Repository, message: &str, email: &str) -> Result<Oid> {
    let mut index = repo.index()?;
    index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
    index.update_all(["*"].iter(), None)?;
    index.write()?;

    let tree = repo.find_tree(index.write_tree()?)?;
    let signature = Signature::now("Test", email)?;
    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit()?],
        Err(_) => Vec::new(),
    };
    let parents: Vec<_> = parents.iter().collect();

    Ok(repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?)
}

/// A skill repository with one committed skill and a `base` branch at that commit.
fn skill_repository() -> Result<(TempDir, Repository)> {
    let dir = TempDir::new()?;
    let repo = Repository::init(dir.path())?;
    repo.remote("origin", "git@github.com:acme/skills.git")?;

    write(
        dir.path(),
        "package.json",
        "{\n  \"name\": \"skills\",\n  \"version\": \"1.0.0\"\n}\n",
    )?;
    write(dir.path(), "CHANGELOG.md", "# Changelog\n")?;
    write(
        dir.path(),
        "skills/search/SKILL.md",
        &skill_document("search", "0.1.0", "# Search"),
    )?;
    let initial = commit_all(&repo, "Initial commit", "test@example.com")?;
    repo.branch("base", &repo.find_commit(initial)?, false)?;

    Ok((dir, repo))
}

fn add_changeset(root: &Path, file: &str, skill: &str, bump: &str, body: &str) -> Result<()> {
    write(
        root,
        &format!(".changeset/{file}"),
        &format!("---\n\"{skill}\": {bump}\n---\n\n{body}\n"),
    )
}

#[test]
fn prepare_links_notes_to_the_introducing_commit() -> Result<()> {
    let (dir, repo) = skill_repository()?;
    add_changeset(dir.path(), "brave-fox.md", "search", "minor", "Adds fuzzy matching.")?;
    let sha = commit_all(&repo, "Add fuzzy matching (#12)", CONTRIBUTOR)?;

    let operation = PrepareOperation::new(
        FileSystemProjectProvider::new(),
        Git2Provider::new(),
        FileSystemChangesetIO::new(dir.path()),
        FileSystemManifestWriter::new(),
        FileSystemChangelogWriter::new(),
    );
    let input = PrepareInput {
        date: NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date"),
        dry_run: false,
    };

    let outcome = operation.execute(dir.path(), &input)?;

    let output = match outcome {
        PrepareOutcome::Prepared(output) => output,
        other => panic!("expected a prepared release, got {other:?}"),
    };
    assert_eq!(output.plan.new_package_version.to_string(), "1.1.0");

    let skill = fs::read_to_string(dir.path().join("skills/search/SKILL.md"))?;
    assert!(skill.contains("version: \"0.2.0\""));

    let changelog = fs::read_to_string(dir.path().join("skills/search/CHANGELOG.md"))?;
    assert!(changelog.contains("## 0.2.0 - 2026-10-19"));
    assert!(changelog.contains("https://github.com/acme/skills/pull/12"));
    assert!(changelog.contains(&format!("https://github.com/acme/skills/commit/{sha}")));
    assert!(changelog.contains("Thanks [@octocat](https://github.com/octocat)!"));
    assert!(changelog.contains("Adds fuzzy matching."));

    let root_changelog = fs::read_to_string(dir.path().join("CHANGELOG.md"))?;
    assert!(root_changelog.contains("## v1.1.0"));
    assert!(root_changelog.contains("📦 search@0.2.0"));

    assert!(!dir.path().join(".changeset/brave-fox.md").exists());
    assert!(dir.path().join(".changeset/release.md").exists());
    Ok(())
}

#[test]
fn prepare_without_history_still_releases() -> Result<()> {
    let dir = TempDir::new()?;
    Repository::init(dir.path())?;
    write(
        dir.path(),
        "package.json",
        "{\"name\": \"skills\", \"version\": \"0.1.0\"}\n",
    )?;
    write(
        dir.path(),
        "skills/search/SKILL.md",
        &skill_document("search", "1.0.0", "# Search"),
    )?;
    add_changeset(dir.path(), "quiet-owl.md", "search", "patch", "Fixes a typo.")?;

    let operation = PrepareOperation::new(
        FileSystemProjectProvider::new(),
        Git2Provider::new(),
        FileSystemChangesetIO::new(dir.path()),
        FileSystemManifestWriter::new(),
        FileSystemChangelogWriter::new(),
    );
    let input = PrepareInput {
        date: NaiveDate::from_ymd_opt(2026, 1, 2).expect("valid date"),
        dry_run: false,
    };

    let outcome = operation.execute(dir.path(), &input)?;

    assert!(matches!(outcome, PrepareOutcome::Prepared(_)));
    let changelog = fs::read_to_string(dir.path().join("skills/search/CHANGELOG.md"))?;
    assert!(changelog.contains("## 1.0.1 - 2026-01-02"));
    assert!(changelog.contains("- Fixes a typo."));
    assert!(!changelog.contains("Thanks"));
    Ok(())
}

fn validate(root: &Path, input: &ValidatePrInput) -> changeset_operations::Result<ValidatePrOutcome> {
    ValidatePrOperation::new(FileSystemProjectProvider::new(), Git2Provider::new())
        .execute(root, input)
}

#[test]
fn validate_passes_covered_change_on_branch() -> Result<()> {
    let (dir, repo) = skill_repository()?;
    write(
        dir.path(),
        "skills/search/SKILL.md",
        &skill_document("search", "0.1.0", "# Search\n\nNow with filters."),
    )?;
    add_changeset(dir.path(), "brave-fox.md", "search", "minor", "Adds filters.")?;
    commit_all(&repo, "Add filters", "test@example.com")?;

    let outcome = validate(dir.path(), &ValidatePrInput::new("base"))?;

    let report = match outcome {
        ValidatePrOutcome::Passed(report) => report,
        other => panic!("expected validation to pass, got {other:?}"),
    };
    assert!(report.coverage_checked);
    assert!(matches!(
        report.result.version_checks.as_slice(),
        [VersionCheck::Unchanged { .. }]
    ));
    Ok(())
}

#[test]
fn validate_rejects_branch_without_changeset() -> Result<()> {
    let (dir, repo) = skill_repository()?;
    write(dir.path(), "skills/search/references/guide.md", "# Guide\n")?;
    commit_all(&repo, "Add guide", "test@example.com")?;

    let result = validate(dir.path(), &ValidatePrInput::new("base"));

    assert!(matches!(
        result,
        Err(OperationError::MissingChangesets { dirs }) if dirs == ["skills/search"]
    ));
    Ok(())
}

#[test]
fn validate_rejects_manual_version_edit() -> Result<()> {
    let (dir, repo) = skill_repository()?;
    write(
        dir.path(),
        "skills/search/SKILL.md",
        &skill_document("search", "0.2.0", "# Search"),
    )?;
    add_changeset(dir.path(), "brave-fox.md", "search", "minor", "Adds filters.")?;
    commit_all(&repo, "Bump search by hand", "test@example.com")?;

    let result = validate(dir.path(), &ValidatePrInput::new("base"));

    let violations = match result {
        Err(OperationError::VersionPolicyViolation { violations, .. }) => violations,
        other => panic!("expected a policy violation, got {other:?}"),
    };
    assert_eq!(violations.len(), 1);
    assert!(matches!(violations[0].kind, ViolationKind::ManualEdit { .. }));
    Ok(())
}

#[test]
fn validate_ignores_files_outside_skills() -> Result<()> {
    let (dir, repo) = skill_repository()?;
    write(dir.path(), "README.md", "# Skills\n")?;
    commit_all(&repo, "Add readme", "test@example.com")?;

    let outcome = validate(dir.path(), &ValidatePrInput::new("base"))?;

    assert!(matches!(
        outcome,
        ValidatePrOutcome::NoSkillChanges {
            changed_file_count: 1
        }
    ));
    Ok(())
}
