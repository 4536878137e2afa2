use std::path::Path;

use changeset_operations::operations::FinalizeOperation;
use changeset_operations::providers::{
    FileSystemChangelogWriter, FileSystemManifestWriter, FileSystemProjectProvider,
};

use crate::error::Result;
use crate::output::display_path;

pub(crate) fn run(repo_root: &Path) -> Result<()> {
    let operation = FinalizeOperation::new(
        FileSystemProjectProvider::new(),
        FileSystemManifestWriter::new(),
        FileSystemChangelogWriter::new(),
    );

    let output = operation.execute(repo_root)?;

    println!(
        "Prepared {} from CHANGELOG.md section ## v{}",
        display_path(repo_root, &output.release_notes_path),
        output.version
    );
    if let Some(manifest) = &output.manifest {
        let released: Vec<String> = manifest
            .skills
            .iter()
            .map(|(name, version)| format!("{name}@{version}"))
            .collect();
        println!("Released ({} bump): {}", manifest.bump, released.join(", "));
    }

    Ok(())
}
