mod error;
mod metadata;
mod package_json;
mod release;

pub use error::{ManifestError, MetadataError};
pub use metadata::{
    extract_version, metadata_block, read_skill_version, update_version, write_skill_version,
};
pub use package_json::{read_package_version, write_package_version};
pub use release::{
    ReleaseManifest, ReleaseSection, parse_release_manifest, read_release_manifest,
    render_release_manifest,
};
