use std::cmp::Ordering;

use changeset_core::BumpType;
use semver::Version;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("invalid semantic version: '{version}'")]
    InvalidVersion { version: String },

    #[error("cannot apply a {bump} bump to {version}: component overflows")]
    Overflow { version: Version, bump: BumpType },
}

/// Parses `major.minor.patch` with nothing before, between or after the three numbers.
///
/// Pre-release and build metadata are rejected rather than ignored.
///
/// # Errors
///
/// Returns [`VersionError::InvalidVersion`] for any other shape, including
/// surrounding whitespace, leading zeros and components that overflow `u64`.
pub fn parse_version(version: &str) -> Result<Version, VersionError> {
    let invalid = || VersionError::InvalidVersion {
        version: version.to_string(),
    };

    let mut parts = version.split('.');
    let (Some(major), Some(minor), Some(patch), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let component = |part: &str| -> Result<u64, VersionError> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if part.len() > 1 && part.starts_with('0') {
            return Err(invalid());
        }
        part.parse::<u64>().map_err(|_| invalid())
    };

    Ok(Version::new(
        component(major)?,
        component(minor)?,
        component(patch)?,
    ))
}

/// Increments the component named by `bump_type` and zeroes the ones below it.
///
/// # Errors
///
/// Returns [`VersionError::Overflow`] if the incremented component is already `u64::MAX`.
#[must_use = "bumping does not modify the input version"]
pub fn bump_version(version: &Version, bump_type: BumpType) -> Result<Version, VersionError> {
    let overflow = || VersionError::Overflow {
        version: version.clone(),
        bump: bump_type,
    };

    let bumped = match bump_type {
        BumpType::Major => Version::new(version.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
        BumpType::Minor => Version::new(
            version.major,
            version.minor.checked_add(1).ok_or_else(overflow)?,
            0,
        ),
        BumpType::Patch => Version::new(
            version.major,
            version.minor,
            version.patch.checked_add(1).ok_or_else(overflow)?,
        ),
    };
    Ok(bumped)
}

/// Parses `version` and applies `bump_type`.
///
/// # Errors
///
/// Returns [`VersionError::InvalidVersion`] if `version` is malformed and
/// [`VersionError::Overflow`] if the bump does not fit.
#[must_use = "bumping does not modify the input version"]
pub fn bump_version_str(version: &str, bump_type: BumpType) -> Result<Version, VersionError> {
    bump_version(&parse_version(version)?, bump_type)
}

/// Classifies the delta between two versions.
///
/// This never fails: equal or decreasing versions fall back to `Patch`.
/// Validation must use [`compare_versions`] instead.
#[must_use]
pub fn detect_bump(from: &Version, to: &Version) -> BumpType {
    if to.major > from.major {
        BumpType::Major
    } else if to.minor > from.minor {
        BumpType::Minor
    } else {
        BumpType::Patch
    }
}

/// Positional three-component comparison.
#[must_use]
pub fn compare_versions(left: &Version, right: &Version) -> Ordering {
    left.major
        .cmp(&right.major)
        .then(left.minor.cmp(&right.minor))
        .then(left.patch.cmp(&right.patch))
}
