use changeset_core::BumpType;

/// Values partitioned by bump type, preserving insertion order per bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByBump<T> {
    pub major: Vec<T>,
    pub minor: Vec<T>,
    pub patch: Vec<T>,
}

impl<T> Default for ByBump<T> {
    fn default() -> Self {
        Self {
            major: Vec::new(),
            minor: Vec::new(),
            patch: Vec::new(),
        }
    }
}

impl<T> ByBump<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bump: BumpType, value: T) {
        self.bucket_mut(bump).push(value);
    }

    #[must_use]
    pub fn bucket(&self, bump: BumpType) -> &[T] {
        match bump {
            BumpType::Major => &self.major,
            BumpType::Minor => &self.minor,
            BumpType::Patch => &self.patch,
        }
    }

    fn bucket_mut(&mut self, bump: BumpType) -> &mut Vec<T> {
        match bump {
            BumpType::Major => &mut self.major,
            BumpType::Minor => &mut self.minor,
            BumpType::Patch => &mut self.patch,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.major.is_empty() && self.minor.is_empty() && self.patch.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.major.len() + self.minor.len() + self.patch.len()
    }

    /// Iterates buckets from the highest bump down.
    pub fn iter_descending(&self) -> impl Iterator<Item = (BumpType, &[T])> {
        BumpType::DESCENDING
            .into_iter()
            .map(move |bump| (bump, self.bucket(bump)))
    }
}

/// One changeset's contribution to a single skill's changelog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteEntry {
    pub body: String,
    pub pr_number: Option<u64>,
    pub commit_sha: Option<String>,
    pub author_login: Option<String>,
}

/// One changeset as it appears in the root changelog.
///
/// `packages` holds `name@version` strings and must only be filled once every
/// touched skill has its final version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootReleaseEntry {
    pub bump_type: BumpType,
    pub body: String,
    pub pr_number: Option<u64>,
    pub pr_title: Option<String>,
    pub commit_sha: Option<String>,
    pub packages: Vec<String>,
}

pub type GroupedNotes = ByBump<NoteEntry>;
pub type GroupedRootNotes = ByBump<RootReleaseEntry>;
