use serde::Deserialize;

/// SPDX relationship types (SPDX 2.3 vocabulary).
///
/// Anything outside the vocabulary deserializes to `Unknown` so that a single
/// unexpected value does not reject the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    Describes,
    DescribedBy,
    Contains,
    ContainedBy,
    DependsOn,
    DependencyOf,
    DependencyManifestOf,
    BuildDependencyOf,
    DevDependencyOf,
    OptionalDependencyOf,
    ProvidedDependencyOf,
    TestDependencyOf,
    RuntimeDependencyOf,
    ExampleOf,
    Generates,
    GeneratedFrom,
    AncestorOf,
    DescendantOf,
    VariantOf,
    DistributionArtifact,
    PatchFor,
    PatchApplied,
    CopyOf,
    FileAdded,
    FileDeleted,
    FileModified,
    ExpandedFromArchive,
    DynamicLink,
    StaticLink,
    DataFileOf,
    TestCaseOf,
    BuildToolOf,
    DevToolOf,
    TestOf,
    TestToolOf,
    DocumentationOf,
    OptionalComponentOf,
    MetafileOf,
    PackageOf,
    Amends,
    PrerequisiteFor,
    HasPrerequisite,
    RequirementDescriptionFor,
    SpecificationFor,
    Other,
    Missing,
    #[serde(other)]
    Unknown,
}

/// How a relationship type participates in vulnerability propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelevanceClass {
    /// `A <type> B` makes B relevant when A is relevant.
    Forward,
    /// `A <type> B` makes A relevant when B is relevant.
    Reverse,
    NonRelevant,
}

impl RelationshipType {
    /// Relevance class lookup. The three classes are disjoint; types not
    /// listed explicitly are non-relevant.
    pub fn relevance_class(self) -> RelevanceClass {
        use RelationshipType::*;
        match self {
            Contains | CopyOf | DynamicLink | ExpandedFromArchive | FileAdded | GeneratedFrom
            | PackageOf | PatchFor | StaticLink | HasPrerequisite | VariantOf | DependsOn => {
                RelevanceClass::Forward
            }
            ContainedBy
            | DistributionArtifact
            | Generates
            | OptionalComponentOf
            | PatchApplied
            | PrerequisiteFor
            | DependencyOf
            | OptionalDependencyOf
            | RuntimeDependencyOf => RelevanceClass::Reverse,
            Describes
            | DescribedBy
            | AncestorOf
            | BuildToolOf
            | DataFileOf
            | DescendantOf
            | DocumentationOf
            | FileDeleted
            | FileModified
            | MetafileOf
            | Other
            | Amends
            | TestCaseOf
            | Missing
            | BuildDependencyOf
            | DependencyManifestOf
            | DevDependencyOf
            | DevToolOf
            | ExampleOf
            | ProvidedDependencyOf
            | TestDependencyOf
            | TestOf
            | TestToolOf
            | RequirementDescriptionFor
            | SpecificationFor
            | Unknown => RelevanceClass::NonRelevant,
        }
    }
}

/// One relationship as declared in the document.
///
/// `related` is `None` for `NONE`/`NOASSERTION` targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub element_id: String,
    pub relationship_type: RelationshipType,
    pub related: Option<String>,
}

impl Relationship {
    pub fn new(
        element_id: impl Into<String>,
        relationship_type: RelationshipType,
        related: Option<String>,
    ) -> Self {
        Self {
            element_id: element_id.into(),
            relationship_type,
            related,
        }
    }
}
