use super::registry_parsers::{npm_purl, with_version};
use crate::osv_conversion::domain::{Ecosystem, OsvPackage, VulnerabilityRequest};
use crate::shared::error::ParseError;
use regex::Regex;
use std::sync::LazyLock;

const MAVEN_PREFIX: &str = "https://search.maven.org/remotecontent";
const NPM_PREFIX: &str = "https://www.npmjs.com/package/";
const NUGET_PREFIX: &str = "https://www.nuget.org/api/";
const GITHUB_PREFIX: &str = "https://github.com/";
const GITHUB_SSH_PREFIX: &str = "git@github.com:";
const GIT_PLUS_PREFIX: &str = "git+";

/// Name prefix for identities derived from GitHub locations.
const GITHUB_NAME_PREFIX: &str = "github.com/";

/// Minimum path segments in a Maven Central file path: group, version, file.
const MAVEN_MIN_SEGMENTS: usize = 3;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static regex")
}

static MAVEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^https://search\.maven\.org/remotecontent.*?filepath=(?P<path>[^?]+)(?:\?.+)?$")
});

// Tried before the unversioned form, which would also match.
static NPM_VERSIONED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^https://www\.npmjs\.com/package/(?P<name>[@A-Za-z0-9_./-]+)/v/(?P<version>[A-Za-z0-9_.-]+)$")
});

static NPM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^https://www\.npmjs\.com/package/(?P<name>[@A-Za-z0-9_./-]+)$"));

static NUGET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^https://www\.nuget\.org/api/v[0-9]+/package/(?P<name>[A-Za-z0-9_.-]+)/(?P<version>[A-Za-z0-9_.-]+)$")
});

/// GitHub location shapes in priority order.
///
/// Several shapes overlap lexically: the `.git` clone URL is also a valid
/// project page, and a commit hash is also a valid tree ref. The first match
/// wins, so the order below decides the classification.
static GITHUB_PATTERNS: LazyLock<Vec<(GithubShape, Regex)>> = LazyLock::new(|| {
    let part = r"[A-Za-z0-9_.\-]";
    let org_project = format!("(?P<org>{part}+)/(?P<project>{part}+)");
    let tag = "[A-Za-z0-9_.-]+";

    vec![
        (
            GithubShape::GitPlus,
            format!(r"^git\+(?:https://github\.com/|git@github\.com:){org_project}(?:@(?P<version>{part}+))?(?:#.+)?$"),
        ),
        (
            GithubShape::HttpsClone,
            format!(r"^https://github\.com/{org_project}\.git$"),
        ),
        (
            GithubShape::ProjectPage,
            format!(r"^https://github\.com/{org_project}$"),
        ),
        (
            GithubShape::SshClone,
            format!(r"^git@github\.com:{org_project}\.git$"),
        ),
        (
            GithubShape::CommitTree,
            format!(r"^https://github\.com/{org_project}/tree/(?P<commit>[a-f0-9]{{40}})$"),
        ),
        (
            GithubShape::ReleaseTag,
            format!(r"^https://github\.com/{org_project}/releases/tag/(?P<version>{tag})$"),
        ),
        (
            GithubShape::RefTree,
            format!(r"^https://github\.com/{org_project}/tree/(?P<version>{tag})$"),
        ),
    ]
    .into_iter()
    .map(|(shape, pattern)| (shape, compile(&pattern)))
    .collect()
});

/// GitHub location shapes the parser recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GithubShape {
    /// `git+https://github.com/org/project[@ref][#subpath]` or the `git@` form
    GitPlus,
    /// `https://github.com/org/project.git`
    HttpsClone,
    /// `https://github.com/org/project`
    ProjectPage,
    /// `git@github.com:org/project.git`
    SshClone,
    /// `https://github.com/org/project/tree/<40 hex>`
    CommitTree,
    /// `https://github.com/org/project/releases/tag/<tag>`
    ReleaseTag,
    /// `https://github.com/org/project/tree/<ref>`
    RefTree,
}

/// Decoder for package download locations.
pub struct DownloadLocationParser;

impl DownloadLocationParser {
    /// Turns a download location into a request.
    ///
    /// # Returns
    /// * `Ok(None)` - the location is absent, `NOASSERTION`/`NONE`, or not
    ///   hosted on a known registry or forge
    /// * `Ok(Some(_))` - the first matching pattern's request
    /// * `Err(_)` - the host is known but no pattern of its family matched
    pub fn parse(location: Option<&str>) -> Result<Option<VulnerabilityRequest>, ParseError> {
        let location = match location.map(str::trim) {
            None | Some("") | Some("NOASSERTION") | Some("NONE") => return Ok(None),
            Some(location) => location,
        };

        if location.starts_with(MAVEN_PREFIX) {
            Self::parse_maven(location).map(Some)
        } else if location.starts_with(NPM_PREFIX) {
            Self::parse_npm(location).map(Some)
        } else if location.starts_with(NUGET_PREFIX) {
            Self::parse_nuget(location).map(Some)
        } else if location.starts_with(GITHUB_PREFIX)
            || location.starts_with(GITHUB_SSH_PREFIX)
            || Self::is_github_git_plus(location)
        {
            Self::parse_github(location).map(|(_, request)| Some(request))
        } else {
            Ok(None)
        }
    }

    /// `git+` locations pointing at GitHub; other forges yield nothing.
    fn is_github_git_plus(location: &str) -> bool {
        location.strip_prefix(GIT_PLUS_PREFIX).is_some_and(|repository| {
            repository.starts_with(GITHUB_PREFIX) || repository.starts_with(GITHUB_SSH_PREFIX)
        })
    }

    /// `https://search.maven.org/remotecontent?filepath=org/spdx/tool/1.0/tool-1.0.jar`
    ///
    /// All segments before the version are dot-joined into the name.
    fn parse_maven(location: &str) -> Result<VulnerabilityRequest, ParseError> {
        let mismatch = || ParseError::mismatch("Maven download", location, MAVEN_PATTERN.as_str());

        let path = MAVEN_PATTERN
            .captures(location)
            .and_then(|c| c.name("path"))
            .ok_or_else(mismatch)?
            .as_str();
        let segments: Vec<&str> = path.split('/').collect();
        if segments.len() < MAVEN_MIN_SEGMENTS {
            return Err(mismatch());
        }

        let version = segments[segments.len() - 2];
        let name = segments[..segments.len() - 2].join(".");
        let purl = format!("pkg:maven/{}@{}", name, version);

        let package = OsvPackage::new(name, Some(Ecosystem::Maven), Some(purl))?;
        Ok(VulnerabilityRequest::package(package, Some(version.to_string())))
    }

    fn parse_npm(location: &str) -> Result<VulnerabilityRequest, ParseError> {
        let (name, version) = if let Some(c) = NPM_VERSIONED_PATTERN.captures(location) {
            (c.name("name"), c.name("version").map(|m| m.as_str()))
        } else if let Some(c) = NPM_PATTERN.captures(location) {
            (c.name("name"), None)
        } else {
            (None, None)
        };
        let name = name
            .ok_or_else(|| ParseError::mismatch("npm download", location, NPM_PATTERN.as_str()))?
            .as_str();

        let purl = with_version(npm_purl(name), version);
        let package = OsvPackage::new(name, Some(Ecosystem::Npm), Some(purl))?;
        Ok(VulnerabilityRequest::package(package, version.map(str::to_string)))
    }

    fn parse_nuget(location: &str) -> Result<VulnerabilityRequest, ParseError> {
        let captures = NUGET_PATTERN
            .captures(location)
            .ok_or_else(|| ParseError::mismatch("NuGet download", location, NUGET_PATTERN.as_str()))?;
        let name = &captures["name"];
        let version = &captures["version"];

        let purl = format!("pkg:nuget/{}@{}", name, version);
        let package = OsvPackage::new(name, Some(Ecosystem::NuGet), Some(purl))?;
        Ok(VulnerabilityRequest::package(package, Some(version.to_string())))
    }

    /// Classifies a GitHub location against the shapes in priority order.
    pub fn parse_github(location: &str) -> Result<(GithubShape, VulnerabilityRequest), ParseError> {
        for (shape, pattern) in GITHUB_PATTERNS.iter() {
            let Some(captures) = pattern.captures(location) else {
                continue;
            };

            if let Some(commit) = captures.name("commit") {
                return Ok((*shape, VulnerabilityRequest::commit(commit.as_str())));
            }

            let org = &captures["org"];
            let project = &captures["project"];
            let project = project.strip_suffix(".git").unwrap_or(project);
            let package = OsvPackage::named(format!("{}{}/{}", GITHUB_NAME_PREFIX, org, project))?;
            let version = captures.name("version").map(|m| m.as_str().to_string());
            return Ok((*shape, VulnerabilityRequest::package(package, version)));
        }

        Err(ParseError::mismatch(
            "GitHub download",
            location,
            "git+<repo>[@ref][#path] | <repo>.git | <repo> | <repo>/tree/<commit> | <repo>/releases/tag/<tag> | <repo>/tree/<ref>",
        ))
    }
}
