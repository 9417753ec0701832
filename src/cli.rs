use clap::Parser;
use std::path::PathBuf;

use crate::application::dto::InputFormat;

/// Look up known vulnerabilities of the packages described by an SPDX SBOM
#[derive(Parser, Debug)]
#[command(name = "spdx-to-osv")]
#[command(version)]
#[command(
    about = "Look up known vulnerabilities of the packages described by an SPDX SBOM",
    long_about = "Reads an SPDX 2.x document (JSON or YAML), selects the packages that are \
                  security-relevant for the described element, derives OSV queries from their \
                  names, CPEs, PURLs, registry references and download locations, and writes \
                  every matching OSV record as a JSON array."
)]
pub struct Args {
    /// SPDX document to read
    #[arg(short = 'I', long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output file path (if not specified, outputs to stdout). Must not exist yet
    #[arg(short = 'O', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Input serialization: json or yaml (inferred from the file extension by default)
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub input_format: Option<InputFormat>,

    /// Query every package of the document instead of the reachable ones
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Name Maven packages "group:artifact" instead of "artifact"
    #[arg(long)]
    pub maven_group_names: bool,

    /// Maximum number of queries in flight (1-64)
    #[arg(short = 'j', long, value_name = "N")]
    pub max_concurrent: Option<usize>,

    /// Resolve Software Heritage release identifiers to the revision they tag
    #[arg(long)]
    pub resolve_swh_releases: bool,

    /// Exit with code 1 when any vulnerability is found
    #[arg(long)]
    pub fail_on_vulnerabilities: bool,

    /// Path to config file (default: auto-discover spdx-to-osv.config.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log every skipped reference and query at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Print only errors to stderr
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The explicit format, or the one named by the input's extension
    pub fn resolve_input_format(&self) -> Result<InputFormat, String> {
        match self.input_format {
            Some(format) => Ok(format),
            None => InputFormat::from_path(&self.input).ok_or_else(|| {
                format!(
                    "Cannot infer the format of '{}' from its extension. \
                     Please specify --input-format json or --input-format yaml",
                    self.input.display()
                )
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("spdx-to-osv").chain(args.iter().copied()))
    }

    #[test]
    fn test_minimal_arguments() {
        let args = parse(&["-I", "sbom.spdx.json"]).unwrap();
        assert_eq!(args.input, PathBuf::from("sbom.spdx.json"));
        assert!(args.output.is_none());
        assert!(!args.all);
        assert!(!args.maven_group_names);
        assert!(args.max_concurrent.is_none());
        assert_eq!(args.resolve_input_format(), Ok(InputFormat::Json));
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&[
            "--input",
            "sbom.txt",
            "--output",
            "osv.json",
            "--input-format",
            "yaml",
            "--all",
            "--maven-group-names",
            "-j",
            "4",
            "--resolve-swh-releases",
            "--fail-on-vulnerabilities",
            "--config",
            "custom.yml",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(args.output, Some(PathBuf::from("osv.json")));
        assert_eq!(args.resolve_input_format(), Ok(InputFormat::Yaml));
        assert!(args.all);
        assert!(args.maven_group_names);
        assert_eq!(args.max_concurrent, Some(4));
        assert!(args.resolve_swh_releases);
        assert!(args.fail_on_vulnerabilities);
        assert_eq!(args.config, Some(PathBuf::from("custom.yml")));
        assert!(args.verbose);
    }

    #[test]
    fn test_input_is_required() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_invalid_input_format_rejected() {
        let result = parse(&["-I", "sbom.json", "-f", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_extension_needs_explicit_format() {
        let args = parse(&["-I", "sbom.spdx"]).unwrap();
        let error = args.resolve_input_format().unwrap_err();
        assert!(error.contains("--input-format"));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(parse(&["-I", "a.json", "-v", "-q"]).is_err());
    }
}
