use std::path::Path;

/// Serialization of the input SPDX document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// SPDX JSON (`.json`, `.spdx.json`)
    Json,
    /// SPDX YAML (`.yaml`, `.yml`)
    Yaml,
}

impl InputFormat {
    /// Infers the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "json" => Some(InputFormat::Json),
            "yaml" | "yml" => Some(InputFormat::Yaml),
            _ => None,
        }
    }
}

impl std::str::FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(InputFormat::Json),
            "yaml" | "yml" => Ok(InputFormat::Yaml),
            _ => Err(format!(
                "Invalid input format: {}. Please specify 'json' or 'yaml'",
                s
            )),
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Json => write!(f, "JSON"),
            InputFormat::Yaml => write!(f, "YAML"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::str::FromStr;

    #[test]
    fn test_input_format_from_str() {
        assert_eq!(InputFormat::from_str("json").unwrap(), InputFormat::Json);
        assert_eq!(InputFormat::from_str("YAML").unwrap(), InputFormat::Yaml);
        assert_eq!(InputFormat::from_str("yml").unwrap(), InputFormat::Yaml);
    }

    #[test]
    fn test_input_format_from_str_invalid() {
        let error = InputFormat::from_str("rdf").unwrap_err();
        assert!(error.contains("Invalid input format"));
        assert!(error.contains("rdf"));
    }

    #[test]
    fn test_input_format_from_path() {
        assert_eq!(
            InputFormat::from_path(&PathBuf::from("sbom.spdx.json")),
            Some(InputFormat::Json)
        );
        assert_eq!(
            InputFormat::from_path(&PathBuf::from("dir/sbom.SPDX.YML")),
            Some(InputFormat::Yaml)
        );
        assert_eq!(InputFormat::from_path(&PathBuf::from("sbom.rdf")), None);
        assert_eq!(InputFormat::from_path(&PathBuf::from("sbom")), None);
    }

    #[test]
    fn test_input_format_display() {
        assert_eq!(InputFormat::Json.to_string(), "JSON");
        assert_eq!(InputFormat::Yaml.to_string(), "YAML");
    }
}
