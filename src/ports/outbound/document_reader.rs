use crate::application::dto::InputFormat;
use crate::osv_conversion::domain::SbomDocument;
use crate::shared::Result;
use std::path::Path;

/// DocumentReader port for loading an SPDX document
///
/// This port abstracts the file system and the serialization format,
/// handing the core a read-only document model.
pub trait DocumentReader {
    /// Reads and deserializes an SPDX document
    ///
    /// # Arguments
    /// * `path` - Path to the SPDX document
    /// * `format` - Serialization of the document
    ///
    /// # Returns
    /// The document's packages, files, relationships and root elements
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The content is not a valid SPDX document in the given format
    fn read_document(&self, path: &Path, format: InputFormat) -> Result<SbomDocument>;
}
