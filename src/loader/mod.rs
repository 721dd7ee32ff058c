use crate::error::{GuardError, Result};
use crate::models::ApiDescription;
use std::fs;
use std::path::Path;

/// Load an API description from a YAML or JSON file
pub fn load_description<P: AsRef<Path>>(path: P) -> Result<ApiDescription> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| {
        GuardError::DescriptionLoadError(format!("Failed to read file {}: {}", path.display(), e))
    })?;

    // serde_yaml handles JSON input as well
    let description: ApiDescription = serde_yaml::from_str(&content).map_err(|e| {
        GuardError::DescriptionLoadError(format!("Failed to parse description: {}", e))
    })?;

    description.ensure_paths()?;

    Ok(description)
}
