use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

#[derive(Debug, Deserialize)]
pub struct HashtagsFile {
    pub hashtags: Vec<String>,
}

/// Load and validate the hashtag set from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (empty set, missing `#` prefix, duplicates).
pub fn load_hashtags(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TagsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: HashtagsFile = serde_yaml::from_str(&content)?;
    validate_hashtags(&file)?;
    Ok(file.hashtags)
}

fn validate_hashtags(file: &HashtagsFile) -> Result<(), ConfigError> {
    if file.hashtags.is_empty() {
        return Err(ConfigError::Validation(
            "hashtag set must not be empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for tag in &file.hashtags {
        if !tag.starts_with('#') || tag.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "hashtag \"{tag}\" must start with '#' and name a tag"
            )));
        }
        if tag[1..].contains(|c: char| c.is_whitespace() || c == '#') {
            return Err(ConfigError::Validation(format!(
                "hashtag \"{tag}\" contains whitespace or a nested '#'"
            )));
        }
        if !seen.insert(tag.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate hashtag: \"{tag}\""
            )));
        }
    }

    Ok(())
}
