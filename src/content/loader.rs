//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::*;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Everything read from assets/data.
#[derive(Debug, Clone)]
pub struct LoadedContent {
    pub archetypes: ArchetypeFile,
    pub level: LevelDef,
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse RON text; `file` only labels errors.
pub fn parse_ron<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load a single RON struct.
fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_ron(&file_name, &contents)
}

/// Load archetypes.ron and the named level from `base_path`.
/// Returns errors for any files that fail to load.
pub fn load_all_content(
    base_path: &Path,
    level_file: &str,
) -> Result<LoadedContent, Vec<ContentLoadError>> {
    let mut errors = Vec::new();

    let archetypes = load_single_file::<ArchetypeFile>(&base_path.join("archetypes.ron"))
        .map_err(|e| errors.push(e))
        .ok();
    let level = load_single_file::<LevelDef>(&base_path.join(level_file))
        .map_err(|e| errors.push(e))
        .ok();

    match (archetypes, level) {
        (Some(archetypes), Some(level)) if errors.is_empty() => {
            Ok(LoadedContent { archetypes, level })
        }
        _ => Err(errors),
    }
}
