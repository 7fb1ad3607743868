//! Content domain: RON archetype and level data loaded at startup.

mod data;
mod loader;
mod validation;

#[cfg(test)]
mod tests;

use bevy::prelude::*;
use std::path::Path;

pub use data::{ArchetypeFile, GeometryKind, LevelDef, Vec2Def};
pub use loader::{LoadedContent, load_all_content};
pub use validation::validate_content;

use crate::combat::EnemyArchetypes;

const DATA_DIR: &str = "assets/data";
const LEVEL_FILE: &str = "level0.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_content);
    }
}

/// Read assets/data and install the tuning resources. Any load or validation
/// error falls back to the built-in defaults so the game still starts.
fn load_content(mut commands: Commands) {
    let content = match load_all_content(Path::new(DATA_DIR), LEVEL_FILE) {
        Ok(content) => {
            let errors = validate_content(&content.archetypes, &content.level);
            if errors.is_empty() {
                info!(
                    "Loaded {} enemy archetypes and level '{}'",
                    content.archetypes.enemies.len(),
                    content.level.name
                );
                content
            } else {
                for error in &errors {
                    warn!("{}", error);
                }
                warn!("Content failed validation, using built-in defaults");
                builtin_content()
            }
        }
        Err(errors) => {
            for error in &errors {
                warn!("{}", error);
            }
            warn!("Content failed to load, using built-in defaults");
            builtin_content()
        }
    };

    let LoadedContent { archetypes, level } = content;
    commands.insert_resource(archetypes.player);
    commands.insert_resource(archetypes.combat);
    commands.insert_resource(EnemyArchetypes::from_list(archetypes.enemies));
    commands.insert_resource(level);
}

fn builtin_content() -> LoadedContent {
    LoadedContent {
        archetypes: ArchetypeFile::default(),
        level: LevelDef::fallback(),
    }
}
