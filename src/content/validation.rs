//! Validation for loaded archetypes and level cross-references.

use super::data::*;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' field '{}': {}",
            self.source_type, self.source_id, self.field, self.message
        )
    }
}

/// Helper macro for checking a numeric rule
macro_rules! check {
    ($errors:expr, $cond:expr, $source_type:expr, $source_id:expr, $field:expr, $message:expr) => {
        if !$cond {
            $errors.push(ValidationError {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                message: $message.to_string(),
            });
        }
    };
}

/// Validate tuning values and the level's archetype references.
/// Returns a list of validation errors, empty if everything is usable.
pub fn validate_content(archetypes: &ArchetypeFile, level: &LevelDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check!(
        errors,
        archetypes.schema_version == SCHEMA_VERSION,
        "Archetypes",
        "archetypes",
        "schema_version",
        format!("expected {SCHEMA_VERSION}, found {}", archetypes.schema_version)
    );
    check!(
        errors,
        level.schema_version == SCHEMA_VERSION,
        "Level",
        level.id,
        "schema_version",
        format!("expected {SCHEMA_VERSION}, found {}", level.schema_version)
    );

    let player = &archetypes.player;
    check!(errors, player.max_health > 0, "Player", "player", "max_health", "must be positive");
    check!(errors, player.max_jumps > 0, "Player", "player", "max_jumps", "must be positive");
    for (field, value) in [
        ("coyote_time", player.coyote_time),
        ("jump_buffer_time", player.jump_buffer_time),
        ("dash_duration", player.dash_duration),
        ("dash_cooldown", player.dash_cooldown),
        ("attack_duration", player.attack_duration),
        ("invincibility_time", player.invincibility_time),
        ("knockback_time", player.knockback_time),
    ] {
        check!(errors, value >= 0.0, "Player", "player", field, "window must not be negative");
    }

    for enemy in &archetypes.enemies {
        let id = enemy.id.as_str();
        check!(errors, enemy.max_health > 0, "Enemy", id, "max_health", "must be positive");
        check!(
            errors,
            enemy.patrol_distance > 0.0,
            "Enemy",
            id,
            "patrol_distance",
            "must be positive"
        );
        check!(
            errors,
            enemy.attack_range <= enemy.detection_range,
            "Enemy",
            id,
            "attack_range",
            "must not exceed detection_range"
        );
        check!(
            errors,
            (0.0..=1.0).contains(&enemy.idle_resume_chance),
            "Enemy",
            id,
            "idle_resume_chance",
            "must be within [0, 1]"
        );

        let death = &enemy.death;
        check!(
            errors,
            death.fall_duration + death.drop_duration <= death.total_duration,
            "Enemy",
            id,
            "death",
            "fall and drop phases must fit within total_duration"
        );
        check!(
            errors,
            (0.0..=1.0).contains(&death.fade_start),
            "Enemy",
            id,
            "death.fade_start",
            "must be within [0, 1]"
        );
    }

    for spawn in &level.enemies {
        check!(
            errors,
            archetypes.enemies.iter().any(|e| e.id == spawn.archetype),
            "Level",
            level.id,
            "enemies",
            format!("references missing archetype '{}'", spawn.archetype)
        );
    }

    errors
}
