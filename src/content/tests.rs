//! Content domain: tests for the shipped RON data and its validation.

use std::path::Path;

use super::data::EnemySpawnDef;
use super::loader::parse_ron;
use super::{ArchetypeFile, GeometryKind, LevelDef, Vec2Def, load_all_content, validate_content};
use crate::combat::HitResponse;

const ARCHETYPES_RON: &str = include_str!("../../assets/data/archetypes.ron");
const LEVEL0_RON: &str = include_str!("../../assets/data/level0.ron");

fn shipped() -> (ArchetypeFile, LevelDef) {
    let archetypes = parse_ron("archetypes.ron", ARCHETYPES_RON).expect("archetypes.ron parses");
    let level = parse_ron("level0.ron", LEVEL0_RON).expect("level0.ron parses");
    (archetypes, level)
}

// -----------------------------------------------------------------------------
// Shipped data
// -----------------------------------------------------------------------------

#[test]
fn test_shipped_content_is_valid() {
    let (archetypes, level) = shipped();
    let errors = validate_content(&archetypes, &level);
    assert!(errors.is_empty(), "validation errors: {:?}", errors);
}

#[test]
fn test_shipped_archetypes() {
    let (archetypes, _) = shipped();

    assert_eq!(archetypes.player.max_jumps, 2);
    assert_eq!(archetypes.player.max_health, 5);

    let bully = archetypes.enemies.iter().find(|e| e.id == "bully").unwrap();
    assert_eq!(bully.max_health, 3);
    assert_eq!(bully.hit_response, HitResponse::Knockback);
    assert!(!bully.chase);

    // Omitted fields come from the defaults.
    let brute = archetypes.enemies.iter().find(|e| e.id == "brute").unwrap();
    assert_eq!(brute.hit_response, HitResponse::Stunned);
    assert!(brute.chase);
    assert_eq!(brute.accel, 800.0);
    assert_eq!(brute.death.total_duration, 1.0);

    assert_eq!(archetypes.combat.collision_cooldown, 1.0);
    assert_eq!(archetypes.combat.player_attack_cooldown, 0.4);
}

#[test]
fn test_shipped_level() {
    let (_, level) = shipped();

    assert_eq!(level.id, "level0");
    assert!(!level.platforms.is_empty());
    assert!(level.platforms.iter().any(|p| p.kind == GeometryKind::Wall));
    assert_eq!(level.enemies.len(), 3);
    assert!(!level.collectibles.is_empty());
    assert!(level.player_spawn.y > level.kill_plane_y);
}

#[test]
fn test_load_from_assets_dir() {
    let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data");
    let content = load_all_content(&base, "level0.ron").expect("assets load");
    assert_eq!(content.level.name, "The Climb");
}

#[test]
fn test_missing_files_report_each_error() {
    let errors = load_all_content(Path::new("does/not/exist"), "level0.ron").unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].to_string().contains("archetypes.ron"));
}

#[test]
fn test_parse_error_names_file() {
    let error = parse_ron::<LevelDef>("broken.ron", "( id: ").unwrap_err();
    assert_eq!(error.file, "broken.ron");
}

#[test]
fn test_partial_file_uses_defaults() {
    let archetypes: ArchetypeFile =
        parse_ron("partial.ron", "(schema_version: 1, player: (max_jumps: 3))").unwrap();

    assert_eq!(archetypes.player.max_jumps, 3);
    assert_eq!(archetypes.player.move_speed, 300.0);
    assert!(archetypes.enemies.is_empty());
}

// -----------------------------------------------------------------------------
// Validation
// -----------------------------------------------------------------------------

#[test]
fn test_fallback_content_is_valid() {
    let errors = validate_content(&ArchetypeFile::default(), &LevelDef::fallback());
    assert!(errors.is_empty(), "validation errors: {:?}", errors);
}

#[test]
fn test_missing_archetype_reference() {
    let mut level = LevelDef::fallback();
    level.enemies.push(EnemySpawnDef {
        archetype: "ghost".to_string(),
        position: Vec2Def::new(0.0, 0.0),
    });

    let errors = validate_content(&ArchetypeFile::default(), &level);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].source_type, "Level");
    assert!(errors[0].message.contains("ghost"));
}

#[test]
fn test_bad_tuning_is_reported() {
    let mut archetypes = ArchetypeFile::default();
    archetypes.player.max_jumps = 0;
    archetypes.player.coyote_time = -0.1;
    {
        let enemy = &mut archetypes.enemies[0];
        enemy.attack_range = enemy.detection_range + 1.0;
        enemy.idle_resume_chance = 1.5;
        enemy.death.fall_duration = 2.0;
    }

    let errors = validate_content(&archetypes, &LevelDef::fallback());
    let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();

    assert!(fields.contains(&"max_jumps"));
    assert!(fields.contains(&"coyote_time"));
    assert!(fields.contains(&"attack_range"));
    assert!(fields.contains(&"idle_resume_chance"));
    assert!(fields.contains(&"death"));
    assert_eq!(errors.len(), 5);
}

#[test]
fn test_schema_version_mismatch_is_reported() {
    let mut archetypes = ArchetypeFile::default();
    archetypes.schema_version = 2;
    let mut level = LevelDef::fallback();
    level.schema_version = 0;

    let errors = validate_content(&archetypes, &level);

    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.field == "schema_version"));
    assert_eq!(errors[0].source_type, "Archetypes");
    assert!(errors[0].message.contains("found 2"));
    assert_eq!(errors[1].source_type, "Level");
}
