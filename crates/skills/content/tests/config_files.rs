use std::io::Write;
use std::path::Path;

use skills_content::ConfigLoader;
use skills_core::SkillsConfig;

#[test]
fn shipped_config_matches_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/smart_skills.toml");
    let config = ConfigLoader::load(&path).expect("shipped config should load");

    assert_eq!(config, SkillsConfig::default());
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn partial_config_file_keeps_other_defaults() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[weapons]\nskill_catch_up_bonus = 120").expect("write config");

    let config = ConfigLoader::load(file.path()).expect("partial config should load");

    assert_eq!(config.catchup_bonus_pct, 120);
    assert_eq!(config.skill_recovery_bonus_pct, 100);
    assert!(config.swim_skill_loss_disabled);
}

#[test]
fn missing_file_reports_path() {
    let err = ConfigLoader::load(Path::new("/nonexistent/smart_skills.toml"))
        .expect_err("missing file should fail");
    assert!(err.to_string().contains("/nonexistent/smart_skills.toml"));
}
