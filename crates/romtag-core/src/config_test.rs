use super::*;
use tempfile::tempdir;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert!(config.catalog.is_none());
    assert_eq!(config.cache_dir, PathBuf::from(".romtag"));
    assert_eq!(config.archive_extensions, vec!["zip", "7z"]);
    assert_eq!(config.tag_program, "tag");
    config.validate().unwrap();
}

#[test]
fn test_load_resolves_paths_relative_to_file() {
    let temp = tempdir().unwrap();
    let yaml = r#"
catalog: mame.xml
cache_dir: cache
archive_extensions: [zip]
"#;
    std::fs::write(temp.path().join("romtag.yml"), yaml).unwrap();

    let config = Config::load_from_dir(temp.path()).unwrap();
    assert_eq!(config.catalog, Some(temp.path().join("mame.xml")));
    assert_eq!(config.cache_dir, temp.path().join("cache"));
    assert_eq!(config.log_file, temp.path().join("romtag.log"));
    assert_eq!(config.archive_extensions, vec!["zip"]);
}

#[test]
fn test_load_from_dir_without_file_uses_defaults() {
    let temp = tempdir().unwrap();
    let config = Config::load_from_dir(temp.path()).unwrap();
    assert_eq!(config.xmlstarlet, "xmlstarlet");
}

#[test]
fn test_load_missing_file() {
    let temp = tempdir().unwrap();
    let err = Config::load(&temp.path().join("nope.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_unknown_field_rejected() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("romtag.yml");
    std::fs::write(&path, "catalgo: typo.xml\n").unwrap();
    assert!(matches!(Config::load(&path), Err(CoreError::YamlParse(_))));
}

#[test]
fn test_validate_rejects_bad_extensions() {
    let config = Config {
        archive_extensions: vec![],
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(CoreError::ConfigInvalid { .. })
    ));

    let config = Config {
        archive_extensions: vec![".zip".to_string()],
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_is_archive() {
    let config = Config::default();
    assert!(config.is_archive(Path::new("roms/pacman.zip")));
    assert!(config.is_archive(Path::new("roms/pacman.7Z")));
    assert!(!config.is_archive(Path::new("roms/readme.txt")));
    assert!(!config.is_archive(Path::new("roms/noext")));
}
