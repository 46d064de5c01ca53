use super::*;

fn id(s: &str) -> ItemId {
    ItemId::new(s).unwrap()
}

#[test]
fn test_to_lines_omits_empty_and_unknown() {
    let record = MetadataRecord {
        description: Some("Pac-Man (Midway)".to_string()),
        manufacturer: Some("".to_string()),
        status: DriverStatus::Good,
        ..Default::default()
    };

    let text = record.to_lines();
    assert_eq!(text, "description:Pac-Man (Midway)\nstatus:good\n");
}

#[test]
fn test_repeatable_keys_accumulate() {
    let text = "device:z80\ndevice:namco\nromof:neogeo\nromof:aes\ndisk:cd1\ndisk:cd2\n";
    let record = MetadataRecord::parse(text);

    assert_eq!(record.device_refs.len(), 2);
    assert!(record.device_refs.contains("z80"));
    assert_eq!(record.bios_chain, vec![id("neogeo"), id("aes")]);
    assert_eq!(record.disks.len(), 2);
}

#[test]
fn test_singleton_keys_last_one_wins() {
    let text = "year:1980\nyear:1981\ncloneof:puckman\ncloneof:pacman\nstatus:good\nstatus:imperfect\n";
    let record = MetadataRecord::parse(text);

    assert_eq!(record.year.as_deref(), Some("1981"));
    assert_eq!(record.parent, Some(id("pacman")));
    assert_eq!(record.status, DriverStatus::Imperfect);
}

#[test]
fn test_parse_skips_unknown_and_malformed_lines() {
    let text = "nonsense\nfoo:bar\nclass:bios\nclass:spaceship\ndescription:\n";
    let record = MetadataRecord::parse(text);

    assert!(record.is(Classification::Bios));
    assert_eq!(record.classification.len(), 1);
    assert!(record.description.is_none());
}

#[test]
fn test_value_may_contain_colons() {
    let record = MetadataRecord::parse("description:Street Fighter II: The World Warrior\n");
    assert_eq!(
        record.description.as_deref(),
        Some("Street Fighter II: The World Warrior")
    );
}

#[test]
fn test_full_record_survives_store_format() {
    let mut record = MetadataRecord {
        description: Some("Metal Slug".to_string()),
        manufacturer: Some("Nazca".to_string()),
        year: Some("1996".to_string()),
        status: DriverStatus::Imperfect,
        emulation: DriverStatus::Good,
        parent: Some(id("mslug")),
        sample_parent: Some(id("mslugsnd")),
        ..Default::default()
    };
    record.classification.insert(Classification::CoinOperated);
    record.device_refs.insert(id("ym2610"));
    record.bios_chain.push(id("neogeo"));
    record.disks.insert("disc,v2".to_string());

    assert_eq!(MetadataRecord::parse(&record.to_lines()), record);
}

#[test]
fn test_multiline_description_is_flattened() {
    let record = MetadataRecord {
        description: Some("line one\nline two".to_string()),
        ..Default::default()
    };
    assert_eq!(record.to_lines(), "description:line one line two\n");
}

#[test]
fn test_driver_status_parse() {
    assert_eq!(DriverStatus::parse("preliminary"), DriverStatus::Preliminary);
    assert_eq!(DriverStatus::parse(""), DriverStatus::Unknown);
    assert_eq!(DriverStatus::parse("weird"), DriverStatus::Unknown);
}
