use gdstore::config::Config;
use gdstore::naming;
use gdstore::packing::PackingCodec;
use gdstore::save::{
    find_level_string, inject_level, mac, SaveFormat, SaveManager, GAME_MANAGER_FILE,
    LOCAL_LEVELS_FILE,
};
use rstest::*;
use std::fs;
use std::path::Path;

const EMPTY_LEVELS: &[u8] = b"<?xml version=\"1.0\"?><plist version=\"1.0\" gjver=\"2.0\"><dict><k>LLM_01</k><d><k>_isArr</k><t /><k>k_0</k><d><k>kCEK</k><i>4</i><k>k2</k><s>existing</s><k>k4</k><s>H4sIAAAAAAAAAwEAAP__AAAAAAAAAAA=</s></d></d><k>LLM_02</k><i>37</i></dict></plist>";
const GAME_MANAGER: &[u8] = b"<?xml version=\"1.0\"?><plist version=\"1.0\" gjver=\"2.0\"><dict><k>GJA_001</k><s>storage</s><k>GJA_003</k><i>4242</i><k>GJA_005</k><s>0123abcd</s></dict></plist>";

fn seed_save(dir: &Path, format: SaveFormat) {
    fs::write(dir.join(LOCAL_LEVELS_FILE), format.encode(EMPTY_LEVELS).unwrap()).unwrap();
    fs::write(dir.join(GAME_MANAGER_FILE), format.encode(GAME_MANAGER).unwrap()).unwrap();
}

#[rstest]
fn test_encode_inject_extract(#[values(SaveFormat::Windows, SaveFormat::Mac)] format: SaveFormat) {
    let dir = tempfile::tempdir().unwrap();
    seed_save(dir.path(), format);

    let content = b"%PDF-1.4 pretend this is a pdf".repeat(40);
    let codec = PackingCodec::new();
    let level = codec.encode("paper.pdf", &content).unwrap();
    let description = naming::make_description("paper.pdf", content.len() as u64);

    let mut manager = SaveManager::open(dir.path(), format).unwrap();
    manager.inject_level(&level, "paper", &description);
    manager.save(true, false).unwrap();

    let manager = SaveManager::open(dir.path(), format).unwrap();
    let found = manager.level_string("paper").unwrap();
    assert_eq!(found, level);
    assert!(manager.level_string("existing").is_ok());

    let (name, data) = codec.decode(&found).unwrap();
    assert_eq!(name, "paper.pdf");
    assert_eq!(data, content);
}

#[test]
fn test_config_opens_save() {
    let dir = tempfile::tempdir().unwrap();
    seed_save(dir.path(), SaveFormat::Windows);

    let config_path = dir.path().join("config").join("config.json");
    Config {
        gd_path: Some(dir.path().to_path_buf()),
        format: SaveFormat::Windows,
    }
    .save_to(&config_path)
    .unwrap();

    let manager = Config::load_from(&config_path).open_save().unwrap();
    let account = manager.saved_account().unwrap();
    assert_eq!(account.username, "storage");
    assert_eq!(account.account_id, 4242);
    assert_eq!(account.gjp2, "0123abcd");
}

#[test]
fn test_mac_padding_survives_injection() {
    // decoded mac saves carry their block padding, injection leaves it at the
    // end of the document
    let padded = mac::decode(&mac::encode(EMPTY_LEVELS)).unwrap();
    assert!(padded.len() % 16 == 0);

    let updated = inject_level(&padded, "H4sIlevel", "new", "");
    assert!(updated.ends_with(&padded[EMPTY_LEVELS.len()..]));
    assert_eq!(find_level_string(&updated, "new").unwrap(), "H4sIlevel");
    assert_eq!(
        find_level_string(&updated, "existing").unwrap(),
        "H4sIAAAAAAAAAwEAAP__AAAAAAAAAAA="
    );
}

#[test]
fn test_repeated_injection_order() {
    let mut levels = EMPTY_LEVELS.to_vec();
    for i in 0..5 {
        levels = inject_level(&levels, &format!("level{}", i), &format!("n{}", i), "");
    }

    let text = String::from_utf8(levels).unwrap();
    for (entry, name) in ["n4", "n3", "n2", "n1", "n0", "existing"].iter().enumerate() {
        let needle = format!("<k>k_{}</k><d><k>kCEK</k><i>4</i>", entry);
        let at = text.find(&needle).unwrap();
        let name_at = text.find(&format!("<s>{}</s>", name)).unwrap();
        assert!(name_at > at);
    }
}
