use gdstore::level::{Level, GROUPS};
use gdstore::methods::{CodecOptions, Method};
use gdstore::packing::{PackingCodec, MAX_GROUPS_PER_OBJECT};
use gdstore::{compression, ErrorKind};

fn lcg_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) as u8
        })
        .collect()
}

#[test]
fn test_text_file_roundtrip() {
    let content = "The quick brown fox jumps over the lazy dog.\n".repeat(200);
    let codec = PackingCodec::new();
    let level = codec.encode("fox.txt", content.as_bytes()).unwrap();

    // repetitive text compresses down to a handful of objects
    let raw = compression::decompress_level_string(&level).unwrap();
    let parsed = Level::parse(&raw).unwrap();
    assert!(parsed.len() < 20);

    let (name, data) = codec.decode(&level).unwrap();
    assert_eq!(name, "fox.txt");
    assert_eq!(data, content.as_bytes());
}

#[test]
fn test_binary_file_roundtrip() {
    let content = lcg_bytes(64 * 1024, 7);
    let codec = PackingCodec::new();
    let level = codec.encode("blob.bin", &content).unwrap();
    let (name, data) = codec.decode(&level).unwrap();
    assert_eq!(name, "blob.bin");
    assert_eq!(data, content);
}

#[test]
fn test_level_survives_reserialization() {
    // the game rewrites the header and keeps object properties as they are
    let codec = PackingCodec::new();
    let level = codec.encode("a.bin", &lcg_bytes(300, 1)).unwrap();
    let raw = compression::decompress_level_string(&level).unwrap();
    let parsed = Level::parse(&raw).unwrap();

    let mut rewritten = Level::new();
    for object in parsed.objects() {
        rewritten.push(object.clone());
    }
    let rewritten = rewritten.serialize().unwrap();
    assert_eq!(codec.decode(&rewritten).unwrap().1, lcg_bytes(300, 1));
}

#[test]
fn test_group_lists_are_loadable() {
    let level = PackingCodec::new()
        .encode_level("groups", &lcg_bytes(5000, 3))
        .unwrap();

    for object in level.objects() {
        let groups: Vec<&str> = object.property(GROUPS).unwrap().split('.').collect();
        assert_ne!(groups.len(), 2);
        assert!(groups.len() <= MAX_GROUPS_PER_OBJECT);
        let mut sorted = groups.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), groups.len());
    }
}

#[test]
fn test_wrong_method_fails() {
    let level = Method::RawGroups
        .codec(CodecOptions::default())
        .encode("x", &[1, 2, 3])
        .unwrap();

    // byte valued groups never form a valid base 9999 payload
    let err = PackingCodec::new().decode(&level);
    assert!(err.is_err());
}

#[test]
fn test_truncated_level() {
    let codec = PackingCodec::new().skip_compression(true);
    let level = codec.encode_level("cut", &lcg_bytes(400, 9)).unwrap();

    let mut truncated = Level::new();
    for object in level.objects().iter().take(level.len() / 2) {
        truncated.push(object.clone());
    }

    let err = codec.decode_level(&truncated).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Truncated { .. }));
}
