#![no_main]
use gdstore::packing::{bytes_to_digits, digits_to_bytes, pack_groups, MAX_GROUPS_PER_OBJECT};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let digits = bytes_to_digits(data).unwrap();
    assert_eq!(digits_to_bytes(&digits).unwrap(), data);

    let groups = pack_groups(&digits);
    let flat: Vec<u16> = groups.iter().flatten().copied().collect();
    assert_eq!(flat, digits);
    for list in &groups {
        assert!(!list.is_empty());
        assert_ne!(list.len(), 2);
        assert!(list.len() <= MAX_GROUPS_PER_OBJECT);
        for (i, x) in list.iter().enumerate() {
            assert!(!list[..i].contains(x));
        }
    }

    // Arbitrary digit sequences must fail cleanly
    let raw: Vec<u16> = data
        .chunks_exact(2)
        .map(|x| u16::from_le_bytes([x[0], x[1]]))
        .collect();
    let _ = digits_to_bytes(&raw);
});
