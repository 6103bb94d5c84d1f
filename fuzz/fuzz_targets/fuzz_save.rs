#![no_main]
use gdstore::save::{find_level_string, inject_level, mac, saved_account, windows};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = windows::decode(data);
    let _ = mac::decode(data);

    let encoded = windows::encode(data).unwrap();
    assert_eq!(windows::decode(&encoded).unwrap(), data);

    let _ = saved_account(data);
    let _ = find_level_string(data, "fuzz");

    // The injected level is found unless the input already names one the same
    let injected = inject_level(data, "H4sIfuzz", "fuzz_level_name", "");
    if !data.windows(15).any(|x| x == b"fuzz_level_name") {
        assert_eq!(
            find_level_string(&injected, "fuzz_level_name").unwrap(),
            "H4sIfuzz"
        );
    }
});
