#![no_main]
use gdstore::level::Level;
use gdstore::methods::{CodecOptions, Method};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Parsed levels must serialize back into something that parses the same
    if let Ok(level) = Level::parse(text) {
        if let Ok(out) = level.serialize() {
            let again = Level::parse(&out).unwrap();
            assert_eq!(again.objects(), level.objects());
        }
    }

    for method in Method::ALL {
        for skip_compression in [false, true] {
            let codec = method.codec(CodecOptions { skip_compression });
            let _ = codec.decode(text);
        }
    }
});
