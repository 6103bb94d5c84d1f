/*!

Store arbitrary files inside [Geometry Dash](https://en.wikipedia.org/wiki/Geometry_Dash) levels
and the game's save files.

Levels are lists of objects and every object may belong to up to ten groups, each identified by a
number from 1 to 9999. Those group ids are the only free form numeric data that survive the game
loading, editing, and saving a level, so files are stored as base 9999 digits spread across object
group lists.

## Features

- ✔ Compact: zstd compressed payloads, 8 bytes per five groups
- ✔ Faithful: decoded files are byte for byte identical, including their name
- ✔ Local: inject levels straight into `CCLocalLevels.dat` on Windows, Linux (Proton), and macOS
- ✔ Online: upload to and download from the level server with the `http` feature
- ✔ Historical: every earlier storage method is still decodable

## Quick Start

Encoding a file produces a compressed level string, the same form the game keeps in its saves and
the server hands out.

```rust
use gdstore::packing::PackingCodec;

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let codec = PackingCodec::new();
let level = codec.encode("hello.txt", b"hello world")?;
assert!(level.starts_with("H4sI"));

let (name, data) = codec.decode(&level)?;
assert_eq!(name, "hello.txt");
assert_eq!(data, b"hello world");
# Ok(())
# }
```

## Save Files

A level string on its own is not visible in game until it is part of the save. The [`save`]
module decodes the save containers and inserts levels into the level list.

```rust
use gdstore::packing::PackingCodec;
use gdstore::save::{inject_level, find_level_string};

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let level = PackingCodec::new().encode("notes.md", b"# notes")?;
let plaintext = b"<plist><dict><k>LLM_01</k><d><k>_isArr</k><t /><k";
let updated = inject_level(plaintext, &level, "notes", "my notes");

let found = find_level_string(&updated, "notes")?;
let (_, data) = PackingCodec::new().decode(&found)?;
assert_eq!(data, b"# notes");
# Ok(())
# }
```

## One Level Lower

The [`level`] module exposes the level document model and [`packing`] the building blocks of the
codec, from the digit conversion down to the group packer that keeps object group lists within what
the game accepts.

```rust
use gdstore::packing::{bytes_to_digits, pack_groups};

let digits = bytes_to_digits(&[0u8; 8]).unwrap();
assert_eq!(digits, vec![1, 9, 1, 1, 1, 1, 1]);

let groups = pack_groups(&digits);
assert!(groups.iter().all(|x| x.len() != 2 && x.len() <= 10));
```

*/

pub mod compression;
pub mod config;
mod errors;
pub mod level;
pub mod methods;
pub mod naming;
pub mod packing;
pub mod save;
pub mod server;

pub use self::errors::*;
