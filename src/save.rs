//! Read and write Geometry Dash save files.
//!
//! The game keeps two files in its save folder:
//!
//! - `CCLocalLevels.dat`: the levels created in the editor
//! - `CCGameManager.dat`: settings, stats, and the logged in account
//!
//! Both are XML plists wrapped in one of two containers depending on the
//! platform the game runs on:
//!
//! ```text
//! SaveFormat
//! ├── Windows: xor 11 → base64url → 10 byte header | raw deflate | crc32 | size
//! └── Mac:     AES-256-ECB with a fixed key, 0x0b padded to 16 bytes
//! ```
//!
//! [`SaveManager`] decodes a save folder, injects levels into the level list,
//! and writes it back.
//!
//! ```
//! use gdstore::save::{find_level_string, inject_level, SaveFormat};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let plaintext = b"<plist><dict><k>LLM_01</k><d><k>_isArr</k><t /><k";
//! let levels = inject_level(plaintext, "H4sIAAAA", "notes", "my notes");
//!
//! let container = SaveFormat::Windows.encode(&levels)?;
//! let decoded = SaveFormat::Windows.decode(&container)?;
//! assert_eq!(find_level_string(&decoded, "notes")?, "H4sIAAAA");
//! # Ok(())
//! # }
//! ```

mod errors;
mod format;
mod inject;
pub mod mac;
mod manager;
pub mod windows;

pub use errors::*;
pub use format::*;
pub use inject::*;
pub use manager::*;
