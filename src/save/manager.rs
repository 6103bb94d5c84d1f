use super::{inject, SaveError, SaveErrorKind, SaveFormat};
use crate::server::Account;
use std::fs;
use std::path::{Path, PathBuf};

/// File holding the user's created levels
pub const LOCAL_LEVELS_FILE: &str = "CCLocalLevels.dat";

/// File holding settings and account details
pub const GAME_MANAGER_FILE: &str = "CCGameManager.dat";

/// Decoded contents of a Geometry Dash save folder.
///
/// Both files are read and decoded up front. Changes are made in memory and
/// only reach disk on [`SaveManager::save`].
///
/// ```no_run
/// use gdstore::save::{SaveFormat, SaveManager};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut manager = SaveManager::open("/path/to/GeometryDash", SaveFormat::Auto)?;
/// manager.inject_level("H4sIAAAA", "my file", "stored with gd-storage");
/// manager.save(true, false)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SaveManager {
    path: PathBuf,
    format: SaveFormat,
    levels: Vec<u8>,
    game_manager: Vec<u8>,
}

impl SaveManager {
    /// Read and decode the save files in `path`
    pub fn open<P: AsRef<Path>>(path: P, format: SaveFormat) -> Result<Self, SaveError> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(SaveErrorKind::MissingDirectory(path.to_path_buf()).into());
        }

        let format = format.resolve();
        let levels = format.decode(&fs::read(path.join(LOCAL_LEVELS_FILE))?)?;
        let game_manager = format.decode(&fs::read(path.join(GAME_MANAGER_FILE))?)?;
        log::debug!(
            "opened {} save in {}: {} bytes of levels, {} bytes of game manager",
            format,
            path.display(),
            levels.len(),
            game_manager.len()
        );

        Ok(SaveManager {
            path: path.to_path_buf(),
            format,
            levels,
            game_manager,
        })
    }

    /// Create a manager from plaintext that is written to `path` on save
    pub fn from_plaintext<P: AsRef<Path>>(
        path: P,
        format: SaveFormat,
        levels: Vec<u8>,
        game_manager: Vec<u8>,
    ) -> Self {
        SaveManager {
            path: path.as_ref().to_path_buf(),
            format: format.resolve(),
            levels,
            game_manager,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Concrete format used for both files
    pub fn format(&self) -> SaveFormat {
        self.format
    }

    /// Decoded level list
    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    /// Decoded game manager
    pub fn game_manager(&self) -> &[u8] {
        &self.game_manager
    }

    /// Insert a level at the top of the level list
    pub fn inject_level(&mut self, level_string: &str, name: &str, description: &str) {
        self.levels = inject::inject_level(&self.levels, level_string, name, description);
    }

    /// Level string of the first level named `name`
    pub fn level_string(&self, name: &str) -> Result<String, SaveError> {
        inject::find_level_string(&self.levels, name)
    }

    /// Account the game is logged in with
    pub fn saved_account(&self) -> Option<Account> {
        inject::saved_account(&self.game_manager)
    }

    /// Encode and write the selected files back to disk. Each file is fully
    /// encoded before it is written.
    pub fn save(&self, levels: bool, game_manager: bool) -> Result<(), SaveError> {
        if levels {
            self.write(LOCAL_LEVELS_FILE, &self.levels)?;
        }

        if game_manager {
            self.write(GAME_MANAGER_FILE, &self.game_manager)?;
        }

        if !levels && !game_manager {
            log::warn!("save called without selecting any file");
        }

        Ok(())
    }

    fn write(&self, file: &str, plaintext: &[u8]) -> Result<(), SaveError> {
        let data = self.format.encode(plaintext)?;
        let path = self.path.join(file);
        fs::write(&path, &data)?;
        log::info!("wrote {} ({} bytes)", path.display(), data.len());
        Ok(())
    }
}
