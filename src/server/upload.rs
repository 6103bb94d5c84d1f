use super::{hash, GAME_VERSION, SECRET};
use crate::{compression, Error};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;

/// Binary version the upload endpoint expects
pub const UPLOAD_BINARY_VERSION: u32 = 44;

/// Fixed `seed` field sent with every upload
pub const UPLOAD_SEED: &str = "abc123";

/// A logged in account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub account_id: u64,
    /// SHA-1 based password hash, see [`hash::gjp2`]
    pub gjp2: String,
}

/// Length category shown in the level browser, derived from object count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LevelLength {
    Tiny,
    Short,
    Medium,
    Long,
    ExtraLong,
}

impl LevelLength {
    pub fn from_objects(objects: usize) -> Self {
        match objects {
            x if x > 10_000 => LevelLength::ExtraLong,
            x if x > 5_000 => LevelLength::Long,
            x if x > 1_000 => LevelLength::Medium,
            x if x > 200 => LevelLength::Short,
            _ => LevelLength::Tiny,
        }
    }

    pub fn value(&self) -> u8 {
        *self as u8
    }
}

/// A level ready to be sent to the upload endpoint
#[derive(Debug, Clone)]
pub struct UploadLevel {
    name: String,
    description: String,
    level_string: String,
    objects: usize,
    unlisted: bool,
}

impl UploadLevel {
    /// Prepare a level for upload. The level string may be gzipped or raw;
    /// it is sent exactly as given.
    pub fn new(name: &str, description: &str, level_string: &str) -> Result<Self, Error> {
        let objects = compression::level_text(level_string)?.matches(';').count();
        Ok(UploadLevel {
            name: name.to_string(),
            description: description.to_string(),
            level_string: level_string.to_string(),
            objects,
            unlisted: true,
        })
    }

    /// List the level publicly instead of the default unlisted upload
    pub fn unlisted(mut self, unlisted: bool) -> Self {
        self.unlisted = unlisted;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Object count as the server computes it: one per `;` in the raw level
    pub fn objects(&self) -> usize {
        self.objects
    }

    pub fn length(&self) -> LevelLength {
        LevelLength::from_objects(self.objects)
    }

    /// Form fields of the upload request
    pub fn form(&self, account: &Account) -> Vec<(&'static str, String)> {
        let flag = |x: bool| String::from(if x { "1" } else { "0" });
        vec![
            ("accountID", account.account_id.to_string()),
            ("gjp2", account.gjp2.clone()),
            ("userName", account.username.clone()),
            ("levelName", self.name.clone()),
            ("levelDesc", URL_SAFE.encode(&self.description)),
            ("levelVersion", String::from("1")),
            ("levelLength", self.length().value().to_string()),
            ("audioTrack", String::from("0")),
            ("auto", String::from("0")),
            ("password", String::from("1")),
            ("original", String::from("0")),
            ("twoPlayer", String::from("0")),
            ("songID", String::from("0")),
            ("objects", self.objects.to_string()),
            ("coins", String::from("0")),
            ("requestedStars", String::from("0")),
            ("unlisted", flag(self.unlisted)),
            ("wt", String::from("0")),
            ("wt2", String::from("0")),
            ("ldm", String::from("0")),
            ("levelString", self.level_string.clone()),
            ("seed", String::from(UPLOAD_SEED)),
            ("seed2", hash::seed2(&self.level_string)),
            ("secret", String::from(SECRET)),
            ("gameVersion", GAME_VERSION.to_string()),
            ("binaryVersion", UPLOAD_BINARY_VERSION.to_string()),
            ("gdw", String::from("0")),
        ]
    }
}
