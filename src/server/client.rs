use super::{
    hash, response, Account, DownloadedLevel, UploadLevel, BASE_URL, GAME_VERSION, LOGIN_SECRET,
    LOGIN_UDID, SECRET,
};
use crate::Error;
use std::time::Duration;

/// Timeout for downloads and logins
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for uploads
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

const BINARY_VERSION: u32 = 42;

/// Blocking client for the level server. Every call is a single request
/// without retries.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Client for the official server
    pub fn new() -> Self {
        Client::with_base_url(BASE_URL)
    }

    /// Client for a private server or a test double
    pub fn with_base_url(base_url: &str) -> Self {
        Client {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn post(
        &self,
        endpoint: &str,
        form: &[(&str, String)],
        timeout: Duration,
    ) -> Result<String, Error> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("POST {}", url);

        // the server rejects requests that carry a user agent
        let resp = attohttpc::post(&url)
            .header("User-Agent", "")
            .timeout(timeout)
            .form(&form)?
            .send()?;

        let body = resp.text()?;
        log::debug!("{} answered with {} bytes", endpoint, body.len());
        Ok(body)
    }

    /// Download a level by id
    pub fn download(&self, level_id: u64) -> Result<DownloadedLevel, Error> {
        log::info!("downloading level {}", level_id);
        let form = [
            ("levelID", level_id.to_string()),
            ("secret", String::from(SECRET)),
            ("gameVersion", GAME_VERSION.to_string()),
            ("binaryVersion", BINARY_VERSION.to_string()),
            ("gdw", String::from("0")),
            ("inc", String::from("1")),
            ("extras", String::from("0")),
        ];

        let body = self.post("downloadGJLevel22.php", &form, REQUEST_TIMEOUT)?;
        response::parse_download(&body, level_id)
    }

    /// Log in and return the account with its password hash
    pub fn login(&self, username: &str, password: &str) -> Result<Account, Error> {
        log::info!("logging in as {}", username);
        let form = [
            ("userName", username.to_string()),
            ("password", password.to_string()),
            ("secret", String::from(LOGIN_SECRET)),
            ("udid", String::from(LOGIN_UDID)),
            ("gameVersion", GAME_VERSION.to_string()),
            ("binaryVersion", BINARY_VERSION.to_string()),
        ];

        let body = self.post("accounts/loginGJAccount.php", &form, REQUEST_TIMEOUT)?;
        let account_id = response::parse_login(&body)?;
        Ok(Account {
            username: username.to_string(),
            account_id,
            gjp2: hash::gjp2(password),
        })
    }

    /// Upload a level and return its new id
    pub fn upload(&self, level: &UploadLevel, account: &Account) -> Result<u64, Error> {
        log::info!(
            "uploading '{}' ({} objects) as {}",
            level.name(),
            level.objects(),
            account.username
        );

        let form = level.form(account);
        let body = self.post("uploadGJLevel21.php", &form, UPLOAD_TIMEOUT)?;
        response::parse_upload(&body)
    }
}
