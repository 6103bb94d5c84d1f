//! Encode files into Geometry Dash levels, locally or through the level
//! server, and get them back out.
//!
//! Set `RUST_LOG=debug` to see payload sizes and requests.

use gdstore::config::{self, Config};
use gdstore::naming::{self, thousands};
use gdstore::packing::PackingCodec;
use gdstore::save::SaveFormat;
use gdstore::server::{Account, Client, UploadLevel};
use std::error;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const USAGE: &str = "GD Storage - Encode files into Geometry Dash levels

Usage:
  gd-storage --upload <filepath>    Encode and upload to GD servers
  gd-storage --fetch <level_id>     Download and decode from GD servers
  gd-storage --encode <filepath>    Encode and inject into local GD save
  gd-storage --decode <levelname>   Decode from local GD save
  gd-storage --config               Configure GD save path";

fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

/// A file read from disk along with the names derived from it
struct Input {
    filename: String,
    stem: String,
    data: Vec<u8>,
}

impl Input {
    fn read(path: &Path) -> Result<Input, Box<dyn error::Error>> {
        if !path.is_file() {
            fail(format!("File not found: {}", path.display()));
        }

        let filename = path
            .file_name()
            .map(|x| x.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|x| x.to_string_lossy().into_owned())
            .unwrap_or_default();
        let data = fs::read(path)?;
        println!("Encoding {} ({} bytes)...", filename, thousands(data.len() as u64));
        Ok(Input {
            filename,
            stem,
            data,
        })
    }

    fn description(&self) -> String {
        naming::make_description(&self.filename, self.data.len() as u64)
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), config::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

fn cmd_config() -> Result<(), Box<dyn error::Error>> {
    let mut config = Config::load();
    let current = config
        .resolved_gd_path()
        .map(|x| x.display().to_string())
        .unwrap_or_else(|| String::from("Not set"));

    println!("GD Storage Configuration");
    println!("{}", "=".repeat(40));
    println!("Current path: {}", current);
    println!("Current format: {}", config.format);
    println!();

    println!("Enter GD save folder path (or press Enter to keep current):");
    println!("  Windows: %LOCALAPPDATA%\\GeometryDash");
    println!("  macOS: ~/Library/Application Support/GeometryDash");
    println!("  Linux/Proton: ~/.steam/steam/steamapps/compatdata/.../GeometryDash");
    let path = prompt("> ")?;
    if !path.is_empty() {
        let path = expand_home(&path);
        if !path.exists() {
            println!("Warning: Path does not exist: {}", path.display());
            if !prompt("Save anyway? (y/N): ")?.eq_ignore_ascii_case("y") {
                std::process::exit(1);
            }
        }
        config.gd_path = Some(path);
    }

    println!();
    println!("Save format:");
    println!("  1. auto (detect from platform)");
    println!("  2. windows (XOR encryption - Windows/Linux/Proton)");
    println!("  3. mac (AES encryption - macOS)");
    config.format = match prompt("Choice [1]: ")?.as_str() {
        "2" => SaveFormat::Windows,
        "3" => SaveFormat::Mac,
        _ => SaveFormat::Auto,
    };

    let path = config.save()?;
    println!();
    println!("Config saved to {}", path.display());
    Ok(())
}

/// Write a decoded file to the downloads folder without clobbering existing
/// files unless asked to
fn save_decoded_file(filename: &str, data: &[u8]) -> Result<(), Box<dyn error::Error>> {
    let downloads = config::home_dir().unwrap_or_default().join("Downloads");
    let mut target = downloads.join(naming::sanitize_filename(filename));

    if target.exists() {
        println!("File already exists: {}", target.display());
        if !prompt("Overwrite? (y/N): ")?.eq_ignore_ascii_case("y") {
            target = match naming::available_path(&target) {
                Some(x) => x,
                None => fail("Could not find available filename"),
            };
        }
    }

    fs::create_dir_all(&downloads)?;
    fs::write(&target, data)?;
    println!(
        "Saved to {} ({} bytes)",
        target.display(),
        thousands(data.len() as u64)
    );
    Ok(())
}

fn cmd_encode(path: &Path) -> Result<(), Box<dyn error::Error>> {
    let input = Input::read(path)?;
    let level = PackingCodec::new().encode(&input.filename, &input.data)?;

    let mut manager = Config::load()
        .open_save()
        .unwrap_or_else(|e| fail(format!("Error: {}", e)));
    manager.inject_level(&level, &input.stem, &input.description());
    manager.save(true, false)?;
    println!("Injected as '{}'", input.stem);
    Ok(())
}

fn cmd_decode(name: &str) -> Result<(), Box<dyn error::Error>> {
    println!("Extracting '{}'...", name);
    let manager = Config::load()
        .open_save()
        .unwrap_or_else(|e| fail(format!("Error: {}", e)));

    let level = manager
        .level_string(name)
        .unwrap_or_else(|_| fail(format!("Level '{}' not found!", name)));

    let (filename, data) = PackingCodec::new()
        .decode(&level)
        .unwrap_or_else(|e| fail(format!("Failed to decode: {}", e)));
    save_decoded_file(&filename, &data)
}

fn credentials(client: &Client) -> Result<Account, Box<dyn error::Error>> {
    let saved = Config::load()
        .open_save()
        .ok()
        .and_then(|manager| manager.saved_account());

    if let Some(account) = saved {
        println!("Using saved credentials: {}", account.username);
        return Ok(account);
    }

    println!("Enter GD credentials:");
    let username = prompt("Username: ")?;
    let password = prompt("Password: ")?;
    let account = client
        .login(&username, &password)
        .unwrap_or_else(|e| fail(format!("Login failed: {}", e)));
    println!("Logged in as {}", account.username);
    Ok(account)
}

fn cmd_upload(path: &Path) -> Result<(), Box<dyn error::Error>> {
    let input = Input::read(path)?;
    let level = PackingCodec::new().encode(&input.filename, &input.data)?;
    let upload = UploadLevel::new(
        &naming::level_name(&input.stem),
        &input.description(),
        &level,
    )?;

    let client = Client::new();
    let account = credentials(&client)?;

    println!("Uploading '{}'...", upload.name());
    let id = client
        .upload(&upload, &account)
        .unwrap_or_else(|e| fail(format!("Upload failed: {}", e)));
    println!("Uploaded! Level ID: {}", id);
    println!("Fetch with: gd-storage --fetch {}", id);
    Ok(())
}

fn cmd_fetch(level_id: u64) -> Result<(), Box<dyn error::Error>> {
    println!("Fetching level {}...", level_id);
    let level = Client::new()
        .download(level_id)
        .unwrap_or_else(|e| fail(format!("Failed to fetch: {}", e)));

    println!("Level: {}", level.name);
    if !level.description.is_empty() {
        println!("Description: {}", level.description);
    }

    let (filename, data) = PackingCodec::new()
        .decode(&level.level_string)
        .unwrap_or_else(|e| fail(format!("Failed to decode: {}", e)));
    save_decoded_file(&filename, &data)
}

fn main() -> Result<(), Box<dyn error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Vec<String> = std::env::args().collect();

    let command = args.get(1).map(String::as_str);
    let value = args.get(2);
    match (command, value) {
        (Some("--config"), _) => cmd_config(),
        (Some("--upload"), Some(path)) => cmd_upload(Path::new(path)),
        (Some("--encode"), Some(path)) => cmd_encode(Path::new(path)),
        (Some("--decode"), Some(name)) => cmd_decode(name),
        (Some("--fetch"), Some(id)) => match id.parse::<u64>() {
            Ok(id) => cmd_fetch(id),
            Err(_) => fail(format!("Invalid level id: {}", id)),
        },
        (None, _) | (Some("--help" | "-h"), _) => {
            println!("{}", USAGE);
            Ok(())
        }
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    }
}
