use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

const CONFIG_DIR: &str = ".clockify";
const CONFIG_FILE: &str = "clockify.json";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub dir: PathBuf,
    pub file: PathBuf,
}

// Resolved once at startup; everything else takes the paths struct.
pub fn resolve_config_paths() -> Option<ConfigPaths> {
    let mut dir = dirs::home_dir()?;
    dir.push(CONFIG_DIR);
    let file = dir.join(CONFIG_FILE);
    Some(ConfigPaths { dir, file })
}

#[derive(Debug, Serialize, Deserialize)]
struct Credentials {
    key: String,
}

pub fn read_key(paths: &ConfigPaths) -> Option<String> {
    let contents = fs::read_to_string(&paths.file).ok()?;
    let credentials: Credentials = serde_json::from_str(&contents).ok()?;
    if credentials.key.trim().is_empty() {
        return None;
    }
    Some(credentials.key)
}

pub fn write_key(paths: &ConfigPaths, key: &str) -> Result<(), io::Error> {
    fs::create_dir_all(&paths.dir)?;
    let json = serde_json::to_string_pretty(&Credentials {
        key: key.to_string(),
    })
    .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
    fs::write(&paths.file, json)
}
