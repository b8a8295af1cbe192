use crate::error::{CliError, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const PROFILE_DIR_NAME: &str = ".nutanix";
pub const PROFILE_EXTENSION: &str = "credential";
pub const DEFAULT_PROFILE: &str = "default";

/// Stored connection settings for the central manager, element manager and
/// Karbon endpoints. Empty fields are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(rename = "pcaddress", skip_serializing_if = "String::is_empty")]
    pub pc_address: String,
    #[serde(rename = "pcurl", skip_serializing_if = "String::is_empty")]
    pub pc_url: String,
    #[serde(rename = "peaddress", skip_serializing_if = "String::is_empty")]
    pub pe_address: String,
    #[serde(rename = "peurl", skip_serializing_if = "String::is_empty")]
    pub pe_url: String,
    #[serde(rename = "karbonaddress", skip_serializing_if = "String::is_empty")]
    pub karbon_address: String,
    #[serde(rename = "karbonurl", skip_serializing_if = "String::is_empty")]
    pub karbon_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(rename = "karbonuser", skip_serializing_if = "String::is_empty")]
    pub karbon_user: String,
    #[serde(rename = "karbonpass", skip_serializing_if = "String::is_empty")]
    pub karbon_password: String,
}

#[derive(Debug, Clone)]
pub struct ProfileEntry {
    pub name: String,
    pub modified: Option<DateTime<Local>>,
    pub path: PathBuf,
}

/// Directory of `<name>.credential` YAML files.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `~/.nutanix`.
    pub fn from_home() -> Result<Self> {
        let home = dirs::home_dir().ok_or(CliError::NoHomeDir)?;
        Ok(Self::new(home.join(PROFILE_DIR_NAME)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, PROFILE_EXTENSION))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    pub fn load(&self, name: &str) -> Result<Profile> {
        let path = self.path_for(name);
        if !path.is_file() {
            return Err(CliError::ProfileNotFound {
                name: name.to_string(),
                path,
            });
        }

        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(Profile::default());
        }
        let profile = serde_yaml::from_str(&content)?;
        tracing::debug!(profile = name, path = %path.display(), "loaded profile");
        Ok(profile)
    }

    /// Loads `name` if the file exists, `None` otherwise.
    pub fn load_optional(&self, name: &str) -> Result<Option<Profile>> {
        if self.exists(name) {
            self.load(name).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Writes the profile, replacing any existing file of the same name.
    pub fn save(&self, name: &str, profile: &Profile) -> Result<PathBuf> {
        self.ensure_dir()?;

        let path = self.path_for(name);
        let yaml = serde_yaml::to_string(profile)?;

        let mut file = open_private(&path)?;
        file.write_all(yaml.as_bytes())?;
        file.flush()?;

        tracing::debug!(profile = name, path = %path.display(), "saved profile");
        Ok(path)
    }

    pub fn delete(&self, name: &str) -> Result<PathBuf> {
        let path = self.path_for(name);
        if !path.is_file() {
            return Err(CliError::ProfileNotFound {
                name: name.to_string(),
                path,
            });
        }
        fs::remove_file(&path)?;
        Ok(path)
    }

    /// Lists stored profiles sorted by name. A missing directory yields no profiles.
    pub fn list(&self) -> Result<Vec<ProfileEntry>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(PROFILE_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .ok()
                .map(DateTime::<Local>::from);

            entries.push(ProfileEntry {
                name: name.to_string(),
                modified,
                path: path.clone(),
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn ensure_dir(&self) -> Result<()> {
        if self.dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.dir)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o760))?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
