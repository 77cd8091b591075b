use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::config_directory;
use crate::domain::user::AccessToken;
use crate::error::{AppError, AppResult};

const SESSION_FILE_NAME: &str = "session.json";

/// Persists the access token between invocations.
#[derive(Debug, Clone)]
pub struct SessionStore {
    file_path: PathBuf,
}

impl SessionStore {
    pub fn open() -> AppResult<Self> {
        Ok(Self::at(config_directory()?.join(SESSION_FILE_NAME)))
    }

    pub fn at(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    pub fn load(&self) -> AppResult<Option<AccessToken>> {
        match fs::read_to_string(&self.file_path) {
            Ok(contents) => serde_json::from_str::<AccessToken>(&contents)
                .map(Some)
                .map_err(|err| AppError::Session(format!("invalid session file: {err}"))),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self, token: &AccessToken) -> AppResult<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string(token)?;
        fs::write(&self.file_path, data)?;
        restrict_permissions(&self.file_path)?;
        Ok(())
    }

    pub fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.file_path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AppError::Io(err)),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> AppResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> AppResult<()> {
    Ok(())
}
