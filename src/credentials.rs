// MoltMarkets API credentials loaded from the user's config directory

use crate::error::{SetupError, SetupResult};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub user_id: String,
    pub username: String,
}

// Keep the key out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .finish()
    }
}

impl Credentials {
    /// Read and parse the credentials file.
    ///
    /// A missing file is reported as `MissingCredentials`; anything that is
    /// present but not a valid credentials object is `MalformedJson`.
    pub fn load(path: &Path) -> SetupResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SetupError::MissingCredentials { path: path.to_path_buf() });
            }
            Err(e) => {
                return Err(SetupError::io(
                    format!("Failed to read credentials file {}", path.display()),
                    e,
                ));
            }
        };

        serde_json::from_str(&content)
            .map_err(|e| SetupError::json(format!("credentials file {}", path.display()), e))
    }
}
