// Key file loading.
//
// private_key = "<base64 or hex>"
// peer_public_key = "<base64 or hex>"
// preshared_key = "<base64 or hex>"
use crate::codec::decode_key;
use crate::common::KeyError;
use crate::pke::key::{PreSharedKey, PrivateScalar, PublicKey};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read key file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed key file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Keys as written in a TOML key file. Values stay encoded until asked for.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct KeyConfig {
    pub private_key: String,
    #[serde(default)]
    pub peer_public_key: Option<String>,
    #[serde(default)]
    pub preshared_key: Option<String>,
}

impl KeyConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("loading key file {}", path.display());
        let text = Zeroizing::new(fs::read_to_string(path)?);
        Self::from_toml_str(&text)
    }

    pub fn private_key(&self) -> Result<PrivateScalar, KeyError> {
        decode_key(&self.private_key).map(PrivateScalar::from_bytes)
    }

    pub fn peer_public_key(&self) -> Result<Option<PublicKey>, KeyError> {
        self.peer_public_key
            .as_deref()
            .map(|text| decode_key(text).map(PublicKey::from_bytes))
            .transpose()
    }

    pub fn preshared_key(&self) -> Result<Option<PreSharedKey>, KeyError> {
        self.preshared_key
            .as_deref()
            .map(|text| decode_key(text).map(PreSharedKey::from_bytes))
            .transpose()
    }
}

impl fmt::Debug for KeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyConfig")
            .field("private_key", &"..")
            .field("peer_public_key", &self.peer_public_key)
            .field("preshared_key", &self.preshared_key.as_ref().map(|_| ".."))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PRIVATE: &str = "ADdgjBTmzc7FCXBFxgD5Pz3UXal7TDqlE95IjJXs9kI=";
    const PRIVATE_HEX: &str = "0037608c14e6cdcec5097045c600f93f3dd45da97b4c3aa513de488c95ecf642";
    const PEER: &str = "6L5h4vbCEVRLgxZ/znpNUD+0m/Fa+DtY4eV4DAh4pEA=";

    #[test]
    fn minimal_file() {
        let config = KeyConfig::from_toml_str(&format!("private_key = \"{}\"", PRIVATE)).unwrap();
        let key = config.private_key().unwrap();
        assert_eq!(key.to_base64().as_str(), PRIVATE);
        assert!(config.peer_public_key().unwrap().is_none());
        assert!(config.preshared_key().unwrap().is_none());
    }

    #[test]
    fn mixed_formats() {
        let text = format!(
            "private_key = \"{}\"\npeer_public_key = \"{}\"\npreshared_key = \"{}\"\n",
            PRIVATE_HEX, PEER, PRIVATE_HEX
        );
        let config = KeyConfig::from_toml_str(&text).unwrap();
        assert_eq!(config.private_key().unwrap().to_base64().as_str(), PRIVATE);
        assert_eq!(config.peer_public_key().unwrap().unwrap().to_base64(), PEER);
        assert_eq!(
            config.preshared_key().unwrap().unwrap().to_hex().as_str(),
            PRIVATE_HEX
        );
    }

    #[test]
    fn bad_key_is_reported_on_access() {
        let text = format!(
            "private_key = \"nope\"\npeer_public_key = \"{}\"",
            "#".repeat(44)
        );
        let config = KeyConfig::from_toml_str(&text).unwrap();
        assert!(matches!(
            config.private_key(),
            Err(KeyError::InvalidLength { actual: 4, .. })
        ));
        assert_eq!(
            config.peer_public_key().unwrap_err(),
            KeyError::InvalidEncoding
        );
    }

    #[test]
    fn malformed_toml() {
        assert!(matches!(
            KeyConfig::from_toml_str("peer_public_key = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "private_key = \"{}\"", PRIVATE).unwrap();
        writeln!(file, "peer_public_key = \"{}\"", PEER).unwrap();

        let config = KeyConfig::load(file.path()).unwrap();
        let private = config.private_key().unwrap();
        let peer = config.peer_public_key().unwrap().unwrap();
        assert!(!private.diffie_hellman(&peer).is_zero());
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            KeyConfig::load(dir.path().join("absent.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn debug_hides_secrets() {
        let config = KeyConfig::from_toml_str(&format!(
            "private_key = \"{}\"\npreshared_key = \"{}\"",
            PRIVATE, PRIVATE_HEX
        ))
        .unwrap();
        let shown = format!("{:?}", config);
        assert!(!shown.contains(PRIVATE));
        assert!(!shown.contains(PRIVATE_HEX));
    }
}
