//! Configuration file loading and saving

use super::file::{Settings, CONFIG_FILE_NAME};
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::path::Path;

/// Handles loading and saving configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from .luacloak.toml in the given directory
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use luacloak::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let settings = ConfigLoader::load(Path::new("."))?;
    /// println!("Encoding with {}", settings.obfuscation_method);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<Settings> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load settings with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> Result<Settings> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Settings::default());
            }
            Err(e) => {
                return Err(e).context("Failed to read .luacloak.toml");
            }
        };

        let settings: Settings =
            toml_edit::de::from_str(&contents).context("Failed to parse .luacloak.toml")?;

        settings
            .validate()
            .context("Invalid settings in .luacloak.toml")?;

        Ok(settings)
    }

    /// Save settings to .luacloak.toml in the given directory
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use luacloak::config::{ConfigLoader, Settings};
    /// use std::path::Path;
    ///
    /// let settings = Settings {
    ///     minify: true,
    ///     ..Default::default()
    /// };
    /// ConfigLoader::save(&settings, Path::new("."))?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn save(settings: &Settings, project_root: &Path) -> Result<()> {
        Self::save_with_fs(settings, project_root, &RealFileSystem)
    }

    /// Save settings with a custom filesystem implementation
    pub fn save_with_fs<FS: FileSystem>(
        settings: &Settings,
        project_root: &Path,
        fs: &FS,
    ) -> Result<()> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents =
            toml_edit::ser::to_string_pretty(settings).context("Failed to serialize settings")?;

        fs.write(&config_path, contents)
            .context("Failed to write .luacloak.toml")?;

        Ok(())
    }

    /// Delete the config file; a missing file is not an error
    pub fn reset_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> Result<()> {
        match fs.remove_file(&project_root.join(CONFIG_FILE_NAME)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("Failed to remove .luacloak.toml"),
        }
    }

    /// Delete the config file so defaults apply again
    pub fn reset(project_root: &Path) -> Result<()> {
        Self::reset_with_fs(project_root, &RealFileSystem)
    }

    /// Check if config file exists in project
    pub fn exists(project_root: &Path) -> bool {
        project_root.join(CONFIG_FILE_NAME).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::EncodingMethod;
    use std::io;
    use std::sync::{Arc, Mutex};

    // Mock FileSystem for testing
    #[derive(Default)]
    struct MockFileSystem {
        file_content: Option<String>,
        should_fail_read: bool,
        should_fail_write: bool,
        written_content: Arc<Mutex<Option<String>>>,
        removed: Arc<Mutex<bool>>,
    }

    impl MockFileSystem {
        fn with_content(content: &str) -> Self {
            Self {
                file_content: Some(content.to_string()),
                ..Default::default()
            }
        }

        fn get_written_content(&self) -> Option<String> {
            self.written_content.lock().unwrap().clone()
        }
    }

    impl FileSystem for MockFileSystem {
        fn read_to_string(&self, _path: &Path) -> io::Result<String> {
            if self.should_fail_read {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            self.file_content
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
        }

        fn write(&self, _path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
            if self.should_fail_write {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            let contents_str = String::from_utf8_lossy(contents.as_ref()).to_string();
            *self.written_content.lock().unwrap() = Some(contents_str);
            Ok(())
        }

        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            unimplemented!()
        }

        fn remove_file(&self, _path: &Path) -> io::Result<()> {
            if self.file_content.is_none() {
                return Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));
            }
            *self.removed.lock().unwrap() = true;
            Ok(())
        }
    }

    #[test]
    fn test_loader_loads_from_valid_toml() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join(CONFIG_FILE_NAME);

        let toml_content = r#"
obfuscation_method = "hex"
minify = true
max_history = 10
"#;
        std::fs::write(&config_path, toml_content).unwrap();

        let settings = ConfigLoader::load(temp.path()).unwrap();
        assert_eq!(settings.obfuscation_method, EncodingMethod::HexPairs);
        assert!(settings.minify);
        assert_eq!(settings.max_history, 10);
        assert_eq!(settings.compile_delay_ms, 1500);
    }

    #[test]
    fn test_loader_with_missing_file_uses_defaults() {
        let fs = MockFileSystem::default();
        let settings = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_loader_with_invalid_toml_returns_error() {
        let fs = MockFileSystem::with_content("invalid { toml syntax");
        let result = ConfigLoader::load_with_fs(Path::new("/test"), &fs);
        assert!(result.is_err(), "Expected error for invalid TOML");
    }

    #[test]
    fn test_loader_with_permission_error_returns_error() {
        let fs = MockFileSystem {
            should_fail_read: true,
            ..Default::default()
        };
        let result = ConfigLoader::load_with_fs(Path::new("/test"), &fs);

        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to read"));
    }

    #[test]
    fn test_loader_rejects_out_of_range_values() {
        let fs = MockFileSystem::with_content("max_history = 0");
        let err = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap_err();
        assert!(format!("{err:#}").contains("max_history"));

        let fs = MockFileSystem::with_content("compile_delay_ms = 60000");
        assert!(ConfigLoader::load_with_fs(Path::new("/test"), &fs).is_err());
    }

    #[test]
    fn test_loader_unknown_method_name_falls_back_to_base64() {
        let fs = MockFileSystem::with_content(r#"obfuscation_method = "rot13""#);
        let settings = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap();
        assert_eq!(settings.obfuscation_method, EncodingMethod::PlainEscape);
    }

    #[test]
    fn test_loader_handles_empty_file() {
        let fs = MockFileSystem::with_content("");
        let settings = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_writes_valid_toml() {
        let settings = Settings {
            obfuscation_method: EncodingMethod::LayeredEscape,
            ..Default::default()
        };

        let fs = MockFileSystem::default();
        ConfigLoader::save_with_fs(&settings, Path::new("/test"), &fs).unwrap();

        let content = fs.get_written_content().unwrap();
        assert!(content.contains("obfuscation_method = \"advanced\""));
        assert!(content.contains("max_history = 50"));
    }

    #[test]
    fn test_save_with_write_error_returns_error() {
        let fs = MockFileSystem {
            should_fail_write: true,
            ..Default::default()
        };
        let result = ConfigLoader::save_with_fs(&Settings::default(), Path::new("/test"), &fs);

        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to write"));
    }

    #[test]
    fn test_save_and_load_round_trip_preserves_all_fields() {
        let temp = tempfile::tempdir().unwrap();

        let settings = Settings {
            obfuscation_method: EncodingMethod::CodepointList,
            anti_tamper: false,
            loader_format: "request".to_string(),
            add_wrapper: false,
            compile_delay_ms: 0,
            max_history: 5,
            ..Default::default()
        };

        ConfigLoader::save(&settings, temp.path()).unwrap();
        let loaded = ConfigLoader::load(temp.path()).unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_reset_removes_file_and_tolerates_missing() {
        let fs = MockFileSystem::with_content("minify = true");
        ConfigLoader::reset_with_fs(Path::new("/test"), &fs).unwrap();
        assert!(*fs.removed.lock().unwrap());

        let missing = MockFileSystem::default();
        assert!(ConfigLoader::reset_with_fs(Path::new("/test"), &missing).is_ok());
    }

    #[test]
    fn test_exists_reflects_file_presence() {
        let temp = tempfile::tempdir().unwrap();
        assert!(!ConfigLoader::exists(temp.path()));

        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "minify = true").unwrap();
        assert!(ConfigLoader::exists(temp.path()));
    }
}
