use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Delimiters used when joining names into qualified BEM classes.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Separators {
    /// Joins a block name with an element name (`Block__item`).
    pub element: String,
    /// Joins an entity name with a modifier (`Block--active`).
    pub modifier: String,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            element: "__".to_string(),
            modifier: "--".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Options {
    pub separators: Separators,
}

/// Partial separators override. Unset fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SeparatorsBag {
    pub element: Option<String>,
    pub modifier: Option<String>,
}

/// Partial options override accepted by [`crate::Factory::with_options`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OptionsBag {
    pub separators: Option<SeparatorsBag>,
}

impl Options {
    /// Apply a partial override on top of these options.
    pub fn merge(mut self, bag: OptionsBag) -> Self {
        if let Some(separators) = bag.separators {
            if let Some(element) = separators.element {
                self.separators.element = element;
            }
            if let Some(modifier) = separators.modifier {
                self.separators.modifier = modifier;
            }
        }
        self
    }
}

impl From<OptionsBag> for Options {
    fn from(bag: OptionsBag) -> Self {
        Options::default().merge(bag)
    }
}

#[derive(Default, Clone)]
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    pub fn element_separator(mut self, separator: impl Into<String>) -> Self {
        self.options.separators.element = separator.into();
        self
    }

    pub fn modifier_separator(mut self, separator: impl Into<String>) -> Self {
        self.options.separators.modifier = separator.into();
        self
    }

    pub fn build(self) -> Options {
        self.options
    }
}

/// File names looked up in each directory from the template root upwards.
const CONFIG_FILE_NAMES: &[&str] = &[".bemify.toml", "bemify.toml"];

impl Options {
    /// Parse options from TOML text; `origin` only labels the error.
    pub fn from_toml(text: &str, origin: &Path) -> io::Result<Self> {
        toml::from_str(text).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid config {}: {e}", origin.display()),
            )
        })
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        log::debug!("Reading options from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text, path)
    }
}

/// Nearest project config at or above `start_dir`.
fn project_config(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// `$XDG_CONFIG_HOME/bemify/config.toml`, falling back to `~/.config`.
fn user_config() -> Option<PathBuf> {
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    let path = base.join("bemify").join("config.toml");
    path.is_file().then_some(path)
}

/// Resolve the options for templates under `start_dir`.
///
/// An explicit path wins, then the nearest `.bemify.toml`/`bemify.toml`
/// walking up from `start_dir`, then the user config. The first file found is
/// the one used: if it cannot be read or parsed the error is returned rather
/// than falling through to the next candidate. Without any file the defaults
/// apply and no path is returned.
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> io::Result<(Options, Option<PathBuf>)> {
    let found = explicit
        .map(Path::to_path_buf)
        .or_else(|| project_config(start_dir))
        .or_else(user_config);

    match found {
        Some(path) => {
            let options = Options::from_file(&path)?;
            log::info!("Loaded options from {}", path.display());
            Ok((options, Some(path)))
        }
        None => {
            log::debug!("No config file found, using default options");
            Ok((Options::default(), None))
        }
    }
}
