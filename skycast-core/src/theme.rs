use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Two-valued display theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Persisted theme preference, stored as the raw string "light" or "dark".
///
/// Same load-at-construction, write-through semantics as the search
/// history; storage errors are swallowed and the default applies.
#[derive(Debug)]
pub struct ThemePreference {
    path: PathBuf,
    theme: Theme,
}

impl ThemePreference {
    pub fn load(path: PathBuf) -> Self {
        let theme = match fs::read_to_string(&path).as_deref().map(str::trim) {
            Ok("dark") => Theme::Dark,
            Ok("light") => Theme::Light,
            _ => Theme::default(),
        };

        Self { path, theme }
    }

    pub fn current(&self) -> Theme {
        self.theme
    }

    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
        self.persist();
    }

    pub fn toggle(&mut self) -> Theme {
        self.set(self.theme.toggled());
        self.theme
    }

    fn persist(&self) {
        if let Some(parent) = self.path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            tracing::debug!("could not create preference directory: {e}");
            return;
        }

        if let Err(e) = fs::write(&self.path, self.theme.as_str()) {
            tracing::debug!("could not persist theme preference: {e}");
        }
    }
}
