use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// UI colour scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
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

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseThemeError(pub String);

impl fmt::Display for ParseThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme '{}', expected 'light' or 'dark'", self.0)
    }
}

impl std::error::Error for ParseThemeError {}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}

/// User-tunable generation and display parameters.
///
/// Copied into every outgoing chat request. Values are not range-checked;
/// missing fields in stored or imported documents take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub theme: Theme,
    pub temperature: f32,
    pub max_tokens: u32,
    pub model: String,
    pub use_memory: bool,
    pub use_research: bool,
    pub internet_access: bool,
    pub auto_learn: bool,
    pub use_batch_processing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            temperature: 0.7,
            max_tokens: 2000,
            model: "gpt-4-turbo-preview".to_string(),
            use_memory: true,
            use_research: true,
            internet_access: true,
            auto_learn: true,
            use_batch_processing: true,
            auth_token: None,
            user_id: None,
        }
    }
}

impl Settings {
    /// Shallow-merge `patch`: only supplied keys overwrite.
    ///
    /// Returns the new theme when the patch actually changed it.
    pub fn apply(&mut self, patch: SettingsPatch) -> Option<Theme> {
        let previous_theme = self.theme;

        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(temperature) = patch.temperature {
            self.temperature = temperature;
        }
        if let Some(max_tokens) = patch.max_tokens {
            self.max_tokens = max_tokens;
        }
        if let Some(model) = patch.model {
            self.model = model;
        }
        if let Some(v) = patch.use_memory {
            self.use_memory = v;
        }
        if let Some(v) = patch.use_research {
            self.use_research = v;
        }
        if let Some(v) = patch.internet_access {
            self.internet_access = v;
        }
        if let Some(v) = patch.auto_learn {
            self.auto_learn = v;
        }
        if let Some(v) = patch.use_batch_processing {
            self.use_batch_processing = v;
        }
        if let Some(token) = patch.auth_token {
            self.auth_token = Some(token);
        }
        if let Some(user_id) = patch.user_id {
            self.user_id = Some(user_id);
        }

        (self.theme != previous_theme).then_some(self.theme)
    }
}

/// Partial settings update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub theme: Option<Theme>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub model: Option<String>,
    pub use_memory: Option<bool>,
    pub use_research: Option<bool>,
    pub internet_access: Option<bool>,
    pub auto_learn: Option<bool>,
    pub use_batch_processing: Option<bool>,
    pub auth_token: Option<String>,
    pub user_id: Option<String>,
}

impl SettingsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn use_memory(mut self, enabled: bool) -> Self {
        self.use_memory = Some(enabled);
        self
    }

    pub fn use_research(mut self, enabled: bool) -> Self {
        self.use_research = Some(enabled);
        self
    }

    pub fn internet_access(mut self, enabled: bool) -> Self {
        self.internet_access = Some(enabled);
        self
    }

    pub fn auto_learn(mut self, enabled: bool) -> Self {
        self.auto_learn = Some(enabled);
        self
    }

    pub fn use_batch_processing(mut self, enabled: bool) -> Self {
        self.use_batch_processing = Some(enabled);
        self
    }

    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
