use serde::{Deserialize, Serialize};

/// Stores the server connection details and display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the budget API.
    pub api_url: String,
    /// Session key sent in the `Authorization` header. Absent until the
    /// user has logged in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    /// Months of history shown before the present column on the overview.
    #[serde(default = "Config::default_old_months")]
    pub old_months: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "https://budget.fela.space/api".into(),
            api_key: None,
            currency_symbol: Self::default_currency_symbol(),
            old_months: Self::default_old_months(),
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "£".into()
    }

    pub fn default_old_months() -> usize {
        3
    }
}
