use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub log_json: bool,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,

    // database; SQLite only reads `db_name`, the rest are reported at startup
    #[serde(default = "default_db_host")]
    pub db_host: String,
    #[serde(default = "default_db_port")]
    pub db_port: u16,
    #[serde(default = "default_db_name")]
    pub db_name: String,
    #[serde(default = "default_db_user")]
    pub db_user: String,
    /// Accepted so existing `.env` files keep loading; never read or logged.
    #[serde(default)]
    pub db_password: String,
}

fn default_port() -> u16 {
    4000
}

fn default_assets_dir() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/assets").into()
}

fn default_db_host() -> String {
    "127.0.0.1".into()
}

fn default_db_port() -> u16 {
    3306
}

fn default_db_name() -> String {
    "notes_app".into()
}

fn default_db_user() -> String {
    "root".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            log_json: false,
            assets_dir: default_assets_dir(),
            db_host: default_db_host(),
            db_port: default_db_port(),
            db_name: default_db_name(),
            db_user: default_db_user(),
            db_password: String::new(),
        }
    }
}

impl Config {
    /// Reads `.env` (if any) and the process environment.
    /// Variables set to an empty string fall back to their defaults.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars.into_iter().filter(|(_, value)| !value.is_empty()))
    }

    /// SQLite file backing the `notes` table.
    pub fn database_path(&self) -> String {
        let name = self.db_name.as_str();
        if name == ":memory:" || name.ends_with(".db") {
            name.to_string()
        } else {
            format!("{name}.db")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = Config::from_vars(vars(&[])).unwrap();

        assert_eq!(config.port, 4000);
        assert_eq!(config.db_host, "127.0.0.1");
        assert_eq!(config.db_port, 3306);
        assert_eq!(config.db_name, "notes_app");
        assert_eq!(config.db_user, "root");
        assert_eq!(config.db_password, "");
        assert!(!config.log_json);
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = Config::from_vars(vars(&[("DB_PORT", ""), ("DB_HOST", ""), ("DB_USER", "notes")])).unwrap();

        assert_eq!(config.db_port, 3306);
        assert_eq!(config.db_host, "127.0.0.1");
        assert_eq!(config.db_user, "notes");
    }

    #[test]
    fn database_path_from_name() {
        let mut config = Config::default();
        assert_eq!(config.database_path(), "notes_app.db");

        config.db_name = "archive.db".into();
        assert_eq!(config.database_path(), "archive.db");

        config.db_name = ":memory:".into();
        assert_eq!(config.database_path(), ":memory:");
    }

    #[test]
    fn db_password_is_accepted() {
        let config = Config::from_vars(vars(&[("DB_PASSWORD", "s3cret")])).unwrap();

        assert_eq!(config.db_password, "s3cret");
        assert_eq!(config.database_path(), "notes_app.db");
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(Config::from_vars(vars(&[("DB_PORT", "not-a-port")])).is_err());
    }
}
