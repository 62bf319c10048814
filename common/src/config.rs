use once_cell::sync::OnceCell;
use std::env;

/// Process-wide configuration, loaded once at startup from `.env` and the
/// environment. The engine never reads these values ambiently: `xp_per_correct`
/// is handed to the submission engine through its constructor.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    /// XP awarded per correctly answered problem in a single submission.
    pub xp_per_correct: i64,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    /// Loads the configuration from the given env file (if present) and the
    /// process environment, and installs it as the global instance.
    ///
    /// Subsequent calls return the already-installed instance.
    pub fn init(env_path: &str) -> &'static Self {
        dotenvy::from_filename(env_path).ok();
        CONFIG.get_or_init(Self::from_env)
    }

    /// Returns the global configuration.
    ///
    /// # Panics
    /// Panics if `init` has not been called.
    pub fn get() -> &'static Self {
        CONFIG.get().expect("Config not initialized")
    }

    /// Reads a fresh `Config` from the process environment.
    ///
    /// Panics if a required variable is missing or malformed; configuration
    /// errors are startup-fatal.
    pub fn from_env() -> Self {
        Config {
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "mathquest-api".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH").expect("DATABASE_PATH is required"),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .expect("PORT must be a number"),
            xp_per_correct: parse_xp_per_correct(env::var("XP_PER_CORRECT").ok()),
        }
    }
}

fn parse_xp_per_correct(raw: Option<String>) -> i64 {
    match raw {
        Some(value) => {
            let parsed: i64 = value
                .parse()
                .expect("XP_PER_CORRECT must be a positive integer");
            assert!(parsed > 0, "XP_PER_CORRECT must be a positive integer");
            parsed
        }
        None => 10,
    }
}
