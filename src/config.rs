use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Triago";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default port for the intake API server.
pub const DEFAULT_PORT: u16 = 7640;

/// Get the application data directory
/// ~/Triago/ on all platforms (user-visible, intentionally not hidden)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Triago")
}

/// Path of the knowledge-base database file.
pub fn knowledge_db_path() -> PathBuf {
    app_data_dir().join("triago.db")
}

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Triago"));
    }

    #[test]
    fn knowledge_db_under_app_data() {
        let db = knowledge_db_path();
        assert!(db.starts_with(app_data_dir()));
        assert!(db.ends_with("triago.db"));
    }

    #[test]
    fn app_name_is_triago() {
        assert_eq!(APP_NAME, "Triago");
    }
}
