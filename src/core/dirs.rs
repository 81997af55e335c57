use std::path::PathBuf;

const APP_DIR: &str = "policy-analyzer";

pub fn get_config_directory() -> PathBuf {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => {
            std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| dirs::home_dir().unwrap_or_default().join(".config"))
        },
        "macos" => {
            dirs::home_dir()
                .unwrap_or_default()
                .join("Library/Application Support")
        },
        _ => dirs::config_dir().unwrap_or_default(),
    };

    base.join(APP_DIR)
}

pub fn get_cache_directory() -> PathBuf {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => {
            std::env::var("XDG_CACHE_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| dirs::home_dir().unwrap_or_default().join(".cache"))
        },
        "macos" => {
            dirs::home_dir()
                .unwrap_or_default()
                .join("Library/Caches")
        },
        _ => dirs::cache_dir().unwrap_or_else(std::env::temp_dir),
    };

    base.join(APP_DIR)
}
