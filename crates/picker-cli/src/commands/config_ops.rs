use std::fs;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", picker_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        picker_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    let max_version = s
        .filter_policy()
        .max_version
        .map_or_else(|| "any".to_string(), |v| v.to_string());
    println!(
        "OK: filter.max_emoji_version={}, aliases.files={}, hotkeys={}",
        max_version,
        s.alias_files().len(),
        s.hotkeys().len()
    );
}
