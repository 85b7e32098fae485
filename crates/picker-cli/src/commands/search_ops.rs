use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process;
use std::sync::Arc;

use serde::Serialize;

use picker_core::alias::AliasIndex;
use picker_core::catalog::Catalog;
use picker_core::font::WidthHeuristic;
use picker_core::mru::MruList;
use picker_core::settings::{FileSettings, Settings, SettingsSource};
use picker_session::{PickerSession, ViewMode, ViewSnapshot};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub struct SearchOptions<'a> {
    pub mode: ViewMode,
    /// Alias files searched after the ones named in settings.
    pub alias_files: &'a [String],
    pub settings_file: Option<&'a str>,
    pub mru_file: Option<&'a str>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ReportItem<'a> {
    text: &'a str,
    name: &'a str,
    row: usize,
    column: usize,
    span: usize,
    shown: bool,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    mode: &'static str,
    query: &'a str,
    disabled: usize,
    completion: Option<&'a str>,
    completion_offset: Option<usize>,
    items: Vec<ReportItem<'a>>,
}

/// Lay out `query` the way the picker window would show it.
pub fn layout(
    catalog: Arc<Catalog>,
    settings: Settings,
    aliases: AliasIndex,
    mru: MruList,
    mode: ViewMode,
    query: &str,
) -> (ViewSnapshot, usize) {
    let mut session = PickerSession::new(catalog);
    session.enable(settings, aliases, mru, &WidthHeuristic);
    session.set_mode(mode);
    session.set_search(query);
    (session.snapshot(), session.disabled_codes().len())
}

/// One line per grid row; the selected item is bracketed and rows not yet
/// revealed are marked.
pub fn format_grid(view: &ViewSnapshot) -> String {
    let mut rows: BTreeMap<usize, Vec<&picker_session::ViewItem>> = BTreeMap::new();
    for item in &view.items {
        rows.entry(item.row).or_default().push(item);
    }
    let mut out = String::new();
    for (row, items) in rows {
        let cells: Vec<String> = items
            .iter()
            .map(|i| {
                if i.selected {
                    format!("[{}]", i.text)
                } else {
                    i.text.clone()
                }
            })
            .collect();
        let hidden = if items.iter().any(|i| !i.shown) {
            " (hidden)"
        } else {
            ""
        };
        out.push_str(&format!("row {row:>2}{hidden}: {}\n", cells.join(" ")));
    }
    out
}

pub fn search(catalog_file: &str, query: &str, opts: &SearchOptions<'_>) {
    let content = die!(
        fs::read_to_string(catalog_file),
        "Error reading {catalog_file}: {}"
    );
    let catalog = die!(Catalog::from_toml_str(&content), "Error: {}");

    let settings = match opts.settings_file {
        Some(file) => die!(
            FileSettings::new(file).try_load(),
            "Error in {file}: {}"
        )
        .unwrap_or_default(),
        None => Settings::default(),
    };
    let mut alias_paths: Vec<&Path> = settings.alias_files().iter().map(|p| p.as_path()).collect();
    alias_paths.extend(opts.alias_files.iter().map(Path::new));
    let aliases = AliasIndex::load(&alias_paths);
    let mru = match opts.mru_file {
        Some(file) => die!(MruList::open(Path::new(file)), "Error opening {file}: {}"),
        None => MruList::new(),
    };

    let (view, disabled) = layout(
        Arc::new(catalog),
        settings,
        aliases,
        mru,
        opts.mode,
        query,
    );

    if opts.json {
        let report = Report {
            mode: view.mode.as_str(),
            query,
            disabled,
            completion: view.completion.as_ref().map(|c| c.text.as_str()),
            completion_offset: view.completion.as_ref().map(|c| c.offset),
            items: view
                .items
                .iter()
                .map(|i| ReportItem {
                    text: &i.text,
                    name: &i.name,
                    row: i.row,
                    column: i.column,
                    span: i.span,
                    shown: i.shown,
                    selected: i.selected,
                })
                .collect(),
        };
        let out = die!(
            serde_json::to_string_pretty(&report),
            "Error encoding JSON: {}"
        );
        println!("{out}");
        return;
    }

    eprintln!(
        "mode: {}, {} items, {} disabled",
        view.mode.as_str(),
        view.items.len(),
        disabled
    );
    print!("{}", format_grid(&view));
    if let Some(c) = &view.completion {
        println!("completion: {} (offset {})", c.text, c.offset);
    }
}
