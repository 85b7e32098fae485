use std::path::Path;
use std::process;

use picker_core::mru::MruList;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn mru_show(path: &Path, json: bool) {
    let list = die!(MruList::open(path), "Error opening MRU file: {}");
    if json {
        let out = die!(
            serde_json::to_string_pretty(list.records()),
            "Error encoding JSON: {}"
        );
        println!("{out}");
        return;
    }
    if list.is_empty() {
        println!("(empty)");
        return;
    }
    for (i, record) in list.records().iter().enumerate() {
        println!("{:>2}: {}\t{}", i + 1, record.emoji_str, record.emoji_key);
    }
    println!("---");
    println!("{} entries", list.len());
}
