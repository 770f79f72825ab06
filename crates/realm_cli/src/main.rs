//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `realm_core` linkage and store bootstrap outside any UI.
//! - Print per-section/category counts of the block-schema collection.
//!
//! Usage: `realm_cli [APP_DIR]`. With an absolute `APP_DIR`, logs and the
//! SQLite database live beneath it; otherwise an in-memory store is used.

use realm_core::{
    init_logging, BlockPostStore, BoardSelection, CoreConfig, MemoryStorage, Post, Section,
    SqliteStorage,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("realm_core ping={}", realm_core::ping());
    println!("realm_core version={}", realm_core::core_version());

    let posts = match std::env::args().nth(1) {
        Some(app_dir) => load_from_app_dir(&app_dir),
        None => BlockPostStore::open(MemoryStorage::new())
            .map(|store| store.posts().to_vec())
            .map_err(|err| err.to_string()),
    };

    match posts {
        Ok(posts) => {
            print_counts(&posts);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("realm_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_from_app_dir(app_dir: &str) -> Result<Vec<Post>, String> {
    let config = CoreConfig::for_app_dir(app_dir).map_err(|err| err.to_string())?;
    init_logging(&config.logging)?;
    let storage = SqliteStorage::open(&config.db_path).map_err(|err| err.to_string())?;
    let store = BlockPostStore::open(storage).map_err(|err| err.to_string())?;
    Ok(store.posts().to_vec())
}

fn print_counts(posts: &[Post]) {
    println!("posts total={}", posts.len());
    for section in Section::ALL {
        let mut selection = BoardSelection::new(section);
        for option in selection.category_options() {
            selection.select_category(option);
            println!(
                "section={} category={} visible={}",
                section,
                option,
                selection.visible(posts).len()
            );
        }
    }
}
