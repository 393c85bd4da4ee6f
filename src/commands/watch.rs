use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use compdoc::watcher::{WatchEvent, WatchOptions, WatchUseCase};

use crate::cli::Cli;
use crate::commands::Session;
use crate::ui::views::watch::{render_watch_event, render_watch_header};

pub fn cmd_watch(cli: &Cli) -> Result<()> {
    let session = Session::prepare(cli)?;
    let ui = session.ui;
    let options = WatchOptions::new().with_debounce_ms(session.config.watch.debounce_ms);
    let use_case = WatchUseCase::new(session.generator(), options);

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("Error setting Ctrl+C handler")?;

    if !ui.json {
        let roots: Vec<String> = session
            .paths
            .watch_roots()
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        print!("{}", render_watch_header(&roots, ui.color, ui.unicode));
    }

    use_case
        .start(running, |event| {
            if ui.json {
                println!("{}", event.to_json());
                return;
            }

            let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
            if let Some(rendered) =
                render_watch_event(&timestamp, &event, ui.verbose, ui.color, ui.unicode)
            {
                match event {
                    WatchEvent::Error { .. } => eprint!("{rendered}"),
                    _ => print!("{rendered}"),
                }
            }
        })
        .context("Failed to start watching")?;

    Ok(())
}
