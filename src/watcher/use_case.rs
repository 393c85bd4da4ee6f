//! Watch Use Case implementation

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::docgen::DocExtractor;
use crate::error::CompdocResult;
use crate::fs::FileSystem;
use crate::generator::Generator;

use super::event::{WatchEvent, WatchOptions, WatcherState};

/// Poll interval of the watch loop
const TICK: Duration = Duration::from_millis(50);

/// Watch Use Case
///
/// Runs one pass at start, then a full pass after every debounced batch of
/// changes under the examples and components roots. Passes run on the
/// calling thread, so they never overlap; changes that arrive during a pass
/// are coalesced into a single follow-up pass.
pub struct WatchUseCase<F, E> {
    generator: Generator<F, E>,
    options: WatchOptions,
}

impl<F: FileSystem, E: DocExtractor> WatchUseCase<F, E> {
    pub fn new(generator: Generator<F, E>, options: WatchOptions) -> Self {
        Self { generator, options }
    }

    pub fn generator(&self) -> &Generator<F, E> {
        &self.generator
    }

    /// Start watching (blocking)
    ///
    /// Returns when `running` is cleared. Only watcher setup failures are
    /// returned as errors; failed passes are reported through `on_event`.
    pub fn start(&self, running: Arc<AtomicBool>, on_event: impl Fn(WatchEvent)) -> CompdocResult<()> {
        let paths = self.generator.paths();

        on_event(WatchEvent::WatchStarted {
            watching: paths
                .watch_roots()
                .iter()
                .map(|r| r.display().to_string())
                .collect(),
        });

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    if is_content_event(&event.kind) {
                        for path in event.paths {
                            let _ = tx.send(path);
                        }
                    }
                }
            },
            Config::default(),
        )?;

        // Registered before the initial pass: edits made during it stay queued
        let mut missing = Vec::new();
        for root in paths.watch_roots() {
            if root.is_dir() {
                watcher.watch(root, RecursiveMode::Recursive)?;
            } else {
                on_event(WatchEvent::RootMissing {
                    path: root.display().to_string(),
                });
                missing.push(root.to_path_buf());
            }
        }

        self.run_pass(&on_event);

        let ignored = [paths.output.clone()];
        let mut state = WatcherState::new(self.options.debounce);

        while running.load(Ordering::SeqCst) {
            collect_changes(&rx, &ignored, &mut state);
            attach_appeared_roots(&mut watcher, &mut missing, &mut state, &on_event);

            if state.should_sync() {
                for path in state.take_changes() {
                    on_event(WatchEvent::FileChanged {
                        path: path.display().to_string(),
                    });
                }
                self.run_pass(&on_event);
            }
        }

        on_event(WatchEvent::Shutdown);
        Ok(())
    }

    /// One full regeneration; failures are reported, never propagated.
    fn run_pass(&self, on_event: &impl Fn(WatchEvent)) {
        let result = self
            .generator
            .generate(|event| on_event(WatchEvent::Pass(event)));
        if let Err(e) = result {
            on_event(WatchEvent::Error {
                message: e.to_string(),
            });
        }
    }
}

/// Wait one tick for a change, then take everything else already queued.
fn collect_changes(rx: &Receiver<PathBuf>, ignored: &[PathBuf], state: &mut WatcherState) {
    let Ok(first) = rx.recv_timeout(TICK) else {
        return;
    };
    for path in std::iter::once(first).chain(rx.try_iter()) {
        if !is_ignored(&path, ignored) {
            state.add_change(path);
        }
    }
}

/// Start watching roots that did not exist so far.
///
/// The root itself is recorded as a change: files written into it before the
/// watch was registered are picked up by the pass that follows.
pub(crate) fn attach_appeared_roots(
    watcher: &mut impl Watcher,
    missing: &mut Vec<PathBuf>,
    state: &mut WatcherState,
    on_event: &impl Fn(WatchEvent),
) {
    let mut still_missing = Vec::new();
    for root in missing.drain(..) {
        if !root.is_dir() {
            still_missing.push(root);
            continue;
        }
        let path = root.display().to_string();
        match watcher.watch(&root, RecursiveMode::Recursive) {
            Ok(()) => {
                on_event(WatchEvent::RootAppeared { path });
                state.add_change(root);
            }
            Err(e) => on_event(WatchEvent::Error {
                message: format!("cannot watch {}: {}", path, e),
            }),
        }
    }
    *missing = still_missing;
}

/// Create, modify and remove events; access notifications are dropped.
pub(crate) fn is_content_event(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) | EventKind::Any
    )
}

/// The generated output and hidden files (temp files of the atomic write,
/// editor swap files) never trigger a pass.
pub(crate) fn is_ignored(path: &Path, ignored: &[PathBuf]) -> bool {
    let hidden = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'));
    hidden
        || ignored.iter().any(|i| i == path)
        || path
            .canonicalize()
            .ok()
            .is_some_and(|c| ignored.iter().any(|i| i.canonicalize().ok().as_ref() == Some(&c)))
}
