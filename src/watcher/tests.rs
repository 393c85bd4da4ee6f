//! Tests for the watch module

use super::event::{WatchEvent, WatchOptions, WatcherState, DEBOUNCE_MS};
use super::use_case::{attach_appeared_roots, is_content_event, is_ignored, WatchUseCase};
use crate::config::PathConfig;
use crate::docgen::{DocExtractor, ReactDocgen};
use crate::fs::LocalFs;
use crate::generator::{GenerateEvent, Generator};
use notify::event::{AccessKind, CreateKind, ModifyKind};
use notify::{EventKind, Watcher};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

const ALERT: &str = "/** Alert */\nexport default function Alert() { return null; }\n";

fn setup_project(root: &Path) -> PathConfig {
    let paths = PathConfig::new(
        root.join("src/docs/examples"),
        root.join("src/components"),
        root.join("config/componentData.js"),
    );
    fs::create_dir_all(paths.components.join("Alert")).unwrap();
    fs::create_dir_all(paths.examples.join("Alert")).unwrap();
    fs::write(paths.components.join("Alert/Alert.js"), ALERT).unwrap();
    fs::write(
        paths.examples.join("Alert/ExampleAlert.js"),
        "/** Basic */\nexport default function ExampleAlert() { return null; }\n",
    )
    .unwrap();
    paths
}

// === WatchEvent tests ===

#[test]
fn test_watch_event_to_json_started() {
    let event = WatchEvent::WatchStarted {
        watching: vec!["src/components".to_string()],
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"watch_started\""));
    assert!(json.contains("\"command\":\"watch\""));
    assert!(json.contains("\"watching\":[\"src/components\"]"));
}

#[test]
fn test_watch_event_to_json_pass_uses_inner_event() {
    let event = WatchEvent::Pass(GenerateEvent::GenerationComplete {
        output: "config/componentData.js".to_string(),
        components: 3,
        changed: true,
    });
    let json = event.to_json();
    assert!(json.contains("\"event\":\"generation_complete\""));
    assert!(json.contains("\"command\":\"watch\""));
    assert!(json.contains("\"components\":3"));
}

#[test]
fn test_watch_event_to_json_error() {
    let event = WatchEvent::Error {
        message: "Something \"failed\"".to_string(),
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"error\""));
    assert!(json.contains("\\\"failed\\\""));
}

// === WatcherState tests ===

#[test]
fn test_watcher_state_debouncing() {
    let mut state = WatcherState::default();

    assert!(!state.should_sync());

    state.add_change(PathBuf::from("Alert.js"));
    assert!(!state.should_sync());

    thread::sleep(Duration::from_millis(DEBOUNCE_MS + 10));
    assert!(state.should_sync());

    let changes = state.take_changes();
    assert_eq!(changes.len(), 1);
    assert!(!state.should_sync());
    assert!(!state.has_pending());
}

#[test]
fn test_watcher_state_coalesce_changes() {
    let mut state = WatcherState::new(Duration::from_millis(10));

    state.add_change(PathBuf::from("b.js"));
    state.add_change(PathBuf::from("a.js"));
    state.add_change(PathBuf::from("b.js"));

    thread::sleep(Duration::from_millis(20));

    let changes = state.take_changes();
    assert_eq!(changes, vec![PathBuf::from("a.js"), PathBuf::from("b.js")]);
}

#[test]
fn test_watch_options_builder() {
    let options = WatchOptions::new().with_debounce_ms(250);
    assert_eq!(options.debounce, Duration::from_millis(250));
    assert_eq!(WatchOptions::default().debounce, Duration::from_millis(DEBOUNCE_MS));
}

// === Filtering ===

#[test]
fn test_content_events_only() {
    assert!(is_content_event(&EventKind::Create(CreateKind::File)));
    assert!(is_content_event(&EventKind::Modify(ModifyKind::Any)));
    assert!(!is_content_event(&EventKind::Access(AccessKind::Any)));
}

#[test]
fn test_output_and_hidden_files_are_ignored() {
    let ignored = vec![PathBuf::from("/p/config/componentData.js")];
    assert!(is_ignored(Path::new("/p/config/componentData.js"), &ignored));
    assert!(is_ignored(Path::new("/p/config/.tmpA1b2C3"), &ignored));
    assert!(is_ignored(Path::new("/p/src/components/Alert/.Alert.js.swp"), &ignored));
    assert!(!is_ignored(Path::new("/p/src/components/Alert/Alert.js"), &ignored));
}

#[test]
fn test_appeared_root_is_attached_and_queued() {
    let dir = tempdir().unwrap();
    let present = dir.path().join("examples");
    let absent = dir.path().join("components");
    fs::create_dir_all(&present).unwrap();

    let mut watcher = notify::RecommendedWatcher::new(
        |_: Result<notify::Event, notify::Error>| {},
        notify::Config::default(),
    )
    .unwrap();
    let mut missing = vec![present.clone(), absent.clone()];
    let mut state = WatcherState::new(Duration::ZERO);
    let events = Mutex::new(Vec::new());

    attach_appeared_roots(&mut watcher, &mut missing, &mut state, &|e: WatchEvent| {
        events.lock().unwrap().push(e)
    });

    assert_eq!(missing, vec![absent]);
    assert_eq!(
        *events.lock().unwrap(),
        vec![WatchEvent::RootAppeared {
            path: present.display().to_string()
        }]
    );
    assert_eq!(state.take_changes(), vec![present]);
}

// === WatchUseCase tests ===

#[test]
fn test_watch_initial_pass_and_shutdown() {
    let dir = tempdir().unwrap();
    let paths = setup_project(dir.path());
    let output = paths.output.clone();

    let events: Arc<Mutex<Vec<WatchEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();
    let running = Arc::new(AtomicBool::new(false)); // Stop immediately

    let use_case = WatchUseCase::new(
        Generator::local(paths),
        WatchOptions::new(),
    );
    use_case
        .start(running, |event| {
            events_clone.lock().unwrap().push(event);
        })
        .unwrap();

    let captured = events.lock().unwrap();
    assert!(matches!(captured[0], WatchEvent::WatchStarted { .. }));
    assert!(captured.iter().any(|e| matches!(
        e,
        WatchEvent::Pass(GenerateEvent::GenerationComplete { components: 1, .. })
    )));
    assert_eq!(captured.last(), Some(&WatchEvent::Shutdown));

    let content = fs::read_to_string(output).unwrap();
    assert!(content.starts_with("module.exports = [{\"name\":\"Alert\""));
}

#[test]
fn test_watch_reports_missing_root() {
    let dir = tempdir().unwrap();
    let paths = setup_project(dir.path());
    fs::remove_dir_all(&paths.examples).unwrap();

    let events: Arc<Mutex<Vec<WatchEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();

    let use_case = WatchUseCase::new(
        Generator::local(paths),
        WatchOptions::new(),
    );
    use_case
        .start(Arc::new(AtomicBool::new(false)), |event| {
            events_clone.lock().unwrap().push(event);
        })
        .unwrap();

    let captured = events.lock().unwrap();
    assert!(captured
        .iter()
        .any(|e| matches!(e, WatchEvent::RootMissing { .. })));
    assert!(captured.iter().any(|e| matches!(
        e,
        WatchEvent::Pass(GenerateEvent::MissingExamples { component }) if component == "Alert"
    )));
}

#[test]
fn test_watch_pass_error_is_not_fatal() {
    let dir = tempdir().unwrap();
    let paths = PathConfig::new(
        dir.path().join("examples"),
        dir.path().join("missing-components"),
        dir.path().join("out.js"),
    );

    let events: Arc<Mutex<Vec<WatchEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();

    let use_case = WatchUseCase::new(
        Generator::local(paths),
        WatchOptions::new(),
    );
    let result = use_case.start(Arc::new(AtomicBool::new(false)), |event| {
        events_clone.lock().unwrap().push(event);
    });

    assert!(result.is_ok());
    let captured = events.lock().unwrap();
    assert!(captured
        .iter()
        .any(|e| matches!(e, WatchEvent::Error { .. })));
    assert_eq!(captured.last(), Some(&WatchEvent::Shutdown));
}

#[test]
fn test_watch_regenerates_on_change() {
    let dir = tempdir().unwrap();
    let paths = setup_project(dir.path());
    let component = paths.components.join("Alert/Alert.js");
    let output = paths.output.clone();

    let passes = Arc::new(Mutex::new(0usize));
    let passes_clone = passes.clone();
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    let writer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(400));
        fs::write(
            &component,
            "/** Updated alert */\nexport default function Alert() { return null; }\n",
        )
        .unwrap();
        thread::sleep(Duration::from_millis(1500));
        running_clone.store(false, Ordering::SeqCst);
    });

    let use_case = WatchUseCase::new(
        Generator::local(paths),
        WatchOptions::new(),
    );
    use_case
        .start(running, |event| {
            if matches!(event, WatchEvent::Pass(GenerateEvent::GenerationStarted { .. })) {
                *passes_clone.lock().unwrap() += 1;
            }
        })
        .unwrap();
    writer.join().unwrap();

    assert!(*passes.lock().unwrap() >= 2);
    let content = fs::read_to_string(output).unwrap();
    assert!(content.contains("Updated alert"));
}

#[test]
fn test_edit_during_initial_pass_triggers_follow_up() {
    let dir = tempdir().unwrap();
    let paths = setup_project(dir.path());
    let component = paths.components.join("Alert/Alert.js");
    let output = paths.output.clone();

    // The first extraction rewrites the component while the pass is running
    let edited = Arc::new(AtomicBool::new(false));
    let extractor = move |source: &str| {
        if source.contains("function Alert") && !edited.swap(true, Ordering::SeqCst) {
            fs::write(
                &component,
                "/** Edited mid-pass */\nexport default function Alert() { return null; }\n",
            )
            .unwrap();
        }
        ReactDocgen.extract(source)
    };

    let passes = Arc::new(Mutex::new(0usize));
    let passes_clone = passes.clone();
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(1500));
        running_clone.store(false, Ordering::SeqCst);
    });

    let use_case = WatchUseCase::new(
        Generator::new(LocalFs::new(), extractor, paths),
        WatchOptions::new(),
    );
    use_case
        .start(running, |event| {
            if matches!(event, WatchEvent::Pass(GenerateEvent::GenerationStarted { .. })) {
                *passes_clone.lock().unwrap() += 1;
            }
        })
        .unwrap();
    stopper.join().unwrap();

    assert!(*passes.lock().unwrap() >= 2);
    let content = fs::read_to_string(output).unwrap();
    assert!(content.contains("Edited mid-pass"));
}

#[test]
fn test_missing_root_is_watched_once_created() {
    let dir = tempdir().unwrap();
    let paths = setup_project(dir.path());
    fs::remove_dir_all(&paths.examples).unwrap();
    let examples = paths.examples.clone();
    let output = paths.output.clone();

    let events: Arc<Mutex<Vec<WatchEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    let writer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(400));
        fs::create_dir_all(examples.join("Alert")).unwrap();
        fs::write(
            examples.join("Alert/ExampleAlert.js"),
            "/** Late example */\nexport default function ExampleAlert() { return null; }\n",
        )
        .unwrap();
        thread::sleep(Duration::from_millis(1500));
        running_clone.store(false, Ordering::SeqCst);
    });

    let use_case = WatchUseCase::new(Generator::local(paths), WatchOptions::new());
    use_case
        .start(running, |event| {
            events_clone.lock().unwrap().push(event);
        })
        .unwrap();
    writer.join().unwrap();

    let captured = events.lock().unwrap();
    assert!(captured
        .iter()
        .any(|e| matches!(e, WatchEvent::RootAppeared { .. })));
    let content = fs::read_to_string(output).unwrap();
    assert!(content.contains("\"name\":\"ExampleAlert\""));
    assert!(content.contains("Late example"));
}
