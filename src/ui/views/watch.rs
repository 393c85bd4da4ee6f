use compdoc::watcher::WatchEvent;

use crate::ui::icon::Icon;
use crate::ui::views::generate::render_generate_event;

pub fn render_watch_header(watching: &[String], supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} compdoc watch\n",
        Icon::Watch.colored(supports_color, supports_unicode)
    );
    for root in watching {
        out.push_str(&format!("  Watching: {}\n", root));
    }
    out.push_str("  Press Ctrl+C to stop\n\n");
    out
}

/// Render a watch event; every line gets the `[HH:MM:SS]` prefix.
pub fn render_watch_event(
    timestamp: &str,
    event: &WatchEvent,
    verbose: u8,
    supports_color: bool,
    supports_unicode: bool,
) -> Option<String> {
    let prefix = format!("[{}]", timestamp);

    match event {
        WatchEvent::WatchStarted { .. } => None,
        WatchEvent::RootMissing { path } => Some(format!(
            "{} {} Waiting for missing directory: {}\n",
            prefix,
            Icon::Warning.colored(supports_color, supports_unicode),
            path
        )),
        WatchEvent::RootAppeared { path } => Some(format!(
            "{} {} Now watching: {}\n",
            prefix,
            Icon::Watch.colored(supports_color, supports_unicode),
            path
        )),
        WatchEvent::FileChanged { path } => Some(format!(
            "{} {} Changed: {}\n",
            prefix,
            Icon::Arrow.colored(supports_color, supports_unicode),
            path
        )),
        WatchEvent::Pass(inner) => {
            let rendered = render_generate_event(inner, verbose, supports_color, supports_unicode)?;
            Some(
                rendered
                    .lines()
                    .map(|line| format!("{} {}\n", prefix, line))
                    .collect(),
            )
        }
        WatchEvent::Error { message } => Some(format!(
            "{} {} Error: {}\n",
            prefix,
            Icon::Error.colored(supports_color, supports_unicode),
            message
        )),
        WatchEvent::Shutdown => Some(format!(
            "\n{} {} Watch stopped.\n",
            prefix,
            Icon::Watch.colored(supports_color, supports_unicode)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compdoc::generator::GenerateEvent;

    #[test]
    fn renders_changed_path() {
        let event = WatchEvent::FileChanged {
            path: "src/components/Alert/Alert.js".to_string(),
        };
        let rendered = render_watch_event("12:00:00", &event, 0, false, false).unwrap();
        assert_eq!(
            rendered,
            "[12:00:00] [>] Changed: src/components/Alert/Alert.js\n"
        );
    }

    #[test]
    fn prefixes_every_pass_line() {
        let event = WatchEvent::Pass(GenerateEvent::GenerationFailed {
            output: "out.js".to_string(),
            errors: vec!["boom".to_string()],
            changed: true,
        });
        let rendered = render_watch_event("00:00:01", &event, 0, false, false).unwrap();
        assert_eq!(
            rendered,
            "[00:00:01] [FAIL] boom\n[00:00:01] [WARN] Component data saved with 1 error.\n"
        );
    }

    #[test]
    fn renders_appeared_root() {
        let event = WatchEvent::RootAppeared {
            path: "src/docs/examples".to_string(),
        };
        let rendered = render_watch_event("08:15:00", &event, 0, false, false).unwrap();
        assert_eq!(rendered, "[08:15:00] [~] Now watching: src/docs/examples\n");
    }

    #[test]
    fn header_lists_roots() {
        let header = render_watch_header(
            &["src/docs/examples".to_string(), "src/components".to_string()],
            false,
            false,
        );
        assert!(header.starts_with("[~] compdoc watch\n"));
        assert!(header.contains("Watching: src/components"));
    }
}
