use compdoc::generator::GenerateEvent;

use crate::ui::icon::{paint, Icon};
use crate::ui::theme;

/// Render one pass event, or `None` when the verbosity hides it.
pub fn render_generate_event(
    event: &GenerateEvent,
    verbose: u8,
    supports_color: bool,
    supports_unicode: bool,
) -> Option<String> {
    match event {
        GenerateEvent::GenerationStarted {
            components_root,
            components,
        } => (verbose > 0).then(|| {
            format!(
                "{} Generating metadata for {} components in {}\n",
                Icon::Progress.colored(supports_color, supports_unicode),
                components,
                components_root
            )
        }),
        GenerateEvent::ComponentCollected {
            name,
            props,
            examples,
        } => (verbose > 0).then(|| {
            format!(
                "  {} {} ({} props, {} examples)\n",
                Icon::Arrow.colored(supports_color, supports_unicode),
                name,
                props,
                examples
            )
        }),
        GenerateEvent::ComponentFailed { name, message } => (verbose > 0).then(|| {
            format!(
                "  {} {}: {}\n",
                Icon::Error.colored(supports_color, supports_unicode),
                name,
                message
            )
        }),
        GenerateEvent::MissingExamples { component } => Some(format!(
            "{}\n",
            paint(
                &format!("No examples found for {}.", component),
                theme::colors::ERROR,
                supports_color
            )
        )),
        GenerateEvent::GenerationComplete { changed, .. } => {
            let mut line = format!(
                "{} {}",
                Icon::Success.colored(supports_color, supports_unicode),
                paint("Component data saved.", theme::colors::SUCCESS, supports_color)
            );
            if !changed {
                line.push_str(&paint(" (unchanged)", theme::colors::DIM, supports_color));
            }
            line.push('\n');
            Some(line)
        }
        GenerateEvent::GenerationFailed { errors, .. } => {
            let mut out = String::new();
            for error in errors {
                out.push_str(&format!(
                    "{} {}\n",
                    Icon::Error.colored(supports_color, supports_unicode),
                    paint(error, theme::colors::ERROR, supports_color)
                ));
            }
            out.push_str(&format!(
                "{} Component data saved with {} error{}.\n",
                Icon::Warning.colored(supports_color, supports_unicode),
                errors.len(),
                if errors.len() == 1 { "" } else { "s" }
            ));
            Some(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_saved_line() {
        let event = GenerateEvent::GenerationComplete {
            output: "config/componentData.js".to_string(),
            components: 2,
            changed: true,
        };
        let rendered = render_generate_event(&event, 0, false, false).unwrap();
        assert_eq!(rendered, "[OK] Component data saved.\n");
    }

    #[test]
    fn renders_unchanged_hint() {
        let event = GenerateEvent::GenerationComplete {
            output: "out.js".to_string(),
            components: 0,
            changed: false,
        };
        let rendered = render_generate_event(&event, 0, false, true).unwrap();
        assert_eq!(rendered, "✓ Component data saved. (unchanged)\n");
    }

    #[test]
    fn renders_missing_examples_always() {
        let event = GenerateEvent::MissingExamples {
            component: "Alert".to_string(),
        };
        let rendered = render_generate_event(&event, 0, false, false).unwrap();
        assert_eq!(rendered, "No examples found for Alert.\n");
    }

    #[test]
    fn progress_lines_need_verbose() {
        let event = GenerateEvent::ComponentCollected {
            name: "Alert".to_string(),
            props: 2,
            examples: 1,
        };
        assert!(render_generate_event(&event, 0, false, false).is_none());
        assert_eq!(
            render_generate_event(&event, 1, false, false).unwrap(),
            "  [>] Alert (2 props, 1 examples)\n"
        );
    }

    #[test]
    fn renders_each_error() {
        let event = GenerateEvent::GenerationFailed {
            output: "out.js".to_string(),
            errors: vec!["first".to_string(), "second".to_string()],
            changed: true,
        };
        let rendered = render_generate_event(&event, 0, false, false).unwrap();
        assert_eq!(
            rendered,
            "[FAIL] first\n[FAIL] second\n[WARN] Component data saved with 2 errors.\n"
        );
    }
}
