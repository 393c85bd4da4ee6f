use anyhow::{Context, Result};
use compdoc::generator::GenerateEvent;

use crate::cli::Cli;
use crate::commands::Session;
use crate::ui::context::UiContext;
use crate::ui::views::generate::render_generate_event;

/// One generation pass.
///
/// A document that records component failures is still a completed pass and
/// exits 0; only a pass that could not run or write fails the command.
pub fn cmd_generate(cli: &Cli) -> Result<()> {
    let session = Session::prepare(cli)?;
    let generator = session.generator();
    let ui = session.ui;

    generator
        .generate(|event| emit(&ui, &event))
        .with_context(|| {
            format!(
                "Failed to generate component data into {}",
                session.paths.output.display()
            )
        })?;

    Ok(())
}

fn emit(ui: &UiContext, event: &GenerateEvent) {
    if ui.json {
        println!("{}", event.to_json());
        return;
    }

    if let Some(rendered) = render_generate_event(event, ui.verbose, ui.color, ui.unicode) {
        match event {
            GenerateEvent::ComponentFailed { .. } | GenerateEvent::GenerationFailed { .. } => {
                eprint!("{rendered}")
            }
            _ => print!("{rendered}"),
        }
    }
}
