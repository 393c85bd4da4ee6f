pub mod generate;
pub mod watch;

use std::path::PathBuf;

use anyhow::{Context, Result};
use compdoc::config::{self, Config, PathConfig};
use compdoc::Generator;

use crate::cli::Cli;
use crate::ui::context::UiContext;
use crate::ui::icon::{paint, Icon};
use crate::ui::theme;

/// Everything a command needs once flags and config are merged.
pub struct Session {
    pub config: Config,
    pub paths: PathConfig,
    pub ui: UiContext,
}

impl Session {
    /// Merge defaults, config file, `COMPDOC_*` variables and CLI flags, in
    /// increasing order of precedence.
    pub fn prepare(cli: &Cli) -> Result<Self> {
        let root = match &cli.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };

        let (mut config, warnings) = config::load_or_default(&root, cli.config.as_deref())
            .context("Failed to load configuration")?;
        apply_cli_overrides(&mut config, cli);

        let ui = UiContext::new(cli.json, cli.verbose, cli.color, &config);
        for warning in &warnings {
            eprintln!(
                "{} {}",
                Icon::Warning.colored(ui.color, ui.unicode),
                paint(&warning.to_string(), theme::colors::WARNING, ui.color)
            );
        }

        let paths = config.resolve_paths(&root);
        Ok(Self { config, paths, ui })
    }

    pub fn generator(&self) -> Generator {
        Generator::local(self.paths.clone()).with_extension(self.config.source.extension.clone())
    }
}

fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(components) = &cli.components {
        config.paths.components = components.clone();
    }
    if let Some(examples) = &cli.examples {
        config.paths.examples = examples.clone();
    }
    if let Some(output) = &cli.output {
        config.paths.output = PathBuf::from(output);
    }
}
