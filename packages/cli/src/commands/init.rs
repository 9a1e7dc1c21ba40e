use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mailcraft_editor::Editor;
use mailcraft_model::{ComponentType, IdGenerator, PropsPatch};
use std::fs;
use std::path::{Path, PathBuf};

pub const STARTER_TEMPLATE_NAME: &str = "template.json";

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing config and starter template
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Mailcraft project...".bright_blue().bold()
    );

    let config = Config::default();
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let template_path = PathBuf::from(cwd).join(STARTER_TEMPLATE_NAME);
    if !template_path.exists() || args.force {
        write_starter_template(&config, &template_path)?;
        println!("  {} Created {}", "✓".green(), STARTER_TEMPLATE_NAME);
    }

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}", STARTER_TEMPLATE_NAME.bright_white());
    println!("  2. Run {}", "mailcraft compile".bright_cyan());

    Ok(())
}

/// Starter template: a header, a paragraph and a call to action
fn write_starter_template(config: &Config, path: &Path) -> Result<()> {
    let mut ids = IdGenerator::session();
    let mut editor = Editor::from_template(config.new_template(&mut ids));

    editor.begin_batch("Starter template");
    if let Some(section) = editor.add_component(ComponentType::Container, None) {
        if let Some(header) = editor.add_component(ComponentType::Header, Some(&section)) {
            editor.update_component(
                &header,
                PropsPatch::new().set("content", "Welcome, {{firstName}}"),
            );
        }
        editor.add_component(ComponentType::Text, Some(&section));
        editor.add_component(ComponentType::Button, Some(&section));
    }
    editor.add_component(ComponentType::Unsubscribe, None);
    editor.end_batch();

    fs::write(path, editor.to_json()?)?;
    Ok(())
}
