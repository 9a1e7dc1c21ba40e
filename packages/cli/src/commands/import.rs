use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use mailcraft_editor::Editor;
use mailcraft_model::IdGenerator;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// HTML file to import
    pub file: String,

    /// Output template file
    #[arg(short, long, default_value = "template.json")]
    pub output: String,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}

pub fn import(args: ImportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = PathBuf::from(cwd).join(&args.file);

    if !input.is_file() {
        return Err(anyhow!("Input file does not exist: {}", input.display()));
    }

    let html = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let mut ids = IdGenerator::session();
    let mut editor = Editor::from_template(config.new_template(&mut ids))
        .with_compile_options(config.compile_options());

    let count = editor.import_html(&html)?;
    let json = editor.to_json()?;

    if args.stdout {
        println!("{}", json);
        return Ok(());
    }

    let output_path = PathBuf::from(cwd).join(&args.output);
    fs::write(&output_path, json)?;

    if count == 0 {
        println!(
            "{} No importable content found in {}",
            "⚠️".yellow(),
            args.file
        );
    }
    println!(
        "{} Imported {} components → {}",
        "✅".green(),
        count,
        output_path.display()
    );

    Ok(())
}
