use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use mailcraft_editor::Editor;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Template file or directory to compile (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: String,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

pub fn compile(args: CompileArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = PathBuf::from(cwd).join(&args.path);

    if !input.exists() {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    }

    let out_dir = match &args.out_dir {
        Some(dir) => PathBuf::from(cwd).join(dir),
        None => config.get_out_dir(cwd),
    };

    if input.is_file() {
        let html = compile_file(&input, &config)?;
        if args.stdout {
            println!("{}", html);
        } else {
            let output_path = out_dir.join(&config.out_file);
            write_output(&output_path, &html)?;
            println!(
                "{} {} → {}",
                "✅".green(),
                args.path,
                output_path.display()
            );
        }
        return Ok(());
    }

    println!("{}", "🔨 Compiling email templates...".bright_blue().bold());

    let template_files = find_template_files(&input)?;

    if template_files.is_empty() {
        println!("{}", "⚠️  No template files found".yellow());
        return Ok(());
    }

    println!("Found {} files", template_files.len());

    let mut success_count = 0;
    let mut error_count = 0;

    for file in &template_files {
        let relative_path = file.strip_prefix(&input).unwrap_or(file);
        let result = compile_file(file, &config).and_then(|html| {
            if args.stdout {
                println!("{}", html);
                Ok("stdout".to_string())
            } else {
                let stem = file
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| "email-template".to_string());
                let output_path = out_dir.join(format!("{}.html", stem));
                write_output(&output_path, &html)?;
                Ok(output_path.display().to_string())
            }
        });

        match result {
            Ok(output) => {
                success_count += 1;
                println!(
                    "  {} {} → {}",
                    "✓".green(),
                    relative_path.display(),
                    output
                );
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    println!();
    if error_count == 0 {
        println!(
            "{} Compiled {} files successfully",
            "✅".green(),
            success_count
        );
    } else {
        println!(
            "{} Compiled {} files, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
    }

    Ok(())
}

/// Template JSON files under `dir`, skipping the project config
fn find_template_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let is_json = path.extension().and_then(|s| s.to_str()) == Some("json");
        let is_config = path.file_name().and_then(|s| s.to_str()) == Some(DEFAULT_CONFIG_NAME);
        if path.is_file() && is_json && !is_config {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

fn compile_file(path: &Path, config: &Config) -> Result<String> {
    debug!(path = %path.display(), "compiling template");
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let editor = Editor::from_json(&source)
        .with_context(|| format!("Invalid template {}", path.display()))?
        .with_compile_options(config.compile_options());
    Ok(editor.export_html())
}

fn write_output(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
