use mailcraft_compiler_html::CompileOptions;
use mailcraft_model::{default_merge_tags, DocumentStyles, EmailTemplate, IdGenerator, MergeTag};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "mailcraft.config.json";

/// Mailcraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Document styles for new templates
    #[serde(default)]
    pub styles: DocumentStyles,

    /// Merge tags appended to the built-in ones
    #[serde(default)]
    pub merge_tags: Vec<MergeTagConfig>,

    /// Output directory for compiled HTML
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// File name used when compiling a single template
    #[serde(default = "default_out_file")]
    pub out_file: String,

    /// Pretty print HTML
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_out_file() -> String {
    "email-template.html".to_string()
}

fn default_pretty() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeTagConfig {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", DEFAULT_CONFIG_NAME))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get absolute path to output directory
    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            pretty: self.pretty,
            ..Default::default()
        }
    }

    /// Empty template with the configured styles and merge tags
    pub fn new_template(&self, ids: &mut IdGenerator) -> EmailTemplate {
        let mut template = EmailTemplate::empty();
        template.styles = self.styles.clone();
        template.merge_tags = default_merge_tags(ids);
        for tag in &self.merge_tags {
            let mut merge_tag = MergeTag::new(ids, &tag.name, &tag.value);
            merge_tag.description = tag.description.clone();
            template.merge_tags.push(merge_tag);
        }
        template
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            styles: DocumentStyles::default(),
            merge_tags: vec![],
            out_dir: default_out_dir(),
            out_file: default_out_file(),
            pretty: default_pretty(),
        }
    }
}
