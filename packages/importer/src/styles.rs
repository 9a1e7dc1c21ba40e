use std::collections::BTreeMap;

use scraper::ElementRef;

/// Properties that fall back to a resolved value when not set inline
const RESOLVED_PROPERTIES: [&str; 11] = [
    "color",
    "background-color",
    "font-size",
    "font-family",
    "text-align",
    "padding",
    "width",
    "height",
    "border-radius",
    "border-width",
    "border-color",
];

const BORDER_STYLES: [&str; 10] = [
    "none", "hidden", "solid", "dashed", "dotted", "double", "groove", "ridge", "inset", "outset",
];

/// Style declarations of one element, keyed by kebab-case property name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedStyles {
    inline: BTreeMap<String, String>,
    resolved: BTreeMap<String, String>,
}

impl ExtractedStyles {
    /// Inline `style` declarations first, then presentational attributes for
    /// the allow-listed properties that are still unset.
    pub fn from_element(element: &ElementRef) -> Self {
        let el = element.value();
        let inline = el.attr("style").map(parse_declarations).unwrap_or_default();

        let mut resolved = BTreeMap::new();
        for property in RESOLVED_PROPERTIES {
            if inline.contains_key(property) {
                continue;
            }
            if let Some(value) = presentational_value(element, property) {
                if is_concrete(&value) {
                    resolved.insert(property.to_string(), value);
                }
            }
        }

        Self { inline, resolved }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.inline
            .get(property)
            .or_else(|| self.resolved.get(property))
            .map(String::as_str)
    }

    /// Set in the element's own `style` attribute
    pub fn has_inline(&self, property: &str) -> bool {
        self.inline.contains_key(property)
    }

    pub fn int(&self, property: &str) -> Option<u32> {
        self.get(property)
            .and_then(parse_int)
            .and_then(|n| u32::try_from(n).ok())
    }
}

/// Parse a `style` attribute, expanding the shorthands the importer reads.
fn parse_declarations(style: &str) -> BTreeMap<String, String> {
    let mut declarations = BTreeMap::new();

    for declaration in style.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let property = property.trim().to_ascii_lowercase();
        let value = value
            .trim()
            .trim_end_matches("!important")
            .trim()
            .to_string();
        if property.is_empty() || !is_concrete(&value) {
            continue;
        }

        match property.as_str() {
            "background" => {
                if let Some(color) = value.split_whitespace().find(|t| looks_like_color(t)) {
                    declarations.insert("background-color".to_string(), color.to_string());
                }
            }
            "border" => {
                let mut tokens = value.split_whitespace();
                if let Some(width) = value
                    .split_whitespace()
                    .find(|t| t.starts_with(|c: char| c.is_ascii_digit()))
                {
                    declarations.insert("border-width".to_string(), width.to_string());
                }
                if let Some(color) = tokens.find(|t| {
                    looks_like_color(t) && !BORDER_STYLES.contains(&t.to_ascii_lowercase().as_str())
                }) {
                    declarations.insert("border-color".to_string(), color.to_string());
                }
            }
            _ => {}
        }

        declarations.insert(property, value);
    }

    declarations
}

/// Value of the HTML attribute equivalent to a CSS property
fn presentational_value(element: &ElementRef, property: &str) -> Option<String> {
    let el = element.value();
    let value = match property {
        "background-color" => el.attr("bgcolor")?,
        "color" if el.name() == "font" => el.attr("color")?,
        "text-align" => el.attr("align")?,
        "width" => return el.attr("width").map(to_length),
        "height" => return el.attr("height").map(to_length),
        "border-width" => return el.attr("border").map(to_length),
        _ => return None,
    };
    Some(value.trim().to_string())
}

/// Bare numbers in size attributes are pixels
fn to_length(value: &str) -> String {
    let value = value.trim();
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        format!("{}px", value)
    } else {
        value.to_string()
    }
}

fn is_concrete(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "initial" && value != "inherit"
}

fn looks_like_color(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    lower.starts_with('#')
        || lower.starts_with("rgb")
        || lower.starts_with("hsl")
        || (lower.chars().all(|c| c.is_ascii_alphabetic())
            && !matches!(
                lower.as_str(),
                "none"
                    | "repeat"
                    | "no-repeat"
                    | "center"
                    | "top"
                    | "bottom"
                    | "left"
                    | "right"
                    | "scroll"
                    | "fixed"
                    | "cover"
                    | "contain"
            ))
}

/// Leading integer of a CSS value: `"10px 20px"` is 10, `"1.5em"` is 1
pub fn parse_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (sign, digits) = match value.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, value.strip_prefix('+').unwrap_or(value)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
