//! # Component Props
//!
//! One props struct per component variant. Every struct embeds
//! [`Positioning`] and fills missing keys from the variant defaults, so a
//! deserialized or patched component always carries every key the compiler
//! reads.
//!
//! Pixel sizes are unsigned integers and "absent" colors or lengths are empty
//! strings; there is no representation for `NaN` or `undefined`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of component variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Text,
    Header,
    Image,
    Button,
    Container,
    Divider,
    Columns,
    Spacer,
    Social,
    Unsubscribe,
}

impl ComponentType {
    pub const ALL: [ComponentType; 10] = [
        ComponentType::Text,
        ComponentType::Header,
        ComponentType::Image,
        ComponentType::Button,
        ComponentType::Container,
        ComponentType::Divider,
        ComponentType::Columns,
        ComponentType::Spacer,
        ComponentType::Social,
        ComponentType::Unsubscribe,
    ];

    /// Only containers and columns own children
    pub fn is_container(self) -> bool {
        matches!(self, ComponentType::Container | ComponentType::Columns)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentType::Text => "text",
            ComponentType::Header => "header",
            ComponentType::Image => "image",
            ComponentType::Button => "button",
            ComponentType::Container => "container",
            ComponentType::Divider => "divider",
            ComponentType::Columns => "columns",
            ComponentType::Spacer => "spacer",
            ComponentType::Social => "social",
            ComponentType::Unsubscribe => "unsubscribe",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown component type: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }

    /// Lenient parse of a CSS `text-align` value
    pub fn from_css(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Some(TextAlign::Left),
            "center" => Some(TextAlign::Center),
            "right" | "end" => Some(TextAlign::Right),
            "justify" => Some(TextAlign::Justify),
            _ => None,
        }
    }
}

/// Flexbox-style alignment as chosen in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexAlign {
    #[default]
    FlexStart,
    Center,
    FlexEnd,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Static => "static",
            Position::Relative => "relative",
            Position::Absolute => "absolute",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Facebook,
    Twitter,
    Instagram,
    Linkedin,
    Youtube,
    Pinterest,
    Github,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialShape {
    Square,
    #[default]
    Circle,
    Rounded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub url: String,
    pub enabled: bool,
}

impl SocialLink {
    pub fn new(platform: SocialPlatform, url: &str, enabled: bool) -> Self {
        Self {
            platform,
            url: url.to_string(),
            enabled,
        }
    }
}

/// Absolute-positioning overrides shared by every variant
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Positioning {
    pub position: Position,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub top: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub left: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub right: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bottom: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

impl Positioning {
    pub fn is_static(&self) -> bool {
        self.position == Position::Static
    }
}

const DEFAULT_TEXT_COLOR: &str = "#0F172A";
const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";
const DEFAULT_ACCENT: &str = "#2563EB";
const DEFAULT_PADDING: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextProps {
    pub content: String,
    pub rich_content: String,
    pub color: String,
    pub font_size: u32,
    pub text_align: TextAlign,
    pub padding: u32,
    pub font_family: String,
    #[serde(flatten)]
    pub positioning: Positioning,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            content: "Add your text here".to_string(),
            rich_content: "<p>Add your text here</p>".to_string(),
            color: DEFAULT_TEXT_COLOR.to_string(),
            font_size: 16,
            text_align: TextAlign::Left,
            padding: DEFAULT_PADDING,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            positioning: Positioning::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderProps {
    pub content: String,
    pub rich_content: String,
    pub color: String,
    pub font_size: u32,
    pub text_align: TextAlign,
    pub padding: u32,
    pub font_family: String,
    /// 1 through 6; out-of-range values are clamped when rendering
    pub header_level: u8,
    #[serde(flatten)]
    pub positioning: Positioning,
}

impl Default for HeaderProps {
    fn default() -> Self {
        Self {
            content: "Header Text".to_string(),
            rich_content: "<h2>Header Text</h2>".to_string(),
            color: DEFAULT_TEXT_COLOR.to_string(),
            font_size: 24,
            text_align: TextAlign::Left,
            padding: DEFAULT_PADDING,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            header_level: 2,
            positioning: Positioning::default(),
        }
    }
}

impl HeaderProps {
    pub fn level(&self) -> u8 {
        self.header_level.clamp(1, 6)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    pub width: String,
    pub height: String,
    pub padding: u32,
    #[serde(flatten)]
    pub positioning: Positioning,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            src: "/placeholder.svg?height=200&width=400".to_string(),
            alt: "Image description".to_string(),
            width: "100%".to_string(),
            height: "auto".to_string(),
            padding: DEFAULT_PADDING,
            positioning: Positioning::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonProps {
    pub text: String,
    pub url: String,
    pub background_color: String,
    pub color: String,
    pub padding: u32,
    pub border_radius: u32,
    pub text_align: TextAlign,
    #[serde(flatten)]
    pub positioning: Positioning,
}

impl Default for ButtonProps {
    fn default() -> Self {
        Self {
            text: "Click Me".to_string(),
            url: "#".to_string(),
            background_color: DEFAULT_ACCENT.to_string(),
            color: "#FFFFFF".to_string(),
            padding: DEFAULT_PADDING,
            border_radius: 4,
            text_align: TextAlign::Center,
            positioning: Positioning::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerProps {
    pub background_color: String,
    pub padding: u32,
    pub width: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub height: String,
    #[serde(flatten)]
    pub positioning: Positioning,
}

impl Default for ContainerProps {
    fn default() -> Self {
        Self {
            background_color: "#FFFFFF".to_string(),
            padding: DEFAULT_PADDING,
            width: "100%".to_string(),
            height: String::new(),
            positioning: Positioning::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DividerProps {
    pub color: String,
    pub thickness: u32,
    pub margin: u32,
    #[serde(flatten)]
    pub positioning: Positioning,
}

impl Default for DividerProps {
    fn default() -> Self {
        Self {
            color: "#E2E8F0".to_string(),
            thickness: 1,
            margin: DEFAULT_PADDING,
            positioning: Positioning::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnsProps {
    pub columns: u32,
    pub column_gap: u32,
    pub background_color: String,
    pub padding: u32,
    pub vertical_align: FlexAlign,
    pub horizontal_align: FlexAlign,
    pub stack_on_mobile: bool,
    #[serde(flatten)]
    pub positioning: Positioning,
}

impl Default for ColumnsProps {
    fn default() -> Self {
        Self {
            columns: 2,
            column_gap: 20,
            background_color: "#FFFFFF".to_string(),
            padding: DEFAULT_PADDING,
            vertical_align: FlexAlign::FlexStart,
            horizontal_align: FlexAlign::FlexStart,
            stack_on_mobile: true,
            positioning: Positioning::default(),
        }
    }
}

impl ColumnsProps {
    /// Number of column slots; a stored zero still renders one slot
    pub fn slot_count(&self) -> usize {
        self.columns.max(1) as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpacerProps {
    pub height: u32,
    #[serde(flatten)]
    pub positioning: Positioning,
}

impl Default for SpacerProps {
    fn default() -> Self {
        Self {
            height: 20,
            positioning: Positioning::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialProps {
    pub social_links: Vec<SocialLink>,
    pub social_size: u32,
    pub social_spacing: u32,
    pub social_color: String,
    pub social_background_color: String,
    pub social_shape: SocialShape,
    pub text_align: TextAlign,
    pub padding: u32,
    #[serde(flatten)]
    pub positioning: Positioning,
}

impl Default for SocialProps {
    fn default() -> Self {
        Self {
            social_links: vec![
                SocialLink::new(SocialPlatform::Facebook, "https://facebook.com", true),
                SocialLink::new(SocialPlatform::Twitter, "https://twitter.com", true),
                SocialLink::new(SocialPlatform::Instagram, "https://instagram.com", true),
                SocialLink::new(SocialPlatform::Linkedin, "https://linkedin.com", true),
                SocialLink::new(SocialPlatform::Youtube, "https://youtube.com", false),
                SocialLink::new(SocialPlatform::Pinterest, "https://pinterest.com", false),
                SocialLink::new(SocialPlatform::Github, "https://github.com", false),
            ],
            social_size: 32,
            social_spacing: 10,
            social_color: "#FFFFFF".to_string(),
            social_background_color: DEFAULT_ACCENT.to_string(),
            social_shape: SocialShape::Circle,
            text_align: TextAlign::Center,
            padding: DEFAULT_PADDING,
            positioning: Positioning::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UnsubscribeProps {
    pub unsubscribe_text: String,
    pub unsubscribe_url: String,
    pub color: String,
    pub font_size: u32,
    pub text_align: TextAlign,
    pub padding: u32,
    #[serde(flatten)]
    pub positioning: Positioning,
}

impl Default for UnsubscribeProps {
    fn default() -> Self {
        Self {
            unsubscribe_text: "Unsubscribe from this list".to_string(),
            unsubscribe_url: "{{unsubscribeUrl}}".to_string(),
            color: "#6B7280".to_string(),
            font_size: 12,
            text_align: TextAlign::Center,
            padding: DEFAULT_PADDING,
            positioning: Positioning::default(),
        }
    }
}

/// Type-tagged props bag; the tag doubles as the component's variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ComponentProps {
    Text(TextProps),
    Header(HeaderProps),
    Image(ImageProps),
    Button(ButtonProps),
    Container(ContainerProps),
    Divider(DividerProps),
    Columns(ColumnsProps),
    Spacer(SpacerProps),
    Social(SocialProps),
    Unsubscribe(UnsubscribeProps),
}

impl ComponentProps {
    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentProps::Text(_) => ComponentType::Text,
            ComponentProps::Header(_) => ComponentType::Header,
            ComponentProps::Image(_) => ComponentType::Image,
            ComponentProps::Button(_) => ComponentType::Button,
            ComponentProps::Container(_) => ComponentType::Container,
            ComponentProps::Divider(_) => ComponentType::Divider,
            ComponentProps::Columns(_) => ComponentType::Columns,
            ComponentProps::Spacer(_) => ComponentType::Spacer,
            ComponentProps::Social(_) => ComponentType::Social,
            ComponentProps::Unsubscribe(_) => ComponentType::Unsubscribe,
        }
    }

    pub fn positioning(&self) -> &Positioning {
        match self {
            ComponentProps::Text(p) => &p.positioning,
            ComponentProps::Header(p) => &p.positioning,
            ComponentProps::Image(p) => &p.positioning,
            ComponentProps::Button(p) => &p.positioning,
            ComponentProps::Container(p) => &p.positioning,
            ComponentProps::Divider(p) => &p.positioning,
            ComponentProps::Columns(p) => &p.positioning,
            ComponentProps::Spacer(p) => &p.positioning,
            ComponentProps::Social(p) => &p.positioning,
            ComponentProps::Unsubscribe(p) => &p.positioning,
        }
    }
}

/// Default props for a component variant.
///
/// This is the only place defaults come from; the editor, the importer and
/// deserialization all start from these values.
pub fn defaults_for(component_type: ComponentType) -> ComponentProps {
    match component_type {
        ComponentType::Text => ComponentProps::Text(TextProps::default()),
        ComponentType::Header => ComponentProps::Header(HeaderProps::default()),
        ComponentType::Image => ComponentProps::Image(ImageProps::default()),
        ComponentType::Button => ComponentProps::Button(ButtonProps::default()),
        ComponentType::Container => ComponentProps::Container(ContainerProps::default()),
        ComponentType::Divider => ComponentProps::Divider(DividerProps::default()),
        ComponentType::Columns => ComponentProps::Columns(ColumnsProps::default()),
        ComponentType::Spacer => ComponentProps::Spacer(SpacerProps::default()),
        ComponentType::Social => ComponentProps::Social(SocialProps::default()),
        ComponentType::Unsubscribe => ComponentProps::Unsubscribe(UnsubscribeProps::default()),
    }
}
