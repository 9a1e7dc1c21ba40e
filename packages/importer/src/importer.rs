use mailcraft_model::{
    ButtonProps, ColumnsProps, Component, ComponentProps, ContainerProps, DividerProps,
    HeaderProps, IdGenerator, ImageProps, TextAlign, TextProps,
};
use scraper::{ElementRef, Html, Node};
use tracing::{debug, info, instrument};

use crate::error::ImportError;
use crate::styles::ExtractedStyles;

/// Elements whose content is never email content
const SKIPPED_TAGS: [&str; 8] = [
    "script", "style", "noscript", "template", "head", "title", "meta", "link",
];

/// Longest link text still treated as a button label
const BUTTON_TEXT_LIMIT: usize = 30;

/// Converts HTML into components, drawing ids from a shared generator
pub struct HtmlImporter<'a> {
    ids: &'a mut IdGenerator,
}

impl<'a> HtmlImporter<'a> {
    pub fn new(ids: &'a mut IdGenerator) -> Self {
        Self { ids }
    }

    /// Import a pasted HTML document or fragment.
    ///
    /// Fails only on empty or whitespace-only input.
    #[instrument(skip_all, fields(bytes = html.len()))]
    pub fn import(&mut self, html: &str) -> Result<Vec<Component>, ImportError> {
        if html.trim().is_empty() {
            return Err(ImportError::EmptyInput);
        }

        let document = Html::parse_document(html);
        let root = document.root_element();
        let body = root
            .children()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "body")
            .unwrap_or(root);

        let components = self.parse_children(&body);
        info!(
            roots = components.len(),
            nodes = mailcraft_model::count_nodes(&components),
            "Imported HTML"
        );
        Ok(components)
    }

    fn parse_children(&mut self, element: &ElementRef) -> Vec<Component> {
        let mut components = Vec::new();

        for child in element.children() {
            match child.value() {
                Node::Text(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        components.push(self.plain_text(text));
                    }
                }
                Node::Element(_) => {
                    if let Some(el) = ElementRef::wrap(child) {
                        self.parse_element(&el, &mut components);
                    }
                }
                _ => {}
            }
        }

        components
    }

    fn parse_element(&mut self, el: &ElementRef, out: &mut Vec<Component>) {
        let tag = el.value().name();

        match tag {
            _ if SKIPPED_TAGS.contains(&tag) => {}

            "div" | "section" => {
                let styles = ExtractedStyles::from_element(el);
                if has_element_children(el) || has_background(&styles) {
                    out.push(self.container(el, &styles));
                } else {
                    debug!(tag, "Splicing childless block into parent");
                    out.extend(self.parse_children(el));
                }
            }

            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => out.push(self.header(el)),

            "p" => out.push(self.rich_text(el, el.inner_html())),

            "img" => out.push(self.image(el)),

            "a" => {
                if is_button(el) {
                    out.push(self.button(el));
                } else {
                    debug!("Link does not look like a button; importing as text");
                    out.push(self.rich_text(el, el.inner_html()));
                }
            }

            "hr" => out.push(self.divider(el)),

            "table" => {
                if let Some(cells) = column_cells(el) {
                    out.push(self.columns(cells));
                } else {
                    let styles = ExtractedStyles::from_element(el);
                    out.push(self.container(el, &styles));
                }
            }

            "ul" | "ol" => out.push(self.rich_text(el, el.html())),

            _ => {
                let children = self.parse_children(el);
                if !children.is_empty() {
                    out.extend(children);
                } else if !text_of(el).is_empty() {
                    out.push(self.rich_text(el, el.inner_html()));
                }
            }
        }
    }

    fn plain_text(&mut self, text: &str) -> Component {
        let props = TextProps {
            content: text.to_string(),
            rich_content: escape_text(text),
            ..Default::default()
        };
        Component::with_props(self.ids.new_id(), ComponentProps::Text(props))
    }

    fn rich_text(&mut self, el: &ElementRef, markup: String) -> Component {
        let styles = ExtractedStyles::from_element(el);
        let defaults = TextProps::default();
        let props = TextProps {
            content: text_of(el),
            rich_content: markup,
            color: styles.get("color").map(str::to_string).unwrap_or(defaults.color),
            font_size: styles.int("font-size").unwrap_or(defaults.font_size),
            text_align: text_align(&styles).unwrap_or(defaults.text_align),
            padding: styles.int("padding").unwrap_or(defaults.padding),
            font_family: styles
                .get("font-family")
                .map(str::to_string)
                .unwrap_or(defaults.font_family),
            positioning: defaults.positioning,
        };
        Component::with_props(self.ids.new_id(), ComponentProps::Text(props))
    }

    fn header(&mut self, el: &ElementRef) -> Component {
        let styles = ExtractedStyles::from_element(el);
        let level = el.value().name()[1..].parse::<u8>().unwrap_or(2);
        let defaults = HeaderProps::default();
        let content = text_of(el);

        let props = HeaderProps {
            content: if content.is_empty() {
                defaults.content
            } else {
                content
            },
            rich_content: el.inner_html(),
            color: styles.get("color").map(str::to_string).unwrap_or(defaults.color),
            font_size: styles
                .int("font-size")
                .unwrap_or_else(|| 24u32.saturating_sub((u32::from(level) - 1) * 2)),
            text_align: text_align(&styles).unwrap_or(defaults.text_align),
            padding: styles.int("padding").unwrap_or(defaults.padding),
            font_family: styles
                .get("font-family")
                .map(str::to_string)
                .unwrap_or(defaults.font_family),
            header_level: level,
            positioning: defaults.positioning,
        };
        Component::with_props(self.ids.new_id(), ComponentProps::Header(props))
    }

    fn image(&mut self, el: &ElementRef) -> Component {
        let styles = ExtractedStyles::from_element(el);
        let defaults = ImageProps::default();
        let attr = |name: &str| {
            el.value()
                .attr(name)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let props = ImageProps {
            src: attr("src").unwrap_or(defaults.src),
            alt: attr("alt").unwrap_or_else(|| "Image".to_string()),
            width: inline(&styles, "width").unwrap_or(defaults.width),
            height: inline(&styles, "height").unwrap_or(defaults.height),
            padding: defaults.padding,
            positioning: defaults.positioning,
        };
        Component::with_props(self.ids.new_id(), ComponentProps::Image(props))
    }

    fn button(&mut self, el: &ElementRef) -> Component {
        let styles = ExtractedStyles::from_element(el);
        let defaults = ButtonProps::default();
        let text = text_of(el);
        let url = el
            .value()
            .attr("href")
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        let props = ButtonProps {
            text: if text.is_empty() { defaults.text } else { text },
            url: url.unwrap_or(defaults.url),
            background_color: styles
                .get("background-color")
                .map(str::to_string)
                .unwrap_or(defaults.background_color),
            color: styles.get("color").map(str::to_string).unwrap_or(defaults.color),
            padding: styles.int("padding").unwrap_or(defaults.padding),
            border_radius: styles.int("border-radius").unwrap_or(defaults.border_radius),
            text_align: TextAlign::Center,
            positioning: defaults.positioning,
        };
        Component::with_props(self.ids.new_id(), ComponentProps::Button(props))
    }

    fn container(&mut self, el: &ElementRef, styles: &ExtractedStyles) -> Component {
        let defaults = ContainerProps::default();
        let id = self.ids.new_id();
        let children = self.parse_children(el);

        let props = ContainerProps {
            background_color: styles
                .get("background-color")
                .map(str::to_string)
                .unwrap_or(defaults.background_color),
            padding: styles.int("padding").unwrap_or(defaults.padding),
            width: styles.get("width").map(str::to_string).unwrap_or(defaults.width),
            height: String::new(),
            positioning: defaults.positioning,
        };
        Component::with_props(id, ComponentProps::Container(props)).with_children(children)
    }

    fn divider(&mut self, el: &ElementRef) -> Component {
        let styles = ExtractedStyles::from_element(el);
        let defaults = DividerProps::default();

        let props = DividerProps {
            color: styles
                .get("border-color")
                .map(str::to_string)
                .unwrap_or(defaults.color),
            thickness: styles.int("border-width").unwrap_or(defaults.thickness),
            margin: defaults.margin,
            positioning: defaults.positioning,
        };
        Component::with_props(self.ids.new_id(), ComponentProps::Divider(props))
    }

    /// One column per cell; empty cells are dropped and multi-component
    /// cells are wrapped in an unpadded container.
    fn columns(&mut self, cells: Vec<ElementRef>) -> Component {
        let id = self.ids.new_id();
        let column_count = cells.len();

        let mut children = Vec::new();
        for cell in &cells {
            let mut parsed = self.parse_children(cell);
            match parsed.len() {
                0 => {}
                1 => children.append(&mut parsed),
                _ => {
                    let wrapper = ContainerProps {
                        padding: 0,
                        ..Default::default()
                    };
                    children.push(
                        Component::with_props(self.ids.new_id(), ComponentProps::Container(wrapper))
                            .with_children(parsed),
                    );
                }
            }
        }

        debug!(
            columns = column_count,
            filled = children.len(),
            "Importing single-row table as columns"
        );

        let props = ColumnsProps {
            columns: u32::try_from(column_count).unwrap_or(u32::MAX),
            ..Default::default()
        };
        Component::with_props(id, ComponentProps::Columns(props)).with_children(children)
    }
}

/// Import HTML with a fresh session id generator
pub fn import_html(html: &str) -> Result<Vec<Component>, ImportError> {
    let mut ids = IdGenerator::session();
    HtmlImporter::new(&mut ids).import(html)
}

fn has_element_children(el: &ElementRef) -> bool {
    el.children().any(|child| child.value().is_element())
}

fn has_background(styles: &ExtractedStyles) -> bool {
    styles.has_inline("background-color") || styles.has_inline("background")
}

/// Button-like styling first, then short non-empty link text
fn is_button(el: &ElementRef) -> bool {
    let styles = ExtractedStyles::from_element(el);
    let styled = ["background-color", "background", "border", "border-radius", "padding"]
        .iter()
        .any(|property| styles.has_inline(property));
    let has_button_class = el
        .value()
        .attr("class")
        .map(|classes| classes.split_whitespace().any(|c| c == "button"))
        .unwrap_or(false);
    let has_button_role = el.value().attr("role") == Some("button");

    if styled || has_button_class || has_button_role {
        return true;
    }

    let text = text_of(el);
    !text.is_empty() && text.chars().count() < BUTTON_TEXT_LIMIT
}

/// Cells of the only row when a table is a single row with several cells
fn column_cells<'a>(table: &ElementRef<'a>) -> Option<Vec<ElementRef<'a>>> {
    let mut rows = table
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "tr");
    let row = rows.next()?;
    if rows.next().is_some() {
        return None;
    }

    let cells: Vec<ElementRef<'a>> = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "td" | "th"))
        .collect();
    (cells.len() > 1).then_some(cells)
}

fn text_of(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn text_align(styles: &ExtractedStyles) -> Option<TextAlign> {
    styles.get("text-align").and_then(TextAlign::from_css)
}

/// Only the element's own `style` attribute sizes an image
fn inline(styles: &ExtractedStyles, property: &str) -> Option<String> {
    if styles.has_inline(property) {
        styles.get(property).map(str::to_string)
    } else {
        None
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
