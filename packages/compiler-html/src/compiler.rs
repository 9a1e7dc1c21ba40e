use std::fmt::Display;

use mailcraft_model::{
    ButtonProps, ColumnsProps, Component, ComponentProps, ContainerProps, EmailTemplate,
    FlexAlign, HeaderProps, MergeTag, Positioning, SocialProps, SocialShape, TextProps,
    UnsubscribeProps,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::merge_tags::substitute_merge_tags;
use crate::social_icons::icon_svg;

/// Options for HTML compilation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Document `<title>`
    pub title: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            title: "Email Template".to_string(),
        }
    }
}

struct Context<'a> {
    options: CompileOptions,
    merge_tags: &'a [MergeTag],
    nominal_width_px: u32,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: CompileOptions, template: &'a EmailTemplate) -> Self {
        Self {
            options,
            merge_tags: &template.merge_tags,
            nominal_width_px: template.styles.nominal_width_px(),
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn merge(&self, text: &str) -> String {
        substitute_merge_tags(text, self.merge_tags)
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Inline CSS declarations for a `style` attribute
#[derive(Default)]
struct Style(Vec<String>);

impl Style {
    fn new() -> Self {
        Self::default()
    }

    /// Add a declaration; empty values are dropped
    fn decl(mut self, property: &str, value: impl Display) -> Self {
        let value = value.to_string();
        if !value.trim().is_empty() {
            self.0.push(format!("{}: {}", property, value));
        }
        self
    }

    fn px(self, property: &str, value: u32) -> Self {
        self.decl(property, format!("{}px", value))
    }

    fn raw(mut self, declarations: &str) -> Self {
        self.0.push(declarations.to_string());
        self
    }

    /// Position, offsets and z-index, only for non-static positioning
    fn positioning(mut self, positioning: &Positioning) -> Self {
        if positioning.is_static() {
            return self;
        }
        self = self
            .decl("position", positioning.position.as_str())
            .decl("top", &positioning.top)
            .decl("left", &positioning.left)
            .decl("right", &positioning.right)
            .decl("bottom", &positioning.bottom);
        if let Some(z_index) = positioning.z_index {
            self = self.decl("z-index", z_index);
        }
        self
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Escaped attribute value
    fn render(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        escape_html(&format!("{};", self.0.join("; ")))
    }
}

/// Compile a template with the default options
pub fn compile(template: &EmailTemplate) -> String {
    compile_to_html(template, &CompileOptions::default())
}

/// Compile a template to a standalone HTML email document
#[instrument(skip_all, fields(components = template.components.len()))]
pub fn compile_to_html(template: &EmailTemplate, options: &CompileOptions) -> String {
    let mut ctx = Context::new(options.clone(), template);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    compile_head(template, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();
    ctx.add_line("<div class=\"email-container\">");
    ctx.indent();

    for component in &template.components {
        compile_component(component, &mut ctx);
    }

    ctx.dedent();
    ctx.add_line("</div>");
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    let html = ctx.get_output();
    info!(bytes = html.len(), "Compiled email template");
    html
}

fn compile_head(template: &EmailTemplate, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"utf-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    let title = escape_html(&ctx.options.title);
    ctx.add_line(&format!("<title>{}</title>", title));

    ctx.add_line("<style>");
    ctx.indent();
    compile_css_rule(
        ctx,
        "body",
        &[
            format!("font-family: {}", css_text(&template.styles.font_family)),
            "margin: 0".to_string(),
            "padding: 0".to_string(),
            format!(
                "background-color: {}",
                css_text(&template.styles.background_color)
            ),
        ],
    );
    compile_css_rule(
        ctx,
        ".email-container",
        &[
            format!("max-width: {}", css_text(&template.styles.width)),
            "margin: 0 auto".to_string(),
            "background-color: #ffffff".to_string(),
            "overflow: hidden".to_string(),
            "position: relative".to_string(),
        ],
    );
    compile_css_rule(
        ctx,
        "table",
        &owned(&[
            "border-collapse: collapse",
            "mso-table-lspace: 0pt",
            "mso-table-rspace: 0pt",
            "width: 100%",
        ]),
    );
    compile_css_rule(
        ctx,
        "img",
        &owned(&["-ms-interpolation-mode: bicubic", "max-width: 100%"]),
    );
    compile_css_rule(
        ctx,
        "td",
        &owned(&["word-break: break-word", "overflow-wrap: break-word"]),
    );

    ctx.add_line("@media only screen and (max-width: 600px) {");
    ctx.indent();
    compile_css_rule(ctx, ".email-container", &owned(&["width: 100% !important"]));
    compile_css_rule(
        ctx,
        ".responsive-table",
        &owned(&["width: 100% !important", "display: table !important"]),
    );
    compile_css_rule(
        ctx,
        ".responsive-table tr",
        &owned(&["display: table-row !important"]),
    );
    compile_css_rule(
        ctx,
        ".responsive-column",
        &owned(&[
            "display: block !important",
            "width: 100% !important",
            "padding-right: 0 !important",
            "padding-left: 0 !important",
            "margin-bottom: 20px !important",
            "box-sizing: border-box !important",
        ]),
    );
    ctx.dedent();
    ctx.add_line("}");

    ctx.dedent();
    ctx.add_line("</style>");

    ctx.dedent();
    ctx.add_line("</head>");
}

fn compile_css_rule(ctx: &mut Context, selector: &str, declarations: &[String]) {
    ctx.add_line(&format!("{} {{", selector));
    ctx.indent();
    for declaration in declarations {
        ctx.add_line(&format!("{};", declaration));
    }
    ctx.dedent();
    ctx.add_line("}");
}

fn owned(declarations: &[&str]) -> Vec<String> {
    declarations.iter().map(|d| d.to_string()).collect()
}

fn compile_component(component: &Component, ctx: &mut Context) {
    match &component.props {
        ComponentProps::Text(props) => compile_text(props, ctx),
        ComponentProps::Header(props) => compile_header(props, ctx),
        ComponentProps::Image(props) => {
            let style = Style::new()
                .decl("width", &props.width)
                .decl("height", &props.height)
                .px("padding", props.padding)
                .positioning(&props.positioning);
            ctx.add_line(&format!(
                "<img src=\"{}\" alt=\"{}\" style=\"{}\" />",
                escape_html(&props.src),
                escape_html(&props.alt),
                style.render()
            ));
        }
        ComponentProps::Button(props) => compile_button(props, ctx),
        ComponentProps::Container(props) => compile_container(props, &component.children, ctx),
        ComponentProps::Divider(props) => {
            let style = Style::new()
                .decl(
                    "border",
                    format!("{}px solid {}", props.thickness, props.color).trim_end(),
                )
                .decl("margin", format!("{}px 0", props.margin))
                .positioning(&props.positioning);
            ctx.add_line(&format!("<hr style=\"{}\" />", style.render()));
        }
        ComponentProps::Columns(props) => compile_columns(props, &component.children, ctx),
        ComponentProps::Spacer(props) => {
            let style = Style::new()
                .px("height", props.height)
                .positioning(&props.positioning);
            ctx.add_line(&format!("<div style=\"{}\"></div>", style.render()));
        }
        ComponentProps::Social(props) => compile_social(props, ctx),
        ComponentProps::Unsubscribe(props) => compile_unsubscribe(props, ctx),
    }
}

/// Rich content is trusted markup; plain content is escaped
fn content_html(ctx: &Context, rich_content: &str, content: &str) -> String {
    if !rich_content.trim().is_empty() {
        ctx.merge(rich_content)
    } else {
        escape_html(&ctx.merge(content))
    }
}

fn compile_text(props: &TextProps, ctx: &mut Context) {
    let style = Style::new()
        .px("padding", props.padding)
        .decl("font-family", &props.font_family)
        .decl("color", &props.color)
        .px("font-size", props.font_size)
        .decl("text-align", props.text_align.as_str())
        .positioning(&props.positioning);
    let content = content_html(ctx, &props.rich_content, &props.content);
    ctx.add_line(&format!("<div style=\"{}\">{}</div>", style.render(), content));
}

fn compile_header(props: &HeaderProps, ctx: &mut Context) {
    let level = props.level();
    let style = Style::new()
        .decl("color", &props.color)
        .px("font-size", props.font_size)
        .decl("text-align", props.text_align.as_str())
        .px("padding", props.padding)
        .raw("margin: 0")
        .decl("font-family", &props.font_family)
        .positioning(&props.positioning);
    let content = content_html(ctx, &props.rich_content, &props.content);
    ctx.add_line(&format!(
        "<h{level} style=\"{}\">{}</h{level}>",
        style.render(),
        content,
        level = level
    ));
}

fn compile_button(props: &ButtonProps, ctx: &mut Context) {
    let style = Style::new()
        .raw("display: inline-block")
        .decl("background-color", &props.background_color)
        .decl("color", &props.color)
        .px("padding", props.padding)
        .raw("text-decoration: none")
        .px("border-radius", props.border_radius)
        .decl("text-align", props.text_align.as_str())
        .positioning(&props.positioning);
    let text = escape_html(&ctx.merge(&props.text));
    ctx.add_line(&format!(
        "<a href=\"{}\" style=\"{}\">{}</a>",
        escape_html(&props.url),
        style.render(),
        text
    ));
}

fn compile_container(props: &ContainerProps, children: &[Component], ctx: &mut Context) {
    let style = Style::new()
        .decl("background-color", &props.background_color)
        .px("padding", props.padding)
        .decl("width", &props.width)
        .decl("height", &props.height)
        .positioning(&props.positioning);

    ctx.add_line(&format!("<div style=\"{}\">", style.render()));
    ctx.indent();
    for child in children {
        compile_component(child, ctx);
    }
    ctx.dedent();
    ctx.add_line("</div>");
}

fn compile_columns(props: &ColumnsProps, children: &[Component], ctx: &mut Context) {
    let slots = props.slot_count();
    if children.len() > slots {
        debug!(
            columns = slots,
            children = children.len(),
            "Skipping children beyond the column count"
        );
    }

    let class = if props.stack_on_mobile {
        " class=\"responsive-table\""
    } else {
        ""
    };
    let outer_style = Style::new().positioning(&props.positioning);
    let outer_style = if outer_style.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", outer_style.render())
    };
    ctx.add_line(&format!(
        "<table cellpadding=\"0\" cellspacing=\"0\" border=\"0\" width=\"100%\"{}{}>",
        class, outer_style
    ));
    ctx.indent();
    ctx.add_line("<tr>");
    ctx.indent();

    let cell_style = Style::new()
        .px("padding", props.padding)
        .decl("background-color", &props.background_color);
    ctx.add_line(&format!("<td style=\"{}\">", cell_style.render()));
    ctx.indent();
    ctx.add_line("<table cellpadding=\"0\" cellspacing=\"0\" border=\"0\" width=\"100%\">");
    ctx.indent();
    ctx.add_line(&format!(
        "<tr valign=\"top\" style=\"vertical-align: {};\">",
        vertical_align(props.vertical_align)
    ));
    ctx.indent();

    let width = column_width_percent(slots, props.column_gap, ctx.nominal_width_px);
    let column_class = if props.stack_on_mobile {
        " class=\"responsive-column\""
    } else {
        ""
    };

    for slot in 0..slots {
        let mut style = Style::new();
        if slot + 1 < slots {
            style = style.px("padding-right", props.column_gap);
        }
        let style = style
            .raw("word-break: break-word")
            .raw("overflow-wrap: break-word");

        ctx.add_line(&format!(
            "<td width=\"{:.2}%\"{} style=\"{}\" align=\"{}\">",
            width,
            column_class,
            style.render(),
            horizontal_align(props.horizontal_align)
        ));
        ctx.indent();
        match children.get(slot) {
            Some(child) => compile_component(child, ctx),
            None => ctx.add_line("&nbsp;"),
        }
        ctx.dedent();
        ctx.add_line("</td>");
    }

    ctx.dedent();
    ctx.add_line("</tr>");
    ctx.dedent();
    ctx.add_line("</table>");
    ctx.dedent();
    ctx.add_line("</td>");
    ctx.dedent();
    ctx.add_line("</tr>");
    ctx.dedent();
    ctx.add_line("</table>");
}

/// Width of one column cell as a percentage of the row.
///
/// Gaps are pixel values, converted to a share of the nominal email width.
fn column_width_percent(slots: usize, gap: u32, nominal_width_px: u32) -> f64 {
    let slots = slots.max(1) as f64;
    let nominal = f64::from(nominal_width_px.max(1));
    let total_gap = (slots - 1.0) * f64::from(gap) / nominal * 100.0;
    (100.0 - total_gap) / slots
}

fn vertical_align(align: FlexAlign) -> &'static str {
    match align {
        FlexAlign::FlexStart => "top",
        FlexAlign::Center => "middle",
        FlexAlign::FlexEnd => "bottom",
        _ => "top",
    }
}

fn horizontal_align(align: FlexAlign) -> &'static str {
    match align {
        FlexAlign::Center => "center",
        FlexAlign::FlexEnd => "right",
        _ => "left",
    }
}

fn compile_social(props: &SocialProps, ctx: &mut Context) {
    let style = Style::new()
        .decl("text-align", props.text_align.as_str())
        .px("padding", props.padding)
        .positioning(&props.positioning);
    ctx.add_line(&format!("<div style=\"{}\">", style.render()));
    ctx.indent();

    let radius = match props.social_shape {
        SocialShape::Circle => "50%",
        SocialShape::Rounded => "8px",
        SocialShape::Square => "0",
    };
    let icon_size = (f64::from(props.social_size) * 0.6).floor() as u32;

    for link in props.social_links.iter().filter(|link| link.enabled) {
        let anchor_style = Style::new()
            .raw("display: inline-block")
            .decl("margin", format!("0 {}px", props.social_spacing))
            .raw("text-decoration: none");
        let badge_style = Style::new()
            .decl("background-color", &props.social_background_color)
            .px("width", props.social_size)
            .px("height", props.social_size)
            .decl("border-radius", radius)
            .raw("display: flex")
            .raw("align-items: center")
            .raw("justify-content: center");

        ctx.add_line(&format!(
            "<a href=\"{}\" target=\"_blank\" style=\"{}\">",
            escape_html(&link.url),
            anchor_style.render()
        ));
        ctx.indent();
        ctx.add_line(&format!(
            "<div style=\"{}\">{}</div>",
            badge_style.render(),
            icon_svg(link.platform, &props.social_color, icon_size)
        ));
        ctx.dedent();
        ctx.add_line("</a>");
    }

    ctx.dedent();
    ctx.add_line("</div>");
}

fn compile_unsubscribe(props: &UnsubscribeProps, ctx: &mut Context) {
    let style = Style::new()
        .decl("text-align", props.text_align.as_str())
        .px("padding", props.padding)
        .positioning(&props.positioning);
    let link_style = Style::new()
        .decl("color", &props.color)
        .px("font-size", props.font_size)
        .raw("text-decoration: underline");
    let text = escape_html(&ctx.merge(&props.unsubscribe_text));

    ctx.add_line(&format!("<div style=\"{}\">", style.render()));
    ctx.indent();
    ctx.add_line(&format!(
        "<a href=\"{}\" style=\"{}\">{}</a>",
        escape_html(&props.unsubscribe_url),
        link_style.render(),
        text
    ));
    ctx.dedent();
    ctx.add_line("</div>");
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Value for the `<style>` element, which is raw text and cannot be escaped
fn css_text(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}' | ';'))
        .collect()
}
