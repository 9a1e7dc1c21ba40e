use crate::{compile, compile_to_html, CompileOptions};
use mailcraft_model::{
    defaults_for, ColumnsProps, Component, ComponentId, ComponentProps, ComponentType,
    EmailTemplate, FlexAlign, IdGenerator, MergeTag, Position, Positioning, SocialPlatform,
    SocialProps, SocialShape, TextProps,
};

fn template_with(components: Vec<Component>) -> EmailTemplate {
    let mut template = EmailTemplate::default();
    template.components = components;
    template
}

fn node(id: &str, component_type: ComponentType) -> Component {
    Component::new(ComponentId::from(id), component_type)
}

fn text(id: &str, content: &str) -> Component {
    Component::with_props(
        ComponentId::from(id),
        ComponentProps::Text(TextProps {
            content: content.to_string(),
            rich_content: String::new(),
            ..Default::default()
        }),
    )
}

#[test]
fn test_compile_empty_template_has_document_shell() {
    let html = compile(&EmailTemplate::default());

    println!("Generated HTML:\n{}", html);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<meta charset=\"utf-8\">"));
    assert!(html.contains("<title>Email Template</title>"));
    assert!(html.contains("font-family: Inter, sans-serif;"));
    assert!(html.contains("max-width: 600px;"));
    assert!(html.contains("@media only screen and (max-width: 600px) {"));
    assert!(html.contains(".responsive-column {"));
    assert!(html.contains("<div class=\"email-container\">"));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn test_merge_tag_substitution_in_text() {
    let mut ids = IdGenerator::new("compiler-tests");
    let mut template = template_with(vec![text("t1", "Hi {{firstName}}")]);
    template
        .merge_tags
        .push(MergeTag::new(&mut ids, "{{firstName}}", "Ada"));

    let html = compile(&template);

    assert!(html.contains("Hi Ada"));
    assert!(!html.contains("{{firstName}}"));
}

#[test]
fn test_rich_content_preferred_and_substituted() {
    let mut ids = IdGenerator::new("compiler-tests");
    let mut template = template_with(vec![Component::with_props(
        ComponentId::from("t1"),
        ComponentProps::Text(TextProps {
            content: "plain".to_string(),
            rich_content: "<p><strong>Hello {{firstName}}</strong></p>".to_string(),
            ..Default::default()
        }),
    )]);
    template
        .merge_tags
        .push(MergeTag::new(&mut ids, "{{firstName}}", "Ada"));

    let html = compile(&template);

    assert!(html.contains("<p><strong>Hello Ada</strong></p>"));
    assert!(!html.contains(">plain<"));
}

#[test]
fn test_plain_text_is_escaped() {
    let template = template_with(vec![text("t1", "Fish & <Chips>")]);

    let html = compile(&template);

    assert!(html.contains("Fish &amp; &lt;Chips&gt;"));
}

#[test]
fn test_columns_render_one_cell_per_slot() {
    let columns = Component::with_props(
        ComponentId::from("cols"),
        ComponentProps::Columns(ColumnsProps {
            columns: 3,
            ..Default::default()
        }),
    )
    .with_children(vec![node("b1", ComponentType::Button)]);
    let template = template_with(vec![columns]);

    let html = compile(&template);

    println!("Generated HTML:\n{}", html);

    assert_eq!(html.matches("<td width=\"").count(), 3);
    assert_eq!(html.matches("&nbsp;").count(), 2);
    assert_eq!(html.matches("class=\"responsive-column\"").count(), 3);
    assert!(html.contains("class=\"responsive-table\""));
    // Gap on every cell but the last
    assert_eq!(html.matches("padding-right: 20px;").count(), 2);
    assert!(html.contains("Click Me"));
}

#[test]
fn test_columns_ignore_children_beyond_count() {
    let columns = Component::with_props(
        ComponentId::from("cols"),
        ComponentProps::Columns(ColumnsProps {
            columns: 1,
            stack_on_mobile: false,
            vertical_align: FlexAlign::Center,
            horizontal_align: FlexAlign::FlexEnd,
            ..Default::default()
        }),
    )
    .with_children(vec![text("a", "First"), text("b", "Second")]);
    let template = template_with(vec![columns]);

    let html = compile(&template);

    assert!(html.contains("First"));
    assert!(!html.contains("Second"));
    assert!(html.contains("width=\"100.00%\""));
    assert!(html.contains("vertical-align: middle;"));
    assert!(html.contains("align=\"right\""));
    assert!(!html.contains("class=\"responsive-column\""));
}

#[test]
fn test_social_renders_only_enabled_links() {
    let mut social = SocialProps {
        social_shape: SocialShape::Rounded,
        social_size: 40,
        ..Default::default()
    };
    for link in social.social_links.iter_mut() {
        link.enabled = !matches!(
            link.platform,
            SocialPlatform::Youtube | SocialPlatform::Github
        );
    }
    let template = template_with(vec![Component::with_props(
        ComponentId::from("s"),
        ComponentProps::Social(social),
    )]);

    let html = compile(&template);

    assert_eq!(html.matches("target=\"_blank\"").count(), 5);
    assert_eq!(html.matches("<svg").count(), 5);
    assert!(html.contains("border-radius: 8px;"));
    assert!(html.contains("width=\"24\" height=\"24\""));
    assert!(html.contains("stroke-width=\"2\""));
    assert!(!html.contains("https://github.com"));
}

#[test]
fn test_position_css_only_when_not_static() {
    let mut props = TextProps::default();
    let static_html = compile(&template_with(vec![Component::with_props(
        ComponentId::from("a"),
        ComponentProps::Text(props.clone()),
    )]));
    // Only the container rule in the <style> block
    assert_eq!(static_html.matches("position:").count(), 1);

    props.positioning = Positioning {
        position: Position::Absolute,
        top: "10px".to_string(),
        z_index: Some(2),
        ..Default::default()
    };
    let html = compile(&template_with(vec![Component::with_props(
        ComponentId::from("a"),
        ComponentProps::Text(props),
    )]));

    assert!(html.contains("position: absolute; top: 10px; z-index: 2;"));
    assert!(!html.contains("; left:"));
}

#[test]
fn test_every_variant_compiles() {
    let components: Vec<Component> = ComponentType::ALL
        .iter()
        .enumerate()
        .map(|(i, ty)| Component::with_props(ComponentId::new(format!("c{}", i)), defaults_for(*ty)))
        .collect();
    let html = compile(&template_with(components));

    assert!(html.contains("<h2 style="));
    assert!(html.contains("<img src=\"/placeholder.svg?height=200&amp;width=400\""));
    assert!(html.contains("<hr style=\"border: 1px solid #E2E8F0; margin: 10px 0;\" />"));
    assert!(html.contains("<div style=\"height: 20px;\"></div>"));
    assert!(html.contains("Unsubscribe from this list"));
    assert!(html.contains("text-decoration: underline;"));
    assert!(!html.contains("undefined"));
    assert!(!html.contains("NaN"));
}

#[test]
fn test_compact_output() {
    let template = template_with(vec![node("d", ComponentType::Divider)]);
    let options = CompileOptions {
        pretty: false,
        ..Default::default()
    };

    let html = compile_to_html(&template, &options);

    assert!(!html.contains('\n'));
    assert!(html.contains("<hr style="));
}

#[test]
fn test_compile_does_not_mutate_template() {
    let template = template_with(vec![text("t1", "Hello")]);
    let before = template.clone();

    let _ = compile(&template);

    assert_eq!(template, before);
}
