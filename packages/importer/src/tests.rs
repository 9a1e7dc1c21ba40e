use crate::{import_html, HtmlImporter, ImportError};
use mailcraft_model::{collect_ids, Component, ComponentProps, ComponentType, IdGenerator};

fn import(html: &str) -> Vec<Component> {
    let mut ids = IdGenerator::new("importer-tests");
    HtmlImporter::new(&mut ids)
        .import(html)
        .expect("Failed to import")
}

fn types(components: &[Component]) -> Vec<ComponentType> {
    components.iter().map(Component::component_type).collect()
}

#[test]
fn test_empty_input_is_rejected() {
    assert_eq!(import_html(""), Err(ImportError::EmptyInput));
    assert_eq!(import_html("  \n\t "), Err(ImportError::EmptyInput));
    assert_eq!(
        ImportError::EmptyInput.to_string(),
        "Please enter HTML content to import"
    );
}

#[test]
fn test_basic_elements() {
    let components = import(
        r#"<h1>Welcome</h1><p>Body copy</p><img src="a.png" alt="A"><hr><a href="/go">Go</a>"#,
    );

    assert_eq!(
        types(&components),
        vec![
            ComponentType::Header,
            ComponentType::Text,
            ComponentType::Image,
            ComponentType::Divider,
            ComponentType::Button,
        ]
    );

    match &components[0].props {
        ComponentProps::Header(header) => {
            assert_eq!(header.header_level, 1);
            assert_eq!(header.content, "Welcome");
            assert_eq!(header.font_size, 24);
        }
        other => panic!("expected header, got {:?}", other),
    }
    match &components[2].props {
        ComponentProps::Image(image) => {
            assert_eq!(image.src, "a.png");
            assert_eq!(image.alt, "A");
            assert_eq!(image.width, "100%");
        }
        other => panic!("expected image, got {:?}", other),
    }
    match &components[4].props {
        ComponentProps::Button(button) => {
            assert_eq!(button.text, "Go");
            assert_eq!(button.url, "/go");
        }
        other => panic!("expected button, got {:?}", other),
    }
}

#[test]
fn test_header_font_size_follows_level() {
    let components = import("<h4>Small</h4>");

    match &components[0].props {
        ComponentProps::Header(header) => {
            assert_eq!(header.header_level, 4);
            assert_eq!(header.font_size, 18);
        }
        other => panic!("expected header, got {:?}", other),
    }
}

#[test]
fn test_paragraph_styles_are_extracted() {
    let components = import(
        r#"<p style="color: #ff0000; font-size: 20px; text-align: center; padding: 4px 8px">Hi <b>there</b></p>"#,
    );

    match &components[0].props {
        ComponentProps::Text(text) => {
            assert_eq!(text.rich_content, "Hi <b>there</b>");
            assert_eq!(text.content, "Hi there");
            assert_eq!(text.color, "#ff0000");
            assert_eq!(text.font_size, 20);
            assert_eq!(text.padding, 4);
            assert_eq!(text.text_align.as_str(), "center");
        }
        other => panic!("expected text, got {:?}", other),
    }
}

#[test]
fn test_long_plain_link_is_text() {
    let components = import(
        r#"<a href="/terms">Read the complete terms and conditions of this offer</a>"#,
    );

    assert_eq!(types(&components), vec![ComponentType::Text]);
}

#[test]
fn test_styled_long_link_is_button() {
    let components = import(
        r#"<a href="/buy" style="background-color: #111; border-radius: 6px">Buy the complete bundle before the offer ends</a>"#,
    );

    match &components[0].props {
        ComponentProps::Button(button) => {
            assert_eq!(button.background_color, "#111");
            assert_eq!(button.border_radius, 6);
        }
        other => panic!("expected button, got {:?}", other),
    }
}

#[test]
fn test_childless_div_is_spliced() {
    let components = import("<div>Just text</div><section></section>");

    assert_eq!(types(&components), vec![ComponentType::Text]);
}

#[test]
fn test_div_with_background_is_container() {
    let components = import(r#"<div style="background: #eeeeee">Note</div>"#);

    assert_eq!(types(&components), vec![ComponentType::Container]);
    match &components[0].props {
        ComponentProps::Container(container) => {
            assert_eq!(container.background_color, "#eeeeee");
        }
        other => panic!("expected container, got {:?}", other),
    }
    assert_eq!(types(&components[0].children), vec![ComponentType::Text]);
}

#[test]
fn test_bgcolor_attribute_alone_does_not_make_container() {
    let components = import(r##"<div bgcolor="#eeeeee">Note</div>"##);

    assert_eq!(types(&components), vec![ComponentType::Text]);
}

#[test]
fn test_single_row_table_becomes_columns() {
    let components = import(
        r#"<table><tr><td><p>Left</p></td><td></td><td><h2>A</h2><p>B</p></td></tr></table>"#,
    );

    assert_eq!(types(&components), vec![ComponentType::Columns]);
    let columns = &components[0];
    match &columns.props {
        ComponentProps::Columns(props) => assert_eq!(props.columns, 3),
        other => panic!("expected columns, got {:?}", other),
    }
    // Empty cell skipped, multi-component cell wrapped
    assert_eq!(
        types(&columns.children),
        vec![ComponentType::Text, ComponentType::Container]
    );
    match &columns.children[1].props {
        ComponentProps::Container(wrapper) => assert_eq!(wrapper.padding, 0),
        other => panic!("expected container, got {:?}", other),
    }
    assert_eq!(columns.children[1].children.len(), 2);
}

#[test]
fn test_multi_row_table_becomes_container() {
    let components =
        import("<table><tr><td>One</td><td>Two</td></tr><tr><td>Three</td></tr></table>");

    assert_eq!(types(&components), vec![ComponentType::Container]);
    assert_eq!(components[0].children.len(), 3);
}

#[test]
fn test_lists_keep_their_markup() {
    let components = import("<ul><li>One</li><li>Two</li></ul>");

    match &components[0].props {
        ComponentProps::Text(text) => {
            assert!(text.rich_content.starts_with("<ul>"));
            assert!(text.rich_content.contains("<li>Two</li>"));
        }
        other => panic!("expected text, got {:?}", other),
    }
}

#[test]
fn test_scripts_and_styles_are_ignored() {
    let components = import(
        "<style>p { color: red; }</style><script>alert('x')</script><p>Visible</p>",
    );

    assert_eq!(types(&components), vec![ComponentType::Text]);
}

#[test]
fn test_whitespace_and_nbsp_text_is_dropped() {
    let components = import("<span>\u{a0}</span>   <em>Kept</em>");

    assert_eq!(types(&components), vec![ComponentType::Text]);
}

#[test]
fn test_malformed_html_never_fails() {
    let components = import("<div><p>Unclosed <b>bold<table><tr><td>cell");

    assert!(!components.is_empty());
}

#[test]
fn test_ids_are_unique() {
    let components = import(
        "<div><h1>A</h1><p>B</p></div><table><tr><td>C</td><td><p>D</p><p>E</p></td></tr></table>",
    );

    let ids = collect_ids(&components);
    let mut deduped = ids.clone();
    deduped.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    deduped.dedup();
    assert_eq!(ids.len(), deduped.len());
}
