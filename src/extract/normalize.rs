use scraper::node::Node;
use scraper::{ElementRef, Html};
use tracing::debug;

use crate::extract::ExtractResult;
use crate::extract::markers::{
    ALLOWED_ATTRIBUTES, IGNORED_PANEL_ID, MARKERS, Markers, in_ignored_panel, inside_title,
};

// `plaintext` never closes, so copying it would swallow the rest of the output.
const SKIPPED_TAGS: [&str; 3] = ["script", "style", "plaintext"];

// Contents are parsed as raw text and must be written back unescaped.
const RAW_TEXT_TAGS: [&str; 5] = ["noscript", "xmp", "iframe", "noembed", "noframes"];

// Dropped by the parser unless they sit inside a table; written as `div`
// when copied out of one.
const TABLE_PART_TAGS: [&str; 9] = [
    "caption", "col", "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr",
];

// Table parts whose children are again table parts.
const TABLE_CONTEXT_TAGS: [&str; 6] = ["table", "tbody", "thead", "tfoot", "tr", "colgroup"];

const VOID_TAGS: [&str; 15] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

// The parser drops one newline right after these open tags.
const LEADING_NEWLINE_TAGS: [&str; 3] = ["pre", "textarea", "listing"];

/// Rebuild `html` as a `<div>` holding one container per ticket component.
///
/// Each container keeps the component's `id` plus copies of its title markers
/// and text inputs with every attribute outside [`ALLOWED_ATTRIBUTES`]
/// stripped. Components holding neither are dropped. Style and script
/// blocks and the ignored tab panel never reach the output. Running this on
/// its own output returns the same string.
pub fn normalize(html: &str) -> ExtractResult<String> {
    let markers: &Markers = &MARKERS;
    let document = Html::parse_document(html);

    let mut out = String::from("<div>");
    let mut kept = 0usize;
    let mut dropped = 0usize;

    for component in document.select(&markers.component) {
        if in_ignored_panel(&component) {
            continue;
        }

        let keep = |element: &ElementRef<'_>| {
            !in_ignored_panel(element) && !inside_title(element, &component)
        };
        let titles: Vec<_> = component.select(&markers.title).filter(keep).collect();
        let inputs: Vec<_> = component.select(&markers.text_input).filter(keep).collect();

        if titles.is_empty() && inputs.is_empty() {
            dropped += 1;
            continue;
        }

        out.push_str("<div");
        push_attribute(&mut out, "id", component.value().id().unwrap_or_default());
        out.push('>');
        for element in titles.into_iter().chain(inputs) {
            write_element(element, false, &mut out);
        }
        out.push_str("</div>");
        kept += 1;
    }

    out.push_str("</div>");
    debug!(kept, dropped, "collected ticket components");
    Ok(out)
}

fn write_element(element: ElementRef<'_>, in_table: bool, out: &mut String) {
    let data = element.value();
    let source_name = data.name();
    if SKIPPED_TAGS.contains(&source_name) || data.id() == Some(IGNORED_PANEL_ID) {
        return;
    }

    let detached = !in_table && TABLE_PART_TAGS.contains(&source_name);
    let name = if detached { "div" } else { source_name };

    out.push('<');
    out.push_str(name);
    for attribute in ALLOWED_ATTRIBUTES {
        if let Some(value) = data.attr(attribute) {
            push_attribute(out, attribute, value);
        }
    }
    out.push('>');

    if VOID_TAGS.contains(&name) {
        return;
    }

    if LEADING_NEWLINE_TAGS.contains(&name) {
        let leading_newline = element
            .children()
            .next()
            .is_some_and(|child| matches!(child.value(), Node::Text(text) if text.starts_with('\n')));
        if leading_newline {
            out.push('\n');
        }
    }

    let raw_text = RAW_TEXT_TAGS.contains(&name);
    let children_in_table = !detached && TABLE_CONTEXT_TAGS.contains(&name);
    for child in element.children() {
        match child.value() {
            Node::Text(text) if raw_text => out.push_str(text),
            Node::Text(text) => escape_text(text, out),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    write_element(child, children_in_table, out);
                }
            }
            _ => {}
        }
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            other => out.push(other),
        }
    }
    out.push('"');
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    const DIRTY: &str = r#"
        <html>
          <head><style>body { color: red; }</style></head>
          <body>
            <script>alert('test');</script>
            <div id="ext-comp-1001" class="remove-me" onclick="go()">
              <div data-caid="title" style="bold">Case 300-1234: <b class="x">Test</b> Case</div>
              <span>chrome</span>
              <textarea name="Description" autoidentifier="txtbox_Description" rows="4">Description content</textarea>
              <input type="text" value="ignored">
            </div>
            <div id="ext-comp-1002"><span>no markers here</span></div>
            <div id="ext-comp-1003" data-extra="1">
              <textarea id="DescriptionLong" value="from attribute" data-caid="DescriptionLong"></textarea>
            </div>
          </body>
        </html>
    "#;

    #[test]
    fn keeps_only_marked_content_and_allowed_attributes() {
        let result = normalize(DIRTY).unwrap();

        assert!(!result.contains("<style"));
        assert!(!result.contains("<script"));
        assert!(!result.contains("class="));
        assert!(!result.contains("onclick"));
        assert!(!result.contains("rows="));
        assert!(!result.contains("chrome"));
        assert!(!result.contains("ignored"));
        assert!(!result.contains("ext-comp-1002"));
        assert!(result.contains(r#"<div id="ext-comp-1001">"#));
        assert!(result.contains(r#"<div data-caid="title">Case 300-1234: <b>Test</b> Case</div>"#));
        assert!(result.contains(
            r#"<textarea name="Description" autoidentifier="txtbox_Description">Description content</textarea>"#
        ));
        assert!(result.contains(r#"value="from attribute""#));
    }

    #[test]
    fn every_output_attribute_is_allowed() {
        let result = normalize(DIRTY).unwrap();
        let document = Html::parse_fragment(&result);
        let any = Selector::parse("*").unwrap();
        for element in document.select(&any) {
            for (name, _) in element.value().attrs() {
                assert!(ALLOWED_ATTRIBUTES.contains(&name), "unexpected attribute {name}");
            }
        }
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        let once = normalize(DIRTY).unwrap();
        let twice = normalize(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn preserves_component_order() {
        let html = r#"
            <div id="ext-comp-3"><textarea name="Resolution">c</textarea></div>
            <div id="ext-comp-1"><textarea name="Resolution">a</textarea></div>
            <div id="ext-comp-2"><textarea name="Resolution">b</textarea></div>
        "#;
        let result = normalize(html).unwrap();
        let first = result.find("ext-comp-3").unwrap();
        let second = result.find("ext-comp-1").unwrap();
        let third = result.find("ext-comp-2").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn no_components_gives_empty_wrapper() {
        assert_eq!(normalize("").unwrap(), "<div></div>");
        assert_eq!(normalize("<p>plain page</p>").unwrap(), "<div></div>");
    }

    #[test]
    fn drops_ignored_panel_subtree() {
        let html = format!(
            r#"<div id="ext-comp-1">
                 <div data-caid="title">300-1</div>
                 <div id="{IGNORED_PANEL_ID}"><textarea name="Description">hidden</textarea></div>
               </div>"#
        );
        let result = normalize(&html).unwrap();
        assert!(result.contains("300-1"));
        assert!(!result.contains("hidden"));
    }

    #[test]
    fn nested_titles_are_copied_once() {
        let html = r#"
            <div id="ext-comp-1">
              <div data-caid="title">Case <span data-caid="title">300-7</span></div>
            </div>
        "#;
        let result = normalize(html).unwrap();
        assert_eq!(result.matches("300-7").count(), 1);
        assert_eq!(normalize(&result).unwrap(), result);
    }

    #[test]
    fn escapes_text_and_keeps_textarea_newlines() {
        let html = "<div id=\"ext-comp-1\"><textarea name=\"Description\">\n\na < b & \"c\"</textarea></div>";
        let once = normalize(html).unwrap();
        assert!(once.contains("<textarea name=\"Description\">\n\na &lt; b &amp; \"c\"</textarea>"));
        assert_eq!(normalize(&once).unwrap(), once);
    }

    #[test]
    fn table_cell_title_is_copied_as_div() {
        let html = r#"<div id="ext-comp-1"><table><tr><td data-caid="title">Case 300-9</td></tr></table><textarea name="Resolution">R</textarea></div>"#;
        let once = normalize(html).unwrap();
        assert_eq!(
            once,
            r#"<div><div id="ext-comp-1"><div data-caid="title">Case 300-9</div><textarea name="Resolution">R</textarea></div></div>"#
        );
        assert_eq!(normalize(&once).unwrap(), once);
    }

    #[test]
    fn table_row_title_keeps_nested_table_intact() {
        let html = r#"
            <div id="ext-comp-1"><table>
              <tr data-caid="title"><td>300-4</td><td><table><tr><td>inner</td></tr></table></td></tr>
            </table></div>
        "#;
        let once = normalize(html).unwrap();
        assert!(once.contains(r#"<div data-caid="title"><div>300-4</div><div><table><tbody><tr><td>inner</td></tr></tbody></table></div></div>"#));
        assert_eq!(normalize(&once).unwrap(), once);
    }

    #[test]
    fn raw_text_content_is_not_escaped() {
        let html = r#"<div id="ext-comp-1"><div data-caid="title">300-9 <noscript>a<b</noscript></div></div>"#;
        let once = normalize(html).unwrap();
        assert!(once.contains("<noscript>a<b</noscript>"));
        assert_eq!(normalize(&once).unwrap(), once);
    }
}
