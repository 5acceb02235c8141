use math_inline::{
    from_reader, from_str, to_string, to_string_with_options, to_writer, Document, Inline,
    InlineMath, MathOptions,
};
use serde_json::json;

fn first_math(input: &str) -> InlineMath {
    from_str(input)
        .math()
        .next()
        .cloned()
        .unwrap_or_else(|| panic!("no inline math in {:?}", input))
}

#[test]
fn test_creates_inline_math_node() {
    let math = first_math(":math[x^2]");
    assert_eq!(math.value(), "x^2");
}

#[test]
fn test_rendering_metadata() {
    let math = first_math(":math[x]");
    assert_eq!(math.data().h_name(), "code");
    let classes = math.data().class_name();
    assert!(classes.contains(&"math-inline".to_string()));
    assert!(classes.contains(&"language-math".to_string()));
    assert_eq!(math.data().h_children().len(), 1);
    assert_eq!(math.data().h_children()[0].value, "x");
}

#[test]
fn test_escapes_resolved_in_value() {
    assert_eq!(first_math(":math[a\\]b]").value(), "a]b");
    assert_eq!(first_math(":math[a\\\\]").value(), "a\\");
    assert_eq!(first_math(":math[\\alpha + \\beta]").value(), "\\alpha + \\beta");
}

#[test]
fn test_document_json_shape() {
    let doc = from_str("see :math[a\\]b]");
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        json,
        json!({
            "children": [
                { "type": "text", "value": "see " },
                {
                    "type": "inlineMath",
                    "value": "a]b",
                    "data": {
                        "hName": "code",
                        "hProperties": { "className": ["language-math", "math-inline"] },
                        "hChildren": [{ "type": "text", "value": "a]b" }]
                    },
                    "position": { "start": 4, "end": 15 }
                }
            ]
        })
    );

    let back: Document = serde_json::from_value(json).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn test_stringify_escapes_close_bracket() {
    let doc = Document::new(vec![Inline::math("a]b")]);
    assert_eq!(to_string(&doc), ":math[a\\]b]");
}

#[test]
fn test_stringify_escapes_backslash_before_close() {
    let doc = Document::new(vec![Inline::math("a\\]")]);
    assert_eq!(to_string(&doc), ":math[a\\\\\\]]");
}

#[test]
fn test_stringify_escapes_unbalanced_open() {
    let doc = Document::new(vec![Inline::math("[")]);
    assert_eq!(to_string(&doc), ":math[\\[]");
}

#[test]
fn test_roundtrip_preserves_source() {
    for input in [
        ":math[x^2]",
        ":math[\\alpha + \\beta]",
        ":math[f(x) = [a, b]]",
        "The formula :math[x^2] is quadratic.",
        "two :math[a] spans :math[[b]]\nacross :math[c\\]] lines",
    ] {
        assert_eq!(to_string(&from_str(input)), input);
    }
}

#[test]
fn test_literal_trigger_text_roundtrips() {
    let doc = Document::new(vec![
        Inline::text("write :math[x] for math, or "),
        Inline::math("y"),
    ]);
    let text = to_string(&doc);
    assert_eq!(text, "write \\:math[x] for math, or :math[y]");

    let back = from_str(&text);
    assert_eq!(back.children[0], doc.children[0]);
    assert_eq!(back.math().map(|m| m.value()).collect::<Vec<_>>(), ["y"]);

    let verbatim = to_string_with_options(&doc, MathOptions::verbatim());
    assert_eq!(from_str(&verbatim).math().count(), 2);
}

#[test]
fn test_text_with_backslashes_roundtrips() {
    let doc = Document::new(vec![
        Inline::text("path C:\\dir\\ and \\:"),
        Inline::math("z"),
        Inline::text(" end\\"),
    ]);
    let text = to_string(&doc);
    let mut back = from_str(&text);
    back.normalize();
    assert_eq!(
        back.children.iter().filter_map(Inline::as_text).collect::<Vec<_>>(),
        ["path C:\\dir\\ and \\:", " end\\"]
    );
    assert_eq!(back.math().next().map(|m| m.value()), Some("z"));
}

#[test]
fn test_word_char_before_math_is_text_on_reparse() {
    let doc = Document::new(vec![Inline::text("foo"), Inline::math("x")]);
    let text = to_string(&doc);
    assert_eq!(text, "foo:math[x]");
    assert_eq!(from_str(&text).children, vec![Inline::text("foo:math[x]")]);
}

#[test]
fn test_reader_and_writer() {
    let input = "a :math[[x]] b";
    let doc = from_reader(input.as_bytes()).unwrap();
    let mut output = Vec::new();
    to_writer(&mut output, &doc).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), input);
}
