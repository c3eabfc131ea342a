//! Conversion snapshot tests.
//!
//! These tests compare the generated statements against inline snapshots.

use etch_atelier::{convert, convert_with_options, ConvertOptions, NamingStrategyKind, QuoteStyle};

/// Helper to get the generated code with `root` as the parent
fn get_code(src: &str) -> String {
    get_code_with(
        src,
        ConvertOptions {
            root_name: Some("root".into()),
            ..Default::default()
        },
    )
}

fn get_code_with(src: &str, options: ConvertOptions) -> String {
    match convert_with_options(src, &options) {
        Ok(output) => output.code,
        Err(err) => panic!("Conversion failed: {err}"),
    }
}

// =============================================================================
// End-to-end
// =============================================================================

mod end_to_end {
    use super::*;

    #[test]
    fn paragraph_with_class() {
        insta::assert_snapshot!(get_code(r#"<p class="a">Hi</p>"#), @r"
        var p1 = root.appendChild(document.createElement('p'));
        p1.classList.add('a');
        p1.textContent = 'Hi';
        ");
    }

    #[test]
    fn nested_list() {
        let src = r#"
<ul id="menu">
  <li><a href="/">Home</a></li>
  <li><a href="/about">About</a></li>
</ul>
"#;
        insta::assert_snapshot!(get_code(src), @r"
        var menu1 = root.appendChild(document.createElement('ul'));
        menu1.id = 'menu';
        var li1 = menu1.appendChild(document.createElement('li'));
        var a1 = li1.appendChild(document.createElement('a'));
        a1.href = '/';
        a1.textContent = 'Home';
        li1 = menu1.appendChild(document.createElement('li'));
        a1 = li1.appendChild(document.createElement('a'));
        a1.href = '/about';
        a1.textContent = 'About';
        ");
    }

    #[test]
    fn form_controls() {
        let src = r#"<label for="email" tabindex="0">Email</label><input id="email" type="email" required>"#;
        insta::assert_snapshot!(get_code(src), @r"
        var label1 = root.appendChild(document.createElement('label'));
        label1.htmlFor = 'email';
        label1.tabIndex = '0';
        label1.textContent = 'Email';
        var email1 = root.appendChild(document.createElement('input'));
        email1.id = 'email';
        email1.type = 'email';
        email1.required = '';
        ");
    }

    #[test]
    fn default_root_name() {
        insta::assert_snapshot!(convert("<hr>").unwrap(), @"var hr1 = fragment.appendChild(document.createElement('hr'));");
    }
}

// =============================================================================
// Naming
// =============================================================================

mod naming {
    use super::*;

    #[test]
    fn word_pool_reuses_released_names() {
        let options = ConvertOptions {
            root_name: Some("root".into()),
            naming: NamingStrategyKind::WordPool,
            ..Default::default()
        };
        insta::assert_snapshot!(get_code_with("<div><p>One</p><p>Two</p></div>", options), @r"
        var amberBrook = root.appendChild(document.createElement('div'));
        var amberCloud = amberBrook.appendChild(document.createElement('p'));
        amberCloud.textContent = 'One';
        amberCloud = amberBrook.appendChild(document.createElement('p'));
        amberCloud.textContent = 'Two';
        ");
    }

    #[test]
    fn invalid_root_name_falls_back() {
        for root_name in ["", "not valid", "var"] {
            let options = ConvertOptions {
                root_name: Some(root_name.into()),
                ..Default::default()
            };
            assert_eq!(
                get_code_with("<i></i>", options),
                "var i1 = fragment.appendChild(document.createElement('i'));\n"
            );
        }
    }
}

// =============================================================================
// Text
// =============================================================================

mod text {
    use super::*;

    #[test]
    fn multi_line_text_node() {
        let src = "<div>\n  line one\n  line two\n  <br>\n</div>";
        insta::assert_snapshot!(get_code(src), @r"
        var div1 = root.appendChild(document.createElement('div'));
        div1.appendChild(document.createTextNode('line one'
        + 'line two'));
        var br1 = div1.appendChild(document.createElement('br'));
        ");
    }

    #[test]
    fn double_quoted_lines() {
        let options = ConvertOptions {
            root_name: Some("root".into()),
            quote: QuoteStyle::Double,
            ..Default::default()
        };
        insta::assert_snapshot!(get_code_with("<p>He said \"hi\"\nBye</p>", options), @r#"
        var p1 = root.appendChild(document.createElement("p"));
        p1.textContent = "He said \"hi\""
        + "Bye";
        "#);
    }

    #[test]
    fn entities_are_decoded() {
        insta::assert_snapshot!(get_code(r#"<p title="a &quot;b&quot;">Fish &amp; chips</p>"#), @r#"
        var p1 = root.appendChild(document.createElement('p'));
        p1.title = 'a "b"';
        p1.textContent = 'Fish & chips';
        "#);
    }

    #[test]
    fn script_content_is_raw() {
        insta::assert_snapshot!(get_code("<script>if (a < b) { alert('x'); }</script>"), @r"
        var script1 = root.appendChild(document.createElement('script'));
        script1.textContent = 'if (a < b) { alert(\'x\'); }';
        ");
    }

    #[test]
    fn carriage_returns_break_lines() {
        insta::assert_snapshot!(get_code("<p>a\rb</p>"), @r"
        var p1 = root.appendChild(document.createElement('p'));
        p1.textContent = 'a'
        + 'b';
        ");
        insta::assert_snapshot!(get_code("<div title=\"x\r\ny\">x\ry<b>z</b></div>"), @r"
        var div1 = root.appendChild(document.createElement('div'));
        div1.title = 'x\ny';
        div1.appendChild(document.createTextNode('x'
        + 'y'));
        var b1 = div1.appendChild(document.createElement('b'));
        b1.textContent = 'z';
        ");
    }

    #[test]
    fn comments_when_enabled() {
        let options = ConvertOptions {
            root_name: Some("root".into()),
            comments: true,
            ..Default::default()
        };
        insta::assert_snapshot!(get_code_with("<!-- header --><h1>Title</h1>", options), @r"
        root.appendChild(document.createComment(' header '));
        var h11 = root.appendChild(document.createElement('h1'));
        h11.textContent = 'Title';
        ");
    }
}

// =============================================================================
// Attributes
// =============================================================================

mod attributes {
    use super::*;

    #[test]
    fn data_attribute_typing() {
        insta::assert_snapshot!(get_code(r#"<div data-count="3" data-label="x"></div>"#), @r"
        var div1 = root.appendChild(document.createElement('div'));
        div1.dataset.count = 3;
        div1.dataset.label = 'x';
        ");
    }

    #[test]
    fn style_declarations() {
        insta::assert_snapshot!(get_code(r#"<p style="color: red; font-size: 12px">x</p>"#), @r"
        var p1 = root.appendChild(document.createElement('p'));
        p1.style.color = 'red';
        p1.style.fontSize = '12px';
        p1.textContent = 'x';
        ");
    }

    #[test]
    fn style_values_are_camelized() {
        insta::assert_snapshot!(get_code(r#"<span style="font-family: sans-serif"></span>"#), @r"
        var span1 = root.appendChild(document.createElement('span'));
        span1.style.fontFamily = 'sansSerif';
        ");
    }

    #[test]
    fn event_handler() {
        assert_eq!(
            get_code(r#"<button onclick="go()">Go</button>"#),
            "var button1 = root.appendChild(document.createElement('button'));\n\
             button1.onclick = function(evt) {\n\tgo();\n};\n\
             button1.textContent = 'Go';\n"
        );
    }
}

// =============================================================================
// Properties
// =============================================================================

mod properties {
    use super::*;

    const DOCUMENT: &str = r#"
<section id="intro" class="card wide">
  <h2>Welcome</h2>
  <p>First <em>paragraph</em> text.</p>
  <p data-index="2">Second</p>
  <div><div><p>Deep</p></div></div>
  <p>Third</p>
</section>
<section>
  <p>Again</p>
</section>
"#;

    /// Name bound by a creation statement, and whether it declares
    fn created_name(line: &str) -> Option<(&str, bool)> {
        let (declares, rest) = match line.strip_prefix("var ") {
            Some(rest) => (true, rest),
            None => (false, line),
        };
        let (name, rhs) = rest.split_once(" = ")?;
        rhs.contains(".appendChild(document.createElement(")
            .then_some((name, declares))
    }

    #[test]
    fn deterministic() {
        for naming in [NamingStrategyKind::StructureDerived, NamingStrategyKind::WordPool] {
            let options = ConvertOptions {
                naming,
                ..Default::default()
            };
            let first = get_code_with(DOCUMENT, options.clone());
            let second = get_code_with(DOCUMENT, options);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn declare_once() {
        for naming in [NamingStrategyKind::StructureDerived, NamingStrategyKind::WordPool] {
            let options = ConvertOptions {
                naming,
                ..Default::default()
            };
            let code = get_code_with(DOCUMENT, options);
            let mut declared = std::collections::HashSet::new();
            for (name, declares) in code.lines().filter_map(created_name) {
                assert_eq!(
                    declares,
                    declared.insert(name),
                    "{name} must be declared exactly on first use"
                );
            }
            assert!(!declared.is_empty());
        }
    }

    #[test]
    fn single_text_child_collapse() {
        let code = get_code("<p>Only</p><p> </p>");
        assert!(!code.contains("createTextNode"));
        assert_eq!(code.matches(".textContent = ").count(), 2);
    }

    #[test]
    fn whitespace_only_text_is_suppressed() {
        let code = get_code("<div> <span>a</span> \n <span>b</span> </div>");
        assert!(!code.contains("createTextNode"));
    }

    #[test]
    fn class_expansion_order() {
        let code = get_code(r#"<div class="a b"></div>"#);
        let adds: Vec<&str> = code.lines().filter(|l| l.contains("classList.add")).collect();
        assert_eq!(adds, ["div1.classList.add('a');", "div1.classList.add('b');"]);
    }

    #[test]
    fn every_statement_is_terminated() {
        let code = get_code(DOCUMENT);
        assert!(code.ends_with(";\n"));
        assert!(code.lines().filter(|l| !l.starts_with("+ ")).count() > 10);
    }
}
