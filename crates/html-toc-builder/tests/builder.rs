use html_toc_builder::{derive_anchor, RunOutcome, SkipReason, TocBuilder, TocTree};
use html_toc_config::{ListTag, TocSettings};
use html_toc_dom::Dom;
use pretty_assertions::assert_eq;

fn run(source: &str) -> (RunOutcome, Dom) {
    run_with(source, TocSettings::default())
}

fn run_with(source: &str, settings: TocSettings) -> (RunOutcome, Dom) {
    let mut dom = Dom::parse(source);
    let outcome = TocBuilder::new(settings).run(&mut dom);
    (outcome, dom)
}

fn applied(outcome: RunOutcome) -> TocTree {
    match outcome {
        RunOutcome::Applied(tree) => tree,
        other => panic!("expected an applied run, got {other:?}"),
    }
}

fn heading_ids(dom: &Dom) -> Vec<Option<String>> {
    dom.elements()
        .into_iter()
        .filter(|node| {
            dom.tag_name(*node)
                .is_some_and(|name| html_toc_builder::heading_level(name).is_some())
        })
        .map(|node| dom.attribute(node, "id").map(str::to_owned))
        .collect()
}

#[test]
fn renders_nested_links_and_assigns_ids() {
    let source = "<div id=\"toc\"></div>\n\
                  <h2>Intro</h2>\n<h3>Background</h3>\n<h2>Usage</h2>\n";
    let (outcome, dom) = run(source);
    let tree = applied(outcome);

    assert_eq!(tree.len(), 3);
    assert_eq!(
        dom.to_html(),
        "<div id=\"toc\"><ul>\
         <li><a href=\"#Intro\">Intro</a><ul><li><a href=\"#Background\">Background</a></li></ul></li>\
         <li><a href=\"#Usage\">Usage</a></li>\
         </ul></div>\n\
         <h2 id=\"Intro\">Intro</h2>\n<h3 id=\"Background\">Background</h3>\n<h2 id=\"Usage\">Usage</h2>\n"
    );
}

#[test]
fn depths_follow_heading_levels() {
    let source = "<div id=\"toc\"></div>\
                  <h2>a</h2><h3>b</h3><h3>c</h3><h2>d</h2><h4>e</h4>";
    let tree = applied(run(source).0);
    assert_eq!(tree.depths(), vec![1, 2, 2, 1, 2]);
}

#[test]
fn getting_started_gets_an_underscore_anchor() {
    let (outcome, dom) = run("<div id=\"toc\"></div><h2>Getting Started</h2>");
    let tree = applied(outcome);
    assert_eq!(tree.entries[0].anchor, "Getting_Started");
    assert!(dom.element_by_id("Getting_Started").is_some());
    assert_eq!(derive_anchor("Getting_Started"), "Getting_Started");
}

#[test]
fn index_heading_is_left_alone() {
    let source = "<div id=\"toc\"></div><h2>Intro</h2><h3>Detail</h3><h2>Index</h2><h3>More</h3>";
    let (outcome, dom) = run(source);
    let tree = applied(outcome);

    assert_eq!(tree.len(), 3);
    assert_eq!(tree.depths(), vec![1, 2, 2]);
    assert_eq!(
        heading_ids(&dom),
        vec![
            Some("Intro".to_string()),
            Some("Detail".to_string()),
            None,
            Some("More".to_string()),
        ]
    );
}

#[test]
fn entry_count_matches_qualifying_headings() {
    let source = "<div id=\"toc\"></div>\
                  <h1>Title</h1><h2>A</h2><h5>B</h5><h2>Index</h2><h3>C</h3><h6>D</h6>";
    let tree = applied(run(source).0);
    assert_eq!(tree.len(), 4);
}

#[test]
fn existing_ids_are_kept_and_collisions_suffixed() {
    let source = "<div id=\"toc\"></div>\
                  <p id=\"Usage\">note</p><h2 id=\"first\">Setup</h2><h2>Usage</h2><h2>Usage</h2>";
    let (outcome, dom) = run(source);
    let tree = applied(outcome);

    let anchors: Vec<&str> = tree.entries.iter().map(|e| e.anchor.as_str()).collect();
    assert_eq!(anchors, vec!["first", "Usage_2", "Usage_3"]);
    assert_eq!(
        heading_ids(&dom),
        vec![
            Some("first".to_string()),
            Some("Usage_2".to_string()),
            Some("Usage_3".to_string()),
        ]
    );
}

#[test]
fn malformed_headings_are_skipped_without_breaking_nesting() {
    let source = "<div id=\"toc\"></div><h2>A</h2><h3>Broken</h4><h3>B</h3>";
    let (outcome, dom) = run(source);
    let tree = applied(outcome);

    let labels: Vec<&str> = tree.entries[0]
        .children
        .iter()
        .map(|entry| entry.label.as_str())
        .collect();
    assert_eq!(labels, vec!["B"]);
    assert!(dom.to_html().contains("<h3>Broken</h4>"));
}

#[test]
fn missing_container_leaves_the_document_untouched() {
    let source = "<h2>Intro</h2><h3>Background</h3>";
    let (outcome, dom) = run(source);
    assert_eq!(outcome, RunOutcome::Skipped(SkipReason::NoContainer));
    assert_eq!(dom.to_html(), source);
}

#[test]
fn no_headings_leaves_the_container_untouched() {
    let source = "<div id=\"toc\"><p>placeholder</p></div><h1>Only a title</h1>";
    let (outcome, dom) = run(source);
    assert_eq!(outcome, RunOutcome::Skipped(SkipReason::NoHeadings));
    assert_eq!(dom.to_html(), source);
}

#[test]
fn rerunning_on_the_output_is_stable() {
    let source = "<nav id=\"toc\"></nav><h2>Intro</h2><h3>Q&amp;A</h3><h2>Usage</h2>";
    let (_, first) = run(source);
    let once = first.to_html();
    let (outcome, second) = run(&once);

    assert!(matches!(outcome, RunOutcome::Applied(_)));
    assert_eq!(second.to_html(), once);
}

#[test]
fn honours_container_list_tag_and_threshold_settings() {
    let settings = TocSettings {
        min_level: 1,
        max_level: 2,
        container_id: "contents".to_string(),
        list_tag: ListTag::Ordered,
        exclude_labels: Vec::new(),
    };
    let source = "<ol id=\"contents\"></ol><h1>Index</h1><h2>Part</h2><h3>Hidden</h3>";
    let (outcome, dom) = run_with(source, settings);
    let tree = applied(outcome);

    assert_eq!(tree.depths(), vec![1, 2]);
    let container = dom.element_by_id("contents").expect("container");
    assert_eq!(
        dom.inner_html(container),
        "<ol><li><a href=\"#Index\">Index</a><ol><li><a href=\"#Part\">Part</a></li></ol></li></ol>"
    );
}

#[test]
fn named_character_references_are_decoded_in_labels_and_anchors() {
    let source = "<div id=\"toc\"></div>\
                  <h2>Caf&eacute; &mdash; Men&uuml;</h2><h2>&copy; Notice</h2>";
    let (outcome, dom) = run(source);
    let tree = applied(outcome);

    let entries: Vec<(&str, &str)> = tree
        .entries
        .iter()
        .map(|entry| (entry.label.as_str(), entry.anchor.as_str()))
        .collect();
    assert_eq!(
        entries,
        vec![("Café — Menü", "Café__Menü"), ("© Notice", "_Notice")]
    );
    assert_eq!(
        dom.to_html(),
        "<div id=\"toc\"><ul>\
         <li><a href=\"#Caf%C3%A9__Men%C3%BC\">Café — Menü</a></li>\
         <li><a href=\"#_Notice\">© Notice</a></li>\
         </ul></div>\
         <h2 id=\"Café__Menü\">Caf&eacute; &mdash; Men&uuml;</h2>\
         <h2 id=\"_Notice\">&copy; Notice</h2>"
    );
}

#[test]
fn unclosed_heading_is_skipped_instead_of_swallowing_later_ones() {
    let source = "<div id=\"toc\"></div><h2>Intro<h3>Background</h3><h2>Usage</h2>";
    let (outcome, dom) = run(source);
    let tree = applied(outcome);

    let walk = tree.walk();
    let labels: Vec<&str> = walk.iter().map(|(_, entry)| entry.label.as_str()).collect();
    assert_eq!(labels, vec!["Background", "Usage"]);
    assert_eq!(tree.depths(), vec![1, 1]);
    assert_eq!(
        heading_ids(&dom),
        vec![
            None,
            Some("Background".to_string()),
            Some("Usage".to_string()),
        ]
    );
}
