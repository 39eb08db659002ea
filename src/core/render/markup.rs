use scraper::Html;

const SKIPPED_ELEMENTS: [&str; 3] = ["script", "style", "template"];

/// Visible text of an HTML fragment with whitespace collapsed.
///
/// Used by surfaces that cannot draw markup; `<script>` and `<style>` bodies are dropped.
pub fn markup_text(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    let mut words: Vec<&str> = Vec::new();

    for node in fragment.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let skipped = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .map(|element| SKIPPED_ELEMENTS.contains(&element.name()))
            .unwrap_or(false);
        if skipped {
            continue;
        }
        words.extend(text.split_whitespace());
    }

    words.join(" ")
}
