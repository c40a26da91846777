/// The fixed analysis prompt embedded in every vision CLI invocation.
///
/// The vision model first classifies the image into one of six categories,
/// then applies the matching analysis template.  Keeping this deterministic
/// makes the output shape predictable for the text-only model consuming it.
pub fn analysis_prompt() -> &'static str {
    r#"Analyze the attached image for a text-only coding assistant that cannot see it.

First classify the image as exactly one of:
ui-screenshot, code-screenshot, error-screenshot, diagram, chart, general

Start your answer with "**Category**: <category>" on its own line, then apply
the matching template:

== ui-screenshot ==
- Overall layout and visible components (buttons, forms, menus, dialogs)
- Any visible text, labels, and values (transcribe exactly)
- Apparent state (selected items, validation errors, loading indicators)

== code-screenshot ==
- Language and what the code does
- Transcribe the code verbatim, preserving indentation
- Any highlighted lines, lint markers, or diff coloring

== error-screenshot ==
- The exact error message and stack trace (transcribe verbatim)
- The program or tool reporting it
- File names and line numbers referenced

== diagram ==
- Diagram type (flowchart, architecture, sequence, ER, ...)
- Every node/entity label and the connections between them
- Direction and meaning of arrows or relationships

== chart ==
- Chart type, axes, units, and legend entries
- Key data points, trends, and outliers
- Transcribe the title and any annotations

== general ==
- Describe the scene, subjects, and any visible text

Be factual and exhaustive about text content; the reader has no other way to
see this image."#
}
