use crate::error::TemplateError;

/// Template applied when the caller supplies no override.
pub const DEFAULT_TEMPLATE: &str = r#"// DO NOT EDIT, auto generated by struct2interface

package {{ package }}

type {{ interface }} interface {
	{{ body }}
}
"#;

/// Sort and join the rendered signatures into an interface body, then render
/// the template with `package`, `interface` and `body` bound.
///
/// The sort is a plain byte-wise string sort over the full signature lines,
/// which makes the output independent of file visitation order.
pub fn assemble(
    mut signatures: Vec<String>,
    package: &str,
    interface: &str,
    template: &str,
) -> Result<String, TemplateError> {
    signatures.sort();
    let body = signatures.join("\n");
    render_template(template, package, interface, &body)
}

fn render_template(
    template: &str,
    package: &str,
    interface: &str,
    body: &str,
) -> Result<String, TemplateError> {
    let parser = liquid::ParserBuilder::with_stdlib()
        .build()
        .map_err(|e| TemplateError::Parse(e.to_string()))?;
    let template = parser
        .parse(template)
        .map_err(|e| TemplateError::Parse(e.to_string()))?;

    let globals = liquid::object!({
        "package": package,
        "interface": interface,
        "body": body,
    });

    template
        .render(&globals)
        .map_err(|e| TemplateError::Render(e.to_string()))
}
