use crate::error::RenderError;
use tree_sitter::Node;

/// An ordered group of parameter names sharing one type expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGroup {
    pub names: Vec<String>,
    pub type_text: String,
}

/// Render one method declaration as `Name (params) results`.
///
/// Parameter groups keep the names joined the way the declaration grouped
/// them; type expressions keep their exact source spelling, package
/// qualifiers included. A method with no results renders with a trailing
/// space, which downstream formatters are left to trim.
pub fn method_signature(method: Node, source: &str) -> Result<String, RenderError> {
    let name = method_name(method, source)?;
    let groups = parameter_groups(method, source)?;
    let results = result_types(method, source)?;

    let params = groups
        .iter()
        .map(|group| format!("{} {}", group.names.join(","), group.type_text))
        .collect::<Vec<_>>()
        .join(", ");

    let returns = match results.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        many => format!("({})", many.join(", ")),
    };

    Ok(format!("{} ({}) {}", name, params, returns))
}

/// Return the declared name of a method or function node.
pub(crate) fn method_name(method: Node, source: &str) -> Result<String, RenderError> {
    let name = method
        .child_by_field_name("name")
        .ok_or_else(|| RenderError::Malformed("method declaration without a name".to_string()))?;
    node_text(name, source)
}

/// Collect the parameter groups of a method in declaration order.
pub(crate) fn parameter_groups(
    method: Node,
    source: &str,
) -> Result<Vec<ParameterGroup>, RenderError> {
    let Some(list) = method.child_by_field_name("parameters") else {
        return Ok(Vec::new());
    };

    let mut groups = Vec::new();
    let mut cursor = list.walk();
    for declaration in list.named_children(&mut cursor) {
        match declaration.kind() {
            "parameter_declaration" => groups.push(ParameterGroup {
                names: name_fields(declaration, source)?,
                type_text: type_field_text(declaration, source)?,
            }),
            "variadic_parameter_declaration" => groups.push(ParameterGroup {
                names: name_fields(declaration, source)?,
                type_text: format!("...{}", type_field_text(declaration, source)?),
            }),
            _ => {}
        }
    }
    Ok(groups)
}

/// Collect the result type texts of a method, one per result group.
///
/// Result names are dropped: a group such as `(q, r int)` contributes its
/// type text once, the way the original declaration grouped it.
pub(crate) fn result_types(method: Node, source: &str) -> Result<Vec<String>, RenderError> {
    let Some(result) = method.child_by_field_name("result") else {
        return Ok(Vec::new());
    };

    // The result is either a parenthesized parameter list or one bare type.
    if result.kind() != "parameter_list" {
        return Ok(vec![node_text(result, source)?]);
    }

    let mut types = Vec::new();
    let mut cursor = result.walk();
    for declaration in result.named_children(&mut cursor) {
        match declaration.kind() {
            "parameter_declaration" => types.push(type_field_text(declaration, source)?),
            _ => {}
        }
    }
    Ok(types)
}

fn name_fields(declaration: Node, source: &str) -> Result<Vec<String>, RenderError> {
    let mut names = Vec::new();
    let mut cursor = declaration.walk();
    for name in declaration.children_by_field_name("name", &mut cursor) {
        names.push(node_text(name, source)?);
    }
    Ok(names)
}

fn type_field_text(declaration: Node, source: &str) -> Result<String, RenderError> {
    let type_node = declaration
        .child_by_field_name("type")
        .ok_or_else(|| RenderError::Malformed("parameter declaration without a type".to_string()))?;
    node_text(type_node, source)
}

fn node_text(node: Node, source: &str) -> Result<String, RenderError> {
    node.utf8_text(source.as_bytes())
        .map(|text| text.to_string())
        .map_err(|e| RenderError::Malformed(format!("failed printing {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::get_parser;
    use tree_sitter::Tree;

    fn parse(source: &str) -> Tree {
        let mut parser = get_parser().unwrap();
        let tree = parser.parse(source, None).unwrap();
        assert!(!tree.root_node().has_error(), "test source failed to parse");
        tree
    }

    fn first_method<'tree>(tree: &'tree Tree) -> Node<'tree> {
        let root = tree.root_node();
        let mut cursor = root.walk();
        let method = root
            .children(&mut cursor)
            .find(|node| node.kind() == "method_declaration")
            .expect("no method declaration in test source");
        method
    }

    fn render(source: &str) -> String {
        let tree = parse(source);
        method_signature(first_method(&tree), source).unwrap()
    }

    #[test]
    fn renders_params_and_single_result() {
        let signature = render("package p\n\nfunc (f *Foo) Bar(x int) string { return \"\" }\n");

        assert_eq!(signature, "Bar (x int) string");
    }

    #[test]
    fn renders_empty_params_and_results_with_trailing_space() {
        let signature = render("package p\n\nfunc (f *Foo) Ping() {}\n");

        assert_eq!(signature, "Ping () ");
    }

    #[test]
    fn renders_multiple_results_parenthesized() {
        let signature = render("package p\n\nfunc (f *Foo) Baz() (int, error) { return 0, nil }\n");

        assert_eq!(signature, "Baz () (int, error)");
    }

    #[test]
    fn renders_grouped_parameter_names_jointly() {
        let signature = render("package p\n\nfunc (f *Foo) Move(dx, dy int) {}\n");

        assert_eq!(signature, "Move (dx,dy int) ");
    }

    #[test]
    fn renders_parameter_groups_in_declaration_order() {
        let signature = render(
            "package p\n\nfunc (f *Foo) Copy(dst io.Writer, buf []byte) (int, error) { return 0, nil }\n",
        );

        assert_eq!(signature, "Copy (dst io.Writer, buf []byte) (int, error)");
    }

    #[test]
    fn renders_variadic_parameter() {
        let signature =
            render("package p\n\nfunc (f *Foo) Printf(format string, args ...interface{}) {}\n");

        assert_eq!(signature, "Printf (format string, args ...interface{}) ");
    }

    #[test]
    fn renders_unnamed_parameter_with_empty_name_text() {
        let signature = render("package p\n\nfunc (f *Foo) Skip(int) {}\n");

        assert_eq!(signature, "Skip ( int) ");
    }

    #[test]
    fn named_result_group_contributes_one_type() {
        let signature = render("package p\n\nfunc (f *Foo) Div() (q, r int) { return 0, 0 }\n");

        assert_eq!(signature, "Div () int");
    }

    #[test]
    fn renders_bare_pointer_result() {
        let signature = render("package p\n\nfunc (f *Foo) Clone() *Foo { return nil }\n");

        assert_eq!(signature, "Clone () *Foo");
    }

    #[test]
    fn keeps_qualified_type_spelling() {
        let signature = render("package p\n\nfunc (f *Foo) Now() time.Time { return time.Time{} }\n");

        assert_eq!(signature, "Now () time.Time");
    }

    #[test]
    fn parameter_groups_preserve_names_and_types() {
        let source = "package p\n\nfunc (f *Foo) Move(dx, dy int) {}\n";
        let tree = parse(source);

        let groups = parameter_groups(first_method(&tree), source).unwrap();

        assert_eq!(
            groups,
            vec![ParameterGroup {
                names: vec!["dx".to_string(), "dy".to_string()],
                type_text: "int".to_string(),
            }]
        );
    }

    #[test]
    fn result_types_empty_without_result_clause() {
        let source = "package p\n\nfunc (f *Foo) Ping() {}\n";
        let tree = parse(source);

        let results = result_types(first_method(&tree), source).unwrap();

        assert!(results.is_empty());
    }
}
