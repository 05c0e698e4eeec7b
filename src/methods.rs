use crate::error::RenderError;
use crate::parsing::GoPackage;
use crate::signature;
use std::path::Path;
use tracing::info;
use tree_sitter::Node;

/// Collect rendered signatures for every exported method declared with a
/// pointer receiver on `struct_name`, across all files of `package`.
///
/// Files whose path equals `output_file` are skipped entirely, so re-running
/// the tool against its own generated file cannot pick up stale methods. The
/// returned list follows file visitation order; sorting belongs to the
/// assembler.
pub fn collect_signatures(
    package: &GoPackage,
    struct_name: &str,
    output_file: &Path,
) -> Result<Vec<String>, RenderError> {
    let mut signatures = Vec::new();

    for file in &package.files {
        info!("parsing {}", file.path().display());
        if file.path() == output_file {
            continue;
        }

        let root = file.root_node();
        let mut cursor = root.walk();
        for declaration in root.children(&mut cursor) {
            if declaration.kind() != "method_declaration" {
                continue;
            }
            let name = signature::method_name(declaration, file.source())?;
            if !is_exported(&name) {
                continue;
            }
            if !has_pointer_receiver(declaration, file.source(), struct_name) {
                continue;
            }
            signatures.push(signature::method_signature(declaration, file.source())?);
        }
    }

    Ok(signatures)
}

/// Whether a name is exported under Go's casing convention.
fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Whether the receiver list is exactly one receiver whose type is a pointer
/// to the named struct. Value receivers, pointers to other identifiers, and
/// non-identifier pointees (e.g. generic instantiations) are excluded, not
/// errors.
fn has_pointer_receiver(method: Node, source: &str, struct_name: &str) -> bool {
    let Some(receiver) = method.child_by_field_name("receiver") else {
        return false;
    };

    let mut cursor = receiver.walk();
    let declarations: Vec<Node> = receiver
        .named_children(&mut cursor)
        .filter(|node| node.kind() == "parameter_declaration")
        .collect();
    let [declaration] = declarations.as_slice() else {
        return false;
    };

    let Some(receiver_type) = declaration.child_by_field_name("type") else {
        return false;
    };
    if receiver_type.kind() != "pointer_type" {
        return false;
    }

    match receiver_type.named_child(0) {
        Some(pointee) if pointee.kind() == "type_identifier" => pointee
            .utf8_text(source.as_bytes())
            .is_ok_and(|name| name == struct_name),
        _ => false,
    }
}
