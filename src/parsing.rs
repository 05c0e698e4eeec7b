use crate::error::ParseError;
use crate::listing;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

/// Build a tree-sitter parser configured for the Go grammar.
pub fn get_parser() -> Result<Parser, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| {
            ParseError::Malformed(format!("Error setting Go language for parser: {}", e))
        })?;
    Ok(parser)
}

/// A parsed Go source file with its tree-sitter parse tree and source text.
pub struct GoFile {
    path: PathBuf,
    source: String,
    tree: Tree,
}

impl GoFile {
    /// Parse Go source into a tree-sitter parse tree.
    ///
    /// Rejects files the grammar cannot parse cleanly; a tree containing
    /// error nodes would make the extracted signatures unreliable.
    pub fn parse(path: PathBuf, source: String, parser: &mut Parser) -> Result<Self, ParseError> {
        let tree = parser.parse(&source, None).ok_or_else(|| {
            ParseError::Malformed(format!("Failed to parse source file {}", path.display()))
        })?;

        if tree.root_node().has_error() {
            return Err(ParseError::Malformed(format!(
                "Failed to parse source file {}",
                path.display()
            )));
        }

        Ok(Self { path, source, tree })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Return the root node of the parse tree.
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Return the identifier declared by the file's `package` clause.
    pub fn package_name(&self) -> Result<String, ParseError> {
        let root = self.root_node();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            if child.kind() != "package_clause" {
                continue;
            }
            // The grammar exposes the identifier as a plain child, not a field.
            let mut clause_cursor = child.walk();
            for clause_child in child.children(&mut clause_cursor) {
                if clause_child.kind() == "package_identifier" {
                    return clause_child
                        .utf8_text(self.source.as_bytes())
                        .map(|name| name.to_string())
                        .map_err(|e| {
                            ParseError::Malformed(format!(
                                "Failed to read package name in {}: {}",
                                self.path.display(),
                                e
                            ))
                        });
                }
            }
        }
        Err(ParseError::Malformed(format!(
            "no package clause in {}",
            self.path.display()
        )))
    }
}

/// A named collection of parsed files sharing one package identifier.
pub struct GoPackage {
    pub name: String,
    pub files: Vec<GoFile>,
}

/// Parse every Go file directly inside `dir` and group the results by the
/// package each file declares.
///
/// A directory may legitimately yield more than one package (`mypkg` next to
/// `mypkg_test`); the caller selects the one it was asked for. Empty files
/// are skipped, any unparseable file is an error.
pub fn parse_dir(dir: &Path) -> Result<BTreeMap<String, GoPackage>, ParseError> {
    let mut parser = get_parser()?;
    let mut packages: BTreeMap<String, GoPackage> = BTreeMap::new();

    for path in listing::go_file_paths(dir)? {
        let source = fs::read_to_string(&path).map_err(|e| {
            ParseError::Malformed(format!(
                "Failed to read source file {}: {}",
                path.display(),
                e
            ))
        })?;
        if source.trim().is_empty() {
            continue;
        }

        let file = GoFile::parse(path, source, &mut parser)?;
        let name = file.package_name()?;
        packages
            .entry(name.clone())
            .or_insert_with(|| GoPackage {
                name,
                files: Vec::new(),
            })
            .files
            .push(file);
    }

    Ok(packages)
}
