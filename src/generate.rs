use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::assemble::assemble;
use crate::error::GenerateError;
use crate::format::Formatter;
use crate::methods::collect_signatures;
use crate::parsing::parse_dir;

/// Inputs for one interface-generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub source_dir: PathBuf,
    pub output_file: PathBuf,
    pub package: String,
    pub struct_name: String,
    pub interface_name: String,
    pub template: String,
}

/// Generates the interface for `struct_name` and writes it to `output_file`.
///
/// The output file is excluded from method collection, so pointing the output
/// at the scanned directory is safe and re-runs are idempotent.
pub fn generate_interface(
    opts: &GenerateOptions,
    formatter: &dyn Formatter,
) -> Result<(), GenerateError> {
    let packages = parse_dir(&opts.source_dir).map_err(|source| GenerateError::ParseDir {
        folder: opts.source_dir.clone(),
        source,
    })?;
    let package = packages
        .get(&opts.package)
        .ok_or_else(|| GenerateError::PackageNotFound(opts.package.clone()))?;

    let signatures = collect_signatures(package, &opts.struct_name, &opts.output_file)?;
    let rendered = assemble(
        signatures,
        &opts.package,
        &opts.interface_name,
        &opts.template,
    )?;

    remove_stale_output(&opts.output_file)?;
    let formatted = formatter.format(&opts.output_file, &rendered)?;
    fs::write(&opts.output_file, formatted).map_err(|source| GenerateError::Write {
        path: opts.output_file.clone(),
        source,
    })?;

    info!("Written {} successfully", opts.output_file.display());
    Ok(())
}

fn remove_stale_output(path: &Path) -> Result<(), GenerateError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(GenerateError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::DEFAULT_TEMPLATE;
    use crate::format::PassthroughFormatter;
    use tempfile::TempDir;

    const FOO_GO: &str = r#"
package mypkg

type Foo struct{}

func (f *Foo) Bar(x int) string { return "" }

func (f *Foo) Baz() (int, error) { return 0, nil }

func (f Foo) Qux() {}

func (f *Foo) ping() {}

func Free() {}
"#;

    const EXPECTED: &str = concat!(
        "// DO NOT EDIT, auto generated by struct2interface\n",
        "\n",
        "package mypkg\n",
        "\n",
        "type FooIface interface {\n",
        "\tBar (x int) string\n",
        "Baz () (int, error)\n",
        "}\n",
    );

    fn options(dir: &TempDir) -> GenerateOptions {
        GenerateOptions {
            source_dir: dir.path().to_path_buf(),
            output_file: dir.path().join("foo_iface.go"),
            package: "mypkg".to_string(),
            struct_name: "Foo".to_string(),
            interface_name: "FooIface".to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    #[test]
    fn writes_interface_for_exported_pointer_receiver_methods() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("foo.go"), FOO_GO).unwrap();
        let opts = options(&dir);

        generate_interface(&opts, &PassthroughFormatter).unwrap();

        let written = fs::read_to_string(&opts.output_file).unwrap();
        assert_eq!(written, EXPECTED);
    }

    #[test]
    fn rerun_with_output_inside_source_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("foo.go"), FOO_GO).unwrap();
        let opts = options(&dir);

        generate_interface(&opts, &PassthroughFormatter).unwrap();
        generate_interface(&opts, &PassthroughFormatter).unwrap();

        let written = fs::read_to_string(&opts.output_file).unwrap();
        assert_eq!(written, EXPECTED);
    }

    #[test]
    fn overwrites_stale_output() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("foo.go"), FOO_GO).unwrap();
        let opts = options(&dir);
        fs::write(&opts.output_file, "package mypkg\n\ntype Old interface{}\n").unwrap();

        generate_interface(&opts, &PassthroughFormatter).unwrap();

        let written = fs::read_to_string(&opts.output_file).unwrap();
        assert_eq!(written, EXPECTED);
    }

    #[test]
    fn missing_package_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("foo.go"), FOO_GO).unwrap();
        let mut opts = options(&dir);
        opts.package = "nothere".to_string();

        let result = generate_interface(&opts, &PassthroughFormatter);

        assert!(
            matches!(result, Err(GenerateError::PackageNotFound(name)) if name == "nothere")
        );
        assert!(!opts.output_file.exists());
    }

    #[test]
    fn unparseable_source_names_the_folder() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.go"), "package mypkg\n\nfunc (").unwrap();
        let opts = options(&dir);

        let result = generate_interface(&opts, &PassthroughFormatter);

        assert!(
            matches!(result, Err(GenerateError::ParseDir { folder, .. }) if folder == dir.path())
        );
    }

    #[test]
    fn struct_without_matching_methods_yields_empty_interface() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("foo.go"),
            "package mypkg\n\ntype Foo struct{}\n\nfunc (f Foo) Qux() {}\n",
        )
        .unwrap();
        let opts = options(&dir);

        generate_interface(&opts, &PassthroughFormatter).unwrap();

        let written = fs::read_to_string(&opts.output_file).unwrap();
        assert!(written.contains("type FooIface interface {\n\t\n}"));
    }
}
