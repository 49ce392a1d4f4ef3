//! File finalization
//!
//! A body is rendered first; only then is the header built, from the imports
//! the body actually used.

use crate::gofile::GoFile;
use crate::naming::module_package;
use adlgen_core::GenResult;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// A finished source file, not yet on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

impl GeneratedFile {
    /// Persist the file, creating parent directories as needed.
    pub fn write(&self) -> GenResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, &self.contents)?;
        info!(path = %self.path.display(), bytes = self.contents.len(), "wrote file");
        Ok(())
    }
}

impl GoFile<'_> {
    /// Prefix `body` with the banner, package clause and used imports.
    pub fn finish(&self, body: &str) -> String {
        let mut code = String::new();
        code.push_str(&self.config.banner);
        code.push('\n');
        code.push_str(&format!("package {}\n\n", module_package(&self.module_name)));

        let used = self.imports.used_specs();
        if !used.is_empty() {
            code.push_str("import (\n");
            for spec in used {
                code.push_str(&format!("\t{}\n", spec.render()));
            }
            code.push_str(")\n\n");
        }
        code.push_str(body);
        code
    }

    /// Finish `body` into a file at `path`.
    pub fn into_file(self, path: impl AsRef<Path>, body: &str) -> GeneratedFile {
        GeneratedFile {
            path: path.as_ref().to_path_buf(),
            contents: self.finish(body),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::test_support::{config, fixture_resolver};
    use tempfile::TempDir;

    #[test]
    fn finish___no_used_imports___omits_import_block() {
        let r = fixture_resolver();
        let cfg = config();
        let f = GoFile::new(&r, &cfg, "app.test01");

        let code = f.finish("type A struct{}\n");

        assert_eq!(
            code,
            "// Code generated by adlgen - DO NOT EDIT.\npackage test01\n\ntype A struct{}\n"
        );
    }

    #[test]
    fn finish___used_imports___listed_in_registration_order() {
        let r = fixture_resolver();
        let cfg = config();
        let mut f = GoFile::new(&r, &cfg, "test01");
        f.pkg("goadl").unwrap();
        f.pkg("fmt").unwrap();

        let code = f.finish("");

        assert!(code.contains(
            "import (\n\t\"fmt\"\n\tgoadl \"github.com/adl-lang/goadl_rt/v3\"\n)\n\n"
        ));
        assert!(!code.contains("reflect"));
    }

    #[test]
    fn write___creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let file = GeneratedFile {
            path: dir.path().join("a/b/b.go"),
            contents: "package b\n".into(),
        };

        file.write().unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("a/b/b.go")).unwrap(), "package b\n");
    }
}
