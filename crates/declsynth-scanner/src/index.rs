//! Path indexing.
//!
//! Assigns every declaration of a [`PackageIndex`] its [`SymbolPath`] and
//! registers it in the package's path map. Runs once per scan, after all
//! files are collected, and again on a package loaded from JSON since the
//! map itself is not serialized.

use declsynth_types::{DeclLocator, DeclSlot, PackageIndex, ScanIssue, SymbolPath};
use tracing::{debug, warn};

/// Rebuilds the path map of `pkg` from its files.
///
/// A path already taken keeps its first declaration; the later one is left
/// out of the map and reported in `pkg.errors`.
pub fn index_paths(pkg: &mut PackageIndex) {
    pkg.clear_paths();
    let root = pkg.root_path();
    let mut duplicates = Vec::new();

    for file_idx in 0..pkg.files.len() {
        let registrations = assign_file_paths(pkg, &root, file_idx);
        let file_name = pkg.files[file_idx].name.clone();

        for (path, slot) in registrations {
            let locator = DeclLocator {
                file: file_idx,
                slot,
            };
            if pkg.register(&path, locator) {
                debug!(path = %path, "registered path");
            } else {
                warn!(path = %path, "duplicate declaration path; keeping the first");
                duplicates.push(ScanIssue {
                    file: file_name.clone(),
                    decl: path.key(),
                    message: "duplicate declaration path".to_string(),
                });
            }
        }
    }

    for issue in duplicates {
        if !pkg.errors.contains(&issue) {
            pkg.errors.push(issue);
        }
    }
}

/// Writes the paths of one file's declarations and returns what to register.
fn assign_file_paths(
    pkg: &mut PackageIndex,
    root: &SymbolPath,
    file_idx: usize,
) -> Vec<(SymbolPath, DeclSlot)> {
    let file = &mut pkg.files[file_idx];
    let file_path = root.child(file.name.clone());
    file.path = file_path.clone();

    let mut out = Vec::new();

    for (i, import) in file.imports.iter_mut().enumerate() {
        let path = file_path.child(import.alias_name());
        import.path = path.clone();
        out.push((path, DeclSlot::Import(i)));
    }

    for (i, value) in file.values.iter_mut().enumerate() {
        let path = file_path.child(value.name.clone());
        value.path = path.clone();
        out.push((path, DeclSlot::Value(i)));
    }

    for (i, func) in file.funcs.iter_mut().enumerate() {
        let path = file_path.child(func.qualified_name());
        func.path = path.clone();
        out.push((path, DeclSlot::Func(i)));
    }

    for (i, ty) in file.types.iter_mut().enumerate() {
        let type_path = file_path.child(ty.name.clone());
        ty.path = type_path.clone();
        out.push((type_path.clone(), DeclSlot::Type(i)));

        for (j, field) in ty.fields.iter_mut().enumerate() {
            let path = type_path.child(field.name.clone());
            field.path = path.clone();
            out.push((path, DeclSlot::Field { ty: i, field: j }));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use declsynth_types::{DeclRef, Field, FuncDecl, ImportDecl, SourceFile, TypeDecl, TypeKind};

    fn sample_package() -> PackageIndex {
        let mut pkg = PackageIndex::new("people", "example.com/people");
        pkg.files.push(SourceFile {
            name: "person.go".into(),
            imports: vec![ImportDecl {
                name: None,
                value: "\"strings\"".into(),
                ..Default::default()
            }],
            types: vec![TypeDecl {
                path: SymbolPath::new(),
                kind: TypeKind::Struct,
                name: "Person".into(),
                fields: vec![Field::new("Name", "string"), Field::new("Age", "int")],
                doc: String::new(),
            }],
            funcs: vec![
                FuncDecl {
                    name: "NewPerson".into(),
                    results: vec![Field::new("", "*Person")],
                    ..Default::default()
                },
                FuncDecl {
                    receiver: Some(Field::new("p", "*Person")),
                    name: "Greet".into(),
                    results: vec![Field::new("", "string")],
                    ..Default::default()
                },
            ],
            ..Default::default()
        });
        pkg
    }

    #[test]
    fn test_index_assigns_hierarchical_paths() {
        let mut pkg = sample_package();
        index_paths(&mut pkg);

        let file = &pkg.files[0];
        assert_eq!(file.path.key(), "example.com/people -> person.go");
        assert_eq!(
            file.imports[0].path.key(),
            "example.com/people -> person.go -> strings"
        );
        assert_eq!(
            file.funcs[1].path.key(),
            "example.com/people -> person.go -> *Person.Greet"
        );
        assert_eq!(
            file.types[0].fields[1].path.key(),
            "example.com/people -> person.go -> Person -> Age"
        );
        // import, two funcs, the type and its two fields
        assert_eq!(pkg.path_count(), 6);
    }

    #[test]
    fn test_indexed_paths_resolve_to_records() {
        let mut pkg = sample_package();
        index_paths(&mut pkg);

        let field_path = pkg.files[0].types[0].fields[0].path.clone();
        match pkg.find_path(&field_path) {
            Some(DeclRef::Field(f)) => assert_eq!(f.ty, "string"),
            other => panic!("expected field, got {:?}", other.map(|d| d.kind())),
        }

        let func_path = pkg.files[0].funcs[0].path.clone();
        assert!(matches!(pkg.find_path(&func_path), Some(DeclRef::Func(f)) if f.name == "NewPerson"));
        // the file path is assigned but not registered
        assert!(pkg.find_path(&pkg.files[0].path.clone()).is_none());
    }

    #[test]
    fn test_duplicate_paths_keep_first_and_report() {
        let mut pkg = sample_package();
        pkg.files[0].funcs.push(FuncDecl {
            name: "NewPerson".into(),
            ..Default::default()
        });
        index_paths(&mut pkg);

        assert_eq!(pkg.errors.len(), 1);
        assert!(pkg.errors[0].decl.ends_with("NewPerson"));
        let path = pkg.files[0].funcs[0].path.clone();
        assert!(matches!(pkg.find_path(&path), Some(DeclRef::Func(f)) if !f.results.is_empty()));

        // reindexing does not report the same duplicate twice
        index_paths(&mut pkg);
        assert_eq!(pkg.errors.len(), 1);
    }

    #[test]
    fn test_reindex_after_json_round_trip() {
        let mut pkg = sample_package();
        index_paths(&mut pkg);
        let json = serde_json::to_string(&pkg).unwrap();

        let mut loaded: PackageIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.path_count(), 0);
        index_paths(&mut loaded);
        assert_eq!(
            loaded.path_keys().collect::<Vec<_>>(),
            pkg.path_keys().collect::<Vec<_>>()
        );
    }
}
