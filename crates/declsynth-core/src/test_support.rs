//! Fixtures shared by the unit tests of this crate.

use declsynth_scanner::{parse_feed, scan_package, ScanOptions};
use declsynth_types::{FuncDecl, PackageIndex, SymbolPath};

pub(crate) const PEOPLE_ID: &str = "example.com/people";

const PEOPLE_FEED: &str = r#"{
    "name": "people",
    "id": "example.com/people",
    "files": [{
        "name": "person.go",
        "doc": ["// Package people models members."],
        "types": [
            {"name": "Person", "type": {"kind": "struct", "fields": [
                {"names": ["Name"], "type": {"kind": "ident", "name": "string"}},
                {"names": ["Home"], "type": {"kind": "pointer", "elem": {"kind": "ident", "name": "Address"}}},
                {"names": ["Tags"], "type": {"kind": "array", "elem": {"kind": "ident", "name": "string"}}}
            ]}},
            {"name": "Address", "type": {"kind": "struct", "fields": [
                {"names": ["City"], "type": {"kind": "ident", "name": "string"}},
                {"names": ["Geo"], "type": {"kind": "ident", "name": "Geo"}}
            ]}},
            {"name": "Geo", "type": {"kind": "struct", "fields": [
                {"names": ["Lat"], "type": {"kind": "ident", "name": "float64"}}
            ]}},
            {"name": "Greeter", "type": {"kind": "interface", "methods": [
                {"names": ["t"], "type": {"kind": "func",
                    "params": [{"type": {"kind": "ident", "name": "string"}}],
                    "results": [{"type": {"kind": "ident", "name": "string"}}]}}
            ]}},
            {"name": "Namer", "type": {"kind": "interface", "methods": [
                {"names": ["Rename"], "type": {"kind": "func",
                    "params": [{"type": {"kind": "ident", "name": "string"}}],
                    "results": [{"type": {"kind": "ident", "name": "bool"}},
                                {"type": {"kind": "ident", "name": "error"}}]}}
            ]}}
        ],
        "funcs": [
            {"name": "t",
             "receivers": [{"names": ["p"], "type": {"kind": "ident", "name": "Person"}}],
             "params": [{"names": ["name"], "type": {"kind": "ident", "name": "string"}}],
             "results": [{"type": {"kind": "ident", "name": "string"}}]},
            {"name": "Rename",
             "receivers": [{"names": ["p"], "type": {"kind": "pointer", "elem": {"kind": "ident", "name": "Person"}}}],
             "params": [{"names": ["name"], "type": {"kind": "ident", "name": "string"}}],
             "results": [{"names": ["ok"], "type": {"kind": "ident", "name": "bool"}},
                         {"names": ["err"], "type": {"kind": "ident", "name": "error"}}]},
            {"name": "NewPerson",
             "params": [{"names": ["name"], "type": {"kind": "ident", "name": "string"}},
                        {"names": ["tags"], "type": {"kind": "ellipsis", "elem": {"kind": "ident", "name": "string"}}}],
             "results": [{"type": {"kind": "pointer", "elem": {"kind": "ident", "name": "Person"}}}]},
            {"name": "Describe",
             "params": [{"names": ["v"], "type": {"kind": "interface"}}],
             "results": [{"type": {"kind": "ident", "name": "string"}}]},
            {"name": "Greet",
             "params": [{"names": ["p"], "type": {"kind": "ident", "name": "Person"}}],
             "results": [{"type": {"kind": "ident", "name": "string"}}]}
        ]
    }]
}"#;

/// The scanned and indexed `people` package.
pub(crate) fn people_package() -> PackageIndex {
    let feed = parse_feed(PEOPLE_FEED).unwrap();
    scan_package(&feed, ScanOptions::default()).unwrap()
}

/// A function reference as an action carries it: just the name and the path
/// of a declaration in `person.go`.
pub(crate) fn people_func(last_segment: &str) -> FuncDecl {
    FuncDecl {
        path: SymbolPath::from_segments([PEOPLE_ID, "person.go", last_segment]),
        name: last_segment
            .rsplit('.')
            .next()
            .unwrap_or(last_segment)
            .to_string(),
        ..Default::default()
    }
}
