//! Output formatting for the declsynth CLI.

use declsynth::compose::CodeContext;
use declsynth::types::PackageIndex;
use serde::Serialize;
use std::collections::BTreeMap;

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

/// Human-readable summary of a scanned package.
pub fn format_scan_summary(pkg: &PackageIndex, verbose: bool) -> String {
    let mut out = format!("Package {} ({})\n", pkg.name, pkg.id);
    if !pkg.doc.is_empty() {
        out.push_str(&format!("  {}\n", pkg.doc));
    }

    let imports: usize = pkg.files.iter().map(|f| f.imports.len()).sum();
    let values: usize = pkg.files.iter().map(|f| f.values.len()).sum();
    out.push_str(&format!(
        "  files: {}  imports: {}  types: {}  funcs: {}  values: {}\n",
        pkg.files.len(),
        imports,
        pkg.types().count(),
        pkg.funcs().count(),
        values
    ));
    out.push_str(&format!("  paths: {}\n", pkg.path_count()));

    if !pkg.errors.is_empty() {
        out.push_str(&format!("  skipped: {}\n", pkg.errors.len()));
        for issue in &pkg.errors {
            out.push_str(&format!("    {}\n", issue));
        }
    }

    if verbose {
        for func in pkg.funcs() {
            out.push_str(&format!("  func {}\n", func.signature()));
        }
    }
    out
}

/// Bookkeeping printed after the code of a composed action.
pub fn format_context_summary(ctx: &CodeContext) -> String {
    let mut out = String::new();
    out.push_str(&format!("vars: {}\n", join_keys(&ctx.vars)));
    out.push_str(&format!("used: {}\n", join_keys(&ctx.used)));
    out.push_str(&format!(
        "imports: {}\n",
        ctx.imports
            .values()
            .map(|pkg| format!("{} \"{}\"", pkg.name, pkg.id))
            .collect::<Vec<_>>()
            .join(", ")
    ));
    out.push_str(&format!(
        "required types: {}\n",
        ctx.required_new_type
            .iter()
            .map(|(var, ty)| format!("{} {}", var, ty.name))
            .collect::<Vec<_>>()
            .join(", ")
    ));
    out
}

fn join_keys<V>(map: &BTreeMap<String, V>) -> String {
    map.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}
