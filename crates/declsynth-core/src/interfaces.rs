//! Interface conformance over scanned method sets.
//!
//! An interface's required set is built from its method fields
//! (`name(in1,in2) (out1,out2)`), following embedded interfaces. A type
//! implements the interface when every required signature is among the
//! signatures of the methods declared on it.

use crate::error::LookupError;
use declsynth_types::type_parsing::parse_func_type;
use declsynth_types::{FuncDecl, PackageIndex, TypeDecl, TypeKind};
use std::collections::BTreeSet;

fn find_type<'p>(
    packages: &'p [PackageIndex],
    name: &str,
) -> Option<(&'p PackageIndex, &'p TypeDecl)> {
    packages
        .iter()
        .find_map(|pkg| pkg.find_type(name).map(|ty| (pkg, ty)))
}

/// Whether `type_name` implements `interface_name`. Every type implements an
/// interface without methods.
pub fn implements(
    packages: &[PackageIndex],
    type_name: &str,
    interface_name: &str,
) -> Result<bool, LookupError> {
    let mut required = BTreeSet::new();
    let mut visited = BTreeSet::new();
    collect_required(packages, interface_name, &mut visited, &mut required)?;

    let (pkg, ty) = find_type(packages, type_name)
        .ok_or_else(|| LookupError::TypeNotFound(type_name.to_string()))?;
    if required.is_empty() {
        return Ok(true);
    }

    let provided: BTreeSet<String> = pkg.methods_of(&ty.name).map(FuncDecl::signature).collect();
    Ok(required.is_subset(&provided))
}

fn collect_required(
    packages: &[PackageIndex],
    interface_name: &str,
    visited: &mut BTreeSet<String>,
    out: &mut BTreeSet<String>,
) -> Result<(), LookupError> {
    if !visited.insert(interface_name.to_string()) {
        return Ok(());
    }

    let iface = find_type(packages, interface_name)
        .map(|(_, ty)| ty)
        .filter(|ty| ty.kind == TypeKind::Interface)
        .ok_or_else(|| LookupError::InterfaceNotFound(interface_name.to_string()))?;

    for method in &iface.fields {
        match parse_func_type(&method.ty) {
            Some((params, results)) => {
                out.insert(format!(
                    "{}({}) ({})",
                    method.name,
                    params.join(","),
                    results.join(",")
                ));
            }
            // embedded interface
            None => collect_required(packages, &method.ty, visited, out)?,
        }
    }
    Ok(())
}
