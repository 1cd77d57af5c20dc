//! Receiver instance naming.

use crate::resolver::SymbolScope;
use declsynth_types::to_lower_camel;

/// Name chosen for a receiver instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceName {
    pub name: String,
    /// The name already refers to an instance of the same receiver type.
    pub reused: bool,
}

enum Candidate {
    Free,
    Reuse,
    Taken,
}

/// Picks the variable that holds the receiver of a method call.
///
/// Tries `to_lower_camel(recv_ty)`, then the same name suffixed with `0`,
/// `1`, ... A receiver instance of the same type (pointer markers ignored)
/// is reused; any local, predefine or other used symbol makes the name
/// taken.
pub fn receiver_instance<S: SymbolScope + ?Sized>(scope: &S, recv_ty: &str) -> InstanceName {
    let base = to_lower_camel(recv_ty);
    let wanted = recv_ty.trim_start_matches('*');
    let mut suffix: Option<usize> = None;

    loop {
        let candidate = match suffix {
            None => base.clone(),
            Some(n) => format!("{}{}", base, n),
        };
        match classify(scope, &candidate, wanted) {
            Candidate::Free => {
                return InstanceName {
                    name: candidate,
                    reused: false,
                }
            }
            Candidate::Reuse => {
                return InstanceName {
                    name: candidate,
                    reused: true,
                }
            }
            Candidate::Taken => suffix = Some(suffix.map_or(0, |n| n + 1)),
        }
    }
}

fn classify<S: SymbolScope + ?Sized>(scope: &S, name: &str, wanted: &str) -> Candidate {
    if scope.lookup_local(name).is_some() {
        return Candidate::Taken;
    }
    match scope.lookup_used(name) {
        Some(used) if used.is_receiver() && used.ty.trim_start_matches('*') == wanted => {
            Candidate::Reuse
        }
        Some(_) => Candidate::Taken,
        None => Candidate::Free,
    }
}
