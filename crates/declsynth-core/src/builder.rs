//! Entry point of statement synthesis.

use crate::action::ActionBuilder;
use crate::context::CodeContext;
use crate::error::ComposeError;
use crate::options::ComposeOptions;
use crate::step::Action;
use declsynth_scanner::index_paths;
use declsynth_types::{Object, PackageIndex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Everything code is synthesized against: scanned packages and the
/// objects every action can see.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Codes {
    #[serde(default)]
    pub packages: Vec<PackageIndex>,
    #[serde(default)]
    pub predefines: Vec<Object>,
}

/// Owns the packages and shared predefines; hands out one
/// [`ActionBuilder`] per action.
///
/// ```ignore
/// let builder = Builder::new(Codes { packages: vec![pkg], predefines })?;
/// let ctx = builder.build_action(&action, ComposeOptions::from_env())?;
/// println!("{}", ctx.code);
/// ```
#[derive(Debug)]
pub struct Builder {
    packages: Vec<PackageIndex>,
    predefines: BTreeMap<String, Object>,
}

impl Builder {
    /// Packages loaded without their path map (e.g. from JSON) are
    /// reindexed here.
    pub fn new(codes: Codes) -> Result<Self, ComposeError> {
        let mut predefines = BTreeMap::new();
        for object in codes.predefines {
            insert_unique(&mut predefines, object, ComposeError::DuplicatePredefine)?;
        }

        let mut packages = codes.packages;
        for pkg in &mut packages {
            if pkg.path_count() == 0 {
                debug!(package = %pkg.id, "rebuilding path index");
                index_paths(pkg);
            }
        }

        info!(
            packages = packages.len(),
            predefines = predefines.len(),
            "builder ready"
        );
        Ok(Self {
            packages,
            predefines,
        })
    }

    pub fn packages(&self) -> &[PackageIndex] {
        &self.packages
    }

    pub fn predefines(&self) -> &BTreeMap<String, Object> {
        &self.predefines
    }

    /// Starts an action. The options' predefines join the builder's own; its
    /// vars may not shadow any predefine.
    pub fn new_action_builder(
        &self,
        options: ComposeOptions,
    ) -> Result<ActionBuilder<'_>, ComposeError> {
        let mut predefines = self.predefines.clone();
        for object in &options.predefines {
            insert_unique(&mut predefines, object.clone(), ComposeError::DuplicatePredefine)?;
        }

        let mut vars = BTreeMap::new();
        for object in &options.vars {
            if predefines.contains_key(&object.name) {
                return Err(ComposeError::DuplicateVar(object.name.clone()));
            }
            insert_unique(&mut vars, object.clone(), ComposeError::DuplicateVar)?;
        }

        Ok(ActionBuilder::new(
            &self.packages,
            options,
            CodeContext::new(predefines, vars),
        ))
    }

    pub fn build_action(
        &self,
        action: &Action,
        options: ComposeOptions,
    ) -> Result<CodeContext, ComposeError> {
        self.new_action_builder(options)?.build_action(action)
    }
}

fn insert_unique(
    map: &mut BTreeMap<String, Object>,
    object: Object,
    duplicate: fn(String) -> ComposeError,
) -> Result<(), ComposeError> {
    if map.contains_key(&object.name) {
        return Err(duplicate(object.name));
    }
    map.insert(object.name.clone(), object);
    Ok(())
}
