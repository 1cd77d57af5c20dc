//! # Statement Synthesis
//!
//! Turns one [`Step`] into one line of code.
//!
//! | Operation | Requires | Emits |
//! |-----------|----------|-------|
//! | invoke | function found by path | `rs := person.t(a1)` |
//! | assign (or none) | results and args | `x, y := a, b` |
//! | compare | two args, a symbol | `ok = response.Code==100` |
//! | new | one arg, one result | `a := &strings.Builder{}` |
//!
//! Synthesis reads the [`CodeContext`] and writes only into a
//! [`ContextDelta`]; the caller applies the delta once the whole step has
//! succeeded, so a failing step leaves the context as it was.

use crate::context::{CodeContext, ContextDelta, PackageRef, TypeMismatch};
use crate::error::{ComposeError, ResolveError};
use crate::naming::receiver_instance;
use crate::options::ComposeOptions;
use crate::resolver::{Resolver, SymbolScope};
use crate::step::{Operation, Param, Step};
use declsynth_types::type_parsing::{check_args_type, is_dynamic, is_variadic, strip_variadic};
use declsynth_types::{DeclRef, Field, FuncDecl, Object, ObjectScope, PackageIndex, TypeDecl};
use tracing::{debug, warn};

/// Result name that discards a value; never resolved or declared.
const BLANK: &str = "_";

/// Operators whose result is a boolean.
const BOOL_OPERATORS: &[&str] = &["==", "!=", "<", "<=", ">", ">=", "&&", "||"];

/// Looks the function an invoke step names up by its path.
pub(crate) fn find_func<'p>(
    packages: &'p [PackageIndex],
    target: &FuncDecl,
) -> Result<&'p FuncDecl, ComposeError> {
    match packages.iter().find_map(|pkg| pkg.find_path(&target.path)) {
        Some(DeclRef::Func(func)) => Ok(func),
        Some(other) => Err(ComposeError::UnexpectedDecl {
            path: target.path.key(),
            expected: "func",
            found: other.kind(),
        }),
        None => Err(ComposeError::FuncNotFound {
            path: target.path.key(),
        }),
    }
}

fn find_type<'p>(packages: &'p [PackageIndex], ty: &str) -> Option<&'p TypeDecl> {
    packages.iter().find_map(|pkg| pkg.find_type(ty))
}

/// Expected type of argument `index`; the variadic marker is stripped.
fn expected_param(func: &FuncDecl, index: usize) -> &str {
    func.params
        .get(index)
        .or_else(|| func.params.last())
        .map(|p| strip_variadic(&p.ty))
        .unwrap_or_default()
}

fn first_non_empty(candidates: &[&str]) -> String {
    candidates
        .iter()
        .find(|ty| !ty.is_empty())
        .map(|ty| ty.to_string())
        .unwrap_or_default()
}

// =============================================================================
// Step frame
// =============================================================================

/// Read-only view of the context plus the changes the current step makes.
pub(crate) struct StepFrame<'a> {
    ctx: &'a CodeContext,
    packages: &'a [PackageIndex],
    options: &'a ComposeOptions,
    delta: ContextDelta,
}

impl SymbolScope for StepFrame<'_> {
    fn lookup_local(&self, name: &str) -> Option<&Object> {
        self.ctx.lookup(name)
    }

    fn lookup_used(&self, name: &str) -> Option<&Object> {
        self.delta
            .used
            .get(name)
            .or_else(|| self.ctx.used.get(name))
    }

    fn packages(&self) -> &[PackageIndex] {
        self.packages
    }
}

impl<'a> StepFrame<'a> {
    pub(crate) fn new(
        ctx: &'a CodeContext,
        packages: &'a [PackageIndex],
        options: &'a ComposeOptions,
    ) -> Self {
        Self {
            ctx,
            packages,
            options,
            delta: ContextDelta::default(),
        }
    }

    pub(crate) fn into_delta(self) -> ContextDelta {
        self.delta
    }

    /// Synthesizes `step`. An empty step yields an empty string and leaves
    /// the delta empty.
    pub(crate) fn synthesize(&mut self, step: &Step) -> Result<String, ComposeError> {
        if step.is_empty() {
            return Ok(String::new());
        }
        match &step.operation {
            Some(Operation::Invoke(func)) => self.invoke(step, func),
            Some(Operation::Assign) | None => self.assign(step),
            Some(Operation::Compare { symbol }) => self.compare(step, symbol),
            Some(Operation::New) => self.new_value(step),
        }
    }

    fn resolve(&self, name: &str) -> Result<Vec<Object>, ResolveError> {
        Resolver::new(self).resolve(name)
    }

    fn mark_used(&mut self, object: &Object) {
        debug!(name = %object.name, ty = %object.ty, "marking used");
        self.delta.used.insert(object.name.clone(), object.clone());
    }

    // -------------------------------------------------------------------------
    // Result binding
    // -------------------------------------------------------------------------

    /// Builds `r1, r2 := ` or `r1, r2 = ` for the step's results.
    ///
    /// When every result already resolves the reuse form is used, otherwise
    /// the declare form. Receiver instances resolve too, so a result never
    /// redeclares one. `declared(i)` is the type result `i` gets in Vars;
    /// an empty one keeps the type of the existing object.
    fn bind_results<F>(&mut self, results: &[Field], declared: F) -> Result<String, ComposeError>
    where
        F: Fn(usize) -> String,
    {
        if results.is_empty() {
            return Ok(String::new());
        }

        let mut all_exist = true;
        let mut names = Vec::with_capacity(results.len());

        for (i, result) in results.iter().enumerate() {
            names.push(result.name.as_str());
            if result.name == BLANK {
                continue;
            }

            let resolved = self.resolve(&result.name);
            let existing = match resolved {
                Ok(chain) => {
                    self.mark_used(&chain[0]);
                    chain.last().cloned()
                }
                Err(ResolveError::NotFound { .. }) => {
                    all_exist = false;
                    None
                }
                Err(e) => return Err(e.into()),
            };

            if result.name.contains('.') {
                continue;
            }
            let declares = match &existing {
                None => true,
                Some(_) => self.ctx.vars.contains_key(&result.name),
            };
            if declares {
                let mut ty = declared(i);
                if ty.is_empty() {
                    ty = existing.map(|o| o.ty).unwrap_or_default();
                }
                debug!(name = %result.name, ty = %ty, "putting var");
                self.delta
                    .vars
                    .insert(result.name.clone(), Object::new(result.name.clone(), ty));
            }
        }

        let assign = if all_exist { "=" } else { ":=" };
        Ok(format!("{} {} ", names.join(", "), assign))
    }

    // -------------------------------------------------------------------------
    // Invoke
    // -------------------------------------------------------------------------

    fn invoke(&mut self, step: &Step, target: &FuncDecl) -> Result<String, ComposeError> {
        let func = find_func(self.packages, target)?;
        let owner = self.owner_prefix(func)?;
        let args = self.invoke_args(func, &step.args)?;
        let binding = self.bind_results(&step.results, |i| {
            let callee = func.results.get(i).map_or("", |r| r.ty.as_str());
            let own = step.results.get(i).map_or("", |r| r.ty.as_str());
            first_non_empty(&[callee, own])
        })?;
        Ok(format!("{}{}{}({})", binding, owner, func.name, args.join(", ")))
    }

    /// `instance.` for methods, `pkg.` for package-level functions. Records
    /// the owning package as an import.
    fn owner_prefix(&mut self, func: &'a FuncDecl) -> Result<String, ComposeError> {
        let pkg_path = func
            .path
            .trim_end(2)
            .ok_or_else(|| ComposeError::IllegalFuncPath {
                path: func.path.key(),
            })?;

        let packages: &'a [PackageIndex] = self.packages;
        let owner = packages
            .iter()
            .find_map(|pkg| match pkg.find_path(&pkg_path) {
                Some(DeclRef::Package(found)) => Some(found),
                _ => None,
            });
        if let Some(pkg) = owner {
            self.delta.imports.insert(
                pkg.name.clone(),
                PackageRef {
                    name: pkg.name.clone(),
                    id: pkg.id.clone(),
                },
            );
        }

        match &func.receiver {
            Some(recv) => {
                let instance = self.receiver(recv, owner);
                Ok(format!("{}.", instance))
            }
            None => Ok(owner
                .filter(|pkg| !pkg.name.is_empty())
                .map(|pkg| format!("{}.", pkg.name))
                .unwrap_or_default()),
        }
    }

    /// Names the receiver instance and records it in Used.
    fn receiver(&mut self, recv: &Field, owner: Option<&'a PackageIndex>) -> String {
        let instance = receiver_instance(&*self, &recv.ty);
        let packages: &'a [PackageIndex] = self.packages;
        let decl = owner
            .and_then(|pkg| pkg.find_type(&recv.ty))
            .or_else(|| find_type(packages, &recv.ty));

        if !instance.reused {
            if let Some(decl) = decl {
                self.delta
                    .required_new_type
                    .insert(instance.name.clone(), decl.clone());
            }
        }

        let object = Object::new(instance.name.clone(), recv.ty.clone())
            .with_scope(ObjectScope::Receiver)
            .with_path(decl.map(|d| d.path.clone()).unwrap_or_default());
        self.mark_used(&object);
        instance.name
    }

    fn invoke_args(&mut self, func: &FuncDecl, args: &[Param]) -> Result<Vec<String>, ComposeError> {
        let variadic = func.params.last().is_some_and(|p| is_variadic(&p.ty));
        if args.len() > func.params.len() && !variadic {
            return Err(ComposeError::TooManyArguments {
                func: func.qualified_name(),
                params: func.params.len(),
                got: args.len(),
            });
        }

        let mut out = Vec::with_capacity(args.len());
        for (index, arg) in args.iter().enumerate() {
            if arg.is_literal() {
                out.push(arg.value.clone());
                continue;
            }

            let chain = self.resolve(&arg.value)?;
            let leaf = chain[chain.len() - 1].clone();
            self.mark_used(&chain[0]);
            if chain.len() > 1 {
                self.delta.used.insert(arg.value.clone(), leaf.clone());
            }

            let expected = expected_param(func, index);
            let actual = if leaf.ty.is_empty() { &arg.ty } else { &leaf.ty };
            self.check_arg(func, index, arg, expected, actual)?;

            if is_dynamic(&leaf.ty) && !expected.is_empty() && !is_dynamic(expected) {
                out.push(format!("{}.({})", arg.value, expected));
            } else {
                out.push(arg.value.clone());
            }
        }
        Ok(out)
    }

    fn check_arg(
        &mut self,
        func: &FuncDecl,
        index: usize,
        arg: &Param,
        expected: &str,
        actual: &str,
    ) -> Result<(), ComposeError> {
        if expected.is_empty()
            || actual.is_empty()
            || is_dynamic(expected)
            || is_dynamic(actual)
            || check_args_type(actual, expected)
        {
            return Ok(());
        }

        let mismatch = TypeMismatch {
            func: func.qualified_name(),
            index,
            arg: arg.value.clone(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        };
        if self.options.strict_types {
            return Err(ComposeError::TypeMismatch(mismatch));
        }
        warn!(
            func = %mismatch.func,
            index,
            expected = %mismatch.expected,
            actual = %mismatch.actual,
            "argument type mismatch"
        );
        self.delta.diagnostics.push(mismatch);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Assign / compare / new
    // -------------------------------------------------------------------------

    /// Types of the arguments as far as they can be told: the explicit type,
    /// else the resolved symbol's. Resolved symbols are marked used.
    fn arg_types(&mut self, args: &[Param]) -> Vec<String> {
        let mut out = Vec::with_capacity(args.len());
        for arg in args {
            let mut resolved = String::new();
            if !arg.is_literal() {
                if let Ok(chain) = self.resolve(&arg.value) {
                    self.mark_used(&chain[0]);
                    resolved = chain[chain.len() - 1].ty.clone();
                }
            }
            out.push(first_non_empty(&[arg.ty.as_str(), resolved.as_str()]));
        }
        out
    }

    fn assign(&mut self, step: &Step) -> Result<String, ComposeError> {
        if step.results.is_empty() {
            return Err(ComposeError::MissingResults { op: "assign" });
        }
        if step.args.is_empty() {
            return Err(ComposeError::MissingArgs { op: "assign" });
        }

        let arg_types = self.arg_types(&step.args);
        let binding = self.bind_results(&step.results, |i| {
            let arg = arg_types.get(i).map_or("", String::as_str);
            first_non_empty(&[step.results[i].ty.as_str(), arg])
        })?;
        Ok(format!("{}{}", binding, step.arg_names().join(", ")))
    }

    fn compare(&mut self, step: &Step, symbol: &str) -> Result<String, ComposeError> {
        if step.args.len() != 2 {
            return Err(ComposeError::ArgsLength {
                op: "unary",
                expected: 2,
                got: step.args.len(),
            });
        }
        if symbol.is_empty() {
            return Err(ComposeError::MissingOperator);
        }

        let arg_types = self.arg_types(&step.args);
        let produced = if BOOL_OPERATORS.contains(&symbol) {
            "bool"
        } else {
            arg_types[0].as_str()
        };
        let binding = self.bind_results(&step.results, |i| {
            first_non_empty(&[step.results[i].ty.as_str(), produced])
        })?;
        Ok(format!(
            "{}{}{}{}",
            binding, step.args[0].value, symbol, step.args[1].value
        ))
    }

    fn new_value(&mut self, step: &Step) -> Result<String, ComposeError> {
        if step.args.len() != 1 {
            return Err(ComposeError::ArgsLength {
                op: "new",
                expected: 1,
                got: step.args.len(),
            });
        }
        if step.results.len() != 1 {
            return Err(ComposeError::ResultsLength {
                op: "new",
                expected: 1,
                got: step.results.len(),
            });
        }

        let ty = step.args[0].value.as_str();
        let result = &step.results[0];
        let packages: &'a [PackageIndex] = self.packages;

        if let Some((qualifier, _)) = ty.rsplit_once('.') {
            if let Some(pkg) = packages.iter().find(|pkg| pkg.name == qualifier) {
                self.delta.imports.insert(
                    pkg.name.clone(),
                    PackageRef {
                        name: pkg.name.clone(),
                        id: pkg.id.clone(),
                    },
                );
            }
        }

        let declared = if result.ty.is_empty() {
            format!("*{}", ty)
        } else {
            result.ty.clone()
        };
        let binding = self.bind_results(&step.results, |_| declared.clone())?;

        if let Some(decl) = find_type(packages, ty) {
            self.delta
                .required_new_type
                .insert(result.name.clone(), decl.clone());
        }
        Ok(format!("{}&{}{{}}", binding, ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{people_func, people_package};
    use std::collections::BTreeMap;

    fn context(predefines: &[(&str, &str)], vars: &[(&str, &str)]) -> CodeContext {
        let to_map = |items: &[(&str, &str)]| -> BTreeMap<String, Object> {
            items
                .iter()
                .map(|(name, ty)| (name.to_string(), Object::new(*name, *ty)))
                .collect()
        };
        CodeContext::new(to_map(predefines), to_map(vars))
    }

    fn run(
        ctx: &CodeContext,
        options: &ComposeOptions,
        step: &Step,
    ) -> Result<(String, ContextDelta), ComposeError> {
        let packages = vec![people_package()];
        let mut frame = StepFrame::new(ctx, &packages, options);
        let code = frame.synthesize(step)?;
        Ok((code, frame.into_delta()))
    }

    fn invoke(last_segment: &str) -> Step {
        Step::new(Operation::invoke(people_func(last_segment)))
    }

    #[test]
    fn test_empty_step_yields_nothing() {
        let ctx = context(&[], &[]);
        let (code, delta) = run(&ctx, &ComposeOptions::default(), &Step::default()).unwrap();
        assert_eq!(code, "");
        assert!(delta.is_empty());
    }

    #[test]
    fn test_method_invoke_declares_result() {
        let ctx = context(&[("a1", "string"), ("a2", "Person")], &[]);
        let step = invoke("Person.t")
            .with_result("rs")
            .with_arg(Param::object("a1"));
        let (code, delta) = run(&ctx, &ComposeOptions::default(), &step).unwrap();

        assert_eq!(code, "rs := person.t(a1)");
        assert_eq!(delta.vars["rs"].ty, "string");
        assert!(delta.used.contains_key("a1"));
        assert_eq!(delta.used["person"].ty, "Person");
        assert_eq!(delta.required_new_type["person"].name, "Person");
        assert_eq!(delta.imports["people"].id, "example.com/people");
    }

    #[test]
    fn test_existing_result_uses_reuse_form() {
        let ctx = context(&[], &[("rs", "string")]);
        let step = invoke("Person.t")
            .with_result("rs")
            .with_arg(Param::object("rs"));
        let (code, delta) = run(&ctx, &ComposeOptions::default(), &step).unwrap();
        assert_eq!(code, "rs = person.t(rs)");
        assert!(delta.used.contains_key("rs"));
        assert!(delta.vars.contains_key("rs"));
    }

    #[test]
    fn test_mixed_results_collapse_to_declare() {
        let ctx = context(&[], &[("ok", "bool")]);
        let step = invoke("*Person.Rename")
            .with_result("ok")
            .with_result("err")
            .with_arg(Param::object("\"bob\""));
        let (code, delta) = run(&ctx, &ComposeOptions::default(), &step).unwrap();
        assert_eq!(code, "ok, err := person.Rename(\"bob\")");
        assert_eq!(delta.vars["err"].ty, "error");
        assert!(delta.used.contains_key("ok"));
    }

    #[test]
    fn test_predefined_result_is_not_redeclared() {
        let ctx = context(&[("out", "string")], &[("p", "Person")]);
        let step = invoke("Greet")
            .with_result("out")
            .with_arg(Param::object("p"));
        let (code, delta) = run(&ctx, &ComposeOptions::default(), &step).unwrap();
        assert_eq!(code, "out = people.Greet(p)");
        assert!(!delta.vars.contains_key("out"));
        assert!(delta.used.contains_key("out"));
    }

    #[test]
    fn test_package_func_with_variadic_args() {
        let ctx = context(&[("name", "string"), ("tag", "string")], &[]);
        let step = invoke("NewPerson")
            .with_result("p")
            .with_arg(Param::object("name"))
            .with_arg(Param::object("\"a\""))
            .with_arg(Param::object("tag"));
        let (code, delta) = run(&ctx, &ComposeOptions::default(), &step).unwrap();
        assert_eq!(code, "p := people.NewPerson(name, \"a\", tag)");
        assert_eq!(delta.vars["p"].ty, "*Person");
        assert!(delta.diagnostics.is_empty());
    }

    #[test]
    fn test_too_many_arguments() {
        let ctx = context(&[("a", "string"), ("b", "string")], &[]);
        let step = invoke("Person.t")
            .with_arg(Param::object("a"))
            .with_arg(Param::object("b"));
        let err = run(&ctx, &ComposeOptions::default(), &step).unwrap_err();
        assert_eq!(
            err,
            ComposeError::TooManyArguments {
                func: "Person.t".into(),
                params: 1,
                got: 2,
            }
        );
    }

    #[test]
    fn test_dynamic_argument_is_converted() {
        let ctx = context(&[("v", "interface{}")], &[]);
        let step = invoke("Person.t").with_arg(Param::object("v"));
        let (code, delta) = run(&ctx, &ComposeOptions::default(), &step).unwrap();
        assert_eq!(code, "person.t(v.(string))");
        assert!(delta.diagnostics.is_empty());

        let step = invoke("Describe").with_arg(Param::object("v"));
        let (code, _) = run(&ctx, &ComposeOptions::default(), &step).unwrap();
        assert_eq!(code, "people.Describe(v)");
    }

    #[test]
    fn test_mismatch_is_lenient_unless_strict() {
        let ctx = context(&[("n", "int")], &[]);
        let step = invoke("Person.t").with_arg(Param::object("n"));

        let (code, delta) = run(&ctx, &ComposeOptions::default(), &step).unwrap();
        assert_eq!(code, "person.t(n)");
        assert_eq!(delta.diagnostics.len(), 1);
        assert_eq!(delta.diagnostics[0].expected, "string");
        assert_eq!(delta.diagnostics[0].actual, "int");

        let strict = ComposeOptions::default().with_strict_types(true);
        let err = run(&ctx, &strict, &step).unwrap_err();
        assert!(matches!(err, ComposeError::TypeMismatch(ref m) if m.index == 0));
    }

    #[test]
    fn test_dotted_argument_records_root_and_leaf() {
        let ctx = context(&[("p", "Person")], &[]);
        let step = invoke("Person.t").with_arg(Param::object("p.Home.City"));
        let (code, delta) = run(&ctx, &ComposeOptions::default(), &step).unwrap();
        assert_eq!(code, "person.t(p.Home.City)");
        assert_eq!(delta.used["p"].ty, "Person");
        assert_eq!(delta.used["p.Home.City"].ty, "string");
    }

    #[test]
    fn test_unresolved_argument_fails() {
        let ctx = context(&[], &[]);
        let step = invoke("Person.t").with_arg(Param::object("missing"));
        let err = run(&ctx, &ComposeOptions::default(), &step).unwrap_err();
        assert!(matches!(err, ComposeError::Resolve(ResolveError::NotFound { .. })));
    }

    #[test]
    fn test_func_lookup_errors() {
        let ctx = context(&[], &[]);
        let err = run(&ctx, &ComposeOptions::default(), &invoke("Nope")).unwrap_err();
        assert!(matches!(err, ComposeError::FuncNotFound { .. }));

        let err = run(&ctx, &ComposeOptions::default(), &invoke("Person")).unwrap_err();
        assert_eq!(
            err,
            ComposeError::UnexpectedDecl {
                path: "example.com/people -> person.go -> Person".into(),
                expected: "func",
                found: "type",
            }
        );
    }

    #[test]
    fn test_new_value() {
        let ctx = context(&[], &[]);
        let step = Step::new(Operation::New)
            .with_result("a")
            .with_arg(Param::object("strings.Builder"));
        let (code, delta) = run(&ctx, &ComposeOptions::default(), &step).unwrap();
        assert_eq!(code, "a := &strings.Builder{}");
        assert_eq!(delta.vars["a"].ty, "*strings.Builder");
        assert!(delta.required_new_type.is_empty());

        let step = Step::new(Operation::New)
            .with_result("who")
            .with_arg(Param::object("people.Person"));
        let (code, delta) = run(&ctx, &ComposeOptions::default(), &step).unwrap();
        assert_eq!(code, "who := &people.Person{}");
        assert_eq!(delta.required_new_type["who"].name, "Person");
        assert!(delta.imports.contains_key("people"));
    }

    #[test]
    fn test_new_arity() {
        let ctx = context(&[], &[]);
        let step = Step::new(Operation::New).with_arg(Param::object("T"));
        let err = run(&ctx, &ComposeOptions::default(), &step).unwrap_err();
        assert!(matches!(err, ComposeError::ResultsLength { got: 0, .. }));
    }

    #[test]
    fn test_compare() {
        let ctx = context(&[("response", "Response")], &[("ok", "bool")]);
        let step = Step::new(Operation::compare("=="))
            .with_result("ok")
            .with_arg(Param::object("response.Code"))
            .with_arg(Param::object("100"));
        let (code, _) = run(&ctx, &ComposeOptions::default(), &step).unwrap();
        assert_eq!(code, "ok = response.Code==100");

        let step = Step::new(Operation::compare("=="))
            .with_result("same")
            .with_arg(Param::object("1"))
            .with_arg(Param::object("2"));
        let (_, delta) = run(&ctx, &ComposeOptions::default(), &step).unwrap();
        assert_eq!(delta.vars["same"].ty, "bool");

        let step = Step::new(Operation::compare("")).with_arg(Param::object("1"));
        let err = run(&ctx, &ComposeOptions::default(), &step).unwrap_err();
        assert!(matches!(err, ComposeError::ArgsLength { op: "unary", .. }));
    }

    #[test]
    fn test_assign_without_operation() {
        let ctx = context(&[("name", "string")], &[]);
        let step = Step::default()
            .with_result("copy")
            .with_arg(Param::object("name"));
        let (code, delta) = run(&ctx, &ComposeOptions::default(), &step).unwrap();
        assert_eq!(code, "copy := name");
        assert_eq!(delta.vars["copy"].ty, "string");
        assert!(delta.used.contains_key("name"));

        let step = Step::default().with_arg(Param::object("name"));
        let err = run(&ctx, &ComposeOptions::default(), &step).unwrap_err();
        assert_eq!(err, ComposeError::MissingResults { op: "assign" });
    }

    #[test]
    fn test_blank_result_is_not_declared() {
        let ctx = context(&[], &[("ok", "bool")]);
        let step = invoke("*Person.Rename")
            .with_result("ok")
            .with_result("_")
            .with_arg(Param::object("\"bob\""));
        let (code, delta) = run(&ctx, &ComposeOptions::default(), &step).unwrap();
        assert_eq!(code, "ok, _ = person.Rename(\"bob\")");
        assert!(!delta.vars.contains_key("_"));
    }
}
