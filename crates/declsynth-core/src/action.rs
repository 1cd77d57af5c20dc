//! Building an action step by step.

use crate::context::CodeContext;
use crate::error::ComposeError;
use crate::options::ComposeOptions;
use crate::step::{Action, Operation, Step};
use crate::synth::{find_func, StepFrame};
use declsynth_types::PackageIndex;
use tracing::{debug, info};

/// Result type name that marks a function's error result.
const ERROR_TYPE: &str = "error";

/// Accumulates the code of one action into a [`CodeContext`].
///
/// Created by [`Builder::new_action_builder`](crate::Builder::new_action_builder).
pub struct ActionBuilder<'a> {
    packages: &'a [PackageIndex],
    options: ComposeOptions,
    context: CodeContext,
}

impl<'a> ActionBuilder<'a> {
    pub(crate) fn new(
        packages: &'a [PackageIndex],
        options: ComposeOptions,
        context: CodeContext,
    ) -> Self {
        Self {
            packages,
            options,
            context,
        }
    }

    pub fn context(&self) -> &CodeContext {
        &self.context
    }

    pub fn into_context(self) -> CodeContext {
        self.context
    }

    /// Synthesizes one step and applies its effects. A failing step leaves
    /// the context untouched; an empty step adds no line.
    pub fn build_step(&mut self, step: &Step) -> Result<String, ComposeError> {
        let mut frame = StepFrame::new(&self.context, self.packages, &self.options);
        let code = frame.synthesize(step)?;
        let delta = frame.into_delta();

        self.context.apply(delta);
        if !code.is_empty() {
            debug!(code = %code, "built step");
            self.context.push_line(code.clone());
        }
        Ok(code)
    }

    /// Builds every step in order. The first failure abandons the rest and
    /// is returned as [`ComposeError::Step`].
    pub fn build_action(mut self, action: &Action) -> Result<CodeContext, ComposeError> {
        for (index, step) in action.steps.iter().enumerate() {
            self.build_step(step)
                .map_err(|source| ComposeError::Step {
                    index,
                    step: Box::new(step.clone()),
                    source: Box::new(source),
                })?;
        }

        info!(
            steps = action.steps.len(),
            lines = self.context.code_lines.len(),
            vars = self.context.vars.len(),
            used = self.context.used.len(),
            "composed action"
        );
        Ok(self.context)
    }

    /// Name the step binds to the callee's first `error` result, if any.
    /// Only invoke steps have one.
    pub fn error_result_name(&self, step: &Step) -> Result<Option<String>, ComposeError> {
        let target = match &step.operation {
            Some(Operation::Invoke(func)) => func,
            _ => return Ok(None),
        };
        let func = find_func(self.packages, target)?;
        Ok(func
            .results
            .iter()
            .position(|r| r.ty == ERROR_TYPE)
            .and_then(|i| step.results.get(i))
            .map(|r| r.name.clone()))
    }
}
