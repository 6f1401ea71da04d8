//! Read, lower, render.

use std::path::Path;

use anyhow::{Context, Result};
use gtp_ast::{Node, NodeKind, NodeRef, Visitor, print, walk_children};
use gtp_common::{Diagnostic, ErrorReporter, Span};
use gtp_lowering::{
    LoweringOptions, LoweringPlan, LoweringStats, StandardCollaborators, SuspensionAnalyzer,
    SuspensionFacts, SuspensionLoweringPass,
};
use serde::Serialize;

use crate::args::{CliArgs, Emit};
use crate::config::resolve_options;

/// Result of one run, before anything is written.
#[derive(Debug)]
pub struct LowerOutcome {
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: LoweringStats,
}

/// One entry of `--emit facts`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionFacts {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub span: Span,
    pub facts: SuspensionFacts,
    pub plan: Option<LoweringPlan>,
}

pub fn read_tree(path: &Path) -> Result<NodeRef> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse syntax tree: {}", path.display()))
}

/// Lower `tree` and render it as `emit` asks.
pub fn lower_tree(tree: &NodeRef, options: &LoweringOptions, emit: Emit) -> Result<LowerOutcome> {
    let mut collaborators = StandardCollaborators::new(options);
    let mut ids = options.identifier_generator();
    let mut reporter = ErrorReporter::new();

    let mut pass = SuspensionLoweringPass::new(&mut collaborators, options, &mut ids, &mut reporter);
    let lowered = pass.run(tree);
    let stats = pass.stats();

    let output = match emit {
        Emit::Js => print(&lowered),
        Emit::Json => {
            let mut json = serde_json::to_string_pretty(&lowered)
                .context("failed to serialize lowered tree")?;
            json.push('\n');
            json
        }
        Emit::Facts => {
            let mut json = serde_json::to_string_pretty(&collect_function_facts(tree))
                .context("failed to serialize suspension facts")?;
            json.push('\n');
            json
        }
    };

    Ok(LowerOutcome {
        output,
        diagnostics: reporter.take_diagnostics(),
        stats,
    })
}

/// Full pipeline for `args`. Output goes to `--out` when given and is also
/// returned in the outcome.
pub fn run(args: &CliArgs) -> Result<LowerOutcome> {
    let options = resolve_options(args)?;
    let tree = read_tree(&args.input)?;
    let outcome = lower_tree(&tree, &options, args.emit)?;
    tracing::debug!(
        diagnostics = outcome.diagnostics.len(),
        lowered = outcome.stats.bodies_lowered,
        "lowered {}",
        args.input.display()
    );

    if let Some(out) = &args.out {
        std::fs::write(out, &outcome.output)
            .with_context(|| format!("failed to write output: {}", out.display()))?;
    }
    Ok(outcome)
}

/// Facts and plan for every function-like body in `tree`, outermost first.
/// Bodies are classified as written, before any lowering.
#[must_use]
pub fn collect_function_facts(tree: &Node) -> Vec<FunctionFacts> {
    let mut collector = FactsCollector::default();
    collector.visit_any(tree);
    collector.entries
}

#[derive(Default)]
struct FactsCollector {
    entries: Vec<FunctionFacts>,
}

impl FactsCollector {
    fn record(&mut self, node: &Node) {
        let Some(body) = node.function_body() else {
            return;
        };
        let name = match &node.kind {
            NodeKind::FunctionDeclaration { name, .. } => name.clone(),
            NodeKind::GetAccessorDeclaration { name, .. }
            | NodeKind::SetAccessorDeclaration { name, .. } => Some(name.clone()),
            _ => None,
        };
        let facts = SuspensionAnalyzer::analyze(body);
        self.entries.push(FunctionFacts {
            kind: node.kind_name(),
            name,
            span: node.span,
            facts,
            plan: LoweringPlan::from_facts(&facts),
        });
        walk_children(self, node);
    }
}

impl Visitor for FactsCollector {
    fn visit_function_declaration(&mut self, node: &Node) {
        self.record(node);
    }

    fn visit_get_accessor(&mut self, node: &Node) {
        self.record(node);
    }

    fn visit_set_accessor(&mut self, node: &Node) {
        self.record(node);
    }
}

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod tests;
