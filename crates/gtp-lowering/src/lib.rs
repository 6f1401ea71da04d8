//! Lowering of suspension constructs.
//!
//! A function-like body may suspend in three ways:
//!
//! - `yield e;` (ordinary suspension)
//! - `yield for e;` (once per element of `e`)
//! - `await [x =] e;` (asynchronous suspension)
//!
//! [`lower`] rewrites every such body in a tree into forms the downstream
//! generator and async engines accept. The engines themselves sit behind the
//! traits in [`collaborators`]; [`lower_with`] takes custom ones.
//!
//! ```
//! use gtp_ast::factory::*;
//! use gtp_ast::{Node, NodeKind};
//! use gtp_common::{ErrorReporter, UniqueIdentifierGenerator};
//!
//! let function = Node::new(NodeKind::FunctionDeclaration {
//!     name: Some("numbers".into()),
//!     is_static: false,
//!     parameters: vec![],
//!     body: create_block(vec![create_suspension_statement(Some(create_number(1.0)), false)]),
//! });
//! let tree = Node::new(NodeKind::Program { statements: vec![function] });
//!
//! let mut ids = UniqueIdentifierGenerator::new();
//! let mut reporter = ErrorReporter::new();
//! let lowered = gtp_lowering::lower(&mut ids, &mut reporter, &tree);
//! assert!(gtp_ast::print(&lowered).contains("__generator(this, function* ()"));
//! ```

pub mod collaborators;
pub mod iteration_suspension;
pub mod lowering_pass;
pub mod options;
pub mod suspension_analyzer;

pub use collaborators::{
    AsyncLowering, Collaborators, ForEachLowering, ForInLowering, GeneratorLowering,
    StandardCollaborators,
};
pub use iteration_suspension::IterationSuspensionDesugarer;
pub use lowering_pass::{
    LoweringPlan, LoweringStats, LoweringTarget, SuspensionLoweringPass, lower, lower_with,
};
pub use options::{LoweringOptions, RuntimeHelpers};
pub use suspension_analyzer::{SuspensionAnalyzer, SuspensionFacts};
