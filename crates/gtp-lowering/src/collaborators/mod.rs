//! Lowering engines the pass delegates to.
//!
//! The pass decides *what* happens to a body; these traits do the rewriting.
//! [`StandardCollaborators`] bundles the reference implementations:
//!
//! | Trait | Reference implementation |
//! |-------|--------------------------|
//! | [`ForInLowering`] | [`ForInTransformer`]: key snapshot + indexed loop |
//! | [`ForEachLowering`] | [`ForEachTransformer`]: iterator protocol calls |
//! | [`GeneratorLowering`] | [`RuntimeHelperLowering`]: `__generator(this, function* ...)` |
//! | [`AsyncLowering`] | [`RuntimeHelperLowering`]: `__awaiter(this, function* ...)` |

pub mod for_each;
pub mod for_in;
pub mod runtime_helpers;

pub use for_each::ForEachTransformer;
pub use for_in::ForInTransformer;
pub use runtime_helpers::RuntimeHelperLowering;

use gtp_ast::NodeRef;
use gtp_common::{ErrorReporter, UniqueIdentifierGenerator};

use crate::options::LoweringOptions;

/// Rewrites `for (k in o)` loops into a form a suspension can cross.
///
/// Must return `tree` unchanged (same `Rc`) when it holds no for-in loop.
pub trait ForInLowering {
    fn lower_for_in(&mut self, ids: &mut UniqueIdentifierGenerator, tree: &NodeRef) -> NodeRef;
}

/// Lowers one `for (x of e)` node into iteration-protocol calls, evaluating
/// `e` once and running the body once per element in order.
pub trait ForEachLowering {
    fn lower_for_each(&mut self, ids: &mut UniqueIdentifierGenerator, for_each: &NodeRef)
    -> NodeRef;
}

/// Turns a body containing `yield` into one implementing the generator contract.
pub trait GeneratorLowering {
    fn lower_generator_body(&mut self, reporter: &mut ErrorReporter, body: &NodeRef) -> NodeRef;
}

/// Turns a body containing `await` into one implementing eventual completion.
pub trait AsyncLowering {
    fn lower_async_body(&mut self, reporter: &mut ErrorReporter, body: &NodeRef) -> NodeRef;
}

/// Everything the lowering pass needs from its engines.
pub trait Collaborators: ForInLowering + ForEachLowering + GeneratorLowering + AsyncLowering {}

impl<T> Collaborators for T where
    T: ForInLowering + ForEachLowering + GeneratorLowering + AsyncLowering + ?Sized
{
}

/// The reference engines, configured from one [`LoweringOptions`].
#[derive(Debug)]
pub struct StandardCollaborators {
    for_in: ForInTransformer,
    for_each: ForEachTransformer,
    runtime: RuntimeHelperLowering,
}

impl StandardCollaborators {
    #[must_use]
    pub fn new(options: &LoweringOptions) -> Self {
        Self {
            for_in: ForInTransformer::new(),
            for_each: ForEachTransformer::new(options.helpers.get_iterator.clone()),
            runtime: RuntimeHelperLowering::new(options.helpers.clone()),
        }
    }
}

impl ForInLowering for StandardCollaborators {
    fn lower_for_in(&mut self, ids: &mut UniqueIdentifierGenerator, tree: &NodeRef) -> NodeRef {
        self.for_in.lower_for_in(ids, tree)
    }
}

impl ForEachLowering for StandardCollaborators {
    fn lower_for_each(
        &mut self,
        ids: &mut UniqueIdentifierGenerator,
        for_each: &NodeRef,
    ) -> NodeRef {
        self.for_each.lower_for_each(ids, for_each)
    }
}

impl GeneratorLowering for StandardCollaborators {
    fn lower_generator_body(&mut self, reporter: &mut ErrorReporter, body: &NodeRef) -> NodeRef {
        self.runtime.lower_generator_body(reporter, body)
    }
}

impl AsyncLowering for StandardCollaborators {
    fn lower_async_body(&mut self, reporter: &mut ErrorReporter, body: &NodeRef) -> NodeRef {
        self.runtime.lower_async_body(reporter, body)
    }
}
