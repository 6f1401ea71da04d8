//! Lowering configuration.
//!
//! Read from the `lowering` section of a JSON config file (camelCase keys,
//! every field optional):
//!
//! ```json
//! {
//!   "identifierPrefix": "$__",
//!   "maxFunctionDepth": 128,
//!   "helpers": { "getIterator": "__getIterator", "generator": "__generator", "awaiter": "__awaiter" }
//! }
//! ```

use gtp_common::UniqueIdentifierGenerator;
use gtp_common::limits::{DEFAULT_IDENTIFIER_PREFIX, MAX_FUNCTION_NESTING_DEPTH};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoweringOptions {
    /// Prefix of generated temporaries.
    pub identifier_prefix: String,
    /// Function nesting the pass descends into before reporting and bailing out.
    pub max_function_depth: u32,
    pub helpers: RuntimeHelpers,
}

impl Default for LoweringOptions {
    fn default() -> Self {
        Self {
            identifier_prefix: DEFAULT_IDENTIFIER_PREFIX.to_string(),
            max_function_depth: MAX_FUNCTION_NESTING_DEPTH,
            helpers: RuntimeHelpers::default(),
        }
    }
}

impl LoweringOptions {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// A fresh generator for one run, using the configured prefix.
    #[must_use]
    pub fn identifier_generator(&self) -> UniqueIdentifierGenerator {
        UniqueIdentifierGenerator::with_prefix(self.identifier_prefix.clone())
    }
}

/// Names of the runtime entry points the reference collaborators call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeHelpers {
    /// `getIterator(iterable)` returning an object with `next()`.
    pub get_iterator: String,
    /// `generator(thisArg, body)` driving a generator body.
    pub generator: String,
    /// `awaiter(thisArg, body)` driving an asynchronous body.
    pub awaiter: String,
}

impl Default for RuntimeHelpers {
    fn default() -> Self {
        Self {
            get_iterator: "__getIterator".to_string(),
            generator: "__generator".to_string(),
            awaiter: "__awaiter".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/options.rs"]
mod tests;
