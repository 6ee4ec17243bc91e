//! Tree-walking interpreter.
//!
//! Organized into one module per concern:
//! - `activation` - the value heap and lexical scope stack name resolution goes through
//! - `value` - the runtime value representation
//! - `container` - array/dictionary runtime representations
//! - `composite` - the shared struct/resource/event/enum/contract representation
//! - `numeric` - bounded integer and `Fix64`/`UFix64` arithmetic
//! - `storage` - the per-account persisted namespace and storage gateway trait
//! - `host` - everything the interpreter needs from its embedder
//! - `bridge` - recursive translation between runtime values and the host's mirror values
//! - `builtins` - always-in-scope identifiers and built-in contracts (`RLP`, `BLS`)
//! - `gauge` - the metered computation/memory budget
//! - `error` - the single unwinding runtime error type
//! - `interpreter` - the evaluator itself

pub mod activation;
pub mod bridge;
pub mod builtins;
pub mod composite;
pub mod container;
pub mod error;
pub mod gauge;
pub mod host;
pub mod interpreter;
pub mod numeric;
pub mod storage;
pub mod value;

pub use activation::{Activations, Heap, SlotId};
pub use bridge::HostValue;
pub use composite::CompositeValue;
pub use container::{ArrayValue, DictionaryKey, DictionaryValue};
pub use error::{ErrorKind, InterpreterError};
pub use gauge::Gauge;
pub use host::{HostEnvironment, InMemoryHostEnvironment};
pub use interpreter::{Flow, Interpreter};
pub use numeric::IntegerValue;
pub use storage::{InMemoryStorage, Link, PathValue, Storage, StorageDomain};
pub use value::{ReferenceValue, Value};

use cadence_ast::Program;
use cadence_common::InterpreterConfig;
use cadence_types::TypeInterner;

/// Runs `program`'s `main()` entry point end to end: builds a fresh
/// `Interpreter` over `host`/`types` and executes it. The caller is
/// responsible for having already checked `program` — this performs no
/// static validation of its own.
pub fn run_program(config: InterpreterConfig, host: &mut dyn HostEnvironment, types: &TypeInterner, program: &Program) -> Result<Value, InterpreterError> {
    let mut interpreter = Interpreter::new(config, host, types, program);
    interpreter.run_main()
}
