//! Shared mutable state threaded through a single checker run.
//!
//! Bundles the type interner, the nominal registry, the lexical/resource
//! activation stacks, the elaboration side table, and the accumulated
//! diagnostics, so the declaration/statement/expression checkers can each
//! borrow one `CheckerContext` mutably instead of passing a dozen
//! parameters around.

use crate::access::AccessOrigin;
use crate::elaboration::Elaboration;
use crate::imports::ImportResolver;
use crate::resolver::Activations;
use crate::resources::ResourceTracker;
use cadence_common::{Atom, CheckerConfig, Diagnostic};
use cadence_types::{InterfaceId, NominalRegistry, TypeId, TypeInterner};
use rustc_hash::FxHashMap;

/// Which contract (if any) and account the code currently being checked
/// is declared under, for computing [`AccessOrigin`] at member accesses.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnclosingScope {
    pub contract: Option<Atom>,
    pub account: Option<Atom>,
}

pub struct CheckerContext<'a> {
    pub config: CheckerConfig,
    pub types: &'a TypeInterner,
    pub registry: &'a mut NominalRegistry,
    pub activations: Activations,
    pub resources: ResourceTracker,
    pub elaboration: Elaboration,
    pub diagnostics: Vec<Diagnostic>,
    pub enclosing: EnclosingScope,
    /// Every composite/interface/type-parameter name visible to nominal
    /// type resolution, keyed by its interned name and populated as
    /// declarations are registered.
    pub type_names: FxHashMap<Atom, TypeId>,
    /// The subset of `type_names` that name interfaces, kept separately
    /// since restricted types (`T{I1, I2}`) resolve their interface list
    /// against `InterfaceId`s rather than `TypeId`s.
    pub interface_names: FxHashMap<Atom, InterfaceId>,
    /// How `import X from <location>` resolves a name to a previously
    /// checked program's export. `None` means every import is unresolved
    /// (the default for a host that hasn't wired one in yet).
    pub imports: Option<&'a dyn ImportResolver>,
}

impl<'a> CheckerContext<'a> {
    #[must_use]
    pub fn new(config: CheckerConfig, types: &'a TypeInterner, registry: &'a mut NominalRegistry) -> Self {
        CheckerContext {
            config,
            types,
            registry,
            activations: Activations::new(),
            resources: ResourceTracker::new(),
            elaboration: Elaboration::new(),
            diagnostics: Vec::new(),
            enclosing: EnclosingScope::default(),
            type_names: FxHashMap::default(),
            interface_names: FxHashMap::default(),
            imports: None,
        }
    }

    #[must_use]
    pub fn with_import_resolver(mut self, resolver: &'a dyn ImportResolver) -> Self {
        self.imports = Some(resolver);
        self
    }

    /// Interns `name` into the atom space shared by every nominal-name
    /// table (`NominalRegistry`, `Elaboration::field_orderings`, and every
    /// `Atom` a declaration check produces).
    pub fn intern(&self, name: &str) -> Atom {
        self.types.intern_string(name)
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// The access origin for a member access whose declaring composite is
    /// `declaring_contract` (`None` for a top-level/script declaration).
    #[must_use]
    pub fn access_origin_for(&self, declaring_contract: Option<Atom>, is_self_access: bool) -> AccessOrigin {
        AccessOrigin {
            is_self: is_self_access,
            same_contract: declaring_contract.is_some() && declaring_contract == self.enclosing.contract,
            same_account: self.enclosing.account.is_some(),
        }
    }
}
