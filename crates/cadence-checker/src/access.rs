//! Access control enforcement.
//!
//! Compares a member's declared [`Access`] level against the place the
//! access originates from: the declaring composite's own methods (`self`),
//! the enclosing contract, the owning account, or anywhere at all.

use cadence_ast::Access;
use cadence_common::Atom;

/// Where a member access originates from, relative to the member's
/// declaring composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessOrigin {
    /// The access expression's base is literally `self`.
    pub is_self: bool,
    /// The accessing code is declared inside the same contract as the
    /// member (directly or via a nested type of that contract).
    pub same_contract: bool,
    /// The accessing code executes under the account that owns the
    /// member's contract.
    pub same_account: bool,
}

impl AccessOrigin {
    #[must_use]
    pub fn unrestricted() -> Self {
        AccessOrigin { is_self: true, same_contract: true, same_account: true }
    }
}

#[must_use]
pub fn is_accessible(access: Access, origin: AccessOrigin) -> bool {
    match access {
        Access::Private => origin.is_self,
        Access::Contract => origin.is_self || origin.same_contract,
        Access::Account => origin.is_self || origin.same_contract || origin.same_account,
        Access::Public => true,
    }
}

/// One link in a compound lvalue's member-access chain, e.g. for
/// `a.b.c[0]` the chain is `["b", "c"]` with a trailing index.
#[derive(Clone, Debug)]
pub struct MutationLink {
    pub field_name: Atom,
    pub access: Access,
}

/// An external mutation is writing into a composite-owned container (or
/// field) from outside the scope that access level permits — checked
/// recursively through every link in a nested field-access chain, since
/// any single inaccessible link lets code reach a container it shouldn't
/// be able to write to.
#[must_use]
pub fn chain_is_mutable_from(chain: &[MutationLink], origin: AccessOrigin) -> Option<usize> {
    chain.iter().position(|link| !is_accessible(link.access, origin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_is_only_accessible_from_self() {
        let from_self = AccessOrigin { is_self: true, same_contract: false, same_account: false };
        let from_contract = AccessOrigin { is_self: false, same_contract: true, same_account: false };
        assert!(is_accessible(Access::Private, from_self));
        assert!(!is_accessible(Access::Private, from_contract));
    }

    #[test]
    fn account_access_excludes_unrelated_code() {
        let unrelated = AccessOrigin { is_self: false, same_contract: false, same_account: false };
        let same_account = AccessOrigin { is_self: false, same_contract: false, same_account: true };
        assert!(!is_accessible(Access::Account, unrelated));
        assert!(is_accessible(Access::Account, same_account));
    }

    #[test]
    fn public_is_always_accessible() {
        let unrelated = AccessOrigin { is_self: false, same_contract: false, same_account: false };
        assert!(is_accessible(Access::Public, unrelated));
    }

    #[test]
    fn first_inaccessible_link_in_a_chain_is_reported() {
        let interner = cadence_common::Interner::new();
        let chain = vec![
            MutationLink { field_name: interner.intern("vault"), access: Access::Public },
            MutationLink { field_name: interner.intern("balance"), access: Access::Private },
        ];
        let unrelated = AccessOrigin { is_self: false, same_contract: false, same_account: false };
        assert_eq!(chain_is_mutable_from(&chain, unrelated), Some(1));
    }
}
