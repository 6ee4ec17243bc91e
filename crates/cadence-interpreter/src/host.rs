//! The host boundary: everything the interpreter needs from its
//! embedder but cannot do itself — persistent storage, cryptography,
//! UUID generation, event delivery, and logging.

use crate::composite::CompositeValue;
use crate::storage::Storage;

/// Host-supplied cryptographic primitives. The real signature/hash
/// algorithm tags are small enums on the Cadence side (`SignatureAlgorithm`,
/// `HashAlgorithm`); the interpreter passes their raw discriminant through
/// rather than depending on a concrete crypto crate itself.
pub trait HostEnvironment {
    fn storage(&self) -> &dyn Storage;
    fn storage_mut(&mut self) -> &mut dyn Storage;

    /// Allocates a fresh UUID for `create T(...)`. Must never repeat
    /// within a transaction.
    fn next_uuid(&mut self) -> u64;

    fn emit_event(&mut self, event: CompositeValue);

    fn log(&mut self, message: String);

    fn verify_signature(
        &self,
        signature: &[u8],
        signed_data: &[u8],
        public_key: &[u8],
        sign_algo: u8,
        hash_algo: u8,
    ) -> bool;

    fn hash(&self, data: &[u8], hash_algo: u8) -> Vec<u8>;

    /// `None` signals a malformed or empty input set, not a zero result.
    fn aggregate_bls_signatures(&self, signatures: &[Vec<u8>]) -> Option<Vec<u8>>;
    fn aggregate_bls_public_keys(&self, keys: &[Vec<u8>]) -> Option<Vec<u8>>;
}

/// A host environment for tests and the CLI driver: storage is an
/// in-process map, UUIDs are a simple counter, and the crypto primitives
/// are stand-ins, not real implementations — good enough to exercise
/// control flow, not to trust with real signatures.
pub struct InMemoryHostEnvironment<S: Storage> {
    storage: S,
    next_uuid: u64,
    events: Vec<CompositeValue>,
    logs: Vec<String>,
}

impl<S: Storage> InMemoryHostEnvironment<S> {
    #[must_use]
    pub fn new(storage: S) -> Self {
        InMemoryHostEnvironment { storage, next_uuid: 1, events: Vec::new(), logs: Vec::new() }
    }

    #[must_use]
    pub fn events(&self) -> &[CompositeValue] {
        &self.events
    }

    #[must_use]
    pub fn logs(&self) -> &[String] {
        &self.logs
    }
}

impl<S: Storage> HostEnvironment for InMemoryHostEnvironment<S> {
    fn storage(&self) -> &dyn Storage {
        &self.storage
    }

    fn storage_mut(&mut self) -> &mut dyn Storage {
        &mut self.storage
    }

    fn next_uuid(&mut self) -> u64 {
        let id = self.next_uuid;
        self.next_uuid += 1;
        id
    }

    fn emit_event(&mut self, event: CompositeValue) {
        self.events.push(event);
    }

    fn log(&mut self, message: String) {
        self.logs.push(message);
    }

    fn verify_signature(&self, _signature: &[u8], _signed_data: &[u8], _public_key: &[u8], _sign_algo: u8, _hash_algo: u8) -> bool {
        true
    }

    fn hash(&self, data: &[u8], _hash_algo: u8) -> Vec<u8> {
        data.iter().fold(Vec::new(), |mut acc, b| {
            acc.push(b.wrapping_add(1));
            acc
        })
    }

    fn aggregate_bls_signatures(&self, signatures: &[Vec<u8>]) -> Option<Vec<u8>> {
        if signatures.is_empty() {
            return None;
        }
        Some(signatures.iter().flatten().copied().collect())
    }

    fn aggregate_bls_public_keys(&self, keys: &[Vec<u8>]) -> Option<Vec<u8>> {
        if keys.is_empty() {
            return None;
        }
        Some(keys.iter().flatten().copied().collect())
    }
}
