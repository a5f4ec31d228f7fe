//! Call fixtures: the names, host and context a contract call needs.

use crate::host::MockHost;
use cosio_api::context::CallContext;
use cosio_types::app::Name;

/// Owns everything a `CallContext` borrows, so a test can build contexts for
/// several calls against the same contract.
#[derive(Debug)]
pub struct CallFixture {
    /// The contract being called.
    pub contract: Name,
    /// The calling account.
    pub caller: Name,
    /// The host every call sees.
    pub host: MockHost,
}

impl CallFixture {
    /// A fixture for calls to `$contract@owner` made by `caller`. The host
    /// authorizes the caller.
    pub fn new(owner: &str, contract: &str, caller: &str) -> Self {
        Self {
            contract: Name::contract_of(owner, contract),
            caller: Name::new(caller),
            host: MockHost::new().authorize(caller),
        }
    }

    /// Replaces the host.
    pub fn with_host(mut self, host: MockHost) -> Self {
        self.host = host;
        self
    }

    /// The same contract and a copy of the host, called by `caller`. The copy
    /// keeps block data, witness and balances but authorizes only `caller`.
    pub fn as_caller(&self, caller: &str) -> CallFixture {
        CallFixture {
            contract: self.contract.clone(),
            caller: Name::new(caller),
            host: self.host.clone().authorize_only(caller),
        }
    }

    /// A context for calling `method` with the packed `args`.
    pub fn context<'a>(&'a self, method: &'a str, args: &'a [u8]) -> CallContext<'a> {
        CallContext {
            method,
            args,
            contract: &self.contract,
            caller: &self.caller,
            host: &self.host,
        }
    }
}

/// Predefined names for tests.
pub struct TestFixtures;

impl TestFixtures {
    /// The account that owns test contracts.
    pub fn owner() -> Name {
        Name::new("initminer")
    }

    /// A handful of distinct plain account names.
    pub fn accounts() -> Vec<Name> {
        ["alice", "bob", "carol", "dave"]
            .iter()
            .map(|s| Name::new(*s))
            .collect()
    }
}
