// Path: crates/api/src/context.rs
//! Defines the stable context for a single contract call.

use crate::host::ChainHost;
use cosio_types::app::Name;
use cosio_types::error::ContractError;

/// Read-only inputs of one contract call.
#[derive(Clone, Copy)]
pub struct CallContext<'a> {
    /// The name of the method being invoked.
    pub method: &'a str,
    /// The packed argument tuple.
    pub args: &'a [u8],
    /// The contract being called, as `$contract@owner`.
    pub contract: &'a Name,
    /// The account on whose behalf the call runs. Authority checks go through
    /// [`CallContext::require_auth`], not through this field.
    pub caller: &'a Name,
    /// Host queries and side effects.
    pub host: &'a dyn ChainHost,
}

impl<'a> CallContext<'a> {
    /// Fails unless the call carries the authority of `account`.
    pub fn require_auth(&self, account: &Name) -> Result<(), ContractError> {
        self.host.require_auth(account)
    }

    /// The account that owns the called contract.
    pub fn owner(&self) -> &'a str {
        self.contract.account()
    }
}

impl std::fmt::Debug for CallContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallContext")
            .field("method", &self.method)
            .field("args_len", &self.args.len())
            .field("contract", &self.contract)
            .field("caller", &self.caller)
            .finish_non_exhaustive()
    }
}
