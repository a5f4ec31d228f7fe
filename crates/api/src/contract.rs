// Path: crates/api/src/contract.rs
//! Defines the `Contract` trait, the single entry point a call goes through.

use crate::context::CallContext;
use crate::state::TableStore;
use cosio_types::error::ContractError;

/// A contract: a named set of methods dispatched by name.
///
/// Implementations are generated by `#[contract]` from an `impl` block whose
/// callable functions are marked `#[method]`; writing one by hand is possible
/// but the generated dispatcher is the supported path.
pub trait Contract {
    /// The contract's type name.
    fn contract_type(&self) -> &'static str;

    /// The callable method names, in declaration order.
    fn methods(&self) -> &'static [&'static str];

    /// Decodes `ctx.args` as the argument tuple of `ctx.method` and runs the
    /// handler. An unknown method fails with `ContractError::UnknownMethod`
    /// before any handler runs.
    fn dispatch(
        &self,
        state: &mut dyn TableStore,
        ctx: &CallContext<'_>,
    ) -> Result<(), ContractError>;

    /// Returns true if `method` names a callable method.
    fn has_method(&self, method: &str) -> bool {
        self.methods().contains(&method)
    }
}
