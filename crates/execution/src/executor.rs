// Path: crates/execution/src/executor.rs
//! The call executor: one call runs against an overlay, then commits or
//! discards.

use cosio_api::context::CallContext;
use cosio_api::contract::Contract;
use cosio_api::state::{NamespacedTableStore, StateAccess, StateOverlay};
use cosio_telemetry::Timer;
use cosio_types::config::ExecutionConfig;
use cosio_types::error::{ContractError, ErrorCode};

/// What a committed call changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReceipt {
    /// The method that ran.
    pub method: String,
    /// The number of keys written.
    pub writes: usize,
    /// The number of keys deleted.
    pub deletes: usize,
}

/// Executes contract calls under a fixed [`ExecutionConfig`].
#[derive(Debug, Clone, Default)]
pub struct ContractExecutor {
    config: ExecutionConfig,
}

impl ContractExecutor {
    /// Creates an executor, rejecting unusable limits.
    pub fn new(config: ExecutionConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Creates an executor from the `[execution]` table of a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, String> {
        Ok(Self {
            config: ExecutionConfig::from_toml_str(s)?,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Runs `ctx.method` of `contract` against `state`.
    ///
    /// The contract sees its tables through a [`NamespacedTableStore`] scoped to
    /// `ctx.contract`, layered over a [`StateOverlay`] of `state`. If the method
    /// returns `Ok`, the overlay's writes are applied to `state` in one
    /// `batch_apply`. Any error, including an unknown method or undecodable
    /// arguments, leaves `state` exactly as it was.
    pub fn execute(
        &self,
        contract: &dyn Contract,
        state: &mut dyn StateAccess,
        ctx: &CallContext<'_>,
    ) -> Result<ExecutionReceipt, ContractError> {
        let _timer = Timer::new("execute");
        if let Err(e) = self.config.check_args_len(ctx.args.len()) {
            tracing::warn!(target: "executor", contract = %ctx.contract, method = ctx.method, error = %e, "Rejected call");
            return Err(e);
        }

        let mut overlay = StateOverlay::new(&*state);
        let outcome = {
            let mut tables = NamespacedTableStore::new(&mut overlay, ctx.contract)?
                .with_record_limit(self.config.max_record_bytes);
            tracing::debug!(
                target: "dispatch",
                contract_type = contract.contract_type(),
                method = ctx.method,
                args_len = ctx.args.len(),
                "Dispatching call"
            );
            contract.dispatch(&mut tables, ctx)
        };

        if let Err(e) = outcome {
            tracing::warn!(
                target: "executor",
                contract = %ctx.contract,
                caller = %ctx.caller,
                method = ctx.method,
                code = e.code(),
                error = %e,
                "Call aborted, discarding {} pending write(s)",
                overlay.len()
            );
            return Err(e);
        }

        let (inserts, deletes) = overlay.into_ordered_batch();
        state.batch_apply(&inserts, &deletes)?;

        let receipt = ExecutionReceipt {
            method: ctx.method.to_string(),
            writes: inserts.len(),
            deletes: deletes.len(),
        };
        if self.config.log_calls {
            tracing::info!(
                target: "executor",
                contract = %ctx.contract,
                caller = %ctx.caller,
                method = ctx.method,
                writes = receipt.writes,
                deletes = receipt.deletes,
                "Call committed"
            );
        }
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_limits() {
        let config = ExecutionConfig {
            max_args_bytes: 0,
            ..ExecutionConfig::default()
        };
        assert!(ContractExecutor::new(config).is_err());
    }

    #[test]
    fn loads_from_toml() {
        let exec = ContractExecutor::from_toml_str("[execution]\nlog_calls = false\n").unwrap();
        assert!(!exec.config().log_calls);
        assert_eq!(exec.config().max_args_bytes, cosio_types::MAX_CALL_ARGS_BYTES);
    }
}
