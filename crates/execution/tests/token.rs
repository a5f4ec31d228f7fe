// Path: crates/execution/tests/token.rs
//! End-to-end calls through the executor: a token contract with a singleton,
//! a balances table and a storage slot, plus a second contract that reads the
//! token's balances from outside.

use cosio_api::context::CallContext;
use cosio_api::state::{table_key, StateAccess, TableStore};
use cosio_execution::{ContractExecutor, ExecutionReceipt};
use cosio_macros::{contract, Record};
use cosio_state::{ExternalTable, MemoryStore, Singleton, SingletonRecord, Storage, Table};
use cosio_test_utils::fixtures::TestFixtures;
use cosio_test_utils::{assert_aborted, assert_round_trip, CallFixture, TestRng};
use cosio_types::app::Name;
use cosio_types::codec::{pack, unpack};
use cosio_types::config::ExecutionConfig;
use cosio_types::error::{ensure, ContractError, StateError};

#[derive(Record, Debug, Clone, Default, PartialEq)]
#[record(name = "stats")]
struct Stats {
    #[record(base)]
    base: SingletonRecord,
    symbol: String,
    total_supply: u64,
}

#[derive(Record, Debug, Clone, Default, PartialEq)]
#[record(name = "balances")]
struct Balance {
    #[record(primary_key)]
    owner: Name,
    amount: u64,
}

fn balances() -> Table<Balance> {
    Table::of_record()
}

fn stats() -> Singleton<Stats> {
    Singleton::of_record()
}

fn balance_of(state: &dyn TableStore, who: &Name) -> Result<u64, ContractError> {
    Ok(balances()
        .get_or_default(state, who, Balance::default())?
        .amount)
}

fn debit(state: &mut dyn TableStore, who: &Name, amount: u64) -> Result<(), ContractError> {
    let have = balance_of(state, who)?;
    ensure(have >= amount, format!("{who} balance not enough"))?;
    balances().insert(state, |b| {
        b.owner = who.clone();
        b.amount = have - amount;
    })
}

fn credit(state: &mut dyn TableStore, who: &Name, amount: u64) -> Result<(), ContractError> {
    let have = balance_of(state, who)?;
    balances().insert(state, |b| {
        b.owner = who.clone();
        b.amount = have.saturating_add(amount);
    })
}

struct Token;

#[contract(name = "token")]
impl Token {
    #[method]
    fn create(
        &self,
        state: &mut dyn TableStore,
        ctx: &CallContext<'_>,
        symbol: String,
        total_supply: u64,
    ) -> Result<(), ContractError> {
        let owner = Name::new(ctx.owner());
        ctx.require_auth(&owner)?;
        ensure(!stats().exists(state)?, "token already created")?;
        stats().get_or_create(
            state,
            Stats {
                base: SingletonRecord::default(),
                symbol,
                total_supply,
            },
        )?;
        credit(state, &owner, total_supply)
    }

    #[method]
    fn transfer(
        &self,
        state: &mut dyn TableStore,
        ctx: &CallContext<'_>,
        to: Name,
        amount: u64,
    ) -> Result<(), ContractError> {
        ctx.require_auth(ctx.caller)?;
        debit(state, ctx.caller, amount)?;
        credit(state, &to, amount)
    }

    #[method]
    fn airdrop(
        &self,
        state: &mut dyn TableStore,
        ctx: &CallContext<'_>,
        recipients: Vec<Name>,
        amount: u64,
    ) -> Result<(), ContractError> {
        let owner = Name::new(ctx.owner());
        ctx.require_auth(&owner)?;
        for recipient in &recipients {
            credit(state, recipient, amount)?;
            debit(state, &owner, amount)?;
        }
        Ok(())
    }

    #[method]
    fn close(
        &self,
        state: &mut dyn TableStore,
        ctx: &CallContext<'_>,
    ) -> Result<(), ContractError> {
        ensure(
            balance_of(state, ctx.caller)? == 0,
            "cannot close a funded account",
        )?;
        balances().remove(state, ctx.caller)
    }

    #[method]
    fn memo(
        &self,
        state: &mut dyn TableStore,
        _ctx: &CallContext<'_>,
        n: i32,
        text: String,
    ) -> Result<(), ContractError> {
        Storage.value_of("memo").put(state, &(n, text))
    }
}

struct Vault;

#[contract(name = "vault")]
impl Vault {
    /// Records `who`'s token balance in the vault's own table, refusing holders
    /// below `min`.
    #[method]
    fn snapshot(
        &self,
        state: &mut dyn TableStore,
        _ctx: &CallContext<'_>,
        who: Name,
        min: u64,
    ) -> Result<(), ContractError> {
        let token = ExternalTable::<Balance>::bound("initminer", "token", "balances")?;
        let held = token.get(state, &who)?;
        ensure(held.amount >= min, format!("{who} holds {}", held.amount))?;
        Table::<Balance>::new("snapshots").insert(state, |b| *b = held)
    }
}

fn executor() -> ContractExecutor {
    ContractExecutor::default()
}

fn token_fixture() -> CallFixture {
    CallFixture::new("initminer", "token", "initminer")
}

fn call(
    contract: &dyn cosio_api::contract::Contract,
    mem: &mut MemoryStore,
    fx: &CallFixture,
    method: &str,
    args: &[u8],
) -> Result<ExecutionReceipt, ContractError> {
    executor().execute(contract, mem, &fx.context(method, args))
}

fn created() -> MemoryStore {
    let mut mem = MemoryStore::new();
    let args = pack(&("COS".to_string(), 100u64)).unwrap();
    call(&Token, &mut mem, &token_fixture(), "create", &args).unwrap();
    mem
}

fn raw_balance(mem: &MemoryStore, who: &str) -> Option<u64> {
    let key = table_key("initminer", "token", "balances", &pack(&Name::new(who)).unwrap()).unwrap();
    mem.get(&key)
        .unwrap()
        .map(|bytes| unpack::<Balance>(&bytes).unwrap().amount)
}

#[test]
fn create_commits_singleton_and_balance() {
    let _ = cosio_telemetry::init_tracing_with("debug");
    let mut mem = MemoryStore::new();
    let args = pack(&("COS".to_string(), 100u64)).unwrap();

    let receipt = call(&Token, &mut mem, &token_fixture(), "create", &args).unwrap();

    assert_eq!(
        receipt,
        ExecutionReceipt {
            method: "create".into(),
            writes: 2,
            deletes: 0,
        }
    );
    assert_eq!(mem.len(), 2);
    assert_eq!(raw_balance(&mem, "initminer"), Some(100));

    let key = table_key("initminer", "token", "stats", &pack(&1i32).unwrap()).unwrap();
    let stored: Stats = unpack(&mem.get(&key).unwrap().unwrap()).unwrap();
    assert_eq!(stored.symbol, "COS");
    assert_eq!(stored.total_supply, 100);
    assert_eq!(stored.base.id, 1);
}

#[test]
fn second_create_aborts() {
    let mut mem = created();
    let before = mem.clone();
    let args = pack(&("XYZ".to_string(), 5u64)).unwrap();

    assert_aborted!(
        call(&Token, &mut mem, &token_fixture(), "create", &args),
        ContractError::Assertion(_)
    );
    assert_eq!(mem, before);
}

#[test]
fn create_requires_owner_authority() {
    let mut mem = MemoryStore::new();
    let fx = token_fixture().as_caller("alice");
    let args = pack(&("COS".to_string(), 100u64)).unwrap();

    assert_aborted!(
        call(&Token, &mut mem, &fx, "create", &args),
        ContractError::State(StateError::PermissionDenied(_))
    );
    assert!(mem.is_empty());
}

#[test]
fn transfer_moves_balance() {
    let mut mem = created();
    let args = pack(&(Name::new("alice"), 30u64)).unwrap();
    call(&Token, &mut mem, &token_fixture(), "transfer", &args).unwrap();

    let alice = token_fixture().as_caller("alice");
    let args = pack(&(Name::new("bob"), 10u64)).unwrap();
    call(&Token, &mut mem, &alice, "transfer", &args).unwrap();

    assert_eq!(raw_balance(&mem, "initminer"), Some(70));
    assert_eq!(raw_balance(&mem, "alice"), Some(20));
    assert_eq!(raw_balance(&mem, "bob"), Some(10));
}

#[test]
fn unknown_method_changes_nothing() {
    let mut mem = created();
    let before = mem.clone();

    let err = call(&Token, &mut mem, &token_fixture(), "mint", &pack(&()).unwrap()).unwrap_err();
    assert_eq!(err, ContractError::UnknownMethod("mint".into()));
    assert_eq!(mem, before);
}

#[test]
fn malformed_arguments_change_nothing() {
    let mut mem = created();
    let before = mem.clone();
    let args = pack(&(Name::new("alice"),)).unwrap();

    assert_aborted!(
        call(&Token, &mut mem, &token_fixture(), "transfer", &args),
        ContractError::Codec(_)
    );
    assert_eq!(mem, before);
}

#[test]
fn abort_midway_discards_earlier_writes() {
    let mut mem = created();
    let before = mem.clone();
    let recipients = vec![Name::new("alice"), Name::new("bob"), Name::new("carol")];
    let args = pack(&(recipients, 40u64)).unwrap();

    assert_aborted!(
        call(&Token, &mut mem, &token_fixture(), "airdrop", &args),
        ContractError::Assertion(_)
    );
    assert_eq!(mem, before);
    assert_eq!(raw_balance(&mem, "alice"), None);
    assert_eq!(raw_balance(&mem, "initminer"), Some(100));
}

#[test]
fn airdrop_within_supply_commits() {
    let mut mem = created();
    let recipients = vec![Name::new("alice"), Name::new("bob")];
    let args = pack(&(recipients, 40u64)).unwrap();

    let receipt = call(&Token, &mut mem, &token_fixture(), "airdrop", &args).unwrap();

    assert_eq!(receipt.writes, 3);
    assert_eq!(raw_balance(&mem, "initminer"), Some(20));
    assert_eq!(raw_balance(&mem, "alice"), Some(40));
    assert_eq!(raw_balance(&mem, "bob"), Some(40));
}

#[test]
fn close_reports_a_delete() {
    let mut mem = created();
    let args = pack(&(Name::new("alice"), 5u64)).unwrap();
    call(&Token, &mut mem, &token_fixture(), "transfer", &args).unwrap();
    let alice = token_fixture().as_caller("alice");
    let args = pack(&(Name::new("initminer"), 5u64)).unwrap();
    call(&Token, &mut mem, &alice, "transfer", &args).unwrap();

    let receipt = call(&Token, &mut mem, &alice, "close", &pack(&()).unwrap()).unwrap();

    assert_eq!(receipt.writes, 0);
    assert_eq!(receipt.deletes, 1);
    assert_eq!(raw_balance(&mem, "alice"), None);
}

#[test]
fn memo_lands_in_a_storage_slot() {
    let mut mem = created();
    let args = pack(&(7i32, "hello".to_string())).unwrap();
    call(&Token, &mut mem, &token_fixture(), "memo", &args).unwrap();

    let key = cosio_api::state::storage_key("initminer", "token", "memo").unwrap();
    let stored: (i32, String) = unpack(&mem.get(&key).unwrap().unwrap()).unwrap();
    assert_eq!(stored, (7, "hello".to_string()));
}

#[test]
fn oversized_arguments_are_rejected_before_dispatch() {
    let mut mem = created();
    let before = mem.clone();
    let exec = ContractExecutor::new(ExecutionConfig {
        max_args_bytes: 8,
        ..ExecutionConfig::default()
    })
    .unwrap();
    let fx = token_fixture();
    let args = pack(&(7i32, "a long memo text".to_string())).unwrap();

    assert_aborted!(
        exec.execute(&Token, &mut mem, &fx.context("memo", &args)),
        ContractError::ArgsTooLarge { limit: 8, .. }
    );
    assert_eq!(mem, before);
}

#[test]
fn oversized_records_are_rejected() {
    let mut mem = created();
    let before = mem.clone();
    let exec = ContractExecutor::new(ExecutionConfig {
        max_record_bytes: 16,
        ..ExecutionConfig::default()
    })
    .unwrap();
    let fx = token_fixture();
    let args = pack(&(7i32, "x".repeat(64))).unwrap();

    assert_aborted!(
        exec.execute(&Token, &mut mem, &fx.context("memo", &args)),
        ContractError::State(StateError::ValueTooLarge { limit: 16, .. })
    );
    assert_eq!(mem, before);
}

#[test]
fn vault_reads_token_balances_from_outside() {
    let mut mem = created();
    let vault = CallFixture::new("bob", "vault", "bob");

    let args = pack(&(Name::new("initminer"), 50u64)).unwrap();
    call(&Vault, &mut mem, &vault, "snapshot", &args).unwrap();

    let key = table_key("bob", "vault", "snapshots", &pack(&Name::new("initminer")).unwrap()).unwrap();
    let snap: Balance = unpack(&mem.get(&key).unwrap().unwrap()).unwrap();
    assert_eq!(snap.amount, 100);
    // The token's own row is untouched.
    assert_eq!(raw_balance(&mem, "initminer"), Some(100));
}

#[test]
fn vault_aborts_on_missing_or_small_holders() {
    let mut mem = created();
    let before = mem.clone();
    let vault = CallFixture::new("bob", "vault", "bob");

    let args = pack(&(Name::new("carol"), 0u64)).unwrap();
    assert_eq!(
        call(&Vault, &mut mem, &vault, "snapshot", &args).unwrap_err(),
        ContractError::State(StateError::KeyNotFound("balances".into()))
    );

    let args = pack(&(Name::new("initminer"), 1000u64)).unwrap();
    assert_aborted!(
        call(&Vault, &mut mem, &vault, "snapshot", &args),
        ContractError::Assertion(_)
    );
    assert_eq!(mem, before);
}

#[test]
fn calls_against_a_plain_account_fail() {
    let mut mem = MemoryStore::new();
    let mut fx = token_fixture();
    fx.contract = Name::new("initminer");

    assert_aborted!(
        call(&Token, &mut mem, &fx, "memo", &pack(&(1i32, String::new())).unwrap()),
        ContractError::State(StateError::NotAContract(_))
    );
}

#[test]
fn airdrop_to_generated_holders() {
    let mut rng = TestRng::new(42);
    let mut recipients: Vec<Name> = (0..5).map(|_| rng.account()).collect();
    recipients.extend(TestFixtures::accounts());
    recipients.sort();
    recipients.dedup();
    for who in &recipients {
        assert_round_trip!(Balance {
            owner: who.clone(),
            amount: rng.next_u64(),
        });
    }

    let mut mem = created();
    let share = 100 / recipients.len() as u64;
    let args = pack(&(recipients.clone(), share)).unwrap();
    call(&Token, &mut mem, &token_fixture(), "airdrop", &args).unwrap();

    for who in &recipients {
        assert_eq!(raw_balance(&mem, who.as_str()), Some(share));
    }
    assert_eq!(
        raw_balance(&mem, TestFixtures::owner().as_str()),
        Some(100 - share * recipients.len() as u64)
    );
}
