//! CardLedger load simulator.
//!
//! Opens a batch of card accounts, drives random purchases and recharges at
//! them from a rayon pool, then audits every account for balance drift.
//!
//! Usage: cargo run --bin simulator
//! Tuning: CARDLEDGER__SIMULATOR__OPERATIONS=100000 cargo run --bin simulator

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, bail};
use cardledger_core::{LedgerError, LedgerService};
use cardledger_shared::config::SimulatorConfig;
use cardledger_shared::types::{CardNumber, Pin};
use cardledger_shared::{AppConfig, AppError, telemetry};
use parking_lot::Mutex;
use rand::Rng;
use rayon::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{error, info};

/// Simulated accounts get PINs `BASE_PIN`, `BASE_PIN + 1`, ...
const BASE_PIN: u32 = Pin::MIN;

/// A simulated card plus the recharges that succeeded against it.
struct SimAccount {
    number: CardNumber,
    pin: u32,
    recharged: Mutex<Decimal>,
}

/// Outcome counters shared by all workers.
#[derive(Default)]
struct Tally {
    purchases: AtomicU64,
    recharges: AtomicU64,
    insufficient_funds: AtomicU64,
    limit_exceeded: AtomicU64,
    unexpected: AtomicU64,
}

impl Tally {
    fn record(&self, result: &Result<Decimal, LedgerError>, purchase: bool) {
        let counter = match result {
            Ok(_) if purchase => &self.purchases,
            Ok(_) => &self.recharges,
            Err(LedgerError::InsufficientFunds { .. }) => &self.insufficient_funds,
            Err(LedgerError::CreditLimitExceeded { .. }) => &self.limit_exceeded,
            Err(_) => &self.unexpected,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn get(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init_tracing(&config.logging).context("failed to install tracing subscriber")?;

    let sim = &config.simulator;
    let max_cents = max_cents(sim)?;

    let service = LedgerService::from_config(&config.ledger);
    let accounts = open_accounts(&service, sim)?;
    info!(
        accounts = accounts.len(),
        operations = sim.operations,
        "accounts opened, starting load"
    );

    let tally = Tally::default();
    let run = || {
        (0..sim.operations)
            .into_par_iter()
            .for_each(|_| step(&service, &accounts, max_cents, &tally));
    };

    match sim.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("failed to build worker pool")?
            .install(run),
        None => run(),
    }

    info!(
        purchases = Tally::get(&tally.purchases),
        recharges = Tally::get(&tally.recharges),
        insufficient_funds = Tally::get(&tally.insufficient_funds),
        limit_exceeded = Tally::get(&tally.limit_exceeded),
        unexpected = Tally::get(&tally.unexpected),
        "load finished"
    );

    if Tally::get(&tally.unexpected) > 0 {
        bail!("{} operations failed unexpectedly", Tally::get(&tally.unexpected));
    }

    audit(&service, &accounts, sim.credit_limit)
}

/// Largest random amount, in cents.
fn max_cents(sim: &SimulatorConfig) -> anyhow::Result<i64> {
    let cents = sim
        .max_amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|c| c.trunc().to_i64())
        .context("simulator.max_amount is out of range")?;
    if cents < 1 {
        bail!("simulator.max_amount must be at least 0.01");
    }
    Ok(cents)
}

fn open_accounts(service: &LedgerService, sim: &SimulatorConfig) -> anyhow::Result<Vec<SimAccount>> {
    let available_pins = usize::try_from(Pin::MAX - Pin::MIN + 1)?;
    if sim.accounts == 0 || sim.accounts > available_pins {
        bail!("simulator.accounts must be between 1 and {available_pins}");
    }

    (0..sim.accounts)
        .map(|i| -> anyhow::Result<SimAccount> {
            let pin = BASE_PIN + u32::try_from(i)?;
            let number = service
                .create_account(&format!("Simulated holder {i}"), pin, sim.credit_limit)
                .map_err(AppError::from)?;
            Ok(SimAccount {
                number,
                pin,
                recharged: Mutex::new(Decimal::ZERO),
            })
        })
        .collect()
}

/// One random purchase (70%) or recharge (30%) against a random account.
fn step(service: &LedgerService, accounts: &[SimAccount], max_cents: i64, tally: &Tally) {
    let mut rng = rand::thread_rng();
    let account = &accounts[rng.gen_range(0..accounts.len())];
    let amount = Decimal::new(rng.gen_range(1..=max_cents), 2);
    let id = account.number.as_str();

    if rng.gen_ratio(7, 10) {
        tally.record(&service.purchase(id, account.pin, amount), true);
    } else {
        let result = service.recharge(id, account.pin, amount);
        if result.is_ok() {
            let mut recharged = account.recharged.lock();
            *recharged = recharged.saturating_add(amount);
        }
        tally.record(&result, false);
    }
}

/// Checks `0 <= balance <= limit` and `balance = limit - spent + recharged`
/// for every account.
fn audit(service: &LedgerService, accounts: &[SimAccount], limit: Decimal) -> anyhow::Result<()> {
    let mut drifted = 0usize;

    for account in accounts {
        let id = account.number.as_str();
        let summary = service.describe(id, account.pin).map_err(AppError::from)?;
        let spent = service
            .get_history(id, account.pin)
            .map_err(AppError::from)?
            .iter()
            .try_fold(Decimal::ZERO, |total, amount| total.checked_add(*amount))
            .context("purchase total overflowed")?;
        let recharged = *account.recharged.lock();
        let expected = limit
            .checked_sub(spent)
            .and_then(|left| left.checked_add(recharged))
            .context("audit arithmetic overflowed")?;

        let in_bounds = summary.balance >= Decimal::ZERO && summary.balance <= limit;
        if !in_bounds || summary.balance != expected {
            drifted += 1;
            error!(
                card = %account.number.masked(),
                balance = %summary.balance,
                %expected,
                "balance audit failed"
            );
        }

        let report = serde_json::json!({
            "card": account.number.masked(),
            "holder": summary.holder,
            "credit_limit": summary.credit_limit,
            "balance": summary.balance,
            "spent": spent,
            "recharged": recharged,
        });
        info!(%report, "audited");
    }

    if drifted > 0 {
        bail!("{drifted} of {} accounts failed the audit", accounts.len());
    }

    info!(accounts = accounts.len(), "all accounts balanced");
    Ok(())
}
