//! Trader scenarios against a ledger listing DAI, BAT, REP and ZRX
//!
//! Every trader is seeded with 1000 of each token and approves the ledger's
//! custody account for the full amount before each test.

use contracts::config::{LedgerConfig, TokenListing};
use contracts::errors::LedgerError;
use contracts::events::{EventKind, LedgerEvent};
use contracts::ledger::Ledger;
use contracts::token::TokenBook;
use types::ids::{AccountId, ContractId, TokenId};
use types::numeric::{format_units, parse_ether, Amount, ETHER_DECIMALS};

const TICKERS: [&str; 4] = ["DAI", "BAT", "REP", "ZRX"];

struct Dex {
    ledger: Ledger,
    book: TokenBook,
    contracts: Vec<ContractId>,
    trader1: AccountId,
    trader2: AccountId,
}

impl Dex {
    fn contract(&self, ticker: &str) -> ContractId {
        let index = TICKERS.iter().position(|t| *t == ticker).unwrap();
        self.contracts[index]
    }

    fn custody_holdings(&self, ticker: &str) -> Amount {
        self.book
            .balance_of(self.contract(ticker), self.ledger.custody())
    }
}

fn id(ticker: &str) -> TokenId {
    TokenId::from_ticker(ticker).unwrap()
}

fn ether(amount: &str) -> Amount {
    parse_ether(amount).unwrap()
}

fn setup() -> Dex {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let mut book = TokenBook::new();
    let contracts: Vec<ContractId> = TICKERS.iter().map(|t| book.deploy(*t)).collect();

    let config = LedgerConfig {
        admin: AccountId::new(),
        custody: AccountId::new(),
        tokens: TICKERS
            .iter()
            .zip(&contracts)
            .map(|(ticker, contract)| TokenListing {
                ticker: ticker.to_string(),
                contract: *contract,
            })
            .collect(),
    };
    let ledger = Ledger::from_config(&config).unwrap();

    let trader1 = AccountId::new();
    let trader2 = AccountId::new();
    let seed = ether("1000");
    for trader in [trader1, trader2] {
        for contract in &contracts {
            book.faucet(*contract, trader, seed).unwrap();
            book.approve(*contract, trader, ledger.custody(), seed).unwrap();
        }
    }

    Dex {
        ledger,
        book,
        contracts,
        trader1,
        trader2,
    }
}

#[test]
fn should_deposit_tokens() {
    let mut dex = setup();
    let amount = ether("100");

    dex.ledger
        .deposit(&mut dex.book, dex.trader1, id("DAI"), amount)
        .unwrap();

    assert_eq!(dex.ledger.balance_of(&dex.trader1, &id("DAI")), amount);
    assert_eq!(dex.custody_holdings("DAI"), amount);
}

#[test]
fn should_not_deposit_unregistered_token() {
    let mut dex = setup();
    let result = dex.ledger.deposit(
        &mut dex.book,
        dex.trader1,
        id("RANDOM_TOKEN"),
        ether("100"),
    );

    let err = result.unwrap_err();
    assert_eq!(err, LedgerError::InvalidToken { token: id("RANDOM_TOKEN") });
    assert!(err.to_string().starts_with("invalid token"));
}

#[test]
fn should_withdraw_tokens() {
    let mut dex = setup();

    dex.ledger
        .deposit(&mut dex.book, dex.trader1, id("DAI"), ether("100"))
        .unwrap();
    dex.ledger
        .withdraw(&mut dex.book, dex.trader1, id("DAI"), ether("50"))
        .unwrap();

    assert_eq!(dex.ledger.balance_of(&dex.trader1, &id("DAI")), ether("50"));
    assert_eq!(dex.custody_holdings("DAI"), ether("50"));
    assert_eq!(
        dex.book.balance_of(dex.contract("DAI"), dex.trader1),
        ether("950")
    );
}

#[test]
fn should_not_withdraw_unregistered_token() {
    let mut dex = setup();
    let result = dex.ledger.withdraw(
        &mut dex.book,
        dex.trader1,
        id("RANDOM_TOKEN"),
        ether("50"),
    );
    assert_eq!(
        result,
        Err(LedgerError::InvalidToken { token: id("RANDOM_TOKEN") })
    );
}

#[test]
fn should_not_withdraw_more_than_balance() {
    let mut dex = setup();

    dex.ledger
        .deposit(&mut dex.book, dex.trader1, id("DAI"), ether("100"))
        .unwrap();
    let err = dex
        .ledger
        .withdraw(&mut dex.book, dex.trader1, id("DAI"), ether("150"))
        .unwrap_err();

    assert!(err.to_string().starts_with("not enough balance"));
    assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
    assert_eq!(dex.ledger.balance_of(&dex.trader1, &id("DAI")), ether("100"));
}

#[test]
fn sequential_deposit_withdraw_overdraw() {
    let mut dex = setup();
    let dai = id("DAI");

    dex.ledger
        .deposit(&mut dex.book, dex.trader1, dai, ether("100"))
        .unwrap();
    assert_eq!(dex.ledger.balance_of(&dex.trader1, &dai), ether("100"));

    dex.ledger
        .withdraw(&mut dex.book, dex.trader1, dai, ether("50"))
        .unwrap();
    assert_eq!(dex.ledger.balance_of(&dex.trader1, &dai), ether("50"));
    assert_eq!(dex.custody_holdings("DAI"), ether("50"));

    let result = dex
        .ledger
        .withdraw(&mut dex.book, dex.trader1, dai, ether("150"));
    assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
    assert_eq!(dex.ledger.balance_of(&dex.trader1, &dai), ether("50"));
    assert_eq!(
        format_units(dex.ledger.balance_of(&dex.trader1, &dai), ETHER_DECIMALS).unwrap(),
        "50"
    );
}

#[test]
fn traders_are_isolated() {
    let mut dex = setup();

    dex.ledger
        .deposit(&mut dex.book, dex.trader1, id("DAI"), ether("100"))
        .unwrap();
    dex.ledger
        .deposit(&mut dex.book, dex.trader2, id("DAI"), ether("30"))
        .unwrap();
    dex.ledger
        .withdraw(&mut dex.book, dex.trader1, id("DAI"), ether("100"))
        .unwrap();

    // trader1 cannot reach trader2's funds
    let result = dex
        .ledger
        .withdraw(&mut dex.book, dex.trader1, id("DAI"), ether("1"));
    assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));

    assert_eq!(dex.ledger.balance_of(&dex.trader1, &id("DAI")), Amount::ZERO);
    assert_eq!(dex.ledger.balance_of(&dex.trader2, &id("DAI")), ether("30"));
    assert_eq!(dex.custody_holdings("DAI"), ether("30"));
}

#[test]
fn tokens_are_isolated() {
    let mut dex = setup();

    dex.ledger
        .deposit(&mut dex.book, dex.trader1, id("BAT"), ether("10"))
        .unwrap();
    dex.ledger
        .deposit(&mut dex.book, dex.trader1, id("ZRX"), ether("20"))
        .unwrap();

    let result = dex
        .ledger
        .withdraw(&mut dex.book, dex.trader1, id("REP"), ether("5"));
    assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));

    let balances = dex.ledger.trader_balances(&dex.trader1).unwrap();
    assert_eq!(balances.len(), 2);
    assert_eq!(balances[&id("BAT")], ether("10"));
    assert_eq!(balances[&id("ZRX")], ether("20"));
    assert_eq!(dex.custody_holdings("REP"), Amount::ZERO);
}

#[test]
fn registry_lists_configured_tokens() {
    let dex = setup();
    let listed: Vec<String> = dex
        .ledger
        .registry()
        .tokens()
        .iter()
        .map(|entry| entry.token.ticker())
        .collect();
    assert_eq!(listed, TICKERS);
}

#[test]
fn event_stream_exports_as_json() {
    let mut dex = setup();
    dex.ledger.drain_events();

    dex.ledger
        .deposit(&mut dex.book, dex.trader2, id("REP"), ether("7"))
        .unwrap();
    dex.ledger
        .withdraw(&mut dex.book, dex.trader2, id("REP"), ether("2"))
        .unwrap();

    let events = dex.ledger.drain_events();
    let json = serde_json::to_string(&events).unwrap();
    let decoded: Vec<LedgerEvent> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, events);

    let kinds: Vec<EventKind> = decoded.iter().map(|e| e.kind()).collect();
    assert_eq!(kinds, vec![EventKind::Deposit, EventKind::Withdrawal]);
    assert!(decoded.iter().all(|e| e.trader() == Some(dex.trader2)));
    match &decoded[1] {
        LedgerEvent::Withdrawn(w) => assert_eq!(w.amount, ether("2")),
        other => panic!("unexpected event: {:?}", other),
    }
}
