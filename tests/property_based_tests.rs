// tests/property_based_tests.rs

mod util;

use defi_swap_wallet::api::swap::formatter::{format_order, FeeEstimate, FeeModel, OrderContext};
use defi_swap_wallet::api::swap::{FeeFields, SwapQuote, WalletId};
use defi_swap_wallet::utils::{parse_quantity, to_hex_quantity};
use ethers::types::U256;
use proptest::prelude::*;
use std::collections::HashSet;
use test_case::test_case;
use util::*;

#[test_case(0, "0x0")]
#[test_case(50_000, "0xc350")]
#[test_case(100_000_000_000, "0x174876e800")]
#[test_case(154_000_000_000, "0x23db1d8400")]
fn hex_quantity_vectors(value: u64, expected: &str) {
    assert_eq!(to_hex_quantity(U256::from(value)), expected);
}

fn wallet_strategy() -> impl Strategy<Value = WalletId> {
    prop_oneof![
        Just(WalletId::Web3),
        Just(WalletId::LedgerNanoS),
        Just(WalletId::LedgerNanoSNew),
        Just(WalletId::Trezor),
        Just(WalletId::TrezorNew),
        Just(WalletId::PrivateKey),
    ]
}

proptest! {
    #[test]
    fn hex_quantity_is_minimal_and_reversible(value in any::<u128>()) {
        let hex = to_hex_quantity(U256::from(value));
        prop_assert!(hex.starts_with("0x"));
        let digits = &hex[2..];
        prop_assert!(digits == "0" || !digits.starts_with('0'));
        prop_assert_eq!(digits.to_lowercase(), digits);
        prop_assert_eq!(parse_quantity(&hex).unwrap(), U256::from(value));
        prop_assert_eq!(parse_quantity(&value.to_string()).unwrap(), U256::from(value));
    }

    #[test]
    fn one_fee_model_per_order(
        supports_eip1559 in any::<bool>(),
        wallet in wallet_strategy(),
        legacy_estimate in any::<bool>(),
        with_allowance in any::<bool>(),
    ) {
        let mut quote: SwapQuote = serde_json::from_value(swap_quote_json()).unwrap();
        if !with_allowance {
            quote.allowance_target = None;
        }
        let estimate = if legacy_estimate {
            FeeEstimate::Legacy { gas_price: U256::from(154_000_000_000u64) }
        } else {
            FeeEstimate::Eip1559 {
                max_fee_per_gas: U256::from(100_000_000_000u64),
                max_priority_fee_per_gas: U256::from(10_000_000_000u64),
            }
        };
        let net = network(supports_eip1559);
        let acc = account(wallet);
        let (sell, buy) = (dai(), eth());
        let ctx = OrderContext { network: &net, account: &acc, sell_asset: &sell, buy_asset: &buy };
        let unsupported: HashSet<WalletId> = [WalletId::LedgerNanoS, WalletId::Trezor].into_iter().collect();

        let order = format_order(&quote, &estimate, &ctx, &unsupported);
        let model = FeeModel::select(&net, &acc, &unsupported);

        prop_assert_eq!(order.approval_tx.is_some(), with_allowance);
        for tx in order.transactions() {
            prop_assert_eq!(&tx.fees, &order.trade_tx.fees);
            let json = serde_json::to_value(tx).unwrap();
            prop_assert!(json.get("gasPrice").is_some() != json.get("maxFeePerGas").is_some());
            match (&tx.fees, model) {
                (FeeFields::Legacy { .. }, FeeModel::Legacy) => {}
                (FeeFields::Eip1559 { tx_type, .. }, FeeModel::Eip1559) => prop_assert_eq!(*tx_type, 2),
                (fees, model) => prop_assert!(false, "{:?} under {:?}", fees, model),
            }
        }
        prop_assert_eq!(order.trade_tx.metadata.as_ref().unwrap().receiving_asset.as_str(), buy.uuid.as_str());
    }
}
