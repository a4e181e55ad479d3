//! Enrichment join: payee accounts annotated with their payee's display name.

use std::collections::HashMap;

use uuid::Uuid;

use crate::{Payee, PayeeAccount};

/// Display name substituted when a payee account's `payee_id` no longer
/// resolves. Reference-integrity gaps degrade to this sentinel instead of
/// raising.
pub const UNKNOWN_PAYEE: &str = "Unknown";

/// A payee account denormalized with its owning payee's display name.
///
/// Never persisted: rebuilt from the current snapshot on every read and
/// discarded when either collection changes.
#[derive(Clone, Debug, PartialEq)]
pub struct EnrichedPayeeAccount {
    pub account: PayeeAccount,
    pub payee_name: String,
}

/// Joins payee accounts to their owning payees.
///
/// Pure and total: one output record per input account, in input order, with
/// `payee_name` looked up by `payee_id` or [`UNKNOWN_PAYEE`] when no payee
/// matches. Duplicate payee ids are a data-integrity condition the join does
/// not validate; the last occurrence wins.
pub fn enrich(payee_accounts: Vec<PayeeAccount>, payees: &[Payee]) -> Vec<EnrichedPayeeAccount> {
    let names: HashMap<Uuid, &str> = payees
        .iter()
        .map(|payee| (payee.id, payee.name.as_str()))
        .collect();

    payee_accounts
        .into_iter()
        .map(|account| {
            let payee_name = names
                .get(&account.payee_id)
                .map_or(UNKNOWN_PAYEE, |name| *name)
                .to_string();
            EnrichedPayeeAccount {
                account,
                payee_name,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DebtCategory, InterestMode, MoneyCents};

    fn payee(name: &str) -> Payee {
        Payee::new("alice", name.to_string())
    }

    fn account_for(payee_id: Uuid, label: &str) -> PayeeAccount {
        PayeeAccount {
            id: Uuid::new_v4(),
            user_id: "alice".to_string(),
            payee_id,
            label: label.to_string(),
            account_number: None,
            category: DebtCategory::CreditCard,
            interest_mode: InterestMode::None,
            interest_rate: None,
            current_balance: Some(MoneyCents::new(10_000)),
            principal_balance: None,
            accrued_interest: None,
            due_date: None,
            last_interest_accrual: None,
            loan_term_months: None,
            promo_term_months: None,
            min_payment: None,
        }
    }

    #[test]
    fn resolves_names_and_preserves_order() {
        let bank = payee("First Bank");
        let card = payee("Card Co");
        let accounts = vec![
            account_for(card.id, "Visa"),
            account_for(bank.id, "Mortgage"),
            account_for(card.id, "Store card"),
        ];

        let enriched = enrich(accounts.clone(), &[bank, card]);

        assert_eq!(enriched.len(), 3);
        assert_eq!(enriched[0].payee_name, "Card Co");
        assert_eq!(enriched[1].payee_name, "First Bank");
        assert_eq!(enriched[2].payee_name, "Card Co");
        let labels: Vec<_> = enriched.iter().map(|e| e.account.label.as_str()).collect();
        assert_eq!(labels, ["Visa", "Mortgage", "Store card"]);
    }

    #[test]
    fn missing_payee_falls_back_to_unknown() {
        let orphan = account_for(Uuid::new_v4(), "Ghost");
        let enriched = enrich(vec![orphan], &[payee("Someone Else")]);
        assert_eq!(enriched[0].payee_name, UNKNOWN_PAYEE);
    }

    #[test]
    fn duplicate_payee_ids_last_write_wins() {
        let mut first = payee("Old Name");
        let second = payee("New Name");
        first.id = second.id;
        let acct = account_for(second.id, "Visa");

        let enriched = enrich(vec![acct], &[first, second]);
        assert_eq!(enriched[0].payee_name, "New Name");
    }

    #[test]
    fn empty_inputs_give_empty_output() {
        assert!(enrich(Vec::new(), &[]).is_empty());
    }
}
