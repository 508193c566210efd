use crate::model::{columns, split_card_list, OfferRow, OfferTables, SelectedOffers};

/// Venue rows whose trimmed "Credit Card" equals `card` exactly.
fn matches_credit_card(row: &OfferRow, card: &str) -> bool {
    row.trimmed(columns::CREDIT_CARD) == Some(card)
}

/// Debit rows whose card list contains `card` exactly.
fn matches_debit_card(row: &OfferRow, card: &str) -> bool {
    row.get(columns::APPLICABLE_DEBIT_CARDS)
        .is_some_and(|cards| split_card_list(cards).any(|c| c == card))
}

/// Benefit rows whose trimmed "Credit Card Name" equals `card`, ignoring case.
fn matches_benefit_card(row: &OfferRow, card: &str) -> bool {
    row.trimmed(columns::CREDIT_CARD_NAME)
        .is_some_and(|name| name.to_lowercase() == card.to_lowercase())
}

/// Selects every offer row for the chosen card, grouped by category.
///
/// A blank selection or a card present in no table yields empty groups.
pub fn offers_for<'a>(card: &str, tables: &'a OfferTables) -> SelectedOffers<'a> {
    if card.trim().is_empty() {
        return SelectedOffers::default();
    }

    let pick = |rows: &'a [OfferRow], rule: fn(&OfferRow, &str) -> bool| -> Vec<&'a OfferRow> {
        rows.iter().filter(|r| rule(r, card)).collect()
    };

    SelectedOffers {
        pvr: pick(&tables.pvr, matches_credit_card),
        inox: pick(&tables.inox, matches_credit_card),
        book_my_show: pick(&tables.book_my_show, matches_credit_card),
        debit: pick(&tables.debit, matches_debit_card),
        benefits: pick(&tables.benefits, matches_benefit_card),
    }
}
