use crate::model::{columns, split_card_list, CardIndex, OfferCategory, OfferRow, OfferTables};
use std::collections::BTreeSet;

/// Builds the credit and debit card sets from all five tables.
///
/// Credit names come from the benefits table ("Credit Card Name") and the
/// three venue tables ("Credit Card"); debit names come from the
/// comma-separated "Applicable Debit Cards" column. Rows missing the column
/// contribute nothing. Both sets are ordered by byte-wise string comparison.
pub fn build_index(tables: &OfferTables) -> CardIndex {
    let mut credit = BTreeSet::new();
    collect_column(&tables.benefits, columns::CREDIT_CARD_NAME, &mut credit);
    for venue in OfferCategory::VENUES {
        collect_column(tables.rows(venue), columns::CREDIT_CARD, &mut credit);
    }

    let mut debit = BTreeSet::new();
    for row in &tables.debit {
        if let Some(cards) = row.get(columns::APPLICABLE_DEBIT_CARDS) {
            debit.extend(split_card_list(cards).map(str::to_owned));
        }
    }

    CardIndex::from_sorted(credit.into_iter().collect(), debit.into_iter().collect())
}

fn collect_column(rows: &[OfferRow], column: &str, into: &mut BTreeSet<String>) {
    into.extend(rows.iter().filter_map(|r| r.trimmed(column)).map(str::to_owned));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credit(name: &str) -> OfferRow {
        OfferRow::new().with(columns::CREDIT_CARD, name)
    }

    fn sample_tables() -> OfferTables {
        OfferTables {
            pvr: vec![credit("HDFC Regalia"), credit(" Axis Bank Magnus ")],
            inox: vec![credit("Axis Bank Magnus"), OfferRow::new().with("Title", "No card")],
            book_my_show: vec![credit("  "), credit("Kotak Royale")],
            debit: vec![
                OfferRow::new().with(columns::APPLICABLE_DEBIT_CARDS, "SBI Debit, HDFC Debit"),
                OfferRow::new().with(columns::APPLICABLE_DEBIT_CARDS, "HDFC Debit,,"),
            ],
            benefits: vec![
                OfferRow::new().with(columns::CREDIT_CARD_NAME, " ICICI Amazon Pay "),
                OfferRow::new().with(columns::CREDIT_CARD_NAME, "HDFC Regalia"),
            ],
        }
    }

    #[test]
    fn unions_credit_names_from_benefits_and_venues() {
        let index = build_index(&sample_tables());
        assert_eq!(
            index.credit_cards(),
            &["Axis Bank Magnus", "HDFC Regalia", "ICICI Amazon Pay", "Kotak Royale"]
        );
    }

    #[test]
    fn splits_and_trims_debit_names() {
        let index = build_index(&sample_tables());
        assert_eq!(index.debit_cards(), &["HDFC Debit", "SBI Debit"]);
    }

    #[test]
    fn sets_are_sorted_without_duplicates_or_blanks() {
        let index = build_index(&sample_tables());
        for cards in [index.credit_cards(), index.debit_cards()] {
            let mut expected = cards.to_vec();
            expected.sort();
            expected.dedup();
            assert_eq!(cards, expected.as_slice());
            assert!(cards.iter().all(|c| !c.trim().is_empty()));
        }
    }

    #[test]
    fn ordering_is_ordinal_not_case_folded() {
        let tables = OfferTables {
            pvr: vec![credit("axis neo"), credit("Zeta Card"), credit("Axis Ace")],
            ..OfferTables::default()
        };
        let index = build_index(&tables);
        assert_eq!(index.credit_cards(), &["Axis Ace", "Zeta Card", "axis neo"]);
    }

    #[test]
    fn empty_tables_give_empty_index() {
        assert!(build_index(&OfferTables::default()).is_empty());
    }
}
