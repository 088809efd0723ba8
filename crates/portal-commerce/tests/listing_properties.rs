//! Property tests for sorting and pagination.

use portal_commerce::prelude::*;
use proptest::prelude::*;
use serde_json::{json, Value};

fn priced(prices: &[i64]) -> Vec<Value> {
    prices
        .iter()
        .enumerate()
        .map(|(i, p)| json!({"itemCd": format!("I{}", i), "price": p}))
        .collect()
}

proptest! {
    #[test]
    fn pages_partition_the_collection(len in 0usize..200, page_size in 1usize..40) {
        let items: Vec<usize> = (0..len).collect();
        let total_pages = len.div_ceil(page_size);

        let mut seen = Vec::new();
        for page_index in 1..=total_pages {
            let page = paginate(&items, page_index, page_size);
            prop_assert_eq!(page.total_pages(), total_pages);
            prop_assert_eq!(
                page.len(),
                page_size.min(len - (page_index - 1) * page_size)
            );
            prop_assert_eq!(page.end_ordinal(), (page_index * page_size).min(len));
            seen.extend(page.items);
        }

        prop_assert_eq!(seen, items);
        prop_assert!(paginate(&(0..len).collect::<Vec<_>>(), total_pages + 1, page_size).is_empty());
    }

    #[test]
    fn desc_is_reverse_of_asc_for_distinct_keys(
        prices in proptest::collection::hash_set(-10_000i64..10_000, 0..50)
    ) {
        let rows = priced(&prices.into_iter().collect::<Vec<_>>());

        let mut asc = sort_by(&rows, &SortSpec::asc("price"), FieldKind::Numeric);
        let desc = sort_by(&rows, &SortSpec::desc("price"), FieldKind::Numeric);
        asc.reverse();
        prop_assert_eq!(asc, desc);
    }

    #[test]
    fn sorted_output_is_a_permutation(prices in proptest::collection::vec(0i64..100, 0..50)) {
        let rows = priced(&prices);
        let sorted = sort_by(&rows, &SortSpec::asc("price"), FieldKind::Numeric);

        prop_assert_eq!(sorted.len(), rows.len());
        let values: Vec<i64> = sorted.iter().map(|r| r["price"].as_i64().unwrap()).collect();
        prop_assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn null_price_sorts_as_zero() {
    let rows = vec![
        json!({"itemCd": "pos", "price": 10}),
        json!({"itemCd": "null", "price": null}),
        json!({"itemCd": "neg", "price": -10}),
    ];
    let sorted = sort_by(&rows, &SortSpec::asc("price"), FieldKind::Numeric);
    let codes: Vec<_> = sorted.iter().map(|r| r["itemCd"].as_str().unwrap()).collect();
    assert_eq!(codes, vec!["neg", "null", "pos"]);
}

#[test]
fn pagination_at_boundary() {
    let items: Vec<u32> = (1..=25).collect();

    let first = paginate(&items, 1, 10);
    assert_eq!(first.len(), 10);
    assert_eq!((first.start_ordinal(), first.end_ordinal()), (1, 10));

    let third = paginate(&items, 3, 10);
    assert_eq!(third.len(), 5);
    assert_eq!((third.start_ordinal(), third.end_ordinal()), (21, 25));

    assert!(paginate(&items, 4, 10).is_empty());
}

#[test]
fn cart_lines_sort_by_wire_field() {
    let lines = vec![
        LineItem::new("A1", 300, 1).with_name("bolt"),
        LineItem::new("B2", 100, 1).with_name("Anchor"),
        LineItem::new("C3", 200, 2).with_name("clip"),
    ];

    let by_total = sort_by(&lines, &SortSpec::desc("totalAmount"), FieldKind::Numeric);
    let codes: Vec<_> = by_total.iter().map(|l| l.item_code.as_str()).collect();
    assert_eq!(codes, vec!["C3", "A1", "B2"]);

    let by_name = sort_by(&lines, &SortSpec::asc("itemNm"), FieldKind::Text);
    let codes: Vec<_> = by_name.iter().map(|l| l.item_code.as_str()).collect();
    assert_eq!(codes, vec!["B2", "A1", "C3"]);
}
