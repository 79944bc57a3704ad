use crate::domain::model::{CarrierService, ServiceSelectionItem};
use std::collections::BTreeSet;

/// Marks each live catalog entry as selected or not, keeping catalog order.
///
/// Selected codes that the carrier no longer offers produce no item; they stay
/// in the stored selection until the operator saves without them.
pub fn reconcile(
    catalog: &[CarrierService],
    selected_codes: &BTreeSet<String>,
) -> Vec<ServiceSelectionItem> {
    catalog
        .iter()
        .map(|service| ServiceSelectionItem {
            code: service.code.clone(),
            display_name: service.display_name.clone(),
            is_selected: selected_codes.contains(&service.code),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn codes(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_reconcile_drops_codes_missing_from_catalog() {
        let catalog = vec![CarrierService::new("DOM.EP", "Expedited Parcel")];
        let selected = codes(&["DOM.EP", "INT.XP"]);

        let items = reconcile(&catalog, &selected);

        assert_eq!(
            items,
            vec![ServiceSelectionItem {
                code: "DOM.EP".to_string(),
                display_name: "Expedited Parcel".to_string(),
                is_selected: true,
            }]
        );
    }

    #[test]
    fn test_reconcile_keeps_catalog_order() {
        let catalog = vec![
            CarrierService::new("USA.XP", "Xpresspost USA"),
            CarrierService::new("DOM.RP", "Regular Parcel"),
            CarrierService::new("DOM.EP", "Expedited Parcel"),
        ];
        let selected = codes(&["DOM.EP", "USA.XP"]);

        let items = reconcile(&catalog, &selected);

        let order: Vec<&str> = items.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(order, vec!["USA.XP", "DOM.RP", "DOM.EP"]);
        assert!(items[0].is_selected);
        assert!(!items[1].is_selected);
        assert!(items[2].is_selected);
    }

    #[test]
    fn test_reconcile_empty_catalog() {
        assert!(reconcile(&[], &codes(&["DOM.EP"])).is_empty());
    }

    fn catalog_strategy() -> impl Strategy<Value = Vec<CarrierService>> {
        proptest::collection::btree_set("[A-Z]{3}\\.[A-Z]{2}", 0..12).prop_flat_map(|codes| {
            let codes: Vec<String> = codes.into_iter().collect();
            Just(codes).prop_shuffle().prop_map(|codes| {
                codes
                    .into_iter()
                    .map(|code| CarrierService::new(code.clone(), format!("Service {}", code)))
                    .collect()
            })
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn test_reconcile_marks_exactly_selected_codes(
            catalog in catalog_strategy(),
            selected in proptest::collection::btree_set("[A-Z]{3}\\.[A-Z]{2}", 0..12),
        ) {
            let items = reconcile(&catalog, &selected);

            prop_assert_eq!(items.len(), catalog.len());
            for (item, service) in items.iter().zip(catalog.iter()) {
                prop_assert_eq!(&item.code, &service.code);
                prop_assert_eq!(item.is_selected, selected.contains(&service.code));
            }
            for code in selected.iter().filter(|c| !catalog.iter().any(|s| &s.code == *c)) {
                prop_assert!(items.iter().all(|item| &item.code != code));
            }
        }

        #[test]
        fn test_reconcile_is_deterministic(
            catalog in catalog_strategy(),
            selected in proptest::collection::vec("[A-Z]{3}\\.[A-Z]{2}", 0..12),
        ) {
            let forward: BTreeSet<String> = selected.iter().cloned().collect();
            let reversed: BTreeSet<String> = selected.iter().rev().cloned().collect();

            prop_assert_eq!(reconcile(&catalog, &forward), reconcile(&catalog, &reversed));
            prop_assert_eq!(reconcile(&catalog, &forward), reconcile(&catalog, &forward));
        }
    }
}
