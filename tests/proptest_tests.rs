//! Property-based tests for the conferencia crate.
//!
//! Run with: `cargo test --test proptest_tests`

use conferencia::core::money::{format_amount, parse_money_or_default, round_half_up};
use conferencia::core::*;
use conferencia::{checklist, resumo, xml};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// A currency amount between 0.00 and 99999.99.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0u64..10_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

/// A small test-phase rate between 0.00 % and 5.00 %.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0u64..=500u64).prop_map(|hundredths| Decimal::new(hundredths as i64, 2))
}

/// Build an NF-e with one `det` per (vProd, vIPI, vBC, vIBS, vCBS) tuple.
fn build_nfe(items: &[(Decimal, Decimal, Decimal, Decimal, Decimal)]) -> String {
    let mut dets = String::new();
    for (i, (v_prod, v_ipi, v_bc, v_ibs, v_cbs)) in items.iter().enumerate() {
        dets.push_str(&format!(
            r#"<det nItem="{n}">
              <prod><cProd>P{n}</cProd><vProd>{v_prod}</vProd></prod>
              <imposto>
                <IPI><IPITrib><vBC>{v_prod}</vBC><vIPI>{v_ipi}</vIPI></IPITrib></IPI>
                <IBSCBS><CST>000</CST><cClassTrib>000001</cClassTrib>
                  <gIBSCBS><vBC>{v_bc}</vBC><vIBS>{v_ibs}</vIBS>
                    <gCBS><vCBS>{v_cbs}</vCBS></gCBS>
                  </gIBSCBS></IBSCBS>
              </imposto>
            </det>"#,
            n = i + 1,
        ));
    }
    format!(
        r#"<NFe xmlns="http://www.portalfiscal.inf.br/nfe"><infNFe>
          <ide><tpAmb>2</tpAmb></ide>{dets}
        </infNFe></NFe>"#
    )
}

proptest! {
    // ── Money utilities ──────────────────────────────────────────────────────

    #[test]
    fn lenient_parse_never_panics(s in ".*") {
        let _ = parse_money_or_default(&s);
    }

    #[test]
    fn lenient_parse_roundtrips_formatted_amounts(d in arb_amount()) {
        prop_assert_eq!(parse_money_or_default(&format_amount(d)), d);
    }

    #[test]
    fn half_up_rounding_is_idempotent_and_close(d in arb_amount(), extra in 0u64..1000u64) {
        // Perturb below the cent to exercise the rounding path.
        let value = d + Decimal::new(extra as i64, 5);
        let rounded = round_half_up(value, 2);
        prop_assert_eq!(round_half_up(rounded, 2), rounded);
        prop_assert!((rounded - value).abs() <= Decimal::new(5, 3)); // ≤ 0.005
    }

    // ── Quadro resumo ────────────────────────────────────────────────────────

    #[test]
    fn total_row_matches_rounded_column_sums(
        items in prop::collection::vec(
            (arb_amount(), arb_amount(), arb_amount(), arb_amount(), arb_amount()),
            1..=8,
        )
    ) {
        let src = build_nfe(&items);
        let doc = xml::parse(&src).unwrap();
        let rows = resumo::extract_items(&doc);
        prop_assert_eq!(rows.len(), items.len() + 1);

        let total = rows.last().unwrap();
        prop_assert_eq!(total.ordem, Ordem::Total);

        let (item_rows, _) = rows.split_at(rows.len() - 1);
        let sum_total: Decimal = item_rows.iter().map(|r| r.total_item).sum();
        let sum_ibs: Decimal = item_rows.iter().map(|r| r.ibs.amount).sum();
        prop_assert_eq!(total.total_item, round_half_up(sum_total, 2));
        prop_assert_eq!(total.ibs.amount, round_half_up(sum_ibs, 2));
    }

    #[test]
    fn item_total_is_product_plus_ipi(v_prod in arb_amount(), v_ipi in arb_amount()) {
        let src = build_nfe(&[(v_prod, v_ipi, v_prod, Decimal::ZERO, Decimal::ZERO)]);
        let doc = xml::parse(&src).unwrap();
        let rows = resumo::extract_items(&doc);
        prop_assert_eq!(rows[0].total_item, round_half_up(v_prod + v_ipi, 2));
    }

    // ── Checklist ────────────────────────────────────────────────────────────

    #[test]
    fn exact_amounts_always_pass_item_rules(
        v_bc in arb_amount(),
        ibs_rate in arb_rate(),
        cbs_rate in arb_rate(),
    ) {
        let v_ibs = round_half_up(v_bc * ibs_rate / Decimal::from(100), 2);
        let v_cbs = round_half_up(v_bc * cbs_rate / Decimal::from(100), 2);
        let src = build_nfe(&[(v_bc, Decimal::ZERO, v_bc, v_ibs, v_cbs)]);
        let doc = xml::parse(&src).unwrap();

        let params = ValidationParams {
            ibs_rate_percent: ibs_rate,
            cbs_rate_percent: cbs_rate,
            tolerance: Decimal::ZERO,
        };
        let checks = checklist::validate(&doc, &params);
        let ibs_check = checks.iter().find(|c| c.campo == "VALOR IBS").unwrap();
        let cbs_check = checks.iter().find(|c| c.campo == "VALOR CBS").unwrap();
        prop_assert!(ibs_check.passed, "IBS: {ibs_check:?}");
        prop_assert!(cbs_check.passed, "CBS: {cbs_check:?}");
    }

    #[test]
    fn validation_is_deterministic(
        items in prop::collection::vec(
            (arb_amount(), arb_amount(), arb_amount(), arb_amount(), arb_amount()),
            0..=5,
        ),
        ibs_rate in arb_rate(),
        cbs_rate in arb_rate(),
    ) {
        let src = build_nfe(&items);
        let doc = xml::parse(&src).unwrap();
        let params = ValidationParams {
            ibs_rate_percent: ibs_rate,
            cbs_rate_percent: cbs_rate,
            tolerance: Decimal::new(1, 2),
        };
        prop_assert_eq!(
            checklist::validate(&doc, &params),
            checklist::validate(&doc, &params)
        );
    }
}
