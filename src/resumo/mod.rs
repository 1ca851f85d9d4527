//! Quadro resumo por item — the per-line-item summary table.
//!
//! Walks every `det` element, decodes the variant tax sub-structures, and
//! assembles one flat [`ItemSummary`] per item plus a trailing
//! [`Ordem::Total`] aggregate row. Missing groups and fields degrade to
//! empty/zero values; extraction never fails on a well-formed document.

use roxmltree::{Document, Node};
use rust_decimal::Decimal;

use crate::core::money::{parse_money_or_default, round_half_up};
use crate::core::{HeaderSummary, IpiInfo, ItemSummary, Ordem, ReformTax, TaxInfo};
use crate::xml;

/// Extract one summary row per line item, sorted by [`Ordem`] ascending,
/// with the synthetic TOTAL row appended.
pub fn extract_items(doc: &Document) -> Vec<ItemSummary> {
    let mut rows: Vec<ItemSummary> = xml::items(doc).map(extract_item).collect();
    rows.sort_by_key(|r| r.ordem);
    let total = totals_row(&rows);
    rows.push(total);
    rows
}

fn extract_item(det: Node) -> ItemSummary {
    let ordem = det
        .attribute("nItem")
        .and_then(|s| s.parse::<u32>().ok())
        .map_or(Ordem::Unnumbered, Ordem::Item);

    let prod = xml::child(det, "prod");
    let imposto = xml::child(det, "imposto");

    let prod_text = |path: &str| prod.map_or_else(String::new, |p| xml::find_text(p, path));
    let prod_money = |path: &str| parse_money_or_default(&prod_text(path));

    let v_prod = prod_money("vProd");
    let v_frete = prod_money("vFrete");
    let v_seg = prod_money("vSeg");
    let v_desc = prod_money("vDesc");
    let v_outro = prod_money("vOutro");

    let ipi = ipi_info(imposto);
    let (ibs, cbs) = reform_taxes(det);

    // NT-convention item total; excludes ICMS/PIS/COFINS/IBS/CBS by design.
    let total_item = round_half_up(v_prod + v_frete + v_seg + v_outro - v_desc + ipi.amount, 2);

    ItemSummary {
        ordem,
        c_prod: prod_text("cProd"),
        ncm: prod_text("NCM"),
        cfop: prod_text("CFOP"),
        icms: legacy_tax(imposto, "ICMS", "pICMS", "vICMS"),
        pis: legacy_tax(imposto, "PIS", "pPIS", "vPIS"),
        cofins: legacy_tax(imposto, "COFINS", "pCOFINS", "vCOFINS"),
        ibs,
        cbs,
        ipi,
        total_item,
    }
}

/// Decode a tagged-union tax group (`ICMS`, `PIS`, `COFINS`).
///
/// The outer container wraps exactly one child whose tag names the regime
/// variant (`ICMS00`, `PISAliq`, ...). The shared fields are read from that
/// first child, whatever its tag; an absent or empty container decodes to
/// all defaults.
fn legacy_tax(imposto: Option<Node>, group: &str, rate_tag: &str, amount_tag: &str) -> TaxInfo {
    let Some(variant) = imposto
        .and_then(|imp| xml::child(imp, group))
        .and_then(xml::first_element_child)
    else {
        return TaxInfo::default();
    };
    TaxInfo {
        cst: xml::find_text(variant, "CST"),
        base: parse_money_or_default(&xml::find_text(variant, "vBC")),
        rate: parse_money_or_default(&xml::find_text(variant, rate_tag)),
        amount: parse_money_or_default(&xml::find_text(variant, amount_tag)),
    }
}

/// Decode the IPI group. Unlike the tagged unions above, the variant is
/// disambiguated explicitly: only `IPITrib` and `IPINT` are accepted, first
/// match wins.
fn ipi_info(imposto: Option<Node>) -> IpiInfo {
    let variant = imposto.and_then(|imp| xml::child(imp, "IPI")).and_then(|ipi| {
        ipi.children().find(|n| {
            n.is_element() && matches!(n.tag_name().name(), "IPITrib" | "IPINT")
        })
    });
    let Some(variant) = variant else {
        return IpiInfo::default();
    };
    IpiInfo {
        base: parse_money_or_default(&xml::find_text(variant, "vBC")),
        amount: parse_money_or_default(&xml::find_text(variant, "vIPI")),
    }
}

/// Decode the reform-tax group of one `det` element.
///
/// IBS fields come from `IBSCBS`/`gIBSCBS` directly; CBS shares CST,
/// cClassTrib, and base with IBS (the document carries them only once) and
/// takes its amount from the nested `gCBS` child.
pub(crate) fn reform_taxes(det: Node) -> (ReformTax, ReformTax) {
    let ibscbs = xml::child(det, "imposto").and_then(|imp| xml::child(imp, "IBSCBS"));

    let cst = ibscbs.map_or_else(String::new, |n| xml::find_text(n, "CST"));
    let c_class_trib = ibscbs.map_or_else(String::new, |n| xml::find_text(n, "cClassTrib"));

    let g = ibscbs.and_then(|n| xml::child(n, "gIBSCBS"));
    let base = parse_money_or_default(&g.map_or_else(String::new, |n| xml::find_text(n, "vBC")));
    let v_ibs = parse_money_or_default(&g.map_or_else(String::new, |n| xml::find_text(n, "vIBS")));
    let v_cbs = parse_money_or_default(
        &g.and_then(|n| xml::child(n, "gCBS"))
            .map_or_else(String::new, |n| xml::find_text(n, "vCBS")),
    );

    let ibs = ReformTax {
        cst: cst.clone(),
        c_class_trib: c_class_trib.clone(),
        base,
        amount: v_ibs,
    };
    let cbs = ReformTax {
        cst,
        c_class_trib,
        base,
        amount: v_cbs,
    };
    (ibs, cbs)
}

/// Fold the item rows into the TOTAL aggregate: every numeric column is the
/// half-up-rounded sum of that column (rate columns included, matching the
/// report layout).
fn totals_row(rows: &[ItemSummary]) -> ItemSummary {
    let sum = |f: &dyn Fn(&ItemSummary) -> Decimal| {
        round_half_up(rows.iter().map(f).sum::<Decimal>(), 2)
    };

    ItemSummary {
        ordem: Ordem::Total,
        c_prod: String::new(),
        ncm: String::new(),
        cfop: String::new(),
        icms: TaxInfo {
            cst: String::new(),
            base: sum(&|r| r.icms.base),
            rate: sum(&|r| r.icms.rate),
            amount: sum(&|r| r.icms.amount),
        },
        pis: TaxInfo {
            cst: String::new(),
            base: sum(&|r| r.pis.base),
            rate: sum(&|r| r.pis.rate),
            amount: sum(&|r| r.pis.amount),
        },
        cofins: TaxInfo {
            cst: String::new(),
            base: sum(&|r| r.cofins.base),
            rate: sum(&|r| r.cofins.rate),
            amount: sum(&|r| r.cofins.amount),
        },
        ibs: ReformTax {
            cst: String::new(),
            c_class_trib: String::new(),
            base: sum(&|r| r.ibs.base),
            amount: sum(&|r| r.ibs.amount),
        },
        cbs: ReformTax {
            cst: String::new(),
            c_class_trib: String::new(),
            base: sum(&|r| r.cbs.base),
            amount: sum(&|r| r.cbs.amount),
        },
        ipi: IpiInfo {
            base: sum(&|r| r.ipi.base),
            amount: sum(&|r| r.ipi.amount),
        },
        total_item: sum(&|r| r.total_item),
    }
}

/// Read the scalar header fields shown alongside the tables.
pub fn read_header(doc: &Document) -> HeaderSummary {
    let root = doc.root_element();
    HeaderSummary {
        tp_amb: xml::find_text_deep(root, "ide/tpAmb"),
        emit_cnpj: xml::find_text_deep(root, "emit/CNPJ"),
        dest_cnpj: xml::find_text_deep(root, "dest/CNPJ"),
        dest_uf: xml::find_text_deep(root, "dest/enderDest/UF"),
        v_nf: round_half_up(
            parse_money_or_default(&xml::find_text_deep(root, "total/ICMSTot/vNF")),
            2,
        ),
    }
}
