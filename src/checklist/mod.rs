//! Checklist obrigatório — header, party, per-item, and totals rules.
//!
//! Every rule either passes or fails and is recorded as a [`CheckResult`];
//! the validator never aborts mid-run. Rule order is fixed and
//! deterministic: header, parties, items in document order, totals.

use roxmltree::Document;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::core::money::{format_amount, parse_money_or_default, round_half_up};
use crate::core::{CheckResult, ReformTax, ValidationParams};
use crate::resumo;
use crate::xml;

/// Run the full checklist against one document with the given parameters.
pub fn validate(doc: &Document, params: &ValidationParams) -> Vec<CheckResult> {
    let root = doc.root_element();
    let mut checks = Vec::new();

    // Cabeçalho
    let tp_amb = xml::find_text_deep(root, "ide/tpAmb");
    checks.push(check(
        "Cabeçalho",
        "ide/tpAmb",
        "Deve ser 2 (homologação)",
        tp_amb == "2",
        &tp_amb,
        "2",
    ));

    // Partes
    let emit_cnpj = xml::find_text_deep(root, "emit/CNPJ");
    let emit_ie = xml::find_text_deep(root, "emit/IE");
    let dest_cnpj = xml::find_text_deep(root, "dest/CNPJ");
    let dest_ie = xml::find_text_deep(root, "dest/IE");
    let dest_uf = xml::find_text_deep(root, "dest/enderDest/UF");
    let ind_ie_dest = xml::find_text_deep(root, "dest/indIEDest");

    checks.push(presence("Partes", "emit/CNPJ", &emit_cnpj));
    checks.push(presence("Partes", "emit/IE", &emit_ie));
    checks.push(presence("Partes", "dest/CNPJ", &dest_cnpj));
    checks.push(presence("Partes", "dest/IE", &dest_ie));
    checks.push(presence("Partes", "dest/UF", &dest_uf));
    checks.push(check(
        "Partes",
        "dest/indIEDest",
        "Deve ser 1 (contribuinte)",
        ind_ie_dest == "1",
        &ind_ie_dest,
        "1",
    ));

    // Itens + matemática da fase de teste
    let p_ibs = params.ibs_rate_percent / dec!(100);
    let p_cbs = params.cbs_rate_percent / dec!(100);

    let item_taxes: Vec<(ReformTax, ReformTax)> =
        xml::items(doc).map(resumo::reform_taxes).collect();

    for (idx, (ibs, cbs)) in item_taxes.iter().enumerate() {
        let grupo = format!("Item {}", idx + 1);

        checks.push(presence(&grupo, "IBSCBS/CST", &ibs.cst));
        checks.push(presence(&grupo, "IBSCBS/cClassTrib", &ibs.c_class_trib));
        checks.push(check(
            &grupo,
            "IBSCBS/vBC",
            "Preenchido (>0 quando tributado)",
            ibs.base > Decimal::ZERO,
            &format_amount(ibs.base),
            "",
        ));

        let expected_ibs = round_half_up(ibs.base * p_ibs, 2);
        let expected_cbs = round_half_up(cbs.base * p_cbs, 2);
        checks.push(check(
            &grupo,
            "VALOR IBS",
            &format!("vBC × {}% (2 casas)", format_amount(params.ibs_rate_percent)),
            (ibs.amount - expected_ibs).abs() <= params.tolerance,
            &format_amount(ibs.amount),
            &format_amount(expected_ibs),
        ));
        checks.push(check(
            &grupo,
            "VALOR CBS",
            &format!("vBC × {}% (2 casas)", format_amount(params.cbs_rate_percent)),
            (cbs.amount - expected_cbs).abs() <= params.tolerance,
            &format_amount(cbs.amount),
            &format_amount(expected_cbs),
        ));
    }

    // Totais — full-precision running sums against the declared IBSCBSTot
    // block. Equality here is exact, not tolerance-based, and the rule text
    // says so.
    let sums = item_taxes
        .iter()
        .fold(ReformTotals::default(), |acc, (ibs, cbs)| acc.add(ibs, cbs));

    let declared_bc = parse_money_or_default(&xml::find_text_deep(root, "IBSCBSTot/vBCIBSCBS"));
    let declared_ibs = parse_money_or_default(&xml::find_text_deep(root, "IBSCBSTot/gIBS/vIBS"));
    let declared_cbs = parse_money_or_default(&xml::find_text_deep(root, "IBSCBSTot/gCBS/vCBS"));

    checks.push(check(
        "Totais",
        "IBSCBSTot/vBCIBSCBS",
        "Σ vBC dos itens (igualdade exata)",
        sums.base == declared_bc,
        &format_amount(declared_bc),
        &format_amount(sums.base),
    ));
    checks.push(check(
        "Totais",
        "IBSCBSTot/gIBS/vIBS",
        "Σ vIBS dos itens (igualdade exata)",
        sums.ibs == declared_ibs,
        &format_amount(declared_ibs),
        &format_amount(sums.ibs),
    ));
    checks.push(check(
        "Totais",
        "IBSCBSTot/gCBS/vCBS",
        "Σ vCBS dos itens (igualdade exata)",
        sums.cbs == declared_cbs,
        &format_amount(declared_cbs),
        &format_amount(sums.cbs),
    ));

    checks
}

/// Full-precision per-item accumulator (no per-item rounding before summing).
#[derive(Debug, Default, Clone, Copy)]
struct ReformTotals {
    base: Decimal,
    ibs: Decimal,
    cbs: Decimal,
}

impl ReformTotals {
    fn add(self, ibs: &ReformTax, cbs: &ReformTax) -> Self {
        Self {
            base: self.base + ibs.base,
            ibs: self.ibs + ibs.amount,
            cbs: self.cbs + cbs.amount,
        }
    }
}

fn check(
    grupo: &str,
    campo: &str,
    regra: &str,
    passed: bool,
    encontrado: &str,
    esperado: &str,
) -> CheckResult {
    CheckResult {
        grupo: grupo.to_string(),
        campo: campo.to_string(),
        regra: regra.to_string(),
        passed,
        encontrado: encontrado.to_string(),
        esperado: esperado.to_string(),
    }
}

fn presence(grupo: &str, campo: &str, value: &str) -> CheckResult {
    check(grupo, campo, "Preenchido", !value.is_empty(), value, "")
}
