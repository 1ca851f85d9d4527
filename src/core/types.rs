use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Row ordinal in the quadro resumo.
///
/// Item rows carry the 1-based `nItem` attribute from the document; rows
/// whose `det` element lacks the attribute are [`Ordem::Unnumbered`] and
/// sort after all numbered items (their relative order is not guaranteed).
/// The synthetic aggregate row appended at the end is [`Ordem::Total`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ordem {
    /// Numbered item row (`nItem` attribute).
    Item(u32),
    /// Item row without an `nItem` attribute.
    Unnumbered,
    /// The trailing totals row.
    Total,
}

impl std::fmt::Display for Ordem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Item(n) => write!(f, "{n}"),
            Self::Unnumbered => Ok(()),
            Self::Total => write!(f, "TOTAL"),
        }
    }
}

/// CST / base / rate / amount tuple for the legacy taxes (ICMS, PIS, COFINS).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxInfo {
    /// Situation code (CST).
    pub cst: String,
    /// Tax base (vBC).
    pub base: Decimal,
    /// Rate percentage (pICMS / pPIS / pCOFINS).
    pub rate: Decimal,
    /// Tax amount (vICMS / vPIS / vCOFINS).
    pub amount: Decimal,
}

/// IBS/CBS tuple from the `IBSCBS` group (NT 2025.002-RTC).
///
/// Current document variants carry CST and cClassTrib only once, at the
/// `IBSCBS` level; the CBS copy of this struct reuses the IBS situation
/// code, classification code, and base as a stand-in. This is a documented
/// approximation, not a schema guarantee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReformTax {
    /// Situation code (CST).
    pub cst: String,
    /// Tax classification code (cClassTrib).
    pub c_class_trib: String,
    /// Tax base (gIBSCBS/vBC).
    pub base: Decimal,
    /// Tax amount (vIBS or gCBS/vCBS).
    pub amount: Decimal,
}

/// IPI base and amount (from `IPITrib`; zero under `IPINT`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpiInfo {
    /// Tax base (vBC).
    pub base: Decimal,
    /// Tax amount (vIPI).
    pub amount: Decimal,
}

/// One row of the quadro resumo por item.
///
/// Built once per extraction pass and immutable afterwards. The trailing
/// [`Ordem::Total`] row uses the same shape: code fields empty, every
/// numeric column the half-up-rounded sum of that column over the item rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    /// Row ordinal (`nItem` attribute, or the TOTAL sentinel).
    pub ordem: Ordem,
    /// Product code (prod/cProd).
    pub c_prod: String,
    /// Merchandise classification (prod/NCM).
    pub ncm: String,
    /// Operation nature code (prod/CFOP).
    pub cfop: String,
    pub icms: TaxInfo,
    pub pis: TaxInfo,
    pub cofins: TaxInfo,
    pub ibs: ReformTax,
    pub cbs: ReformTax,
    pub ipi: IpiInfo,
    /// NT-convention item total:
    /// `vProd + vFrete + vSeg + vOutro − vDesc + vIPI`, rounded half-up.
    /// Deliberately excludes ICMS/PIS/COFINS/IBS/CBS amounts.
    pub total_item: Decimal,
}

/// One row of the checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Group label: "Cabeçalho", "Partes", "Item N", "Totais".
    pub grupo: String,
    /// Field path within the document (e.g. "ide/tpAmb").
    pub campo: String,
    /// Rule description.
    pub regra: String,
    /// Whether the rule passed.
    pub passed: bool,
    /// Observed value ("Encontrado").
    pub encontrado: String,
    /// Expected value ("Esperado"), empty for presence-only rules.
    pub esperado: String,
}

impl CheckResult {
    /// Status marker as shown in the report.
    pub fn status(&self) -> &'static str {
        if self.passed { "✅" } else { "❌" }
    }
}

/// Per-run validation parameters. Never mutated by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationParams {
    /// IBS test rate, as a percentage (e.g. `0.10` for 0,10 %).
    pub ibs_rate_percent: Decimal,
    /// CBS test rate, as a percentage (e.g. `0.90` for 0,90 %).
    pub cbs_rate_percent: Decimal,
    /// Maximum acceptable absolute rounding difference per item (R$).
    pub tolerance: Decimal,
}

impl Default for ValidationParams {
    /// The published 2026 test-phase defaults: IBS 0,10 %, CBS 0,90 %,
    /// tolerance R$ 0,01.
    fn default() -> Self {
        Self {
            ibs_rate_percent: dec!(0.10),
            cbs_rate_percent: dec!(0.90),
            tolerance: dec!(0.01),
        }
    }
}

/// Scalar header fields surfaced alongside the two tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderSummary {
    /// Environment type (ide/tpAmb): "2" = homologação.
    pub tp_amb: String,
    /// Issuer tax ID (emit/CNPJ).
    pub emit_cnpj: String,
    /// Recipient tax ID (dest/CNPJ).
    pub dest_cnpj: String,
    /// Recipient state code (dest/enderDest/UF).
    pub dest_uf: String,
    /// Declared invoice total (total/ICMSTot/vNF), rounded half-up to 2 dp.
    pub v_nf: Decimal,
}
