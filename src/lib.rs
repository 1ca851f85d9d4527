//! # conferencia
//!
//! Conformance checking for Brazilian NF-e XML during the Reforma
//! Tributária do Consumo transition (EC 132/2023, LC 214/2025,
//! NT 2025.002-RTC): per-item summary table and mandatory-field checklist
//! for the new IBS/CBS consumption taxes.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! Rounding is commercial half-up to 2 decimal places, matching the NT
//! conventions.
//!
//! ## Quick Start
//!
//! ```rust
//! use conferencia::core::*;
//! use conferencia::{checklist, resumo, xml};
//!
//! let src = r#"<?xml version="1.0"?>
//! <NFe xmlns="http://www.portalfiscal.inf.br/nfe"><infNFe>
//!   <ide><tpAmb>2</tpAmb></ide>
//!   <det nItem="1">
//!     <prod><cProd>A1</cProd><vProd>100.00</vProd></prod>
//!     <imposto><IBSCBS><CST>000</CST><cClassTrib>000001</cClassTrib>
//!       <gIBSCBS><vBC>100.00</vBC><vIBS>0.10</vIBS>
//!         <gCBS><vCBS>0.90</vCBS></gCBS>
//!       </gIBSCBS></IBSCBS></imposto>
//!   </det>
//! </infNFe></NFe>"#;
//!
//! let doc = xml::parse(src).unwrap();
//! let quadro = resumo::extract_items(&doc);
//! let checks = checklist::validate(&doc, &ValidationParams::default());
//!
//! assert_eq!(quadro.len(), 2); // one item + the TOTAL row
//! assert_eq!(quadro.last().unwrap().ordem, Ordem::Total);
//! assert!(checks.iter().find(|c| c.campo == "ide/tpAmb").unwrap().passed);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Data model, XML reader, quadro resumo, checklist |
//! | `export` | CSV-in-ZIP export of the result tables |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod xml;

#[cfg(feature = "core")]
pub mod resumo;

#[cfg(feature = "core")]
pub mod checklist;

#[cfg(feature = "export")]
pub mod export;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
