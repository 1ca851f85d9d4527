//! Export adapter: result tables as CSV files packaged in a ZIP archive.
//!
//! This is the dependency-light download path of the original report tool
//! (one `<name>.csv` per table, deflate-compressed). Table names are
//! truncated to [`SHEET_NAME_MAX`] characters, the limit a spreadsheet
//! sheet name would impose.
//!
//! # Example
//!
//! ```ignore
//! use conferencia::export::*;
//!
//! let tables = [
//!     Table::from_quadro(&quadro).with_name("QuadroResumo"),
//!     Table::from_checklist(&checks).with_name("Checklist"),
//! ];
//! let bytes = to_csv_zip(&tables)?;
//! std::fs::write(EXPORT_FILE_NAME, bytes)?;
//! ```

use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::core::money::format_amount;
use crate::core::{CheckResult, ConferenciaError, ItemSummary};

/// Maximum sheet/file name length (spreadsheet sheet-name limit).
pub const SHEET_NAME_MAX: usize = 31;

/// MIME type of the produced archive.
pub const ZIP_MIME: &str = "application/zip";

/// Suggested download file name.
pub const EXPORT_FILE_NAME: &str = "conferencia_xml_reforma_tributaria.zip";

/// A named table of string cells — the presentation-boundary form of the
/// result sequences. Decimals are rendered here and nowhere earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Rename the table (the export file/sheet name).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Render the quadro resumo (item rows plus TOTAL row) as a table.
    pub fn from_quadro(rows: &[ItemSummary]) -> Self {
        let header = [
            "Ordem",
            "Código do produto",
            "NCM",
            "CFOP",
            "CST ICMS",
            "BC ICMS",
            "ALÍQUOTA ICMS",
            "VALOR ICMS",
            "CST PIS",
            "BASE PIS",
            "ALÍQUOTA PIS",
            "VALOR PIS",
            "CST COFINS",
            "BASE COFINS",
            "ALÍQUOTA COFINS",
            "VALOR COFINS",
            "CST IBS",
            "CLASSETRIB (IBS)",
            "BASE IBS",
            "VALOR IBS",
            "CST CBS",
            "CLASSETRIB (CBS)",
            "BASE CBS",
            "VALOR CBS",
            "BASE IPI",
            "VALOR IPI",
            "TOTAL ITEM (NT)",
        ];
        let rows = rows
            .iter()
            .map(|r| {
                vec![
                    r.ordem.to_string(),
                    r.c_prod.clone(),
                    r.ncm.clone(),
                    r.cfop.clone(),
                    r.icms.cst.clone(),
                    format_amount(r.icms.base),
                    format_amount(r.icms.rate),
                    format_amount(r.icms.amount),
                    r.pis.cst.clone(),
                    format_amount(r.pis.base),
                    format_amount(r.pis.rate),
                    format_amount(r.pis.amount),
                    r.cofins.cst.clone(),
                    format_amount(r.cofins.base),
                    format_amount(r.cofins.rate),
                    format_amount(r.cofins.amount),
                    r.ibs.cst.clone(),
                    r.ibs.c_class_trib.clone(),
                    format_amount(r.ibs.base),
                    format_amount(r.ibs.amount),
                    r.cbs.cst.clone(),
                    r.cbs.c_class_trib.clone(),
                    format_amount(r.cbs.base),
                    format_amount(r.cbs.amount),
                    format_amount(r.ipi.base),
                    format_amount(r.ipi.amount),
                    format_amount(r.total_item),
                ]
            })
            .collect();
        Self {
            name: "QuadroResumo".to_string(),
            header: header.iter().map(|s| s.to_string()).collect(),
            rows,
        }
    }

    /// Render the checklist as a table.
    pub fn from_checklist(checks: &[CheckResult]) -> Self {
        let header = ["Grupo", "Campo", "Regra", "Status", "Encontrado", "Esperado"];
        let rows = checks
            .iter()
            .map(|c| {
                vec![
                    c.grupo.clone(),
                    c.campo.clone(),
                    c.regra.clone(),
                    c.status().to_string(),
                    c.encontrado.clone(),
                    c.esperado.clone(),
                ]
            })
            .collect();
        Self {
            name: "Checklist".to_string(),
            header: header.iter().map(|s| s.to_string()).collect(),
            rows,
        }
    }

    fn to_csv(&self) -> Result<Vec<u8>, ConferenciaError> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(&self.header).map_err(csv_err)?;
        for row in &self.rows {
            wtr.write_record(row).map_err(csv_err)?;
        }
        wtr.into_inner()
            .map_err(|e| ConferenciaError::Export(format!("CSV flush error: {e}")))
    }
}

/// Serialize every table as `<name>.csv` inside a deflate ZIP archive.
pub fn to_csv_zip(tables: &[Table]) -> Result<Vec<u8>, ConferenciaError> {
    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for table in tables {
        let name: String = table.name.chars().take(SHEET_NAME_MAX).collect();
        archive
            .start_file(format!("{name}.csv"), options)
            .map_err(zip_err)?;
        archive
            .write_all(&table.to_csv()?)
            .map_err(|e| ConferenciaError::Export(format!("ZIP write error: {e}")))?;
    }

    let cursor = archive.finish().map_err(zip_err)?;
    Ok(cursor.into_inner())
}

fn csv_err(e: csv::Error) -> ConferenciaError {
    ConferenciaError::Export(format!("CSV write error: {e}"))
}

fn zip_err(e: zip::result::ZipError) -> ConferenciaError {
    ConferenciaError::Export(format!("ZIP error: {e}"))
}
