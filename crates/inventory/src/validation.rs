//! Validation boundary between collaborators (UI forms, the scanner) and the store.
//!
//! Collaborators hand over loosely-typed inputs; this module turns them into the
//! typed values the store accepts ([`NewItem`], [`ItemPatch`], [`NewBill`]) or
//! rejects them with [`DomainError::Validation`]. The store itself performs no
//! checks.

use serde::{Deserialize, Serialize};

use smartstock_core::{Category, DomainError, DomainResult, UploadLimits};

use crate::bill::{BillLine, NewBill};
use crate::item::{ItemPatch, NewItem};

/// Untyped item form input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    pub category: String,
    pub quantity: i64,
    pub price: f64,
    #[serde(default)]
    pub reorder_level: Option<i64>,
}

/// Untyped partial item update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatchInput {
    #[serde(default)]
    pub name: Option<String>,
    /// Empty string clears the sku.
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub reorder_level: Option<i64>,
}

/// Untyped line from a scan result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLineInput {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub price: f64,
}

/// Untyped scan result: `{filename, filesize, items}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillInput {
    pub filename: String,
    pub filesize: i64,
    pub items: Vec<BillLineInput>,
}

/// Metadata of one file submitted for scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

/// Why a single file of an upload batch was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "reason")]
pub enum UploadRejection {
    UnsupportedType { mime_type: String },
    TooLarge { size: u64, max: u64 },
}

/// Outcome of checking an upload batch: files to scan and files skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadBatch {
    pub accepted: Vec<UploadFile>,
    pub rejected: Vec<(String, UploadRejection)>,
}

fn required_text(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn non_negative_count(field: &str, value: i64) -> DomainResult<u32> {
    u32::try_from(value).map_err(|_| {
        DomainError::validation(format!(
            "{field} must be between 0 and {} (got {value})",
            u32::MAX
        ))
    })
}

fn price(value: f64) -> DomainResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::validation(format!(
            "price must be a finite non-negative number (got {value})"
        )));
    }
    Ok(value)
}

fn category(value: &str) -> DomainResult<Category> {
    value.parse()
}

/// Validate a new-item form.
pub fn validate_item(input: &ItemInput) -> DomainResult<NewItem> {
    Ok(NewItem {
        name: required_text("name", &input.name)?,
        sku: optional_text(input.sku.as_deref()),
        category: category(&input.category)?,
        quantity: non_negative_count("quantity", input.quantity)?,
        price: price(input.price)?,
        reorder_level: input
            .reorder_level
            .map(|level| non_negative_count("reorderLevel", level))
            .transpose()?,
    })
}

/// Validate a partial item update. Fields absent from the input stay absent.
pub fn validate_patch(input: &ItemPatchInput) -> DomainResult<ItemPatch> {
    Ok(ItemPatch {
        name: input
            .name
            .as_deref()
            .map(|n| required_text("name", n))
            .transpose()?,
        sku: input.sku.as_deref().map(|s| optional_text(Some(s))),
        category: input.category.as_deref().map(category).transpose()?,
        quantity: input
            .quantity
            .map(|q| non_negative_count("quantity", q))
            .transpose()?,
        price: input.price.map(price).transpose()?,
        reorder_level: input
            .reorder_level
            .map(|l| non_negative_count("reorderLevel", l))
            .transpose()?,
    })
}

/// Validate a scan result before it is recorded as a bill.
pub fn validate_bill(input: &BillInput) -> DomainResult<NewBill> {
    let filename = required_text("filename", &input.filename)?;
    let filesize = u64::try_from(input.filesize).map_err(|_| {
        DomainError::validation(format!("filesize cannot be negative (got {})", input.filesize))
    })?;

    let items = input
        .items
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            validate_bill_line(line)
                .map_err(|e| DomainError::validation(format!("line {}: {e}", idx + 1)))
        })
        .collect::<DomainResult<Vec<_>>>()?;

    Ok(NewBill {
        filename,
        filesize,
        items,
    })
}

fn validate_bill_line(line: &BillLineInput) -> DomainResult<BillLine> {
    Ok(BillLine {
        name: required_text("name", &line.name)?,
        category: category(&line.category)?,
        quantity: non_negative_count("quantity", line.quantity)?,
        price: price(line.price)?,
    })
}

/// Check an upload batch against `limits`.
///
/// An empty batch or one with more than `max_files` files is rejected as a
/// whole. Otherwise each file of an unsupported type or over the size limit is
/// skipped and reported; the rest are accepted in submission order.
pub fn validate_upload(files: &[UploadFile], limits: &UploadLimits) -> DomainResult<UploadBatch> {
    if files.is_empty() {
        return Err(DomainError::validation("no files submitted"));
    }
    if files.len() > limits.max_files {
        return Err(DomainError::validation(format!(
            "maximum {} files allowed at once (got {})",
            limits.max_files,
            files.len()
        )));
    }

    let mut batch = UploadBatch::default();
    for file in files {
        if !limits.accepts_type(&file.mime_type) {
            batch.rejected.push((
                file.name.clone(),
                UploadRejection::UnsupportedType {
                    mime_type: file.mime_type.clone(),
                },
            ));
        } else if file.size > limits.max_file_size {
            batch.rejected.push((
                file.name.clone(),
                UploadRejection::TooLarge {
                    size: file.size,
                    max: limits.max_file_size,
                },
            ));
        } else {
            batch.accepted.push(file.clone());
        }
    }
    Ok(batch)
}
