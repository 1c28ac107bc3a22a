//! sb_report: presentation model over a canonical `scoreboard.json`.
//!
//! Renderers read the artifact only; nothing here recomputes scores. The one
//! cross-check (`Inconsistent`) compares the echoed totals with the echoed rows
//! so a hand-edited artifact is refused rather than pretty-printed.

#![forbid(unsafe_code)]

use std::fmt;

use serde_json::Value;

#[cfg(feature = "serde")]
use serde::Serialize;

pub mod render_text;
#[cfg(feature = "render_json")]
pub mod render_json;
#[cfg(feature = "render_html")]
pub mod render_html;

pub use render_text::render_text;
#[cfg(feature = "render_json")]
pub use render_json::render_json;
#[cfg(feature = "render_html")]
pub use render_html::render_html;

// ----- Errors -----

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    Template(String),
    MissingField(String),
    Inconsistent(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Template(m) => write!(f, "template: {m}"),
            ReportError::MissingField(p) => write!(f, "missing field {p}"),
            ReportError::Inconsistent(m) => write!(f, "inconsistent artifact: {m}"),
        }
    }
}

impl std::error::Error for ReportError {}

// ----- Model -----

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ReportModel {
    pub cover: Cover,
    pub rows: Vec<RowLine>,
    pub summary: Summary,
    pub integrity: Integrity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Cover {
    pub title: String,
    pub collected_count: u64,
    pub ignored_count: u64,
}

/// One table line. `label` is the display name, or the item id when no name is set.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RowLine {
    pub item_id: String,
    pub label: String,
    pub count: u64,
    pub value: u64,
    pub score: u64,
    pub bonus: u64,
    pub bonus_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Summary {
    pub total_bonus: u64,
    pub grand_total: u64,
    pub line: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Integrity {
    pub scoreboard_id: String,
    pub engine: String,
    pub catalog_sha256: String,
    pub collected_sha256: String,
    pub strategy: String,
    pub order: String,
}

pub const REPORT_TITLE: &str = "Round Summary";

pub fn summary_line(total_bonus: u64, grand_total: u64) -> String {
    format!("Bonuses: {total_bonus}  Total: {grand_total}")
}

// ----- JSON pointer helpers -----

pub fn j_str(v: &Value, ptr: &str) -> Option<String> {
    v.pointer(ptr).and_then(Value::as_str).map(str::to_string)
}

pub fn j_u64(v: &Value, ptr: &str) -> Option<u64> {
    v.pointer(ptr).and_then(Value::as_u64)
}

fn req_str(v: &Value, ptr: &str) -> Result<String, ReportError> {
    j_str(v, ptr).ok_or_else(|| ReportError::MissingField(ptr.to_string()))
}

fn req_u64(v: &Value, ptr: &str) -> Result<u64, ReportError> {
    j_u64(v, ptr).ok_or_else(|| ReportError::MissingField(ptr.to_string()))
}

// ----- Mappers -----

fn map_row(row: &Value, base: &str) -> Result<RowLine, ReportError> {
    let field = |name: &str| format!("{base}/{name}");
    let item_id = req_str(row, "/item_id").map_err(|_| ReportError::MissingField(field("item_id")))?;
    let num = |name: &str| req_u64(row, &format!("/{name}")).map_err(|_| ReportError::MissingField(field(name)));

    let bonus_note = match (j_u64(row, "/bonus_threshold"), j_u64(row, "/bonus_amount")) {
        (Some(th), Some(amount)) => Some(format!("+{amount} at {th}")),
        _ => None,
    };

    Ok(RowLine {
        label: j_str(row, "/name").unwrap_or_else(|| item_id.clone()),
        item_id,
        count: num("count")?,
        value: num("value")?,
        score: num("score")?,
        bonus: num("bonus")?,
        bonus_note,
    })
}

fn map_integrity(doc: &Value) -> Result<Integrity, ReportError> {
    let engine = format!(
        "{}/{} {} ({})",
        req_str(doc, "/engine/vendor")?,
        req_str(doc, "/engine/name")?,
        req_str(doc, "/engine/version")?,
        req_str(doc, "/engine/build")?,
    );
    Ok(Integrity {
        scoreboard_id: req_str(doc, "/id")?,
        engine,
        catalog_sha256: req_str(doc, "/inputs/catalog_sha256")?,
        collected_sha256: req_str(doc, "/inputs/collected_sha256")?,
        strategy: req_str(doc, "/strategy")?,
        order: req_str(doc, "/order")?,
    })
}

/// Build the model from a parsed `scoreboard.json`. Rows keep the artifact's order.
pub fn build_model(doc: &Value) -> Result<ReportModel, ReportError> {
    let rows_json = doc
        .pointer("/rows")
        .and_then(Value::as_array)
        .ok_or_else(|| ReportError::MissingField("/rows".into()))?;
    let rows = rows_json
        .iter()
        .enumerate()
        .map(|(i, r)| map_row(r, &format!("/rows/{i}")))
        .collect::<Result<Vec<_>, _>>()?;

    let total_bonus = req_u64(doc, "/totals/total_bonus")?;
    let grand_total = req_u64(doc, "/totals/grand_total")?;

    let (fold_bonus, fold_total) = rows.iter().fold((0u64, 0u64), |(b, t), r| {
        (b.saturating_add(r.bonus), t.saturating_add(r.score.saturating_add(r.bonus)))
    });
    if (fold_bonus, fold_total) != (total_bonus, grand_total) {
        return Err(ReportError::Inconsistent(format!(
            "rows fold to ({fold_bonus}, {fold_total}) but totals are ({total_bonus}, {grand_total})"
        )));
    }

    Ok(ReportModel {
        cover: Cover {
            title: REPORT_TITLE.to_string(),
            collected_count: req_u64(doc, "/collected_count")?,
            ignored_count: req_u64(doc, "/ignored_count")?,
        },
        rows,
        summary: Summary { total_bonus, grand_total, line: summary_line(total_bonus, grand_total) },
        integrity: map_integrity(doc)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn sample_doc() -> Value {
        json!({
            "id": format!("SB:{}", "c".repeat(64)),
            "engine": { "vendor": "v", "name": "n", "version": "1.0", "build": "test" },
            "inputs": { "catalog_sha256": "a".repeat(64), "collected_sha256": "b".repeat(64) },
            "strategy": "single_pass",
            "order": "first_collected",
            "rows": [
                { "item_id": "sword", "name": "Sword", "value": 10, "count": 1, "score": 10, "bonus": 0 },
                { "item_id": "shield", "value": 5, "count": 3, "score": 15, "bonus": 20,
                  "bonus_threshold": 3, "bonus_amount": 20 }
            ],
            "totals": { "total_bonus": 20, "grand_total": 45 },
            "collected_count": 5,
            "ignored_count": 1
        })
    }

    #[test]
    fn maps_rows_and_summary() {
        let m = build_model(&sample_doc()).unwrap();
        assert_eq!(m.rows.len(), 2);
        assert_eq!(m.rows[0].label, "Sword");
        assert_eq!(m.rows[1].label, "shield");
        assert_eq!(m.rows[1].bonus_note.as_deref(), Some("+20 at 3"));
        assert_eq!(m.rows[0].bonus_note, None);
        assert_eq!(m.summary.line, "Bonuses: 20  Total: 45");
        assert_eq!(m.cover.ignored_count, 1);
        assert_eq!(m.integrity.engine, "v/n 1.0 (test)");
    }

    #[test]
    fn missing_field_names_the_pointer() {
        let mut doc = sample_doc();
        doc["rows"][1].as_object_mut().unwrap().remove("score");
        assert_eq!(build_model(&doc), Err(ReportError::MissingField("/rows/1/score".into())));

        let mut doc = sample_doc();
        doc.as_object_mut().unwrap().remove("totals");
        assert_eq!(build_model(&doc), Err(ReportError::MissingField("/totals/total_bonus".into())));
    }

    #[test]
    fn edited_totals_are_refused() {
        let mut doc = sample_doc();
        doc["totals"]["grand_total"] = json!(46);
        assert!(matches!(build_model(&doc), Err(ReportError::Inconsistent(_))));
    }
}
