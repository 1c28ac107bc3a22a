//! Report JSON renderer. Section order: cover, rows, summary, integrity.
//!
//! Objects are built by hand so the key order stays fixed regardless of the
//! `serde_json` map backing.

use serde_json::{json, Map, Value};

use crate::{ReportError, ReportModel, RowLine};

pub fn render_json(model: &ReportModel) -> Result<String, ReportError> {
    let value = report_value(model);
    serde_json::to_string_pretty(&value).map_err(|e| ReportError::Template(format!("json: {e}")))
}

pub fn report_value(m: &ReportModel) -> Value {
    let mut root = Map::new();
    root.insert(
        "cover".into(),
        json!({
            "title": m.cover.title,
            "collected_count": m.cover.collected_count,
            "ignored_count": m.cover.ignored_count,
        }),
    );
    root.insert("rows".into(), Value::Array(m.rows.iter().map(row_value).collect()));
    root.insert(
        "summary".into(),
        json!({
            "total_bonus": m.summary.total_bonus,
            "grand_total": m.summary.grand_total,
            "line": m.summary.line,
        }),
    );
    root.insert(
        "integrity".into(),
        json!({
            "scoreboard_id": m.integrity.scoreboard_id,
            "engine": m.integrity.engine,
            "catalog_sha256": m.integrity.catalog_sha256,
            "collected_sha256": m.integrity.collected_sha256,
            "strategy": m.integrity.strategy,
            "order": m.integrity.order,
        }),
    );
    Value::Object(root)
}

fn row_value(r: &RowLine) -> Value {
    let mut o = Map::new();
    o.insert("item_id".into(), Value::from(r.item_id.as_str()));
    o.insert("label".into(), Value::from(r.label.as_str()));
    o.insert("count".into(), Value::from(r.count));
    o.insert("value".into(), Value::from(r.value));
    o.insert("score".into(), Value::from(r.score));
    o.insert("bonus".into(), Value::from(r.bonus));
    if let Some(note) = &r.bonus_note {
        o.insert("bonus_note".into(), Value::from(note.as_str()));
    }
    Value::Object(o)
}
