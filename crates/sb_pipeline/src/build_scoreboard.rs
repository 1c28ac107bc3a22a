//! BUILD stage: assemble the canonical `ScoreboardDoc` and verify it.
//!
//! The document id is `SB:` + sha256 of the canonical JSON of the document
//! **without** its `id` field, so identical inputs and config always produce
//! the same id.

use serde::{Deserialize, Serialize};

use sb_algo::{ordered_rows, RowSet, Totals};
use sb_io::hasher::{is_scoreboard_id, scoreboard_id};
use sb_io::loader::LoadedRound;

use crate::aggregate::ignored_pickups;
use crate::{EngineMeta, PipelineConfig, PipelineError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreboardDoc {
    pub id: String,
    pub engine: EngineMeta,
    pub inputs: InputsDoc,
    pub strategy: String,
    pub order: String,
    pub rows: Vec<RowDoc>,
    pub totals: TotalsDoc,
    pub collected_count: u64,
    pub ignored_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputsDoc {
    pub catalog_sha256: String,
    pub collected_sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowDoc {
    pub item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub value: u64,
    pub count: u64,
    pub score: u64,
    pub bonus: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_threshold: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_amount: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsDoc {
    pub total_bonus: u64,
    pub grand_total: u64,
}

impl From<Totals> for TotalsDoc {
    fn from(t: Totals) -> Self {
        TotalsDoc { total_bonus: t.total_bonus, grand_total: t.grand_total }
    }
}

/// Assemble the document (rows in `config.order`) and stamp its id.
pub fn build_scoreboard(
    round: &LoadedRound,
    rows: &RowSet,
    totals: Totals,
    engine: &EngineMeta,
    config: PipelineConfig,
) -> Result<ScoreboardDoc, PipelineError> {
    let row_docs = ordered_rows(rows, &round.collected, config.order)
        .into_iter()
        .map(|(id, row)| RowDoc {
            item_id: id.as_str().to_string(),
            name: row.item.name.clone(),
            value: row.item.value,
            count: row.count,
            score: row.score,
            bonus: row.bonus,
            bonus_threshold: row.item.bonus.map(|b| b.count),
            bonus_amount: row.item.bonus.map(|b| b.amount),
        })
        .collect();

    let mut doc = ScoreboardDoc {
        id: String::new(),
        engine: engine.clone(),
        inputs: InputsDoc {
            catalog_sha256: round.digests.catalog_sha256.clone(),
            collected_sha256: round.digests.collected_sha256.clone(),
        },
        strategy: config.strategy.as_str().to_string(),
        order: config.order.as_str().to_string(),
        rows: row_docs,
        totals: totals.into(),
        collected_count: round.collected.len() as u64,
        ignored_count: ignored_pickups(rows, &round.collected),
    };
    doc.id = compute_doc_id(&doc)?;
    Ok(doc)
}

/// Self-check: id shape, per-row arithmetic, and the totals fold.
pub fn verify_scoreboard(doc: &ScoreboardDoc) -> Result<(), PipelineError> {
    if !is_scoreboard_id(&doc.id) {
        return Err(PipelineError::Build(format!("malformed scoreboard id {}", doc.id)));
    }
    if compute_doc_id(doc)? != doc.id {
        return Err(PipelineError::Build("scoreboard id does not match content".into()));
    }

    let mut total_bonus = 0u64;
    let mut grand_total = 0u64;
    for r in &doc.rows {
        if r.score != r.count.saturating_mul(r.value) {
            return Err(PipelineError::Build(format!("row {}: score != count * value", r.item_id)));
        }
        let expected_bonus = match (r.bonus_threshold, r.bonus_amount) {
            (Some(th), Some(amount)) if r.count >= th => amount,
            _ => 0,
        };
        if r.bonus != expected_bonus {
            return Err(PipelineError::Build(format!("row {}: bonus is not the threshold step", r.item_id)));
        }
        total_bonus = total_bonus.saturating_add(r.bonus);
        grand_total = grand_total.saturating_add(r.score.saturating_add(r.bonus));
    }
    if (TotalsDoc { total_bonus, grand_total }) != doc.totals {
        return Err(PipelineError::Build(format!(
            "totals mismatch: rows fold to ({total_bonus}, {grand_total}), doc has ({}, {})",
            doc.totals.total_bonus, doc.totals.grand_total
        )));
    }
    Ok(())
}

fn compute_doc_id(doc: &ScoreboardDoc) -> Result<String, PipelineError> {
    let mut body = serde_json::to_value(doc)
        .map_err(|e| PipelineError::Build(format!("scoreboard to JSON: {e}")))?;
    if let Some(obj) = body.as_object_mut() {
        obj.remove("id");
    }
    scoreboard_id(&body).map_err(|e| PipelineError::Build(format!("scoreboard id: {e}")))
}
