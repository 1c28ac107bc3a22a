//! Offline HTML renderer (minijinja). No external assets, no scripts.
//! The template name ends in `.html`, so minijinja auto-escapes every field.

use minijinja::{context, Environment};

use crate::{ReportError, ReportModel};

const TEMPLATE_NAME: &str = "report.html";

const TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{ model.cover.title }}</title>
<style>
body { font-family: sans-serif; margin: 2rem; }
table { border-collapse: collapse; }
th, td { padding: 0.25rem 0.75rem; border-bottom: 1px solid #ccc; }
td.num { text-align: right; }
footer { margin-top: 2rem; font-size: 0.8rem; color: #555; }
</style>
</head>
<body>
<h1>{{ model.cover.title }}</h1>
<table>
<thead><tr><th>Item</th><th>Count</th><th>Value</th><th>Score</th><th>Bonus</th></tr></thead>
<tbody>
{%- for row in model.rows %}
<tr><td>{{ row.label }}{% if row.bonus_note %} <small>({{ row.bonus_note }})</small>{% endif %}</td><td class="num">{{ row.count }}</td><td class="num">{{ row.value }}</td><td class="num">{{ row.score }}</td><td class="num">{{ row.bonus }}</td></tr>
{%- endfor %}
</tbody>
</table>
<p class="summary">{{ model.summary.line }}</p>
<p>{{ model.cover.collected_count }} collected, {{ model.cover.ignored_count }} not in catalog</p>
<footer>
<div>Scoreboard: {{ model.integrity.scoreboard_id }}</div>
<div>Engine: {{ model.integrity.engine }}</div>
<div>Catalog sha256: {{ model.integrity.catalog_sha256 }}</div>
<div>Collected sha256: {{ model.integrity.collected_sha256 }}</div>
<div>Strategy: {{ model.integrity.strategy }} / order: {{ model.integrity.order }}</div>
</footer>
</body>
</html>
"#;

pub fn render_html(model: &ReportModel) -> Result<String, ReportError> {
    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE)
        .map_err(|e| ReportError::Template(e.to_string()))?;
    let tmpl = env
        .get_template(TEMPLATE_NAME)
        .map_err(|e| ReportError::Template(e.to_string()))?;
    tmpl.render(context! { model => model })
        .map_err(|e| ReportError::Template(e.to_string()))
}
