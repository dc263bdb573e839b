//! Data-insight suggestions derived from the uploaded datasets themselves.
//!
//! Unlike findings, suggestions never block readiness. Each analysis looks at
//! one pattern (capacity spread, priority mix, duration outliers, ...) and
//! yields at most one suggestion.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::dataset::{
    Dataset, DatasetKind, COL_DURATION, COL_MAX_LOAD, COL_PRIORITY, COL_SKILLS,
};
use crate::types::Record;
use crate::value::CellValue;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const COL_BUDGET: &str = "Budget";
pub const COL_INDUSTRY: &str = "Industry";

/// MaxLoad standard deviation above this share of the mean is an imbalance.
pub const LOAD_SPREAD_RATIO: f64 = 0.2;

/// Share of `high` priority tasks above which priorities are inflated.
pub const HIGH_PRIORITY_SHARE: f64 = 0.5;

/// Durations above this multiple of the mean count as long.
pub const LONG_DURATION_FACTOR: f64 = 1.5;

/// Budgets above this multiple of the mean count as high-value.
pub const HIGH_BUDGET_FACTOR: f64 = 1.2;

/// Share of clients in one industry above which it is a concentration.
pub const INDUSTRY_SHARE: f64 = 0.4;

/// Filled-cell share below which completeness is reported.
pub const COMPLETENESS_THRESHOLD: f64 = 0.95;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    #[serde(rename = "loadBalance")]
    LoadBalance,
    Priority,
    Efficiency,
    BusinessInsight,
    MarketInsight,
    SkillMatching,
    DataQuality,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionCategory {
    Optimization,
    Quality,
    Efficiency,
    Business,
    Success,
}

/// One data insight, numbered `suggest_001`, `suggest_002`, ... in
/// analysis order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub id: String,
    #[serde(rename = "type")]
    pub suggestion_type: SuggestionType,
    pub title: &'static str,
    pub description: String,
    pub confidence: f64,
    pub suggested_rule: &'static str,
    pub impact: &'static str,
    pub data_source: &'static str,
    pub category: SuggestionCategory,
}

/// Fixed parts of a suggestion; the description is computed per run.
struct Template {
    suggestion_type: SuggestionType,
    title: &'static str,
    confidence: f64,
    suggested_rule: &'static str,
    impact: &'static str,
    data_source: &'static str,
    category: SuggestionCategory,
}

impl Template {
    fn describe(&'static self, description: String) -> Insight {
        Insight {
            template: self,
            description,
        }
    }
}

/// A suggestion before it is numbered.
struct Insight {
    template: &'static Template,
    description: String,
}

impl Insight {
    fn into_suggestion(self, position: usize) -> Suggestion {
        let t = self.template;
        Suggestion {
            id: format!("suggest_{:03}", position + 1),
            suggestion_type: t.suggestion_type,
            title: t.title,
            description: self.description,
            confidence: t.confidence,
            suggested_rule: t.suggested_rule,
            impact: t.impact,
            data_source: t.data_source,
            category: t.category,
        }
    }
}

static LOAD_IMBALANCE: Template = Template {
    suggestion_type: SuggestionType::LoadBalance,
    title: "Load Imbalance Detected",
    confidence: 0.85,
    suggested_rule: "Balance workload distribution across all workers",
    impact: "Could improve resource utilization",
    data_source: "worker_capacity_analysis",
    category: SuggestionCategory::Optimization,
};

static PRIORITY_INFLATION: Template = Template {
    suggestion_type: SuggestionType::Priority,
    title: "Priority Inflation Detected",
    confidence: 0.90,
    suggested_rule: "Review and rebalance task priorities",
    impact: "Improves priority system effectiveness",
    data_source: "priority_analysis",
    category: SuggestionCategory::Quality,
};

static LONG_TASKS: Template = Template {
    suggestion_type: SuggestionType::Efficiency,
    title: "Long Duration Tasks Found",
    confidence: 0.75,
    suggested_rule: "Consider breaking down long tasks",
    impact: "Improves scheduling flexibility",
    data_source: "duration_analysis",
    category: SuggestionCategory::Efficiency,
};

static HIGH_VALUE_CLIENTS: Template = Template {
    suggestion_type: SuggestionType::BusinessInsight,
    title: "High-Value Clients Identified",
    confidence: 0.85,
    suggested_rule: "Prioritize high-budget clients for premium service",
    impact: "Maximizes revenue potential",
    data_source: "budget_analysis",
    category: SuggestionCategory::Business,
};

static INDUSTRY_CONCENTRATION: Template = Template {
    suggestion_type: SuggestionType::MarketInsight,
    title: "Industry Concentration Detected",
    confidence: 0.80,
    suggested_rule: "Consider industry-specific workflows",
    impact: "Improves service specialization",
    data_source: "industry_analysis",
    category: SuggestionCategory::Business,
};

static SKILL_INVENTORY: Template = Template {
    suggestion_type: SuggestionType::SkillMatching,
    title: "Skill Inventory Available",
    confidence: 0.80,
    suggested_rule: "Implement skill-based task assignment",
    impact: "Improves task-worker matching",
    data_source: "skill_analysis",
    category: SuggestionCategory::Quality,
};

static INCOMPLETE_DATA: Template = Template {
    suggestion_type: SuggestionType::DataQuality,
    title: "Data Completeness Issue",
    confidence: 0.95,
    suggested_rule: "Fill missing data values",
    impact: "Improves data reliability",
    data_source: "completeness_analysis",
    category: SuggestionCategory::Quality,
};

static DATA_UPLOADED: Template = Template {
    suggestion_type: SuggestionType::General,
    title: "Data Successfully Uploaded",
    confidence: 1.0,
    suggested_rule: "Review data quality and add validation rules as needed",
    impact: "Ensures data integrity",
    data_source: "data_upload",
    category: SuggestionCategory::Success,
};

// ---------------------------------------------------------------------------
// Analyses
// ---------------------------------------------------------------------------

/// The three datasets as seen by the analyses.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionInput<'a> {
    pub clients: Dataset<'a>,
    pub workers: Dataset<'a>,
    pub tasks: Dataset<'a>,
}

impl<'a> SuggestionInput<'a> {
    pub fn new(clients: &'a [Record], workers: &'a [Record], tasks: &'a [Record]) -> Self {
        Self {
            clients: Dataset::new(DatasetKind::Clients, clients),
            workers: Dataset::new(DatasetKind::Workers, workers),
            tasks: Dataset::new(DatasetKind::Tasks, tasks),
        }
    }

    fn datasets(&self) -> [Dataset<'a>; 3] {
        [self.clients, self.workers, self.tasks]
    }

    fn total_rows(&self) -> usize {
        self.datasets().iter().map(|ds| ds.records.len()).sum()
    }
}

type AnalysisFn = fn(&SuggestionInput<'_>) -> Option<Insight>;

/// Analyses in output order.
const ANALYSES: &[AnalysisFn] = &[
    analyze_load_balance,
    analyze_priority_mix,
    analyze_durations,
    analyze_budgets,
    analyze_industries,
    analyze_skills,
    analyze_completeness,
];

/// Run every analysis over the datasets.
///
/// No rows at all yields no suggestions. Otherwise at least one suggestion
/// is returned; when nothing stands out it is a plain upload summary.
pub fn generate_suggestions(
    clients: &[Record],
    workers: &[Record],
    tasks: &[Record],
) -> Vec<Suggestion> {
    let input = SuggestionInput::new(clients, workers, tasks);
    if input.total_rows() == 0 {
        return Vec::new();
    }

    let mut insights: Vec<Insight> = ANALYSES.iter().filter_map(|analyze| analyze(&input)).collect();
    if insights.is_empty() {
        insights.push(DATA_UPLOADED.describe(format!(
            "Successfully processed {} clients, {} workers, {} tasks",
            clients.len(),
            workers.len(),
            tasks.len()
        )));
    }

    tracing::debug!(suggestions = insights.len(), "Data insights generated");

    insights
        .into_iter()
        .enumerate()
        .map(|(position, insight)| insight.into_suggestion(position))
        .collect()
}

fn analyze_load_balance(input: &SuggestionInput<'_>) -> Option<Insight> {
    let loads = numbers(input.workers, COL_MAX_LOAD);
    if loads.len() < 2 {
        return None;
    }
    let spread = sample_std(&loads);
    (spread > mean(&loads) * LOAD_SPREAD_RATIO).then(|| {
        LOAD_IMBALANCE.describe(format!(
            "Worker capacity varies significantly (std: {spread:.1})"
        ))
    })
}

fn analyze_priority_mix(input: &SuggestionInput<'_>) -> Option<Insight> {
    let tasks = input.tasks;
    if tasks.is_empty() || !tasks.columns().contains(COL_PRIORITY) {
        return None;
    }
    let high = tasks
        .column_cells(COL_PRIORITY)
        .filter(|(_, v)| matches!(v.as_str(), Some("High" | "high")))
        .count();
    let share = high as f64 / tasks.records.len() as f64;
    (share > HIGH_PRIORITY_SHARE).then(|| {
        PRIORITY_INFLATION.describe(format!(
            "{:.0}% of tasks marked as high priority",
            share * 100.0
        ))
    })
}

fn analyze_durations(input: &SuggestionInput<'_>) -> Option<Insight> {
    let durations = numbers(input.tasks, COL_DURATION);
    if durations.is_empty() {
        return None;
    }
    let average = mean(&durations);
    let long = durations
        .iter()
        .filter(|&&d| d > average * LONG_DURATION_FACTOR)
        .count();
    (long > 0).then(|| {
        LONG_TASKS.describe(format!(
            "{long} tasks exceed 1.5x average duration ({average:.1})"
        ))
    })
}

fn analyze_budgets(input: &SuggestionInput<'_>) -> Option<Insight> {
    let budgets = numbers(input.clients, COL_BUDGET);
    if budgets.is_empty() {
        return None;
    }
    let average = mean(&budgets);
    let high = budgets
        .iter()
        .filter(|&&b| b > average * HIGH_BUDGET_FACTOR)
        .count();
    (high > 0).then(|| {
        HIGH_VALUE_CLIENTS.describe(format!(
            "{high} clients have budgets 20%+ above average"
        ))
    })
}

fn analyze_industries(input: &SuggestionInput<'_>) -> Option<Insight> {
    let clients = input.clients;
    // Counts in order of first appearance so ties resolve to the earlier industry.
    let mut counts: Vec<(String, usize)> = Vec::new();
    for (_, value) in clients.column_cells(COL_INDUSTRY).filter(|(_, v)| !v.is_null()) {
        let industry = value.to_string();
        match counts.iter_mut().find(|(name, _)| *name == industry) {
            Some((_, n)) => *n += 1,
            None => counts.push((industry, 1)),
        }
    }
    if counts.len() < 2 {
        return None;
    }

    let (top, top_count) = counts
        .iter()
        .fold(&counts[0], |best, entry| if entry.1 > best.1 { entry } else { best });
    let share = *top_count as f64 / clients.records.len() as f64;
    (share > INDUSTRY_SHARE).then(|| {
        INDUSTRY_CONCENTRATION.describe(format!(
            "{:.0}% of clients are in {top}",
            share * 100.0
        ))
    })
}

fn analyze_skills(input: &SuggestionInput<'_>) -> Option<Insight> {
    let workers = input.workers;
    if workers.is_empty() || input.tasks.is_empty() {
        return None;
    }

    let mut mentioned = false;
    let mut unique = BTreeSet::new();
    for (_, value) in workers.column_cells(COL_SKILLS).filter(|(_, v)| !v.is_null()) {
        for skill in skill_names(value) {
            mentioned = true;
            if !skill.is_empty() {
                unique.insert(skill.to_lowercase());
            }
        }
    }
    mentioned.then(|| {
        SKILL_INVENTORY.describe(format!(
            "Found {} unique skills across {} workers",
            unique.len(),
            workers.records.len()
        ))
    })
}

fn analyze_completeness(input: &SuggestionInput<'_>) -> Option<Insight> {
    let mut total = 0usize;
    let mut empty = 0usize;
    for ds in input.datasets().into_iter().filter(|ds| !ds.is_empty()) {
        for column in ds.columns() {
            for (_, value) in ds.column_cells(column) {
                total += 1;
                if value.is_null() {
                    empty += 1;
                }
            }
        }
    }
    if total == 0 {
        return None;
    }

    let completeness = (total - empty) as f64 / total as f64;
    (completeness < COMPLETENESS_THRESHOLD).then(|| {
        INCOMPLETE_DATA.describe(format!(
            "Data is {:.1}% complete ({empty} empty cells)",
            completeness * 100.0
        ))
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Values of `column` that coerce to a number; the rest are ignored.
fn numbers<'a>(ds: Dataset<'a>, column: &'a str) -> Vec<f64> {
    ds.column_cells(column)
        .filter_map(|(_, v)| v.to_number().ok())
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
fn sample_std(values: &[f64]) -> f64 {
    let m = mean(values);
    let squares: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (squares / (values.len() - 1) as f64).sqrt()
}

/// Skill names in a cell: list items when it holds a list, otherwise the
/// comma-separated parts of its text.
fn skill_names(value: &CellValue) -> Vec<String> {
    match value.to_list() {
        Ok(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(|item| item.to_string().trim().to_string())
            .collect(),
        Err(_) => match value.as_str() {
            Some(text) => text.split(',').map(|s| s.trim().to_string()).collect(),
            None => Vec::new(),
        },
    }
}

// ---------------------------------------------------------------------------
// Column hints
// ---------------------------------------------------------------------------

pub const HINT_ID_COLUMNS: &str = "💡 ID columns detected - ensure uniqueness";
pub const HINT_DURATION: &str = "⏱️ Duration data found - validate numeric format";
pub const HINT_PRIORITY: &str = "🎯 Priority field detected - standardize values (high/medium/low)";

/// Hints for a set of column headers, matched case-insensitively by substring.
pub fn column_hints<'a>(headers: impl IntoIterator<Item = &'a str>) -> Vec<&'static str> {
    let headers: Vec<String> = headers.into_iter().map(str::to_lowercase).collect();
    let any = |needle: &str| headers.iter().any(|h| h.contains(needle));

    [("id", HINT_ID_COLUMNS), ("duration", HINT_DURATION), ("priority", HINT_PRIORITY)]
        .into_iter()
        .filter(|&(needle, _)| any(needle))
        .map(|(_, hint)| hint)
        .collect()
}

/// Column hints for every supplied dataset that triggers at least one.
pub fn dataset_hints(
    clients: &[Record],
    workers: &[Record],
    tasks: &[Record],
) -> BTreeMap<DatasetKind, Vec<&'static str>> {
    SuggestionInput::new(clients, workers, tasks)
        .datasets()
        .into_iter()
        .filter_map(|ds| {
            let hints = column_hints(ds.columns());
            (!hints.is_empty()).then_some((ds.kind, hints))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn rows(v: Value) -> Vec<Record> {
        serde_json::from_value(v).unwrap()
    }

    fn types(suggestions: &[Suggestion]) -> Vec<SuggestionType> {
        suggestions.iter().map(|s| s.suggestion_type).collect()
    }

    #[test]
    fn no_rows_means_no_suggestions() {
        assert!(generate_suggestions(&[], &[], &[]).is_empty());
    }

    #[test]
    fn quiet_data_gets_an_upload_summary() {
        let clients = rows(json!([{"ClientID": "C1", "Name": "Acme"}]));
        let suggestions = generate_suggestions(&clients, &[], &[]);
        assert_eq!(types(&suggestions), vec![SuggestionType::General]);
        assert_eq!(suggestions[0].id, "suggest_001");
        assert_eq!(
            suggestions[0].description,
            "Successfully processed 1 clients, 0 workers, 0 tasks"
        );
    }

    #[test]
    fn uneven_capacity_is_an_imbalance() {
        let workers = rows(json!([
            {"WorkerID": "W1", "MaxLoad": 1},
            {"WorkerID": "W2", "MaxLoad": "9"}
        ]));
        let suggestions = generate_suggestions(&[], &workers, &[]);
        assert_eq!(suggestions[0].suggestion_type, SuggestionType::LoadBalance);
        assert_eq!(
            suggestions[0].description,
            "Worker capacity varies significantly (std: 5.7)"
        );

        let even = rows(json!([{"MaxLoad": 5}, {"MaxLoad": 5}]));
        assert_eq!(types(&generate_suggestions(&[], &even, &[])), vec![SuggestionType::General]);
    }

    #[test]
    fn mostly_high_priorities_are_inflated() {
        let tasks = rows(json!([
            {"TaskID": "T1", "Priority": "High", "Duration": 2},
            {"TaskID": "T2", "Priority": "high", "Duration": 2},
            {"TaskID": "T3", "Priority": "low", "Duration": 2}
        ]));
        let suggestions = generate_suggestions(&[], &[], &tasks);
        assert_eq!(types(&suggestions), vec![SuggestionType::Priority]);
        assert_eq!(suggestions[0].description, "67% of tasks marked as high priority");
    }

    #[test]
    fn long_tasks_are_counted_against_the_average() {
        let tasks = rows(json!([
            {"TaskID": "T1", "Duration": 1},
            {"TaskID": "T2", "Duration": 1},
            {"TaskID": "T3", "Duration": "10"},
            {"TaskID": "T4", "Duration": "n/a"}
        ]));
        let suggestions = generate_suggestions(&[], &[], &tasks);
        assert_eq!(types(&suggestions), vec![SuggestionType::Efficiency]);
        assert_eq!(suggestions[0].description, "1 tasks exceed 1.5x average duration (4.0)");
    }

    #[test]
    fn client_budgets_and_industries() {
        let clients = rows(json!([
            {"ClientID": "C1", "Budget": 100, "Industry": "Retail"},
            {"ClientID": "C2", "Budget": 100, "Industry": "Retail"},
            {"ClientID": "C3", "Budget": 400, "Industry": "Energy"}
        ]));
        let suggestions = generate_suggestions(&clients, &[], &[]);
        assert_eq!(
            types(&suggestions),
            vec![SuggestionType::BusinessInsight, SuggestionType::MarketInsight]
        );
        assert_eq!(suggestions[0].description, "1 clients have budgets 20%+ above average");
        assert_eq!(suggestions[1].description, "67% of clients are in Retail");
        assert_eq!(suggestions[1].id, "suggest_002");
    }

    #[test]
    fn skill_inventory_reads_lists_and_comma_text() {
        let workers = rows(json!([
            {"WorkerID": "W1", "Skills": "[\"Rust\", \"SQL\"]", "MaxLoad": 3},
            {"WorkerID": "W2", "Skills": "rust, Go", "MaxLoad": 3},
            {"WorkerID": "W3", "Skills": ["go"], "MaxLoad": 3}
        ]));
        let tasks = rows(json!([{"TaskID": "T1", "Duration": 2}]));
        let suggestions = generate_suggestions(&[], &workers, &tasks);
        assert_eq!(types(&suggestions), vec![SuggestionType::SkillMatching]);
        assert_eq!(suggestions[0].description, "Found 3 unique skills across 3 workers");

        // No tasks to match against.
        let alone = generate_suggestions(&[], &workers, &[]);
        assert_eq!(types(&alone), vec![SuggestionType::General]);
    }

    #[test]
    fn sparse_data_is_incomplete() {
        let clients = rows(json!([
            {"ClientID": "C1", "Name": "Acme"},
            {"ClientID": "C2", "Name": null},
            {"ClientID": "C3"}
        ]));
        let suggestions = generate_suggestions(&clients, &[], &[]);
        assert_eq!(types(&suggestions), vec![SuggestionType::DataQuality]);
        assert_eq!(suggestions[0].description, "Data is 66.7% complete (2 empty cells)");
    }

    #[test]
    fn suggestion_serializes_with_wire_names() {
        let workers = rows(json!([{"MaxLoad": 1}, {"MaxLoad": 9}]));
        let v = serde_json::to_value(&generate_suggestions(&[], &workers, &[])[0]).unwrap();
        assert_eq!(v["id"], "suggest_001");
        assert_eq!(v["type"], "loadBalance");
        assert_eq!(v["category"], "optimization");
        assert_eq!(v["data_source"], "worker_capacity_analysis");
        assert_eq!(v["confidence"], 0.85);
    }

    #[test]
    fn hints_match_header_substrings() {
        assert_eq!(
            column_hints(["TaskID", "Duration", "PriorityLevel"]),
            vec![HINT_ID_COLUMNS, HINT_DURATION, HINT_PRIORITY]
        );
        assert_eq!(column_hints(["Name", "Skills"]), Vec::<&str>::new());
    }

    #[test]
    fn dataset_hints_skip_quiet_datasets() {
        let clients = rows(json!([{"Name": "Acme"}]));
        let tasks = rows(json!([{"TaskID": "T1", "Duration": 2}]));
        let hints = dataset_hints(&clients, &[], &tasks);
        assert_eq!(hints.len(), 1);
        assert_eq!(hints[&DatasetKind::Tasks], vec![HINT_ID_COLUMNS, HINT_DURATION]);
    }
}
