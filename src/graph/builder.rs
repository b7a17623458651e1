use chrono::{DateTime, Utc};

use crate::error::GanttaiError;
use crate::models::{FieldValue, RawCustomField, RawWorkItem, Task};

const START_ALIASES: &[&str] = &["start", "begin", "begindate", "plannedstart", "kickoff"];
const DUE_ALIASES: &[&str] = &["due", "deadline", "end", "finish", "target", "plannedend"];

/// What a custom attribute means to the scheduler, judged by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    StartDate,
    DueDate,
    Estimation,
    SpentTime,
    Other,
}

impl FieldRole {
    pub fn from_name(name: &str) -> Self {
        let n = normalize_name(name);
        if (n.contains("start") && n.contains("date")) || START_ALIASES.contains(&n.as_str()) {
            Self::StartDate
        } else if (["due", "end", "target", "finish"].iter().any(|w| n.contains(w)) && n.contains("date"))
            || DUE_ALIASES.contains(&n.as_str())
        {
            Self::DueDate
        } else if n.contains("estimat") {
            Self::Estimation
        } else if n.contains("spent") {
            Self::SpentTime
        } else {
            Self::Other
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Self::StartDate | Self::DueDate)
    }
}

/// Lowercase and drop everything but letters and digits: "Start Date" -> "startdate".
fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedField {
    pub name: String,
    pub role: FieldRole,
    pub value: FieldValue,
}

pub fn classify_field(field: &RawCustomField) -> ClassifiedField {
    let role = FieldRole::from_name(&field.name);
    ClassifiedField {
        name: field.name.clone(),
        role,
        value: FieldValue::classify(&field.value, role.is_date()),
    }
}

/// Attributes the scheduler reads; the first matching attribute fills each slot.
#[derive(Debug, Default)]
struct ResolvedAttributes {
    start: Option<DateTime<Utc>>,
    due: Option<DateTime<Utc>>,
    estimated: Option<i64>,
    spent: Option<i64>,
    assignee: Option<String>,
}

fn resolve_attributes(fields: &[RawCustomField]) -> ResolvedAttributes {
    let mut attrs = ResolvedAttributes::default();
    for field in fields.iter().map(classify_field) {
        match (field.role, &field.value) {
            (FieldRole::StartDate, FieldValue::Date(d)) => {
                attrs.start.get_or_insert(*d);
            }
            (FieldRole::DueDate, FieldValue::Date(d)) => {
                attrs.due.get_or_insert(*d);
            }
            (FieldRole::Estimation, FieldValue::Duration { minutes }) => {
                attrs.estimated.get_or_insert(*minutes);
            }
            (FieldRole::SpentTime, FieldValue::Duration { minutes }) => {
                attrs.spent.get_or_insert(*minutes);
            }
            (_, FieldValue::User(login)) if normalize_name(&field.name) == "assignee" => {
                attrs.assignee.get_or_insert_with(|| login.clone());
            }
            _ => {}
        }
    }
    attrs
}

fn millis(ts: Option<i64>) -> Option<DateTime<Utc>> {
    ts.and_then(DateTime::from_timestamp_millis)
}

fn non_empty(s: &Option<String>) -> Option<String> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Normalize one raw work item. Fails only when the human id or project id is missing.
pub fn build_task(item: &RawWorkItem) -> Result<Task, GanttaiError> {
    let item_ref = if item.id.is_empty() { "<unknown>" } else { item.id.as_str() };
    let human_id = non_empty(&item.human_id)
        .ok_or_else(|| GanttaiError::missing_identifier("human id", item_ref))?;
    let project_id = non_empty(&item.project_id)
        .ok_or_else(|| GanttaiError::missing_identifier("project id", &human_id))?;

    let attrs = resolve_attributes(&item.custom_fields);
    let resolved_at = millis(item.resolved);

    Ok(Task {
        id: item.id.clone(),
        human_id,
        project_id,
        summary: item.summary.clone(),
        assignee_id: non_empty(&item.assignee_id).or(attrs.assignee),
        start_date: millis(item.start_date).or(attrs.start),
        due_date: millis(item.due_date).or(attrs.due),
        created_at: millis(item.created),
        updated_at: millis(item.updated),
        resolved_at,
        estimated_minutes: attrs.estimated,
        spent_minutes: attrs.spent,
        resolved: resolved_at.is_some(),
    })
}

/// Normalize a batch. Items that fail to map, or repeat an earlier human id,
/// are skipped and returned alongside the tasks.
pub fn build_tasks(items: &[RawWorkItem]) -> (Vec<Task>, Vec<GanttaiError>) {
    let mut tasks: Vec<Task> = Vec::with_capacity(items.len());
    let mut skipped = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for item in items {
        match build_task(item) {
            Ok(task) => {
                if !seen.insert(task.human_id.clone()) {
                    tracing::warn!(human_id = %task.human_id, "duplicate human id, keeping first");
                    skipped.push(GanttaiError::new(
                        crate::error::ErrorCode::MappingError,
                        format!("Duplicate human id {}", task.human_id),
                    ));
                    continue;
                }
                tasks.push(task);
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping work item");
                skipped.push(e);
            }
        }
    }
    tracing::debug!(tasks = tasks.len(), skipped = skipped.len(), "built task models");
    (tasks, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    fn field(name: &str, value: serde_json::Value) -> RawCustomField {
        RawCustomField {
            name: name.into(),
            value,
        }
    }

    fn item(human_id: &str) -> RawWorkItem {
        RawWorkItem {
            id: format!("2-{human_id}"),
            human_id: Some(human_id.into()),
            project_id: Some("0-1".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_field_roles() {
        assert_eq!(FieldRole::from_name("Start Date"), FieldRole::StartDate);
        assert_eq!(FieldRole::from_name("Planned start"), FieldRole::StartDate);
        assert_eq!(FieldRole::from_name("Due Date"), FieldRole::DueDate);
        assert_eq!(FieldRole::from_name("Target date"), FieldRole::DueDate);
        assert_eq!(FieldRole::from_name("Deadline"), FieldRole::DueDate);
        assert_eq!(FieldRole::from_name("Estimation"), FieldRole::Estimation);
        assert_eq!(FieldRole::from_name("Spent time"), FieldRole::SpentTime);
        assert_eq!(FieldRole::from_name("Priority"), FieldRole::Other);
    }

    #[test]
    fn test_missing_identifiers() {
        let mut raw = item("P-1");
        raw.human_id = None;
        assert_eq!(build_task(&raw).unwrap_err().code, ErrorCode::MappingError);

        let mut raw = item("P-1");
        raw.project_id = Some("  ".into());
        assert_eq!(build_task(&raw).unwrap_err().code, ErrorCode::MappingError);
    }

    #[test]
    fn test_custom_fields_fill_task() {
        let mut raw = item("P-1");
        raw.custom_fields = vec![
            field("Priority", json!({"name": "Major"})),
            field("Start Date", json!(86_400_000)),
            field("Begin date", json!(0)),
            field("Due Date", json!(5 * 86_400_000)),
            field("Estimation", json!({"minutes": 960})),
            field("Spent time", json!({"minutes": 0})),
            field("Assignee", json!({"login": "jane"})),
        ];
        let t = build_task(&raw).unwrap();
        assert_eq!(t.start_date, DateTime::from_timestamp_millis(86_400_000));
        assert_eq!(t.due_date, DateTime::from_timestamp_millis(5 * 86_400_000));
        assert_eq!(t.estimated_minutes, Some(960));
        assert_eq!(t.spent_minutes, Some(0));
        assert_eq!(t.assignee_id.as_deref(), Some("jane"));
    }

    #[test]
    fn test_absent_durations_stay_unset() {
        let mut raw = item("P-1");
        raw.custom_fields = vec![field("Estimation", serde_json::Value::Null)];
        let t = build_task(&raw).unwrap();
        assert_eq!(t.estimated_minutes, None);
        assert_eq!(t.spent_minutes, None);
    }

    #[test]
    fn test_direct_dates_win_over_custom_fields() {
        let mut raw = item("P-1");
        raw.start_date = Some(1_000);
        raw.custom_fields = vec![field("Start Date", json!(2_000))];
        let t = build_task(&raw).unwrap();
        assert_eq!(t.start_date, DateTime::from_timestamp_millis(1_000));
    }

    #[test]
    fn test_batch_skips_bad_and_duplicate_items() {
        let mut bad = item("P-2");
        bad.project_id = None;
        let (tasks, skipped) = build_tasks(&[item("P-1"), bad, item("P-3"), item("P-1")]);
        let ids: Vec<_> = tasks.iter().map(|t| t.human_id.as_str()).collect();
        assert_eq!(ids, vec!["P-1", "P-3"]);
        assert_eq!(skipped.len(), 2);
    }

    #[test]
    fn test_resolved_flag_follows_timestamp() {
        let mut raw = item("P-1");
        raw.resolved = Some(42);
        assert!(build_task(&raw).unwrap().resolved);
        assert!(!build_task(&item("P-2")).unwrap().resolved);
    }
}
