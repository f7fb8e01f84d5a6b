//! Execution trace domain types
//!
//! Types for the JSON dumps produced by an automation run: executions, their
//! tasks, the insight dump attached to locate/assert tasks, and the planning
//! output of planning tasks. Field names follow the camelCase wire format.
//!
//! A trace file holds either a single [`ExecutionDump`] or a grouped dump with
//! an `executions` array; [`TraceFile`] normalises both into a flat list of
//! executions.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::format::{compact_json, type_str};

/// Read an explicit `null` the same way as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Task type discriminator for planning steps.
pub const TASK_TYPE_PLANNING: &str = "Planning";
/// Task type discriminator for insight (locate/assert/query) steps.
pub const TASK_TYPE_INSIGHT: &str = "Insight";
/// Sub-type of an insight task that evaluates an assertion.
pub const SUB_TYPE_ASSERT: &str = "Assert";
/// Planning action type that carries a locate target.
pub const ACTION_TYPE_LOCATE: &str = "Locate";

// ─────────────────────────────────────────────────────────────────────────────
// Task
// ─────────────────────────────────────────────────────────────────────────────

/// Wall-clock timing of a task, in epoch milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Timing {
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
    #[serde(default)]
    pub cost: Option<f64>,
}

/// One recorded sub-action of a task (e.g. `Tap` on `#btn`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TaskAction {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub action_type: String,
    #[serde(default)]
    pub input: Value,
}

/// Statistics recorded by the perception step that served a task.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TaskInfo {
    #[serde(default)]
    pub usage: Option<Value>,
}

/// Log payload attached to a task.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TaskLog {
    #[serde(default)]
    pub dump: Option<InsightDump>,
}

/// One unit of execution in a trace.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub task_type: String,
    #[serde(default)]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub timing: Option<Timing>,
    #[serde(default)]
    pub locate: Option<Value>,
    #[serde(default)]
    pub actions: Option<Vec<TaskAction>>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub log: Option<TaskLog>,
    #[serde(default)]
    pub output: Option<Value>,
}

impl Task {
    /// Display label: `Type / SubType`, or just `Type`.
    pub fn type_label(&self) -> String {
        type_str(&self.task_type, self.sub_type.as_deref())
    }

    pub fn is_planning(&self) -> bool {
        self.task_type == TASK_TYPE_PLANNING
    }

    /// True for `Insight` tasks with the `Assert` sub-type.
    pub fn is_assertion(&self) -> bool {
        self.task_type == TASK_TYPE_INSIGHT && self.sub_type.as_deref() == Some(SUB_TYPE_ASSERT)
    }

    /// The insight dump recorded in this task's log, if any.
    pub fn insight_dump(&self) -> Option<&InsightDump> {
        self.log.as_ref().and_then(|log| log.dump.as_ref())
    }

    /// Token usage recorded at `log.dump.taskInfo.usage`.
    pub fn usage(&self) -> Option<&Value> {
        self.insight_dump()
            .and_then(|dump| dump.task_info.as_ref())
            .and_then(|info| info.usage.as_ref())
            .filter(|usage| !usage.is_null())
    }

    pub fn cost(&self) -> Option<f64> {
        self.timing.as_ref().and_then(|t| t.cost)
    }

    /// Planning output decoded from `output`, for planning tasks only.
    ///
    /// Each action and the further plan decode on their own; a malformed
    /// entry is logged and skipped without dropping its siblings.
    pub fn planning_output(&self) -> Option<PlanningOutput> {
        if !self.is_planning() {
            return None;
        }
        let output = self.output.as_ref()?.as_object()?;

        let actions = match output.get("actions") {
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(idx, item)| match PlanningAction::deserialize(item) {
                        Ok(action) => Some(action),
                        Err(e) => {
                            tracing::debug!("Skipping malformed planning action {}: {}", idx, e);
                            None
                        }
                    })
                    .collect(),
            ),
            Some(Value::Null) | None => None,
            Some(other) => {
                tracing::debug!("Ignoring non-array planning actions: {}", compact_json(other));
                None
            }
        };

        let further_plan = output
            .get("furtherPlan")
            .filter(|plan| !plan.is_null())
            .and_then(|plan| match FurtherPlan::deserialize(plan) {
                Ok(plan) => Some(plan),
                Err(e) => {
                    tracing::debug!("Ignoring malformed further plan: {}", e);
                    None
                }
            });

        Some(PlanningOutput {
            actions,
            further_plan,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Planning
// ─────────────────────────────────────────────────────────────────────────────

/// Output of a planning task.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningOutput {
    #[serde(default)]
    pub actions: Option<Vec<PlanningAction>>,
    #[serde(default)]
    pub further_plan: Option<FurtherPlan>,
}

/// One step of a plan.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningAction {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub action_type: String,
    #[serde(default)]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub thought: Option<String>,
    #[serde(default)]
    pub param: Option<Value>,
    #[serde(default)]
    pub locate: Option<Value>,
}

impl PlanningAction {
    pub fn type_label(&self) -> String {
        type_str(&self.action_type, self.sub_type.as_deref())
    }

    /// The locate target, only for `Locate` actions that carry one.
    pub fn locate_target(&self) -> Option<&Value> {
        if self.action_type != ACTION_TYPE_LOCATE {
            return None;
        }
        self.locate.as_ref().filter(|locate| !locate.is_null())
    }

    /// Parameters, only when they form a non-empty object.
    pub fn non_empty_param(&self) -> Option<&Value> {
        match &self.param {
            Some(Value::Object(map)) if !map.is_empty() => self.param.as_ref(),
            _ => None,
        }
    }
}

/// Continuation hint emitted by the planner.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FurtherPlan {
    #[serde(default)]
    pub what_to_do_next: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Insight dump / located elements
// ─────────────────────────────────────────────────────────────────────────────

/// Perception snapshot attached to an insight task.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightDump {
    #[serde(default, deserialize_with = "null_as_default")]
    pub matched_element: Vec<LocatedElement>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub task_info: Option<TaskInfo>,
}

/// A page element found by perception: content label plus geometry.
///
/// Kept as the raw JSON object so that extra attributes survive for the
/// object inspector.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LocatedElement(Map<String, Value>);

impl LocatedElement {
    /// Keys that describe an element's label and geometry.
    pub const GEOMETRY_KEYS: [&'static str; 8] = [
        "content", "rect", "center", "left", "top", "right", "bottom", "locator",
    ];

    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Structural check: an object with a defined `content` and truthy
    /// `center` and `rect`.
    pub fn detect(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let has_content = obj.contains_key("content");
        let has_center = obj.get("center").is_some_and(is_truthy);
        let has_rect = obj.get("rect").is_some_and(is_truthy);
        (has_content && has_center && has_rect).then(|| Self(obj.clone()))
    }

    /// Display label taken from `content`.
    pub fn content(&self) -> String {
        match self.0.get("content") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => compact_json(other),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// JavaScript-style truthiness for JSON values.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Execution dumps
// ─────────────────────────────────────────────────────────────────────────────

/// One execution: a named, ordered sequence of tasks.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionDump {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub log_time: Option<f64>,
    #[serde(default)]
    pub model_detail: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks: Vec<Task>,
}

/// A group of executions recorded together.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedActionDump {
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_name: String,
    #[serde(default)]
    pub group_description: Option<String>,
    #[serde(default)]
    pub model_detail: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub executions: Vec<ExecutionDump>,
}

/// A loaded trace, normalised to a list of executions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceFile {
    pub group_name: Option<String>,
    pub executions: Vec<ExecutionDump>,
}

impl TraceFile {
    /// Read and parse a trace file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::trace_not_found(path));
        }
        let content = std::fs::read_to_string(path)?;
        let trace = Self::from_json(&content)?;
        tracing::info!(
            "Loaded trace {:?}: {} executions, {} tasks",
            path,
            trace.executions.len(),
            trace.task_count()
        );
        Ok(trace)
    }

    /// Parse either a grouped dump or a single execution dump.
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        let Some(obj) = value.as_object() else {
            return Err(Error::invalid_trace("top-level value is not an object"));
        };

        if obj.contains_key("executions") {
            let group: GroupedActionDump = serde_json::from_value(value)?;
            let executions = group
                .executions
                .into_iter()
                .map(|mut execution| {
                    if execution.model_detail.is_none() {
                        execution.model_detail = group.model_detail.clone();
                    }
                    execution
                })
                .collect();
            Ok(Self {
                group_name: Some(group.group_name).filter(|name| !name.is_empty()),
                executions,
            })
        } else if obj.contains_key("tasks") {
            let execution: ExecutionDump = serde_json::from_value(value)?;
            Ok(Self {
                group_name: None,
                executions: vec![execution],
            })
        } else {
            Err(Error::invalid_trace(
                "expected an `executions` or `tasks` field",
            ))
        }
    }

    pub fn executions(&self) -> &[ExecutionDump] {
        &self.executions
    }

    /// Total number of tasks across all executions.
    pub fn task_count(&self) -> usize {
        self.executions.iter().map(|e| e.tasks.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task_from(value: Value) -> Task {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_task_deserializes_camel_case_fields() {
        let task = task_from(json!({
            "type": "Insight",
            "subType": "Assert",
            "timing": {"start": 1000.0, "end": 2500.0, "cost": 1500.0},
            "error": "boom",
            "unknownField": 42
        }));
        assert_eq!(task.task_type, "Insight");
        assert_eq!(task.sub_type.as_deref(), Some("Assert"));
        assert_eq!(task.cost(), Some(1500.0));
        assert_eq!(task.error.as_deref(), Some("boom"));
        assert!(task.is_assertion());
        assert!(!task.is_planning());
    }

    #[test]
    fn test_type_label_with_and_without_sub_type() {
        let task = task_from(json!({"type": "Action", "subType": "Tap"}));
        assert_eq!(task.type_label(), "Action / Tap");
        let task = task_from(json!({"type": "Planning"}));
        assert_eq!(task.type_label(), "Planning");
    }

    #[test]
    fn test_usage_read_from_nested_log() {
        let task = task_from(json!({
            "type": "Insight",
            "log": {"dump": {"taskInfo": {"usage": {"total_tokens": 12}}}}
        }));
        assert_eq!(task.usage(), Some(&json!({"total_tokens": 12})));

        let task = task_from(json!({"type": "Insight", "log": {"dump": {}}}));
        assert!(task.usage().is_none());
    }

    #[test]
    fn test_planning_output_only_for_planning_tasks() {
        let output = json!({
            "actions": [{"type": "Locate", "thought": "find it", "locate": {"id": 1}}],
            "furtherPlan": {"whatToDoNext": "scroll"}
        });
        let task = task_from(json!({"type": "Planning", "output": output.clone()}));
        let plan = task.planning_output().unwrap();
        assert_eq!(plan.actions.as_ref().unwrap().len(), 1);
        assert_eq!(
            plan.further_plan.unwrap().what_to_do_next.as_deref(),
            Some("scroll")
        );

        let task = task_from(json!({"type": "Insight", "output": output}));
        assert!(task.planning_output().is_none());
    }

    #[test]
    fn test_non_array_planning_actions_are_absent() {
        let task = task_from(json!({
            "type": "Planning",
            "output": {"actions": "nope", "furtherPlan": {"whatToDoNext": "retry"}}
        }));
        let plan = task.planning_output().unwrap();
        assert!(plan.actions.is_none());
        assert_eq!(
            plan.further_plan.unwrap().what_to_do_next.as_deref(),
            Some("retry")
        );

        let task = task_from(json!({"type": "Planning", "output": "text"}));
        assert!(task.planning_output().is_none());
    }

    #[test]
    fn test_bad_planning_action_skipped_keeps_siblings() {
        let task = task_from(json!({
            "type": "Planning",
            "output": {
                "actions": [
                    {"type": "Tap", "thought": "ok"},
                    {"type": "Tap", "thought": 42},
                    {"type": "Scroll", "thought": "down"}
                ],
                "furtherPlan": {"whatToDoNext": "check result"}
            }
        }));
        let plan = task.planning_output().unwrap();
        let actions = plan.actions.unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].thought.as_deref(), Some("ok"));
        assert_eq!(actions[1].action_type, "Scroll");
        assert_eq!(
            plan.further_plan.unwrap().what_to_do_next.as_deref(),
            Some("check result")
        );
    }

    #[test]
    fn test_malformed_further_plan_keeps_actions() {
        let task = task_from(json!({
            "type": "Planning",
            "output": {"actions": [{"type": "Tap"}], "furtherPlan": {"whatToDoNext": 7}}
        }));
        let plan = task.planning_output().unwrap();
        assert_eq!(plan.actions.unwrap().len(), 1);
        assert!(plan.further_plan.is_none());
    }

    #[test]
    fn test_null_matched_element_still_loads() {
        let trace = TraceFile::from_json(
            r#"{"tasks": [{"type": "Insight", "log": {"dump": {"matchedElement": null, "data": {"a": 1}}}}]}"#,
        )
        .unwrap();
        let dump = trace.executions[0].tasks[0].insight_dump().unwrap();
        assert!(dump.matched_element.is_empty());
        assert_eq!(dump.data, Some(json!({"a": 1})));
    }

    #[test]
    fn test_null_names_and_types_read_as_empty() {
        let trace = TraceFile::from_json(
            r#"{"name": null, "tasks": [
                {"type": null, "actions": [{"type": null, "input": "x"}]}
            ]}"#,
        )
        .unwrap();
        let execution = &trace.executions[0];
        assert_eq!(execution.name, "");
        assert_eq!(execution.tasks[0].task_type, "");
        assert_eq!(execution.tasks[0].actions.as_ref().unwrap()[0].action_type, "");

        let trace = TraceFile::from_json(
            r#"{"groupName": null, "executions": [{"name": "a", "tasks": null}]}"#,
        )
        .unwrap();
        assert!(trace.group_name.is_none());
        assert_eq!(trace.task_count(), 0);

        let trace = TraceFile::from_json(r#"{"groupName": "g", "executions": null}"#).unwrap();
        assert!(trace.executions().is_empty());
    }

    #[test]
    fn test_locate_target_only_for_locate_actions() {
        let action: PlanningAction =
            serde_json::from_value(json!({"type": "Locate", "locate": {"id": 1}})).unwrap();
        assert_eq!(action.locate_target(), Some(&json!({"id": 1})));

        let action: PlanningAction =
            serde_json::from_value(json!({"type": "Tap", "locate": {"id": 1}})).unwrap();
        assert!(action.locate_target().is_none());
    }

    #[test]
    fn test_non_empty_param() {
        let action: PlanningAction =
            serde_json::from_value(json!({"type": "Input", "param": {}})).unwrap();
        assert!(action.non_empty_param().is_none());

        let action: PlanningAction =
            serde_json::from_value(json!({"type": "Input", "param": {"value": "hi"}})).unwrap();
        assert_eq!(action.non_empty_param(), Some(&json!({"value": "hi"})));
    }

    #[test]
    fn test_detect_located_element() {
        let el = json!({"content": "Login", "center": [10, 20], "rect": {"left": 0}});
        let detected = LocatedElement::detect(&el).unwrap();
        assert_eq!(detected.content(), "Login");

        // Empty-string content still counts as defined
        let el = json!({"content": "", "center": [1, 1], "rect": {"left": 0}});
        assert!(LocatedElement::detect(&el).is_some());
    }

    #[test]
    fn test_detect_rejects_partial_shapes() {
        assert!(LocatedElement::detect(&json!({"content": "x", "rect": {}})).is_none());
        assert!(LocatedElement::detect(&json!({"center": [1], "rect": {}})).is_none());
        assert!(
            LocatedElement::detect(&json!({"content": "x", "center": null, "rect": {}})).is_none()
        );
        assert!(LocatedElement::detect(&json!({"content": "x", "center": 0, "rect": {}})).is_none());
        assert!(LocatedElement::detect(&json!("content")).is_none());
        assert!(LocatedElement::detect(&json!([1, 2])).is_none());
    }

    #[test]
    fn test_trace_file_single_execution() {
        let trace = TraceFile::from_json(
            r#"{"name": "login", "modelDetail": {"model": "gpt"}, "tasks": [{"type": "Action"}]}"#,
        )
        .unwrap();
        assert!(trace.group_name.is_none());
        assert_eq!(trace.executions().len(), 1);
        assert_eq!(trace.task_count(), 1);
    }

    #[test]
    fn test_trace_file_grouped_inherits_model_detail() {
        let trace = TraceFile::from_json(
            r#"{
                "groupName": "suite",
                "modelDetail": {"model": "gpt"},
                "executions": [
                    {"name": "a", "tasks": [{"type": "Action"}, {"type": "Insight"}]},
                    {"name": "b", "modelDetail": {"model": "other"}, "tasks": []}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(trace.group_name.as_deref(), Some("suite"));
        assert_eq!(trace.task_count(), 2);
        assert_eq!(
            trace.executions[0].model_detail,
            Some(json!({"model": "gpt"}))
        );
        assert_eq!(
            trace.executions[1].model_detail,
            Some(json!({"model": "other"}))
        );
    }

    #[test]
    fn test_trace_file_rejects_unknown_shape() {
        let err = TraceFile::from_json(r#"{"foo": 1}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidTrace { .. }));
        let err = TraceFile::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::InvalidTrace { .. }));
        let err = TraceFile::from_json("{").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_trace_file_load_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = TraceFile::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::TraceNotFound { .. }));
    }

    #[test]
    fn test_trace_file_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        std::fs::write(&path, r#"{"name": "x", "tasks": [{"type": "Planning"}]}"#).unwrap();
        let trace = TraceFile::load(&path).unwrap();
        assert_eq!(trace.task_count(), 1);
    }
}
