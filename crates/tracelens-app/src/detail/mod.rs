//! # Detail Side
//!
//! Projects the selected task, its insight dump and the owning execution dump
//! into a [`DetailSide`] view model: model metadata, task metadata, actions,
//! text output, the trailing card block (error, raw data, assertion, matched
//! elements) and the planning timeline.
//!
//! Composition is a pure function of its three inputs. Every group degrades to
//! "absent" when its source data is missing; nothing here returns an error.

pub mod inspect;
pub mod meta_kv;
pub mod node;


use serde::Serialize;
use serde_json::Value;
use tracelens_core::{
    compact_json, plain_or_compact, pretty_json, time_cost_str, time_str, ExecutionDump,
    InsightDump, LocatedElement, PlanningAction, Task,
};

pub use inspect::{inspect, inspect_map, object_without_keys, InspectedValue};
pub use meta_kv::{KvRow, MetaKv};
pub use node::{Card, DisplayNode, TimelineItem, ELEMENT_TAG};

pub const TITLE_MODEL_META: &str = "Model Meta";
pub const TITLE_TASK_META: &str = "Task Meta";
pub const TITLE_ACTIONS: &str = "Actions";
pub const TITLE_TEXT_OUTPUT: &str = "Text Output";
pub const TITLE_PLANNING: &str = "Planning";
pub const TITLE_ERROR: &str = "Error";
pub const TITLE_ASSERT: &str = "Assert";
pub const TITLE_FURTHER_PLAN: &str = "Further Plan";

/// Everything the detail panel shows for one task.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailSide {
    pub model_meta: Option<MetaKv>,
    pub task_meta: MetaKv,
    pub actions: Option<MetaKv>,
    pub text_output: String,
    pub error: Option<Card>,
    pub raw_data: Option<Card>,
    pub assertion: Option<Card>,
    pub matched_elements: Vec<Card>,
    pub timeline: Vec<TimelineItem>,
}

/// Body of a layout section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionBody<'a> {
    Kv(&'a MetaKv),
    Text(&'a str),
    Cards(&'a [Card]),
    Timeline(&'a [TimelineItem]),
}

/// A layout section with an optional header.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    pub title: Option<&'static str>,
    pub body: SectionBody<'a>,
}

impl DetailSide {
    /// Compose the view with no matched element highlighted.
    pub fn compose(
        task: Option<&Task>,
        insight: Option<&InsightDump>,
        dump: Option<&ExecutionDump>,
    ) -> Self {
        Self::compose_highlighted(task, insight, dump, None)
    }

    /// Compose the view, marking matched element `highlight` (by index).
    pub fn compose_highlighted(
        task: Option<&Task>,
        insight: Option<&InsightDump>,
        dump: Option<&ExecutionDump>,
        highlight: Option<usize>,
    ) -> Self {
        Self {
            model_meta: dump.and_then(model_meta),
            task_meta: task_meta(task),
            actions: task.and_then(actions),
            text_output: task
                .and_then(|t| t.value.as_ref())
                .map(plain_or_compact)
                .unwrap_or_default(),
            error: task.and_then(error_card),
            raw_data: insight.and_then(raw_data_card),
            assertion: task.and_then(assertion_card),
            matched_elements: insight
                .map(|dump| matched_element_cards(dump, highlight))
                .unwrap_or_default(),
            timeline: task.map(timeline).unwrap_or_default(),
        }
    }

    /// Cards of the trailing block, in display order.
    pub fn trailing_cards(&self) -> Vec<Card> {
        self.error
            .iter()
            .chain(self.raw_data.iter())
            .chain(self.assertion.iter())
            .chain(self.matched_elements.iter())
            .cloned()
            .collect()
    }

    /// Sections in their fixed vertical order. Groups with no content are
    /// left out; Task Meta and Text Output are always present.
    pub fn sections<'a>(&'a self, trailing: &'a [Card]) -> Vec<Section<'a>> {
        let mut sections = Vec::new();
        if let Some(model) = &self.model_meta {
            sections.push(Section {
                title: Some(TITLE_MODEL_META),
                body: SectionBody::Kv(model),
            });
        }
        sections.push(Section {
            title: Some(TITLE_TASK_META),
            body: SectionBody::Kv(&self.task_meta),
        });
        if let Some(actions) = &self.actions {
            sections.push(Section {
                title: Some(TITLE_ACTIONS),
                body: SectionBody::Kv(actions),
            });
        }
        sections.push(Section {
            title: Some(TITLE_TEXT_OUTPUT),
            body: SectionBody::Text(&self.text_output),
        });
        if !trailing.is_empty() {
            sections.push(Section {
                title: None,
                body: SectionBody::Cards(trailing),
            });
        }
        if !self.timeline.is_empty() {
            sections.push(Section {
                title: Some(TITLE_PLANNING),
                body: SectionBody::Timeline(&self.timeline),
            });
        }
        sections
    }

    /// Flatten the view to plain text lines (headless output).
    pub fn plain_lines(&self) -> Vec<String> {
        let trailing = self.trailing_cards();
        let mut lines = Vec::new();
        for section in self.sections(&trailing) {
            if let Some(title) = section.title {
                lines.push(format!("== {} ==", title));
            }
            match section.body {
                SectionBody::Kv(kv) => {
                    for row in kv.rows() {
                        push_multiline(&mut lines, &format!("{}: ", row.key), &row.content);
                    }
                }
                SectionBody::Text(text) => lines.extend(text.lines().map(str::to_string)),
                SectionBody::Cards(cards) => {
                    for card in cards {
                        let marker = if card.highlight { "* " } else { "" };
                        if let Some(title) = &card.title {
                            lines.push(format!("{}[{}]", marker, title));
                        }
                        for node in &card.content {
                            push_multiline(&mut lines, "  ", node);
                        }
                    }
                }
                SectionBody::Timeline(items) => {
                    for item in items {
                        for (i, paragraph) in item.paragraphs.iter().enumerate() {
                            let prefix = if i == 0 { "o " } else { "  " };
                            push_multiline(&mut lines, prefix, paragraph);
                        }
                    }
                }
            }
        }
        lines
    }
}

fn push_multiline(lines: &mut Vec<String>, prefix: &str, node: &DisplayNode) {
    let text = node.plain_text();
    let indent = " ".repeat(prefix.len());
    for (i, line) in text.lines().enumerate() {
        let lead = if i == 0 { prefix } else { indent.as_str() };
        lines.push(format!("{}{}", lead, line));
    }
    if text.is_empty() {
        lines.push(prefix.trim_end().to_string());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Groups
// ─────────────────────────────────────────────────────────────────────────────

fn model_meta(dump: &ExecutionDump) -> Option<MetaKv> {
    let Some(Value::Object(detail)) = &dump.model_detail else {
        return None;
    };
    Some(
        detail
            .iter()
            .map(|(key, value)| KvRow::new(key.as_str(), plain_or_compact(value)))
            .collect(),
    )
}

fn task_meta(task: Option<&Task>) -> MetaKv {
    let timing = task.and_then(|t| t.timing.as_ref());
    let mut rows = vec![
        KvRow::new("type", task.map(|t| t.task_type.clone()).unwrap_or_default()),
        KvRow::new("start", time_str(timing.and_then(|t| t.start))),
        KvRow::new("end", time_str(timing.and_then(|t| t.end))),
        KvRow::new("cost", time_cost_str(timing.and_then(|t| t.cost))),
    ];
    if let Some(locate) = task.and_then(|t| t.locate.as_ref()).filter(|l| !l.is_null()) {
        rows.push(KvRow::new("locate", compact_json(locate)));
    }
    if let Some(usage) = task.and_then(Task::usage) {
        rows.push(KvRow::new("usage", DisplayNode::code(pretty_json(usage))));
    }
    MetaKv::new(rows)
}

fn actions(task: &Task) -> Option<MetaKv> {
    let actions = task.actions.as_ref()?;
    Some(
        actions
            .iter()
            .map(|action| KvRow::new(action.action_type.as_str(), plain_or_compact(&action.input)))
            .collect(),
    )
}

fn error_card(task: &Task) -> Option<Card> {
    let error = task.error.as_deref().filter(|e| !e.is_empty())?;
    Some(Card::lite(vec![DisplayNode::Failure(error.to_string())]).with_title(TITLE_ERROR))
}

fn raw_data_card(insight: &InsightDump) -> Option<Card> {
    let data = insight.data.as_ref().filter(|d| !d.is_null())?;
    Some(Card::lite(vec![DisplayNode::code(pretty_json(data))]))
}

fn assertion_card(task: &Task) -> Option<Card> {
    if !task.is_assertion() {
        return None;
    }
    // No output yet: keep the card with an empty body
    let body = task.output.as_ref().map(pretty_json).unwrap_or_default();
    Some(Card::lite(vec![DisplayNode::code(body)]).with_title(TITLE_ASSERT))
}

fn matched_element_cards(insight: &InsightDump, highlight: Option<usize>) -> Vec<Card> {
    insight
        .matched_element
        .iter()
        .enumerate()
        .map(|(idx, element)| {
            let rest = object_without_keys(element.fields(), &LocatedElement::GEOMETRY_KEYS);
            Card::new(inspect_map(&rest))
                .with_title(element.content())
                .with_highlight(highlight == Some(idx))
        })
        .collect()
}

fn timeline(task: &Task) -> Vec<TimelineItem> {
    let Some(plan) = task.planning_output() else {
        return Vec::new();
    };
    let Some(actions) = plan.actions else {
        return Vec::new();
    };

    let mut items: Vec<TimelineItem> = actions.iter().map(timeline_item).collect();
    if let Some(further) = plan.further_plan {
        items.push(TimelineItem {
            paragraphs: vec![
                DisplayNode::Bold(TITLE_FURTHER_PLAN.to_string()),
                DisplayNode::text(further.what_to_do_next.unwrap_or_default()),
            ],
        });
    }
    items
}

fn timeline_item(action: &PlanningAction) -> TimelineItem {
    let mut paragraphs = vec![DisplayNode::Bold(action.type_label())];
    if let Some(thought) = &action.thought {
        paragraphs.push(DisplayNode::text(thought.as_str()));
    }
    if let Some(param) = action.non_empty_param() {
        paragraphs.push(DisplayNode::code(pretty_json(param)));
    }
    if let Some(locate) = action.locate_target() {
        paragraphs.push(DisplayNode::code(compact_json(locate)));
    }
    TimelineItem { paragraphs }
}
