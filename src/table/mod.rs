//! Generic record table.
//!
//! Projects any sequence of uniformly-shaped records into a searchable, sortable grid.
//! The table owns no data: every view is recomputed from the records passed in,
//! search first and then sort.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder shown for a column value that is absent.
pub const PLACEHOLDER: &str = "-";

/// Default message when no record survives the search.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data found";

/// A field value as seen by the table.
///
/// Only `Text` takes part in search and sort; other kinds are rendered but never matched
/// or ordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Int(i64),
    Float(f64),
    Bool(bool),
    Missing,
}

impl<'a> FieldValue<'a> {
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            FieldValue::Text(s) => Some(*s),
            _ => None,
        }
    }

    /// Default cell text, used when a column has no custom renderer.
    pub fn render(&self) -> String {
        match self {
            FieldValue::Text(s) => (*s).to_string(),
            FieldValue::Int(n) => n.to_string(),
            FieldValue::Float(n) => n.to_string(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Missing => PLACEHOLDER.to_string(),
        }
    }
}

impl<'a> From<Option<&'a str>> for FieldValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(FieldValue::Missing, FieldValue::Text)
    }
}

/// A row that can be shown in a [`RecordTable`].
pub trait Record {
    /// Stable unique identifier.
    fn id(&self) -> &str;

    /// Look up a field by its column key.
    fn field(&self, key: &str) -> FieldValue<'_>;
}

impl<T: Record + ?Sized> Record for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn field(&self, key: &str) -> FieldValue<'_> {
        (**self).field(key)
    }
}

type CellRenderer<T> = Box<dyn Fn(&T) -> String + Send + Sync>;
type RowClickHandler<T> = Box<dyn Fn(&T) -> RowLink + Send + Sync>;

/// Column definition.
pub struct Column<T> {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    render: Option<CellRenderer<T>>,
}

impl<T: Record> Column<T> {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn render_with(mut self, render: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    fn cell(&self, record: &T) -> String {
        match &self.render {
            Some(render) => render(record),
            None => record.field(&self.key).render(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("custom_render", &self.render.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Record a row click leads to, possibly in another collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowLink {
    pub resource: String,
    pub id: String,
}

impl RowLink {
    pub fn new(resource: impl fmt::Display, id: impl Into<String>) -> Self {
        Self {
            resource: resource.to_string(),
            id: id.into(),
        }
    }
}

/// Active single-key sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

/// Interactive table state over records of type `T`.
pub struct RecordTable<T> {
    columns: Vec<Column<T>>,
    search_keys: Vec<String>,
    empty_message: String,
    on_row_click: Option<RowClickHandler<T>>,
    search: String,
    sort: Option<SortState>,
}

impl<T: Record> RecordTable<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            columns,
            search_keys: Vec::new(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            on_row_click: None,
            search: String::new(),
            sort: None,
        }
    }

    /// Restrict free-text search to these fields. Without any, search matches nothing.
    pub fn search_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Handler run for each rendered row; its link is what clicking the row opens.
    pub fn on_row_click(mut self, handler: impl Fn(&T) -> RowLink + Send + Sync + 'static) -> Self {
        self.on_row_click = Some(Box::new(handler));
        self
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Header click: toggles the direction on the active column, otherwise selects the
    /// column ascending. Returns `false` for unknown or non-sortable columns.
    pub fn click_header(&mut self, key: &str) -> bool {
        if !self.is_sortable(key) {
            return false;
        }
        self.sort = Some(match self.sort.take() {
            Some(active) if active.key == key => SortState {
                key: active.key,
                direction: active.direction.toggled(),
            },
            _ => SortState {
                key: key.to_string(),
                direction: SortDirection::Asc,
            },
        });
        true
    }

    /// Select a sort column and direction directly.
    pub fn set_sort(&mut self, key: &str, direction: SortDirection) -> bool {
        if !self.is_sortable(key) {
            return false;
        }
        self.sort = Some(SortState {
            key: key.to_string(),
            direction,
        });
        true
    }

    pub fn is_sortable(&self, key: &str) -> bool {
        self.columns.iter().any(|c| c.sortable && c.key == key)
    }

    /// Records matching the current search term, in input order.
    pub fn filter<'a>(&self, records: &'a [T]) -> Vec<&'a T> {
        filter_records(records, &self.search_keys, &self.search)
    }

    /// Filtered then sorted records.
    pub fn visible<'a>(&self, records: &'a [T]) -> Vec<&'a T> {
        let mut rows = self.filter(records);
        if let Some(sort) = &self.sort {
            sort_records(&mut rows, &sort.key, sort.direction);
        }
        rows
    }

    /// Render the current view of `records`.
    pub fn view(&self, records: &[T]) -> TableView {
        let rows = self.visible(records);
        let shown = rows.len();

        let columns = self
            .columns
            .iter()
            .map(|c| HeaderView {
                key: c.key.clone(),
                label: c.label.clone(),
                sortable: c.sortable,
                sort: self
                    .sort
                    .as_ref()
                    .filter(|s| c.sortable && s.key == c.key)
                    .map(|s| s.direction),
            })
            .collect();

        let body = if rows.is_empty() {
            TableBody::Empty {
                message: self.empty_message.clone(),
            }
        } else {
            TableBody::Rows {
                rows: rows
                    .into_iter()
                    .map(|record| RowView {
                        id: record.id().to_string(),
                        cells: self.columns.iter().map(|c| c.cell(record)).collect(),
                        link: self.on_row_click.as_ref().map(|handler| handler(record)),
                    })
                    .collect(),
            }
        };

        TableView {
            columns,
            search: self.search.clone(),
            sort: self.sort.clone(),
            body,
            shown,
            total: records.len(),
        }
    }
}

/// Case-insensitive substring match over the string-valued search fields.
pub fn filter_records<'a, T: Record>(records: &'a [T], search_keys: &[String], term: &str) -> Vec<&'a T> {
    if term.is_empty() {
        return records.iter().collect();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| {
            search_keys.iter().any(|key| {
                record
                    .field(key)
                    .as_text()
                    .is_some_and(|value| value.to_lowercase().contains(&needle))
            })
        })
        .collect()
}

/// Stable single-key sort by a string column.
///
/// Rows whose value is not a string keep their positions; string-valued rows are ordered
/// among the remaining slots.
pub fn sort_records<T: Record>(rows: &mut [&T], key: &str, direction: SortDirection) {
    let slots: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, r)| r.field(key).as_text().is_some())
        .map(|(i, _)| i)
        .collect();

    let mut sortable: Vec<&T> = slots.iter().map(|&i| rows[i]).collect();
    sortable.sort_by(|a, b| {
        let (a, b) = (
            a.field(key).as_text().unwrap_or_default(),
            b.field(key).as_text().unwrap_or_default(),
        );
        match direction {
            SortDirection::Asc => locale_compare(a, b),
            SortDirection::Desc => locale_compare(b, a),
        }
    });

    for (slot, row) in slots.into_iter().zip(sortable) {
        rows[slot] = row;
    }
}

/// Human ordering of strings: case-insensitive first, lowercase before uppercase on ties.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if folded != Ordering::Equal {
        return folded;
    }
    a.chars()
        .zip(b.chars())
        .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => x.cmp(&y),
        })
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

/// Rendered table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub columns: Vec<HeaderView>,
    pub search: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortState>,
    pub body: TableBody,
    /// Rows after search.
    pub shown: usize,
    /// Rows before search.
    pub total: usize,
}

#[cfg(test)]
impl TableView {
    pub fn row_ids(&self) -> Vec<&str> {
        match &self.body {
            TableBody::Rows { rows } => rows.iter().map(|r| r.id.as_str()).collect(),
            TableBody::Empty { .. } => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HeaderView {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum TableBody {
    Rows { rows: Vec<RowView> },
    Empty { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct RowView {
    pub id: String,
    pub cells: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<RowLink>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    impl Record for Value {
        fn id(&self) -> &str {
            self.get("id").and_then(Value::as_str).unwrap_or_default()
        }

        fn field(&self, key: &str) -> FieldValue<'_> {
            match self.get(key) {
                Some(Value::String(s)) => FieldValue::Text(s),
                Some(Value::Bool(b)) => FieldValue::Bool(*b),
                Some(Value::Number(n)) => match n.as_i64() {
                    Some(i) => FieldValue::Int(i),
                    None => n.as_f64().map_or(FieldValue::Missing, FieldValue::Float),
                },
                _ => FieldValue::Missing,
            }
        }
    }

    fn hosts() -> Vec<Value> {
        vec![
            json!({"id": "h1", "hostname": "web-prod-01", "cpu": 4, "osName": "Ubuntu"}),
            json!({"id": "h2", "hostname": "web-prod-02", "cpu": 8}),
            json!({"id": "h3", "hostname": "api-prod-01", "cpu": 2, "osName": "Debian"}),
        ]
    }

    fn host_table() -> RecordTable<Value> {
        RecordTable::new(vec![
            Column::new("hostname", "Hostname").sortable(),
            Column::new("cpu", "CPU").sortable(),
            Column::new("osName", "OS").sortable(),
        ])
        .search_keys(["hostname", "osName"])
        .empty_message("No hosts found")
    }

    #[test]
    fn test_search_preserves_input_order() {
        let records = hosts();
        let mut table = host_table();
        table.set_search("web");

        let view = table.view(&records);
        assert_eq!(view.row_ids(), vec!["h1", "h2"]);
        assert_eq!(view.shown, 2);
        assert_eq!(view.total, 3);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = hosts();
        let mut table = host_table();
        table.set_search("UBUNTU");
        assert_eq!(table.view(&records).row_ids(), vec!["h1"]);
    }

    #[test]
    fn test_search_ignores_non_string_fields() {
        let records = hosts();
        let mut table = RecordTable::new(vec![Column::new("cpu", "CPU")]).search_keys(["cpu"]);
        table.set_search("4");
        assert!(table.filter(&records).is_empty());
    }

    #[test]
    fn test_search_only_designated_fields() {
        let records = hosts();
        let mut table = RecordTable::new(vec![Column::new("hostname", "Hostname")])
            .search_keys(["osName"]);
        table.set_search("web");
        assert!(table.filter(&records).is_empty());
    }

    #[test]
    fn test_empty_search_returns_everything() {
        let records = hosts();
        let table = host_table();
        assert_eq!(table.filter(&records).len(), records.len());
    }

    #[test]
    fn test_empty_result_renders_message() {
        let records = hosts();
        let mut table = host_table();
        table.set_search("nothing-matches");

        match table.view(&records).body {
            TableBody::Empty { message } => assert_eq!(message, "No hosts found"),
            TableBody::Rows { .. } => panic!("expected empty body"),
        }
    }

    #[test]
    fn test_missing_value_renders_placeholder() {
        let records = hosts();
        let view = host_table().view(&records);
        let TableBody::Rows { rows } = view.body else {
            panic!("expected rows");
        };
        assert_eq!(rows[1].cells, vec!["web-prod-02", "8", "-"]);
    }

    #[test]
    fn test_custom_renderer() {
        let records = hosts();
        let table = RecordTable::new(vec![Column::new("cpu", "Resources")
            .render_with(|r: &Value| format!("{} vCPU", r["cpu"]))]);
        let TableBody::Rows { rows } = table.view(&records).body else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].cells, vec!["4 vCPU"]);
    }

    #[test]
    fn test_header_click_cycle() {
        let records = hosts();
        let mut table = host_table();

        assert!(table.click_header("hostname"));
        assert_eq!(table.view(&records).row_ids(), vec!["h3", "h1", "h2"]);

        assert!(table.click_header("hostname"));
        let view = table.view(&records);
        assert_eq!(view.sort.as_ref().unwrap().direction, SortDirection::Desc);
        assert_eq!(view.row_ids(), vec!["h2", "h1", "h3"]);

        assert!(table.click_header("osName"));
        assert_eq!(
            table.view(&records).sort,
            Some(SortState {
                key: "osName".to_string(),
                direction: SortDirection::Asc
            })
        );
    }

    #[test]
    fn test_non_sortable_header_is_ignored() {
        let mut table = RecordTable::<Value>::new(vec![Column::new("hostname", "Hostname")]);
        assert!(!table.click_header("hostname"));
        assert!(!table.click_header("unknown"));
        assert!(table.view(&[]).sort.is_none());
    }

    #[test]
    fn test_sort_on_numeric_column_keeps_order() {
        let records = hosts();
        let mut table = host_table();
        table.click_header("cpu");
        assert_eq!(table.view(&records).row_ids(), vec!["h1", "h2", "h3"]);
    }

    #[test]
    fn test_sort_leaves_missing_values_in_place() {
        let records = hosts();
        let mut table = host_table();
        table.set_sort("osName", SortDirection::Asc);
        // h2 has no osName and stays in the middle slot
        assert_eq!(table.view(&records).row_ids(), vec!["h3", "h2", "h1"]);
    }

    #[test]
    fn test_sort_is_idempotent_and_reversible() {
        let records: Vec<Value> = ["delta", "Alpha", "charlie", "bravo", "Echo"]
            .iter()
            .enumerate()
            .map(|(i, name)| json!({"id": i.to_string(), "name": name}))
            .collect();

        let mut rows: Vec<&Value> = records.iter().collect();
        sort_records(&mut rows, "name", SortDirection::Asc);
        let once: Vec<&str> = rows.iter().map(|&r| r.id()).collect();
        sort_records(&mut rows, "name", SortDirection::Asc);
        let twice: Vec<&str> = rows.iter().map(|&r| r.id()).collect();
        assert_eq!(once, twice);
        assert_eq!(once, vec!["1", "3", "2", "0", "4"]);

        sort_records(&mut rows, "name", SortDirection::Desc);
        let mut reversed: Vec<&str> = rows.iter().map(|&r| r.id()).collect();
        reversed.reverse();
        assert_eq!(once, reversed);
    }

    #[test]
    fn test_locale_compare() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("web-prod-01", "web-prod-01"), Ordering::Equal);
        assert_eq!(locale_compare("web", "web-prod"), Ordering::Less);
    }

    #[test]
    fn test_row_click_links_visible_rows() {
        let records = hosts();
        let mut table = host_table().on_row_click(|r: &Value| RowLink::new("hosts", r.id()));
        table.set_search("web");
        table.click_header("hostname");

        let view = table.view(&records);
        assert_eq!(view.search, "web");
        let TableBody::Rows { rows } = view.body else {
            panic!("expected rows");
        };
        let links: Vec<_> = rows.into_iter().filter_map(|r| r.link).collect();
        assert_eq!(links, vec![RowLink::new("hosts", "h1"), RowLink::new("hosts", "h2")]);
    }

    #[test]
    fn test_rows_without_handler_have_no_link() {
        let records = hosts();
        let TableBody::Rows { rows } = host_table().view(&records).body else {
            panic!("expected rows");
        };
        assert!(rows.iter().all(|r| r.link.is_none()));
    }

    #[test]
    fn test_header_view_marks_active_sort() {
        let records = hosts();
        let mut table = host_table();
        table.click_header("hostname");
        let view = table.view(&records);
        assert_eq!(view.columns[0].sort, Some(SortDirection::Asc));
        assert_eq!(view.columns[1].sort, None);
    }
}
