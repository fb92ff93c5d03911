//! Generic resource operations over the document store.

use crate::catalog::ResolvedResource;
use crate::error::AppError;
use crate::ident::resource_id;
use crate::query::{self, ExportFormat, Pagination, SortDirection};
use crate::repo::Repository;
use crate::service::validation::PayloadValidator;
use crate::store::{Document, DocumentStore};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};

/// Top-level keys the service owns; stripped from every incoming payload.
const MANAGED_KEYS: [&str; 3] = ["id", "created", "updated"];

/// Query options shared by list, search, and export.
#[derive(Clone, Debug, Default)]
pub struct ListQuery {
    pub page: usize,
    pub limit: usize,
    pub sort_by: Option<String>,
    pub direction: SortDirection,
    pub term: Option<String>,
    pub filters: Vec<(String, String)>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl ListQuery {
    pub const DEFAULT_LIMIT: usize = 10;
    pub const MAX_LIMIT: usize = 1000;

    /// Parse raw query params. Reserved keys drive paging, sort, search, and
    /// date bounds; leftover keys become per-field filters when the resource
    /// declares them filterable. Malformed numbers and dates fall back to
    /// defaults rather than erroring.
    pub fn from_params(resource: &ResolvedResource, params: &HashMap<String, String>) -> Self {
        let mut query =
            ListQuery { page: 1, limit: Self::DEFAULT_LIMIT, ..ListQuery::default() };
        for (key, value) in params {
            match key.as_str() {
                "page" => {
                    if let Ok(n) = value.parse::<usize>() {
                        query.page = n;
                    }
                }
                "limit" => {
                    if let Ok(n) = value.parse::<usize>() {
                        query.limit = n.min(Self::MAX_LIMIT);
                    }
                }
                "sortBy" => query.sort_by = Some(value.clone()),
                "sortDirection" => query.direction = SortDirection::parse(value),
                "search" | "q" => {
                    if !value.trim().is_empty() {
                        query.term = Some(value.clone());
                    }
                }
                "createdFrom" | "startDate" => query.created_from = parse_bound(value),
                "createdTo" | "endDate" => query.created_to = parse_bound(value),
                "format" | "fields" => {}
                _ => {
                    if resource.filter_fields.iter().any(|f| f == key) {
                        query.filters.push((key.clone(), value.clone()));
                    }
                }
            }
        }
        query
    }
}

/// Lenient date bound: RFC 3339 or a bare `YYYY-MM-DD` (taken as midnight
/// UTC). Anything else is ignored.
fn parse_bound(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let date: NaiveDate = raw.parse().ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// One page of list results.
#[derive(Clone, Debug, Serialize)]
pub struct Page {
    pub data: Vec<Document>,
    pub pagination: Pagination,
}

/// Rendered export ready to download.
#[derive(Clone, Debug)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

/// Recognized bulk operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulkOperation {
    Create,
    Update,
    Delete,
}

impl std::str::FromStr for BulkOperation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "create" => Ok(BulkOperation::Create),
            "update" => Ok(BulkOperation::Update),
            "delete" => Ok(BulkOperation::Delete),
            _ => Err(AppError::UnsupportedOperation(s.to_string())),
        }
    }
}

/// Per-item failure inside a bulk call.
#[derive(Clone, Debug, Serialize)]
pub struct BulkError {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub code: String,
    pub message: String,
}

/// Outcome of a bulk call: per-item successes and failures. One bad item
/// never aborts the batch.
#[derive(Clone, Debug, Serialize)]
pub struct BulkOutcome {
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub errors: Vec<BulkError>,
    pub data: Vec<Value>,
}

/// Aggregate counts for one resource collection.
#[derive(Clone, Debug, Serialize)]
pub struct StatsSummary {
    pub total: usize,
    pub groups: BTreeMap<String, BTreeMap<String, usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive: Option<usize>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub distinct: BTreeMap<String, usize>,
}

pub struct ResourceService;

impl ResourceService {
    /// Validate, stamp, and write a new record. Returns the stored document
    /// with id, audit blocks, and the `active` default applied.
    pub async fn create(
        store: &dyn DocumentStore,
        resource: &ResolvedResource,
        mut payload: Document,
        actor: &str,
    ) -> Result<Document, AppError> {
        for key in MANAGED_KEYS {
            payload.remove(key);
        }
        PayloadValidator::validate(&payload, &resource.fields).map_err(AppError::Validation)?;

        let id = resource_id(&resource.id_prefix);
        let audit = audit_entry(actor, &now_iso());
        payload.insert("id".into(), Value::String(id.clone()));
        payload.insert("created".into(), audit.clone());
        payload.insert("updated".into(), audit);
        if resource.has_active && !payload.contains_key("active") {
            payload.insert("active".into(), Value::Bool(true));
        }

        Repository::new(store, &resource.collection).set(&id, payload.clone()).await?;
        tracing::info!(resource = %resource.path_segment, id = %id, "record created");
        Ok(payload)
    }

    /// Fetch one record. Absent records are `None`; route layers turn that
    /// into a 404.
    pub async fn get_by_id(
        store: &dyn DocumentStore,
        resource: &ResolvedResource,
        id: &str,
    ) -> Result<Option<Document>, AppError> {
        Ok(Repository::new(store, &resource.collection).get(id).await?)
    }

    /// Merge-update one record and return the re-fetched result. `created`
    /// is never touched; `updated` is restamped on every call.
    pub async fn update(
        store: &dyn DocumentStore,
        resource: &ResolvedResource,
        id: &str,
        mut payload: Document,
        actor: &str,
    ) -> Result<Document, AppError> {
        for key in MANAGED_KEYS {
            payload.remove(key);
        }
        PayloadValidator::validate_partial(&payload, &resource.fields)
            .map_err(AppError::Validation)?;
        payload.insert("updated".into(), audit_entry(actor, &now_iso()));

        let repo = Repository::new(store, &resource.collection);
        if !repo.merge(id, payload).await? {
            return Err(not_found(resource, id));
        }
        let updated = repo.get(id).await?.ok_or_else(|| not_found(resource, id))?;
        tracing::info!(resource = %resource.path_segment, id, "record updated");
        Ok(updated)
    }

    /// Hard delete. Missing ids fail with not-found, matching update.
    pub async fn delete(
        store: &dyn DocumentStore,
        resource: &ResolvedResource,
        id: &str,
    ) -> Result<(), AppError> {
        if !Repository::new(store, &resource.collection).delete(id).await? {
            return Err(not_found(resource, id));
        }
        tracing::info!(resource = %resource.path_segment, id, "record deleted");
        Ok(())
    }

    /// List with per-field filters, optional term over the configured search
    /// fields, sort, and pagination.
    ///
    /// The whole collection is fetched and shaped in memory, so cost scales
    /// with collection size rather than page size. A query-capable backend
    /// would push the [`ListQuery`] down through [`DocumentStore`] instead.
    pub async fn list(
        store: &dyn DocumentStore,
        resource: &ResolvedResource,
        query: &ListQuery,
    ) -> Result<Page, AppError> {
        let items =
            Self::filtered(store, resource, query, &resource.search_fields, false).await?;
        let (data, pagination) = query::paginate(&items, query.page, query.limit);
        Ok(Page { data, pagination })
    }

    /// Free-text search: like list, but the term also covers the audit actor
    /// paths and the created-date range bounds apply.
    pub async fn search(
        store: &dyn DocumentStore,
        resource: &ResolvedResource,
        query: &ListQuery,
    ) -> Result<Page, AppError> {
        let fields = resource.wide_search_fields();
        let items = Self::filtered(store, resource, query, &fields, true).await?;
        let (data, pagination) = query::paginate(&items, query.page, query.limit);
        Ok(Page { data, pagination })
    }

    /// Render the whole filtered set for download. Pagination params are
    /// deliberately not applied: a partial export is worse than a slow one.
    pub async fn export(
        store: &dyn DocumentStore,
        resource: &ResolvedResource,
        format: ExportFormat,
        query: &ListQuery,
    ) -> Result<ExportFile, AppError> {
        let items =
            Self::filtered(store, resource, query, &resource.search_fields, false).await?;
        let body = query::export(&items, format, &resource.export_fields);
        tracing::info!(
            resource = %resource.path_segment,
            records = items.len(),
            format = format.extension(),
            "export rendered"
        );
        Ok(ExportFile {
            filename: format!("{}-export.{}", resource.path_segment, format.extension()),
            content_type: format.content_type(),
            body,
        })
    }

    /// Apply one bulk operation item-by-item, recording per-item failures.
    pub async fn bulk(
        store: &dyn DocumentStore,
        resource: &ResolvedResource,
        operation: BulkOperation,
        items: Vec<Value>,
        actor: &str,
    ) -> Result<BulkOutcome, AppError> {
        const BULK_LIMIT: usize = 100;
        if items.len() > BULK_LIMIT {
            return Err(AppError::BadRequest(format!("bulk limited to {BULK_LIMIT} items")));
        }
        let mut outcome = BulkOutcome {
            processed: items.len(),
            successful: 0,
            failed: 0,
            errors: Vec::new(),
            data: Vec::new(),
        };
        for (index, item) in items.into_iter().enumerate() {
            match Self::apply_bulk_item(store, resource, operation, item, actor).await {
                Ok(value) => {
                    outcome.successful += 1;
                    outcome.data.push(value);
                }
                Err((id, error)) => {
                    outcome.failed += 1;
                    outcome.errors.push(BulkError {
                        index,
                        id,
                        code: error.code().to_string(),
                        message: error.to_string(),
                    });
                }
            }
        }
        tracing::info!(
            resource = %resource.path_segment,
            processed = outcome.processed,
            failed = outcome.failed,
            "bulk finished"
        );
        Ok(outcome)
    }

    async fn apply_bulk_item(
        store: &dyn DocumentStore,
        resource: &ResolvedResource,
        operation: BulkOperation,
        item: Value,
        actor: &str,
    ) -> Result<Value, (Option<String>, AppError)> {
        match operation {
            BulkOperation::Create => {
                let doc = as_object(item).map_err(|e| (None, e))?;
                let created =
                    Self::create(store, resource, doc, actor).await.map_err(|e| (None, e))?;
                Ok(Value::Object(created))
            }
            BulkOperation::Update => {
                let doc = as_object(item).map_err(|e| (None, e))?;
                let id = doc
                    .get("id")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        (None, AppError::BadRequest("update items must carry an id".into()))
                    })?;
                let updated = Self::update(store, resource, &id, doc, actor)
                    .await
                    .map_err(|e| (Some(id.clone()), e))?;
                Ok(Value::Object(updated))
            }
            BulkOperation::Delete => {
                let id = match item {
                    Value::String(id) => id,
                    Value::Object(ref doc) => doc
                        .get("id")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .ok_or_else(|| {
                            (None, AppError::BadRequest("delete items must carry an id".into()))
                        })?,
                    _ => {
                        return Err((
                            None,
                            AppError::BadRequest(
                                "delete items must be ids or objects with an id".into(),
                            ),
                        ))
                    }
                };
                Self::delete(store, resource, &id).await.map_err(|e| (Some(id.clone()), e))?;
                Ok(json!({ "id": id }))
            }
        }
    }

    /// Collection-wide counts: total, per-field value buckets, and the
    /// active/inactive split for resources that carry the flag.
    pub async fn stats(
        store: &dyn DocumentStore,
        resource: &ResolvedResource,
    ) -> Result<StatsSummary, AppError> {
        let items = Repository::new(store, &resource.collection).list().await?;
        let aggregates = query::aggregate(&items, &resource.stats_fields);
        let (active, inactive) = if resource.has_active {
            let active_count = items
                .iter()
                .filter(|doc| doc.get("active").and_then(Value::as_bool).unwrap_or(false))
                .count();
            (Some(active_count), Some(items.len() - active_count))
        } else {
            (None, None)
        };
        let distinct = aggregates
            .fields
            .iter()
            .map(|(field, counts)| {
                let n = counts.keys().filter(|k| k.as_str() != query::UNSET_BUCKET).count();
                (field.clone(), n)
            })
            .collect();
        Ok(StatsSummary { total: aggregates.total, groups: aggregates.fields, active, inactive, distinct })
    }

    /// Shared fetch-and-narrow pipeline: filters, then term search, then
    /// sort. Date bounds only apply on the search path.
    async fn filtered(
        store: &dyn DocumentStore,
        resource: &ResolvedResource,
        query: &ListQuery,
        search_fields: &[String],
        with_dates: bool,
    ) -> Result<Vec<Document>, AppError> {
        let mut items = Repository::new(store, &resource.collection).list().await?;
        if with_dates {
            items = filter_created_range(items, query.created_from, query.created_to);
        }
        items = query::filter_by_fields(items, &query.filters);
        if let Some(term) = &query.term {
            items = query::search(items, term, search_fields);
        }
        if let Some(field) = &query.sort_by {
            query::sort_by_field(&mut items, field, query.direction);
        }
        Ok(items)
    }
}

pub(crate) fn as_object(value: Value) -> Result<Document, AppError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::BadRequest("payload must be a JSON object".into())),
    }
}

fn not_found(resource: &ResolvedResource, id: &str) -> AppError {
    AppError::NotFound(format!("{}/{}", resource.path_segment, id))
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn audit_entry(actor: &str, when: &str) -> Value {
    json!({ "by": actor, "when": when })
}

/// Keep records whose `created.when` parses and falls inside the inclusive
/// bounds. Records without a parseable stamp drop out when bounds are set.
fn filter_created_range(
    items: Vec<Document>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Vec<Document> {
    if from.is_none() && to.is_none() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| {
            let Some(when) = query::value_at(item, "created.when").and_then(Value::as_str) else {
                return false;
            };
            let Ok(stamp) = DateTime::parse_from_rfc3339(when) else {
                return false;
            };
            let stamp = stamp.with_timezone(&Utc);
            from.map_or(true, |f| stamp >= f) && to.map_or(true, |t| stamp <= t)
        })
        .collect()
}
