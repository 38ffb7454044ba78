use std::collections::HashSet;

use crate::binder::{ClickHouseBinder, ParamBinder};
use crate::compiled::{CompiledQuery, ParamValue, Params};
use crate::compiler::compile_filter;
use crate::query::{Filter, QueryRequest};
use crate::report::SimpleQueryConfig;
use super::order::{output_name, OrderBy};

/// Compile a request against a report using ClickHouse placeholders
pub fn assemble(config: &SimpleQueryConfig, request: &QueryRequest) -> CompiledQuery {
    QueryAssembler::new(config).compile(request)
}

/// Compile a request against a report with a custom binder
pub fn assemble_with<B: ParamBinder>(
    config: &SimpleQueryConfig,
    request: &QueryRequest,
    binder: B,
) -> CompiledQuery {
    QueryAssembler::new(config).with_binder(binder).compile(request)
}

/// Builds SQL for one report
///
/// Holds only borrowed, trusted configuration. Compiling never mutates the
/// assembler, so one instance may serve any number of requests.
#[derive(Debug, Clone)]
pub struct QueryAssembler<'a, B = ClickHouseBinder> {
    config: &'a SimpleQueryConfig,
    allowed_filters: HashSet<&'a str>,
    binder: B,
}

impl<'a> QueryAssembler<'a> {
    pub fn new(config: &'a SimpleQueryConfig) -> Self {
        Self {
            config,
            allowed_filters: config.allowed_filters.iter().map(String::as_str).collect(),
            binder: ClickHouseBinder,
        }
    }
}

impl<'a, B: ParamBinder> QueryAssembler<'a, B> {
    /// Swap the placeholder syntax
    pub fn with_binder<B2: ParamBinder>(self, binder: B2) -> QueryAssembler<'a, B2> {
        QueryAssembler {
            config: self.config,
            allowed_filters: self.allowed_filters,
            binder,
        }
    }

    /// Compile a request into SQL and bound parameters
    ///
    /// Clause order is fixed: SELECT, FROM, WHERE, GROUP BY, ORDER BY, LIMIT,
    /// OFFSET. Filters on fields outside the allow-list are dropped.
    pub fn compile(&self, request: &QueryRequest) -> CompiledQuery {
        let config = self.config;

        // 1. Tenant and window parameters are always bound
        let mut params = Params::new();
        params.insert("projectId".to_string(), ParamValue::String(request.project_id.clone()));
        params.insert("from".to_string(), ParamValue::DateTime(request.from.start()));
        params.insert("to".to_string(), ParamValue::DateTime(request.to.end()));

        let mut clauses = Vec::with_capacity(7);

        // 2. SELECT
        clauses.push(format!("SELECT {}", self.select_list(request).join(", ")));

        // 3. FROM
        clauses.push(format!("FROM {}", config.table));

        // 4. WHERE
        let mut predicates: Vec<String> = config
            .where_clauses
            .iter()
            .map(|p| format!("({})", p))
            .collect();
        predicates.push(format!(
            "{} = {}",
            config.effective_project_field(),
            self.binder.bind_string("projectId")
        ));
        predicates.push(format!(
            "{} >= {}",
            config.effective_time_field(),
            self.binder.bind_datetime("from")
        ));
        predicates.push(format!(
            "{} <= {}",
            config.effective_time_field(),
            self.binder.bind_datetime("to")
        ));
        let authorized = request.filters.iter().filter(|f| self.is_authorized(f));
        for (i, filter) in authorized.enumerate() {
            let fragment = compile_filter(filter, i, &self.binder);
            predicates.push(fragment.clause);
            params.extend(fragment.params);
        }
        clauses.push(format!("WHERE {}", predicates.join(" AND ")));

        // 5. GROUP BY
        let group_by = self.group_by(request);
        if !group_by.is_empty() {
            clauses.push(format!("GROUP BY {}", group_by.join(", ")));
        }

        // 6. ORDER BY
        if let Some(order_by) = self.order_by(request, &group_by) {
            clauses.push(format!("ORDER BY {}", order_by));
        }

        // 7. LIMIT
        if let Some(limit) = request.limit.or(config.limit) {
            clauses.push(format!("LIMIT {}", limit));
        }

        // 8. OFFSET
        if let Some(offset) = request.offset.filter(|o| *o > 0) {
            clauses.push(format!("OFFSET {}", offset));
        }

        let sql = clauses.join("\n");
        tracing::debug!(table = %config.table, sql = %sql, params = params.len(), "compiled report query");

        CompiledQuery::new(sql, params)
    }

    fn is_authorized(&self, filter: &Filter) -> bool {
        let allowed = self.allowed_filters.contains(filter.field.as_str());
        if !allowed {
            tracing::debug!(table = %self.config.table, field = %filter.field, "dropping filter on field outside allow-list");
        }
        allowed
    }

    fn select_list(&self, request: &QueryRequest) -> Vec<String> {
        let config = self.config;
        let mut items = Vec::with_capacity(config.fields.len() + 1);
        if let Some(granularity) = request.granularity {
            items.push(format!(
                "{}({}) AS {}",
                granularity.clickhouse_fn(),
                config.effective_time_field(),
                config.effective_bucket_alias()
            ));
        }
        items.extend(config.fields.iter().cloned());
        if items.is_empty() {
            items.push("*".to_string());
        }
        items
    }

    fn group_by(&self, request: &QueryRequest) -> Vec<String> {
        let config = self.config;
        let mut columns = match &request.group_by {
            Some(requested) if requested.iter().all(|c| config.allows_group_by(c)) => requested.clone(),
            Some(requested) => {
                tracing::debug!(table = %config.table, requested = ?requested, "ignoring group by outside allow-list");
                config.group_by.clone()
            }
            None => config.group_by.clone(),
        };

        if request.granularity.is_some() {
            let alias = config.effective_bucket_alias();
            if !columns.iter().any(|c| c == alias) {
                columns.insert(0, alias.to_string());
            }
        }
        columns
    }

    fn order_by(&self, request: &QueryRequest, group_by: &[String]) -> Option<String> {
        let config = self.config;
        if let Some(raw) = &request.order_by {
            match OrderBy::parse(raw) {
                Some(order) if self.allows_order_by(order.column, request, group_by) => {
                    return Some(order.to_sql());
                }
                _ => {
                    tracing::debug!(table = %config.table, requested = %raw, "ignoring order by outside allow-list");
                }
            }
        }

        config.order_by.clone().or_else(|| {
            request
                .granularity
                .map(|_| config.effective_bucket_alias().to_string())
        })
    }

    fn allows_order_by(&self, column: &str, request: &QueryRequest, group_by: &[String]) -> bool {
        let config = self.config;
        if let Some(allowed) = &config.allowed_order_by {
            return allowed.iter().any(|c| c == column);
        }

        config.fields.iter().any(|f| f == column || output_name(f) == column)
            || group_by.iter().any(|c| c == column)
            || config
                .order_by
                .as_deref()
                .and_then(OrderBy::parse)
                .is_some_and(|o| o.column == column)
            || (request.granularity.is_some() && config.effective_bucket_alias() == column)
    }
}
