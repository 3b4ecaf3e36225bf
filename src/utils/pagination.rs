use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json, RequestPartsExt,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

const MAX_PER_PAGE: u32 = 100;

#[derive(Serialize, Debug)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub meta: PaginatedMeta,
}

#[derive(Serialize, Clone, Debug)]
pub struct PaginatedMeta {
    pub total: u32,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u32, page: u32, per_page: u32) -> Paginated<T> {
        Self {
            items,
            meta: PaginatedMeta {
                total,
                page,
                per_page,
            },
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Pagination {
    pub fn limit(&self) -> i64 {
        self.per_page.clamp(1, MAX_PER_PAGE) as i64
    }

    pub fn offset(&self) -> i64 {
        (self.page.max(1) as i64 - 1) * self.limit()
    }

    pub fn paginate<T>(&self, items: Vec<T>, total: i64) -> Paginated<T> {
        Paginated::new(
            items,
            total.max(0) as u32,
            self.page.max(1),
            self.limit() as u32,
        )
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    10
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Pagination {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extract::<Query<Pagination>>().await {
            Ok(Query(pagination)) => Ok(pagination),
            _ => Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid pagination options"})),
            )
                .into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_starts_at_zero_for_first_page() {
        let pagination = Pagination {
            page: 1,
            per_page: 20,
        };
        assert_eq!(pagination.offset(), 0);
        assert_eq!(pagination.limit(), 20);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let pagination = Pagination {
            page: 0,
            per_page: 1000,
        };
        assert_eq!(pagination.limit(), 100);
        assert_eq!(pagination.offset(), 0);

        let pagination = Pagination {
            page: 3,
            per_page: 0,
        };
        assert_eq!(pagination.limit(), 1);
        assert_eq!(pagination.offset(), 2);
    }

    #[test]
    fn paginate_reports_meta() {
        let pagination = Pagination {
            page: 2,
            per_page: 2,
        };
        let page = pagination.paginate(vec!["c", "d"], 5);
        assert_eq!(page.meta.total, 5);
        assert_eq!(page.meta.page, 2);
        assert_eq!(page.meta.per_page, 2);
        assert_eq!(page.items, vec!["c", "d"]);
    }
}
