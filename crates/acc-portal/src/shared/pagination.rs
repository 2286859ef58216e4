use serde::Serialize;

use super::validation::{ValidationErrors, Validator};

/// Validated `page`/`limit` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn resolve(
        page: Option<u32>,
        limit: Option<u32>,
        default_limit: u32,
        max_limit: u32,
    ) -> Result<Self, ValidationErrors> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(default_limit);

        let mut validator = Validator::new();
        if page < 1 {
            validator.fail("page", "Page must be at least 1");
        }
        if limit < 1 || limit > max_limit {
            validator.fail("limit", format!("Limit must be between 1 and {max_limit}"));
        }
        validator.finish()?;

        Ok(Self { page, limit })
    }

    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.limit as usize
    }

    /// Cut one page out of an already filtered and ordered list.
    pub fn paginate<T>(&self, items: Vec<T>) -> Paginated<T> {
        let total = items.len();
        let data = items
            .into_iter()
            .skip(self.offset())
            .take(self.limit as usize)
            .collect();
        Paginated {
            data,
            pagination: PageMeta::new(total, *self),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: usize,
}

impl PageMeta {
    fn new(total: usize, request: PageRequest) -> Self {
        let limit = request.limit.max(1) as usize;
        Self {
            total,
            page: request.page,
            limit: request.limit,
            total_pages: total.div_ceil(limit),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> Paginated<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
