use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSortField {
    CreatedAt,
    TotalReplies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Ordering of a top-level comment listing. Only ever built from the closed
/// set of fields above, so [`CommentSort::to_sql`] never sees client text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSort {
    pub field: CommentSortField,
    pub order: SortOrder,
}

impl CommentSort {
    pub fn parse(field: &str, order: &str) -> Result<Self, String> {
        let field = match field.trim() {
            "created_at" | "createdAt" => CommentSortField::CreatedAt,
            "total_replies" | "totalReplies" => CommentSortField::TotalReplies,
            _ => {
                return Err(
                    "invalid sort_by value: expected one of created_at, total_replies".to_string(),
                );
            }
        };

        let order = match order.trim().to_ascii_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            _ => return Err("invalid sort_order value: expected asc or desc".to_string()),
        };

        Ok(Self { field, order })
    }

    /// `ORDER BY` fragment for a query over `comments c`. Ties are left to the caller.
    pub fn to_sql(&self) -> String {
        let column = match self.field {
            CommentSortField::CreatedAt => "c.created_at",
            CommentSortField::TotalReplies => {
                "(SELECT COUNT(*) FROM comments r WHERE r.parent_comment_id = c.id)"
            }
        };

        let direction = match self.order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };

        format!("{column} {direction}")
    }
}

impl Default for CommentSort {
    fn default() -> Self {
        Self {
            field: CommentSortField::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Page(i32);

impl Page {
    pub fn parse(value: i32) -> Result<Self, String> {
        if value <= 0 {
            return Err("page must be greater than zero".to_string());
        }

        if value > 1_000_000 {
            return Err("page must be a maximum of 1 million".to_string());
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PageSize(i32);

impl PageSize {
    pub fn parse(value: i32) -> Result<Self, String> {
        if value <= 0 {
            return Err("page_size must be greater than zero".to_string());
        }

        if value > 100 {
            return Err("page_size must be a maximum of 100".to_string());
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: Page,
    pub page_size: PageSize,
}

impl Pagination {
    pub fn parse(page: i32, page_size: i32) -> Result<Self, String> {
        Ok(Self {
            page: Page::parse(page)?,
            page_size: PageSize::parse(page_size)?,
        })
    }

    pub fn offset(&self) -> i64 {
        (self.page.value() as i64 - 1) * self.page_size.value() as i64
    }

    pub fn limit(&self) -> i64 {
        self.page_size.value() as i64
    }
}

#[derive(Deserialize, Debug)]
pub struct ListCommentsQuery {
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
}

fn default_sort_by() -> String {
    "created_at".to_string()
}

fn default_sort_order() -> String {
    "desc".to_string()
}

#[derive(Deserialize, Debug)]
pub struct ExpandCommentsQuery {
    #[serde(default = "default_page")]
    pub page: i32,
    #[serde(default = "default_page_size")]
    pub page_size: i32,
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Metadata {
    pub current_page: i32,
    pub page_size: i32,
    pub first_page: i32,
    pub last_page: i64,
    pub total_records: i64,
}

impl Metadata {
    pub fn calculate(total_records: i64, pagination: &Pagination) -> Self {
        let page_size = pagination.page_size.value();
        let per_page = page_size as i64;
        let last_page = if total_records <= 0 {
            1
        } else {
            // ceil without going through floats
            (total_records - 1) / per_page + 1
        };

        Self {
            current_page: pagination.page.value(),
            page_size,
            first_page: 1,
            last_page,
            total_records,
        }
    }
}
