use sea_orm::{DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, Select};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// Per-resource page sizing, mirroring the listing defaults of the API.
#[derive(Clone, Copy, Debug)]
pub struct PageDefaults {
    pub size: u64,
    pub max: u64,
}

pub const MOVIES: PageDefaults = PageDefaults { size: 10, max: 100 };
pub const REVIEWS: PageDefaults = PageDefaults { size: 5, max: 50 };
pub const COLLECTIONS: PageDefaults = PageDefaults { size: 5, max: 50 };
pub const DEFAULT: PageDefaults = PageDefaults { size: 20, max: 100 };

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub page: u64,
    pub pages: u64,
    pub results: Vec<T>,
}

pub async fn paginate<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    query: &PageQuery,
    defaults: PageDefaults,
) -> AppResult<Page<E::Model>>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync + 'static,
{
    let size = query.page_size.unwrap_or(defaults.size).clamp(1, defaults.max);
    let page = query.page.unwrap_or(1).max(1);

    let paginator = select.paginate(db, size);
    let totals = paginator.num_items_and_pages().await?;
    let results = paginator.fetch_page(page - 1).await?;

    Ok(Page {
        count: totals.number_of_items,
        page,
        pages: totals.number_of_pages,
        results,
    })
}
