//! Offset/length pagination shared by every central-manager list call.

use crate::error::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 40;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListMetadata {
    pub total_matches: Option<u64>,
    pub length: Option<u64>,
    pub offset: Option<u64>,
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListPage<T> {
    #[serde(default)]
    pub metadata: ListMetadata,
    #[serde(default = "Vec::new")]
    pub entities: Vec<T>,
}

impl<T> ListPage<T> {
    /// Entities this page accounts for: the reported length, or the number
    /// actually returned when the server omits it.
    fn returned(&self) -> u64 {
        self.metadata
            .length
            .unwrap_or(self.entities.len() as u64)
    }
}

/// All entities gathered by a walk, in server order.
#[derive(Debug, Clone)]
pub struct PagedList<T> {
    pub entities: Vec<T>,
    pub offset: u64,
    pub total: u64,
}

/// Calls `fetch(offset, length)` with an offset growing by `page_size` until
/// the entities fetched reach the total the server reports. The first error
/// aborts the walk.
pub fn fetch_all<T, F>(page_size: u64, mut fetch: F) -> Result<PagedList<T>>
where
    F: FnMut(u64, u64) -> Result<ListPage<T>>,
{
    let page_size = page_size.max(1);
    let mut entities = Vec::new();
    let mut offset = 0u64;
    let mut fetched = 0u64;

    loop {
        let page = fetch(offset, page_size)?;
        let returned = page.returned();
        let total = page.metadata.total_matches.unwrap_or(0);

        tracing::debug!(offset, returned, total, "fetched page");

        fetched += returned;
        offset += page_size;
        entities.extend(page.entities);

        if fetched >= total {
            return Ok(PagedList {
                entities,
                offset,
                total,
            });
        }

        if returned == 0 {
            tracing::warn!(
                fetched,
                total,
                "server returned an empty page before reaching the reported total"
            );
            return Ok(PagedList {
                entities,
                offset,
                total,
            });
        }
    }
}
