use std::cmp;

/// Feeds always serve ten posts per page.
pub const FEED_PAGE_SIZE: i64 = 10;

/// Normalizes a requested 1-based page against the filtered row count.
///
/// Zero or negative pages are treated as page one; a page past the end
/// clamps to the last valid page instead of erroring. An empty result set
/// still has one (empty) page. Returns `(page, total_pages, offset)`.
pub fn page_bounds(page: Option<i64>, total_count: i64) -> (i64, i64, i64) {
  let total_pages = cmp::max(1, (total_count + FEED_PAGE_SIZE - 1) / FEED_PAGE_SIZE);
  let page = cmp::min(cmp::max(page.unwrap_or(1), 1), total_pages);
  let offset = FEED_PAGE_SIZE * (page - 1);
  (page, total_pages, offset)
}
