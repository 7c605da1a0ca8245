// Run with: cargo fuzz run fuzz_comment_query
// Sort and pagination parameters come straight from the query string.
#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use threadhub::domain::{CommentSort, Pagination};

#[derive(Arbitrary, Debug)]
struct QueryInput {
    sort_by: String,
    sort_order: String,
    page: i32,
    page_size: i32,
}

fuzz_target!(|input: QueryInput| {
    if let Ok(sort) = CommentSort::parse(&input.sort_by, &input.sort_order) {
        let sql = sort.to_sql();
        // only the two known orderings ever reach ORDER BY
        assert!(sql.starts_with("c.created_at ") || sql.starts_with("(SELECT COUNT(*)"));
        assert!(sql.ends_with(" ASC") || sql.ends_with(" DESC"));
    }

    if let Ok(pagination) = Pagination::parse(input.page, input.page_size) {
        assert!(pagination.offset() >= 0);
        assert!((1..=100).contains(&pagination.limit()));
    }
});
