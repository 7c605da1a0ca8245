use std::cmp::Reverse;
use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{CommentRecord, ReplyCount};

/// How many of a comment's newest direct replies are inlined in listings.
pub const PREVIEW_SIZE: usize = 2;

/// A comment shaped for display: its own fields, a bounded preview of its
/// newest direct replies (bare records, no further nesting) and the number of
/// direct replies it has in total.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DisplayComment {
    #[serde(flatten)]
    pub comment: CommentRecord,
    pub replies: Vec<CommentRecord>,
    pub total_replies: i64,
}

/// Attaches reply previews and reply counts to `parents`, keeping their order.
///
/// `previews` may hold any number of rows per parent in any order; each
/// parent keeps its [`PREVIEW_SIZE`] newest (`created_at` desc, `id` desc).
/// Rows whose parent is not in `parents` are ignored. A parent without a
/// count row has zero replies.
pub fn shape_comments(
    parents: Vec<CommentRecord>,
    previews: Vec<CommentRecord>,
    reply_counts: Vec<ReplyCount>,
) -> Vec<DisplayComment> {
    let mut previews_by_parent: HashMap<i64, Vec<CommentRecord>> = HashMap::new();
    for reply in previews {
        if let Some(parent_id) = reply.parent_comment_id {
            previews_by_parent.entry(parent_id).or_default().push(reply);
        }
    }

    let counts: HashMap<i64, i64> = reply_counts
        .into_iter()
        .map(|c| (c.parent_comment_id, c.reply_count))
        .collect();

    parents
        .into_iter()
        .map(|comment| {
            let mut replies = previews_by_parent.remove(&comment.id).unwrap_or_default();
            replies.sort_by_key(|r| Reverse((r.created_at, r.id)));
            replies.truncate(PREVIEW_SIZE);

            DisplayComment {
                total_replies: counts.get(&comment.id).copied().unwrap_or(0),
                replies,
                comment,
            }
        })
        .collect()
}
