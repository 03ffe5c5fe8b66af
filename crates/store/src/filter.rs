//! SQL rendering of compiled search filters and scan bounds

use pacsocial_search::{Match, TweetFilter};
use pacsocial_timeline::ScanBounds;
use sqlx::{QueryBuilder, Sqlite};

/// Append ` AND (<disjunction>)` for a non-empty filter
///
/// Expects the tweets table aliased as `t`.
pub(crate) fn push_tweet_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &TweetFilter) {
    if filter.matches_all() {
        return;
    }

    qb.push(" AND (");
    for (i, m) in filter.any_of.iter().enumerate() {
        if i > 0 {
            qb.push(" OR ");
        }
        match m {
            Match::Entity { kind, text } => {
                qb.push(
                    "EXISTS (SELECT 1 FROM tweet_entities e WHERE e.tweet_id = t.tweet_id AND e.type = ",
                )
                .push_bind(kind.as_str())
                .push(" AND e.text = ")
                .push_bind(text.clone())
                .push(")");
            }
            Match::TextContains(needle) => {
                qb.push("instr(t.text, ")
                    .push_bind(needle.clone())
                    .push(") > 0");
            }
        }
    }
    qb.push(")");
}

/// Append inclusive scan bounds on `column`; open sides add nothing
pub(crate) fn push_scan_bounds(
    qb: &mut QueryBuilder<'_, Sqlite>,
    column: &'static str,
    bounds: &ScanBounds,
) {
    if let Some(min) = bounds.min_id {
        qb.push(format!(" AND {} >= ", column)).push_bind(min);
    }
    if let Some(max) = bounds.max_id {
        qb.push(format!(" AND {} <= ", column)).push_bind(max);
    }
}
