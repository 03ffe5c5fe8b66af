//! Upstream lookup payloads and their mapping onto archive updates

use std::collections::HashMap;

use pacsocial_store::{Enrichment, EnrichmentUpdate};
use serde::Deserialize;

/// Body of a mapped bulk lookup: `{"id": {"<tweet_id>": tweet-or-null}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub id: HashMap<String, Option<UpstreamTweet>>,
}

/// The fields of an upstream tweet the archive keeps
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamTweet {
    pub retweeted_status: Option<RetweetedStatus>,
    #[serde(default)]
    pub retweet_count: i64,
    #[serde(default)]
    pub favorite_count: i64,
    pub source: Option<String>,
    pub in_reply_to_user_id: Option<i64>,
    pub in_reply_to_status_id: Option<i64>,
    pub in_reply_to_screen_name: Option<String>,
    pub coordinates: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetweetedStatus {
    pub id: i64,
    pub user: UpstreamUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamUser {
    pub id: i64,
}

impl UpstreamTweet {
    pub fn into_enrichment(self) -> Enrichment {
        let (retweet_user_id, retweet_status_id) = match &self.retweeted_status {
            Some(rt) => (Some(rt.user.id), Some(rt.id)),
            None => (None, None),
        };

        Enrichment {
            is_retweet: self.retweeted_status.is_some(),
            retweet_user_id,
            retweet_status_id,
            retweet_count: Some(self.retweet_count),
            favorites_count: Some(self.favorite_count),
            in_reply_to_user_id: self.in_reply_to_user_id,
            in_reply_to_status_id: self.in_reply_to_status_id,
            in_reply_to_screen_name: self.in_reply_to_screen_name,
            coordinates: self.coordinates.map(|c| c.to_string()),
            source: self.source,
        }
    }
}

impl LookupResponse {
    /// One update per requested id; ids the response omits or nulls are deleted
    pub fn into_updates(mut self, requested: &[i64]) -> Vec<EnrichmentUpdate> {
        requested
            .iter()
            .map(|&tweet_id| match self.id.remove(&tweet_id.to_string()).flatten() {
                Some(tweet) => EnrichmentUpdate::Enriched {
                    tweet_id,
                    fields: tweet.into_enrichment(),
                },
                None => EnrichmentUpdate::Deleted { tweet_id },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updates_from_lookup() {
        let body = r#"{"id": {
            "1": {"retweet_count": 4, "favorite_count": 2, "source": "web",
                  "retweeted_status": {"id": 77, "user": {"id": 9}},
                  "coordinates": {"type": "Point", "coordinates": [1.5, 2.0]}},
            "2": null,
            "3": {"in_reply_to_user_id": 5, "in_reply_to_status_id": 6,
                  "in_reply_to_screen_name": "pac", "coordinates": null}
        }}"#;
        let response: LookupResponse = serde_json::from_str(body).unwrap();
        let updates = response.into_updates(&[1, 2, 3, 4]);

        let EnrichmentUpdate::Enriched { tweet_id: 1, fields } = &updates[0] else {
            panic!("expected enrichment for 1, got {:?}", updates[0]);
        };
        assert!(fields.is_retweet);
        assert_eq!(fields.retweet_user_id, Some(9));
        assert_eq!(fields.retweet_status_id, Some(77));
        assert_eq!(fields.favorites_count, Some(2));
        assert_eq!(
            fields.coordinates.as_deref(),
            Some(r#"{"coordinates":[1.5,2.0],"type":"Point"}"#)
        );

        assert_eq!(updates[1], EnrichmentUpdate::Deleted { tweet_id: 2 });

        let EnrichmentUpdate::Enriched { fields, .. } = &updates[2] else {
            panic!("expected enrichment for 3");
        };
        assert!(!fields.is_retweet);
        assert_eq!(fields.in_reply_to_screen_name.as_deref(), Some("pac"));
        assert_eq!(fields.favorites_count, Some(0));
        assert_eq!(fields.coordinates, None);

        // Missing from the map entirely
        assert_eq!(updates[3], EnrichmentUpdate::Deleted { tweet_id: 4 });
    }
}
