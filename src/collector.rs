//! Listing collection and unit flattening
//!
//! The collector issues one paginated listing request per page, then one
//! secondary request per parent to pull its comment thread, and flattens the
//! result into scoring units. Two behaviors here are contracts, not tuning:
//!
//! - a politeness delay runs after every comment fetch, success included, to
//!   respect the remote service's implicit rate limit;
//! - a failed comment fetch never aborts the run — the parent is kept with
//!   zero comments and the failure is logged.

use crate::config::SourceConfig;
use crate::error::{Error, FetchError};
use crate::fetch::FetchClient;
use crate::types::{Post, Unit, UnitKind};
use chrono::Utc;
use serde::Deserialize;
use url::Url;

/// A listing page as returned by the search endpoint
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
    #[serde(default)]
    after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: PostData,
}

/// Raw parent fields; everything is optional on the wire
#[derive(Debug, Deserialize)]
struct PostData {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    selftext: Option<String>,
    #[serde(default)]
    created_utc: Option<f64>,
    #[serde(default)]
    permalink: Option<String>,
}

/// A comment thread response is a two-element array; the second element is a
/// listing of comment records
#[derive(Debug, Deserialize)]
struct CommentListing {
    data: CommentListingData,
}

#[derive(Debug, Deserialize)]
struct CommentListingData {
    #[serde(default)]
    children: Vec<CommentChild>,
}

#[derive(Debug, Deserialize)]
struct CommentChild {
    #[serde(default)]
    data: CommentData,
}

#[derive(Debug, Default, Deserialize)]
struct CommentData {
    #[serde(default)]
    body: Option<String>,
}

/// Collects parent items and their comments from the paginated source
#[derive(Debug)]
pub struct Collector {
    client: FetchClient,
    config: SourceConfig,
    base: Url,
}

impl Collector {
    /// Create a collector over a fetch client
    ///
    /// Fails if the configured base URL does not parse.
    pub fn new(client: FetchClient, config: SourceConfig) -> Result<Self, Error> {
        let base = Url::parse(&config.base_url).map_err(|e| Error::Config {
            message: format!("invalid base URL {:?}: {e}", config.base_url),
            key: Some("base_url".to_string()),
        })?;

        Ok(Self {
            client,
            config,
            base,
        })
    }

    /// Collect parents matching `query`, with comments attached
    ///
    /// Issues one listing request per page (following the `after` cursor up
    /// to `max_pages`) and one comment request per parent. A listing failure
    /// aborts the run; a comment failure only costs that parent its comments.
    /// Parents outside the configured age window are skipped.
    pub async fn collect(&self, query: &str, page_size: usize) -> Result<Vec<Post>, Error> {
        let cutoff = self.cutoff_epoch();
        let listing_url = self
            .base
            .join(&format!("r/{query}/search.json"))
            .map_err(|e| Error::Config {
                message: format!("cannot build listing URL for query {query:?}: {e}"),
                key: Some("base_url".to_string()),
            })?;

        let mut posts = Vec::new();
        let mut after: Option<String> = None;

        for page in 0..self.config.max_pages {
            let mut params = vec![
                ("q", query.to_string()),
                ("restrict_sr", "on".to_string()),
                ("sort", "new".to_string()),
                ("limit", page_size.to_string()),
            ];
            if let Some(cursor) = &after {
                params.push(("after", cursor.clone()));
            }

            let value = self.client.get_json(listing_url.as_str(), &params).await?;
            let listing: Listing = serde_json::from_value(value).map_err(|e| {
                FetchError::UnexpectedShape(format!("listing response: {e}"))
            })?;

            tracing::debug!(
                page,
                children = listing.data.children.len(),
                "listing page fetched"
            );

            for child in listing.data.children {
                if let Some(post) = self.build_post(child.data, cutoff).await {
                    posts.push(post);
                }
            }

            after = listing.data.after;
            if after.is_none() {
                break;
            }
        }

        tracing::info!(posts = posts.len(), query, "collection finished");
        Ok(posts)
    }

    /// Resolve one parent: apply the age window, fetch its comments, and run
    /// the politeness delay
    async fn build_post(&self, data: PostData, cutoff: Option<i64>) -> Option<Post> {
        let created_utc = data.created_utc.map(|t| t as i64);

        if let Some(cutoff) = cutoff {
            // An absent timestamp counts as too old while the window is active
            if created_utc.unwrap_or(0) < cutoff {
                return None;
            }
        }

        let mut comments = Vec::new();
        if let Some(permalink) = data.permalink.as_deref() {
            let outcome = self.fetch_comments(permalink).await;
            // The delay is a hard requirement and runs regardless of outcome
            tokio::time::sleep(self.config.politeness_delay).await;

            match outcome {
                Ok(fetched) => comments = fetched,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        permalink,
                        "comment fetch failed, keeping post without comments"
                    );
                }
            }
        }

        Some(Post {
            title: data.title.unwrap_or_default(),
            selftext: data.selftext.unwrap_or_default(),
            created_utc,
            permalink: data.permalink,
            comments,
        })
    }

    /// Fetch the comment bodies behind a permalink
    async fn fetch_comments(&self, permalink: &str) -> Result<Vec<String>, Error> {
        let mut url = self.base.join(permalink).map_err(|e| Error::Config {
            message: format!("cannot build comment URL for {permalink:?}: {e}"),
            key: Some("base_url".to_string()),
        })?;
        let json_path = format!("{}.json", url.path());
        url.set_path(&json_path);

        let value = self.client.get_json(url.as_str(), &[]).await?;
        parse_comment_thread(value).map_err(Error::from)
    }

    fn cutoff_epoch(&self) -> Option<i64> {
        self.config
            .max_age_days
            .map(|days| (Utc::now() - chrono::Duration::days(i64::from(days))).timestamp())
    }
}

/// Extract comment bodies from a thread response
///
/// The thread is a two-element array whose second element carries the
/// comment records; anything else is a shape mismatch.
fn parse_comment_thread(value: serde_json::Value) -> Result<Vec<String>, FetchError> {
    let second = value
        .as_array()
        .and_then(|elements| elements.get(1))
        .ok_or_else(|| {
            FetchError::UnexpectedShape(
                "comment response is not a two-element array".to_string(),
            )
        })?;

    let listing: CommentListing = serde_json::from_value(second.clone())
        .map_err(|e| FetchError::UnexpectedShape(format!("comment listing: {e}")))?;

    Ok(listing
        .data
        .children
        .into_iter()
        .filter_map(|child| child.data.body)
        .filter(|body| !body.is_empty())
        .collect())
}

/// Flatten collected posts into scoring units
///
/// One unit per non-empty (after trimming) title, one per non-empty body,
/// one per non-empty comment, in post order then field order. A post whose
/// fields are all empty contributes nothing — that is not an error.
pub fn flatten_units(posts: &[Post]) -> Vec<Unit> {
    let mut units = Vec::new();

    for (parent_index, post) in posts.iter().enumerate() {
        let mut push = |kind: UnitKind, text: &str| {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                units.push(Unit {
                    parent_index,
                    parent_title: post.title.clone(),
                    created_utc: post.created_utc,
                    kind,
                    text: trimmed.to_string(),
                });
            }
        };

        push(UnitKind::Title, &post.title);
        push(UnitKind::Body, &post.selftext);
        for comment in &post.comments {
            push(UnitKind::Comment, comment);
        }
    }

    units
}
