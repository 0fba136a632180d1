//! Tag enumeration, ordering, and neighbor linking.

use chrono::{DateTime, Utc};
use regex_lite::Regex;
use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TagError;
use crate::git::runner::GitRunner;

/// Field delimiter requested from `for-each-ref --format`. Low collision
/// chance with anything that appears in a real tag subject.
const SEPARATOR: &str = "@@__CHGLOG__@@";

/// Date layout produced by git's default date format,
/// e.g. `Fri Feb 2 10:00:40 2018 +0000`.
const DATE_LAYOUT: &str = "%a %b %e %H:%M:%S %Y %z";

/// Sort order for the returned tag list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Descending semantic-version precedence. Every surviving tag name
    /// must parse as semver (a leading `v` is tolerated), so repositories
    /// carrying non-version tags need a filter pattern in this mode.
    #[default]
    Version,
    /// Descending by tag date, most recent first. Stable for equal dates.
    Date,
}

/// A git tag with links to its neighbors in sort order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub subject: String,
    pub date: DateTime<Utc>,
    /// The entry immediately before this one in the sorted list (newer).
    pub next: Option<RelateTag>,
    /// The entry immediately after this one in the sorted list (older).
    pub previous: Option<RelateTag>,
}

/// Detached copy of a neighboring tag's identity.
///
/// Deliberately not a full [`Tag`]: neighbors carry name/subject/date only,
/// so the previous/next chain cannot grow without bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelateTag {
    pub name: String,
    pub subject: String,
    pub date: DateTime<Utc>,
}

impl From<&Tag> for RelateTag {
    fn from(tag: &Tag) -> Self {
        Self {
            name: tag.name.clone(),
            subject: tag.subject.clone(),
            date: tag.date,
        }
    }
}

/// Reads tags through a [`GitRunner`] and produces the filtered, ordered,
/// cross-linked list a changelog generator iterates over.
pub struct TagReader<R> {
    runner: R,
    filter: Option<Regex>,
    order: SortOrder,
}

impl<R: GitRunner> TagReader<R> {
    /// Create a reader.
    ///
    /// `filter` is a regex over tag names; `None` or an empty pattern keeps
    /// every tag. An invalid pattern fails here rather than at read time.
    pub fn new(runner: R, filter: Option<&str>, order: SortOrder) -> Result<Self, TagError> {
        let filter = match filter {
            Some(pattern) if !pattern.is_empty() => Some(Regex::new(pattern).map_err(
                |source| TagError::InvalidFilter {
                    pattern: pattern.to_string(),
                    source,
                },
            )?),
            _ => None,
        };

        Ok(Self {
            runner,
            filter,
            order,
        })
    }

    /// Read every tag under `refs/tags`, filter, sort, and link neighbors.
    ///
    /// Any failure (git invocation, date parsing, version parsing in
    /// version order) aborts the whole read; no partial list is returned.
    pub fn read_all(&self) -> Result<Vec<Tag>, TagError> {
        let format = format!(
            "%(refname){SEPARATOR}%(subject){SEPARATOR}%(taggerdate){SEPARATOR}%(authordate)"
        );
        let out = self
            .runner
            .exec("for-each-ref", &["--format", &format, "refs/tags"])
            .map_err(TagError::Command)?;

        let mut tags = Vec::new();

        for line in out.lines() {
            let fields: Vec<&str> = line.split(SEPARATOR).collect();
            if fields.len() != 4 {
                // Malformed or empty line; not worth failing the read.
                continue;
            }

            let name = fields[0].strip_prefix("refs/tags/").unwrap_or(fields[0]);
            let subject = fields[1].trim();
            // Lightweight tags have no taggerdate; fall back to the
            // underlying commit's authordate.
            let date = parse_date(fields[2]).or_else(|_| parse_date(fields[3]))?;

            if let Some(re) = &self.filter {
                if !re.is_match(name) {
                    continue;
                }
            }

            tags.push(Tag {
                name: name.to_string(),
                subject: subject.to_string(),
                date,
                next: None,
                previous: None,
            });
        }

        match self.order {
            SortOrder::Date => sort_by_date(&mut tags),
            SortOrder::Version => sort_by_version(&mut tags)?,
        }

        link_neighbors(&mut tags);

        debug!(count = tags.len(), order = ?self.order, "Read git tags");

        Ok(tags)
    }
}

fn parse_date(value: &str) -> Result<DateTime<Utc>, TagError> {
    DateTime::parse_from_str(value, DATE_LAYOUT)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|source| TagError::DateParse {
            value: value.to_string(),
            source,
        })
}

/// Sort most recent first. `sort_by` is stable, so tags sharing a date keep
/// their original relative order.
fn sort_by_date(tags: &mut [Tag]) {
    tags.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Sort by descending semver precedence, pre-releases below their release.
/// Fails on the first tag name that is not a valid version.
fn sort_by_version(tags: &mut Vec<Tag>) -> Result<(), TagError> {
    let mut keyed = tags
        .drain(..)
        .map(|tag| parse_version(&tag.name).map(|version| (version, tag)))
        .collect::<Result<Vec<_>, _>>()?;

    keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
    tags.extend(keyed.into_iter().map(|(_, tag)| tag));

    Ok(())
}

/// Parse a tag name as a semantic version.
/// Handles both "v1.2.3" and "1.2.3" formats.
fn parse_version(name: &str) -> Result<Version, TagError> {
    let version_str = name.strip_prefix('v').unwrap_or(name);
    Version::parse(version_str).map_err(|source| TagError::InvalidVersion {
        name: name.to_string(),
        source,
    })
}

/// Give each tag detached copies of its sorted neighbors: `next` points at
/// the entry before it, `previous` at the entry after it. The first entry
/// has no `next`, the last no `previous`.
fn link_neighbors(tags: &mut [Tag]) {
    for i in 0..tags.len() {
        let next = (i > 0).then(|| RelateTag::from(&tags[i - 1]));
        let previous = (i + 1 < tags.len()).then(|| RelateTag::from(&tags[i + 1]));

        tags[i].next = next;
        tags[i].previous = previous;
    }
}
