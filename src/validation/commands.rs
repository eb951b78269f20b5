use chrono::NaiveDate;
use serde_json::Value;

use super::date::parse_story_date;
use super::payload::{extract_fields, RawPayload};
use crate::database::models::{Category, Region, StoryId, DETAILS_MAX_LEN, HEADLINE_MAX_LEN};
use crate::error::ApiError;
use crate::filter::{StoryQuery, Wildcard};

pub const LOGIN_FIELDS_REQUIRED: &str = "This resource expects valid 'username' and 'password' parameters";
pub const INVALID_DATE: &str = "Resource expects valid date in form day/month/year";
pub const FUTURE_DATE: &str = "Search data cannot be later than the current date";
pub const MISSING_STORY_KEY: &str = "Resource must accept a story key to delete";
pub const NON_INTEGER_STORY_KEY: &str = "Story key must be in Integer format";

fn invalid_category(field: &str, value: &str) -> ApiError {
    ApiError::validation(field, format!("Category: {} is not a valid database field", value))
}

fn invalid_region(field: &str, value: &str) -> ApiError {
    ApiError::validation(field, format!("Region: {} is not a valid database field", value))
}

fn normalize_code(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Form-encoded `username` / `password` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl LoginCommand {
    /// Parse an `application/x-www-form-urlencoded` body. Repeated keys keep
    /// the last value; blank values count as missing.
    pub fn parse_form(body: &[u8]) -> Result<Self, ApiError> {
        let mut username = None;
        let mut password = None;
        for (key, value) in url::form_urlencoded::parse(body) {
            match &*key {
                "username" => username = Some(value.trim().to_string()),
                "password" => password = Some(value.trim().to_string()),
                _ => {}
            }
        }

        let username = username
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ApiError::validation("username", LOGIN_FIELDS_REQUIRED))?;
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ApiError::validation("password", LOGIN_FIELDS_REQUIRED))?;

        Ok(Self { username, password })
    }
}

/// Validated PublishStory payload. The author is never part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishStoryCommand {
    pub headline: String,
    pub category: Category,
    pub region: Region,
    pub details: String,
}

impl PublishStoryCommand {
    pub const FIELDS: [&'static str; 4] = ["headline", "category", "region", "details"];

    /// Checks run in a fixed order and stop at the first failure:
    /// fields present and convertible, category, region, headline length,
    /// details length.
    pub fn parse(payload: &RawPayload) -> Result<Self, ApiError> {
        let [headline, category, region, details] = extract_fields(payload, Self::FIELDS)?;

        let headline = headline.trim().to_string();
        let category = normalize_code(&category);
        let region = normalize_code(&region);
        let details = details.trim().to_string();

        let category: Category = category.parse().map_err(|_| invalid_category("category", &category))?;
        let region: Region = region.parse().map_err(|_| invalid_region("region", &region))?;

        if !(1..=HEADLINE_MAX_LEN).contains(&headline.chars().count()) {
            return Err(ApiError::validation(
                "headline",
                format!("Headline length cannot be larger than {} and larger than 0", HEADLINE_MAX_LEN),
            ));
        }
        if !(1..=DETAILS_MAX_LEN).contains(&details.chars().count()) {
            return Err(ApiError::validation(
                "details",
                format!("Details length cannot be larger than {} and larger than 0", DETAILS_MAX_LEN),
            ));
        }

        Ok(Self {
            headline,
            category,
            region,
            details,
        })
    }
}

/// ListStories payload resolved into filter predicates
pub struct ListStoriesCommand;

impl ListStoriesCommand {
    pub const FIELDS: [&'static str; 3] = ["story_cat", "story_region", "story_date"];

    /// Date is checked before category and region. A date after `today` is a
    /// validation failure rather than an empty result.
    pub fn parse(payload: &RawPayload, today: NaiveDate) -> Result<StoryQuery, ApiError> {
        let [category, region, date] = extract_fields(payload, Self::FIELDS)?;

        let category = normalize_code(&category);
        let region = normalize_code(&region);
        let date = date.trim();

        let since = Wildcard::parse_with(date, |raw| {
            parse_story_date(raw).ok_or_else(|| ApiError::validation("story_date", INVALID_DATE))
        })?;
        if let Wildcard::Only(since) = since {
            if since > today {
                return Err(ApiError::validation("story_date", FUTURE_DATE));
            }
        }

        let category =
            Wildcard::parse_with(&category, str::parse::<Category>).map_err(|_| invalid_category("story_cat", &category))?;
        let region =
            Wildcard::parse_with(&region, str::parse::<Region>).map_err(|_| invalid_region("story_region", &region))?;

        Ok(StoryQuery { category, region, since })
    }
}

/// DeleteStory payload: a single integer story key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteStoryCommand {
    pub story_key: StoryId,
}

impl DeleteStoryCommand {
    pub const FIELD: &'static str = "story_key";

    /// Accepts JSON integers and strings holding an integer
    pub fn parse(payload: &RawPayload) -> Result<Self, ApiError> {
        let value = payload
            .get(Self::FIELD)
            .ok_or_else(|| ApiError::validation(Self::FIELD, MISSING_STORY_KEY))?;

        let key = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
        .ok_or_else(|| ApiError::validation(Self::FIELD, NON_INTEGER_STORY_KEY))?;

        Ok(Self { story_key: StoryId(key) })
    }
}
