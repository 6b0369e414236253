//! Socialinsider JSON-RPC request and response shapes.
//!
//! Requests are always `{"jsonrpc": "2.0", "id": 0, "method": ..., "params": ...}`.
//! Responses wrap their payload in a `resp` field whose shape depends on the
//! method; only the fields the aggregators read are modelled here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use socialproxy_core::{DateRange, Profile, PAGE_SIZE, PROJECT_NAME, TIMEZONE};

/// RPC methods the aggregators issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcMethod {
    GetPosts,
    GetProfileData,
}

impl RpcMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetPosts => "socialinsider_api.get_posts",
            Self::GetProfileData => "socialinsider_api.get_profile_data",
        }
    }
}

impl Serialize for RpcMethod {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u32,
    pub method: RpcMethod,
    pub params: RpcParams<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RpcParams<'a> {
    pub id: &'a str,
    pub profile_type: &'a str,
    pub date: DateWindow,
    pub projectname: &'static str,
    pub from: u32,
    pub size: u32,
}

/// Epoch-millisecond window; unparseable dates serialize as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub timezone: &'static str,
}

impl From<&DateRange> for DateWindow {
    fn from(range: &DateRange) -> Self {
        Self {
            start: range.start_millis(),
            end: range.end_millis(),
            timezone: TIMEZONE,
        }
    }
}

impl<'a> RpcRequest<'a> {
    /// Builds the first-page request for one profile over `range`.
    #[must_use]
    pub fn for_profile(method: RpcMethod, profile: &'a Profile, range: &DateRange) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 0,
            method,
            params: RpcParams {
                id: &profile.id,
                profile_type: &profile.profile_type,
                date: DateWindow::from(range),
                projectname: PROJECT_NAME,
                from: 0,
                size: PAGE_SIZE,
            },
        }
    }
}

/// `{"resp": {...}}` envelope shared by every method.
#[derive(Debug, Deserialize)]
pub(crate) struct RpcEnvelope<T> {
    pub resp: T,
}

/// One page of `get_posts` results.
#[derive(Debug, Clone, Deserialize)]
pub struct PostsPage {
    /// Upstream-reported number of posts for the profile, independent of page size.
    pub total: i64,
    /// Upstream-defined post records, kept as raw JSON.
    pub posts: Vec<Value>,
}

/// `get_profile_data` payload: profile id to day-keyed records.
pub(crate) type ProfileDataMap = Map<String, Value>;
