use axum::{body::Bytes, extract::State, Extension, Json};
use serde_json::{Map, Value};
use socialproxy_core::{EngagementTotals, ProfileQuery};

use crate::middleware::RequestId;

use super::{AggregateError, AppState};

/// One profile's upstream statistics, tagged with its platform.
#[derive(Debug)]
struct ProfileStatistics {
    profile_type: String,
    /// `None` when the upstream had no entry for the profile id.
    data: Option<Value>,
}

impl ProfileStatistics {
    /// `{profile_type: data}`, or `{}` when the upstream returned nothing.
    fn to_slot(&self) -> Value {
        let mut slot = Map::new();
        if let Some(data) = &self.data {
            slot.insert(self.profile_type.clone(), data.clone());
        }
        Value::Object(slot)
    }
}

fn sum_engagement(stats: &[ProfileStatistics]) -> EngagementTotals {
    stats
        .iter()
        .filter_map(|s| s.data.as_ref())
        .fold(EngagementTotals::new(), |mut totals, data| {
            totals.absorb_profile(data);
            totals
        })
}

/// `{"total": {...}, "0": {...}, "1": {...}}` with one numbered slot per profile.
fn statistics_body(
    totals: &EngagementTotals,
    stats: &[ProfileStatistics],
) -> Result<Map<String, Value>, serde_json::Error> {
    let mut body = Map::new();
    body.insert("total".to_string(), serde_json::to_value(totals)?);
    for (index, profile) in stats.iter().enumerate() {
        body.insert(index.to_string(), profile.to_slot());
    }
    Ok(body)
}

/// `POST /statistics`: per-day engagement summed across profiles.
pub(super) async fn aggregate_statistics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<Map<String, Value>>, AggregateError> {
    let query: ProfileQuery =
        serde_json::from_slice(&body).map_err(AggregateError::InvalidRequest)?;

    let mut stats = Vec::with_capacity(query.profiles.len());
    for profile in &query.profiles {
        let data = state.upstream.get_profile_data(profile, &query.range).await?;
        if data.is_none() {
            tracing::warn!(profile_id = %profile.id, "upstream returned no statistics for profile");
        }
        stats.push(ProfileStatistics {
            profile_type: profile.profile_type.clone(),
            data,
        });
    }

    let totals = sum_engagement(&stats);
    tracing::info!(
        request_id = %req_id.0,
        profiles = stats.len(),
        days = totals.len(),
        "aggregated statistics"
    );

    let body = statistics_body(&totals, &stats).map_err(AggregateError::Encode)?;
    Ok(Json(body))
}
