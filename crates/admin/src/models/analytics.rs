//! Growth and revenue analytics.

use serde::{Deserialize, Serialize};

use ybs_core::{Amount, UserId};

/// Analytics for one reporting period.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Analytics {
    /// Period the figures cover (`7d`, `30d`, `90d`, `1y`).
    pub period: String,
    pub user_growth: Vec<DataPoint>,
    pub revenue_trend: Vec<DataPoint>,
    /// Share of referred sign-ups that became active, in percent.
    pub referral_conversion_rate: f64,
    pub top_referrers: Vec<TopReferrer>,
}

/// A labelled chart value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopReferrer {
    pub user_id: UserId,
    pub name: String,
    pub referrals: u64,
    #[serde(default)]
    pub earnings: Amount,
}

impl Analytics {
    /// Sum of the revenue trend series.
    #[must_use]
    pub fn total_revenue(&self) -> f64 {
        self.revenue_trend.iter().map(|p| p.value).sum()
    }
}

/// Reporting window accepted by the analytics endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyticsPeriod {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl AnalyticsPeriod {
    /// Value of the `period` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Week => "7d",
            Self::Month => "30d",
            Self::Quarter => "90d",
            Self::Year => "1y",
        }
    }
}

impl std::fmt::Display for AnalyticsPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AnalyticsPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "7d" | "week" => Ok(Self::Week),
            "30d" | "month" => Ok(Self::Month),
            "90d" | "quarter" => Ok(Self::Quarter),
            "1y" | "year" => Ok(Self::Year),
            other => Err(format!("invalid analytics period: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_round_trips_through_query_value() {
        for period in [
            AnalyticsPeriod::Week,
            AnalyticsPeriod::Month,
            AnalyticsPeriod::Quarter,
            AnalyticsPeriod::Year,
        ] {
            assert_eq!(period.as_str().parse::<AnalyticsPeriod>(), Ok(period));
        }
        assert!("5y".parse::<AnalyticsPeriod>().is_err());
    }

    #[test]
    fn test_total_revenue() {
        let analytics = Analytics {
            revenue_trend: vec![
                DataPoint {
                    label: "Jan".to_string(),
                    value: 10.5,
                },
                DataPoint {
                    label: "Feb".to_string(),
                    value: 4.5,
                },
            ],
            ..Analytics::default()
        };
        assert!((analytics.total_revenue() - 15.0).abs() < f64::EPSILON);
    }
}
