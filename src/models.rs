use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};

use crate::schema::reports;

// --- ReportStatus ---

/// Lifecycle status of a report. PENDING is initial, RESOLVED is terminal;
/// a report whose status is not RESOLVED counts as "open".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Pending,
    OnTheWay,
    Resolved,
}

impl ReportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::OnTheWay => "ON_THE_WAY",
            Self::Resolved => "RESOLVED",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "ON_THE_WAY" => Ok(Self::OnTheWay),
            "RESOLVED" => Ok(Self::Resolved),
            _ => Err(()),
        }
    }
}

impl FromSql<Text, Sqlite> for ReportStatus {
    fn from_sql(bytes: <Sqlite as diesel::backend::Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        s.parse()
            .map_err(|()| format!("unknown report status: {s}").into())
    }
}

impl ToSql<Text, Sqlite> for ReportStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str());
        Ok(IsNull::No)
    }
}

// --- Report ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = reports)]
pub struct Report {
    pub id: i32,
    pub description: String,
    pub reporter_name: String,
    pub reporter_phone: String,
    pub image_path: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: ReportStatus,
    pub created_at: NaiveDateTime,
}

/// Insert payload. `status` and `created_at` come from column defaults.
#[derive(Debug, Insertable)]
#[diesel(table_name = reports)]
pub struct NewReport {
    pub description: String,
    pub reporter_name: String,
    pub reporter_phone: String,
    pub image_path: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_wire_names() {
        assert_eq!("PENDING".parse(), Ok(ReportStatus::Pending));
        assert_eq!("ON_THE_WAY".parse(), Ok(ReportStatus::OnTheWay));
        assert_eq!("RESOLVED".parse(), Ok(ReportStatus::Resolved));
    }

    #[test]
    fn status_rejects_anything_else() {
        assert!("DONE".parse::<ReportStatus>().is_err());
        assert!("pending".parse::<ReportStatus>().is_err());
        assert!("".parse::<ReportStatus>().is_err());
    }

    #[test]
    fn status_serializes_as_screaming_snake() {
        let json = serde_json::to_string(&ReportStatus::OnTheWay).unwrap();
        assert_eq!(json, r#""ON_THE_WAY""#);
    }

    #[test]
    fn status_display_matches_serde() {
        for status in [
            ReportStatus::Pending,
            ReportStatus::OnTheWay,
            ReportStatus::Resolved,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }
}
