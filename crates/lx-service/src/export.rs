//! Route export.
//!
//! A [`RouteExport`] is a self-contained itinerary for a computed route:
//! endpoints, full path, totals, a flat per-km cost figure, and per-segment
//! distance and time.  It is written as pretty-printed JSON.

use std::io::Write;

use serde::Serialize;

use crate::{RouteReport, ServiceResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSegment {
    pub from:        String,
    pub to:          String,
    pub distance_km: f64,
    pub time_hours:  f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteExport {
    /// Caller-supplied generation time, Unix seconds.
    pub generated_at_unix_secs: i64,
    pub source:                 String,
    pub destination:            String,
    pub route_path:             Vec<String>,
    pub total_distance_km:      f64,
    pub estimated_time_hours:   f64,
    /// `total_distance_km × flat_cost_per_km`.
    pub estimated_cost:         f64,
    pub segments:               Vec<ExportSegment>,
}

impl RouteExport {
    pub fn from_report(report: &RouteReport, flat_cost_per_km: f64, generated_at_unix_secs: i64) -> Self {
        Self {
            generated_at_unix_secs,
            source:               report.path.first().cloned().unwrap_or_default(),
            destination:          report.path.last().cloned().unwrap_or_default(),
            route_path:           report.path.clone(),
            total_distance_km:    report.distance,
            estimated_time_hours: report.time_hours,
            estimated_cost:       report.distance * flat_cost_per_km,
            segments: report
                .segments
                .iter()
                .map(|s| ExportSegment {
                    from:        s.from.clone(),
                    to:          s.to.clone(),
                    distance_km: s.distance_km,
                    time_hours:  s.time_hours,
                })
                .collect(),
        }
    }

    pub fn write_json<W: Write>(&self, writer: W) -> ServiceResult<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
