use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::query::QueryError;

/// View type codes per the MLflow protobuf spec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewType {
    #[default]
    Traces,
    Spans,
    Assessments,
}

impl ViewType {
    pub fn code(&self) -> i32 {
        match self {
            ViewType::Traces => 1,
            ViewType::Spans => 2,
            ViewType::Assessments => 3,
        }
    }

    pub fn valid_metrics(&self) -> &'static [&'static str] {
        match self {
            ViewType::Traces => &[
                "trace_count",
                "latency",
                "input_tokens",
                "output_tokens",
                "total_tokens",
            ],
            ViewType::Spans => &["span_count", "latency"],
            ViewType::Assessments => &["assessment_count", "assessment_value"],
        }
    }

    pub fn valid_dimensions(&self) -> &'static [&'static str] {
        match self {
            ViewType::Traces => &["trace_name", "trace_status"],
            ViewType::Spans => &["span_name", "span_type", "span_status"],
            ViewType::Assessments => &["assessment_name", "assessment_value"],
        }
    }
}

impl FromStr for ViewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "traces" => Ok(ViewType::Traces),
            "spans" => Ok(ViewType::Spans),
            "assessments" => Ok(ViewType::Assessments),
            _ => Err(format!(
                "Unknown view type: {}. Valid: TRACES, SPANS, ASSESSMENTS",
                s
            )),
        }
    }
}

impl Display for ViewType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ViewType::Traces => write!(f, "TRACES"),
            ViewType::Spans => write!(f, "SPANS"),
            ViewType::Assessments => write!(f, "ASSESSMENTS"),
        }
    }
}

pub fn validate_metric(metric: &str, view_type: ViewType) -> Result<(), QueryError> {
    if view_type.valid_metrics().contains(&metric) {
        Ok(())
    } else {
        Err(QueryError::UnknownMetric {
            metric: metric.to_string(),
            view_type,
        })
    }
}

/// An empty dimension list is always valid and means "no grouping".
pub fn validate_dimensions(dimensions: &[String], view_type: ViewType) -> Result<(), QueryError> {
    for dimension in dimensions {
        if !view_type.valid_dimensions().contains(&dimension.as_str()) {
            return Err(QueryError::UnknownDimension {
                dimension: dimension.clone(),
                view_type,
            });
        }
    }

    Ok(())
}
