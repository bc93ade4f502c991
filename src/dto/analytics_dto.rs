use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::services::report_service::ReportFormat;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCostsQuery {
    #[validate(range(min = 1, max = 12, message = "must be between 1 and 12"))]
    pub month: Option<u32>,
    #[validate(range(min = 2000, max = 2100, message = "must be between 2000 and 2100"))]
    pub year: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    #[serde(default)]
    pub format: ReportFormat,
    pub vehicle_id: Option<Uuid>,
}
