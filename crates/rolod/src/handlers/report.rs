//! Contact distribution reports.

use rolo_core::contact::UserId;
use rolo_core::entities::EntityBag;
use rolo_core::error::RoloError;
use rolo_core::extract;
use rolo_core::response::{ChartType, Response};
use tracing::info;

use super::HandlerCx;
use crate::store::{GroupKey, GroupOrder};

/// Companies shown in the company distribution chart.
const TOP_COMPANIES: usize = 10;

pub async fn generate_report(
    query: &str,
    user: UserId,
    entities: Option<&EntityBag>,
    cx: &HandlerCx,
) -> Result<Response, RoloError> {
    let report_type = entities
        .and_then(|e| e.report_type.clone())
        .map(|t| t.to_lowercase())
        .or_else(|| extract::report_type(query));

    let Some(report_type) = report_type else {
        return Ok(Response::text(
            "What kind of report would you like to generate?",
        ));
    };
    info!(report_type = %report_type, "Report request");

    // Branch priority: team, then company, then temperature/engagement.
    if report_type.contains("team") {
        let counts = cx
            .contacts
            .group_count(user, GroupKey::Team, GroupOrder::CountDescending, None)
            .await?;
        Ok(chart(
            ChartType::Bar,
            "Contact Distribution by Team",
            "Here's the distribution of your contacts by team.",
            counts,
        ))
    } else if report_type.contains("company") || report_type.contains("companies") {
        let counts = cx
            .contacts
            .group_count(
                user,
                GroupKey::CurrentCompany,
                GroupOrder::CountDescending,
                Some(TOP_COMPANIES),
            )
            .await?;
        Ok(chart(
            ChartType::Pie,
            "Contact Distribution by Company",
            "Here's the distribution of your contacts by company.",
            counts,
        ))
    } else if report_type.contains("temperature") || report_type.contains("engagement") {
        let counts = cx
            .contacts
            .group_count(user, GroupKey::Temperature, GroupOrder::KeyAscending, None)
            .await?;
        Ok(chart(
            ChartType::Pie,
            "Contact Distribution by Temperature",
            "Here's the distribution of your contacts by temperature.",
            counts,
        ))
    } else {
        Ok(Response::text(format!(
            "I'm not sure how to generate a report on \"{report_type}\". Try \
             asking for a report on teams, companies, or engagement levels."
        )))
    }
}

fn chart(
    chart_type: ChartType,
    title: &str,
    message: &str,
    counts: Vec<(String, u64)>,
) -> Response {
    let (labels, data): (Vec<String>, Vec<u64>) = counts.into_iter().unzip();
    Response::Chart {
        chart_type,
        title: title.to_string(),
        labels,
        data,
        message: message.to_string(),
    }
}
