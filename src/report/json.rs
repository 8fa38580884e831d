use serde::Serialize;

use crate::analytics::DashboardView;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    tool: &'static str,
    version: &'static str,
    #[serde(flatten)]
    view: &'a DashboardView<'a>,
}

pub fn render_dashboard_json(view: &DashboardView<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Envelope {
        tool: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        view,
    })
}
