//! Server-rendered HTML for the five demo views.

pub mod charts;

use std::fmt::Write;

use crate::models::{
    ChatRole, ChatSession, ContactForm, DashboardSnapshot, RoiInputs, RoiReport,
    SampleMetricSeries,
};

static STYLE_CSS: &str = include_str!("style.css");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Agent,
    Dashboard,
    Roi,
    Book,
}

impl Page {
    pub const ALL: [Page; 5] = [Page::Home, Page::Agent, Page::Dashboard, Page::Roi, Page::Book];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Agent => "/agent",
            Page::Dashboard => "/dashboard",
            Page::Roi => "/roi",
            Page::Book => "/book",
        }
    }

    pub fn nav_label(&self) -> &'static str {
        match self {
            Page::Home => "🏠 Home",
            Page::Agent => "🤖 Try AI Agent",
            Page::Dashboard => "📊 Dashboard Preview",
            Page::Roi => "💰 ROI Calculator",
            Page::Book => "📅 Book Audit",
        }
    }
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `1234.5` -> `$1,235`
pub fn money(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}${grouped}")
}

pub fn layout(active: Page, title: &str, body: &str) -> String {
    let mut nav = String::new();
    for page in Page::ALL {
        let class = if page == active { " class=\"active\"" } else { "" };
        let _ = write!(
            nav,
            "<a href=\"{}\"{class}>{}</a>",
            page.path(),
            page.nav_label()
        );
    }

    format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">
<title>{title} · Kinetic Flow AI - Demo</title>
<style>{STYLE_CSS}</style>
</head>
<body>
<div class=\"layout\">
<nav class=\"sidebar\">
<h2>⚙️ Kinetic Flow AI</h2>
<hr>
{nav}
<hr>
<div class=\"notice info\"><strong>Demo Version</strong> — Client Presentation Build</div>
</nav>
<main class=\"main\">
{body}
</main>
</div>
</body>
</html>",
        title = escape(title),
    )
}

fn metric_card(value: &str, caption: &str, color: &str) -> String {
    format!(
        "<div class=\"metric-card\"><h2 class=\"value\" style=\"color:{color};\">{}</h2><p class=\"caption\">{}</p></div>",
        escape(value),
        escape(caption)
    )
}

pub fn home() -> String {
    let body = format!(
        "<h1 class=\"center\" style=\"font-size:3.5em;\">⚙️ KINETIC FLOW AI</h1>
<h3 class=\"center\" style=\"color:#ccc;\">Turning Chaos Into Intelligent Flow</h3>
<div class=\"columns\">{}{}{}</div>
<p class=\"center\" style=\"margin-top:40px;\"><a class=\"button\" href=\"{}\">🤖 Try Our AI Agent Demo →</a></p>",
        metric_card("24/7", "AI Operations", "#00ff9d"),
        metric_card("4:1", "Avg ROI (Internal)", "#00b8ff"),
        metric_card("80%", "Task Reduction", "#ff00ff"),
        Page::Agent.path(),
    );
    layout(Page::Home, "Home", &body)
}

pub fn agent(session: &ChatSession) -> String {
    let mut body = String::from(
        "<h1>🤖 Frontier AI Agent Demo</h1>
<div class=\"notice info\">Ask about pricing, availability, booking, or services.</div>",
    );

    for message in &session.messages {
        let class = match message.role {
            ChatRole::User => "user-message",
            ChatRole::Bot => "bot-message",
        };
        let _ = write!(
            body,
            "<div class=\"chat-message {class}\"><strong>{}:</strong> {}</div>",
            message.role.label(),
            escape(&message.content)
        );
    }

    body.push_str(
        "<form method=\"post\" action=\"/agent\">
<label for=\"message\">Type your message:</label>
<input id=\"message\" name=\"message\" autocomplete=\"off\" autofocus>
<p><button type=\"submit\">Send 📤</button></p>
</form>
<form method=\"post\" action=\"/agent/clear\"><button type=\"submit\" class=\"secondary\">Clear chat</button></form>",
    );

    if session.lead_captured {
        body.push_str(
            "<div class=\"notice success\">🎉 Lead captured! This would sync to CRM &amp; calendar in production.</div>",
        );
    }

    layout(Page::Agent, "Try AI Agent", &body)
}

pub fn dashboard(series: &SampleMetricSeries, snapshot: &DashboardSnapshot) -> String {
    let body = format!(
        "<h1>📊 Client Dashboard Preview</h1>
<div class=\"columns\">{}{}{}{}</div>
<hr>
<div class=\"columns\">
<div><h3>📈 Leads Over Time</h3>{}</div>
<div><h3>🎯 Conversion Funnel</h3>{}</div>
</div>",
        metric_card(&snapshot.total_leads.to_string(), "Leads (30d)", "#00ff9d"),
        metric_card(&snapshot.total_bookings.to_string(), "Bookings", "#00b8ff"),
        metric_card(&format!("{}%", snapshot.conversion_pct), "Conversion", "#8b5cf6"),
        metric_card(snapshot.avg_response, "Avg Response", "#ff6b6b"),
        charts::line_chart(series),
        charts::funnel_chart(&snapshot.funnel),
    );
    layout(Page::Dashboard, "Dashboard Preview", &body)
}

fn number_input(name: &str, label: &str, value: f64, step: &str) -> String {
    format!(
        "<label for=\"{name}\">{label}</label><input id=\"{name}\" name=\"{name}\" type=\"number\" min=\"0\" step=\"{step}\" value=\"{value}\">"
    )
}

pub fn roi(inputs: &RoiInputs, outcome: Option<Result<RoiReport, String>>) -> String {
    let mut body = format!(
        "<h1>💰 ROI Calculator</h1>
<p>See what answering every after-hours lead is worth.</p>
<form method=\"get\" action=\"/roi\">
{}{}{}{}{}
<p><button type=\"submit\">Calculate ROI</button></p>
</form>",
        number_input("monthly_leads", "Monthly leads", inputs.monthly_leads, "1"),
        number_input("conversion_rate", "Conversion rate (%)", inputs.conversion_rate, "0.1"),
        number_input("avg_deal_value", "Average deal value ($)", inputs.avg_deal_value, "1"),
        number_input("after_hours_pct", "Leads arriving after hours (%)", inputs.after_hours_pct, "0.1"),
        number_input("monthly_cost", "Agent plan per month ($)", inputs.monthly_cost, "1"),
    );

    match outcome {
        Some(Ok(report)) => {
            let _ = write!(
                body,
                "<table>
<tr><th>Metric</th><th>Value</th></tr>
<tr><td>After-hours leads / month</td><td>{:.1}</td></tr>
<tr><td>Recovered bookings / month</td><td>{:.2}</td></tr>
<tr><td>Additional revenue / month</td><td>{}</td></tr>
<tr><td>Additional revenue / year</td><td>{}</td></tr>
<tr><td>Net monthly gain</td><td>{}</td></tr>
<tr><td>ROI</td><td>{:.0}%</td></tr>
<tr><td>Return per $1 spent</td><td>{:.1}:1</td></tr>
</table>",
                report.after_hours_leads,
                report.recovered_bookings,
                money(report.additional_revenue),
                money(report.annual_revenue),
                money(report.net_monthly_gain),
                report.roi_pct,
                report.roi_multiple,
            );
        }
        Some(Err(message)) => {
            let _ = write!(body, "<div class=\"notice error\">{}</div>", escape(&message));
        }
        None => {}
    }

    layout(Page::Roi, "ROI Calculator", &body)
}

pub enum BookStatus<'a> {
    Blank,
    Invalid { error: &'a str, form: &'a ContactForm },
    Submitted { name: &'a str },
}

pub fn book(status: BookStatus<'_>) -> String {
    let mut body = String::from(
        "<h1>📅 Book Your Free Kinetic Audit</h1>
<p>We'll map where your team loses leads and show what an AI agent would recover.</p>",
    );

    let empty = ContactForm::default();
    let form = match &status {
        BookStatus::Invalid { form, .. } => *form,
        _ => &empty,
    };

    match &status {
        BookStatus::Submitted { name } => {
            let _ = write!(
                body,
                "<div class=\"notice success\">✅ Thanks, {}! Your audit request is in. We'll reach out within 24 hours.</div>",
                escape(name)
            );
            return layout(Page::Book, "Book Audit", &body);
        }
        BookStatus::Invalid { error, .. } => {
            let _ = write!(body, "<div class=\"notice error\">⚠️ {}</div>", escape(error));
        }
        BookStatus::Blank => {}
    }

    let _ = write!(
        body,
        "<form method=\"post\" action=\"/book\">
<label for=\"name\">Name *</label><input id=\"name\" name=\"name\" value=\"{}\">
<label for=\"email\">Email *</label><input id=\"email\" name=\"email\" type=\"email\" value=\"{}\">
<label for=\"phone\">Phone</label><input id=\"phone\" name=\"phone\" value=\"{}\">
<label for=\"business\">Business</label><input id=\"business\" name=\"business\" value=\"{}\">
<label for=\"message\">What would you like to automate?</label><textarea id=\"message\" name=\"message\" rows=\"4\">{}</textarea>
<p><button type=\"submit\">Book My Audit</button></p>
</form>",
        escape(&form.name),
        escape(&form.email),
        escape(&form.phone),
        escape(form.business.as_deref().unwrap_or("")),
        escape(&form.message),
    );

    layout(Page::Book, "Book Audit", &body)
}
