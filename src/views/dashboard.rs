//! Statistics dashboard pages

use std::fmt::Write;

use crate::models::dashboard::DashboardSummary;

use super::{document, escape, format_count};

pub const LOGIN_ERROR: &str = "Invalid username or password.";

const STYLE: &str = r#"
  :root { color-scheme: dark; font-family: system-ui, -apple-system, Segoe UI, sans-serif;
          background: #0f172a; color: #e2e8f0; }
  body { margin: 0; padding: 2rem; }
  body.login { min-height: 100vh; display: flex; align-items: center; justify-content: center; box-sizing: border-box; }
  form { width: 100%; max-width: 360px; background: rgba(15, 23, 42, 0.75); border: 1px solid rgba(148, 163, 184, 0.2);
         border-radius: 12px; padding: 2rem; }
  label { display: block; font-size: 0.9rem; margin-bottom: 0.35rem; }
  input { width: 100%; padding: 0.65rem 0.75rem; margin-bottom: 1rem; border-radius: 8px; box-sizing: border-box;
          border: 1px solid rgba(148, 163, 184, 0.3); background: rgba(15, 23, 42, 0.4); color: inherit; }
  button { width: 100%; padding: 0.75rem; border: none; border-radius: 8px; font-weight: 600; cursor: pointer;
           background: linear-gradient(135deg, #22d3ee, #6366f1); color: #0f172a; }
  .error, .alert { background: rgba(225, 29, 72, 0.2); border: 1px solid rgba(225, 29, 72, 0.4); color: #fecdd3;
                   padding: 0.75rem; border-radius: 8px; margin-bottom: 1rem; }
  .cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 1.5rem; }
  .card { background: rgba(15, 23, 42, 0.6); border: 1px solid rgba(148, 163, 184, 0.2); border-radius: 12px; padding: 1.5rem; }
  table { width: 100%; border-collapse: collapse; margin-top: 1rem; }
  th, td { padding: 0.6rem 0.9rem; text-align: left; border-bottom: 1px solid rgba(148, 163, 184, 0.15); }
  th { background: rgba(148, 163, 184, 0.12); }
  code { font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace; font-size: 0.85rem; word-break: break-word; }
  footer { margin-top: 3rem; font-size: 0.875rem; opacity: 0.7; text-align: center; }
"#;

/// Login form, optionally with the generic failure message
pub fn render_login(error: Option<&str>) -> String {
    let error_html = error
        .map(|msg| format!("\n      <div class=\"error\">{}</div>", escape(msg)))
        .unwrap_or_default();

    let body = format!(
        r#"    <form method="post" action="/stats/">
      <h1>Statistics login</h1>{error_html}
      <label for="username">Username</label>
      <input id="username" name="username" type="text" autocomplete="username" required autofocus>
      <label for="password">Password</label>
      <input id="password" name="password" type="password" autocomplete="current-password" required>
      <button type="submit">Sign in</button>
    </form>"#,
        error_html = error_html
    );

    document("Statistics login", STYLE, "login", &body)
}

/// Aggregate view for an authenticated user
pub fn render_dashboard(summary: &DashboardSummary) -> String {
    let mut timezones = String::new();
    for row in &summary.top_timezones {
        let _ = write!(
            timezones,
            "\n              <tr><td>{}</td><td>{}</td></tr>",
            escape(&row.timezone),
            format_count(row.hits)
        );
    }
    if timezones.is_empty() {
        timezones = empty_row(2);
    }

    let mut days = String::new();
    for row in &summary.recent_days {
        let _ = write!(
            days,
            "\n              <tr><td>{}</td><td>{}</td></tr>",
            row.visit_date.format("%Y-%m-%d"),
            format_count(row.hits)
        );
    }
    if days.is_empty() {
        days = empty_row(2);
    }

    let mut visits = String::new();
    for row in &summary.recent_visits {
        let _ = write!(
            visits,
            "\n            <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><code>{}</code></td></tr>",
            row.created_at.format("%Y-%m-%d %H:%M:%S"),
            escape(row.timezone.as_deref().unwrap_or("Unknown")),
            if row.is_friday.unwrap_or(false) { "Yes" } else { "No" },
            escape(row.forced_mode.as_deref().unwrap_or("auto")),
            escape(row.season.as_deref().unwrap_or("n/a")),
            escape(row.remote_addr.as_deref().unwrap_or("")),
            escape(row.user_agent.as_deref().unwrap_or("")),
        );
    }
    if visits.is_empty() {
        visits = empty_row(7);
    }

    let body = format!(
        r#"    <main>
      <header>
        <h1>Visit statistics</h1>
        <p>Total recorded visits: <strong id="total-visits">{total}</strong></p>
        <div class="alert">Logged in as <strong>{username}</strong>. <a href="/stats/?logout=1">Log out</a></div>
      </header>
      <section class="cards">
        <article class="card">
          <h2>Top 20 timezones</h2>
          <table>
            <thead><tr><th>Timezone</th><th>Visits</th></tr></thead>
            <tbody>{timezones}
            </tbody>
          </table>
        </article>
        <article class="card">
          <h2>Visits per day (last 14 days)</h2>
          <table>
            <thead><tr><th>Date</th><th>Visits</th></tr></thead>
            <tbody>{days}
            </tbody>
          </table>
        </article>
      </section>
      <section>
        <h2>Latest 50 visits</h2>
        <table>
          <thead>
            <tr><th>Recorded</th><th>Timezone</th><th>Friday?</th><th>Forced mode</th><th>Season</th><th>IP</th><th>User agent</th></tr>
          </thead>
          <tbody>{visits}
          </tbody>
        </table>
      </section>
    </main>
    <footer>Live statistics from visit_logs</footer>"#,
        total = format_count(summary.total_visits),
        username = escape(&summary.username),
        timezones = timezones,
        days = days,
        visits = visits,
    );

    document("Visit statistics", STYLE, "dashboard", &body)
}

/// Generic failure page; causes stay in the server log
pub fn render_error() -> String {
    document(
        "Statistics unavailable",
        STYLE,
        "login",
        "    <div class=\"error\"><h1>Statistics are temporarily unavailable.</h1></div>",
    )
}

fn empty_row(columns: usize) -> String {
    format!(
        "\n              <tr><td colspan=\"{}\">No data yet.</td></tr>",
        columns
    )
}
