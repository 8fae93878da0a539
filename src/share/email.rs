/// HTML rendering for the weekly summary email

use crate::analytics::WeeklyStat;

/// Subject line of the weekly summary.
pub const SHARE_SUBJECT: &str = "Check out my weekly habit progress!";

const ACCENT: &str = "#38a0a8";

/// Render the weekly summary as a self-contained HTML document.
pub fn render_weekly_email(stats: &[WeeklyStat]) -> String {
    let rows: String = stats.iter().map(render_row).collect();

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <style>
      body {{ font-family: -apple-system, 'Segoe UI', Roboto, Arial, sans-serif; color: #111827; }}
      .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
      .header {{ background: {accent}; color: white; padding: 24px; border-radius: 12px; text-align: center; }}
      table {{ width: 100%; border-collapse: collapse; margin-top: 24px; }}
      th {{ background: #f3f4f6; padding: 12px; text-align: left; border-bottom: 2px solid #e5e7eb; }}
      td {{ padding: 12px; border-bottom: 1px solid #e5e7eb; }}
      .bar {{ background: #f3f4f6; border-radius: 8px; overflow: hidden; height: 8px; }}
      .fill {{ background: {accent}; height: 100%; }}
      .footer {{ text-align: center; color: #6b7280; font-size: 14px; padding-top: 20px; }}
    </style>
  </head>
  <body>
    <div class="container">
      <div class="header">
        <h1>Weekly Habit Check-in</h1>
        <p>Here's how I'm doing with my habits this week!</p>
      </div>
      <table>
        <thead>
          <tr><th>Habit</th><th>Completed</th><th>Progress</th><th>Success Rate</th></tr>
        </thead>
        <tbody>
{rows}        </tbody>
      </table>
      <div class="footer"><p>Sent from Habit Tracker</p></div>
    </div>
  </body>
</html>
"#,
        accent = ACCENT,
        rows = rows,
    )
}

fn render_row(stat: &WeeklyStat) -> String {
    format!(
        "          <tr><td>{name}</td><td>{completed}/{total}</td>\
         <td><div class=\"bar\"><div class=\"fill\" style=\"width: {pct}%;\"></div></div></td>\
         <td>{pct}%</td></tr>\n",
        name = escape_html(&stat.name),
        completed = stat.completed,
        total = stat.total,
        pct = stat.percentage,
    )
}

fn escape_html(s: &str) -> String {
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
