use chrono::DateTime;

use crate::catalog::Catalog;
use crate::profile::Profile;
use crate::resolver::Source;
use crate::video::VideoEntry;

const WRAP_WIDTH: usize = 72;
const FALLBACK_NOTE: &str =
    "(live feed unavailable, showing saved picks; check YouTube for the latest)\n";

pub fn upload_date(video: &VideoEntry) -> String {
    if video.uploaded_at == 0 {
        return "unknown".into();
    }
    DateTime::from_timestamp(video.uploaded_at, 0)
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".into())
}

fn video_line(video: &VideoEntry) -> String {
    format!(
        "  {}  {}\n              {}\n",
        upload_date(video),
        video.display_title(),
        video.watch_url()
    )
}

fn source_note(source: &Source) -> &'static str {
    match source {
        Source::Fallback => FALLBACK_NOTE,
        Source::Live { .. } => "",
    }
}

pub fn home(profile: &Profile, catalog: &Catalog, source: &Source, show_count: usize) -> String {
    let mut out = format!("[{}]\n", profile.name);
    out.push_str(source_note(source));

    let Some(latest) = catalog.latest() else {
        out.push_str(&format!("\nNo videos yet. Visit {}\n", profile.channel_url));
        return out;
    };

    out.push_str(&format!(
        "\nLatest\n  {}\n  Watch on YouTube: {}\n  Subscribe: {}\n",
        latest.display_title(),
        latest.watch_url(),
        profile.channel_url
    ));

    let page = catalog.home_page(show_count);
    if !page.is_empty() {
        out.push_str("\nMore videos\n");
        out.extend(page.iter().map(video_line));
    }
    if catalog.has_more(show_count) {
        out.push_str(&format!(
            "\nLoad more: --count {}\n",
            Catalog::next_show_count(show_count)
        ));
    }
    out
}

pub fn videos(catalog: &Catalog, source: &Source, query: Option<&str>) -> String {
    let mut out = source_note(source).to_string();

    let query = query.unwrap_or_default();
    let hits = catalog.search(query);
    if hits.is_empty() {
        out.push_str(&format!("No videos match {:?}.\n", query));
        return out;
    }
    out.extend(hits.into_iter().map(video_line));
    out
}

pub fn about(profile: &Profile) -> String {
    let mut out = String::from("About\n\n");
    for line in profile.about.lines() {
        for wrapped in textwrap::wrap(line, WRAP_WIDTH) {
            out.push_str(&wrapped);
            out.push('\n');
        }
    }
    out
}

pub fn contact(profile: &Profile) -> String {
    format!(
        "Contact\n\nBusiness: {email}\nIf you have any inquiries, please email me at {email}\nmailto:{email}\n",
        email = profile.contact_email
    )
}

pub fn socials(profile: &Profile) -> String {
    let width = profile
        .socials
        .iter()
        .map(|link| link.name.chars().count())
        .max()
        .unwrap_or(0);
    profile
        .socials
        .iter()
        .map(|link| {
            format!(
                "{:<width$}  {:<14}  {}\n",
                link.name,
                link.handle,
                link.href,
                width = width
            )
        })
        .collect()
}

pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
