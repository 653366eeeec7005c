use comrak::plugins::syntect::SyntectAdapter;
use comrak::{ComrakOptions, ComrakPlugins, markdown_to_html_with_plugins};
use once_cell::sync::Lazy;
use time::{
    Date, OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description,
};

// Raw HTML in answers is escaped (`render.unsafe_` stays off).
static MARKDOWN_OPTIONS: Lazy<ComrakOptions> = Lazy::new(|| {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options.render.escape = true;
    options
});

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

const SHORT_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:short] [day padding:zero], [year]");

pub fn markdown_to_html(md: &str) -> String {
    let adapter = SyntectAdapter::new(Some("base16-ocean.dark"));
    let mut plugins = ComrakPlugins::default();
    plugins.render.codefence_syntax_highlighter = Some(&adapter);
    markdown_to_html_with_plugins(md, &MARKDOWN_OPTIONS, &plugins)
}

fn to_local(datetime: OffsetDateTime) -> OffsetDateTime {
    match UtcOffset::current_local_offset() {
        Ok(offset) => datetime.to_offset(offset),
        Err(_) => datetime,
    }
}

pub fn format_message_time(datetime: OffsetDateTime) -> String {
    to_local(datetime)
        .format(MESSAGE_TIME_FORMAT)
        .unwrap_or_default()
}

pub fn format_upload_date(datetime: OffsetDateTime) -> String {
    format_date(to_local(datetime).date())
}

pub fn format_date(date: Date) -> String {
    date.format(SHORT_DATE_FORMAT)
        .unwrap_or_else(|_| "Unknown date".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn markdown_escapes_raw_html() {
        let html = markdown_to_html("**Revenue** <script>alert(1)</script>");
        assert!(html.contains("<strong>Revenue</strong>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn short_dates() {
        assert_eq!(format_date(date!(2024 - 01 - 15)), "Jan 15, 2024");
    }
}
