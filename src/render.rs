//! Plain-text rendering of loaded pages.

use campus_core::hierarchy::localize_field;
use campus_core::i18n::t;
use campus_core::locale::Locale;
use campus_core::model::LocalizedFields;
use campus_pages::pages::{
    EventFilter, EventsData, ManagementData, MissionContent, NewsData, ResearchData,
};
use campus_pages::PageData;
use std::fmt::{self, Write};

fn heading(out: &mut String, title: &str, data: &impl PageData, locale: Locale) -> fmt::Result {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))?;
    if !data.is_live() {
        writeln!(out, "({})", t("common.offline", locale))?;
    }
    writeln!(out)
}

fn section(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "\n{title}")?;
    writeln!(out, "{}", "-".repeat(title.chars().count()))
}

pub fn management(out: &mut String, data: &ManagementData, locale: Locale) -> fmt::Result {
    heading(out, t("management.title", locale), data, locale)?;
    writeln!(out, "{}", t("management.organizationTitle", locale))?;
    for (depth, level) in data.chart(locale).levels.iter().enumerate() {
        let indent = "  ".repeat(depth + 1);
        for card in level {
            writeln!(out, "{indent}{}: {}", card.name, card.head)?;
            if !card.bio.is_empty() {
                writeln!(out, "{indent}  {}", card.bio)?;
            }
        }
    }

    let teachers = data.teachers.value();
    if !teachers.is_empty() {
        section(out, t("management.teachers", locale))?;
        for teacher in teachers {
            let name = teacher.text.text("full_name", locale);
            let position = teacher.text.text("position", locale);
            match (&teacher.email, position.is_empty()) {
                (Some(email), false) => writeln!(out, "  {name}, {position} <{email}>")?,
                (Some(email), true) => writeln!(out, "  {name} <{email}>")?,
                (None, false) => writeln!(out, "  {name}, {position}")?,
                (None, true) => writeln!(out, "  {name}")?,
            }
        }
    }
    Ok(())
}

pub fn news(out: &mut String, data: &NewsData, locale: Locale) -> fmt::Result {
    heading(out, t("news.title", locale), data, locale)?;

    let featured = data.featured_items();
    if !featured.is_empty() {
        section(out, t("news.featured", locale))?;
        for item in featured {
            writeln!(out, "  * {}", item.text.text("title", locale))?;
        }
        writeln!(out)?;
    }

    for item in data.news.value() {
        let date = item
            .published_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let category = item
            .category
            .as_ref()
            .map(|c| format!(" [{}]", c.name(locale)))
            .unwrap_or_default();
        writeln!(out, "{date}{category} {}", item.text.text("title", locale))?;
        let summary = item.text.text("summary", locale);
        if !summary.is_empty() {
            writeln!(out, "    {summary}")?;
        }
    }
    Ok(())
}

pub fn events(
    out: &mut String,
    data: &EventsData,
    filter: EventFilter,
    locale: Locale,
) -> fmt::Result {
    heading(out, t("news.events.title", locale), data, locale)?;
    match filter {
        EventFilter::Upcoming => section(out, t("news.events.upcoming", locale))?,
        EventFilter::Past => section(out, t("news.events.past", locale))?,
        EventFilter::All => {}
    }
    for event in data.filtered(filter) {
        let when = match (event.date, &event.time) {
            (Some(date), Some(time)) => format!("{} {time}", date.format("%Y-%m-%d")),
            (Some(date), None) => date.format("%Y-%m-%d").to_string(),
            (None, _) => String::new(),
        };
        writeln!(out, "{when}  {}", event.text.text("title", locale))?;
        let location = event.text.text("location", locale);
        if !location.is_empty() {
            writeln!(out, "    {location}")?;
        }
    }
    Ok(())
}

fn titled_list(
    out: &mut String,
    label: &str,
    items: &[LocalizedFields],
    locale: Locale,
) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    section(out, label)?;
    for item in items {
        let title = item.text("title", locale);
        match item.plain("year") {
            Some(year) => writeln!(out, "  {year}  {title}")?,
            None => writeln!(out, "  * {title}")?,
        }
    }
    Ok(())
}

pub fn mission(out: &mut String, data: &MissionContent, locale: Locale) -> fmt::Result {
    let mission = data.mission.value();
    heading(out, t("mission.title", locale), data, locale)?;
    for key in ["mission_text", "vision_title", "vision_text"] {
        let text = mission.mission.text(key, locale);
        if !text.is_empty() {
            writeln!(out, "{text}")?;
        }
    }
    titled_list(out, t("mission.history", locale), &mission.history, locale)?;
    titled_list(out, t("mission.values", locale), &mission.values, locale)?;
    titled_list(out, t("mission.priorities", locale), &mission.priorities, locale)?;
    titled_list(
        out,
        t("mission.achievements", locale),
        &mission.achievements,
        locale,
    )
}

pub fn research(out: &mut String, data: &ResearchData, locale: Locale) -> fmt::Result {
    heading(out, t("research.management.title", locale), data, locale)?;
    if data.is_empty() {
        return writeln!(out, "{}", t("research.management.noData", locale));
    }

    section(out, t("research.management.tabs.management", locale))?;
    for group in data.groups.value() {
        writeln!(out, "{}", group.type_display)?;
        for person in &group.positions {
            writeln!(
                out,
                "  {}: {}",
                person.text.text("title", locale),
                person.text.text("full_name", locale)
            )?;
            if let Some(email) = &person.contact_email {
                writeln!(out, "    {email}")?;
            }
        }
    }

    section(out, t("research.management.tabs.councils", locale))?;
    for council in data.councils.value() {
        writeln!(out, "  {}", council.text.text("name", locale))?;
        let chairman = localize_field(&council.text, "chairman", locale);
        if !chairman.is_empty() {
            writeln!(
                out,
                "    {}: {chairman}",
                t("research.management.chairman", locale)
            )?;
        }
    }
    Ok(())
}
