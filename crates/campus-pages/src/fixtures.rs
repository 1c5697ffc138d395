//! Offline content shown when an endpoint cannot be reached.
//!
//! Every fixture has the same shape as the live payload it replaces, so
//! pages render it with no special casing.

use campus_core::i18n::t;
use campus_core::locale::Locale;
use campus_core::model::{
    parse_date, Council, EventItem, LocalizedFields, LocalizedString, MissionData, NewsCategory,
    NewsItem, OrgNode, ResearchPositionGroup, Teacher,
};

/// `{field}_{code}` for every locale, filled from a label key.
fn labelled(fields: &mut LocalizedFields, field: &str, key: &str) {
    for locale in Locale::ALL {
        fields.insert(&format!("{field}_{}", locale.code()), t(key, locale));
    }
}

fn label_string(key: &str) -> LocalizedString {
    let mut text = LocalizedString::default();
    for locale in Locale::ALL {
        text.set(locale, t(key, locale).to_string());
    }
    text
}

/// Single root node standing in for the whole structure.
pub fn management_root() -> OrgNode {
    let mut root = OrgNode::leaf(
        "university",
        label_string("management.university"),
        label_string("management.rector"),
    );
    root.bio = label_string("management.rectorBio");
    root
}

pub fn teachers() -> Vec<Teacher> {
    Vec::new()
}

fn category(key: &str) -> NewsCategory {
    let mut text = LocalizedFields::default();
    labelled(&mut text, "name", &format!("news.categories.{key}"));
    text.insert("slug", key);
    NewsCategory { text }
}

pub fn news() -> Vec<NewsItem> {
    let article = |n: usize, date: &str, cat: &str, image: &str, featured: bool| {
        let mut text = LocalizedFields::default();
        labelled(&mut text, "title", &format!("news.fallbackNews.{n}.title"));
        labelled(&mut text, "summary", &format!("news.fallbackNews.{n}.summary"));
        NewsItem {
            id: format!("fallback-{}", n + 1),
            published_at: parse_date(date),
            category: Some(category(cat)),
            image_url: Some(image.to_string()),
            is_featured: featured,
            text,
        }
    };
    vec![
        article(
            0,
            "2024-12-01",
            "news",
            "https://images.unsplash.com/photo-1582719471384-894e35a4b48f?w=400&h=250&fit=crop",
            true,
        ),
        article(
            1,
            "2024-11-28",
            "events",
            "https://images.unsplash.com/photo-1505751172876-fa1923c5c528?w=400&h=250&fit=crop",
            false,
        ),
    ]
}

pub fn events() -> Vec<EventItem> {
    let event = |id: &str, date: &str, time: &str, image: &str, pairs: &[(&str, &str)]| {
        let mut text = LocalizedFields::from_pairs(pairs);
        text.insert("status", "upcoming");
        EventItem {
            id: id.to_string(),
            date: parse_date(date),
            time: Some(time.to_string()),
            image: Some(image.to_string()),
            text,
        }
    };
    vec![
        event(
            "fallback-1",
            "2025-01-25",
            "09:00",
            "https://images.unsplash.com/photo-1505751172876-fa1923c5c528?w=400&h=250&fit=crop",
            &[
                ("title_ru", "Международная конференция по кардиологии"),
                ("title_en", "International cardiology conference"),
                ("location_ru", "Главный корпус, Актовый зал"),
                ("location_en", "Main building, Assembly hall"),
                (
                    "description_ru",
                    "Конференция с участием ведущих кардиологов региона.",
                ),
                ("category", "conference"),
            ],
        ),
        event(
            "fallback-2",
            "2025-02-15",
            "10:00",
            "https://images.unsplash.com/photo-1523240795612-9a054b0db644?w=400&h=250&fit=crop",
            &[
                ("title_ru", "День открытых дверей"),
                ("title_en", "Open day"),
                ("location_ru", "Все корпуса университета"),
                ("location_en", "All university buildings"),
                (
                    "description_ru",
                    "Приглашаем абитуриентов и их родителей познакомиться с университетом.",
                ),
                ("category", "open-day"),
            ],
        ),
    ]
}

pub fn mission() -> MissionData {
    let mut mission = LocalizedFields::default();
    labelled(&mut mission, "title", "mission.title");
    mission.insert("mission_text_ru", "Описание миссии недоступно");
    mission.insert("mission_text_en", "Mission description unavailable");
    mission.insert("vision_title_ru", "Наше видение");
    mission.insert("vision_title_en", "Our vision");

    let mut value = LocalizedFields::default();
    labelled(&mut value, "title", "mission.values");

    MissionData {
        mission,
        values: vec![value],
        ..MissionData::default()
    }
}

pub fn research_groups() -> Vec<ResearchPositionGroup> {
    Vec::new()
}

pub fn councils() -> Vec<Council> {
    Vec::new()
}
