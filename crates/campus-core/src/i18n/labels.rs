//! Static UI labels, one `(ru, en, kg)` triple per key.
//!
//! An empty string marks a missing translation and falls back to `ru`.

use crate::locale::Locale;

pub(super) fn lookup(key: &str, locale: Locale) -> Option<&'static str> {
    let (ru, en, kg) = match key {
        // Management
        "management.title" => ("Руководство", "Management", "Жетекчилик"),
        "management.organizationTitle" => (
            "Организационная структура",
            "Organizational structure",
            "Уюштуруу түзүмү",
        ),
        "management.loadingStructure" => (
            "Загрузка структуры...",
            "Loading structure...",
            "Түзүм жүктөлүүдө...",
        ),
        "management.teachers" => ("Преподаватели", "Teaching staff", "Окутуучулар"),
        "management.university" => ("Университет", "University", "Университет"),
        "management.rector" => ("Ректор", "Rector", "Ректор"),
        "management.rectorBio" => ("Ректор университета", "Rector of the university", ""),

        // News and events
        "news.title" => ("Новости", "News", "Жаңылыктар"),
        "news.featured" => ("Главные новости", "Featured news", "Негизги жаңылыктар"),
        "news.loading" => ("Загрузка новостей...", "Loading news...", "Жаңылыктар жүктөлүүдө..."),
        "news.error" => ("Ошибка", "Error", "Ката"),
        "news.tryAgain" => ("Попробовать снова", "Try again", "Кайра аракет кылуу"),
        "news.fallbackNews.0.title" => (
            "Открытие нового симуляционного центра",
            "New simulation centre opens",
            "Жаңы симуляциялык борбор ачылды",
        ),
        "news.fallbackNews.0.summary" => (
            "Университет открыл современный симуляционный центр для студентов-медиков.",
            "The university opened a modern simulation centre for medical students.",
            "Университет медициналык студенттер үчүн заманбап симуляциялык борбор ачты.",
        ),
        "news.fallbackNews.1.title" => (
            "Международная научная конференция",
            "International research conference",
            "Эл аралык илимий конференция",
        ),
        "news.fallbackNews.1.summary" => (
            "Ведущие специалисты региона обсудили современные методы лечения.",
            "Leading specialists of the region discussed modern treatment methods.",
            "",
        ),
        "news.categories.news" => ("Новости", "News", "Жаңылыктар"),
        "news.categories.events" => ("События", "Events", "Иш-чаралар"),
        "news.events.title" => ("События", "Events", "Иш-чаралар"),
        "news.events.upcoming" => ("Предстоящие", "Upcoming", "Алдыдагы"),
        "news.events.past" => ("Прошедшие", "Past", "Өткөн"),

        // Mission
        "mission.title" => ("Миссия и ценности", "Mission and values", "Миссия жана баалуулуктар"),
        "mission.history" => ("История", "History", "Тарых"),
        "mission.values" => ("Ценности", "Values", "Баалуулуктар"),
        "mission.priorities" => ("Приоритеты", "Priorities", "Артыкчылыктар"),
        "mission.achievements" => ("Достижения", "Achievements", "Жетишкендиктер"),

        // Research
        "research.management.title" => (
            "Управление научной деятельностью",
            "Research management",
            "Илимий ишмердүүлүктү башкаруу",
        ),
        "research.management.tabs.management" => ("Руководство", "Leadership", "Жетекчилик"),
        "research.management.tabs.councils" => ("Советы", "Councils", "Кеңештер"),
        "research.management.noData" => ("Нет данных", "No data available", "Маалымат жок"),
        "research.management.chairman" => ("Председатель", "Chairman", "Төрага"),

        // Common
        "common.offline" => (
            "Показаны резервные данные",
            "Showing offline content",
            "Запастагы маалыматтар көрсөтүлдү",
        ),
        "common.language" => ("Язык", "Language", "Тил"),
        "common.languageChanged" => ("Язык изменён", "Language changed", "Тил өзгөртүлдү"),
        _ => return None,
    };
    let text = match locale {
        Locale::Ru => ru,
        Locale::En => en,
        Locale::Kg => kg,
    };
    (!text.is_empty()).then_some(text)
}
